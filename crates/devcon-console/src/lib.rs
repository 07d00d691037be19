//! Developer console core.
//!
//! A console reads a line, splits it on unescaped `;` into sub-commands,
//! tokenizes each into a name and arguments, and dispatches it through a
//! registry of named commands. Commands are declared with a fluent builder
//! and committed with `register()`; hosts observe changes and dispatches
//! through `ConsoleEvent` listeners.

pub mod argument;
pub mod builtins;
mod console;
pub mod descriptor;
pub mod events;
pub mod history;
pub mod input;
pub mod markup;
pub mod registry;
pub mod sink;
pub mod target;
pub mod tokenizer;

/// Argument types, bound values and schema entries.
pub use argument::{ArgType, ArgValue, ArgumentSpec, FilterMode};
/// Register `help`, `commands`, `echo`, `history` and `clear`.
pub use builtins::register_builtins;
/// The console and per-sub-command dispatch results.
pub use console::{Console, Outcome};
/// Registered command definitions and their builder.
pub use descriptor::{CommandBuilder, CommandDescriptor};
/// Notifications emitted by the core.
pub use events::{ConsoleEvent, SubscriptionId};
/// Bounded history of submitted lines.
pub use history::History;
/// Pending input text.
pub use input::InputLine;
/// Name -> descriptor mapping.
pub use registry::CommandRegistry;
/// Output destinations.
pub use sink::{BufferSink, OutputSink};
/// Command owners and the invocation context.
pub use target::{CommandTarget, Invocation, MethodTarget};
/// Line splitting and tokenizing.
pub use tokenizer::{ParsedCommand, parse_command, parse_line, split_commands};

pub use devcon_types::{ConsoleConfig, DevconError, Result};
