//! The console: input line in, dispatched commands out.

use std::rc::Rc;

use devcon_types::config::ConsoleConfig;
use devcon_types::error::Result;

use crate::argument::bind_arguments;
use crate::builtins::register_builtins;
use crate::descriptor::CommandBuilder;
use crate::events::{ConsoleEvent, SubscriptionId};
use crate::history::History;
use crate::input::InputLine;
use crate::markup;
use crate::registry::CommandRegistry;
use crate::sink::{BufferSink, OutputSink};
use crate::target::{CommandTarget, Invocation};
use crate::tokenizer::{ParsedCommand, parse_command, split_commands};

/// Markup color used for error lines.
const ERROR_COLOR: &str = "red";

/// What happened to one dispatched sub-command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The command ran and returned successfully.
    Executed(String),
    /// No command is registered under this name.
    NotFound(String),
    /// Arguments did not fit the command's schema; it was not invoked.
    Malformed(String),
    /// The command ran and returned an error.
    Failed(String),
}

/// A developer console instance.
///
/// Owns the command registry, the history ring, the pending input line and
/// the output sink. `execute` runs synchronously to completion.
pub struct Console<S: OutputSink = BufferSink> {
    config: ConsoleConfig,
    registry: CommandRegistry,
    history: History,
    input: InputLine,
    output: S,
}

impl Console<BufferSink> {
    /// A console writing into an in-memory scrollback sized from `config`.
    pub fn with_buffer(config: ConsoleConfig) -> Result<Self> {
        let output = BufferSink::from_config(&config);
        Self::new(config, output)
    }
}

impl<S: OutputSink> Console<S> {
    pub fn new(config: ConsoleConfig, output: S) -> Result<Self> {
        let mut console = Self {
            registry: CommandRegistry::new(),
            history: History::new(config.history_capacity),
            input: InputLine::new(),
            output,
            config,
        };
        if console.config.register_builtins {
            register_builtins(&mut console.registry)?;
        }
        log::debug!(
            "console ready with {} command(s), history capacity {}",
            console.registry.len(),
            console.history.capacity()
        );
        Ok(console)
    }

    // -- Registration surface --

    /// Start defining a command; commit it with `.register()`.
    pub fn add_command(
        &mut self,
        name: impl Into<String>,
        target: Rc<dyn CommandTarget>,
        method: impl Into<String>,
    ) -> CommandBuilder<'_> {
        self.registry.create(name, target, method)
    }

    pub fn remove_command(&mut self, name: &str) -> usize {
        self.registry.remove(name)
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&ConsoleEvent) + 'static) -> SubscriptionId {
        self.registry.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.registry.unsubscribe(id)
    }

    // -- Accessors --

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut CommandRegistry {
        &mut self.registry
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn input(&self) -> &InputLine {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputLine {
        &mut self.input
    }

    pub fn output(&self) -> &S {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut S {
        &mut self.output
    }

    // -- Execution --

    /// Execute whatever is in the input line.
    pub fn submit(&mut self) -> Vec<Outcome> {
        let line = self.input.text().to_string();
        self.execute(&line)
    }

    /// Echo, split, parse and dispatch one input line.
    ///
    /// Sub-commands run left to right; a missing or failing one does not
    /// stop the rest. Afterwards the line goes to history (unless blank)
    /// and the input line is cleared.
    pub fn execute(&mut self, line: &str) -> Vec<Outcome> {
        let echo = format!("{}{}", self.config.prompt, markup::escape(line));
        self.output.write_line(&echo);

        let mut outcomes = Vec::new();
        for raw in split_commands(line) {
            if raw.trim().is_empty() {
                continue;
            }
            let parsed = parse_command(raw);
            if parsed.is_empty() {
                continue;
            }
            outcomes.push(self.dispatch(&parsed));
        }

        if !line.trim().is_empty() {
            self.history.push(line);
        }
        self.input.clear();
        outcomes
    }

    /// Resolve and invoke one parsed command.
    pub fn dispatch(&mut self, parsed: &ParsedCommand) -> Outcome {
        let name = parsed.name.clone();
        let Some(descriptor) = self.registry.get(&name).cloned() else {
            log::warn!("command not found: {name}");
            self.write_error(&format!("Command `{}` not found.", markup::escape(&name)));
            self.registry
                .emit(&ConsoleEvent::CommandNotFound { name: name.clone() });
            return Outcome::NotFound(name);
        };

        let args = match bind_arguments(&name, descriptor.arguments(), &parsed.arguments) {
            Ok(args) => args,
            Err(e) => {
                log::warn!("{e}");
                self.write_error(&markup::escape(&e.to_string()));
                self.output
                    .write_line(&format!("Usage: {}", markup::escape(&descriptor.usage())));
                return Outcome::Malformed(name);
            },
        };

        log::debug!(
            "dispatch `{name}` -> {}.{} ({} arg(s))",
            descriptor.target().target_name(),
            descriptor.method(),
            args.len()
        );
        let result = {
            let mut ctx = Invocation {
                command: &name,
                registry: &self.registry,
                history: &self.history,
                output: &mut self.output,
            };
            descriptor
                .target()
                .invoke(descriptor.method(), &args, &mut ctx)
        };
        let outcome = match result {
            Ok(()) => Outcome::Executed(name),
            Err(e) => {
                log::warn!("command `{name}` failed: {e}");
                self.write_error(&format!("error: {}", markup::escape(&e.to_string())));
                Outcome::Failed(name)
            },
        };
        self.registry
            .emit(&ConsoleEvent::CommandExecuted(descriptor));
        outcome
    }

    fn write_error(&mut self, text: &str) {
        self.output.write_line(&markup::color(ERROR_COLOR, text));
    }
}
