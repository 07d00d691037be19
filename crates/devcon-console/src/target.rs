//! Invocable command owners and the context they run in.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use devcon_types::error::{DevconError, Result};

use crate::argument::ArgValue;
use crate::history::History;
use crate::registry::CommandRegistry;
use crate::sink::OutputSink;

/// Context handed to a command when it runs.
pub struct Invocation<'a> {
    /// Name the command was invoked under.
    pub command: &'a str,
    /// Registered commands, for discovery.
    pub registry: &'a CommandRegistry,
    /// Lines submitted before the current one.
    pub history: &'a History,
    /// Where the command writes its output.
    pub output: &'a mut dyn OutputSink,
}

impl Invocation<'_> {
    pub fn write(&mut self, text: &str) {
        self.output.write(text);
    }

    pub fn write_line(&mut self, text: &str) {
        self.output.write_line(text);
    }
}

/// An owner of invocable methods that commands point at.
///
/// A descriptor stores a target plus the name of one of its methods; the
/// dispatcher calls `invoke` with that name and the bound arguments.
pub trait CommandTarget {
    /// Human-readable owner name, reported in `command_added` events.
    fn target_name(&self) -> &str;

    /// Whether `method` can be invoked on this target.
    fn has_method(&self, method: &str) -> bool;

    /// Run `method` with bound arguments.
    fn invoke(&self, method: &str, args: &[ArgValue], ctx: &mut Invocation<'_>) -> Result<()>;
}

type Method = Box<dyn Fn(&[ArgValue], &mut Invocation<'_>) -> Result<()>>;

/// A named target backed by a table of closures.
///
/// ```ignore
/// let player = MethodTarget::new("player")
///     .with_method("heal", |args, ctx| {
///         ctx.write_line(&format!("healed {}", args[0]));
///         Ok(())
///     })
///     .shared();
/// ```
pub struct MethodTarget {
    name: String,
    methods: HashMap<String, Method>,
}

impl MethodTarget {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: HashMap::new(),
        }
    }

    /// Add a method. A later method with the same name replaces the earlier.
    pub fn with_method<F>(mut self, method: impl Into<String>, f: F) -> Self
    where
        F: Fn(&[ArgValue], &mut Invocation<'_>) -> Result<()> + 'static,
    {
        self.methods.insert(method.into(), Box::new(f));
        self
    }

    /// Wrap into the shared handle descriptors hold.
    pub fn shared(self) -> Rc<dyn CommandTarget> {
        Rc::new(self)
    }
}

impl CommandTarget for MethodTarget {
    fn target_name(&self) -> &str {
        &self.name
    }

    fn has_method(&self, method: &str) -> bool {
        self.methods.contains_key(method)
    }

    fn invoke(&self, method: &str, args: &[ArgValue], ctx: &mut Invocation<'_>) -> Result<()> {
        let f = self.methods.get(method).ok_or_else(|| {
            DevconError::Command(format!("{}: no method `{method}`", self.name))
        })?;
        f(args, ctx)
    }
}

impl fmt::Debug for MethodTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut methods: Vec<&str> = self.methods.keys().map(String::as_str).collect();
        methods.sort_unstable();
        f.debug_struct("MethodTarget")
            .field("name", &self.name)
            .field("methods", &methods)
            .finish()
    }
}
