//! Command descriptors and the fluent builder that commits them.

use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use devcon_types::error::{DevconError, Result};

use crate::argument::{ArgType, ArgumentSpec, ArgValue};
use crate::registry::CommandRegistry;
use crate::target::CommandTarget;
use crate::tokenizer::{QUOTES, SCREENER, SEPARATOR};

/// The registered definition of one command.
///
/// Fields are private and there are no setters: once committed, a
/// descriptor can only be read or removed from the registry as a whole.
#[derive(Clone)]
pub struct CommandDescriptor {
    name: String,
    target: Rc<dyn CommandTarget>,
    method: String,
    description: String,
    arguments: Vec<ArgumentSpec>,
}

impl CommandDescriptor {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn target(&self) -> &Rc<dyn CommandTarget> {
        &self.target
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn arguments(&self) -> &[ArgumentSpec] {
        &self.arguments
    }

    /// Usage line, e.g. `greet <name:string> [times:int=1]`.
    ///
    /// Commands without declared arguments take any number of words.
    pub fn usage(&self) -> String {
        if self.arguments.is_empty() {
            return format!("{} [args...]", self.name);
        }
        let mut out = self.name.clone();
        for spec in &self.arguments {
            out.push(' ');
            out.push_str(&spec.usage());
        }
        out
    }
}

impl fmt::Debug for CommandDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDescriptor")
            .field("name", &self.name)
            .field("target", &self.target.target_name())
            .field("method", &self.method)
            .field("description", &self.description)
            .field("arguments", &self.arguments)
            .finish()
    }
}

/// Fluent construction of a descriptor.
///
/// Nothing is validated until [`CommandBuilder::register`], which checks the
/// accumulated state and commits the descriptor to the registry.
#[must_use = "a command is only added once `register()` is called"]
pub struct CommandBuilder<'r> {
    registry: &'r mut CommandRegistry,
    name: String,
    target: Rc<dyn CommandTarget>,
    method: String,
    description: String,
    arguments: Vec<ArgumentSpec>,
}

impl<'r> CommandBuilder<'r> {
    pub(crate) fn new(
        registry: &'r mut CommandRegistry,
        name: String,
        target: Rc<dyn CommandTarget>,
        method: String,
    ) -> Self {
        Self {
            registry,
            name,
            target,
            method,
            description: String::new(),
            arguments: Vec::new(),
        }
    }

    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = text.into();
        self
    }

    /// Declare a required positional argument.
    pub fn argument(self, name: impl Into<String>, arg_type: ArgType) -> Self {
        self.argument_spec(ArgumentSpec::new(name, arg_type))
    }

    /// Declare an optional positional argument with a fallback value.
    pub fn optional_argument(
        self,
        name: impl Into<String>,
        arg_type: ArgType,
        default: Option<ArgValue>,
    ) -> Self {
        let spec = ArgumentSpec::new(name, arg_type);
        self.argument_spec(match default {
            Some(value) => spec.with_default(value),
            None => spec.optional(),
        })
    }

    /// Declare a prebuilt argument spec.
    pub fn argument_spec(mut self, spec: ArgumentSpec) -> Self {
        self.arguments.push(spec);
        self
    }

    /// Validate and commit the descriptor to the registry.
    pub fn register(self) -> Result<()> {
        let Self {
            registry,
            name,
            target,
            method,
            description,
            arguments,
        } = self;
        let descriptor = CommandDescriptor {
            name,
            target,
            method,
            description,
            arguments,
        };
        validate(&descriptor)?;
        registry.commit(descriptor)
    }
}

/// Check everything a descriptor needs before it can be dispatched to.
fn validate(descriptor: &CommandDescriptor) -> Result<()> {
    let name = &descriptor.name;
    if name.is_empty() {
        return Err(DevconError::InvalidCommand("command name is empty".to_string()));
    }
    // Names must survive the tokenizer as a single bare token.
    if name
        .chars()
        .any(|c| c.is_whitespace() || c == SEPARATOR || c == SCREENER || QUOTES.contains(&c))
    {
        return Err(DevconError::InvalidCommand(format!(
            "command name `{name}` contains whitespace, quotes, `;` or `\\`"
        )));
    }
    if !descriptor.target.has_method(&descriptor.method) {
        return Err(DevconError::InvalidCommand(format!(
            "{name}: target `{}` has no method `{}`",
            descriptor.target.target_name(),
            descriptor.method
        )));
    }

    let mut seen = HashSet::new();
    let mut optional_seen = false;
    for spec in &descriptor.arguments {
        if spec.name().is_empty() {
            return Err(DevconError::InvalidCommand(format!(
                "{name}: argument name is empty"
            )));
        }
        if !seen.insert(spec.name()) {
            return Err(DevconError::InvalidCommand(format!(
                "{name}: duplicate argument `{}`",
                spec.name()
            )));
        }
        if spec.is_required() && optional_seen {
            return Err(DevconError::InvalidCommand(format!(
                "{name}: required argument `{}` follows an optional one",
                spec.name()
            )));
        }
        optional_seen |= !spec.is_required();
        spec.arg_type().validate().map_err(|reason| {
            DevconError::InvalidCommand(format!("{name}: argument `{}`: {reason}", spec.name()))
        })?;
        if let Some(default) = spec.default()
            && !spec.arg_type().accepts(default)
        {
            return Err(DevconError::InvalidCommand(format!(
                "{name}: default `{default}` does not fit argument `{}` ({})",
                spec.name(),
                spec.arg_type()
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::MethodTarget;

    fn target() -> Rc<dyn CommandTarget> {
        MethodTarget::new("game")
            .with_method("greet", |_, _| Ok(()))
            .shared()
    }

    fn register_err(specs: Vec<ArgumentSpec>) -> DevconError {
        let mut reg = CommandRegistry::new();
        let mut builder = reg.create("greet", target(), "greet");
        for spec in specs {
            builder = builder.argument_spec(spec);
        }
        builder.register().unwrap_err()
    }

    #[test]
    fn register_commits_descriptor() {
        let mut reg = CommandRegistry::new();
        reg.create("greet", target(), "greet")
            .description("Say hello")
            .argument("name", ArgType::String)
            .optional_argument("times", ArgType::Int, Some(ArgValue::Int(1)))
            .register()
            .unwrap();
        let d = reg.get("greet").unwrap();
        assert_eq!(d.name(), "greet");
        assert_eq!(d.method(), "greet");
        assert_eq!(d.description(), "Say hello");
        assert_eq!(d.arguments().len(), 2);
        assert_eq!(d.target().target_name(), "game");
    }

    #[test]
    fn builder_does_not_touch_registry_until_register() {
        let mut reg = CommandRegistry::new();
        let builder = reg.create("greet", target(), "greet").description("x");
        drop(builder);
        assert!(reg.get("greet").is_none());
    }

    #[test]
    fn usage_lists_arguments() {
        let mut reg = CommandRegistry::new();
        reg.create("greet", target(), "greet")
            .argument("name", ArgType::String)
            .optional_argument("times", ArgType::Int, Some(ArgValue::Int(1)))
            .register()
            .unwrap();
        assert_eq!(
            reg.get("greet").unwrap().usage(),
            "greet <name:string> [times:int=1]"
        );
    }

    #[test]
    fn usage_without_arguments_is_variadic() {
        let mut reg = CommandRegistry::new();
        reg.create("greet", target(), "greet").register().unwrap();
        assert_eq!(reg.get("greet").unwrap().usage(), "greet [args...]");
    }

    #[test]
    fn rejects_empty_name() {
        let mut reg = CommandRegistry::new();
        let err = reg.create("", target(), "greet").register().unwrap_err();
        assert!(matches!(err, DevconError::InvalidCommand(_)));
    }

    #[test]
    fn rejects_names_the_tokenizer_would_split() {
        for bad in ["two words", "semi;colon", "quo\"te", "back\\slash", "tab\tbed"] {
            let mut reg = CommandRegistry::new();
            let err = reg.create(bad, target(), "greet").register().unwrap_err();
            assert!(matches!(err, DevconError::InvalidCommand(_)), "{bad}");
        }
    }

    #[test]
    fn rejects_unknown_method() {
        let mut reg = CommandRegistry::new();
        let err = reg.create("greet", target(), "wave").register().unwrap_err();
        assert!(err.to_string().contains("no method `wave`"));
    }

    #[test]
    fn rejects_duplicate_argument_names() {
        let err = register_err(vec![
            ArgumentSpec::new("name", ArgType::String),
            ArgumentSpec::new("name", ArgType::Int),
        ]);
        assert!(err.to_string().contains("duplicate argument `name`"));
    }

    #[test]
    fn rejects_required_after_optional() {
        let err = register_err(vec![
            ArgumentSpec::new("loud", ArgType::Bool).optional(),
            ArgumentSpec::new("name", ArgType::String),
        ]);
        assert!(err.to_string().contains("follows an optional"));
    }

    #[test]
    fn rejects_default_of_wrong_kind() {
        let err = register_err(vec![
            ArgumentSpec::new("times", ArgType::Int).with_default(ArgValue::Str("1".into())),
        ]);
        assert!(matches!(err, DevconError::InvalidCommand(_)));
    }

    #[test]
    fn rejects_bad_range() {
        let err = register_err(vec![ArgumentSpec::new(
            "level",
            ArgType::IntRange {
                min: 10,
                max: 0,
                step: 1,
            },
        )]);
        assert!(err.to_string().contains("bad int range"));
    }

    #[test]
    fn rejected_builder_leaves_registry_empty() {
        let mut reg = CommandRegistry::new();
        let _ = reg.create("greet", target(), "wave").register();
        assert!(reg.is_empty());
    }
}
