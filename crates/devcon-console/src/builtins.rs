//! Built-in console commands: help, commands, echo, history, clear.

use std::rc::Rc;

use devcon_types::error::{DevconError, Result};

use crate::argument::{ArgType, ArgValue};
use crate::markup;
use crate::registry::CommandRegistry;
use crate::target::{CommandTarget, Invocation};

const METHODS: [&str; 5] = ["help", "commands", "echo", "history", "clear"];

/// Register all built-in commands into a registry.
pub fn register_builtins(reg: &mut CommandRegistry) -> Result<()> {
    let target: Rc<dyn CommandTarget> = Rc::new(Builtins);

    reg.create("help", Rc::clone(&target), "help")
        .description("List commands or describe one")
        .optional_argument("command", ArgType::String, None)
        .register()?;
    reg.create("commands", Rc::clone(&target), "commands")
        .description("List command names matching a prefix")
        .optional_argument("prefix", ArgType::String, None)
        .register()?;
    reg.create("echo", Rc::clone(&target), "echo")
        .description("Print arguments")
        .register()?;
    reg.create("history", Rc::clone(&target), "history")
        .description("Show previously submitted lines")
        .register()?;
    reg.create("clear", target, "clear")
        .description("Clear the console output")
        .register()?;
    Ok(())
}

/// Owner of the built-in methods.
struct Builtins;

impl CommandTarget for Builtins {
    fn target_name(&self) -> &str {
        "console"
    }

    fn has_method(&self, method: &str) -> bool {
        METHODS.contains(&method)
    }

    fn invoke(&self, method: &str, args: &[ArgValue], ctx: &mut Invocation<'_>) -> Result<()> {
        match method {
            "help" => help(args, ctx),
            "commands" => commands(args, ctx),
            "echo" => {
                let words: Vec<String> = args.iter().map(ArgValue::to_string).collect();
                ctx.write_line(&words.join(" "));
                Ok(())
            },
            "history" => history(ctx),
            "clear" => {
                ctx.output.clear();
                Ok(())
            },
            other => Err(DevconError::Command(format!("console: no method `{other}`"))),
        }
    }
}

fn help(args: &[ArgValue], ctx: &mut Invocation<'_>) -> Result<()> {
    if let Some(name) = args.first().and_then(ArgValue::as_str) {
        let descriptor = ctx
            .registry
            .get(name)
            .ok_or_else(|| DevconError::CommandNotFound(name.to_string()))?;
        let out = format!(
            "[b]{}[/b]\n  {}\n  Usage: {}",
            markup::escape(descriptor.name()),
            markup::escape(descriptor.description()),
            markup::escape(&descriptor.usage())
        );
        ctx.write_line(&out);
        return Ok(());
    }

    let descriptors = ctx.registry.list();
    let mut out = format!("Commands ({}):\n", descriptors.len());
    for d in &descriptors {
        if d.description().is_empty() {
            out.push_str(&format!("  {}\n", markup::escape(d.name())));
        } else {
            out.push_str(&format!(
                "  {} {}\n",
                markup::escape(&format!("{:12}", d.name())),
                markup::escape(d.description())
            ));
        }
    }
    out.push_str("\nType 'help <command>' for details.");
    ctx.write_line(&out);
    Ok(())
}

fn commands(args: &[ArgValue], ctx: &mut Invocation<'_>) -> Result<()> {
    let prefix = args.first().and_then(ArgValue::as_str).unwrap_or("");
    let names: Vec<String> = ctx
        .registry
        .find(prefix)
        .iter()
        .map(|d| markup::escape(d.name()))
        .collect();
    if names.is_empty() {
        ctx.write_line("(no matching commands)");
    } else {
        ctx.write_line(&names.join("\n"));
    }
    Ok(())
}

fn history(ctx: &mut Invocation<'_>) -> Result<()> {
    if ctx.history.is_empty() {
        ctx.write_line("(no history)");
        return Ok(());
    }
    let mut out = String::new();
    for (i, entry) in ctx.history.iter().enumerate() {
        out.push_str(&format!("  {:4}  {}\n", i + 1, markup::escape(entry)));
    }
    ctx.write_line(out.trim_end());
    Ok(())
}
