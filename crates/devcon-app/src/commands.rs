//! Demo commands registered by the interactive host.

use std::cell::Cell;
use std::rc::Rc;

use devcon_console::{ArgType, ArgValue, Console, FilterMode, MethodTarget, OutputSink, Result};
use devcon_console::markup;

/// Register `quit`/`exit` plus a few commands exercising typed arguments.
pub fn register_demo_commands<S: OutputSink>(
    console: &mut Console<S>,
    quit: Rc<Cell<bool>>,
) -> Result<()> {
    let session = MethodTarget::new("session")
        .with_method("quit", move |_, ctx| {
            ctx.write_line("Exiting.");
            quit.set(true);
            Ok(())
        })
        .shared();
    console
        .add_command("quit", Rc::clone(&session), "quit")
        .description("Leave the console")
        .register()?;
    console
        .add_command("exit", session, "quit")
        .description("Leave the console")
        .register()?;

    let volume = Rc::new(Cell::new(0.5_f64));
    let game = MethodTarget::new("game")
        .with_method("greet", |args, ctx| {
            let name = args.first().and_then(ArgValue::as_str).unwrap_or("stranger");
            let times = args.get(1).and_then(ArgValue::as_int).unwrap_or(1);
            for _ in 0..times {
                ctx.write_line(&format!("Hello, [b]{}[/b]!", markup::escape(name)));
            }
            Ok(())
        })
        .with_method("volume", {
            let volume = Rc::clone(&volume);
            move |args, ctx| {
                if let Some(level) = args.first().and_then(ArgValue::as_float) {
                    volume.set(level);
                }
                ctx.write_line(&format!("volume = {:.2}", volume.get()));
                Ok(())
            }
        })
        .with_method("difficulty", |args, ctx| {
            let level = args.first().and_then(ArgValue::as_str).unwrap_or("normal");
            ctx.write_line(&format!("difficulty set to {level}"));
            Ok(())
        })
        .shared();

    console
        .add_command("greet", Rc::clone(&game), "greet")
        .description("Greet someone, optionally more than once")
        .argument("name", ArgType::String)
        .optional_argument(
            "times",
            ArgType::IntRange {
                min: 1,
                max: 5,
                step: 1,
            },
            Some(ArgValue::Int(1)),
        )
        .register()?;
    console
        .add_command("volume", Rc::clone(&game), "volume")
        .description("Show or set the master volume")
        .optional_argument(
            "level",
            ArgType::FloatRange {
                min: 0.0,
                max: 1.0,
                step: 0.05,
            },
            None,
        )
        .register()?;
    console
        .add_command("difficulty", game, "difficulty")
        .description("Set the game difficulty")
        .argument(
            "level",
            ArgType::Filter {
                values: vec!["easy".into(), "normal".into(), "hard".into()],
                mode: FilterMode::Allow,
            },
        )
        .register()?;
    Ok(())
}
