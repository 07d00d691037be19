//! devcon interactive host.
//!
//! Reads lines from stdin and feeds them to a console whose output goes to
//! stdout with markup stripped. The config file comes from the first CLI
//! argument or `DEVCON_CONFIG`; defaults apply when neither is set.
//! Type `help` for commands and `quit` to exit.

mod commands;
mod terminal;

use std::cell::Cell;
use std::io::{self, BufRead};
use std::path::Path;
use std::rc::Rc;

use anyhow::{Context, Result};

use devcon_console::{Console, ConsoleConfig, OutputSink};
use terminal::TerminalSink;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = load_config()?;
    log::info!(
        "Starting devcon (history {}, builtins {})",
        config.history_capacity,
        if config.register_builtins { "on" } else { "off" }
    );

    let mut console = Console::new(config, TerminalSink::new())?;
    console.subscribe(|event| log::debug!("{event:?}"));

    let quit = Rc::new(Cell::new(false));
    commands::register_demo_commands(&mut console, Rc::clone(&quit))?;
    log::info!("Registered {} commands", console.registry().len());

    console
        .output_mut()
        .write_line("[b]devcon[/b] -- type 'help' for commands, 'quit' to exit");

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;
        console.input_mut().set(&line);
        console.submit();
        if quit.get() {
            break;
        }
    }

    log::info!("Bye");
    Ok(())
}

/// Resolve the config from CLI arg, `DEVCON_CONFIG`, or defaults.
fn load_config() -> Result<ConsoleConfig> {
    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("DEVCON_CONFIG").ok());
    match path {
        Some(path) => {
            let config = ConsoleConfig::load(Path::new(&path))
                .with_context(|| format!("loading config {path}"))?;
            log::info!("Loaded config from {path}");
            Ok(config)
        },
        None => Ok(ConsoleConfig::default()),
    }
}
