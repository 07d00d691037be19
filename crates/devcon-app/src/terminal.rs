//! Output sink that prints to the process's stdout.

use std::io::{self, Write};

use devcon_console::OutputSink;
use devcon_console::markup;

/// Writes console output to stdout with markup stripped.
pub struct TerminalSink {
    out: io::Stdout,
}

impl TerminalSink {
    pub fn new() -> Self {
        Self { out: io::stdout() }
    }

    fn emit(&mut self, text: &str, newline: bool) {
        self.emit_raw(&markup::strip(text), newline);
    }

    fn emit_raw(&mut self, plain: &str, newline: bool) {
        let mut out = self.out.lock();
        let result = if newline {
            writeln!(out, "{plain}")
        } else {
            write!(out, "{plain}").and_then(|()| out.flush())
        };
        if let Err(e) = result {
            log::warn!("stdout write failed: {e}");
        }
    }
}

impl Default for TerminalSink {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputSink for TerminalSink {
    fn write(&mut self, text: &str) {
        self.emit(text, false);
    }

    fn write_line(&mut self, text: &str) {
        self.emit(text, true);
    }

    fn clear(&mut self) {
        // ANSI: clear screen, cursor home.
        self.emit_raw("\x1b[2J\x1b[H", false);
    }
}
