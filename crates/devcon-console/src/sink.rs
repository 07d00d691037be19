//! Output sinks the console writes to.

use std::collections::VecDeque;

use devcon_types::config::ConsoleConfig;

use crate::markup;

/// Append-only destination for console output.
///
/// Text may carry inline markup (see [`crate::markup`]); a sink either
/// renders it or strips it.
pub trait OutputSink {
    /// Append text to the current line. Embedded `\n` ends lines.
    fn write(&mut self, text: &str);

    /// Append text and end the line.
    fn write_line(&mut self, text: &str);

    /// Drop everything written so far.
    fn clear(&mut self);
}

/// In-memory scrollback.
///
/// Keeps completed lines with their markup, oldest first, up to
/// `max_lines` (0 means unbounded). Optionally mirrors each completed line,
/// stripped of markup, to the log under the `devcon::output` target.
#[derive(Debug, Clone, Default)]
pub struct BufferSink {
    lines: VecDeque<String>,
    pending: String,
    max_lines: usize,
    log_output: bool,
}

impl BufferSink {
    pub fn new(max_lines: usize) -> Self {
        Self {
            max_lines,
            ..Self::default()
        }
    }

    pub fn from_config(config: &ConsoleConfig) -> Self {
        Self::new(config.max_output_lines).with_logging(config.log_output)
    }

    pub fn with_logging(mut self, enabled: bool) -> Self {
        self.log_output = enabled;
        self
    }

    /// Completed lines, markup intact.
    pub fn lines(&self) -> Vec<&str> {
        self.lines.iter().map(String::as_str).collect()
    }

    /// Completed lines with markup stripped.
    pub fn plain_lines(&self) -> Vec<String> {
        self.lines.iter().map(|l| markup::strip(l)).collect()
    }

    /// All output as plain text, including an unfinished last line.
    pub fn plain_text(&self) -> String {
        let mut out: Vec<String> = self.plain_lines();
        if !self.pending.is_empty() {
            out.push(markup::strip(&self.pending));
        }
        out.join("\n")
    }

    /// Text written since the last completed line.
    pub fn pending(&self) -> &str {
        &self.pending
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.pending.is_empty()
    }

    fn finish_line(&mut self) {
        let line = std::mem::take(&mut self.pending);
        if self.log_output {
            log::info!(target: "devcon::output", "{}", markup::strip(&line));
        }
        self.lines.push_back(line);
        if self.max_lines > 0 {
            while self.lines.len() > self.max_lines {
                self.lines.pop_front();
            }
        }
    }
}

impl OutputSink for BufferSink {
    fn write(&mut self, text: &str) {
        let mut parts = text.split('\n');
        if let Some(first) = parts.next() {
            self.pending.push_str(first);
        }
        for part in parts {
            self.finish_line();
            self.pending.push_str(part);
        }
    }

    fn write_line(&mut self, text: &str) {
        self.write(text);
        self.finish_line();
    }

    fn clear(&mut self) {
        self.lines.clear();
        self.pending.clear();
    }
}
