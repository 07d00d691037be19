//! Console configuration loaded from TOML.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DevconError, Result};

/// Tunables for a console instance.
///
/// Every field has a default, so an empty TOML document is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Number of submitted lines kept in history (0 disables history).
    pub history_capacity: usize,
    /// Scrollback limit of the in-memory output sink.
    pub max_output_lines: usize,
    /// Prefix written before the echoed input line. May contain markup.
    pub prompt: String,
    /// Register `help`, `commands`, `echo`, `history` and `clear`.
    pub register_builtins: bool,
    /// Mirror completed output lines, stripped of markup, to the log.
    pub log_output: bool,
}

fn default_history_capacity() -> usize {
    100
}

fn default_max_output_lines() -> usize {
    1000
}

fn default_prompt() -> String {
    "$ ".to_string()
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            history_capacity: default_history_capacity(),
            max_output_lines: default_max_output_lines(),
            prompt: default_prompt(),
            register_builtins: true,
            log_output: false,
        }
    }
}

impl ConsoleConfig {
    /// Parse and validate a config from a TOML string.
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that parse fine but cannot be used.
    pub fn validate(&self) -> Result<()> {
        // The echoed input line must stay a single output line.
        if self.prompt.contains(['\n', '\r']) {
            return Err(DevconError::Config(
                "console.toml: prompt must not contain line breaks".to_string(),
            ));
        }
        Ok(())
    }

    /// Read and parse a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}
