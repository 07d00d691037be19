//! Error types for devcon.

use std::io;

/// Errors produced by the developer console.
///
/// None of these are fatal to the host: dispatch-time failures are written
/// to the output sink and execution of the remaining sub-commands goes on.
#[derive(Debug, thiserror::Error)]
pub enum DevconError {
    #[error("command already registered: {0}")]
    DuplicateCommand(String),

    #[error("command not found: {0}")]
    CommandNotFound(String),

    #[error("malformed arguments: {0}")]
    MalformedArguments(String),

    #[error("invalid command definition: {0}")]
    InvalidCommand(String),

    #[error("command error: {0}")]
    Command(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, DevconError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_command_display() {
        let e = DevconError::DuplicateCommand("greet".into());
        assert_eq!(format!("{e}"), "command already registered: greet");
    }

    #[test]
    fn command_not_found_display() {
        let e = DevconError::CommandNotFound("missing".into());
        assert_eq!(format!("{e}"), "command not found: missing");
    }

    #[test]
    fn malformed_arguments_display() {
        let e = DevconError::MalformedArguments("missing required argument `name`".into());
        assert_eq!(
            format!("{e}"),
            "malformed arguments: missing required argument `name`"
        );
    }

    #[test]
    fn invalid_command_display() {
        let e = DevconError::InvalidCommand("empty name".into());
        assert_eq!(format!("{e}"), "invalid command definition: empty name");
    }

    #[test]
    fn command_error_display() {
        let e = DevconError::Command("boom".into());
        assert_eq!(format!("{e}"), "command error: boom");
    }

    #[test]
    fn config_error_display() {
        let e = DevconError::Config("bad value".into());
        assert_eq!(format!("{e}"), "config error: bad value");
    }

    #[test]
    fn io_error_from_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "gone");
        let e: DevconError = io_err.into();
        let msg = format!("{e}");
        assert!(msg.contains("I/O error"));
        assert!(msg.contains("gone"));
    }

    #[test]
    fn toml_error_from_conversion() {
        let toml_err = toml::from_str::<toml::Value>("this is [[[not valid toml").unwrap_err();
        let e: DevconError = toml_err.into();
        assert!(format!("{e}").contains("TOML parse error"));
    }

    #[test]
    fn error_is_debug() {
        let e = DevconError::DuplicateCommand("x".into());
        assert!(format!("{e:?}").contains("DuplicateCommand"));
    }
}
