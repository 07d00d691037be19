//! Foundation types for devcon.
//!
//! Shared by the console core and any host embedding it: the error
//! taxonomy and the console configuration.

pub mod config;
pub mod error;

pub use config::ConsoleConfig;
pub use error::{DevconError, Result};
