//! Seatrack CLI library.
//!
//! Configuration, argument parsing, output formatting and the single
//! orchestration path behind the `seatrack` binary.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::Cli;
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
