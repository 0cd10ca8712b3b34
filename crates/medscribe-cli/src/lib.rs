//! Medscribe CLI library.
//!
//! Local developer tooling around the extraction pipeline: extract entities from
//! a text file, inspect the pattern library, and walk a mock upload through review.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
