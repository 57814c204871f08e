//! CLI module
//!
//! Command-line interface for paginating document files.
//!
//! # Commands
//!
//! - `page` - Print one page of a JSON document array
//! - `config` - Print the effective pagination config

mod commands;
mod runner;

pub use commands::{Cli, Commands, KeyType, OutputFormat};
pub use runner::Runner;
