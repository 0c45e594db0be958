//! CLI module for timetable
//!
//! Provides command-line interface for:
//! - query: apply operations read from stdin, print the working result
//! - domains: print per-attribute distinct values
//! - export: apply operations, write the chronological export file

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{domains, export, query, run, run_command};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_operations, write_error, write_response};
