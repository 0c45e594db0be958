//! CLI argument definitions using clap
//!
//! Commands:
//! - timetable query --records <path>... [--config <path>]
//! - timetable domains --records <path>... [--config <path>]
//! - timetable export --records <path>... --out <path> [--config <path>]
//!
//! `--records` may be repeated; files are loaded as one batch in the
//! order given.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// timetable - index, filter, sort and range-query class session records
#[derive(Parser, Debug)]
#[command(name = "timetable")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Apply a JSON array of operations from stdin and print the working result
    Query {
        /// JSON array of records (repeatable)
        #[arg(long, required = true)]
        records: Vec<PathBuf>,

        /// Engine configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the distinct values of every attribute
    Domains {
        /// JSON array of records (repeatable)
        #[arg(long, required = true)]
        records: Vec<PathBuf>,

        /// Engine configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Apply operations from stdin and write the chronological export
    Export {
        /// JSON array of records (repeatable)
        #[arg(long, required = true)]
        records: Vec<PathBuf>,

        /// Destination JSON file
        #[arg(long)]
        out: PathBuf,

        /// Engine configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
