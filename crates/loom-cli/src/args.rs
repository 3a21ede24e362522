//! Command-line argument definitions for the Loom CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. A subcommand selects between checking a document and
//! exporting its dependency graph; the configuration file and logging
//! verbosity apply to both.

use std::path::Path;

use clap::{Parser, Subcommand};

/// Command-line arguments for the Loom tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,
}

/// The operation to run on a document.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Report diagnostics for a document and fail if it has errors
    Check {
        #[arg(help = "Path to the input .loom file")]
        input: String,
    },

    /// Write the positioned dependency graph of a document as JSON
    Graph {
        #[arg(help = "Path to the input .loom file")]
        input: String,

        /// Output file. Prints to stdout when omitted.
        #[arg(short, long)]
        output: Option<String>,

        /// Module to mark as active
        #[arg(long)]
        active: Option<String>,
    },
}

impl Command {
    /// The input document path.
    pub fn input(&self) -> &Path {
        match self {
            Command::Check { input } | Command::Graph { input, .. } => Path::new(input),
        }
    }
}
