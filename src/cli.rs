//! Command-line interface for parlance
//!
//! Provides argument parsing using clap derive macros.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Real-time voice conversation server
#[derive(Parser, Debug)]
#[command(name = "parlance", version, about = "Real-time voice conversation server")]
pub struct Cli {
    /// Subcommand to execute (default: serve)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the conversation server
    Serve {
        /// Listen port override
        #[arg(long, value_name = "PORT")]
        port: Option<u16>,

        /// Listen host override
        #[arg(long, value_name = "HOST")]
        host: Option<String>,
    },

    /// Print the effective configuration as TOML
    Config,
}
