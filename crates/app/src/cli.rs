//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "netconsole")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file (default: ./netconsole.toml if present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset, e.g. `debug`
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Largest accepted document, in bytes
    #[arg(long, global = true, value_name = "BYTES")]
    pub max_document_size: Option<usize>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the known collection and environment formats
    Formats,

    /// Print the format a file is written in
    Detect {
        /// Collection or environment file
        file: PathBuf,
    },

    /// Print the collection tree of a file
    Tree {
        /// Collection file
        file: PathBuf,
    },

    /// Convert a collection to another format
    Convert {
        /// Collection file
        file: PathBuf,

        /// Target format id (default: the configured default format)
        #[arg(long)]
        to: Option<String>,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Convert environments to another format
    ConvertEnv {
        /// Environment file
        file: PathBuf,

        /// Target format id
        #[arg(long)]
        to: String,

        /// Environment to copy, by name (can be specified multiple times;
        /// default: all)
        #[arg(long = "select", value_name = "NAME")]
        select: Vec<String>,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

impl Cli {
    /// Applies command-line overrides to `config`.
    #[must_use]
    pub fn apply_overrides(&self, mut config: AppConfig) -> AppConfig {
        if let Some(level) = &self.log_level {
            config.log_level.clone_from(level);
        }
        if let Some(size) = self.max_document_size {
            config.max_document_size = size;
        }
        config
    }
}
