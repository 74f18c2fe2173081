//! CLI for the gateinv payload inventory.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use gateinv_core::{config, logging};
use gateinv_core::scan::Scanner;
use std::path::PathBuf;

use commands::{run_inventory, run_resolve};

/// Top-level CLI for gateinv.
#[derive(Debug, Parser)]
#[command(name = "gateinv")]
#[command(
    about = "gateinv: inventory feature gates and dynamic configs in captured bootstrap payloads",
    long_about = None
)]
pub struct Cli {
    /// Maximum nested reference hops per document (overrides config).
    #[arg(long, global = true, value_name = "N")]
    pub max_depth: Option<usize>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Resolve one HAR file or page dump and print its summary.
    Resolve {
        /// Path to a `.har` capture or a text/HTML dump.
        path: PathBuf,
    },

    /// Scan files and directories and print the aggregated summary.
    Inventory {
        /// Files or directories to scan (defaults to `default_paths` from config).
        paths: Vec<PathBuf>,

        /// Write the summary JSON to this file instead of stdout.
        #[arg(long, short, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

impl CliCommand {
    /// Subcommand name as typed on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            CliCommand::Resolve { .. } => "resolve",
            CliCommand::Inventory { .. } => "inventory",
        }
    }

    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let mut cfg = config::load_or_init()?;
        if let Some(depth) = cli.max_depth {
            cfg.max_resolve_depth = depth;
        }
        let span = logging::run_span(cli.command.name(), &cfg);
        let _guard = span.enter();
        tracing::debug!("loaded config: {:?}", cfg);
        let scanner = Scanner::from_config(&cfg)?;

        match cli.command {
            CliCommand::Resolve { path } => run_resolve(&scanner, &path)?,
            CliCommand::Inventory { paths, output } => {
                let paths = if paths.is_empty() {
                    cfg.default_paths.clone()
                } else {
                    paths
                };
                run_inventory(&scanner, &paths, output.as_deref())?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
