//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI parser for `stripe-fake`.
#[derive(Debug, Parser)]
#[command(
    name = "stripe-fake",
    version,
    about = "Inspect and exercise billing API fixtures"
)]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Dispatch one call against a fixture file and print the response.
    Resolve {
        /// Method key, e.g. `customers.create`.
        method: String,
        /// Fixture file (defaults to `STRIPE_FAKE_FIXTURES`).
        #[arg(long)]
        fixtures: Option<PathBuf>,
        /// Call params as a JSON object.
        #[arg(long)]
        params: Option<String>,
    },
    /// List the fixture keys of a fixture file.
    Keys {
        /// Fixture file (defaults to `STRIPE_FAKE_FIXTURES`).
        #[arg(long)]
        fixtures: Option<PathBuf>,
    },
}
