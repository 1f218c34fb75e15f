// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, Subcommand, ValueEnum};

/// Command-line arguments for `rungraph`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "rungraph",
    version,
    about = "Lay out runnable dependency graphs and submit them to a scheduling service.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the runnable set (TOML).
    ///
    /// Default: `Runnables.toml` in the current working directory.
    #[arg(long, global = true, value_name = "PATH", default_value = "Runnables.toml")]
    pub config: String,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `RUNGRAPH_LOG` or a default level will be used.
    #[arg(long, global = true, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Parse + validate the runnable set and print a summary.
    Validate,

    /// Print the rank and position of every runnable, level by level.
    Layout {
        /// Use the radial placement instead of the configured policy.
        #[arg(long)]
        radial: bool,
    },

    /// Print the drawable diagram (nodes + edges) as JSON.
    Diagram {
        /// Pretty-print the JSON output.
        #[arg(long)]
        pretty: bool,
    },

    /// Submit the runnable set to the scheduling service.
    Submit {
        /// Base URL of the scheduling service (overrides `[config].service_url`).
        #[arg(long, value_name = "URL")]
        url: Option<String>,

        /// Number of cores (overrides `[config].num_cores`).
        #[arg(long, value_name = "N")]
        num_cores: Option<u32>,

        /// Algorithm result to print; defaults to the first one returned.
        #[arg(long, value_name = "KEY")]
        algorithm: Option<String>,

        /// Write the decoded Gantt chart (PNG) of the selected result here.
        #[arg(long, value_name = "PATH")]
        gantt_out: Option<String>,
    },

    /// Check that the scheduling service is reachable and healthy.
    Health {
        /// Base URL of the scheduling service (overrides `[config].service_url`).
        #[arg(long, value_name = "URL")]
        url: Option<String>,
    },
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
