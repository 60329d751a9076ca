//! CLI for VG.

mod bridge;
mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use vg_core::config;

use commands::{
    run_classify, run_clear_history, run_completions, run_history, run_replay, run_serve,
};

/// Top-level CLI for VG.
#[derive(Debug, Parser)]
#[command(name = "vg")]
#[command(about = "VG: per-tab video resource detection", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Run the host bridge: JSON messages on stdin, replies and badges on stdout.
    Serve,

    /// Feed a JSON-lines event log through a collector and print each tab's inventory.
    Replay {
        /// Path to the event log.
        path: PathBuf,
    },

    /// Check whether a URL looks like video and show its derived filename.
    Classify {
        /// Absolute URL to check.
        url: String,

        /// Response Content-Type, if known.
        #[arg(long, value_name = "TYPE")]
        content_type: Option<String>,
    },

    /// Show recorded downloads, newest first.
    History {
        /// Show at most N entries.
        #[arg(long, value_name = "N")]
        limit: Option<u32>,
    },

    /// Delete every recorded download.
    ClearHistory,

    /// Print shell completions.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Serve => run_serve(&cfg).await?,
            CliCommand::Replay { path } => run_replay(&path)?,
            CliCommand::Classify { url, content_type } => {
                run_classify(&url, content_type.as_deref())
            }
            CliCommand::History { limit } => run_history(&cfg, limit).await?,
            CliCommand::ClearHistory => run_clear_history(&cfg).await?,
            CliCommand::Completions { shell } => run_completions::<Cli>(shell),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
