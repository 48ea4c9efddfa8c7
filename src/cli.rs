//! Command-line argument parsing for the replay tool
//!
//! Supports:
//! - Replaying a YAML message script from a file or stdin
//! - Loading policies from a config file, with per-flag overrides
//! - JSON or table output of the final state

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};

use crate::config::NotebookConfig;

/// Replay notebook operations and print the resulting state
#[derive(Parser, Debug)]
#[command(
    name = "notebook",
    version,
    about = "Replay notebook operations and print the resulting state"
)]
pub struct CliArgs {
    /// YAML script of messages (reads stdin when omitted)
    #[arg(value_name = "SCRIPT")]
    pub script: Option<PathBuf>,

    /// Policy config file (defaults to ~/.config/notebook/config.yaml)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Hide pages whose tag differs from the raised page
    #[arg(long)]
    pub only_same_tag: bool,

    /// Show all pages sharing a tag with a visible page
    #[arg(long)]
    pub all_same_tag: bool,

    /// Keep at most N unpinned pages visible, by recency
    #[arg(long, value_name = "N")]
    pub most_recent: Option<usize>,

    /// Output format for the final state
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Stop at the first rejected message
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

impl CliArgs {
    /// Policies from the config file with command-line flags applied on top
    pub fn notebook_config(&self) -> Result<NotebookConfig> {
        let mut config = match &self.config {
            Some(path) => NotebookConfig::load_from(path)?,
            None => NotebookConfig::load(),
        };

        if self.only_same_tag {
            config.show_only_pages_with_same_tag = true;
        }
        if self.all_same_tag {
            config.show_all_pages_with_same_tag = true;
        }
        if let Some(bound) = self.most_recent {
            anyhow::ensure!(bound > 0, "--most-recent must be at least 1");
            config.show_only_most_recent_pages = true;
            config.number_of_most_recent_pages = bound;
        }
        Ok(config)
    }
}
