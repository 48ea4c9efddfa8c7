//! Notebook policy configuration
//!
//! Each engine receives its own `NotebookConfig` at construction, so two
//! notebooks in the same process never share policy state. Defaults can be
//! stored in `~/.config/notebook/config.yaml`.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default bound for the most-recent page policy
pub const DEFAULT_MOST_RECENT_PAGES: usize = 5;

/// Visibility policies applied by the constraint resolver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotebookConfig {
    /// Hide pages whose tag differs from the raised page's tag
    pub show_only_pages_with_same_tag: bool,

    /// Show every page sharing a tag with a visible page
    pub show_all_pages_with_same_tag: bool,

    /// Bound the number of visible unpinned pages by recency
    pub show_only_most_recent_pages: bool,

    /// Bound used by `show_only_most_recent_pages`
    pub number_of_most_recent_pages: usize,
}

impl Default for NotebookConfig {
    fn default() -> Self {
        Self {
            show_only_pages_with_same_tag: false,
            show_all_pages_with_same_tag: false,
            show_only_most_recent_pages: false,
            number_of_most_recent_pages: DEFAULT_MOST_RECENT_PAGES,
        }
    }
}

impl NotebookConfig {
    /// Config with only the most-recent policy enabled
    pub fn most_recent(bound: usize) -> Self {
        Self {
            show_only_most_recent_pages: true,
            number_of_most_recent_pages: bound,
            ..Self::default()
        }
    }

    /// Whether the most-recent policy is on with an enforceable bound
    pub fn most_recent_bound(&self) -> Option<usize> {
        (self.show_only_most_recent_pages && self.number_of_most_recent_pages > 0)
            .then_some(self.number_of_most_recent_pages)
    }

    /// Load config from the user config dir, or return defaults if unavailable
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("{:#}", e);
                Self::default()
            }
        }
    }

    /// Load config from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config at {}", path.display()))?;

        if config.show_only_most_recent_pages && config.number_of_most_recent_pages == 0 {
            tracing::warn!(
                "Config at {} enables most-recent pages with a zero bound; the bound will not be enforced",
                path.display()
            );
        }
        Ok(config)
    }

    /// Save config to an explicit path, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let content = serde_yaml::to_string(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }
}
