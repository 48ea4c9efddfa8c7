//! Debug tracing infrastructure for development diagnostics
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=notebook::engine=trace` - resolver decisions
//! - `RUST_LOG=notebook::panel=debug` - panel grouping
//!
//! # Log Files
//!
//! Logs are written to `~/.config/notebook/logs/notebook.log` with daily rotation.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::engine::TabEngine;
use crate::model::PageId;

/// Initialize tracing subscriber with console and file logging
///
/// Console output respects RUST_LOG (default `warn`); the file layer always
/// logs at debug level.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "notebook.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    // try_init: tests and embedding hosts may already have a subscriber
    let _ = tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init();
}

/// Lightweight snapshot of visibility state for diffing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibilitySnapshot {
    pub raised: Option<PageId>,
    pub visible: Vec<PageId>,
}

impl VisibilitySnapshot {
    pub fn from_engine(engine: &TabEngine) -> Self {
        Self {
            raised: engine.raised_page_id(),
            visible: engine.pages().filter(|p| p.visible).map(|p| p.id).collect(),
        }
    }

    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &VisibilitySnapshot) -> Option<String> {
        let mut changes = Vec::new();

        if self.raised != other.raised {
            changes.push(format!(
                "raised: {} → {}",
                describe(self.raised),
                describe(other.raised)
            ));
        }

        let shown: Vec<String> = other
            .visible
            .iter()
            .filter(|id| !self.visible.contains(id))
            .map(|id| id.to_string())
            .collect();
        if !shown.is_empty() {
            changes.push(format!("shown {}", shown.join(",")));
        }

        let hidden: Vec<String> = self
            .visible
            .iter()
            .filter(|id| !other.visible.contains(id))
            .map(|id| id.to_string())
            .collect();
        if !hidden.is_empty() {
            changes.push(format!("hidden {}", hidden.join(",")));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}

fn describe(id: Option<PageId>) -> String {
    id.map_or_else(|| "none".to_string(), |id| id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diff_reports_raise_and_visibility() {
        let before = VisibilitySnapshot {
            raised: Some(PageId(1)),
            visible: vec![PageId(1), PageId(2)],
        };
        let after = VisibilitySnapshot {
            raised: Some(PageId(3)),
            visible: vec![PageId(1), PageId(3)],
        };

        let diff = before.diff(&after).unwrap();
        assert_eq!(diff, "raised: #1 → #3; shown #3; hidden #2");
        assert_eq!(before.diff(&before), None);
    }
}
