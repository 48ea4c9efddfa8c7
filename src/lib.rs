//! Notebook - tabbed-container visibility engine
//!
//! This crate decides which pages of a tabbed container are visible and which
//! one is raised, under three independently switchable policies: tag
//! exclusivity, tag inclusivity and most-recently-used bounding. A panel layer
//! groups pages by application panel on top of the engine.

pub mod cli;
pub mod config;
pub mod config_paths;
pub mod engine;
pub mod error;
pub mod messages;
pub mod model;
pub mod panel;
pub mod snapshot;
pub mod tracing;
pub mod update;

// Re-export commonly used types
pub use config::NotebookConfig;
pub use engine::{PageEvent, PageObserver, TabEngine};
pub use error::NotebookError;
pub use messages::Msg;
pub use model::{Page, PageId, Tag};
pub use panel::PanelGroupMapper;
pub use update::{update, Notebook, Outcome};
