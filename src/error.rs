//! Error types for notebook operations

use thiserror::Error;

use crate::model::PageId;

/// Conditions reported by engine and panel operations
///
/// None of these abort anything: the operation that reports one leaves the
/// notebook state as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotebookError {
    /// No live page has this id
    #[error("page {0} not found")]
    NotFound(PageId),

    /// No live page has this title (optionally within a tag)
    #[error("no page titled {0:?}")]
    TitleNotFound(String),

    /// Pinned pages stay visible
    #[error("page {0} is pinned and cannot be hidden")]
    CannotHidePinned(PageId),

    /// The most-recent bound must be at least one
    #[error("invalid most-recent page bound {0}")]
    InvalidBound(usize),

    /// The panel has never had a page added on its behalf
    #[error("unknown panel")]
    UnknownPanel,
}

pub type Result<T, E = NotebookError> = std::result::Result<T, E>;
