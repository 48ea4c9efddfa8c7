//! Core data model: pages and their recency ordering

pub mod page;
pub mod recent;

pub use page::{ContentHandle, Page, PageId, Tag, DEFAULT_TAG};
pub use recent::MostRecentQueue;
