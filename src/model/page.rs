//! Page records - the tab + content units owned by the engine

use serde::{Deserialize, Serialize};

// ============================================================================
// Identifiers
// ============================================================================

/// Unique identifier for a page
///
/// Assigned by the engine from a monotonically increasing counter and never
/// reused for the lifetime of that engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PageId(pub u64);

impl std::fmt::Display for PageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Caller-assigned grouping key shared by zero or more pages
pub type Tag = i32;

/// Tag given to pages added without an explicit one
pub const DEFAULT_TAG: Tag = 0;

/// Opaque reference to caller-owned content displayed inside a page
///
/// The engine only stores and forwards it; creating and destroying the
/// content it refers to is the caller's business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentHandle(pub u64);

// ============================================================================
// Page
// ============================================================================

/// A single tab/content unit
///
/// Whether a page is raised is not stored here: the engine tracks the one
/// raised page itself, see `TabEngine::raised_page_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub id: PageId,
    pub title: String,
    pub tag: Tag,
    pub visible: bool,
    pub pinned: bool,
    /// Disabled pages keep their tab but the renderer greys them out
    pub enabled: bool,
    /// Tooltip shown when hovering the tab
    pub balloon_help: Option<String>,
    /// Icon name resolved by the renderer
    pub icon: Option<String>,
    pub content: Option<ContentHandle>,
}

impl Page {
    /// Create a new, invisible, unpinned page
    pub fn new(id: PageId, title: impl Into<String>, tag: Tag) -> Self {
        Self {
            id,
            title: title.into(),
            tag,
            visible: false,
            pinned: false,
            enabled: true,
            balloon_help: None,
            icon: None,
            content: None,
        }
    }

    /// Whether the bounding and tag policies may hide this page
    #[inline]
    pub fn can_be_hidden(&self) -> bool {
        !self.pinned
    }

    #[inline]
    pub fn matches(&self, title: &str, tag: Tag) -> bool {
        self.tag == tag && self.title == title
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_page_defaults() {
        let page = Page::new(PageId(7), "Render", 3);
        assert_eq!(page.id, PageId(7));
        assert_eq!(page.title, "Render");
        assert_eq!(page.tag, 3);
        assert!(!page.visible);
        assert!(!page.pinned);
        assert!(page.enabled);
        assert!(page.content.is_none());
    }

    #[test]
    fn test_pinned_page_cannot_be_hidden() {
        let mut page = Page::new(PageId(1), "A", DEFAULT_TAG);
        assert!(page.can_be_hidden());
        page.pinned = true;
        assert!(!page.can_be_hidden());
    }

    #[test]
    fn test_matches_requires_title_and_tag() {
        let page = Page::new(PageId(1), "Display", 2);
        assert!(page.matches("Display", 2));
        assert!(!page.matches("Display", 1));
        assert!(!page.matches("Other", 2));
    }

    #[test]
    fn test_page_id_display() {
        assert_eq!(PageId(42).to_string(), "#42");
    }
}
