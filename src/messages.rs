//! Message types for the Elm-style architecture
//!
//! Every notebook state change can be expressed as a `Msg`. Messages are
//! serde-deserializable so a sequence of them can be replayed from a YAML
//! script:
//!
//! ```yaml
//! - op: add_page
//!   title: Display
//!   panel: render
//! - op: raise_page
//!   page: Display
//! - op: set_show_only_most_recent_pages
//!   enabled: true
//!   bound: 3
//! ```

use serde::{Deserialize, Serialize};

use crate::engine::TabEngine;
use crate::error::{NotebookError, Result};
use crate::model::{ContentHandle, PageId, Tag, DEFAULT_TAG};

/// How a message refers to a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PageRef {
    /// Engine-assigned id
    Id(u64),
    /// First page with this title
    Title(String),
    /// Page with this title in this tag
    Scoped { title: String, tag: Tag },
}

impl PageRef {
    /// Resolve to a live page id
    pub fn resolve(&self, engine: &TabEngine) -> Result<PageId> {
        match self {
            PageRef::Id(id) => {
                let id = PageId(*id);
                engine.page(id).map(|p| p.id).ok_or(NotebookError::NotFound(id))
            }
            PageRef::Title(title) => engine.find_page_id(title, None),
            PageRef::Scoped { title, tag } => engine.find_page_id(title, Some(*tag)),
        }
    }
}

impl From<PageId> for PageRef {
    fn from(id: PageId) -> Self {
        PageRef::Id(id.0)
    }
}

impl From<&str> for PageRef {
    fn from(title: &str) -> Self {
        PageRef::Title(title.to_string())
    }
}

/// Notebook messages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Msg {
    // === Page lifecycle ===
    /// Add a page, to a panel's group when `panel` is set
    AddPage {
        title: String,
        #[serde(default)]
        tag: Tag,
        #[serde(default)]
        panel: Option<String>,
        #[serde(default)]
        balloon_help: Option<String>,
        #[serde(default)]
        icon: Option<String>,
    },
    RemovePage {
        page: PageRef,
    },
    RaisePage {
        page: PageRef,
    },
    ShowPage {
        page: PageRef,
    },
    HidePage {
        page: PageRef,
    },
    PinPage {
        page: PageRef,
    },
    UnpinPage {
        page: PageRef,
    },
    TogglePagePinned {
        page: PageRef,
    },
    TogglePageVisibility {
        page: PageRef,
    },

    // === Page attributes ===
    SetPageTag {
        page: PageRef,
        tag: Tag,
    },
    SetPageTitle {
        page: PageRef,
        title: String,
    },
    SetPageEnabled {
        page: PageRef,
        enabled: bool,
    },
    SetPageContent {
        page: PageRef,
        #[serde(default)]
        content: Option<ContentHandle>,
    },

    // === Tag groups ===
    ShowPagesMatchingTag {
        tag: Tag,
    },
    HidePagesMatchingTag {
        tag: Tag,
    },
    ShowPagesNotMatchingTag {
        tag: Tag,
    },
    HidePagesNotMatchingTag {
        tag: Tag,
    },
    RemovePagesMatchingTag {
        tag: Tag,
    },
    RaiseFirstPageMatchingTag {
        tag: Tag,
    },
    HideAllPages,
    RemoveAllPages,

    // === Policies ===
    SetShowOnlyPagesWithSameTag {
        enabled: bool,
    },
    SetShowAllPagesWithSameTag {
        enabled: bool,
    },
    SetShowOnlyMostRecentPages {
        enabled: bool,
        #[serde(default)]
        bound: usize,
    },
    /// Run the constraint resolver without any other change
    Constrain,

    // === Panels ===
    ShowPanel {
        panel: String,
    },
    RaisePanel {
        panel: String,
    },
    HidePanel {
        panel: String,
    },
    RemovePanel {
        panel: String,
    },
}

impl Msg {
    /// Add a page with the default tag and no panel
    pub fn add_page(title: impl Into<String>) -> Self {
        Msg::AddPage {
            title: title.into(),
            tag: DEFAULT_TAG,
            panel: None,
            balloon_help: None,
            icon: None,
        }
    }

    /// Add a page with a tag and no panel
    pub fn add_tagged_page(title: impl Into<String>, tag: Tag) -> Self {
        Msg::AddPage {
            title: title.into(),
            tag,
            panel: None,
            balloon_help: None,
            icon: None,
        }
    }

    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Msg::AddPage { .. } => "add_page",
            Msg::RemovePage { .. } => "remove_page",
            Msg::RaisePage { .. } => "raise_page",
            Msg::ShowPage { .. } => "show_page",
            Msg::HidePage { .. } => "hide_page",
            Msg::PinPage { .. } => "pin_page",
            Msg::UnpinPage { .. } => "unpin_page",
            Msg::TogglePagePinned { .. } => "toggle_page_pinned",
            Msg::TogglePageVisibility { .. } => "toggle_page_visibility",
            Msg::SetPageTag { .. } => "set_page_tag",
            Msg::SetPageTitle { .. } => "set_page_title",
            Msg::SetPageEnabled { .. } => "set_page_enabled",
            Msg::SetPageContent { .. } => "set_page_content",
            Msg::ShowPagesMatchingTag { .. } => "show_pages_matching_tag",
            Msg::HidePagesMatchingTag { .. } => "hide_pages_matching_tag",
            Msg::ShowPagesNotMatchingTag { .. } => "show_pages_not_matching_tag",
            Msg::HidePagesNotMatchingTag { .. } => "hide_pages_not_matching_tag",
            Msg::RemovePagesMatchingTag { .. } => "remove_pages_matching_tag",
            Msg::RaiseFirstPageMatchingTag { .. } => "raise_first_page_matching_tag",
            Msg::HideAllPages => "hide_all_pages",
            Msg::RemoveAllPages => "remove_all_pages",
            Msg::SetShowOnlyPagesWithSameTag { .. } => "set_show_only_pages_with_same_tag",
            Msg::SetShowAllPagesWithSameTag { .. } => "set_show_all_pages_with_same_tag",
            Msg::SetShowOnlyMostRecentPages { .. } => "set_show_only_most_recent_pages",
            Msg::Constrain => "constrain",
            Msg::ShowPanel { .. } => "show_panel",
            Msg::RaisePanel { .. } => "raise_panel",
            Msg::HidePanel { .. } => "hide_panel",
            Msg::RemovePanel { .. } => "remove_panel",
        }
    }
}
