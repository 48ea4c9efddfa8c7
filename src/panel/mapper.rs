//! Panel-to-tag projection
//!
//! Each panel gets its own tag the first time a page is added on its behalf;
//! panel operations then act on every page carrying that tag.

use std::collections::HashMap;
use std::hash::Hash;

use crate::config::NotebookConfig;
use crate::engine::TabEngine;
use crate::error::{NotebookError, Result};
use crate::model::{PageId, Tag};

/// First tag handed out to a panel
const FIRST_PANEL_TAG: Tag = 1;

/// Groups engine pages by panel
///
/// `P` is whatever the application uses to identify a panel: an enum of
/// feature modules, a name, an id.
#[derive(Debug)]
pub struct PanelGroupMapper<P> {
    engine: TabEngine,
    tags: HashMap<P, Tag>,
    next_tag: Tag,
}

impl<P> PanelGroupMapper<P>
where
    P: Clone + Eq + Hash + std::fmt::Debug,
{
    pub fn new(config: NotebookConfig) -> Self {
        Self::with_engine(TabEngine::new(config))
    }

    pub fn with_engine(engine: TabEngine) -> Self {
        Self {
            engine,
            tags: HashMap::new(),
            next_tag: FIRST_PANEL_TAG,
        }
    }

    pub fn engine(&self) -> &TabEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut TabEngine {
        &mut self.engine
    }

    /// Tag assigned to `panel`, if it has one yet
    pub fn panel_tag(&self, panel: &P) -> Option<Tag> {
        self.tags.get(panel).copied()
    }

    /// Panel owning the page, if it was added through this mapper
    pub fn panel_for_page(&self, id: PageId) -> Option<&P> {
        let tag = self.engine.page(id)?.tag;
        self.tags
            .iter()
            .find(|(_, panel_tag)| **panel_tag == tag)
            .map(|(panel, _)| panel)
    }

    /// Add a page on behalf of `panel`, assigning the panel a tag on first use
    pub fn add_page(
        &mut self,
        panel: &P,
        title: impl Into<String>,
        balloon_help: Option<String>,
        icon: Option<String>,
    ) -> PageId {
        let tag = self.tag_for(panel);
        let id = self.engine.add_page(title, tag);
        if let Err(e) = self
            .engine
            .set_page_balloon_help(id, balloon_help)
            .and_then(|()| self.engine.set_page_icon(id, icon))
        {
            tracing::warn!("decorating page {} failed: {}", id, e);
        }
        id
    }

    /// Pages of `panel` in creation order
    pub fn pages_of_panel(&self, panel: &P) -> Result<Vec<PageId>> {
        Ok(self.engine.pages_matching_tag(self.require_tag(panel)?))
    }

    /// Whether any page of the panel is visible
    pub fn is_panel_visible(&self, panel: &P) -> bool {
        self.panel_tag(panel)
            .is_some_and(|tag| self.engine.number_of_visible_pages_matching_tag(tag) > 0)
    }

    /// Show every page of the panel
    ///
    /// Under the most-recent policy the pages are shown last-created first,
    /// so the first page of the panel ends up the most recent one.
    pub fn show_panel(&mut self, panel: &P) -> Result<()> {
        let tag = self.require_tag(panel)?;
        tracing::debug!("show panel {:?} (tag {})", panel, tag);
        if self.engine.config().show_only_most_recent_pages {
            self.engine.show_pages_matching_tag_reverse(tag);
        } else {
            self.engine.show_pages_matching_tag(tag);
        }
        Ok(())
    }

    /// Show the panel and make sure one of its pages is raised
    pub fn raise_panel(&mut self, panel: &P) -> Result<()> {
        self.show_panel(panel)?;
        let tag = self.require_tag(panel)?;

        let raised_tag = self
            .engine
            .raised_page_id()
            .and_then(|id| self.engine.page(id))
            .map(|p| p.tag);
        if raised_tag != Some(tag) {
            self.engine.raise_first_page_matching_tag(tag);
        }
        Ok(())
    }

    /// Hide every page of the panel, returning pinned pages that stayed visible
    pub fn hide_panel(&mut self, panel: &P) -> Result<Vec<PageId>> {
        let tag = self.require_tag(panel)?;
        let kept = self.engine.hide_pages_matching_tag(tag);
        if !kept.is_empty() {
            tracing::debug!("panel {:?} keeps pinned pages {:?}", panel, kept);
        }
        Ok(kept)
    }

    /// Remove every page of the panel, returning how many were removed
    ///
    /// The panel keeps its tag, so pages added for it later join the same group.
    pub fn remove_panel(&mut self, panel: &P) -> Result<usize> {
        let tag = self.require_tag(panel)?;
        tracing::debug!("remove panel {:?} (tag {})", panel, tag);
        Ok(self.engine.remove_pages_matching_tag(tag))
    }

    fn tag_for(&mut self, panel: &P) -> Tag {
        if let Some(&tag) = self.tags.get(panel) {
            return tag;
        }
        let tag = self.next_tag;
        self.next_tag += 1;
        self.tags.insert(panel.clone(), tag);
        tag
    }

    fn require_tag(&self, panel: &P) -> Result<Tag> {
        self.panel_tag(panel).ok_or(NotebookError::UnknownPanel)
    }
}
