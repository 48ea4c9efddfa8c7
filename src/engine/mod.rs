//! Tab engine - owns the pages of one notebook and decides what is visible
//!
//! Every operation that can change the visible set or the raised page ends
//! with a constraint pass (see [`resolver`]) and then flushes the recorded
//! [`PageEvent`]s to the registered observers. Observers therefore always see
//! the final state of an operation, never an intermediate one.
//!
//! Pages live in an arena: a dense slot vector in insertion order plus an
//! id-to-slot map. Removing a page frees its slot; free slots are compacted
//! once they outnumber live ones, outside of any traversal.

pub mod observer;
pub mod resolver;

use std::collections::HashMap;

use crate::config::NotebookConfig;
use crate::error::{NotebookError, Result};
use crate::model::{ContentHandle, MostRecentQueue, Page, PageId, Tag, DEFAULT_TAG};

pub use observer::{EventLog, PageEvent, PageObserver};
pub use resolver::{resolve, PageState, Resolution};

/// Free slots tolerated before the arena is compacted
const COMPACT_THRESHOLD: usize = 32;

/// The visibility engine behind a tabbed container
pub struct TabEngine {
    config: NotebookConfig,

    /// Pages in insertion order; `None` marks a removed page
    slots: Vec<Option<Page>>,
    index: HashMap<PageId, usize>,
    free_slots: usize,

    recent: MostRecentQueue,

    /// The raised page, `None` when nothing is visible
    current: Option<PageId>,

    next_page_id: u64,

    /// Events recorded by the running operation, delivered by `flush`
    pending: Vec<PageEvent>,
    observers: Vec<Box<dyn PageObserver>>,
}

impl std::fmt::Debug for TabEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TabEngine")
            .field("config", &self.config)
            .field("pages", &self.pages().collect::<Vec<_>>())
            .field("recent", &self.recent)
            .field("current", &self.current)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Default for TabEngine {
    fn default() -> Self {
        Self::new(NotebookConfig::default())
    }
}

impl TabEngine {
    pub fn new(config: NotebookConfig) -> Self {
        Self {
            config,
            slots: Vec::new(),
            index: HashMap::new(),
            free_slots: 0,
            recent: MostRecentQueue::new(),
            current: None,
            next_page_id: 1,
            pending: Vec::new(),
            observers: Vec::new(),
        }
    }

    /// Create an engine that reports to `observer`
    pub fn with_observer(config: NotebookConfig, observer: Box<dyn PageObserver>) -> Self {
        let mut engine = Self::new(config);
        engine.observers.push(observer);
        engine
    }

    pub fn add_observer(&mut self, observer: Box<dyn PageObserver>) {
        self.observers.push(observer);
    }

    pub fn config(&self) -> &NotebookConfig {
        &self.config
    }

    // ========================================================================
    // Policies
    // ========================================================================

    pub fn set_show_only_pages_with_same_tag(&mut self, enabled: bool) {
        if self.config.show_only_pages_with_same_tag != enabled {
            self.config.show_only_pages_with_same_tag = enabled;
            self.constrain_inner();
            self.flush();
        }
    }

    pub fn set_show_all_pages_with_same_tag(&mut self, enabled: bool) {
        if self.config.show_all_pages_with_same_tag != enabled {
            self.config.show_all_pages_with_same_tag = enabled;
            self.constrain_inner();
            self.flush();
        }
    }

    /// Toggle the most-recent policy
    ///
    /// Enabling it with a zero bound is rejected and leaves the policy as it was.
    pub fn set_show_only_most_recent_pages(&mut self, enabled: bool, bound: usize) -> Result<()> {
        if enabled && bound == 0 {
            tracing::warn!("refusing most-recent pages with a zero bound");
            return Err(NotebookError::InvalidBound(bound));
        }

        self.config.show_only_most_recent_pages = enabled;
        if bound > 0 {
            self.config.number_of_most_recent_pages = bound;
        }
        self.constrain_inner();
        self.flush();
        Ok(())
    }

    // ========================================================================
    // Page lifecycle
    // ========================================================================

    /// Add a page and show it
    ///
    /// The first page to become visible is raised.
    pub fn add_page(&mut self, title: impl Into<String>, tag: Tag) -> PageId {
        let id = PageId(self.next_page_id);
        self.next_page_id += 1;

        let page = Page::new(id, title, tag);
        tracing::debug!("add page {} {:?} (tag {})", id, page.title, tag);
        self.index.insert(id, self.slots.len());
        self.slots.push(Some(page));
        self.pending.push(PageEvent::Created(id));

        if let Err(e) = self.show_inner(id) {
            tracing::warn!("showing new page {} failed: {}", id, e);
        }
        self.flush();
        id
    }

    /// Add a page with the default tag
    pub fn add_untagged_page(&mut self, title: impl Into<String>) -> PageId {
        self.add_page(title, DEFAULT_TAG)
    }

    /// Unpin, hide and discard a page
    pub fn remove_page(&mut self, id: PageId) -> Result<()> {
        let result = self.remove_inner(id);
        self.flush();
        result
    }

    /// Raise a page, showing it if needed
    pub fn raise_page(&mut self, id: PageId) -> Result<()> {
        let result = self.raise_inner(id);
        self.flush();
        result
    }

    /// Show a page; raises it when no other page is visible
    pub fn show_page(&mut self, id: PageId) -> Result<()> {
        let result = self.show_inner(id);
        self.flush();
        result
    }

    /// Hide a page; refused for pinned pages
    pub fn hide_page(&mut self, id: PageId) -> Result<()> {
        let result = self.hide_inner(id);
        self.flush();
        result
    }

    /// Pin a page, showing it if it was hidden
    pub fn pin_page(&mut self, id: PageId) -> Result<()> {
        let result = self.pin_inner(id);
        self.flush();
        result
    }

    pub fn unpin_page(&mut self, id: PageId) -> Result<()> {
        let result = self.unpin_inner(id);
        self.flush();
        result
    }

    /// Flip the pinned state, returning the new one
    pub fn toggle_page_pinned(&mut self, id: PageId) -> Result<bool> {
        let pinned = self.page_ref(id)?.pinned;
        if pinned {
            self.unpin_page(id)?;
        } else {
            self.pin_page(id)?;
        }
        Ok(!pinned)
    }

    /// Flip the visibility, returning the new one
    pub fn toggle_page_visibility(&mut self, id: PageId) -> Result<bool> {
        let visible = self.page_ref(id)?.visible;
        if visible {
            self.hide_page(id)?;
        } else {
            self.show_page(id)?;
        }
        Ok(!visible)
    }

    /// Change a page's tag
    ///
    /// No constraint pass runs; the new tag counts from the next mutation on.
    pub fn set_page_tag(&mut self, id: PageId, tag: Tag) -> Result<()> {
        self.page_mut(id)?.tag = tag;
        Ok(())
    }

    pub fn set_page_title(&mut self, id: PageId, title: impl Into<String>) -> Result<()> {
        self.page_mut(id)?.title = title.into();
        Ok(())
    }

    pub fn set_page_balloon_help(&mut self, id: PageId, help: Option<String>) -> Result<()> {
        self.page_mut(id)?.balloon_help = help;
        Ok(())
    }

    pub fn set_page_icon(&mut self, id: PageId, icon: Option<String>) -> Result<()> {
        self.page_mut(id)?.icon = icon;
        Ok(())
    }

    pub fn set_page_enabled(&mut self, id: PageId, enabled: bool) -> Result<()> {
        self.page_mut(id)?.enabled = enabled;
        Ok(())
    }

    /// Associate caller-owned content with a page
    pub fn set_page_content(&mut self, id: PageId, content: Option<ContentHandle>) -> Result<()> {
        let page = self.page_mut(id)?;
        if page.content != content {
            page.content = content;
            self.pending.push(PageEvent::ContentChanged { id, content });
            self.flush();
        }
        Ok(())
    }

    // ========================================================================
    // Tag-scoped operations
    // ========================================================================

    pub fn show_pages_matching_tag(&mut self, tag: Tag) {
        for id in self.pages_matching_tag(tag) {
            Self::log_failure(self.show_inner(id));
        }
        self.flush();
    }

    /// Show pages of `tag` from the most recently added to the first added
    ///
    /// Under the most-recent policy this leaves the first page of the group as
    /// the most recent one.
    pub fn show_pages_matching_tag_reverse(&mut self, tag: Tag) {
        for id in self.pages_matching_tag(tag).into_iter().rev() {
            Self::log_failure(self.show_inner(id));
        }
        self.flush();
    }

    pub fn show_pages_not_matching_tag(&mut self, tag: Tag) {
        for id in self.pages_where(|p| p.tag != tag) {
            Self::log_failure(self.show_inner(id));
        }
        self.flush();
    }

    /// Hide pages of `tag`, returning the pinned ones that stayed visible
    pub fn hide_pages_matching_tag(&mut self, tag: Tag) -> Vec<PageId> {
        let ids = self.pages_matching_tag(tag);
        self.hide_many(ids)
    }

    /// Hide pages not of `tag`, returning the pinned ones that stayed visible
    pub fn hide_pages_not_matching_tag(&mut self, tag: Tag) -> Vec<PageId> {
        let ids = self.pages_where(|p| p.tag != tag);
        self.hide_many(ids)
    }

    /// Hide every page, returning the pinned ones that stayed visible
    pub fn hide_all_pages(&mut self) -> Vec<PageId> {
        let ids = self.pages_where(|_| true);
        self.hide_many(ids)
    }

    /// Remove pages of `tag`, returning how many were removed
    pub fn remove_pages_matching_tag(&mut self, tag: Tag) -> usize {
        let ids = self.pages_matching_tag(tag);
        let count = ids.len();
        for id in ids {
            Self::log_failure(self.remove_inner(id));
        }
        self.flush();
        count
    }

    pub fn remove_all_pages(&mut self) {
        for id in self.pages_where(|_| true) {
            Self::log_failure(self.remove_inner(id));
        }
        self.flush();
    }

    /// Raise the first page carrying `tag`
    pub fn raise_first_page_matching_tag(&mut self, tag: Tag) -> Option<PageId> {
        let id = self.first_page_matching_tag(tag)?.id;
        Self::log_failure(self.raise_inner(id));
        self.flush();
        Some(id)
    }

    /// Run the constraint resolver, returning whether anything changed
    ///
    /// Every mutating operation already does this; calling it again without
    /// an intervening mutation never changes anything.
    pub fn constrain_visible_pages(&mut self) -> bool {
        let changed = self.constrain_inner();
        self.flush();
        changed
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Live pages in insertion order
    pub fn pages(&self) -> impl Iterator<Item = &Page> + '_ {
        self.slots.iter().flatten()
    }

    pub fn page(&self, id: PageId) -> Option<&Page> {
        self.index.get(&id).and_then(|&slot| self.slots[slot].as_ref())
    }

    /// First page with `title`, whatever its tag
    pub fn page_by_title(&self, title: &str) -> Option<&Page> {
        self.pages().find(|p| p.title == title)
    }

    /// Page with `title` in `tag`; prefer this over `page_by_title` when the tag is known
    pub fn page_by_title_and_tag(&self, title: &str, tag: Tag) -> Option<&Page> {
        self.pages().find(|p| p.matches(title, tag))
    }

    /// Id of the page titled `title`, scoped to `tag` when given
    pub fn find_page_id(&self, title: &str, tag: Option<Tag>) -> Result<PageId> {
        let page = match tag {
            Some(tag) => self.page_by_title_and_tag(title, tag),
            None => self.page_by_title(title),
        };
        page.map(|p| p.id)
            .ok_or_else(|| NotebookError::TitleNotFound(title.to_string()))
    }

    pub fn first_visible_page(&self) -> Option<&Page> {
        self.pages().find(|p| p.visible)
    }

    pub fn first_page_matching_tag(&self, tag: Tag) -> Option<&Page> {
        self.pages().find(|p| p.tag == tag)
    }

    pub fn pages_matching_tag(&self, tag: Tag) -> Vec<PageId> {
        self.pages_where(|p| p.tag == tag)
    }

    pub fn raised_page_id(&self) -> Option<PageId> {
        self.current
    }

    pub fn is_page_raised(&self, id: PageId) -> bool {
        self.current == Some(id)
    }

    /// Whether the policies may hide the page
    pub fn can_be_hidden(&self, id: PageId) -> Result<bool> {
        Ok(self.page_ref(id)?.can_be_hidden())
    }

    /// Visible page at `index`: unpinned pages in insertion order, then pinned ones
    pub fn visible_page_id(&self, index: usize) -> Option<PageId> {
        let unpinned = self.pages().filter(|p| p.visible && !p.pinned);
        let pinned = self.pages().filter(|p| p.visible && p.pinned);
        unpinned.chain(pinned).nth(index).map(|p| p.id)
    }

    /// Most recent page at `index`, 0 being the most recent
    pub fn most_recent_page_id(&self, index: usize) -> Option<PageId> {
        self.recent.get(index)
    }

    pub fn most_recent_pages(&self) -> &MostRecentQueue {
        &self.recent
    }

    pub fn number_of_pages(&self) -> usize {
        self.index.len()
    }

    pub fn number_of_visible_pages(&self) -> usize {
        self.pages().filter(|p| p.visible).count()
    }

    pub fn number_of_pages_matching_tag(&self, tag: Tag) -> usize {
        self.pages().filter(|p| p.tag == tag).count()
    }

    pub fn number_of_visible_pages_matching_tag(&self, tag: Tag) -> usize {
        self.pages().filter(|p| p.visible && p.tag == tag).count()
    }

    pub fn number_of_most_recent_pages(&self) -> usize {
        self.recent.len()
    }

    // ========================================================================
    // Operation bodies (no flush)
    // ========================================================================

    fn show_inner(&mut self, id: PageId) -> Result<()> {
        if self.page_ref(id)?.visible {
            return Ok(());
        }
        if self.number_of_visible_pages() == 0 {
            return self.raise_inner(id);
        }

        tracing::debug!("show page {}", id);
        self.set_visible(id, true);
        self.recent.touch(id);
        self.constrain_inner();
        Ok(())
    }

    fn raise_inner(&mut self, id: PageId) -> Result<()> {
        let visible = self.page_ref(id)?.visible;
        if self.current == Some(id) {
            return Ok(());
        }

        tracing::debug!("raise page {} (was {:?})", id, self.current);
        if !visible {
            self.set_visible(id, true);
        }
        self.recent.touch(id);
        self.set_current(Some(id));
        self.constrain_inner();
        Ok(())
    }

    fn hide_inner(&mut self, id: PageId) -> Result<()> {
        let page = self.page_ref(id)?;
        if page.pinned {
            tracing::debug!("page {} is pinned, not hiding", id);
            return Err(NotebookError::CannotHidePinned(id));
        }
        if !page.visible {
            return Ok(());
        }

        tracing::debug!("hide page {}", id);
        self.set_visible(id, false);
        self.recent.remove(id);
        if self.current == Some(id) {
            self.reselect_raised();
        }
        self.constrain_inner();
        Ok(())
    }

    fn pin_inner(&mut self, id: PageId) -> Result<()> {
        let page = self.page_mut(id)?;
        if page.pinned {
            return Ok(());
        }
        page.pinned = true;
        let visible = page.visible;

        tracing::debug!("pin page {}", id);
        if visible {
            self.constrain_inner();
            Ok(())
        } else {
            self.show_inner(id)
        }
    }

    fn unpin_inner(&mut self, id: PageId) -> Result<()> {
        let page = self.page_mut(id)?;
        if !page.pinned {
            return Ok(());
        }
        page.pinned = false;

        tracing::debug!("unpin page {}", id);
        self.constrain_inner();
        Ok(())
    }

    fn remove_inner(&mut self, id: PageId) -> Result<()> {
        // Unpin without a constraint pass so the page never competes for the bound
        self.page_mut(id)?.pinned = false;
        self.hide_inner(id)?;

        tracing::debug!("remove page {}", id);
        if let Some(slot) = self.index.remove(&id) {
            self.slots[slot] = None;
            self.free_slots += 1;
        }
        self.recent.remove(id);
        self.pending.push(PageEvent::Removed(id));
        self.compact_if_sparse();
        Ok(())
    }

    fn hide_many(&mut self, ids: Vec<PageId>) -> Vec<PageId> {
        let mut kept = Vec::new();
        for id in ids {
            match self.hide_inner(id) {
                Ok(()) => {}
                Err(NotebookError::CannotHidePinned(id)) => kept.push(id),
                Err(e) => tracing::warn!("{}", e),
            }
        }
        self.flush();
        kept
    }

    /// Apply the policies until the raised page is stable
    ///
    /// Re-selecting the raised page can change what tag exclusivity keeps, so
    /// the resolver runs again after each re-selection.
    fn constrain_inner(&mut self) -> bool {
        let mut changed = false;

        // Each pass either settles or re-selects a page the previous pass kept
        // visible; the bound only guards against a broken resolver.
        for _ in 0..=self.index.len() + 1 {
            let states: Vec<PageState> = self.pages().map(PageState::from).collect();
            let resolution = resolve(&states, self.current, &self.config, &self.recent);

            for &id in &resolution.shown {
                self.set_visible(id, true);
            }
            for &id in &resolution.hidden {
                self.set_visible(id, false);
            }
            self.recent = resolution.queue;
            changed |= !resolution.shown.is_empty() || !resolution.hidden.is_empty();

            let raised_visible = self
                .current
                .and_then(|id| self.page(id))
                .is_some_and(|p| p.visible);
            let any_visible = self.first_visible_page().is_some();
            if raised_visible || (self.current.is_none() && !any_visible) {
                return changed;
            }
            self.reselect_raised();
        }

        tracing::warn!("constraint pass did not settle");
        changed
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn page_ref(&self, id: PageId) -> Result<&Page> {
        self.page(id).ok_or(NotebookError::NotFound(id))
    }

    fn page_mut(&mut self, id: PageId) -> Result<&mut Page> {
        self.index
            .get(&id)
            .and_then(|&slot| self.slots[slot].as_mut())
            .ok_or(NotebookError::NotFound(id))
    }

    fn pages_where(&self, predicate: impl Fn(&Page) -> bool) -> Vec<PageId> {
        self.pages().filter(|p| predicate(p)).map(|p| p.id).collect()
    }

    fn set_visible(&mut self, id: PageId, visible: bool) {
        if let Ok(page) = self.page_mut(id) {
            if page.visible != visible {
                page.visible = visible;
                self.pending
                    .push(PageEvent::VisibilityChanged { id, visible });
            }
        }
    }

    fn set_current(&mut self, current: Option<PageId>) {
        let previous = self.current;
        if previous == current {
            return;
        }
        self.current = current;
        if let Some(id) = current {
            self.pending.push(PageEvent::Raised { id, previous });
        }
    }

    /// Raise the first visible page, or nothing when none is visible
    fn reselect_raised(&mut self) {
        let next = self.first_visible_page().map(|p| p.id);
        tracing::debug!("raised page hidden, raising {:?}", next);
        self.set_current(next);
    }

    fn compact_if_sparse(&mut self) {
        if self.free_slots <= COMPACT_THRESHOLD || self.free_slots < self.index.len() {
            return;
        }
        self.slots.retain(Option::is_some);
        self.index = self
            .slots
            .iter()
            .flatten()
            .enumerate()
            .map(|(slot, page)| (page.id, slot))
            .collect();
        self.free_slots = 0;
    }

    fn log_failure(result: Result<()>) {
        if let Err(e) = result {
            tracing::debug!("{}", e);
        }
    }

    /// Deliver recorded events to every observer
    fn flush(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let events = std::mem::take(&mut self.pending);
        for observer in &mut self.observers {
            for &event in &events {
                observer.on_event(event);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn visible_titles(engine: &TabEngine) -> Vec<String> {
        engine
            .pages()
            .filter(|p| p.visible)
            .map(|p| p.title.clone())
            .collect()
    }

    #[test]
    fn test_first_page_is_raised() {
        let mut engine = TabEngine::default();
        let a = engine.add_untagged_page("A");
        let b = engine.add_untagged_page("B");

        assert_eq!(engine.raised_page_id(), Some(a));
        assert!(engine.page(b).unwrap().visible);
        assert_eq!(engine.number_of_visible_pages(), 2);
    }

    #[test]
    fn test_ids_are_never_reused() {
        let mut engine = TabEngine::default();
        let a = engine.add_untagged_page("A");
        engine.remove_page(a).unwrap();
        let b = engine.add_untagged_page("B");
        assert_ne!(a, b);
        assert!(b > a);
    }

    #[test]
    fn test_raise_shows_hidden_page() {
        let mut engine = TabEngine::default();
        let _a = engine.add_untagged_page("A");
        let b = engine.add_untagged_page("B");
        engine.hide_page(b).unwrap();
        assert!(!engine.page(b).unwrap().visible);

        engine.raise_page(b).unwrap();
        assert!(engine.page(b).unwrap().visible);
        assert_eq!(engine.raised_page_id(), Some(b));
        assert_eq!(engine.most_recent_page_id(0), Some(b));
    }

    #[test]
    fn test_hiding_raised_page_raises_first_visible() {
        let mut engine = TabEngine::default();
        let a = engine.add_untagged_page("A");
        let b = engine.add_untagged_page("B");
        let c = engine.add_untagged_page("C");
        engine.raise_page(c).unwrap();

        engine.hide_page(c).unwrap();
        assert_eq!(engine.raised_page_id(), Some(a));

        engine.hide_page(a).unwrap();
        assert_eq!(engine.raised_page_id(), Some(b));

        engine.hide_page(b).unwrap();
        assert_eq!(engine.raised_page_id(), None);
        assert_eq!(engine.number_of_visible_pages(), 0);
    }

    #[test]
    fn test_hide_pinned_page_is_refused() {
        let mut engine = TabEngine::default();
        let a = engine.add_untagged_page("A");
        engine.pin_page(a).unwrap();

        assert_eq!(engine.hide_page(a), Err(NotebookError::CannotHidePinned(a)));
        assert!(engine.page(a).unwrap().visible);
    }

    #[test]
    fn test_pin_shows_hidden_page() {
        let mut engine = TabEngine::default();
        let _a = engine.add_untagged_page("A");
        let b = engine.add_untagged_page("B");
        engine.hide_page(b).unwrap();

        engine.pin_page(b).unwrap();
        let page = engine.page(b).unwrap();
        assert!(page.pinned && page.visible);
    }

    #[test]
    fn test_remove_pinned_raised_page() {
        let mut engine = TabEngine::default();
        let a = engine.add_untagged_page("A");
        let b = engine.add_untagged_page("B");
        engine.pin_page(a).unwrap();

        engine.remove_page(a).unwrap();
        assert!(engine.page(a).is_none());
        assert_eq!(engine.raised_page_id(), Some(b));
        assert!(!engine.most_recent_pages().contains(a));
        assert_eq!(engine.number_of_pages(), 1);
    }

    #[test]
    fn test_unknown_page_reports_not_found() {
        let mut engine = TabEngine::default();
        let missing = PageId(99);
        assert_eq!(engine.show_page(missing), Err(NotebookError::NotFound(missing)));
        assert_eq!(engine.remove_page(missing), Err(NotebookError::NotFound(missing)));
        assert_eq!(
            engine.set_page_tag(missing, 3),
            Err(NotebookError::NotFound(missing))
        );
    }

    #[test]
    fn test_set_tag_waits_for_next_pass() {
        let mut engine = TabEngine::new(NotebookConfig {
            show_only_pages_with_same_tag: true,
            ..NotebookConfig::default()
        });
        let a = engine.add_page("A", 1);
        let b = engine.add_page("B", 1);

        engine.set_page_tag(b, 2).unwrap();
        assert!(engine.page(b).unwrap().visible);

        assert!(engine.constrain_visible_pages());
        assert!(!engine.page(b).unwrap().visible);
        assert_eq!(engine.raised_page_id(), Some(a));
    }

    #[test]
    fn test_visible_page_order_puts_pinned_last() {
        let mut engine = TabEngine::default();
        let a = engine.add_untagged_page("A");
        let b = engine.add_untagged_page("B");
        let c = engine.add_untagged_page("C");
        engine.pin_page(a).unwrap();

        assert_eq!(engine.visible_page_id(0), Some(b));
        assert_eq!(engine.visible_page_id(1), Some(c));
        assert_eq!(engine.visible_page_id(2), Some(a));
        assert_eq!(engine.visible_page_id(3), None);
    }

    #[test]
    fn test_title_lookup() {
        let mut engine = TabEngine::default();
        let a1 = engine.add_page("Display", 1);
        let a2 = engine.add_page("Display", 2);

        assert_eq!(engine.page_by_title("Display").map(|p| p.id), Some(a1));
        assert_eq!(
            engine.page_by_title_and_tag("Display", 2).map(|p| p.id),
            Some(a2)
        );
        assert_eq!(engine.find_page_id("Display", Some(2)), Ok(a2));
        assert_eq!(
            engine.find_page_id("Missing", None),
            Err(NotebookError::TitleNotFound("Missing".to_string()))
        );
    }

    #[test]
    fn test_zero_bound_is_rejected() {
        let mut engine = TabEngine::default();
        assert_eq!(
            engine.set_show_only_most_recent_pages(true, 0),
            Err(NotebookError::InvalidBound(0))
        );
        assert!(!engine.config().show_only_most_recent_pages);
    }

    #[test]
    fn test_bulk_hide_reports_pinned() {
        let mut engine = TabEngine::default();
        let a = engine.add_page("A", 1);
        let _b = engine.add_page("B", 1);
        let _c = engine.add_page("C", 2);
        engine.pin_page(a).unwrap();

        let kept = engine.hide_pages_matching_tag(1);
        assert_eq!(kept, vec![a]);
        assert_eq!(visible_titles(&engine), vec!["A", "C"]);
    }

    #[test]
    fn test_arena_compaction_keeps_order() {
        let mut engine = TabEngine::default();
        let ids: Vec<_> = (0..100)
            .map(|i| engine.add_untagged_page(format!("P{}", i)))
            .collect();
        for id in ids.iter().take(80) {
            engine.remove_page(*id).unwrap();
        }

        assert_eq!(engine.number_of_pages(), 20);
        let titles: Vec<_> = engine.pages().map(|p| p.title.clone()).collect();
        let expected: Vec<_> = (80..100).map(|i| format!("P{}", i)).collect();
        assert_eq!(titles, expected);
        for id in &ids[80..] {
            assert_eq!(engine.page(*id).map(|p| p.id), Some(*id));
        }
    }

    #[test]
    fn test_events_are_flushed_after_operation() {
        let log = Rc::new(RefCell::new(EventLog::default()));
        let mut engine =
            TabEngine::with_observer(NotebookConfig::most_recent(1), Box::new(log.clone()));

        let a = engine.add_untagged_page("A");
        log.borrow_mut().events.clear();

        let b = engine.add_untagged_page("B");
        let events = log.borrow().events.clone();
        assert_eq!(
            events,
            vec![
                PageEvent::Created(b),
                PageEvent::VisibilityChanged {
                    id: b,
                    visible: true
                },
                PageEvent::VisibilityChanged {
                    id: a,
                    visible: false
                },
                PageEvent::Raised {
                    id: b,
                    previous: Some(a)
                },
            ]
        );
    }

    #[test]
    fn test_content_change_is_reported_once() {
        let log = Rc::new(RefCell::new(EventLog::default()));
        let mut engine = TabEngine::with_observer(NotebookConfig::default(), Box::new(log.clone()));
        let a = engine.add_untagged_page("A");
        log.borrow_mut().events.clear();

        engine.set_page_content(a, Some(ContentHandle(7))).unwrap();
        engine.set_page_content(a, Some(ContentHandle(7))).unwrap();

        assert_eq!(
            log.borrow().events,
            vec![PageEvent::ContentChanged {
                id: a,
                content: Some(ContentHandle(7))
            }]
        );
        assert_eq!(engine.page(a).unwrap().content, Some(ContentHandle(7)));
    }
}
