//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use notebook::{PageId, TabEngine};

/// Titles of visible pages in insertion order
pub fn visible_titles(engine: &TabEngine) -> Vec<String> {
    engine
        .pages()
        .filter(|p| p.visible)
        .map(|p| p.title.clone())
        .collect()
}

/// Title of the raised page, if any
pub fn raised_title(engine: &TabEngine) -> Option<String> {
    engine
        .raised_page_id()
        .and_then(|id| engine.page(id))
        .map(|p| p.title.clone())
}

pub fn is_visible(engine: &TabEngine, id: PageId) -> bool {
    engine.page(id).is_some_and(|p| p.visible)
}

/// Ids of visible pages other than `except`
pub fn visible_ids_except(engine: &TabEngine, except: PageId) -> Vec<PageId> {
    engine
        .pages()
        .filter(|p| p.visible && p.id != except)
        .map(|p| p.id)
        .collect()
}

/// Assert that every page in `ids` is still live and visible
pub fn assert_still_visible(engine: &TabEngine, ids: &[PageId]) {
    for &id in ids {
        assert!(is_visible(engine, id), "page {} was hidden", id);
    }
}

/// Assert the invariants every reachable state must satisfy
pub fn assert_invariants(engine: &TabEngine) {
    let visible = engine.number_of_visible_pages();

    match engine.raised_page_id() {
        None => assert_eq!(visible, 0, "visible pages but nothing raised"),
        Some(id) => {
            assert!(visible > 0, "raised page with no visible pages");
            assert!(is_visible(engine, id), "raised page {} is hidden", id);
        }
    }

    for page in engine.pages() {
        if page.pinned {
            assert!(page.visible, "pinned page {} is hidden", page.id);
        }
    }

    let mut ids: Vec<_> = engine.pages().map(|p| p.id).collect();
    let count = ids.len();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), count, "duplicate page ids");
    assert_eq!(count, engine.number_of_pages());

    let recent = engine.most_recent_pages();
    for id in recent.iter() {
        assert!(is_visible(engine, id), "recent page {} is not visible", id);
    }
    assert_eq!(recent.len(), visible, "recent queue and visible set differ");

    if let Some(bound) = engine.config().most_recent_bound() {
        let unpinned = engine.pages().filter(|p| p.visible && !p.pinned).count();
        assert!(
            unpinned <= bound,
            "{} unpinned pages visible, bound is {}",
            unpinned,
            bound
        );
    }
}
