//! Constraint resolver - the visibility policy pass
//!
//! A pure function from (pages, raised page, policies, recency queue) to a new
//! visibility set. The three policies run in a fixed order because each one
//! may undo what the previous one did:
//!
//! 1. tag exclusivity: hide pages whose tag differs from the raised page's
//! 2. tag inclusivity: show pages sharing a tag with any visible page
//! 3. most-recent bounding: evict least recently used unpinned pages
//!
//! Pages shown by rule 2 enter the recency queue as least recent, so rule 3
//! evicts them before anything the user raised or showed explicitly. That keeps
//! a second pass from undoing the first.

use std::collections::{HashMap, HashSet};

use crate::config::NotebookConfig;
use crate::model::{MostRecentQueue, Page, PageId, Tag};

/// The part of a page the resolver looks at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    pub id: PageId,
    pub tag: Tag,
    pub visible: bool,
    pub pinned: bool,
}

impl From<&Page> for PageState {
    fn from(page: &Page) -> Self {
        Self {
            id: page.id,
            tag: page.tag,
            visible: page.visible,
            pinned: page.pinned,
        }
    }
}

/// Outcome of one resolver pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Pages that became visible, in page order
    pub shown: Vec<PageId>,
    /// Pages that became invisible, in page order
    pub hidden: Vec<PageId>,
    /// Recency queue after the pass
    pub queue: MostRecentQueue,
}

impl Resolution {
    pub fn is_noop(&self) -> bool {
        self.shown.is_empty() && self.hidden.is_empty()
    }
}

/// Run the visibility policies over `pages`
///
/// `pages` must be in insertion order. The input is never modified; the
/// returned `Resolution` describes the net change.
pub fn resolve(
    pages: &[PageState],
    raised: Option<PageId>,
    config: &NotebookConfig,
    queue: &MostRecentQueue,
) -> Resolution {
    let mut states = pages.to_vec();
    let slots: HashMap<PageId, usize> = states
        .iter()
        .enumerate()
        .map(|(slot, state)| (state.id, slot))
        .collect();
    let mut queue = normalize_queue(&mut states, &slots, queue);

    if config.show_only_pages_with_same_tag {
        hide_other_tags(&mut states, &slots, raised, &mut queue);
    }

    if config.show_all_pages_with_same_tag {
        show_same_tags(&mut states, &mut queue);
    }

    if let Some(bound) = config.most_recent_bound() {
        bound_most_recent(&mut states, &slots, bound, &mut queue);
    } else if config.show_only_most_recent_pages {
        tracing::debug!("most-recent bound is zero, not enforced");
    }

    let mut resolution = Resolution {
        queue,
        ..Resolution::default()
    };
    for (before, after) in pages.iter().zip(&states) {
        match (before.visible, after.visible) {
            (false, true) => resolution.shown.push(after.id),
            (true, false) => resolution.hidden.push(after.id),
            _ => {}
        }
    }
    resolution
}

/// Re-establish the structural invariants the policies rely on
///
/// Pinned pages are visible, the queue holds exactly the visible pages, and
/// visible pages missing from the queue are appended as least recent.
fn normalize_queue(
    states: &mut [PageState],
    slots: &HashMap<PageId, usize>,
    queue: &MostRecentQueue,
) -> MostRecentQueue {
    for state in states.iter_mut().filter(|s| s.pinned && !s.visible) {
        tracing::warn!("pinned page {} was hidden, showing it", state.id);
        state.visible = true;
    }

    let mut normalized = MostRecentQueue::new();
    for id in queue.iter().rev() {
        if slots.get(&id).is_some_and(|&slot| states[slot].visible) {
            normalized.touch(id);
        }
    }
    for state in states.iter().filter(|s| s.visible) {
        normalized.push_least_recent(state.id);
    }
    normalized
}

fn hide_other_tags(
    states: &mut [PageState],
    slots: &HashMap<PageId, usize>,
    raised: Option<PageId>,
    queue: &mut MostRecentQueue,
) {
    let Some(raised) = raised.and_then(|id| slots.get(&id)).map(|&slot| states[slot]) else {
        return;
    };
    // A pinned raised page is always-available content, it does not evict others
    if raised.pinned {
        return;
    }

    for state in states
        .iter_mut()
        .filter(|s| s.visible && !s.pinned && s.tag != raised.tag)
    {
        tracing::trace!(
            "tag {} differs from raised tag {}, hiding {}",
            state.tag,
            raised.tag,
            state.id
        );
        state.visible = false;
        queue.remove(state.id);
    }
}

fn show_same_tags(states: &mut [PageState], queue: &mut MostRecentQueue) {
    let visible_tags: HashSet<Tag> = states.iter().filter(|s| s.visible).map(|s| s.tag).collect();

    for state in states
        .iter_mut()
        .filter(|s| !s.visible && visible_tags.contains(&s.tag))
    {
        tracing::trace!("tag {} is visible, showing {}", state.tag, state.id);
        state.visible = true;
        queue.push_least_recent(state.id);
    }
}

fn bound_most_recent(
    states: &mut [PageState],
    slots: &HashMap<PageId, usize>,
    bound: usize,
    queue: &mut MostRecentQueue,
) {
    loop {
        let unpinned = queue
            .iter()
            .filter(|&id| can_be_hidden(states, slots, id))
            .count();
        if unpinned <= bound {
            break;
        }
        let Some(victim) = queue.least_recent_where(|id| can_be_hidden(states, slots, id)) else {
            break;
        };
        tracing::trace!(
            "{} unpinned recent pages exceed {}, evicting {}",
            unpinned,
            bound,
            victim
        );
        if let Some(&slot) = slots.get(&victim) {
            states[slot].visible = false;
        }
        queue.remove(victim);
    }
}

fn can_be_hidden(states: &[PageState], slots: &HashMap<PageId, usize>, id: PageId) -> bool {
    slots.get(&id).is_some_and(|&slot| !states[slot].pinned)
}
