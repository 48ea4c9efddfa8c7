//! Most-recently-used ordering of visible pages

use super::page::PageId;

/// Ordered list of page ids, most recent first, without duplicates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MostRecentQueue {
    ids: Vec<PageId>,
}

impl MostRecentQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put `id` at the front, dropping any earlier occurrence
    pub fn touch(&mut self, id: PageId) {
        self.remove(id);
        self.ids.insert(0, id);
    }

    /// Append `id` as the least recent entry unless it is already queued
    ///
    /// Used for pages that become visible as a side effect of a policy rather
    /// than through an explicit show or raise.
    pub fn push_least_recent(&mut self, id: PageId) {
        if !self.contains(id) {
            self.ids.push(id);
        }
    }

    /// Remove `id`, returning whether it was queued
    pub fn remove(&mut self, id: PageId) -> bool {
        match self.ids.iter().position(|&queued| queued == id) {
            Some(index) => {
                self.ids.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, id: PageId) -> bool {
        self.ids.contains(&id)
    }

    /// Id at `index`, where 0 is the most recent
    pub fn get(&self, index: usize) -> Option<PageId> {
        self.ids.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterate from most recent to least recent
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = PageId> + '_ {
        self.ids.iter().copied()
    }

    /// Least recent entry accepted by `predicate`
    pub fn least_recent_where(&self, mut predicate: impl FnMut(PageId) -> bool) -> Option<PageId> {
        self.iter().rev().find(|&id| predicate(id))
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}
