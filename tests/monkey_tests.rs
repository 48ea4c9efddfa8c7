//! Monkey tests - random operation sequences checked against the invariants
//!
//! Every policy combination is driven through a long pseudo-random sequence
//! of lifecycle calls. After each call the engine must satisfy the shared
//! invariants, and an extra constraint pass must change nothing.

mod common;

use common::{assert_invariants, assert_still_visible, visible_ids_except};
use notebook::{NotebookConfig, PageId, TabEngine};

/// Small deterministic generator so failures reproduce
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next() % n as u64) as usize
    }
}

fn all_configs() -> Vec<NotebookConfig> {
    let mut configs = Vec::new();
    for bits in 0..8u8 {
        for bound in [1, 3] {
            configs.push(NotebookConfig {
                show_only_pages_with_same_tag: bits & 1 != 0,
                show_all_pages_with_same_tag: bits & 2 != 0,
                show_only_most_recent_pages: bits & 4 != 0,
                number_of_most_recent_pages: bound,
            });
        }
    }
    configs
}

fn pick(engine: &TabEngine, rng: &mut Lcg, removed: &[PageId]) -> PageId {
    let live: Vec<_> = engine.pages().map(|p| p.id).collect();
    // Now and then aim at a removed page to exercise NotFound
    if live.is_empty() || (!removed.is_empty() && rng.below(10) == 0) {
        return removed
            .get(rng.below(removed.len().max(1)))
            .copied()
            .unwrap_or(PageId(9999));
    }
    live[rng.below(live.len())]
}

fn run_sequence(config: NotebookConfig, seed: u64, steps: usize) {
    let mut rng = Lcg(seed);
    let mut engine = TabEngine::new(config.clone());
    let mut removed = Vec::new();
    let mut issued = Vec::new();

    for step in 0..steps {
        let op = rng.below(10);
        match op {
            0 | 1 => {
                let tag = rng.below(3) as i32;
                let id = engine.add_page(format!("P{}", step), tag);
                assert!(!issued.contains(&id), "id {} issued twice", id);
                issued.push(id);
            }
            2 => {
                let id = pick(&engine, &mut rng, &removed);
                let others = visible_ids_except(&engine, id);
                if engine.remove_page(id).is_ok() {
                    removed.push(id);
                    // Only tag exclusivity may hide pages when the raised one goes away
                    if !config.show_only_pages_with_same_tag {
                        assert_still_visible(&engine, &others);
                    }
                }
            }
            3 => {
                let id = pick(&engine, &mut rng, &removed);
                let _ = engine.raise_page(id);
            }
            4 => {
                let id = pick(&engine, &mut rng, &removed);
                let _ = engine.show_page(id);
            }
            5 => {
                let id = pick(&engine, &mut rng, &removed);
                let pinned = engine.page(id).is_some_and(|p| p.pinned);
                let result = engine.hide_page(id);
                assert_eq!(result.is_err(), pinned || engine.page(id).is_none());
            }
            6 => {
                let id = pick(&engine, &mut rng, &removed);
                let _ = engine.toggle_page_pinned(id);
            }
            7 => {
                let id = pick(&engine, &mut rng, &removed);
                let _ = engine.set_page_tag(id, rng.below(3) as i32);
                engine.constrain_visible_pages();
            }
            8 => {
                let tag = rng.below(3) as i32;
                if rng.below(2) == 0 {
                    engine.hide_pages_matching_tag(tag);
                } else {
                    engine.show_pages_matching_tag(tag);
                }
            }
            _ => {
                let id = pick(&engine, &mut rng, &removed);
                let _ = engine.toggle_page_visibility(id);
            }
        }

        assert_invariants(&engine);
        let visible: Vec<_> = engine.pages().filter(|p| p.visible).map(|p| p.id).collect();
        assert!(
            !engine.constrain_visible_pages(),
            "second pass changed state at step {} with {:?}",
            step,
            config
        );
        let again: Vec<_> = engine.pages().filter(|p| p.visible).map(|p| p.id).collect();
        assert_eq!(visible, again);
    }
}

#[test]
fn test_random_sequences_keep_invariants() {
    for (i, config) in all_configs().into_iter().enumerate() {
        for seed in 0..4 {
            run_sequence(config.clone(), seed * 7919 + i as u64, 300);
        }
    }
}

#[test]
fn test_many_pages_under_tight_bound() {
    let mut engine = TabEngine::new(NotebookConfig::most_recent(2));
    let ids: Vec<_> = (0..200)
        .map(|i| engine.add_page(format!("P{}", i), (i % 4) as i32))
        .collect();
    assert_eq!(engine.number_of_visible_pages(), 2);

    for id in ids.iter().step_by(3) {
        engine.raise_page(*id).unwrap();
        assert_invariants(&engine);
    }

    engine.remove_all_pages();
    assert_eq!(engine.number_of_pages(), 0);
    assert_eq!(engine.raised_page_id(), None);
    assert!(engine.most_recent_pages().is_empty());
}

#[test]
fn test_everything_pinned_leaves_bound_unenforced() {
    let mut engine = TabEngine::new(NotebookConfig::most_recent(1));
    let ids: Vec<_> = (0..4).map(|i| engine.add_untagged_page(format!("P{}", i))).collect();
    for id in &ids {
        engine.pin_page(*id).unwrap();
    }

    assert_eq!(engine.number_of_visible_pages(), 4);
    assert!(ids.iter().all(|id| engine.can_be_hidden(*id) == Ok(false)));
    assert!(!engine.constrain_visible_pages());
}
