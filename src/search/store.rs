//! Per-worker collection of the lowest-error candidates seen so far
//!
//! Inserts are cheap and keep every distinct error. The owner calls
//! [`RankedStore::compact`] every so often to cut the store back to the best
//! `K` entries, so memory is bounded by the compaction interval rather than by
//! the number of evaluated expressions.

use crate::search::candidate::{Candidate, ErrorKey};
use std::collections::BTreeMap;

/// Result of offering a candidate to the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// Stored as a new entry
    Added,
    /// An entry with exactly the same error is already stored; it wins
    Duplicate,
    /// The error is NaN and cannot be ranked
    Rejected,
}

/// Candidates keyed by ascending error
#[derive(Debug, Default)]
pub struct RankedStore {
    entries: BTreeMap<ErrorKey, Candidate>,
}

impl RankedStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Offer a candidate. The first candidate with a given error is kept and
    /// later ones with the same error are dropped.
    pub fn insert(&mut self, candidate: Candidate) -> InsertOutcome {
        if candidate.error.is_nan() {
            return InsertOutcome::Rejected;
        }

        match self.entries.entry(candidate.key()) {
            std::collections::btree_map::Entry::Occupied(_) => InsertOutcome::Duplicate,
            std::collections::btree_map::Entry::Vacant(slot) => {
                slot.insert(candidate);
                InsertOutcome::Added
            }
        }
    }

    /// Keep only the `keep` lowest-error entries.
    pub fn compact(&mut self, keep: usize) {
        if self.entries.len() <= keep {
            return;
        }
        // The map is rebuilt from the survivors and the rest is dropped with it.
        let survivors: BTreeMap<_, _> = std::mem::take(&mut self.entries)
            .into_iter()
            .take(keep)
            .collect();
        self.entries = survivors;
    }

    /// Lowest-error entry
    pub fn best(&self) -> Option<&Candidate> {
        self.entries.values().next()
    }

    /// Ascending walk over the stored candidates
    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.entries.values()
    }

    /// Consume the store and return its `keep` best entries in ascending
    /// error order.
    pub fn drain_top_k(self, keep: usize) -> Vec<Candidate> {
        self.entries.into_values().take(keep).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::Expression;
    use rand::seq::SliceRandom;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn candidate(code: u32, error: f64) -> Candidate {
        Candidate {
            expression: Expression::from_codes(&[code]),
            value: error,
            error,
        }
    }

    #[test]
    fn test_insert_orders_by_error() {
        let mut store = RankedStore::new();
        for (i, e) in [3.0, 1.0, 2.0, 0.5].iter().enumerate() {
            assert_eq!(store.insert(candidate(i as u32, *e)), InsertOutcome::Added);
        }
        let errors: Vec<f64> = store.iter().map(|c| c.error).collect();
        assert_eq!(errors, vec![0.5, 1.0, 2.0, 3.0]);
        assert_eq!(store.best().unwrap().error, 0.5);
    }

    #[test]
    fn test_duplicate_error_keeps_first() {
        let mut store = RankedStore::new();
        assert_eq!(store.insert(candidate(1, 0.25)), InsertOutcome::Added);
        assert_eq!(store.insert(candidate(2, 0.25)), InsertOutcome::Duplicate);
        assert_eq!(store.len(), 1);
        assert_eq!(store.best().unwrap().expression, Expression::from_codes(&[1]));
    }

    #[test]
    fn test_nan_rejected() {
        let mut store = RankedStore::new();
        assert_eq!(store.insert(candidate(1, f64::NAN)), InsertOutcome::Rejected);
        assert!(store.is_empty());
        assert!(store.best().is_none());
    }

    #[test]
    fn test_infinite_error_is_ranked_last() {
        let mut store = RankedStore::new();
        store.insert(candidate(1, f64::INFINITY));
        store.insert(candidate(2, 1e308));
        assert_eq!(store.insert(candidate(3, f64::INFINITY)), InsertOutcome::Duplicate);
        assert_eq!(store.best().unwrap().error, 1e308);
    }

    #[test]
    fn test_compact_keeps_lowest() {
        let mut store = RankedStore::new();
        for i in 0..100u32 {
            store.insert(candidate(i, (100 - i) as f64));
        }
        store.compact(5);
        assert_eq!(store.len(), 5);
        let errors: Vec<f64> = store.iter().map(|c| c.error).collect();
        assert_eq!(errors, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_compact_smaller_than_keep() {
        let mut store = RankedStore::new();
        store.insert(candidate(0, 2.0));
        store.insert(candidate(1, 1.0));
        store.compact(10);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_compact_bound_and_best_randomized() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let keep = 8;
        let mut store = RankedStore::new();

        for round in 0..20 {
            let count = rng.random_range(0..200);
            let mut errors: Vec<f64> = (0..count)
                .map(|_| rng.random_range(0..500) as f64 / 16.0)
                .collect();
            errors.shuffle(&mut rng);

            let before: Vec<f64> = store.iter().map(|c| c.error).collect();
            for (i, e) in errors.iter().enumerate() {
                store.insert(candidate(i as u32, *e));
            }

            let mut distinct: Vec<f64> = before.iter().chain(errors.iter()).copied().collect();
            distinct.sort_by(f64::total_cmp);
            distinct.dedup();

            let true_min = distinct.first().copied();
            assert_eq!(store.best().map(|c| c.error), true_min, "round {}", round);

            store.compact(keep);
            assert_eq!(store.len(), keep.min(distinct.len()), "round {}", round);
            let kept: Vec<f64> = store.iter().map(|c| c.error).collect();
            assert_eq!(kept, distinct[..kept.len()].to_vec());
        }
    }

    #[test]
    fn test_monotonic_inserts_stay_bounded() {
        // Sorted insertion is the worst case for an unbalanced tree.
        let mut store = RankedStore::new();
        for i in 0..10_000u32 {
            store.insert(candidate(i, i as f64));
            if store.len() >= 1000 {
                store.compact(10);
            }
        }
        assert!(store.len() < 1000);
        assert_eq!(store.best().unwrap().error, 0.0);
    }

    #[test]
    fn test_drain_top_k() {
        let mut store = RankedStore::new();
        for i in 0..20u32 {
            store.insert(candidate(i, (i % 7) as f64 + i as f64 / 100.0));
        }
        let top = store.drain_top_k(3);
        assert_eq!(top.len(), 3);
        assert!(top.windows(2).all(|w| w[0].error < w[1].error));
        assert_eq!(top[0].error, 0.0);
    }
}
