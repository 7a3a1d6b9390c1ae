//! Deterministic top-N selection.
//!
//! Every ranked list in the crate orders by count descending, then by key
//! ascending, so equal counts never depend on hash map iteration order.

use std::cmp::Ordering;

/// Compare two `(key, count)` entries in rank order.
pub fn rank_order<K: Ord>(a: &(K, u64), b: &(K, u64)) -> Ordering {
    b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0))
}

/// Sort entries into rank order.
pub fn ranked<K: Ord>(counts: impl IntoIterator<Item = (K, u64)>) -> Vec<(K, u64)> {
    let mut entries: Vec<(K, u64)> = counts.into_iter().collect();
    entries.sort_by(rank_order);
    entries
}

/// The `n` highest-ranked entries.
pub fn top_n<K: Ord>(counts: impl IntoIterator<Item = (K, u64)>, n: usize) -> Vec<(K, u64)> {
    let mut entries = ranked(counts);
    entries.truncate(n);
    entries
}
