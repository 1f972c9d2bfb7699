//! Grouped counts and sums
//!
//! Groupings preserve first-seen key order (IndexMap), so a table renders in
//! data order and a re-render from the same data is byte-identical. Top-N
//! views sort stable-descending by count: ties keep their original order.

use indexmap::IndexMap;
use std::hash::Hash;

/// Count items per key, in first-seen key order
///
/// The sum of all counts always equals the number of items.
pub fn group_count<T, K, F>(items: &[T], key_fn: F) -> IndexMap<K, u64>
where
    K: Hash + Eq,
    F: Fn(&T) -> K,
{
    let mut counts = IndexMap::new();
    for item in items {
        *counts.entry(key_fn(item)).or_insert(0) += 1;
    }
    counts
}

/// Sum a value per key, in first-seen key order
///
/// Missing values were already coerced to 0 upstream, so this never skips an
/// item.
pub fn group_sum<T, K, FK, FV>(items: &[T], key_fn: FK, value_fn: FV) -> IndexMap<K, f64>
where
    K: Hash + Eq,
    FK: Fn(&T) -> K,
    FV: Fn(&T) -> f64,
{
    let mut sums = IndexMap::new();
    for item in items {
        *sums.entry(key_fn(item)).or_insert(0.0) += value_fn(item);
    }
    sums
}

/// Count and total per group
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GroupStats {
    /// Items in the group
    pub count: u64,
    /// Summed value over the group
    pub total: f64,
}

/// Count items and sum a value per key in one pass
pub fn group_stats<T, K, FK, FV>(items: &[T], key_fn: FK, value_fn: FV) -> IndexMap<K, GroupStats>
where
    K: Hash + Eq,
    FK: Fn(&T) -> K,
    FV: Fn(&T) -> f64,
{
    let mut stats: IndexMap<K, GroupStats> = IndexMap::new();
    for item in items {
        let entry = stats.entry(key_fn(item)).or_default();
        entry.count += 1;
        entry.total += value_fn(item);
    }
    stats
}

/// The `n` largest groups, stable-descending by count
///
/// Ties keep their first-seen order, so repeated renders are identical.
pub fn top_n<K: Clone>(counts: &IndexMap<K, u64>, n: usize) -> Vec<(K, u64)> {
    let mut entries: Vec<(K, u64)> = counts.iter().map(|(k, v)| (k.clone(), *v)).collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1)); // sort_by is stable
    entries.truncate(n);
    entries
}

/// All groups, stable-descending by count
pub fn sorted_desc<K: Clone>(counts: &IndexMap<K, u64>) -> Vec<(K, u64)> {
    top_n(counts, counts.len())
}
