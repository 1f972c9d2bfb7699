//! Month-bucketed time series
//!
//! Two shapes: `monthly_series` emits one entry per month actually present
//! in the data, while `fixed_window_series` always emits the full configured
//! window, zero-filling absent months: the demand summary table shows 13
//! columns whether or not any data landed in them. Both sort by the month
//! key's date value, never by its display label.

use super::group::group_stats;
use crate::types::{DateStamp, MonthKey};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One month's entry in a series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// The month bucket
    pub month: MonthKey,
    /// Records in the bucket
    pub count: u64,
    /// Summed value over the bucket
    pub sum: f64,
}

/// A fixed run of consecutive months
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthWindow {
    /// First month of the window
    pub start: MonthKey,
    /// Number of consecutive months
    pub months: usize,
}

impl MonthWindow {
    /// Create a window
    pub fn new(start: MonthKey, months: usize) -> Self {
        Self { start, months }
    }

    /// The months of the window, in order
    pub fn iter(&self) -> impl Iterator<Item = MonthKey> {
        let mut current = self.start;
        (0..self.months).map(move |_| {
            let month = current;
            current = current.next();
            month
        })
    }

    /// Whether a month falls inside the window
    pub fn contains(&self, month: MonthKey) -> bool {
        self.iter().any(|m| m == month)
    }
}

/// One entry per month present in the data, chronologically
///
/// Records with an `Unknown` date are excluded; they remain in whatever
/// ungrouped totals the caller computed separately.
pub fn monthly_series<T, FD, FV>(items: &[T], date_fn: FD, value_fn: FV) -> Vec<SeriesPoint>
where
    FD: Fn(&T) -> DateStamp,
    FV: Fn(&T) -> f64,
{
    let dated: Vec<(&T, MonthKey)> = items
        .iter()
        .filter_map(|i| date_fn(i).month_key().map(|m| (i, m)))
        .collect();
    let stats = group_stats(&dated, |(_, m)| *m, |(i, _)| value_fn(i));

    let mut points: Vec<SeriesPoint> = stats
        .into_iter()
        .map(|(month, s)| SeriesPoint {
            month,
            count: s.count,
            sum: s.total,
        })
        .collect();
    points.sort_by_key(|p| p.month);
    points
}

/// Exactly one entry per window month, zero-filled
///
/// Records outside the window (or with an `Unknown` date) are excluded. The
/// result always has `window.months` entries regardless of data sparsity.
pub fn fixed_window_series<T, FD, FV>(
    items: &[T],
    date_fn: FD,
    value_fn: FV,
    window: MonthWindow,
) -> Vec<SeriesPoint>
where
    FD: Fn(&T) -> DateStamp,
    FV: Fn(&T) -> f64,
{
    let mut by_month: IndexMap<MonthKey, SeriesPoint> = window
        .iter()
        .map(|month| {
            (
                month,
                SeriesPoint {
                    month,
                    count: 0,
                    sum: 0.0,
                },
            )
        })
        .collect();

    for item in items {
        if let Some(month) = date_fn(item).month_key() {
            if let Some(point) = by_month.get_mut(&month) {
                point.count += 1;
                point.sum += value_fn(item);
            }
        }
    }

    by_month.into_values().collect()
}

/// One window month with per-key counts, for stacked charts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackedRow {
    /// The month bucket
    pub month: MonthKey,
    /// Count per stack key, every key present (zero-filled)
    pub counts: IndexMap<String, u64>,
}

/// Per-key monthly counts over a fixed window
///
/// Stack keys are collected from all items in first-seen order (including
/// items whose date falls outside the window), and every row carries every
/// key so a stacked chart gets aligned series.
pub fn stacked_window_series<T, FD, FK>(
    items: &[T],
    date_fn: FD,
    key_fn: FK,
    window: MonthWindow,
) -> Vec<StackedRow>
where
    FD: Fn(&T) -> DateStamp,
    FK: Fn(&T) -> String,
{
    let mut keys: Vec<String> = Vec::new();
    for item in items {
        let key = key_fn(item);
        if !keys.contains(&key) {
            keys.push(key);
        }
    }

    window
        .iter()
        .map(|month| {
            let mut counts: IndexMap<String, u64> =
                keys.iter().map(|k| (k.clone(), 0)).collect();
            for item in items {
                if date_fn(item).month_key() == Some(month) {
                    *counts.entry(key_fn(item)).or_insert(0) += 1;
                }
            }
            StackedRow { month, counts }
        })
        .collect()
}
