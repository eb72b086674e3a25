//! Ranker: top-N by a metric, descending, ties kept in input order.

use crate::kpi::finite;
use serde::Serialize;
use std::cmp::Ordering;

/// A record with its ranking metric and 1-based position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntry<T> {
    pub rank: usize,
    pub metric: f64,
    #[serde(flatten)]
    pub record: T,
}

/// The `n` records with the highest `metric`.
///
/// The sort is stable, so equal metrics keep their input order. Non-finite
/// metrics rank as 0. Fewer than `n` records returns all of them, sorted.
pub fn top_n<T, F>(records: &[T], metric: F, n: usize) -> Vec<RankedEntry<T>>
where
    T: Clone,
    F: Fn(&T) -> f64,
{
    let mut scored: Vec<(f64, &T)> = records.iter().map(|r| (finite(metric(r)), r)).collect();
    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
    scored
        .into_iter()
        .take(n)
        .enumerate()
        .map(|(i, (metric, record))| RankedEntry {
            rank: i + 1,
            metric,
            record: record.clone(),
        })
        .collect()
}
