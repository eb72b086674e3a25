//! Grouping aggregator: group-by with a caller-supplied accumulator.
//!
//! Groups come back in order of first appearance of their key. Time-keyed
//! helpers (`monthly_timeline`, `daily_totals`, `hourly_distribution`)
//! re-sort by key afterwards, which for zero-padded keys is chronological.

use crate::kpi::finite;
use ahash::AHashMap;
use chrono::NaiveDateTime;
use serde::Serialize;

/// One group's aggregate. Serialized as `{name, value, count}`, the shape
/// chart widgets consume.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bucket {
    #[serde(rename = "name")]
    pub key: String,
    pub value: f64,
    pub count: usize,
}

impl Bucket {
    pub fn empty(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: 0.0,
            count: 0,
        }
    }
}

/// Fold every record into the accumulator of its key.
///
/// `init` builds the zero value for a newly seen key; `fold` adds one record
/// to it. Keys are unique in the output.
pub fn group_by<T, S, K, I, F>(records: &[T], mut key: K, mut init: I, mut fold: F) -> Vec<(String, S)>
where
    K: FnMut(&T) -> String,
    I: FnMut(&str) -> S,
    F: FnMut(&mut S, &T),
{
    let mut index: AHashMap<String, usize> = AHashMap::new();
    let mut groups: Vec<(String, S)> = Vec::new();
    for record in records {
        let k = key(record);
        let slot = match index.get(&k) {
            Some(&i) => i,
            None => {
                let i = groups.len();
                let acc = init(&k);
                index.insert(k.clone(), i);
                groups.push((k, acc));
                i
            }
        };
        fold(&mut groups[slot].1, record);
    }
    groups
}

/// Sum `value` per key and count the records behind each sum.
pub fn bucketize<T, K, V>(records: &[T], key: K, mut value: V) -> Vec<Bucket>
where
    K: FnMut(&T) -> String,
    V: FnMut(&T) -> f64,
{
    group_by(records, key, |k: &str| Bucket::empty(k), |b, r| {
        b.value += finite(value(r));
        b.count += 1;
    })
    .into_iter()
    .map(|(_, b)| b)
    .collect()
}

/// Number of records per key; `value` equals `count`.
pub fn count_by<T, K>(records: &[T], key: K) -> Vec<Bucket>
where
    K: FnMut(&T) -> String,
{
    bucketize(records, key, |_| 1.0)
}

pub fn sort_by_key(mut buckets: Vec<Bucket>) -> Vec<Bucket> {
    buckets.sort_by(|a, b| a.key.cmp(&b.key));
    buckets
}

/// Reorder buckets to follow `order`; keys not listed keep their relative
/// order after the listed ones.
pub fn sort_by_order(mut buckets: Vec<Bucket>, order: &[&str]) -> Vec<Bucket> {
    buckets.sort_by_key(|b| order.iter().position(|o| *o == b.key).unwrap_or(order.len()));
    buckets
}

pub fn month_key(ts: NaiveDateTime) -> String {
    ts.format("%Y-%m").to_string()
}

pub fn day_key(ts: NaiveDateTime) -> String {
    ts.format("%Y-%m-%d").to_string()
}

pub fn hour_key(ts: NaiveDateTime) -> String {
    ts.format("%H:00").to_string()
}

/// Records that carry a date, paired with it. Undated records cannot be
/// placed on a timeline and are left out.
fn dated<T, D>(records: &[T], date: D) -> Vec<(NaiveDateTime, &T)>
where
    D: Fn(&T) -> Option<NaiveDateTime>,
{
    records.iter().filter_map(|r| date(r).map(|d| (d, r))).collect()
}

fn timeline<T, D, V>(records: &[T], date: D, value: V, key_of: fn(NaiveDateTime) -> String) -> Vec<Bucket>
where
    D: Fn(&T) -> Option<NaiveDateTime>,
    V: Fn(&T) -> f64,
{
    let rows = dated(records, date);
    sort_by_key(bucketize(&rows, |(d, _)| key_of(*d), |(_, r)| value(*r)))
}

/// Per-month (`YYYY-MM`) totals, ascending.
pub fn monthly_timeline<T, D, V>(records: &[T], date: D, value: V) -> Vec<Bucket>
where
    D: Fn(&T) -> Option<NaiveDateTime>,
    V: Fn(&T) -> f64,
{
    timeline(records, date, value, month_key)
}

/// Per-day (`YYYY-MM-DD`) totals, ascending.
pub fn daily_totals<T, D, V>(records: &[T], date: D, value: V) -> Vec<Bucket>
where
    D: Fn(&T) -> Option<NaiveDateTime>,
    V: Fn(&T) -> f64,
{
    timeline(records, date, value, day_key)
}

/// Per-hour-of-day (`HH:00`) totals, ascending by hour.
pub fn hourly_distribution<T, D, V>(records: &[T], date: D, value: V) -> Vec<Bucket>
where
    D: Fn(&T) -> Option<NaiveDateTime>,
    V: Fn(&T) -> f64,
{
    timeline(records, date, value, hour_key)
}

pub fn total_value(buckets: &[Bucket]) -> f64 {
    buckets.iter().map(|b| b.value).sum()
}

pub fn total_count(buckets: &[Bucket]) -> usize {
    buckets.iter().map(|b| b.count).sum()
}
