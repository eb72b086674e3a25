//! Growth calculator: compares the two halves of a time-ordered series.

use crate::aggregate::{daily_totals, Bucket};
use crate::kpi::{finite, safe_div};
use chrono::NaiveDateTime;

/// Percentage change from the first half of `series` to the second.
///
/// The split point is `len / 2`, so with an odd length the middle value
/// belongs to the second half. Returns 0 when the first half sums to 0 or
/// less, and for series shorter than two values.
pub fn growth_rate(series: &[f64]) -> f64 {
    if series.len() < 2 {
        return 0.0;
    }
    let (first, second) = series.split_at(series.len() / 2);
    let first: f64 = first.iter().copied().map(finite).sum();
    let second: f64 = second.iter().copied().map(finite).sum();
    if first > 0.0 {
        safe_div(second - first, first) * 100.0
    } else {
        0.0
    }
}

/// Growth over bucket values in their existing order.
pub fn bucket_growth(buckets: &[Bucket]) -> f64 {
    let series: Vec<f64> = buckets.iter().map(|b| b.value).collect();
    growth_rate(&series)
}

/// Growth of daily totals, with days sorted ascending. Undated records are ignored.
pub fn daily_growth<T, D, V>(records: &[T], date: D, value: V) -> f64
where
    D: Fn(&T) -> Option<NaiveDateTime>,
    V: Fn(&T) -> f64,
{
    bucket_growth(&daily_totals(records, date, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn odd_length_puts_middle_in_second_half() {
        // first = [10], second = [10, 10]
        assert!((growth_rate(&[10.0, 10.0, 10.0]) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn non_positive_first_half_is_zero() {
        assert_eq!(growth_rate(&[0.0, 0.0, 5.0, 5.0]), 0.0);
        assert_eq!(growth_rate(&[-5.0, 10.0]), 0.0);
    }
}
