//! Scalar summary metrics. Every division here is guarded: a zero
//! denominator yields exactly 0, never NaN or infinity.

use serde::{Deserialize, Serialize};

/// How a KPI value should be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Currency,
    Count,
    Percent,
    Rating,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Currency => "currency",
            Unit::Count => "count",
            Unit::Percent => "percent",
            Unit::Rating => "rating",
        }
    }
}

/// A single dashboard figure with an optional period-over-period change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kpi {
    pub label: String,
    pub value: f64,
    pub unit: Unit,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_percent: Option<f64>,
}

impl Kpi {
    pub fn new(label: impl Into<String>, value: f64, unit: Unit) -> Self {
        Self {
            label: label.into(),
            value: finite(value),
            unit,
            change_percent: None,
        }
    }

    pub fn count(label: impl Into<String>, n: usize) -> Self {
        Self::new(label, n as f64, Unit::Count)
    }

    pub fn with_change(mut self, percent: f64) -> Self {
        self.change_percent = Some(finite(percent));
        self
    }
}

/// Map NaN and infinities to 0.
#[inline]
pub fn finite(x: f64) -> f64 {
    if x.is_finite() { x } else { 0.0 }
}

/// `numerator / denominator`, or 0 when the denominator is 0.
#[inline]
pub fn safe_div(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        finite(numerator / denominator)
    }
}

/// Sum of a numeric field; 0 for empty input.
pub fn total<T, F>(records: &[T], field: F) -> f64
where
    F: Fn(&T) -> f64,
{
    records.iter().map(|r| finite(field(r))).sum()
}

/// `total / count`, 0 when count is 0.
pub fn mean(total: f64, count: usize) -> f64 {
    if count == 0 { 0.0 } else { safe_div(total, count as f64) }
}

/// Mean of a numeric field over all records; 0 for empty input.
pub fn average<T, F>(records: &[T], field: F) -> f64
where
    F: Fn(&T) -> f64,
{
    mean(total(records, field), records.len())
}

/// `(revenue - cost) / revenue * 100`, 0 when revenue is 0.
pub fn margin(revenue: f64, cost: f64) -> f64 {
    safe_div(revenue - cost, revenue) * 100.0
}

/// `part / whole * 100`, 0 when whole is 0.
pub fn percent_of(part: f64, whole: f64) -> f64 {
    safe_div(part, whole) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kpi_sanitizes_non_finite_values() {
        let k = Kpi::new("x", f64::NAN, Unit::Currency).with_change(f64::INFINITY);
        assert_eq!(k.value, 0.0);
        assert_eq!(k.change_percent, Some(0.0));
    }

    #[test]
    fn change_percent_is_omitted_when_absent() {
        let v = serde_json::to_value(Kpi::count("Banks", 3)).unwrap();
        assert_eq!(v, serde_json::json!({"label": "Banks", "value": 3.0, "unit": "count"}));
    }
}
