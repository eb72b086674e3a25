use dashboard_metrics::growth::{daily_growth, growth_rate};
use dashboard_metrics::kpi::{average, margin, mean, percent_of, total};
use dashboard_metrics::models::Transaction;
use dashboard_metrics::normalize::collection;
use serde_json::json;

fn totals(values: &[f64]) -> Vec<Transaction> {
    let raw: Vec<_> = values.iter().map(|v| json!({"total": v})).collect();
    collection(&json!(raw), "transactions")
}

#[test]
fn average_is_safe_on_empty_input() {
    assert_eq!(average(&totals(&[]), |t| t.total), 0.0);
    assert_eq!(average(&totals(&[10.0]), |t| t.total), 10.0);
    assert_eq!(average(&totals(&[10.0, 20.0]), |t| t.total), 15.0);
    assert_eq!(mean(100.0, 0), 0.0);
}

#[test]
fn total_of_empty_is_zero() {
    assert_eq!(total(&totals(&[]), |t| t.total), 0.0);
    assert_eq!(total(&totals(&[1.5, 2.5]), |t| t.total), 4.0);
}

#[test]
fn margin_guards_zero_revenue() {
    assert_eq!(margin(0.0, 5.0), 0.0);
    assert!((margin(100.0, 60.0) - 40.0).abs() < 1e-9);
    assert!((margin(50.0, 75.0) + 50.0).abs() < 1e-9);
}

#[test]
fn percent_of_guards_zero_whole() {
    assert_eq!(percent_of(3.0, 0.0), 0.0);
    assert!((percent_of(1.0, 4.0) - 25.0).abs() < 1e-9);
}

#[test]
fn outputs_are_never_nan_or_infinite() {
    for v in [
        average(&totals(&[]), |t| t.total),
        margin(0.0, 0.0),
        percent_of(0.0, 0.0),
        growth_rate(&[]),
        growth_rate(&[0.0, 0.0]),
        growth_rate(&[f64::NAN, 1.0]),
    ] {
        assert!(v.is_finite());
        assert_eq!(v, 0.0);
    }
}

#[test]
fn growth_sign_follows_halves() {
    assert!((growth_rate(&[10.0, 10.0, 20.0, 20.0]) - 100.0).abs() < 1e-9);
    assert!((growth_rate(&[20.0, 20.0, 10.0, 10.0]) + 50.0).abs() < 1e-9);
    assert_eq!(growth_rate(&[]), 0.0);
    assert_eq!(growth_rate(&[42.0]), 0.0);
}

#[test]
fn daily_growth_sorts_days_first() {
    // Out of order on input; by day: [10, 10, 20, 20] -> +100%.
    let tx: Vec<Transaction> = collection(
        &json!([
            {"date": "2024-01-04", "total": 20},
            {"date": "2024-01-01", "total": 10},
            {"date": "2024-01-03", "total": 20},
            {"date": "2024-01-02", "total": 10}
        ]),
        "transactions",
    );
    assert!((daily_growth(&tx, |t| t.date, |t| t.total) - 100.0).abs() < 1e-9);
}
