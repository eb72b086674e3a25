use dashboard_metrics::classify::{
    classify, price_band, price_bands, stock_status, StockStatus,
};
use dashboard_metrics::config::ClassifierConfig;
use dashboard_metrics::rank::top_n;

#[test]
fn top_n_is_bounded_and_non_increasing() {
    let data: Vec<f64> = vec![3.0, 9.0, 1.0, 7.0, 5.0, 8.0, 2.0];
    for n in [0, 1, 5, 7, 20] {
        let got = top_n(&data, |x| *x, n);
        assert_eq!(got.len(), n.min(data.len()));
        assert!(got.windows(2).all(|w| w[0].metric >= w[1].metric));
        for (i, e) in got.iter().enumerate() {
            assert_eq!(e.rank, i + 1);
        }
    }
    let top: Vec<f64> = top_n(&data, |x| *x, 3).into_iter().map(|e| e.record).collect();
    assert_eq!(top, vec![9.0, 8.0, 7.0]);
}

#[test]
fn ties_keep_input_order() {
    let data = vec![("a", 5.0), ("b", 7.0), ("c", 5.0), ("d", 7.0), ("e", 5.0)];
    let got: Vec<&str> = top_n(&data, |r| r.1, 4).iter().map(|e| e.record.0).collect();
    assert_eq!(got, vec!["b", "d", "a", "c"]);
}

#[test]
fn fewer_records_than_n_returns_all_sorted() {
    let got = top_n(&[1.0, 3.0], |x| *x, 5);
    assert_eq!(got.len(), 2);
    assert_eq!(got[0].record, 3.0);
}

#[test]
fn stock_boundaries() {
    let cfg = ClassifierConfig::default();
    assert_eq!(stock_status(-3, &cfg), StockStatus::OutOfStock);
    assert_eq!(stock_status(0, &cfg), StockStatus::OutOfStock);
    assert_eq!(stock_status(1, &cfg), StockStatus::LowStock);
    assert_eq!(stock_status(10, &cfg), StockStatus::LowStock);
    assert_eq!(stock_status(11, &cfg), StockStatus::InStock);
    assert_eq!(StockStatus::LowStock.to_string(), "Low Stock");
}

#[test]
fn custom_threshold_is_honored() {
    let cfg = ClassifierConfig {
        low_stock_threshold: 25,
        ..ClassifierConfig::default()
    };
    assert_eq!(stock_status(20, &cfg), StockStatus::LowStock);
    assert_eq!(stock_status(26, &cfg), StockStatus::InStock);
}

#[test]
fn price_band_edges() {
    let bands = price_bands(&ClassifierConfig::default());
    assert_eq!(bands.len(), 5);
    assert_eq!(price_band(0.0, &bands), "$0-$10");
    assert_eq!(price_band(10.0, &bands), "$0-$10");
    assert_eq!(price_band(10.01, &bands), "$10-$50");
    assert_eq!(price_band(50.0, &bands), "$10-$50");
    assert_eq!(price_band(100.0, &bands), "$50-$100");
    assert_eq!(price_band(500.0, &bands), "$100-$500");
    assert_eq!(price_band(500.5, &bands), "$500+");
    assert_eq!(price_band(-1.0, &bands), "$0-$10");
}

#[test]
fn every_price_falls_in_exactly_one_band() {
    let bands = price_bands(&ClassifierConfig::default());
    for p in [0.0, 9.99, 10.0, 49.5, 50.0, 99.0, 100.0, 250.0, 500.0, 1e6] {
        let hits = bands
            .iter()
            .filter(|b| {
                let above = if b.lower == 0.0 { p >= 0.0 } else { p > b.lower };
                above && b.upper.is_none_or(|u| p <= u)
            })
            .count();
        assert_eq!(hits, 1, "price {p}");
    }
}

#[test]
fn classify_tags_each_record() {
    let cfg = ClassifierConfig::default();
    let stock = [0_i64, 10, 11];
    let tagged = classify(&stock, |s| stock_status(*s, &cfg));
    let states: Vec<StockStatus> = tagged.iter().map(|c| c.status).collect();
    assert_eq!(
        states,
        vec![StockStatus::OutOfStock, StockStatus::LowStock, StockStatus::InStock]
    );
    assert_eq!(tagged[1].record, 10);
}
