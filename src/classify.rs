//! Fixed-threshold tagging: stock status, price bands, raw-material status.

use crate::config::ClassifierConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StockStatus {
    #[serde(rename = "Out of Stock")]
    OutOfStock,
    #[serde(rename = "Low Stock")]
    LowStock,
    #[serde(rename = "In Stock")]
    InStock,
}

impl StockStatus {
    pub const ALL: [StockStatus; 3] = [StockStatus::OutOfStock, StockStatus::LowStock, StockStatus::InStock];

    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::OutOfStock => "Out of Stock",
            StockStatus::LowStock => "Low Stock",
            StockStatus::InStock => "In Stock",
        }
    }
}

impl std::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `stock <= 0` is out, `0 < stock <= threshold` is low, above is in stock.
pub fn stock_status(stock: i64, cfg: &ClassifierConfig) -> StockStatus {
    if stock <= 0 {
        StockStatus::OutOfStock
    } else if stock <= cfg.low_stock_threshold {
        StockStatus::LowStock
    } else {
        StockStatus::InStock
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaterialStatus {
    #[serde(rename = "Out of Stock")]
    OutOfStock,
    Reorder,
    Sufficient,
}

impl MaterialStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaterialStatus::OutOfStock => "Out of Stock",
            MaterialStatus::Reorder => "Reorder",
            MaterialStatus::Sufficient => "Sufficient",
        }
    }
}

impl std::fmt::Display for MaterialStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw materials are judged against their own minimum stock level.
pub fn material_status(available: f64, minimum: f64) -> MaterialStatus {
    if available <= 0.0 {
        MaterialStatus::OutOfStock
    } else if available < minimum {
        MaterialStatus::Reorder
    } else {
        MaterialStatus::Sufficient
    }
}

/// One price band. The first band is closed on both ends, later bands are
/// open below and closed above, the last one is unbounded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceBand {
    pub label: String,
    pub lower: f64,
    pub upper: Option<f64>,
}

fn money(x: f64) -> String {
    if x.fract() == 0.0 {
        format!("${x:.0}")
    } else {
        format!("${x:.2}")
    }
}

pub fn price_bands(cfg: &ClassifierConfig) -> Vec<PriceBand> {
    let mut out = Vec::with_capacity(cfg.price_bands.len() + 1);
    let mut lower = 0.0;
    for &upper in &cfg.price_bands {
        out.push(PriceBand {
            label: format!("{}-{}", money(lower), money(upper)),
            lower,
            upper: Some(upper),
        });
        lower = upper;
    }
    out.push(PriceBand {
        label: format!("{}+", money(lower)),
        lower,
        upper: None,
    });
    out
}

/// Index of the band `price` falls in. Prices below zero count as the first band.
pub fn price_band_index(price: f64, bands: &[PriceBand]) -> usize {
    bands
        .iter()
        .position(|b| b.upper.is_none_or(|u| price <= u))
        .unwrap_or(bands.len().saturating_sub(1))
}

pub fn price_band(price: f64, bands: &[PriceBand]) -> &str {
    bands
        .get(price_band_index(price, bands))
        .map(|b| b.label.as_str())
        .unwrap_or(crate::normalize::lenient::UNKNOWN)
}

/// A record tagged with a qualitative state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification<T, S> {
    #[serde(flatten)]
    pub record: T,
    pub status: S,
}

pub fn classify<T, S, F>(records: &[T], tag: F) -> Vec<Classification<T, S>>
where
    T: Clone,
    F: Fn(&T) -> S,
{
    records
        .iter()
        .map(|r| Classification {
            record: r.clone(),
            status: tag(r),
        })
        .collect()
}
