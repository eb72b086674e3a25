//! Raw operational records as the dashboard fetches them, plus the date range
//! used to window them.
//!
//! Every field is decoded through `normalize::lenient`, so a record never
//! fails to decode because of a wrong type or a missing key: numbers fall back
//! to 0, labels to `"Unknown"`, timestamps to `None`, sequences to empty.

use crate::error::{Error, Result};
use crate::normalize::Record;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Inclusive calendar-day window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Parse optional `YYYY-MM-DD` bounds; an omitted side is unbounded.
    /// Returns `None` when both sides are omitted.
    pub fn parse(start: Option<&str>, end: Option<&str>) -> Result<Option<Self>> {
        fn day(s: &str) -> Result<NaiveDate> {
            NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
                .map_err(|_| Error::InvalidDate(s.to_string()))
        }
        match (start, end) {
            (None, None) => Ok(None),
            (s, e) => Ok(Some(Self {
                start: s.map(day).transpose()?.unwrap_or(NaiveDate::MIN),
                end: e.map(day).transpose()?.unwrap_or(NaiveDate::MAX),
            })),
        }
    }

    /// An inverted window (start after end) matches nothing; bounds are never swapped.
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    pub fn contains(&self, ts: NaiveDateTime) -> bool {
        let d = ts.date();
        d >= self.start && d <= self.end
    }
}

/// A point-of-sale transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(default, deserialize_with = "crate::normalize::lenient::string")]
    pub id: String,
    #[serde(default, deserialize_with = "crate::normalize::lenient::timestamp")]
    pub date: Option<NaiveDateTime>,
    #[serde(default = "crate::normalize::lenient::unknown", deserialize_with = "crate::normalize::lenient::label")]
    pub payment_method: String,
    #[serde(default, deserialize_with = "crate::normalize::lenient::number")]
    pub total: f64,
    #[serde(default, deserialize_with = "crate::normalize::lenient::records")]
    pub items: Vec<LineItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    #[serde(default, deserialize_with = "crate::normalize::lenient::string")]
    pub item_id: String,
    #[serde(default, deserialize_with = "crate::normalize::lenient::string")]
    pub item_name: String,
    #[serde(default, deserialize_with = "crate::normalize::lenient::number")]
    pub item_quantity: f64,
}

impl LineItem {
    /// Display key for item rankings: name, then id, then `"Unknown"`.
    pub fn label(&self) -> &str {
        if !self.item_name.trim().is_empty() {
            &self.item_name
        } else if !self.item_id.trim().is_empty() {
            &self.item_id
        } else {
            crate::normalize::lenient::UNKNOWN
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrder {
    #[serde(default, deserialize_with = "crate::normalize::lenient::string")]
    pub id: String,
    #[serde(default, deserialize_with = "crate::normalize::lenient::string")]
    pub vendor_id: String,
    #[serde(default = "crate::normalize::lenient::unknown", deserialize_with = "crate::normalize::lenient::label")]
    pub vendor_name: String,
    #[serde(default = "crate::normalize::lenient::unknown", deserialize_with = "crate::normalize::lenient::label")]
    pub status: String,
    #[serde(default = "crate::normalize::lenient::unknown", deserialize_with = "crate::normalize::lenient::label")]
    pub payment_status: String,
    #[serde(default, deserialize_with = "crate::normalize::lenient::number")]
    pub total_amount: f64,
    #[serde(default, deserialize_with = "crate::normalize::lenient::timestamp")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "crate::normalize::lenient::timestamp")]
    pub requested_date: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "crate::normalize::lenient::string")]
    pub payment_terms: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    #[serde(default, deserialize_with = "crate::normalize::lenient::string")]
    pub id: String,
    #[serde(default, deserialize_with = "crate::normalize::lenient::string")]
    pub name: String,
    #[serde(default = "crate::normalize::lenient::unknown", deserialize_with = "crate::normalize::lenient::label")]
    pub city: String,
    #[serde(default, deserialize_with = "crate::normalize::lenient::number")]
    pub rating: f64,
    #[serde(default, deserialize_with = "crate::normalize::lenient::flag")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "crate::normalize::lenient::seq")]
    pub product_list: Vec<Value>,
}

impl Vendor {
    pub fn product_count(&self) -> usize {
        self.product_list.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bank {
    #[serde(default, deserialize_with = "crate::normalize::lenient::string")]
    pub id: String,
    #[serde(default, deserialize_with = "crate::normalize::lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "crate::normalize::lenient::string")]
    pub code: String,
    #[serde(default, deserialize_with = "crate::normalize::lenient::flag")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "crate::normalize::lenient::timestamp")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "crate::normalize::lenient::string")]
    pub address: String,
}

/// Connectivity reported by a terminal. Anything other than online/offline
/// is kept as `Unknown` rather than guessed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerminalStatus {
    Online,
    Offline,
    #[default]
    Unknown,
}

impl TerminalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TerminalStatus::Online => "Online",
            TerminalStatus::Offline => "Offline",
            TerminalStatus::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for TerminalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidPeriod {
    #[serde(default, deserialize_with = "crate::normalize::lenient::timestamp")]
    pub start: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "crate::normalize::lenient::timestamp")]
    pub end: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PosTerminal {
    #[serde(default, deserialize_with = "crate::normalize::lenient::string")]
    pub id: String,
    #[serde(default = "crate::normalize::lenient::unknown", deserialize_with = "crate::normalize::lenient::label")]
    pub authority_type: String,
    #[serde(default, deserialize_with = "crate::normalize::lenient::terminal_status")]
    pub status: TerminalStatus,
    #[serde(default = "crate::normalize::lenient::unknown", deserialize_with = "crate::normalize::lenient::label")]
    pub location: String,
    #[serde(default, deserialize_with = "crate::normalize::lenient::timestamp")]
    pub last_active: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "crate::normalize::lenient::record")]
    pub valid_period: ValidPeriod,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    #[serde(default, deserialize_with = "crate::normalize::lenient::string")]
    pub raw_id: String,
    #[serde(default, deserialize_with = "crate::normalize::lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "crate::normalize::lenient::number")]
    pub quantity_consumed: f64,
    #[serde(default, deserialize_with = "crate::normalize::lenient::string")]
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinishedGood {
    #[serde(default, deserialize_with = "crate::normalize::lenient::string")]
    pub id: String,
    #[serde(default, deserialize_with = "crate::normalize::lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "crate::normalize::lenient::number")]
    pub price: f64,
    #[serde(default, deserialize_with = "crate::normalize::lenient::integer")]
    pub stock: i64,
    #[serde(default = "crate::normalize::lenient::unknown", deserialize_with = "crate::normalize::lenient::label")]
    pub category: String,
    #[serde(default, deserialize_with = "crate::normalize::lenient::records")]
    pub raw_ingredients: Vec<Ingredient>,
}

impl FinishedGood {
    /// Stock counted toward value totals; negative counts contribute nothing.
    pub fn units_on_hand(&self) -> i64 {
        self.stock.max(0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMaterial {
    #[serde(default, deserialize_with = "crate::normalize::lenient::string")]
    pub id: String,
    #[serde(default, deserialize_with = "crate::normalize::lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "crate::normalize::lenient::number")]
    pub available_quantity: f64,
    #[serde(default, deserialize_with = "crate::normalize::lenient::number")]
    pub unit_cost: f64,
    #[serde(default, deserialize_with = "crate::normalize::lenient::number")]
    pub minimum_stock: f64,
    #[serde(default, deserialize_with = "crate::normalize::lenient::string")]
    pub unit: String,
}

/// Pre-aggregated summary some backends return alongside the raw collections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsOverview {
    #[serde(default, deserialize_with = "crate::normalize::lenient::number")]
    pub total_revenue: f64,
    #[serde(default, deserialize_with = "crate::normalize::lenient::number")]
    pub total_orders: f64,
    #[serde(default, deserialize_with = "crate::normalize::lenient::records")]
    pub monthly_data: Vec<MonthlyPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPoint {
    #[serde(default, deserialize_with = "crate::normalize::lenient::string")]
    pub month: String,
    #[serde(default, deserialize_with = "crate::normalize::lenient::number")]
    pub revenue: f64,
    #[serde(default, deserialize_with = "crate::normalize::lenient::number")]
    pub orders: f64,
}

/// One in-memory copy of every collection a refresh produced. All derived
/// views are computed from a single snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub transactions: Vec<Transaction>,
    pub purchase_orders: Vec<PurchaseOrder>,
    pub vendors: Vec<Vendor>,
    pub banks: Vec<Bank>,
    pub pos_terminals: Vec<PosTerminal>,
    pub finished_goods: Vec<FinishedGood>,
    pub raw_materials: Vec<RawMaterial>,
    pub overview: StatsOverview,
}

impl Record for Transaction {
    const ALIASES: &'static [(&'static str, &'static [&'static str])] = &[
        ("id", &["_id"]),
        ("paymentMethod", &["payment_method", "paymentType"]),
        ("total", &["amount"]),
        ("items", &["lineItems"]),
    ];
}

impl Record for LineItem {
    const ALIASES: &'static [(&'static str, &'static [&'static str])] = &[
        ("itemId", &["item_id"]),
        ("itemName", &["item_name"]),
        ("itemQuantity", &["item_quantity", "quantity", "qty"]),
    ];
}

impl Record for PurchaseOrder {
    const ALIASES: &'static [(&'static str, &'static [&'static str])] = &[
        ("id", &["_id"]),
        ("vendorId", &["vendor_id"]),
        ("vendorName", &["vendor_name"]),
        ("paymentStatus", &["payment_status"]),
        ("totalAmount", &["total_amount"]),
        ("createdAt", &["created_at"]),
        ("requestedDate", &["requested_date"]),
        ("paymentTerms", &["payment_terms"]),
    ];
}

impl Record for Vendor {
    const ALIASES: &'static [(&'static str, &'static [&'static str])] = &[
        ("id", &["_id"]),
        ("isActive", &["is_active"]),
        ("productList", &["product_list"]),
    ];
}

impl Record for Bank {
    const ALIASES: &'static [(&'static str, &'static [&'static str])] = &[
        ("id", &["_id"]),
        ("isActive", &["is_active"]),
        ("createdAt", &["created_at"]),
    ];
}

impl Record for ValidPeriod {
    const ALIASES: &'static [(&'static str, &'static [&'static str])] =
        &[("start", &["from"]), ("end", &["to"])];
}

impl Record for PosTerminal {
    const ALIASES: &'static [(&'static str, &'static [&'static str])] = &[
        ("id", &["_id"]),
        ("authorityType", &["authority_type"]),
        ("lastActive", &["last_active"]),
        ("validPeriod", &["valid_period"]),
    ];
}

impl Record for Ingredient {
    const ALIASES: &'static [(&'static str, &'static [&'static str])] = &[
        ("rawId", &["raw_id"]),
        ("quantityConsumed", &["quantity_consumed", "quantity"]),
    ];
}

impl Record for FinishedGood {
    const ALIASES: &'static [(&'static str, &'static [&'static str])] = &[
        ("id", &["_id"]),
        ("rawIngredients", &["raw_ingredients"]),
    ];
}

impl Record for RawMaterial {
    const ALIASES: &'static [(&'static str, &'static [&'static str])] = &[
        ("id", &["_id"]),
        ("availableQuantity", &["available_quantity"]),
        ("unitCost", &["unit_cost"]),
        ("minimumStock", &["minimum_stock"]),
    ];
}

impl Record for StatsOverview {
    const ALIASES: &'static [(&'static str, &'static [&'static str])] = &[
        ("totalRevenue", &["total_revenue"]),
        ("totalOrders", &["total_orders"]),
        ("monthlyData", &["monthly_data"]),
    ];
}

impl Record for MonthlyPoint {}
