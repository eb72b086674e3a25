//! Filter engine: an inclusive date window plus categorical equality filters.

use crate::error::{Error, Result};
use crate::models::{
    Bank, DateRange, FinishedGood, PosTerminal, PurchaseOrder, RawMaterial, Transaction, Vendor,
};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::borrow::Cow;
use std::collections::BTreeMap;

/// A categorical filter value. `All` lets every record through.
///
/// Serializes as the string typed on the command line: `"all"` or the value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum Selection {
    All,
    Value(String),
}

impl From<&str> for Selection {
    fn from(s: &str) -> Self {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            Selection::All
        } else {
            Selection::Value(s.to_string())
        }
    }
}

impl std::fmt::Display for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Selection::All => f.write_str("all"),
            Selection::Value(v) => f.write_str(v),
        }
    }
}

impl From<Selection> for String {
    fn from(s: Selection) -> Self {
        s.to_string()
    }
}

/// Record types the filter engine can window and match.
pub trait Filterable {
    /// Categorical fields this record type exposes to [`Filterable::field`].
    const FIELDS: &'static [&'static str];
    /// Whether the date window applies to this record type at all.
    const DATED: bool;

    fn date(&self) -> Option<NaiveDateTime> {
        None
    }

    fn field(&self, name: &str) -> Option<Cow<'_, str>>;
}

/// Everything a user picked in the dashboard's filter bar.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Filters {
    pub range: Option<DateRange>,
    pub categories: BTreeMap<String, Selection>,
}

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_range(mut self, range: DateRange) -> Self {
        self.range = Some(range);
        self
    }

    pub fn with_category(mut self, name: impl Into<String>, selection: impl Into<Selection>) -> Self {
        self.categories.insert(name.into(), selection.into());
        self
    }

    /// Parse a `name=value` assignment as typed on the command line.
    pub fn parse_assignment(s: &str) -> Result<(String, Selection)> {
        let (name, value) = s
            .split_once('=')
            .ok_or_else(|| Error::InvalidFilter(s.to_string()))?;
        let name = name.trim();
        if name.is_empty() || value.trim().is_empty() {
            return Err(Error::InvalidFilter(s.to_string()));
        }
        Ok((name.to_string(), Selection::from(value)))
    }

    /// The subset of these filters that applies to `T`: categories naming a
    /// field `T` does not expose are dropped, and so is the date window when
    /// `T` carries no date.
    pub fn scoped_to<T: Filterable>(&self) -> Filters {
        Filters {
            range: if T::DATED { self.range } else { None },
            categories: self
                .categories
                .iter()
                .filter(|(name, _)| T::FIELDS.contains(&name.as_str()))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }

    pub fn matches<T: Filterable>(&self, record: &T) -> bool {
        if let Some(range) = &self.range {
            match record.date() {
                Some(ts) if range.contains(ts) => {}
                _ => return false,
            }
        }
        self.categories.iter().all(|(name, sel)| match sel {
            Selection::All => true,
            Selection::Value(want) => record.field(name).is_some_and(|got| got == want.as_str()),
        })
    }

    /// Records passing every filter, in input order.
    pub fn apply<T: Filterable + Clone>(&self, records: &[T]) -> Vec<T> {
        if self.range.is_some_and(|r| r.is_empty()) {
            return Vec::new();
        }
        records.iter().filter(|r| self.matches(*r)).cloned().collect()
    }
}

fn flag(b: bool) -> Cow<'static, str> {
    Cow::Borrowed(if b { "true" } else { "false" })
}

impl Filterable for Transaction {
    const FIELDS: &'static [&'static str] = &["paymentMethod"];
    const DATED: bool = true;

    fn date(&self) -> Option<NaiveDateTime> {
        self.date
    }

    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "paymentMethod" => Some(Cow::Borrowed(&self.payment_method)),
            _ => None,
        }
    }
}

impl Filterable for PurchaseOrder {
    const FIELDS: &'static [&'static str] = &["status", "paymentStatus", "vendorId", "vendorName"];
    const DATED: bool = true;

    fn date(&self) -> Option<NaiveDateTime> {
        self.created_at
    }

    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "status" => Some(Cow::Borrowed(&self.status)),
            "paymentStatus" => Some(Cow::Borrowed(&self.payment_status)),
            "vendorId" => Some(Cow::Borrowed(&self.vendor_id)),
            "vendorName" => Some(Cow::Borrowed(&self.vendor_name)),
            _ => None,
        }
    }
}

impl Filterable for Vendor {
    const FIELDS: &'static [&'static str] = &["city", "isActive"];
    const DATED: bool = false;

    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "city" => Some(Cow::Borrowed(&self.city)),
            "isActive" => Some(flag(self.is_active)),
            _ => None,
        }
    }
}

impl Filterable for Bank {
    const FIELDS: &'static [&'static str] = &["isActive"];
    const DATED: bool = true;

    fn date(&self) -> Option<NaiveDateTime> {
        self.created_at
    }

    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "isActive" => Some(flag(self.is_active)),
            _ => None,
        }
    }
}

/// Terminals describe current state, so the date window does not apply;
/// `lastActive` is a heartbeat, not an event date.
impl Filterable for PosTerminal {
    const FIELDS: &'static [&'static str] = &["status", "authorityType", "location"];
    const DATED: bool = false;

    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "status" => Some(Cow::Borrowed(self.status.as_str())),
            "authorityType" => Some(Cow::Borrowed(&self.authority_type)),
            "location" => Some(Cow::Borrowed(&self.location)),
            _ => None,
        }
    }
}

impl Filterable for FinishedGood {
    const FIELDS: &'static [&'static str] = &["category"];
    const DATED: bool = false;

    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "category" => Some(Cow::Borrowed(&self.category)),
            _ => None,
        }
    }
}

impl Filterable for RawMaterial {
    const FIELDS: &'static [&'static str] = &["unit"];
    const DATED: bool = false;

    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "unit" => Some(Cow::Borrowed(&self.unit)),
            _ => None,
        }
    }
}
