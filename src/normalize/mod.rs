//! Normalizer: turns whatever a fetch returned into well-formed collections.
//!
//! Accepted shapes for a collection are a bare JSON array or an envelope
//! object carrying the array under `data`. Anything else (null, a scalar, an
//! object without an array) yields an empty collection. Elements that are
//! not JSON objects are skipped. Nothing here returns an error.
//!
//! Fields that arrive under more than one spelling are merged into their
//! canonical key before decoding, so `x.a || x.b` style fallbacks are
//! resolved once per record.

pub mod lenient;

use crate::models::{
    Bank, FinishedGood, PosTerminal, PurchaseOrder, RawMaterial, Snapshot, StatsOverview,
    Transaction, Vendor,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Resource names as they appear in a combined snapshot document and as
/// file stems in a snapshot directory.
pub const RESOURCES: [&str; 8] = [
    "transactions",
    "purchaseOrders",
    "vendors",
    "banks",
    "posTerminals",
    "finishedGoods",
    "rawMaterials",
    "overview",
];

/// A record type decoded from fetched JSON.
pub trait Record: DeserializeOwned {
    /// `(canonical, alternates)` pairs. The first alternate spelling holding
    /// a set value wins over an empty canonical one.
    const ALIASES: &'static [(&'static str, &'static [&'static str])] = &[];
}

/// JSON truthiness: null, false, 0 and blank strings are unset.
fn is_set(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|x| x != 0.0),
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Collapse every alternate spelling into the canonical key. Keeps the
/// first set value in alias order, or the first present one when none is set.
fn resolve_aliases(map: &mut Map<String, Value>, aliases: &[(&str, &[&str])]) {
    for &(canonical, alternates) in aliases {
        let mut chosen: Option<Value> = None;
        for key in std::iter::once(canonical).chain(alternates.iter().copied()) {
            let Some(v) = map.remove(key) else { continue };
            match &chosen {
                None => chosen = Some(v),
                Some(prev) if !is_set(prev) && is_set(&v) => chosen = Some(v),
                Some(_) => {}
            }
        }
        if let Some(v) = chosen {
            map.insert(canonical.to_string(), v);
        }
    }
}

/// Decode one JSON object as `T`. `None` for non-objects.
pub fn decode<T: Record>(item: &Value) -> Option<T> {
    let Value::Object(map) = item else {
        return None;
    };
    if T::ALIASES.is_empty() {
        return T::deserialize(item).ok();
    }
    let mut map = map.clone();
    resolve_aliases(&mut map, T::ALIASES);
    T::deserialize(Value::Object(map)).ok()
}

fn unwrap_envelope(raw: &Value) -> Option<&Vec<Value>> {
    match raw {
        Value::Array(items) => Some(items),
        Value::Object(map) => map.get("data").and_then(Value::as_array),
        _ => None,
    }
}

/// Decode one collection, substituting an empty one for any malformed shape.
pub fn collection<T: Record>(raw: &Value, resource: &str) -> Vec<T> {
    let Some(items) = unwrap_envelope(raw) else {
        if !raw.is_null() {
            log::warn!("{resource}: expected an array, got {}; using empty collection", kind(raw));
        }
        return Vec::new();
    };

    let mut skipped = 0usize;
    let out: Vec<T> = items
        .iter()
        .filter_map(|item| {
            let decoded = decode::<T>(item);
            if decoded.is_none() {
                skipped += 1;
            }
            decoded
        })
        .collect();

    if skipped > 0 {
        log::warn!("{resource}: skipped {skipped} malformed record(s)");
    }
    log::debug!("{resource}: normalized {} record(s)", out.len());
    out
}

/// Decode the pre-aggregated overview. Accepts the object directly or under
/// `data`; any other shape yields the zeroed default.
pub fn overview(raw: &Value) -> StatsOverview {
    let obj = match raw {
        Value::Object(map) => match map.get("data") {
            Some(inner @ Value::Object(_)) => inner,
            _ => raw,
        },
        Value::Null => return StatsOverview::default(),
        other => {
            log::warn!("overview: expected an object, got {}; using zeroed default", kind(other));
            return StatsOverview::default();
        }
    };
    decode::<StatsOverview>(obj).unwrap_or_default()
}

fn kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Look up a resource in a combined document, accepting its snake_case spelling too.
fn field<'a>(doc: &'a Value, camel: &str) -> &'a Value {
    static NULL: Value = Value::Null;
    doc.get(camel)
        .or_else(|| doc.get(to_snake(camel).as_str()))
        .unwrap_or(&NULL)
}

fn to_snake(camel: &str) -> String {
    let mut out = String::with_capacity(camel.len() + 4);
    for c in camel.chars() {
        if c.is_ascii_uppercase() {
            out.push('_');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

impl Snapshot {
    /// Normalize a combined document keyed by resource name. Missing or
    /// malformed resources come back empty; the others are unaffected.
    pub fn from_value(doc: &Value) -> Self {
        let doc = match doc {
            Value::Object(_) => doc,
            other => {
                log::warn!("snapshot: expected an object, got {}; every resource is empty", kind(other));
                return Snapshot::default();
            }
        };
        Snapshot {
            transactions: collection::<Transaction>(field(doc, "transactions"), "transactions"),
            purchase_orders: collection::<PurchaseOrder>(field(doc, "purchaseOrders"), "purchaseOrders"),
            vendors: collection::<Vendor>(field(doc, "vendors"), "vendors"),
            banks: collection::<Bank>(field(doc, "banks"), "banks"),
            pos_terminals: collection::<PosTerminal>(field(doc, "posTerminals"), "posTerminals"),
            finished_goods: collection::<FinishedGood>(field(doc, "finishedGoods"), "finishedGoods"),
            raw_materials: collection::<RawMaterial>(field(doc, "rawMaterials"), "rawMaterials"),
            overview: overview(field(doc, "overview")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn snake_case_resource_names() {
        assert_eq!(to_snake("purchaseOrders"), "purchase_orders");
        assert_eq!(to_snake("banks"), "banks");
    }

    #[test]
    fn set_alternate_beats_empty_canonical() {
        let mut map = json!({"total": 0, "amount": "12", "legacy": 3})
            .as_object()
            .cloned()
            .unwrap();
        resolve_aliases(&mut map, &[("total", &["amount", "legacy"])]);
        assert_eq!(Value::Object(map), json!({"total": "12"}));
    }

    #[test]
    fn unset_everywhere_keeps_first_present() {
        let mut map = json!({"amount": 0, "total": null}).as_object().cloned().unwrap();
        resolve_aliases(&mut map, &[("total", &["amount"])]);
        assert_eq!(Value::Object(map), json!({"total": null}));
    }

    #[test]
    fn envelope_without_array_is_empty() {
        let v: Vec<Transaction> = collection(&json!({"data": {"rows": []}}), "transactions");
        assert!(v.is_empty());
    }
}
