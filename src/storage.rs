use crate::aggregate::Bucket;
use crate::error::{Error, Result};
use crate::kpi::Kpi;
use crate::models::Snapshot;
use crate::normalize::RESOURCES;
use csv::WriterBuilder;
use serde::Serialize;
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::thread;

/// Load a snapshot from a combined JSON document, or from a directory of
/// per-resource files.
pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<Snapshot> {
    let path = path.as_ref();
    if path.is_dir() {
        Ok(load_snapshot_dir(path))
    } else {
        load_snapshot_file(path)
    }
}

/// Read one JSON document keyed by resource name.
pub fn load_snapshot_file<P: AsRef<Path>>(path: P) -> Result<Snapshot> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let doc: Value = serde_json::from_str(&text).map_err(|e| Error::json(path, e))?;
    let snapshot = Snapshot::from_value(&doc);
    log_loaded(&snapshot, path);
    Ok(snapshot)
}

/// Read `<resource>.json` files from `dir`, one reader thread per resource.
///
/// Each resource fails on its own: a missing or unparseable file becomes
/// that resource's empty default and the others still load.
pub fn load_snapshot_dir<P: AsRef<Path>>(dir: P) -> Snapshot {
    let dir = dir.as_ref();
    let doc: Map<String, Value> = thread::scope(|s| {
        let handles: Vec<_> = RESOURCES
            .iter()
            .map(|&name| (name, s.spawn(move || read_resource(dir, name))))
            .collect();
        handles
            .into_iter()
            .map(|(name, h)| {
                let value = h.join().unwrap_or_else(|_| {
                    log::warn!("{name}: reader thread panicked; using empty default");
                    Value::Null
                });
                (name.to_string(), value)
            })
            .collect()
    });
    let snapshot = Snapshot::from_value(&Value::Object(doc));
    log_loaded(&snapshot, dir);
    snapshot
}

fn read_resource(dir: &Path, name: &str) -> Value {
    let path = dir.join(format!("{name}.json"));
    let text = match std::fs::read_to_string(&path) {
        Ok(t) => t,
        Err(e) => {
            log::warn!("{name}: cannot read {}: {e}; using empty default", path.display());
            return Value::Null;
        }
    };
    serde_json::from_str(&text).unwrap_or_else(|e| {
        log::warn!("{name}: invalid JSON in {}: {e}; using empty default", path.display());
        Value::Null
    })
}

fn log_loaded(s: &Snapshot, from: &Path) {
    log::info!(
        "loaded snapshot from {}: {} transactions, {} purchase orders, {} vendors, {} banks, {} terminals, {} finished goods, {} raw materials",
        from.display(),
        s.transactions.len(),
        s.purchase_orders.len(),
        s.vendors.len(),
        s.banks.len(),
        s.pos_terminals.len(),
        s.finished_goods.len(),
        s.raw_materials.len(),
    );
}

/// Save any derived record as pretty JSON.
pub fn save_json<T: Serialize + ?Sized, P: AsRef<Path>>(value: &T, path: P) -> Result<()> {
    let path = path.as_ref();
    let s = serde_json::to_string_pretty(value).map_err(|e| Error::json(path, e))?;
    let mut f = File::create(path).map_err(|e| Error::io(path, e))?;
    f.write_all(s.as_bytes()).map_err(|e| Error::io(path, e))?;
    Ok(())
}

/// Prefix cells a spreadsheet would evaluate as a formula.
fn sanitize_cell(s: &str) -> Cow<'_, str> {
    if s.starts_with(['=', '+', '-', '@']) {
        Cow::Owned(format!("'{s}"))
    } else {
        Cow::Borrowed(s)
    }
}

/// Save buckets as `name,value,count` with a header.
pub fn save_buckets_csv<P: AsRef<Path>>(buckets: &[Bucket], path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.serialize(("name", "value", "count"))?;
    for b in buckets {
        wtr.serialize((sanitize_cell(&b.key), b.value, b.count))?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Save KPIs as `label,value,unit,change_percent` with a header.
pub fn save_kpis_csv<'a, I, P>(kpis: I, path: P) -> Result<()>
where
    I: IntoIterator<Item = &'a Kpi>,
    P: AsRef<Path>,
{
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.serialize(("label", "value", "unit", "change_percent"))?;
    for k in kpis {
        wtr.serialize((sanitize_cell(&k.label), k.value, k.unit.as_str(), k.change_percent))?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formula_starters_are_prefixed() {
        assert_eq!(sanitize_cell("=SUM(A1)"), "'=SUM(A1)");
        assert_eq!(sanitize_cell("-5"), "'-5");
        assert_eq!(sanitize_cell("Cash"), "Cash");
    }
}
