use dashboard_metrics::kpi::{Kpi, Unit};
use dashboard_metrics::{storage, Bucket};
use std::fs;
use tempfile::tempdir;

fn buckets() -> Vec<Bucket> {
    vec![
        Bucket { key: "Cash".into(), value: 100.0, count: 1 },
        Bucket { key: "Card".into(), value: 50.0, count: 2 },
    ]
}

#[test]
fn save_csv_and_json() {
    let dir = tempdir().unwrap();

    let csv_path = dir.path().join("payments.csv");
    storage::save_buckets_csv(&buckets(), &csv_path).unwrap();
    let csv_txt = fs::read_to_string(&csv_path).unwrap();
    assert!(csv_txt.starts_with("name,value,count"));
    assert_eq!(csv_txt.lines().count(), 3);

    let json_path = dir.path().join("payments.json");
    storage::save_json(&buckets(), &json_path).unwrap();
    let v: serde_json::Value = serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(v.as_array().unwrap().len(), 2);
    assert_eq!(v[0]["name"], "Cash");
}

#[test]
fn kpi_csv_has_one_row_per_kpi() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("kpis.csv");
    let kpis = [
        Kpi::new("Total Sales", 150.0, Unit::Currency).with_change(-50.0),
        Kpi::count("Transactions", 2),
    ];
    storage::save_kpis_csv(&kpis, &path).unwrap();

    let mut rdr = csv::Reader::from_path(&path).unwrap();
    let headers = rdr.headers().unwrap().clone();
    assert_eq!(headers.iter().collect::<Vec<_>>(), vec!["label", "value", "unit", "change_percent"]);
    let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(&rows[0][0], "Total Sales");
    assert_eq!(&rows[0][2], "currency");
    assert_eq!(&rows[0][3], "-50.0");
    assert_eq!(&rows[1][3], "");
}

// Spreadsheets evaluate cells starting with = + - @ as formulas.
#[test]
fn csv_cells_are_prefixed_to_avoid_formulas() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("injection.csv");
    let rows = vec![
        Bucket { key: "=HYPERLINK(\"http://evil\")".into(), value: 1.0, count: 1 },
        Bucket { key: "+SUM(A1:A9)".into(), value: 1.0, count: 1 },
        Bucket { key: "@foo".into(), value: 1.0, count: 1 },
        Bucket { key: "Plain".into(), value: 1.0, count: 1 },
    ];
    storage::save_buckets_csv(&rows, &path).unwrap();

    let mut rdr = csv::Reader::from_path(&path).unwrap();
    let names: Vec<String> = rdr.records().map(|r| r.unwrap()[0].to_string()).collect();
    assert_eq!(
        names,
        vec!["'=HYPERLINK(\"http://evil\")", "'+SUM(A1:A9)", "'@foo", "Plain"]
    );
}

#[test]
fn combined_file_loads_every_resource() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("snapshot.json");
    fs::write(
        &path,
        r#"{
            "transactions": [{"id": "t1", "total": 5}],
            "vendors": {"data": [{"id": "v1"}, {"id": "v2"}]},
            "banks": "oops",
            "overview": {"totalRevenue": 12}
        }"#,
    )
    .unwrap();

    let snap = storage::load_snapshot(&path).unwrap();
    assert_eq!(snap.transactions.len(), 1);
    assert_eq!(snap.vendors.len(), 2);
    assert!(snap.banks.is_empty());
    assert_eq!(snap.overview.total_revenue, 12.0);
}

#[test]
fn unreadable_combined_file_is_an_error() {
    let dir = tempdir().unwrap();
    assert!(storage::load_snapshot_file(dir.path().join("missing.json")).is_err());

    let bad = dir.path().join("bad.json");
    fs::write(&bad, "{ not json").unwrap();
    let err = storage::load_snapshot_file(&bad).unwrap_err();
    assert!(err.to_string().contains("bad.json"));
}

#[test]
fn directory_resources_fail_independently() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("transactions.json"),
        r#"[{"id": "t1", "paymentMethod": "Cash", "total": 10}]"#,
    )
    .unwrap();
    fs::write(dir.path().join("vendors.json"), "[{\"id\": ").unwrap();
    fs::write(
        dir.path().join("finishedGoods.json"),
        r#"{"data": [{"id": "p1", "name": "Latte", "price": "4.50", "stock": "12"}]}"#,
    )
    .unwrap();

    let snap = storage::load_snapshot(dir.path()).unwrap();
    assert_eq!(snap.transactions.len(), 1);
    assert!(snap.vendors.is_empty());
    assert!(snap.banks.is_empty());
    assert_eq!(snap.finished_goods.len(), 1);
    assert_eq!(snap.finished_goods[0].price, 4.5);
    assert_eq!(snap.finished_goods[0].stock, 12);
}
