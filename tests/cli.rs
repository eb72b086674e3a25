use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

const SNAPSHOT: &str = r#"{
    "transactions": [
        {"id": "t1", "date": "2024-01-01T10:00:00", "paymentMethod": "Cash", "total": 1000},
        {"id": "t2", "date": "2024-01-02T11:00:00", "paymentMethod": "Card", "total": 500}
    ],
    "finishedGoods": [{"id": "p1", "name": "Latte", "price": 5, "stock": 3, "category": "Drinks"}]
}"#;

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("dashmetrics").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("dashmetrics"));
}

#[test]
fn report_prints_section_kpis() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("snapshot.json");
    fs::write(&input, SNAPSHOT).unwrap();

    let mut cmd = Command::cargo_bin("dashmetrics").unwrap();
    cmd.arg("report")
        .arg("--input")
        .arg(&input)
        .args(["--section", "sales", "-f", "paymentMethod=all"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Total Sales"))
        .stdout(predicate::str::contains("1,500.00"))
        .stdout(predicate::str::contains("Products").not());
}

#[test]
fn report_writes_json_and_csv() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("snapshot.json");
    fs::write(&input, SNAPSHOT).unwrap();
    let out = dir.path().join("report.json");
    let csv_dir = dir.path().join("csv");

    let mut cmd = Command::cargo_bin("dashmetrics").unwrap();
    cmd.arg("report")
        .arg("--input")
        .arg(&input)
        .args(["--section", "inventory", "--from", "2024-01-01"])
        .arg("--out")
        .arg(&out)
        .arg("--csv-dir")
        .arg(&csv_dir);
    cmd.assert().success();

    let report: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(report["sales"]["totalSales"]["value"], 1500.0);
    assert!(csv_dir.join("inventory_kpis.csv").exists());
    assert!(csv_dir.join("inventory_stock_status.csv").exists());
    assert!(!csv_dir.join("sales_kpis.csv").exists());
}

#[test]
fn overview_section_is_printed() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("snapshot.json");
    fs::write(
        &input,
        r#"{"overview": {"totalRevenue": 12500, "totalOrders": 50,
            "monthlyData": [{"month": "2024-01", "revenue": 5000}, {"month": "2024-02", "revenue": 7500}]}}"#,
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("dashmetrics").unwrap();
    cmd.arg("report").arg("--input").arg(&input).args(["--section", "overview"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Total Revenue"))
        .stdout(predicate::str::contains("12,500.00 (+50.0%)"))
        .stdout(predicate::str::contains("Total Sales").not());
}

#[test]
fn bad_date_is_rejected() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("snapshot.json");
    fs::write(&input, SNAPSHOT).unwrap();

    let mut cmd = Command::cargo_bin("dashmetrics").unwrap();
    cmd.arg("report")
        .arg("--input")
        .arg(&input)
        .args(["--from", "01/02/2024"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid date"));
}

#[test]
fn missing_snapshot_is_reported() {
    let dir = tempdir().unwrap();
    let mut cmd = Command::cargo_bin("dashmetrics").unwrap();
    cmd.arg("report").arg("--input").arg(dir.path().join("nope.json"));
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}
