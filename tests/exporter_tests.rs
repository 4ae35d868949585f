// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rideledger::config::Config;
use rideledger::models::RecordKind;
use rideledger::{cli, commands::exporter, commands::records, db};
use rusqlite::Connection;
use tempfile::tempdir;

fn seeded() -> Connection {
    let mut conn = db::open_in_memory().unwrap();
    let cfg = Config::with_db_path(":memory:");
    records::add_record(
        &mut conn,
        &cfg,
        RecordKind::Income,
        "Uber",
        "100",
        Some("2025-01-02 09:00:00"),
        Some("airport"),
    )
    .unwrap();
    records::add_record(
        &mut conn,
        &cfg,
        RecordKind::Expense,
        "Fuel",
        "30",
        Some("2025-01-03 07:00:00"),
        None,
    )
    .unwrap();
    conn
}

fn export(conn: &Connection, args: &[&str]) -> anyhow::Result<()> {
    let matches = cli::build_cli().get_matches_from(args);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(conn, export_m)
    } else {
        panic!("no export subcommand");
    }
}

#[test]
fn export_json_lists_oldest_first_with_gross() {
    let conn = seeded();
    let dir = tempdir().unwrap();
    let out = dir.path().join("records.json");
    let out_str = out.to_string_lossy().to_string();

    export(
        &conn,
        &["rideledger", "export", "records", "--format", "json", "--out", &out_str],
    )
    .unwrap();

    let parsed: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    let arr = parsed.as_array().unwrap();
    assert_eq!(arr.len(), 2);
    assert_eq!(arr[0]["display_id"], "GA-001");
    assert_eq!(arr[0]["net"], "73.45");
    assert_eq!(arr[0]["gross"], "100.00");
    assert_eq!(arr[1]["display_id"], "GO-001");
    assert_eq!(arr[1]["gross"], "30.00");
}

#[test]
fn export_csv_respects_range() {
    let conn = seeded();
    let dir = tempdir().unwrap();
    let out = dir.path().join("records.csv");
    let out_str = out.to_string_lossy().to_string();

    export(
        &conn,
        &[
            "rideledger", "export", "records", "--format", "CSV", "--out", &out_str,
            "--from", "2025-01-03",
        ],
    )
    .unwrap();

    let mut rdr = csv::Reader::from_path(&out).unwrap();
    let headers = rdr.headers().unwrap().clone();
    assert_eq!(&headers[1], "display_id");
    let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 1);
    assert_eq!(&rows[0][1], "GO-001");
}

#[test]
fn export_rejects_unknown_format() {
    let conn = seeded();
    let dir = tempdir().unwrap();
    let out = dir.path().join("records.xml");
    let out_str = out.to_string_lossy().to_string();

    let err = export(
        &conn,
        &["rideledger", "export", "records", "--format", "xml", "--out", &out_str],
    )
    .unwrap_err();
    assert!(err.to_string().contains("Unknown format"));
    assert!(!out.exists());
}
