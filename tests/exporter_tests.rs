// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use budgetflow::models::{Ledger, Purchase, PurchaseUnit, Transaction};
use budgetflow::{cli, commands::exporter, db, store};
use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal_macros::dec;
use serde_json::json;
use tempfile::tempdir;

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn base_conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    store::insert_entry(
        &conn,
        Ledger::Expense,
        &Transaction::new(day("2025-01-02"), dec!(12.34), "Groceries", "Weekly run"),
    )
    .unwrap();
    store::insert_entry(
        &conn,
        Ledger::Revenue,
        &Transaction::new(day("2025-01-05"), dec!(80), "Catering", "Office lunch"),
    )
    .unwrap();
    store::insert_entry(
        &conn,
        Ledger::Expense,
        &Transaction::new(day("2025-02-01"), dec!(999), "Rent", "February"),
    )
    .unwrap();
    store::insert_purchase(
        &conn,
        &Purchase {
            id: "p1".into(),
            date: day("2025-01-03"),
            item_name: "Eggs".into(),
            category: None,
            quantity: dec!(2),
            unit: PurchaseUnit::Dozen,
            unit_cost: dec!(9.5),
            total_cost: dec!(19.0),
            supplier: None,
            note: None,
        },
    )
    .unwrap();
    conn
}

fn export(conn: &Connection, month: &str, format: &str, out: &str) -> anyhow::Result<()> {
    let matches = cli::build_cli().get_matches_from([
        "budgetflow", "export", "--month", month, "--format", format, "--out", out,
    ]);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(conn, export_m)
    } else {
        panic!("no export subcommand");
    }
}

#[test]
fn export_month_as_pretty_json() {
    let conn = base_conn();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.json");
    let out_str = out_path.to_string_lossy().to_string();

    export(&conn, "2025-01", "json", &out_str).unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(
        parsed,
        json!([
            {
                "type": "Revenue",
                "date": "2025-01-05",
                "description": "Office lunch",
                "category": "Catering",
                "amount": "80"
            },
            {
                "type": "Purchase",
                "date": "2025-01-03",
                "description": "Eggs",
                "category": "Other",
                "amount": "-19.0"
            },
            {
                "type": "Expense",
                "date": "2025-01-02",
                "description": "Weekly run",
                "category": "Groceries",
                "amount": "-12.34"
            }
        ])
    );
}

#[test]
fn export_month_as_csv() {
    let conn = base_conn();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.csv");
    let out_str = out_path.to_string_lossy().to_string();

    export(&conn, "2025-02", "CSV", &out_str).unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines[0], "type,date,description,category,amount");
    assert_eq!(lines[1], "Expense,2025-02-01,February,Rent,-999");
    assert_eq!(lines.len(), 2);
}

#[test]
fn export_rejects_unknown_format() {
    let conn = base_conn();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.unknown");
    let out_str = out_path.to_string_lossy().to_string();

    assert!(export(&conn, "2025-01", "xml", &out_str).is_err());
    assert!(!out_path.exists());
}

#[test]
fn empty_month_csv_still_has_a_header() {
    let conn = base_conn();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("empty.csv");
    let out_str = out_path.to_string_lossy().to_string();

    export(&conn, "2025-06", "csv", &out_str).unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    assert_eq!(contents, "type,date,description,category,amount\n");
}

#[test]
fn personal_spending_is_not_exported() {
    let conn = base_conn();
    store::insert_entry(
        &conn,
        Ledger::Spending,
        &Transaction::new(day("2025-02-10"), dec!(15), "Cinema", "Friday"),
    )
    .unwrap();

    let rows = exporter::month_rows(&conn, day("2025-02-01")).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].kind, "Expense");
    assert_eq!(rows[0].category, "Rent");
}
