// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use budgetflow::models::{DEFAULT_EXPENSE_CATEGORIES, Ledger};
use budgetflow::{cli, commands::entries, db, store};
use rusqlite::Connection;
use rust_decimal_macros::dec;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

fn run(conn: &Connection, args: &[&str]) -> anyhow::Result<()> {
    let matches = cli::build_cli().get_matches_from(args);
    match matches.subcommand() {
        Some(("spend", m)) => entries::handle(conn, Ledger::Spending, m),
        Some(("expense", m)) => entries::handle(conn, Ledger::Expense, m),
        Some(("revenue", m)) => entries::handle(conn, Ledger::Revenue, m),
        _ => panic!("no ledger subcommand"),
    }
}

fn add_expense(conn: &Connection, date: &str, amount: &str, category: &str) {
    run(
        conn,
        &[
            "budgetflow", "expense", "add", "--date", date, "--amount", amount, "--category",
            category,
        ],
    )
    .unwrap();
}

#[test]
fn add_then_list_newest_first_with_limit() {
    let conn = setup();
    for d in ["2025-01-01", "2025-01-03", "2025-01-02"] {
        add_expense(&conn, d, "10", "Food");
    }

    let matches = cli::build_cli().get_matches_from(["budgetflow", "expense", "list", "--limit", "2"]);
    if let Some(("expense", m)) = matches.subcommand() {
        if let Some(("list", list_m)) = m.subcommand() {
            let rows = entries::query_rows(&conn, Ledger::Expense, list_m).unwrap();
            assert_eq!(rows.len(), 2);
            assert_eq!(rows[0].date.to_string(), "2025-01-03");
            assert_eq!(rows[1].date.to_string(), "2025-01-02");
        } else {
            panic!("no list subcommand");
        }
    } else {
        panic!("no expense subcommand");
    }
}

#[test]
fn list_filters_by_month_and_category() {
    let conn = setup();
    add_expense(&conn, "2025-01-05", "10", "Food");
    add_expense(&conn, "2025-02-05", "20", "Food");
    add_expense(&conn, "2025-02-06", "30", "Transport");

    let matches = cli::build_cli().get_matches_from([
        "budgetflow", "expense", "list", "--month", "2025-02", "--category", "Food",
    ]);
    let Some(("expense", m)) = matches.subcommand() else {
        panic!("no expense subcommand");
    };
    let Some(("list", list_m)) = m.subcommand() else {
        panic!("no list subcommand");
    };
    let rows = entries::query_rows(&conn, Ledger::Expense, list_m).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].amount, dec!(20));
}

#[test]
fn ledgers_are_kept_apart() {
    let conn = setup();
    add_expense(&conn, "2025-01-05", "10", "Food");
    run(
        &conn,
        &[
            "budgetflow", "revenue", "add", "--date", "2025-01-05", "--amount", "99.90",
            "--category", "Dine-in", "--description", "Table 4",
        ],
    )
    .unwrap();

    let revenue = store::load_entries(&conn, Ledger::Revenue).unwrap();
    assert_eq!(revenue.len(), 1);
    assert_eq!(revenue[0].amount, dec!(99.90));
    assert_eq!(revenue[0].description, "Table 4");
    assert_eq!(store::load_entries(&conn, Ledger::Expense).unwrap().len(), 1);
}

#[test]
fn negative_amount_is_rejected() {
    let conn = setup();
    let err = run(
        &conn,
        &[
            "budgetflow", "expense", "add", "--date", "2025-01-05", "--amount", "-5",
            "--category", "Food",
        ],
    )
    .unwrap_err();
    assert!(err.to_string().contains("must not be negative"));
    assert!(store::load_entries(&conn, Ledger::Expense).unwrap().is_empty());
}

#[test]
fn negative_amount_is_rejected_on_edit() {
    let conn = setup();
    add_expense(&conn, "2025-01-05", "10", "Food");
    let id = store::load_entries(&conn, Ledger::Expense).unwrap()[0].id.clone();

    let err = run(
        &conn,
        &["budgetflow", "expense", "edit", "--id", &id, "--amount", "-0.01"],
    )
    .unwrap_err();
    assert!(err.to_string().contains("must not be negative"));
    assert_eq!(
        store::load_entry(&conn, Ledger::Expense, &id).unwrap().amount,
        dec!(10)
    );
}

#[test]
fn blank_category_is_rejected() {
    let conn = setup();
    let err = run(
        &conn,
        &[
            "budgetflow", "expense", "add", "--date", "2025-01-05", "--amount", "5",
            "--category", "   ",
        ],
    )
    .unwrap_err();
    assert!(err.to_string().contains("Category must not be empty"));
}

#[test]
fn bad_date_is_rejected() {
    let conn = setup();
    let err = run(
        &conn,
        &[
            "budgetflow", "expense", "add", "--date", "2025-02-30", "--amount", "5",
            "--category", "Food",
        ],
    )
    .unwrap_err();
    assert!(err.to_string().contains("Invalid date"));
}

#[test]
fn edit_changes_only_given_fields() {
    let conn = setup();
    add_expense(&conn, "2025-01-05", "10", "Food");
    let id = store::load_entries(&conn, Ledger::Expense).unwrap()[0].id.clone();

    run(
        &conn,
        &["budgetflow", "expense", "edit", "--id", &id, "--amount", "12.50"],
    )
    .unwrap();

    let t = store::load_entry(&conn, Ledger::Expense, &id).unwrap();
    assert_eq!(t.amount, dec!(12.50));
    assert_eq!(t.category, "Food");
    assert_eq!(t.date.to_string(), "2025-01-05");
}

#[test]
fn rm_deletes_and_unknown_id_errors() {
    let conn = setup();
    add_expense(&conn, "2025-01-05", "10", "Food");
    let id = store::load_entries(&conn, Ledger::Expense).unwrap()[0].id.clone();

    run(&conn, &["budgetflow", "expense", "rm", "--id", &id]).unwrap();
    assert!(store::load_entries(&conn, Ledger::Expense).unwrap().is_empty());

    let err = run(&conn, &["budgetflow", "expense", "rm", "--id", &id]).unwrap_err();
    assert!(err.to_string().contains("not found"));
}

fn add_spend(conn: &Connection, date: &str, amount: &str, category: &str) {
    run(
        conn,
        &[
            "budgetflow", "spend", "add", "--date", date, "--amount", amount, "--category",
            category,
        ],
    )
    .unwrap();
}

#[test]
fn spending_is_its_own_ledger() {
    let conn = setup();
    add_spend(&conn, "2025-01-05", "40", "Groceries");
    add_expense(&conn, "2025-01-05", "2000", "Rent");

    let spending = store::load_entries(&conn, Ledger::Spending).unwrap();
    assert_eq!(spending.len(), 1);
    assert_eq!(spending[0].category, "Groceries");
    let expenses = store::load_entries(&conn, Ledger::Expense).unwrap();
    assert_eq!(expenses.len(), 1);
    assert_eq!(expenses[0].amount, dec!(2000));
}

#[test]
fn spending_categories_are_the_ones_already_used() {
    let conn = setup();
    assert!(entries::category_choices(&conn, Ledger::Spending).unwrap().is_empty());

    add_spend(&conn, "2025-01-01", "5", "Groceries");
    add_spend(&conn, "2025-01-02", "7", "Fuel");
    add_spend(&conn, "2025-01-03", "9", "Groceries");

    assert_eq!(
        entries::category_choices(&conn, Ledger::Spending).unwrap(),
        vec!["Groceries".to_string(), "Fuel".to_string()]
    );
    assert_eq!(
        entries::category_choices(&conn, Ledger::Expense).unwrap(),
        DEFAULT_EXPENSE_CATEGORIES
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
    );
}
