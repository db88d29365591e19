// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::str::FromStr;

use crate::aggregate::{in_month, same_month};
use crate::models::{Ledger, Transaction};
use crate::store;
use crate::utils::{
    get_currency, maybe_print_json, month_key, optional, parse_amount, parse_category, parse_date,
    parse_month, pretty_table, required,
};
use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(conn, sub)?,
        Some(("show", sub)) => show(conn, sub)?,
        Some(("export", sub)) => {
            let month = parse_month(required(sub, "month")?)?;
            let out = required(sub, "out")?;
            let file = export_month(conn, month)?;
            std::fs::write(out, serde_json::to_string_pretty(&file)?)
                .with_context(|| format!("Write {}", out))?;
            println!(
                "Exported budget and {} expenses for {} to {}",
                file.expenses.len(),
                month_key(month),
                out
            );
        }
        Some(("import", sub)) => {
            let month = parse_month(required(sub, "month")?)?;
            let path = required(sub, "file")?;
            let raw =
                std::fs::read_to_string(path).with_context(|| format!("Read {}", path))?;
            let n = import_month(conn, month, &raw)?;
            println!("Imported budget and {} expenses into {}", n, month_key(month));
        }
        _ => {}
    }
    Ok(())
}

fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let month = parse_month(required(sub, "month")?)?;
    let amount = parse_amount(required(sub, "amount")?)?;
    store::set_budget_cap(conn, month, amount)?;
    println!(
        "Budget for {} set to {} {}",
        month_key(month),
        get_currency(conn)?,
        amount
    );
    Ok(())
}

#[derive(Serialize)]
pub struct BudgetRow {
    pub month: String,
    pub amount: String,
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<BudgetRow>> {
    let rows = match optional(sub, "month") {
        Some(m) => {
            let month = parse_month(m)?;
            vec![BudgetRow {
                month: month_key(month),
                amount: format!("{:.2}", store::budget_cap(conn, month)?),
            }]
        }
        None => store::budget_caps(conn)?
            .into_iter()
            .map(|(month, amount)| BudgetRow {
                month,
                amount: format!("{:.2}", amount),
            })
            .collect(),
    };
    Ok(rows)
}

fn show(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let ccy = get_currency(conn)?;
        let rows = data
            .into_iter()
            .map(|r| vec![r.month, r.amount])
            .collect();
        println!(
            "{}",
            pretty_table(&["Month", &format!("Budget ({})", ccy)], rows)
        );
    }
    Ok(())
}

/// One month of the personal budget as a portable JSON document:
/// `{"budgetCap": 500, "expenses": [...]}` with plain JSON numbers for money.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthFile {
    pub budget_cap: Number,
    pub expenses: Vec<FileExpense>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FileExpense {
    #[serde(default)]
    pub id: String,
    /// `YYYY-MM-DD`, or a timestamp whose first ten characters are one.
    pub date: String,
    pub amount: Number,
    pub category: String,
    #[serde(default)]
    pub description: String,
}

fn number(d: Decimal) -> Result<Number> {
    Number::from_str(&d.normalize().to_string())
        .map_err(|e| anyhow::anyhow!("Cannot write {} as a JSON number: {}", d, e))
}

pub fn export_month(conn: &Connection, month: NaiveDate) -> Result<MonthFile> {
    let spending = store::load_entries(conn, Ledger::Spending)?;
    let expenses = in_month(&spending, month)
        .map(|t| {
            Ok(FileExpense {
                id: t.id.clone(),
                date: t.date.to_string(),
                amount: number(t.amount)?,
                category: t.category.clone(),
                description: t.description.clone(),
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(MonthFile {
        budget_cap: number(store::budget_cap(conn, month)?)?,
        expenses,
    })
}

fn expense_from_file(e: FileExpense, month: NaiveDate) -> Result<Transaction> {
    let date = parse_date(e.date.get(..10).unwrap_or(&e.date))?;
    if !same_month(date, month) {
        bail!(
            "Expense dated {} does not belong to {}",
            date,
            month_key(month)
        );
    }
    let mut t = Transaction::new(
        date,
        parse_amount(&e.amount.to_string())?,
        parse_category(&e.category)?,
        e.description.trim(),
    );
    if !e.id.trim().is_empty() {
        t.id = e.id.trim().to_string();
    }
    Ok(t)
}

/// Replaces the month's budget cap and spending with the contents of `raw`.
/// Nothing is written unless the whole document is valid. Returns the number
/// of expenses imported.
pub fn import_month(conn: &Connection, month: NaiveDate, raw: &str) -> Result<usize> {
    let value: Value = serde_json::from_str(raw).context("Import file is not valid JSON")?;
    if !value.get("budgetCap").is_some_and(Value::is_number)
        || !value.get("expenses").is_some_and(Value::is_array)
    {
        bail!("Invalid file format: expected a numeric budgetCap and an expenses array");
    }
    let file: MonthFile = serde_json::from_value(value).context("Invalid file format")?;

    let cap = parse_amount(&file.budget_cap.to_string())?;
    let expenses = file
        .expenses
        .into_iter()
        .map(|e| expense_from_file(e, month))
        .collect::<Result<Vec<_>>>()?;

    let tx = conn.unchecked_transaction()?;
    store::set_budget_cap(&tx, month, cap)?;
    store::clear_month(&tx, Ledger::Spending, month)?;
    for t in &expenses {
        store::insert_entry(&tx, Ledger::Spending, t)?;
    }
    tx.commit()?;
    tracing::info!(month = %month_key(month), expenses = expenses.len(), "month imported");
    Ok(expenses.len())
}
