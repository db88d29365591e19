// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::in_month;
use crate::models::Ledger;
use crate::store;
use crate::utils::{month_key, parse_month, required};
use anyhow::{Result, bail};
use chrono::NaiveDate;
use rusqlite::Connection;
use serde::Serialize;

const EXPORT_HEADER: [&str; 5] = ["type", "date", "description", "category", "amount"];

#[derive(Debug, Serialize)]
pub struct ExportRow {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub date: NaiveDate,
    pub description: String,
    pub category: String,
    pub amount: String,
}

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = required(sub, "format")?.to_lowercase();
    let out = required(sub, "out")?;
    let month = parse_month(required(sub, "month")?)?;

    if fmt != "csv" && fmt != "json" {
        bail!("Unknown format: {} (use csv|json)", fmt);
    }
    let rows = month_rows(conn, month)?;
    if rows.is_empty() {
        tracing::warn!(month = %month_key(month), "no transactions in month");
    }

    match fmt.as_str() {
        "csv" => {
            // Header written by hand so an empty month still gets one.
            let mut wtr = csv::WriterBuilder::new()
                .has_headers(false)
                .from_path(out)?;
            wtr.write_record(EXPORT_HEADER)?;
            for row in &rows {
                wtr.serialize(row)?;
            }
            wtr.flush()?;
        }
        _ => std::fs::write(out, serde_json::to_string_pretty(&rows)?)?,
    }
    tracing::info!(month = %month_key(month), rows = rows.len(), out, "exported");
    println!(
        "Exported {} transactions for {} to {}",
        rows.len(),
        month_key(month),
        out
    );
    Ok(())
}

/// Every restaurant ledger's entries in `month`, newest first. Money going out is
/// negative.
pub fn month_rows(conn: &Connection, month: NaiveDate) -> Result<Vec<ExportRow>> {
    let mut rows = Vec::new();
    for ledger in [Ledger::Revenue, Ledger::Expense, Ledger::Purchase] {
        let entries = store::load_entries(conn, ledger)?;
        rows.extend(in_month(&entries, month).map(|t| ExportRow {
            kind: ledger.label(),
            date: t.date,
            description: t.description.clone(),
            category: t.category.clone(),
            amount: (t.amount * ledger.sign()).to_string(),
        }));
    }
    rows.sort_by(|a, b| b.date.cmp(&a.date));
    Ok(rows)
}
