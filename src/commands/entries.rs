// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::same_month;
use crate::models::{Ledger, Transaction};
use crate::store;
use crate::utils::{
    get_currency, maybe_print_json, optional, parse_amount, parse_category, parse_date,
    parse_month, pretty_table, required,
};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, ledger: Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, ledger, sub)?,
        Some(("list", sub)) => list(conn, ledger, sub)?,
        Some(("edit", sub)) => edit(conn, ledger, sub)?,
        Some(("rm", sub)) => {
            let id = required(sub, "id")?;
            store::delete_entry(conn, ledger, id)?;
            println!("Removed {} {}", ledger.label().to_lowercase(), id);
        }
        Some(("categories", _)) => {
            let rows = category_choices(conn, ledger)?
                .into_iter()
                .map(|c| vec![c])
                .collect();
            println!("{}", pretty_table(&["Category"], rows));
        }
        _ => {}
    }
    Ok(())
}

/// Categories offered for the ledger: the categories already used for
/// personal spending, the built-in suggestions for the restaurant ledgers.
pub fn category_choices(conn: &Connection, ledger: Ledger) -> Result<Vec<String>> {
    if ledger == Ledger::Spending {
        return store::used_categories(conn, ledger);
    }
    Ok(ledger
        .suggested_categories()
        .iter()
        .map(|c| c.to_string())
        .collect())
}

fn add(conn: &Connection, ledger: Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let date = parse_date(required(sub, "date")?)?;
    let amount = parse_amount(required(sub, "amount")?)?;
    let category = parse_category(required(sub, "category")?)?;
    let description = optional(sub, "description").unwrap_or_default();

    let t = Transaction::new(date, amount, category, description);
    store::insert_entry(conn, ledger, &t)?;
    println!(
        "Recorded {} {} {} on {} [{}] ({})",
        ledger.label().to_lowercase(),
        get_currency(conn)?,
        t.amount,
        t.date,
        t.category,
        t.id
    );
    Ok(())
}

fn edit(conn: &Connection, ledger: Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let id = required(sub, "id")?;
    let mut t = store::load_entry(conn, ledger, id)?;
    if let Some(d) = optional(sub, "date") {
        t.date = parse_date(d)?;
    }
    if let Some(a) = optional(sub, "amount") {
        t.amount = parse_amount(a)?;
    }
    if let Some(c) = sub.get_one::<String>("category") {
        t.category = parse_category(c)?;
    }
    if let Some(d) = sub.get_one::<String>("description") {
        t.description = d.trim().to_string();
    }
    store::replace_entry(conn, ledger, &t)?;
    println!("Updated {} {}", ledger.label().to_lowercase(), t.id);
    Ok(())
}

fn list(conn: &Connection, ledger: Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, ledger, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|t| {
                vec![
                    t.date.to_string(),
                    t.category.clone(),
                    format!("{:.2}", t.amount),
                    t.description.clone(),
                    t.id.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Category", "Amount", "Description", "Id"], rows)
        );
    }
    Ok(())
}

/// Entries matching the `--month`, `--category` and `--limit` filters, newest
/// first.
pub fn query_rows(
    conn: &Connection,
    ledger: Ledger,
    sub: &clap::ArgMatches,
) -> Result<Vec<Transaction>> {
    let month = optional(sub, "month").map(parse_month).transpose()?;
    let category = optional(sub, "category");
    let limit = sub.get_one::<usize>("limit").copied();

    let rows = store::load_entries(conn, ledger)?
        .into_iter()
        .filter(|t| month.is_none_or(|m| same_month(t.date, m)))
        .filter(|t| category.is_none_or(|c| t.category == c))
        .take(limit.unwrap_or(usize::MAX))
        .collect();
    Ok(rows)
}
