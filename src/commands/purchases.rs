// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::same_month;
use crate::error::ValidationError;
use crate::models::{Ledger, Purchase, PurchaseUnit};
use crate::store;
use crate::utils::{
    get_currency, maybe_print_json, non_empty, optional, parse_amount, parse_date, parse_month,
    pretty_table, required,
};
use anyhow::Result;
use rust_decimal::Decimal;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("rm", sub)) => {
            let id = required(sub, "id")?;
            store::delete_entry(conn, Ledger::Purchase, id)?;
            println!("Removed purchase {}", id);
        }
        _ => {}
    }
    Ok(())
}

fn parse_quantity(s: &str) -> Result<Decimal> {
    let q = parse_amount(s)?;
    if q.is_zero() {
        return Err(ValidationError::NonPositiveQuantity(q).into());
    }
    Ok(q)
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let quantity = parse_quantity(required(sub, "quantity")?)?;
    let unit_cost = parse_amount(required(sub, "unit-cost")?)?;
    let p = Purchase {
        id: uuid::Uuid::new_v4().to_string(),
        date: parse_date(required(sub, "date")?)?,
        item_name: non_empty(required(sub, "item")?, "Item name")?,
        category: optional(sub, "category").map(str::to_string),
        quantity,
        unit: required(sub, "unit")?.parse::<PurchaseUnit>()?,
        unit_cost,
        total_cost: Purchase::total_cost(quantity, unit_cost),
        supplier: optional(sub, "supplier").map(str::to_string),
        note: optional(sub, "note").map(str::to_string),
    };
    store::insert_purchase(conn, &p)?;
    println!(
        "Recorded purchase of {} {} {} for {} {:.2} ({})",
        p.quantity,
        p.unit,
        p.item_name,
        get_currency(conn)?,
        p.total_cost,
        p.id
    );
    Ok(())
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let mut p = store::load_purchase(conn, required(sub, "id")?)?;
    if let Some(d) = optional(sub, "date") {
        p.date = parse_date(d)?;
    }
    if let Some(i) = optional(sub, "item") {
        p.item_name = i.to_string();
    }
    if let Some(q) = optional(sub, "quantity") {
        p.quantity = parse_quantity(q)?;
    }
    if let Some(u) = optional(sub, "unit") {
        p.unit = u.parse::<PurchaseUnit>()?;
    }
    if let Some(c) = optional(sub, "unit-cost") {
        p.unit_cost = parse_amount(c)?;
    }
    if let Some(c) = sub.get_one::<String>("category") {
        p.category = Some(c.trim().to_string()).filter(|c| !c.is_empty());
    }
    if let Some(s) = sub.get_one::<String>("supplier") {
        p.supplier = Some(s.trim().to_string()).filter(|s| !s.is_empty());
    }
    if let Some(n) = sub.get_one::<String>("note") {
        p.note = Some(n.trim().to_string()).filter(|n| !n.is_empty());
    }
    p.total_cost = Purchase::total_cost(p.quantity, p.unit_cost);
    store::replace_purchase(conn, &p)?;
    println!("Updated purchase {} (total {:.2})", p.id, p.total_cost);
    Ok(())
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<Purchase>> {
    let month = optional(sub, "month").map(parse_month).transpose()?;
    let category = optional(sub, "category");
    Ok(store::load_purchases(conn)?
        .into_iter()
        .filter(|p| month.is_none_or(|m| same_month(p.date, m)))
        .filter(|p| category.is_none_or(|c| p.category_or_fallback() == c))
        .collect())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|p| {
                vec![
                    p.date.to_string(),
                    p.item_name.clone(),
                    p.category_or_fallback().to_string(),
                    format!("{} {}", p.quantity, p.unit),
                    format!("{:.2}", p.unit_cost),
                    format!("{:.2}", p.total_cost),
                    p.supplier.clone().unwrap_or_default(),
                    p.id.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Date", "Item", "Category", "Qty", "Unit cost", "Total", "Supplier", "Id"],
                rows,
            )
        );
    }
    Ok(())
}
