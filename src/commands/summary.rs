// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{MonthlySummary, month_start, summarize_month};
use crate::models::Ledger;
use crate::store;
use crate::utils::{
    fmt_money, fmt_percent, get_currency, maybe_print_json, month_key, pretty_table,
    selected_month, today,
};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let summary = build(conn, sub)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &summary)? {
        return Ok(());
    }
    print(&summary, &get_currency(conn)?);
    Ok(())
}

/// Dashboard for the selected month. A month after the current one is clamped
/// to the current month.
pub fn build(conn: &Connection, sub: &clap::ArgMatches) -> Result<MonthlySummary> {
    let today = today(sub)?;
    let current = month_start(today);
    let mut month = selected_month(sub, today)?;
    if month > current {
        tracing::warn!(
            requested = %month_key(month),
            using = %month_key(current),
            "future month requested, showing the current month"
        );
        month = current;
    }

    let spending = store::load_entries(conn, Ledger::Spending)?;
    let cap = store::budget_cap(conn, month)?;
    Ok(summarize_month(&spending, cap, month, today))
}

fn print(s: &MonthlySummary, ccy: &str) {
    println!("Budget for {}", s.month.format("%B %Y"));
    let overview = vec![
        vec!["Budget cap".into(), fmt_money(&s.budget_cap, ccy)],
        vec!["Spent".into(), fmt_money(&s.total_amount, ccy)],
        vec!["Remaining".into(), fmt_money(&s.remaining_budget, ccy)],
        vec!["Progress".into(), fmt_percent(&s.progress_percent)],
        vec![
            "Days elapsed".into(),
            format!("{} of {}", s.days_elapsed, s.days_in_month),
        ],
        vec!["Avg daily spend".into(), fmt_money(&s.avg_daily_spend, ccy)],
        vec!["Projected total".into(), fmt_money(&s.projected_total, ccy)],
        vec![
            format!("Daily allowance ({} days left)", s.days_remaining),
            fmt_money(&s.daily_allowance, ccy),
        ],
    ];
    println!("{}", pretty_table(&["Metric", "Value"], overview));

    if !s.category_breakdown.is_empty() {
        let rows = s
            .category_breakdown
            .iter()
            .map(|c| {
                vec![
                    c.category.clone(),
                    fmt_money(&c.amount, ccy),
                    fmt_percent(&c.percentage),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Category", "Spent", "Share"], rows));
    }

    let days = s
        .daily_series
        .iter()
        .filter(|d| !d.amount.is_zero())
        .map(|d| vec![format!("{:02}", d.day()), format!("{:.2}", d.amount)])
        .collect::<Vec<_>>();
    if !days.is_empty() {
        println!("{}", pretty_table(&["Day", "Spent"], days));
    }
}
