// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{Books, LedgerTally, ProfitSummary, TrendPoint, monthly_trend, profit_summary};
use crate::models::{Employee, Ledger, Transaction};
use crate::store;
use crate::utils::{
    fmt_money, fmt_percent, get_currency, maybe_print_json, optional, pretty_table,
    selected_month, today,
};
use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("pnl", sub)) => pnl(conn, sub)?,
        Some(("trend", sub)) => trend(conn, sub)?,
        _ => {}
    }
    Ok(())
}

/// Snapshot of everything the restaurant reports read.
pub struct Snapshot {
    pub revenue: Vec<Transaction>,
    pub expenses: Vec<Transaction>,
    pub purchases: Vec<Transaction>,
    pub employees: Vec<Employee>,
}

impl Snapshot {
    pub fn load(conn: &Connection) -> Result<Self> {
        Ok(Self {
            revenue: store::load_entries(conn, Ledger::Revenue)?,
            expenses: store::load_entries(conn, Ledger::Expense)?,
            purchases: store::load_entries(conn, Ledger::Purchase)?,
            employees: store::load_employees(conn)?,
        })
    }

    pub fn books(&self) -> Books<'_> {
        Books {
            revenue: &self.revenue,
            expenses: &self.expenses,
            purchases: &self.purchases,
            employees: &self.employees,
        }
    }
}

pub fn build_pnl(conn: &Connection, sub: &clap::ArgMatches) -> Result<ProfitSummary> {
    let month = selected_month(sub, today(sub)?)?;
    let snap = Snapshot::load(conn)?;
    Ok(profit_summary(snap.books(), month))
}

pub fn build_trend(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<TrendPoint>> {
    let end = selected_month(sub, today(sub)?)?;
    let months = sub.get_one::<u32>("months").copied().unwrap_or(6);
    let snap = Snapshot::load(conn)?;
    Ok(monthly_trend(snap.books(), end, months))
}

/// `Category,Amount` lines of a profit and loss summary.
pub fn summary_lines(s: &ProfitSummary) -> Vec<[String; 2]> {
    vec![
        ["Total Revenue".into(), s.total_revenue.to_string()],
        ["Total Expenses".into(), s.total_expenses.to_string()],
        ["Total Purchases".into(), s.total_purchases.to_string()],
        ["Total Salaries".into(), s.total_salaries.to_string()],
        ["Net Profit/Loss".into(), s.net_profit.to_string()],
        ["Profit Margin (%)".into(), format!("{:.2}", s.profit_margin)],
    ]
}

pub fn write_summary_csv(s: &ProfitSummary, path: &str) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path).with_context(|| format!("Create {}", path))?;
    wtr.write_record(["Category", "Amount"])?;
    for line in summary_lines(s) {
        wtr.write_record(&line)?;
    }
    wtr.flush()?;
    tracing::info!(month = %s.month, out = path, "profit and loss summary written");
    Ok(())
}

fn category_rows(label: &str, tally: &LedgerTally, ccy: &str, out: &mut Vec<Vec<String>>) {
    for c in &tally.categories {
        out.push(vec![
            label.to_string(),
            c.category.clone(),
            fmt_money(&c.amount, ccy),
            fmt_percent(&c.percentage),
        ]);
    }
}

fn pnl(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let s = build_pnl(conn, sub)?;
    if let Some(path) = optional(sub, "csv") {
        write_summary_csv(&s, path)?;
        eprintln!("Wrote summary for {} to {}", s.month.format("%Y-%m"), path);
    }
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        return Ok(());
    }
    let ccy = get_currency(conn)?;
    let outcome = if s.net_profit.is_sign_negative() && !s.net_profit.is_zero() {
        "Net loss"
    } else {
        "Net profit"
    };
    println!("Profit & loss for {}", s.month.format("%B %Y"));
    let overview = vec![
        vec!["Revenue".into(), fmt_money(&s.total_revenue, &ccy)],
        vec!["Expenses".into(), fmt_money(&s.total_expenses, &ccy)],
        vec!["Purchases".into(), fmt_money(&s.total_purchases, &ccy)],
        vec![
            format!("Salaries ({} active)", s.employee_count),
            fmt_money(&s.total_salaries, &ccy),
        ],
        vec![outcome.into(), fmt_money(&s.net_profit, &ccy)],
        vec!["Profit margin".into(), fmt_percent(&s.profit_margin)],
    ];
    println!("{}", pretty_table(&["Line", "Amount"], overview));

    let mut rows = Vec::new();
    category_rows("Revenue", &s.revenue, &ccy, &mut rows);
    category_rows("Expense", &s.expenses, &ccy, &mut rows);
    category_rows("Purchase", &s.purchases, &ccy, &mut rows);
    if !rows.is_empty() {
        println!(
            "{}",
            pretty_table(&["Ledger", "Category", "Amount", "Share"], rows)
        );
    }
    Ok(())
}

fn trend(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let points = build_trend(conn, sub)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &points)? {
        return Ok(());
    }
    let rows = points
        .iter()
        .map(|p| {
            vec![
                p.month.format("%Y-%m").to_string(),
                format!("{:.2}", p.revenue),
                format!("{:.2}", p.costs),
                format!("{:.2}", p.profit),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Month", "Revenue", "Costs", "Profit"], rows)
    );
    Ok(())
}
