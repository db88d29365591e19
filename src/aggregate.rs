// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Monthly aggregation over snapshots of ledger entries.
//!
//! Every function here is pure: inputs are borrowed snapshots plus an explicit
//! `today`, outputs are fresh values. Nothing reads the clock or the database,
//! and no division is performed without a zero guard, so none of these
//! functions can fail.

use std::collections::HashMap;

use chrono::{Datelike, Days, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Employee, Transaction};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub amount: Decimal,
    pub percentage: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyAmount {
    pub date: NaiveDate,
    pub amount: Decimal,
}

impl DailyAmount {
    pub fn day(&self) -> u32 {
        self.date.day()
    }
}

/// Totals of a single ledger for one month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerTally {
    pub total: Decimal,
    pub categories: Vec<CategoryShare>,
    pub daily: Vec<DailyAmount>,
}

/// Budget dashboard for one month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySummary {
    pub month: NaiveDate,
    pub budget_cap: Decimal,
    pub total_amount: Decimal,
    pub remaining_budget: Decimal,
    pub category_breakdown: Vec<CategoryShare>,
    pub daily_series: Vec<DailyAmount>,
    pub days_in_month: u32,
    pub days_elapsed: u32,
    pub days_remaining: u32,
    pub avg_daily_spend: Decimal,
    pub projected_total: Decimal,
    pub daily_allowance: Decimal,
    pub progress_percent: Decimal,
}

/// Restaurant profit and loss for one month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfitSummary {
    pub month: NaiveDate,
    pub revenue: LedgerTally,
    pub expenses: LedgerTally,
    pub purchases: LedgerTally,
    pub total_revenue: Decimal,
    pub total_expenses: Decimal,
    pub total_purchases: Decimal,
    pub total_salaries: Decimal,
    pub employee_count: usize,
    pub net_profit: Decimal,
    pub profit_margin: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub month: NaiveDate,
    pub revenue: Decimal,
    pub costs: Decimal,
    pub profit: Decimal,
}

/// Borrowed snapshot of the three restaurant ledgers and the staff roster.
#[derive(Debug, Clone, Copy)]
pub struct Books<'a> {
    pub revenue: &'a [Transaction],
    pub expenses: &'a [Transaction],
    pub purchases: &'a [Transaction],
    pub employees: &'a [Employee],
}

pub fn month_start(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.day0()))
}

pub fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

pub fn days_in_month(date: NaiveDate) -> u32 {
    let start = month_start(date);
    // Only the last representable month has no successor, and it is a December.
    start
        .checked_add_months(Months::new(1))
        .map_or(31, |next| (next - start).num_days() as u32)
}

/// Days of `month` that have already happened as of `today`.
pub fn days_elapsed(month: NaiveDate, today: NaiveDate) -> u32 {
    let target = (month.year(), month.month());
    let current = (today.year(), today.month());
    if target == current {
        today.day()
    } else if target < current {
        days_in_month(month)
    } else {
        0
    }
}

pub fn in_month<'a>(
    transactions: &'a [Transaction],
    month: NaiveDate,
) -> impl Iterator<Item = &'a Transaction> + 'a {
    transactions.iter().filter(move |t| same_month(t.date, month))
}

/// Percentage of `part` in `whole`, or zero when `whole` is not positive.
pub fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole > Decimal::ZERO {
        part / whole * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    }
}

/// Groups by exact category label. Sorted by amount, largest first; equal
/// amounts keep the order in which their category was first seen.
pub fn category_breakdown<'a>(
    transactions: impl IntoIterator<Item = &'a Transaction>,
) -> Vec<CategoryShare> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut sums: Vec<(&str, Decimal)> = Vec::new();
    for t in transactions {
        match slots.get(t.category.as_str()) {
            Some(&i) => sums[i].1 += t.amount,
            None => {
                slots.insert(t.category.as_str(), sums.len());
                sums.push((t.category.as_str(), t.amount));
            }
        }
    }
    let total: Decimal = sums.iter().map(|(_, a)| *a).sum();

    let mut out: Vec<CategoryShare> = sums
        .into_iter()
        .map(|(category, amount)| CategoryShare {
            category: category.to_string(),
            amount,
            percentage: percent_of(amount, total),
        })
        .collect();
    out.sort_by(|a, b| b.amount.cmp(&a.amount));
    out
}

/// One entry per calendar day of `month`, zero-filled. Entries dated outside
/// the month are ignored.
pub fn daily_series<'a>(
    transactions: impl IntoIterator<Item = &'a Transaction>,
    month: NaiveDate,
) -> Vec<DailyAmount> {
    let start = month_start(month);
    let mut out: Vec<DailyAmount> = (0..days_in_month(start))
        .map(|i| DailyAmount {
            date: start + Days::new(u64::from(i)),
            amount: Decimal::ZERO,
        })
        .collect();
    for t in transactions {
        if same_month(t.date, start) {
            out[t.date.day0() as usize].amount += t.amount;
        }
    }
    out
}

pub fn tally(transactions: &[Transaction], month: NaiveDate) -> LedgerTally {
    let rows: Vec<&Transaction> = in_month(transactions, month).collect();
    let total = rows.iter().map(|t| t.amount).sum();
    LedgerTally {
        total,
        categories: category_breakdown(rows.iter().copied()),
        daily: daily_series(rows.iter().copied(), month),
    }
}

/// Budget dashboard for the month containing `target`.
///
/// `budget_cap` of zero means "unset": progress and allowance are then zero.
/// `remaining_budget` is not clamped and goes negative once the cap is blown.
pub fn summarize_month(
    transactions: &[Transaction],
    budget_cap: Decimal,
    target: NaiveDate,
    today: NaiveDate,
) -> MonthlySummary {
    let month = month_start(target);
    let LedgerTally {
        total,
        categories,
        daily,
    } = tally(transactions, month);

    let days_in_month = days_in_month(month);
    let days_elapsed = days_elapsed(month, today);
    let days_remaining = days_in_month - days_elapsed;

    let avg_daily_spend = if days_elapsed > 0 {
        total / Decimal::from(days_elapsed)
    } else {
        Decimal::ZERO
    };
    let projected_total = avg_daily_spend * Decimal::from(days_in_month);
    let remaining_budget = budget_cap - total;
    let daily_allowance = if days_remaining > 0 && remaining_budget > Decimal::ZERO {
        remaining_budget / Decimal::from(days_remaining)
    } else {
        Decimal::ZERO
    };

    tracing::debug!(
        month = %month,
        categories = categories.len(),
        %total,
        days_elapsed,
        "summarized month"
    );

    MonthlySummary {
        month,
        budget_cap,
        total_amount: total,
        remaining_budget,
        category_breakdown: categories,
        daily_series: daily,
        days_in_month,
        days_elapsed,
        days_remaining,
        avg_daily_spend,
        projected_total,
        daily_allowance,
        progress_percent: percent_of(total, budget_cap),
    }
}

/// Monthly payroll of the active roster.
///
/// The roster is the current one: status changes apply to every month,
/// including past ones. Employment history is not tracked.
pub fn active_salaries(employees: &[Employee]) -> Decimal {
    employees
        .iter()
        .filter(|e| e.is_active())
        .map(|e| e.salary_monthly)
        .sum()
}

pub fn profit_summary(books: Books<'_>, target: NaiveDate) -> ProfitSummary {
    let month = month_start(target);
    let revenue = tally(books.revenue, month);
    let expenses = tally(books.expenses, month);
    let purchases = tally(books.purchases, month);
    let total_salaries = active_salaries(books.employees);

    let net_profit = revenue.total - (expenses.total + purchases.total + total_salaries);
    let profit_margin = percent_of(net_profit, revenue.total);

    ProfitSummary {
        month,
        total_revenue: revenue.total,
        total_expenses: expenses.total,
        total_purchases: purchases.total,
        total_salaries,
        employee_count: books.employees.iter().filter(|e| e.is_active()).count(),
        net_profit,
        profit_margin,
        revenue,
        expenses,
        purchases,
    }
}

/// `months` consecutive points ending at the month of `end`, oldest first.
pub fn monthly_trend(books: Books<'_>, end: NaiveDate, months: u32) -> Vec<TrendPoint> {
    let end = month_start(end);
    let salaries = active_salaries(books.employees);
    let sum_in = |rows: &[Transaction], month: NaiveDate| -> Decimal {
        in_month(rows, month).map(|t| t.amount).sum()
    };

    (0..months)
        .rev()
        .filter_map(|back| end.checked_sub_months(Months::new(back)))
        .map(|month| {
            let revenue = sum_in(books.revenue, month);
            let costs = sum_in(books.expenses, month) + sum_in(books.purchases, month) + salaries;
            TrendPoint {
                month,
                revenue,
                costs,
                profit: revenue - costs,
            }
        })
        .collect()
}
