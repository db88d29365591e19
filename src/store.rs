// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Typed reads and writes over the SQLite tables created by [`crate::db`].
//!
//! Loaders return full snapshots; callers hand them to [`crate::aggregate`].

use anyhow::{Context, Result, anyhow, bail};
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Row, params};
use rust_decimal::Decimal;

use crate::models::{Employee, EmployeeStatus, Ledger, Purchase, PurchaseUnit, Transaction};
use crate::utils::month_key;

fn entry_table(ledger: Ledger) -> Result<&'static str> {
    match ledger {
        Ledger::Spending => Ok("spending"),
        Ledger::Expense => Ok("expenses"),
        Ledger::Revenue => Ok("revenues"),
        Ledger::Purchase => bail!("Purchases are stored with item details, use the purchase API"),
    }
}

fn dec(s: &str, what: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid {} '{}' in database", what, s))
}

fn date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}' in database", s))
}

fn ensure_changed(n: usize, what: &str, id: &str) -> Result<()> {
    if n == 0 {
        return Err(anyhow!("{} '{}' not found", what, id));
    }
    Ok(())
}

// ---- spending / expenses / revenue ----

type RawEntry = (String, String, String, String, String);

fn raw_entry(r: &Row<'_>) -> rusqlite::Result<RawEntry> {
    Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?, r.get(4)?))
}

fn entry_from_raw((id, d, amount, category, description): RawEntry) -> Result<Transaction> {
    Ok(Transaction {
        amount: dec(&amount, "amount").with_context(|| format!("Entry {}", id))?,
        date: date(&d)?,
        id,
        category,
        description,
    })
}

pub fn insert_entry(conn: &Connection, ledger: Ledger, t: &Transaction) -> Result<()> {
    let table = entry_table(ledger)?;
    conn.execute(
        &format!(
            "INSERT INTO {}(id, date, amount, category, description) VALUES (?1,?2,?3,?4,?5)",
            table
        ),
        params![
            t.id,
            t.date.to_string(),
            t.amount.to_string(),
            t.category,
            t.description
        ],
    )?;
    tracing::info!(ledger = ledger.label(), id = %t.id, amount = %t.amount, "entry recorded");
    Ok(())
}

pub fn replace_entry(conn: &Connection, ledger: Ledger, t: &Transaction) -> Result<()> {
    let table = entry_table(ledger)?;
    let n = conn.execute(
        &format!(
            "UPDATE {} SET date=?2, amount=?3, category=?4, description=?5, updated_at=datetime('now') WHERE id=?1",
            table
        ),
        params![
            t.id,
            t.date.to_string(),
            t.amount.to_string(),
            t.category,
            t.description
        ],
    )?;
    ensure_changed(n, ledger.label(), &t.id)?;
    tracing::info!(ledger = ledger.label(), id = %t.id, "entry updated");
    Ok(())
}

pub fn load_entry(conn: &Connection, ledger: Ledger, id: &str) -> Result<Transaction> {
    if ledger == Ledger::Purchase {
        return Ok(load_purchase(conn, id)?.to_transaction());
    }
    let table = entry_table(ledger)?;
    let raw = conn
        .query_row(
            &format!(
                "SELECT id, date, amount, category, description FROM {} WHERE id=?1",
                table
            ),
            params![id],
            raw_entry,
        )
        .optional()?
        .ok_or_else(|| anyhow!("{} '{}' not found", ledger.label(), id))?;
    entry_from_raw(raw)
}

/// Every entry of the ledger, newest first. Purchases are costed at their
/// total cost and fall back to the `Other` category.
pub fn load_entries(conn: &Connection, ledger: Ledger) -> Result<Vec<Transaction>> {
    if ledger == Ledger::Purchase {
        return Ok(load_purchases(conn)?
            .iter()
            .map(Purchase::to_transaction)
            .collect());
    }
    let table = entry_table(ledger)?;
    let mut stmt = conn.prepare(&format!(
        "SELECT id, date, amount, category, description FROM {} ORDER BY date DESC, created_at DESC",
        table
    ))?;
    let rows = stmt.query_map([], raw_entry)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(entry_from_raw(row?)?);
    }
    tracing::debug!(ledger = ledger.label(), rows = out.len(), "loaded entries");
    Ok(out)
}

/// Distinct categories already used in the ledger, most recently used entry
/// first.
pub fn used_categories(conn: &Connection, ledger: Ledger) -> Result<Vec<String>> {
    let mut seen = Vec::new();
    for t in load_entries(conn, ledger)? {
        if !seen.contains(&t.category) {
            seen.push(t.category);
        }
    }
    Ok(seen)
}

/// Deletes every entry of the ledger dated in the month containing `month`
/// and returns how many went.
pub fn clear_month(conn: &Connection, ledger: Ledger, month: NaiveDate) -> Result<usize> {
    let table = entry_table(ledger)?;
    let n = conn.execute(
        &format!("DELETE FROM {} WHERE substr(date, 1, 7) = ?1", table),
        params![month_key(month)],
    )?;
    tracing::info!(ledger = ledger.label(), month = %month_key(month), removed = n, "month cleared");
    Ok(n)
}

pub fn delete_entry(conn: &Connection, ledger: Ledger, id: &str) -> Result<()> {
    let table = match ledger {
        Ledger::Purchase => "purchases",
        other => entry_table(other)?,
    };
    let n = conn.execute(&format!("DELETE FROM {} WHERE id=?1", table), params![id])?;
    ensure_changed(n, ledger.label(), id)?;
    tracing::info!(ledger = ledger.label(), id, "entry removed");
    Ok(())
}

// ---- purchases ----

const PURCHASE_COLUMNS: &str =
    "id, date, item_name, category, quantity, unit, unit_cost, total_cost, supplier, note";

fn purchase_from_row(r: &Row<'_>) -> Result<Purchase> {
    let id: String = r.get(0)?;
    let d: String = r.get(1)?;
    let quantity: String = r.get(4)?;
    let unit: String = r.get(5)?;
    let unit_cost: String = r.get(6)?;
    let total_cost: String = r.get(7)?;
    Ok(Purchase {
        date: date(&d)?,
        item_name: r.get(2)?,
        category: r.get(3)?,
        quantity: dec(&quantity, "quantity")?,
        unit: unit
            .parse::<PurchaseUnit>()
            .with_context(|| format!("Purchase {}", id))?,
        unit_cost: dec(&unit_cost, "unit cost")?,
        total_cost: dec(&total_cost, "total cost")?,
        supplier: r.get(8)?,
        note: r.get(9)?,
        id,
    })
}

pub fn insert_purchase(conn: &Connection, p: &Purchase) -> Result<()> {
    conn.execute(
        &format!(
            "INSERT INTO purchases({}) VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9,?10)",
            PURCHASE_COLUMNS
        ),
        params![
            p.id,
            p.date.to_string(),
            p.item_name,
            p.category,
            p.quantity.to_string(),
            p.unit.as_str(),
            p.unit_cost.to_string(),
            p.total_cost.to_string(),
            p.supplier,
            p.note
        ],
    )?;
    tracing::info!(id = %p.id, total = %p.total_cost, "purchase recorded");
    Ok(())
}

pub fn replace_purchase(conn: &Connection, p: &Purchase) -> Result<()> {
    let n = conn.execute(
        "UPDATE purchases SET date=?2, item_name=?3, category=?4, quantity=?5, unit=?6,
             unit_cost=?7, total_cost=?8, supplier=?9, note=?10, updated_at=datetime('now')
         WHERE id=?1",
        params![
            p.id,
            p.date.to_string(),
            p.item_name,
            p.category,
            p.quantity.to_string(),
            p.unit.as_str(),
            p.unit_cost.to_string(),
            p.total_cost.to_string(),
            p.supplier,
            p.note
        ],
    )?;
    ensure_changed(n, "Purchase", &p.id)?;
    tracing::info!(id = %p.id, total = %p.total_cost, "purchase updated");
    Ok(())
}

pub fn load_purchase(conn: &Connection, id: &str) -> Result<Purchase> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM purchases WHERE id=?1",
        PURCHASE_COLUMNS
    ))?;
    let mut rows = stmt.query(params![id])?;
    match rows.next()? {
        Some(r) => purchase_from_row(r),
        None => Err(anyhow!("Purchase '{}' not found", id)),
    }
}

pub fn load_purchases(conn: &Connection) -> Result<Vec<Purchase>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM purchases ORDER BY date DESC, created_at DESC",
        PURCHASE_COLUMNS
    ))?;
    let mut rows = stmt.query([])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        out.push(purchase_from_row(r)?);
    }
    Ok(out)
}

// ---- employees ----

const EMPLOYEE_COLUMNS: &str = "id, name, designation, salary_monthly, status, phone, email";

fn employee_from_row(r: &Row<'_>) -> Result<Employee> {
    let id: String = r.get(0)?;
    let salary: String = r.get(3)?;
    let status: String = r.get(4)?;
    Ok(Employee {
        name: r.get(1)?,
        designation: r.get(2)?,
        salary_monthly: dec(&salary, "salary").with_context(|| format!("Employee {}", id))?,
        status: status.parse::<EmployeeStatus>()?,
        phone: r.get(5)?,
        email: r.get(6)?,
        id,
    })
}

pub fn insert_employee(conn: &Connection, e: &Employee) -> Result<()> {
    conn.execute(
        &format!(
            "INSERT INTO employees({}) VALUES (?1,?2,?3,?4,?5,?6,?7)",
            EMPLOYEE_COLUMNS
        ),
        params![
            e.id,
            e.name,
            e.designation,
            e.salary_monthly.to_string(),
            e.status.as_str(),
            e.phone,
            e.email
        ],
    )?;
    tracing::info!(id = %e.id, status = %e.status, "employee added");
    Ok(())
}

pub fn replace_employee(conn: &Connection, e: &Employee) -> Result<()> {
    let n = conn.execute(
        "UPDATE employees SET name=?2, designation=?3, salary_monthly=?4, status=?5,
             phone=?6, email=?7, updated_at=datetime('now')
         WHERE id=?1",
        params![
            e.id,
            e.name,
            e.designation,
            e.salary_monthly.to_string(),
            e.status.as_str(),
            e.phone,
            e.email
        ],
    )?;
    ensure_changed(n, "Employee", &e.id)?;
    tracing::info!(id = %e.id, status = %e.status, "employee updated");
    Ok(())
}

pub fn load_employee(conn: &Connection, id: &str) -> Result<Employee> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM employees WHERE id=?1",
        EMPLOYEE_COLUMNS
    ))?;
    let mut rows = stmt.query(params![id])?;
    match rows.next()? {
        Some(r) => employee_from_row(r),
        None => Err(anyhow!("Employee '{}' not found", id)),
    }
}

pub fn load_employees(conn: &Connection) -> Result<Vec<Employee>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM employees ORDER BY created_at DESC, name",
        EMPLOYEE_COLUMNS
    ))?;
    let mut rows = stmt.query([])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        out.push(employee_from_row(r)?);
    }
    Ok(out)
}

pub fn delete_employee(conn: &Connection, id: &str) -> Result<()> {
    let n = conn.execute("DELETE FROM employees WHERE id=?1", params![id])?;
    ensure_changed(n, "Employee", id)?;
    tracing::info!(id, "employee removed");
    Ok(())
}

// ---- budget caps ----

/// Cap for the month containing `month`; zero when none was set.
pub fn budget_cap(conn: &Connection, month: NaiveDate) -> Result<Decimal> {
    let key = month_key(month);
    let v: Option<String> = conn
        .query_row(
            "SELECT amount FROM budgets WHERE month=?1",
            params![key],
            |r| r.get(0),
        )
        .optional()?;
    match v {
        Some(s) => dec(&s, "budget"),
        None => Ok(Decimal::ZERO),
    }
}

pub fn set_budget_cap(conn: &Connection, month: NaiveDate, amount: Decimal) -> Result<()> {
    let key = month_key(month);
    conn.execute(
        "INSERT INTO budgets(month, amount) VALUES (?1,?2)
         ON CONFLICT(month) DO UPDATE SET amount=excluded.amount",
        params![key, amount.to_string()],
    )?;
    tracing::info!(month = %key, %amount, "budget cap set");
    Ok(())
}

pub fn budget_caps(conn: &Connection) -> Result<Vec<(String, Decimal)>> {
    let mut stmt = conn.prepare("SELECT month, amount FROM budgets ORDER BY month DESC")?;
    let rows = stmt.query_map([], |r| Ok((r.get::<_, String>(0)?, r.get::<_, String>(1)?)))?;
    let mut out = Vec::new();
    for row in rows {
        let (m, a) = row?;
        out.push((m, dec(&a, "budget")?));
    }
    Ok(out)
}
