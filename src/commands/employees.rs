// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Employee, EmployeeStatus};
use crate::store;
use crate::utils::{maybe_print_json, non_empty, optional, parse_amount, pretty_table, required};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("rm", sub)) => {
            let id = required(sub, "id")?;
            store::delete_employee(conn, id)?;
            println!("Removed employee {}", id);
        }
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let e = Employee {
        id: uuid::Uuid::new_v4().to_string(),
        name: non_empty(required(sub, "name")?, "Name")?,
        designation: non_empty(required(sub, "designation")?, "Designation")?,
        salary_monthly: parse_amount(required(sub, "salary")?)?,
        status: match optional(sub, "status") {
            Some(s) => s.parse::<EmployeeStatus>()?,
            None => EmployeeStatus::Active,
        },
        phone: optional(sub, "phone").map(str::to_string),
        email: optional(sub, "email").map(str::to_string),
    };
    store::insert_employee(conn, &e)?;
    println!("Added {} ({}, {}) ({})", e.name, e.designation, e.status, e.id);
    Ok(())
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let mut e = store::load_employee(conn, required(sub, "id")?)?;
    if let Some(n) = optional(sub, "name") {
        e.name = n.to_string();
    }
    if let Some(d) = optional(sub, "designation") {
        e.designation = d.to_string();
    }
    if let Some(s) = optional(sub, "salary") {
        e.salary_monthly = parse_amount(s)?;
    }
    if let Some(s) = optional(sub, "status") {
        e.status = s.parse::<EmployeeStatus>()?;
    }
    if let Some(p) = sub.get_one::<String>("phone") {
        e.phone = Some(p.trim().to_string()).filter(|p| !p.is_empty());
    }
    if let Some(m) = sub.get_one::<String>("email") {
        e.email = Some(m.trim().to_string()).filter(|m| !m.is_empty());
    }
    store::replace_employee(conn, &e)?;
    println!("Updated {} ({})", e.name, e.status);
    Ok(())
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<Employee>> {
    let active_only = sub.get_flag("active");
    Ok(store::load_employees(conn)?
        .into_iter()
        .filter(|e| !active_only || e.is_active())
        .collect())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|e| {
                vec![
                    e.name.clone(),
                    e.designation.clone(),
                    format!("{:.2}", e.salary_monthly),
                    e.status.to_string(),
                    e.phone.clone().unwrap_or_default(),
                    e.id.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Name", "Designation", "Salary", "Status", "Phone", "Id"],
                rows
            )
        );
    }
    Ok(())
}
