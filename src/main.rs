// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use budgetflow::models::Ledger;
use budgetflow::{cli, commands, db, utils};

fn main() -> Result<()> {
    utils::init_tracing();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let conn = db::open_or_init()?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path()?.display());
        }
        Some(("spend", sub)) => commands::entries::handle(&conn, Ledger::Spending, sub)?,
        Some(("expense", sub)) => commands::entries::handle(&conn, Ledger::Expense, sub)?,
        Some(("revenue", sub)) => commands::entries::handle(&conn, Ledger::Revenue, sub)?,
        Some(("purchase", sub)) => commands::purchases::handle(&conn, sub)?,
        Some(("employee", sub)) => commands::employees::handle(&conn, sub)?,
        Some(("budget", sub)) => commands::budgets::handle(&conn, sub)?,
        Some(("summary", sub)) => commands::summary::handle(&conn, sub)?,
        Some(("report", sub)) => commands::reports::handle(&conn, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&conn, sub)?,
        Some(("settings", sub)) => commands::settings::handle(&conn, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
