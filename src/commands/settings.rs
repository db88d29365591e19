// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{get_currency, set_currency};
use anyhow::{Result, bail};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    if let Some(("currency", sub)) = m.subcommand() {
        match sub.get_one::<String>("code").map(|s| s.trim().to_uppercase()) {
            Some(code) => {
                if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
                    bail!("Invalid currency code '{}', expected three letters", code);
                }
                set_currency(conn, &code)?;
                println!("Currency set to {}", code);
            }
            None => println!("{}", get_currency(conn)?),
        }
    }
    Ok(())
}
