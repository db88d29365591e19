// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, command, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print as JSON lines"),
    )
}

fn opt(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name).long(name).help(help)
}

fn req(name: &'static str, help: &'static str) -> Arg {
    opt(name, help).required(true)
}

/// Numeric value; a leading `-` is taken as a sign so the handler can reject it.
fn num(name: &'static str, help: &'static str) -> Arg {
    opt(name, help).allow_negative_numbers(true)
}

fn month_arg() -> Arg {
    opt("month", "Month as YYYY-MM (defaults to the current month)")
}

fn id_arg() -> Arg {
    req("id", "Record id")
}

/// `add|list|edit|rm|categories` for a plain dated ledger (personal spending,
/// restaurant expenses, revenue).
fn entry_command(name: &'static str, about: &'static str) -> Command {
    Command::new(name)
        .about(about)
        .subcommand(
            Command::new("add")
                .about("Record an entry")
                .arg(req("date", "Date as YYYY-MM-DD"))
                .arg(num("amount", "Non-negative amount").required(true))
                .arg(req("category", "Category label (free text)"))
                .arg(opt("description", "Free-text description")),
        )
        .subcommand(json_flags(
            Command::new("list")
                .about("List entries, newest first")
                .arg(month_arg())
                .arg(opt("category", "Only this category"))
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize))
                        .help("Maximum number of rows"),
                ),
        ))
        .subcommand(
            Command::new("edit")
                .about("Change fields of an entry")
                .arg(id_arg())
                .arg(opt("date", "Date as YYYY-MM-DD"))
                .arg(num("amount", "Non-negative amount"))
                .arg(opt("category", "Category label"))
                .arg(opt("description", "Free-text description")),
        )
        .subcommand(Command::new("rm").about("Remove an entry").arg(id_arg()))
        .subcommand(Command::new("categories").about("Show categories to choose from"))
}

fn purchase_command() -> Command {
    Command::new("purchase")
        .about("Inventory purchases")
        .subcommand(
            Command::new("add")
                .about("Record a purchase")
                .arg(req("date", "Date as YYYY-MM-DD"))
                .arg(req("item", "Item name"))
                .arg(num("quantity", "Quantity bought").required(true))
                .arg(req("unit", "kg|g|liter|ml|pcs|dozen|box|pack|bag"))
                .arg(num("unit-cost", "Cost per unit").required(true))
                .arg(opt("category", "Item category (defaults to Other)"))
                .arg(opt("supplier", "Supplier name"))
                .arg(opt("note", "Note")),
        )
        .subcommand(json_flags(
            Command::new("list")
                .about("List purchases, newest first")
                .arg(month_arg())
                .arg(opt("category", "Only this category")),
        ))
        .subcommand(
            Command::new("edit")
                .about("Change fields of a purchase; total cost is recomputed")
                .arg(id_arg())
                .arg(opt("date", "Date as YYYY-MM-DD"))
                .arg(opt("item", "Item name"))
                .arg(num("quantity", "Quantity bought"))
                .arg(opt("unit", "Unit"))
                .arg(num("unit-cost", "Cost per unit"))
                .arg(opt("category", "Item category"))
                .arg(opt("supplier", "Supplier name"))
                .arg(opt("note", "Note")),
        )
        .subcommand(Command::new("rm").about("Remove a purchase").arg(id_arg()))
}

fn employee_command() -> Command {
    Command::new("employee")
        .about("Staff roster")
        .subcommand(
            Command::new("add")
                .about("Add an employee")
                .arg(req("name", "Full name"))
                .arg(req("designation", "Job title"))
                .arg(num("salary", "Monthly salary").required(true))
                .arg(opt("status", "active|inactive|on-leave (default active)"))
                .arg(opt("phone", "Phone number"))
                .arg(opt("email", "Email address")),
        )
        .subcommand(json_flags(
            Command::new("list").about("List employees").arg(
                Arg::new("active")
                    .long("active")
                    .action(ArgAction::SetTrue)
                    .help("Only active employees"),
            ),
        ))
        .subcommand(
            Command::new("edit")
                .about("Change fields of an employee")
                .arg(id_arg())
                .arg(opt("name", "Full name"))
                .arg(opt("designation", "Job title"))
                .arg(num("salary", "Monthly salary"))
                .arg(opt("status", "active|inactive|on-leave"))
                .arg(opt("phone", "Phone number"))
                .arg(opt("email", "Email address")),
        )
        .subcommand(Command::new("rm").about("Remove an employee").arg(id_arg()))
}

pub fn build_cli() -> Command {
    command!()
        .name("budgetflow")
        .arg(
            Arg::new("today")
                .long("today")
                .global(true)
                .help("Treat this YYYY-MM-DD as today"),
        )
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(entry_command("spend", "Personal spending counted against the budget"))
        .subcommand(entry_command("expense", "Restaurant operating expenses"))
        .subcommand(entry_command("revenue", "Restaurant revenue"))
        .subcommand(purchase_command())
        .subcommand(employee_command())
        .subcommand(
            Command::new("budget")
                .about("Monthly budget caps")
                .subcommand(
                    Command::new("set")
                        .about("Set the cap for a month")
                        .arg(req("month", "Month as YYYY-MM"))
                        .arg(num("amount", "Non-negative cap").required(true)),
                )
                .subcommand(json_flags(
                    Command::new("show")
                        .about("Show caps, or the cap of one month")
                        .arg(opt("month", "Month as YYYY-MM")),
                ))
                .subcommand(
                    Command::new("export")
                        .about("Write a month's cap and spending to a JSON file")
                        .arg(req("month", "Month as YYYY-MM"))
                        .arg(req("out", "Output file")),
                )
                .subcommand(
                    Command::new("import")
                        .about("Replace a month's cap and spending from a JSON file")
                        .arg(req("month", "Month as YYYY-MM"))
                        .arg(req("file", "JSON file written by budget export")),
                ),
        )
        .subcommand(json_flags(
            Command::new("summary")
                .about("Budget dashboard for a month")
                .arg(month_arg()),
        ))
        .subcommand(
            Command::new("report")
                .about("Restaurant reports")
                .subcommand(json_flags(
                    Command::new("pnl")
                        .about("Profit and loss for a month")
                        .arg(month_arg())
                        .arg(opt("csv", "Also write the summary lines to this CSV file")),
                ))
                .subcommand(json_flags(
                    Command::new("trend")
                        .about("Revenue, costs and profit over recent months")
                        .arg(opt("month", "Last month of the trend as YYYY-MM"))
                        .arg(
                            Arg::new("months")
                                .long("months")
                                .value_parser(value_parser!(u32).range(1..=120))
                                .default_value("6")
                                .help("Number of months"),
                        ),
                )),
        )
        .subcommand(
            Command::new("export")
                .about("Export a month of restaurant transactions")
                .arg(req("month", "Month as YYYY-MM"))
                .arg(req("format", "csv|json"))
                .arg(req("out", "Output file")),
        )
        .subcommand(
            Command::new("settings").about("Preferences").subcommand(
                Command::new("currency")
                    .about("Show or set the display currency")
                    .arg(Arg::new("code").help("Currency code, e.g. AED")),
            ),
        )
}
