// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, arg, command, value_parser};

fn range_args(cmd: Command) -> Command {
    cmd.arg(arg!(--from <DATE> "First day to include (YYYY-MM-DD)"))
        .arg(arg!(--to <DATE> "Last day to include (YYYY-MM-DD)"))
        .arg(arg!(--all "Ignore the default of today when no bounds are given"))
}

fn json_args(cmd: Command) -> Command {
    cmd.arg(arg!(--json "Print pretty JSON"))
        .arg(arg!(--jsonl "Print one JSON object per line"))
}

fn id_arg() -> Arg {
    arg!(--id <ID> "Internal record id")
        .required(true)
        .value_parser(value_parser!(i64))
}

fn record_cmd() -> Command {
    Command::new("record")
        .about("Add, edit, remove and list ledger records")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .about("Record income (gross, commission applied) or an expense")
                .arg(
                    arg!(--kind <KIND> "income or expense")
                        .required(true)
                        .value_parser(["income", "expense"]),
                )
                .arg(arg!(--category <CATEGORY> "Uber, InDriver, Cabify, Fuel, ...").required(true))
                .arg(arg!(--amount <AMOUNT> "Gross for income, paid amount for expenses").required(true))
                .arg(arg!(--at <TIMESTAMP> "When it happened (YYYY-MM-DD HH:MM[:SS]); defaults to now"))
                .arg(arg!(--description <TEXT> "Free-form note")),
        )
        .subcommand(
            Command::new("edit")
                .about("Change a stored record; the amount is the stored net value")
                .arg(id_arg())
                .arg(arg!(--at <TIMESTAMP> "New timestamp"))
                .arg(arg!(--category <CATEGORY> "New category"))
                .arg(arg!(--amount <AMOUNT> "New net amount"))
                .arg(arg!(--description <TEXT> "New description")),
        )
        .subcommand(Command::new("rm").about("Delete a record").arg(id_arg()))
        .subcommand(Command::new("show").about("Show one record").arg(id_arg()))
        .subcommand(json_args(range_args(
            Command::new("list").about("List records, newest first"),
        )))
}

pub fn build_cli() -> Command {
    command!()
        .name("rideledger")
        .about("Income, expense and commission ledger for ride-share drivers")
        .arg(
            Arg::new("db")
                .long("db")
                .value_name("PATH")
                .global(true)
                .action(ArgAction::Set)
                .help("SQLite file to use (default: RIDELEDGER_DB or the platform data dir)"),
        )
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(record_cmd())
        .subcommand(range_args(
            Command::new("summary")
                .about("Totals and hours worked over a date range")
                .arg(arg!(--json "Print JSON")),
        ))
        .subcommand(
            Command::new("export")
                .about("Write records to a file")
                .subcommand_required(true)
                .subcommand(
                    Command::new("records")
                        .arg(arg!(--format <FORMAT> "csv or json").required(true))
                        .arg(arg!(--out <PATH> "Destination file").required(true))
                        .arg(arg!(--from <DATE> "First day to include"))
                        .arg(arg!(--to <DATE> "Last day to include")),
                ),
        )
}
