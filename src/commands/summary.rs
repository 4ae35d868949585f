// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Config;
use crate::models::DateRange;
use crate::summary::{Summary, summarize};
use crate::utils::{describe_range, fmt_money, maybe_print_json, pretty_table, range_from_args};
use anyhow::Result;
use rusqlite::Connection;

/// Range picked by the arguments (today by default) and its totals.
pub fn compute(conn: &Connection, sub: &clap::ArgMatches) -> Result<(DateRange, Summary)> {
    let range = range_from_args(sub)?;
    let summary = summarize(conn, &range)?;
    Ok((range, summary))
}

pub fn handle(conn: &Connection, config: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let (range, summary) = compute(conn, sub)?;
    if maybe_print_json(sub.get_flag("json"), false, &summary)? {
        return Ok(());
    }
    let ccy = &config.currency_symbol;
    let rows = vec![
        vec!["Income".to_string(), fmt_money(&summary.total_income, ccy)],
        vec!["Expenses".to_string(), fmt_money(&summary.total_expense, ccy)],
        vec!["Net".to_string(), fmt_money(&summary.net, ccy)],
        vec!["Hours worked".to_string(), format!("{:.1}", summary.hours_worked)],
    ];
    println!("Summary for {}", describe_range(&range));
    println!("{}", pretty_table(&["", "Total"], rows));
    Ok(())
}
