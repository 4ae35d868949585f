// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::DateRange;
use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL};
use rust_decimal::Decimal;
use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Installs the global subscriber once. `RUST_LOG` overrides the default
/// directive; events go to stderr so JSON output stays clean.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{EnvFilter, fmt};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("rideledger=warn"));
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid amount '{}'", s))
}

pub fn fmt_money(d: &Decimal, ccy: &str) -> String {
    format!("{}{:.2}", ccy, d)
}

/// Builds the range from `--from/--to/--all`. With no bounds and no `--all`
/// the range is today only.
pub fn range_from_args(sub: &clap::ArgMatches) -> Result<DateRange> {
    let start = sub
        .get_one::<String>("from")
        .map(|s| parse_date(s))
        .transpose()?;
    let end = sub
        .get_one::<String>("to")
        .map(|s| parse_date(s))
        .transpose()?;
    let all = sub.get_flag("all");
    if start.is_none() && end.is_none() && !all {
        return Ok(DateRange::day(Local::now().date_naive()));
    }
    Ok(DateRange::new(start, end))
}

pub fn describe_range(range: &DateRange) -> String {
    match (range.start, range.end) {
        (Some(s), Some(e)) if s == e => s.to_string(),
        (Some(s), Some(e)) => format!("{} .. {}", s, e),
        (Some(s), None) => format!("since {}", s),
        (None, Some(e)) => format!("until {}", e),
        (None, None) => "all time".to_string(),
    }
}

/// Table with the given header; wide descriptions wrap to the terminal.
pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers.iter().copied())
        .add_rows(rows);
    table
}

/// Prints `v` as pretty JSON or JSON lines when asked to. Returns whether
/// anything was printed.
pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
    } else if jsonl_flag {
        match serde_json::to_value(v)? {
            serde_json::Value::Array(items) => {
                for item in items {
                    println!("{}", item);
                }
            }
            other => println!("{}", other),
        }
    } else {
        return Ok(false);
    }
    Ok(true)
}
