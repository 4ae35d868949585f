// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::records::query_views;
use crate::models::DateRange;
use crate::utils::parse_date;
use anyhow::{Result, bail};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("records", sub)) => export_records(conn, sub),
        _ => Ok(()),
    }
}

fn export_records(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub
        .get_one::<String>("format")
        .map(|s| s.trim().to_lowercase())
        .unwrap_or_default();
    let out = sub
        .get_one::<String>("out")
        .map(|s| s.trim().to_string())
        .unwrap_or_default();
    if fmt != "csv" && fmt != "json" {
        bail!("Unknown format: {} (use csv|json)", fmt);
    }
    if out.is_empty() {
        bail!("--out must not be empty");
    }

    let start = sub.get_one::<String>("from").map(|s| parse_date(s)).transpose()?;
    let end = sub.get_one::<String>("to").map(|s| parse_date(s)).transpose()?;
    let mut views = query_views(conn, &DateRange::new(start, end))?;
    // oldest first reads better in a spreadsheet
    views.reverse();

    if fmt == "csv" {
        let mut wtr = csv::Writer::from_path(&out)?;
        for v in &views {
            wtr.serialize(v)?;
        }
        wtr.flush()?;
    } else {
        std::fs::write(&out, serde_json::to_string_pretty(&views)?)?;
    }
    tracing::debug!(count = views.len(), out = %out, "records exported");
    println!("Exported {} records to {}", views.len(), out);
    Ok(())
}
