// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commission::{apply_commission, gross_from_net};
use crate::config::Config;
use crate::error::LedgerError;
use crate::models::{
    DateRange, NewRecord, Record, RecordKind, RecordUpdate, format_timestamp, parse_timestamp,
};
use crate::store;
use crate::utils::{maybe_print_json, parse_decimal, pretty_table, range_from_args};
use anyhow::{Context, Result};
use chrono::Local;
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &mut Connection, config: &Config, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, config, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("rm", sub)) => remove(conn, sub)?,
        Some(("show", sub)) => show(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn opt_trimmed(sub: &clap::ArgMatches, id: &str) -> Option<String> {
    sub.get_one::<String>(id).map(|s| s.trim().to_string())
}

fn required_id(sub: &clap::ArgMatches) -> Result<i64> {
    sub.get_one::<i64>("id").copied().context("--id is required")
}

/// Validates form input, applies platform commission and stores the record.
pub fn add_record(
    conn: &mut Connection,
    config: &Config,
    kind: RecordKind,
    category: &str,
    gross: &str,
    at: Option<&str>,
    description: Option<&str>,
) -> Result<Record> {
    let gross = parse_decimal(gross)?;
    let timestamp = match at.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => parse_timestamp(s)?,
        None => Local::now().naive_local(),
    };
    let adjusted = apply_commission(
        kind,
        category.trim(),
        gross,
        description.unwrap_or("").trim(),
        &config.currency_symbol,
    )?;
    let new = NewRecord {
        kind,
        timestamp,
        category: category.to_string(),
        amount: adjusted.net_amount,
        description: Some(adjusted.description),
    };
    let record = store::insert_record(conn, &new)?;
    Ok(record)
}

fn add(conn: &mut Connection, config: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let kind = sub
        .get_one::<String>("kind")
        .context("--kind is required")?
        .parse::<RecordKind>()?;
    let category = sub.get_one::<String>("category").context("--category is required")?;
    let amount = sub.get_one::<String>("amount").context("--amount is required")?;
    let at = sub.get_one::<String>("at").map(String::as_str);
    let description = sub.get_one::<String>("description").map(String::as_str);

    let record = add_record(conn, config, kind, category, amount, at, description)
        .context("Could not create record")?;
    println!(
        "Record {} created: {} {} {:.2}",
        record.display_id, record.kind, record.category, record.amount
    );
    Ok(())
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = required_id(sub)?;
    let current = store::get_record(conn, id)?.ok_or(LedgerError::NotFound(id))?;

    let timestamp = match opt_trimmed(sub, "at") {
        Some(s) => parse_timestamp(&s)?,
        None => current.timestamp,
    };
    let amount = match opt_trimmed(sub, "amount") {
        Some(s) => parse_decimal(&s)?,
        None => current.amount,
    };
    let update = RecordUpdate {
        timestamp,
        category: opt_trimmed(sub, "category").unwrap_or(current.category),
        amount,
        description: opt_trimmed(sub, "description").or(current.description),
    };
    store::update_record(conn, id, &update).context("Could not update record")?;
    println!("Record {} updated", current.display_id);
    Ok(())
}

fn remove(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = required_id(sub)?;
    let display = store::get_record(conn, id)?.map(|r| r.display_id.to_string());
    store::delete_record(conn, id).context("Could not delete record")?;
    println!("Record {} deleted", display.unwrap_or_else(|| id.to_string()));
    Ok(())
}

fn show(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = required_id(sub)?;
    let record = store::get_record(conn, id)?.ok_or(LedgerError::NotFound(id))?;
    let view = RecordView::try_from(&record)?;
    let rows = vec![
        vec!["ID".into(), view.id.to_string()],
        vec!["Display ID".into(), view.display_id],
        vec!["Kind".into(), view.kind],
        vec!["When".into(), view.timestamp],
        vec!["Category".into(), view.category],
        vec!["Net".into(), view.net],
        vec!["Gross".into(), view.gross],
        vec!["Description".into(), view.description],
        vec!["Created".into(), view.created_at],
    ];
    println!("{}", pretty_table(&["Field", "Value"], rows));
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = list_views(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.display_id.clone(),
                    r.kind.clone(),
                    r.timestamp.clone(),
                    r.category.clone(),
                    r.net.clone(),
                    r.gross.clone(),
                    r.description.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["#", "ID", "Kind", "When", "Category", "Net", "Gross", "Description"],
                rows,
            )
        );
    }
    Ok(())
}

/// A stored record as shown to the driver, with the reconstructed gross.
#[derive(Debug, Clone, Serialize)]
pub struct RecordView {
    pub id: i64,
    pub display_id: String,
    pub kind: String,
    pub timestamp: String,
    pub category: String,
    pub net: String,
    pub gross: String,
    pub description: String,
    pub created_at: String,
}

impl TryFrom<&Record> for RecordView {
    type Error = LedgerError;

    fn try_from(r: &Record) -> Result<Self, Self::Error> {
        let gross = gross_from_net(r.kind, &r.category, r.amount)?;
        Ok(Self {
            id: r.id,
            display_id: r.display_id.to_string(),
            kind: r.kind.to_string(),
            timestamp: format_timestamp(&r.timestamp),
            category: r.category.clone(),
            net: format!("{:.2}", r.amount),
            gross: format!("{:.2}", gross),
            description: r.description.clone().unwrap_or_default(),
            created_at: r
                .created_at
                .map(|c| format_timestamp(&c))
                .unwrap_or_default(),
        })
    }
}

pub fn query_views(conn: &Connection, range: &DateRange) -> Result<Vec<RecordView>> {
    let records = store::query_by_date_range(conn, range)?;
    let views = records
        .iter()
        .map(RecordView::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(views)
}

/// Rows for `record list`: today unless bounds or `--all` are given.
pub fn list_views(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<RecordView>> {
    let range = range_from_args(sub)?;
    query_views(conn, &range)
}
