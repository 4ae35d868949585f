// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{LedgerError, LedgerResult};
use crate::ids::next_display_id;
use crate::models::{
    DateRange, DisplayId, NewRecord, Record, RecordKind, RecordUpdate, format_timestamp,
    parse_timestamp, validate_fields,
};
use chrono::NaiveDateTime;
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, TransactionBehavior, params};
use rust_decimal::Decimal;

pub use crate::ids::max_display_id_suffix;

const RECORD_COLUMNS: &str =
    "id, display_id, kind, occurred_at, category, amount, description, created_at";

pub(crate) fn conversion_err(idx: usize, err: LedgerError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err))
}

fn record_from_row(r: &Row<'_>) -> rusqlite::Result<Record> {
    let display_raw: String = r.get(1)?;
    let kind_raw: String = r.get(2)?;
    let occurred_raw: String = r.get(3)?;
    let amount_raw: String = r.get(5)?;

    let display_id = display_raw
        .parse::<DisplayId>()
        .map_err(|e| conversion_err(1, e))?;
    let kind = kind_raw
        .parse::<RecordKind>()
        .map_err(|e| conversion_err(2, e))?;
    let timestamp = parse_timestamp(&occurred_raw).map_err(|e| conversion_err(3, e))?;
    let amount = amount_raw.parse::<Decimal>().map_err(|_| {
        conversion_err(
            5,
            LedgerError::validation(format!("invalid stored amount '{}'", amount_raw)),
        )
    })?;

    Ok(Record {
        id: r.get(0)?,
        display_id,
        kind,
        timestamp,
        category: r.get(4)?,
        amount,
        description: r.get(6)?,
        created_at: r.get::<_, Option<NaiveDateTime>>(7)?,
    })
}

fn clean_description(d: &Option<String>) -> Option<String> {
    d.as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Inserts a record, assigning its id and display id in one write transaction.
pub fn insert_record(conn: &mut Connection, new: &NewRecord) -> LedgerResult<Record> {
    validate_fields(&new.category, new.amount)?;

    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let display_id = next_display_id(&tx, new.kind)?;
    tx.execute(
        "INSERT INTO records(display_id, kind, occurred_at, category, amount, description)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            display_id.to_string(),
            new.kind.as_str(),
            format_timestamp(&new.timestamp),
            new.category.trim(),
            new.amount.to_string(),
            clean_description(&new.description),
        ],
    )?;
    let id = tx.last_insert_rowid();
    let record = get_record(&tx, id)?.ok_or(LedgerError::NotFound(id))?;
    tx.commit()?;

    tracing::debug!(id, display_id = %record.display_id, "record inserted");
    Ok(record)
}

pub fn get_record(conn: &Connection, id: i64) -> LedgerResult<Option<Record>> {
    let sql = format!("SELECT {} FROM records WHERE id=?1", RECORD_COLUMNS);
    let rec = conn
        .query_row(&sql, params![id], record_from_row)
        .optional()?;
    Ok(rec)
}

pub fn update_record(conn: &Connection, id: i64, upd: &RecordUpdate) -> LedgerResult<()> {
    validate_fields(&upd.category, upd.amount)?;

    let changed = conn.execute(
        "UPDATE records SET occurred_at=?1, category=?2, amount=?3, description=?4 WHERE id=?5",
        params![
            format_timestamp(&upd.timestamp),
            upd.category.trim(),
            upd.amount.to_string(),
            clean_description(&upd.description),
            id
        ],
    )?;
    if changed == 0 {
        return Err(LedgerError::NotFound(id));
    }
    tracing::debug!(id, "record updated");
    Ok(())
}

/// Hard delete. The display id counter is left alone, so the suffix is
/// never handed out again.
pub fn delete_record(conn: &Connection, id: i64) -> LedgerResult<()> {
    let changed = conn.execute("DELETE FROM records WHERE id=?1", params![id])?;
    if changed == 0 {
        return Err(LedgerError::NotFound(id));
    }
    tracing::debug!(id, "record deleted");
    Ok(())
}

/// Records whose date falls inside `range`, newest first.
pub fn query_by_date_range(conn: &Connection, range: &DateRange) -> LedgerResult<Vec<Record>> {
    let (filter, params_vec) = range.sql_filter("occurred_at");
    let sql = format!(
        "SELECT {} FROM records WHERE {} ORDER BY occurred_at DESC, id DESC",
        RECORD_COLUMNS, filter
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(rusqlite::params_from_iter(params_vec.iter()), record_from_row)?;

    let mut data = Vec::new();
    for row in rows {
        data.push(row?);
    }
    Ok(data)
}
