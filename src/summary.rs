// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{LedgerError, LedgerResult};
use crate::models::{DateRange, RecordKind, TIMESTAMP_FORMAT};
use crate::store::conversion_err;
use chrono::NaiveDateTime;
use rusqlite::Connection;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Summary {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_income: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_expense: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub net: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub hours_worked: Decimal,
}

/// Span between the first and last income timestamps, in hours to one
/// decimal, halves rounded up. Fewer than two entries, or an unreadable
/// timestamp, yields zero.
pub fn hours_worked<S: AsRef<str>>(timestamps_asc: &[S]) -> Decimal {
    let (first, last) = match (timestamps_asc.first(), timestamps_asc.last()) {
        (Some(f), Some(l)) if timestamps_asc.len() >= 2 => (f.as_ref(), l.as_ref()),
        _ => return Decimal::ZERO,
    };
    let parsed = NaiveDateTime::parse_from_str(first, TIMESTAMP_FORMAT).and_then(|f| {
        NaiveDateTime::parse_from_str(last, TIMESTAMP_FORMAT).map(|l| (f, l))
    });
    match parsed {
        Ok((f, l)) => {
            let secs = (l - f).num_seconds();
            (Decimal::from(secs) / Decimal::from(3600))
                .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
        }
        Err(err) => {
            tracing::warn!(first, last, %err, "unreadable timestamp, hours worked set to 0");
            Decimal::ZERO
        }
    }
}

fn total_for(conn: &Connection, kind: RecordKind, range: &DateRange) -> LedgerResult<Decimal> {
    let (filter, mut params_vec) = range.sql_filter("occurred_at");
    let sql = format!("SELECT amount FROM records WHERE kind=? AND {}", filter);
    params_vec.insert(0, kind.as_str().to_string());

    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(rusqlite::params_from_iter(params_vec.iter()))?;
    let mut total = Decimal::ZERO;
    while let Some(r) = rows.next()? {
        let raw: String = r.get(0)?;
        let amount = raw.parse::<Decimal>().map_err(|_| {
            conversion_err(
                0,
                LedgerError::validation(format!("invalid stored amount '{}'", raw)),
            )
        })?;
        total = total.checked_add(amount).ok_or_else(|| {
            LedgerError::validation(format!("{} total is out of range", kind))
        })?;
    }
    Ok(total)
}

fn income_timestamps(conn: &Connection, range: &DateRange) -> LedgerResult<Vec<String>> {
    let (filter, params_vec) = range.sql_filter("occurred_at");
    let sql = format!(
        "SELECT occurred_at FROM records WHERE kind='income' AND {} ORDER BY occurred_at ASC",
        filter
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(rusqlite::params_from_iter(params_vec.iter()), |r| {
        r.get::<_, String>(0)
    })?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

/// Income, expense, net and hours worked for the records inside `range`.
pub fn summarize(conn: &Connection, range: &DateRange) -> LedgerResult<Summary> {
    let total_income = total_for(conn, RecordKind::Income, range)?;
    let total_expense = total_for(conn, RecordKind::Expense, range)?;
    let timestamps = income_timestamps(conn, range)?;
    let hours = hours_worked(timestamps.as_slice());
    let net = total_income
        .checked_sub(total_expense)
        .ok_or_else(|| LedgerError::validation("net total is out of range"))?;
    Ok(Summary {
        total_income,
        total_expense,
        net,
        hours_worked: hours,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn single_entry_has_no_span() {
        assert_eq!(hours_worked(&["2024-01-01 08:00:00"]), Decimal::ZERO);
        assert_eq!(hours_worked::<&str>(&[]), Decimal::ZERO);
    }

    #[test]
    fn span_uses_first_and_last() {
        let ts = ["2024-01-01 08:00:00", "2024-01-01 12:00:00", "2024-01-01 17:30:00"];
        assert_eq!(hours_worked(&ts), dec!(9.5));
    }

    #[test]
    fn span_rounds_to_one_decimal() {
        // 1h 10m = 1.1666..
        let ts = ["2024-03-02 22:00:00", "2024-03-02 23:10:00"];
        assert_eq!(hours_worked(&ts), dec!(1.2));
    }

    #[test]
    fn span_rounds_halves_up() {
        // 3 minutes = 0.05h, 9 minutes = 0.15h
        let three = ["2024-03-02 10:00:00", "2024-03-02 10:03:00"];
        let nine = ["2024-03-02 10:00:00", "2024-03-02 10:09:00"];
        assert_eq!(hours_worked(&three), dec!(0.1));
        assert_eq!(hours_worked(&nine), dec!(0.2));
    }

    #[test]
    fn unreadable_timestamp_degrades_to_zero() {
        let ts = ["2024-01-01 08:00:00", "yesterday-ish"];
        assert_eq!(hours_worked(&ts), Decimal::ZERO);
    }

    #[test]
    fn summary_serializes_as_numbers() {
        let s = Summary {
            total_income: dec!(120.5),
            total_expense: dec!(20),
            net: dec!(100.5),
            hours_worked: dec!(9.5),
        };
        let v = serde_json::to_value(s).unwrap();
        assert_eq!(v["net"], serde_json::json!(100.5));
        assert_eq!(v["hours_worked"], serde_json::json!(9.5));
    }
}
