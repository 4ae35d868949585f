// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{LedgerError, LedgerResult};
use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Storage format for record timestamps. Lexical order equals time order.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const INPUT_TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

static DISPLAY_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(GA|GO)-(\d+)$").expect("display id regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Income,
    Expense,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Income => "income",
            RecordKind::Expense => "expense",
        }
    }

    pub fn prefix(&self) -> &'static str {
        match self {
            RecordKind::Income => "GA",
            RecordKind::Expense => "GO",
        }
    }

    fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "GA" => Some(RecordKind::Income),
            "GO" => Some(RecordKind::Expense),
            _ => None,
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(RecordKind::Income),
            "expense" => Ok(RecordKind::Expense),
            other => Err(LedgerError::validation(format!(
                "unknown record kind '{}', expected income|expense",
                other
            ))),
        }
    }
}

/// Human-facing identifier such as `GA-007`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DisplayId {
    pub kind: RecordKind,
    pub seq: i64,
}

impl DisplayId {
    pub fn new(kind: RecordKind, seq: i64) -> Self {
        Self { kind, seq }
    }
}

impl fmt::Display for DisplayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:03}", self.kind.prefix(), self.seq)
    }
}

impl FromStr for DisplayId {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || LedgerError::validation(format!("invalid display id '{}'", s));
        let caps = DISPLAY_ID_RE.captures(s.trim()).ok_or_else(invalid)?;
        let kind = RecordKind::from_prefix(&caps[1]).ok_or_else(invalid)?;
        let seq = caps[2].parse::<i64>().map_err(|_| invalid())?;
        Ok(Self { kind, seq })
    }
}

impl Serialize for DisplayId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Record {
    pub id: i64,
    pub display_id: DisplayId,
    pub kind: RecordKind,
    pub timestamp: NaiveDateTime,
    pub category: String,
    pub amount: Decimal, // net
    pub description: Option<String>,
    pub created_at: Option<NaiveDateTime>,
}

/// Input for an insert. `amount` is already net.
#[derive(Debug, Clone)]
pub struct NewRecord {
    pub kind: RecordKind,
    pub timestamp: NaiveDateTime,
    pub category: String,
    pub amount: Decimal,
    pub description: Option<String>,
}

/// Editable fields of a stored record; kind and display id are fixed.
#[derive(Debug, Clone)]
pub struct RecordUpdate {
    pub timestamp: NaiveDateTime,
    pub category: String,
    pub amount: Decimal,
    pub description: Option<String>,
}

/// Inclusive date bounds; `None` leaves that side open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    pub fn all() -> Self {
        Self::default()
    }

    pub fn day(date: NaiveDate) -> Self {
        Self::new(Some(date), Some(date))
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.is_none_or(|s| date >= s) && self.end.is_none_or(|e| date <= e)
    }

    /// SQL predicate over the date part of `column`, plus its bound parameters.
    pub fn sql_filter(&self, column: &str) -> (String, Vec<String>) {
        match (self.start, self.end) {
            (Some(s), Some(e)) => (
                format!("date({}) BETWEEN ? AND ?", column),
                vec![s.to_string(), e.to_string()],
            ),
            (Some(s), None) => (format!("date({}) >= ?", column), vec![s.to_string()]),
            (None, Some(e)) => (format!("date({}) <= ?", column), vec![e.to_string()]),
            (None, None) => ("1=1".to_string(), Vec::new()),
        }
    }
}

pub fn parse_timestamp(s: &str) -> LedgerResult<NaiveDateTime> {
    let s = s.trim();
    INPUT_TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .ok_or_else(|| {
            LedgerError::validation(format!(
                "invalid timestamp '{}', expected YYYY-MM-DD HH:MM[:SS]",
                s
            ))
        })
}

pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Largest amount a single record may carry. Keeps sums and gross
/// reconstruction well inside `Decimal`'s range.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0); // 1e15

/// Checks the parts of a record every mutation shares.
pub fn validate_fields(category: &str, amount: Decimal) -> LedgerResult<()> {
    if category.trim().is_empty() {
        return Err(LedgerError::validation("category must not be empty"));
    }
    if amount <= Decimal::ZERO {
        return Err(LedgerError::validation(format!(
            "amount must be positive, got {}",
            amount
        )));
    }
    if amount > MAX_AMOUNT {
        return Err(LedgerError::validation(format!(
            "amount {} exceeds the limit of {}",
            amount, MAX_AMOUNT
        )));
    }
    Ok(())
}
