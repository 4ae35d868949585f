// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::LedgerResult;
use crate::models::{DisplayId, RecordKind};
use rusqlite::{Connection, OptionalExtension, params};

/// Numeric maximum of the suffixes already used by `kind`, or 0.
pub fn max_display_id_suffix(conn: &Connection, kind: RecordKind) -> LedgerResult<i64> {
    let max: Option<i64> = conn.query_row(
        "SELECT MAX(CAST(substr(display_id, 4) AS INTEGER)) FROM records WHERE display_id LIKE ?1",
        params![format!("{}-%", kind.prefix())],
        |r| r.get(0),
    )?;
    Ok(max.unwrap_or(0))
}

/// Reserves the next display id for `kind`. Call inside the transaction that
/// inserts the record so the reservation and the row commit together.
pub fn next_display_id(conn: &Connection, kind: RecordKind) -> LedgerResult<DisplayId> {
    let counter: Option<i64> = conn
        .query_row(
            "SELECT last_value FROM display_id_counters WHERE prefix=?1",
            params![kind.prefix()],
            |r| r.get(0),
        )
        .optional()?;
    let floor = max_display_id_suffix(conn, kind)?;
    let next = counter.unwrap_or(0).max(floor) + 1;
    conn.execute(
        "INSERT INTO display_id_counters(prefix, last_value) VALUES (?1, ?2)
         ON CONFLICT(prefix) DO UPDATE SET last_value=excluded.last_value",
        params![kind.prefix(), next],
    )?;
    Ok(DisplayId::new(kind, next))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    #[test]
    fn numeric_max_beats_lexicographic_order() {
        let conn = db::open_in_memory().unwrap();
        for did in ["GA-999", "GA-1000", "GA-001"] {
            conn.execute(
                "INSERT INTO records(display_id, kind, occurred_at, category, amount) VALUES (?1,'income','2024-01-01 00:00:00','Uber','1')",
                params![did],
            )
            .unwrap();
        }
        assert_eq!(max_display_id_suffix(&conn, RecordKind::Income).unwrap(), 1000);
        assert_eq!(max_display_id_suffix(&conn, RecordKind::Expense).unwrap(), 0);
        assert_eq!(
            next_display_id(&conn, RecordKind::Income).unwrap().to_string(),
            "GA-1001"
        );
    }

    #[test]
    fn counter_only_moves_forward() {
        let conn = db::open_in_memory().unwrap();
        let a = next_display_id(&conn, RecordKind::Expense).unwrap();
        let b = next_display_id(&conn, RecordKind::Expense).unwrap();
        let c = next_display_id(&conn, RecordKind::Income).unwrap();
        assert_eq!(a.to_string(), "GO-001");
        assert_eq!(b.to_string(), "GO-002");
        assert_eq!(c.to_string(), "GA-001");
    }
}
