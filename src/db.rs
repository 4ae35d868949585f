// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Config;
use anyhow::{Context, Result};
use rusqlite::Connection;
use std::fs;

pub fn open_or_init(config: &Config) -> Result<Connection> {
    let path = &config.db_path;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let mut conn =
        Connection::open(path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&mut conn)?;
    tracing::debug!(path = %path.display(), "ledger database ready");
    Ok(conn)
}

pub fn open_in_memory() -> Result<Connection> {
    let mut conn = Connection::open_in_memory()?;
    init_schema(&mut conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &mut Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS records(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        display_id TEXT NOT NULL UNIQUE,
        kind TEXT NOT NULL CHECK(kind IN ('income','expense')),
        occurred_at TEXT NOT NULL,
        category TEXT NOT NULL,
        amount TEXT NOT NULL, -- net, after commission
        description TEXT,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    CREATE INDEX IF NOT EXISTS idx_records_occurred_at ON records(occurred_at);

    -- last issued display id sequence per prefix; survives deletes
    CREATE TABLE IF NOT EXISTS display_id_counters(
        prefix TEXT PRIMARY KEY,
        last_value INTEGER NOT NULL
    );
    "#,
    )
    .context("Failed to initialise schema")?;
    Ok(())
}
