// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use std::fs;
use std::path::PathBuf;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Rideledger", "rideledger"));

pub const DB_ENV: &str = "RIDELEDGER_DB";
pub const CURRENCY_ENV: &str = "RIDELEDGER_CURRENCY";
pub const DEFAULT_CURRENCY: &str = "S/";

/// Runtime settings, resolved once at startup and handed to the store and
/// command handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
    pub currency_symbol: String,
}

impl Config {
    /// `--db` wins over `RIDELEDGER_DB`, which wins over the platform data dir.
    pub fn resolve(db_flag: Option<&str>) -> Result<Self> {
        let db_path = match db_flag.map(str::trim).filter(|s| !s.is_empty()) {
            Some(p) => PathBuf::from(p),
            None => match std::env::var(DB_ENV) {
                Ok(p) if !p.trim().is_empty() => PathBuf::from(p.trim()),
                _ => default_db_path()?,
            },
        };
        let currency_symbol = std::env::var(CURRENCY_ENV)
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());
        Ok(Self {
            db_path,
            currency_symbol,
        })
    }

    pub fn with_db_path(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            currency_symbol: DEFAULT_CURRENCY.to_string(),
        }
    }
}

pub fn default_db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("rideledger.sqlite"))
}
