// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Platform commission rules.
//!
//! Income is entered gross and stored net. InDriver keeps 10.95% of the fare,
//! Uber keeps 26.55% and Cabify keeps nothing. Every other category, and all
//! expenses, pass through untouched.

use crate::error::{LedgerError, LedgerResult};
use crate::models::RecordKind;
use rust_decimal::Decimal;

fn overflow(what: &str, amount: Decimal) -> LedgerError {
    LedgerError::validation(format!("{} of {} is out of range", what, amount))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    InDriver,
    Uber,
    Cabify,
}

impl Platform {
    pub fn from_category(category: &str) -> Option<Self> {
        match category {
            "InDriver" => Some(Platform::InDriver),
            "Uber" => Some(Platform::Uber),
            "Cabify" => Some(Platform::Cabify),
            _ => None,
        }
    }

    /// Fraction withheld by the platform.
    pub fn rate(&self) -> Decimal {
        match self {
            Platform::InDriver => Decimal::new(1095, 4),
            Platform::Uber => Decimal::new(2655, 4),
            Platform::Cabify => Decimal::ZERO,
        }
    }

    pub fn net_from_gross(&self, gross: Decimal) -> LedgerResult<Decimal> {
        gross
            .checked_mul(Decimal::ONE - self.rate())
            .ok_or_else(|| overflow("net", gross))
    }

    pub fn gross_from_net(&self, net: Decimal) -> LedgerResult<Decimal> {
        let keep = Decimal::ONE - self.rate();
        if keep == Decimal::ONE {
            return Ok(net);
        }
        net.checked_div(keep).ok_or_else(|| overflow("gross", net))
    }

    fn note(&self, gross: Decimal, currency: &str) -> String {
        let applied = if self.rate().is_zero() {
            "no commission".to_string()
        } else {
            format!("commission {}%", (self.rate() * Decimal::ONE_HUNDRED).normalize())
        };
        format!("| Gross: {}{:.2} ({})", currency, gross, applied)
    }
}

fn platform_for(kind: RecordKind, category: &str) -> Option<Platform> {
    match kind {
        RecordKind::Income => Platform::from_category(category),
        RecordKind::Expense => None,
    }
}

/// Amount and description to persist for a freshly entered record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Adjusted {
    pub net_amount: Decimal,
    pub description: String,
}

/// Turns the gross amount typed by the driver into the stored net amount and
/// tags the description with the gross and the rate that was applied.
pub fn apply_commission(
    kind: RecordKind,
    category: &str,
    gross: Decimal,
    description: &str,
    currency: &str,
) -> LedgerResult<Adjusted> {
    let adjusted = match platform_for(kind, category) {
        Some(p) => Adjusted {
            net_amount: p.net_from_gross(gross)?,
            description: format!("{} {}", description, p.note(gross, currency))
                .trim()
                .to_string(),
        },
        None => Adjusted {
            net_amount: gross,
            description: description.to_string(),
        },
    };
    Ok(adjusted)
}

/// Gross figure for reports. Never persisted.
pub fn gross_from_net(kind: RecordKind, category: &str, net: Decimal) -> LedgerResult<Decimal> {
    match platform_for(kind, category) {
        Some(p) => p.gross_from_net(net),
        None => Ok(net),
    }
}
