//! Registration number formatting for reports.
//!
//! Every report is identified by a human-readable case number of the form
//! `NNN-DPMDPPA-<roman month>-<year>`, e.g. `001-DPMDPPA-III-2025`. The
//! sequence segment restarts each calendar month and runs from `001` to
//! `999`; the agency code is fixed.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::{AppError, AppResult};

/// Agency code embedded in every registration number.
pub const AGENCY_CODE: &str = "DPMDPPA";

/// Highest sequence number available within one period.
pub const MAX_SEQUENCE: u16 = 999;

const ROMAN_MONTHS: [&str; 12] = [
    "I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX", "X", "XI", "XII",
];

/// Render a calendar month (1-12) as an uppercase Roman numeral.
///
/// Returns `None` for out-of-range months; a registration number must never
/// carry an empty month segment.
#[must_use]
pub fn roman_month(month: u32) -> Option<&'static str> {
    if (1..=12).contains(&month) {
        Some(ROMAN_MONTHS[(month - 1) as usize])
    } else {
        None
    }
}

/// A validated (month, year) registration period.
///
/// Construction rejects out-of-range input so a malformed identifier can
/// never be produced downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegistrationPeriod {
    month: u32,
    year: i32,
}

impl RegistrationPeriod {
    /// Create a period from a calendar month (1-12) and a 4-digit year.
    pub fn new(month: u32, year: i32) -> AppResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(AppError::Validation(format!(
                "Month must be between 1 and 12, got {month}"
            )));
        }
        if !(1000..=9999).contains(&year) {
            return Err(AppError::Validation(format!(
                "Year must be 4 digits, got {year}"
            )));
        }
        Ok(Self { month, year })
    }

    /// The period a timestamp falls into.
    pub fn for_date(date: &DateTime<Utc>) -> AppResult<Self> {
        Self::new(date.month(), date.year())
    }

    /// Calendar month, 1-12.
    #[must_use]
    pub const fn month(&self) -> u32 {
        self.month
    }

    /// 4-digit year.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// The month as a Roman numeral.
    #[must_use]
    pub fn month_roman(&self) -> &'static str {
        // Construction guarantees the month is in range.
        ROMAN_MONTHS[(self.month - 1) as usize]
    }

    /// `<roman month>-<year>` label, used in logs and error messages.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}-{}", self.month_roman(), self.year)
    }

    /// The full registration number for a sequence slot in this period.
    #[must_use]
    pub fn registration_number(&self, seq: u16) -> String {
        format!("{seq:03}-{AGENCY_CODE}-{}-{}", self.month_roman(), self.year)
    }
}
