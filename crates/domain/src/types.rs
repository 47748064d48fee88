// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Date;
use time::macros::format_description;

/// Category of a fee. Informational only; it never affects state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeeType {
    Tuition,
    Exam,
    Library,
    Hostel,
    Transport,
    Lab,
    Miscellaneous,
}

impl FeeType {
    /// All fee types, in display order.
    pub const ALL: [Self; 7] = [
        Self::Tuition,
        Self::Exam,
        Self::Library,
        Self::Hostel,
        Self::Transport,
        Self::Lab,
        Self::Miscellaneous,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Tuition => "TUITION",
            Self::Exam => "EXAM",
            Self::Library => "LIBRARY",
            Self::Hostel => "HOSTEL",
            Self::Transport => "TRANSPORT",
            Self::Lab => "LAB",
            Self::Miscellaneous => "MISCELLANEOUS",
        }
    }
}

impl std::fmt::Display for FeeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FeeType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TUITION" => Ok(Self::Tuition),
            "EXAM" => Ok(Self::Exam),
            "LIBRARY" => Ok(Self::Library),
            "HOSTEL" => Ok(Self::Hostel),
            "TRANSPORT" => Ok(Self::Transport),
            "LAB" => Ok(Self::Lab),
            "MISCELLANEOUS" => Ok(Self::Miscellaneous),
            _ => Err(DomainError::InvalidFeeType(s.to_string())),
        }
    }
}

/// How a payment was made. Recorded only when a payment is recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMode {
    Cash,
    BankTransfer,
    Online,
    Cheque,
    Upi,
}

impl PaymentMode {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "CASH",
            Self::BankTransfer => "BANK_TRANSFER",
            Self::Online => "ONLINE",
            Self::Cheque => "CHEQUE",
            Self::Upi => "UPI",
        }
    }
}

impl std::fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PaymentMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CASH" => Ok(Self::Cash),
            "BANK_TRANSFER" => Ok(Self::BankTransfer),
            "ONLINE" => Ok(Self::Online),
            "CHEQUE" => Ok(Self::Cheque),
            "UPI" => Ok(Self::Upi),
            _ => Err(DomainError::InvalidPaymentMode(s.to_string())),
        }
    }
}

/// A student as seen by the fee subsystem.
///
/// The student roster itself is managed elsewhere; the fee ledger only
/// reads it to resolve cohorts and department scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub student_id: i64,
    pub name: String,
    pub roll_number: String,
    pub department_id: Option<i64>,
    pub batch_id: Option<i64>,
    pub is_active: bool,
}

impl Student {
    /// Checks that the record carries everything a fee needs.
    ///
    /// A student without a department cannot be scope-checked, so it cannot
    /// be billed.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::IncompleteStudent` naming the first missing field.
    pub fn validate_billable(&self) -> Result<(), DomainError> {
        if self.department_id.is_none() {
            return Err(DomainError::IncompleteStudent {
                student_id: self.student_id,
                reason: String::from("no department assigned"),
            });
        }
        if self.roll_number.trim().is_empty() {
            return Err(DomainError::IncompleteStudent {
                student_id: self.student_id,
                reason: String::from("roll number is empty"),
            });
        }
        if self.name.trim().is_empty() {
            return Err(DomainError::IncompleteStudent {
                student_id: self.student_id,
                reason: String::from("name is empty"),
            });
        }
        Ok(())
    }
}

/// Parses a calendar date in `YYYY-MM-DD` form.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the string is not a valid date.
pub fn parse_date(value: &str) -> Result<Date, DomainError> {
    Date::parse(value.trim(), format_description!("[year]-[month]-[day]")).map_err(|e| {
        DomainError::DateParseError {
            date_string: value.to_string(),
            error: e.to_string(),
        }
    })
}

/// Formats a calendar date as `YYYY-MM-DD`.
#[must_use]
pub fn format_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}
