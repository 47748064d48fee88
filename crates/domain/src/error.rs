// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::fee_status::FeeStatus;
use rust_decimal::Decimal;

/// Errors that can occur during fee validation and state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A fee amount or a paid amount violates the monetary rules.
    InvalidAmount {
        /// The offending amount, when one was supplied.
        amount: Option<Decimal>,
        /// Why the amount was rejected.
        reason: String,
    },
    /// The requested payment status is not a permitted transition target.
    InvalidTransition {
        /// The status the record is currently in.
        from: FeeStatus,
        /// The requested target, as supplied by the caller.
        requested: String,
    },
    /// The fee is already `PAID` or `WAIVED` and cannot change again.
    AlreadySettled {
        /// The fee identifier.
        fee_id: i64,
        /// The settled status.
        status: FeeStatus,
    },
    /// A `PAID` transition was requested without a payment mode.
    MissingPaymentMode,
    /// The student does not exist.
    UnknownStudent(i64),
    /// The student exists but its record lacks data required for billing.
    IncompleteStudent {
        /// The student identifier.
        student_id: i64,
        /// What is missing.
        reason: String,
    },
    /// Fee type string is not recognised.
    InvalidFeeType(String),
    /// Payment mode string is not recognised.
    InvalidPaymentMode(String),
    /// Fee status string is not recognised.
    InvalidFeeStatus(String),
    /// Academic year tag is empty.
    InvalidAcademicYear(String),
    /// Failed to parse a date from its string form.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidAmount { amount, reason } => match amount {
                Some(value) => write!(f, "Invalid amount {value}: {reason}"),
                None => write!(f, "Invalid amount: {reason}"),
            },
            Self::InvalidTransition { from, requested } => {
                write!(
                    f,
                    "Cannot transition fee from {from} to '{requested}': target must be PAID, PARTIALLY_PAID or WAIVED"
                )
            }
            Self::AlreadySettled { fee_id, status } => {
                write!(f, "Fee {fee_id} is already settled as {status}")
            }
            Self::MissingPaymentMode => {
                write!(f, "A payment mode is required to mark a fee as PAID")
            }
            Self::UnknownStudent(student_id) => write!(f, "Student {student_id} not found"),
            Self::IncompleteStudent { student_id, reason } => {
                write!(f, "Student {student_id} cannot be billed: {reason}")
            }
            Self::InvalidFeeType(value) => write!(f, "Invalid fee type: '{value}'"),
            Self::InvalidPaymentMode(value) => write!(f, "Invalid payment mode: '{value}'"),
            Self::InvalidFeeStatus(value) => write!(f, "Invalid fee status: '{value}'"),
            Self::InvalidAcademicYear(msg) => write!(f, "Invalid academic year: {msg}"),
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
