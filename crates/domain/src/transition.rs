// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The fee state machine.
//!
//! ```text
//! PENDING ──► PARTIALLY_PAID ──► PAID
//!    │              │
//!    ├──────────────┴──────────► WAIVED
//!    └─────────────────────────► PAID
//! ```
//!
//! `PAID` and `WAIVED` are settled: no further transition is accepted.
//! `PARTIALLY_PAID` may be updated again, either with a new partial total
//! or to one of the settled states. A new partial total never goes below
//! the amount already recorded as paid.

use crate::error::DomainError;
use crate::fee::{FeeRecord, NewFee, PaymentUpdate};
use crate::fee_status::FeeStatus;
use crate::types::{FeeType, Student};
use rust_decimal::Decimal;
use time::{Date, OffsetDateTime};

/// The terms of a fee, independent of who owes it.
///
/// Bulk creation applies one set of terms to every student in a cohort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeTerms {
    pub amount: Decimal,
    pub due_date: Date,
    pub fee_type: FeeType,
    pub academic_year: String,
    pub description: Option<String>,
}

/// The largest amount a single fee may carry.
pub const MAX_FEE_AMOUNT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Fee amounts are whole currency units with at most this many decimals.
pub const MAX_AMOUNT_SCALE: u32 = 2;

/// Validates fee terms that do not depend on the student.
///
/// # Errors
///
/// Returns an error if:
/// - The amount is zero or negative
/// - The amount exceeds [`MAX_FEE_AMOUNT`] or has more than
///   [`MAX_AMOUNT_SCALE`] decimal places
/// - The academic year tag is empty
pub fn validate_fee_terms(terms: &FeeTerms) -> Result<(), DomainError> {
    if terms.amount <= Decimal::ZERO {
        return Err(DomainError::InvalidAmount {
            amount: Some(terms.amount),
            reason: String::from("fee amount must be greater than zero"),
        });
    }

    if terms.amount > MAX_FEE_AMOUNT {
        return Err(DomainError::InvalidAmount {
            amount: Some(terms.amount),
            reason: format!("fee amount must not exceed {MAX_FEE_AMOUNT}"),
        });
    }

    if terms.amount.normalize().scale() > MAX_AMOUNT_SCALE {
        return Err(DomainError::InvalidAmount {
            amount: Some(terms.amount),
            reason: format!("fee amount allows at most {MAX_AMOUNT_SCALE} decimal places"),
        });
    }

    if terms.academic_year.trim().is_empty() {
        return Err(DomainError::InvalidAcademicYear(String::from(
            "Academic year cannot be empty",
        )));
    }

    Ok(())
}

/// Builds a new `PENDING` fee for `student` under `terms`.
///
/// The caller is responsible for having resolved the student and checked
/// that the actor may bill them.
///
/// # Errors
///
/// Returns an error if the terms are invalid or the student record is
/// incomplete.
pub fn create_fee(
    student: &Student,
    terms: &FeeTerms,
    actor_id: i64,
    now: OffsetDateTime,
) -> Result<NewFee, DomainError> {
    validate_fee_terms(terms)?;
    student.validate_billable()?;

    Ok(NewFee {
        student_id: student.student_id,
        amount: terms.amount,
        due_date: terms.due_date,
        fee_type: terms.fee_type,
        academic_year: terms.academic_year.trim().to_string(),
        description: terms
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(ToString::to_string),
        created_by: actor_id,
        created_at: now,
    })
}

/// Applies a payment update to a fee, returning the new record.
///
/// The input record is not modified; the caller persists the result.
///
/// # Errors
///
/// Returns an error if:
/// - The fee is already `PAID` or `WAIVED` (`AlreadySettled`)
/// - The requested status is not `PAID`, `PARTIALLY_PAID` or `WAIVED`
///   (`InvalidTransition`)
/// - `PAID` is requested without a payment mode
/// - `PARTIALLY_PAID` is requested without an amount, with an amount
///   outside `0 < amount_paid < amount`, or with less than the amount
///   already paid (`InvalidAmount`)
pub fn apply_payment(
    record: &FeeRecord,
    update: &PaymentUpdate,
    now: OffsetDateTime,
) -> Result<FeeRecord, DomainError> {
    if record.status.is_settled() {
        return Err(DomainError::AlreadySettled {
            fee_id: record.fee_id,
            status: record.status,
        });
    }

    let target: PaymentTarget = match update.status.parse::<FeeStatus>() {
        Ok(FeeStatus::Paid) => PaymentTarget::Paid,
        Ok(FeeStatus::PartiallyPaid) => PaymentTarget::PartiallyPaid,
        Ok(FeeStatus::Waived) => PaymentTarget::Waived,
        _ => {
            return Err(DomainError::InvalidTransition {
                from: record.status,
                requested: update.status.clone(),
            });
        }
    };

    let mut next: FeeRecord = record.clone();

    match target {
        PaymentTarget::Paid => {
            let mode = update.payment_mode.ok_or(DomainError::MissingPaymentMode)?;
            next.amount_paid = record.amount;
            next.payment_mode = Some(mode);
            next.paid_at = record.paid_at.or(Some(now));
            next.status = FeeStatus::Paid;
        }
        PaymentTarget::PartiallyPaid => {
            let paid: Decimal = validate_partial_amount(record, update.amount_paid)?;
            next.amount_paid = paid;
            if update.payment_mode.is_some() {
                next.payment_mode = update.payment_mode;
            }
            next.paid_at = record.paid_at.or(Some(now));
            next.status = FeeStatus::PartiallyPaid;
        }
        // Waiving forgives the remainder; nothing is claimed as paid.
        PaymentTarget::Waived => {
            next.status = FeeStatus::Waived;
        }
    }

    if let Some(remarks) = &update.remarks {
        next.remarks = Some(remarks.clone());
    }
    next.marked_by = Some(update.actor_id);
    next.updated_at = now;

    Ok(next)
}

/// Statuses a payment update may move a fee into.
#[derive(Debug, Clone, Copy)]
enum PaymentTarget {
    Paid,
    PartiallyPaid,
    Waived,
}

fn validate_partial_amount(
    record: &FeeRecord,
    amount_paid: Option<Decimal>,
) -> Result<Decimal, DomainError> {
    let Some(paid) = amount_paid else {
        return Err(DomainError::InvalidAmount {
            amount: None,
            reason: String::from("amount_paid is required for a partial payment"),
        });
    };

    if paid <= Decimal::ZERO {
        return Err(DomainError::InvalidAmount {
            amount: Some(paid),
            reason: String::from("partial payment must be greater than zero"),
        });
    }

    if paid < record.amount_paid {
        return Err(DomainError::InvalidAmount {
            amount: Some(paid),
            reason: format!(
                "partial payment total cannot drop below the {} already paid",
                record.amount_paid
            ),
        });
    }

    if paid >= record.amount {
        return Err(DomainError::InvalidAmount {
            amount: Some(paid),
            reason: format!(
                "partial payment must be less than the fee amount {}; record a full payment as PAID",
                record.amount
            ),
        });
    }

    Ok(paid)
}
