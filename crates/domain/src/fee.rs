// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::fee_status::FeeStatus;
use crate::types::{FeeType, PaymentMode};
use rust_decimal::Decimal;
use time::{Date, OffsetDateTime};

/// One monetary obligation owed by one student for one purpose in one
/// academic year.
///
/// `student_id`, `amount` and `due_date` never change after creation.
/// Only the payment fields move, and only through
/// [`apply_payment`](crate::apply_payment).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeRecord {
    pub fee_id: i64,
    pub student_id: i64,
    pub amount: Decimal,
    pub amount_paid: Decimal,
    pub due_date: Date,
    pub status: FeeStatus,
    pub fee_type: FeeType,
    pub academic_year: String,
    pub description: Option<String>,
    pub payment_mode: Option<PaymentMode>,
    pub paid_at: Option<OffsetDateTime>,
    pub remarks: Option<String>,
    pub marked_by: Option<i64>,
    pub created_by: i64,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl FeeRecord {
    /// Returns the status a reader should see on `today`.
    #[must_use]
    pub fn effective_status(&self, today: Date) -> FeeStatus {
        self.status.effective(self.due_date, today)
    }

    /// Returns the part of the amount not yet collected.
    #[must_use]
    pub fn outstanding(&self) -> Decimal {
        self.amount - self.amount_paid
    }
}

/// A fee that has been validated but not yet persisted.
///
/// Always starts `PENDING` with nothing paid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFee {
    pub student_id: i64,
    pub amount: Decimal,
    pub due_date: Date,
    pub fee_type: FeeType,
    pub academic_year: String,
    pub description: Option<String>,
    pub created_by: i64,
    pub created_at: OffsetDateTime,
}

impl NewFee {
    /// Status every new fee is created with.
    pub const INITIAL_STATUS: FeeStatus = FeeStatus::Pending;

    /// Amount paid every new fee is created with.
    pub const INITIAL_AMOUNT_PAID: Decimal = Decimal::ZERO;
}

/// A requested payment-status change for one fee.
///
/// `status` is kept as the caller's raw text so that an unrecognised value
/// is reported as an invalid transition rather than a parse failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentUpdate {
    pub status: String,
    pub amount_paid: Option<Decimal>,
    pub payment_mode: Option<PaymentMode>,
    pub remarks: Option<String>,
    pub actor_id: i64,
}
