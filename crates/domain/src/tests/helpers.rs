// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{FeeRecord, FeeStatus, FeeTerms, FeeType, PaymentMode, PaymentUpdate, Student};
use rust_decimal::Decimal;
use time::macros::{date, datetime};
use time::{Date, OffsetDateTime};

pub const ADMIN_ID: i64 = 1;

pub fn test_now() -> OffsetDateTime {
    datetime!(2024-07-15 10:30:00 UTC)
}

pub fn test_today() -> Date {
    date!(2024 - 07 - 15)
}

pub fn create_test_student() -> Student {
    Student {
        student_id: 42,
        name: String::from("Asha Rao"),
        roll_number: String::from("CS-2024-042"),
        department_id: Some(3),
        batch_id: Some(7),
        is_active: true,
    }
}

pub fn create_test_terms(amount: Decimal) -> FeeTerms {
    FeeTerms {
        amount,
        due_date: date!(2024 - 08 - 31),
        fee_type: FeeType::Tuition,
        academic_year: String::from("2024-25"),
        description: Some(String::from("Semester 1 tuition")),
    }
}

pub fn create_test_fee(amount: Decimal) -> FeeRecord {
    create_test_fee_with(1, amount, FeeStatus::Pending, Decimal::ZERO)
}

pub fn create_test_fee_with(
    fee_id: i64,
    amount: Decimal,
    status: FeeStatus,
    amount_paid: Decimal,
) -> FeeRecord {
    let created: OffsetDateTime = datetime!(2024-06-01 09:00:00 UTC);
    FeeRecord {
        fee_id,
        student_id: 42,
        amount,
        amount_paid,
        due_date: date!(2024 - 08 - 31),
        status,
        fee_type: FeeType::Tuition,
        academic_year: String::from("2024-25"),
        description: None,
        payment_mode: None,
        paid_at: None,
        remarks: None,
        marked_by: None,
        created_by: ADMIN_ID,
        created_at: created,
        updated_at: created,
    }
}

pub fn payment(status: &str, amount_paid: Option<Decimal>, mode: Option<PaymentMode>) -> PaymentUpdate {
    PaymentUpdate {
        status: String::from(status),
        amount_paid,
        payment_mode: mode,
        remarks: None,
        actor_id: ADMIN_ID,
    }
}
