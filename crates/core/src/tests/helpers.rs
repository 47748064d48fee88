// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::BulkFeeCommand;
use fee_ledger_domain::{FeeTerms, FeeType, Student};
use rust_decimal_macros::dec;
use time::OffsetDateTime;
use time::macros::{date, datetime};

pub fn test_now() -> OffsetDateTime {
    datetime!(2024-07-15 10:30:00 UTC)
}

pub fn create_test_student(student_id: i64) -> Student {
    Student {
        student_id,
        name: format!("Student {student_id}"),
        roll_number: format!("CS-{student_id:03}"),
        department_id: Some(3),
        batch_id: Some(7),
        is_active: true,
    }
}

/// Five students in batch 7; the third has no department and cannot be billed.
pub fn create_test_population() -> Vec<Student> {
    let mut population: Vec<Student> = (1..=5).map(create_test_student).collect();
    population[2].department_id = None;
    population
}

pub fn create_test_command() -> BulkFeeCommand {
    BulkFeeCommand {
        department_id: None,
        batch_id: Some(7),
        terms: FeeTerms {
            amount: dec!(1500),
            due_date: date!(2024 - 09 - 30),
            fee_type: FeeType::Exam,
            academic_year: String::from("2024-25"),
            description: None,
        },
        actor_id: 1,
    }
}
