// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod roster_tests;

use crate::{NewStudentData, Persistence};
use fee_ledger_domain::{FeeRecord, FeeType, NewFee};
use rust_decimal::Decimal;
use time::macros::{date, datetime};
use time::{Date, OffsetDateTime};

/// A small college: two departments, one batch each, three students,
/// and one user per role.
pub struct Fixture {
    pub persistence: Persistence,
    pub admin_id: i64,
    pub hod_id: i64,
    pub faculty_id: i64,
    pub cs_department: i64,
    pub me_department: i64,
    pub cs_batch: i64,
    pub me_batch: i64,
    pub cs_student: i64,
    pub cs_student_2: i64,
    pub me_student: i64,
}

pub fn test_now() -> OffsetDateTime {
    datetime!(2024-07-15 10:30:00 UTC)
}

pub fn test_today() -> Date {
    date!(2024 - 07 - 15)
}

pub fn create_fixture() -> Fixture {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let cs_department = persistence
        .create_department("CS", "Computer Science")
        .unwrap();
    let me_department = persistence
        .create_department("ME", "Mechanical Engineering")
        .unwrap();
    let cs_batch = persistence.create_batch(cs_department, "CS 2024").unwrap();
    let me_batch = persistence.create_batch(me_department, "ME 2024").unwrap();

    let cs_student = persistence
        .create_student(&new_student("Asha Rao", "CS-001", cs_department, cs_batch))
        .unwrap();
    let cs_student_2 = persistence
        .create_student(&new_student("Vikram Iyer", "CS-002", cs_department, cs_batch))
        .unwrap();
    let me_student = persistence
        .create_student(&new_student("Meera Nair", "ME-001", me_department, me_batch))
        .unwrap();

    let admin_id = persistence
        .create_user("admin", "Registrar", "ADMINISTRATOR", None)
        .unwrap();
    let hod_id = persistence
        .create_user("cs-hod", "CS Head", "DEPARTMENT_HEAD", Some(cs_department))
        .unwrap();
    let faculty_id = persistence
        .create_user("me-faculty", "ME Lecturer", "FACULTY", Some(me_department))
        .unwrap();
    persistence
        .assign_subject("ME101", "Thermodynamics", me_batch, faculty_id)
        .unwrap();

    Fixture {
        persistence,
        admin_id,
        hod_id,
        faculty_id,
        cs_department,
        me_department,
        cs_batch,
        me_batch,
        cs_student,
        cs_student_2,
        me_student,
    }
}

pub fn new_student(name: &str, roll: &str, department_id: i64, batch_id: i64) -> NewStudentData {
    NewStudentData {
        name: String::from(name),
        roll_number: String::from(roll),
        department_id: Some(department_id),
        batch_id: Some(batch_id),
        is_active: true,
    }
}

pub fn new_fee(student_id: i64, amount: Decimal, due_date: Date, created_by: i64) -> NewFee {
    NewFee {
        student_id,
        amount,
        due_date,
        fee_type: FeeType::Tuition,
        academic_year: String::from("2024-25"),
        description: None,
        created_by,
        created_at: test_now(),
    }
}

impl Fixture {
    /// Inserts a pending tuition fee due at the end of August.
    pub fn insert_fee(&mut self, student_id: i64, amount: Decimal) -> FeeRecord {
        let fee = new_fee(student_id, amount, date!(2024 - 08 - 31), self.admin_id);
        self.persistence.create_fee(&fee).unwrap()
    }
}
