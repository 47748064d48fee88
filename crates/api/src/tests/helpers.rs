// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use fee_ledger_persistence::{NewStudentData, Persistence};
use rust_decimal::Decimal;
use time::macros::{date, datetime};
use time::{Date, OffsetDateTime};

use crate::{
    AuthenticatedActor, BulkCreateFeesRequest, CreateFeeRequest, FeeInfo, IdentityService,
    MarkFeePaidRequest, create_fee,
};

/// Two departments with one batch each, three students, and one actor per
/// role. The department head runs CS; the faculty member teaches an ME
/// batch.
pub struct Fixture {
    pub persistence: Persistence,
    pub admin: AuthenticatedActor,
    pub cs_hod: AuthenticatedActor,
    pub me_faculty: AuthenticatedActor,
    pub cs_department: i64,
    pub me_department: i64,
    pub cs_batch: i64,
    pub me_batch: i64,
    pub cs_student: i64,
    pub cs_student_2: i64,
    pub me_student: i64,
}

impl Fixture {
    /// Creates a tuition fee as the administrator.
    pub fn admin_fee(&mut self, student_id: i64, amount: Decimal) -> FeeInfo {
        create_fee(
            &mut self.persistence,
            &self.admin,
            &create_request(student_id, amount),
            test_now(),
        )
        .expect("Admin can create any fee")
    }

    /// Adds an active student to a batch.
    pub fn add_student(
        &mut self,
        name: &str,
        roll: &str,
        department_id: Option<i64>,
        batch_id: i64,
    ) -> i64 {
        self.persistence
            .create_student(&NewStudentData {
                name: String::from(name),
                roll_number: String::from(roll),
                department_id,
                batch_id: Some(batch_id),
                is_active: true,
            })
            .unwrap()
    }
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

    let admin = IdentityService::resolve_actor(&mut persistence, admin_id).unwrap();
    let cs_hod = IdentityService::resolve_actor(&mut persistence, hod_id).unwrap();
    let me_faculty = IdentityService::resolve_actor(&mut persistence, faculty_id).unwrap();

    let mut fixture = Fixture {
        persistence,
        admin,
        cs_hod,
        me_faculty,
        cs_department,
        me_department,
        cs_batch,
        me_batch,
        cs_student: 0,
        cs_student_2: 0,
        me_student: 0,
    };
    fixture.cs_student = fixture.add_student("Asha Rao", "CS-001", Some(cs_department), cs_batch);
    fixture.cs_student_2 =
        fixture.add_student("Vikram Iyer", "CS-002", Some(cs_department), cs_batch);
    fixture.me_student = fixture.add_student("Meera Nair", "ME-001", Some(me_department), me_batch);
    fixture
}

pub fn create_request(student_id: i64, amount: Decimal) -> CreateFeeRequest {
    CreateFeeRequest {
        student_id,
        amount,
        due_date: String::from("2024-08-31"),
        fee_type: String::from("TUITION"),
        academic_year: String::from("2024-25"),
        description: Some(String::from("Semester 1 tuition")),
    }
}

pub fn bulk_request(department_id: Option<i64>, batch_id: Option<i64>) -> BulkCreateFeesRequest {
    BulkCreateFeesRequest {
        department_id,
        batch_id,
        amount: Decimal::from(5000),
        due_date: String::from("2024-09-15"),
        fee_type: String::from("HOSTEL"),
        academic_year: String::from("2024-25"),
        description: None,
    }
}

pub fn mark_request(
    status: &str,
    amount_paid: Option<Decimal>,
    payment_mode: Option<&str>,
) -> MarkFeePaidRequest {
    MarkFeePaidRequest {
        status: String::from(status),
        amount_paid,
        payment_mode: payment_mode.map(String::from),
        remarks: None,
    }
}
