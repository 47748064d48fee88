// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Roster inserts.
//!
//! Used to seed a standalone deployment and by tests. Editing the roster
//! is otherwise the administration system's job.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::backend::PersistenceBackend;
use crate::data_models::NewStudentData;
use crate::diesel_schema::{batches, departments, students, subject_assignments, users};
use crate::error::PersistenceError;

/// Creates a department and returns its id.
///
/// # Errors
///
/// Returns an error if the insert fails (for example a duplicate code).
pub fn create_department(
    conn: &mut SqliteConnection,
    department_code: &str,
    department_name: &str,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(departments::table)
        .values((
            departments::department_code.eq(department_code),
            departments::department_name.eq(department_name),
        ))
        .execute(conn)?;

    let department_id: i64 = conn.get_last_insert_rowid()?;
    debug!(department_id, department_code, "Department created");
    Ok(department_id)
}

/// Creates a batch within a department and returns its id.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_batch(
    conn: &mut SqliteConnection,
    department_id: i64,
    batch_name: &str,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(batches::table)
        .values((
            batches::department_id.eq(department_id),
            batches::batch_name.eq(batch_name),
        ))
        .execute(conn)?;

    let batch_id: i64 = conn.get_last_insert_rowid()?;
    debug!(batch_id, department_id, "Batch created");
    Ok(batch_id)
}

/// Creates a student and returns its id.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_student(
    conn: &mut SqliteConnection,
    student: &NewStudentData,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(students::table)
        .values((
            students::name.eq(&student.name),
            students::roll_number.eq(&student.roll_number),
            students::department_id.eq(student.department_id),
            students::batch_id.eq(student.batch_id),
            students::is_active.eq(i32::from(student.is_active)),
        ))
        .execute(conn)?;

    let student_id: i64 = conn.get_last_insert_rowid()?;
    debug!(student_id, "Student created");
    Ok(student_id)
}

/// Creates a user and returns its id.
///
/// # Errors
///
/// Returns an error if the insert fails (for example an unknown role or a
/// duplicate login name).
pub fn create_user(
    conn: &mut SqliteConnection,
    login_name: &str,
    display_name: &str,
    role: &str,
    department_id: Option<i64>,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(users::table)
        .values((
            users::login_name.eq(login_name),
            users::display_name.eq(display_name),
            users::role.eq(role),
            users::department_id.eq(department_id),
        ))
        .execute(conn)?;

    let user_id: i64 = conn.get_last_insert_rowid()?;
    debug!(user_id, login_name, role, "User created");
    Ok(user_id)
}

/// Records that a faculty member teaches a subject to a batch.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn assign_subject(
    conn: &mut SqliteConnection,
    subject_code: &str,
    subject_name: &str,
    batch_id: i64,
    faculty_user_id: i64,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(subject_assignments::table)
        .values((
            subject_assignments::subject_code.eq(subject_code),
            subject_assignments::subject_name.eq(subject_name),
            subject_assignments::batch_id.eq(batch_id),
            subject_assignments::faculty_user_id.eq(faculty_user_id),
        ))
        .execute(conn)?;

    let assignment_id: i64 = conn.get_last_insert_rowid()?;
    debug!(assignment_id, batch_id, faculty_user_id, "Subject assigned");
    Ok(assignment_id)
}
