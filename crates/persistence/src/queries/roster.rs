// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Roster lookups: students, batches, users and teaching assignments.
//!
//! The roster is maintained by the surrounding administration system.
//! The fee ledger only reads it to resolve actors, scopes and cohorts.

use diesel::SqliteConnection;
use diesel::prelude::*;
use fee_ledger_domain::Student;
use tracing::debug;

use crate::data_models::{BatchData, UserData};
use crate::diesel_schema::{batches, students, subject_assignments, users};
use crate::error::PersistenceError;

/// Diesel Queryable struct for student rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = students)]
struct StudentRow {
    student_id: i64,
    name: String,
    roll_number: String,
    department_id: Option<i64>,
    batch_id: Option<i64>,
    is_active: i32,
}

impl StudentRow {
    fn into_student(self) -> Student {
        Student {
            student_id: self.student_id,
            name: self.name,
            roll_number: self.roll_number,
            department_id: self.department_id,
            batch_id: self.batch_id,
            is_active: self.is_active != 0,
        }
    }
}

/// Diesel Queryable struct for user rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = users)]
struct UserRow {
    user_id: i64,
    login_name: String,
    display_name: String,
    role: String,
    department_id: Option<i64>,
}

/// Retrieves a student by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the student is not found.
pub fn get_student(
    conn: &mut SqliteConnection,
    student_id: i64,
) -> Result<Option<Student>, PersistenceError> {
    let row: Option<StudentRow> = students::table
        .find(student_id)
        .select(StudentRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(StudentRow::into_student))
}

/// Retrieves several students by ID. Unknown ids are ignored.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_students(
    conn: &mut SqliteConnection,
    student_ids: &[i64],
) -> Result<Vec<Student>, PersistenceError> {
    let rows: Vec<StudentRow> = students::table
        .filter(students::student_id.eq_any(student_ids.to_vec()))
        .select(StudentRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(StudentRow::into_student).collect())
}

/// Lists the active students enrolled in a batch, ordered by roll number.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_active_students_in_batch(
    conn: &mut SqliteConnection,
    batch_id: i64,
) -> Result<Vec<Student>, PersistenceError> {
    debug!(batch_id, "Resolving active students in batch");

    let rows: Vec<StudentRow> = students::table
        .filter(students::batch_id.eq(batch_id))
        .filter(students::is_active.ne(0))
        .order((students::roll_number.asc(), students::student_id.asc()))
        .select(StudentRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(StudentRow::into_student).collect())
}

/// Lists the active students in a department, ordered by roll number.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_active_students_in_department(
    conn: &mut SqliteConnection,
    department_id: i64,
) -> Result<Vec<Student>, PersistenceError> {
    debug!(department_id, "Resolving active students in department");

    let rows: Vec<StudentRow> = students::table
        .filter(students::department_id.eq(department_id))
        .filter(students::is_active.ne(0))
        .order((students::roll_number.asc(), students::student_id.asc()))
        .select(StudentRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(StudentRow::into_student).collect())
}

/// Retrieves a batch by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the batch is not found.
pub fn get_batch(
    conn: &mut SqliteConnection,
    batch_id: i64,
) -> Result<Option<BatchData>, PersistenceError> {
    let row: Option<(i64, i64, String)> = batches::table
        .find(batch_id)
        .select((
            batches::batch_id,
            batches::department_id,
            batches::batch_name,
        ))
        .first(conn)
        .optional()?;

    Ok(row.map(|(batch_id, department_id, batch_name)| BatchData {
        batch_id,
        department_id,
        batch_name,
    }))
}

/// Retrieves a user by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the user is not found.
pub fn get_user(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<Option<UserData>, PersistenceError> {
    debug!(user_id, "Looking up user");

    let result: Result<UserRow, diesel::result::Error> = users::table
        .filter(users::user_id.eq(user_id))
        .select(UserRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(UserData {
            user_id: row.user_id,
            login_name: row.login_name,
            display_name: row.display_name,
            role: row.role,
            department_id: row.department_id,
        })),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists the distinct batches a faculty member teaches at least one subject in.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_batch_ids_for_faculty(
    conn: &mut SqliteConnection,
    faculty_user_id: i64,
) -> Result<Vec<i64>, PersistenceError> {
    let batch_ids: Vec<i64> = subject_assignments::table
        .filter(subject_assignments::faculty_user_id.eq(faculty_user_id))
        .select(subject_assignments::batch_id)
        .distinct()
        .order(subject_assignments::batch_id.asc())
        .load(conn)?;

    Ok(batch_ids)
}
