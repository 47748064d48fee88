// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Fee Ledger.
//!
//! This crate is the Fee Record Store: a thin Diesel + `SQLite` boundary
//! holding fees and the slice of the college roster (departments,
//! batches, students, users, teaching assignments) needed to scope them.
//! No business rule lives here. State changes are computed by the domain
//! crate and written through [`Persistence::modify_fee`].
//!
//! ## Testing
//!
//! Every call to [`Persistence::new_in_memory`] opens its own isolated
//! shared-cache in-memory database with migrations applied, so tests
//! never see each other's rows.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use fee_ledger_domain::{FeeFilter, FeeRecord, FeeScope, NewFee, Pagination, Student};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::Date;

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::{BatchData, FeePage, FeeWithStudent, NewStudentData, UserData};
pub use error::PersistenceError;

use backend::PersistenceBackend;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// The Fee Record Store.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a store backed by a fresh in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        // Unique shared in-memory database per call so tests are isolated.
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_test_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;

        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Creates a store backed by a database file, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not valid UTF-8 or the database
    /// cannot be initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;

        backend::sqlite::enable_wal_mode(&mut conn)?;

        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is still active.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign keys are not enforced.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        self.conn.verify_foreign_key_enforcement()
    }

    // ------------------------------------------------------------------
    // Fees
    // ------------------------------------------------------------------

    /// Inserts a new fee.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_fee(&mut self, new_fee: &NewFee) -> Result<FeeRecord, PersistenceError> {
        mutations::fees::create_fee(&mut self.conn, new_fee)
    }

    /// Retrieves one fee with its student.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row is malformed.
    pub fn get_fee(&mut self, fee_id: i64) -> Result<Option<FeeWithStudent>, PersistenceError> {
        queries::fees::get_fee(&mut self.conn, fee_id)
    }

    /// Lists one page of fees visible under `scope`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_fees(
        &mut self,
        scope: &FeeScope,
        filter: &FeeFilter,
        pagination: Pagination,
        today: Date,
    ) -> Result<FeePage, PersistenceError> {
        queries::fees::list_fees(&mut self.conn, scope, filter, pagination, today)
    }

    /// Loads every fee visible under `scope` and matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn collect_fees(
        &mut self,
        scope: &FeeScope,
        filter: &FeeFilter,
        today: Date,
    ) -> Result<Vec<FeeRecord>, PersistenceError> {
        queries::fees::collect_fees(&mut self.conn, scope, filter, today)
    }

    /// Atomically reads, transforms and writes back one fee.
    ///
    /// # Errors
    ///
    /// Returns an error if the fee does not exist or storage fails. A
    /// rejection from `apply` is returned as the inner `Err`.
    pub fn modify_fee<E, F>(
        &mut self,
        fee_id: i64,
        apply: F,
    ) -> Result<Result<FeeRecord, E>, PersistenceError>
    where
        F: FnOnce(&FeeRecord) -> Result<FeeRecord, E>,
    {
        mutations::fees::modify_fee(&mut self.conn, fee_id, apply)
    }

    /// Hard-deletes a fee.
    ///
    /// # Errors
    ///
    /// Returns an error if the fee does not exist or storage fails.
    pub fn delete_fee(&mut self, fee_id: i64) -> Result<(), PersistenceError> {
        mutations::fees::delete_fee(&mut self.conn, fee_id)
    }

    // ------------------------------------------------------------------
    // Roster
    // ------------------------------------------------------------------

    /// Retrieves a student by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_student(&mut self, student_id: i64) -> Result<Option<Student>, PersistenceError> {
        queries::roster::get_student(&mut self.conn, student_id)
    }

    /// Lists active students enrolled in a batch.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_active_students_in_batch(
        &mut self,
        batch_id: i64,
    ) -> Result<Vec<Student>, PersistenceError> {
        queries::roster::list_active_students_in_batch(&mut self.conn, batch_id)
    }

    /// Lists active students in a department.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_active_students_in_department(
        &mut self,
        department_id: i64,
    ) -> Result<Vec<Student>, PersistenceError> {
        queries::roster::list_active_students_in_department(&mut self.conn, department_id)
    }

    /// Retrieves a batch by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_batch(&mut self, batch_id: i64) -> Result<Option<BatchData>, PersistenceError> {
        queries::roster::get_batch(&mut self.conn, batch_id)
    }

    /// Retrieves a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_user(&mut self, user_id: i64) -> Result<Option<UserData>, PersistenceError> {
        queries::roster::get_user(&mut self.conn, user_id)
    }

    /// Lists the batches a faculty member teaches.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_batch_ids_for_faculty(
        &mut self,
        faculty_user_id: i64,
    ) -> Result<Vec<i64>, PersistenceError> {
        queries::roster::list_batch_ids_for_faculty(&mut self.conn, faculty_user_id)
    }

    /// Creates a department.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_department(
        &mut self,
        department_code: &str,
        department_name: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::roster::create_department(&mut self.conn, department_code, department_name)
    }

    /// Creates a batch.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_batch(
        &mut self,
        department_id: i64,
        batch_name: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::roster::create_batch(&mut self.conn, department_id, batch_name)
    }

    /// Creates a student.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_student(&mut self, student: &NewStudentData) -> Result<i64, PersistenceError> {
        mutations::roster::create_student(&mut self.conn, student)
    }

    /// Creates a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_user(
        &mut self,
        login_name: &str,
        display_name: &str,
        role: &str,
        department_id: Option<i64>,
    ) -> Result<i64, PersistenceError> {
        mutations::roster::create_user(
            &mut self.conn,
            login_name,
            display_name,
            role,
            department_id,
        )
    }

    /// Records a teaching assignment.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn assign_subject(
        &mut self,
        subject_code: &str,
        subject_name: &str,
        batch_id: i64,
        faculty_user_id: i64,
    ) -> Result<i64, PersistenceError> {
        mutations::roster::assign_subject(
            &mut self.conn,
            subject_code,
            subject_name,
            batch_id,
            faculty_user_id,
        )
    }
}
