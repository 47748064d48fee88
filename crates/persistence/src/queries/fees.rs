// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Fee ledger reads.
//!
//! Every listing is built from a [`FeeScope`] and a [`FeeFilter`]; the
//! scope is applied as a student sub-select so no row outside it can
//! reach the caller. Rows that fail to decode are logged and skipped so
//! one bad record never fails a whole page.

use diesel::SqliteConnection;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use fee_ledger_domain::{
    FeeFilter, FeeRecord, FeeScope, FeeStatus, FeeType, Pagination, PaymentMode, Student,
    format_date, parse_date,
};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::str::FromStr;
use time::format_description::well_known::Rfc3339;
use time::{Date, OffsetDateTime};
use tracing::{debug, warn};

use crate::data_models::{FeePage, FeeWithStudent};
use crate::diesel_schema::{fees, students};
use crate::error::PersistenceError;
use crate::queries::roster::{get_student, get_students};

/// Diesel Queryable struct for fee rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = fees)]
pub(crate) struct FeeRow {
    fee_id: i64,
    student_id: i64,
    amount: String,
    amount_paid: String,
    due_date: String,
    status: String,
    fee_type: String,
    academic_year: String,
    description: Option<String>,
    payment_mode: Option<String>,
    paid_at: Option<String>,
    remarks: Option<String>,
    marked_by: Option<i64>,
    created_by: i64,
    created_at: String,
    updated_at: String,
}

fn malformed(fee_id: i64, reason: impl std::fmt::Display) -> PersistenceError {
    PersistenceError::MalformedRow {
        table: "fees",
        id: fee_id,
        reason: reason.to_string(),
    }
}

pub(crate) fn parse_timestamp(fee_id: i64, value: &str) -> Result<OffsetDateTime, PersistenceError> {
    OffsetDateTime::parse(value, &Rfc3339).map_err(|e| malformed(fee_id, e))
}

impl FeeRow {
    /// Decodes the stored text columns into a domain record.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::MalformedRow` if any column fails to decode
    /// or the amounts break `0 <= amount_paid <= amount`.
    pub(crate) fn into_record(self) -> Result<FeeRecord, PersistenceError> {
        let fee_id: i64 = self.fee_id;

        let amount: Decimal = Decimal::from_str(&self.amount).map_err(|e| malformed(fee_id, e))?;
        let amount_paid: Decimal =
            Decimal::from_str(&self.amount_paid).map_err(|e| malformed(fee_id, e))?;
        if amount <= Decimal::ZERO || amount_paid < Decimal::ZERO || amount_paid > amount {
            return Err(malformed(
                fee_id,
                format!("amount_paid {amount_paid} is outside 0..={amount}"),
            ));
        }

        let payment_mode: Option<PaymentMode> = self
            .payment_mode
            .as_deref()
            .map(PaymentMode::from_str)
            .transpose()
            .map_err(|e| malformed(fee_id, e))?;
        let paid_at: Option<OffsetDateTime> = self
            .paid_at
            .as_deref()
            .map(|value| parse_timestamp(fee_id, value))
            .transpose()?;

        Ok(FeeRecord {
            fee_id,
            student_id: self.student_id,
            amount,
            amount_paid,
            due_date: parse_date(&self.due_date).map_err(|e| malformed(fee_id, e))?,
            status: FeeStatus::from_str(&self.status).map_err(|e| malformed(fee_id, e))?,
            fee_type: FeeType::from_str(&self.fee_type).map_err(|e| malformed(fee_id, e))?,
            academic_year: self.academic_year,
            description: self.description,
            payment_mode,
            paid_at,
            remarks: self.remarks,
            marked_by: self.marked_by,
            created_by: self.created_by,
            created_at: parse_timestamp(fee_id, &self.created_at)?,
            updated_at: parse_timestamp(fee_id, &self.updated_at)?,
        })
    }
}

/// Builds the boxed fee query for a scope and filter.
///
/// Called once for the count and once for the page so both see the same
/// predicate.
fn scoped_fee_query<'a>(
    scope: &FeeScope,
    filter: &FeeFilter,
    today: Date,
) -> fees::BoxedQuery<'a, Sqlite> {
    let mut query = fees::table.into_boxed();

    match scope {
        FeeScope::Unrestricted => {}
        FeeScope::Department(department_id) => {
            query = query.filter(
                fees::student_id.eq_any(
                    students::table
                        .filter(students::department_id.eq(*department_id))
                        .select(students::student_id),
                ),
            );
        }
        FeeScope::Batches(batch_ids) => {
            query = query.filter(
                fees::student_id.eq_any(
                    students::table
                        .filter(students::batch_id.eq_any(batch_ids.clone()))
                        .select(students::student_id),
                ),
            );
        }
    }

    if let Some(search) = filter
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        let pattern: String = format!("%{}%", escape_like(search));
        query = query.filter(
            fees::student_id.eq_any(
                students::table
                    .filter(
                        students::name
                            .like(pattern.clone())
                            .escape('\\')
                            .or(students::roll_number.like(pattern).escape('\\')),
                    )
                    .select(students::student_id),
            ),
        );
    }

    match filter.status {
        None => {}
        // Overdue is derived: stored PENDING past its due date, plus any
        // legacy rows that were stored as OVERDUE.
        Some(FeeStatus::Overdue) => {
            query = query.filter(
                fees::status.eq(FeeStatus::Overdue.as_str()).or(fees::status
                    .eq(FeeStatus::Pending.as_str())
                    .and(fees::due_date.lt(format_date(today)))),
            );
        }
        Some(status) => {
            query = query.filter(fees::status.eq(status.as_str()));
        }
    }

    if let Some(fee_type) = filter.fee_type {
        query = query.filter(fees::fee_type.eq(fee_type.as_str()));
    }

    if let Some(department_id) = filter.department_id {
        query = query.filter(
            fees::student_id.eq_any(
                students::table
                    .filter(students::department_id.eq(department_id))
                    .select(students::student_id),
            ),
        );
    }

    if let Some(batch_id) = filter.batch_id {
        query = query.filter(
            fees::student_id.eq_any(
                students::table
                    .filter(students::batch_id.eq(batch_id))
                    .select(students::student_id),
            ),
        );
    }

    if let Some(academic_year) = filter
        .academic_year
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        query = query.filter(fees::academic_year.eq(academic_year.to_string()));
    }

    query
}

fn escape_like(value: &str) -> String {
    let mut escaped: String = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Decodes fee rows, dropping the ones that cannot be decoded.
fn decode_rows(rows: Vec<FeeRow>) -> Vec<FeeRecord> {
    rows.into_iter()
        .filter_map(|row| match row.into_record() {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(error = %e, "Skipping malformed fee row");
                None
            }
        })
        .collect()
}

/// Lists one page of fees visible under `scope` and matching `filter`.
///
/// Rows are ordered newest first. `total_count` counts every matching row,
/// including any that are later skipped as malformed.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_fees(
    conn: &mut SqliteConnection,
    scope: &FeeScope,
    filter: &FeeFilter,
    pagination: Pagination,
    today: Date,
) -> Result<FeePage, PersistenceError> {
    let total_count: i64 = scoped_fee_query(scope, filter, today)
        .count()
        .get_result(conn)?;

    let rows: Vec<FeeRow> = scoped_fee_query(scope, filter, today)
        .order((fees::created_at.desc(), fees::fee_id.desc()))
        .limit(i64::from(pagination.limit()))
        .offset(pagination.offset())
        .select(FeeRow::as_select())
        .load(conn)?;

    let records: Vec<FeeRecord> = decode_rows(rows);

    let mut student_ids: Vec<i64> = records.iter().map(|fee| fee.student_id).collect();
    student_ids.sort_unstable();
    student_ids.dedup();
    let students_by_id: HashMap<i64, Student> = get_students(conn, &student_ids)?
        .into_iter()
        .map(|student| (student.student_id, student))
        .collect();

    let rows: Vec<FeeWithStudent> = records
        .into_iter()
        .filter_map(|fee| match students_by_id.get(&fee.student_id) {
            Some(student) => Some(FeeWithStudent {
                student: student.clone(),
                fee,
            }),
            None => {
                warn!(
                    fee_id = fee.fee_id,
                    student_id = fee.student_id,
                    "Skipping fee whose student is missing"
                );
                None
            }
        })
        .collect();

    debug!(
        total_count,
        returned = rows.len(),
        page = pagination.page(),
        "Listed fees"
    );

    Ok(FeePage { rows, total_count })
}

/// Loads every decodable fee visible under `scope` and matching `filter`.
///
/// Used for statistics, which must see the whole filtered set.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn collect_fees(
    conn: &mut SqliteConnection,
    scope: &FeeScope,
    filter: &FeeFilter,
    today: Date,
) -> Result<Vec<FeeRecord>, PersistenceError> {
    let rows: Vec<FeeRow> = scoped_fee_query(scope, filter, today)
        .order(fees::fee_id.asc())
        .select(FeeRow::as_select())
        .load(conn)?;

    Ok(decode_rows(rows))
}

/// Retrieves one fee and its student.
///
/// # Errors
///
/// Returns an error if the database query fails or the stored row is
/// malformed.
/// Returns `Ok(None)` if the fee is not found.
pub fn get_fee(
    conn: &mut SqliteConnection,
    fee_id: i64,
) -> Result<Option<FeeWithStudent>, PersistenceError> {
    let row: Option<FeeRow> = fees::table
        .find(fee_id)
        .select(FeeRow::as_select())
        .first(conn)
        .optional()?;

    let Some(row) = row else {
        return Ok(None);
    };

    let fee: FeeRecord = row.into_record()?;
    let student: Student = get_student(conn, fee.student_id)?.ok_or_else(|| {
        PersistenceError::NotFound(format!("Student {} for fee {fee_id}", fee.student_id))
    })?;

    Ok(Some(FeeWithStudent { fee, student }))
}
