// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Fee ledger writes.
//!
//! Each function is a single atomic write. Payment updates read, apply
//! and write inside one immediate transaction so `amount_paid` and
//! `status` can never be observed half-updated.

use diesel::SqliteConnection;
use diesel::prelude::*;
use fee_ledger_domain::{FeeRecord, NewFee, format_date};
use time::format_description::well_known::Rfc3339;
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::diesel_schema::fees;
use crate::error::PersistenceError;
use crate::queries::fees::FeeRow;

/// Inserts a new fee and returns the stored record.
///
/// # Errors
///
/// Returns an error if the insert fails, for example because the student
/// or creating user does not exist.
pub fn create_fee(
    conn: &mut SqliteConnection,
    new_fee: &NewFee,
) -> Result<FeeRecord, PersistenceError> {
    let created_at: String = new_fee.created_at.format(&Rfc3339)?;

    diesel::insert_into(fees::table)
        .values((
            fees::student_id.eq(new_fee.student_id),
            fees::amount.eq(new_fee.amount.to_string()),
            fees::amount_paid.eq(NewFee::INITIAL_AMOUNT_PAID.to_string()),
            fees::due_date.eq(format_date(new_fee.due_date)),
            fees::status.eq(NewFee::INITIAL_STATUS.as_str()),
            fees::fee_type.eq(new_fee.fee_type.as_str()),
            fees::academic_year.eq(&new_fee.academic_year),
            fees::description.eq(new_fee.description.as_deref()),
            fees::created_by.eq(new_fee.created_by),
            fees::created_at.eq(&created_at),
            fees::updated_at.eq(&created_at),
        ))
        .execute(conn)?;

    let fee_id: i64 = conn.get_last_insert_rowid()?;

    info!(
        fee_id,
        student_id = new_fee.student_id,
        actor_id = new_fee.created_by,
        "Fee created"
    );

    Ok(FeeRecord {
        fee_id,
        student_id: new_fee.student_id,
        amount: new_fee.amount,
        amount_paid: NewFee::INITIAL_AMOUNT_PAID,
        due_date: new_fee.due_date,
        status: NewFee::INITIAL_STATUS,
        fee_type: new_fee.fee_type,
        academic_year: new_fee.academic_year.clone(),
        description: new_fee.description.clone(),
        payment_mode: None,
        paid_at: None,
        remarks: None,
        marked_by: None,
        created_by: new_fee.created_by,
        created_at: new_fee.created_at,
        updated_at: new_fee.created_at,
    })
}

/// Reads a fee, computes its next state with `apply` and writes it back,
/// all in one transaction.
///
/// The outer `Result` is the storage outcome; the inner one is whatever
/// `apply` decided. When `apply` rejects the change nothing is written.
///
/// # Errors
///
/// Returns `PersistenceError::FeeNotFound` if the fee does not exist, or
/// another error if the row is malformed or the database fails.
pub fn modify_fee<E, F>(
    conn: &mut SqliteConnection,
    fee_id: i64,
    apply: F,
) -> Result<Result<FeeRecord, E>, PersistenceError>
where
    F: FnOnce(&FeeRecord) -> Result<FeeRecord, E>,
{
    conn.immediate_transaction(|conn| {
        let row: Option<FeeRow> = fees::table
            .find(fee_id)
            .select(FeeRow::as_select())
            .first(conn)
            .optional()?;
        let current: FeeRecord = row
            .ok_or(PersistenceError::FeeNotFound(fee_id))?
            .into_record()?;

        let next: FeeRecord = match apply(&current) {
            Ok(next) => next,
            Err(rejection) => {
                debug!(fee_id, "Fee update rejected; nothing written");
                return Ok(Err(rejection));
            }
        };

        let paid_at: Option<String> = next.paid_at.map(|t| t.format(&Rfc3339)).transpose()?;
        let updated_at: String = next.updated_at.format(&Rfc3339)?;

        diesel::update(fees::table.find(fee_id))
            .set((
                fees::amount_paid.eq(next.amount_paid.to_string()),
                fees::status.eq(next.status.as_str()),
                fees::payment_mode.eq(next.payment_mode.map(|mode| mode.as_str())),
                fees::paid_at.eq(paid_at),
                fees::remarks.eq(next.remarks.as_deref()),
                fees::marked_by.eq(next.marked_by),
                fees::updated_at.eq(updated_at),
            ))
            .execute(conn)?;

        info!(
            fee_id,
            status = next.status.as_str(),
            actor_id = next.marked_by,
            "Fee payment status updated"
        );

        Ok(Ok(next))
    })
}

/// Hard-deletes a fee.
///
/// # Errors
///
/// Returns `PersistenceError::FeeNotFound` if no fee has this id.
pub fn delete_fee(conn: &mut SqliteConnection, fee_id: i64) -> Result<(), PersistenceError> {
    let deleted: usize = diesel::delete(fees::table.find(fee_id)).execute(conn)?;

    if deleted == 0 {
        return Err(PersistenceError::FeeNotFound(fee_id));
    }

    info!(fee_id, "Fee deleted");
    Ok(())
}
