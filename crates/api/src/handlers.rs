// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for fee reads and mutations.
//!
//! Every handler takes an already-resolved [`AuthenticatedActor`]. Reads
//! are narrowed by the actor's scope; writes check the role first and the
//! target's scope second.

use fee_ledger::{BulkFeeCommand, BulkReport, Cohort, generate_bulk_fees};
use fee_ledger_domain::{
    DomainError, FeeFilter, FeeRecord, FeeScope, FeeTerms, FeeType, PaymentMode, PaymentUpdate,
    Student, apply_payment, parse_date, summarize, summarize_by_fee_type,
};
use fee_ledger_persistence::{BatchData, FeePage, FeeWithStudent, Persistence};
use rust_decimal::Decimal;
use time::{Date, OffsetDateTime};
use tracing::{info, warn};

use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::capabilities::compute_fee_capabilities;
use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::filter::{parse_list_request, text};
use crate::request_response::{
    BulkCreateFeesRequest, BulkCreateFeesResponse, CreateFeeRequest, DeleteFeeResponse,
    FeeCapabilities, FeeInfo, FeeStatsRequest, FeeStatsResponse, ListFeesRequest,
    ListFeesResponse, MarkFeePaidRequest, PaginationInfo,
};
use crate::scope::{
    ensure_batch_in_scope, ensure_department_in_scope, ensure_student_in_scope, scope_for,
};

/// Lists fees visible to the actor, one page at a time.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `actor` - The authenticated actor
/// * `request` - Filter and pagination parameters
/// * `today` - The date used to derive `OVERDUE`
///
/// # Errors
///
/// Returns an error if:
/// - A parameter is invalid
/// - The actor has no usable scope
/// - The database query fails
pub fn list_fees(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: &ListFeesRequest,
    today: Date,
) -> Result<ListFeesResponse, ApiError> {
    let (filter, pagination) = parse_list_request(request)?;
    let scope: FeeScope = scope_for(persistence, actor)?;

    let page: FeePage = persistence
        .list_fees(&scope, &filter, pagination, today)
        .map_err(translate_persistence_error)?;

    let fees: Vec<FeeInfo> = page
        .rows
        .iter()
        .map(|row| FeeInfo::from_record(&row.fee, &row.student, today))
        .collect::<Result<_, _>>()?;

    Ok(ListFeesResponse {
        fees,
        pagination: PaginationInfo {
            page: pagination.page(),
            limit: pagination.limit(),
            total_pages: pagination.total_pages(page.total_count),
            total_count: page.total_count,
        },
    })
}

/// Retrieves one fee.
///
/// A fee outside the actor's scope reads as not found.
///
/// # Errors
///
/// Returns an error if the fee does not exist or is not visible to the actor.
pub fn get_fee(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    fee_id: i64,
    today: Date,
) -> Result<FeeInfo, ApiError> {
    let scope: FeeScope = scope_for(persistence, actor)?;
    let row: FeeWithStudent = load_fee(persistence, fee_id)?;

    if !scope.permits(&row.student) {
        warn!(
            user_id = actor.user_id,
            fee_id, "Read of out-of-scope fee hidden"
        );
        return Err(fee_not_found(fee_id));
    }

    FeeInfo::from_record(&row.fee, &row.student, today)
}

/// Computes collection statistics over every fee visible to the actor.
///
/// # Errors
///
/// Returns an error if the actor has no usable scope or the query fails.
pub fn fee_stats(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: &FeeStatsRequest,
    today: Date,
) -> Result<FeeStatsResponse, ApiError> {
    let scope: FeeScope = scope_for(persistence, actor)?;
    let filter: FeeFilter = FeeFilter {
        academic_year: text(request.academic_year.as_deref()),
        ..FeeFilter::default()
    };

    let records: Vec<FeeRecord> = persistence
        .collect_fees(&scope, &filter, today)
        .map_err(translate_persistence_error)?;

    Ok(FeeStatsResponse {
        overview: summarize(&records, today),
        by_fee_type: summarize_by_fee_type(&records, today),
    })
}

/// Returns the fee actions the actor may attempt.
#[must_use]
pub const fn fee_capabilities(actor: &AuthenticatedActor) -> FeeCapabilities {
    compute_fee_capabilities(actor)
}

/// Creates one fee for one student.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `actor` - The authenticated actor
/// * `request` - The fee to create
/// * `now` - Creation time
///
/// # Errors
///
/// Returns an error if:
/// - The actor is faculty (`Forbidden`)
/// - The student does not exist
/// - The student is outside the actor's department (`OutOfScope`)
/// - The amount, date, fee type or academic year is invalid
/// - The student record lacks a department or roll number
/// - The database write fails
pub fn create_fee(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: &CreateFeeRequest,
    now: OffsetDateTime,
) -> Result<FeeInfo, ApiError> {
    AuthorizationService::authorize_create_fee(actor)?;

    let terms: FeeTerms = parse_terms(
        request.amount,
        &request.due_date,
        &request.fee_type,
        &request.academic_year,
        request.description.as_deref(),
    )?;
    let scope: FeeScope = scope_for(persistence, actor)?;

    let student: Student = persistence
        .get_student(request.student_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| translate_domain_error(DomainError::UnknownStudent(request.student_id)))?;
    ensure_student_in_scope(&scope, actor, &student)?;

    let new_fee = fee_ledger_domain::create_fee(&student, &terms, actor.user_id, now)
        .map_err(translate_domain_error)?;
    let record: FeeRecord = persistence
        .create_fee(&new_fee)
        .map_err(translate_persistence_error)?;
    info!(
        actor_id = actor.user_id,
        fee_id = record.fee_id,
        student_id = student.student_id,
        "Fee created"
    );

    FeeInfo::from_record(&record, &student, now.date())
}

/// Creates the same fee for every active student of a batch or department.
///
/// The batch wins when both are given. Students that cannot be billed are
/// skipped and reported; the rest are still created.
///
/// # Errors
///
/// Returns an error (and creates nothing) if:
/// - The actor is faculty (`Forbidden`)
/// - Neither a batch nor a department is given
/// - The shared terms are invalid
/// - The batch does not exist
/// - The batch or department is outside the actor's department (`OutOfScope`)
/// - The cohort cannot be read
pub fn bulk_create_fees(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: &BulkCreateFeesRequest,
    now: OffsetDateTime,
) -> Result<BulkCreateFeesResponse, ApiError> {
    AuthorizationService::authorize_bulk_create_fees(actor)?;

    let command: BulkFeeCommand = BulkFeeCommand {
        department_id: request.department_id,
        batch_id: request.batch_id,
        terms: parse_terms(
            request.amount,
            &request.due_date,
            &request.fee_type,
            &request.academic_year,
            request.description.as_deref(),
        )?,
        actor_id: actor.user_id,
    };
    let cohort: Cohort = command.cohort().map_err(translate_core_error)?;
    let scope: FeeScope = scope_for(persistence, actor)?;

    let population: Vec<Student> = match cohort {
        Cohort::Batch(batch_id) => {
            let batch: BatchData = persistence
                .get_batch(batch_id)
                .map_err(translate_persistence_error)?
                .ok_or_else(|| ApiError::ResourceNotFound {
                    resource_type: String::from("Batch"),
                    message: format!("Batch {batch_id} does not exist"),
                })?;
            ensure_batch_in_scope(&scope, actor, &batch)?;
            persistence.list_active_students_in_batch(batch_id)
        }
        Cohort::Department(department_id) => {
            ensure_department_in_scope(&scope, actor, department_id)?;
            persistence.list_active_students_in_department(department_id)
        }
    }
    .map_err(translate_persistence_error)?;

    let report: BulkReport<FeeRecord> =
        generate_bulk_fees(&population, &command, now, |new_fee| {
            persistence.create_fee(&new_fee)
        })
        .map_err(translate_core_error)?;

    info!(
        actor_id = actor.user_id,
        cohort = ?cohort,
        population = population.len(),
        created = report.success_count(),
        failed = report.failed_count(),
        "Bulk fee creation finished"
    );

    Ok(BulkCreateFeesResponse {
        success: report.success_count(),
        failed: report.failed_count(),
        errors: report.error_messages(),
        fee_ids: report.created.iter().map(|fee| fee.fee_id).collect(),
    })
}

/// Records a payment status on a fee.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is faculty (`Forbidden`)
/// - The fee does not exist
/// - The fee's student is outside the actor's department (`OutOfScope`)
/// - The fee is already settled, or the target status is not allowed
/// - The amount or payment mode is missing or invalid
/// - The database write fails
pub fn mark_fee_paid(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    fee_id: i64,
    request: &MarkFeePaidRequest,
    now: OffsetDateTime,
) -> Result<FeeInfo, ApiError> {
    AuthorizationService::authorize_mark_fee_paid(actor)?;

    let scope: FeeScope = scope_for(persistence, actor)?;
    let existing: FeeWithStudent = load_fee(persistence, fee_id)?;
    ensure_student_in_scope(&scope, actor, &existing.student)?;

    let status: String = request.status.trim().to_string();
    // Waiving ignores the payment mode, so an unparseable one is ignored too.
    let payment_mode: Option<PaymentMode> = if status.eq_ignore_ascii_case("WAIVED") {
        None
    } else {
        text(request.payment_mode.as_deref())
            .map(|mode| mode.parse::<PaymentMode>())
            .transpose()
            .map_err(translate_domain_error)?
    };

    let update: PaymentUpdate = PaymentUpdate {
        status,
        amount_paid: request.amount_paid,
        payment_mode,
        remarks: text(request.remarks.as_deref()),
        actor_id: actor.user_id,
    };

    let updated: FeeRecord = persistence
        .modify_fee(fee_id, |current| apply_payment(current, &update, now))
        .map_err(translate_persistence_error)?
        .map_err(translate_payment_error)?;
    info!(
        actor_id = actor.user_id,
        fee_id,
        status = %updated.status,
        "Payment status recorded"
    );

    FeeInfo::from_record(&updated, &existing.student, now.date())
}

/// Hard-deletes a fee regardless of its status.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is faculty (`Forbidden`)
/// - The fee does not exist
/// - The fee's student is outside the actor's department (`OutOfScope`)
/// - The database write fails
pub fn delete_fee(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    fee_id: i64,
) -> Result<DeleteFeeResponse, ApiError> {
    AuthorizationService::authorize_delete_fee(actor)?;

    let scope: FeeScope = scope_for(persistence, actor)?;
    let existing: FeeWithStudent = load_fee(persistence, fee_id)?;
    ensure_student_in_scope(&scope, actor, &existing.student)?;

    persistence
        .delete_fee(fee_id)
        .map_err(translate_persistence_error)?;
    info!(actor_id = actor.user_id, fee_id, "Fee deleted");

    Ok(DeleteFeeResponse {
        fee_id,
        message: format!("Fee {fee_id} deleted"),
    })
}

fn load_fee(persistence: &mut Persistence, fee_id: i64) -> Result<FeeWithStudent, ApiError> {
    persistence
        .get_fee(fee_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| fee_not_found(fee_id))
}

fn fee_not_found(fee_id: i64) -> ApiError {
    ApiError::ResourceNotFound {
        resource_type: String::from("Fee"),
        message: format!("Fee {fee_id} does not exist"),
    }
}

/// Parses the student-independent part of a fee request.
fn parse_terms(
    amount: Decimal,
    due_date: &str,
    fee_type: &str,
    academic_year: &str,
    description: Option<&str>,
) -> Result<FeeTerms, ApiError> {
    let fee_type: FeeType = fee_type.parse().map_err(translate_domain_error)?;
    let due_date: Date = parse_date(due_date).map_err(translate_domain_error)?;

    Ok(FeeTerms {
        amount,
        due_date,
        fee_type,
        academic_year: academic_year.trim().to_string(),
        description: text(description),
    })
}

/// On the payment path an invalid amount is always the paid amount.
fn translate_payment_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidAmount { .. } => ApiError::InvalidInput {
            field: String::from("amount_paid"),
            message: err.to_string(),
        },
        other => translate_domain_error(other),
    }
}
