// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Role-based visibility over the fee ledger.
//!
//! Every read is narrowed by the actor's [`FeeScope`] before it reaches the
//! store, so out-of-scope fees are simply absent. Every write checks the
//! target student against the same scope and fails loudly instead.

use fee_ledger_domain::{FeeScope, Student};
use fee_ledger_persistence::{BatchData, Persistence};
use tracing::warn;

use crate::auth::{AuthenticatedActor, Role};
use crate::error::{ApiError, translate_persistence_error};

/// Builds the visibility scope for an actor.
///
/// - Administrators see everything.
/// - Department heads see students of their department.
/// - Faculty see students enrolled in batches they teach.
///
/// # Errors
///
/// Returns `ApiError::Forbidden` for a department head with no department,
/// or an internal error if teaching assignments cannot be read.
pub fn scope_for(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<FeeScope, ApiError> {
    match actor.role {
        Role::Administrator => Ok(FeeScope::Unrestricted),
        Role::DepartmentHead => actor.department_id.map(FeeScope::Department).ok_or_else(|| {
            warn!(user_id = actor.user_id, "Department head has no department");
            ApiError::Forbidden {
                action: String::from("access fees"),
                required_role: String::from("a DEPARTMENT_HEAD with an assigned department"),
            }
        }),
        Role::Faculty => persistence
            .list_batch_ids_for_faculty(actor.user_id)
            .map(FeeScope::Batches)
            .map_err(translate_persistence_error),
    }
}

/// Fails with `OutOfScope` unless `student` is inside `scope`.
///
/// # Errors
///
/// Returns `ApiError::OutOfScope` naming the student.
pub fn ensure_student_in_scope(
    scope: &FeeScope,
    actor: &AuthenticatedActor,
    student: &Student,
) -> Result<(), ApiError> {
    if scope.permits(student) {
        return Ok(());
    }

    warn!(
        user_id = actor.user_id,
        role = %actor.role,
        student_id = student.student_id,
        "Write outside actor scope rejected"
    );
    Err(ApiError::OutOfScope {
        message: format!("Student {} is outside your scope", student.student_id),
    })
}

/// Fails with `OutOfScope` unless the actor may bill a whole batch.
///
/// # Errors
///
/// Returns `ApiError::OutOfScope` if a department head targets a batch of
/// another department.
pub fn ensure_batch_in_scope(
    scope: &FeeScope,
    actor: &AuthenticatedActor,
    batch: &BatchData,
) -> Result<(), ApiError> {
    match scope {
        FeeScope::Unrestricted => Ok(()),
        FeeScope::Department(department_id) if *department_id == batch.department_id => Ok(()),
        FeeScope::Batches(batch_ids) if batch_ids.contains(&batch.batch_id) => Ok(()),
        _ => {
            warn!(
                user_id = actor.user_id,
                batch_id = batch.batch_id,
                "Bulk creation for out-of-scope batch rejected"
            );
            Err(ApiError::OutOfScope {
                message: format!("Batch {} is outside your department", batch.batch_id),
            })
        }
    }
}

/// Fails with `OutOfScope` unless the actor may bill a whole department.
///
/// # Errors
///
/// Returns `ApiError::OutOfScope` if a department head targets another
/// department. Batch-scoped actors never pass.
pub fn ensure_department_in_scope(
    scope: &FeeScope,
    actor: &AuthenticatedActor,
    department_id: i64,
) -> Result<(), ApiError> {
    match scope {
        FeeScope::Unrestricted => Ok(()),
        FeeScope::Department(own) if *own == department_id => Ok(()),
        _ => {
            warn!(
                user_id = actor.user_id,
                department_id,
                "Bulk creation for out-of-scope department rejected"
            );
            Err(ApiError::OutOfScope {
                message: format!("Department {department_id} is not yours"),
            })
        }
    }
}
