// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Best-effort expansion of a bulk request into one fee per student.
//!
//! Each student is handled independently. A student whose record cannot
//! be billed, or whose insert fails in storage, becomes an entry in the
//! report's failures; the remaining students are still processed. There
//! is no transaction spanning the cohort.

use crate::command::BulkFeeCommand;
use crate::error::CoreError;
use fee_ledger_domain::{NewFee, Student, create_fee, validate_fee_terms};
use std::fmt::Display;
use time::OffsetDateTime;
use tracing::warn;

/// Why one student in a bulk request did not receive a fee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkFailure {
    pub student_id: i64,
    pub roll_number: String,
    pub reason: String,
}

impl std::fmt::Display for BulkFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let roll: &str = if self.roll_number.trim().is_empty() {
            "<no roll number>"
        } else {
            &self.roll_number
        };
        write!(f, "Student {roll} ({}): {}", self.student_id, self.reason)
    }
}

/// Outcome of a bulk request.
///
/// `created.len() + failures.len()` always equals the population size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkReport<R> {
    /// Records that were created, in population order.
    pub created: Vec<R>,
    /// Students that were skipped, in population order.
    pub failures: Vec<BulkFailure>,
}

impl<R> BulkReport<R> {
    #[must_use]
    pub const fn success_count(&self) -> usize {
        self.created.len()
    }

    #[must_use]
    pub const fn failed_count(&self) -> usize {
        self.failures.len()
    }

    /// Human-readable failure lines, one per skipped student.
    #[must_use]
    pub fn error_messages(&self) -> Vec<String> {
        self.failures.iter().map(ToString::to_string).collect()
    }
}

/// Creates one fee for every student in `population`.
///
/// `create` persists a planned fee and returns the stored record. Its
/// failures are recorded against the student and do not stop the run.
///
/// # Errors
///
/// Returns an error, before anything is created, if the command names no
/// cohort or its shared terms are invalid. Per-student problems never
/// produce an error; they are reported in [`BulkReport::failures`].
pub fn generate_bulk_fees<R, E, F>(
    population: &[Student],
    command: &BulkFeeCommand,
    now: OffsetDateTime,
    mut create: F,
) -> Result<BulkReport<R>, CoreError>
where
    E: Display,
    F: FnMut(NewFee) -> Result<R, E>,
{
    command.cohort()?;
    validate_fee_terms(&command.terms)?;

    let mut report: BulkReport<R> = BulkReport {
        created: Vec::with_capacity(population.len()),
        failures: Vec::new(),
    };

    for student in population {
        let outcome: Result<R, String> =
            match create_fee(student, &command.terms, command.actor_id, now) {
                Ok(new_fee) => create(new_fee).map_err(|e| e.to_string()),
                Err(err) => Err(err.to_string()),
            };

        match outcome {
            Ok(record) => report.created.push(record),
            Err(reason) => {
                warn!(
                    student_id = student.student_id,
                    reason = %reason,
                    "Skipping student in bulk fee creation"
                );
                report.failures.push(BulkFailure {
                    student_id: student.student_id,
                    roll_number: student.roll_number.clone(),
                    reason,
                });
            }
        }
    }

    Ok(report)
}
