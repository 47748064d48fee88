// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use fee_ledger_domain::FeeTerms;

/// A request to bill every active student in a cohort under one set of terms.
///
/// Commands carry intent only. Resolving the cohort to students and
/// checking the actor's right to bill it happen before the command is run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkFeeCommand {
    /// Department whose active students are billed when no batch is given.
    pub department_id: Option<i64>,
    /// Batch whose active students are billed. Takes precedence over the department.
    pub batch_id: Option<i64>,
    /// Terms applied to every student.
    pub terms: FeeTerms,
    /// The user issuing the request.
    pub actor_id: i64,
}

/// The population a bulk request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cohort {
    /// Every active student enrolled in the batch.
    Batch(i64),
    /// Every active student in the department.
    Department(i64),
}

impl BulkFeeCommand {
    /// Resolves which cohort this command targets.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::MissingScope` if neither a batch nor a department
    /// was supplied.
    pub fn cohort(&self) -> Result<Cohort, CoreError> {
        match (self.batch_id, self.department_id) {
            (Some(batch_id), _) => Ok(Cohort::Batch(batch_id)),
            (None, Some(department_id)) => Ok(Cohort::Department(department_id)),
            (None, None) => Err(CoreError::MissingScope),
        }
    }
}
