// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use fee_ledger_domain::{FeeRecord, Student};
use serde::{Deserialize, Serialize};

/// A fee together with the student who owes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeWithStudent {
    pub fee: FeeRecord,
    pub student: Student,
}

/// One page of a scoped fee listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeePage {
    /// Decodable rows on this page, newest first.
    pub rows: Vec<FeeWithStudent>,
    /// Number of fees matching the query across all pages.
    pub total_count: i64,
}

/// A user known to the administration system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserData {
    pub user_id: i64,
    pub login_name: String,
    pub display_name: String,
    /// `ADMINISTRATOR`, `DEPARTMENT_HEAD` or `FACULTY`.
    pub role: String,
    pub department_id: Option<i64>,
}

/// A batch (cohort) of students within a department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchData {
    pub batch_id: i64,
    pub department_id: i64,
    pub batch_name: String,
}

/// A student to be inserted into the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStudentData {
    pub name: String,
    pub roll_number: String,
    pub department_id: Option<i64>,
    pub batch_id: Option<i64>,
    pub is_active: bool,
}
