// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Query predicates over the fee ledger.
//!
//! A [`FeeScope`] is the role-derived visibility boundary; a [`FeeFilter`]
//! narrows it further with caller-chosen criteria. Stores translate both
//! into their own query language.

use crate::fee_status::FeeStatus;
use crate::types::{FeeType, Student};

/// The set of students whose fees an actor may see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeeScope {
    /// Every student in the institution.
    Unrestricted,
    /// Students whose department is the given one.
    Department(i64),
    /// Students enrolled in any of the given batches.
    Batches(Vec<i64>),
}

impl FeeScope {
    /// Returns true if `student` falls inside this scope.
    #[must_use]
    pub fn permits(&self, student: &Student) -> bool {
        match self {
            Self::Unrestricted => true,
            Self::Department(department_id) => student.department_id == Some(*department_id),
            Self::Batches(batch_ids) => student
                .batch_id
                .is_some_and(|batch_id| batch_ids.contains(&batch_id)),
        }
    }
}

/// Caller-supplied narrowing of a scoped fee query.
///
/// All criteria are conjunctive. `status = Some(Overdue)` selects fees whose
/// effective status is overdue on the query date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeeFilter {
    /// Substring of the student's name or roll number.
    pub search: Option<String>,
    pub status: Option<FeeStatus>,
    pub fee_type: Option<FeeType>,
    pub department_id: Option<i64>,
    pub batch_id: Option<i64>,
    pub academic_year: Option<String>,
}

/// A page request. Both fields are 1-based and non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: u32,
    limit: u32,
}

impl Pagination {
    pub const DEFAULT_LIMIT: u32 = 10;
    pub const MAX_LIMIT: u32 = 100;

    /// Creates a page request, clamping `limit` to [`Self::MAX_LIMIT`].
    ///
    /// Returns `None` if either value is zero.
    #[must_use]
    pub fn new(page: u32, limit: u32) -> Option<Self> {
        if page == 0 || limit == 0 {
            return None;
        }
        Some(Self {
            page,
            limit: limit.min(Self::MAX_LIMIT),
        })
    }

    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of rows to skip before this page.
    #[must_use]
    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1) * i64::from(self.limit)
    }

    /// `ceil(total_count / limit)`.
    #[must_use]
    pub fn total_pages(&self, total_count: i64) -> i64 {
        if total_count <= 0 {
            return 0;
        }
        let limit = i64::from(self.limit);
        (total_count + limit - 1) / limit
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            limit: Self::DEFAULT_LIMIT,
        }
    }
}
