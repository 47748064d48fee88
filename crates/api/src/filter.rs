// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Parsing of list query parameters into a [`FeeFilter`] and [`Pagination`].

use fee_ledger_domain::{FeeFilter, FeeStatus, FeeType, Pagination};

use crate::error::ApiError;
use crate::request_response::ListFeesRequest;

/// Query parameter errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterParseError {
    #[error("page and limit must both be at least 1 (got page {page}, limit {limit})")]
    InvalidPagination { page: u32, limit: u32 },
    #[error("unknown status '{0}'")]
    UnknownStatus(String),
    #[error("unknown fee type '{0}'")]
    UnknownFeeType(String),
}

impl FilterParseError {
    /// The query parameter that was rejected.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::InvalidPagination { .. } => "pagination",
            Self::UnknownStatus(_) => "status",
            Self::UnknownFeeType(_) => "fee_type",
        }
    }
}

impl From<FilterParseError> for ApiError {
    fn from(err: FilterParseError) -> Self {
        Self::InvalidInput {
            field: String::from(err.field()),
            message: err.to_string(),
        }
    }
}

/// Parses list parameters.
///
/// Blank strings and `ALL` mean "no filter". `limit` is clamped to
/// [`Pagination::MAX_LIMIT`].
///
/// # Errors
///
/// Returns an error if `page` or `limit` is zero, or if `status` or
/// `fee_type` is not a known value.
pub fn parse_list_request(
    request: &ListFeesRequest,
) -> Result<(FeeFilter, Pagination), FilterParseError> {
    let page: u32 = request.page.unwrap_or(1);
    let limit: u32 = request.limit.unwrap_or(Pagination::DEFAULT_LIMIT);
    let pagination: Pagination =
        Pagination::new(page, limit).ok_or(FilterParseError::InvalidPagination { page, limit })?;

    let status: Option<FeeStatus> = selection(request.status.as_deref())
        .map(|value| {
            value
                .parse()
                .map_err(|_| FilterParseError::UnknownStatus(value.to_string()))
        })
        .transpose()?;

    let fee_type: Option<FeeType> = selection(request.fee_type.as_deref())
        .map(|value| {
            value
                .parse()
                .map_err(|_| FilterParseError::UnknownFeeType(value.to_string()))
        })
        .transpose()?;

    let filter: FeeFilter = FeeFilter {
        search: text(request.search.as_deref()),
        status,
        fee_type,
        department_id: request.department_id,
        batch_id: request.batch_id,
        academic_year: text(request.academic_year.as_deref()),
    };

    Ok((filter, pagination))
}

/// Trims a free-text parameter, treating blank as absent.
pub(crate) fn text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

/// Like [`text`], but `ALL` (any case) also means absent.
fn selection(value: Option<&str>) -> Option<&str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("all"))
}
