// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod auth;
mod capabilities;
mod error;
mod filter;
mod handlers;
mod request_response;
mod scope;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthorizationService, IdentityService, Role};
pub use capabilities::compute_fee_capabilities;
pub use error::{
    ApiError, AuthError, translate_core_error, translate_domain_error,
    translate_persistence_error,
};
pub use filter::{FilterParseError, parse_list_request};
pub use handlers::{
    bulk_create_fees, create_fee, delete_fee, fee_capabilities, fee_stats, get_fee, list_fees,
    mark_fee_paid,
};
pub use request_response::{
    BulkCreateFeesRequest, BulkCreateFeesResponse, Capability, CreateFeeRequest,
    DeleteFeeResponse, FeeCapabilities, FeeInfo, FeeStatsRequest, FeeStatsResponse,
    ListFeesRequest, ListFeesResponse, MarkFeePaidRequest, PaginationInfo, StudentSummary,
};
pub use scope::{
    ensure_batch_in_scope, ensure_department_in_scope, ensure_student_in_scope, scope_for,
};
