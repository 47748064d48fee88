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

mod error;
mod fee;
mod fee_status;
mod query;
mod stats;
mod transition;
mod types;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use fee::{FeeRecord, NewFee, PaymentUpdate};
pub use fee_status::FeeStatus;
pub use query::{FeeFilter, FeeScope, Pagination};
pub use stats::{FeeStats, FeeTypeStats, summarize, summarize_by_fee_type};
pub use transition::{
    FeeTerms, MAX_AMOUNT_SCALE, MAX_FEE_AMOUNT, apply_payment, create_fee, validate_fee_terms,
};

// Re-export public types
pub use types::{FeeType, PaymentMode, Student, format_date, parse_date};
