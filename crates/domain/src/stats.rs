// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Collection statistics over an already scope-filtered set of fees.
//!
//! No authorization happens here. Callers must hand in only the records
//! the actor is allowed to see.
//!
//! A `PENDING` fee past its due date is counted in `pending_fees` and in
//! `overdue_fees`. The two counters overlap on purpose: overdue is a
//! view of pending, not a separate bucket.
//!
//! A record whose amounts would overflow the running totals is left out
//! of every counter.

use crate::fee::FeeRecord;
use crate::fee_status::FeeStatus;
use crate::types::FeeType;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use time::Date;

/// Summary counts and amounts for a set of fees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeStats {
    pub total_fees: u64,
    pub pending_fees: u64,
    pub partially_paid_fees: u64,
    pub paid_fees: u64,
    pub overdue_fees: u64,
    pub waived_fees: u64,
    pub total_amount: Decimal,
    pub collected_amount: Decimal,
    pub pending_amount: Decimal,
    /// Percentage collected, one decimal place (`"0.0"` when nothing is owed).
    pub collection_rate: String,
}

/// Statistics for the fees of a single type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeTypeStats {
    pub fee_type: FeeType,
    pub stats: FeeStats,
}

/// Reduces a set of fees into summary statistics as of `today`.
#[must_use]
pub fn summarize<'a, I>(records: I, today: Date) -> FeeStats
where
    I: IntoIterator<Item = &'a FeeRecord>,
{
    let mut total_fees: u64 = 0;
    let mut pending_fees: u64 = 0;
    let mut partially_paid_fees: u64 = 0;
    let mut paid_fees: u64 = 0;
    let mut overdue_fees: u64 = 0;
    let mut waived_fees: u64 = 0;
    let mut total_amount: Decimal = Decimal::ZERO;
    let mut collected_amount: Decimal = Decimal::ZERO;

    for record in records {
        let Some((total, collected)) = add_amounts(total_amount, collected_amount, record) else {
            continue;
        };
        total_fees += 1;
        total_amount = total;
        collected_amount = collected;

        match record.status {
            // Stored OVERDUE only exists in legacy data; it is still unpaid.
            FeeStatus::Pending | FeeStatus::Overdue => pending_fees += 1,
            FeeStatus::PartiallyPaid => partially_paid_fees += 1,
            FeeStatus::Paid => paid_fees += 1,
            FeeStatus::Waived => waived_fees += 1,
        }

        if record.effective_status(today) == FeeStatus::Overdue {
            overdue_fees += 1;
        }
    }

    FeeStats {
        total_fees,
        pending_fees,
        partially_paid_fees,
        paid_fees,
        overdue_fees,
        waived_fees,
        total_amount,
        collected_amount,
        pending_amount: total_amount
            .checked_sub(collected_amount)
            .unwrap_or(Decimal::ZERO),
        collection_rate: collection_rate(collected_amount, total_amount),
    }
}

/// Adds a record's amounts to the running totals, or `None` on overflow.
fn add_amounts(
    total: Decimal,
    collected: Decimal,
    record: &FeeRecord,
) -> Option<(Decimal, Decimal)> {
    let total: Decimal = total.checked_add(record.amount)?;
    let collected: Decimal = collected.checked_add(record.amount_paid)?;
    total.checked_sub(collected)?;
    Some((total, collected))
}

/// Summarizes fees grouped by fee type.
///
/// Only types that appear in `records` are returned, in [`FeeType::ALL`] order.
#[must_use]
pub fn summarize_by_fee_type(records: &[FeeRecord], today: Date) -> Vec<FeeTypeStats> {
    let mut grouped: BTreeMap<FeeType, Vec<&FeeRecord>> = BTreeMap::new();
    for record in records {
        grouped.entry(record.fee_type).or_default().push(record);
    }

    grouped
        .into_iter()
        .map(|(fee_type, group)| FeeTypeStats {
            fee_type,
            stats: summarize(group, today),
        })
        .collect()
}

/// `round(collected / total * 100, 1)` rendered with exactly one decimal.
fn collection_rate(collected: Decimal, total: Decimal) -> String {
    if total.is_zero() {
        return String::from("0.0");
    }

    let mut rate: Decimal = collected
        .checked_div(total)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::ZERO)
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    rate.rescale(1);
    rate.to_string()
}
