// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Fee payment status and the read-time overdue derivation.
//!
//! `OVERDUE` is a display state. The state machine never writes it; a
//! `PENDING` fee whose due date has passed is reported as overdue when it
//! is read.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Date;

/// Payment states of a single fee record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeeStatus {
    /// Nothing has been paid yet. Initial state.
    Pending,
    /// Part of the amount has been paid.
    PartiallyPaid,
    /// The full amount has been paid.
    Paid,
    /// Derived display state for a pending fee past its due date.
    Overdue,
    /// The remainder has been forgiven.
    Waived,
}

impl FeeStatus {
    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::PartiallyPaid => "PARTIALLY_PAID",
            Self::Paid => "PAID",
            Self::Overdue => "OVERDUE",
            Self::Waived => "WAIVED",
        }
    }

    /// Returns true once the fee is fully resolved (`PAID` or `WAIVED`).
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        matches!(self, Self::Paid | Self::Waived)
    }

    /// Returns the status a reader should see on `today`.
    ///
    /// A `PENDING` fee whose due date is strictly before `today` reads as
    /// `OVERDUE`. Every other status is returned unchanged.
    #[must_use]
    pub fn effective(self, due_date: Date, today: Date) -> Self {
        if self == Self::Pending && due_date < today {
            Self::Overdue
        } else {
            self
        }
    }
}

impl std::fmt::Display for FeeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FeeStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Ok(Self::Pending),
            "PARTIALLY_PAID" => Ok(Self::PartiallyPaid),
            "PAID" => Ok(Self::Paid),
            "OVERDUE" => Ok(Self::Overdue),
            "WAIVED" => Ok(Self::Waived),
            _ => Err(DomainError::InvalidFeeStatus(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_status_string_round_trip() {
        let statuses = vec![
            FeeStatus::Pending,
            FeeStatus::PartiallyPaid,
            FeeStatus::Paid,
            FeeStatus::Overdue,
            FeeStatus::Waived,
        ];

        for status in statuses {
            let s = status.as_str();
            match s.parse::<FeeStatus>() {
                Ok(parsed) => assert_eq!(status, parsed),
                Err(e) => panic!("Failed to parse status string: {s}: {e}"),
            }
        }
    }

    #[test]
    fn test_status_parse_is_case_insensitive() {
        assert_eq!(
            "partially_paid".parse::<FeeStatus>(),
            Ok(FeeStatus::PartiallyPaid)
        );
        assert_eq!(" paid ".parse::<FeeStatus>(), Ok(FeeStatus::Paid));
    }

    #[test]
    fn test_invalid_status_string() {
        assert!("REFUNDED".parse::<FeeStatus>().is_err());
    }

    #[test]
    fn test_settled_states() {
        assert!(!FeeStatus::Pending.is_settled());
        assert!(!FeeStatus::PartiallyPaid.is_settled());
        assert!(!FeeStatus::Overdue.is_settled());
        assert!(FeeStatus::Paid.is_settled());
        assert!(FeeStatus::Waived.is_settled());
    }

    #[test]
    fn test_pending_past_due_reads_as_overdue() {
        let status = FeeStatus::Pending.effective(date!(2024 - 01 - 01), date!(2024 - 01 - 02));
        assert_eq!(status, FeeStatus::Overdue);
    }

    #[test]
    fn test_pending_due_today_is_not_overdue() {
        let status = FeeStatus::Pending.effective(date!(2024 - 01 - 01), date!(2024 - 01 - 01));
        assert_eq!(status, FeeStatus::Pending);
    }

    #[test]
    fn test_partially_paid_past_due_is_not_overdue() {
        let status =
            FeeStatus::PartiallyPaid.effective(date!(2024 - 01 - 01), date!(2024 - 06 - 01));
        assert_eq!(status, FeeStatus::PartiallyPaid);
    }
}
