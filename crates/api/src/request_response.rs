// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use fee_ledger_domain::{
    FeeRecord, FeeStats, FeeStatus, FeeType, FeeTypeStats, PaymentMode, Student, format_date,
};
use rust_decimal::Decimal;
use time::format_description::well_known::Rfc3339;
use time::{Date, OffsetDateTime};

use crate::error::ApiError;

/// API request to list fees.
///
/// All fields are optional query parameters; see
/// [`parse_list_request`](crate::parse_list_request).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFeesRequest {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    /// Substring of a student's name or roll number.
    pub search: Option<String>,
    pub status: Option<String>,
    pub fee_type: Option<String>,
    pub department_id: Option<i64>,
    pub batch_id: Option<i64>,
    pub academic_year: Option<String>,
}

/// API request for fee statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeeStatsRequest {
    /// Restricts the statistics to one academic year.
    pub academic_year: Option<String>,
}

/// API request to create one fee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateFeeRequest {
    pub student_id: i64,
    pub amount: Decimal,
    /// Due date (`YYYY-MM-DD`).
    pub due_date: String,
    pub fee_type: String,
    pub academic_year: String,
    pub description: Option<String>,
}

/// API request to create the same fee for every active student of a cohort.
///
/// At least one of `department_id` and `batch_id` must be given; the batch
/// wins when both are.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkCreateFeesRequest {
    pub department_id: Option<i64>,
    pub batch_id: Option<i64>,
    pub amount: Decimal,
    /// Due date (`YYYY-MM-DD`).
    pub due_date: String,
    pub fee_type: String,
    pub academic_year: String,
    pub description: Option<String>,
}

/// API request to record a payment status on a fee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkFeePaidRequest {
    /// `PAID`, `PARTIALLY_PAID` or `WAIVED`.
    pub status: String,
    /// Required for `PARTIALLY_PAID`; ignored otherwise.
    pub amount_paid: Option<Decimal>,
    /// Required for `PAID`.
    pub payment_mode: Option<String>,
    pub remarks: Option<String>,
}

/// The student a fee belongs to, as shown next to the fee.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StudentSummary {
    pub student_id: i64,
    pub name: String,
    pub roll_number: String,
    pub department_id: Option<i64>,
    pub batch_id: Option<i64>,
}

impl From<&Student> for StudentSummary {
    fn from(student: &Student) -> Self {
        Self {
            student_id: student.student_id,
            name: student.name.clone(),
            roll_number: student.roll_number.clone(),
            department_id: student.department_id,
            batch_id: student.batch_id,
        }
    }
}

/// A fee as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FeeInfo {
    pub fee_id: i64,
    pub student: StudentSummary,
    pub amount: Decimal,
    pub amount_paid: Decimal,
    /// `amount - amount_paid`.
    pub outstanding: Decimal,
    /// Due date (`YYYY-MM-DD`).
    pub due_date: String,
    /// The stored status.
    pub status: FeeStatus,
    /// The status as of today: `OVERDUE` for a past-due pending fee.
    pub effective_status: FeeStatus,
    pub fee_type: FeeType,
    pub academic_year: String,
    pub description: Option<String>,
    pub payment_mode: Option<PaymentMode>,
    /// RFC 3339 timestamp of the first recorded payment.
    pub paid_at: Option<String>,
    pub remarks: Option<String>,
    /// The user who last changed the payment status.
    pub marked_by: Option<i64>,
    pub created_by: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl FeeInfo {
    /// Builds the API view of a fee as of `today`.
    ///
    /// # Errors
    ///
    /// Returns an internal error if a timestamp cannot be formatted.
    pub fn from_record(
        record: &FeeRecord,
        student: &Student,
        today: Date,
    ) -> Result<Self, ApiError> {
        Ok(Self {
            fee_id: record.fee_id,
            student: StudentSummary::from(student),
            amount: record.amount,
            amount_paid: record.amount_paid,
            outstanding: record.outstanding(),
            due_date: format_date(record.due_date),
            status: record.status,
            effective_status: record.effective_status(today),
            fee_type: record.fee_type,
            academic_year: record.academic_year.clone(),
            description: record.description.clone(),
            payment_mode: record.payment_mode,
            paid_at: record.paid_at.map(format_timestamp).transpose()?,
            remarks: record.remarks.clone(),
            marked_by: record.marked_by,
            created_by: record.created_by,
            created_at: format_timestamp(record.created_at)?,
            updated_at: format_timestamp(record.updated_at)?,
        })
    }
}

fn format_timestamp(value: OffsetDateTime) -> Result<String, ApiError> {
    value.format(&Rfc3339).map_err(|e| ApiError::Internal {
        message: format!("Failed to format timestamp: {e}"),
    })
}

/// Page metadata returned with a fee list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PaginationInfo {
    pub page: u32,
    pub limit: u32,
    pub total_pages: i64,
    pub total_count: i64,
}

/// API response for a fee list.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListFeesResponse {
    pub fees: Vec<FeeInfo>,
    pub pagination: PaginationInfo,
}

/// API response for fee statistics.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FeeStatsResponse {
    /// Statistics over every fee in scope.
    pub overview: FeeStats,
    /// The same statistics per fee type, for types that have fees.
    pub by_fee_type: Vec<FeeTypeStats>,
}

/// API response for bulk fee creation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BulkCreateFeesResponse {
    /// Number of fees created.
    pub success: usize,
    /// Number of students skipped.
    pub failed: usize,
    /// One line per skipped student, naming the student and the reason.
    pub errors: Vec<String>,
    /// Identifiers of the created fees.
    pub fee_ids: Vec<i64>,
}

/// API response for a successful fee deletion.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DeleteFeeResponse {
    pub fee_id: i64,
    /// A success message.
    pub message: String,
}

/// Represents whether a specific action is permitted.
///
/// Serializes to JSON as true/false.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// The action is permitted.
    Allowed,
    /// The action is not permitted.
    Denied,
}

impl Capability {
    /// Returns true if the capability is allowed.
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// Creates a capability from a boolean value.
    #[must_use]
    pub const fn from_bool(value: bool) -> Self {
        if value { Self::Allowed } else { Self::Denied }
    }
}

impl serde::Serialize for Capability {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_bool(self.is_allowed())
    }
}

impl<'de> serde::Deserialize<'de> for Capability {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let b = bool::deserialize(deserializer)?;
        Ok(Self::from_bool(b))
    }
}

/// Fee actions available to an actor.
///
/// Advisory only: every operation re-checks authorization and scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FeeCapabilities {
    pub can_create: Capability,
    pub can_bulk_create: Capability,
    pub can_mark_paid: Capability,
    pub can_delete: Capability,
}
