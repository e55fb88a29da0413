//! Raw submission requests as received from employees.
//!
//! Dates and timestamps stay strings here; parsing them is part of
//! validation so that malformed input is reported as a format error.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Request to record a day's attendance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitAttendanceRequest {
    /// The employee the attendance belongs to.
    pub user_id: i64,
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    /// Check-in timestamp, RFC 3339.
    pub check_in: String,
    /// Check-out timestamp, RFC 3339.
    pub check_out: String,
}

/// Request to record overtime for a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitOvertimeRequest {
    /// The employee the overtime belongs to.
    pub user_id: i64,
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    /// Whole hours of overtime.
    pub duration_hours: i64,
}

/// Request to claim a reimbursement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitReimbursementRequest {
    /// The employee claiming.
    pub user_id: i64,
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    /// Amount to reimburse.
    pub amount: Decimal,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
}
