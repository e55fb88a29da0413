//! Per-day employee submission records.
//!
//! Attendance, overtime and reimbursement records are each keyed by
//! (`user_id`, `date`); a resubmission for the same key replaces the earlier
//! record rather than adding a new one.

use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, TimeDelta};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The kinds of record an employee can submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// Daily check-in/check-out.
    Attendance,
    /// Overtime hours worked on a day.
    Overtime,
    /// An expense claim dated on a day.
    Reimbursement,
}

impl RecordKind {
    /// Storage table name the record kind is written to.
    pub fn table_name(self) -> &'static str {
        match self {
            RecordKind::Attendance => "employee_attendances",
            RecordKind::Overtime => "employee_overtimes",
            RecordKind::Reimbursement => "employee_reimbursements",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecordKind::Attendance => "attendance",
            RecordKind::Overtime => "overtime",
            RecordKind::Reimbursement => "reimbursement",
        };
        f.write_str(name)
    }
}

/// A single day's attendance for one employee.
///
/// # Example
///
/// ```
/// use payroll_engine::models::AttendanceRecord;
/// use chrono::{DateTime, NaiveDate};
///
/// let record = AttendanceRecord {
///     user_id: 1,
///     date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
///     check_in: DateTime::parse_from_rfc3339("2026-01-15T09:00:00+07:00").unwrap(),
///     check_out: DateTime::parse_from_rfc3339("2026-01-15T17:45:00+07:00").unwrap(),
///     created_by: "alice".to_string(),
///     updated_by: "alice".to_string(),
/// };
///
/// assert_eq!(record.whole_hours(), 8);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// The employee.
    pub user_id: i64,
    /// The calendar day attended.
    pub date: NaiveDate,
    /// Check-in timestamp.
    pub check_in: DateTime<FixedOffset>,
    /// Check-out timestamp, never before `check_in`.
    pub check_out: DateTime<FixedOffset>,
    /// Who first submitted the record.
    pub created_by: String,
    /// Who last submitted the record.
    pub updated_by: String,
}

impl AttendanceRecord {
    /// Time between check-in and check-out.
    pub fn worked_duration(&self) -> TimeDelta {
        self.check_out - self.check_in
    }

    /// Worked time truncated to whole hours.
    pub fn whole_hours(&self) -> i64 {
        self.worked_duration().num_hours().max(0)
    }
}

/// Overtime hours claimed for a single day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeRecord {
    /// The employee.
    pub user_id: i64,
    /// The day the overtime was worked.
    pub date: NaiveDate,
    /// Whole hours of overtime, between 1 and 3.
    pub duration_hours: u32,
    /// Who first submitted the record.
    pub created_by: String,
    /// Who last submitted the record.
    pub updated_by: String,
}

/// A reimbursement claim for a single day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReimbursementRecord {
    /// The employee.
    pub user_id: i64,
    /// The day the expense is dated.
    pub date: NaiveDate,
    /// Non-negative amount to reimburse.
    pub amount: Decimal,
    /// Free-text description of the expense.
    pub description: String,
    /// Who first submitted the record.
    pub created_by: String,
    /// Who last submitted the record.
    pub updated_by: String,
}
