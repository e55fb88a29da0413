//! Persistence ports for the payroll engine.
//!
//! The engine never talks to a database directly. Every component receives
//! the store traits it needs at construction time. Lookups that may
//! legitimately find nothing return `Ok(None)`, so callers can tell "not
//! there" apart from a failing store.
//!
//! [`InMemoryStore`] implements every port and is what the binary and the
//! tests run against.

mod memory;

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{
    AttendanceRecord, AuditLogEntry, BaseSalary, OvertimeRecord, PayrollPeriod, Payslip,
    ReimbursementRecord,
};

pub use memory::InMemoryStore;

/// Table holding payroll periods.
pub const PERIOD_TABLE: &str = "payroll_period";

/// Table holding generated payslips.
pub const PAYSLIP_TABLE: &str = "payroll_payslips";

/// Errors reported by a store implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write.
    #[error("duplicate key in {table}: {key}")]
    DuplicateKey {
        /// The table written to.
        table: String,
        /// The conflicting key.
        key: String,
    },

    /// A row the write depends on does not exist.
    #[error("no row in {table} for {key}")]
    MissingRow {
        /// The table written to.
        table: String,
        /// The missing key.
        key: String,
    },

    /// The store could not serve the request.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// A Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Payroll period lookup and the Open→Closed transition.
pub trait PeriodStore: Send + Sync {
    /// Fetches a period by id.
    fn period_by_id(&self, period_id: i64) -> StoreResult<Option<PayrollPeriod>>;

    /// Fetches the period whose range contains `date`.
    fn period_containing(&self, date: NaiveDate) -> StoreResult<Option<PayrollPeriod>>;

    /// Moves the period from Open to Closed as one atomic step.
    ///
    /// Returns the period as it was before closing, or `None` when it was
    /// already closed. A missing period is [`StoreError::MissingRow`].
    fn close_period(&self, period_id: i64) -> StoreResult<Option<PayrollPeriod>>;
}

/// Per-day submission records.
///
/// The upserts are atomic insert-or-replace operations keyed by
/// (`user_id`, `date`). On conflict the record's `created_by` is kept and
/// everything else is overwritten.
pub trait RecordStore: Send + Sync {
    /// Inserts or replaces an attendance record.
    fn upsert_attendance(&self, record: AttendanceRecord) -> StoreResult<AttendanceRecord>;

    /// Inserts or replaces an overtime record.
    fn upsert_overtime(&self, record: OvertimeRecord) -> StoreResult<OvertimeRecord>;

    /// Inserts or replaces a reimbursement record.
    fn upsert_reimbursement(&self, record: ReimbursementRecord)
    -> StoreResult<ReimbursementRecord>;

    /// Fetches one user's attendance for one day.
    fn attendance_on(&self, user_id: i64, date: NaiveDate)
    -> StoreResult<Option<AttendanceRecord>>;

    /// Attendance dated within `[start, end]`, optionally for one user.
    fn attendance_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        user_id: Option<i64>,
    ) -> StoreResult<Vec<AttendanceRecord>>;

    /// Overtime dated within `[start, end]`, optionally for one user.
    fn overtime_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        user_id: Option<i64>,
    ) -> StoreResult<Vec<OvertimeRecord>>;

    /// Reimbursements dated within `[start, end]`, optionally for one user.
    fn reimbursements_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        user_id: Option<i64>,
    ) -> StoreResult<Vec<ReimbursementRecord>>;
}

/// Base salary history.
pub trait SalaryStore: Send + Sync {
    /// The salary row in force on `as_of` for each employee (or just
    /// `user_id`), i.e. the latest row with `effective_from <= as_of`.
    fn base_salaries_effective_at(
        &self,
        as_of: NaiveDate,
        user_id: Option<i64>,
    ) -> StoreResult<Vec<BaseSalary>>;
}

/// Generated payslips.
pub trait PayslipStore: Send + Sync {
    /// Persists a batch atomically. Fails with [`StoreError::DuplicateKey`],
    /// writing nothing, if any (user, period) pair already has a payslip.
    fn insert_payslips(&self, payslips: &[Payslip]) -> StoreResult<()>;

    /// Fetches one employee's payslip for a period.
    fn payslip(&self, user_id: i64, period_id: i64) -> StoreResult<Option<Payslip>>;

    /// All payslips of a period, ordered by user id.
    fn payslips_for_period(&self, period_id: i64) -> StoreResult<Vec<Payslip>>;
}

/// Destination for audit log entries.
pub trait AuditSink: Send + Sync {
    /// Appends an entry.
    fn record(&self, entry: AuditLogEntry) -> StoreResult<()>;
}
