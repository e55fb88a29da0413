//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every way a submission, a period transition or a payslip calculation
//! can be refused.

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::RecordKind;
use crate::store::StoreError;

/// The main error type for the payroll engine.
///
/// Every operation in the engine returns this error type. Each variant is a
/// distinct kind so the HTTP layer can map it to its own status and code,
/// while the `Display` text stays a plain human-readable message.
///
/// # Example
///
/// ```
/// use payroll_engine::error::PayrollError;
///
/// let error = PayrollError::AlreadyClosed { period_id: 7 };
/// assert_eq!(error.to_string(), "the payroll period 7 is already closed");
/// ```
#[derive(Debug, Error)]
pub enum PayrollError {
    /// The caller tried to submit a record on behalf of another user.
    #[error("user {actor_id} cannot submit records for user {user_id}")]
    IdentityMismatch {
        /// The authenticated caller.
        actor_id: i64,
        /// The user named in the request.
        user_id: i64,
    },

    /// The operation is restricted to administrators.
    #[error("access denied: admin privileges required")]
    AdminRequired,

    /// A date or timestamp could not be parsed.
    #[error("invalid {field} format: {message}")]
    InvalidFormat {
        /// The request field that failed to parse.
        field: String,
        /// What the field was expected to look like.
        message: String,
    },

    /// The payroll period covering the date is closed or does not exist.
    #[error("the {record} cannot be submitted because the payroll period for {date} is closed")]
    PeriodClosed {
        /// The kind of record being submitted.
        record: RecordKind,
        /// The submitted date.
        date: NaiveDate,
    },

    /// The operation needs a closed period but the period is still open.
    #[error("the payroll period {period_id} is still open")]
    PeriodStillOpen {
        /// The period that is still open.
        period_id: i64,
    },

    /// Check-in, check-out and the submitted date fall on different days.
    #[error("check-in and check-out times must be on the same day as {date}")]
    DateMismatch {
        /// The submitted date.
        date: NaiveDate,
    },

    /// Check-out precedes check-in.
    #[error("check-out time cannot be before check-in time")]
    InvalidRange,

    /// Attendance was submitted for a Saturday or Sunday.
    #[error("attendance can only be submitted on weekdays (Monday to Friday), {date} is a weekend")]
    WeekendNotAllowed {
        /// The submitted date.
        date: NaiveDate,
    },

    /// Overtime duration outside the accepted range.
    #[error("overtime durations must be between 1 and 3 hours, got {hours}")]
    InvalidDuration {
        /// The submitted duration.
        hours: i64,
    },

    /// Reimbursement amount is not a valid currency value.
    #[error("invalid reimbursement amount: {message}")]
    InvalidAmount {
        /// Why the amount was rejected.
        message: String,
    },

    /// Weekday overtime was submitted without attendance for that day.
    #[error("attendance must be submitted for {date} before submitting overtime")]
    AttendanceRequired {
        /// The user submitting overtime.
        user_id: i64,
        /// The overtime date.
        date: NaiveDate,
    },

    /// The period was already closed.
    #[error("the payroll period {period_id} is already closed")]
    AlreadyClosed {
        /// The period that is already closed.
        period_id: i64,
    },

    /// Payslips were already generated for the period.
    #[error("payslips have already been generated for payroll period {period_id}")]
    PayslipsAlreadyGenerated {
        /// The period whose payslips exist.
        period_id: i64,
    },

    /// A period, payslip or other entity does not exist.
    #[error("{entity} not found: {key}")]
    NotFound {
        /// The kind of entity that was looked up.
        entity: String,
        /// The key that was looked up.
        key: String,
    },

    /// Zero or several base salary rows resolved for a single employee.
    #[error("base salary not resolved for user {user_id} in payroll period {period_id}: {count} rows found")]
    SalaryNotResolved {
        /// The employee.
        user_id: i64,
        /// The period being evaluated.
        period_id: i64,
        /// How many rows resolved.
        count: usize,
    },

    /// The period has no working days, so a daily rate cannot be derived.
    #[error("payroll period {period_id} has zero working days, rate per day is undefined")]
    DivisionUndefined {
        /// The misconfigured period.
        period_id: i64,
    },

    /// A payroll amount exceeded the range of the decimal type.
    #[error("{component} exceeds the supported amount range")]
    AmountOverflow {
        /// The amount that overflowed.
        component: String,
    },

    /// A failure reported by the persistence store, propagated verbatim.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A configured payroll period is inconsistent.
    #[error("Invalid payroll period {period_id}: {message}")]
    InvalidPeriod {
        /// The offending period.
        period_id: i64,
        /// What is wrong with it.
        message: String,
    },
}

impl PayrollError {
    /// Builds a [`PayrollError::AmountOverflow`] for the named amount.
    pub fn overflow(component: impl Into<String>) -> Self {
        Self::AmountOverflow {
            component: component.into(),
        }
    }

    /// Builds a [`PayrollError::NotFound`] for the given entity and key.
    pub fn not_found(entity: impl Into<String>, key: impl ToString) -> Self {
        Self::NotFound {
            entity: entity.into(),
            key: key.to_string(),
        }
    }
}

/// A type alias for Results that return PayrollError.
pub type PayrollResult<T> = Result<T, PayrollError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_closed_names_record_kind() {
        let error = PayrollError::PeriodClosed {
            record: RecordKind::Overtime,
            date: NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
        };
        assert_eq!(
            error.to_string(),
            "the overtime cannot be submitted because the payroll period for 2025-01-06 is closed"
        );
    }

    #[test]
    fn test_invalid_duration_displays_hours() {
        let error = PayrollError::InvalidDuration { hours: 4 };
        assert_eq!(
            error.to_string(),
            "overtime durations must be between 1 and 3 hours, got 4"
        );
    }

    #[test]
    fn test_not_found_helper() {
        let error = PayrollError::not_found("payroll period", 42);
        assert_eq!(error.to_string(), "payroll period not found: 42");
    }

    #[test]
    fn test_store_error_is_transparent() {
        let error: PayrollError = StoreError::Unavailable("connection reset".to_string()).into();
        assert_eq!(error.to_string(), "store unavailable: connection reset");
        assert!(matches!(error, PayrollError::Store(_)));
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = PayrollError::ConfigParseError {
            path: "/config/periods.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/periods.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<PayrollError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_store_error() -> Result<(), StoreError> {
            Err(StoreError::Unavailable("down".to_string()))
        }

        fn propagates_error() -> PayrollResult<()> {
            returns_store_error()?;
            Ok(())
        }

        assert!(matches!(propagates_error(), Err(PayrollError::Store(_))));
    }
}
