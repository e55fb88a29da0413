//! Response types for the payroll API.
//!
//! This module defines the error response structures and the mapping from
//! [`PayrollError`] to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::PayrollError;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Pairs an error body with a status.
    pub fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }

    /// A 400 response.
    pub fn bad_request(error: ApiError) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error)
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<PayrollError> for ApiErrorResponse {
    fn from(error: PayrollError) -> Self {
        let message = error.to_string();
        let (status, code) = match &error {
            PayrollError::IdentityMismatch { .. } => (StatusCode::FORBIDDEN, "IDENTITY_MISMATCH"),
            PayrollError::AdminRequired => (StatusCode::FORBIDDEN, "ADMIN_REQUIRED"),

            PayrollError::InvalidFormat { .. } => (StatusCode::BAD_REQUEST, "INVALID_FORMAT"),
            PayrollError::DateMismatch { .. } => (StatusCode::BAD_REQUEST, "DATE_MISMATCH"),
            PayrollError::InvalidRange => (StatusCode::BAD_REQUEST, "INVALID_RANGE"),
            PayrollError::WeekendNotAllowed { .. } => {
                (StatusCode::BAD_REQUEST, "WEEKEND_NOT_ALLOWED")
            }
            PayrollError::InvalidDuration { .. } => (StatusCode::BAD_REQUEST, "INVALID_DURATION"),
            PayrollError::InvalidAmount { .. } => (StatusCode::BAD_REQUEST, "INVALID_AMOUNT"),
            PayrollError::AttendanceRequired { .. } => {
                (StatusCode::BAD_REQUEST, "ATTENDANCE_REQUIRED")
            }

            PayrollError::PeriodClosed { .. } => (StatusCode::CONFLICT, "PERIOD_CLOSED"),
            PayrollError::PeriodStillOpen { .. } => (StatusCode::CONFLICT, "PERIOD_STILL_OPEN"),
            PayrollError::AlreadyClosed { .. } => (StatusCode::CONFLICT, "ALREADY_CLOSED"),
            PayrollError::PayslipsAlreadyGenerated { .. } => {
                (StatusCode::CONFLICT, "PAYSLIPS_ALREADY_GENERATED")
            }

            PayrollError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND"),

            PayrollError::SalaryNotResolved { .. } => {
                return Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiError::with_details("SALARY_NOT_RESOLVED", "Payroll data error", message),
                );
            }
            PayrollError::DivisionUndefined { .. } => {
                return Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiError::with_details("DIVISION_UNDEFINED", "Payroll data error", message),
                );
            }
            PayrollError::AmountOverflow { .. } => {
                return Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiError::with_details("AMOUNT_OVERFLOW", "Payroll data error", message),
                );
            }
            PayrollError::Store(_) => {
                return Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiError::with_details("STORE_ERROR", "Storage error", message),
                );
            }
            PayrollError::ConfigNotFound { .. }
            | PayrollError::ConfigParseError { .. }
            | PayrollError::InvalidPeriod { .. } => {
                return Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
                );
            }
        };

        Self::new(status, ApiError::new(code, message))
    }
}
