//! HTTP API module for the payroll engine.
//!
//! This module provides the REST endpoints for employee submissions,
//! payslip breakdowns and the administrative period operations.

mod handlers;
mod identity;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use identity::{
    CallerIdentity, FORWARDED_FOR_HEADER, REQUEST_ID_HEADER, ROLE_HEADER, USERNAME_HEADER,
    USER_ID_HEADER,
};
pub use request::{CloseQuery, CloseResponse, PayslipPath, PeriodPath};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
