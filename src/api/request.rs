//! Request types for the payroll API.
//!
//! Submission bodies reuse the model request types directly. This module
//! holds the path and query parameters of the period routes.

use serde::{Deserialize, Serialize};

use crate::models::PayrollPeriod;

/// `/periods/:id/...` path parameters.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PeriodPath {
    /// The payroll period id.
    pub id: i64,
}

/// `/admin/periods/:id/payslips/:user_id` path parameters.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PayslipPath {
    /// The payroll period id.
    pub id: i64,
    /// The employee.
    pub user_id: i64,
}

fn default_generate() -> bool {
    true
}

/// Query parameters of the close endpoint.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CloseQuery {
    /// Whether to generate payslips in the background after closing.
    #[serde(default = "default_generate")]
    pub generate: bool,
}

impl Default for CloseQuery {
    fn default() -> Self {
        Self { generate: true }
    }
}

/// Response body of the close endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloseResponse {
    /// The period, now closed.
    pub period: PayrollPeriod,
    /// Whether background payslip generation was started.
    pub payslip_generation_scheduled: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_close_query_defaults_to_generate() {
        let query: CloseQuery = serde_json::from_str("{}").unwrap();
        assert!(query.generate);
        assert!(CloseQuery::default().generate);
    }

    #[test]
    fn test_close_query_opt_out() {
        let query: CloseQuery = serde_json::from_str(r#"{"generate": false}"#).unwrap();
        assert!(!query.generate);
    }
}
