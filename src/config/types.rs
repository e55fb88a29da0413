//! Configuration types for the payroll service.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::models::{BaseSalary, PayrollPeriod, PeriodStatus};

fn default_bind_address() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_log_filter() -> String {
    "info".to_string()
}

fn default_status() -> PeriodStatus {
    PeriodStatus::Open
}

/// Service settings from `service.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServiceConfig {
    /// Name the service logs itself under.
    pub name: String,
    /// Address the HTTP server binds to.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// `tracing` filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

/// One explicitly configured payroll period.
///
/// `working_days` is derived from the date range when omitted.
#[derive(Debug, Clone, Deserialize)]
pub struct PeriodEntry {
    /// Identifier of the period.
    pub id: i64,
    /// First day (inclusive).
    pub period_start: NaiveDate,
    /// Last day (inclusive).
    pub period_end: NaiveDate,
    /// Salary divisor override.
    #[serde(default)]
    pub working_days: Option<u32>,
    /// Initial status.
    #[serde(default = "default_status")]
    pub status: PeriodStatus,
}

/// A run of consecutive monthly periods.
#[derive(Debug, Clone, Deserialize)]
pub struct PeriodSeries {
    /// Start date of the first period.
    pub first_start: NaiveDate,
    /// Number of periods to generate.
    pub count: u32,
    /// Periods ending on or before this date start out closed.
    #[serde(default)]
    pub closed_through: Option<NaiveDate>,
}

/// `periods.yaml` file structure. Exactly one of the two keys is expected.
#[derive(Debug, Clone, Deserialize)]
pub struct PeriodsFile {
    /// Explicit period list.
    #[serde(default)]
    pub periods: Option<Vec<PeriodEntry>>,
    /// Generated monthly series.
    #[serde(default)]
    pub series: Option<PeriodSeries>,
}

/// `salaries.yaml` file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct SalariesFile {
    /// Base salary history rows.
    pub salaries: Vec<BaseSalary>,
}

/// The complete, validated service configuration.
#[derive(Debug, Clone)]
pub struct PayrollConfig {
    service: ServiceConfig,
    periods: Vec<PayrollPeriod>,
    salaries: Vec<BaseSalary>,
}

impl PayrollConfig {
    /// Creates a new payroll configuration.
    pub fn new(service: ServiceConfig, periods: Vec<PayrollPeriod>, salaries: Vec<BaseSalary>) -> Self {
        Self {
            service,
            periods,
            salaries,
        }
    }

    /// Returns the service settings.
    pub fn service(&self) -> &ServiceConfig {
        &self.service
    }

    /// Returns the payroll periods, ordered by start date.
    pub fn periods(&self) -> &[PayrollPeriod] {
        &self.periods
    }

    /// Returns the base salary history.
    pub fn salaries(&self) -> &[BaseSalary] {
        &self.salaries
    }
}
