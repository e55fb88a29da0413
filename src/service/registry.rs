//! Period registry.
//!
//! Resolves dates and ids to payroll periods and answers whether a date is
//! still open for submissions.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::warn;

use crate::error::{PayrollError, PayrollResult};
use crate::models::PayrollPeriod;
use crate::store::PeriodStore;

/// Read access to payroll periods.
#[derive(Clone)]
pub struct PeriodRegistry {
    periods: Arc<dyn PeriodStore>,
}

impl PeriodRegistry {
    /// Creates a registry over the given period store.
    pub fn new(periods: Arc<dyn PeriodStore>) -> Self {
        Self { periods }
    }

    /// The period whose range contains `date`.
    pub fn period_containing(&self, date: NaiveDate) -> PayrollResult<PayrollPeriod> {
        self.periods
            .period_containing(date)?
            .ok_or_else(|| PayrollError::not_found("payroll period covering", date))
    }

    /// The period with the given id.
    pub fn period_by_id(&self, period_id: i64) -> PayrollResult<PayrollPeriod> {
        self.periods
            .period_by_id(period_id)?
            .ok_or_else(|| PayrollError::not_found("payroll period", period_id))
    }

    /// Whether submissions dated `date` are accepted.
    ///
    /// A date with no covering period, a closed period, or a failed lookup
    /// all count as not open.
    pub fn is_open(&self, date: NaiveDate) -> bool {
        match self.periods.period_containing(date) {
            Ok(Some(period)) => period.is_open(),
            Ok(None) => false,
            Err(err) => {
                warn!(date = %date, error = %err, "period lookup failed, treating date as closed");
                false
            }
        }
    }
}
