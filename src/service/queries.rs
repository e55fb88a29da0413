//! Read-side payslip queries.

use std::sync::Arc;

use tracing::debug;

use crate::calculation::generate_payslip;
use crate::error::{PayrollError, PayrollResult};
use crate::models::{Actor, PayrollPeriod, PayrollSummary, Payslip, PayslipBreakdown};
use crate::store::{PayslipStore, PeriodStore, RecordStore, SalaryStore};

use super::registry::PeriodRegistry;

/// Answers payslip lookups and computes live breakdowns.
#[derive(Clone)]
pub struct PayslipQueries {
    registry: PeriodRegistry,
    records: Arc<dyn RecordStore>,
    salaries: Arc<dyn SalaryStore>,
    payslips: Arc<dyn PayslipStore>,
}

impl PayslipQueries {
    /// Creates the query service.
    pub fn new(
        periods: Arc<dyn PeriodStore>,
        records: Arc<dyn RecordStore>,
        salaries: Arc<dyn SalaryStore>,
        payslips: Arc<dyn PayslipStore>,
    ) -> Self {
        Self {
            registry: PeriodRegistry::new(periods),
            records,
            salaries,
            payslips,
        }
    }

    /// One employee's stored payslip for a closed period.
    pub fn payslip(&self, user_id: i64, period_id: i64) -> PayrollResult<Payslip> {
        self.closed_period(period_id)?;
        self.payslips
            .payslip(user_id, period_id)?
            .ok_or_else(|| PayrollError::not_found("payslip", format!("user {} period {}", user_id, period_id)))
    }

    /// Every stored payslip of a closed period with the period total.
    pub fn payslips(&self, period_id: i64) -> PayrollResult<PayrollSummary> {
        self.closed_period(period_id)?;
        let payslips = self.payslips.payslips_for_period(period_id)?;
        PayrollSummary::new(period_id, payslips)
    }

    /// Computes the caller's payslip for a period from their current
    /// records, together with those records and the calculation steps.
    ///
    /// Nothing is persisted. The period may still be open, in which case the
    /// figures reflect what has been submitted so far.
    pub fn payslip_breakdown(&self, actor: &Actor, period_id: i64) -> PayrollResult<PayslipBreakdown> {
        let period = self.registry.period_by_id(period_id)?;
        let user_id = actor.user_id;

        let salaries = self
            .salaries
            .base_salaries_effective_at(period.period_start, Some(user_id))?;
        let [salary] = salaries.as_slice() else {
            return Err(PayrollError::SalaryNotResolved {
                user_id,
                period_id,
                count: salaries.len(),
            });
        };

        let (start, end) = (period.period_start, period.period_end);
        let attendances = self.records.attendance_between(start, end, Some(user_id))?;
        let overtimes = self.records.overtime_between(start, end, Some(user_id))?;
        let reimbursements = self.records.reimbursements_between(start, end, Some(user_id))?;

        let calculation = generate_payslip(
            &period,
            salary,
            &attendances,
            &overtimes,
            &reimbursements,
            &actor.username,
        )?;
        debug!(
            request_id = %actor.request_id,
            user_id,
            period_id,
            total_take_home = %calculation.payslip.total_take_home,
            "payslip breakdown computed"
        );

        Ok(PayslipBreakdown {
            summary: calculation.payslip,
            period_detail: period,
            attendances,
            overtimes,
            reimbursements,
            steps: calculation.steps,
        })
    }

    fn closed_period(&self, period_id: i64) -> PayrollResult<PayrollPeriod> {
        let period = self.registry.period_by_id(period_id)?;
        if period.is_open() {
            return Err(PayrollError::PeriodStillOpen { period_id });
        }
        Ok(period)
    }
}
