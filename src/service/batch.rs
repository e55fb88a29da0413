//! Period closing and batch payslip generation.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info};

use crate::calculation::generate_payslip;
use crate::error::{PayrollError, PayrollResult};
use crate::models::{Actor, AuditAction, PayrollPeriod, PeriodStatus, Payslip};
use crate::store::{
    PAYSLIP_TABLE, PERIOD_TABLE, PayslipStore, PeriodStore, RecordStore, SalaryStore, StoreError,
};

use super::audit::AuditEmitter;
use super::registry::PeriodRegistry;
use super::require_admin;

/// Closes periods and generates their payslips.
#[derive(Clone)]
pub struct PayrollBatchGenerator {
    registry: PeriodRegistry,
    periods: Arc<dyn PeriodStore>,
    records: Arc<dyn RecordStore>,
    salaries: Arc<dyn SalaryStore>,
    payslips: Arc<dyn PayslipStore>,
    audit: AuditEmitter,
}

impl PayrollBatchGenerator {
    /// Creates a generator over the given stores.
    pub fn new(
        periods: Arc<dyn PeriodStore>,
        records: Arc<dyn RecordStore>,
        salaries: Arc<dyn SalaryStore>,
        payslips: Arc<dyn PayslipStore>,
        audit: AuditEmitter,
    ) -> Self {
        Self {
            registry: PeriodRegistry::new(periods.clone()),
            periods,
            records,
            salaries,
            payslips,
            audit,
        }
    }

    /// Moves a period from Open to Closed and returns the closed period.
    ///
    /// The audit payload is the period as it was before closing. Of several
    /// concurrent closes only one succeeds, the rest get `AlreadyClosed`.
    pub fn close_payroll_period(&self, actor: &Actor, period_id: i64) -> PayrollResult<PayrollPeriod> {
        require_admin(actor)?;
        let period = self.registry.period_by_id(period_id)?;
        if !period.is_open() {
            return Err(PayrollError::AlreadyClosed { period_id });
        }

        // the store re-checks the status under its own lock
        let Some(period) = self.periods.close_period(period_id)? else {
            return Err(PayrollError::AlreadyClosed { period_id });
        };
        self.audit.emit(
            actor,
            AuditAction::Update,
            "payroll_period",
            PERIOD_TABLE,
            &period,
        );
        info!(
            request_id = %actor.request_id,
            period_id,
            period_start = %period.period_start,
            period_end = %period.period_end,
            "payroll period closed"
        );

        Ok(PayrollPeriod {
            status: PeriodStatus::Closed,
            ..period
        })
    }

    /// Generates one payslip per salaried employee for a closed period and
    /// persists them as a single batch.
    ///
    /// Generation happens once per period. A second call fails with
    /// [`PayrollError::PayslipsAlreadyGenerated`].
    pub fn generate_payslips_by_period(
        &self,
        actor: &Actor,
        period_id: i64,
    ) -> PayrollResult<Vec<Payslip>> {
        require_admin(actor)?;
        let period = self.registry.period_by_id(period_id)?;
        if period.is_open() {
            return Err(PayrollError::PeriodStillOpen { period_id });
        }
        if !self.payslips.payslips_for_period(period_id)?.is_empty() {
            return Err(PayrollError::PayslipsAlreadyGenerated { period_id });
        }

        let mut salaries = self
            .salaries
            .base_salaries_effective_at(period.period_start, None)?;
        salaries.sort_by_key(|s| s.user_id);

        let (start, end) = (period.period_start, period.period_end);
        let attendance = group_by_user(self.records.attendance_between(start, end, None)?, |r| r.user_id);
        let overtime = group_by_user(self.records.overtime_between(start, end, None)?, |r| r.user_id);
        let reimbursements =
            group_by_user(self.records.reimbursements_between(start, end, None)?, |r| r.user_id);

        let mut batch = Vec::with_capacity(salaries.len());
        for salary in &salaries {
            let user_id = salary.user_id;
            let calculation = generate_payslip(
                &period,
                salary,
                records_of(&attendance, user_id),
                records_of(&overtime, user_id),
                records_of(&reimbursements, user_id),
                &actor.username,
            )?;
            debug!(
                period_id,
                user_id,
                total_take_home = %calculation.payslip.total_take_home,
                "payslip calculated"
            );
            batch.push(calculation.payslip);
        }

        self.payslips.insert_payslips(&batch).map_err(|err| match err {
            StoreError::DuplicateKey { .. } => PayrollError::PayslipsAlreadyGenerated { period_id },
            other => other.into(),
        })?;

        self.audit.emit(actor, AuditAction::Create, "payslips", PAYSLIP_TABLE, &batch);
        info!(
            request_id = %actor.request_id,
            period_id,
            payslips = batch.len(),
            "payslips generated"
        );

        Ok(batch)
    }
}

fn group_by_user<T>(records: Vec<T>, user_of: impl Fn(&T) -> i64) -> HashMap<i64, Vec<T>> {
    let mut grouped: HashMap<i64, Vec<T>> = HashMap::new();
    for record in records {
        grouped.entry(user_of(&record)).or_default().push(record);
    }
    grouped
}

fn records_of<T>(grouped: &HashMap<i64, Vec<T>>, user_id: i64) -> &[T] {
    grouped.get(&user_id).map(Vec::as_slice).unwrap_or(&[])
}
