//! Payroll services.
//!
//! The services own the payroll workflows: validating employee submissions,
//! closing periods, generating payslips and answering payslip queries. They
//! depend only on the store traits, injected at construction.

mod audit;
mod batch;
mod queries;
mod registry;
mod submission;

#[cfg(test)]
pub(crate) mod test_support;

use std::sync::Arc;

pub use audit::AuditEmitter;
pub use batch::PayrollBatchGenerator;
pub use queries::PayslipQueries;
pub use registry::PeriodRegistry;
pub use submission::{MAX_REIMBURSEMENT_AMOUNT, OVERTIME_HOURS_RANGE, SubmissionValidator};

use crate::error::{PayrollError, PayrollResult};
use crate::models::Actor;
use crate::store::{AuditSink, PayslipStore, PeriodStore, RecordStore, SalaryStore};

/// Fails with [`PayrollError::AdminRequired`] unless `actor` is an admin.
pub fn require_admin(actor: &Actor) -> PayrollResult<()> {
    if actor.is_admin() {
        Ok(())
    } else {
        Err(PayrollError::AdminRequired)
    }
}

/// Every payroll service wired to one backing store.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use payroll_engine::service::PayrollServices;
/// use payroll_engine::store::InMemoryStore;
///
/// let services = PayrollServices::new(Arc::new(InMemoryStore::new()));
/// assert!(services.registry.period_by_id(1).is_err());
/// ```
#[derive(Clone)]
pub struct PayrollServices {
    /// Period lookups.
    pub registry: PeriodRegistry,
    /// Employee submissions.
    pub submissions: SubmissionValidator,
    /// Period closing and payslip generation.
    pub batch: PayrollBatchGenerator,
    /// Payslip lookups and breakdowns.
    pub queries: PayslipQueries,
}

impl PayrollServices {
    /// Wires every service to `store`.
    pub fn new<S>(store: Arc<S>) -> Self
    where
        S: PeriodStore + RecordStore + SalaryStore + PayslipStore + AuditSink + 'static,
    {
        let periods: Arc<dyn PeriodStore> = store.clone();
        let records: Arc<dyn RecordStore> = store.clone();
        let salaries: Arc<dyn SalaryStore> = store.clone();
        let payslips: Arc<dyn PayslipStore> = store.clone();
        let audit = AuditEmitter::new(store);

        let registry = PeriodRegistry::new(periods.clone());
        Self {
            submissions: SubmissionValidator::new(registry.clone(), records.clone(), audit.clone()),
            batch: PayrollBatchGenerator::new(
                periods.clone(),
                records.clone(),
                salaries.clone(),
                payslips.clone(),
                audit,
            ),
            queries: PayslipQueries::new(periods, records, salaries, payslips),
            registry,
        }
    }
}
