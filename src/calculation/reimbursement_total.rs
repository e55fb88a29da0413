//! Reimbursement totalling.

use rust_decimal::Decimal;

use crate::error::{PayrollError, PayrollResult};
use crate::models::{CalculationStep, ReimbursementRecord};

use super::rounding::round_currency;

/// Reimbursement total for one employee in one period.
#[derive(Debug, Clone)]
pub struct ReimbursementTotalResult {
    /// Sum of claimed amounts.
    pub total: Decimal,
    /// The calculation step recording this result.
    pub step: CalculationStep,
}

/// Sums the reimbursement claims.
///
/// # Errors
///
/// Returns [`PayrollError::AmountOverflow`] if the total does not fit a
/// [`Decimal`].
pub fn total_reimbursements(
    records: &[ReimbursementRecord],
    step_number: u32,
) -> PayrollResult<ReimbursementTotalResult> {
    let total = records
        .iter()
        .try_fold(Decimal::ZERO, |sum, record| sum.checked_add(record.amount))
        .map(round_currency)
        .ok_or_else(|| PayrollError::overflow("reimbursement total"))?;

    let step = CalculationStep {
        step_number,
        rule_id: "reimbursement_total".to_string(),
        rule_name: "Reimbursement Total".to_string(),
        input: serde_json::json!({
            "amounts": records.iter().map(|r| r.amount.to_string()).collect::<Vec<_>>(),
        }),
        output: serde_json::json!({
            "reimbursement_total": total.to_string(),
        }),
        reasoning: format!("{} reimbursement claims totalling {}", records.len(), total),
    };

    Ok(ReimbursementTotalResult { total, step })
}
