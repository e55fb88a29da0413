//! Payslip models.
//!
//! This module contains the [`Payslip`] produced for one employee in one
//! closed period, the [`CalculationStep`] trace that explains how it was
//! derived, and the read-side aggregates built around payslips.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{PayrollError, PayrollResult};

use super::{AttendanceRecord, OvertimeRecord, PayrollPeriod, ReimbursementRecord};

/// A single step in a payslip calculation trace.
///
/// Each step captures the input, output, and reasoning for one rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The computed take-home breakdown for one employee for one period.
///
/// Currency amounts carry two decimal places, and
/// `total_take_home == attendance_pay + overtime_pay + reimbursement_total`
/// holds exactly.
///
/// # Example
///
/// ```
/// use payroll_engine::models::Payslip;
/// use rust_decimal::Decimal;
///
/// let payslip = Payslip {
///     user_id: 1,
///     period_id: 1,
///     base_salary: Decimal::new(4_000_000, 0),
///     attendance_days: 1,
///     attendance_hours: 8,
///     attendance_pay: Decimal::new(16_000_000, 2),
///     overtime_hours: 0,
///     overtime_pay: Decimal::ZERO,
///     reimbursement_total: Decimal::ZERO,
///     total_take_home: Decimal::new(16_000_000, 2),
///     created_by: "admin".to_string(),
/// };
/// assert!(payslip.is_balanced());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payslip {
    /// The employee.
    pub user_id: i64,
    /// The period the payslip covers.
    pub period_id: i64,
    /// Base salary in force at the period start.
    pub base_salary: Decimal,
    /// Number of attended days.
    pub attendance_days: u32,
    /// Attended whole hours, truncated per day.
    pub attendance_hours: i64,
    /// Pay for attended hours.
    pub attendance_pay: Decimal,
    /// Total overtime hours.
    pub overtime_hours: u32,
    /// Pay for overtime hours.
    pub overtime_pay: Decimal,
    /// Sum of reimbursement claims.
    pub reimbursement_total: Decimal,
    /// Attendance pay plus overtime pay plus reimbursements.
    pub total_take_home: Decimal,
    /// Who generated the payslip.
    pub created_by: String,
}

impl Payslip {
    /// Checks the take-home identity.
    pub fn is_balanced(&self) -> bool {
        self.attendance_pay
            .checked_add(self.overtime_pay)
            .and_then(|sum| sum.checked_add(self.reimbursement_total))
            .is_some_and(|sum| sum == self.total_take_home)
    }
}

/// All payslips of a closed period with the period-wide take-home total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollSummary {
    /// The period summarised.
    pub period_id: i64,
    /// One payslip per employee.
    pub payslips: Vec<Payslip>,
    /// Sum of every payslip's take-home pay.
    pub total_take_home: Decimal,
}

impl PayrollSummary {
    /// Builds a summary, totalling the payslips' take-home pay.
    ///
    /// # Errors
    ///
    /// Returns [`PayrollError::AmountOverflow`] if the period total does not
    /// fit a [`Decimal`].
    pub fn new(period_id: i64, payslips: Vec<Payslip>) -> PayrollResult<Self> {
        let total_take_home = payslips
            .iter()
            .try_fold(Decimal::ZERO, |sum, p| sum.checked_add(p.total_take_home))
            .ok_or_else(|| PayrollError::overflow("period take-home total"))?;
        Ok(Self {
            period_id,
            payslips,
            total_take_home,
        })
    }
}

/// An employee's payslip together with every record it was derived from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayslipBreakdown {
    /// The computed payslip.
    pub summary: Payslip,
    /// The period the payslip covers.
    pub period_detail: PayrollPeriod,
    /// Attendance records used.
    pub attendances: Vec<AttendanceRecord>,
    /// Overtime records used.
    pub overtimes: Vec<OvertimeRecord>,
    /// Reimbursement records used.
    pub reimbursements: Vec<ReimbursementRecord>,
    /// How each figure was derived.
    pub steps: Vec<CalculationStep>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payslip(user_id: i64, take_home: i64) -> Payslip {
        Payslip {
            user_id,
            period_id: 1,
            base_salary: Decimal::new(4_000_000, 0),
            attendance_days: 0,
            attendance_hours: 0,
            attendance_pay: Decimal::new(take_home, 2),
            overtime_pay: Decimal::ZERO,
            overtime_hours: 0,
            reimbursement_total: Decimal::ZERO,
            total_take_home: Decimal::new(take_home, 2),
            created_by: "admin".to_string(),
        }
    }

    #[test]
    fn test_summary_totals_take_home() {
        let summary = PayrollSummary::new(1, vec![payslip(1, 10050), payslip(2, 20025)]).unwrap();
        assert_eq!(summary.total_take_home, Decimal::new(30075, 2));
        assert_eq!(summary.payslips.len(), 2);
    }

    #[test]
    fn test_empty_summary_totals_zero() {
        let summary = PayrollSummary::new(9, vec![]).unwrap();
        assert_eq!(summary.total_take_home, Decimal::ZERO);
    }

    #[test]
    fn test_summary_total_past_decimal_range_fails() {
        let mut first = payslip(1, 0);
        first.total_take_home = Decimal::MAX;
        let result = PayrollSummary::new(1, vec![first, payslip(2, 100)]);
        assert!(matches!(result, Err(PayrollError::AmountOverflow { .. })));
    }

    #[test]
    fn test_unbalanced_payslip_detected() {
        let mut slip = payslip(1, 10000);
        slip.total_take_home += Decimal::ONE;
        assert!(!slip.is_balanced());
    }

    #[test]
    fn test_payslip_serializes_amounts_as_strings() {
        let json = serde_json::to_string(&payslip(1, 16000000)).unwrap();
        assert!(json.contains("\"total_take_home\":\"160000.00\""));
    }
}
