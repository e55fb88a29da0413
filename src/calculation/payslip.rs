//! Payslip generation.
//!
//! Combines the rate derivation, attendance pay, overtime pay and
//! reimbursement steps into a single [`Payslip`]. The function is pure: the
//! same inputs always produce the same payslip.

use crate::error::{PayrollError, PayrollResult};
use crate::models::{
    AttendanceRecord, BaseSalary, CalculationStep, OvertimeRecord, PayrollPeriod, Payslip,
    ReimbursementRecord,
};

use super::attendance_pay::calculate_attendance_pay;
use super::overtime_pay::calculate_overtime_pay;
use super::rates::derive_pay_rates;
use super::reimbursement_total::total_reimbursements;

/// A generated payslip and the ordered steps that produced it.
#[derive(Debug, Clone)]
pub struct PayslipCalculation {
    /// The payslip.
    pub payslip: Payslip,
    /// Calculation steps, numbered from 1.
    pub steps: Vec<CalculationStep>,
}

/// Generates one employee's payslip for a period.
///
/// Records are taken as given; the caller is responsible for passing only
/// the employee's records dated inside the period. Empty record sets
/// contribute zero.
///
/// # Errors
///
/// Returns [`PayrollError::DivisionUndefined`] if the period has zero
/// working days, and [`PayrollError::AmountOverflow`] if any amount does not
/// fit a [`rust_decimal::Decimal`].
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::generate_payslip;
/// use payroll_engine::models::{AttendanceRecord, BaseSalary, PayrollPeriod, PeriodStatus};
/// use chrono::{DateTime, NaiveDate};
/// use rust_decimal::Decimal;
///
/// let period = PayrollPeriod {
///     id: 1,
///     period_start: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
///     period_end: NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
///     working_days: 20,
///     status: PeriodStatus::Closed,
/// };
/// let salary = BaseSalary {
///     user_id: 7,
///     amount: Decimal::new(4_000_000, 0),
///     effective_from: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
/// };
/// let attendance = vec![AttendanceRecord {
///     user_id: 7,
///     date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
///     check_in: DateTime::parse_from_rfc3339("2026-01-15T09:00:00Z").unwrap(),
///     check_out: DateTime::parse_from_rfc3339("2026-01-15T17:00:00Z").unwrap(),
///     created_by: "u7".to_string(),
///     updated_by: "u7".to_string(),
/// }];
///
/// let calculation = generate_payslip(&period, &salary, &attendance, &[], &[], "admin").unwrap();
/// assert_eq!(calculation.payslip.attendance_pay, Decimal::new(160_000, 0));
/// assert_eq!(calculation.payslip.total_take_home, Decimal::new(160_000, 0));
/// ```
pub fn generate_payslip(
    period: &PayrollPeriod,
    base_salary: &BaseSalary,
    attendance: &[AttendanceRecord],
    overtime: &[OvertimeRecord],
    reimbursements: &[ReimbursementRecord],
    created_by: &str,
) -> PayrollResult<PayslipCalculation> {
    let rates = derive_pay_rates(period, base_salary, 1)?;
    let attendance_result = calculate_attendance_pay(attendance, &rates.rates, 2)?;
    let overtime_result = calculate_overtime_pay(overtime, &rates.rates, 3)?;
    let reimbursement_result = total_reimbursements(reimbursements, 4)?;

    let total_take_home = attendance_result
        .pay
        .checked_add(overtime_result.pay)
        .and_then(|sum| sum.checked_add(reimbursement_result.total))
        .ok_or_else(|| PayrollError::overflow("total take-home pay"))?;

    let payslip = Payslip {
        user_id: base_salary.user_id,
        period_id: period.id,
        base_salary: base_salary.amount,
        attendance_days: attendance_result.days,
        attendance_hours: attendance_result.hours,
        attendance_pay: attendance_result.pay,
        overtime_hours: overtime_result.hours,
        overtime_pay: overtime_result.pay,
        reimbursement_total: reimbursement_result.total,
        total_take_home,
        created_by: created_by.to_string(),
    };

    let total_step = CalculationStep {
        step_number: 5,
        rule_id: "take_home_total".to_string(),
        rule_name: "Take-Home Total".to_string(),
        input: serde_json::json!({
            "attendance_pay": payslip.attendance_pay.to_string(),
            "overtime_pay": payslip.overtime_pay.to_string(),
            "reimbursement_total": payslip.reimbursement_total.to_string(),
        }),
        output: serde_json::json!({
            "total_take_home": total_take_home.to_string(),
        }),
        reasoning: "attendance pay + overtime pay + reimbursements".to_string(),
    };

    Ok(PayslipCalculation {
        payslip,
        steps: vec![
            rates.step,
            attendance_result.step,
            overtime_result.step,
            reimbursement_result.step,
            total_step,
        ],
    })
}
