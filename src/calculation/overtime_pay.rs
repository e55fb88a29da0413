//! Overtime pay calculation.
//!
//! Overtime hours are paid at [`OVERTIME_MULTIPLIER`] times the hourly rate.

use rust_decimal::Decimal;

use crate::error::{PayrollError, PayrollResult};
use crate::models::{CalculationStep, OvertimeRecord};

use super::rates::PayRates;
use super::rounding::round_currency;

/// Overtime pay multiplier applied to the hourly rate.
pub const OVERTIME_MULTIPLIER: Decimal = Decimal::from_parts(2, 0, 0, false, 0);

/// Overtime totals for one employee in one period.
#[derive(Debug, Clone)]
pub struct OvertimePayResult {
    /// Sum of claimed overtime hours.
    pub hours: u32,
    /// `hours * rate_per_hour * 2`, rounded to currency precision.
    pub pay: Decimal,
    /// The calculation step recording this result.
    pub step: CalculationStep,
}

/// Calculates pay for overtime hours.
///
/// # Errors
///
/// Returns [`PayrollError::AmountOverflow`] if the pay does not fit a
/// [`Decimal`].
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::{calculate_overtime_pay, PayRates};
/// use payroll_engine::models::OvertimeRecord;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let rates = PayRates { per_day: Decimal::new(200_000, 0), per_hour: Decimal::new(25_000, 0) };
/// let records = vec![OvertimeRecord {
///     user_id: 1,
///     date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
///     duration_hours: 2,
///     created_by: "alice".to_string(),
///     updated_by: "alice".to_string(),
/// }];
///
/// let result = calculate_overtime_pay(&records, &rates, 3).unwrap();
/// assert_eq!(result.hours, 2);
/// assert_eq!(result.pay, Decimal::new(100_000, 0));
/// ```
pub fn calculate_overtime_pay(
    records: &[OvertimeRecord],
    rates: &PayRates,
    step_number: u32,
) -> PayrollResult<OvertimePayResult> {
    let hours: u32 = records.iter().map(|r| r.duration_hours).sum();
    let pay = Decimal::from(hours)
        .checked_mul(rates.per_hour)
        .and_then(|amount| amount.checked_mul(OVERTIME_MULTIPLIER))
        .map(round_currency)
        .ok_or_else(|| PayrollError::overflow("overtime pay"))?;

    let step = CalculationStep {
        step_number,
        rule_id: "overtime_pay".to_string(),
        rule_name: "Overtime Pay".to_string(),
        input: serde_json::json!({
            "records": records.len(),
            "rate_per_hour": rates.per_hour.normalize().to_string(),
            "multiplier": OVERTIME_MULTIPLIER.to_string(),
        }),
        output: serde_json::json!({
            "overtime_hours": hours,
            "overtime_pay": pay.to_string(),
        }),
        reasoning: format!(
            "{} overtime hours at {}x the hourly rate",
            hours, OVERTIME_MULTIPLIER
        ),
    };

    Ok(OvertimePayResult { hours, pay, step })
}
