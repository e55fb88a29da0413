//! Daily and hourly pay rate derivation.
//!
//! A period's base salary is spread evenly over its working days, and each
//! working day is worth [`HOURS_PER_DAY`] paid hours.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{PayrollError, PayrollResult};
use crate::models::{BaseSalary, CalculationStep, PayrollPeriod};

/// Paid hours in one working day.
pub const HOURS_PER_DAY: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

/// Rates derived from a base salary for one period, at full precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayRates {
    /// Base salary divided by the period's working days.
    pub per_day: Decimal,
    /// Daily rate divided by [`HOURS_PER_DAY`].
    pub per_hour: Decimal,
}

/// The derived rates and the trace step documenting them.
#[derive(Debug, Clone)]
pub struct PayRatesResult {
    /// The derived rates.
    pub rates: PayRates,
    /// The calculation step recording the derivation.
    pub step: CalculationStep,
}

/// Derives the daily and hourly rates for an employee in a period.
///
/// # Errors
///
/// Returns [`PayrollError::DivisionUndefined`] when the period has zero
/// working days. This is a period configuration error and is not retryable.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::derive_pay_rates;
/// use payroll_engine::models::{BaseSalary, PayrollPeriod, PeriodStatus};
/// use chrono::NaiveDate;
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
///     user_id: 1,
///     amount: Decimal::new(4_000_000, 0),
///     effective_from: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
/// };
///
/// let result = derive_pay_rates(&period, &salary, 1).unwrap();
/// assert_eq!(result.rates.per_day, Decimal::new(200_000, 0));
/// assert_eq!(result.rates.per_hour, Decimal::new(25_000, 0));
/// ```
pub fn derive_pay_rates(
    period: &PayrollPeriod,
    base_salary: &BaseSalary,
    step_number: u32,
) -> PayrollResult<PayRatesResult> {
    if period.working_days == 0 {
        return Err(PayrollError::DivisionUndefined {
            period_id: period.id,
        });
    }

    let per_day = base_salary.amount / Decimal::from(period.working_days);
    let per_hour = per_day / HOURS_PER_DAY;

    let step = CalculationStep {
        step_number,
        rule_id: "pay_rate_derivation".to_string(),
        rule_name: "Pay Rate Derivation".to_string(),
        input: serde_json::json!({
            "base_salary": base_salary.amount.normalize().to_string(),
            "working_days": period.working_days,
            "hours_per_day": HOURS_PER_DAY.to_string(),
        }),
        output: serde_json::json!({
            "rate_per_day": per_day.normalize().to_string(),
            "rate_per_hour": per_hour.normalize().to_string(),
        }),
        reasoning: format!(
            "{} base salary over {} working days of {} hours",
            base_salary.amount.normalize(),
            period.working_days,
            HOURS_PER_DAY
        ),
    };

    Ok(PayRatesResult {
        rates: PayRates { per_day, per_hour },
        step,
    })
}
