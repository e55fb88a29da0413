//! Attendance pay calculation.
//!
//! Attended time is converted to whole hours one record at a time, so a day
//! of 7h59m contributes 7 hours even if another day also has spare minutes.

use rust_decimal::Decimal;

use crate::error::{PayrollError, PayrollResult};
use crate::models::{AttendanceRecord, CalculationStep};

use super::rates::PayRates;
use super::rounding::round_currency;

/// Attendance totals for one employee in one period.
#[derive(Debug, Clone)]
pub struct AttendancePayResult {
    /// Number of attendance records.
    pub days: u32,
    /// Sum of whole hours per record.
    pub hours: i64,
    /// `hours * rate_per_hour`, rounded to currency precision.
    pub pay: Decimal,
    /// The calculation step recording this result.
    pub step: CalculationStep,
}

/// Calculates pay for attended hours.
///
/// # Errors
///
/// Returns [`PayrollError::AmountOverflow`] if the pay does not fit a
/// [`Decimal`].
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::{calculate_attendance_pay, PayRates};
/// use payroll_engine::models::AttendanceRecord;
/// use chrono::{DateTime, NaiveDate};
/// use rust_decimal::Decimal;
///
/// let rates = PayRates { per_day: Decimal::new(200_000, 0), per_hour: Decimal::new(25_000, 0) };
/// let records = vec![AttendanceRecord {
///     user_id: 1,
///     date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
///     check_in: DateTime::parse_from_rfc3339("2026-01-15T09:00:00Z").unwrap(),
///     check_out: DateTime::parse_from_rfc3339("2026-01-15T17:00:00Z").unwrap(),
///     created_by: "alice".to_string(),
///     updated_by: "alice".to_string(),
/// }];
///
/// let result = calculate_attendance_pay(&records, &rates, 2).unwrap();
/// assert_eq!(result.days, 1);
/// assert_eq!(result.hours, 8);
/// assert_eq!(result.pay, Decimal::new(200_000, 0));
/// ```
pub fn calculate_attendance_pay(
    records: &[AttendanceRecord],
    rates: &PayRates,
    step_number: u32,
) -> PayrollResult<AttendancePayResult> {
    let days = records.len() as u32;
    let hours: i64 = records.iter().map(AttendanceRecord::whole_hours).sum();
    let pay = Decimal::from(hours)
        .checked_mul(rates.per_hour)
        .map(round_currency)
        .ok_or_else(|| PayrollError::overflow("attendance pay"))?;

    let step = CalculationStep {
        step_number,
        rule_id: "attendance_pay".to_string(),
        rule_name: "Attendance Pay".to_string(),
        input: serde_json::json!({
            "records": records.len(),
            "hours_per_record": records.iter().map(AttendanceRecord::whole_hours).collect::<Vec<_>>(),
            "rate_per_hour": rates.per_hour.normalize().to_string(),
        }),
        output: serde_json::json!({
            "attendance_days": days,
            "attendance_hours": hours,
            "attendance_pay": pay.to_string(),
        }),
        reasoning: format!(
            "{} whole hours over {} days at {} per hour, partial hours truncated per day",
            hours,
            days,
            rates.per_hour.round_dp(2)
        ),
    };

    Ok(AttendancePayResult {
        days,
        hours,
        pay,
        step,
    })
}
