//! Payroll period model.
//!
//! This module contains the [`PayrollPeriod`] type, its [`PeriodStatus`]
//! lifecycle, and the monthly series generator used to seed periods.

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a payroll period.
///
/// A period only ever moves from `Open` to `Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodStatus {
    /// Submissions dated inside the period are accepted.
    Open,
    /// The period is frozen; payslips may be generated.
    Closed,
}

/// A fixed payroll date range with its open/closed status.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{PayrollPeriod, PeriodStatus};
/// use chrono::NaiveDate;
///
/// let period = PayrollPeriod {
///     id: 1,
///     period_start: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
///     period_end: NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
///     working_days: 22,
///     status: PeriodStatus::Open,
/// };
///
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()));
/// assert!(period.is_open());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollPeriod {
    /// Identifier of the period.
    pub id: i64,
    /// First day of the period (inclusive).
    pub period_start: NaiveDate,
    /// Last day of the period (inclusive).
    pub period_end: NaiveDate,
    /// Number of business days in the period, used as the salary divisor.
    pub working_days: u32,
    /// Current lifecycle state.
    pub status: PeriodStatus,
}

impl PayrollPeriod {
    /// Checks if a given date falls within this period, inclusive of both ends.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.period_start && date <= self.period_end
    }

    /// Returns true while the period still accepts submissions.
    pub fn is_open(&self) -> bool {
        self.status == PeriodStatus::Open
    }

    /// Returns true if the two periods share at least one date.
    pub fn overlaps(&self, other: &PayrollPeriod) -> bool {
        self.period_start <= other.period_end && other.period_start <= self.period_end
    }
}

/// Returns true for Saturday and Sunday.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Counts the Monday–Friday dates in `[start, end]`.
///
/// Returns zero when `end` precedes `start`.
///
/// # Example
///
/// ```
/// use payroll_engine::models::count_working_days;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2026, 1, 31).unwrap();
/// assert_eq!(count_working_days(start, end), 22);
/// ```
pub fn count_working_days(start: NaiveDate, end: NaiveDate) -> u32 {
    start
        .iter_days()
        .take_while(|day| *day <= end)
        .filter(|day| !is_weekend(*day))
        .count() as u32
}

/// Generates `count` consecutive month-long periods starting at `first_start`.
///
/// Each period runs from its start date to the day before the same day of the
/// following month. Ids are assigned from 1. Periods ending on or before
/// `closed_through` are generated as [`PeriodStatus::Closed`], the rest as
/// [`PeriodStatus::Open`]. Generation stops early if the calendar overflows.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{monthly_periods, PeriodStatus};
/// use chrono::NaiveDate;
///
/// let periods = monthly_periods(
///     NaiveDate::from_ymd_opt(2023, 10, 10).unwrap(),
///     3,
///     Some(NaiveDate::from_ymd_opt(2023, 11, 30).unwrap()),
/// );
///
/// assert_eq!(periods.len(), 3);
/// assert_eq!(periods[0].period_end, NaiveDate::from_ymd_opt(2023, 11, 9).unwrap());
/// assert_eq!(periods[0].status, PeriodStatus::Closed);
/// assert_eq!(periods[1].period_start, NaiveDate::from_ymd_opt(2023, 11, 10).unwrap());
/// assert_eq!(periods[2].status, PeriodStatus::Open);
/// ```
pub fn monthly_periods(
    first_start: NaiveDate,
    count: u32,
    closed_through: Option<NaiveDate>,
) -> Vec<PayrollPeriod> {
    let mut periods = Vec::with_capacity(count as usize);

    for index in 0..count {
        let Some(period_start) = first_start.checked_add_months(Months::new(index)) else {
            break;
        };
        let Some(period_end) = first_start
            .checked_add_months(Months::new(index + 1))
            .and_then(|next| next.checked_sub_days(Days::new(1)))
        else {
            break;
        };

        let status = match closed_through {
            Some(cutoff) if period_end <= cutoff => PeriodStatus::Closed,
            _ => PeriodStatus::Open,
        };

        periods.push(PayrollPeriod {
            id: i64::from(index) + 1,
            period_start,
            period_end,
            working_days: count_working_days(period_start, period_end),
            status,
        });
    }

    periods
}
