//! Base salary history.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of an employee's base salary history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseSalary {
    /// The employee.
    pub user_id: i64,
    /// Monthly base salary amount.
    pub amount: Decimal,
    /// First date this amount applies from.
    pub effective_from: NaiveDate,
}

/// Resolves the salary in force on `as_of` for every employee in `history`.
///
/// For each user the latest row with `effective_from <= as_of` wins. Users
/// with no such row are left out. When `user_id` is given only that user's
/// rows are considered. The result is ordered by user id.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{resolve_effective_salaries, BaseSalary};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let history = vec![
///     BaseSalary { user_id: 1, amount: Decimal::new(3_000_000, 0), effective_from: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap() },
///     BaseSalary { user_id: 1, amount: Decimal::new(4_000_000, 0), effective_from: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap() },
/// ];
///
/// let resolved = resolve_effective_salaries(&history, NaiveDate::from_ymd_opt(2025, 12, 1).unwrap(), None);
/// assert_eq!(resolved[0].amount, Decimal::new(3_000_000, 0));
/// ```
pub fn resolve_effective_salaries(
    history: &[BaseSalary],
    as_of: NaiveDate,
    user_id: Option<i64>,
) -> Vec<BaseSalary> {
    let mut latest: BTreeMap<i64, &BaseSalary> = BTreeMap::new();

    for row in history
        .iter()
        .filter(|row| row.effective_from <= as_of)
        .filter(|row| user_id.is_none_or(|id| row.user_id == id))
    {
        latest
            .entry(row.user_id)
            .and_modify(|current| {
                if row.effective_from >= current.effective_from {
                    *current = row;
                }
            })
            .or_insert(row);
    }

    latest.into_values().cloned().collect()
}
