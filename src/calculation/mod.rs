//! Calculation logic for the payroll engine.
//!
//! This module contains the payslip calculator and the individual rules it
//! is built from: rate derivation, attendance pay with per-day hour
//! truncation, double-rate overtime pay, reimbursement totalling and
//! currency rounding.

mod attendance_pay;
mod overtime_pay;
mod payslip;
mod rates;
mod reimbursement_total;
mod rounding;

pub use attendance_pay::{AttendancePayResult, calculate_attendance_pay};
pub use overtime_pay::{OVERTIME_MULTIPLIER, OvertimePayResult, calculate_overtime_pay};
pub use payslip::{PayslipCalculation, generate_payslip};
pub use rates::{HOURS_PER_DAY, PayRates, PayRatesResult, derive_pay_rates};
pub use reimbursement_total::{ReimbursementTotalResult, total_reimbursements};
pub use rounding::{CURRENCY_SCALE, round_currency};
