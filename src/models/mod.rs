//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod actor;
mod audit;
mod payslip;
mod period;
mod records;
mod salary;
mod submission;

pub use actor::{Actor, Role};
pub use audit::{AuditAction, AuditLogEntry};
pub use payslip::{CalculationStep, PayrollSummary, Payslip, PayslipBreakdown};
pub use period::{PayrollPeriod, PeriodStatus, count_working_days, is_weekend, monthly_periods};
pub use records::{AttendanceRecord, OvertimeRecord, RecordKind, ReimbursementRecord};
pub use salary::{BaseSalary, resolve_effective_salaries};
pub use submission::{SubmitAttendanceRequest, SubmitOvertimeRequest, SubmitReimbursementRequest};
