//! Shared fixtures for the service tests.

use chrono::NaiveDate;

use crate::models::{
    Actor, AttendanceRecord, AuditLogEntry, BaseSalary, OvertimeRecord, PayrollPeriod,
    PeriodStatus, Payslip, ReimbursementRecord, Role, count_working_days,
};
use crate::store::{
    AuditSink, PayslipStore, PeriodStore, RecordStore, SalaryStore, StoreError, StoreResult,
};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn open_period(id: i64, start: NaiveDate, end: NaiveDate) -> PayrollPeriod {
    PayrollPeriod {
        id,
        period_start: start,
        period_end: end,
        working_days: count_working_days(start, end),
        status: PeriodStatus::Open,
    }
}

pub fn salary(user_id: i64, amount: i64, effective_from: NaiveDate) -> BaseSalary {
    BaseSalary {
        user_id,
        amount: rust_decimal::Decimal::new(amount, 0),
        effective_from,
    }
}

pub fn employee(user_id: i64) -> Actor {
    Actor {
        user_id,
        username: format!("user{}", user_id),
        role: Role::Employee,
        request_id: format!("req-{}", user_id),
        ip_address: Some("10.0.0.1".to_string()),
    }
}

pub fn admin() -> Actor {
    Actor {
        user_id: 900,
        username: "admin".to_string(),
        role: Role::Admin,
        request_id: "req-admin".to_string(),
        ip_address: None,
    }
}

fn down<T>() -> StoreResult<T> {
    Err(StoreError::Unavailable("connection refused".to_string()))
}

/// A store whose every call fails.
pub struct FailingStore;

impl PeriodStore for FailingStore {
    fn period_by_id(&self, _: i64) -> StoreResult<Option<PayrollPeriod>> {
        down()
    }
    fn period_containing(&self, _: NaiveDate) -> StoreResult<Option<PayrollPeriod>> {
        down()
    }
    fn close_period(&self, _: i64) -> StoreResult<Option<PayrollPeriod>> {
        down()
    }
}

impl RecordStore for FailingStore {
    fn upsert_attendance(&self, _: AttendanceRecord) -> StoreResult<AttendanceRecord> {
        down()
    }
    fn upsert_overtime(&self, _: OvertimeRecord) -> StoreResult<OvertimeRecord> {
        down()
    }
    fn upsert_reimbursement(&self, _: ReimbursementRecord) -> StoreResult<ReimbursementRecord> {
        down()
    }
    fn attendance_on(&self, _: i64, _: NaiveDate) -> StoreResult<Option<AttendanceRecord>> {
        down()
    }
    fn attendance_between(
        &self,
        _: NaiveDate,
        _: NaiveDate,
        _: Option<i64>,
    ) -> StoreResult<Vec<AttendanceRecord>> {
        down()
    }
    fn overtime_between(
        &self,
        _: NaiveDate,
        _: NaiveDate,
        _: Option<i64>,
    ) -> StoreResult<Vec<OvertimeRecord>> {
        down()
    }
    fn reimbursements_between(
        &self,
        _: NaiveDate,
        _: NaiveDate,
        _: Option<i64>,
    ) -> StoreResult<Vec<ReimbursementRecord>> {
        down()
    }
}

impl SalaryStore for FailingStore {
    fn base_salaries_effective_at(&self, _: NaiveDate, _: Option<i64>) -> StoreResult<Vec<BaseSalary>> {
        down()
    }
}

impl PayslipStore for FailingStore {
    fn insert_payslips(&self, _: &[Payslip]) -> StoreResult<()> {
        down()
    }
    fn payslip(&self, _: i64, _: i64) -> StoreResult<Option<Payslip>> {
        down()
    }
    fn payslips_for_period(&self, _: i64) -> StoreResult<Vec<Payslip>> {
        down()
    }
}

impl AuditSink for FailingStore {
    fn record(&self, _: AuditLogEntry) -> StoreResult<()> {
        down()
    }
}
