//! In-memory implementation of every store port.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveDate;

use crate::models::{
    AttendanceRecord, AuditLogEntry, BaseSalary, OvertimeRecord, PayrollPeriod, PeriodStatus,
    Payslip, ReimbursementRecord, resolve_effective_salaries,
};

use super::{
    AuditSink, PAYSLIP_TABLE, PERIOD_TABLE, PayslipStore, PeriodStore, RecordStore, SalaryStore,
    StoreError, StoreResult,
};

type DayKey = (i64, NaiveDate);

/// A process-local store holding every table behind its own lock.
///
/// Each write takes the table's write lock for its whole duration, which is
/// what makes the upserts and the payslip batch insert atomic.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{PayrollPeriod, PeriodStatus};
/// use payroll_engine::store::{InMemoryStore, PeriodStore};
/// use chrono::NaiveDate;
///
/// let store = InMemoryStore::new();
/// store.insert_period(PayrollPeriod {
///     id: 1,
///     period_start: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
///     period_end: NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
///     working_days: 22,
///     status: PeriodStatus::Open,
/// }).unwrap();
///
/// let found = store.period_containing(NaiveDate::from_ymd_opt(2026, 1, 9).unwrap()).unwrap();
/// assert_eq!(found.map(|p| p.id), Some(1));
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    periods: RwLock<BTreeMap<i64, PayrollPeriod>>,
    attendance: RwLock<BTreeMap<DayKey, AttendanceRecord>>,
    overtime: RwLock<BTreeMap<DayKey, OvertimeRecord>>,
    reimbursements: RwLock<BTreeMap<DayKey, ReimbursementRecord>>,
    salaries: RwLock<Vec<BaseSalary>>,
    // keyed by (period_id, user_id)
    payslips: RwLock<BTreeMap<(i64, i64), Payslip>>,
    audit_log: RwLock<Vec<AuditLogEntry>>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with periods and salary history.
    pub fn seeded(periods: Vec<PayrollPeriod>, salaries: Vec<BaseSalary>) -> StoreResult<Self> {
        let store = Self::new();
        for period in periods {
            store.insert_period(period)?;
        }
        for salary in salaries {
            store.insert_base_salary(salary)?;
        }
        Ok(store)
    }

    /// Adds a period. Rejects a reused id or a range overlapping an
    /// existing period.
    pub fn insert_period(&self, period: PayrollPeriod) -> StoreResult<()> {
        let mut periods = write(&self.periods)?;

        if periods.contains_key(&period.id) {
            return Err(StoreError::DuplicateKey {
                table: PERIOD_TABLE.to_string(),
                key: period.id.to_string(),
            });
        }
        if let Some(existing) = periods.values().find(|p| p.overlaps(&period)) {
            return Err(StoreError::DuplicateKey {
                table: PERIOD_TABLE.to_string(),
                key: format!(
                    "{}..{} overlaps period {}",
                    period.period_start, period.period_end, existing.id
                ),
            });
        }

        periods.insert(period.id, period);
        Ok(())
    }

    /// Appends a base salary history row.
    pub fn insert_base_salary(&self, salary: BaseSalary) -> StoreResult<()> {
        write(&self.salaries)?.push(salary);
        Ok(())
    }

    /// Every audit entry recorded so far, oldest first.
    pub fn audit_entries(&self) -> StoreResult<Vec<AuditLogEntry>> {
        Ok(read(&self.audit_log)?.clone())
    }
}

fn read<T>(lock: &RwLock<T>) -> StoreResult<RwLockReadGuard<'_, T>> {
    lock.read()
        .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))
}

fn write<T>(lock: &RwLock<T>) -> StoreResult<RwLockWriteGuard<'_, T>> {
    lock.write()
        .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))
}

fn in_range<R: Clone>(
    table: &BTreeMap<DayKey, R>,
    start: NaiveDate,
    end: NaiveDate,
    user_id: Option<i64>,
) -> Vec<R> {
    table
        .iter()
        .filter(|((user, date), _)| {
            *date >= start && *date <= end && user_id.is_none_or(|id| id == *user)
        })
        .map(|(_, record)| record.clone())
        .collect()
}

impl PeriodStore for InMemoryStore {
    fn period_by_id(&self, period_id: i64) -> StoreResult<Option<PayrollPeriod>> {
        Ok(read(&self.periods)?.get(&period_id).cloned())
    }

    fn period_containing(&self, date: NaiveDate) -> StoreResult<Option<PayrollPeriod>> {
        Ok(read(&self.periods)?
            .values()
            .find(|p| p.contains_date(date))
            .cloned())
    }

    fn close_period(&self, period_id: i64) -> StoreResult<Option<PayrollPeriod>> {
        let mut periods = write(&self.periods)?;
        let period = periods
            .get_mut(&period_id)
            .ok_or_else(|| StoreError::MissingRow {
                table: PERIOD_TABLE.to_string(),
                key: period_id.to_string(),
            })?;
        if !period.is_open() {
            return Ok(None);
        }
        let previous = period.clone();
        period.status = PeriodStatus::Closed;
        Ok(Some(previous))
    }
}

impl RecordStore for InMemoryStore {
    fn upsert_attendance(&self, record: AttendanceRecord) -> StoreResult<AttendanceRecord> {
        let mut table = write(&self.attendance)?;
        let stored = table
            .entry((record.user_id, record.date))
            .and_modify(|existing| {
                existing.check_in = record.check_in;
                existing.check_out = record.check_out;
                existing.updated_by = record.updated_by.clone();
            })
            .or_insert(record);
        Ok(stored.clone())
    }

    fn upsert_overtime(&self, record: OvertimeRecord) -> StoreResult<OvertimeRecord> {
        let mut table = write(&self.overtime)?;
        let stored = table
            .entry((record.user_id, record.date))
            .and_modify(|existing| {
                existing.duration_hours = record.duration_hours;
                existing.updated_by = record.updated_by.clone();
            })
            .or_insert(record);
        Ok(stored.clone())
    }

    fn upsert_reimbursement(
        &self,
        record: ReimbursementRecord,
    ) -> StoreResult<ReimbursementRecord> {
        let mut table = write(&self.reimbursements)?;
        let stored = table
            .entry((record.user_id, record.date))
            .and_modify(|existing| {
                existing.amount = record.amount;
                existing.description = record.description.clone();
                existing.updated_by = record.updated_by.clone();
            })
            .or_insert(record);
        Ok(stored.clone())
    }

    fn attendance_on(
        &self,
        user_id: i64,
        date: NaiveDate,
    ) -> StoreResult<Option<AttendanceRecord>> {
        Ok(read(&self.attendance)?.get(&(user_id, date)).cloned())
    }

    fn attendance_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        user_id: Option<i64>,
    ) -> StoreResult<Vec<AttendanceRecord>> {
        Ok(in_range(&*read(&self.attendance)?, start, end, user_id))
    }

    fn overtime_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        user_id: Option<i64>,
    ) -> StoreResult<Vec<OvertimeRecord>> {
        Ok(in_range(&*read(&self.overtime)?, start, end, user_id))
    }

    fn reimbursements_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        user_id: Option<i64>,
    ) -> StoreResult<Vec<ReimbursementRecord>> {
        Ok(in_range(&*read(&self.reimbursements)?, start, end, user_id))
    }
}

impl SalaryStore for InMemoryStore {
    fn base_salaries_effective_at(
        &self,
        as_of: NaiveDate,
        user_id: Option<i64>,
    ) -> StoreResult<Vec<BaseSalary>> {
        Ok(resolve_effective_salaries(
            &read(&self.salaries)?,
            as_of,
            user_id,
        ))
    }
}

impl PayslipStore for InMemoryStore {
    fn insert_payslips(&self, payslips: &[Payslip]) -> StoreResult<()> {
        let mut table = write(&self.payslips)?;

        let mut batch = BTreeMap::new();
        for payslip in payslips {
            let key = (payslip.period_id, payslip.user_id);
            if table.contains_key(&key) || batch.contains_key(&key) {
                return Err(StoreError::DuplicateKey {
                    table: PAYSLIP_TABLE.to_string(),
                    key: format!("user {} period {}", payslip.user_id, payslip.period_id),
                });
            }
            batch.insert(key, payslip.clone());
        }

        table.extend(batch);
        Ok(())
    }

    fn payslip(&self, user_id: i64, period_id: i64) -> StoreResult<Option<Payslip>> {
        Ok(read(&self.payslips)?.get(&(period_id, user_id)).cloned())
    }

    fn payslips_for_period(&self, period_id: i64) -> StoreResult<Vec<Payslip>> {
        Ok(read(&self.payslips)?
            .range((period_id, i64::MIN)..=(period_id, i64::MAX))
            .map(|(_, payslip)| payslip.clone())
            .collect())
    }
}

impl AuditSink for InMemoryStore {
    fn record(&self, entry: AuditLogEntry) -> StoreResult<()> {
        write(&self.audit_log)?.push(entry);
        Ok(())
    }
}
