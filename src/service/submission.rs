//! Submission validation.
//!
//! Each employee submission runs through the same pipeline: identity check,
//! date parsing, the open-period check, the type-specific rules, an atomic
//! upsert and finally an audit entry. The first failing check wins.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, NaiveDate};
use rust_decimal::Decimal;
use tracing::info;

use crate::calculation::round_currency;
use crate::error::{PayrollError, PayrollResult};
use crate::models::{
    Actor, AttendanceRecord, AuditAction, OvertimeRecord, RecordKind, ReimbursementRecord,
    SubmitAttendanceRequest, SubmitOvertimeRequest, SubmitReimbursementRequest, is_weekend,
};
use crate::store::RecordStore;

use super::audit::AuditEmitter;
use super::registry::PeriodRegistry;

/// Accepted overtime duration, in whole hours.
pub const OVERTIME_HOURS_RANGE: std::ops::RangeInclusive<i64> = 1..=3;

/// Largest accepted reimbursement claim, 1,000,000,000,000.
pub const MAX_REIMBURSEMENT_AMOUNT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Validates and persists employee submissions.
#[derive(Clone)]
pub struct SubmissionValidator {
    registry: PeriodRegistry,
    records: Arc<dyn RecordStore>,
    audit: AuditEmitter,
}

impl SubmissionValidator {
    /// Creates a validator.
    pub fn new(registry: PeriodRegistry, records: Arc<dyn RecordStore>, audit: AuditEmitter) -> Self {
        Self {
            registry,
            records,
            audit,
        }
    }

    /// Records a day's attendance.
    ///
    /// # Errors
    ///
    /// In check order: `IdentityMismatch`, `InvalidFormat` (date),
    /// `PeriodClosed`, `InvalidFormat` (timestamps), `DateMismatch`,
    /// `InvalidRange`, `WeekendNotAllowed`, then any store error.
    pub fn submit_attendance(
        &self,
        actor: &Actor,
        request: &SubmitAttendanceRequest,
    ) -> PayrollResult<AttendanceRecord> {
        ensure_own_record(actor, request.user_id)?;
        let date = parse_date(&request.date)?;
        self.ensure_open(RecordKind::Attendance, date)?;

        let check_in = parse_timestamp("check_in", &request.check_in)?;
        // read check-out on the check-in clock, so a day never spans offsets
        let check_out = parse_timestamp("check_out", &request.check_out)?
            .with_timezone(check_in.offset());

        if check_in.date_naive() != date || check_out.date_naive() != date {
            return Err(PayrollError::DateMismatch { date });
        }
        if check_out < check_in {
            return Err(PayrollError::InvalidRange);
        }
        if is_weekend(date) {
            return Err(PayrollError::WeekendNotAllowed { date });
        }

        let stored = self.records.upsert_attendance(AttendanceRecord {
            user_id: request.user_id,
            date,
            check_in,
            check_out,
            created_by: actor.username.clone(),
            updated_by: actor.username.clone(),
        })?;

        self.audit.emit(
            actor,
            AuditAction::Submit,
            "attendance",
            RecordKind::Attendance.table_name(),
            request,
        );
        info!(
            request_id = %actor.request_id,
            user_id = stored.user_id,
            date = %stored.date,
            hours = stored.whole_hours(),
            "attendance submitted"
        );

        Ok(stored)
    }

    /// Records overtime for a day.
    ///
    /// On weekdays the employee must already have attendance for the same
    /// date. Weekend overtime needs none.
    ///
    /// # Errors
    ///
    /// In check order: `IdentityMismatch`, `InvalidFormat`, `PeriodClosed`,
    /// `AttendanceRequired`, `InvalidDuration`, then any store error.
    pub fn submit_overtime(
        &self,
        actor: &Actor,
        request: &SubmitOvertimeRequest,
    ) -> PayrollResult<OvertimeRecord> {
        ensure_own_record(actor, request.user_id)?;
        let date = parse_date(&request.date)?;
        self.ensure_open(RecordKind::Overtime, date)?;

        // The lookup and the upsert below are separate store calls. A
        // concurrent change between them is not guarded against.
        if !is_weekend(date) && self.records.attendance_on(request.user_id, date)?.is_none() {
            return Err(PayrollError::AttendanceRequired {
                user_id: request.user_id,
                date,
            });
        }

        if !OVERTIME_HOURS_RANGE.contains(&request.duration_hours) {
            return Err(PayrollError::InvalidDuration {
                hours: request.duration_hours,
            });
        }
        let duration_hours = u32::try_from(request.duration_hours).map_err(|_| {
            PayrollError::InvalidDuration {
                hours: request.duration_hours,
            }
        })?;

        let stored = self.records.upsert_overtime(OvertimeRecord {
            user_id: request.user_id,
            date,
            duration_hours,
            created_by: actor.username.clone(),
            updated_by: actor.username.clone(),
        })?;

        self.audit.emit(
            actor,
            AuditAction::Submit,
            "overtime",
            RecordKind::Overtime.table_name(),
            request,
        );
        info!(
            request_id = %actor.request_id,
            user_id = stored.user_id,
            date = %stored.date,
            hours = stored.duration_hours,
            "overtime submitted"
        );

        Ok(stored)
    }

    /// Records a reimbursement claim. A second claim for the same date
    /// replaces the first.
    ///
    /// # Errors
    ///
    /// In check order: `IdentityMismatch`, `InvalidFormat`, `PeriodClosed`,
    /// `InvalidAmount`, then any store error.
    pub fn submit_reimbursement(
        &self,
        actor: &Actor,
        request: &SubmitReimbursementRequest,
    ) -> PayrollResult<ReimbursementRecord> {
        ensure_own_record(actor, request.user_id)?;
        let date = parse_date(&request.date)?;
        self.ensure_open(RecordKind::Reimbursement, date)?;

        if request.amount.is_sign_negative() && !request.amount.is_zero() {
            return Err(PayrollError::InvalidAmount {
                message: format!("{} is negative", request.amount),
            });
        }
        if request.amount > MAX_REIMBURSEMENT_AMOUNT {
            return Err(PayrollError::InvalidAmount {
                message: format!(
                    "{} exceeds the maximum claim of {}",
                    request.amount, MAX_REIMBURSEMENT_AMOUNT
                ),
            });
        }
        if request.amount.normalize().scale() > 2 {
            return Err(PayrollError::InvalidAmount {
                message: format!("{} has more than two decimal places", request.amount),
            });
        }

        let stored = self.records.upsert_reimbursement(ReimbursementRecord {
            user_id: request.user_id,
            date,
            amount: round_currency(request.amount),
            description: request.description.clone(),
            created_by: actor.username.clone(),
            updated_by: actor.username.clone(),
        })?;

        self.audit.emit(
            actor,
            AuditAction::Submit,
            "reimbursement",
            RecordKind::Reimbursement.table_name(),
            request,
        );
        info!(
            request_id = %actor.request_id,
            user_id = stored.user_id,
            date = %stored.date,
            amount = %stored.amount,
            "reimbursement submitted"
        );

        Ok(stored)
    }

    fn ensure_open(&self, record: RecordKind, date: NaiveDate) -> PayrollResult<()> {
        if self.registry.is_open(date) {
            Ok(())
        } else {
            Err(PayrollError::PeriodClosed { record, date })
        }
    }
}

fn ensure_own_record(actor: &Actor, user_id: i64) -> PayrollResult<()> {
    if actor.user_id == user_id {
        Ok(())
    } else {
        Err(PayrollError::IdentityMismatch {
            actor_id: actor.user_id,
            user_id,
        })
    }
}

fn parse_date(value: &str) -> PayrollResult<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| PayrollError::InvalidFormat {
        field: "date".to_string(),
        message: "must be YYYY-MM-DD".to_string(),
    })
}

fn parse_timestamp(field: &str, value: &str) -> PayrollResult<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(value).map_err(|err| PayrollError::InvalidFormat {
        field: field.to_string(),
        message: format!("must be RFC 3339 ({})", err),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PeriodStatus;
    use crate::service::test_support::{FailingStore, date, employee, open_period};
    use crate::store::InMemoryStore;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    // January 2026 is open, December 2025 is closed. 2026-01-15 is a
    // Thursday, 2026-01-17 a Saturday.
    fn setup() -> (Arc<InMemoryStore>, SubmissionValidator) {
        let mut december = open_period(1, date(2025, 12, 1), date(2025, 12, 31));
        december.status = PeriodStatus::Closed;
        let january = open_period(2, date(2026, 1, 1), date(2026, 1, 31));
        let store = Arc::new(InMemoryStore::seeded(vec![december, january], vec![]).unwrap());
        let validator = validator_over(store.clone(), store.clone());
        (store, validator)
    }

    fn validator_over(
        store: Arc<InMemoryStore>,
        sink: Arc<dyn crate::store::AuditSink>,
    ) -> SubmissionValidator {
        SubmissionValidator::new(
            PeriodRegistry::new(store.clone()),
            store,
            AuditEmitter::new(sink),
        )
    }

    fn attendance(user_id: i64, day: &str, check_in: &str, check_out: &str) -> SubmitAttendanceRequest {
        SubmitAttendanceRequest {
            user_id,
            date: day.to_string(),
            check_in: check_in.to_string(),
            check_out: check_out.to_string(),
        }
    }

    fn overtime(user_id: i64, day: &str, hours: i64) -> SubmitOvertimeRequest {
        SubmitOvertimeRequest {
            user_id,
            date: day.to_string(),
            duration_hours: hours,
        }
    }

    fn claim(user_id: i64, day: &str, amount: &str) -> SubmitReimbursementRequest {
        SubmitReimbursementRequest {
            user_id,
            date: day.to_string(),
            amount: Decimal::from_str(amount).unwrap(),
            description: "Taxi".to_string(),
        }
    }

    fn workday(user_id: i64) -> SubmitAttendanceRequest {
        attendance(
            user_id,
            "2026-01-15",
            "2026-01-15T09:00:00+07:00",
            "2026-01-15T17:00:00+07:00",
        )
    }

    #[test]
    fn test_attendance_is_stored_and_audited() {
        let (store, validator) = setup();
        let record = validator.submit_attendance(&employee(1), &workday(1)).unwrap();

        assert_eq!(record.whole_hours(), 8);
        assert_eq!(record.created_by, "user1");

        let entries = store.audit_entries().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].target, "attendance");
        assert_eq!(entries[0].table, "employee_attendances");
        assert_eq!(entries[0].action, AuditAction::Submit);
    }

    #[test]
    fn test_identity_checked_before_anything_else() {
        let (_, validator) = setup();
        let request = attendance(2, "not-a-date", "x", "y");
        let result = validator.submit_attendance(&employee(1), &request);
        assert!(matches!(
            result,
            Err(PayrollError::IdentityMismatch { actor_id: 1, user_id: 2 })
        ));
    }

    #[test]
    fn test_bad_date_format() {
        let (_, validator) = setup();
        let request = attendance(1, "15/01/2026", "x", "y");
        match validator.submit_attendance(&employee(1), &request) {
            Err(PayrollError::InvalidFormat { field, .. }) => assert_eq!(field, "date"),
            other => panic!("Expected InvalidFormat, got {:?}", other),
        }
    }

    #[test]
    fn test_closed_period_checked_before_timestamps() {
        let (_, validator) = setup();
        let request = attendance(1, "2025-12-10", "garbage", "garbage");
        let result = validator.submit_attendance(&employee(1), &request);
        assert!(matches!(
            result,
            Err(PayrollError::PeriodClosed { record: RecordKind::Attendance, .. })
        ));
    }

    #[test]
    fn test_uncovered_date_is_closed() {
        let (_, validator) = setup();
        let result = validator.submit_reimbursement(&employee(1), &claim(1, "2026-03-02", "10"));
        assert!(matches!(result, Err(PayrollError::PeriodClosed { .. })));
    }

    #[test]
    fn test_bad_timestamp_format() {
        let (_, validator) = setup();
        let request = attendance(1, "2026-01-15", "09:00", "2026-01-15T17:00:00+07:00");
        match validator.submit_attendance(&employee(1), &request) {
            Err(PayrollError::InvalidFormat { field, .. }) => assert_eq!(field, "check_in"),
            other => panic!("Expected InvalidFormat, got {:?}", other),
        }
    }

    #[test]
    fn test_timestamps_on_another_day() {
        let (_, validator) = setup();
        let request = attendance(
            1,
            "2026-01-15",
            "2026-01-15T22:00:00+07:00",
            "2026-01-16T02:00:00+07:00",
        );
        let result = validator.submit_attendance(&employee(1), &request);
        assert!(matches!(result, Err(PayrollError::DateMismatch { .. })));
    }

    #[test]
    fn test_day_cannot_stretch_across_offsets() {
        let (_, validator) = setup();
        // both are 2026-01-15 locally, but 49 hours apart
        let request = attendance(
            1,
            "2026-01-15",
            "2026-01-15T00:00:00+14:00",
            "2026-01-15T23:59:00-12:00",
        );
        let result = validator.submit_attendance(&employee(1), &request);
        assert!(matches!(result, Err(PayrollError::DateMismatch { .. })));
    }

    #[test]
    fn test_check_out_in_another_offset_same_day() {
        let (_, validator) = setup();
        let request = attendance(
            1,
            "2026-01-15",
            "2026-01-15T09:00:00+07:00",
            "2026-01-15T10:00:00Z",
        );
        let stored = validator.submit_attendance(&employee(1), &request).unwrap();
        assert_eq!(stored.whole_hours(), 8);
    }

    #[test]
    fn test_check_out_before_check_in() {
        let (_, validator) = setup();
        let request = attendance(
            1,
            "2026-01-15",
            "2026-01-15T17:00:00+07:00",
            "2026-01-15T09:00:00+07:00",
        );
        let result = validator.submit_attendance(&employee(1), &request);
        assert!(matches!(result, Err(PayrollError::InvalidRange)));
    }

    #[test]
    fn test_weekend_attendance_rejected() {
        let (_, validator) = setup();
        let request = attendance(
            1,
            "2026-01-17",
            "2026-01-17T09:00:00+07:00",
            "2026-01-17T17:00:00+07:00",
        );
        let result = validator.submit_attendance(&employee(1), &request);
        assert!(matches!(result, Err(PayrollError::WeekendNotAllowed { .. })));
    }

    #[test]
    fn test_resubmitted_attendance_replaces_times() {
        let (store, validator) = setup();
        validator.submit_attendance(&employee(1), &workday(1)).unwrap();
        let later = attendance(
            1,
            "2026-01-15",
            "2026-01-15T10:00:00+07:00",
            "2026-01-15T13:30:00+07:00",
        );
        validator.submit_attendance(&employee(1), &later).unwrap();

        let stored = store.attendance_on(1, date(2026, 1, 15)).unwrap().unwrap();
        assert_eq!(stored.whole_hours(), 3);
    }

    #[test]
    fn test_weekday_overtime_requires_attendance() {
        let (_, validator) = setup();
        let result = validator.submit_overtime(&employee(1), &overtime(1, "2026-01-15", 2));
        assert!(matches!(result, Err(PayrollError::AttendanceRequired { user_id: 1, .. })));
    }

    #[test]
    fn test_weekday_overtime_after_attendance() {
        let (_, validator) = setup();
        validator.submit_attendance(&employee(1), &workday(1)).unwrap();
        let record = validator
            .submit_overtime(&employee(1), &overtime(1, "2026-01-15", 3))
            .unwrap();
        assert_eq!(record.duration_hours, 3);
    }

    #[test]
    fn test_weekend_overtime_needs_no_attendance() {
        let (_, validator) = setup();
        let record = validator
            .submit_overtime(&employee(1), &overtime(1, "2026-01-17", 2))
            .unwrap();
        assert_eq!(record.date, date(2026, 1, 17));
    }

    #[test]
    fn test_overtime_duration_bounds() {
        let (_, validator) = setup();
        for hours in [0, 4, -1] {
            let result = validator.submit_overtime(&employee(1), &overtime(1, "2026-01-18", hours));
            assert!(
                matches!(result, Err(PayrollError::InvalidDuration { hours: h }) if h == hours),
                "hours {} should be rejected",
                hours
            );
        }
    }

    #[test]
    fn test_resubmitted_overtime_overwrites() {
        let (store, validator) = setup();
        validator.submit_overtime(&employee(1), &overtime(1, "2026-01-17", 1)).unwrap();
        validator.submit_overtime(&employee(1), &overtime(1, "2026-01-17", 3)).unwrap();

        let rows = store
            .overtime_between(date(2026, 1, 1), date(2026, 1, 31), Some(1))
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].duration_hours, 3);
    }

    #[test]
    fn test_reimbursement_stored_at_two_places() {
        let (_, validator) = setup();
        let record = validator
            .submit_reimbursement(&employee(1), &claim(1, "2026-01-20", "150000.5"))
            .unwrap();
        assert_eq!(record.amount.to_string(), "150000.50");
    }

    #[test]
    fn test_resubmitted_reimbursement_overwrites() {
        let (store, validator) = setup();
        validator.submit_reimbursement(&employee(1), &claim(1, "2026-01-20", "100")).unwrap();
        validator.submit_reimbursement(&employee(1), &claim(1, "2026-01-20", "250")).unwrap();

        let rows = store
            .reimbursements_between(date(2026, 1, 1), date(2026, 1, 31), Some(1))
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].amount, Decimal::from_str("250").unwrap());
    }

    #[test]
    fn test_invalid_reimbursement_amounts() {
        let (_, validator) = setup();
        for amount in ["-1", "10.001", "1000000000000.01", "50000000000000000000000000000"] {
            let result = validator.submit_reimbursement(&employee(1), &claim(1, "2026-01-20", amount));
            assert!(
                matches!(result, Err(PayrollError::InvalidAmount { .. })),
                "amount {} should be rejected",
                amount
            );
        }
    }

    #[test]
    fn test_claim_at_ceiling_accepted() {
        let (_, validator) = setup();
        let record = validator
            .submit_reimbursement(&employee(1), &claim(1, "2026-01-20", "1000000000000"))
            .unwrap();
        assert_eq!(record.amount, MAX_REIMBURSEMENT_AMOUNT);
    }

    #[test]
    fn test_trailing_zeros_are_not_extra_places() {
        let (_, validator) = setup();
        let result = validator.submit_reimbursement(&employee(1), &claim(1, "2026-01-20", "10.500"));
        assert!(result.is_ok());
    }

    #[test]
    fn test_audit_failure_does_not_fail_submission() {
        let (store, _) = setup();
        let validator = validator_over(store.clone(), Arc::new(FailingStore));

        let record = validator.submit_attendance(&employee(1), &workday(1));
        assert!(record.is_ok());
        assert!(store.audit_entries().unwrap().is_empty());
    }
}
