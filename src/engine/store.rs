use crate::engine::classify::classify;
use crate::engine::clock::date_key;
use crate::engine::duration::worked_hours;
use crate::engine::error::AttendanceError;
use crate::model::attendance::AttendanceRecord;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::collections::HashMap;
use std::sync::Mutex;

/// Record store seam. One record per (employee, calendar date); the store is
/// the sole writer, everything else gets owned snapshots. Backed by MySQL in
/// production (`db::MySqlStore`) and by [`MemoryStore`] in tests.
#[allow(async_fn_in_trait)]
pub trait AttendanceStore {
    /// Creates today's record for the employee with a classified status and
    /// zero hours. Fails with `DuplicateCheckIn` if one already exists for
    /// `(employee_id, date_key(now))`.
    async fn check_in(
        &self,
        employee_id: u64,
        now: NaiveDateTime,
        cutoff: NaiveTime,
    ) -> Result<AttendanceRecord, AttendanceError>;

    /// Closes today's open record: sets `check_out_time` and the recomputed
    /// `total_hours` as one atomic mutation. Fails with `NoOpenRecord` when
    /// there is nothing to close, `InvalidInterval` on clock skew.
    async fn check_out(
        &self,
        employee_id: u64,
        now: NaiveDateTime,
    ) -> Result<AttendanceRecord, AttendanceError>;

    /// Full history for one employee, most recent date first.
    async fn records_for(&self, employee_id: u64) -> Result<Vec<AttendanceRecord>, AttendanceError>;

    /// The record whose date key equals `today`, if any.
    async fn today_record(
        &self,
        employee_id: u64,
        today: NaiveDate,
    ) -> Result<Option<AttendanceRecord>, AttendanceError>;

    /// Every record for a fixed date, across employees.
    async fn records_on(&self, date: NaiveDate) -> Result<Vec<AttendanceRecord>, AttendanceError>;

    /// Entire store content, insertion order.
    async fn all_records(&self) -> Result<Vec<AttendanceRecord>, AttendanceError>;
}

/// In-memory store. The single mutex makes every mutation for a
/// (employee, date) key atomic: of two concurrent check-ins one inserts and
/// the other observes the occupied key, and a check-out updates the
/// timestamp/hours pair before any reader can see the record again.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Ledger>,
}

#[derive(Default)]
struct Ledger {
    next_id: u64,
    rows: HashMap<(u64, NaiveDate), AttendanceRecord>,
}

impl AttendanceStore for MemoryStore {
    async fn check_in(
        &self,
        employee_id: u64,
        now: NaiveDateTime,
        cutoff: NaiveTime,
    ) -> Result<AttendanceRecord, AttendanceError> {
        let mut inner = self.inner.lock().unwrap();
        let key = (employee_id, date_key(now));
        if inner.rows.contains_key(&key) {
            return Err(AttendanceError::DuplicateCheckIn);
        }
        inner.next_id += 1;
        let record = AttendanceRecord {
            id: inner.next_id,
            employee_id,
            date: key.1,
            check_in_time: Some(now),
            check_out_time: None,
            status: classify(now, cutoff),
            total_hours: 0.0,
        };
        inner.rows.insert(key, record.clone());
        Ok(record)
    }

    async fn check_out(
        &self,
        employee_id: u64,
        now: NaiveDateTime,
    ) -> Result<AttendanceRecord, AttendanceError> {
        let mut inner = self.inner.lock().unwrap();
        let key = (employee_id, date_key(now));
        let record = inner.rows.get_mut(&key).ok_or(AttendanceError::NoOpenRecord)?;
        if record.check_out_time.is_some() {
            return Err(AttendanceError::NoOpenRecord);
        }
        let start = record.check_in_time.ok_or(AttendanceError::NoOpenRecord)?;
        let hours = worked_hours(start, now)?;
        record.check_out_time = Some(now);
        record.total_hours = hours;
        Ok(record.clone())
    }

    async fn records_for(&self, employee_id: u64) -> Result<Vec<AttendanceRecord>, AttendanceError> {
        let inner = self.inner.lock().unwrap();
        let mut records: Vec<_> = inner
            .rows
            .values()
            .filter(|r| r.employee_id == employee_id)
            .cloned()
            .collect();
        // most recent first; ids are insertion-ordered so they break ties
        records.sort_by(|a, b| b.date.cmp(&a.date).then(a.id.cmp(&b.id)));
        Ok(records)
    }

    async fn today_record(
        &self,
        employee_id: u64,
        today: NaiveDate,
    ) -> Result<Option<AttendanceRecord>, AttendanceError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.rows.get(&(employee_id, today)).cloned())
    }

    async fn records_on(&self, date: NaiveDate) -> Result<Vec<AttendanceRecord>, AttendanceError> {
        let inner = self.inner.lock().unwrap();
        let mut records: Vec<_> = inner
            .rows
            .values()
            .filter(|r| r.date == date)
            .cloned()
            .collect();
        records.sort_by_key(|r| r.id);
        Ok(records)
    }

    async fn all_records(&self) -> Result<Vec<AttendanceRecord>, AttendanceError> {
        let inner = self.inner.lock().unwrap();
        let mut records: Vec<_> = inner.rows.values().cloned().collect();
        records.sort_by_key(|r| r.id);
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::attendance::AttendanceStatus;
    use futures::executor::block_on;
    use std::sync::Arc;

    fn cutoff() -> NaiveTime {
        NaiveTime::parse_from_str("09:30", "%H:%M").unwrap()
    }

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[actix_web::test]
    async fn check_in_creates_open_record() {
        let store = MemoryStore::default();
        let record = store.check_in(1, ts("2026-08-30 09:00:00"), cutoff()).await.unwrap();

        assert_eq!(record.employee_id, 1);
        assert_eq!(record.date.to_string(), "2026-08-30");
        assert_eq!(record.status, AttendanceStatus::Present);
        assert_eq!(record.check_out_time, None);
        assert_eq!(record.total_hours, 0.0);
    }

    #[actix_web::test]
    async fn late_check_in_is_classified_at_creation() {
        let store = MemoryStore::default();
        let record = store.check_in(1, ts("2026-08-30 09:45:00"), cutoff()).await.unwrap();
        assert_eq!(record.status, AttendanceStatus::Late);
    }

    #[actix_web::test]
    async fn second_check_in_same_day_is_rejected() {
        let store = MemoryStore::default();
        store.check_in(1, ts("2026-08-30 09:00:00"), cutoff()).await.unwrap();

        let err = store.check_in(1, ts("2026-08-30 10:00:00"), cutoff()).await.unwrap_err();
        assert!(matches!(err, AttendanceError::DuplicateCheckIn));

        // other employees and other days are unaffected
        assert!(store.check_in(2, ts("2026-08-30 09:00:00"), cutoff()).await.is_ok());
        assert!(store.check_in(1, ts("2026-08-31 09:00:00"), cutoff()).await.is_ok());
    }

    #[actix_web::test]
    async fn check_out_fixes_hours_and_keeps_status() {
        let store = MemoryStore::default();
        store.check_in(1, ts("2026-08-30 09:00:00"), cutoff()).await.unwrap();

        let record = store.check_out(1, ts("2026-08-30 17:30:00")).await.unwrap();
        assert_eq!(record.total_hours, 8.50);
        assert_eq!(record.check_out_time, Some(ts("2026-08-30 17:30:00")));
        // status was fixed at check-in, check-out only changes hours
        assert_eq!(record.status, AttendanceStatus::Present);
    }

    #[actix_web::test]
    async fn check_out_without_check_in_fails() {
        let store = MemoryStore::default();
        let err = store.check_out(1, ts("2026-08-30 17:00:00")).await.unwrap_err();
        assert!(matches!(err, AttendanceError::NoOpenRecord));
    }

    #[actix_web::test]
    async fn double_check_out_fails() {
        let store = MemoryStore::default();
        store.check_in(1, ts("2026-08-30 09:00:00"), cutoff()).await.unwrap();
        store.check_out(1, ts("2026-08-30 17:00:00")).await.unwrap();

        let err = store.check_out(1, ts("2026-08-30 18:00:00")).await.unwrap_err();
        assert!(matches!(err, AttendanceError::NoOpenRecord));
    }

    #[actix_web::test]
    async fn skewed_check_out_is_surfaced_not_applied() {
        let store = MemoryStore::default();
        store.check_in(1, ts("2026-08-30 09:00:00"), cutoff()).await.unwrap();

        let err = store.check_out(1, ts("2026-08-30 08:00:00")).await.unwrap_err();
        assert!(matches!(err, AttendanceError::InvalidInterval));

        // the record is still open and untouched
        let today = ts("2026-08-30 08:00:00").date();
        let record = store.today_record(1, today).await.unwrap().unwrap();
        assert_eq!(record.check_out_time, None);
        assert_eq!(record.total_hours, 0.0);
    }

    #[actix_web::test]
    async fn history_is_date_descending() {
        let store = MemoryStore::default();
        for day in ["2026-08-28", "2026-08-30", "2026-08-29"] {
            store
                .check_in(1, ts(&format!("{day} 09:00:00")), cutoff())
                .await
                .unwrap();
        }
        store.check_in(2, ts("2026-08-30 09:00:00"), cutoff()).await.unwrap();

        let dates: Vec<String> = store
            .records_for(1)
            .await
            .unwrap()
            .iter()
            .map(|r| r.date.to_string())
            .collect();
        assert_eq!(dates, ["2026-08-30", "2026-08-29", "2026-08-28"]);
    }

    #[actix_web::test]
    async fn today_record_ignores_other_days() {
        let store = MemoryStore::default();
        store.check_in(1, ts("2026-08-29 09:00:00"), cutoff()).await.unwrap();

        let today = ts("2026-08-30 00:00:00").date();
        assert!(store.today_record(1, today).await.unwrap().is_none());

        store.check_in(1, ts("2026-08-30 09:00:00"), cutoff()).await.unwrap();
        assert!(store.today_record(1, today).await.unwrap().is_some());
    }

    #[test]
    fn concurrent_check_ins_have_exactly_one_winner() {
        let store = Arc::new(MemoryStore::default());
        let now = ts("2026-08-30 09:00:00");

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || block_on(store.check_in(7, now, cutoff())).is_ok())
            })
            .collect();

        let wins = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|won| *won)
            .count();
        assert_eq!(wins, 1);
        assert_eq!(block_on(store.records_for(7)).unwrap().len(), 1);
    }
}
