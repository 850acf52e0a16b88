use crate::auth::password::hash_password;
use crate::engine::classify::classify;
use crate::engine::clock::date_key;
use crate::engine::duration::worked_hours;
use crate::engine::error::AttendanceError;
use crate::engine::store::AttendanceStore;
use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use sqlx::MySqlPool;
use std::str::FromStr;
use tracing::info;

pub async fn init_db(database_url: &str) -> MySqlPool {
    MySqlPool::connect(database_url)
        .await
        .expect("Failed to connect to database")
}

/// Durable [`AttendanceStore`] backed by MySQL. The `UNIQUE KEY
/// (employee_id, date)` in `schema.sql` carries the one-record-per-day
/// invariant: of two concurrent check-ins the loser surfaces SQLSTATE 23000.
#[derive(Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct AttendanceRow {
    id: u64,
    employee_id: u64,
    date: NaiveDate,
    check_in: Option<NaiveDateTime>,
    check_out: Option<NaiveDateTime>,
    status: String,
    total_hours: f64,
}

impl AttendanceRow {
    fn into_record(self) -> Result<AttendanceRecord, AttendanceError> {
        let status = AttendanceStatus::from_str(&self.status)
            .map_err(|_| AttendanceError::InvalidStatus(self.status.clone()))?;
        Ok(AttendanceRecord {
            id: self.id,
            employee_id: self.employee_id,
            date: self.date,
            check_in_time: self.check_in,
            check_out_time: self.check_out,
            status,
            total_hours: self.total_hours,
        })
    }
}

const SELECT_RECORD: &str =
    "SELECT id, employee_id, date, check_in, check_out, status, total_hours FROM attendance";

impl AttendanceStore for MySqlStore {
    async fn check_in(
        &self,
        employee_id: u64,
        now: NaiveDateTime,
        cutoff: NaiveTime,
    ) -> Result<AttendanceRecord, AttendanceError> {
        let date = date_key(now);
        let status = classify(now, cutoff);

        let result = sqlx::query(
            r#"
            INSERT INTO attendance (employee_id, date, check_in, status, total_hours)
            VALUES (?, ?, ?, ?, 0)
            "#,
        )
        .bind(employee_id)
        .bind(date)
        .bind(now)
        .bind(status.to_string())
        .execute(&self.pool)
        .await;

        match result {
            Ok(res) => Ok(AttendanceRecord {
                id: res.last_insert_id(),
                employee_id,
                date,
                check_in_time: Some(now),
                check_out_time: None,
                status,
                total_hours: 0.0,
            }),
            Err(e) => {
                // duplicate key on (employee_id, date): a record already exists
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.code().as_deref() == Some("23000") {
                        return Err(AttendanceError::DuplicateCheckIn);
                    }
                }
                Err(e.into())
            }
        }
    }

    async fn check_out(
        &self,
        employee_id: u64,
        now: NaiveDateTime,
    ) -> Result<AttendanceRecord, AttendanceError> {
        let date = date_key(now);

        let row = sqlx::query_as::<_, AttendanceRow>(
            &format!("{SELECT_RECORD} WHERE employee_id = ? AND date = ?"),
        )
        .bind(employee_id)
        .bind(date)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AttendanceError::NoOpenRecord)?;

        if row.check_out.is_some() {
            return Err(AttendanceError::NoOpenRecord);
        }
        let start = row.check_in.ok_or(AttendanceError::NoOpenRecord)?;
        let hours = worked_hours(start, now)?;

        // the timestamp/hours pair moves in one statement; the IS NULL guard
        // loses gracefully against a racing check-out
        let res = sqlx::query(
            "UPDATE attendance SET check_out = ?, total_hours = ? WHERE id = ? AND check_out IS NULL",
        )
        .bind(now)
        .bind(hours)
        .bind(row.id)
        .execute(&self.pool)
        .await?;

        if res.rows_affected() == 0 {
            return Err(AttendanceError::NoOpenRecord);
        }

        let mut record = row.into_record()?;
        record.check_out_time = Some(now);
        record.total_hours = hours;
        Ok(record)
    }

    async fn records_for(&self, employee_id: u64) -> Result<Vec<AttendanceRecord>, AttendanceError> {
        let rows = sqlx::query_as::<_, AttendanceRow>(&format!(
            "{SELECT_RECORD} WHERE employee_id = ? ORDER BY date DESC, id ASC"
        ))
        .bind(employee_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(AttendanceRow::into_record).collect()
    }

    async fn today_record(
        &self,
        employee_id: u64,
        today: NaiveDate,
    ) -> Result<Option<AttendanceRecord>, AttendanceError> {
        let row = sqlx::query_as::<_, AttendanceRow>(&format!(
            "{SELECT_RECORD} WHERE employee_id = ? AND date = ?"
        ))
        .bind(employee_id)
        .bind(today)
        .fetch_optional(&self.pool)
        .await?;

        row.map(AttendanceRow::into_record).transpose()
    }

    async fn records_on(&self, date: NaiveDate) -> Result<Vec<AttendanceRecord>, AttendanceError> {
        let rows = sqlx::query_as::<_, AttendanceRow>(&format!(
            "{SELECT_RECORD} WHERE date = ? ORDER BY id ASC"
        ))
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(AttendanceRow::into_record).collect()
    }

    async fn all_records(&self) -> Result<Vec<AttendanceRecord>, AttendanceError> {
        let rows =
            sqlx::query_as::<_, AttendanceRow>(&format!("{SELECT_RECORD} ORDER BY id ASC"))
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter().map(AttendanceRow::into_record).collect()
    }
}

/// Seeds the demo roster when the users table is empty, mirroring the
/// behavior the demo deployment expects on first boot.
pub async fn seed_demo_users(pool: &MySqlPool) -> Result<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;
    if count > 0 {
        return Ok(());
    }

    info!("Users table empty, seeding demo roster");
    let hashed = hash_password("password");

    let demo_users = [
        ("Alice Johnson", "alice@company.com", "employee", "EMP001", "Engineering"),
        ("Bob Smith", "bob@company.com", "manager", "MGR001", "Product"),
        ("Charlie Brown", "charlie@company.com", "employee", "EMP002", "Design"),
        ("Diana Prince", "diana@company.com", "employee", "EMP003", "Engineering"),
    ];

    for (name, email, role, code, department) in demo_users {
        let avatar = format!(
            "https://ui-avatars.com/api/?name={}",
            name.replace(' ', "+")
        );
        sqlx::query(
            r#"
            INSERT INTO users (name, email, password, role, employee_code, department, avatar)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(&hashed)
        .bind(role)
        .bind(code)
        .bind(department)
        .bind(avatar)
        .execute(pool)
        .await?;
    }

    info!("Database seeded");
    Ok(())
}
