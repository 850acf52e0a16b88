use crate::model::{employee::Employee, user::UserRow};
use anyhow::{Result, anyhow};
use moka::future::Cache;
use once_cell::sync::Lazy;
use sqlx::MySqlPool;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// Short-lived roster snapshot shared by the report handlers, so aggregation
/// reads do not hit the users table once per request.
static ROSTER_CACHE: Lazy<Cache<&'static str, Arc<Vec<Employee>>>> = Lazy::new(|| {
    Cache::builder()
        .max_capacity(1)
        .time_to_live(Duration::from_secs(30))
        .build()
});

/// Cached full roster, loading it on a miss.
pub async fn roster(pool: &MySqlPool) -> Result<Arc<Vec<Employee>>> {
    ROSTER_CACHE
        .try_get_with("roster", load_roster(pool))
        .await
        .map_err(|e| anyhow!("failed to load roster: {e}"))
}

async fn load_roster(pool: &MySqlPool) -> Result<Arc<Vec<Employee>>, sqlx::Error> {
    let rows = sqlx::query_as::<_, UserRow>(
        r#"
        SELECT id, name, email, password, role, employee_code, department, avatar
        FROM users
        ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await?;

    let employees = rows
        .iter()
        .filter_map(|row| {
            let employee = row.to_employee();
            if employee.is_none() {
                warn!(user_id = row.id, role = %row.role, "Skipping user with unknown role");
            }
            employee
        })
        .collect();

    Ok(Arc::new(employees))
}

/// Populate the cache at startup so the first dashboard load is warm.
pub async fn warmup_roster(pool: &MySqlPool) -> Result<()> {
    let roster = roster(pool).await?;
    tracing::info!(count = roster.len(), "Roster cache warmed");
    Ok(())
}
