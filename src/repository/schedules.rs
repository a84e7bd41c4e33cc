//! Schedules repository (schedules and their open times)

use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::schedule::{NewOpenTime, OpenTime, Schedule},
};

/// Fill `open_times` of every schedule with one query
pub(crate) async fn attach_open_times(pool: &Pool<Postgres>, schedules: &mut [Schedule]) -> AppResult<()> {
    if schedules.is_empty() {
        return Ok(());
    }

    let ids: Vec<i32> = schedules.iter().map(|s| s.id).collect();
    let rows = sqlx::query_as::<_, OpenTime>(
        "SELECT * FROM open_times WHERE schedule_id = ANY($1) ORDER BY start_day, start_time, id",
    )
    .bind(&ids[..])
    .fetch_all(pool)
    .await?;

    for schedule in schedules.iter_mut() {
        schedule.open_times = rows
            .iter()
            .filter(|open_time| open_time.schedule_id == schedule.id)
            .cloned()
            .collect();
    }
    Ok(())
}

#[derive(Clone)]
pub struct SchedulesRepository {
    pool: Pool<Postgres>,
}

impl SchedulesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    // ---- Schedules ----

    /// List all schedules with their open times, ordered by name
    pub async fn list(&self) -> AppResult<Vec<Schedule>> {
        let mut rows = sqlx::query_as::<_, Schedule>("SELECT * FROM schedules ORDER BY name, id")
            .fetch_all(&self.pool)
            .await?;
        attach_open_times(&self.pool, &mut rows).await?;
        Ok(rows)
    }

    /// Get a schedule with its open times
    pub async fn get_by_id(&self, id: i32) -> AppResult<Schedule> {
        let schedule = sqlx::query_as::<_, Schedule>("SELECT * FROM schedules WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Schedule {} not found", id)))?;

        let mut schedules = [schedule];
        attach_open_times(&self.pool, &mut schedules).await?;
        let [schedule] = schedules;
        Ok(schedule)
    }

    /// Create a schedule together with its open times
    pub async fn create(
        &self,
        name: &str,
        validity: Option<(DateTime<Utc>, DateTime<Utc>)>,
        always_open: bool,
        open_times: &[NewOpenTime],
    ) -> AppResult<Schedule> {
        let mut tx = self.pool.begin().await?;

        let mut schedule = sqlx::query_as::<_, Schedule>(
            r#"
            INSERT INTO schedules (name, valid_start, valid_end, always_open)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(validity.map(|(start, _)| start))
        .bind(validity.map(|(_, end)| end))
        .bind(always_open)
        .fetch_one(&mut *tx)
        .await?;

        for open_time in open_times {
            let row = sqlx::query_as::<_, OpenTime>(
                r#"
                INSERT INTO open_times (schedule_id, start_day, start_time, end_day, end_time)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING *
                "#,
            )
            .bind(schedule.id)
            .bind(open_time.start_day)
            .bind(open_time.start_time)
            .bind(open_time.end_day)
            .bind(open_time.end_time)
            .fetch_one(&mut *tx)
            .await?;
            schedule.open_times.push(row);
        }

        tx.commit().await?;
        Ok(schedule)
    }

    /// Update a schedule. `validity` is `None` to keep the current window,
    /// `Some(None)` to clear it.
    pub async fn update(
        &self,
        id: i32,
        name: Option<&str>,
        always_open: Option<bool>,
        validity: Option<Option<(DateTime<Utc>, DateTime<Utc>)>>,
    ) -> AppResult<Schedule> {
        let mut sets = vec!["modified = NOW()".to_string()];
        let mut idx = 1;

        if name.is_some() {
            sets.push(format!("name = ${}", idx));
            idx += 1;
        }
        if always_open.is_some() {
            sets.push(format!("always_open = ${}", idx));
            idx += 1;
        }
        if validity.is_some() {
            sets.push(format!("valid_start = ${}", idx));
            sets.push(format!("valid_end = ${}", idx + 1));
            idx += 2;
        }

        let query = format!(
            "UPDATE schedules SET {} WHERE id = ${} RETURNING *",
            sets.join(", "),
            idx
        );

        let mut builder = sqlx::query_as::<_, Schedule>(&query);
        if let Some(name) = name {
            builder = builder.bind(name);
        }
        if let Some(always_open) = always_open {
            builder = builder.bind(always_open);
        }
        if let Some(window) = validity {
            builder = builder
                .bind(window.map(|(start, _)| start))
                .bind(window.map(|(_, end)| end));
        }

        let updated = builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Schedule {} not found", id)))?;

        let mut schedules = [updated];
        attach_open_times(&self.pool, &mut schedules).await?;
        let [schedule] = schedules;
        Ok(schedule)
    }

    /// Whether some facility uses this schedule as its main schedule
    pub async fn is_main_schedule(&self, id: i32) -> AppResult<bool> {
        let used: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM facilities WHERE main_schedule_id = $1)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(used)
    }

    /// Delete a schedule (cascade deletes open times and special attachments)
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM schedules WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Schedule {} not found", id)));
        }
        Ok(())
    }

    // ---- Open times ----

    pub async fn get_open_time(&self, id: i32) -> AppResult<OpenTime> {
        sqlx::query_as::<_, OpenTime>("SELECT * FROM open_times WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Open time {} not found", id)))
    }

    pub async fn create_open_time(&self, schedule_id: i32, data: &NewOpenTime) -> AppResult<OpenTime> {
        let row = sqlx::query_as::<_, OpenTime>(
            r#"
            INSERT INTO open_times (schedule_id, start_day, start_time, end_day, end_time)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(schedule_id)
        .bind(data.start_day)
        .bind(data.start_time)
        .bind(data.end_day)
        .bind(data.end_time)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| super::map_reference_error(e, "schedule"))?;

        sqlx::query("UPDATE schedules SET modified = NOW() WHERE id = $1")
            .bind(schedule_id)
            .execute(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn update_open_time(&self, id: i32, data: &NewOpenTime) -> AppResult<OpenTime> {
        sqlx::query_as::<_, OpenTime>(
            r#"
            UPDATE open_times
            SET start_day = $1, start_time = $2, end_day = $3, end_time = $4, modified = NOW()
            WHERE id = $5
            RETURNING *
            "#,
        )
        .bind(data.start_day)
        .bind(data.start_time)
        .bind(data.end_day)
        .bind(data.end_time)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Open time {} not found", id)))
    }

    pub async fn delete_open_time(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM open_times WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Open time {} not found", id)));
        }
        Ok(())
    }
}
