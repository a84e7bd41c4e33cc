//! Alerts repository

use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{alert::Alert, enums::UrgencyTag},
};

/// Alert fields after parsing and validation
#[derive(Debug, Clone)]
pub struct AlertFields {
    pub urgency_tag: UrgencyTag,
    pub subject: String,
    pub body: String,
    pub url: Option<String>,
    pub start_datetime: DateTime<Utc>,
    pub end_datetime: DateTime<Utc>,
}

#[derive(Clone)]
pub struct AlertsRepository {
    pool: Pool<Postgres>,
}

impl AlertsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all alerts, most recent start first
    pub async fn list(&self) -> AppResult<Vec<Alert>> {
        let rows = sqlx::query_as::<_, Alert>("SELECT * FROM alerts ORDER BY start_datetime DESC, id DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Alerts that have not ended by `now`; activity itself is decided by
    /// the caller
    pub async fn list_not_ended(&self, now: DateTime<Utc>) -> AppResult<Vec<Alert>> {
        let rows = sqlx::query_as::<_, Alert>(
            "SELECT * FROM alerts WHERE end_datetime > $1 ORDER BY start_datetime DESC, id DESC",
        )
        .bind(now)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Alert> {
        sqlx::query_as::<_, Alert>("SELECT * FROM alerts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Alert {} not found", id)))
    }

    pub async fn create(&self, data: &AlertFields) -> AppResult<Alert> {
        let row = sqlx::query_as::<_, Alert>(
            r#"
            INSERT INTO alerts (urgency_tag, subject, body, url, start_datetime, end_datetime)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(data.urgency_tag)
        .bind(&data.subject)
        .bind(&data.body)
        .bind(&data.url)
        .bind(data.start_datetime)
        .bind(data.end_datetime)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Replace every field of an alert
    pub async fn update(&self, id: i32, data: &AlertFields) -> AppResult<Alert> {
        sqlx::query_as::<_, Alert>(
            r#"
            UPDATE alerts
            SET urgency_tag = $1, subject = $2, body = $3, url = $4,
                start_datetime = $5, end_datetime = $6, modified = NOW()
            WHERE id = $7
            RETURNING *
            "#,
        )
        .bind(data.urgency_tag)
        .bind(&data.subject)
        .bind(&data.body)
        .bind(&data.url)
        .bind(data.start_datetime)
        .bind(data.end_datetime)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Alert {} not found", id)))
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM alerts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Alert {} not found", id)));
        }
        Ok(())
    }
}
