//! Locations repository

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::facility::{CreateLocation, Location, UpdateLocation},
};

#[derive(Clone)]
pub struct LocationsRepository {
    pool: Pool<Postgres>,
}

impl LocationsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> AppResult<Vec<Location>> {
        let rows = sqlx::query_as::<_, Location>("SELECT * FROM locations ORDER BY building")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Location> {
        sqlx::query_as::<_, Location>("SELECT * FROM locations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Location {} not found", id)))
    }

    pub async fn create(&self, data: &CreateLocation) -> AppResult<Location> {
        let row = sqlx::query_as::<_, Location>(
            r#"
            INSERT INTO locations (building, friendly_building, address, campus_region, on_campus)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&data.building)
        .bind(data.friendly_building.as_deref().unwrap_or(""))
        .bind(&data.address)
        .bind(data.campus_region)
        .bind(data.on_campus.unwrap_or(true))
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update(&self, id: i32, data: &UpdateLocation) -> AppResult<Location> {
        let mut sets = vec!["modified = NOW()".to_string()];
        let mut idx = 1;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, idx));
                    idx += 1;
                }
            };
        }

        add_field!(data.building, "building");
        add_field!(data.friendly_building, "friendly_building");
        add_field!(data.address, "address");
        add_field!(data.campus_region, "campus_region");
        add_field!(data.on_campus, "on_campus");

        let query = format!(
            "UPDATE locations SET {} WHERE id = ${} RETURNING *",
            sets.join(", "),
            idx
        );

        let mut builder = sqlx::query_as::<_, Location>(&query);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.building);
        bind_field!(data.friendly_building);
        bind_field!(data.address);
        bind_field!(data.campus_region);
        bind_field!(data.on_campus);

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Location {} not found", id)))
    }

    /// Delete a location (cascade deletes its facilities)
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM locations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Location {} not found", id)));
        }
        Ok(())
    }
}
