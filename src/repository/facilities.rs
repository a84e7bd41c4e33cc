//! Facilities repository

use sqlx::{Pool, Postgres};

use super::{map_reference_error, schedules::attach_open_times};
use crate::{
    error::{AppError, AppResult},
    models::{
        facility::{Category, CreateFacility, Facility, FacilityDetails, FacilityQuery, Location, UpdateFacility},
        schedule::Schedule,
    },
};

#[derive(Clone)]
pub struct FacilitiesRepository {
    pool: Pool<Postgres>,
}

impl FacilitiesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List facilities matching the storage-side filters, ordered by name
    pub async fn list(&self, query: &FacilityQuery) -> AppResult<Vec<Facility>> {
        let mut conditions = Vec::new();
        let mut idx = 1;

        if query.category_id.is_some() {
            conditions.push(format!("f.category_id = ${}", idx));
            idx += 1;
        }
        if query.on_campus.is_some() {
            conditions.push(format!("l.on_campus = ${}", idx));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let sql = format!(
            r#"
            SELECT f.* FROM facilities f
            JOIN locations l ON l.id = f.location_id
            {}
            ORDER BY f.name, f.id
            "#,
            where_clause
        );

        let mut builder = sqlx::query_as::<_, Facility>(&sql);
        if let Some(category_id) = query.category_id {
            builder = builder.bind(category_id);
        }
        if let Some(on_campus) = query.on_campus {
            builder = builder.bind(on_campus);
        }

        let rows = builder.fetch_all(&self.pool).await?;
        Ok(rows)
    }

    pub async fn get_by_slug(&self, slug: &str) -> AppResult<Facility> {
        sqlx::query_as::<_, Facility>("SELECT * FROM facilities WHERE slug = $1")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Facility '{}' not found", slug)))
    }

    /// Load everything the status evaluation needs for one facility
    pub async fn details(&self, facility: Facility) -> AppResult<FacilityDetails> {
        let category = sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = $1")
            .bind(facility.category_id)
            .fetch_optional(&self.pool)
            .await?;

        let location = sqlx::query_as::<_, Location>("SELECT * FROM locations WHERE id = $1")
            .bind(facility.location_id)
            .fetch_optional(&self.pool)
            .await?;

        let main = sqlx::query_as::<_, Schedule>("SELECT * FROM schedules WHERE id = $1")
            .bind(facility.main_schedule_id)
            .fetch_optional(&self.pool)
            .await?;

        let specials = sqlx::query_as::<_, Schedule>(
            r#"
            SELECT s.* FROM schedules s
            JOIN facility_special_schedules fs ON fs.schedule_id = s.id
            WHERE fs.facility_id = $1
            ORDER BY fs.position
            "#,
        )
        .bind(facility.id)
        .fetch_all(&self.pool)
        .await?;

        // Main schedule goes first so the split below stays trivial
        let has_main = main.is_some();
        let mut schedules: Vec<Schedule> = main.into_iter().chain(specials).collect();
        attach_open_times(&self.pool, &mut schedules).await?;

        let main_schedule = if has_main { Some(schedules.remove(0)) } else { None };

        Ok(FacilityDetails {
            facility,
            category,
            location,
            main_schedule,
            special_schedules: schedules,
        })
    }

    /// Slugs already taken by `base` or its numbered variants
    pub async fn slugs_like(&self, base: &str) -> AppResult<Vec<String>> {
        let rows: Vec<String> = sqlx::query_scalar(
            "SELECT slug FROM facilities WHERE slug = $1 OR slug LIKE $1 || '-%'",
        )
        .bind(base)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn create(&self, data: &CreateFacility, slug: &str, logo_url: &str) -> AppResult<Facility> {
        let row = sqlx::query_as::<_, Facility>(
            r#"
            INSERT INTO facilities (name, slug, category_id, location_id, main_schedule_id,
                                    note, logo_url, phone_number, tapingo_url, classifier)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(slug)
        .bind(data.category_id)
        .bind(data.location_id)
        .bind(data.main_schedule_id)
        .bind(data.note.as_deref().unwrap_or(""))
        .bind(logo_url)
        .bind(&data.phone_number)
        .bind(&data.tapingo_url)
        .bind(&data.classifier)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_reference_error(e, "category, location or schedule"))?;
        Ok(row)
    }

    pub async fn update(&self, id: i32, data: &UpdateFacility) -> AppResult<Facility> {
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

        add_field!(data.name, "name");
        add_field!(data.category_id, "category_id");
        add_field!(data.location_id, "location_id");
        add_field!(data.main_schedule_id, "main_schedule_id");
        add_field!(data.note, "note");
        add_field!(data.logo_url, "logo_url");
        add_field!(data.phone_number, "phone_number");
        add_field!(data.tapingo_url, "tapingo_url");
        add_field!(data.classifier, "classifier");

        let query = format!(
            "UPDATE facilities SET {} WHERE id = ${} RETURNING *",
            sets.join(", "),
            idx
        );

        let mut builder = sqlx::query_as::<_, Facility>(&query);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.name);
        bind_field!(data.category_id);
        bind_field!(data.location_id);
        bind_field!(data.main_schedule_id);
        bind_field!(data.note);
        bind_field!(data.logo_url);
        bind_field!(data.phone_number);
        bind_field!(data.tapingo_url);
        bind_field!(data.classifier);

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_reference_error(e, "category, location or schedule"))?
            .ok_or_else(|| AppError::NotFound(format!("Facility {} not found", id)))
    }

    /// Delete a facility (its special schedule attachments go with it)
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM facilities WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Facility {} not found", id)));
        }
        Ok(())
    }

    // ---- Special schedules ----

    /// Attach a special schedule after the ones already attached.
    /// Attaching twice is a no-op.
    pub async fn attach_special(&self, facility_id: i32, schedule_id: i32) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO facility_special_schedules (facility_id, schedule_id, position)
            VALUES (
                $1, $2,
                COALESCE((SELECT MAX(position) + 1 FROM facility_special_schedules WHERE facility_id = $1), 0)
            )
            ON CONFLICT (facility_id, schedule_id) DO NOTHING
            "#,
        )
        .bind(facility_id)
        .bind(schedule_id)
        .execute(&self.pool)
        .await
        .map_err(|e| map_reference_error(e, "schedule"))?;
        Ok(())
    }

    pub async fn detach_special(&self, facility_id: i32, schedule_id: i32) -> AppResult<()> {
        let result = sqlx::query(
            "DELETE FROM facility_special_schedules WHERE facility_id = $1 AND schedule_id = $2",
        )
        .bind(facility_id)
        .bind(schedule_id)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Schedule {} is not a special schedule of facility {}",
                schedule_id, facility_id
            )));
        }
        Ok(())
    }
}
