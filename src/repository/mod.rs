//! Repository layer for database operations

pub mod alerts;
pub mod categories;
pub mod facilities;
pub mod locations;
pub mod schedules;

use sqlx::{Pool, Postgres};

use crate::error::AppError;

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub categories: categories::CategoriesRepository,
    pub locations: locations::LocationsRepository,
    pub schedules: schedules::SchedulesRepository,
    pub facilities: facilities::FacilitiesRepository,
    pub alerts: alerts::AlertsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            categories: categories::CategoriesRepository::new(pool.clone()),
            locations: locations::LocationsRepository::new(pool.clone()),
            schedules: schedules::SchedulesRepository::new(pool.clone()),
            facilities: facilities::FacilitiesRepository::new(pool.clone()),
            alerts: alerts::AlertsRepository::new(pool.clone()),
            pool,
        }
    }

    /// Check that the database answers
    pub async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Turn a foreign key violation into a validation error naming the
/// referenced entity, pass everything else through
pub(crate) fn map_reference_error(err: sqlx::Error, what: &str) -> AppError {
    let is_fk_violation = err
        .as_database_error()
        .and_then(|db| db.code())
        .map_or(false, |code| code == "23503");

    if is_fk_violation {
        AppError::Validation(format!("Referenced {} does not exist", what))
    } else {
        AppError::Database(err)
    }
}
