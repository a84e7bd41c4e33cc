//! Schedules service (schedules and open times)

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::schedule::{CreateOpenTime, CreateSchedule, NewOpenTime, OpenTime, Schedule, UpdateSchedule},
    repository::Repository,
    status::input::{validate_open_time, validate_validity},
};

#[derive(Clone)]
pub struct SchedulesService {
    repository: Repository,
}

impl SchedulesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    // ---- Schedules ----
    pub async fn list(&self) -> AppResult<Vec<Schedule>> {
        self.repository.schedules.list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Schedule> {
        self.repository.schedules.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateSchedule) -> AppResult<Schedule> {
        data.validate()?;
        let validity = validate_validity(data.valid_start.as_deref(), data.valid_end.as_deref())?;
        let open_times = data
            .open_times
            .iter()
            .map(validate_open_time)
            .collect::<AppResult<Vec<NewOpenTime>>>()?;

        let schedule = self
            .repository
            .schedules
            .create(&data.name, validity, data.always_open.unwrap_or(false), &open_times)
            .await?;

        tracing::info!(
            schedule_id = schedule.id,
            special = schedule.is_special(),
            open_times = schedule.open_times.len(),
            "Created schedule '{}'",
            schedule.name
        );
        Ok(schedule)
    }

    pub async fn update(&self, id: i32, data: &UpdateSchedule) -> AppResult<Schedule> {
        data.validate()?;

        let validity = if data.clear_validity.unwrap_or(false) {
            if data.valid_start.is_some() || data.valid_end.is_some() {
                return Err(AppError::Validation(
                    "clear_validity cannot be combined with valid_start/valid_end".to_string(),
                ));
            }
            Some(None)
        } else {
            validate_validity(data.valid_start.as_deref(), data.valid_end.as_deref())?.map(Some)
        };

        self.repository
            .schedules
            .update(id, data.name.as_deref(), data.always_open, validity)
            .await
    }

    /// Delete a schedule unless a facility still relies on it as main schedule
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        if self.repository.schedules.is_main_schedule(id).await? {
            return Err(AppError::Conflict(format!(
                "Schedule {} is the main schedule of a facility",
                id
            )));
        }
        self.repository.schedules.delete(id).await
    }

    // ---- Open times ----
    pub async fn get_open_time(&self, id: i32) -> AppResult<OpenTime> {
        self.repository.schedules.get_open_time(id).await
    }

    pub async fn create_open_time(&self, schedule_id: i32, data: &CreateOpenTime) -> AppResult<OpenTime> {
        let open_time = validate_open_time(data)?;
        self.repository.schedules.create_open_time(schedule_id, &open_time).await
    }

    pub async fn update_open_time(&self, id: i32, data: &CreateOpenTime) -> AppResult<OpenTime> {
        let open_time = validate_open_time(data)?;
        self.repository.schedules.update_open_time(id, &open_time).await
    }

    pub async fn delete_open_time(&self, id: i32) -> AppResult<()> {
        self.repository.schedules.delete_open_time(id).await
    }
}
