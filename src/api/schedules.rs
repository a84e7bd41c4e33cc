//! Schedule API endpoints (schedules and open times)

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::schedule::{CreateOpenTime, CreateSchedule, OpenTime, Schedule, ScheduleView, UpdateSchedule},
};

// ---- Schedules ----

/// List schedules with their open times
#[utoipa::path(
    get,
    path = "/schedules",
    tag = "schedules",
    responses(
        (status = 200, description = "Schedules", body = Vec<Schedule>)
    )
)]
pub async fn list_schedules(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Schedule>>> {
    let schedules = state.services.schedules.list().await?;
    Ok(Json(schedules))
}

/// Get a schedule and whether its hours are open right now
#[utoipa::path(
    get,
    path = "/schedules/{id}",
    tag = "schedules",
    params(("id" = i32, Path, description = "Schedule ID")),
    responses(
        (status = 200, description = "Schedule", body = ScheduleView),
        (status = 404, description = "Schedule not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_schedule(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ScheduleView>> {
    let now = state.services.status.now();
    let schedule = state.services.schedules.get_by_id(id).await?;
    let open_now = schedule.is_open_now(&now);
    Ok(Json(ScheduleView { schedule, open_now }))
}

/// Create a schedule, optionally with open times
#[utoipa::path(
    post,
    path = "/schedules",
    tag = "schedules",
    request_body = CreateSchedule,
    responses(
        (status = 201, description = "Schedule created", body = Schedule),
        (status = 400, description = "Invalid schedule", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_schedule(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateSchedule>,
) -> AppResult<(StatusCode, Json<Schedule>)> {
    let schedule = state.services.schedules.create(&data).await?;
    Ok((StatusCode::CREATED, Json(schedule)))
}

/// Update a schedule
#[utoipa::path(
    put,
    path = "/schedules/{id}",
    tag = "schedules",
    params(("id" = i32, Path, description = "Schedule ID")),
    request_body = UpdateSchedule,
    responses(
        (status = 200, description = "Schedule updated", body = Schedule)
    )
)]
pub async fn update_schedule(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<UpdateSchedule>,
) -> AppResult<Json<Schedule>> {
    let schedule = state.services.schedules.update(id, &data).await?;
    Ok(Json(schedule))
}

/// Delete a schedule (cascade deletes its open times)
#[utoipa::path(
    delete,
    path = "/schedules/{id}",
    tag = "schedules",
    params(("id" = i32, Path, description = "Schedule ID")),
    responses(
        (status = 204, description = "Schedule deleted"),
        (status = 409, description = "Schedule is a facility's main schedule", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_schedule(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.schedules.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---- Open times ----

/// Add an open time to a schedule
#[utoipa::path(
    post,
    path = "/schedules/{id}/open-times",
    tag = "schedules",
    params(("id" = i32, Path, description = "Schedule ID")),
    request_body = CreateOpenTime,
    responses(
        (status = 201, description = "Open time created", body = OpenTime),
        (status = 400, description = "Invalid open time", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_open_time(
    State(state): State<crate::AppState>,
    Path(schedule_id): Path<i32>,
    Json(data): Json<CreateOpenTime>,
) -> AppResult<(StatusCode, Json<OpenTime>)> {
    let open_time = state.services.schedules.create_open_time(schedule_id, &data).await?;
    Ok((StatusCode::CREATED, Json(open_time)))
}

/// Get an open time
#[utoipa::path(
    get,
    path = "/open-times/{id}",
    tag = "schedules",
    params(("id" = i32, Path, description = "Open time ID")),
    responses(
        (status = 200, description = "Open time", body = OpenTime)
    )
)]
pub async fn get_open_time(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<OpenTime>> {
    let open_time = state.services.schedules.get_open_time(id).await?;
    Ok(Json(open_time))
}

/// Replace an open time's days and times
#[utoipa::path(
    put,
    path = "/open-times/{id}",
    tag = "schedules",
    params(("id" = i32, Path, description = "Open time ID")),
    request_body = CreateOpenTime,
    responses(
        (status = 200, description = "Open time updated", body = OpenTime)
    )
)]
pub async fn update_open_time(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<CreateOpenTime>,
) -> AppResult<Json<OpenTime>> {
    let open_time = state.services.schedules.update_open_time(id, &data).await?;
    Ok(Json(open_time))
}

/// Delete an open time
#[utoipa::path(
    delete,
    path = "/open-times/{id}",
    tag = "schedules",
    params(("id" = i32, Path, description = "Open time ID")),
    responses(
        (status = 204, description = "Open time deleted")
    )
)]
pub async fn delete_open_time(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.schedules.delete_open_time(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
