//! Facility API endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::facility::{
        CreateFacility, Facility, FacilityQuery, FacilityStatusResponse, FacilityWithStatus,
        StatusQuery, UpdateFacility,
    },
    status::input::parse_instant,
};

/// List facilities with their current status
#[utoipa::path(
    get,
    path = "/facilities",
    tag = "facilities",
    params(FacilityQuery),
    responses(
        (status = 200, description = "Facilities", body = Vec<FacilityWithStatus>)
    )
)]
pub async fn list_facilities(
    State(state): State<crate::AppState>,
    Query(query): Query<FacilityQuery>,
) -> AppResult<Json<Vec<FacilityWithStatus>>> {
    let facilities = state.services.status.list_facilities(&query).await?;
    Ok(Json(facilities))
}

/// Get a facility with its schedules and current status
#[utoipa::path(
    get,
    path = "/facilities/{slug}",
    tag = "facilities",
    params(("slug" = String, Path, description = "Facility slug")),
    responses(
        (status = 200, description = "Facility details", body = FacilityWithStatus),
        (status = 404, description = "Facility not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_facility(
    State(state): State<crate::AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<FacilityWithStatus>> {
    let facility = state.services.status.get_facility(&slug).await?;
    Ok(Json(facility))
}

/// Whether a facility is open now, or at a given instant
#[utoipa::path(
    get,
    path = "/facilities/{slug}/status",
    tag = "facilities",
    params(
        ("slug" = String, Path, description = "Facility slug"),
        StatusQuery
    ),
    responses(
        (status = 200, description = "Facility status", body = FacilityStatusResponse),
        (status = 400, description = "Invalid instant", body = crate::error::ErrorResponse),
        (status = 404, description = "Facility not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn facility_status(
    State(state): State<crate::AppState>,
    Path(slug): Path<String>,
    Query(query): Query<StatusQuery>,
) -> AppResult<Json<FacilityStatusResponse>> {
    let at = query.at.as_deref().map(|s| parse_instant("at", s)).transpose()?;
    let status = state.services.status.facility_status(&slug, at).await?;
    Ok(Json(status))
}

/// Create a facility
#[utoipa::path(
    post,
    path = "/facilities",
    tag = "facilities",
    request_body = CreateFacility,
    responses(
        (status = 201, description = "Facility created", body = Facility),
        (status = 400, description = "Invalid facility", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_facility(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateFacility>,
) -> AppResult<(StatusCode, Json<Facility>)> {
    let facility = state.services.facilities.create(&data).await?;
    Ok((StatusCode::CREATED, Json(facility)))
}

/// Update a facility
#[utoipa::path(
    put,
    path = "/facilities/{slug}",
    tag = "facilities",
    params(("slug" = String, Path, description = "Facility slug")),
    request_body = UpdateFacility,
    responses(
        (status = 200, description = "Facility updated", body = Facility)
    )
)]
pub async fn update_facility(
    State(state): State<crate::AppState>,
    Path(slug): Path<String>,
    Json(data): Json<UpdateFacility>,
) -> AppResult<Json<Facility>> {
    let facility = state.services.facilities.update(&slug, &data).await?;
    Ok(Json(facility))
}

/// Delete a facility
#[utoipa::path(
    delete,
    path = "/facilities/{slug}",
    tag = "facilities",
    params(("slug" = String, Path, description = "Facility slug")),
    responses(
        (status = 204, description = "Facility deleted")
    )
)]
pub async fn delete_facility(
    State(state): State<crate::AppState>,
    Path(slug): Path<String>,
) -> AppResult<StatusCode> {
    state.services.facilities.delete(&slug).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Attach a special schedule to a facility
#[utoipa::path(
    post,
    path = "/facilities/{slug}/special-schedules/{schedule_id}",
    tag = "facilities",
    params(
        ("slug" = String, Path, description = "Facility slug"),
        ("schedule_id" = i32, Path, description = "Schedule ID")
    ),
    responses(
        (status = 204, description = "Special schedule attached")
    )
)]
pub async fn attach_special_schedule(
    State(state): State<crate::AppState>,
    Path((slug, schedule_id)): Path<(String, i32)>,
) -> AppResult<StatusCode> {
    state.services.facilities.attach_special(&slug, schedule_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Detach a special schedule from a facility
#[utoipa::path(
    delete,
    path = "/facilities/{slug}/special-schedules/{schedule_id}",
    tag = "facilities",
    params(
        ("slug" = String, Path, description = "Facility slug"),
        ("schedule_id" = i32, Path, description = "Schedule ID")
    ),
    responses(
        (status = 204, description = "Special schedule detached")
    )
)]
pub async fn detach_special_schedule(
    State(state): State<crate::AppState>,
    Path((slug, schedule_id)): Path<(String, i32)>,
) -> AppResult<StatusCode> {
    state.services.facilities.detach_special(&slug, schedule_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
