//! Alert API endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::alert::{Alert, AlertQuery, AlertView, CreateAlert, UpdateAlert},
};

/// List active alerts (or all alerts with `all=true`)
#[utoipa::path(
    get,
    path = "/alerts",
    tag = "alerts",
    params(AlertQuery),
    responses(
        (status = 200, description = "Alerts", body = Vec<AlertView>)
    )
)]
pub async fn list_alerts(
    State(state): State<crate::AppState>,
    Query(query): Query<AlertQuery>,
) -> AppResult<Json<Vec<AlertView>>> {
    let now = state.services.status.now();
    let alerts = state
        .services
        .alerts
        .list(query.all.unwrap_or(false), &now)
        .await?;
    Ok(Json(alerts))
}

/// Get an alert
#[utoipa::path(
    get,
    path = "/alerts/{id}",
    tag = "alerts",
    params(("id" = i32, Path, description = "Alert ID")),
    responses(
        (status = 200, description = "Alert", body = Alert)
    )
)]
pub async fn get_alert(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Alert>> {
    let alert = state.services.alerts.get_by_id(id).await?;
    Ok(Json(alert))
}

/// Create an alert
#[utoipa::path(
    post,
    path = "/alerts",
    tag = "alerts",
    request_body = CreateAlert,
    responses(
        (status = 201, description = "Alert created", body = Alert),
        (status = 400, description = "Invalid alert", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_alert(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateAlert>,
) -> AppResult<(StatusCode, Json<Alert>)> {
    let alert = state.services.alerts.create(&data).await?;
    Ok((StatusCode::CREATED, Json(alert)))
}

/// Update an alert
#[utoipa::path(
    put,
    path = "/alerts/{id}",
    tag = "alerts",
    params(("id" = i32, Path, description = "Alert ID")),
    request_body = UpdateAlert,
    responses(
        (status = 200, description = "Alert updated", body = Alert)
    )
)]
pub async fn update_alert(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<UpdateAlert>,
) -> AppResult<Json<Alert>> {
    let alert = state.services.alerts.update(id, &data).await?;
    Ok(Json(alert))
}

/// Delete an alert
#[utoipa::path(
    delete,
    path = "/alerts/{id}",
    tag = "alerts",
    params(("id" = i32, Path, description = "Alert ID")),
    responses(
        (status = 204, description = "Alert deleted")
    )
)]
pub async fn delete_alert(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.alerts.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
