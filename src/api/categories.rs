//! Category and location API endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::facility::{Category, CategoryRequest, CreateLocation, Location, UpdateLocation},
};

// ---- Categories ----

/// List categories
#[utoipa::path(
    get,
    path = "/categories",
    tag = "categories",
    responses(
        (status = 200, description = "Categories", body = Vec<Category>)
    )
)]
pub async fn list_categories(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Category>>> {
    let categories = state.services.facilities.list_categories().await?;
    Ok(Json(categories))
}

/// Get a category
#[utoipa::path(
    get,
    path = "/categories/{id}",
    tag = "categories",
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category", body = Category)
    )
)]
pub async fn get_category(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Category>> {
    let category = state.services.facilities.get_category(id).await?;
    Ok(Json(category))
}

/// Create a category
#[utoipa::path(
    post,
    path = "/categories",
    tag = "categories",
    request_body = CategoryRequest,
    responses(
        (status = 201, description = "Category created", body = Category)
    )
)]
pub async fn create_category(
    State(state): State<crate::AppState>,
    Json(data): Json<CategoryRequest>,
) -> AppResult<(StatusCode, Json<Category>)> {
    let category = state.services.facilities.create_category(&data).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// Rename a category
#[utoipa::path(
    put,
    path = "/categories/{id}",
    tag = "categories",
    params(("id" = i32, Path, description = "Category ID")),
    request_body = CategoryRequest,
    responses(
        (status = 200, description = "Category updated", body = Category)
    )
)]
pub async fn update_category(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<CategoryRequest>,
) -> AppResult<Json<Category>> {
    let category = state.services.facilities.rename_category(id, &data).await?;
    Ok(Json(category))
}

/// Delete a category and its facilities
#[utoipa::path(
    delete,
    path = "/categories/{id}",
    tag = "categories",
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 204, description = "Category deleted")
    )
)]
pub async fn delete_category(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.facilities.delete_category(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---- Locations ----

/// List locations
#[utoipa::path(
    get,
    path = "/locations",
    tag = "locations",
    responses(
        (status = 200, description = "Locations", body = Vec<Location>)
    )
)]
pub async fn list_locations(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Location>>> {
    let locations = state.services.facilities.list_locations().await?;
    Ok(Json(locations))
}

/// Get a location
#[utoipa::path(
    get,
    path = "/locations/{id}",
    tag = "locations",
    params(("id" = i32, Path, description = "Location ID")),
    responses(
        (status = 200, description = "Location", body = Location)
    )
)]
pub async fn get_location(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Location>> {
    let location = state.services.facilities.get_location(id).await?;
    Ok(Json(location))
}

/// Create a location
#[utoipa::path(
    post,
    path = "/locations",
    tag = "locations",
    request_body = CreateLocation,
    responses(
        (status = 201, description = "Location created", body = Location)
    )
)]
pub async fn create_location(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateLocation>,
) -> AppResult<(StatusCode, Json<Location>)> {
    let location = state.services.facilities.create_location(&data).await?;
    Ok((StatusCode::CREATED, Json(location)))
}

/// Update a location
#[utoipa::path(
    put,
    path = "/locations/{id}",
    tag = "locations",
    params(("id" = i32, Path, description = "Location ID")),
    request_body = UpdateLocation,
    responses(
        (status = 200, description = "Location updated", body = Location)
    )
)]
pub async fn update_location(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<UpdateLocation>,
) -> AppResult<Json<Location>> {
    let location = state.services.facilities.update_location(id, &data).await?;
    Ok(Json(location))
}

/// Delete a location and its facilities
#[utoipa::path(
    delete,
    path = "/locations/{id}",
    tag = "locations",
    params(("id" = i32, Path, description = "Location ID")),
    responses(
        (status = 204, description = "Location deleted")
    )
)]
pub async fn delete_location(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.facilities.delete_location(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
