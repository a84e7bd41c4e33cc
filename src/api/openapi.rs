//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{alerts, categories, facilities, health, schedules};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "What's Open API",
        version = "2.0.0",
        description = "Campus facility hours and alerts REST API",
        license(name = "Apache-2.0", url = "https://www.apache.org/licenses/LICENSE-2.0")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Facilities
        facilities::list_facilities,
        facilities::get_facility,
        facilities::facility_status,
        facilities::create_facility,
        facilities::update_facility,
        facilities::delete_facility,
        facilities::attach_special_schedule,
        facilities::detach_special_schedule,
        // Categories
        categories::list_categories,
        categories::get_category,
        categories::create_category,
        categories::update_category,
        categories::delete_category,
        // Locations
        categories::list_locations,
        categories::get_location,
        categories::create_location,
        categories::update_location,
        categories::delete_location,
        // Schedules
        schedules::list_schedules,
        schedules::get_schedule,
        schedules::create_schedule,
        schedules::update_schedule,
        schedules::delete_schedule,
        schedules::create_open_time,
        schedules::get_open_time,
        schedules::update_open_time,
        schedules::delete_open_time,
        // Alerts
        alerts::list_alerts,
        alerts::get_alert,
        alerts::create_alert,
        alerts::update_alert,
        alerts::delete_alert,
    ),
    components(
        schemas(
            // Facilities
            crate::models::facility::Facility,
            crate::models::facility::FacilityDetails,
            crate::models::facility::FacilityWithStatus,
            crate::models::facility::FacilityStatusResponse,
            crate::models::facility::CreateFacility,
            crate::models::facility::UpdateFacility,
            crate::models::facility::OpenStatus,
            crate::status::ScheduleChoice,
            // Categories and locations
            crate::models::facility::Category,
            crate::models::facility::CategoryRequest,
            crate::models::facility::Location,
            crate::models::facility::CreateLocation,
            crate::models::facility::UpdateLocation,
            crate::models::enums::CampusRegion,
            // Schedules
            crate::models::schedule::Schedule,
            crate::models::schedule::ScheduleView,
            crate::models::schedule::CreateSchedule,
            crate::models::schedule::UpdateSchedule,
            crate::models::schedule::OpenTime,
            crate::models::schedule::CreateOpenTime,
            // Alerts
            crate::models::alert::Alert,
            crate::models::alert::AlertView,
            crate::models::alert::CreateAlert,
            crate::models::alert::UpdateAlert,
            crate::models::enums::UrgencyTag,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "facilities", description = "Facilities and their open status"),
        (name = "categories", description = "Facility categories"),
        (name = "locations", description = "Facility locations"),
        (name = "schedules", description = "Schedules and open times"),
        (name = "alerts", description = "Campus alerts")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_status_endpoint() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/facilities/{slug}/status"));
        assert!(doc.paths.paths.contains_key("/alerts"));
    }
}
