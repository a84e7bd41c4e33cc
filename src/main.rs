//! What's Open Server
//!
//! REST API server reporting campus facility hours and alerts.

use axum::{
    routing::{get, post},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use whatsopen_server::{
    api,
    config::{AppConfig, LoggingConfig},
    repository::Repository,
    services::Services,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;

    init_tracing(&config.logging);

    tracing::info!("Starting What's Open Server v{}", env!("CARGO_PKG_VERSION"));

    let clock_offset = config.clock.offset().map_err(anyhow::Error::msg)?;
    tracing::info!(utc_offset = %clock_offset, "Reference clock configured");

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await?;

    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations").run(&pool).await?;

    tracing::info!("Database migrations completed");

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    let repository = Repository::new(pool);
    let services = Services::new(repository, config.facilities.clone(), clock_offset);

    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    let app = create_router(state);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Install the global subscriber; `RUST_LOG` wins over the configured level
fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("whatsopen_server={},tower_http=debug", logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Facilities
        .route(
            "/facilities",
            get(api::facilities::list_facilities).post(api::facilities::create_facility),
        )
        .route(
            "/facilities/:slug",
            get(api::facilities::get_facility)
                .put(api::facilities::update_facility)
                .delete(api::facilities::delete_facility),
        )
        .route("/facilities/:slug/status", get(api::facilities::facility_status))
        .route(
            "/facilities/:slug/special-schedules/:schedule_id",
            post(api::facilities::attach_special_schedule)
                .delete(api::facilities::detach_special_schedule),
        )
        // Categories
        .route(
            "/categories",
            get(api::categories::list_categories).post(api::categories::create_category),
        )
        .route(
            "/categories/:id",
            get(api::categories::get_category)
                .put(api::categories::update_category)
                .delete(api::categories::delete_category),
        )
        // Locations
        .route(
            "/locations",
            get(api::categories::list_locations).post(api::categories::create_location),
        )
        .route(
            "/locations/:id",
            get(api::categories::get_location)
                .put(api::categories::update_location)
                .delete(api::categories::delete_location),
        )
        // Schedules
        .route(
            "/schedules",
            get(api::schedules::list_schedules).post(api::schedules::create_schedule),
        )
        .route(
            "/schedules/:id",
            get(api::schedules::get_schedule)
                .put(api::schedules::update_schedule)
                .delete(api::schedules::delete_schedule),
        )
        .route("/schedules/:id/open-times", post(api::schedules::create_open_time))
        // Open times
        .route(
            "/open-times/:id",
            get(api::schedules::get_open_time)
                .put(api::schedules::update_open_time)
                .delete(api::schedules::delete_open_time),
        )
        // Alerts
        .route("/alerts", get(api::alerts::list_alerts).post(api::alerts::create_alert))
        .route(
            "/alerts/:id",
            get(api::alerts::get_alert)
                .put(api::alerts::update_alert)
                .delete(api::alerts::delete_alert),
        )
        .with_state(state);

    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(cors),
        )
}
