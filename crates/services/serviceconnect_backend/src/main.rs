// File: services/serviceconnect_backend/src/main.rs
use axum::{routing::get, Router};
use serviceconnect_availability::routes as availability_routes;
use serviceconnect_common::logging::{init_with_level, parse_level};
use serviceconnect_common::{log_error, ServiceConnectError};
use serviceconnect_config::load_config;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

mod app_state;
use app_state::AppState;

#[tokio::main]
async fn main() -> Result<(), ServiceConnectError> {
    let config = load_config().map_err(|e| ServiceConnectError::ConfigError(e.to_string()))?;
    init_with_level(parse_level(config.log_level()));
    let config = Arc::new(config);

    let state = AppState::new(config.clone()).inspect_err(|e| log_error(e, "Startup failed"))?;
    info!(
        "Booking is {}, slot step {} minutes",
        if config.use_booking { "enabled" } else { "disabled" },
        config.slot_step_minutes()
    );

    let api_router = Router::new()
        .route("/", get(|| async { "Welcome to ServiceConnect API!" }))
        .merge(availability_routes::routes(state.availability_state()));

    #[allow(unused_mut)] // mutable only with the openapi feature
    let mut app = Router::new().nest("/api", api_router);

    // Conditionally add Swagger UI and JSON endpoint if openapi feature enabled
    #[cfg(feature = "openapi")]
    {
        use serviceconnect_availability::doc::AvailabilityApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "ServiceConnect API",
                version = "0.1.0",
                description = "ServiceConnect availability and booking API",
                license(name = "MIT", url = "https://opensource.org/licenses/MIT")
            ),
            servers( (url = "/api", description = "Main API Prefix")),
        )]
        struct ApiDoc;

        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(AvailabilityApiDoc::openapi());
        info!("Adding Swagger UI at /api/docs");

        let swagger_ui = SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc);
        app = app.merge(swagger_ui);
    }

    let app = app.layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
