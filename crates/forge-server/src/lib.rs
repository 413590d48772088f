pub mod error;
pub mod jobs;
pub mod routes;
pub mod state;

use axum::routing::{get, post};
use axum::Router;
use forge_core::Config;
use tower_http::cors::{Any, CorsLayer};

/// Build the axum Router with all API routes and middleware.
/// Used by `serve()` and available for integration testing.
pub fn build_router(app_state: state::AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/healthz", get(routes::health::healthz))
        .route("/api/deploy", post(routes::deploy::deploy))
        .route("/api/jobs/{id}", get(routes::jobs::get_job))
        .layer(cors)
        .with_state(app_state)
}

/// Start the deployment API server.
pub async fn serve(config: &Config, port: u16) -> anyhow::Result<()> {
    let app_state = state::AppState::from_config(config)?;
    let app = build_router(app_state);

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("deployment API listening on http://localhost:{port}");

    axum::serve(listener, app).await?;
    Ok(())
}
