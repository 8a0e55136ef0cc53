//! Dilemma: HTTP API.
//!
//! Exposes the scenario catalog, choice submission and session history
//! over JSON, plus an administrative catalog reload.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod telemetry;

use axum::Router;
use axum::http::HeaderValue;
use tower_http::cors::{Any, CorsLayer};

use crate::config::CorsSettings;
use crate::error::AppError;
use crate::state::AppState;

/// Builds the full route tree without middleware.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .nest("/api/scenarios", routes::scenarios::router())
        .nest("/api/decisions", routes::decisions::router())
        .nest("/api/admin", routes::admin::router())
        .with_state(state)
}

/// Builds the CORS layer for the configured origin.
///
/// # Errors
///
/// Returns `AppError::Config` if the origin is not a valid header value.
pub fn cors_layer(settings: &CorsSettings) -> Result<CorsLayer, AppError> {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if settings.allow_any {
        return Ok(layer.allow_origin(Any));
    }
    let origin = HeaderValue::from_str(&settings.allowed_origin).map_err(|e| {
        AppError::Config(format!(
            "CORS_ALLOWED_ORIGIN '{}' is invalid: {e}",
            settings.allowed_origin
        ))
    })?;
    Ok(layer.allow_origin(origin))
}
