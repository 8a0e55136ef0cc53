//! Administrative routes.
//!
//! Scenario authoring is not exposed here; operators edit the scenario
//! document and trigger a reload.

use axum::extract::State;
use axum::{Json, Router, routing::{get, post}};
use dilemma_scenario::application::catalog::CatalogLoadReport;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// POST /scenarios/reload
#[instrument(skip(state), fields(source = %state.scenario_source.describe()))]
async fn reload_scenarios(
    State(state): State<AppState>,
) -> Result<Json<CatalogLoadReport>, ApiError> {
    let correlation_id = Uuid::new_v4();
    info!(%correlation_id, "handling scenario reload");

    let report = state
        .catalog
        .reload_from(state.scenario_source.as_ref(), state.clock.as_ref())
        .await?;

    Ok(Json(report))
}

/// GET /scenarios/status
///
/// Returns the report of the live snapshot, or `null` before the first
/// successful load.
async fn catalog_status(State(state): State<AppState>) -> Json<Option<CatalogLoadReport>> {
    Json(state.catalog.snapshot().report().cloned())
}

/// Returns the router for administrative endpoints.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/scenarios/reload", post(reload_scenarios))
        .route("/scenarios/status", get(catalog_status))
}
