//! Routes for the scenario catalog.

use axum::extract::{Path, State};
use axum::{Json, Router, routing::get};
use dilemma_scenario::domain::model::{DecisionPoint, Scenario};
use tracing::instrument;

use crate::error::ApiError;
use crate::state::AppState;

/// GET /
async fn list_scenarios(State(state): State<AppState>) -> Json<Vec<Scenario>> {
    Json(
        state
            .catalog
            .list()
            .iter()
            .map(|scenario| scenario.as_ref().clone())
            .collect(),
    )
}

/// GET /{scenario_id}
#[instrument(skip(state))]
async fn get_scenario(
    State(state): State<AppState>,
    Path(scenario_id): Path<String>,
) -> Result<Json<Scenario>, ApiError> {
    let scenario = state.catalog.get(&scenario_id)?;
    Ok(Json(scenario.as_ref().clone()))
}

/// GET /{scenario_id}/step/{step}
#[instrument(skip(state))]
async fn get_decision_point(
    State(state): State<AppState>,
    Path((scenario_id, step)): Path<(String, u32)>,
) -> Result<Json<DecisionPoint>, ApiError> {
    Ok(Json(state.catalog.get_decision_point(&scenario_id, step)?))
}

/// Returns the router for the scenario catalog.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_scenarios))
        .route("/{scenario_id}", get(get_scenario))
        .route("/{scenario_id}/step/{step}", get(get_decision_point))
}
