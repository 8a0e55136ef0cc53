//! Routes for choice submission and session history.

use axum::extract::{Path, State};
use axum::{Json, Router, routing::{get, post}};
use dilemma_narrative::application::orchestrator::DecisionOutcome;
use dilemma_narrative::application::query_handlers;
use dilemma_narrative::domain::commands::SubmitChoice;
use dilemma_session::domain::session::Session;
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /submit.
#[derive(Debug, Deserialize)]
pub struct SubmitDecisionRequest {
    /// Scenario being played.
    pub scenario_id: String,
    /// Session to continue; omitted or blank starts a new one.
    #[serde(default)]
    pub session_id: Option<String>,
    /// Step the choice is for (1-based).
    pub step: u32,
    /// ID of the chosen option.
    pub choice_id: String,
    /// Text of the chosen option.
    pub choice_text: String,
}

/// POST /submit
#[instrument(
    skip(state, request),
    fields(scenario_id = %request.scenario_id, step = request.step)
)]
async fn submit_decision(
    State(state): State<AppState>,
    Json(request): Json<SubmitDecisionRequest>,
) -> Result<Json<DecisionOutcome>, ApiError> {
    let command = SubmitChoice {
        correlation_id: Uuid::new_v4(),
        scenario_id: request.scenario_id,
        session_id: request.session_id,
        step: request.step,
        choice_id: request.choice_id,
        choice_text: request.choice_text,
    };

    info!(correlation_id = %command.correlation_id, "handling submit_choice command");

    let outcome = state.orchestrator.submit(&command).await?;

    Ok(Json(outcome))
}

/// GET /session/{session_id}
#[instrument(skip(state))]
async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<Session>, ApiError> {
    let session = query_handlers::get_session_history(&session_id, &state.sessions).await?;
    Ok(Json(session))
}

/// Returns the router for decision endpoints.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/submit", post(submit_decision))
        .route("/session/{session_id}", get(get_session))
}
