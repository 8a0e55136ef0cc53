//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use dilemma_core::clock::Clock;
use dilemma_core::generation::GenerationGateway;
use dilemma_narrative::application::orchestrator::GenerationFailureMode;
use dilemma_scenario::application::catalog::ScenarioCatalog;
use dilemma_scenario::application::source::ScenarioSource;
use dilemma_session::application::store::{EvictionPolicy, SessionStore};
use dilemma_test_support::{
    FixedClock, ScriptedGateway, StaticScenarioSource, leaked_report_scenario,
    three_step_scenario,
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use dilemma_api::build_router;
use dilemma_api::state::AppState;

/// Canned four-framework analysis returned by the default test gateway.
pub const ANALYSIS: &str = "**Utilitarian:** Weighs outcomes.\n\n\
    **Deontological:** Weighs duties.\n\n\
    **Virtue Ethics:** Weighs character.\n\n\
    **Care Ethics:** Weighs relationships.";

/// Fixed timestamp used across all integration tests.
pub fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(
        chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2026, 1, 15, 10, 0, 0).unwrap(),
    ))
}

/// Application state over `source`, loaded once, with `gateway`.
pub async fn build_state(
    source: Arc<dyn ScenarioSource>,
    gateway: Arc<dyn GenerationGateway>,
) -> AppState {
    let clock = fixed_clock();
    let catalog = Arc::new(ScenarioCatalog::new());
    catalog
        .reload_from(source.as_ref(), clock.as_ref())
        .await
        .unwrap();
    let sessions = Arc::new(SessionStore::new(EvictionPolicy::default(), Arc::clone(&clock)));
    AppState::new(
        catalog,
        sessions,
        gateway,
        source,
        clock,
        GenerationFailureMode::Degrade,
    )
}

/// Build the full app router over the fixture scenarios with a scripted
/// gateway. Uses the same route structure as `main.rs`.
pub async fn build_test_app() -> (Router, Arc<ScriptedGateway>) {
    let gateway = Arc::new(ScriptedGateway::always(ANALYSIS));
    let source = Arc::new(StaticScenarioSource::new(vec![
        leaked_report_scenario(),
        three_step_scenario(),
    ]));
    let state = build_state(source, gateway.clone()).await;
    (build_router(state), gateway)
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    send(app, request).await
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}
