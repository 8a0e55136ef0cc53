//! Integration tests for catalog loading from files and admin reload.

mod common;

use std::io::Write;
use std::sync::Arc;

use axum::http::StatusCode;
use dilemma_scenario::application::source::FileScenarioSource;
use dilemma_test_support::{ScriptedGateway, leaked_report_scenario, three_step_scenario};
use serde_json::json;

fn write_document(file: &mut tempfile::NamedTempFile, scenarios: &serde_json::Value) {
    file.as_file_mut().set_len(0).unwrap();
    let mut handle = file.reopen().unwrap();
    handle
        .write_all(serde_json::to_string(&json!({ "scenarios": scenarios })).unwrap().as_bytes())
        .unwrap();
}

#[tokio::test]
async fn test_scenarios_loaded_from_file_round_trip_through_api() {
    // Arrange
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write_document(&mut file, &json!([leaked_report_scenario()]));
    let source = Arc::new(FileScenarioSource::new(file.path()));
    let state = common::build_state(source, Arc::new(ScriptedGateway::always(common::ANALYSIS))).await;
    let app = dilemma_api::build_router(state);

    // Act
    let (status, json) = common::get_json(app, "/api/scenarios/leaked_report").await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, serde_json::to_value(leaked_report_scenario()).unwrap());
}

#[tokio::test]
async fn test_admin_reload_picks_up_file_changes() {
    // Arrange
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write_document(&mut file, &json!([leaked_report_scenario()]));
    let source = Arc::new(FileScenarioSource::new(file.path()));
    let state = common::build_state(source, Arc::new(ScriptedGateway::always(common::ANALYSIS))).await;
    let app = dilemma_api::build_router(state);
    let (_, before) = common::get_json(app.clone(), "/api/admin/scenarios/status").await;

    write_document(
        &mut file,
        &json!([leaked_report_scenario(), three_step_scenario()]),
    );

    // Act
    let (status, report) =
        common::post_json(app.clone(), "/api/admin/scenarios/reload", &json!({})).await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["scenario_count"], 2);
    assert_ne!(report["version_hash"], before["version_hash"]);
    let (_, list) = common::get_json(app, "/api/scenarios").await;
    assert_eq!(list.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_admin_reload_of_malformed_file_keeps_previous_catalog() {
    // Arrange
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write_document(&mut file, &json!([leaked_report_scenario()]));
    let source = Arc::new(FileScenarioSource::new(file.path()));
    let state = common::build_state(source, Arc::new(ScriptedGateway::always(common::ANALYSIS))).await;
    let app = dilemma_api::build_router(state);

    write_document(&mut file, &json!([{ "id": "half_written" }]));

    // Act
    let (status, json) =
        common::post_json(app.clone(), "/api/admin/scenarios/reload", &json!({})).await;

    // Assert
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "validation_error");
    let (status, _) = common::get_json(app, "/api/scenarios/leaked_report").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_bundled_scenario_document_is_valid() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data/scenarios.json");
    let source = Arc::new(FileScenarioSource::new(path));

    let state = common::build_state(source, Arc::new(ScriptedGateway::always(common::ANALYSIS))).await;

    assert!(!state.catalog.list().is_empty());
    assert!(state.catalog.get("leaked_report").is_ok());
}
