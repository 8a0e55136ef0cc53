//! Dilemma API server entry point.

use std::sync::Arc;

use dilemma_api::config::AppConfig;
use dilemma_api::error::AppError;
use dilemma_api::state::AppState;
use dilemma_api::{build_router, cors_layer, telemetry};
use dilemma_core::clock::{Clock, SystemClock};
use dilemma_core::error::DomainError;
use dilemma_core::generation::GenerationGateway;
use dilemma_gateway::openai_gateway::OpenAiCompatibleGateway;
use dilemma_gateway::retrying_gateway::RetryingGateway;
use dilemma_scenario::application::catalog::ScenarioCatalog;
use dilemma_scenario::application::source::{FileScenarioSource, ScenarioSource};
use dilemma_session::application::store::{SessionStore, spawn_sweeper};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // A missing .env file is fine; the process environment still applies.
    let _ = dotenvy::dotenv();

    let config = AppConfig::from_env()?;
    let _telemetry = telemetry::init(config.otlp_endpoint.as_deref())?;

    info!("Starting Dilemma API server");

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    // Load scenarios. A missing file starts the server with an empty
    // catalog; a malformed one is fatal.
    let scenario_source: Arc<dyn ScenarioSource> =
        Arc::new(FileScenarioSource::new(&config.scenarios_path));
    let catalog = Arc::new(ScenarioCatalog::new());
    match catalog
        .reload_from(scenario_source.as_ref(), clock.as_ref())
        .await
    {
        Ok(report) => info!(
            scenario_count = report.scenario_count,
            version_hash = %report.version_hash,
            "initial scenario load complete"
        ),
        Err(DomainError::Infrastructure(message)) => {
            warn!(%message, "scenario source unavailable, starting with an empty catalog");
        }
        Err(e) => return Err(e.into()),
    }

    // Generation gateway with timeout and fixed retries.
    let http_gateway = OpenAiCompatibleGateway::new(config.generation.gateway_config())
        .map_err(|e| AppError::Config(format!("generation gateway: {e}")))?;
    info!(model = http_gateway.model(), "generation gateway configured");
    let gateway: Arc<dyn GenerationGateway> = Arc::new(RetryingGateway::new(
        Arc::new(http_gateway),
        config.generation.retry,
    ));

    // Sessions and their background sweeper.
    let sessions = Arc::new(SessionStore::new(
        config.sessions.eviction,
        Arc::clone(&clock),
    ));
    let _sweeper = spawn_sweeper(Arc::clone(&sessions), config.sessions.sweep_interval);

    let app_state = AppState::new(
        catalog,
        sessions,
        gateway,
        scenario_source,
        clock,
        config.generation.failure_mode,
    );

    let app = build_router(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.cors)?);

    let addr = config.bind_addr()?;
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
