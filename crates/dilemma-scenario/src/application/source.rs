//! Scenario sources feeding the catalog.
//!
//! A source yields a [`ScenarioBundle`]: the raw scenario records plus a
//! SHA-256 hash of the bytes they were read from, so operators can tell
//! which revision of the scenario file is live.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use dilemma_core::error::DomainError;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::domain::model::Scenario;

/// Raw scenario records and the version hash of their source.
#[derive(Debug, Clone)]
pub struct ScenarioBundle {
    /// Scenario records in source order.
    pub scenarios: Vec<Scenario>,
    /// Hex-encoded SHA-256 of the source bytes.
    pub version_hash: String,
}

/// On-disk document shape: `{ "scenarios": [ ... ] }`.
#[derive(Debug, Serialize, Deserialize)]
struct ScenarioDocument {
    scenarios: Vec<Scenario>,
}

/// Serialization format of a scenario document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// JSON document.
    Json,
    /// YAML document.
    Yaml,
}

impl DocumentFormat {
    /// Picks the format from a file extension; anything but `.yaml`/`.yml`
    /// is read as JSON.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Self::Yaml
            }
            _ => Self::Json,
        }
    }
}

fn hash_hex(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

impl ScenarioBundle {
    /// Parses a scenario document.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the document is malformed or a
    /// record is missing a required field.
    pub fn parse(bytes: &[u8], format: DocumentFormat) -> Result<Self, DomainError> {
        let document: ScenarioDocument = match format {
            DocumentFormat::Json => serde_json::from_slice(bytes).map_err(|e| {
                DomainError::Validation(format!("malformed scenario document: {e}"))
            })?,
            DocumentFormat::Yaml => serde_yaml::from_slice(bytes).map_err(|e| {
                DomainError::Validation(format!("malformed scenario document: {e}"))
            })?,
        };
        Ok(Self {
            scenarios: document.scenarios,
            version_hash: hash_hex(bytes),
        })
    }

    /// Wraps in-memory scenarios, hashing their JSON document form.
    #[must_use]
    pub fn from_scenarios(scenarios: Vec<Scenario>) -> Self {
        let document = ScenarioDocument { scenarios };
        let bytes = serde_json::to_vec(&document).unwrap_or_default();
        Self {
            scenarios: document.scenarios,
            version_hash: hash_hex(&bytes),
        }
    }
}

/// Read path of the scenario persistence collaborator.
#[async_trait]
pub trait ScenarioSource: Send + Sync {
    /// Reads every scenario record.
    async fn fetch(&self) -> Result<ScenarioBundle, DomainError>;

    /// Human-readable location, for logs.
    fn describe(&self) -> String;
}

/// Reads a JSON or YAML scenario document from the filesystem.
#[derive(Debug, Clone)]
pub struct FileScenarioSource {
    path: PathBuf,
}

impl FileScenarioSource {
    /// Creates a source for the document at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the scenario document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ScenarioSource for FileScenarioSource {
    async fn fetch(&self) -> Result<ScenarioBundle, DomainError> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            DomainError::Infrastructure(format!(
                "failed to read scenarios from {}: {e}",
                self.path.display()
            ))
        })?;
        debug!(path = %self.path.display(), bytes = bytes.len(), "read scenario document");
        ScenarioBundle::parse(&bytes, DocumentFormat::from_path(&self.path))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
