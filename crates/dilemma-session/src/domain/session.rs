//! A user's traversal of one scenario.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque session identifier.
///
/// Minted as a UUID on first submission, but any non-blank client-supplied
/// token is accepted so that clients can resume under their own IDs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Mints a new globally unique ID.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Interprets an optional client token; blank tokens count as absent.
    #[must_use]
    pub fn from_client(token: Option<String>) -> Option<Self> {
        token.filter(|t| !t.trim().is_empty()).map(Self)
    }

    /// Borrows the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SessionId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// One recorded submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedChoice {
    /// Step the choice was submitted for.
    pub step: u32,
    /// ID of the chosen option.
    pub choice_id: String,
    /// Text of the chosen option as the client displayed it.
    pub choice_text: String,
}

/// Decision history of one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    /// Session identifier.
    pub session_id: SessionId,
    /// Scenario the session was started in.
    pub scenario_id: String,
    /// Step of the most recent submission.
    pub current_step: u32,
    /// Append-only history, in submission order.
    pub choices_made: Vec<RecordedChoice>,
    /// When the session was created.
    pub created_at: DateTime<Utc>,
    /// When the last choice was recorded.
    pub updated_at: DateTime<Utc>,
}

impl Session {
    /// Creates an empty session.
    #[must_use]
    pub fn new(session_id: SessionId, scenario_id: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            session_id,
            scenario_id: scenario_id.into(),
            current_step: 0,
            choices_made: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Appends a choice and moves `current_step` to `step`.
    ///
    /// No ordering or membership checks happen here; out-of-order steps are
    /// recorded as submitted.
    pub fn record_choice(
        &mut self,
        step: u32,
        choice_id: impl Into<String>,
        choice_text: impl Into<String>,
        now: DateTime<Utc>,
    ) {
        self.choices_made.push(RecordedChoice {
            step,
            choice_id: choice_id.into(),
            choice_text: choice_text.into(),
        });
        self.current_step = step;
        self.updated_at = now;
    }

    /// Choice texts recorded before the latest entry.
    #[must_use]
    pub fn prior_choice_texts(&self) -> Vec<String> {
        let prior = self.choices_made.len().saturating_sub(1);
        self.choices_made[..prior]
            .iter()
            .map(|c| c.choice_text.clone())
            .collect()
    }
}
