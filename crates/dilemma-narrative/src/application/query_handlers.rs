//! Query handlers for the decision orchestration context.

use dilemma_core::error::DomainError;
use dilemma_session::application::store::SessionStore;
use dilemma_session::domain::session::{Session, SessionId};

/// Retrieves a session's decision history.
///
/// # Errors
///
/// Returns `DomainError::SessionNotFound` if the session is unknown or has
/// been evicted.
pub async fn get_session_history(
    session_id: &str,
    store: &SessionStore,
) -> Result<Session, DomainError> {
    store.get(&SessionId::from(session_id)).await
}
