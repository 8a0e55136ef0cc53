//! In-memory session store.
//!
//! The map of sessions sits behind an async `RwLock` that is held only for
//! lookups and inserts. Each session has its own `Mutex`, so submissions
//! for one session are applied one at a time while different sessions
//! proceed in parallel. Idle sessions are evicted by TTL, and the store
//! never grows past its capacity.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Duration, Utc};
use dilemma_core::clock::Clock;
use dilemma_core::error::DomainError;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::domain::session::{Session, SessionId};

/// Bounds on session lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvictionPolicy {
    /// Idle time after which a session is dropped by [`SessionStore::evict_expired`].
    pub idle_ttl: Duration,
    /// Maximum number of live sessions.
    pub capacity: usize,
}

impl Default for EvictionPolicy {
    fn default() -> Self {
        Self {
            idle_ttl: Duration::hours(1),
            capacity: 10_000,
        }
    }
}

#[derive(Debug)]
struct SessionSlot {
    session: Mutex<Session>,
    last_active_ms: AtomicI64,
}

impl SessionSlot {
    fn touch(&self, now: DateTime<Utc>) {
        self.last_active_ms
            .store(now.timestamp_millis(), Ordering::Relaxed);
    }

    fn last_active(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.last_active_ms.load(Ordering::Relaxed))
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

/// Shared handle to one stored session.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    id: SessionId,
    slot: Arc<SessionSlot>,
}

impl SessionHandle {
    /// The session's ID.
    #[must_use]
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Returns a copy of the session's current state.
    pub async fn snapshot(&self) -> Session {
        self.slot.session.lock().await.clone()
    }
}

/// Holds per-session choice history keyed by session ID.
pub struct SessionStore {
    sessions: RwLock<HashMap<SessionId, Arc<SessionSlot>>>,
    policy: EvictionPolicy,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new(policy: EvictionPolicy, clock: Arc<dyn Clock>) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            policy,
            clock,
        }
    }

    /// The eviction policy in force.
    #[must_use]
    pub fn policy(&self) -> EvictionPolicy {
        self.policy
    }

    /// Number of live sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Whether the store holds no sessions.
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Returns the session for `session_id`, creating it if needed.
    ///
    /// A missing ID mints a fresh one; an unknown ID creates a new session
    /// under that ID. The boolean is `true` when a session was created.
    pub async fn get_or_create(
        &self,
        session_id: Option<SessionId>,
        scenario_id: &str,
    ) -> (SessionHandle, bool) {
        let now = self.clock.now();

        if let Some(id) = &session_id {
            if let Some(slot) = self.sessions.read().await.get(id) {
                slot.touch(now);
                return (
                    SessionHandle {
                        id: id.clone(),
                        slot: Arc::clone(slot),
                    },
                    false,
                );
            }
        }

        let id = session_id.unwrap_or_else(SessionId::generate);
        let mut sessions = self.sessions.write().await;

        // Another request may have created it between the two locks.
        if let Some(slot) = sessions.get(&id) {
            slot.touch(now);
            return (
                SessionHandle {
                    id,
                    slot: Arc::clone(slot),
                },
                false,
            );
        }

        self.make_room(&mut sessions);

        let slot = Arc::new(SessionSlot {
            session: Mutex::new(Session::new(id.clone(), scenario_id, now)),
            last_active_ms: AtomicI64::new(now.timestamp_millis()),
        });
        sessions.insert(id.clone(), Arc::clone(&slot));
        debug!(session_id = %id, scenario_id, "created session");

        (SessionHandle { id, slot }, true)
    }

    /// Appends a choice to the session and sets its current step.
    ///
    /// The append and the step update happen under the session's lock, so
    /// concurrent submissions for the same session never interleave. The
    /// returned copy reflects the session immediately after this append.
    ///
    /// If the handle's session was evicted after the handle was issued, the
    /// session is put back before the append. If another session has since
    /// been created under the same ID, the choice goes to that one.
    pub async fn record_choice(
        &self,
        handle: &SessionHandle,
        step: u32,
        choice_id: &str,
        choice_text: &str,
    ) -> Session {
        let mut slot = Arc::clone(&handle.slot);
        loop {
            let mut session = slot.session.lock().await;
            let sessions = self.sessions.read().await;
            let live = match sessions.get(&handle.id) {
                Some(live) if Arc::ptr_eq(live, &slot) => {
                    let now = self.clock.now();
                    session.record_choice(step, choice_id, choice_text, now);
                    slot.touch(now);
                    return session.clone();
                }
                Some(live) => Some(Arc::clone(live)),
                None => None,
            };
            drop(sessions);

            match live {
                Some(live) => {
                    drop(session);
                    slot = live;
                }
                None => self.reattach(&handle.id, &slot).await,
            }
        }
    }

    /// Puts an evicted slot back under `id` unless the ID was reused.
    async fn reattach(&self, id: &SessionId, slot: &Arc<SessionSlot>) {
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(id) {
            return;
        }
        self.make_room(&mut sessions);
        slot.touch(self.clock.now());
        sessions.insert(id.clone(), Arc::clone(slot));
        warn!(session_id = %id, "re-attached evicted session to record a choice");
    }

    /// Evicts least recently active sessions until one more fits.
    fn make_room(&self, sessions: &mut HashMap<SessionId, Arc<SessionSlot>>) {
        while sessions.len() >= self.policy.capacity.max(1) {
            let Some(oldest) = sessions
                .iter()
                .min_by_key(|(_, slot)| slot.last_active_ms.load(Ordering::Relaxed))
                .map(|(id, _)| id.clone())
            else {
                break;
            };
            sessions.remove(&oldest);
            debug!(session_id = %oldest, "evicted least recently active session at capacity");
        }
    }

    /// Returns a copy of a session's history.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::SessionNotFound` if the ID is unknown or evicted.
    pub async fn get(&self, session_id: &SessionId) -> Result<Session, DomainError> {
        let slot = self
            .sessions
            .read()
            .await
            .get(session_id)
            .cloned()
            .ok_or_else(|| DomainError::SessionNotFound(session_id.to_string()))?;
        Ok(slot.session.lock().await.clone())
    }

    /// Drops every session idle for at least the policy TTL. Returns the
    /// number of sessions removed.
    pub async fn evict_expired(&self) -> usize {
        let ttl = self.policy.idle_ttl;
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, slot| self.clock.elapsed_since(slot.last_active()) < ttl);
        let evicted = before - sessions.len();
        if evicted > 0 {
            info!(evicted, remaining = sessions.len(), "evicted idle sessions");
        }
        evicted
    }
}

/// Spawns a task that calls [`SessionStore::evict_expired`] every `interval`.
pub fn spawn_sweeper(store: Arc<SessionStore>, interval: std::time::Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // The first tick completes immediately.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            store.evict_expired().await;
        }
    })
}
