//! Application state for the HTTP server.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::league::service::LeagueService;
use crate::services::CompositionSession;

/// A session slot in the store.
///
/// The outer map lock is held only for lookup; the per-session tokio
/// mutex serializes draft operations and may be held across the session's
/// external await points.
pub type SharedSession = Arc<tokio::sync::Mutex<CompositionSession>>;

/// In-memory store of active composition sessions.
#[derive(Default)]
pub struct SessionStore {
    inner: RwLock<HashMap<Uuid, SharedSession>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a session and return its ID.
    pub fn insert(&self, session: CompositionSession) -> Uuid {
        let id = Uuid::new_v4();
        self.inner
            .write()
            .insert(id, Arc::new(tokio::sync::Mutex::new(session)));
        id
    }

    pub fn get(&self, id: Uuid) -> Option<SharedSession> {
        self.inner.read().get(&id).cloned()
    }

    /// Drop a session entirely. Abandoning a draft needs no external
    /// cleanup; commit is the only external mutation.
    pub fn remove(&self, id: Uuid) -> Option<SharedSession> {
        self.inner.write().remove(&id)
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// League service the sessions compose against.
    pub league: Arc<dyn LeagueService>,
    /// Active composition sessions.
    pub sessions: Arc<SessionStore>,
}

impl AppState {
    /// Create a new application state with the given league service.
    pub fn new(league: Arc<dyn LeagueService>) -> Self {
        Self {
            league,
            sessions: Arc::new(SessionStore::new()),
        }
    }
}
