// src/services/sessions.rs

use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};

use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::exam::{ExamState, Session};

/// A session guarded for the duration of one request.
pub type SessionHandle = Arc<Mutex<Session>>;

struct Entry {
    session: SessionHandle,
    last_seen: Instant,
}

impl Entry {
    /// A session is kept while it is in use, mid-exam, or seen within `idle`.
    fn is_live(&self, idle: Duration) -> bool {
        if self.last_seen.elapsed() < idle {
            return true;
        }
        match self.session.try_lock() {
            Ok(session) => session.state() == ExamState::ExamInProgress,
            Err(_) => true,
        }
    }
}

/// Live sessions keyed by the id carried in the session token.
///
/// Sessions are created by the boundary on first contact and destroyed on exit.
/// Every lookup refreshes a session. Sessions left idle for longer than
/// `idle_timeout` are pruned whenever a new session is created, except those
/// with an exam in progress: the exam has no time limit.
#[derive(Clone)]
pub struct SessionStore {
    entries: Arc<RwLock<HashMap<Uuid, Entry>>>,
    idle_timeout: Duration,
}

impl SessionStore {
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            idle_timeout,
        }
    }

    pub async fn create(&self) -> (Uuid, SessionHandle) {
        let id = Uuid::new_v4();
        let session = Arc::new(Mutex::new(Session::new()));

        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.is_live(self.idle_timeout));
        if entries.len() < before {
            tracing::debug!("Pruned {} idle session(s)", before - entries.len());
        }
        entries.insert(
            id,
            Entry {
                session: Arc::clone(&session),
                last_seen: Instant::now(),
            },
        );

        (id, session)
    }

    /// Looks a session up and marks it as seen.
    pub async fn get(&self, id: &Uuid) -> Option<SessionHandle> {
        let mut entries = self.entries.write().await;
        let entry = entries.get_mut(id)?;
        entry.last_seen = Instant::now();
        Some(Arc::clone(&entry.session))
    }

    pub async fn remove(&self, id: &Uuid) -> bool {
        self.entries.write().await.remove(id).is_some()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
