use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::session::Session;

/// How often the background sweep looks for idle sessions.
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

struct Entry {
    session: Session,
    last_active: Instant,
}

/// In-memory session registry. Sessions idle longer than `ttl` are pruned.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, Entry>>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::default(),
            ttl,
        }
    }

    pub async fn create(&self, demo_mode: bool) -> Session {
        let session = Session::new(demo_mode);
        self.inner.write().await.insert(
            session.id,
            Entry {
                session: session.clone(),
                last_active: Instant::now(),
            },
        );
        debug!(session_id = %session.id, demo_mode, "Session created");
        session
    }

    pub async fn get(&self, id: Uuid) -> Result<Session, AppError> {
        self.inner
            .read()
            .await
            .get(&id)
            .map(|entry| entry.session.clone())
            .ok_or_else(|| not_found(id))
    }

    /// Runs `f` against the session under the write lock. Counts as activity.
    pub async fn update<T, F>(&self, id: Uuid, f: F) -> Result<T, AppError>
    where
        F: FnOnce(&mut Session) -> Result<T, AppError>,
    {
        let mut sessions = self.inner.write().await;
        let entry = sessions.get_mut(&id).ok_or_else(|| not_found(id))?;
        entry.last_active = Instant::now();
        f(&mut entry.session)
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        self.inner
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found(id))
    }

    pub async fn count(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Drops sessions with no activity for longer than the TTL. Sessions with a
    /// submission in flight are kept. Returns how many were removed.
    pub async fn prune_expired(&self) -> usize {
        let mut sessions = self.inner.write().await;
        let before = sessions.len();
        let ttl = self.ttl;
        sessions.retain(|_, entry| entry.session.loading || entry.last_active.elapsed() <= ttl);
        before - sessions.len()
    }

    /// Spawns the periodic prune loop.
    pub fn spawn_sweeper(&self, every: Duration) -> JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            loop {
                ticker.tick().await;
                let removed = store.prune_expired().await;
                if removed > 0 {
                    info!(removed, "Pruned idle sessions");
                }
            }
        })
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {id} not found"))
}
