use std::{collections::HashMap, sync::Arc, time::Duration};

use ai_gateway::{DocumentAssistant, Locale};
use tokio::{
    sync::RwLock,
    task::JoinHandle,
    time::{MissedTickBehavior, interval},
};
use tracing::{debug, info};

use crate::{
    error::{ToolError, ToolResult},
    processor::SimulatedProcessor,
    session::{SessionId, ToolSession},
};

/// Idle time after which a session may be evicted.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(60 * 60);

/// In-memory registry of live sessions.
///
/// Construct once, wrap in `Arc`, and share with request handlers. The
/// assistant and processor are handed to every new session. Sessions unused
/// for longer than the TTL are dropped by [`evict_idle`](Self::evict_idle),
/// which [`spawn_sweeper`](Self::spawn_sweeper) runs periodically.
#[derive(Debug)]
pub struct SessionStore {
    sessions: RwLock<HashMap<SessionId, Arc<ToolSession>>>,
    assistant: Arc<DocumentAssistant>,
    processor: SimulatedProcessor,
    default_locale: Locale,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(
        assistant: Arc<DocumentAssistant>,
        processor: SimulatedProcessor,
        default_locale: Locale,
    ) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            assistant,
            processor,
            default_locale,
            ttl: DEFAULT_SESSION_TTL,
        }
    }

    /// Overrides [`DEFAULT_SESSION_TTL`].
    #[must_use]
    pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn assistant(&self) -> &DocumentAssistant {
        &self.assistant
    }

    pub const fn default_locale(&self) -> Locale {
        self.default_locale
    }

    /// Opens a new session in `locale` (or the store default).
    pub async fn create(&self, locale: Option<Locale>) -> Arc<ToolSession> {
        let session = Arc::new(ToolSession::new(
            locale.unwrap_or(self.default_locale),
            Arc::clone(&self.assistant),
            self.processor.clone(),
        ));
        let id = session.id();
        self.sessions.write().await.insert(id, Arc::clone(&session));
        info!(session = %id, "session created");
        session
    }

    /// Looks up a session and marks it as used.
    ///
    /// # Errors
    /// [`ToolError::SessionNotFound`] for unknown ids.
    pub async fn get(&self, id: SessionId) -> ToolResult<Arc<ToolSession>> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .inspect(|s| s.touch())
            .ok_or_else(|| ToolError::SessionNotFound(id.to_string()))
    }

    /// # Errors
    /// [`ToolError::SessionNotFound`] for unknown ids.
    pub async fn remove(&self, id: SessionId) -> ToolResult<()> {
        let removed = self.sessions.write().await.remove(&id);
        if removed.is_none() {
            return Err(ToolError::SessionNotFound(id.to_string()));
        }
        info!(session = %id, "session closed");
        Ok(())
    }

    /// Drops sessions idle for at least the TTL. A session with a request in
    /// flight is kept. Returns the number removed.
    pub async fn evict_idle(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|id, s| {
            let idle = s.idle_for();
            let expired = idle >= self.ttl && !s.is_processing();
            if expired {
                info!(session = %id, idle_secs = idle.as_secs(), "idle session evicted");
            }
            !expired
        });
        before - sessions.len()
    }

    /// Runs [`evict_idle`](Self::evict_idle) every quarter TTL (at least once
    /// a second). The task ends once the store is dropped.
    pub fn spawn_sweeper(self: &Arc<Self>) -> JoinHandle<()> {
        let period = (self.ttl / 4).max(Duration::from_secs(1));
        let store = Arc::downgrade(self);
        tokio::spawn(async move {
            let mut ticks = interval(period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticks.tick().await;
                let Some(store) = store.upgrade() else {
                    break;
                };
                let evicted = store.evict_idle().await;
                if evicted > 0 {
                    let remaining = store.len().await;
                    debug!(evicted, remaining, "session sweep");
                }
            }
        })
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
