//! In-memory session storage for the store gateway.
//!
//! Sessions hold a visitor's cart and account state, keyed by the UUID the
//! `x-session-id` middleware resolves. Each session sits behind its own
//! mutex so concurrent requests for different visitors never contend.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use voltige_core::StoreSession;

type SharedSession = Arc<Mutex<StoreSession>>;

#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, SharedSession>>>,
}

impl SessionStore {
    /// Fetches the session for `id`, creating an empty one on first use.
    pub async fn session(&self, id: Uuid) -> SharedSession {
        if let Some(session) = self.inner.read().await.get(&id) {
            return Arc::clone(session);
        }
        let mut sessions = self.inner.write().await;
        Arc::clone(sessions.entry(id).or_default())
    }

    /// Number of live sessions.
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }
}
