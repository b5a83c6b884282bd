//! Session state: the bearer token held by an [`ApiClient`](crate::ApiClient).
//!
//! The token is read from its [`TokenStore`] once, when the session is
//! restored, and written back on every auth state change. Cloning a `Session`
//! shares it, so two clients built from clones see the same login.

pub mod store;

use std::sync::Arc;

use tokio::sync::RwLock;
use zeroize::Zeroize;

pub use store::{FileStore, KeyringStore, MemoryStore, TokenStore, TOKEN_KEY};

#[derive(Clone)]
pub struct Session {
    token: Arc<RwLock<Option<String>>>,
    store: Arc<dyn TokenStore>,
}

impl Session {
    /// Restore the session from durable storage.
    ///
    /// An unreadable store is logged and treated as logged out.
    pub fn restore(store: Arc<dyn TokenStore>) -> Self {
        let token = match store.load() {
            Ok(token) => token,
            Err(e) => {
                log::warn!("Failed to read stored session, starting logged out: {}", e);
                None
            }
        };
        if token.is_some() {
            log::info!("Restored stored session token");
        }
        Self {
            token: Arc::new(RwLock::new(token)),
            store,
        }
    }

    /// A session that is never persisted.
    pub fn ephemeral() -> Self {
        Self::restore(Arc::new(MemoryStore::default()))
    }

    pub async fn token(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.token.read().await.is_some()
    }

    /// Replace the held token and persist it.
    ///
    /// Memory and storage are updated under one write lock, so concurrent
    /// `set`/`clear` calls leave both agreeing with the last one to finish.
    /// A storage failure is logged; the in-memory token still applies.
    pub async fn set(&self, token: String) {
        let mut guard = self.token.write().await;
        if let Err(e) = self.store.save(&token) {
            log::warn!("Failed to persist session token: {}", e);
        }
        if let Some(ref mut old) = *guard {
            old.zeroize();
        }
        *guard = Some(token);
    }

    /// Forget the held token in memory and in storage.
    pub async fn clear(&self) {
        let mut guard = self.token.write().await;
        if let Err(e) = self.store.clear() {
            log::warn!("Failed to clear stored session token: {}", e);
        }
        if let Some(ref mut old) = *guard {
            old.zeroize();
        }
        *guard = None;
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}
