//! Client configuration resolved from the environment.
//!
//! API base URL: `LEO_API_URL` > `VITE_API_URL` > hosted backend default.
//! Token storage: `LEO_TOKEN_STORE` (`keyring`, `file`, `memory`), default `file`.

use std::str::FromStr;
use std::sync::Arc;

use crate::error::StorageError;
use crate::session::{FileStore, KeyringStore, MemoryStore, TokenStore};

pub const DEFAULT_API_URL: &str = "https://leo-backend-n4vs.onrender.com/api";

/// Which durable storage backs the session token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenStoreKind {
    Keyring,
    #[default]
    File,
    Memory,
}

impl FromStr for TokenStoreKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "keyring" | "keychain" => Ok(TokenStoreKind::Keyring),
            "file" => Ok(TokenStoreKind::File),
            "memory" => Ok(TokenStoreKind::Memory),
            other => Err(format!("unknown token store '{}'", other)),
        }
    }
}

impl TokenStoreKind {
    /// Build the store this kind names.
    pub fn open(self) -> Result<Arc<dyn TokenStore>, StorageError> {
        Ok(match self {
            TokenStoreKind::Keyring => Arc::new(KeyringStore),
            TokenStoreKind::File => Arc::new(FileStore::default_location()?),
            TokenStoreKind::Memory => Arc::new(MemoryStore::default()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_url: String,
    pub token_store: TokenStoreKind,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token_store: TokenStoreKind::default(),
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|url| !url.trim().is_empty());
        let api_url = non_empty("LEO_API_URL")
            .or_else(|| non_empty("VITE_API_URL"))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let token_store = match lookup("LEO_TOKEN_STORE") {
            Some(raw) => raw.parse::<TokenStoreKind>().unwrap_or_else(|e| {
                log::warn!("{}, using default", e);
                TokenStoreKind::default()
            }),
            None => TokenStoreKind::default(),
        };

        Self {
            api_url,
            token_store,
        }
    }
}
