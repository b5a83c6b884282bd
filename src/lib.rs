//! Client library for the Léo mediation backend.
//!
//! [`ApiClient`] wraps the backend's HTTP API: authentication, AI text
//! operations (sentiment, rephrasing, response generation, mirror mode),
//! legal document processing and message history. The bearer token lives in
//! an explicit [`Session`] backed by a [`TokenStore`](session::TokenStore).

pub mod api;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod session;

pub use api::types::{AuthResponse, DocumentUpload, NewUser, User};
pub use api::ApiClient;
pub use config::{ClientConfig, TokenStoreKind};
pub use error::{ApiError, StorageError};
pub use session::Session;

#[cfg(test)]
pub(crate) mod testing;
