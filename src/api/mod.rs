//! API client module for the Léo backend.
//!
//! Provides the HTTP client with bearer auth injection, the auth and AI
//! operations, and request/response types matching the backend API.

pub mod ai;
pub mod auth;
pub mod client;
pub mod types;

pub use client::ApiClient;
