//! Authentication operations.
//!
//! Login and registration store the returned access token in the client's
//! session once the response has validated. Logout is local only.

use serde_json::Value;

use super::client::ApiClient;
use super::types::{AuthResponse, LoginRequest, NewUser};
use crate::error::ApiError;

impl ApiClient {
    /// POST /auth/login with `{email, password}`.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        log::info!("Logging in");
        let resp: AuthResponse = self
            .post("/auth/login", &LoginRequest { email, password })
            .await?;
        self.session().set(resp.access_token.clone()).await;
        log::info!("Login complete for {}", resp.user.username);
        Ok(resp)
    }

    /// POST /auth/register with `{username, email, password, role}`.
    pub async fn register(&self, user: &NewUser) -> Result<AuthResponse, ApiError> {
        log::info!("Registering {}", user.username);
        let resp: AuthResponse = self.post("/auth/register", user).await?;
        self.session().set(resp.access_token.clone()).await;
        log::info!("Registration complete for {}", resp.user.username);
        Ok(resp)
    }

    /// Drop the session token from memory and storage. No network call.
    pub async fn logout(&self) {
        self.session().clear().await;
        log::info!("Logged out");
    }

    /// GET /auth/profile.
    pub async fn get_profile(&self) -> Result<Value, ApiError> {
        self.authenticated_get("/auth/profile").await
    }
}
