//! HTTP client with bearer auth injection and uniform response unwrapping.
//!
//! Every JSON request carries `Content-Type: application/json`. Requests made
//! while a session token is held carry `Authorization: Bearer <token>`; without
//! one they are sent anyway and the backend decides.

use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::session::Session;

/// HTTP client wrapper for Léo API communication.
///
/// Owns its [`Session`]; build one per composition root and hand it to the
/// code that needs it.
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: Session,
}

impl ApiClient {
    /// Create a client for `base_url` using an existing session.
    pub fn new(base_url: &str, session: Session) -> Self {
        let client = Client::builder()
            .user_agent(concat!("leo-client/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    /// Open the configured token store, restore the session from it and
    /// build the client.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        let store = config.token_store.open()?;
        Ok(Self::new(&config.api_url, Session::restore(store)))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// True iff a session token is currently held.
    pub async fn is_authenticated(&self) -> bool {
        self.session.is_authenticated().await
    }

    /// The current session token, if any.
    pub async fn get_token(&self) -> Option<String> {
        self.session.token().await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Start a JSON request, attaching the bearer token when one is held.
    async fn authenticated(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .client
            .request(method, self.url(path))
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        match self.session.token().await {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send an authenticated GET request to a relative API path.
    pub(crate) async fn authenticated_get<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, ApiError> {
        let builder = self.authenticated(Method::GET, path).await;
        send(builder, "GET", path).await
    }

    /// Send an authenticated POST request with a JSON body.
    pub(crate) async fn authenticated_post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let builder = self.authenticated(Method::POST, path).await.json(body);
        send(builder, "POST", path).await
    }

    /// Send an authenticated DELETE request to a relative API path.
    pub(crate) async fn authenticated_delete<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, ApiError> {
        let builder = self.authenticated(Method::DELETE, path).await;
        send(builder, "DELETE", path).await
    }

    /// Send an unauthenticated POST request with a JSON body.
    /// Used for login and registration, which never carry the held token:
    /// a stale session must not be presented while establishing a new one.
    pub(crate) async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let builder = self.client.post(self.url(path)).json(body);
        send(builder, "POST", path).await
    }

    /// Send a bare GET request with no extra headers.
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let builder = self.client.get(self.url(path));
        send(builder, "GET", path).await
    }

    /// Send an authenticated multipart POST request.
    ///
    /// No JSON content type is set; reqwest writes the multipart boundary header.
    pub(crate) async fn authenticated_multipart_post<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T, ApiError> {
        let mut builder = self.client.post(self.url(path)).multipart(form);
        if let Some(token) = self.session.token().await {
            builder = builder.bearer_auth(token);
        }
        send(builder, "POST", path).await
    }
}

async fn send<T: DeserializeOwned>(
    builder: RequestBuilder,
    method: &str,
    path: &str,
) -> Result<T, ApiError> {
    let resp = builder.send().await?;
    log::debug!("{} {} -> {}", method, path, resp.status());
    handle_response(resp).await
}

/// Unwrap a response: failure statuses become [`ApiError::Request`] carrying
/// the backend's `error` message, success bodies are parsed as JSON.
pub(crate) async fn handle_response<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    let status = resp.status();
    let body = resp.bytes().await?;

    if !status.is_success() {
        return Err(ApiError::from_error_body(&body));
    }

    parse_body(&body)
}

/// Parse a success body, telling "not JSON" apart from "JSON of the wrong shape".
pub(crate) fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| match e.classify() {
        serde_json::error::Category::Data => ApiError::MalformedResponse(e.to_string()),
        _ => ApiError::Decode(e),
    })
}
