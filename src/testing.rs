//! In-process stub of the Léo backend for tests.
//!
//! Binds an axum server to `127.0.0.1:0`, records every request it sees and
//! answers with per-path canned responses (or a default one).

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use tokio::sync::Notify;

/// Path prefix the stub mounts the API under.
const API_PREFIX: &str = "/api";

#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub method: Method,
    pub path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl SeenRequest {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("request body is not JSON")
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[derive(Clone)]
pub struct StubBackend {
    routes: Arc<Mutex<HashMap<String, (StatusCode, String)>>>,
    fallback: Arc<Mutex<(StatusCode, String)>>,
    gates: Arc<Mutex<HashMap<String, Arc<Notify>>>>,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

impl StubBackend {
    /// Start the stub. Every path answers `200 {"ok": true}` until told otherwise.
    pub async fn start() -> (Self, String) {
        let stub = Self {
            routes: Arc::default(),
            fallback: Arc::new(Mutex::new((StatusCode::OK, r#"{"ok": true}"#.to_string()))),
            gates: Arc::default(),
            seen: Arc::default(),
        };

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind");
        let addr = listener.local_addr().expect("no local addr");
        let app = Router::new().fallback(record).with_state(stub.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("stub server failed");
        });

        (stub, format!("http://{addr}{API_PREFIX}"))
    }

    /// Answer `path` (relative to the API prefix) with `status` and `body`.
    pub fn respond(&self, path: &str, status: u16, body: &str) {
        let status = StatusCode::from_u16(status).expect("bad status");
        self.routes
            .lock()
            .unwrap()
            .insert(path.to_string(), (status, body.to_string()));
    }

    /// Answer every path without its own response with `status` and `body`.
    pub fn respond_by_default(&self, status: u16, body: &str) {
        let status = StatusCode::from_u16(status).expect("bad status");
        *self.fallback.lock().unwrap() = (status, body.to_string());
    }

    /// Hold responses to `path` until the returned gate is notified.
    /// The request is recorded before the stub starts waiting.
    pub fn hold(&self, path: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.gates
            .lock()
            .unwrap()
            .insert(path.to_string(), gate.clone());
        gate
    }

    /// Wait until a request for `path` has reached the stub.
    pub async fn wait_for(&self, path: &str) {
        while !self.requests().iter().any(|r| r.path == path) {
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }
    }

    pub fn requests(&self) -> Vec<SeenRequest> {
        self.seen.lock().unwrap().clone()
    }

    pub fn last(&self) -> SeenRequest {
        self.requests().pop().expect("no request reached the stub")
    }
}

async fn record(
    State(stub): State<StubBackend>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri
        .path()
        .strip_prefix(API_PREFIX)
        .unwrap_or(uri.path())
        .to_string();
    let header_str = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    stub.seen.lock().unwrap().push(SeenRequest {
        method,
        path: path.clone(),
        authorization: header_str(header::AUTHORIZATION),
        content_type: header_str(header::CONTENT_TYPE),
        body: body.to_vec(),
    });

    let gate = stub.gates.lock().unwrap().get(&path).cloned();
    if let Some(gate) = gate {
        gate.notified().await;
    }

    let canned = stub.routes.lock().unwrap().get(&path).cloned();
    let (status, body) = canned.unwrap_or_else(|| stub.fallback.lock().unwrap().clone());
    (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
}
