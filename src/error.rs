//! Error types for the Léo API client.
//!
//! HTTP failure statuses collapse into a single [`ApiError::Request`] kind whose
//! message comes from the backend's `{"error": "..."}` envelope. Transport,
//! decoding and storage failures keep their own variants so callers can still
//! tell a down backend from a rejected request when they care to.

use thiserror::Error;

/// Message used when a failed response carries no usable `error` field.
pub const FALLBACK_ERROR_MESSAGE: &str = "Erreur API";

#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend answered with a non-success status.
    #[error("{message}")]
    Request { message: String },

    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Success status, but the body is not JSON.
    #[error("invalid JSON response: {0}")]
    Decode(serde_json::Error),

    /// Success status and valid JSON, but expected fields are missing.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("failed to build upload: {0}")]
    Multipart(reqwest::Error),

    #[error("failed to read upload: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ApiError {
    /// Build a request failure from the raw body of a non-success response.
    pub(crate) fn from_error_body(body: &[u8]) -> Self {
        #[derive(serde::Deserialize)]
        struct ErrorBody {
            error: Option<serde_json::Value>,
        }

        let message = serde_json::from_slice::<ErrorBody>(body)
            .ok()
            .and_then(|b| match b.error {
                Some(serde_json::Value::String(s)) => Some(s),
                _ => None,
            })
            .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string());

        ApiError::Request { message }
    }
}

/// Failures of the durable token storage.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Keychain operation failed: {0}")]
    Keychain(String),

    #[error("token file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("token file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("no config directory available on this platform")]
    NoConfigDir,
}

impl From<keyring::Error> for StorageError {
    fn from(err: keyring::Error) -> Self {
        StorageError::Keychain(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message_of(body: &[u8]) -> String {
        match ApiError::from_error_body(body) {
            ApiError::Request { message } => message,
            other => panic!("expected request error, got {other:?}"),
        }
    }

    #[test]
    fn error_field_becomes_message() {
        assert_eq!(message_of(br#"{"error": "bad credentials"}"#), "bad credentials");
    }

    #[test]
    fn display_is_exactly_the_message() {
        let err = ApiError::from_error_body(br#"{"error": "bad credentials"}"#);
        assert_eq!(err.to_string(), "bad credentials");
    }

    #[test]
    fn missing_error_field_falls_back() {
        assert_eq!(message_of(br#"{"detail": "nope"}"#), FALLBACK_ERROR_MESSAGE);
    }

    #[test]
    fn non_json_body_falls_back() {
        assert_eq!(message_of(b"<html>502 Bad Gateway</html>"), FALLBACK_ERROR_MESSAGE);
        assert_eq!(message_of(b""), FALLBACK_ERROR_MESSAGE);
    }

    #[test]
    fn non_string_error_field_falls_back() {
        assert_eq!(message_of(br#"{"error": {"code": 3}}"#), FALLBACK_ERROR_MESSAGE);
        assert_eq!(message_of(br#"{"error": null}"#), FALLBACK_ERROR_MESSAGE);
    }
}
