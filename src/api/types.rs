//! Request and response types for the Léo backend API.
//!
//! All structs use snake_case field names, matching the backend's JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Login request body sent to POST /auth/login.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Registration body sent to POST /auth/register.
#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

impl NewUser {
    /// A professional account, the role the dashboard registers by default.
    pub fn professional(username: &str, email: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            role: "pro".to_string(),
        }
    }
}

/// User object embedded in an auth response. Unknown fields are kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response from POST /auth/login and POST /auth/register.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub user: User,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of the single-message AI endpoints (sentiment, mirror mode).
#[derive(Debug, Serialize)]
pub struct MessageRequest<'a> {
    pub message: &'a str,
}

/// Body sent to POST /ai/rephrase-message.
#[derive(Debug, Serialize)]
pub struct RephraseRequest<'a> {
    pub message: &'a str,
    pub context: Option<&'a str>,
    pub save_to_history: bool,
}

/// Body sent to POST /ai/generate-responses.
#[derive(Debug, Serialize)]
pub struct GenerateResponsesRequest<'a> {
    pub received_message: &'a str,
    pub context: Option<&'a str>,
}

/// Body sent to POST /ai/process-legal-document.
#[derive(Debug, Serialize)]
pub struct LegalDocumentRequest<'a> {
    pub document_text: &'a str,
    pub document_path: Option<&'a str>,
}

/// A legal document to upload as the multipart `file` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl DocumentUpload {
    /// Wrap in-memory bytes; the content type is inferred from the file name.
    pub fn new(file_name: &str, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.to_string(),
            content_type: content_type_for(file_name).to_string(),
            bytes,
        }
    }

    /// Read a document from disk.
    pub async fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string());
        Ok(Self::new(&file_name, bytes))
    }
}

fn content_type_for(file_name: &str) -> &'static str {
    let ext = Path::new(file_name)
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase());
    match ext.as_deref() {
        Some("pdf") => "application/pdf",
        Some("txt") => "text/plain",
        Some("doc") => "application/msword",
        Some("docx") => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn optional_context_serializes_as_null() {
        let body = serde_json::to_value(RephraseRequest {
            message: "hi",
            context: None,
            save_to_history: false,
        })
        .unwrap();
        assert_eq!(body, json!({"message": "hi", "context": null, "save_to_history": false}));

        let body = serde_json::to_value(LegalDocumentRequest {
            document_text: "TRIBUNAL",
            document_path: Some("/tmp/j.pdf"),
        })
        .unwrap();
        assert_eq!(body, json!({"document_text": "TRIBUNAL", "document_path": "/tmp/j.pdf"}));
    }

    #[test]
    fn auth_response_keeps_unknown_fields() {
        let raw = json!({
            "access_token": "jwt",
            "message": "ok",
            "user": {"id": 7, "username": "TestUser", "role": "pro"}
        });
        let parsed: AuthResponse = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(parsed.access_token, "jwt");
        assert_eq!(parsed.user.username, "TestUser");
        assert_eq!(serde_json::to_value(&parsed).unwrap(), raw);
    }

    #[test]
    fn auth_response_requires_token() {
        let raw = json!({"user": {"username": "TestUser"}});
        assert!(serde_json::from_value::<AuthResponse>(raw).is_err());
    }

    #[test]
    fn upload_content_type_from_extension() {
        assert_eq!(DocumentUpload::new("jugement.PDF", vec![]).content_type, "application/pdf");
        assert_eq!(DocumentUpload::new("notes.txt", vec![]).content_type, "text/plain");
        assert_eq!(
            DocumentUpload::new("scan", vec![]).content_type,
            "application/octet-stream"
        );
    }

    #[test]
    fn new_user_defaults_to_pro() {
        let user = NewUser::professional("TestUser", "test@example.com", "pw");
        assert_eq!(
            serde_json::to_value(user).unwrap(),
            json!({
                "username": "TestUser",
                "email": "test@example.com",
                "password": "pw",
                "role": "pro"
            })
        );
    }
}
