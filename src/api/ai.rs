//! AI text operations, legal documents and message history.
//!
//! The backend's result shapes for these endpoints are not fixed, so each
//! operation hands back the parsed JSON body as-is.

use serde_json::Value;

use super::client::ApiClient;
use super::types::{
    DocumentUpload, GenerateResponsesRequest, LegalDocumentRequest, MessageRequest,
    RephraseRequest,
};
use crate::error::ApiError;

impl ApiClient {
    /// POST /ai/analyze-sentiment.
    pub async fn analyze_sentiment(&self, message: &str) -> Result<Value, ApiError> {
        self.authenticated_post("/ai/analyze-sentiment", &MessageRequest { message })
            .await
    }

    /// POST /ai/rephrase-message. An absent context is sent as `null`.
    pub async fn rephrase_message(
        &self,
        message: &str,
        context: Option<&str>,
        save_to_history: bool,
    ) -> Result<Value, ApiError> {
        let body = RephraseRequest {
            message,
            context,
            save_to_history,
        };
        self.authenticated_post("/ai/rephrase-message", &body).await
    }

    /// POST /ai/generate-responses: candidate replies to a received message.
    pub async fn generate_responses(
        &self,
        received_message: &str,
        context: Option<&str>,
    ) -> Result<Value, ApiError> {
        let body = GenerateResponsesRequest {
            received_message,
            context,
        };
        self.authenticated_post("/ai/generate-responses", &body).await
    }

    /// POST /ai/mirror-mode: emotional feedback on a draft before sending it.
    pub async fn get_mirror_feedback(&self, message: &str) -> Result<Value, ApiError> {
        self.authenticated_post("/ai/mirror-mode", &MessageRequest { message })
            .await
    }

    /// POST /ai/process-legal-document with the document's text.
    pub async fn process_legal_document(
        &self,
        document_text: &str,
        document_path: Option<&str>,
    ) -> Result<Value, ApiError> {
        let body = LegalDocumentRequest {
            document_text,
            document_path,
        };
        self.authenticated_post("/ai/process-legal-document", &body)
            .await
    }

    /// POST /ai/upload-legal-document as multipart form data, field `file`.
    pub async fn upload_legal_document(&self, upload: DocumentUpload) -> Result<Value, ApiError> {
        use reqwest::multipart;

        let part = multipart::Part::bytes(upload.bytes)
            .file_name(upload.file_name)
            .mime_str(&upload.content_type)
            .map_err(ApiError::Multipart)?;
        let form = multipart::Form::new().part("file", part);

        self.authenticated_multipart_post("/ai/upload-legal-document", form)
            .await
    }

    /// GET /ai/get-judgments.
    pub async fn get_judgments(&self) -> Result<Value, ApiError> {
        self.authenticated_get("/ai/get-judgments").await
    }

    /// GET /ai/get-message-history.
    pub async fn get_message_history(&self) -> Result<Value, ApiError> {
        self.authenticated_get("/ai/get-message-history").await
    }

    /// DELETE /ai/delete-message-history.
    pub async fn delete_message_history(&self) -> Result<Value, ApiError> {
        self.authenticated_delete("/ai/delete-message-history")
            .await
    }

    /// GET /health. Sent without auth or content-type headers.
    pub async fn health_check(&self) -> Result<Value, ApiError> {
        self.get("/health").await
    }
}
