//! JSON types for the backend `/api/*` surface. Client ↔ server shapes match
//! the backend's route handlers (chat, stats, knowledge).

use serde::{Deserialize, Serialize};

/// Client → server: chat request body.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest<'a> {
    pub question: &'a str,
}

impl<'a> ChatRequest<'a> {
    pub fn new(question: &'a str) -> Self {
        Self { question }
    }
}

/// Server → client: uniform response envelope.
/// `status` is `"success"` or `"error"`; `data` is absent on errors and on
/// delete confirmations, `message` carries human-readable detail.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Envelope<T> {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

/// One retrieved document cited by a chat answer.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SourceDocument {
    pub text: String,
    #[serde(default)]
    pub metadata: serde_json::Value,
}

/// Payload of `POST /chat`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ChatAnswer {
    pub answer: String,
    #[serde(default)]
    pub sources: Vec<SourceDocument>,
    #[serde(default)]
    pub tokens_used: u64,
}

/// Payload of `GET /stats`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Stats {
    pub total_documents: u64,
    pub vectorstore_path: String,
}

/// Payload of `POST /knowledge/upload`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct UploadReceipt {
    pub filename: String,
    pub added_count: u64,
    pub total_documents: u64,
}

/// One entry in the `GET /knowledge/list` payload.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct KnowledgeFile {
    pub name: String,
    pub size: u64,
    pub modified: String,
    pub extension: String,
}

/// Payload of `POST /knowledge/rebuild`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RebuildSummary {
    pub total_count: u64,
    #[serde(default)]
    pub files_processed: Vec<String>,
}
