//! HTTP client for the RAG backend: chat, stats, and knowledge-base
//! management. One `ApiClient` per configuration; every operation is a single
//! round trip with no retry and no shared mutable state.

use std::path::Path;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::multipart;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::messages::{
    ChatAnswer, ChatRequest, Envelope, KnowledgeFile, RebuildSummary, Stats, UploadReceipt,
};

/// Total-request timeout applied when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Errors surfaced by API operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network unreachable, timeout, or any other transport failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success HTTP status without a parseable error envelope.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// Backend reported `status: "error"` in its response envelope.
    #[error("backend error: {0}")]
    Backend(String),

    /// Response body was not the expected JSON shape.
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Reading the file to upload failed.
    #[error("file read failed: {0}")]
    Io(#[from] std::io::Error),

    /// Filename is empty or contains path delimiters.
    #[error("invalid filename: {0:?}")]
    InvalidFilename(String),

    /// Success envelope arrived without a `data` payload.
    #[error("response missing data payload")]
    MissingData,
}

/// Configured client for the backend's `/api` surface.
///
/// Configuration (base URL, timeout, default headers) is fixed at
/// construction; concurrent calls share nothing else.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client for `base_url` (e.g. `http://127.0.0.1:5000/api`) with
    /// the default 60-second timeout.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Build a client with a custom total-request timeout.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Ask the RAG backend a question.
    pub async fn chat(&self, question: &str) -> Result<ChatAnswer, ApiError> {
        let req = self
            .http
            .post(self.url("/chat"))
            .json(&ChatRequest::new(question));
        self.execute("chat", req).await
    }

    /// Fetch vectorstore statistics.
    pub async fn get_stats(&self) -> Result<Stats, ApiError> {
        self.execute("get_stats", self.http.get(self.url("/stats")))
            .await
    }

    /// Upload a knowledge-base file from disk.
    pub async fn upload_file(&self, path: &Path) -> Result<UploadReceipt, ApiError> {
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ApiError::InvalidFilename(path.display().to_string()))?
            .to_string();
        let bytes = tokio::fs::read(path).await?;
        self.upload_inner("upload_file", &filename, bytes).await
    }

    /// Upload knowledge-base content as multipart form field `file`.
    /// The multipart content type replaces the default JSON header for this
    /// request only.
    pub async fn upload_bytes(
        &self,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadReceipt, ApiError> {
        self.upload_inner("upload_bytes", filename, bytes).await
    }

    /// Shared upload path; `operation` labels the boundary log with the
    /// public entry point that failed.
    async fn upload_inner(
        &self,
        operation: &'static str,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadReceipt, ApiError> {
        let part = multipart::Part::bytes(bytes).file_name(filename.to_string());
        let form = multipart::Form::new().part("file", part);
        let req = self.http.post(self.url("/knowledge/upload")).multipart(form);
        self.execute(operation, req).await
    }

    /// List the files currently in the knowledge base.
    pub async fn list_files(&self) -> Result<Vec<KnowledgeFile>, ApiError> {
        self.execute("list_files", self.http.get(self.url("/knowledge/list")))
            .await
    }

    /// Delete a knowledge-base file. Returns the backend's confirmation
    /// message (the delete envelope carries no `data`).
    ///
    /// The filename becomes a path segment verbatim, so names containing
    /// path delimiters are rejected before any request is issued.
    pub async fn delete_file(&self, filename: &str) -> Result<String, ApiError> {
        if filename.is_empty() || filename.contains(['/', '\\']) {
            return Err(ApiError::InvalidFilename(filename.to_string()));
        }
        let req = self
            .http
            .delete(self.url(&format!("/knowledge/delete/{}", filename)));
        match self.round_trip::<serde_json::Value>(req).await {
            Ok(env) => Ok(env.message.unwrap_or_default()),
            Err(e) => Err(observe("delete_file", e)),
        }
    }

    /// Trigger a full vectorstore rebuild. Long-running on the server side;
    /// the call still observes the configured timeout.
    pub async fn rebuild_vectorstore(&self) -> Result<RebuildSummary, ApiError> {
        self.execute(
            "rebuild_vectorstore",
            self.http.post(self.url("/knowledge/rebuild")),
        )
        .await
    }

    /// Run one request and unwrap the success envelope to its `data` payload.
    /// Any failure is logged exactly once here, then propagated unchanged.
    async fn execute<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        req: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        self.round_trip(req)
            .await
            .and_then(|env: Envelope<T>| env.data.ok_or(ApiError::MissingData))
            .map_err(|e| observe(operation, e))
    }

    async fn round_trip<T: DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
    ) -> Result<Envelope<T>, ApiError> {
        let response = req.send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            // Backend errors arrive as an error envelope with a message;
            // fall back to the raw body when it is not one.
            if let Ok(env) = serde_json::from_str::<Envelope<serde_json::Value>>(&body) {
                if let Some(message) = env.message {
                    return Err(ApiError::Backend(message));
                }
            }
            return Err(ApiError::Http {
                status: status.as_u16(),
                body,
            });
        }
        let env: Envelope<T> = serde_json::from_str(&body)?;
        if !env.is_success() {
            return Err(ApiError::Backend(
                env.message.unwrap_or_else(|| "unknown backend error".to_string()),
            ));
        }
        Ok(env)
    }
}

/// The client boundary's single diagnostic log per failed operation.
fn observe(operation: &'static str, err: ApiError) -> ApiError {
    tracing::error!(operation, error = %err, "API request failed");
    err
}
