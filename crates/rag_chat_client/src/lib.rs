//! RAG chat/knowledge-base client library (HTTP API client, typed response
//! contracts, view route table, config). Used by the `rag-chat` CLI.

pub mod client;
pub mod config;
pub mod messages;
pub mod router;

pub use client::{ApiClient, ApiError, DEFAULT_TIMEOUT};
pub use config::{default_config_path, ApiSection, Config, ConfigError, ServerSection};
pub use messages::{
    ChatAnswer, KnowledgeFile, RebuildSummary, SourceDocument, Stats, UploadReceipt,
};
pub use router::{resolve, Resolved, RouteEntry, RouteTarget, View, ROUTES};
