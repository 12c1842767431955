//! External collaborators: graph generation and rewrite services.
//!
//! The core treats both AI services as trait objects so the interaction
//! layer can be driven against mocks; the real HTTP transport lives in
//! [`http`] behind the `http` feature. Service failures never corrupt
//! local state — they only prevent a would-be graph replacement from
//! happening, and the caller surfaces the error with the last-good graph
//! retained.

mod documents;
#[cfg(feature = "http")]
pub mod http;

pub use documents::{
    Document, DocumentBatch, DocumentBatchError, ALLOWED_EXTENSIONS, MAX_DOCUMENTS,
    MAX_DOCUMENT_BYTES,
};

use std::time::Duration;

use async_trait::async_trait;
use miette::Diagnostic;
use thiserror::Error;

use crate::concept::KnowledgeGraph;
use crate::model::CodecError;

/// Environment variable naming the service base URL.
pub const BASE_URL_ENV: &str = "LOREGRAPH_API_BASE";

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Connection settings for the graph services.
#[derive(Clone, Debug)]
pub struct ServiceConfig {
    /// Base URL the endpoint paths are joined onto.
    pub base_url: String,
    /// Per-call deadline.
    pub timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ServiceConfig {
    /// Resolves the base URL from the environment (`LOREGRAPH_API_BASE`,
    /// honoring a `.env` file), falling back to the local default.
    #[must_use]
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let base_url =
            std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self {
            base_url,
            ..Self::default()
        }
    }

    /// Overrides the per-call deadline.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Errors from the generation and rewrite collaborators.
#[derive(Debug, Error, Diagnostic)]
pub enum ServiceError {
    /// The service could not be reached or the transport failed mid-call.
    #[error("graph service unreachable: {message}")]
    #[diagnostic(
        code(loregraph::services::transport),
        help("Check the service base URL and that the backend is running.")
    )]
    Transport { message: String },

    /// The service answered with a non-success status.
    #[error("graph service rejected the request ({status}): {detail}")]
    #[diagnostic(code(loregraph::services::rejected))]
    Rejected { status: u16, detail: String },

    /// The service answered, but the payload does not decode as a graph.
    #[error("graph service returned a malformed graph document")]
    #[diagnostic(code(loregraph::services::malformed))]
    Malformed(#[from] CodecError),

    /// The round-trip exceeded the configured deadline.
    #[error("graph service call timed out after {seconds}s")]
    #[diagnostic(
        code(loregraph::services::timeout),
        help("The prior graph is retained; retry when the service recovers.")
    )]
    Timeout { seconds: u64 },

    /// A rewrite is already in flight; re-entry is refused, not queued.
    #[error("a rewrite is already in flight for this graph")]
    #[diagnostic(code(loregraph::services::rewrite_in_flight))]
    RewriteInFlight,

    /// The document batch failed upload validation.
    #[error(transparent)]
    #[diagnostic(transparent)]
    InvalidBatch(#[from] DocumentBatchError),
}

/// Generates a fresh knowledge graph from a batch of uploaded documents.
#[async_trait]
pub trait GraphGenerator: Send + Sync {
    /// Produces a graph for the batch. The batch is validated before the
    /// call leaves the process.
    async fn generate(&self, documents: &DocumentBatch) -> Result<KnowledgeGraph, ServiceError>;
}

/// Rewrites a whole graph according to a natural-language instruction.
///
/// On success the returned graph replaces the current one wholesale;
/// there is no partial merge.
#[async_trait]
pub trait GraphRewriter: Send + Sync {
    async fn rewrite(
        &self,
        graph: &KnowledgeGraph,
        instruction: &str,
    ) -> Result<KnowledgeGraph, ServiceError>;
}
