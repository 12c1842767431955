//! HTTP transport for the generation and rewrite services.
//!
//! Both endpoints accept multipart form uploads: the generation endpoint
//! takes the raw documents under repeated `files` parts, the rewrite
//! endpoint additionally carries the current graph as a JSON string under
//! `knowledge_map` and the instruction under `user_query`. Responses are
//! graph documents in the exchange schema, decoded through the strict
//! import codec.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use uuid::Uuid;

use crate::concept::KnowledgeGraph;
use crate::model::{export_graph, import_value};

use super::{Document, DocumentBatch, GraphGenerator, GraphRewriter, ServiceConfig, ServiceError};

/// Path of the document-to-graph generation endpoint.
pub const GENERATE_PATH: &str = "/graph/from-files";

/// Path of the graph rewrite endpoint.
pub const REWRITE_PATH: &str = "/graph/rewrite";

/// Reqwest-backed implementation of both service traits.
pub struct HttpGraphService {
    client: reqwest::Client,
    config: ServiceConfig,
}

impl HttpGraphService {
    /// Builds a service client. Fails only if the underlying HTTP client
    /// cannot be constructed.
    pub fn new(config: ServiceConfig) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ServiceError::Transport {
                message: e.to_string(),
            })?;
        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url.trim_end_matches('/'))
    }

    fn file_parts(form: Form, documents: &[Document]) -> Form {
        documents.iter().fold(form, |form, document| {
            form.part(
                "files",
                Part::bytes(document.bytes.clone()).file_name(document.name.clone()),
            )
        })
    }

    async fn post_for_graph(&self, path: &str, form: Form) -> Result<KnowledgeGraph, ServiceError> {
        let request_id = Uuid::new_v4();
        let url = self.url(path);
        tracing::debug!(%request_id, %url, "posting graph service request");

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| classify_transport(e, self.config.timeout))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            tracing::warn!(%request_id, status = status.as_u16(), "graph service rejected request");
            return Err(ServiceError::Rejected {
                status: status.as_u16(),
                detail,
            });
        }

        let value = response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| classify_transport(e, self.config.timeout))?;
        let graph = import_value(value)?;
        tracing::debug!(%request_id, concepts = graph.root_count(), "graph service responded");
        Ok(graph)
    }
}

fn classify_transport(error: reqwest::Error, timeout: Duration) -> ServiceError {
    if error.is_timeout() {
        ServiceError::Timeout {
            seconds: timeout.as_secs(),
        }
    } else {
        ServiceError::Transport {
            message: error.to_string(),
        }
    }
}

#[async_trait]
impl GraphGenerator for HttpGraphService {
    async fn generate(&self, documents: &DocumentBatch) -> Result<KnowledgeGraph, ServiceError> {
        let form = Self::file_parts(Form::new(), documents.documents());
        self.post_for_graph(GENERATE_PATH, form).await
    }
}

#[async_trait]
impl GraphRewriter for HttpGraphService {
    async fn rewrite(
        &self,
        graph: &KnowledgeGraph,
        instruction: &str,
    ) -> Result<KnowledgeGraph, ServiceError> {
        let form = Form::new()
            .text("knowledge_map", export_graph(graph)?)
            .text("user_query", instruction.to_string());
        self.post_for_graph(REWRITE_PATH, form).await
    }
}
