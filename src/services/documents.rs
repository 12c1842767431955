//! Upload batch validation.
//!
//! The generation service accepts a small batch of plain-text documents.
//! Bounds are enforced locally, before anything leaves the process: at
//! most [`MAX_DOCUMENTS`] documents, each at most [`MAX_DOCUMENT_BYTES`],
//! with an allowed plain-text extension.

use miette::Diagnostic;
use thiserror::Error;

/// Maximum number of documents per batch.
pub const MAX_DOCUMENTS: usize = 5;

/// Maximum size of a single document, in bytes (5 MiB).
pub const MAX_DOCUMENT_BYTES: usize = 5 * 1024 * 1024;

/// File extensions the generation service accepts.
pub const ALLOWED_EXTENSIONS: &[&str] = &["txt", "md", "csv", "sql"];

/// Validation failures for an upload batch.
#[derive(Debug, Error, Diagnostic, PartialEq, Eq)]
pub enum DocumentBatchError {
    #[error("a batch needs at least one document")]
    #[diagnostic(code(loregraph::documents::empty))]
    Empty,

    #[error("batch holds {count} documents, limit is {MAX_DOCUMENTS}")]
    #[diagnostic(code(loregraph::documents::too_many))]
    TooMany { count: usize },

    #[error("document \"{name}\" is {size} bytes, limit is {MAX_DOCUMENT_BYTES}")]
    #[diagnostic(code(loregraph::documents::too_large))]
    TooLarge { name: String, size: usize },

    #[error("document \"{name}\" has an unsupported extension")]
    #[diagnostic(
        code(loregraph::documents::extension),
        help("Supported extensions: txt, md, csv, sql.")
    )]
    UnsupportedExtension { name: String },
}

/// One uploaded document: a display name plus raw bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl Document {
    #[must_use]
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    fn extension(&self) -> Option<&str> {
        self.name.rsplit_once('.').map(|(_, ext)| ext)
    }

    fn validate(&self) -> Result<(), DocumentBatchError> {
        if self.bytes.len() > MAX_DOCUMENT_BYTES {
            return Err(DocumentBatchError::TooLarge {
                name: self.name.clone(),
                size: self.bytes.len(),
            });
        }
        let supported = self
            .extension()
            .is_some_and(|ext| ALLOWED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()));
        if !supported {
            return Err(DocumentBatchError::UnsupportedExtension {
                name: self.name.clone(),
            });
        }
        Ok(())
    }
}

/// A validated batch of documents ready to send.
///
/// Construction is the validation boundary: a `DocumentBatch` that exists
/// has already passed every bound.
///
/// # Examples
///
/// ```
/// use loregraph::services::{Document, DocumentBatch, DocumentBatchError};
///
/// let batch = DocumentBatch::new(vec![Document::new("notes.md", b"# sql".to_vec())]).unwrap();
/// assert_eq!(batch.documents().len(), 1);
///
/// assert_eq!(DocumentBatch::new(vec![]).unwrap_err(), DocumentBatchError::Empty);
/// ```
#[derive(Clone, Debug)]
pub struct DocumentBatch {
    documents: Vec<Document>,
}

impl DocumentBatch {
    /// Validates and wraps a batch.
    pub fn new(documents: Vec<Document>) -> Result<Self, DocumentBatchError> {
        if documents.is_empty() {
            return Err(DocumentBatchError::Empty);
        }
        if documents.len() > MAX_DOCUMENTS {
            return Err(DocumentBatchError::TooMany {
                count: documents.len(),
            });
        }
        for document in &documents {
            document.validate()?;
        }
        Ok(Self { documents })
    }

    /// The validated documents, in upload order.
    #[must_use]
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }
}
