//! JSON exchange codec for knowledge graphs.
//!
//! Import is strictly all-or-nothing: the payload is validated before any
//! caller state could be replaced, and a malformed document yields a
//! [`CodecError`] without producing a graph. The shape check mirrors the
//! exchange contract — a JSON object with an array-valued `concepts` field
//! — and decoding the array into the typed model surfaces any per-concept
//! problems as errors as well.

use miette::Diagnostic;
use serde_json::Value;
use thiserror::Error;

use crate::concept::KnowledgeGraph;

/// Errors produced while importing or exporting a graph document.
#[derive(Debug, Error, Diagnostic)]
pub enum CodecError {
    /// The payload was not parseable as JSON at all.
    #[error("payload is not valid JSON: {0}")]
    #[diagnostic(
        code(loregraph::codec::parse),
        help("The import expects a UTF-8 JSON document.")
    )]
    Parse(#[source] serde_json::Error),

    /// The payload parsed, but the top level is not a JSON object.
    #[error("graph document must be a JSON object, got {found}")]
    #[diagnostic(code(loregraph::codec::not_an_object))]
    NotAnObject { found: &'static str },

    /// The top-level object has no array-valued `concepts` field.
    #[error("graph document must carry an array-valued \"concepts\" field")]
    #[diagnostic(
        code(loregraph::codec::missing_concepts),
        help("Expected a shape like {{\"concepts\": [...]}}.")
    )]
    MissingConcepts,

    /// The `concepts` array did not decode into the concept model.
    #[error("concept entry does not match the exchange schema: {0}")]
    #[diagnostic(code(loregraph::codec::concept_shape))]
    ConceptShape(#[source] serde_json::Error),

    /// Serialization of a graph failed (effectively unreachable for this
    /// model, surfaced rather than swallowed).
    #[error("failed to serialize graph: {0}")]
    #[diagnostic(code(loregraph::codec::serialize))]
    Serialize(#[source] serde_json::Error),
}

/// Names a JSON value's type for error messages.
fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Imports a graph from an already-parsed JSON value.
///
/// Validates the top-level shape (object with an array-valued `concepts`
/// field), then decodes the array into the typed model. Nothing is
/// consumed from the caller on failure.
pub fn import_value(value: Value) -> Result<KnowledgeGraph, CodecError> {
    let found = value_kind(&value);
    let Value::Object(mut object) = value else {
        return Err(CodecError::NotAnObject { found });
    };
    let concepts = object.remove("concepts").ok_or(CodecError::MissingConcepts)?;
    if !concepts.is_array() {
        return Err(CodecError::MissingConcepts);
    }
    let concepts = serde_json::from_value(concepts).map_err(CodecError::ConceptShape)?;
    Ok(KnowledgeGraph { concepts })
}

/// Imports a graph from a JSON string.
///
/// # Examples
///
/// ```
/// use loregraph::model::import_graph;
///
/// let graph = import_graph(r#"{"concepts":[{"title":"A"}]}"#).unwrap();
/// assert_eq!(graph.root_count(), 1);
///
/// assert!(import_graph(r#"{"milestones":[]}"#).is_err());
/// assert!(import_graph("[]").is_err());
/// ```
pub fn import_graph(json: &str) -> Result<KnowledgeGraph, CodecError> {
    let value: Value = serde_json::from_str(json).map_err(CodecError::Parse)?;
    import_value(value)
}

/// Exports a graph to its JSON value form.
pub fn export_value(graph: &KnowledgeGraph) -> Result<Value, CodecError> {
    serde_json::to_value(graph).map_err(CodecError::Serialize)
}

/// Exports a graph to a JSON string in the exchange schema.
///
/// Nullable fields are written as `null`, so for any well-formed document
/// `export(import(j))` is deep-equal to `j`.
pub fn export_graph(graph: &KnowledgeGraph) -> Result<String, CodecError> {
    serde_json::to_string(graph).map_err(CodecError::Serialize)
}
