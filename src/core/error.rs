//! Error types for configuration parsing, cross-referencing, resolution and import

use thiserror::Error;

/// Which of the two configuration documents an error belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Document {
    Models,
    Pipeline,
}

impl Document {
    /// Label used when naming an entry of this document
    pub fn entry_label(&self) -> &'static str {
        match self {
            Document::Models => "Model",
            Document::Pipeline => "Step",
        }
    }
}

impl std::fmt::Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Document::Models => write!(f, "models configuration"),
            Document::Pipeline => write!(f, "pipeline configuration"),
        }
    }
}

/// Structural problems found while parsing a document
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// The text is not valid JSON
    #[error("Invalid JSON in {document} at line {line}, column {column}: {message}")]
    Syntax {
        document: Document,
        line: usize,
        column: usize,
        message: String,
    },

    #[error("The {document} must be a JSON object mapping ids to entries, found {found}")]
    NotAnObject { document: Document, found: &'static str },

    #[error("The {document} contains an entry with an empty id")]
    EmptyKey { document: Document },

    #[error("{} \"{id}\" must be a JSON object, found {found}", .document.entry_label())]
    EntryNotObject {
        document: Document,
        id: String,
        found: &'static str,
    },

    #[error("{} \"{id}\": missing required field \"{field}\"", .document.entry_label())]
    MissingField {
        document: Document,
        id: String,
        field: &'static str,
    },

    #[error("{} \"{id}\": field \"{field}\" must be {expected}, found {found}", .document.entry_label())]
    WrongType {
        document: Document,
        id: String,
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("{} \"{id}\": field \"{field}\" must not be empty", .document.entry_label())]
    EmptyField {
        document: Document,
        id: String,
        field: &'static str,
    },

    #[error("Model \"{id}\": baseUrl \"{value}\" is not a valid HTTP(S) URL ({reason})")]
    InvalidUrl {
        id: String,
        value: String,
        reason: String,
    },

    #[error("Step \"{id}\": include[{index}] must be a string, found {found}")]
    InvalidIncludeItem {
        id: String,
        index: usize,
        found: &'static str,
    },

    #[error("Step \"{id}\": routingAwareOutput entry \"{key}\" {problem}")]
    InvalidRoute {
        id: String,
        key: String,
        problem: &'static str,
    },
}

impl SchemaError {
    /// Whether this is a JSON syntax failure rather than a shape problem
    pub fn is_syntax(&self) -> bool {
        matches!(self, SchemaError::Syntax { .. })
    }
}

/// A reference between or within documents that does not resolve
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CrossRefError {
    #[error("Step \"{step}\" references model config \"{model}\" which does not exist in the models configuration")]
    MissingModel { step: String, model: String },

    #[error("Step \"{step}\" routes to \"{target}\" in routingAwareOutput, but no step with that id exists (unresolved next-step reference)")]
    MissingStep { step: String, target: String },
}

/// Precondition violation when resolving a step that was not validated first
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReferenceError {
    #[error("Step \"{0}\" does not exist in the pipeline configuration")]
    UnknownStep(String),

    #[error("Step \"{step}\" references model config \"{model}\" which does not exist")]
    UnknownModel { step: String, model: String },
}

/// Failure to ingest an imported pipeline document
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    /// The envelope itself is not shaped like an export
    #[error("Malformed import: {0}")]
    Malformed(String),

    /// The embedded pipeline failed schema validation
    #[error("Imported pipeline is invalid ({} error(s)): {}", .0.len(), join_errors(.0))]
    InvalidPipeline(Vec<SchemaError>),
}

fn join_errors(errors: &[SchemaError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// JSON type name used in error messages
pub fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_entry_and_field() {
        let err = SchemaError::MissingField {
            document: Document::Models,
            id: "openai".to_string(),
            field: "baseUrl",
        };
        assert_eq!(err.to_string(), "Model \"openai\": missing required field \"baseUrl\"");

        let err = SchemaError::EmptyField {
            document: Document::Pipeline,
            id: "transcribe".to_string(),
            field: "input",
        };
        assert_eq!(err.to_string(), "Step \"transcribe\": field \"input\" must not be empty");
    }

    #[test]
    fn test_cross_ref_message_names_step_and_reference() {
        let err = CrossRefError::MissingModel {
            step: "process".to_string(),
            model: "claude".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("process"));
        assert!(msg.contains("claude"));
    }

    #[test]
    fn test_invalid_pipeline_import_lists_errors() {
        let err = ImportError::InvalidPipeline(vec![SchemaError::EmptyKey {
            document: Document::Pipeline,
        }]);
        assert!(err.to_string().contains("1 error(s)"));
        assert!(err.to_string().contains("empty id"));
    }
}
