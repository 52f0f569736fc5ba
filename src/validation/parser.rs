//! Schema parser for the models and pipeline documents
//!
//! Turns raw JSON text into typed structures while collecting every
//! structural problem instead of stopping at the first. Only the
//! top-level checks (valid JSON, top level is an object) are fail-fast.

use crate::core::error::{json_type_name, Document, SchemaError};
use crate::core::models::{ModelConfig, ModelsConfig};
use crate::core::pipeline::{PipelineConfig, PipelineStep, RouteTarget, RoutingRule};
use serde_json::{Map, Value};
use tracing::debug;

/// Outcome of parsing one document
///
/// `value` is `None` only when the document could not be inspected at all
/// (syntax error or wrong top-level shape). Otherwise it holds every entry
/// that passed its own checks; it is only trustworthy when `errors` is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed<T> {
    pub value: Option<T>,
    pub errors: Vec<SchemaError>,
}

impl<T> Parsed<T> {
    fn failed(error: SchemaError) -> Self {
        Self {
            value: None,
            errors: vec![error],
        }
    }

    /// The structure, if it parsed without any error
    pub fn clean(&self) -> Option<&T> {
        if self.errors.is_empty() {
            self.value.as_ref()
        } else {
            None
        }
    }

    pub fn is_clean(&self) -> bool {
        self.clean().is_some()
    }

    /// Convert into a `Result`, failing with every collected error
    pub fn into_result(self) -> Result<T, Vec<SchemaError>> {
        match self.value {
            Some(value) if self.errors.is_empty() => Ok(value),
            _ => Err(self.errors),
        }
    }
}

/// Parse the models configuration text
pub fn parse_models(text: &str) -> Parsed<ModelsConfig> {
    let root = match parse_root(text, Document::Models) {
        Ok(root) => root,
        Err(error) => return Parsed::failed(error),
    };

    let mut errors = Vec::new();
    let mut models = Vec::new();

    for (id, entry) in root {
        if let Some(model) = parse_model_entry(&id, &entry, &mut errors) {
            models.push(model);
        }
    }

    debug!(
        "Parsed models configuration: {} model(s), {} error(s)",
        models.len(),
        errors.len()
    );

    Parsed {
        value: Some(ModelsConfig::new(models)),
        errors,
    }
}

/// Parse the pipeline configuration text
pub fn parse_pipeline(text: &str) -> Parsed<PipelineConfig> {
    match parse_root(text, Document::Pipeline) {
        Ok(root) => pipeline_from_map(root),
        Err(error) => Parsed::failed(error),
    }
}

/// Parse a pipeline from an already-decoded JSON value (used by import)
pub fn pipeline_from_value(value: &Value) -> Parsed<PipelineConfig> {
    match value {
        Value::Object(map) => pipeline_from_map(map.clone()),
        other => Parsed::failed(SchemaError::NotAnObject {
            document: Document::Pipeline,
            found: json_type_name(other),
        }),
    }
}

fn pipeline_from_map(root: Map<String, Value>) -> Parsed<PipelineConfig> {
    let mut errors = Vec::new();
    let mut steps = Vec::new();

    for (id, entry) in root {
        if let Some(step) = parse_step_entry(&id, &entry, &mut errors) {
            steps.push(step);
        }
    }

    debug!(
        "Parsed pipeline configuration: {} step(s), {} error(s)",
        steps.len(),
        errors.len()
    );

    Parsed {
        value: Some(PipelineConfig::new(steps)),
        errors,
    }
}

/// Decode the text and check that the top level is an object
fn parse_root(text: &str, document: Document) -> Result<Map<String, Value>, SchemaError> {
    // Blank text fields are the legal empty document
    if text.trim().is_empty() {
        return Ok(Map::new());
    }

    let value: Value = serde_json::from_str(text).map_err(|e| SchemaError::Syntax {
        document,
        line: e.line(),
        column: e.column(),
        message: syntax_message(&e),
    })?;

    match value {
        Value::Object(map) => Ok(map),
        other => Err(SchemaError::NotAnObject {
            document,
            found: json_type_name(&other),
        }),
    }
}

/// serde_json's message without the trailing position, which we report separately
fn syntax_message(error: &serde_json::Error) -> String {
    let full = error.to_string();
    let suffix = format!(" at line {} column {}", error.line(), error.column());
    full.strip_suffix(&suffix).unwrap_or(&full).to_string()
}

fn parse_model_entry(id: &str, entry: &Value, errors: &mut Vec<SchemaError>) -> Option<ModelConfig> {
    let mut reader = EntryReader::open(Document::Models, id, entry, errors)?;

    let base_url = reader.required_string("baseUrl");
    let api_key = reader.optional_string("apiKey");
    let implementation = reader.required_string("implementation");
    let model = reader.required_string("model");

    if let Some(url) = &base_url {
        if let Err(reason) = check_http_url(url) {
            reader.push(SchemaError::InvalidUrl {
                id: id.to_string(),
                value: url.clone(),
                reason,
            });
        }
    }

    if reader.failed {
        return None;
    }

    Some(ModelConfig {
        id: id.to_string(),
        base_url: base_url?,
        api_key: api_key.unwrap_or_default(),
        implementation: implementation?,
        model: model?,
    })
}

fn parse_step_entry(id: &str, entry: &Value, errors: &mut Vec<SchemaError>) -> Option<PipelineStep> {
    let mut reader = EntryReader::open(Document::Pipeline, id, entry, errors)?;

    let model_config = reader.required_string("modelConfig");
    let input = reader.required_string("input");
    let output = reader.required_string("output");
    let archive = reader.optional_string("archive");
    let template = reader.optional_string("template");
    let include = reader.string_list("include");
    let routing_aware_output = reader.routing_map("routingAwareOutput");
    let description = reader.optional_string("description");

    if reader.failed {
        return None;
    }

    Some(PipelineStep {
        id: id.to_string(),
        model_config: model_config?,
        input: input?,
        output: output?,
        archive,
        template,
        include,
        routing_aware_output,
        description,
    })
}

/// Accepts only absolute http(s) URLs with a host
fn check_http_url(value: &str) -> Result<(), String> {
    let url = url::Url::parse(value).map_err(|e| e.to_string())?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(format!("scheme must be http or https, found \"{}\"", url.scheme()));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err("missing host".to_string());
    }
    Ok(())
}

/// Field-by-field reader for one entry that records every problem it sees
struct EntryReader<'a> {
    document: Document,
    id: &'a str,
    fields: &'a Map<String, Value>,
    errors: &'a mut Vec<SchemaError>,
    failed: bool,
}

impl<'a> EntryReader<'a> {
    /// Check the id and entry shape; `None` means the entry cannot be read further
    fn open(
        document: Document,
        id: &'a str,
        entry: &'a Value,
        errors: &'a mut Vec<SchemaError>,
    ) -> Option<Self> {
        if id.trim().is_empty() {
            errors.push(SchemaError::EmptyKey { document });
            return None;
        }

        match entry {
            Value::Object(fields) => Some(Self {
                document,
                id,
                fields,
                errors,
                failed: false,
            }),
            other => {
                errors.push(SchemaError::EntryNotObject {
                    document,
                    id: id.to_string(),
                    found: json_type_name(other),
                });
                None
            }
        }
    }

    fn push(&mut self, error: SchemaError) {
        self.failed = true;
        self.errors.push(error);
    }

    /// Present and non-null value of a field
    fn field(&self, name: &str) -> Option<&'a Value> {
        let fields: &'a Map<String, Value> = self.fields;
        fields.get(name).filter(|v| !v.is_null())
    }

    fn wrong_type(&mut self, field: &'static str, expected: &'static str, found: &Value) {
        let error = SchemaError::WrongType {
            document: self.document,
            id: self.id.to_string(),
            field,
            expected,
            found: json_type_name(found),
        };
        self.push(error);
    }

    fn required_string(&mut self, field: &'static str) -> Option<String> {
        match self.field(field) {
            None => {
                let error = SchemaError::MissingField {
                    document: self.document,
                    id: self.id.to_string(),
                    field,
                };
                self.push(error);
                None
            }
            Some(Value::String(s)) if s.trim().is_empty() => {
                let error = SchemaError::EmptyField {
                    document: self.document,
                    id: self.id.to_string(),
                    field,
                };
                self.push(error);
                None
            }
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => {
                self.wrong_type(field, "a string", other);
                None
            }
        }
    }

    fn optional_string(&mut self, field: &'static str) -> Option<String> {
        match self.field(field) {
            None => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => {
                self.wrong_type(field, "a string", other);
                None
            }
        }
    }

    fn string_list(&mut self, field: &'static str) -> Vec<String> {
        let items = match self.field(field) {
            None => return Vec::new(),
            Some(Value::Array(items)) => items,
            Some(other) => {
                self.wrong_type(field, "an array of strings", other);
                return Vec::new();
            }
        };

        let mut list = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match item {
                Value::String(s) => list.push(s.clone()),
                other => {
                    let error = SchemaError::InvalidIncludeItem {
                        id: self.id.to_string(),
                        index,
                        found: json_type_name(other),
                    };
                    self.push(error);
                }
            }
        }
        list
    }

    fn routing_map(&mut self, field: &'static str) -> Vec<RoutingRule> {
        let routes = match self.field(field) {
            None => return Vec::new(),
            Some(Value::Object(routes)) => routes,
            Some(other) => {
                self.wrong_type(field, "an object of step ids to prompts", other);
                return Vec::new();
            }
        };

        let mut rules = Vec::with_capacity(routes.len());
        for (key, prompt) in routes {
            if key.trim().is_empty() {
                let error = SchemaError::InvalidRoute {
                    id: self.id.to_string(),
                    key: key.clone(),
                    problem: "has an empty step id",
                };
                self.push(error);
                continue;
            }
            match prompt {
                Value::String(prompt) => rules.push(RoutingRule {
                    target: RouteTarget::from_key(key),
                    prompt: prompt.clone(),
                }),
                _ => {
                    let error = SchemaError::InvalidRoute {
                        id: self.id.to_string(),
                        key: key.clone(),
                        problem: "must map to a string prompt",
                    };
                    self.push(error);
                }
            }
        }
        rules
    }
}
