//! Shared fixtures and assertions for configuration scenarios

#![allow(dead_code)]

use notepipe::validation::ConfigValidationResult;
use serde_json::{json, Map, Value};

/// API key used in fixtures; must never appear in exports
pub const SECRET: &str = "sk-test-do-not-leak";

/// A model entry with credentials
pub fn model(implementation: &str, model: &str) -> Value {
    json!({
        "baseUrl": "https://api.openai.com/v1",
        "apiKey": SECRET,
        "implementation": implementation,
        "model": model,
    })
}

/// A step entry routing to `routes` (use "default" for the fallback)
pub fn step(model_config: &str, input: &str, routes: &[&str]) -> Value {
    let mut entry = json!({
        "modelConfig": model_config,
        "input": input,
        "output": "notes/{filename}.md",
    });
    if !routes.is_empty() {
        let routing: Map<String, Value> = routes
            .iter()
            .map(|r| (r.to_string(), Value::String(format!("Choose {} when it fits", r))))
            .collect();
        entry["routingAwareOutput"] = Value::Object(routing);
    }
    entry
}

/// Build a JSON document from (id, entry) pairs, keeping their order
pub fn document(entries: Vec<(&str, Value)>) -> String {
    let map: Map<String, Value> = entries
        .into_iter()
        .map(|(id, entry)| (id.to_string(), entry))
        .collect();
    serde_json::to_string_pretty(&Value::Object(map)).unwrap()
}

/// Models document with a transcription and a chat model
pub fn standard_models() -> String {
    document(vec![
        ("whisper", model("whisper", "whisper-1")),
        ("gpt", model("chat", "gpt-4o")),
    ])
}

/// transcribe → process → summarize
pub fn linear_pipeline() -> String {
    document(vec![
        ("transcribe", step("whisper", "inbox/audio/{category}/", &["process"])),
        ("process", step("gpt", "inbox/transcripts/", &["summarize"])),
        ("summarize", step("gpt", "notes/", &[])),
    ])
}

pub fn assert_valid(result: &ConfigValidationResult) {
    assert!(
        result.is_valid,
        "Expected valid configuration, got: {}\n{:#?}",
        result.summary(),
        result
    );
    assert_eq!(result.error_count(), 0);
}

pub fn assert_invalid(result: &ConfigValidationResult) {
    assert!(!result.is_valid, "Expected invalid configuration");
    assert!(result.error_count() > 0);
    assert!(result.entry_points.is_empty(), "Invalid configs have no entry points");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixtures_are_valid_together() {
        let result = notepipe::validate(&standard_models(), &linear_pipeline());
        assert_valid(&result);
    }
}
