//! Sharing pipelines between users

use crate::helpers::*;
use notepipe::transfer::{parse_import, EXPORT_VERSION};
use notepipe::{export_pipeline_config, import_pipeline_config, parse_pipeline, ExportEnvelope, ImportError};
use serde_json::json;

#[test]
fn test_export_round_trip() {
    let pipeline = document(vec![
        ("transcribe", step("whisper", "inbox/audio/{category}/", &["process", "default"])),
        ("process", step("gpt", "inbox/transcripts", &[])),
    ]);
    let pipeline = parse_pipeline(&pipeline).into_result().unwrap();

    let exported = export_pipeline_config(&pipeline);
    let envelope = ExportEnvelope::new(&exported, "Shared workflow");
    let restored = import_pipeline_config(&envelope.to_value().unwrap()).unwrap();

    assert_eq!(restored, pipeline);
}

#[test]
fn test_export_never_contains_credentials() {
    let pipeline = parse_pipeline(&linear_pipeline()).into_result().unwrap();
    let text = ExportEnvelope::new(&pipeline, "").to_json().unwrap();

    assert!(!text.contains(SECRET));
    assert!(!text.contains("apiKey"));
    assert!(!text.contains("baseUrl"));
    assert!(text.contains(&format!("\"version\": \"{}\"", EXPORT_VERSION)));
}

#[test]
fn test_import_bundle_with_prompts() {
    let text = json!({
        "version": "1.2",
        "exported": "2024-05-01T10:00:00.000Z",
        "description": "Lecture notes",
        "pipeline": {
            "transcribe": { "modelConfig": "whisper", "input": "inbox/lectures", "output": "notes" }
        },
        "examplePrompts": { "prompts/lecture.md": "Summarize the lecture." }
    })
    .to_string();

    let bundle = parse_import(&text).unwrap();
    assert_eq!(bundle.description.as_deref(), Some("Lecture notes"));
    assert_eq!(bundle.pipeline.len(), 1);
    assert_eq!(
        bundle.example_prompts,
        vec![("prompts/lecture.md".to_string(), "Summarize the lecture.".to_string())]
    );
}

#[test]
fn test_import_requires_pipeline_key() {
    let err = parse_import(r#"{ "version": "1.2", "steps": {} }"#).unwrap_err();
    assert!(matches!(err, ImportError::Malformed(_)));
    assert!(err.to_string().contains("pipeline"));
}

#[test]
fn test_import_reports_every_schema_error() {
    let text = json!({
        "pipeline": {
            "a": { "modelConfig": "", "input": "in", "output": "out" },
            "b": { "modelConfig": "gpt", "output": "out", "include": "notes.md" }
        }
    })
    .to_string();

    match parse_import(&text) {
        Err(ImportError::InvalidPipeline(errors)) => assert_eq!(errors.len(), 3),
        other => panic!("Expected InvalidPipeline, got {:?}", other),
    }
}
