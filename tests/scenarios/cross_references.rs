//! References between the models and pipeline documents

use crate::helpers::*;
use notepipe::validation::{cross_validate, parse_models, parse_pipeline};
use notepipe::{validate, CrossRefError};

#[test]
fn test_missing_model_is_single_cross_ref_error() {
    let pipeline = document(vec![
        ("transcribe", step("whisper", "inbox/audio", &["process"])),
        ("process", step("claude", "inbox/transcripts", &[])),
    ]);

    let result = validate(&standard_models(), &pipeline);
    assert_invalid(&result);
    assert!(result.models_errors.is_empty());
    assert!(result.pipeline_errors.is_empty());
    assert_eq!(result.cross_ref_errors.len(), 1);
    assert!(result.cross_ref_errors[0].contains("\"process\""));
    assert!(result.cross_ref_errors[0].contains("\"claude\""));
}

#[test]
fn test_unresolved_route_names_origin_and_target() {
    let pipeline = document(vec![("transcribe", step("whisper", "inbox/audio", &["proces"]))]);

    let models = parse_models(&standard_models()).into_result().unwrap();
    let pipeline = parse_pipeline(&pipeline).into_result().unwrap();

    assert_eq!(
        cross_validate(&models, &pipeline),
        vec![CrossRefError::MissingStep {
            step: "transcribe".to_string(),
            target: "proces".to_string(),
        }]
    );
}

#[test]
fn test_valid_references_produce_no_errors() {
    let models = parse_models(&standard_models()).into_result().unwrap();
    let pipeline = parse_pipeline(&linear_pipeline()).into_result().unwrap();
    assert!(cross_validate(&models, &pipeline).is_empty());
}

#[test]
fn test_schema_errors_suppress_cross_references() {
    // The dangling model reference is not reported until the models document is fixed
    let broken_models = document(vec![("whisper", serde_json::json!({ "baseUrl": "https://x.example" }))]);
    let pipeline = document(vec![("a", step("claude", "inbox", &[]))]);

    let result = validate(&broken_models, &pipeline);
    assert_invalid(&result);
    assert_eq!(result.models_errors.len(), 2);
    assert!(result.cross_ref_errors.is_empty());
    assert_eq!(result.summary(), "Models: 2 errors");
}

#[test]
fn test_default_route_never_needs_a_step() {
    let pipeline = document(vec![("only", step("gpt", "inbox", &["default"]))]);
    let result = validate(&standard_models(), &pipeline);
    assert_valid(&result);
    assert_eq!(result.entry_points, vec!["only"]);
}
