//! Documents edited character by character in a text box

use crate::helpers::*;
use notepipe::validation::{parse_models, parse_pipeline};
use notepipe::validate;

#[test]
fn test_every_prefix_of_a_document_is_handled() {
    let models = standard_models();
    let pipeline = linear_pipeline();

    for (end, _) in pipeline.char_indices() {
        let partial = &pipeline[..end];
        let parsed = parse_pipeline(partial);

        if parsed.value.is_none() {
            assert_eq!(parsed.errors.len(), 1, "prefix {:?}", partial);
        }

        let result = validate(&models, partial);
        assert!(result.models_errors.is_empty());
        if !result.is_valid {
            assert!(result.entry_points.is_empty());
        }
    }

    assert_valid(&validate(&models, &pipeline));
}

#[test]
fn test_syntax_errors_are_single_and_located() {
    for text in ["{", "{\"a\":", "[1,", "{\"a\": {\"baseUrl\": }}", "nul", "{}}"] {
        let parsed = parse_models(text);
        assert!(parsed.value.is_none(), "{:?}", text);
        assert_eq!(parsed.errors.len(), 1, "{:?}", text);
        assert!(parsed.errors[0].is_syntax(), "{:?}", text);
        assert!(parsed.errors[0].to_string().contains("line 1"));
    }
}

#[test]
fn test_revalidation_is_idempotent() {
    let pipeline = document(vec![
        ("a", step("gpt", "in", &["b", "ghost"])),
        ("b", step("missing", "in", &[])),
    ]);

    let first = validate(&standard_models(), &pipeline);
    let second = validate(&standard_models(), &pipeline);
    assert_eq!(first, second);
    assert_eq!(first.cross_ref_errors.len(), 2);
}

#[test]
fn test_placeholder_api_key_is_valid_with_warning() {
    let models = r#"{
        "gpt": { "baseUrl": "https://api.openai.com/v1", "apiKey": "", "implementation": "chat", "model": "gpt-4o" }
    }"#;
    let pipeline = document(vec![("a", step("gpt", "inbox", &[]))]);

    let result = validate(models, &pipeline);
    assert_valid(&result);
    assert_eq!(result.warnings.len(), 1);
    assert!(result.warnings[0].contains("no API key"));
}
