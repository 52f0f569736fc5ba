//! Entry point detection over whole documents

use crate::helpers::*;
use notepipe::validate;

#[test]
fn test_linear_pipeline_single_entry_point() {
    let result = validate(&standard_models(), &linear_pipeline());
    assert_valid(&result);
    assert_eq!(result.entry_points, vec!["transcribe"]);
}

#[test]
fn test_independent_steps_are_all_entry_points() {
    let pipeline = document(vec![
        ("A", step("gpt", "inbox/a", &[])),
        ("B", step("gpt", "inbox/b", &[])),
    ]);
    let result = validate(&standard_models(), &pipeline);
    assert_valid(&result);
    assert_eq!(result.entry_points, vec!["A", "B"]);
}

#[test]
fn test_entry_points_follow_document_order() {
    let pipeline = document(vec![
        ("zeta", step("gpt", "inbox/z", &["shared"])),
        ("alpha", step("gpt", "inbox/a", &["shared", "default"])),
        ("shared", step("gpt", "inbox/s", &[])),
    ]);
    let result = validate(&standard_models(), &pipeline);
    assert_valid(&result);
    assert_eq!(result.entry_points, vec!["zeta", "alpha"]);
}

#[test]
fn test_cycle_with_entry_is_valid() {
    // review can send work back to draft; routing is decided at run time
    let pipeline = document(vec![
        ("transcribe", step("whisper", "inbox/audio", &["draft"])),
        ("draft", step("gpt", "inbox/transcripts", &["review"])),
        ("review", step("gpt", "drafts", &["draft", "default"])),
    ]);
    let result = validate(&standard_models(), &pipeline);
    assert_valid(&result);
    assert_eq!(result.entry_points, vec!["transcribe"]);
    assert!(!result.warnings.iter().any(|w| w.contains("not reachable")));
}

#[test]
fn test_closed_cycle_warns_about_unreachable_steps() {
    let pipeline = document(vec![
        ("transcribe", step("whisper", "inbox/audio", &[])),
        ("ping", step("gpt", "a", &["pong"])),
        ("pong", step("gpt", "b", &["ping"])),
    ]);
    let result = validate(&standard_models(), &pipeline);
    assert_valid(&result);
    assert_eq!(result.entry_points, vec!["transcribe"]);
    assert!(result
        .warnings
        .iter()
        .any(|w| w.contains("not reachable") && w.contains("ping, pong")));
}

#[test]
fn test_empty_pipeline_has_no_entry_points() {
    let result = validate(&standard_models(), "{}");
    assert_valid(&result);
    assert!(result.entry_points.is_empty());
    assert!(!result.warnings.iter().any(|w| w.contains("no entry point")));
}
