//! Folder planning for entry points

use crate::helpers::*;
use notepipe::core::template::derive_base_path;
use notepipe::execution::EntryFolder;
use notepipe::{parse_pipeline, plan_entry_folders};

#[test]
fn test_base_path_of_category_input() {
    assert_eq!(derive_base_path("inbox/audio/{category}/"), "inbox/audio");
}

#[test]
fn test_only_entry_points_get_folders() {
    let pipeline = parse_pipeline(&linear_pipeline()).into_result().unwrap();
    assert_eq!(
        plan_entry_folders(&pipeline),
        vec![EntryFolder {
            step_id: "transcribe".to_string(),
            base_path: "inbox/audio".to_string(),
        }]
    );
}

#[test]
fn test_placeholder_only_input_is_skipped() {
    let pipeline = document(vec![
        ("anywhere", step("gpt", "{category}/", &[])),
        ("meetings", step("gpt", "inbox/meetings/{date}", &[])),
    ]);
    let pipeline = parse_pipeline(&pipeline).into_result().unwrap();

    let folders = plan_entry_folders(&pipeline);
    assert_eq!(folders.len(), 1);
    assert_eq!(folders[0].base_path, "inbox/meetings");
}

#[test]
fn test_leading_placeholder_keeps_folder_relative() {
    let pipeline = document(vec![("sorted", step("gpt", "{category}/notes/", &[]))]);
    let pipeline = parse_pipeline(&pipeline).into_result().unwrap();

    let folders = plan_entry_folders(&pipeline);
    assert_eq!(folders[0].base_path, "notes");
    assert!(!folders[0].base_path.starts_with('/'));
}
