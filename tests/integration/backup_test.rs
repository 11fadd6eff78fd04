//! `backup` command tests.

use pretty_assertions::assert_eq;
use std::sync::Arc;
use tempfile::tempdir;

use vq_manager::api::MockTransport;
use vq_manager::commands::handlers::handle_backup;
use vq_manager::commands::{CommandContext, CommandOutput, VerifiedQueryRecord};

use super::common::{executor, list_result, SV};

#[tokio::test]
async fn test_backup_to_stdout_with_only_placeholder_is_empty_array() {
    let mock = Arc::new(MockTransport::new().with_submit(list_result(&[("(none)", "", "")])));
    let executor = executor(&mock);
    let ctx = CommandContext::new(&executor, SV);

    let output = handle_backup(&ctx, None).await.unwrap();

    assert_eq!(output, CommandOutput::Json("[]".to_string()));
    let parsed: Vec<VerifiedQueryRecord> = serde_json::from_str(&output.render()).unwrap();
    assert!(parsed.is_empty());
}

#[tokio::test]
async fn test_backup_to_stdout_serializes_records() {
    let mock = Arc::new(MockTransport::new().with_submit(list_result(&[
        ("q1", "What?", "SELECT 1"),
        ("q2", "Why?", "SELECT 2"),
    ])));
    let executor = executor(&mock);
    let ctx = CommandContext::new(&executor, SV);

    let output = handle_backup(&ctx, None).await.unwrap();

    let parsed: Vec<VerifiedQueryRecord> = serde_json::from_str(&output.render()).unwrap();
    assert_eq!(
        parsed,
        vec![
            VerifiedQueryRecord::new("q1", "What?", "SELECT 1"),
            VerifiedQueryRecord::new("q2", "Why?", "SELECT 2"),
        ]
    );
}

#[tokio::test]
async fn test_backup_to_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("queries_backup.json");
    let mock = Arc::new(MockTransport::new().with_submit(list_result(&[
        ("q1", "What?", "SELECT 1"),
        ("(none)", "", ""),
    ])));
    let executor = executor(&mock);
    let ctx = CommandContext::new(&executor, SV);

    let output = handle_backup(&ctx, Some(path.as_path())).await.unwrap();

    assert_eq!(
        output,
        CommandOutput::info(format!(
            "Backed up 1 verified queries to {}",
            path.display()
        ))
    );
    let written = std::fs::read_to_string(&path).unwrap();
    let parsed: Vec<VerifiedQueryRecord> = serde_json::from_str(&written).unwrap();
    assert_eq!(parsed, vec![VerifiedQueryRecord::new("q1", "What?", "SELECT 1")]);
}
