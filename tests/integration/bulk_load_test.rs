//! `bulk-load` command tests.

use pretty_assertions::assert_eq;
use std::sync::Arc;
use tempfile::tempdir;

use vq_manager::api::MockTransport;
use vq_manager::commands::handlers::{handle_backup, handle_bulk_load};
use vq_manager::commands::{sql, CommandContext, CommandOutput};
use vq_manager::error::VqError;

use super::common::{executor, list_result, status_result, SV};

#[tokio::test]
async fn test_bulk_load_skips_incomplete_entries_and_continues() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("verified_queries.json");
    std::fs::write(
        &path,
        r#"[
            {"name": "q1", "question": "What?", "sql": "SELECT 1"},
            {"name": "q2", "question": "Missing sql"},
            {"name": "q3", "question": "Why?", "sql": "SELECT 3"}
        ]"#,
    )
    .unwrap();

    let mock = Arc::new(
        MockTransport::new()
            .with_submit(status_result("ADD_VERIFIED_QUERY", "added q1"))
            .with_submit(status_result("ADD_VERIFIED_QUERY", "added q3")),
    );
    let executor = executor(&mock);
    let ctx = CommandContext::new(&executor, SV);
    let mut progress = Vec::new();

    let summary = handle_bulk_load(&ctx, &path, &mut progress).await.unwrap();

    assert_eq!(
        mock.statements(),
        vec![
            sql::add_statement(SV, "q1", "What?", "SELECT 1"),
            sql::add_statement(SV, "q3", "Why?", "SELECT 3"),
        ]
    );
    assert_eq!(
        String::from_utf8(progress).unwrap(),
        "Loading 3 verified queries...\n\
         \x20 [1] q1: added q1\n\
         \x20 [2] SKIP: Missing required fields in entry (sql)\n\
         \x20 [3] q3: added q3\n"
    );
    assert_eq!(
        summary,
        CommandOutput::info("\nLoaded 2 of 3 verified queries (1 skipped).")
    );
}

#[tokio::test]
async fn test_bulk_load_rejects_non_array_before_any_call() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(&path, r#"{"name": "q1", "question": "What?", "sql": "SELECT 1"}"#).unwrap();

    let mock = Arc::new(MockTransport::new());
    let executor = executor(&mock);
    let ctx = CommandContext::new(&executor, SV);
    let mut progress = Vec::new();

    let err = handle_bulk_load(&ctx, &path, &mut progress)
        .await
        .unwrap_err();

    assert!(matches!(err, VqError::Input(_)));
    assert!(mock.submitted().is_empty());
    assert!(progress.is_empty());
}

#[tokio::test]
async fn test_bulk_load_missing_file() {
    let dir = tempdir().unwrap();
    let mock = Arc::new(MockTransport::new());
    let executor = executor(&mock);
    let ctx = CommandContext::new(&executor, SV);

    let err = handle_bulk_load(&ctx, &dir.path().join("absent.json"), &mut Vec::new())
        .await
        .unwrap_err();

    assert!(matches!(err, VqError::Io(_)));
}

#[tokio::test]
async fn test_bulk_load_stops_on_remote_failure() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("verified_queries.json");
    std::fs::write(
        &path,
        r#"[
            {"name": "q1", "question": "What?", "sql": "SELECT 1"},
            {"name": "q2", "question": "Why?", "sql": "SELECT 2"},
            {"name": "q3", "question": "How?", "sql": "SELECT 3"}
        ]"#,
    )
    .unwrap();

    let mock = Arc::new(
        MockTransport::new()
            .with_submit(status_result("ADD_VERIFIED_QUERY", "added q1"))
            .with_submit_error(VqError::transport("connection reset")),
    );
    let executor = executor(&mock);
    let ctx = CommandContext::new(&executor, SV);
    let mut progress = Vec::new();

    let err = handle_bulk_load(&ctx, &path, &mut progress)
        .await
        .unwrap_err();

    assert!(matches!(err, VqError::Transport(_)));
    assert_eq!(mock.submitted().len(), 2);
    let progress = String::from_utf8(progress).unwrap();
    assert!(progress.contains("[1] q1"));
    assert!(!progress.contains("q3"));
}

#[tokio::test]
async fn test_backup_then_bulk_load_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("roundtrip.json");
    let records = [
        (
            "monthly_revenue",
            "What's the revenue by month?",
            "SELECT DATE_TRUNC('month', d) FROM __orders",
        ),
        (
            "top_customers",
            "Who are the top customers?",
            "SELECT c FROM __customers LIMIT 10",
        ),
    ];

    let source = Arc::new(MockTransport::new().with_submit(list_result(&[
        records[0],
        ("(none)", "", ""),
        records[1],
    ])));
    let source_executor = executor(&source);
    handle_backup(&CommandContext::new(&source_executor, SV), Some(path.as_path()))
        .await
        .unwrap();

    let target = Arc::new(MockTransport::new());
    let target_executor = executor(&target);
    handle_bulk_load(
        &CommandContext::new(&target_executor, SV),
        &path,
        &mut Vec::new(),
    )
    .await
    .unwrap();

    let expected: Vec<String> = records
        .iter()
        .map(|(name, question, sql_text)| sql::add_statement(SV, name, question, sql_text))
        .collect();
    assert_eq!(target.statements(), expected);
}
