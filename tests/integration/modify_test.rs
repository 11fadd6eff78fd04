//! `add` and `remove` command tests.

use pretty_assertions::assert_eq;
use std::sync::Arc;

use vq_manager::api::MockTransport;
use vq_manager::commands::handlers::{handle_add, handle_remove};
use vq_manager::commands::{CommandContext, CommandOutput};
use vq_manager::error::VqError;

use super::common::{executor, status_result, SV};

#[tokio::test]
async fn test_add_reports_procedure_status() {
    let mock = Arc::new(MockTransport::new().with_submit(status_result(
        "ADD_VERIFIED_QUERY",
        "Verified query 'monthly_revenue' added",
    )));
    let executor = executor(&mock);
    let ctx = CommandContext::new(&executor, SV);

    let output = handle_add(&ctx, "monthly_revenue", "Revenue by month?", "SELECT 1")
        .await
        .unwrap();

    assert_eq!(
        output,
        CommandOutput::info("Verified query 'monthly_revenue' added")
    );
    assert_eq!(
        mock.statements(),
        vec![format!(
            "CALL ADD_VERIFIED_QUERY('{}', 'monthly_revenue', 'Revenue by month?', 'SELECT 1')",
            SV
        )]
    );
}

#[tokio::test]
async fn test_add_escapes_single_quotes() {
    let mock = Arc::new(MockTransport::new());
    let executor = executor(&mock);
    let ctx = CommandContext::new(&executor, SV);

    handle_add(
        &ctx,
        "o'brien",
        "What did O'Brien buy?",
        "SELECT * FROM __orders WHERE customer = 'O''Brien'",
    )
    .await
    .unwrap();

    let statement = &mock.statements()[0];
    assert!(statement.contains("'o''brien'"));
    assert!(statement.contains("'What did O''Brien buy?'"));
    assert!(statement.contains("customer = ''O''''Brien'''"));
}

#[tokio::test]
async fn test_add_without_rows_reports_done() {
    let mock = Arc::new(MockTransport::new());
    let executor = executor(&mock);
    let ctx = CommandContext::new(&executor, SV);

    let output = handle_add(&ctx, "q1", "What?", "SELECT 1").await.unwrap();

    assert_eq!(output, CommandOutput::info("Done"));
}

#[tokio::test]
async fn test_remove_reports_procedure_status() {
    let mock = Arc::new(MockTransport::new().with_submit(status_result(
        "REMOVE_VERIFIED_QUERY",
        "Verified query 'q1' removed",
    )));
    let executor = executor(&mock);
    let ctx = CommandContext::new(&executor, SV);

    let output = handle_remove(&ctx, "q1").await.unwrap();

    assert_eq!(output, CommandOutput::info("Verified query 'q1' removed"));
    assert_eq!(
        mock.statements(),
        vec![format!("CALL REMOVE_VERIFIED_QUERY('{}', 'q1')", SV)]
    );
}

#[tokio::test]
async fn test_remove_http_error_propagates() {
    let mock = Arc::new(
        MockTransport::new().with_submit_error(VqError::http(422, "Semantic view does not exist")),
    );
    let executor = executor(&mock);
    let ctx = CommandContext::new(&executor, SV);

    let err = handle_remove(&ctx, "q1").await.unwrap_err();

    assert!(matches!(err, VqError::Http { status: 422, .. }));
}
