//! Shared helpers for command tests.

use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

use vq_manager::api::{ExecutionResult, MockTransport, StatementExecutor};

pub const SV: &str = "SNOWFLAKE_EXAMPLE.SEMANTIC_MODELS.SV_VQ_API_ORDERS";

/// Creates an executor over the mock that never sleeps between polls.
pub fn executor(mock: &Arc<MockTransport>) -> StatementExecutor {
    StatementExecutor::new(
        mock.clone(),
        "SFE_VQ_API_WH",
        "SYSADMIN",
        "SNOWFLAKE_EXAMPLE",
        "VQ_API",
    )
    .with_poll_interval(Duration::ZERO)
}

/// A list procedure result with the given (name, question, sql) rows.
pub fn list_result(rows: &[(&str, &str, &str)]) -> ExecutionResult {
    MockTransport::table(
        &["NAME", "QUESTION", "SQL_TEXT"],
        rows.iter()
            .map(|(n, q, s)| vec![json!(n), json!(q), json!(s)])
            .collect::<Vec<Vec<Value>>>(),
    )
}

/// A single-cell status result as returned by the add/remove procedures.
pub fn status_result(procedure: &str, message: &str) -> ExecutionResult {
    MockTransport::table(&[procedure], vec![vec![json!(message)]])
}
