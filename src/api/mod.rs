//! Snowflake SQL API access for vq-manager.
//!
//! Provides a trait-based transport for submitting statements and polling
//! their status, so the executor can run against the real service or a
//! scripted mock.

mod executor;
mod mock;
mod sql_api;
mod types;

pub use executor::{StatementExecutor, DEFAULT_POLL_INTERVAL, DEFAULT_STATEMENT_TIMEOUT_SECS};
pub use mock::MockTransport;
pub use sql_api::{SqlApiClient, DEFAULT_REQUEST_TIMEOUT_SECS};
pub use types::{
    parse_rows, text_value, ExecutionRequest, ExecutionResult, ResultSetMetaData, Row, RowType,
    PENDING_CODE,
};

use crate::error::Result;
use async_trait::async_trait;

/// Trait defining the wire operations the executor relies on.
///
/// Each call issues exactly one request; polling policy lives in
/// [`StatementExecutor`].
#[async_trait]
pub trait StatementTransport: Send + Sync {
    /// Submits a statement for execution.
    async fn submit(&self, request: &ExecutionRequest) -> Result<ExecutionResult>;

    /// Fetches the current status of a previously submitted statement.
    async fn poll(&self, handle: &str) -> Result<ExecutionResult>;
}
