//! Statement execution with asynchronous polling.
//!
//! Submits one statement, follows the statement handle while the service
//! reports it as pending, and hands back the terminal result.

use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::types::{parse_rows, ExecutionRequest, ExecutionResult, Row};
use super::StatementTransport;
use crate::error::{Result, VqError};

/// Delay between status checks on a pending statement.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Server-side execution timeout hint sent with every statement.
pub const DEFAULT_STATEMENT_TIMEOUT_SECS: u64 = 60;

/// Runs statements against a transport with fixed session parameters.
pub struct StatementExecutor {
    transport: Arc<dyn StatementTransport>,
    warehouse: String,
    role: String,
    database: String,
    schema: String,
    timeout_secs: u64,
    poll_interval: Duration,
    max_polls: Option<u32>,
}

impl StatementExecutor {
    /// Creates an executor bound to the given session parameters.
    pub fn new(
        transport: Arc<dyn StatementTransport>,
        warehouse: impl Into<String>,
        role: impl Into<String>,
        database: impl Into<String>,
        schema: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            warehouse: warehouse.into(),
            role: role.into(),
            database: database.into(),
            schema: schema.into(),
            timeout_secs: DEFAULT_STATEMENT_TIMEOUT_SECS,
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_polls: None,
        }
    }

    /// Sets the server-side timeout hint.
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Sets the delay between status checks.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Caps the number of status checks. `None` polls until the service
    /// reports a terminal state.
    ///
    /// The cap counts polls, not submissions: with `Some(n)` a statement that
    /// is still pending after `n` status checks fails with `PollLimit`, and
    /// `Some(0)` fails as soon as the submission comes back pending.
    pub fn with_max_polls(mut self, max_polls: Option<u32>) -> Self {
        self.max_polls = max_polls;
        self
    }

    /// Builds the request body for a statement.
    pub fn request(&self, statement: impl Into<String>) -> ExecutionRequest {
        ExecutionRequest {
            statement: statement.into(),
            warehouse: self.warehouse.clone(),
            role: self.role.clone(),
            database: self.database.clone(),
            schema: self.schema.clone(),
            timeout: self.timeout_secs,
        }
    }

    /// Executes a statement and waits for its terminal result.
    ///
    /// Transport and HTTP errors from either the submission or a poll are
    /// returned as-is; nothing is retried.
    pub async fn submit(&self, statement: &str) -> Result<ExecutionResult> {
        let request = self.request(statement);
        let start = Instant::now();

        debug!("Submitting statement: {}", statement);
        let mut result = self.transport.submit(&request).await?;

        if result.is_pending() {
            let handle = result.statement_handle.clone().ok_or_else(|| {
                VqError::malformed("pending response did not include a statement handle")
            })?;
            info!("Statement {} is executing asynchronously", handle);

            let mut attempts: u32 = 0;
            while result.is_pending() {
                if let Some(max) = self.max_polls {
                    if attempts >= max {
                        warn!("Giving up on statement {} after {} polls", handle, attempts);
                        return Err(VqError::PollLimit { handle, attempts });
                    }
                }

                tokio::time::sleep(self.poll_interval).await;
                attempts += 1;
                debug!("Polling statement {} (attempt {})", handle, attempts);
                result = self.transport.poll(&handle).await?;
            }
        }

        debug!(
            "Statement finished with code {:?} in {:?}",
            result.code,
            start.elapsed()
        );
        Ok(result)
    }

    /// Executes a statement and returns its rows keyed by column name.
    pub async fn execute_rows(&self, statement: &str) -> Result<Vec<Row>> {
        let result = self.submit(statement).await?;
        Ok(parse_rows(&result))
    }
}
