//! Mock transport for testing.
//!
//! Replays scripted SQL API responses and records every request, so the
//! executor and command handlers can be exercised without a network.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use super::types::{ExecutionRequest, ExecutionResult, ResultSetMetaData, RowType, PENDING_CODE};
use super::StatementTransport;
use crate::error::{Result, VqError};

/// Status code the SQL API uses for a successfully completed statement.
const SUCCESS_CODE: &str = "090001";

/// A transport that returns predefined results.
///
/// Submissions pop from the submit queue and fall back to an empty success
/// result once it is drained. Polls pop from the poll queue; polling with an
/// empty queue is an error so a broken script cannot loop forever.
#[derive(Debug, Default)]
pub struct MockTransport {
    submit_queue: Mutex<VecDeque<Result<ExecutionResult>>>,
    poll_queue: Mutex<VecDeque<Result<ExecutionResult>>>,
    submitted: Mutex<Vec<ExecutionRequest>>,
    polled: Mutex<Vec<String>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockTransport {
    /// Creates a mock that answers every submission with an empty success.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a response for the next submission.
    pub fn with_submit(self, result: ExecutionResult) -> Self {
        lock(&self.submit_queue).push_back(Ok(result));
        self
    }

    /// Queues a failure for the next submission.
    pub fn with_submit_error(self, error: VqError) -> Self {
        lock(&self.submit_queue).push_back(Err(error));
        self
    }

    /// Queues a response for the next poll.
    pub fn with_poll(self, result: ExecutionResult) -> Self {
        lock(&self.poll_queue).push_back(Ok(result));
        self
    }

    /// Queues a failure for the next poll.
    pub fn with_poll_error(self, error: VqError) -> Self {
        lock(&self.poll_queue).push_back(Err(error));
        self
    }

    /// Returns every request submitted so far.
    pub fn submitted(&self) -> Vec<ExecutionRequest> {
        lock(&self.submitted).clone()
    }

    /// Returns the SQL text of every submitted statement.
    pub fn statements(&self) -> Vec<String> {
        lock(&self.submitted)
            .iter()
            .map(|r| r.statement.clone())
            .collect()
    }

    /// Returns every handle polled so far.
    pub fn polled(&self) -> Vec<String> {
        lock(&self.polled).clone()
    }

    /// Builds a completed result with the given columns and rows.
    pub fn table(columns: &[&str], rows: Vec<Vec<Value>>) -> ExecutionResult {
        ExecutionResult {
            code: Some(SUCCESS_CODE.to_string()),
            message: Some("Statement executed successfully.".to_string()),
            statement_handle: Some("mock-handle".to_string()),
            result_set_meta_data: Some(ResultSetMetaData {
                row_type: columns
                    .iter()
                    .map(|name| RowType {
                        name: name.to_string(),
                        data_type: Some("text".to_string()),
                    })
                    .collect(),
            }),
            data: Some(rows),
            ..Default::default()
        }
    }

    /// Builds a pending result for the given handle.
    pub fn pending(handle: &str) -> ExecutionResult {
        ExecutionResult {
            code: Some(PENDING_CODE.to_string()),
            message: Some("Asynchronous execution in progress.".to_string()),
            statement_handle: Some(handle.to_string()),
            statement_status_url: Some(format!("/api/v2/statements/{}", handle)),
            ..Default::default()
        }
    }
}

#[async_trait]
impl StatementTransport for MockTransport {
    async fn submit(&self, request: &ExecutionRequest) -> Result<ExecutionResult> {
        lock(&self.submitted).push(request.clone());
        lock(&self.submit_queue)
            .pop_front()
            .unwrap_or_else(|| Ok(Self::table(&[], Vec::new())))
    }

    async fn poll(&self, handle: &str) -> Result<ExecutionResult> {
        lock(&self.polled).push(handle.to_string());
        lock(&self.poll_queue).pop_front().unwrap_or_else(|| {
            Err(VqError::malformed(format!(
                "no scripted poll response for {}",
                handle
            )))
        })
    }
}
