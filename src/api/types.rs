//! Request and response types for the Snowflake SQL API.
//!
//! Defines the statement submission body and the tabular result shape
//! returned by both the submit and the status endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Status code the SQL API returns while a statement is still executing.
pub const PENDING_CODE: &str = "333334";

/// A single SQL statement submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionRequest {
    /// SQL text to execute.
    pub statement: String,
    /// Warehouse that runs the statement.
    pub warehouse: String,
    /// Role the statement runs as.
    pub role: String,
    /// Default database for unqualified names.
    pub database: String,
    /// Default schema for unqualified names.
    pub schema: String,
    /// Server-side execution timeout hint, in seconds.
    pub timeout: u64,
}

/// Response body from the submit or status endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    /// Service status code (e.g. `090001` for success, `333334` while pending).
    #[serde(default)]
    pub code: Option<String>,

    /// Human-readable status message.
    #[serde(default)]
    pub message: Option<String>,

    /// Handle identifying the statement, used for polling.
    #[serde(default)]
    pub statement_handle: Option<String>,

    /// Relative URL of the status endpoint for this statement.
    #[serde(default)]
    pub statement_status_url: Option<String>,

    /// Column metadata for the result set.
    #[serde(default)]
    pub result_set_meta_data: Option<ResultSetMetaData>,

    /// Positional row data.
    #[serde(default)]
    pub data: Option<Vec<Vec<Value>>>,
}

/// Result set metadata block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSetMetaData {
    /// Columns in schema order.
    #[serde(default)]
    pub row_type: Vec<RowType>,
}

/// Description of a single result column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RowType {
    /// Column name.
    pub name: String,

    /// Column type as reported by the service.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
}

/// A row keyed by column name.
pub type Row = HashMap<String, Value>;

impl ExecutionResult {
    /// Returns true if the statement is still executing.
    pub fn is_pending(&self) -> bool {
        self.code.as_deref() == Some(PENDING_CODE)
    }

    /// Returns the column names in schema order.
    ///
    /// A result without metadata has no columns.
    pub fn columns(&self) -> Vec<String> {
        self.result_set_meta_data
            .as_ref()
            .map(|meta| meta.row_type.iter().map(|c| c.name.clone()).collect())
            .unwrap_or_default()
    }

    /// Returns the positional rows, or an empty slice if there is no data block.
    pub fn rows(&self) -> &[Vec<Value>] {
        self.data.as_deref().unwrap_or(&[])
    }
}

/// Converts a tabular result into rows keyed by column name.
///
/// Values are paired with columns by position; surplus values or columns are
/// dropped. Missing metadata yields no rows rather than an error.
pub fn parse_rows(result: &ExecutionResult) -> Vec<Row> {
    let columns = result.columns();
    if columns.is_empty() {
        return Vec::new();
    }

    result
        .rows()
        .iter()
        .map(|values| {
            columns
                .iter()
                .cloned()
                .zip(values.iter().cloned())
                .collect::<Row>()
        })
        .collect()
}

/// Reads a column as text, treating absent or null values as empty.
pub fn text_value(row: &Row, column: &str) -> String {
    match row.get(column) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
