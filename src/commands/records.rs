//! Verified query records and their JSON file format.
//!
//! Backup files and bulk-load files share one shape: an array of
//! `{"name", "question", "sql"}` objects.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::{text_value, Row};
use crate::error::{Result, VqError};

/// Name the list procedure reports when a view has no verified queries.
pub const PLACEHOLDER_NAME: &str = "(none)";

/// Column names returned by the list procedure.
pub const NAME_COLUMN: &str = "NAME";
pub const QUESTION_COLUMN: &str = "QUESTION";
pub const SQL_COLUMN: &str = "SQL_TEXT";

/// A named question/SQL pair registered with a semantic view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedQueryRecord {
    pub name: String,
    pub question: String,
    pub sql: String,
}

impl VerifiedQueryRecord {
    pub fn new(
        name: impl Into<String>,
        question: impl Into<String>,
        sql: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            question: question.into(),
            sql: sql.into(),
        }
    }

    /// Builds a record from a list procedure row.
    pub fn from_row(row: &Row) -> Self {
        Self {
            name: text_value(row, NAME_COLUMN),
            question: text_value(row, QUESTION_COLUMN),
            sql: text_value(row, SQL_COLUMN),
        }
    }

    /// Returns true for the sentinel row (or a row without a name).
    pub fn is_placeholder(&self) -> bool {
        self.name.is_empty() || self.name == PLACEHOLDER_NAME
    }
}

/// One element of a bulk-load file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BulkEntry {
    /// All required fields are present and non-empty.
    Valid(VerifiedQueryRecord),
    /// At least one required field is missing, empty, or not a string.
    Invalid { missing: Vec<&'static str> },
}

/// Serializes records as a pretty-printed JSON array.
pub fn to_json(records: &[VerifiedQueryRecord]) -> Result<String> {
    serde_json::to_string_pretty(records)
        .map_err(|e| VqError::internal(format!("Failed to serialize records: {e}")))
}

fn required_field(entry: &Value, field: &str) -> Option<String> {
    entry
        .get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

/// Parses a bulk-load document into entries, in file order.
///
/// The document itself must be a JSON array; individual bad entries are
/// reported as [`BulkEntry::Invalid`] rather than failing the whole file.
pub fn parse_bulk_file(content: &str) -> Result<Vec<BulkEntry>> {
    let document: Value = serde_json::from_str(content)
        .map_err(|e| VqError::input(format!("Invalid JSON: {e}")))?;

    let Value::Array(items) = document else {
        return Err(VqError::input(
            "JSON file must contain an array of query objects",
        ));
    };

    Ok(items
        .iter()
        .map(|item| {
            let name = required_field(item, "name");
            let question = required_field(item, "question");
            let sql = required_field(item, "sql");

            match (name, question, sql) {
                (Some(name), Some(question), Some(sql)) => {
                    BulkEntry::Valid(VerifiedQueryRecord { name, question, sql })
                }
                (name, question, sql) => {
                    let missing = [("name", name), ("question", question), ("sql", sql)]
                        .into_iter()
                        .filter(|(_, value)| value.is_none())
                        .map(|(field, _)| field)
                        .collect();
                    BulkEntry::Invalid { missing }
                }
            }
        })
        .collect())
}
