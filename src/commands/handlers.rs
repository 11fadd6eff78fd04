//! Command handlers for list, add, remove, backup and bulk-load.
//!
//! Each handler builds one procedure call per remote operation, runs it
//! through the executor and reshapes the returned rows.

use std::io::Write;
use std::path::Path;

use tracing::{info, warn};

use super::output::CommandOutput;
use super::records::{self, BulkEntry, VerifiedQueryRecord};
use super::sql;
use super::CommandContext;
use crate::api::Row;
use crate::error::{Result, VqError};

/// Longest SQL preview shown by `list`, in characters.
pub const SQL_PREVIEW_CHARS: usize = 80;

/// Status reported when a procedure returns no message.
const DEFAULT_STATUS: &str = "Done";

/// Shortens SQL for table display.
fn sql_preview(sql_text: &str) -> String {
    if sql_text.chars().count() > SQL_PREVIEW_CHARS {
        let truncated: String = sql_text.chars().take(SQL_PREVIEW_CHARS).collect();
        format!("{}...", truncated)
    } else {
        sql_text.to_string()
    }
}

/// Extracts the status message a procedure returns in a column named after it.
fn status_message(rows: &[Row], column: &str) -> String {
    rows.first()
        .and_then(|row| row.get(column))
        .and_then(|value| match value {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        })
        .unwrap_or_else(|| DEFAULT_STATUS.to_string())
}

fn write_progress(progress: &mut dyn Write, line: &str) -> Result<()> {
    writeln!(progress, "{}", line)
        .and_then(|_| progress.flush())
        .map_err(|e| VqError::io(format!("Failed to write progress: {e}")))
}

/// Fetches every verified query registered with the semantic view.
pub async fn fetch_records(ctx: &CommandContext<'_>) -> Result<Vec<VerifiedQueryRecord>> {
    let rows = ctx
        .executor
        .execute_rows(&sql::list_statement(ctx.semantic_view))
        .await?;
    Ok(rows.iter().map(VerifiedQueryRecord::from_row).collect())
}

/// Handle `list`.
pub async fn handle_list(ctx: &CommandContext<'_>) -> Result<CommandOutput> {
    let records = fetch_records(ctx).await?;

    if records.is_empty() {
        return Ok(CommandOutput::info("No verified queries found."));
    }

    let headers = vec![
        records::NAME_COLUMN.to_string(),
        records::QUESTION_COLUMN.to_string(),
        records::SQL_COLUMN.to_string(),
    ];
    let rows = records
        .into_iter()
        .map(|r| vec![r.name, r.question, sql_preview(&r.sql)])
        .collect();

    Ok(CommandOutput::table(headers, rows))
}

/// Handle `add`: creates or replaces a verified query.
pub async fn handle_add(
    ctx: &CommandContext<'_>,
    name: &str,
    question: &str,
    sql_text: &str,
) -> Result<CommandOutput> {
    let statement = sql::add_statement(ctx.semantic_view, name, question, sql_text);
    let rows = ctx.executor.execute_rows(&statement).await?;
    info!("Added verified query '{}'", name);
    Ok(CommandOutput::Info(status_message(&rows, sql::ADD_PROCEDURE)))
}

/// Handle `remove`.
pub async fn handle_remove(ctx: &CommandContext<'_>, name: &str) -> Result<CommandOutput> {
    let statement = sql::remove_statement(ctx.semantic_view, name);
    let rows = ctx.executor.execute_rows(&statement).await?;
    info!("Removed verified query '{}'", name);
    Ok(CommandOutput::Info(status_message(
        &rows,
        sql::REMOVE_PROCEDURE,
    )))
}

/// Handle `backup`: writes the records to `output`, or returns them as JSON.
pub async fn handle_backup(
    ctx: &CommandContext<'_>,
    output: Option<&Path>,
) -> Result<CommandOutput> {
    let records: Vec<VerifiedQueryRecord> = fetch_records(ctx)
        .await?
        .into_iter()
        .filter(|r| !r.is_placeholder())
        .collect();

    let json = records::to_json(&records)?;

    match output {
        Some(path) => {
            std::fs::write(path, &json).map_err(|e| {
                VqError::io(format!("Failed to write {}: {e}", path.display()))
            })?;
            Ok(CommandOutput::info(format!(
                "Backed up {} verified queries to {}",
                records.len(),
                path.display()
            )))
        }
        None => Ok(CommandOutput::Json(json)),
    }
}

/// Handle `bulk-load`: adds every valid entry of a JSON file, in order.
///
/// Entries missing a required field are reported and skipped. A failed
/// remote call stops the load; entries already added stay added.
pub async fn handle_bulk_load(
    ctx: &CommandContext<'_>,
    path: &Path,
    progress: &mut dyn Write,
) -> Result<CommandOutput> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| VqError::io(format!("Failed to read {}: {e}", path.display())))?;
    let entries = records::parse_bulk_file(&content)?;

    let total = entries.len();
    write_progress(progress, &format!("Loading {} verified queries...", total))?;

    let mut loaded = 0;
    let mut skipped = 0;
    for (index, entry) in entries.iter().enumerate() {
        let position = index + 1;
        match entry {
            BulkEntry::Invalid { missing } => {
                skipped += 1;
                warn!("Skipping bulk-load entry {}: missing {:?}", position, missing);
                write_progress(
                    progress,
                    &format!(
                        "  [{}] SKIP: Missing required fields in entry ({})",
                        position,
                        missing.join(", ")
                    ),
                )?;
            }
            BulkEntry::Valid(record) => {
                let status =
                    handle_add(ctx, &record.name, &record.question, &record.sql).await?;
                loaded += 1;
                write_progress(
                    progress,
                    &format!("  [{}] {}: {}", position, record.name, status.render()),
                )?;
            }
        }
    }

    Ok(CommandOutput::info(format!(
        "\nLoaded {} of {} verified queries ({} skipped).",
        loaded, total, skipped
    )))
}
