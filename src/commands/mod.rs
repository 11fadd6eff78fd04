//! Verified query commands for vq-manager.
//!
//! Each command builds a stored-procedure call, runs it through the
//! statement executor and reshapes the rows into a CommandOutput.

pub mod handlers;
pub mod output;
pub mod records;
pub mod sql;

pub use output::CommandOutput;
pub use records::{BulkEntry, VerifiedQueryRecord};

use std::io::Write;

use crate::api::StatementExecutor;
use crate::cli::Command;
use crate::error::Result;

/// Context provided to command handlers.
pub struct CommandContext<'a> {
    /// Executor for procedure calls.
    pub executor: &'a StatementExecutor,
    /// Semantic view whose verified queries are managed.
    pub semantic_view: &'a str,
}

impl<'a> CommandContext<'a> {
    pub fn new(executor: &'a StatementExecutor, semantic_view: &'a str) -> Self {
        Self {
            executor,
            semantic_view,
        }
    }
}

/// Dispatches a parsed command to its handler.
///
/// `progress` receives incremental lines from long-running commands.
pub async fn run(
    ctx: &CommandContext<'_>,
    command: &Command,
    progress: &mut dyn Write,
) -> Result<CommandOutput> {
    match command {
        Command::List => handlers::handle_list(ctx).await,
        Command::Add {
            name,
            question,
            sql,
        } => handlers::handle_add(ctx, name, question, sql).await,
        Command::Remove { name } => handlers::handle_remove(ctx, name).await,
        Command::Backup { output } => handlers::handle_backup(ctx, output.as_deref()).await,
        Command::BulkLoad { json_file } => {
            handlers::handle_bulk_load(ctx, json_file, progress).await
        }
    }
}
