//! vq-manager - manage Cortex Analyst verified queries through the Snowflake SQL API.

use std::io::Write;
use std::sync::Arc;

use tracing::debug;
use vq_manager::api::{SqlApiClient, StatementExecutor};
use vq_manager::cli::Cli;
use vq_manager::commands::{self, CommandContext};
use vq_manager::config::{Config, FileConfig};
use vq_manager::error::{Result, VqError};
use vq_manager::logging;

#[tokio::main]
async fn main() {
    // Values from .env behave like exported variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse_args();
    logging::init_stderr_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("{}", e.report());
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config_path();
    debug!("Loading config from: {}", config_path.display());
    let file = FileConfig::load_from_file(&config_path)?;
    let config = Config::resolve(cli.overrides(), file)?;
    debug!("Resolved config: {:?}", config);

    let transport = SqlApiClient::new(
        config.endpoint()?,
        config.token.clone(),
        config.request_timeout_secs,
    )?;
    let executor = StatementExecutor::new(
        Arc::new(transport),
        config.warehouse.clone(),
        config.role.clone(),
        config.database.clone(),
        config.schema.clone(),
    )
    .with_timeout(config.statement_timeout_secs)
    .with_poll_interval(config.poll_interval)
    .with_max_polls(config.max_polls);

    let ctx = CommandContext::new(&executor, &config.semantic_view);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let output = commands::run(&ctx, &cli.command, &mut out).await?;

    writeln!(out, "{}", output.render())
        .map_err(|e| VqError::io(format!("Failed to write output: {e}")))?;
    Ok(())
}
