//! Command-line argument parsing for vq-manager.
//!
//! Uses clap to parse global connection options and the subcommand.

use crate::config::ConfigOverrides;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

const AFTER_HELP: &str = "\
examples:
  vq-manager list
  vq-manager add monthly_revenue \"What is the total revenue by month?\" \"SELECT ...\"
  vq-manager remove monthly_revenue
  vq-manager backup queries_backup.json
  vq-manager bulk-load verified_queries.json";

/// Manage Cortex Analyst verified queries via the Snowflake SQL API.
#[derive(Parser, Debug)]
#[command(name = "vq-manager")]
#[command(version, about, long_about = None, after_help = AFTER_HELP)]
pub struct Cli {
    /// Account identifier (e.g. myorg-myaccount)
    #[arg(long, env = "SNOWFLAKE_ACCOUNT", value_name = "ACCOUNT", global = true)]
    pub account: Option<String>,

    /// Programmatic access token
    #[arg(
        long,
        env = "SNOWFLAKE_PAT",
        value_name = "TOKEN",
        hide_env_values = true,
        global = true
    )]
    pub token: Option<String>,

    /// Warehouse [default: SFE_VQ_API_WH]
    #[arg(long, env = "SNOWFLAKE_WAREHOUSE", value_name = "WAREHOUSE", global = true)]
    pub warehouse: Option<String>,

    /// Role [default: SYSADMIN]
    #[arg(long, env = "SNOWFLAKE_ROLE", value_name = "ROLE", global = true)]
    pub role: Option<String>,

    /// Semantic view [default: SNOWFLAKE_EXAMPLE.SEMANTIC_MODELS.SV_VQ_API_ORDERS]
    #[arg(long, env = "SNOWFLAKE_SV", value_name = "VIEW", global = true)]
    pub semantic_view: Option<String>,

    /// Database for statement execution [default: SNOWFLAKE_EXAMPLE]
    #[arg(long, env = "SNOWFLAKE_DATABASE", value_name = "DATABASE", global = true)]
    pub database: Option<String>,

    /// Schema for statement execution [default: VQ_API]
    #[arg(long, env = "SNOWFLAKE_SCHEMA", value_name = "SCHEMA", global = true)]
    pub schema: Option<String>,

    /// Account URL override (defaults to https://<account>.snowflakecomputing.com)
    #[arg(long, env = "SNOWFLAKE_BASE_URL", value_name = "URL", global = true)]
    pub base_url: Option<String>,

    /// Give up on a pending statement after this many status checks
    #[arg(long, env = "VQ_MAX_POLLS", value_name = "N", global = true)]
    pub max_polls: Option<u32>,

    /// Config file path
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Verified query operations.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List all verified queries
    List,

    /// Add or update a verified query
    Add {
        /// Unique query name
        name: String,
        /// Natural language question
        question: String,
        /// SQL using __tablename references
        sql: String,
    },

    /// Remove a verified query
    Remove {
        /// Name of query to remove
        name: String,
    },

    /// Backup queries to JSON
    Backup {
        /// Output file (prints to stdout if omitted)
        output: Option<PathBuf>,
    },

    /// Load queries from JSON file
    BulkLoad {
        /// Path to JSON file with query definitions
        json_file: PathBuf,
    },
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Returns the config file path to use.
    ///
    /// Uses the --config argument if provided, otherwise the default path.
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(crate::config::FileConfig::default_path)
    }

    /// Collects the connection settings given as flags or env vars.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            account: self.account.clone(),
            token: self.token.clone(),
            warehouse: self.warehouse.clone(),
            role: self.role.clone(),
            semantic_view: self.semantic_view.clone(),
            database: self.database.clone(),
            schema: self.schema.clone(),
            base_url: self.base_url.clone(),
            max_polls: self.max_polls,
        }
    }
}
