//! Configuration management for vq-manager.
//!
//! Resolves connection settings from command-line flags, environment
//! variables and an optional TOML file, in that order of precedence.

use crate::error::{Result, VqError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::api::{DEFAULT_POLL_INTERVAL, DEFAULT_STATEMENT_TIMEOUT_SECS};

/// Default warehouse for statement execution.
pub const DEFAULT_WAREHOUSE: &str = "SFE_VQ_API_WH";

/// Default role for statement execution.
pub const DEFAULT_ROLE: &str = "SYSADMIN";

/// Default semantic view whose verified queries are managed.
pub const DEFAULT_SEMANTIC_VIEW: &str = "SNOWFLAKE_EXAMPLE.SEMANTIC_MODELS.SV_VQ_API_ORDERS";

/// Default database holding the verified query procedures.
pub const DEFAULT_DATABASE: &str = "SNOWFLAKE_EXAMPLE";

/// Default schema holding the verified query procedures.
pub const DEFAULT_SCHEMA: &str = "VQ_API";

/// Path of the statements endpoint relative to the account URL.
const STATEMENTS_PATH: &str = "api/v2/statements";

/// Settings read from the optional config file.
///
/// Every field is optional; anything unset falls back to flags, env or defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub account: Option<String>,
    /// Access token (not recommended to store in config).
    pub token: Option<String>,
    pub warehouse: Option<String>,
    pub role: Option<String>,
    pub semantic_view: Option<String>,
    pub database: Option<String>,
    pub schema: Option<String>,
    pub base_url: Option<String>,
    pub max_polls: Option<u32>,
    /// Server-side timeout hint, in seconds.
    pub statement_timeout_secs: Option<u64>,
    /// Timeout for a single HTTP request, in seconds.
    pub request_timeout_secs: Option<u64>,
    /// Delay between status checks, in milliseconds.
    pub poll_interval_ms: Option<u64>,
}

impl FileConfig {
    /// Returns the default config file path for the current platform.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vq-manager")
            .join("config.toml")
    }

    /// Loads configuration from a TOML file. A missing file yields defaults.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| VqError::config(format!("Failed to read config file: {e}")))?;

        Self::parse_toml(&content, path)
    }

    /// Parses configuration from a TOML string.
    fn parse_toml(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            VqError::config(format!(
                "Invalid config file {}:\n  {}",
                path.display(),
                e
            ))
        })
    }
}

/// Values supplied on the command line or through the environment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub account: Option<String>,
    pub token: Option<String>,
    pub warehouse: Option<String>,
    pub role: Option<String>,
    pub semantic_view: Option<String>,
    pub database: Option<String>,
    pub schema: Option<String>,
    pub base_url: Option<String>,
    pub max_polls: Option<u32>,
}

/// Fully resolved runtime configuration.
#[derive(Clone, PartialEq)]
pub struct Config {
    pub account: String,
    pub token: String,
    pub warehouse: String,
    pub role: String,
    pub semantic_view: String,
    pub database: String,
    pub schema: String,
    pub base_url: Option<String>,
    pub max_polls: Option<u32>,
    pub statement_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub poll_interval: Duration,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("account", &self.account)
            .field("token", &"<redacted>")
            .field("warehouse", &self.warehouse)
            .field("role", &self.role)
            .field("semantic_view", &self.semantic_view)
            .field("database", &self.database)
            .field("schema", &self.schema)
            .field("base_url", &self.base_url)
            .field("max_polls", &self.max_polls)
            .finish()
    }
}

/// Picks the first non-empty value.
fn pick(primary: Option<String>, fallback: Option<String>) -> Option<String> {
    primary
        .filter(|v| !v.trim().is_empty())
        .or_else(|| fallback.filter(|v| !v.trim().is_empty()))
}

impl Config {
    /// Merges overrides over file settings and applies defaults.
    ///
    /// Fails if the account or token is missing, or if the poll cap is zero.
    pub fn resolve(overrides: ConfigOverrides, file: FileConfig) -> Result<Self> {
        let account = pick(overrides.account, file.account);
        let token = pick(overrides.token, file.token);

        let (Some(account), Some(token)) = (account, token) else {
            return Err(VqError::config(
                "SNOWFLAKE_ACCOUNT and SNOWFLAKE_PAT must be set.\n\n  \
                 export SNOWFLAKE_ACCOUNT='myorg-myaccount'\n  \
                 export SNOWFLAKE_PAT='your-programmatic-access-token'",
            ));
        };

        let max_polls = overrides.max_polls.or(file.max_polls);
        if max_polls == Some(0) {
            return Err(VqError::config(
                "max_polls must be at least 1; omit it to poll until the statement finishes",
            ));
        }

        let config = Self {
            account,
            token,
            warehouse: pick(overrides.warehouse, file.warehouse)
                .unwrap_or_else(|| DEFAULT_WAREHOUSE.to_string()),
            role: pick(overrides.role, file.role).unwrap_or_else(|| DEFAULT_ROLE.to_string()),
            semantic_view: pick(overrides.semantic_view, file.semantic_view)
                .unwrap_or_else(|| DEFAULT_SEMANTIC_VIEW.to_string()),
            database: pick(overrides.database, file.database)
                .unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
            schema: pick(overrides.schema, file.schema)
                .unwrap_or_else(|| DEFAULT_SCHEMA.to_string()),
            base_url: pick(overrides.base_url, file.base_url),
            max_polls,
            statement_timeout_secs: file
                .statement_timeout_secs
                .unwrap_or(DEFAULT_STATEMENT_TIMEOUT_SECS),
            request_timeout_secs: file
                .request_timeout_secs
                .unwrap_or(crate::api::DEFAULT_REQUEST_TIMEOUT_SECS),
            poll_interval: file
                .poll_interval_ms
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_POLL_INTERVAL),
        };

        // Surface a bad base URL before any request is attempted.
        config.endpoint()?;
        Ok(config)
    }

    /// Returns the account URL, e.g. `https://myorg-myaccount.snowflakecomputing.com`.
    pub fn account_url(&self) -> String {
        match &self.base_url {
            Some(base) => base.trim_end_matches('/').to_string(),
            None => format!("https://{}.snowflakecomputing.com", self.account),
        }
    }

    /// Returns the statements endpoint URL.
    pub fn endpoint(&self) -> Result<String> {
        let base = format!("{}/", self.account_url());
        let url = Url::parse(&base)
            .and_then(|u| u.join(STATEMENTS_PATH))
            .map_err(|e| VqError::config(format!("Invalid account URL '{}': {e}", base)))?;

        if url.scheme() != "https" && url.scheme() != "http" {
            return Err(VqError::config(format!(
                "Invalid scheme '{}'. Expected 'https' or 'http'",
                url.scheme()
            )));
        }

        Ok(url.to_string())
    }
}
