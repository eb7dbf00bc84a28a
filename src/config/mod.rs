//! Configuration management
//!
//! Settings come from, in increasing priority:
//! 1. Default values
//! 2. An optional YAML file
//! 3. Environment variables (a `.env` file is loaded first if present)
//!
//! The only setting without a default is the database URL, which normally
//! arrives through `DATABASE_URL`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::models::{DEFAULT_GHL_BASE_URL, DEFAULT_GHL_VERSION};
use crate::utils::{ProvisionError, ProvisionResult};

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "TENANT_PROVISIONER_CONFIG";

/// Main provisioner configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ProvisionConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub ghl: GhlDefaults,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    /// Create the database file if it does not exist (set by `--migrate`)
    #[serde(default)]
    pub create_if_missing: bool,
}

fn default_max_connections() -> u32 {
    1
}

fn default_connect_timeout() -> u64 {
    30
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            connect_timeout_secs: default_connect_timeout(),
            create_if_missing: false,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
    Compact,
}

impl LogFormat {
    fn from_env_value(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "json" => LogFormat::Json,
            "compact" => LogFormat::Compact,
            _ => LogFormat::Pretty,
        }
    }
}

/// Defaults offered at the GHL base URL and version prompts
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GhlDefaults {
    #[serde(default = "default_ghl_base_url")]
    pub base_url: String,
    #[serde(default = "default_ghl_version")]
    pub version: String,
}

fn default_ghl_base_url() -> String {
    DEFAULT_GHL_BASE_URL.to_string()
}

fn default_ghl_version() -> String {
    DEFAULT_GHL_VERSION.to_string()
}

impl Default for GhlDefaults {
    fn default() -> Self {
        Self {
            base_url: default_ghl_base_url(),
            version: default_ghl_version(),
        }
    }
}

impl ProvisionConfig {
    /// Load configuration from an optional file and the environment.
    ///
    /// `explicit_path` (from `--config`) wins over `TENANT_PROVISIONER_CONFIG`,
    /// which wins over the standard locations. An explicit path that does not
    /// exist is an error; a missing standard file is not.
    pub fn load(explicit_path: Option<&Path>) -> ProvisionResult<Self> {
        let _ = dotenvy::dotenv();

        let explicit = explicit_path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from));

        let mut config = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(ProvisionError::config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                Self::from_file(&path)?
            }
            None => match Self::find_config_file() {
                Some(path) => Self::from_file(&path)?,
                None => ProvisionConfig::default(),
            },
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Parse a YAML config file
    pub fn from_file(path: &Path) -> ProvisionResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ProvisionError::config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;
        serde_norway::from_str(&contents).map_err(|e| {
            ProvisionError::config(format!("Failed to parse config file {}: {}", path.display(), e))
        })
    }

    /// Find the configuration file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        let paths = [
            PathBuf::from("tenant-provisioner.yaml"),
            PathBuf::from("config/tenant-provisioner.yaml"),
            PathBuf::from("/etc/tenant-provisioner/config.yaml"),
        ];

        paths.into_iter().find(|p| p.exists())
    }

    /// Apply environment variable overrides using `lookup` to read variables
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("DATABASE_URL") {
            self.database.url = url;
        }

        if let Some(level) = lookup("RUST_LOG") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("TENANT_PROVISIONER_LOG_FORMAT") {
            self.logging.format = LogFormat::from_env_value(&format);
        }

        if let Some(base_url) = lookup("GHL_BASE_URL").filter(|v| !v.trim().is_empty()) {
            self.ghl.base_url = base_url;
        }
        if let Some(version) = lookup("GHL_VERSION").filter(|v| !v.trim().is_empty()) {
            self.ghl.version = version;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> ProvisionResult<()> {
        if self.database.url.trim().is_empty() {
            return Err(ProvisionError::config(
                "DATABASE_URL is not set (export it or add database.url to the config file)",
            ));
        }
        if self.database.max_connections == 0 {
            return Err(ProvisionError::config(
                "database.max_connections must be at least 1",
            ));
        }
        Ok(())
    }
}
