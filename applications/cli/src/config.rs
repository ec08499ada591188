/// CLI configuration
use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use userdir_client::ClientConfig;
use userdir_core::{FilterCriteria, DEFAULT_MAX_AGE, DEFAULT_MIN_AGE};

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "userdir.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CliConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_filters")]
    pub filters: FilterSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FilterSettings {
    #[serde(default = "default_min_age")]
    pub min_age: i32,

    #[serde(default = "default_max_age")]
    pub max_age: i32,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            filters: default_filters(),
        }
    }
}

impl CliConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; otherwise `userdir.toml` is read if present.
    /// `USERDIR_SERVER__BASE_URL` style variables override file values.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::Config(format!(
                        "config file not found: {}",
                        path.display()
                    )));
                }
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let config_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if config_path.exists() {
                    settings = settings.add_source(config::File::from(config_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("USERDIR")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.base_url.trim().is_empty() {
            return Err(CliError::Config(
                "server base URL is required (set USERDIR_SERVER__BASE_URL)".to_string(),
            ));
        }

        if self.server.timeout_secs == 0 || self.server.connect_timeout_secs == 0 {
            return Err(CliError::Config("timeouts must be positive".to_string()));
        }

        if self.filters.min_age > self.filters.max_age {
            return Err(CliError::Config(format!(
                "filters.min_age ({}) exceeds filters.max_age ({})",
                self.filters.min_age, self.filters.max_age
            )));
        }

        Ok(())
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.server.base_url.clone()).with_timeouts(
            Duration::from_secs(self.server.timeout_secs),
            Duration::from_secs(self.server.connect_timeout_secs),
        )
    }

    /// Criteria restored by "clear filters"
    pub fn default_criteria(&self) -> FilterCriteria {
        FilterCriteria::with_age_range(self.filters.min_age, self.filters.max_age)
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        base_url: default_base_url(),
        timeout_secs: default_timeout_secs(),
        connect_timeout_secs: default_connect_timeout_secs(),
    }
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_filters() -> FilterSettings {
    FilterSettings {
        min_age: default_min_age(),
        max_age: default_max_age(),
    }
}

fn default_min_age() -> i32 {
    DEFAULT_MIN_AGE
}

fn default_max_age() -> i32 {
    DEFAULT_MAX_AGE
}
