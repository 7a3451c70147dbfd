use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use farm_engine::GatewaySettings;
use log::LevelFilter;
use serde::Deserialize;
use thiserror::Error;

use super::logging::LogDestination;

const DEFAULT_CONFIG_PATH: &str = "./farm_console.ron";
const CONFIG_ENV: &str = "FARM_CONSOLE_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not parse {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("invalid setting `{field}`: {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },
}

/// Settings read from `farm_console.ron`. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub base_url: String,
    pub api_prefix: String,
    pub poll_interval_ms: u64,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub log_level: String,
    pub log_destination: LogDestination,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        let gateway = GatewaySettings::default();
        Self {
            base_url: gateway.base_url,
            api_prefix: gateway.api_prefix,
            poll_interval_ms: farm_engine::DEFAULT_POLL_INTERVAL.as_millis() as u64,
            connect_timeout_secs: gateway.connect_timeout.as_secs(),
            request_timeout_secs: gateway.request_timeout.as_secs(),
            log_level: "info".to_string(),
            log_destination: LogDestination::default(),
        }
    }
}

impl ConsoleConfig {
    /// Reads the config at `path`; `Ok(None)` if there is no such file.
    pub fn load(path: &Path) -> Result<Option<Self>, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        let config: Self = ron::from_str(&content).map_err(|err| ConfigError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        config.validate()?;
        Ok(Some(config))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "poll_interval_ms",
                message: "must be greater than zero".to_string(),
            });
        }
        self.level()?;
        Ok(())
    }

    pub fn level(&self) -> Result<LevelFilter, ConfigError> {
        farm_logging::parse_level(&self.log_level).ok_or_else(|| ConfigError::Invalid {
            field: "log_level",
            message: format!("unknown level {:?}", self.log_level),
        })
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn gateway_settings(&self) -> GatewaySettings {
        GatewaySettings {
            base_url: self.base_url.clone(),
            api_prefix: self.api_prefix.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }
}

/// First command-line argument, else `$FARM_CONSOLE_CONFIG`, else
/// `./farm_console.ron`.
pub fn resolve_config_path(
    mut args: impl Iterator<Item = String>,
    env_value: Option<String>,
) -> PathBuf {
    args.next()
        .or(env_value)
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

pub fn config_path_from_env() -> PathBuf {
    resolve_config_path(std::env::args().skip(1), std::env::var(CONFIG_ENV).ok())
}
