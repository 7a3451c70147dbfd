mod app;
mod command;
mod config;
mod effects;
mod logging;
mod notifier;
mod render;

use std::io;

use farm_engine::GatewayError;
use farm_logging::farm_info;
use thiserror::Error;

use config::ConsoleConfig;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] config::ConfigError),
    #[error("backend settings: {0}")]
    Gateway(#[from] GatewayError),
    #[error("could not start: {0}")]
    Io(#[from] io::Error),
}

pub fn run() -> Result<(), AppError> {
    let path = config::config_path_from_env();
    let loaded = ConsoleConfig::load(&path)?;
    let found = loaded.is_some();
    let config = loaded.unwrap_or_default();

    logging::initialize(config.log_destination, config.level()?);
    if found {
        farm_info!("Loaded settings from {:?}", path);
    } else {
        farm_info!("No settings at {:?}; using defaults", path);
    }

    app::run_app(&config)
}
