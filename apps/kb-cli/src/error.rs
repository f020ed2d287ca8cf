//! Error type for the command-line front end.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Failed to read config file: {path}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error(transparent)]
    Core(#[from] kb_core::KbError),

    #[error("Store error: {0}")]
    Store(#[from] kb_store::StoreError),

    #[error("Estimation error: {0}")]
    Model(#[from] kb_model::ModelError),

    #[error("Sensor error: {0}")]
    Sensor(#[from] kb_sensors::SensorError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type CliResult<T> = Result<T, CliError>;
