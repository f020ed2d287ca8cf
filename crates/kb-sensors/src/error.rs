//! Sensor errors.

use std::path::PathBuf;
use thiserror::Error;

pub type SensorResult<T> = Result<T, SensorError>;

#[derive(Error, Debug)]
pub enum SensorError {
    #[error("I/O error reading {path}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("No one-wire thermometer found under {root}")]
    NoDevice { root: PathBuf },

    #[error("Thermometer CRC check failed")]
    CrcMismatch,

    #[error("Could not parse sensor output: {what}")]
    Parse { what: String },

    #[error("Analog channel error: {message}")]
    Channel { message: String },
}
