//! kb-store: batch logbook, persistence and export.

pub mod alerts;
pub mod export;
pub mod json_store;
pub mod logbook;
pub mod schema;
pub mod validate;

pub use alerts::{check_alerts, latest_alerts, should_check_alerts};
pub use export::{write_comparison_csv, write_measurements_csv};
pub use json_store::JsonStore;
pub use logbook::{Logbook, MeasurementInput};
pub use schema::*;
pub use validate::{ValidationError, validate_batch, validate_data};

use std::path::PathBuf;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("Failed to read data file: {path}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write data file: {path}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Batch not found: {name}")]
    BatchNotFound { name: String },

    #[error("Estimation error: {0}")]
    Model(#[from] kb_model::ModelError),
}
