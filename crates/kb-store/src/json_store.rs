//! JSON data file persistence.

use crate::logbook::Logbook;
use crate::schema::{DataFile, Settings};
use crate::validate::validate_data;
use crate::{StoreError, StoreResult};
use std::fs;
use std::path::PathBuf;

/// Default file name, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "kombucha_data.json";

#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
    defaults: Settings,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            defaults: Settings::default(),
        }
    }

    /// Settings a brand new data file starts with.
    pub fn with_default_settings(mut self, defaults: Settings) -> Self {
        self.defaults = defaults;
        self
    }

    /// Load the logbook. A missing file is an empty logbook with the default settings.
    pub fn load(&self) -> StoreResult<Logbook> {
        if !self.path.exists() {
            tracing::info!(path = %self.path.display(), "no data file yet, starting empty");
            return Logbook::new(DataFile {
                batches: Vec::new(),
                settings: self.defaults.clone(),
            });
        }

        let content = fs::read_to_string(&self.path).map_err(|source| StoreError::Read {
            path: self.path.clone(),
            source,
        })?;
        let data: DataFile = serde_json::from_str(&content)?;
        let logbook = Logbook::new(data)?;
        tracing::info!(
            path = %self.path.display(),
            batches = logbook.batches().len(),
            "loaded data file"
        );
        Ok(logbook)
    }

    /// Write the logbook as pretty JSON, replacing the previous file in one step.
    pub fn save(&self, data: &DataFile) -> StoreResult<()> {
        validate_data(data)?;
        let json = serde_json::to_string_pretty(data)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|source| StoreError::Write {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json).map_err(|source| StoreError::Write {
            path: tmp_path.clone(),
            source,
        })?;
        fs::rename(&tmp_path, &self.path).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })?;

        tracing::info!(
            path = %self.path.display(),
            batches = data.batches.len(),
            "saved data file"
        );
        Ok(())
    }
}
