//! Data validation logic.

use crate::schema::{Batch, DataFile};
use std::collections::HashSet;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("A batch named '{name}' already exists")]
    DuplicateName { name: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

fn invalid(field: &str, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

pub fn validate_batch(batch: &Batch) -> Result<(), ValidationError> {
    if batch.name.trim().is_empty() {
        return Err(invalid("name", &batch.name, "must not be empty"));
    }
    if !batch.sugar_g.is_finite() || batch.sugar_g < 0.0 {
        return Err(invalid("sugar_g", batch.sugar_g, "must be non-negative"));
    }
    if !batch.volume_l.is_finite() || batch.volume_l <= 0.0 {
        return Err(invalid("volume_l", batch.volume_l, "must be positive"));
    }
    if let Some(bottling) = &batch.bottling {
        if bottling.date < batch.start_date {
            return Err(invalid(
                "bottling.date",
                bottling.date,
                "must not precede the start date",
            ));
        }
        if !bottling.added_sugar_g_per_l.is_finite() || bottling.added_sugar_g_per_l < 0.0 {
            return Err(invalid(
                "bottling.added_sugar_g_per_l",
                bottling.added_sugar_g_per_l,
                "must be non-negative",
            ));
        }
    }
    Ok(())
}

/// Batch names are unique ignoring case.
pub fn validate_data(data: &DataFile) -> Result<(), ValidationError> {
    let mut names = HashSet::new();
    for batch in &data.batches {
        validate_batch(batch)?;
        if !names.insert(batch.name.to_lowercase()) {
            return Err(ValidationError::DuplicateName {
                name: batch.name.clone(),
            });
        }
    }
    Ok(())
}
