//! In-memory batch logbook.
//!
//! All mutations validate before touching state, so a rejected call leaves the
//! logbook exactly as it was.

use crate::schema::{Batch, Bottling, DataFile, Measurement, Phase, Settings};
use crate::validate::{ValidationError, validate_batch, validate_data};
use crate::{StoreError, StoreResult};
use chrono::NaiveDate;
use kb_core::Real;
use kb_model::{BatchInputs, estimate_batch};

/// Observed values for a new measurement.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementInput {
    pub date: NaiveDate,
    pub temperature_c: Real,
    pub ph: Option<Real>,
    pub carbonation: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Logbook {
    data: DataFile,
}

impl Logbook {
    pub fn new(data: DataFile) -> StoreResult<Self> {
        validate_data(&data)?;
        Ok(Self { data })
    }

    pub fn data(&self) -> &DataFile {
        &self.data
    }

    pub fn batches(&self) -> &[Batch] {
        &self.data.batches
    }

    pub fn settings(&self) -> &Settings {
        &self.data.settings
    }

    pub(crate) fn settings_mut(&mut self) -> &mut Settings {
        &mut self.data.settings
    }

    pub fn update_settings(&mut self, settings: Settings) {
        tracing::debug!(
            warning_atm = settings.thresholds.warning_atm(),
            danger_atm = settings.thresholds.danger_atm(),
            "settings updated"
        );
        self.data.settings = settings;
    }

    /// Case-insensitive lookup.
    pub fn find(&self, name: &str) -> Option<&Batch> {
        self.data.batches.iter().find(|b| b.name_matches(name))
    }

    fn find_mut(&mut self, name: &str) -> StoreResult<&mut Batch> {
        self.data
            .batches
            .iter_mut()
            .find(|b| b.name_matches(name))
            .ok_or_else(|| StoreError::BatchNotFound {
                name: name.to_string(),
            })
    }

    pub fn add_batch(&mut self, batch: Batch) -> StoreResult<()> {
        validate_batch(&batch)?;
        if self.find(&batch.name).is_some() {
            return Err(ValidationError::DuplicateName { name: batch.name }.into());
        }
        tracing::info!(name = %batch.name, sugar_g = batch.sugar_g, volume_l = batch.volume_l, "batch added");
        self.data.batches.push(batch);
        Ok(())
    }

    pub fn remove_batch(&mut self, name: &str) -> StoreResult<Batch> {
        let index = self
            .data
            .batches
            .iter()
            .position(|b| b.name_matches(name))
            .ok_or_else(|| StoreError::BatchNotFound {
                name: name.to_string(),
            })?;
        let batch = self.data.batches.remove(index);
        tracing::info!(name = %batch.name, "batch removed");
        Ok(batch)
    }

    /// Run the estimation engine on a new reading and append the result.
    ///
    /// Elapsed days count from the start of the batch's current phase.
    pub fn record_measurement(
        &mut self,
        name: &str,
        input: MeasurementInput,
    ) -> StoreResult<&Measurement> {
        if !input.temperature_c.is_finite() {
            return Err(ValidationError::InvalidValue {
                field: "temperature_c".to_string(),
                value: input.temperature_c.to_string(),
                reason: "must be finite".to_string(),
            }
            .into());
        }
        if let Some(ph) = input.ph {
            if !(0.0..=14.0).contains(&ph) {
                return Err(ValidationError::InvalidValue {
                    field: "ph".to_string(),
                    value: ph.to_string(),
                    reason: "must be within 0..14".to_string(),
                }
                .into());
            }
        }

        let batch = self.find_mut(name)?;
        let days = batch.days_in_phase(input.date) as Real;
        let inputs = BatchInputs::new(batch.sugar_g, days)
            .with_temperature(input.temperature_c)
            .with_volume(batch.volume_l);
        let estimate = estimate_batch(&inputs);

        tracing::debug!(
            name = %batch.name,
            phase = %batch.phase,
            days,
            pressure_atm = estimate.pressure_atm,
            "measurement recorded"
        );

        batch.measurements.push(Measurement {
            date: input.date,
            temperature_c: input.temperature_c,
            ph: input.ph,
            carbonation: input.carbonation,
            phase: batch.phase,
            co2_g: estimate.co2_g,
            completion_pct: estimate.completion_pct,
            pressure_atm: estimate.pressure_atm,
        });

        let last = batch.measurements.len() - 1;
        Ok(&batch.measurements[last])
    }

    /// Seal the batch into bottles.
    pub fn move_to_secondary(&mut self, name: &str, bottling: Bottling) -> StoreResult<()> {
        let batch = self.find_mut(name)?;
        let mut updated = batch.clone();
        updated.phase = Phase::Secondary;
        updated.bottling = Some(bottling);
        validate_batch(&updated)?;

        tracing::info!(name = %updated.name, "batch moved to secondary fermentation");
        *batch = updated;
        Ok(())
    }
}
