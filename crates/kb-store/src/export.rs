//! CSV export of measurements and batch summaries.

use crate::StoreResult;
use crate::schema::Batch;
use std::io::Write;

/// Quote a field if it contains a delimiter, quote or line break.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn opt_num(v: Option<f64>) -> String {
    v.map(|x| x.to_string()).unwrap_or_default()
}

/// One row per measurement of `batch`, in recorded order.
pub fn write_measurements_csv<W: Write>(batch: &Batch, mut out: W) -> StoreResult<()> {
    writeln!(
        out,
        "date,phase,temperature_c,ph,carbonation,co2_g,completion_pct,pressure_atm"
    )?;
    for m in &batch.measurements {
        writeln!(
            out,
            "{},{},{},{},{},{:.4},{:.2},{:.4}",
            m.date,
            m.phase,
            m.temperature_c,
            opt_num(m.ph),
            csv_field(m.carbonation.as_deref().unwrap_or("")),
            m.co2_g,
            m.completion_pct,
            m.pressure_atm,
        )?;
    }
    Ok(())
}

/// One summary row per batch for side-by-side comparison.
pub fn write_comparison_csv<'a, W: Write>(
    batches: impl IntoIterator<Item = &'a Batch>,
    mut out: W,
) -> StoreResult<()> {
    writeln!(
        out,
        "name,tea_type,sugar_g,volume_l,start_date,phase,measurements,latest_completion_pct,latest_pressure_atm"
    )?;
    for batch in batches {
        let latest = batch.latest_measurement();
        writeln!(
            out,
            "{},{},{},{},{},{},{},{},{}",
            csv_field(&batch.name),
            csv_field(&batch.tea_type),
            batch.sugar_g,
            batch.volume_l,
            batch.start_date,
            batch.phase,
            batch.measurements.len(),
            latest
                .map(|m| format!("{:.2}", m.completion_pct))
                .unwrap_or_default(),
            latest
                .map(|m| format!("{:.4}", m.pressure_atm))
                .unwrap_or_default(),
        )?;
    }
    Ok(())
}
