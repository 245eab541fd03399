//! CSV adapters for simulation results.
//!
//! Layouts:
//! - factor: `time_step,asset_0,...,asset_{N-1},cumulative_factor_level`
//! - heston: `time_step,price,variance`, rows `0..=steps`
//! - correlated: `time_step,increment_0,...,level_0,...`
//! - panel: `time_step,price_0,...,price_{N-1},variance_0,...`, rows `0..=steps`
//!
//! The Heston command consumes the *last* column of a factor file, so any
//! file whose rows end with the series to use as increments is accepted.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use synth_models::factor::{CorrelatedFactorPaths, FactorPathResult};
use synth_models::heston::{HestonPanelResult, HestonPathResult};

use crate::error::{CliError, Result};

/// Minimum column count of a factor row: time step, one asset, level.
pub const MIN_FACTOR_COLUMNS: usize = 3;

/// Render a value with optional fixed precision.
pub fn format_value(value: f64, precision: Option<usize>) -> String {
    match precision {
        Some(digits) => format!("{:.*}", digits, value),
        None => value.to_string(),
    }
}

/// Create `path` for writing, creating missing parent directories.
pub fn create_output(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(File::create(path)?)
}

/// Write the factor CSV.
pub fn write_factor_csv<W: Write>(
    writer: W,
    result: &FactorPathResult,
    precision: Option<usize>,
) -> Result<()> {
    let assets = result.asset_returns.nrows();
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = Vec::with_capacity(assets + 2);
    header.push("time_step".to_string());
    header.extend((0..assets).map(|a| format!("asset_{}", a)));
    header.push("cumulative_factor_level".to_string());
    wtr.write_record(&header)?;

    for t in 0..result.duration() {
        let mut record = Vec::with_capacity(assets + 2);
        record.push(t.to_string());
        record.extend((0..assets).map(|a| format_value(result.asset_returns.get(a, t), precision)));
        record.push(format_value(result.factor_levels[t], precision));
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write the Heston CSV.
pub fn write_heston_csv<W: Write>(
    writer: W,
    result: &HestonPathResult,
    precision: Option<usize>,
) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["time_step", "price", "variance"])?;

    for (t, (price, variance)) in result.prices.iter().zip(&result.variances).enumerate() {
        wtr.write_record([
            t.to_string(),
            format_value(*price, precision),
            format_value(*variance, precision),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write the correlated-factor CSV.
pub fn write_correlated_csv<W: Write>(
    writer: W,
    paths: &CorrelatedFactorPaths,
    precision: Option<usize>,
) -> Result<()> {
    let factors = paths.increments.ncols();
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = vec!["time_step".to_string()];
    header.extend((0..factors).map(|k| format!("increment_{}", k)));
    header.extend((0..factors).map(|k| format!("level_{}", k)));
    wtr.write_record(&header)?;

    for (t, (increments, levels)) in paths.increments.rows().zip(paths.levels.rows()).enumerate() {
        let mut record = Vec::with_capacity(1 + 2 * factors);
        record.push(t.to_string());
        record.extend(increments.iter().map(|v| format_value(*v, precision)));
        record.extend(levels.iter().map(|v| format_value(*v, precision)));
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write the Heston panel CSV.
pub fn write_panel_csv<W: Write>(
    writer: W,
    result: &HestonPanelResult,
    precision: Option<usize>,
) -> Result<()> {
    let stocks = result.stocks();
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = vec!["time_step".to_string()];
    header.extend((0..stocks).map(|i| format!("price_{}", i)));
    header.extend((0..stocks).map(|i| format!("variance_{}", i)));
    wtr.write_record(&header)?;

    for (t, (prices, variances)) in result.prices.rows().zip(result.variances.rows()).enumerate() {
        let mut record = Vec::with_capacity(1 + 2 * stocks);
        record.push(t.to_string());
        record.extend(prices.iter().map(|v| format_value(*v, precision)));
        record.extend(variances.iter().map(|v| format_value(*v, precision)));
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Read the last column of the first `rows` data rows of a factor CSV.
///
/// # Errors
///
/// - `MalformedRow` for a row with fewer than [`MIN_FACTOR_COLUMNS`] fields
///   or a last field that is not a finite number
/// - `InsufficientData` when the file ends before `rows` data rows
pub fn read_factor_column<R: Read>(reader: R, rows: usize) -> Result<Vec<f64>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut values = Vec::with_capacity(rows);
    for (row, record) in rdr.records().take(rows).enumerate() {
        let record = record?;
        if record.len() < MIN_FACTOR_COLUMNS {
            return Err(CliError::malformed_row(
                row,
                format!(
                    "expected at least {} columns, got {}",
                    MIN_FACTOR_COLUMNS,
                    record.len()
                ),
            ));
        }

        let field = record.get(record.len() - 1).unwrap_or_default();
        let value = field
            .parse::<f64>()
            .map_err(|e| CliError::malformed_row(row, format!("'{}': {}", field, e)))?;
        if !value.is_finite() {
            return Err(CliError::malformed_row(
                row,
                format!("'{}' is not a finite value", field),
            ));
        }
        values.push(value);
    }

    if values.len() < rows {
        return Err(CliError::InsufficientData {
            expected: rows,
            found: values.len(),
        });
    }

    Ok(values)
}
