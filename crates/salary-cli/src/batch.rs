//! CSV batch prediction.
//!
//! Input columns are matched to profile fields by name (case-insensitive);
//! other columns are carried through to the output untouched. Each output row
//! gets a `PredictedSalary` cell and, when that row failed, an `Error` cell.

use std::io::{Read, Write};

use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use tracing::{debug, info, warn};

use salary_core::{PredictError, SalaryPredictor};
use salary_model::{ProfileField, RawProfile};
use salary_transform::canonicalize;

pub const PREDICTION_COLUMN: &str = "PredictedSalary";
pub const ERROR_COLUMN: &str = "Error";

/// Counts reported after a batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub rows: usize,
    pub predicted: usize,
    pub failed: usize,
}

/// Maps header positions to profile fields.
fn field_columns(headers: &StringRecord) -> Vec<(usize, ProfileField)> {
    headers
        .iter()
        .enumerate()
        .filter_map(|(idx, name)| {
            let name = name.trim_matches('\u{feff}');
            match ProfileField::from_name(name) {
                Some(field) => Some((idx, field)),
                None => {
                    debug!(column = name, "ignoring non-profile column");
                    None
                }
            }
        })
        .collect()
}

/// Build a profile from one CSV record.
///
/// Employment cells may hold several `;`-separated selections in any order;
/// they are canonicalized the same way interactive selections are.
pub fn profile_from_record(record: &StringRecord, columns: &[(usize, ProfileField)]) -> RawProfile {
    let mut profile = RawProfile::new();
    for &(idx, field) in columns {
        let Some(cell) = record.get(idx) else {
            continue;
        };
        if cell.trim().is_empty() {
            continue;
        }
        match field {
            ProfileField::Employment => {
                profile.set_text(field, canonicalize(cell.split(';').map(str::trim)));
            }
            _ => profile.set_text(field, cell),
        }
    }
    profile
}

/// Predict every row of `input`, writing the annotated CSV to `output`.
///
/// Per-row prediction failures are recorded in the `Error` column. A missing
/// model aborts the run, since no row could succeed.
pub fn run_batch<R: Read, W: Write>(
    predictor: &SalaryPredictor,
    input: R,
    output: W,
) -> Result<BatchSummary> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);
    let headers = reader.headers().context("read csv headers")?.clone();
    let columns = field_columns(&headers);
    if columns.is_empty() {
        warn!("input has no profile columns; every row encodes to the baseline");
    }

    let mut writer = WriterBuilder::new().flexible(true).from_writer(output);
    let mut out_headers = headers.clone();
    out_headers.push_field(PREDICTION_COLUMN);
    out_headers.push_field(ERROR_COLUMN);
    writer
        .write_record(&out_headers)
        .context("write csv headers")?;

    let mut summary = BatchSummary::default();
    for (line, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("read csv record {}", line + 1))?;
        summary.rows += 1;
        let profile = profile_from_record(&record, &columns);
        let (salary, error) = match predictor.predict(&profile) {
            Ok(salary) => {
                summary.predicted += 1;
                (format!("{salary:.2}"), String::new())
            }
            Err(error @ PredictError::ModelUnavailable { .. }) => return Err(error.into()),
            Err(error) => {
                summary.failed += 1;
                warn!(row = line + 1, %error, "prediction failed");
                (String::new(), error.to_string())
            }
        };
        let mut out = record.clone();
        out.push_field(&salary);
        out.push_field(&error);
        writer
            .write_record(&out)
            .with_context(|| format!("write csv record {}", line + 1))?;
    }
    writer.flush().context("flush csv output")?;
    info!(
        rows = summary.rows,
        predicted = summary.predicted,
        failed = summary.failed,
        "batch complete"
    );
    Ok(summary)
}
