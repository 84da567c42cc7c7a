//! CSV input and JSON-lines output for the job binary

use crate::error::JobError;
use crate::models::DailyMetric;
use serde::Serialize;
use std::io::{Read, Write};
use std::path::Path;
use tracing::{info, warn};

/// Read daily metric rows from CSV with a header line
///
/// Empty cells become missing values. Rows that fail to parse are skipped
/// with a warning so one bad export line does not sink the nightly run.
pub fn read_daily_metrics<R: Read>(reader: R) -> Result<Vec<DailyMetric>, JobError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for (line, record) in csv_reader.deserialize::<DailyMetric>().enumerate() {
        match record {
            Ok(row) => rows.push(row),
            Err(err) => {
                skipped += 1;
                // +2: header line, 1-based numbering
                warn!(line = line + 2, error = %err, "Skipping malformed daily metric row");
            }
        }
    }

    info!(rows = rows.len(), skipped, "Read daily metrics");
    Ok(rows)
}

/// Read daily metric rows from a CSV file
pub fn read_daily_metrics_file(path: impl AsRef<Path>) -> Result<Vec<DailyMetric>, JobError> {
    let file = std::fs::File::open(path)?;
    read_daily_metrics(file)
}

/// Write one JSON document per line
pub fn write_json_lines<W: Write, T: Serialize>(
    mut writer: W,
    records: &[T],
) -> Result<(), JobError> {
    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}
