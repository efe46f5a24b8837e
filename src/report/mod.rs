//! Batch report export.
//!
//! Serializes [`ImageResult`] records row-per-image. The record's field
//! names become CSV column headers and JSON keys directly; this module
//! adds no interpretation of the scores.

use crate::analysis::ImageResult;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while exporting a report.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("csv export failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("json export failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Writes results as CSV with a header row.
pub fn write_csv(results: &[ImageResult], out: &mut dyn Write) -> Result<(), ReportError> {
    let mut writer = csv::Writer::from_writer(out);
    for result in results {
        writer.serialize(result)?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes results as a pretty-printed JSON array.
pub fn write_json(results: &[ImageResult], out: &mut dyn Write) -> Result<(), ReportError> {
    serde_json::to_writer_pretty(&mut *out, results)?;
    out.write_all(b"\n")?;
    Ok(())
}

/// Writes a CSV report to a file.
pub fn export_csv(results: &[ImageResult], path: &Path) -> Result<(), ReportError> {
    let mut file = std::fs::File::create(path)?;
    write_csv(results, &mut file)?;
    tracing::info!(path = %path.display(), rows = results.len(), "wrote CSV report");
    Ok(())
}

/// Writes a JSON report to a file.
pub fn export_json(results: &[ImageResult], path: &Path) -> Result<(), ReportError> {
    let mut file = std::fs::File::create(path)?;
    write_json(results, &mut file)?;
    tracing::info!(path = %path.display(), rows = results.len(), "wrote JSON report");
    Ok(())
}
