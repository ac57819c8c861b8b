//! CSV export of the selected year.

use super::SelectedYearView;
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CSV_MIME: &str = "text/csv";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to encode CSV: {0}")]
    Encode(#[from] PolarsError),
    #[error("Failed to write export: {0}")]
    Io(#[from] std::io::Error),
}

/// A downloadable CSV artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    pub file_name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

pub struct CsvExporter;

impl CsvExporter {
    pub fn file_name(year: i64) -> String {
        format!("us_population_{}.csv", year)
    }

    /// Encode the view as CSV: header row, then one line per row, no index.
    pub fn export(view: &SelectedYearView) -> Result<CsvExport, ExportError> {
        let mut frame = view.frame().clone();
        let mut bytes = Vec::new();
        CsvWriter::new(&mut bytes)
            .include_header(true)
            .finish(&mut frame)?;

        Ok(CsvExport {
            file_name: Self::file_name(view.year()),
            mime: CSV_MIME,
            bytes,
        })
    }

    /// Write the export into `dir` under its own file name.
    pub fn write_to(export: &CsvExport, dir: &Path) -> Result<PathBuf, ExportError> {
        let path = dir.join(&export.file_name);
        Self::write_file(export, &path)?;
        Ok(path)
    }

    /// Write the export to an exact path (used by the save dialog).
    pub fn write_file(export: &CsvExport, path: &Path) -> Result<(), ExportError> {
        std::fs::write(path, &export.bytes)?;
        tracing::info!(
            path = %path.display(),
            bytes = export.bytes.len(),
            "CSV exported"
        );
        Ok(())
    }
}
