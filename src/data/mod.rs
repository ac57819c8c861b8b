//! Data module - CSV loading, normalization, filtering and export

mod export;
mod loader;
mod processor;

#[cfg(test)]
pub(crate) mod fixtures;

pub use export::{CsvExport, CsvExporter, ExportError};
pub use loader::{DataLoader, LoaderError};
pub use processor::{DataProcessor, ProcessorError, SelectedYearView, YEAR_COL};
