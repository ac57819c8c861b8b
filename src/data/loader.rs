//! CSV Data Loader Module
//! Reads the population CSV into a Polars DataFrame.

use polars::prelude::*;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("The file '{}' was not found.", path.display())]
    DataNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
}

/// Handles CSV file loading with Polars.
pub struct DataLoader {
    df: Option<DataFrame>,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    pub fn new() -> Self {
        Self { df: None }
    }

    /// Load a CSV file using Polars.
    ///
    /// A missing path, a directory, or a file that cannot be opened is
    /// reported as [`LoaderError::DataNotFound`].
    pub fn load_csv(&mut self, file_path: &Path) -> Result<&DataFrame, LoaderError> {
        Self::check_readable(file_path)?;

        let df = LazyCsvReader::new(file_path)
            .with_has_header(true)
            .with_infer_schema_length(Some(10000))
            .finish()?
            .collect()?;

        tracing::debug!(
            path = %file_path.display(),
            rows = df.height(),
            "CSV parsed"
        );

        let df: &DataFrame = self.df.insert(df);
        Ok(df)
    }

    fn check_readable(file_path: &Path) -> Result<(), LoaderError> {
        let not_found = |source: io::Error| LoaderError::DataNotFound {
            path: file_path.to_path_buf(),
            source,
        };

        let metadata = std::fs::metadata(file_path).map_err(not_found)?;
        if !metadata.is_file() {
            return Err(not_found(io::Error::new(
                io::ErrorKind::InvalidInput,
                "not a regular file",
            )));
        }
        std::fs::File::open(file_path).map_err(not_found)?;
        Ok(())
    }

    /// Get list of column names from loaded DataFrame.
    pub fn get_columns(&self) -> Vec<String> {
        self.df
            .as_ref()
            .map(|df| {
                df.get_column_names()
                    .iter()
                    .map(|s| s.to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Get the number of rows in the DataFrame.
    pub fn get_row_count(&self) -> usize {
        self.df.as_ref().map(|df| df.height()).unwrap_or(0)
    }

    /// Take ownership of the loaded DataFrame, leaving the loader empty.
    pub fn take_dataframe(&mut self) -> Option<DataFrame> {
        self.df.take()
    }
}
