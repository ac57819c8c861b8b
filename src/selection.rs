//! Selection state: the year and color theme for one render pass.

use crate::data::{ProcessorError, YEAR_COL};
use clap::ValueEnum;
use polars::prelude::*;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Year {0} is not present in the data")]
    UnknownYear(i64),
    #[error("The data contains no years to select")]
    NoYears,
}

/// Named continuous color scale used by both charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorTheme {
    #[default]
    Blues,
    Cividis,
    Greens,
    Inferno,
    Magma,
    Plasma,
    Reds,
    Rainbow,
    Turbo,
    Viridis,
}

impl ColorTheme {
    /// Selector order.
    pub const ALL: [ColorTheme; 10] = [
        ColorTheme::Blues,
        ColorTheme::Cividis,
        ColorTheme::Greens,
        ColorTheme::Inferno,
        ColorTheme::Magma,
        ColorTheme::Plasma,
        ColorTheme::Reds,
        ColorTheme::Rainbow,
        ColorTheme::Turbo,
        ColorTheme::Viridis,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ColorTheme::Blues => "blues",
            ColorTheme::Cividis => "cividis",
            ColorTheme::Greens => "greens",
            ColorTheme::Inferno => "inferno",
            ColorTheme::Magma => "magma",
            ColorTheme::Plasma => "plasma",
            ColorTheme::Reds => "reds",
            ColorTheme::Rainbow => "rainbow",
            ColorTheme::Turbo => "turbo",
            ColorTheme::Viridis => "viridis",
        }
    }
}

impl fmt::Display for ColorTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The user's choices for one render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub year: i64,
    pub theme: ColorTheme,
}

/// The years a user may pick, most recent first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct YearOptions {
    years: Vec<i64>,
}

impl YearOptions {
    pub fn new(mut years: Vec<i64>) -> Self {
        years.sort_unstable_by(|a, b| b.cmp(a));
        years.dedup();
        Self { years }
    }

    /// Distinct values of the `Year` column.
    pub fn from_frame(df: &DataFrame) -> Result<Self, ProcessorError> {
        let years = df
            .column(YEAR_COL)
            .map_err(|_| ProcessorError::MissingColumn(YEAR_COL.to_string()))?
            .cast(&DataType::Int64)?;
        let years: Vec<i64> = years.i64()?.into_iter().flatten().collect();
        Ok(Self::new(years))
    }

    pub fn years(&self) -> &[i64] {
        &self.years
    }

    pub fn contains(&self, year: i64) -> bool {
        self.years.contains(&year)
    }

    /// The earliest year, listed last.
    pub fn default_year(&self) -> Option<i64> {
        self.years.last().copied()
    }

    /// Validate a requested year, falling back to the default when none is
    /// given.
    pub fn resolve(&self, requested: Option<i64>) -> Result<i64, SelectionError> {
        match requested {
            Some(year) if self.contains(year) => Ok(year),
            Some(year) => Err(SelectionError::UnknownYear(year)),
            None => self.default_year().ok_or(SelectionError::NoYears),
        }
    }
}
