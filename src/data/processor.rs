//! Data Processor Module
//! Column normalization and the year filter/sort stage.

use polars::prelude::*;
use thiserror::Error;

pub const YEAR_COL: &str = "Year";
pub const POPULATION_COL: &str = "Population";
pub const STATE_COL: &str = "states";

/// Legacy lowercase names and their canonical replacements.
const COLUMN_RENAMES: [(&str, &str); 2] = [("year", YEAR_COL), ("population", POPULATION_COL)];

const REQUIRED_COLUMNS: [&str; 3] = [YEAR_COL, STATE_COL, POPULATION_COL];

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Required column '{0}' is missing from the data")]
    MissingColumn(String),
}

/// One (state, year, population) observation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopulationRecord {
    pub state: String,
    pub year: i64,
    pub population: i64,
}

/// Rows of the source table for one year, largest population first.
#[derive(Debug, Clone)]
pub struct SelectedYearView {
    year: i64,
    frame: DataFrame,
    records: Vec<PopulationRecord>,
}

impl SelectedYearView {
    pub fn year(&self) -> i64 {
        self.year
    }

    /// All normalized columns, in view order. This is what gets exported.
    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    /// Typed rows for charting. Rows with a null state or population are
    /// not included.
    pub fn records(&self) -> &[PopulationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.frame.height()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }
}

/// Handles data cleaning and filtering operations.
pub struct DataProcessor;

impl DataProcessor {
    /// Bring a raw table to the canonical schema.
    ///
    /// `year`/`population` become `Year`/`Population` unless the canonical
    /// name is already taken, and index-artifact columns are dropped. Every
    /// other column is kept in place.
    pub fn normalize_columns(df: &DataFrame) -> Result<DataFrame, ProcessorError> {
        let artifacts: Vec<String> = df
            .get_columns()
            .iter()
            .filter(|column| Self::is_index_artifact(column))
            .map(|column| column.name().to_string())
            .collect();

        let mut normalized = df.clone();
        for name in &artifacts {
            tracing::debug!(column = %name, "Dropping index column");
            normalized = normalized.drop(name)?;
        }

        for (legacy, canonical) in COLUMN_RENAMES {
            if Self::has_column(&normalized, legacy) && !Self::has_column(&normalized, canonical) {
                normalized.rename(legacy, canonical.into())?;
                // `rename` leaves the cached schema on the old name.
                normalized.clear_schema();
            }
        }

        Ok(normalized)
    }

    /// A column with no semantic name that only carries row numbers from an
    /// earlier export.
    fn is_index_artifact(column: &Column) -> bool {
        let name = column.name().as_str();
        if name.trim().is_empty() || name.starts_with("Unnamed:") {
            return true;
        }

        // Blank headers come back from the reader as `column_<n>`.
        let is_placeholder = name
            .strip_prefix("column_")
            .is_some_and(|n| n.parse::<usize>().is_ok());
        is_placeholder && Self::is_row_number_sequence(column)
    }

    fn is_row_number_sequence(column: &Column) -> bool {
        let Ok(values) = column.cast(&DataType::Int64) else {
            return false;
        };
        let Ok(values) = values.i64() else {
            return false;
        };
        let is_sequence = values
            .into_iter()
            .enumerate()
            .all(|(i, v)| v == Some(i as i64));
        is_sequence
    }

    fn has_column(df: &DataFrame, name: &str) -> bool {
        df.column(name).is_ok()
    }

    /// Check that the columns the dashboard reads are present.
    pub fn require_columns(df: &DataFrame) -> Result<(), ProcessorError> {
        match REQUIRED_COLUMNS
            .iter()
            .find(|name| !Self::has_column(df, name))
        {
            Some(missing) => Err(ProcessorError::MissingColumn(missing.to_string())),
            None => Ok(()),
        }
    }

    /// Rows where `Year == year`, sorted by `Population` descending.
    ///
    /// The sort is stable, so states with equal population keep their source
    /// order. A year with no rows gives an empty view.
    pub fn select_year(df: &DataFrame, year: i64) -> Result<SelectedYearView, ProcessorError> {
        Self::require_columns(df)?;

        let frame = df
            .clone()
            .lazy()
            .filter(col(YEAR_COL).cast(DataType::Int64).eq(lit(year)))
            .sort(
                [POPULATION_COL],
                SortMultipleOptions::default()
                    .with_order_descending(true)
                    .with_maintain_order(true),
            )
            .collect()?;

        let records = Self::extract_records(&frame)?;

        Ok(SelectedYearView {
            year,
            frame,
            records,
        })
    }

    fn extract_records(frame: &DataFrame) -> Result<Vec<PopulationRecord>, ProcessorError> {
        let states = frame.column(STATE_COL)?.cast(&DataType::String)?;
        let states = states.str()?;
        let years = frame.column(YEAR_COL)?.cast(&DataType::Int64)?;
        let years = years.i64()?;
        let populations = frame.column(POPULATION_COL)?.cast(&DataType::Int64)?;
        let populations = populations.i64()?;

        let mut records = Vec::with_capacity(frame.height());
        for i in 0..frame.height() {
            if let (Some(state), Some(year), Some(population)) =
                (states.get(i), years.get(i), populations.get(i))
            {
                records.push(PopulationRecord {
                    state: state.to_string(),
                    year,
                    population,
                });
            }
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{fixtures, DataLoader};

    fn column_names(df: &DataFrame) -> Vec<String> {
        df.get_column_names().iter().map(|s| s.to_string()).collect()
    }

    fn sample_source() -> DataFrame {
        let file = fixtures::write_sample_csv();
        let mut loader = DataLoader::new();
        let raw = loader.load_csv(file.path()).unwrap().clone();
        DataProcessor::normalize_columns(&raw).unwrap()
    }

    #[test]
    fn test_normalize_loaded_csv() {
        let df = sample_source();
        assert_eq!(
            column_names(&df),
            vec!["states", "states_code", "id", "Year", "Population"]
        );
        assert_eq!(df.height(), fixtures::SAMPLE_ROWS);
    }

    #[test]
    fn test_normalized_schema_uses_canonical_names() {
        let df = sample_source();

        let schema = df.schema();
        assert!(schema.contains(YEAR_COL));
        assert!(schema.contains(POPULATION_COL));
        assert!(!schema.contains("year"));
        assert!(!schema.contains("population"));

        // The lazy plan resolves columns through the schema.
        let years = df
            .clone()
            .lazy()
            .select([col(YEAR_COL)])
            .collect()
            .unwrap();
        assert_eq!(years.height(), fixtures::SAMPLE_ROWS);
    }

    #[test]
    fn test_normalize_renames_and_drops_unnamed() {
        let df = df!(
            "Unnamed: 0" => [0i64, 1],
            "states" => ["Ohio", "Utah"],
            "year" => [2010i64, 2010],
            "population" => [11536725i64, 2775332],
        )
        .unwrap();

        let normalized = DataProcessor::normalize_columns(&df).unwrap();

        assert_eq!(column_names(&normalized), vec!["states", "Year", "Population"]);
    }

    #[test]
    fn test_normalize_leaves_missing_columns_alone() {
        let df = df!("states" => ["Ohio"], "pop" => [1i64]).unwrap();

        let normalized = DataProcessor::normalize_columns(&df).unwrap();

        assert_eq!(column_names(&normalized), vec!["states", "pop"]);
        assert!(matches!(
            DataProcessor::require_columns(&normalized),
            Err(ProcessorError::MissingColumn(name)) if name == YEAR_COL
        ));
    }

    #[test]
    fn test_normalize_keeps_existing_canonical_column() {
        let df = df!(
            "states" => ["Ohio"],
            "Year" => [2010i64],
            "year" => [1999i64],
            "Population" => [5i64],
        )
        .unwrap();

        let normalized = DataProcessor::normalize_columns(&df).unwrap();

        assert_eq!(
            column_names(&normalized),
            vec!["states", "Year", "year", "Population"]
        );
    }

    #[test]
    fn test_placeholder_column_kept_unless_row_numbers() {
        let df = df!(
            "column_1" => [7i64, 3],
            "states" => ["Ohio", "Utah"],
        )
        .unwrap();
        let normalized = DataProcessor::normalize_columns(&df).unwrap();
        assert_eq!(column_names(&normalized), vec!["column_1", "states"]);

        let df = df!(
            "column_1" => [0i64, 1],
            "states" => ["Ohio", "Utah"],
        )
        .unwrap();
        let normalized = DataProcessor::normalize_columns(&df).unwrap();
        assert_eq!(column_names(&normalized), vec!["states"]);
    }

    #[test]
    fn test_select_year_filters_and_sorts() {
        let df = sample_source();

        let view = DataProcessor::select_year(&df, 2015).unwrap();

        assert_eq!(view.year(), 2015);
        assert_eq!(view.len(), 5);
        assert!(view.records().iter().all(|r| r.year == 2015));
        let states: Vec<&str> = view.records().iter().map(|r| r.state.as_str()).collect();
        assert_eq!(
            states,
            vec!["California", "Texas", "New York", "Alabama", "Wyoming"]
        );
        assert!(view
            .records()
            .windows(2)
            .all(|pair| pair[0].population >= pair[1].population));
    }

    #[test]
    fn test_largest_state_first() {
        let df = sample_source();

        let view = DataProcessor::select_year(&df, 2019).unwrap();

        assert_eq!(
            view.records()[0],
            PopulationRecord {
                state: "California".to_string(),
                year: 2019,
                population: 39512223,
            }
        );
    }

    #[test]
    fn test_select_missing_year_is_empty() {
        let df = sample_source();

        let view = DataProcessor::select_year(&df, 2012).unwrap();

        assert!(view.is_empty());
        assert!(view.records().is_empty());
        assert_eq!(
            column_names(view.frame()),
            vec!["states", "states_code", "id", "Year", "Population"]
        );
    }

    #[test]
    fn test_select_year_ties_keep_source_order() {
        let df = df!(
            "states" => ["A", "B", "C", "D"],
            "Year" => [2019i64, 2019, 2019, 2019],
            "Population" => [5i64, 9, 5, 5],
        )
        .unwrap();

        let view = DataProcessor::select_year(&df, 2019).unwrap();

        let states: Vec<&str> = view.records().iter().map(|r| r.state.as_str()).collect();
        assert_eq!(states, vec!["B", "A", "C", "D"]);
    }

    #[test]
    fn test_select_year_skips_null_rows_for_charting() {
        let df = df!(
            "states" => [Some("A"), None, Some("C")],
            "Year" => [2019i64, 2019, 2019],
            "Population" => [Some(1i64), Some(2), None],
        )
        .unwrap();

        let view = DataProcessor::select_year(&df, 2019).unwrap();

        assert_eq!(view.len(), 3);
        assert_eq!(view.records().len(), 1);
        assert_eq!(view.records()[0].state, "A");
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn rows_strategy() -> impl Strategy<Value = Vec<(i64, i64)>> {
            prop::collection::vec((2010i64..2014, 0i64..50), 0..60)
        }

        /// Index column, year headers, population headers.
        type Headers = (Option<&'static str>, Vec<&'static str>, Vec<&'static str>);

        /// Header choices seen in exported copies of the dataset.
        fn header_strategy() -> impl Strategy<Value = Headers> {
            let index = prop::option::of(prop::sample::select(vec!["", "Unnamed: 0", "column_0"]));
            let years = prop::sample::select(vec![
                vec!["year"],
                vec!["Year"],
                vec!["year", "Year"],
                vec!["Year", "year"],
            ]);
            let populations = prop::sample::select(vec![
                vec!["population"],
                vec!["Population"],
                vec!["population", "Population"],
            ]);
            (index, years, populations)
        }

        fn build_frame(
            rows: &[(i64, i64)],
            index: Option<&str>,
            year_names: &[&str],
            population_names: &[&str],
        ) -> DataFrame {
            let mut columns = Vec::new();
            if let Some(name) = index {
                let row_numbers: Vec<i64> = (0..rows.len() as i64).collect();
                columns.push(Column::new(name.into(), row_numbers));
            }
            let states: Vec<String> = (0..rows.len()).map(|i| format!("State {}", i)).collect();
            columns.push(Column::new(STATE_COL.into(), states));
            for name in year_names {
                // The column that ends up as `Year` carries the real years.
                let shift = if *name == YEAR_COL || year_names.len() == 1 { 0 } else { 1000 };
                let years: Vec<i64> = rows.iter().map(|(y, _)| y + shift).collect();
                columns.push(Column::new((*name).into(), years));
            }
            for (offset, name) in population_names.iter().enumerate() {
                let populations: Vec<i64> =
                    rows.iter().map(|(_, p)| p * (offset as i64 + 1)).collect();
                columns.push(Column::new((*name).into(), populations));
            }
            DataFrame::new(columns).unwrap()
        }

        proptest! {
            #[test]
            fn prop_normalize_is_idempotent(
                rows in prop::collection::vec((2010i64..2013, 0i64..100), 1..20),
                (index, year_names, population_names) in header_strategy(),
            ) {
                let df = build_frame(&rows, index, &year_names, &population_names);

                let once = DataProcessor::normalize_columns(&df).unwrap();
                let twice = DataProcessor::normalize_columns(&once).unwrap();

                prop_assert_eq!(column_names(&once), column_names(&twice));
                prop_assert_eq!(once.schema(), twice.schema());
                prop_assert!(once.schema().contains(YEAR_COL));
                prop_assert!(once.schema().contains(POPULATION_COL));
                prop_assert!(once.equals(&twice));
                if let Some(name) = index {
                    prop_assert!(!once.schema().contains(name));
                }

                let year = rows[0].0;
                let view_once = DataProcessor::select_year(&once, year).unwrap();
                let view_twice = DataProcessor::select_year(&twice, year).unwrap();
                prop_assert!(view_once.frame().equals(view_twice.frame()));
                prop_assert_eq!(view_once.records(), view_twice.records());
                prop_assert!(!view_once.is_empty());
            }

            #[test]
            fn prop_view_matches_year_and_is_sorted(rows in rows_strategy(), year in 2010i64..2015) {
                let ids: Vec<i64> = (0..rows.len() as i64).collect();
                let states: Vec<String> = ids.iter().map(|i| format!("State {}", i)).collect();
                let years: Vec<i64> = rows.iter().map(|(y, _)| *y).collect();
                let populations: Vec<i64> = rows.iter().map(|(_, p)| *p).collect();
                let df = df!(
                    "id" => ids,
                    "states" => states,
                    "Year" => years.clone(),
                    "Population" => populations.clone(),
                )
                .unwrap();

                let view = DataProcessor::select_year(&df, year).unwrap();

                let expected = years.iter().filter(|y| **y == year).count();
                prop_assert_eq!(view.len(), expected);
                prop_assert!(view.records().iter().all(|r| r.year == year));

                let view_ids: Vec<i64> = view
                    .frame()
                    .column("id")
                    .unwrap()
                    .i64()
                    .unwrap()
                    .into_iter()
                    .flatten()
                    .collect();
                for pair in view.records().windows(2).zip(view_ids.windows(2)) {
                    let (records, ids) = pair;
                    prop_assert!(records[0].population >= records[1].population);
                    if records[0].population == records[1].population {
                        prop_assert!(ids[0] < ids[1]);
                    }
                }
            }
        }
    }
}
