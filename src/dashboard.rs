//! Dashboard pipeline: load the source table once, then derive every output
//! of a render pass from it and the current selection.

use crate::charts::{BarChartSpec, InteractiveBarChart, StaticBarChart};
use crate::data::{
    CsvExport, CsvExporter, DataLoader, DataProcessor, ExportError, LoaderError, ProcessorError,
    SelectedYearView,
};
use crate::selection::{Selection, SelectionError, YearOptions};
use polars::prelude::DataFrame;
use std::path::Path;
use thiserror::Error;

/// Input file, resolved relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "us-population-2010-2019-reshaped.csv";

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error(transparent)]
    Load(#[from] LoaderError),
    #[error(transparent)]
    Process(#[from] ProcessorError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error(transparent)]
    Selection(#[from] SelectionError),
}

impl DashboardError {
    pub fn is_data_not_found(&self) -> bool {
        matches!(self, DashboardError::Load(LoaderError::DataNotFound { .. }))
    }
}

/// The normalized, read-only population table and the years it offers.
#[derive(Debug, Clone)]
pub struct SourceTable {
    frame: DataFrame,
    years: YearOptions,
}

impl SourceTable {
    pub fn load(path: &Path) -> Result<Self, DashboardError> {
        let mut loader = DataLoader::new();
        loader.load_csv(path)?;
        tracing::debug!(
            rows = loader.get_row_count(),
            columns = ?loader.get_columns(),
            "Raw columns"
        );
        let raw = loader.take_dataframe().unwrap_or_default();
        let table = Self::from_frame(&raw)?;

        tracing::info!(
            path = %path.display(),
            rows = table.frame.height(),
            columns = table.frame.width(),
            years = ?table.years.years(),
            "Population data loaded"
        );
        Ok(table)
    }

    /// Normalize a raw table and check it has the columns the dashboard
    /// reads.
    pub fn from_frame(raw: &DataFrame) -> Result<Self, DashboardError> {
        let frame = DataProcessor::normalize_columns(raw)?;
        DataProcessor::require_columns(&frame)?;
        let years = YearOptions::from_frame(&frame)?;
        Ok(Self { frame, years })
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn years(&self) -> &YearOptions {
        &self.years
    }
}

/// Everything one render pass produces.
#[derive(Debug, Clone)]
pub struct RenderOutput {
    pub selection: Selection,
    pub view: SelectedYearView,
    pub interactive: InteractiveBarChart,
    pub static_chart: StaticBarChart,
    pub export: CsvExport,
}

impl RenderOutput {
    pub fn header(&self) -> String {
        BarChartSpec::title_for(self.selection.year)
    }
}

/// Filter, chart and export the source table for one selection.
pub fn render(source: &SourceTable, selection: &Selection) -> Result<RenderOutput, DashboardError> {
    let view = DataProcessor::select_year(source.frame(), selection.year)?;
    let spec = BarChartSpec::from_view(&view, selection.theme);
    let export = CsvExporter::export(&view)?;

    tracing::debug!(
        year = selection.year,
        theme = %selection.theme,
        rows = view.len(),
        "Rendered selection"
    );

    Ok(RenderOutput {
        selection: *selection,
        view,
        interactive: InteractiveBarChart::new(spec.clone()),
        static_chart: StaticBarChart::new(spec),
        export,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::palette::Rgb;
    use crate::data::fixtures;
    use crate::selection::ColorTheme;

    fn source() -> SourceTable {
        let file = fixtures::write_sample_csv();
        SourceTable::load(file.path()).unwrap()
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();

        let err = SourceTable::load(&dir.path().join(DEFAULT_DATA_FILE)).unwrap_err();

        assert!(err.is_data_not_found());
        assert!(err.to_string().contains(DEFAULT_DATA_FILE));
    }

    #[test]
    fn test_load_rejects_missing_states_column() {
        let file = fixtures::write_csv("year,population\n2010,5\n");

        let err = SourceTable::load(file.path()).unwrap_err();

        assert!(!err.is_data_not_found());
        assert!(matches!(
            err,
            DashboardError::Process(ProcessorError::MissingColumn(name)) if name == "states"
        ));
    }

    #[test]
    fn test_source_years() {
        let source = source();

        assert_eq!(source.years().years(), &[2019, 2015, 2010]);
        assert_eq!(source.years().default_year(), Some(2010));
        assert_eq!(source.frame().height(), fixtures::SAMPLE_ROWS);
    }

    #[test]
    fn test_render_selected_year() {
        let source = source();
        let selection = Selection {
            year: 2015,
            theme: ColorTheme::Inferno,
        };

        let output = render(&source, &selection).unwrap();

        assert_eq!(output.header(), "US Population in 2015");
        assert_eq!(output.view.len(), 5);
        assert!(output.view.records().iter().all(|r| r.year == 2015));
        assert_eq!(output.export.file_name, "us_population_2015.csv");
        assert_eq!(output.interactive.spec().theme, ColorTheme::Inferno);
        assert_eq!(output.interactive.spec().title, "US Population in 2015");
    }

    #[test]
    fn test_both_charts_express_same_data() {
        let source = source();
        for theme in ColorTheme::ALL {
            let selection = Selection { year: 2019, theme };

            let output = render(&source, &selection).unwrap();

            let interactive = output.interactive.bars();
            let static_colors = output.static_chart.bar_colors();
            assert_eq!(output.interactive.spec(), output.static_chart.spec());
            assert_eq!(interactive.len(), static_colors.len());
            for (bar, color) in interactive.iter().zip(static_colors.iter()) {
                let fill = bar.fill;
                assert_eq!((fill.r(), fill.g(), fill.b()), (color.0, color.1, color.2));
            }
            assert_eq!(interactive[0].name, "California");
        }
    }

    #[test]
    fn test_render_empty_year() {
        let source = source();
        let selection = Selection {
            year: 2013,
            theme: ColorTheme::Blues,
        };

        let output = render(&source, &selection).unwrap();

        assert!(output.view.is_empty());
        assert!(output.interactive.spec().is_empty());
        assert!(output.interactive.bars().is_empty());
        let text = String::from_utf8(output.export.bytes).unwrap();
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn test_render_is_repeatable() {
        let source = source();
        let selection = Selection {
            year: 2010,
            theme: ColorTheme::Cividis,
        };

        let first = render(&source, &selection).unwrap();
        let second = render(&source, &selection).unwrap();

        assert_eq!(first.export, second.export);
        assert_eq!(first.interactive.spec(), second.interactive.spec());
        let top = &first.interactive.spec().bars[0];
        assert_eq!(top.color, Rgb::from_hex(0xfee838));
    }
}
