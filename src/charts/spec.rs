//! Backend-neutral bar chart description.

use super::palette::{ColorScale, Rgb};
use crate::data::SelectedYearView;
use crate::selection::ColorTheme;
use serde::Serialize;

pub const X_TITLE: &str = "Population";
pub const Y_TITLE: &str = "State";

/// One horizontal bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarSpec {
    pub state: String,
    pub population: i64,
    pub color: Rgb,
}

/// What both chart backends draw: population on x, states on y (largest
/// first), bar color from the selected theme.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChartSpec {
    pub title: String,
    pub x_title: &'static str,
    pub y_title: &'static str,
    pub theme: ColorTheme,
    pub bars: Vec<BarSpec>,
}

impl BarChartSpec {
    pub fn title_for(year: i64) -> String {
        format!("US Population in {}", year)
    }

    pub fn from_view(view: &SelectedYearView, theme: ColorTheme) -> Self {
        let records = view.records();
        let scale = ColorScale::for_values(theme, records.iter().map(|r| r.population));

        let bars = records
            .iter()
            .map(|record| BarSpec {
                state: record.state.clone(),
                population: record.population,
                color: scale.color_for(record.population),
            })
            .collect();

        Self {
            title: Self::title_for(view.year()),
            x_title: X_TITLE,
            y_title: Y_TITLE,
            theme,
            bars,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn max_population(&self) -> i64 {
        self.bars.iter().map(|b| b.population).max().unwrap_or(0)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
