//! Chart Plotter Module
//! Interactive horizontal bar chart using egui_plot.

use super::palette::Rgb;
use super::{format_population, BarChartSpec};
use egui::{Color32, RichText};
use egui_plot::{Bar, BarChart, GridMark, Plot};

const BAR_WIDTH: f64 = 0.8;

/// egui_plot rendering of a [`BarChartSpec`].
#[derive(Debug, Clone)]
pub struct InteractiveBarChart {
    spec: BarChartSpec,
}

fn to_color32(color: Rgb) -> Color32 {
    Color32::from_rgb(color.r, color.g, color.b)
}

impl InteractiveBarChart {
    pub fn new(spec: BarChartSpec) -> Self {
        Self { spec }
    }

    pub fn spec(&self) -> &BarChartSpec {
        &self.spec
    }

    /// Bars are stacked bottom-up in egui_plot, so the first (largest) bar
    /// gets the highest position.
    pub fn bar_position(index: usize, len: usize) -> f64 {
        (len - 1 - index) as f64
    }

    pub fn bars(&self) -> Vec<Bar> {
        let len = self.spec.bars.len();
        self.spec
            .bars
            .iter()
            .enumerate()
            .map(|(i, bar)| {
                Bar::new(Self::bar_position(i, len), bar.population as f64)
                    .name(&bar.state)
                    .width(BAR_WIDTH)
                    .fill(to_color32(bar.color))
            })
            .collect()
    }

    /// State names indexed by bar position.
    fn labels_by_position(&self) -> Vec<String> {
        self.spec.bars.iter().rev().map(|b| b.state.clone()).collect()
    }

    pub fn draw(&self, ui: &mut egui::Ui, height: f32) {
        ui.label(RichText::new(&self.spec.title).size(14.0).strong());

        let labels = self.labels_by_position();
        let label_count = labels.len();

        Plot::new(format!("bar_chart_{}", self.spec.title))
            .height(height)
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .include_x(0.0)
            .x_axis_label(self.spec.x_title)
            .y_axis_label(self.spec.y_title)
            .x_axis_formatter(|mark, _range| {
                if mark.value < 0.0 {
                    String::new()
                } else {
                    format_population(mark.value.round() as i64)
                }
            })
            // One tick per state so every bar gets its label.
            .y_grid_spacer(move |_input| {
                (0..label_count)
                    .map(|i| GridMark {
                        value: i as f64,
                        step_size: 1.0,
                    })
                    .collect()
            })
            .y_axis_formatter(move |mark, _range| {
                let position = mark.value.round();
                if position < 0.0 || (mark.value - position).abs() > 1e-6 {
                    return String::new();
                }
                labels
                    .get(position as usize)
                    .cloned()
                    .unwrap_or_default()
            })
            .show(ui, |plot_ui| {
                if self.spec.is_empty() {
                    return;
                }
                plot_ui.bar_chart(
                    BarChart::new(self.bars())
                        .horizontal()
                        .element_formatter(Box::new(|bar, _chart| {
                            format!("{}\n{}", bar.name, format_population(bar.value as i64))
                        })),
                );
            });
    }
}
