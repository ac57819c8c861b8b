//! Static Chart Renderer
//! Draws the bar chart with plotters into an RGB buffer or a PNG file.
//!
//! Layout:
//! 1. Title centered on top
//! 2. States on the y-axis, largest population first
//! 3. Population on the x-axis with thousands separators

use super::palette::Rgb;
use super::{format_population, BarChartSpec};
use image::RgbImage;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;
use thiserror::Error;

// Dark theme colors
const BACKGROUND: RGBColor = RGBColor(14, 17, 23);
const TEXT: RGBColor = RGBColor(250, 250, 250);
const GRID: RGBColor = RGBColor(60, 64, 72);

const FONT: &str = "sans-serif";

#[derive(Error, Debug)]
pub enum RendererError {
    #[error("Chart drawing failed: {0}")]
    Drawing(String),
    #[error("Chart buffer does not match {width}x{height}")]
    BufferSize { width: u32, height: u32 },
    #[error("Failed to save chart image: {0}")]
    Image(#[from] image::ImageError),
}

fn drawing_error<E: std::error::Error + Send + Sync>(err: DrawingAreaErrorKind<E>) -> RendererError {
    RendererError::Drawing(err.to_string())
}

fn to_rgb_color(color: Rgb) -> RGBColor {
    RGBColor(color.r, color.g, color.b)
}

/// plotters rendering of a [`BarChartSpec`].
#[derive(Debug, Clone)]
pub struct StaticBarChart {
    spec: BarChartSpec,
}

impl StaticBarChart {
    pub fn new(spec: BarChartSpec) -> Self {
        Self { spec }
    }

    pub fn spec(&self) -> &BarChartSpec {
        &self.spec
    }

    /// Fill color of every bar, in spec order.
    pub fn bar_colors(&self) -> Vec<RGBColor> {
        self.spec.bars.iter().map(|b| to_rgb_color(b.color)).collect()
    }

    /// Segment index of bar `index`; plotters' y-axis grows upward.
    fn bar_slot(index: usize, len: usize) -> i32 {
        (len - 1 - index) as i32
    }

    /// Render into a packed RGB buffer of `width * height * 3` bytes.
    pub fn render_rgb(&self, width: u32, height: u32) -> Result<Vec<u8>, RendererError> {
        let mut buffer = vec![0u8; width as usize * height as usize * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            self.draw(&root)?;
        }
        Ok(buffer)
    }

    pub fn save_png(&self, path: &Path, width: u32, height: u32) -> Result<(), RendererError> {
        let buffer = self.render_rgb(width, height)?;
        let image = RgbImage::from_raw(width, height, buffer)
            .ok_or(RendererError::BufferSize { width, height })?;
        image.save(path)?;
        tracing::info!(path = %path.display(), "Chart image saved");
        Ok(())
    }

    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<(), RendererError> {
        root.fill(&BACKGROUND).map_err(drawing_error)?;

        let len = self.spec.bars.len();
        let slots = len.max(1) as i32;
        let max_population = self.spec.max_population().max(1);
        // Label for each slot, bottom slot first.
        let labels: Vec<&str> = self.spec.bars.iter().rev().map(|b| b.state.as_str()).collect();

        let mut chart = ChartBuilder::on(root)
            .caption(&self.spec.title, (FONT, 22).into_font().color(&TEXT))
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(130)
            .build_cartesian_2d(0i64..max_population, (0..slots).into_segmented())
            .map_err(drawing_error)?;

        let y_label = |value: &SegmentValue<i32>| match value {
            SegmentValue::CenterOf(slot) if *slot >= 0 => labels
                .get(*slot as usize)
                .map(|s| s.to_string())
                .unwrap_or_default(),
            _ => String::new(),
        };
        let x_label = |value: &i64| format_population(*value);

        chart
            .configure_mesh()
            .disable_y_mesh()
            .light_line_style(GRID.mix(0.4))
            .bold_line_style(GRID)
            .axis_style(TEXT)
            .x_desc(self.spec.x_title)
            .y_desc(self.spec.y_title)
            .x_labels(6)
            .y_labels(len.max(1))
            .x_label_formatter(&x_label)
            .y_label_formatter(&y_label)
            .label_style((FONT, 11).into_font().color(&TEXT))
            .axis_desc_style((FONT, 14).into_font().color(&TEXT))
            .draw()
            .map_err(drawing_error)?;

        chart
            .draw_series(self.spec.bars.iter().zip(self.bar_colors()).enumerate().map(
                |(i, (bar, color))| {
                    let slot = Self::bar_slot(i, len);
                    let mut rect = Rectangle::new(
                        [
                            (0, SegmentValue::Exact(slot)),
                            (bar.population, SegmentValue::Exact(slot + 1)),
                        ],
                        color.filled(),
                    );
                    rect.set_margin(1, 1, 0, 0);
                    rect
                },
            ))
            .map_err(drawing_error)?;

        root.present().map_err(drawing_error)?;
        Ok(())
    }
}
