//! Chart Viewer Widget
//! Central panel: header, the egui_plot chart and the plotters chart side by
//! side, and the palette legend.

use crate::charts::{format_population, palette};
use crate::dashboard::RenderOutput;
use crate::selection::Selection;
use egui::{Color32, ColorImage, RichText, TextureHandle, TextureOptions};

const CHART_HEIGHT: f32 = 500.0;
const STATIC_CHART_SIZE: (u32, u32) = (700, 500);
const LEGEND_STEPS: usize = 64;

const DESCRIPTION: &str = "This dashboard visualizes US population data from 2010 to 2019. \
Use the sidebar to select a year and customize the color theme for the charts.";

/// Displays one render pass. The plotters raster is cached per selection.
#[derive(Default)]
pub struct ChartViewer {
    texture: Option<(Selection, TextureHandle)>,
    render_error: Option<String>,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the cached raster so the next frame redraws it.
    pub fn clear(&mut self) {
        self.texture = None;
        self.render_error = None;
    }

    pub fn show(&mut self, ctx: &egui::Context, ui: &mut egui::Ui, output: Option<&RenderOutput>) {
        ui.label(DESCRIPTION);
        ui.add_space(8.0);

        let Some(output) = output else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        };

        ui.heading(output.header());
        ui.add_space(8.0);

        self.ensure_texture(ctx, output);

        ui.columns(2, |columns| {
            output.interactive.draw(&mut columns[0], CHART_HEIGHT);

            let ui = &mut columns[1];
            ui.label(
                RichText::new(&output.static_chart.spec().title)
                    .size(14.0)
                    .strong(),
            );
            if let Some((_, texture)) = &self.texture {
                ui.add(egui::Image::new(texture).shrink_to_fit());
            } else if let Some(error) = &self.render_error {
                ui.label(RichText::new(error).color(Color32::from_rgb(220, 53, 69)));
            }
        });

        ui.add_space(10.0);
        Self::draw_legend(ui, output);
    }

    fn ensure_texture(&mut self, ctx: &egui::Context, output: &RenderOutput) {
        let cached = matches!(&self.texture, Some((selection, _)) if *selection == output.selection);
        if cached || self.render_error.is_some() {
            return;
        }

        let (width, height) = STATIC_CHART_SIZE;
        match output.static_chart.render_rgb(width, height) {
            Ok(buffer) => {
                let image = ColorImage::from_rgb([width as usize, height as usize], &buffer);
                let texture = ctx.load_texture("static_bar_chart", image, TextureOptions::LINEAR);
                self.texture = Some((output.selection, texture));
            }
            Err(e) => {
                tracing::error!(error = %e, "Static chart rendering failed");
                self.render_error = Some(format!("Error: {}", e));
            }
        }
    }

    /// Color ramp for the selected theme with the population extent.
    fn draw_legend(ui: &mut egui::Ui, output: &RenderOutput) {
        let spec = output.interactive.spec();
        let Some(min) = spec.bars.iter().map(|b| b.population).min() else {
            return;
        };
        let max = spec.max_population();

        ui.horizontal(|ui| {
            ui.label(RichText::new(format_population(min)).size(11.0));

            let (rect, _) = ui.allocate_exact_size(egui::vec2(240.0, 14.0), egui::Sense::hover());
            let step = rect.width() / LEGEND_STEPS as f32;
            for i in 0..LEGEND_STEPS {
                let color = palette::sample(spec.theme, i as f64 / (LEGEND_STEPS - 1) as f64);
                let segment = egui::Rect::from_min_size(
                    egui::pos2(rect.left() + i as f32 * step, rect.top()),
                    egui::vec2(step + 0.5, rect.height()),
                );
                ui.painter()
                    .rect_filled(segment, 0.0, Color32::from_rgb(color.r, color.g, color.b));
            }

            ui.label(RichText::new(format_population(max)).size(11.0));
            ui.label(RichText::new(spec.theme.as_str()).size(11.0).color(Color32::GRAY));
        });
    }
}
