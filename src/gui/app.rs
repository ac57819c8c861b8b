//! US Population Dashboard main application
//! Sidebar with selectors, central panel with the charts.

use crate::dashboard::{render, DashboardError, RenderOutput, SourceTable};
use crate::data::CsvExporter;
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use crate::selection::Selection;
use egui::{Color32, RichText, SidePanel};

/// Main application window.
pub enum DashboardApp {
    /// The data could not be loaded. Only the message is shown.
    Failed(String),
    Ready(Box<Dashboard>),
}

pub struct Dashboard {
    source: SourceTable,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
    output: Option<RenderOutput>,
}

impl DashboardApp {
    /// Dashboard over a loaded table, rendered once for `initial`.
    pub fn ready(source: SourceTable, initial: Selection) -> Self {
        let control_panel = ControlPanel::new(source.years().years().to_vec(), initial);
        let mut dashboard = Dashboard {
            source,
            control_panel,
            chart_viewer: ChartViewer::new(),
            output: None,
        };
        dashboard.rerender();
        DashboardApp::Ready(Box::new(dashboard))
    }

    pub fn failed(error: &DashboardError) -> Self {
        DashboardApp::Failed(error.to_string())
    }
}

impl Dashboard {
    /// Run the whole pipeline for the current selection.
    fn rerender(&mut self) {
        self.chart_viewer.clear();
        let selection = self.control_panel.selection;

        match render(&self.source, &selection) {
            Ok(output) => {
                let status = if output.view.is_empty() {
                    format!("No data for {}", selection.year)
                } else {
                    format!("{} states in {}", output.view.len(), selection.year)
                };
                self.control_panel.set_status(&status);
                self.control_panel.download_enabled = true;
                self.output = Some(output);
            }
            Err(e) => {
                tracing::error!(error = %e, year = selection.year, "Render failed");
                self.control_panel.set_status(&format!("Error: {}", e));
                self.control_panel.download_enabled = false;
                self.output = None;
            }
        }
    }

    /// Save the current CSV export through a native save dialog.
    fn handle_download(&mut self) {
        let Some(output) = &self.output else {
            self.control_panel.set_status("No data to download");
            return;
        };

        let path = match rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .set_file_name(&output.export.file_name)
            .save_file()
        {
            Some(path) => path,
            None => return, // User cancelled
        };

        match CsvExporter::write_file(&output.export, &path) {
            Ok(()) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default();
                self.control_panel.set_status(&format!("Saved {}", name));
            }
            Err(e) => {
                tracing::error!(error = %e, path = %path.display(), "Download failed");
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let dashboard = match self {
            DashboardApp::Failed(message) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.label(
                        RichText::new(message.as_str())
                            .size(16.0)
                            .color(Color32::from_rgb(220, 53, 69)),
                    );
                });
                return;
            }
            DashboardApp::Ready(dashboard) => dashboard,
        };

        // Left panel - selectors and download
        SidePanel::left("control_panel")
            .min_width(280.0)
            .max_width(340.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match dashboard.control_panel.show(ui) {
                        ControlPanelAction::SelectionChanged => dashboard.rerender(),
                        ControlPanelAction::Download => dashboard.handle_download(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - charts
        egui::CentralPanel::default().show(ctx, |ui| {
            let Dashboard {
                chart_viewer,
                output,
                ..
            } = &mut **dashboard;
            egui::ScrollArea::vertical().show(ui, |ui| {
                chart_viewer.show(ctx, ui, output.as_ref());
            });
        });
    }
}
