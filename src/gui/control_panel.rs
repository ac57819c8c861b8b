//! Control Panel Widget
//! Sidebar with the year and color theme selectors and the download button.

use crate::selection::{ColorTheme, Selection};
use egui::{Color32, ComboBox, RichText};

/// Left side control panel.
pub struct ControlPanel {
    pub years: Vec<i64>,
    pub selection: Selection,
    pub status: String,
    pub download_enabled: bool,
}

impl ControlPanel {
    pub fn new(years: Vec<i64>, selection: Selection) -> Self {
        Self {
            years,
            selection,
            status: "Ready".to_string(),
            download_enabled: false,
        }
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🏂 US Population Dashboard")
                    .size(20.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(10.0);

        let label_width = 110.0;
        let combo_width = 150.0;

        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Select a year"));
            ComboBox::from_id_salt("selected_year")
                .width(combo_width)
                .selected_text(self.selection.year.to_string())
                .show_ui(ui, |ui| {
                    for &year in &self.years {
                        if ui
                            .selectable_label(self.selection.year == year, year.to_string())
                            .clicked()
                            && self.selection.year != year
                        {
                            self.selection.year = year;
                            action = ControlPanelAction::SelectionChanged;
                        }
                    }
                });
        });

        ui.add_space(5.0);

        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Select a color theme"));
            ComboBox::from_id_salt("selected_color_theme")
                .width(combo_width)
                .selected_text(self.selection.theme.as_str())
                .show_ui(ui, |ui| {
                    for theme in ColorTheme::ALL {
                        if ui
                            .selectable_label(self.selection.theme == theme, theme.as_str())
                            .clicked()
                            && self.selection.theme != theme
                        {
                            self.selection.theme = theme;
                            action = ControlPanelAction::SelectionChanged;
                        }
                    }
                });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(self.download_enabled, |ui| {
                let button = egui::Button::new(RichText::new("⬇ Download Data").size(14.0))
                    .min_size(egui::vec2(150.0, 30.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::Download;
                }
            });
        });

        ui.add_space(10.0);

        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.contains("Saved") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    SelectionChanged,
    Download,
}
