//! Navigation Panel Widget
//! Left sidebar with the view menu, export button and status line.

use crate::views::ViewId;
use egui::{Color32, RichText};

/// Left sidebar with the six dashboard views.
pub struct NavigationPanel {
    pub selected: ViewId,
    pub status: String,
    pub export_enabled: bool,
}

impl Default for NavigationPanel {
    fn default() -> Self {
        Self {
            selected: ViewId::default(),
            status: "Ready".to_string(),
            export_enabled: false,
        }
    }
}

impl NavigationPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current selection as a view id string
    pub fn selected_id(&self) -> &'static str {
        self.selected.id()
    }

    /// Draw the sidebar
    pub fn show(&mut self, ui: &mut egui::Ui) -> NavigationAction {
        let mut action = NavigationAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("📊 Navigation")
                    .size(22.0)
                    .color(Color32::from_rgb(31, 78, 121)),
            );
        });
        ui.add_space(8.0);

        egui::Frame::none()
            .fill(Color32::from_rgb(220, 235, 250))
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.label(
                    RichText::new("Choose a dataset to explore FBI crime data.")
                        .size(12.0)
                        .color(Color32::from_rgb(31, 78, 121)),
                );
            });

        ui.add_space(10.0);
        ui.label(RichText::new("Go to:").size(14.0).strong());
        ui.add_space(5.0);

        for view in ViewId::ALL {
            if ui
                .radio_value(&mut self.selected, view, view.menu_label())
                .changed()
            {
                action = NavigationAction::ViewChanged;
            }
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(self.export_enabled, |ui| {
                let button = egui::Button::new(RichText::new("🖼 Export PNG").size(14.0))
                    .min_size(egui::vec2(150.0, 30.0));
                if ui.add(button).clicked() {
                    action = NavigationAction::ExportPng;
                }
            });
        });

        ui.add_space(8.0);

        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.contains("Exported") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        ui.add_space(15.0);
        ui.separator();
        ui.horizontal(|ui| {
            ui.label(RichText::new("Built with").size(11.0).color(Color32::GRAY));
            ui.hyperlink_to("egui", "https://github.com/emilk/egui");
        });

        action
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

/// Actions triggered by the sidebar
#[derive(Debug, Clone, PartialEq)]
pub enum NavigationAction {
    None,
    ViewChanged,
    ExportPng,
}
