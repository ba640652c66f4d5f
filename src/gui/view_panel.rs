//! View Panel Widget
//! Central scrollable area showing the selected view, or why it can't be shown.

use crate::charts::{ChartData, ChartPlotter, TableData};
use crate::data::{LoadFailure, ProcessorError};
use crate::views::{LayoutHint, Panel, ViewSpec};
use egui::{Color32, RichText, ScrollArea};

/// A panel with its chart and grid data prepared once per selection.
struct PreparedPanel {
    id: String,
    subheader: Option<&'static str>,
    chart: ChartData,
    table: TableData,
}

impl PreparedPanel {
    fn new(view_id: &str, idx: usize, panel: &Panel) -> Result<Self, ProcessorError> {
        Ok(Self {
            id: format!("{}_{}", view_id, idx),
            subheader: panel.subheader,
            chart: ChartData::from_panel(panel)?,
            table: TableData::from_panel(panel)?,
        })
    }
}

enum ViewState {
    /// Nothing selected yet
    Empty,
    /// Dataset failed to load; lists the failures
    Unavailable(Vec<String>),
    /// The selector or chart preparation failed
    Error(String),
    Ready {
        spec: ViewSpec,
        panels: Vec<PreparedPanel>,
    },
}

/// Central panel for the selected dashboard view.
pub struct ViewPanel {
    state: ViewState,
}

impl Default for ViewPanel {
    fn default() -> Self {
        Self {
            state: ViewState::Empty,
        }
    }
}

impl ViewPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a view; chart data is prepared here, not every frame
    pub fn set_view(&mut self, spec: ViewSpec) {
        let prepared = spec
            .panels
            .iter()
            .enumerate()
            .map(|(idx, panel)| PreparedPanel::new(spec.view.id(), idx, panel))
            .collect::<Result<Vec<_>, _>>();

        self.state = match prepared {
            Ok(panels) => ViewState::Ready { spec, panels },
            Err(e) => ViewState::Error(e.to_string()),
        };
    }

    /// Degraded "no data" state
    pub fn set_unavailable(&mut self, failure: &LoadFailure) {
        self.state = ViewState::Unavailable(
            failure.failures.iter().map(|f| f.to_string()).collect(),
        );
    }

    pub fn set_error(&mut self, message: String) {
        self.state = ViewState::Error(message);
    }

    /// Currently displayed view, if any
    pub fn current_view(&self) -> Option<&ViewSpec> {
        match &self.state {
            ViewState::Ready { spec, .. } => Some(spec),
            _ => None,
        }
    }

    pub fn show(&self, ui: &mut egui::Ui) {
        ui.label(
            RichText::new("⚖ FBI Crime Data Analysis Dashboard")
                .size(26.0)
                .strong()
                .color(Color32::from_rgb(31, 78, 121)),
        );
        ui.label("Explore various aspects of FBI-reported crime data with interactive charts and tables.");
        ui.separator();

        match &self.state {
            ViewState::Empty => {
                ui.centered_and_justified(|ui| {
                    ui.label(RichText::new("No Data").size(20.0));
                });
            }
            ViewState::Unavailable(failures) => Self::show_unavailable(ui, failures),
            ViewState::Error(message) => {
                ui.label(
                    RichText::new(format!("❌ {}", message))
                        .size(14.0)
                        .color(Color32::from_rgb(220, 53, 69)),
                );
            }
            ViewState::Ready { spec, panels } => {
                ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| Self::show_view(ui, spec, panels));
            }
        }
    }

    fn show_unavailable(ui: &mut egui::Ui, failures: &[String]) {
        egui::Frame::none()
            .fill(Color32::from_rgb(255, 243, 205))
            .rounding(5.0)
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.label(
                    RichText::new(
                        "⚠ Data could not be loaded. Please ensure all CSV files are in the data directory.",
                    )
                    .size(14.0)
                    .color(Color32::from_rgb(133, 100, 4)),
                );
                ui.add_space(5.0);
                for failure in failures {
                    ui.label(RichText::new(format!("• {}", failure)).size(12.0));
                }
            });
    }

    fn show_view(ui: &mut egui::Ui, spec: &ViewSpec, panels: &[PreparedPanel]) {
        ui.label(RichText::new(spec.header).size(20.0).strong());
        ui.label(RichText::new(spec.caption).size(12.0).color(Color32::GRAY));
        ui.add_space(10.0);

        match spec.layout {
            LayoutHint::Single => {
                for panel in panels {
                    Self::show_panel(ui, panel);
                }
            }
            LayoutHint::TwoColumnsThenFull => {
                let (top, rest) = panels.split_at(panels.len().min(2));
                ui.columns(2, |columns| {
                    for (column, panel) in columns.iter_mut().zip(top) {
                        Self::show_panel(column, panel);
                    }
                });
                for panel in rest {
                    Self::show_panel(ui, panel);
                }
            }
        }
    }

    fn show_panel(ui: &mut egui::Ui, panel: &PreparedPanel) {
        ui.vertical(|ui| {
            if let Some(subheader) = panel.subheader {
                ui.label(RichText::new(subheader).size(16.0).strong());
            }
            if panel.chart.is_empty() {
                ui.label(RichText::new("No rows").color(Color32::GRAY));
            } else {
                ChartPlotter::draw_chart(ui, &panel.id, &panel.chart);
            }
            ui.add_space(8.0);
            ChartPlotter::draw_data_table(ui, &panel.id, &panel.table);
            ui.add_space(15.0);
        });
    }
}
