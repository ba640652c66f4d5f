//! Crime Dashboard Main Application
//! Main window with navigation sidebar and view panel.

use crate::charts::StaticChartRenderer;
use crate::config::DashboardConfig;
use crate::data::DatasetCache;
use crate::gui::{NavigationAction, NavigationPanel, ViewPanel};
use crate::views::select_view;
use egui::SidePanel;
use tracing::{error, info};

/// Main application window.
pub struct DashboardApp {
    cache: &'static DatasetCache,
    config: DashboardConfig,
    navigation: NavigationPanel,
    view_panel: ViewPanel,
}

impl DashboardApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        cache: &'static DatasetCache,
        config: DashboardConfig,
    ) -> Self {
        let mut app = Self {
            cache,
            config,
            navigation: NavigationPanel::new(),
            view_panel: ViewPanel::new(),
        };
        app.refresh_view();
        app
    }

    /// Rebuild the view panel for the current selection
    fn refresh_view(&mut self) {
        match self.cache.get() {
            Err(failure) => {
                self.view_panel.set_unavailable(failure);
                self.navigation.set_status("Error: data unavailable");
            }
            Ok(registry) => {
                match select_view(self.navigation.selected_id(), registry, self.config.top_n) {
                    Ok(spec) => self.view_panel.set_view(spec),
                    Err(e) => {
                        error!("{}", e);
                        self.view_panel.set_error(e.to_string());
                    }
                }
                self.navigation.set_status("Ready");
            }
        }
        self.navigation.export_enabled = self.view_panel.current_view().is_some();
    }

    /// Handle PNG export - render the current view's charts into a folder
    fn handle_export_png(&mut self) {
        let Some(spec) = self.view_panel.current_view() else {
            self.navigation.set_status("No charts to export");
            return;
        };

        let dir = match rfd::FileDialog::new()
            .set_directory(&self.config.data_dir)
            .pick_folder()
        {
            Some(dir) => dir,
            None => return, // User cancelled
        };

        match StaticChartRenderer::export_view(
            spec,
            &dir,
            self.config.export_width,
            self.config.export_height,
        ) {
            Ok(files) => {
                self.navigation
                    .set_status(&format!("Exported {} chart(s)", files.len()));
                if let Err(e) = open::that(&dir) {
                    info!("could not open {}: {}", dir.display(), e);
                }
            }
            Err(e) => {
                error!("export failed: {:#}", e);
                self.navigation.set_status(&format!("Error: {}", e));
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Navigation
        SidePanel::left("navigation")
            .min_width(260.0)
            .max_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match self.navigation.show(ui) {
                        NavigationAction::ViewChanged => self.refresh_view(),
                        NavigationAction::ExportPng => self.handle_export_png(),
                        NavigationAction::None => {}
                    }
                });
            });

        // Central panel - View
        egui::CentralPanel::default().show(ctx, |ui| {
            self.view_panel.show(ui);
        });
    }
}
