//! Wages Dashboard Main Application
//! Main window with control panel and chart viewer.

use crate::config::DashboardConfig;
use crate::data::DataLoader;
use crate::gui::{ChartViewer, ChartViewerAction, ControlPanel, ControlPanelAction};
use crate::views::{DashboardViews, ExportKind};
use anyhow::{Context, Result};
use egui::{Color32, RichText, SidePanel, TextureHandle};
use std::path::Path;

/// Main application window.
pub struct WagesApp {
    loader: DataLoader,
    load_error: Option<String>,
    header: Option<TextureHandle>,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
}

/// Decode the banner image into an egui texture.
fn load_header_texture(ctx: &egui::Context, path: &Path) -> Result<TextureHandle> {
    let image = image::open(path)
        .with_context(|| format!("opening {}", path.display()))?
        .to_rgba8();
    let size = [image.width() as usize, image.height() as usize];
    let pixels = egui::ColorImage::from_rgba_unmultiplied(size, image.as_flat_samples().as_slice());
    Ok(ctx.load_texture("header_banner", pixels, Default::default()))
}

impl WagesApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: DashboardConfig) -> Self {
        let header = match load_header_texture(&cc.egui_ctx, &config.header_image) {
            Ok(texture) => Some(texture),
            Err(e) => {
                log::warn!("Header image unavailable: {e:#}");
                None
            }
        };

        let mut app = Self {
            loader: DataLoader::new(&config.data_path),
            load_error: None,
            header,
            control_panel: ControlPanel::new(),
            chart_viewer: ChartViewer::new(),
        };

        match app.loader.load() {
            Ok(table) => {
                app.control_panel.update_options(table);
                app.chart_viewer.years = table.years.clone();
            }
            Err(e) => {
                log::error!("{}", e);
                app.load_error = Some(e.to_string());
            }
        }
        app.recompute(None);

        app
    }

    /// Rebuild every view from the current selection.
    fn recompute(&mut self, pie_year: Option<String>) {
        let Some(table) = self.loader.table() else {
            return;
        };

        let pie_year = pie_year.or_else(|| self.chart_viewer.views.pie_year.clone());
        let selection = self.control_panel.selection();
        let views = DashboardViews::compute(table, &selection, pie_year.as_deref());
        self.chart_viewer.set_views(views);
    }

    /// Save one of the downloadable datasets to a user-chosen CSV file.
    fn handle_export(&mut self, kind: ExportKind) {
        let text = match self.chart_viewer.views.export(kind) {
            Ok(text) => text,
            Err(e) => {
                log::error!("Export of {} failed: {}", kind.file_name(), e);
                self.control_panel.set_status(&format!("Error: {}", e));
                return;
            }
        };

        let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .set_file_name(kind.file_name())
            .save_file()
        else {
            return; // User cancelled
        };

        match std::fs::write(&path, text) {
            Ok(()) => {
                log::info!("Exported {}", path.display());
                self.control_panel
                    .set_status(&format!("Saved {}", path.display()));
            }
            Err(e) => {
                log::error!("Writing {} failed: {}", path.display(), e);
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }

    fn show_header(&self, ui: &mut egui::Ui) {
        match &self.header {
            Some(texture) => {
                ui.add(egui::Image::new(texture).max_width(ui.available_width()));
            }
            None => {
                ui.heading(RichText::new("🇱🇰 Welcome to the Wages Dashboard").size(26.0));
            }
        }
    }
}

impl eframe::App for WagesApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(error) = &self.load_error {
            egui::CentralPanel::default().show(ctx, |ui| {
                self.show_header(ui);
                ui.add_space(20.0);
                ui.label(
                    RichText::new(error)
                        .size(16.0)
                        .color(Color32::from_rgb(220, 53, 69)),
                );
            });
            return;
        }

        // Left panel - Control Panel
        let exports_enabled = self.loader.table().is_some();
        SidePanel::left("control_panel")
            .min_width(280.0)
            .max_width(340.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match self.control_panel.show(ui, exports_enabled) {
                        ControlPanelAction::SelectionChanged => self.recompute(None),
                        ControlPanelAction::Export(kind) => self.handle_export(kind),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - header and dashboard body
        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_header(ui);
            if let ChartViewerAction::PieYearChanged(year) = self.chart_viewer.show(ui) {
                self.recompute(Some(year));
            }
        });
    }
}
