//! Control Panel Widget
//! Left side panel with the category/year filters and the download buttons.

use crate::data::{Selection, WageTable};
use crate::views::ExportKind;
use egui::{Color32, RichText, ScrollArea};
use std::collections::BTreeSet;

/// Left side control panel with the filter multi-selects.
pub struct ControlPanel {
    pub categories: Vec<String>,
    pub selected_categories: Vec<bool>,
    pub years: Vec<String>,
    pub selected_years: Vec<bool>,
    pub status: String,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            categories: Vec::new(),
            selected_categories: Vec::new(),
            years: Vec::new(),
            selected_years: Vec::new(),
            status: "Ready".to_string(),
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill the options from the table: first category and every year selected.
    pub fn update_options(&mut self, table: &WageTable) {
        self.categories = table.categories();
        self.selected_categories = (0..self.categories.len()).map(|i| i == 0).collect();
        self.years = table.years.clone();
        self.selected_years = vec![true; self.years.len()];
    }

    /// Current selection as sets of labels.
    pub fn selection(&self) -> Selection {
        let pick = |labels: &[String], flags: &[bool]| -> BTreeSet<String> {
            labels
                .iter()
                .zip(flags.iter())
                .filter(|(_, &selected)| selected)
                .map(|(label, _)| label.clone())
                .collect()
        };

        Selection {
            categories: pick(&self.categories, &self.selected_categories),
            years: pick(&self.years, &self.selected_years),
        }
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui, exports_enabled: bool) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("Filter Options")
                    .size(20.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("Customize your view using the options below.")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Category Section =====
        ui.label(RichText::new("🔍 Select Sector/Gender(s)").size(14.0).strong());
        ui.add_space(5.0);
        if Self::multi_select(
            ui,
            "category_select",
            &self.categories,
            &mut self.selected_categories,
            200.0,
        ) {
            action = ControlPanelAction::SelectionChanged;
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Year Section =====
        ui.label(RichText::new("📅 Select Years").size(14.0).strong());
        ui.add_space(5.0);
        if Self::multi_select(
            ui,
            "year_select",
            &self.years,
            &mut self.selected_years,
            160.0,
        ) {
            action = ControlPanelAction::SelectionChanged;
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Downloads =====
        ui.label(RichText::new("⬇ Downloads").size(14.0).strong());
        ui.add_space(5.0);
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(exports_enabled, |ui| {
                for kind in ExportKind::ALL {
                    let button = egui::Button::new(RichText::new(kind.label()).size(13.0))
                        .min_size(egui::vec2(240.0, 28.0));
                    if ui.add(button).clicked() {
                        action = ControlPanelAction::Export(kind);
                    }
                    ui.add_space(4.0);
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(5.0);

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

    /// Checkbox list with Select All / Clear All. Returns true on any change.
    fn multi_select(
        ui: &mut egui::Ui,
        id: &str,
        labels: &[String],
        flags: &mut [bool],
        max_height: f32,
    ) -> bool {
        let mut changed = false;

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(5.0)
            .show(ui, |ui| {
                ScrollArea::vertical()
                    .id_salt(id)
                    .max_height(max_height)
                    .show(ui, |ui| {
                        for (label, flag) in labels.iter().zip(flags.iter_mut()) {
                            changed |= ui.checkbox(flag, label).changed();
                        }
                    });
            });

        ui.add_space(5.0);
        ui.horizontal(|ui| {
            if ui.small_button("Select All").clicked() {
                flags.iter_mut().for_each(|v| *v = true);
                changed = true;
            }
            if ui.small_button("Clear All").clicked() {
                flags.iter_mut().for_each(|v| *v = false);
                changed = true;
            }
        });

        changed
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
    Export(ExportKind),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{WageRow, WageValue};

    fn table() -> WageTable {
        WageTable {
            category_label: "Province and Sector".to_string(),
            years: vec!["2018".to_string(), "2019".to_string()],
            rows: ["Western", "Central", "Western"]
                .iter()
                .map(|c| WageRow {
                    category: c.to_string(),
                    values: vec![WageValue::Missing, WageValue::Missing],
                })
                .collect(),
        }
    }

    #[test]
    fn options_default_to_first_category_and_all_years() {
        let table = table();
        let mut panel = ControlPanel::new();
        panel.update_options(&table);

        assert_eq!(panel.categories, vec!["Western", "Central"]);
        assert_eq!(panel.selection(), Selection::default_for(&table));
    }

    #[test]
    fn selection_follows_the_flags() {
        let mut panel = ControlPanel::new();
        panel.update_options(&table());
        panel.selected_categories = vec![false, true];
        panel.selected_years = vec![false, false];

        let selection = panel.selection();
        assert_eq!(selection.categories.len(), 1);
        assert!(selection.categories.contains("Central"));
        assert!(selection.years.is_empty());
    }
}
