//! Chart Viewer Widget
//! Central scrollable panel with the wage tables and every chart.

use crate::charts::{draw_heatmap, draw_pie, ChartPlotter};
use crate::views::DashboardViews;
use egui::{ComboBox, RichText, ScrollArea};

const SECTION_SPACING: f32 = 18.0;

const INSIGHTS: [&str; 5] = [
    "📈 Wage Growth: Wages in several industries have been steadily rising over time, \
     which suggests economic expansion and higher incomes.",
    "🧑‍🤝‍🧑 Gender/Sectoral Disparities: Significant disparities in average salaries between \
     industries and genders point to possible areas for policy change.",
    "🧭 Provincial Differences: The distinct salary trends found in each province may be a \
     reflection of regional economic activity or variations in the cost of living.",
    "💡 Recommendation: Promote skill-building initiatives in low-wage industries to \
     increase output and profits.",
    "📊 Data-Driven Policy: In order to ensure fair pay distribution, authorities might \
     utilize this data to customize economic policies at the regional level.",
];

/// Scrollable dashboard body.
#[derive(Default)]
pub struct ChartViewer {
    pub views: DashboardViews,
    /// Year options of the pie chart select.
    pub years: Vec<String>,
}

/// Actions triggered from the chart viewer.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartViewerAction {
    None,
    PieYearChanged(String),
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_views(&mut self, views: DashboardViews) {
        self.views = views;
    }

    fn section_title(ui: &mut egui::Ui, title: &str) {
        ui.add_space(SECTION_SPACING);
        ui.label(RichText::new(title).size(18.0).strong());
        ui.add_space(6.0);
    }

    /// Draw the dashboard sections top to bottom.
    pub fn show(&mut self, ui: &mut egui::Ui) -> ChartViewerAction {
        let mut action = ChartViewerAction::None;
        let views = &self.views;

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                Self::section_title(ui, "📊 Wage Overview");
                if views.view.is_empty() {
                    ui.label("No sectors selected");
                } else {
                    ChartPlotter::draw_data_table(ui, &views.view);
                }

                Self::section_title(ui, "📈 Summary Statistics");
                if !views.view.is_empty() {
                    ChartPlotter::draw_stats_table(ui, &views.summary);
                }

                Self::section_title(ui, "📉 Wage Trend Over the Years");
                if !views.view.is_empty() {
                    ChartPlotter::draw_trend_chart(ui, &views.trend);
                }

                Self::section_title(ui, "Comparison by Sector");
                ui.label("Average Wages by Sector");
                ChartPlotter::draw_bar_chart(ui, &views.view.category_label, &views.averages);

                Self::section_title(ui, "Additional Insights");
                ui.label(RichText::new("📅 Heatmap of Wages by Sector and Year").strong());
                draw_heatmap(ui, &views.heatmap);

                ui.add_space(SECTION_SPACING);
                ui.label(RichText::new("📦 Wage Distribution by Year").strong());
                ChartPlotter::draw_box_chart(ui, &views.distribution);

                Self::section_title(ui, "🎯 Wage Distribution Pie Chart");
                let current = views.pie_year.clone().unwrap_or_default();
                ComboBox::from_label("Choose a Year for Pie Chart")
                    .selected_text(&current)
                    .show_ui(ui, |ui| {
                        for year in &self.years {
                            if ui.selectable_label(&current == year, year).clicked()
                                && &current != year
                            {
                                action = ChartViewerAction::PieYearChanged(year.clone());
                            }
                        }
                    });
                ui.label(format!("Wage Distribution in {}", current));
                draw_pie(ui, &views.pie);

                ui.add_space(SECTION_SPACING);
                ui.separator();
                Self::section_title(ui, "🧠 Key Insights and Recommendations");
                for insight in INSIGHTS {
                    ui.label(format!("• {}", insight));
                    ui.add_space(4.0);
                }
                ui.add_space(SECTION_SPACING);
                ui.separator();
            });

        action
    }
}
