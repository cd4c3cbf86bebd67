//! Chart Plotter Module
//! Creates interactive visualizations using egui_plot.

use crate::data::{CategoryAverage, DataProcessor, FilteredView, SummaryRow, TidyRecord};
use crate::stats::StatsCalculator;
use egui::{Color32, RichText};
use egui_plot::{Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Legend, Line, Plot, PlotPoints, Points};
use std::collections::HashMap;

const CHART_HEIGHT: f32 = 320.0;

pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(52, 152, 219), // Blue
    Color32::from_rgb(231, 76, 60),  // Red
    Color32::from_rgb(46, 204, 113), // Green
    Color32::from_rgb(155, 89, 182), // Purple
    Color32::from_rgb(243, 156, 18), // Orange
    Color32::from_rgb(26, 188, 156), // Teal
    Color32::from_rgb(233, 30, 99),  // Pink
    Color32::from_rgb(0, 188, 212),  // Cyan
    Color32::from_rgb(121, 85, 72),  // Brown
    Color32::from_rgb(96, 125, 139), // Blue Grey
];

/// Creates the dashboard charts using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Get color for the n-th series.
    pub fn series_color(index: usize) -> Color32 {
        PALETTE[index % PALETTE.len()]
    }

    /// X position of a year label: its numeric value, or its column position.
    pub fn year_position(years: &[String], year: &str) -> f64 {
        year.trim().parse::<f64>().unwrap_or_else(|_| {
            years.iter().position(|y| y == year).unwrap_or(0) as f64
        })
    }

    /// Calculate beeswarm positions for points with duplicate values.
    pub fn beeswarm_positions(y_values: &[f64], center: f64, width: f64) -> Vec<f64> {
        let n = y_values.len();
        if n == 0 {
            return Vec::new();
        }

        let mut positions = vec![center; n];

        // Round values and find duplicates
        let precision = 1e6;
        let mut value_indices: HashMap<i64, Vec<usize>> = HashMap::new();

        for (i, &y) in y_values.iter().enumerate() {
            let key = (y * precision).round() as i64;
            value_indices.entry(key).or_default().push(i);
        }

        // Spread duplicates symmetrically
        for indices in value_indices.values() {
            if indices.len() > 1 {
                let count = indices.len();
                let step = width / (count - 1) as f64;
                let start = center - width / 2.0;

                for (i, &idx) in indices.iter().enumerate() {
                    positions[idx] = start + i as f64 * step;
                }
            }
        }

        positions
    }

    /// Line chart of wages over the selected years, one line per category.
    pub fn draw_trend_chart(ui: &mut egui::Ui, records: &[TidyRecord]) {
        let years = DataProcessor::get_years(records);
        let categories = DataProcessor::get_categories(records);

        Plot::new("wage_trend")
            .height(CHART_HEIGHT)
            .legend(Legend::default())
            .x_axis_label("Year")
            .y_axis_label("Average Wage")
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                for (i, category) in categories.iter().enumerate() {
                    let points: Vec<[f64; 2]> = records
                        .iter()
                        .filter(|r| &r.category == category)
                        .filter_map(|r| {
                            let wage = r.wage.as_f64()?;
                            Some([Self::year_position(&years, &r.year), wage])
                        })
                        .collect();
                    if points.is_empty() {
                        continue;
                    }

                    let color = Self::series_color(i);
                    plot_ui.line(
                        Line::new(PlotPoints::from_iter(points.iter().copied()))
                            .color(color)
                            .width(2.0)
                            .name(category),
                    );
                    plot_ui.points(
                        Points::new(PlotPoints::from_iter(points.iter().copied()))
                            .radius(4.0)
                            .color(color)
                            .name(category),
                    );
                }
            });
    }

    /// Bar chart of the average wage of every category.
    pub fn draw_bar_chart(ui: &mut egui::Ui, category_label: &str, averages: &[CategoryAverage]) {
        let labels: Vec<String> = averages.iter().map(|a| a.category.clone()).collect();
        let max = averages
            .iter()
            .filter_map(|a| a.average.as_f64())
            .fold(f64::NEG_INFINITY, f64::max);

        let bars: Vec<Bar> = averages
            .iter()
            .enumerate()
            .filter_map(|(i, avg)| {
                let value = avg.average.as_f64()?;
                let t = if max > 0.0 { (value / max) as f32 } else { 0.0 };
                Some(
                    Bar::new(i as f64, value)
                        .width(0.7)
                        .fill(crate::charts::viridis(t))
                        .name(&avg.category),
                )
            })
            .collect();

        Plot::new("sector_comparison")
            .height(CHART_HEIGHT)
            .x_axis_label(category_label)
            .y_axis_label("Average Wage")
            .allow_scroll(false)
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round();
                if idx >= 0.0 && (mark.value - idx).abs() < 1e-6 {
                    labels.get(idx as usize).cloned().unwrap_or_default()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).name("Average Wage"));
            });
    }

    /// Box plot per year with every point overlaid.
    pub fn draw_box_chart(ui: &mut egui::Ui, records: &[TidyRecord]) {
        let years = DataProcessor::get_years(records);
        let x_labels = years.clone();

        Plot::new("wage_distribution")
            .height(CHART_HEIGHT)
            .x_axis_label("Year")
            .y_axis_label("Wage")
            .allow_scroll(false)
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round();
                if idx >= 0.0 && (mark.value - idx).abs() < 1e-6 {
                    x_labels.get(idx as usize).cloned().unwrap_or_default()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                for (i, year) in years.iter().enumerate() {
                    let values = DataProcessor::values_for_year(records, year);
                    let Some(summary) = StatsCalculator::box_summary(&values) else {
                        continue;
                    };

                    let color = Self::series_color(0);
                    let box_elem = BoxElem::new(
                        i as f64,
                        BoxSpread::new(
                            summary.lower_whisker,
                            summary.q1,
                            summary.median,
                            summary.q3,
                            summary.upper_whisker,
                        ),
                    )
                    .box_width(0.5)
                    .fill(color.gamma_multiply(0.3))
                    .stroke(egui::Stroke::new(1.5, color))
                    .name(year);

                    plot_ui.box_plot(BoxPlot::new(vec![box_elem]).name(year));

                    let x_positions = Self::beeswarm_positions(&values, i as f64, 0.35);
                    let points: PlotPoints = x_positions
                        .iter()
                        .zip(values.iter())
                        .map(|(&x, &y)| [x, y])
                        .collect();

                    plot_ui.points(
                        Points::new(points)
                            .radius(2.5)
                            .color(color.gamma_multiply(0.7))
                            .name(format!("{} points", year)),
                    );
                }
            });
    }

    /// Filtered wage table, one column per selected year.
    pub fn draw_data_table(ui: &mut egui::Ui, view: &FilteredView) {
        egui::ScrollArea::horizontal()
            .id_salt("wage_overview_scroll")
            .show(ui, |ui| {
                egui::Grid::new("wage_overview")
                    .striped(true)
                    .min_col_width(55.0)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        ui.label(RichText::new(&view.category_label).strong());
                        for year in &view.years {
                            ui.label(RichText::new(year).strong());
                        }
                        ui.end_row();

                        for row in &view.rows {
                            ui.label(&row.category);
                            for value in &row.values {
                                ui.label(value.display());
                            }
                            ui.end_row();
                        }
                    });
            });
    }

    /// Draw statistics table
    pub fn draw_stats_table(ui: &mut egui::Ui, summary: &[SummaryRow]) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new("summary_statistics")
                    .striped(true)
                    .min_col_width(70.0)
                    .spacing([8.0, 4.0])
                    .show(ui, |ui| {
                        ui.label(RichText::new("Year").strong());
                        ui.label(RichText::new("Mean").strong());
                        ui.label(RichText::new("Median").strong());
                        ui.label(RichText::new("Std").strong());
                        ui.end_row();

                        for row in summary {
                            ui.label(&row.year);
                            ui.label(row.mean.display());
                            ui.label(row.median.display());
                            ui.label(row.std.display());
                            ui.end_row();
                        }
                    });
            });
    }
}
