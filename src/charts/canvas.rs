//! Painted Charts
//! Heatmap and pie chart drawn directly with the egui painter,
//! for the chart types egui_plot does not provide.

use crate::charts::plotter::PALETTE;
use crate::data::{DataProcessor, TidyRecord};
use egui::{Color32, Pos2, RichText, Sense, Shape, Stroke, Vec2};
use std::f32::consts::TAU;

const HEATMAP_CELL: Vec2 = Vec2::new(56.0, 22.0);
const PIE_RADIUS: f32 = 140.0;

// Color scale stops, low to high.
const PLASMA: [Color32; 5] = [
    Color32::from_rgb(13, 8, 135),
    Color32::from_rgb(126, 3, 168),
    Color32::from_rgb(204, 71, 120),
    Color32::from_rgb(248, 149, 64),
    Color32::from_rgb(240, 249, 33),
];
const VIRIDIS: [Color32; 5] = [
    Color32::from_rgb(68, 1, 84),
    Color32::from_rgb(59, 82, 139),
    Color32::from_rgb(33, 145, 140),
    Color32::from_rgb(94, 201, 98),
    Color32::from_rgb(253, 231, 37),
];

fn interpolate(stops: &[Color32], t: f32) -> Color32 {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let scaled = t * (stops.len() - 1) as f32;
    let lower = scaled.floor() as usize;
    let upper = (lower + 1).min(stops.len() - 1);
    let frac = scaled - lower as f32;

    let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * frac).round() as u8;
    let (a, b) = (stops[lower], stops[upper]);
    Color32::from_rgb(mix(a.r(), b.r()), mix(a.g(), b.g()), mix(a.b(), b.b()))
}

/// Plasma color scale, `t` in `[0, 1]`.
pub fn plasma(t: f32) -> Color32 {
    interpolate(&PLASMA, t)
}

/// Viridis color scale, `t` in `[0, 1]`.
pub fn viridis(t: f32) -> Color32 {
    interpolate(&VIRIDIS, t)
}

/// Heatmap of wages by category (rows) and year (columns).
///
/// `records` must be row-major with the same years in every row.
pub fn draw_heatmap(ui: &mut egui::Ui, records: &[TidyRecord]) {
    let years = DataProcessor::get_years(records);
    if records.is_empty() {
        ui.label("No data for the selected years");
        return;
    }

    let values: Vec<f64> = records.iter().filter_map(|r| r.wage.as_f64()).collect();
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;

    egui::ScrollArea::horizontal()
        .id_salt("heatmap_scroll")
        .show(ui, |ui| {
            egui::Grid::new("wage_heatmap")
                .spacing([2.0, 2.0])
                .show(ui, |ui| {
                    ui.label("");
                    for year in &years {
                        ui.label(RichText::new(year).strong());
                    }
                    ui.end_row();

                    for row in records.chunks(years.len()) {
                        ui.label(&row[0].category);
                        for record in row {
                            let (rect, response) = ui.allocate_exact_size(HEATMAP_CELL, Sense::hover());
                            let fill = match record.wage.as_f64() {
                                Some(v) if span > 0.0 => plasma(((v - min) / span) as f32),
                                Some(_) => plasma(0.5),
                                None => Color32::DARK_GRAY,
                            };
                            ui.painter().rect_filled(rect, 2.0, fill);
                            response.on_hover_text(format!(
                                "{} {}: {}",
                                record.category,
                                record.year,
                                record.wage.display()
                            ));
                        }
                        ui.end_row();
                    }
                });
        });

    if !values.is_empty() {
        ui.horizontal(|ui| {
            ui.label(format!("{:.0}", min));
            let (rect, _) = ui.allocate_exact_size(Vec2::new(160.0, 12.0), Sense::hover());
            let steps = 32;
            let step_w = rect.width() / steps as f32;
            for i in 0..steps {
                let x = rect.left() + i as f32 * step_w;
                let cell = egui::Rect::from_min_size(
                    Pos2::new(x, rect.top()),
                    Vec2::new(step_w + 0.5, rect.height()),
                );
                ui.painter()
                    .rect_filled(cell, 0.0, plasma(i as f32 / (steps - 1) as f32));
            }
            ui.label(format!("{:.0}", max));
        });
    }
}

/// One pie wedge: label, value and share of the total.
#[derive(Debug, Clone, PartialEq)]
pub struct Wedge {
    pub label: String,
    pub value: f64,
    pub fraction: f64,
}

/// Wedges for the positive numeric wages, in record order.
pub fn pie_wedges(records: &[TidyRecord]) -> Vec<Wedge> {
    let positive: Vec<(&str, f64)> = records
        .iter()
        .filter_map(|r| Some((r.category.as_str(), r.wage.as_f64()?)))
        .filter(|(_, v)| *v > 0.0)
        .collect();
    let total: f64 = positive.iter().map(|(_, v)| v).sum();

    positive
        .into_iter()
        .map(|(label, value)| Wedge {
            label: label.to_string(),
            value,
            fraction: value / total,
        })
        .collect()
}

/// Pie chart of each category's share of the year's wages.
pub fn draw_pie(ui: &mut egui::Ui, records: &[TidyRecord]) {
    let wedges = pie_wedges(records);
    if wedges.is_empty() {
        ui.label("No numeric wages for this year");
        return;
    }

    ui.horizontal(|ui| {
        let (rect, response) =
            ui.allocate_exact_size(Vec2::splat(PIE_RADIUS * 2.0 + 8.0), Sense::hover());
        let center = rect.center();
        let painter = ui.painter_at(rect);
        let hover = response.hover_pos();
        let mut hovered: Option<&Wedge> = None;

        let mut start = -TAU / 4.0;
        for (i, wedge) in wedges.iter().enumerate() {
            let sweep = wedge.fraction as f32 * TAU;
            let color = PALETTE[i % PALETTE.len()];

            // Fan of thin triangles keeps every shape convex.
            let segments = ((sweep / TAU) * 90.0).ceil().max(1.0) as usize;
            for s in 0..segments {
                let a0 = start + sweep * s as f32 / segments as f32;
                let a1 = start + sweep * (s + 1) as f32 / segments as f32;
                let p0 = center + PIE_RADIUS * Vec2::angled(a0);
                let p1 = center + PIE_RADIUS * Vec2::angled(a1);
                painter.add(Shape::convex_polygon(
                    vec![center, p0, p1],
                    color,
                    Stroke::NONE,
                ));
            }

            if let Some(pos) = hover {
                let offset = pos - center;
                if offset.length() <= PIE_RADIUS {
                    let mut angle = offset.angle() - start;
                    angle = angle.rem_euclid(TAU);
                    if angle < sweep {
                        hovered = Some(wedge);
                    }
                }
            }

            start += sweep;
        }

        if let Some(wedge) = hovered {
            response.on_hover_text(format!(
                "{}: {:.2} ({:.1}%)",
                wedge.label,
                wedge.value,
                wedge.fraction * 100.0
            ));
        }

        ui.vertical(|ui| {
            for (i, wedge) in wedges.iter().enumerate() {
                ui.horizontal(|ui| {
                    let (swatch, _) = ui.allocate_exact_size(Vec2::splat(12.0), Sense::hover());
                    ui.painter()
                        .rect_filled(swatch, 2.0, PALETTE[i % PALETTE.len()]);
                    ui.label(format!("{} ({:.1}%)", wedge.label, wedge.fraction * 100.0));
                });
            }
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::WageValue;

    fn record(category: &str, wage: WageValue) -> TidyRecord {
        TidyRecord {
            category: category.to_string(),
            year: "2020".to_string(),
            wage,
        }
    }

    #[test]
    fn wedges_skip_missing_and_non_positive() {
        let records = vec![
            record("A", WageValue::Numeric(30.0)),
            record("B", WageValue::Missing),
            record("C", WageValue::Numeric(0.0)),
            record("D", WageValue::Numeric(10.0)),
        ];

        let wedges = pie_wedges(&records);
        assert_eq!(wedges.len(), 2);
        assert_eq!(wedges[0].label, "A");
        assert!((wedges[0].fraction - 0.75).abs() < 1e-9);
        assert!((wedges[1].fraction - 0.25).abs() < 1e-9);
    }

    #[test]
    fn no_numeric_wages_means_no_wedges() {
        assert!(pie_wedges(&[record("A", WageValue::Missing)]).is_empty());
    }

    #[test]
    fn color_scales_hit_their_end_stops() {
        assert_eq!(plasma(0.0), PLASMA[0]);
        assert_eq!(plasma(1.0), PLASMA[4]);
        assert_eq!(viridis(2.0), VIRIDIS[4]);
        assert_eq!(viridis(f32::NAN), VIRIDIS[0]);
    }
}
