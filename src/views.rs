//! Dashboard Views
//! Every derived view the dashboard renders, computed from the table and
//! the current selection in one pass.

use std::collections::BTreeSet;

use crate::data::{
    apply_selection, filter, CategoryAverage, DataProcessor, FilteredView, Selection, SummaryRow,
    TidyRecord, WageTable,
};
use crate::export::{to_delimited_text, AverageTable, ExportError, TidyTable};
use crate::stats::StatsCalculator;

/// The three downloadable datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    FilteredData,
    TrendData,
    SectorComparison,
}

impl ExportKind {
    pub const ALL: [ExportKind; 3] = [
        ExportKind::FilteredData,
        ExportKind::TrendData,
        ExportKind::SectorComparison,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            ExportKind::FilteredData => "filtered_wages.csv",
            ExportKind::TrendData => "line_chart_data.csv",
            ExportKind::SectorComparison => "sector_comparison.csv",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ExportKind::FilteredData => "Download Filtered Data",
            ExportKind::TrendData => "Download Line Chart Data",
            ExportKind::SectorComparison => "Download Sector Comparison Data",
        }
    }
}

/// Derived data for one selection.
#[derive(Debug, Clone, Default)]
pub struct DashboardViews {
    /// Selected rows and years.
    pub view: FilteredView,
    pub summary: Vec<SummaryRow>,
    /// Tidy records of `view`, for the trend chart.
    pub trend: Vec<TidyRecord>,
    /// Per-category averages over the full table and all years.
    pub averages: Vec<CategoryAverage>,
    /// Every category, selected years only.
    pub heatmap: Vec<TidyRecord>,
    /// Every category, every year.
    pub distribution: Vec<TidyRecord>,
    /// Every category for the pie year.
    pub pie: Vec<TidyRecord>,
    pub pie_year: Option<String>,
}

impl DashboardViews {
    pub fn compute(table: &WageTable, selection: &Selection, pie_year: Option<&str>) -> Self {
        let view = apply_selection(table, selection);
        let summary = StatsCalculator::summarize(&view);
        let trend = DataProcessor::to_tidy(&view);
        let averages = DataProcessor::averages_by_category(table);

        let all_categories: BTreeSet<String> = table.categories().into_iter().collect();
        let heatmap_table = filter(table, &all_categories, &selection.years);
        let heatmap = DataProcessor::to_tidy(&heatmap_table);

        let distribution = DataProcessor::to_tidy(table);

        let pie_year = pie_year
            .filter(|year| table.year_index(year).is_some())
            .or_else(|| table.years.first().map(String::as_str))
            .map(str::to_string);
        let pie = pie_year
            .as_deref()
            .map(|year| DataProcessor::records_for_year(table, year))
            .unwrap_or_default();

        log::debug!(
            "Recomputed views: {} rows x {} years selected",
            view.row_count(),
            view.years.len()
        );

        Self {
            view,
            summary,
            trend,
            averages,
            heatmap,
            distribution,
            pie,
            pie_year,
        }
    }

    /// CSV text for one of the downloadable datasets.
    pub fn export(&self, kind: ExportKind) -> Result<String, ExportError> {
        let category_label = self.view.category_label.as_str();
        match kind {
            ExportKind::FilteredData => to_delimited_text(&self.view),
            ExportKind::TrendData => to_delimited_text(&TidyTable {
                category_label,
                records: &self.trend,
            }),
            ExportKind::SectorComparison => to_delimited_text(&AverageTable {
                category_label,
                averages: &self.averages,
            }),
        }
    }
}
