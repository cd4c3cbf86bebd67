//! Statistics Calculator Module
//! Descriptive statistics per year column of a filtered wage view.

use crate::data::{FilteredView, SummaryRow, WageValue};
use statrs::statistics::Statistics;

/// Descriptive statistics for an array of values.
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptiveStats {
    pub count: usize,
    pub mean: WageValue,
    pub median: WageValue,
    pub std: WageValue,
}

/// Five-number summary used by the distribution box plot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxSummary {
    pub lower_whisker: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub upper_whisker: f64,
}

/// Handles statistical calculations.
pub struct StatsCalculator;

impl StatsCalculator {
    /// One summary row per year column of `view`; empty when the view has no rows.
    pub fn summarize(view: &FilteredView) -> Vec<SummaryRow> {
        if view.is_empty() {
            return Vec::new();
        }

        view.years
            .iter()
            .enumerate()
            .map(|(idx, year)| {
                let values: Vec<f64> = view
                    .rows
                    .iter()
                    .filter_map(|row| row.values[idx].as_f64())
                    .collect();
                let stats = Self::compute_descriptive_stats(&values);
                SummaryRow {
                    year: year.clone(),
                    mean: stats.mean,
                    median: stats.median,
                    std: stats.std,
                }
            })
            .collect()
    }

    /// Compute descriptive statistics for an array of values.
    ///
    /// Standard deviation is the sample deviation (n - 1), so it is missing
    /// for fewer than two values. Everything is missing for no values.
    pub fn compute_descriptive_stats(values: &[f64]) -> DescriptiveStats {
        let n = values.len();
        if n == 0 {
            return DescriptiveStats {
                count: 0,
                mean: WageValue::Missing,
                median: WageValue::Missing,
                std: WageValue::Missing,
            };
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let std = if n > 1 {
            WageValue::from_f64(values.iter().std_dev())
        } else {
            WageValue::Missing
        };

        DescriptiveStats {
            count: n,
            mean: WageValue::from_f64(values.iter().mean()),
            median: WageValue::from_f64(Self::percentile(&sorted, 50.0)),
            std,
        }
    }

    /// Calculate percentile using linear interpolation (NumPy compatible).
    pub fn percentile(sorted_values: &[f64], p: f64) -> f64 {
        let n = sorted_values.len();
        if n == 0 {
            return f64::NAN;
        }
        if n == 1 {
            return sorted_values[0];
        }

        let rank = (p / 100.0) * (n - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = (rank.ceil() as usize).min(n - 1);
        let frac = rank - lower as f64;

        if lower == upper {
            sorted_values[lower]
        } else {
            sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
        }
    }

    /// Quartiles with whiskers at the furthest points within 1.5 IQR.
    pub fn box_summary(values: &[f64]) -> Option<BoxSummary> {
        if values.is_empty() {
            return None;
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let q1 = Self::percentile(&sorted, 25.0);
        let median = Self::percentile(&sorted, 50.0);
        let q3 = Self::percentile(&sorted, 75.0);
        let iqr = q3 - q1;

        let lower_whisker = sorted
            .iter()
            .copied()
            .find(|&v| v >= q1 - 1.5 * iqr)
            .unwrap_or(q1);
        let upper_whisker = sorted
            .iter()
            .rev()
            .copied()
            .find(|&v| v <= q3 + 1.5 * iqr)
            .unwrap_or(q3);

        Some(BoxSummary {
            lower_whisker,
            q1,
            median,
            q3,
            upper_whisker,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{WageRow, WageTable};

    fn view(years: &[&str], rows: &[&[WageValue]]) -> FilteredView {
        WageTable {
            category_label: "Province and Sector".to_string(),
            years: years.iter().map(|y| y.to_string()).collect(),
            rows: rows
                .iter()
                .enumerate()
                .map(|(i, values)| WageRow {
                    category: format!("Category {}", i),
                    values: values.to_vec(),
                })
                .collect(),
        }
    }

    fn approx(value: WageValue, expected: f64) -> bool {
        value.as_f64().is_some_and(|v| (v - expected).abs() < 1e-9)
    }

    #[test]
    fn summarizes_each_year_column() {
        use WageValue::Numeric;
        let v = view(
            &["2018"],
            &[&[Numeric(10.0)], &[Numeric(20.0)], &[Numeric(30.0)]],
        );

        let summary = StatsCalculator::summarize(&v);
        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].year, "2018");
        assert!(approx(summary[0].mean, 20.0));
        assert!(approx(summary[0].median, 20.0));
        assert!(approx(summary[0].std, 10.0));
    }

    #[test]
    fn missing_cells_are_excluded() {
        use WageValue::{Missing, Numeric};
        let v = view(
            &["2018", "2019"],
            &[
                &[Numeric(10.0), Missing],
                &[Missing, Numeric(4.0)],
                &[Numeric(30.0), Numeric(8.0)],
            ],
        );

        let summary = StatsCalculator::summarize(&v);
        assert!(approx(summary[0].mean, 20.0));
        assert!(approx(summary[0].median, 20.0));
        assert!(approx(summary[1].mean, 6.0));
        assert!(approx(summary[1].std, 8.0_f64.sqrt()));
    }

    #[test]
    fn empty_view_has_no_summary() {
        let v = view(&["2018", "2019"], &[]);
        assert!(StatsCalculator::summarize(&v).is_empty());
    }

    #[test]
    fn all_missing_year_reports_missing_not_zero() {
        use WageValue::{Missing, Numeric};
        let v = view(&["2018", "2019"], &[&[Numeric(5.0), Missing], &[Numeric(7.0), Missing]]);

        let summary = StatsCalculator::summarize(&v);
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[1].mean, Missing);
        assert_eq!(summary[1].median, Missing);
        assert_eq!(summary[1].std, Missing);
    }

    #[test]
    fn single_value_has_no_sample_deviation() {
        let stats = StatsCalculator::compute_descriptive_stats(&[42.0]);
        assert_eq!(stats.count, 1);
        assert!(approx(stats.mean, 42.0));
        assert!(approx(stats.median, 42.0));
        assert_eq!(stats.std, WageValue::Missing);
    }

    #[test]
    fn median_interpolates_even_counts() {
        let stats = StatsCalculator::compute_descriptive_stats(&[4.0, 1.0, 3.0, 2.0]);
        assert!(approx(stats.median, 2.5));
    }

    #[test]
    fn percentile_interpolates_linearly() {
        let sorted = [10.0, 20.0, 30.0, 40.0, 50.0];
        assert_eq!(StatsCalculator::percentile(&sorted, 25.0), 20.0);
        assert!((StatsCalculator::percentile(&sorted, 10.0) - 14.0).abs() < 1e-9);
        assert!(StatsCalculator::percentile(&[], 50.0).is_nan());
    }

    #[test]
    fn box_summary_clips_whiskers_to_data() {
        let summary = StatsCalculator::box_summary(&[1.0, 2.0, 3.0, 4.0, 100.0]).unwrap();
        assert_eq!(summary.q1, 2.0);
        assert_eq!(summary.median, 3.0);
        assert_eq!(summary.q3, 4.0);
        assert_eq!(summary.lower_whisker, 1.0);
        assert_eq!(summary.upper_whisker, 4.0);
        assert!(StatsCalculator::box_summary(&[]).is_none());
    }
}
