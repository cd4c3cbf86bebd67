//! CSV Export Module
//! Serializes derived wage tables to CSV text for download.
//!
//! Each derived shape is first built into a polars `DataFrame` with the
//! column order of the component that produced it, then written with
//! `CsvWriter`: header row, no index column, missing values as empty fields.

use crate::data::{CategoryAverage, FilteredView, TidyRecord, WageValue};
use polars::prelude::*;
use thiserror::Error;

pub const YEAR_HEADER: &str = "Year";
pub const WAGE_HEADER: &str = "Wage";
pub const AVERAGE_HEADER: &str = "Average Wage";
/// Column names the derived exports add next to the category column.
pub const DERIVED_HEADERS: [&str; 3] = [YEAR_HEADER, WAGE_HEADER, AVERAGE_HEADER];

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Export is not valid UTF-8: {0}")]
    Utf8Error(#[from] std::string::FromUtf8Error),
}

/// Something that can be laid out as a single data frame for export.
pub trait ToFrame {
    fn to_frame(&self) -> PolarsResult<DataFrame>;
}

fn wage_column(name: &str, values: impl Iterator<Item = WageValue>) -> Column {
    let values: Vec<Option<f64>> = values.map(WageValue::as_f64).collect();
    Column::new(name.into(), values)
}

impl ToFrame for FilteredView {
    /// `<category label>, <year>...`
    fn to_frame(&self) -> PolarsResult<DataFrame> {
        let categories: Vec<String> = self.rows.iter().map(|r| r.category.clone()).collect();
        let mut columns = vec![Column::new(self.category_label.as_str().into(), categories)];

        for (idx, year) in self.years.iter().enumerate() {
            columns.push(wage_column(year, self.rows.iter().map(|r| r.values[idx])));
        }

        DataFrame::new(columns)
    }
}

/// Tidy records together with the label of their category column.
pub struct TidyTable<'a> {
    pub category_label: &'a str,
    pub records: &'a [TidyRecord],
}

impl ToFrame for TidyTable<'_> {
    /// `<category label>, Year, Wage`
    fn to_frame(&self) -> PolarsResult<DataFrame> {
        let categories: Vec<String> = self.records.iter().map(|r| r.category.clone()).collect();
        let years: Vec<String> = self.records.iter().map(|r| r.year.clone()).collect();

        DataFrame::new(vec![
            Column::new(self.category_label.into(), categories),
            Column::new(YEAR_HEADER.into(), years),
            wage_column(WAGE_HEADER, self.records.iter().map(|r| r.wage)),
        ])
    }
}

/// Category averages together with the label of their category column.
pub struct AverageTable<'a> {
    pub category_label: &'a str,
    pub averages: &'a [CategoryAverage],
}

impl ToFrame for AverageTable<'_> {
    /// `<category label>, Average Wage`
    fn to_frame(&self) -> PolarsResult<DataFrame> {
        let categories: Vec<String> = self.averages.iter().map(|a| a.category.clone()).collect();

        DataFrame::new(vec![
            Column::new(self.category_label.into(), categories),
            wage_column(AVERAGE_HEADER, self.averages.iter().map(|a| a.average)),
        ])
    }
}

/// Serialize any exportable shape to CSV text.
pub fn to_delimited_text<T: ToFrame + ?Sized>(rows: &T) -> Result<String, ExportError> {
    let mut df = rows.to_frame()?;
    let mut buf: Vec<u8> = Vec::new();
    CsvWriter::new(&mut buf)
        .include_header(true)
        .finish(&mut df)?;
    Ok(String::from_utf8(buf)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{filter, parse_table, DataProcessor, WageRow, WageTable};
    use std::collections::BTreeSet;

    fn sample_table() -> WageTable {
        WageTable {
            category_label: "Province and Sector".to_string(),
            years: vec!["2018".to_string(), "2019".to_string()],
            rows: vec![
                WageRow {
                    category: "Urban Male".to_string(),
                    values: vec![WageValue::Numeric(100.0), WageValue::Numeric(110.5)],
                },
                WageRow {
                    category: "Rural, Female".to_string(),
                    values: vec![WageValue::Numeric(80.0), WageValue::Missing],
                },
            ],
        }
    }

    #[test]
    fn filtered_view_round_trips_through_the_loader() {
        let table = sample_table();
        let categories: BTreeSet<String> = table.categories().into_iter().collect();
        let years: BTreeSet<String> = ["2019".to_string()].into_iter().collect();
        let view = filter(&table, &categories, &years);

        let text = to_delimited_text(&view).unwrap();
        let reloaded = parse_table(text.as_bytes()).unwrap();

        assert_eq!(reloaded, view);
    }

    #[test]
    fn full_table_round_trips() {
        let table = sample_table();
        let text = to_delimited_text(&table).unwrap();

        assert!(text.starts_with("Province and Sector,2018,2019"));
        assert_eq!(parse_table(text.as_bytes()).unwrap(), table);
    }

    #[test]
    fn empty_view_exports_header_only() {
        let table = sample_table();
        let view = filter(&table, &BTreeSet::new(), &table.years.iter().cloned().collect());

        let text = to_delimited_text(&view).unwrap();
        assert_eq!(text.trim_end(), "Province and Sector,2018,2019");
        assert!(parse_table(text.as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn tidy_records_export_in_record_order() {
        let table = sample_table();
        let records = DataProcessor::to_tidy(&table);
        let text = to_delimited_text(&TidyTable {
            category_label: &table.category_label,
            records: &records,
        })
        .unwrap();

        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Province and Sector,Year,Wage"));
        assert_eq!(text.lines().count(), records.len() + 1);
        let last = text.lines().last().unwrap();
        assert!(last.starts_with("\"Rural, Female\",2019,"));
    }

    #[test]
    fn averages_export_with_missing_as_empty() {
        let table = sample_table();
        let averages = vec![
            CategoryAverage {
                category: "Urban Male".to_string(),
                average: WageValue::Numeric(105.25),
            },
            CategoryAverage {
                category: "Nowhere".to_string(),
                average: WageValue::Missing,
            },
        ];

        let text = to_delimited_text(&AverageTable {
            category_label: &table.category_label,
            averages: &averages,
        })
        .unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Province and Sector,Average Wage");
        assert_eq!(lines[1], "Urban Male,105.25");
        assert_eq!(lines[2], "Nowhere,");
    }
}
