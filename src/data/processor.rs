//! Data Processor Module
//! Reshapes the wide wage table into long format and aggregates per category.

use super::model::{CategoryAverage, TidyRecord, WageTable, WageValue};
use statrs::statistics::Statistics;
use std::collections::HashSet;

/// Handles data reshaping and per-category aggregation.
pub struct DataProcessor;

impl DataProcessor {
    /// Transform the wide table to long format (stack operation).
    ///
    /// One record per row per year column, row-major, years in table order.
    /// Missing cells are kept as missing records.
    pub fn to_tidy(table: &WageTable) -> Vec<TidyRecord> {
        let mut records = Vec::with_capacity(table.rows.len() * table.years.len());

        for row in &table.rows {
            for (year, wage) in table.years.iter().zip(row.values.iter()) {
                records.push(TidyRecord {
                    category: row.category.clone(),
                    year: year.clone(),
                    wage: *wage,
                });
            }
        }

        records
    }

    /// Long-format records of a single year column, in row order.
    /// Empty when the year is not declared by the table.
    pub fn records_for_year(table: &WageTable, year: &str) -> Vec<TidyRecord> {
        let Some(idx) = table.year_index(year) else {
            return Vec::new();
        };

        table
            .rows
            .iter()
            .map(|row| TidyRecord {
                category: row.category.clone(),
                year: year.to_string(),
                wage: row.values[idx],
            })
            .collect()
    }

    /// Mean wage per row across every declared year.
    ///
    /// Non-numeric cells are ignored; a row with no numeric cell is missing.
    pub fn averages_by_category(table: &WageTable) -> Vec<CategoryAverage> {
        table
            .rows
            .iter()
            .map(|row| {
                let values: Vec<f64> = row.numeric_values().collect();
                let average = if values.is_empty() {
                    WageValue::Missing
                } else {
                    WageValue::from_f64(values.iter().mean())
                };
                CategoryAverage {
                    category: row.category.clone(),
                    average,
                }
            })
            .collect()
    }

    /// Distinct year labels of a record set, in first-appearance order.
    pub fn get_years(records: &[TidyRecord]) -> Vec<String> {
        let mut seen = HashSet::new();
        records
            .iter()
            .filter(|r| seen.insert(r.year.as_str()))
            .map(|r| r.year.clone())
            .collect()
    }

    /// Distinct categories of a record set, in first-appearance order.
    pub fn get_categories(records: &[TidyRecord]) -> Vec<String> {
        let mut seen = HashSet::new();
        records
            .iter()
            .filter(|r| seen.insert(r.category.as_str()))
            .map(|r| r.category.clone())
            .collect()
    }

    /// Numeric wages of one year, missing values dropped.
    pub fn values_for_year(records: &[TidyRecord], year: &str) -> Vec<f64> {
        records
            .iter()
            .filter(|r| r.year == year)
            .filter_map(|r| r.wage.as_f64())
            .collect()
    }
}
