//! Wage Data Model
//! Typed cells, the wide wage table and the shapes derived from it.

use std::collections::{BTreeSet, HashSet};

/// A single wage cell after numeric coercion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WageValue {
    Numeric(f64),
    Missing,
}

impl WageValue {
    /// Coerce a raw text cell. Anything that is not a decimal number
    /// (including empty text and `NaN`) becomes `Missing`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<f64>() {
            Ok(v) => Self::from_f64(v),
            Err(_) => WageValue::Missing,
        }
    }

    /// Wrap a computed float, mapping NaN to `Missing`.
    pub fn from_f64(value: f64) -> Self {
        if value.is_nan() {
            WageValue::Missing
        } else {
            WageValue::Numeric(value)
        }
    }

    pub fn as_f64(self) -> Option<f64> {
        match self {
            WageValue::Numeric(v) => Some(v),
            WageValue::Missing => None,
        }
    }

    pub fn is_missing(self) -> bool {
        matches!(self, WageValue::Missing)
    }

    /// Two-decimal display used by the dashboard tables.
    pub fn display(self) -> String {
        match self {
            WageValue::Numeric(v) => format!("{:.2}", v),
            WageValue::Missing => "-".to_string(),
        }
    }
}

/// One category row of the wide table: a value per declared year.
#[derive(Debug, Clone, PartialEq)]
pub struct WageRow {
    pub category: String,
    pub values: Vec<WageValue>,
}

impl WageRow {
    pub fn numeric_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().filter_map(|v| v.as_f64())
    }
}

/// Wide-format wage table: one label column plus one column per year.
///
/// Every row carries exactly `years.len()` values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WageTable {
    pub category_label: String,
    pub years: Vec<String>,
    pub rows: Vec<WageRow>,
}

/// A row/column projection of a [`WageTable`]. Same shape as the table.
pub type FilteredView = WageTable;

impl WageTable {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct categories in first-appearance order.
    pub fn categories(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.rows
            .iter()
            .filter(|row| seen.insert(row.category.as_str()))
            .map(|row| row.category.clone())
            .collect()
    }

    /// Position of a year label among the declared columns.
    pub fn year_index(&self, year: &str) -> Option<usize> {
        self.years.iter().position(|y| y == year)
    }
}

/// User choice of categories and years. Order carries no meaning.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Selection {
    pub categories: BTreeSet<String>,
    pub years: BTreeSet<String>,
}

impl Selection {
    /// First category only, every year.
    pub fn default_for(table: &WageTable) -> Self {
        Self {
            categories: table.categories().into_iter().take(1).collect(),
            years: table.years.iter().cloned().collect(),
        }
    }
}

/// Long-format record: one per (category, year) cell.
#[derive(Debug, Clone, PartialEq)]
pub struct TidyRecord {
    pub category: String,
    pub year: String,
    pub wage: WageValue,
}

/// Mean wage of a category across every declared year.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryAverage {
    pub category: String,
    pub average: WageValue,
}

/// Descriptive statistics of one year column.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub year: String,
    pub mean: WageValue,
    pub median: WageValue,
    pub std: WageValue,
}
