use std::collections::BTreeSet;

use super::model::{FilteredView, Selection, WageRow, WageTable};

/// Project `table` onto the selected categories and years.
///
/// Both axes keep table order. An empty category set selects no rows;
/// labels that do not occur in the table are ignored.
pub fn filter(
    table: &WageTable,
    selected_categories: &BTreeSet<String>,
    selected_years: &BTreeSet<String>,
) -> FilteredView {
    let year_indices: Vec<usize> = table
        .years
        .iter()
        .enumerate()
        .filter(|(_, year)| selected_years.contains(*year))
        .map(|(i, _)| i)
        .collect();

    let rows = table
        .rows
        .iter()
        .filter(|row| selected_categories.contains(&row.category))
        .map(|row| WageRow {
            category: row.category.clone(),
            values: year_indices.iter().map(|&i| row.values[i]).collect(),
        })
        .collect();

    FilteredView {
        category_label: table.category_label.clone(),
        years: year_indices.iter().map(|&i| table.years[i].clone()).collect(),
        rows,
    }
}

/// [`filter`] driven by a [`Selection`].
pub fn apply_selection(table: &WageTable, selection: &Selection) -> FilteredView {
    filter(table, &selection.categories, &selection.years)
}
