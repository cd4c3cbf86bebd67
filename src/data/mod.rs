//! Data module - CSV loading, filtering and reshaping

mod filter;
mod loader;
mod model;
mod processor;

pub use filter::{apply_selection, filter};
pub use loader::DataLoader;
#[cfg(test)]
pub use loader::parse_table;
pub use model::{
    CategoryAverage, FilteredView, Selection, SummaryRow, TidyRecord, WageRow, WageTable,
    WageValue,
};
pub use processor::DataProcessor;
