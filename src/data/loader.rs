//! CSV Data Loader Module
//! Reads the wide wage CSV into a typed table, once per process.

use super::model::{WageRow, WageTable, WageValue};
use crate::export::DERIVED_HEADERS;
use csv::ReaderBuilder;
use std::collections::HashSet;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("missing header row")]
    MissingHeader,
    #[error("duplicate column label '{0}'")]
    DuplicateHeader(String),
    #[error("category column cannot be named '{0}'")]
    ReservedHeader(String),
}

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Data unavailable ({}): {reason}", path.display())]
    DataUnavailable { path: PathBuf, reason: String },
}

/// Read a wage table from any CSV source.
///
/// The first header cell labels the category column, the remaining header
/// cells are year labels kept verbatim. Header labels must be distinct, and
/// the category label must not clash with a derived export column. Every
/// record must have exactly as many fields as the header.
pub fn parse_table<R: Read>(source: R) -> Result<WageTable, ParseError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(source);

    let headers = reader.headers()?.clone();
    let mut seen = HashSet::new();
    if let Some(dup) = headers.iter().find(|h| !seen.insert(*h)) {
        return Err(ParseError::DuplicateHeader(dup.to_string()));
    }
    let mut labels = headers.iter().map(|h| h.to_string());
    let Some(category_label) = labels.next() else {
        return Err(ParseError::MissingHeader);
    };
    if DERIVED_HEADERS.contains(&category_label.as_str()) {
        return Err(ParseError::ReservedHeader(category_label));
    }
    let years: Vec<String> = labels.collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let mut fields = record.iter();
        let category = fields.next().unwrap_or_default().to_string();
        let values = fields.map(WageValue::parse).collect();
        rows.push(WageRow { category, values });
    }

    Ok(WageTable {
        category_label,
        years,
        rows,
    })
}

/// Read a wage table from a file path.
pub fn load_table(path: &Path) -> Result<WageTable, LoaderError> {
    let unavailable = |reason: String| LoaderError::DataUnavailable {
        path: path.to_path_buf(),
        reason,
    };

    let file = std::fs::File::open(path).map_err(|e| unavailable(e.to_string()))?;
    parse_table(file).map_err(|e| unavailable(e.to_string()))
}

/// Owns the dataset path and the memoized table.
pub struct DataLoader {
    path: PathBuf,
    table: Option<WageTable>,
}

impl DataLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            table: None,
        }
    }

    /// Load the table, reading the file only on the first call.
    pub fn load(&mut self) -> Result<&WageTable, LoaderError> {
        let table = match self.table.take() {
            Some(table) => table,
            None => {
                let table = load_table(&self.path)?;
                log::info!(
                    "Loaded {} rows, {} years from {}",
                    table.row_count(),
                    table.years.len(),
                    self.path.display()
                );
                table
            }
        };
        Ok(self.table.insert(table))
    }

    /// Get the table if it has been loaded.
    pub fn table(&self) -> Option<&WageTable> {
        self.table.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_csv(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn parses_header_and_cells() {
        let table = parse_table(
            "Province and Sector,2018,2019\nWestern Urban,100,110\nCentral Rural,80,n/a\n"
                .as_bytes(),
        )
        .unwrap();

        assert_eq!(table.category_label, "Province and Sector");
        assert_eq!(table.years, vec!["2018", "2019"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows[0].category, "Western Urban");
        assert_eq!(
            table.rows[0].values,
            vec![WageValue::Numeric(100.0), WageValue::Numeric(110.0)]
        );
        assert_eq!(
            table.rows[1].values,
            vec![WageValue::Numeric(80.0), WageValue::Missing]
        );
    }

    #[test]
    fn quoted_categories_keep_commas() {
        let table = parse_table("Sector,2020\n\"Western, Urban\",1500\n".as_bytes()).unwrap();
        assert_eq!(table.rows[0].category, "Western, Urban");
    }

    #[test]
    fn header_only_file_is_an_empty_table() {
        let table = parse_table("Sector,2018,2019\n".as_bytes()).unwrap();
        assert_eq!(table.years.len(), 2);
        assert!(table.is_empty());
    }

    #[test]
    fn empty_file_is_rejected() {
        assert!(matches!(
            parse_table("".as_bytes()),
            Err(ParseError::MissingHeader)
        ));
    }

    #[test]
    fn repeated_header_labels_are_rejected() {
        assert!(matches!(
            parse_table("Sector,2018,2018\nA,1,2\n".as_bytes()),
            Err(ParseError::DuplicateHeader(label)) if label == "2018"
        ));
        assert!(matches!(
            parse_table("2018,2018,2019\nA,1,2\n".as_bytes()),
            Err(ParseError::DuplicateHeader(_))
        ));
    }

    #[test]
    fn category_label_cannot_shadow_export_columns() {
        for label in ["Year", "Wage", "Average Wage"] {
            let text = format!("{},2018\nA,1\n", label);
            assert!(matches!(
                parse_table(text.as_bytes()),
                Err(ParseError::ReservedHeader(l)) if l == label
            ));
        }
    }

    #[test]
    fn duplicate_years_in_file_are_data_unavailable() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(dir.path(), "dup.csv", "Sector,2018,2018\nA,1,2\n");
        let mut loader = DataLoader::new(&path);

        assert!(matches!(
            loader.load(),
            Err(LoaderError::DataUnavailable { .. })
        ));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let dir = TempDir::new().unwrap();
        let short = write_csv(dir.path(), "short.csv", "Sector,2018,2019\nA,1\n");
        let long = write_csv(dir.path(), "long.csv", "Sector,2018\nA,1,2\n");

        assert!(matches!(
            load_table(&short),
            Err(LoaderError::DataUnavailable { .. })
        ));
        assert!(matches!(
            load_table(&long),
            Err(LoaderError::DataUnavailable { .. })
        ));
    }

    #[test]
    fn missing_file_is_data_unavailable() {
        let dir = TempDir::new().unwrap();
        let mut loader = DataLoader::new(dir.path().join("absent.csv"));

        let err = loader.load().unwrap_err();
        assert!(matches!(err, LoaderError::DataUnavailable { .. }));
        assert!(loader.table().is_none());
    }

    #[test]
    fn load_reads_the_file_once() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(dir.path(), "wages.csv", "Sector,2018\nA,10\n");
        let mut loader = DataLoader::new(&path);

        let first = loader.load().unwrap().clone();
        std::fs::remove_file(&path).unwrap();
        let second = loader.load().unwrap();

        assert_eq!(&first, second);
    }
}
