//! CSV loading.

use crate::error::{PlotError, Result};
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// An in-memory table: a header plus ordered rows of raw cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Dataset {
    /// Build a dataset from a header and rows. Panics unless every row has
    /// one cell per column.
    #[cfg(test)]
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        assert!(
            rows.iter().all(|r| r.len() == columns.len()),
            "every row needs {} cells",
            columns.len()
        );
        Self { columns, rows }
    }

    /// Load a CSV file with a header row.
    pub fn from_path(path: &Path) -> Result<Self> {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|source| PlotError::DataParse {
                path: path.to_path_buf(),
                source,
            })?;

        let dataset = Self::from_csv_reader(reader, path)?;
        debug!(
            "Loaded {} rows x {} columns from {}",
            dataset.len(),
            dataset.columns.len(),
            path.display()
        );
        Ok(dataset)
    }

    /// Load CSV text from any reader. `origin` is only used in error messages.
    pub fn from_reader<R: Read>(rdr: R, origin: &Path) -> Result<Self> {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(rdr);
        Self::from_csv_reader(reader, origin)
    }

    fn from_csv_reader<R: Read>(mut reader: csv::Reader<R>, origin: &Path) -> Result<Self> {
        let parse_err = |source| PlotError::DataParse {
            path: origin.to_path_buf(),
            source,
        };

        let columns: Vec<String> = reader
            .headers()
            .map_err(parse_err)?
            .iter()
            .map(String::from)
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(parse_err)?;
            rows.push(record.iter().map(String::from).collect());
        }

        if rows.is_empty() {
            return Err(PlotError::EmptyDataset(origin.to_path_buf()));
        }

        Ok(Self { columns, rows })
    }

    /// Column names in header order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    fn column_index(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| PlotError::MissingColumn(name.to_string()))
    }

    /// Raw cells of one column, in row order.
    pub fn column(&self, name: &str) -> Result<Vec<&str>> {
        let idx = self.column_index(name)?;
        Ok(self.rows.iter().map(|row| row[idx].as_str()).collect())
    }

    /// Cells of one column coerced to finite `f64`.
    ///
    /// Row numbers in errors are 1-based data rows (the header is not counted).
    pub fn numeric_column(&self, name: &str) -> Result<Vec<f64>> {
        self.column(name)?
            .into_iter()
            .enumerate()
            .map(|(i, cell)| match cell.parse::<f64>() {
                Ok(v) if v.is_finite() => Ok(v),
                _ => Err(PlotError::NonNumeric {
                    column: name.to_string(),
                    row: i + 1,
                    value: cell.to_string(),
                }),
            })
            .collect()
    }
}
