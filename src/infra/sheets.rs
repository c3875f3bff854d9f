//! Spreadsheet connector used by the sync service.
//!
//! A sheet is a named table of string cells. The bundled connector keeps
//! one `<sheet>.csv` file per sheet inside a directory.

use async_trait::async_trait;
use csv::{ReaderBuilder, Trim, WriterBuilder};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Reads and writes flat rows of a named sheet.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait SpreadsheetConnector: Send + Sync {
    /// Data rows of the sheet, header row excluded
    async fn read_rows(&self, sheet: &str) -> AppResult<Vec<Vec<String>>>;

    /// Replace the sheet with `header` followed by `rows`
    async fn write_rows(
        &self,
        sheet: &str,
        header: Vec<String>,
        rows: Vec<Vec<String>>,
    ) -> AppResult<()>;
}

/// CSV files in a directory, one per sheet.
#[derive(Debug, Clone)]
pub struct CsvSpreadsheet {
    dir: PathBuf,
}

impl CsvSpreadsheet {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Location of a sheet's backing file
    pub fn sheet_path(&self, sheet: &str) -> PathBuf {
        self.dir.join(format!("{}.csv", sheet))
    }
}

#[async_trait]
impl SpreadsheetConnector for CsvSpreadsheet {
    async fn read_rows(&self, sheet: &str) -> AppResult<Vec<Vec<String>>> {
        let path = self.sheet_path(sheet);
        let data = tokio::fs::read(&path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => AppError::external(format!("Sheet '{}' does not exist", sheet)),
            _ => AppError::external(format!("Failed to read {}: {}", path.display(), e)),
        })?;

        // Column counts are checked per row by the importer
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(data.as_slice());

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        tracing::debug!(sheet, rows = rows.len(), "Sheet read");
        Ok(rows)
    }

    async fn write_rows(
        &self,
        sheet: &str,
        header: Vec<String>,
        rows: Vec<Vec<String>>,
    ) -> AppResult<()> {
        let mut writer = WriterBuilder::new().from_writer(vec![]);
        writer.write_record(&header)?;
        for row in &rows {
            writer.write_record(row)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| AppError::external(e.to_string()))?;

        let path = self.sheet_path(sheet);
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| AppError::external(format!("Failed to create {}: {}", self.dir.display(), e)))?;
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| AppError::external(format!("Failed to write {}: {}", path.display(), e)))?;

        tracing::debug!(sheet, rows = rows.len(), "Sheet written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[tokio::test]
    async fn write_then_read_skips_header() {
        let dir = tempfile::tempdir().unwrap();
        let sheets = CsvSpreadsheet::new(dir.path().join("nested"));

        sheets
            .write_rows(
                "courses",
                row(&["id", "name"]),
                vec![row(&["1", "BS Computer Science"]), row(&["", "BS Nursing, Level 2"])],
            )
            .await
            .unwrap();

        let rows = sheets.read_rows("courses").await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], row(&["", "BS Nursing, Level 2"]));
    }

    #[tokio::test]
    async fn missing_sheet_is_external_failure() {
        let dir = tempfile::tempdir().unwrap();
        let sheets = CsvSpreadsheet::new(dir.path());

        let err = sheets.read_rows("faculty").await.unwrap_err();
        assert!(matches!(err, AppError::ExternalService(_)));
    }
}
