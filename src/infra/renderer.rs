//! Report document rendering.

use chrono::{DateTime, Utc};
use csv::WriterBuilder;

use crate::errors::{AppError, AppResult};

/// Renderer-neutral report content.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportDocument {
    pub title: String,
    /// Resolved filter labels in display order, e.g. ("Course", "BSCS")
    pub labels: Vec<(String, String)>,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub generated_at: DateTime<Utc>,
}

/// Rendered output ready to be stored or sent to a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Turns report content into a downloadable document.
pub trait DocumentRenderer: Send + Sync {
    fn render(&self, document: &ReportDocument) -> AppResult<RenderedDocument>;
}

/// Writes a label header block followed by the report table as CSV.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvDocumentRenderer;

impl CsvDocumentRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentRenderer for CsvDocumentRenderer {
    fn render(&self, document: &ReportDocument) -> AppResult<RenderedDocument> {
        let mut writer = WriterBuilder::new()
            .flexible(true)
            .from_writer(vec![]);

        writer.write_record([document.title.as_str()])?;
        for (label, value) in &document.labels {
            writer.write_record([label.as_str(), value.as_str()])?;
        }
        let generated = document.generated_at.to_rfc3339();
        writer.write_record(["Generated", generated.as_str()])?;
        writer.write_record(&document.columns)?;
        for row in &document.rows {
            writer.write_record(row)?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| AppError::internal(e.to_string()))?;

        Ok(RenderedDocument {
            filename: format!(
                "{}-{}.csv",
                slug(&document.title),
                document.generated_at.format("%Y%m%d%H%M%S")
            ),
            content_type: "text/csv; charset=utf-8",
            bytes,
        })
    }
}

fn slug(title: &str) -> String {
    title
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn csv_layout_and_filename() {
        let document = ReportDocument {
            title: "Student Report".to_string(),
            labels: vec![("Course".to_string(), "BSCS".to_string())],
            columns: vec!["Student Number".to_string(), "Name".to_string()],
            rows: vec![vec!["2024-001".to_string(), "Cruz, Ana".to_string()]],
            generated_at: Utc.with_ymd_and_hms(2024, 6, 1, 8, 30, 0).unwrap(),
        };

        let rendered = CsvDocumentRenderer::new().render(&document).unwrap();
        let text = String::from_utf8(rendered.bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(rendered.filename, "student-report-20240601083000.csv");
        assert_eq!(lines[0], "Student Report");
        assert_eq!(lines[1], "Course,BSCS");
        assert_eq!(lines[3], "Student Number,Name");
        assert_eq!(lines[4], "2024-001,\"Cruz, Ana\"");
    }
}
