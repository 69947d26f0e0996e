use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;
use thiserror::Error;

use quiz_core::model::RawRow;

/// Errors surfaced by a single corpus source.
///
/// A failing source never aborts its siblings; the assembler collects
/// these per source and proceeds with whatever loaded.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SourceError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a json array of row objects")]
    NotAnArray,

    #[error("delimited source has no header row")]
    MissingHeader,
}

/// One tabular source of raw question rows.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Label identifying this source in IDs and error messages.
    fn label(&self) -> &str;

    /// Fetches all rows of this source.
    ///
    /// # Errors
    ///
    /// Returns `SourceError` when the source is unreachable or malformed.
    async fn fetch_rows(&self) -> Result<Vec<RawRow>, SourceError>;
}

/// Fixed rows held in memory, for tests and embedded banks.
#[derive(Debug, Clone)]
pub struct InMemorySource {
    label: String,
    rows: Vec<RawRow>,
}

impl InMemorySource {
    #[must_use]
    pub fn new(label: impl Into<String>, rows: Vec<RawRow>) -> Self {
        Self {
            label: label.into(),
            rows,
        }
    }
}

#[async_trait]
impl QuestionSource for InMemorySource {
    fn label(&self) -> &str {
        &self.label
    }

    async fn fetch_rows(&self) -> Result<Vec<RawRow>, SourceError> {
        Ok(self.rows.clone())
    }
}

/// A JSON file holding an array of row objects.
///
/// Scalar field values are accepted and stringified; null, nested
/// objects, and arrays count as missing fields. Non-object array entries
/// are skipped.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    label: String,
    path: PathBuf,
}

impl JsonFileSource {
    #[must_use]
    pub fn new(label: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            label: label.into(),
            path: path.into(),
        }
    }
}

#[async_trait]
impl QuestionSource for JsonFileSource {
    fn label(&self) -> &str {
        &self.label
    }

    async fn fetch_rows(&self) -> Result<Vec<RawRow>, SourceError> {
        let text = std::fs::read_to_string(&self.path)?;
        let value: Value = serde_json::from_str(&text)?;
        let Value::Array(entries) = value else {
            return Err(SourceError::NotAnArray);
        };

        let mut rows = Vec::with_capacity(entries.len());
        for entry in entries {
            let Value::Object(object) = entry else {
                continue;
            };
            let mut row = RawRow::new();
            for (name, field) in object {
                match field {
                    Value::String(s) => row.set(name, s),
                    Value::Number(n) => row.set(name, n.to_string()),
                    Value::Bool(b) => row.set(name, b.to_string()),
                    _ => {}
                }
            }
            rows.push(row);
        }
        Ok(rows)
    }
}

/// A delimited text file with a header row naming the fields.
///
/// No quoting rules: lines are split on the delimiter and cells trimmed.
/// Blank lines are skipped; short rows leave trailing fields missing.
#[derive(Debug, Clone)]
pub struct DelimitedFileSource {
    label: String,
    path: PathBuf,
    delimiter: char,
}

impl DelimitedFileSource {
    #[must_use]
    pub fn new(label: impl Into<String>, path: impl Into<PathBuf>, delimiter: char) -> Self {
        Self {
            label: label.into(),
            path: path.into(),
            delimiter,
        }
    }

    /// Tab-separated source.
    #[must_use]
    pub fn tsv(label: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::new(label, path, '\t')
    }

    /// Comma-separated source (unquoted cells only).
    #[must_use]
    pub fn csv(label: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::new(label, path, ',')
    }
}

#[async_trait]
impl QuestionSource for DelimitedFileSource {
    fn label(&self) -> &str {
        &self.label
    }

    async fn fetch_rows(&self) -> Result<Vec<RawRow>, SourceError> {
        let text = std::fs::read_to_string(&self.path)?;
        let mut lines = text.lines().filter(|line| !line.trim().is_empty());

        let header = lines.next().ok_or(SourceError::MissingHeader)?;
        let fields: Vec<&str> = header.split(self.delimiter).map(str::trim).collect();

        let mut rows = Vec::new();
        for line in lines {
            let mut row = RawRow::new();
            for (name, cell) in fields.iter().zip(line.split(self.delimiter)) {
                row.set(*name, cell.trim());
            }
            rows.push(row);
        }
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn in_memory_source_returns_its_rows() {
        let rows = vec![RawRow::new().with("question", "Q")];
        let source = InMemorySource::new("mem", rows.clone());
        assert_eq!(source.label(), "mem");
        assert_eq!(source.fetch_rows().await.unwrap(), rows);
    }

    #[tokio::test]
    async fn json_source_stringifies_scalars_and_skips_nulls() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bank.json");
        std::fs::write(
            &path,
            r#"[{"question": "Q", "id": 17, "topic": null}, "not-a-row"]"#,
        )
        .unwrap();

        let rows = JsonFileSource::new("bank", &path).fetch_rows().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("question"), Some("Q"));
        assert_eq!(rows[0].get("id"), Some("17"));
        assert_eq!(rows[0].get("topic"), None);
    }

    #[tokio::test]
    async fn json_source_rejects_non_array_documents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bank.json");
        std::fs::write(&path, r#"{"question": "Q"}"#).unwrap();

        let err = JsonFileSource::new("bank", &path)
            .fetch_rows()
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::NotAnArray));
    }

    #[tokio::test]
    async fn delimited_source_maps_header_to_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bank.tsv");
        std::fs::write(&path, "question\ttopic\nWhat?\tSQL\nShort row\n").unwrap();

        let rows = DelimitedFileSource::tsv("bank", &path)
            .fetch_rows()
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("topic"), Some("SQL"));
        assert_eq!(rows[1].get("question"), Some("Short row"));
        assert_eq!(rows[1].get("topic"), None);
    }

    #[tokio::test]
    async fn missing_file_surfaces_io_error() {
        let err = JsonFileSource::new("gone", "/no/such/file.json")
            .fetch_rows()
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::Io(_)));
    }
}
