//! CSV writer for export operations
//!
//! Records are written with a fixed `id,fr,fc,spo2` header. The header is
//! always present, even when no records are written. Rows end with CRLF.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::debug;

use crate::error::Result;
use crate::record::{FIELD_NAMES, Record};

use super::{FormatWriter, create_writer, file_size_of, validate_path, write_error};

/// Row terminator
const LINE_ENDING: &[u8] = b"\r\n";

/// Writer for CSV format
pub struct CsvWriter {
    /// Buffered file writer
    writer: BufWriter<File>,
    /// Path to the output file
    path: PathBuf,
    /// Whether the header row has been written
    headers_written: bool,
    /// Number of records written
    written: usize,
}

impl CsvWriter {
    /// Create a new CSV writer, truncating any existing file
    pub async fn new(path: &Path) -> Result<Self> {
        validate_path(path)?;
        let writer = create_writer(path).await?;

        debug!("Created CSV writer for: {}", path.display());

        Ok(Self {
            writer,
            path: path.to_path_buf(),
            headers_written: false,
            written: 0,
        })
    }

    /// Write CSV header row
    async fn write_headers(&mut self) -> Result<()> {
        self.write_line(&FIELD_NAMES).await?;
        self.headers_written = true;
        debug!("Wrote CSV headers: {} fields", FIELD_NAMES.len());
        Ok(())
    }

    /// Write one row of already-ordered values
    async fn write_line(&mut self, values: &[&str]) -> Result<()> {
        let row = values
            .iter()
            .map(|value| Self::escape_csv_value(value))
            .collect::<Vec<_>>()
            .join(",");

        self.writer
            .write_all(row.as_bytes())
            .await
            .map_err(write_error(&self.path))?;
        self.writer
            .write_all(LINE_ENDING)
            .await
            .map_err(write_error(&self.path))?;
        Ok(())
    }

    /// Escape a CSV value if necessary
    ///
    /// Values containing a comma, quote or line break are wrapped in quotes
    /// with inner quotes doubled.
    fn escape_csv_value(value: &str) -> String {
        if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r')
        {
            format!("\"{}\"", value.replace('"', "\"\""))
        } else {
            value.to_string()
        }
    }
}

#[async_trait]
impl FormatWriter for CsvWriter {
    async fn write_batch(&mut self, records: &[Record]) -> Result<usize> {
        if !self.headers_written {
            self.write_headers().await?;
        }

        for record in records {
            self.write_line(&record.values()).await?;
        }

        self.written += records.len();
        debug!("Wrote {} records to CSV (total: {})", records.len(), self.written);

        Ok(records.len())
    }

    async fn finalize(&mut self) -> Result<()> {
        if !self.headers_written {
            self.write_headers().await?;
        }

        self.writer.flush().await.map_err(write_error(&self.path))?;

        debug!("Finalized CSV file: {} ({} records)", self.path.display(), self.written);
        Ok(())
    }

    async fn file_size(&self) -> Result<u64> {
        file_size_of(&self.path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::fs;

    fn record(id: &str, fr: &str) -> Record {
        Record {
            id: id.to_string(),
            age_group: fr.to_string(),
            heart_rate: "120ppm".to_string(),
            oxygen_saturation: "97%".to_string(),
        }
    }

    #[tokio::test]
    async fn test_csv_writer_basic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registros.csv");
        let mut writer = CsvWriter::new(&path).await.unwrap();

        let records = vec![record("ID-001", "30 Anos"), record("ID-002", "64 Anos")];
        assert_eq!(writer.write_batch(&records).await.unwrap(), 2);
        writer.finalize().await.unwrap();

        let content = fs::read_to_string(&path).await.unwrap();
        assert_eq!(
            content,
            "id,fr,fc,spo2\r\nID-001,30 Anos,120ppm,97%\r\nID-002,64 Anos,120ppm,97%\r\n"
        );
    }

    #[tokio::test]
    async fn test_csv_writer_zero_records_has_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registros.csv");
        let mut writer = CsvWriter::new(&path).await.unwrap();
        writer.finalize().await.unwrap();

        let content = fs::read_to_string(&path).await.unwrap();
        assert_eq!(content, "id,fr,fc,spo2\r\n");
    }

    #[tokio::test]
    async fn test_csv_writer_multiple_batches_single_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registros.csv");
        let mut writer = CsvWriter::new(&path).await.unwrap();

        writer.write_batch(&[record("ID-001", "30 Anos")]).await.unwrap();
        writer.write_batch(&[]).await.unwrap();
        writer.write_batch(&[record("ID-002", "31 Anos")]).await.unwrap();
        writer.finalize().await.unwrap();

        let content = fs::read_to_string(&path).await.unwrap();
        assert_eq!(content.lines().count(), 3);
        assert_eq!(content.matches("id,fr,fc,spo2").count(), 1);
    }

    #[tokio::test]
    async fn test_csv_writer_quotes_special_characters() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registros.csv");
        let mut writer = CsvWriter::new(&path).await.unwrap();

        writer
            .write_batch(&[record("ID-001", "30, \"Anos\"")])
            .await
            .unwrap();
        writer.finalize().await.unwrap();

        let content = fs::read_to_string(&path).await.unwrap();
        assert!(content.contains("ID-001,\"30, \"\"Anos\"\"\",120ppm"));
    }

    #[test]
    fn test_csv_escape_value() {
        assert_eq!(CsvWriter::escape_csv_value("simple"), "simple");
        assert_eq!(CsvWriter::escape_csv_value("with,comma"), "\"with,comma\"");
        assert_eq!(CsvWriter::escape_csv_value("with\"quote"), "\"with\"\"quote\"");
        assert_eq!(CsvWriter::escape_csv_value("with\nnewline"), "\"with\nnewline\"");
    }
}
