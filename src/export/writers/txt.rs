//! Plain text writer for export operations
//!
//! Each record is written on its own line as a mapping literal.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::debug;

use crate::error::Result;
use crate::record::Record;

use super::{FormatWriter, create_writer, file_size_of, validate_path, write_error};

/// Writer for the line-per-record text format
pub struct TxtWriter {
    /// Buffered file writer
    writer: BufWriter<File>,
    /// Path to the output file
    path: PathBuf,
    /// Number of records written
    written: usize,
}

impl TxtWriter {
    /// Create a new text writer, truncating any existing file
    pub async fn new(path: &Path) -> Result<Self> {
        validate_path(path)?;
        let writer = create_writer(path).await?;

        debug!("Created TXT writer for: {}", path.display());

        Ok(Self {
            writer,
            path: path.to_path_buf(),
            written: 0,
        })
    }
}

#[async_trait]
impl FormatWriter for TxtWriter {
    async fn write_batch(&mut self, records: &[Record]) -> Result<usize> {
        for record in records {
            let line = record.to_mapping_literal();
            self.writer
                .write_all(line.as_bytes())
                .await
                .map_err(write_error(&self.path))?;
            self.writer
                .write_all(b"\n")
                .await
                .map_err(write_error(&self.path))?;
        }

        self.written += records.len();
        debug!("Wrote {} records to TXT (total: {})", records.len(), self.written);

        Ok(records.len())
    }

    async fn finalize(&mut self) -> Result<()> {
        self.writer.flush().await.map_err(write_error(&self.path))?;

        debug!("Finalized TXT file: {} ({} records)", self.path.display(), self.written);
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

    fn record(n: u32, spo2: &str) -> Record {
        Record {
            id: format!("ID-{n:03}"),
            age_group: "42 Anos".to_string(),
            heart_rate: "090ppm".to_string(),
            oxygen_saturation: spo2.to_string(),
        }
    }

    #[tokio::test]
    async fn test_txt_writer_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registros.txt");
        let mut writer = TxtWriter::new(&path).await.unwrap();

        let written = writer
            .write_batch(&[record(1, "95%"), record(2, "88%")])
            .await
            .unwrap();
        assert_eq!(written, 2);
        writer.finalize().await.unwrap();

        let content = fs::read_to_string(&path).await.unwrap();
        assert_eq!(
            content,
            "{'id': 'ID-001', 'fr': '42 Anos', 'fc': '090ppm', 'spo2': '95%'}\n\
             {'id': 'ID-002', 'fr': '42 Anos', 'fc': '090ppm', 'spo2': '88%'}\n"
        );
    }

    #[tokio::test]
    async fn test_txt_writer_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registros.txt");
        fs::write(&path, "stale content that is longer than the new one\n".repeat(10))
            .await
            .unwrap();

        let mut writer = TxtWriter::new(&path).await.unwrap();
        writer.write_batch(&[record(1, "95%")]).await.unwrap();
        writer.finalize().await.unwrap();

        let content = fs::read_to_string(&path).await.unwrap();
        assert_eq!(content.lines().count(), 1);
        assert!(!content.contains("stale"));
        assert_eq!(writer.file_size().await.unwrap(), content.len() as u64);
    }

    #[tokio::test]
    async fn test_txt_writer_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registros.txt");
        let mut writer = TxtWriter::new(&path).await.unwrap();
        writer.write_batch(&[]).await.unwrap();
        writer.finalize().await.unwrap();

        assert_eq!(writer.file_size().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_txt_writer_invalid_directory() {
        let result = TxtWriter::new(Path::new("/nonexistent/directory/registros.txt")).await;
        assert!(result.is_err());
    }
}
