//! JSON writer for export operations
//!
//! Records are collected and written on finalize as a single array,
//! pretty-printed with 4-space indentation.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::debug;

use crate::error::{ExportError, Result};
use crate::record::Record;

use super::{FormatWriter, create_writer, file_size_of, validate_path, write_error};

/// Indentation used for the pretty-printed array
const INDENT: &[u8] = b"    ";

/// Writer for JSON array format
pub struct JsonWriter {
    /// Buffered file writer
    writer: BufWriter<File>,
    /// Path to the output file
    path: PathBuf,
    /// Records buffered until finalize
    records: Vec<Record>,
}

impl JsonWriter {
    /// Create a new JSON writer, truncating any existing file
    pub async fn new(path: &Path) -> Result<Self> {
        validate_path(path)?;
        let writer = create_writer(path).await?;

        debug!("Created JSON writer for: {}", path.display());

        Ok(Self {
            writer,
            path: path.to_path_buf(),
            records: Vec::new(),
        })
    }
}

/// Serialize records as a 4-space indented JSON array
pub fn to_pretty_json(records: &[Record]) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(INDENT);
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    records
        .serialize(&mut serializer)
        .map_err(|e| ExportError::SerializeFailed(e.to_string()))?;
    Ok(buffer)
}

#[async_trait]
impl FormatWriter for JsonWriter {
    async fn write_batch(&mut self, records: &[Record]) -> Result<usize> {
        self.records.extend_from_slice(records);
        debug!("Buffered {} records for JSON (total: {})", records.len(), self.records.len());
        Ok(records.len())
    }

    async fn finalize(&mut self) -> Result<()> {
        let json = to_pretty_json(&self.records)?;

        self.writer
            .write_all(&json)
            .await
            .map_err(write_error(&self.path))?;
        self.writer.flush().await.map_err(write_error(&self.path))?;

        debug!(
            "Finalized JSON file: {} ({} records)",
            self.path.display(),
            self.records.len()
        );
        Ok(())
    }

    async fn file_size(&self) -> Result<u64> {
        file_size_of(&self.path).await
    }
}
