//! Format writers for export operations
//!
//! This module provides a unified interface for writing records to the
//! supported file formats (TXT, CSV, JSON).

use async_trait::async_trait;
use std::path::Path;
use tokio::fs::File;
use tokio::io::BufWriter;

use crate::error::{ExportError, Result};
use crate::record::Record;

pub mod csv;
pub mod json;
pub mod txt;

pub use csv::CsvWriter;
pub use json::JsonWriter;
pub use txt::TxtWriter;

/// Trait for writing records to different file formats
#[async_trait]
pub trait FormatWriter: Send {
    /// Write a batch of records
    ///
    /// # Arguments
    /// * `records` - Slice of records to write
    ///
    /// # Returns
    /// * `Result<usize>` - Number of records written
    async fn write_batch(&mut self, records: &[Record]) -> Result<usize>;

    /// Finalize the output (flush buffers, write headers or closing brackets)
    ///
    /// # Returns
    /// * `Result<()>` - Success or error
    async fn finalize(&mut self) -> Result<()>;

    /// Get the current file size in bytes
    ///
    /// # Returns
    /// * `Result<u64>` - File size in bytes
    async fn file_size(&self) -> Result<u64>;
}

/// Helper function to create a buffered file writer
///
/// The file is truncated if it already exists.
///
/// # Arguments
/// * `path` - File path to create
///
/// # Returns
/// * `Result<BufWriter<File>>` - Buffered writer or error
pub(crate) async fn create_writer(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path).await.map_err(|e| ExportError::CreateFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    Ok(BufWriter::new(file))
}

/// Helper function to validate that the parent directory exists
///
/// Exporters never create directories; the output layout does that first.
///
/// # Arguments
/// * `path` - File path to validate
///
/// # Returns
/// * `Result<()>` - Success or error
pub(crate) fn validate_path(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            return Err(ExportError::MissingDirectory(parent.display().to_string()).into());
        }
    }

    Ok(())
}

/// Map an I/O error raised while writing `path`
pub(crate) fn write_error(path: &Path) -> impl Fn(std::io::Error) -> ExportError + '_ {
    move |e| ExportError::WriteFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    }
}

/// Read the on-disk size of `path`
pub(crate) async fn file_size_of(path: &Path) -> Result<u64> {
    let metadata = tokio::fs::metadata(path).await.map_err(write_error(path))?;
    Ok(metadata.len())
}
