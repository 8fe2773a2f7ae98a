//! Record export to TXT, CSV and JSON files
//!
//! Each export is a full write that replaces any previous file. Formats are
//! independent: a failure in one leaves the files already written in place.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info};

use crate::error::Result;
use crate::record::Record;

pub mod layout;
pub mod writers;

pub use layout::OutputLayout;
pub use writers::{CsvWriter, FormatWriter, JsonWriter, TxtWriter};

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Txt,
    Csv,
    Json,
}

impl ExportFormat {
    /// All formats, in export order
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Txt, ExportFormat::Csv, ExportFormat::Json];

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Txt => "txt",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    /// Subdirectory of the base output directory
    pub fn dir_name(self) -> &'static str {
        self.extension()
    }

    /// Create the writer for this format
    pub async fn writer(self, path: &Path) -> Result<Box<dyn FormatWriter>> {
        let writer: Box<dyn FormatWriter> = match self {
            ExportFormat::Txt => Box::new(TxtWriter::new(path).await?),
            ExportFormat::Csv => Box::new(CsvWriter::new(path).await?),
            ExportFormat::Json => Box::new(JsonWriter::new(path).await?),
        };
        Ok(writer)
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Txt => write!(f, "TXT"),
            ExportFormat::Csv => write!(f, "CSV"),
            ExportFormat::Json => write!(f, "JSON"),
        }
    }
}

/// Result of one export
#[derive(Debug, Clone)]
pub struct ExportedFile {
    /// Format written
    pub format: ExportFormat,
    /// Path written
    pub path: PathBuf,
    /// Number of records written
    pub records: usize,
    /// File size in bytes
    pub bytes: u64,
}

/// Results of exporting to every format
#[derive(Debug, Clone, Default)]
pub struct ExportSummary {
    pub files: Vec<ExportedFile>,
    /// Time taken for all exports
    pub elapsed_ms: u64,
}

/// Write `records` to `path` in `format`, replacing any existing file
///
/// # Returns
/// * `Result<ExportedFile>` - The path written and its statistics
pub async fn export_records(
    format: ExportFormat,
    records: &[Record],
    path: &Path,
) -> Result<ExportedFile> {
    let mut writer = format.writer(path).await?;
    let written = writer.write_batch(records).await?;
    writer.finalize().await?;
    let bytes = writer.file_size().await?;

    info!("Exported {} records to {} ({} bytes)", written, path.display(), bytes);

    Ok(ExportedFile {
        format,
        path: path.to_path_buf(),
        records: written,
        bytes,
    })
}

/// Exports records to every format under an output layout
pub struct Exporter {
    layout: OutputLayout,
}

impl Exporter {
    pub fn new(layout: OutputLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &OutputLayout {
        &self.layout
    }

    /// Export `records` to TXT, CSV and JSON in that order
    ///
    /// Stops at the first failing format.
    pub async fn export_all(&self, records: &[Record]) -> Result<ExportSummary> {
        let start_time = Instant::now();
        let mut files = Vec::with_capacity(ExportFormat::ALL.len());

        for format in ExportFormat::ALL {
            let path = self.layout.path(format);
            debug!("Exporting {} records as {}", records.len(), format);
            files.push(export_records(format, records, &path).await?);
        }

        Ok(ExportSummary {
            files,
            elapsed_ms: start_time.elapsed().as_millis() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RecordGenerator;
    use crate::validator::partition;

    #[test]
    fn test_format_names() {
        assert_eq!(ExportFormat::Txt.to_string(), "TXT");
        assert_eq!(ExportFormat::Json.extension(), "json");
        assert_eq!(ExportFormat::Csv.dir_name(), "csv");
    }

    #[tokio::test]
    async fn test_export_all_writes_every_format() {
        let dir = tempfile::tempdir().unwrap();
        let layout = OutputLayout::new(dir.path());
        layout.ensure().unwrap();

        let (valid, _) = partition(RecordGenerator::seeded(1).generate(20));
        let summary = Exporter::new(layout.clone()).export_all(&valid).await.unwrap();

        assert_eq!(summary.files.len(), 3);
        for (file, format) in summary.files.iter().zip(ExportFormat::ALL) {
            assert_eq!(file.format, format);
            assert_eq!(file.path, layout.path(format));
            assert_eq!(file.bytes, std::fs::metadata(&file.path).unwrap().len());
        }
        assert!(summary.files.iter().all(|f| f.records == valid.len()));
    }

    #[tokio::test]
    async fn test_export_all_requires_layout() {
        let dir = tempfile::tempdir().unwrap();
        let layout = OutputLayout::new(dir.path().join("missing"));

        let result = Exporter::new(layout).export_all(&[]).await;
        assert!(result.is_err());
    }
}
