//! Output directory layout
//!
//! ```text
//! <base>/
//!   txt/<stem>.txt
//!   csv/<stem>.csv
//!   json/<stem>.json
//!   log.txt
//! ```

use std::path::{Path, PathBuf};

use crate::config::OutputConfig;
use crate::error::Result;

use super::ExportFormat;

/// Resolved output paths for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    base_dir: PathBuf,
    file_stem: String,
    log_file: String,
}

impl OutputLayout {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self::from_config(&OutputConfig {
            base_dir: base_dir.into(),
            ..OutputConfig::default()
        })
    }

    pub fn from_config(config: &OutputConfig) -> Self {
        Self {
            base_dir: config.base_dir.clone(),
            file_stem: config.file_stem.clone(),
            log_file: config.log_file.clone(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Directory holding exports of `format`
    pub fn dir(&self, format: ExportFormat) -> PathBuf {
        self.base_dir.join(format.dir_name())
    }

    /// Export file path for `format`
    pub fn path(&self, format: ExportFormat) -> PathBuf {
        self.dir(format)
            .join(format!("{}.{}", self.file_stem, format.extension()))
    }

    pub fn log_path(&self) -> PathBuf {
        self.base_dir.join(&self.log_file)
    }

    /// Create the base directory and one subdirectory per format
    ///
    /// Existing directories are left untouched.
    pub fn ensure(&self) -> Result<()> {
        std::fs::create_dir_all(&self.base_dir)?;
        for format in ExportFormat::ALL {
            std::fs::create_dir_all(self.dir(format))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let layout = OutputLayout::new("data");
        assert_eq!(layout.path(ExportFormat::Txt), PathBuf::from("data/txt/registros.txt"));
        assert_eq!(layout.path(ExportFormat::Csv), PathBuf::from("data/csv/registros.csv"));
        assert_eq!(layout.path(ExportFormat::Json), PathBuf::from("data/json/registros.json"));
        assert_eq!(layout.log_path(), PathBuf::from("data/log.txt"));
    }

    #[test]
    fn test_ensure_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let layout = OutputLayout::new(dir.path().join("nested").join("data"));
        layout.ensure().unwrap();

        for format in ExportFormat::ALL {
            assert!(layout.dir(format).is_dir());
        }

        // Idempotent
        layout.ensure().unwrap();
    }
}
