//! Error handling for the vital-sign pipeline.
//!
//! Filesystem and configuration errors propagate to `main` and end the
//! process. Store errors are caught by the store adapter and reported
//! without stopping the run.
//!
//! # Example
//!
//! ```rust,no_run
//! use vitalsgen::error::{ExportError, Result};
//!
//! fn ensure_dir(path: &std::path::Path) -> Result<()> {
//!     if !path.is_dir() {
//!         return Err(ExportError::MissingDirectory(path.display().to_string()).into());
//!     }
//!     Ok(())
//! }
//! ```

pub mod kinds;
#[cfg(feature = "store")]
pub mod mongo;

// Re-export commonly used types
pub use kinds::{ConfigError, ExportError, Result, StoreError, VitalsError};
#[cfg(feature = "store")]
pub use mongo::ErrorInfo;
