use std::{fmt, io};

/// Crate-wide `Result` type using [`VitalsError`] as the error.
///
/// This alias is re-exported by the parent `error` module and is intended
/// to be used throughout the crate for fallible operations.
pub type Result<T> = std::result::Result<T, VitalsError>;

/// Top-level error type for vitalsgen operations.
///
/// This type wraps more specific error kinds and provides a single
/// error type that can be used throughout the crate.
#[derive(Debug)]
pub enum VitalsError {
    /// Configuration errors.
    Config(ConfigError),

    /// File export errors.
    Export(ExportError),

    /// I/O errors.
    Io(io::Error),

    /// Generic error with a free-form message.
    Generic(String),
}

/// Configuration-specific errors.
#[derive(Debug)]
pub enum ConfigError {
    /// Config file not found.
    FileNotFound(String),

    /// Invalid config format.
    InvalidFormat(String),

    /// Invalid field value.
    InvalidValue { field: String, value: String },

    /// Catch-all for CLI-level configuration problems.
    Generic(String),
}

/// Export-specific errors.
#[derive(Debug)]
pub enum ExportError {
    /// Output directory is missing.
    MissingDirectory(String),

    /// Failed to create the output file.
    CreateFailed { path: String, reason: String },

    /// Failed while writing or flushing.
    WriteFailed { path: String, reason: String },

    /// Record could not be serialized.
    SerializeFailed(String),
}

/// Store adapter errors.
///
/// These never escape the pipeline: the adapter turns them into a
/// reported `StoreOutcome::Failed`.
#[derive(Debug)]
pub enum StoreError {
    /// Connection string was rejected by the driver.
    InvalidUri(String),

    /// Failed to reach the server.
    ConnectionFailed(String),

    /// Bulk insert failed.
    InsertFailed(String),

    /// Record could not be converted into a document.
    Conversion(String),
}

/* ========================= Display & Error impls ========================= */

impl fmt::Display for VitalsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VitalsError::Config(e) => write!(f, "Configuration error: {e}"),
            VitalsError::Export(e) => write!(f, "Export error: {e}"),
            VitalsError::Io(e) => write!(f, "I/O error: {e}"),
            VitalsError::Generic(msg) => write!(f, "{msg}"),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {path}"),
            ConfigError::InvalidFormat(msg) => write!(f, "Invalid config format: {msg}"),
            ConfigError::InvalidValue { field, value } => {
                write!(f, "Invalid value '{value}' for field '{field}'")
            }
            ConfigError::Generic(msg) => write!(f, "{msg}"),
        }
    }
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::MissingDirectory(dir) => write!(f, "Directory does not exist: {dir}"),
            ExportError::CreateFailed { path, reason } => {
                write!(f, "Failed to create file {path}: {reason}")
            }
            ExportError::WriteFailed { path, reason } => {
                write!(f, "Failed to write {path}: {reason}")
            }
            ExportError::SerializeFailed(msg) => write!(f, "Failed to serialize record: {msg}"),
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::InvalidUri(msg) => write!(f, "Invalid connection string: {msg}"),
            StoreError::ConnectionFailed(msg) => write!(f, "Failed to connect: {msg}"),
            StoreError::InsertFailed(msg) => write!(f, "Insert failed: {msg}"),
            StoreError::Conversion(msg) => write!(f, "Document conversion failed: {msg}"),
        }
    }
}

impl std::error::Error for VitalsError {}
impl std::error::Error for ConfigError {}
impl std::error::Error for ExportError {}
impl std::error::Error for StoreError {}

/* ========================= Conversions to VitalsError ========================= */

impl From<io::Error> for VitalsError {
    fn from(err: io::Error) -> Self {
        VitalsError::Io(err)
    }
}

impl From<ConfigError> for VitalsError {
    fn from(err: ConfigError) -> Self {
        VitalsError::Config(err)
    }
}

impl From<ExportError> for VitalsError {
    fn from(err: ExportError) -> Self {
        VitalsError::Export(err)
    }
}

impl From<String> for VitalsError {
    fn from(msg: String) -> Self {
        VitalsError::Generic(msg)
    }
}

impl From<&str> for VitalsError {
    fn from(msg: &str) -> Self {
        VitalsError::Generic(msg.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_prefixes() {
        let err: VitalsError = ExportError::MissingDirectory("data/csv".to_string()).into();
        assert_eq!(err.to_string(), "Export error: Directory does not exist: data/csv");

        let err: VitalsError = ConfigError::InvalidValue {
            field: "generation.count".to_string(),
            value: "0".to_string(),
        }
        .into();
        assert!(err.to_string().contains("generation.count"));
    }

    #[test]
    fn test_io_conversion() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err: VitalsError = io_err.into();
        assert!(matches!(err, VitalsError::Io(_)));
    }
}
