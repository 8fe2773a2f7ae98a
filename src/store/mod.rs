//! Optional external document store
//!
//! Valid records can be sent to MongoDB (database `biomedico`, collection
//! `registros`) in one bulk insert. Every failure in this module is reported
//! and swallowed: a run never aborts because the store could not be reached.
//!
//! Store support is compiled in through the `store` cargo feature. Builds
//! without it still have the adapter, which then reports itself unavailable.

use std::fmt;
use std::io::{self, Write};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{error, info, warn};

use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::record::Record;

#[cfg(feature = "store")]
pub mod connection;

#[cfg(feature = "store")]
pub use connection::{StoreConnection, to_document};

/// Logical database name
pub const DATABASE_NAME: &str = "biomedico";

/// Collection receiving the records
pub const COLLECTION_NAME: &str = "registros";

/// Application name reported to the server
pub const APP_NAME: &str = "vitalsgen";

/// Message shown when store support is not available
pub const UNAVAILABLE_MESSAGE: &str =
    "MongoDB support is not available in this build. Records will not be stored.";

/// Whether the store client can be used in this process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreCapability {
    Available,
    Unavailable,
}

impl StoreCapability {
    /// Resolve the capability from the compiled feature set
    pub fn detect() -> Self {
        if cfg!(feature = "store") {
            StoreCapability::Available
        } else {
            StoreCapability::Unavailable
        }
    }

    pub fn is_available(self) -> bool {
        self == StoreCapability::Available
    }
}

/// What happened when the adapter ran
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOutcome {
    /// Documents were inserted
    Inserted(usize),
    /// Nothing to insert
    Skipped,
    /// Store support is not available
    Unavailable,
    /// Connection or insert failed; the message was reported
    Failed(String),
}

impl fmt::Display for StoreOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreOutcome::Inserted(n) => write!(f, "{n} documents inserted"),
            StoreOutcome::Skipped => write!(f, "nothing to insert"),
            StoreOutcome::Unavailable => write!(f, "store unavailable"),
            StoreOutcome::Failed(msg) => write!(f, "failed: {msg}"),
        }
    }
}

/// Adapter sending valid records to the document store
pub struct StoreAdapter {
    capability: StoreCapability,
    timeout: Duration,
    show_progress: bool,
}

impl StoreAdapter {
    /// Create an adapter
    ///
    /// A build without store support is always unavailable, whatever
    /// `capability` says.
    pub fn new(capability: StoreCapability, timeout: Duration) -> Self {
        let capability = if StoreCapability::detect().is_available() {
            capability
        } else {
            StoreCapability::Unavailable
        };

        Self {
            capability,
            timeout,
            show_progress: false,
        }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(StoreCapability::detect(), config.server_selection_timeout())
    }

    /// Show a spinner on the terminal while the insert runs
    pub fn with_progress(mut self, enabled: bool) -> Self {
        self.show_progress = enabled;
        self
    }

    pub fn capability(&self) -> StoreCapability {
        self.capability
    }

    /// Insert `records` into `biomedico.registros`, reporting on stdout
    pub async fn save(&self, records: &[Record], uri: Option<&str>) -> StoreOutcome {
        self.save_to(records, uri, &mut io::stdout()).await
    }

    /// Insert `records` into `biomedico.registros`, reporting to `out`
    ///
    /// Never returns an error. Failures are reported, logged, and returned
    /// as [`StoreOutcome::Failed`]. Without store support nothing is
    /// attempted, whatever `uri` is.
    pub async fn save_to<W: Write>(
        &self,
        records: &[Record],
        uri: Option<&str>,
        out: &mut W,
    ) -> StoreOutcome {
        if !self.capability.is_available() {
            report(out, UNAVAILABLE_MESSAGE);
            warn!("Store adapter skipped: client unavailable");
            return StoreOutcome::Unavailable;
        }

        let Some(uri) = uri else {
            report(out, "No connection string given. Records will not be stored.");
            info!("Store adapter skipped: no connection string");
            return StoreOutcome::Skipped;
        };

        if records.is_empty() {
            report(out, "No valid records to store.");
            info!("Store adapter skipped: no valid records");
            return StoreOutcome::Skipped;
        }

        let spinner = self.spinner();
        let result = self.insert(records, uri).await;
        if let Some(bar) = spinner {
            bar.finish_and_clear();
        }

        match result {
            Ok(inserted) => {
                report(out, "Records stored in MongoDB successfully.");
                StoreOutcome::Inserted(inserted)
            }
            Err(e) => {
                report(out, &format!("Error connecting to or inserting into MongoDB: {e}"));
                error!("Store failure for {}: {}", sanitize_uri(uri), e);
                StoreOutcome::Failed(e.to_string())
            }
        }
    }

    #[cfg(feature = "store")]
    async fn insert(&self, records: &[Record], uri: &str) -> Result<usize, StoreError> {
        let connection = StoreConnection::open(uri, self.timeout).await?;
        let result = connection.insert_records(records).await;
        connection.close().await;
        result
    }

    #[cfg(not(feature = "store"))]
    async fn insert(&self, _records: &[Record], _uri: &str) -> Result<usize, StoreError> {
        Err(StoreError::ConnectionFailed(UNAVAILABLE_MESSAGE.to_string()))
    }

    fn spinner(&self) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }

        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            bar.set_style(style);
        }
        bar.set_message(format!("Storing records in {DATABASE_NAME}.{COLLECTION_NAME}..."));
        bar.tick();
        Some(bar)
    }
}

/// Write one user-facing line; a broken terminal only gets logged
fn report<W: Write>(out: &mut W, message: &str) {
    if let Err(e) = writeln!(out, "{message}").and_then(|_| out.flush()) {
        warn!("Failed to write store message: {}", e);
    }
}

/// Sanitize a connection string by hiding credentials
///
/// Everything between `://` and the last `@` is replaced by `***`.
pub fn sanitize_uri(uri: &str) -> String {
    if let Some(proto_end) = uri.find("://") {
        if let Some(host_start) = uri.rfind('@') {
            if host_start > proto_end {
                let proto = &uri[..proto_end + 3];
                let host = &uri[host_start..];
                return format!("{}***{}", proto, host);
            }
        }
    }

    if uri.contains('@') {
        "mongodb://***".to_string()
    } else {
        uri.to_string()
    }
}
