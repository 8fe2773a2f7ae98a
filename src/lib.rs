//! Synthetic vital-sign generator library
//!
//! Generates synthetic biomedical records, validates them against fixed
//! textual formats, exports the valid ones and optionally stores them in
//! MongoDB.
//!
//! # Modules
//!
//! - `cli`: Command-line interface and prompts
//! - `config`: Configuration management
//! - `error`: Error types and handling
//! - `export`: TXT, CSV and JSON writers
//! - `formatter`: Console summary output
//! - `logging`: Console and file logging
//! - `pipeline`: Generate, validate, export and store orchestration
//! - `record`: Record type and random generation
//! - `store`: Optional MongoDB persistence
//! - `validator`: Field format validation
//!
//! # Example
//!
//! ```no_run
//! use vitalsgen::{Config, Pipeline};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut config = Config::default();
//!     config.generation.seed = Some(42);
//!     config.store.enabled = Some(false);
//!
//!     let pipeline = Pipeline::new(config);
//!     pipeline.layout().ensure()?;
//!     let report = pipeline.run().await?;
//!     println!("{} valid records", report.valid_count());
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod formatter;
pub mod logging;
pub mod pipeline;
pub mod record;
pub mod store;
pub mod validator;

// Re-export commonly used types
pub use config::Config;
pub use error::{Result, VitalsError};
pub use export::{ExportFormat, OutputLayout};
pub use pipeline::{Pipeline, PipelineReport};
pub use record::{Record, RecordGenerator};
pub use store::{StoreAdapter, StoreCapability, StoreOutcome};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library version string
pub fn version() -> &'static str {
    VERSION
}
