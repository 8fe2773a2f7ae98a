//! Generate → validate → export pipeline
//!
//! Steps run strictly in sequence:
//! 1. generate records `1..=count`
//! 2. keep the records that pass validation
//! 3. export the valid records to TXT, CSV and JSON
//! 4. send them to the store when enabled
//!
//! All terminal interaction happens before [`Pipeline::run`]; the store
//! decision and connection string arrive already resolved in the config.

use tracing::{debug, info};

use crate::config::Config;
use crate::error::Result;
use crate::export::{ExportSummary, Exporter, OutputLayout};
use crate::record::{Record, RecordGenerator};
use crate::store::{StoreAdapter, StoreOutcome};
use crate::validator::{failed_fields, validate_record};

/// One generated record and its validation result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckedRecord {
    pub record: Record,
    pub valid: bool,
}

/// Everything a run produced
#[derive(Debug, Clone)]
pub struct PipelineReport {
    /// Seed the records were generated from, if fixed
    pub seed: Option<u64>,
    /// Every generated record, in sequence order
    pub records: Vec<CheckedRecord>,
    /// Files written
    pub exports: ExportSummary,
    /// Store result, `None` when the store was not enabled
    pub store: Option<StoreOutcome>,
}

impl PipelineReport {
    pub fn generated_count(&self) -> usize {
        self.records.len()
    }

    pub fn valid_count(&self) -> usize {
        self.records.iter().filter(|r| r.valid).count()
    }

    pub fn invalid_count(&self) -> usize {
        self.generated_count() - self.valid_count()
    }

    /// Valid records in sequence order
    pub fn valid_records(&self) -> Vec<Record> {
        self.records
            .iter()
            .filter(|r| r.valid)
            .map(|r| r.record.clone())
            .collect()
    }
}

/// Pipeline orchestrator
pub struct Pipeline {
    config: Config,
    layout: OutputLayout,
    store: StoreAdapter,
}

impl Pipeline {
    /// Create a pipeline for `config`
    ///
    /// The output layout must already exist; see [`OutputLayout::ensure`].
    pub fn new(config: Config) -> Self {
        let layout = OutputLayout::from_config(&config.output);
        let store = StoreAdapter::from_config(&config.store);
        Self {
            config,
            layout,
            store,
        }
    }

    /// Replace the store adapter
    pub fn with_store_adapter(mut self, store: StoreAdapter) -> Self {
        self.store = store;
        self
    }

    pub fn layout(&self) -> &OutputLayout {
        &self.layout
    }

    /// Run with a generator seeded from the configuration
    pub async fn run(&self) -> Result<PipelineReport> {
        let mut generator = RecordGenerator::new(self.config.generation.seed);
        self.run_with(&mut generator).await
    }

    /// Run with an explicit generator
    pub async fn run_with(&self, generator: &mut RecordGenerator) -> Result<PipelineReport> {
        let count = self.config.generation.count;
        info!("Generating {} biomedical records", count);

        let records: Vec<CheckedRecord> = generator
            .generate(count)
            .into_iter()
            .map(|record| {
                let valid = validate_record(&record);
                if !valid {
                    debug!("Record {} rejected, failed fields: {:?}", record.id, failed_fields(&record));
                }
                CheckedRecord { record, valid }
            })
            .collect();

        let valid: Vec<Record> = records
            .iter()
            .filter(|r| r.valid)
            .map(|r| r.record.clone())
            .collect();

        info!("Records generated: {}", records.len());
        info!("Valid records: {}", valid.len());

        let exports = Exporter::new(self.layout.clone()).export_all(&valid).await?;

        let store = if self.config.store.is_enabled() {
            Some(self.store.save(&valid, self.config.store.uri.as_deref()).await)
        } else {
            None
        };

        info!("Pipeline finished");

        Ok(PipelineReport {
            seed: generator.seed(),
            records,
            exports,
            store,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::ExportFormat;
    use crate::store::StoreCapability;
    use std::time::Duration;

    fn config_in(dir: &std::path::Path, seed: u64) -> Config {
        let mut config = Config::default();
        config.output.base_dir = dir.to_path_buf();
        config.generation.seed = Some(seed);
        config.store.enabled = Some(false);
        config
    }

    #[tokio::test]
    async fn test_run_exports_valid_subset() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), 99);
        let pipeline = Pipeline::new(config);
        pipeline.layout().ensure().unwrap();

        let report = pipeline.run().await.unwrap();
        assert_eq!(report.generated_count(), 20);
        assert_eq!(report.seed, Some(99));
        assert_eq!(report.valid_count() + report.invalid_count(), 20);
        assert!(report.store.is_none());

        let csv = std::fs::read_to_string(pipeline.layout().path(ExportFormat::Csv)).unwrap();
        assert_eq!(csv.lines().count(), report.valid_count() + 1);

        // Only the spo2 = 100 case can make a generated record invalid.
        for checked in report.records.iter().filter(|r| !r.valid) {
            assert_eq!(checked.record.oxygen_saturation, "100%");
        }
    }

    #[tokio::test]
    async fn test_store_unavailable_does_not_fail_run() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path(), 1);
        config.store.enabled = Some(true);
        config.store.uri = Some("mongodb://localhost:27017".to_string());

        let pipeline = Pipeline::new(config).with_store_adapter(StoreAdapter::new(
            StoreCapability::Unavailable,
            Duration::from_secs(1),
        ));
        pipeline.layout().ensure().unwrap();

        let report = pipeline.run().await.unwrap();
        assert_eq!(report.store, Some(StoreOutcome::Unavailable));
        assert_eq!(report.exports.files.len(), 3);
    }

    #[tokio::test]
    async fn test_store_enabled_without_uri_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path(), 1);
        config.store.enabled = Some(true);

        let pipeline = Pipeline::new(config);
        pipeline.layout().ensure().unwrap();

        let report = pipeline.run().await.unwrap();
        let expected = if StoreCapability::detect().is_available() {
            StoreOutcome::Skipped
        } else {
            StoreOutcome::Unavailable
        };
        assert_eq!(report.store, Some(expected));
    }

    #[tokio::test]
    async fn test_missing_layout_propagates_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir.path().join("not-created"), 1);

        let result = Pipeline::new(config).run().await;
        assert!(result.is_err());
    }
}
