//! Console output for a pipeline run
//!
//! Renders the counts, the optional record table, the written file paths
//! and the store result.

use nu_ansi_term::Color;

use crate::pipeline::PipelineReport;
use crate::store::StoreOutcome;

pub mod table;

pub use table::{RecordTable, TableStyle};

/// Formatter for run summaries
pub struct Formatter {
    /// Enable colored output
    use_colors: bool,

    /// Include the per-record table
    show_table: bool,
}

impl Formatter {
    pub fn new(use_colors: bool, show_table: bool) -> Self {
        Self {
            use_colors,
            show_table,
        }
    }

    /// Format the complete run summary
    pub fn format_report(&self, report: &PipelineReport) -> String {
        let mut out = Vec::new();

        if let Some(seed) = report.seed {
            out.push(format!("Seed: {seed}"));
        }
        out.push(format!("Records generated: {}", report.generated_count()));
        out.push(format!(
            "Valid records: {}",
            self.paint(Color::Green, &report.valid_count().to_string())
        ));
        if report.invalid_count() > 0 {
            out.push(format!(
                "Invalid records: {}",
                self.paint(Color::Yellow, &report.invalid_count().to_string())
            ));
        }

        if self.show_table {
            out.push(String::new());
            out.push(
                RecordTable::new()
                    .with_colors(self.use_colors)
                    .format(&report.records),
            );
        }

        out.push(String::new());
        out.push(format!("Files written ({} ms):", report.exports.elapsed_ms));
        for file in &report.exports.files {
            out.push(format!(
                "{:<4} -> {} ({} bytes)",
                file.format.to_string(),
                file.path.display(),
                file.bytes
            ));
        }

        if let Some(outcome) = &report.store {
            out.push(String::new());
            out.push(format!("MongoDB: {}", self.format_outcome(outcome)));
        }

        out.join("\n")
    }

    fn format_outcome(&self, outcome: &StoreOutcome) -> String {
        let color = match outcome {
            StoreOutcome::Inserted(_) => Color::Green,
            StoreOutcome::Skipped | StoreOutcome::Unavailable => Color::Yellow,
            StoreOutcome::Failed(_) => Color::Red,
        };
        self.paint(color, &outcome.to_string())
    }

    fn paint(&self, color: Color, text: &str) -> String {
        if self.use_colors {
            color.paint(text).to_string()
        } else {
            text.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::{ExportFormat, ExportSummary, ExportedFile};
    use crate::pipeline::CheckedRecord;
    use crate::record::Record;
    use std::path::PathBuf;

    fn report() -> PipelineReport {
        let record = |id: &str, spo2: &str| Record {
            id: id.to_string(),
            age_group: "42 Anos".to_string(),
            heart_rate: "090ppm".to_string(),
            oxygen_saturation: spo2.to_string(),
        };

        PipelineReport {
            seed: Some(42),
            records: vec![
                CheckedRecord { record: record("ID-001", "95%"), valid: true },
                CheckedRecord { record: record("ID-002", "100%"), valid: false },
            ],
            exports: ExportSummary {
                files: ExportFormat::ALL
                    .into_iter()
                    .map(|format| ExportedFile {
                        format,
                        path: PathBuf::from(format!("data/{0}/registros.{0}", format.extension())),
                        records: 1,
                        bytes: 10,
                    })
                    .collect(),
                elapsed_ms: 3,
            },
            store: Some(StoreOutcome::Unavailable),
        }
    }

    #[test]
    fn test_plain_report() {
        let output = Formatter::new(false, false).format_report(&report());

        assert!(output.contains("Seed: 42"));
        assert!(output.contains("Records generated: 2"));
        assert!(output.contains("Valid records: 1"));
        assert!(output.contains("Invalid records: 1"));
        assert!(output.contains("Files written (3 ms):"));
        assert!(output.contains("TXT  -> data/txt/registros.txt (10 bytes)"));
        assert!(output.contains("JSON -> data/json/registros.json"));
        assert!(output.contains("MongoDB: store unavailable"));
        assert!(!output.contains("\u{1b}["));
    }

    #[test]
    fn test_report_with_table_and_colors() {
        let output = Formatter::new(true, true).format_report(&report());
        assert!(output.contains("ID-002"));
        assert!(output.contains("\u{1b}["));
    }
}
