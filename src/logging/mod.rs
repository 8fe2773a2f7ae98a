//! Logging setup
//!
//! Two `tracing` layers are installed: one on stderr, filtered by the
//! console level, and one appending to the run log file as
//! `YYYY-MM-DD HH:MM:SS - LEVEL - message`.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use chrono::Local;
use tracing::{Event, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{Layer, Registry};

use crate::config::LoggingConfig;
use crate::error::{Result, VitalsError};

/// Timestamp format used in the log file
pub const LOG_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Separator between the log file columns
const COLUMN_SEPARATOR: &str = " - ";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Log file line layout: local timestamp, level, message
pub struct FileLogFormat;

impl<S, N> FormatEvent<S, N> for FileLogFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        write!(
            writer,
            "{}{COLUMN_SEPARATOR}{}{COLUMN_SEPARATOR}",
            Local::now().format(LOG_TIME_FORMAT),
            event.metadata().level()
        )?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Open the log file for appending, creating it if needed
pub fn open_log_file(path: &Path) -> Result<File> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(file)
}

/// Build the subscriber without installing it
///
/// # Arguments
/// * `config` - Console and file levels
/// * `log_file` - Already-opened log file, or `None` for console only
pub fn build_subscriber(
    config: &LoggingConfig,
    log_file: Option<File>,
) -> impl Subscriber + Send + Sync + 'static {
    let mut layers: Vec<BoxedLayer> = Vec::new();

    let console_filter = LevelFilter::from_level(config.level.to_tracing_level());
    let console = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);
    if config.timestamps {
        layers.push(console.with_filter(console_filter).boxed());
    } else {
        layers.push(console.without_time().with_filter(console_filter).boxed());
    }

    if let Some(file) = log_file {
        let file_filter = LevelFilter::from_level(config.file_level.to_tracing_level());
        layers.push(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .event_format(FileLogFormat)
                .with_filter(file_filter)
                .boxed(),
        );
    }

    tracing_subscriber::registry().with(layers)
}

/// Install the global subscriber
///
/// # Arguments
/// * `config` - Logging configuration
/// * `log_path` - Log file path; its directory must already exist
pub fn init(config: &LoggingConfig, log_path: Option<&Path>) -> Result<()> {
    let log_file = log_path.map(open_log_file).transpose()?;

    build_subscriber(config, log_file)
        .try_init()
        .map_err(|e| VitalsError::Generic(format!("Failed to initialize logging: {e}")))
}
