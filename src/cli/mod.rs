//! Command-line interface for vitalsgen
//!
//! This module handles:
//! - Command-line argument parsing using clap
//! - Configuration loading and CLI overrides
//! - Resolving the store decision before the pipeline runs
//! - Subcommands (version, completion, config)

use clap::{Parser, Subcommand};
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::config::{Config, LogLevel};
use crate::error::Result;
use crate::store::{StoreCapability, sanitize_uri};

pub mod completion;
pub mod prompt;

use prompt::{STORE_QUESTION, URI_QUESTION, prompt_confirmation, prompt_line};

/// Synthetic biomedical vital-sign generator
#[derive(Parser, Debug)]
#[command(
    name = "vitalsgen",
    version,
    about = "Generate, validate and export synthetic vital-sign records",
    long_about = "Generates synthetic vital-sign records, validates their format and exports
the valid ones to TXT, CSV and JSON, optionally storing them in MongoDB."
)]
pub struct CliArgs {
    /// Number of records to generate (1-999)
    #[arg(short = 'n', long, value_name = "N")]
    pub count: Option<u32>,

    /// Seed for reproducible output
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Base output directory
    #[arg(short = 'o', long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Configuration file path
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Store valid records in MongoDB without asking
    #[arg(long, conflicts_with = "no_store")]
    pub store: bool,

    /// Never store records in MongoDB
    #[arg(long)]
    pub no_store: bool,

    /// MongoDB connection string
    #[arg(long, value_name = "URI")]
    pub uri: Option<String>,

    /// Server selection timeout in seconds
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Do not print the record table
    #[arg(long)]
    pub no_table: bool,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Quiet mode (minimal output)
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Verbose mode (detailed logging)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Very verbose mode (debug logging)
    #[arg(long = "vv")]
    pub very_verbose: bool,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands for vitalsgen
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show version information
    Version,

    /// Generate shell completion script
    Completion {
        /// Shell type (bash, zsh, fish, powershell)
        #[arg(value_name = "SHELL")]
        shell: String,
    },

    /// Show configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Print the default configuration file path
        #[arg(long)]
        path: bool,
    },
}

/// CLI interface handler
pub struct CliInterface {
    /// Parsed command-line arguments
    args: CliArgs,

    /// Effective configuration
    config: Config,
}

impl CliInterface {
    /// Parse process arguments and load configuration
    pub fn new() -> Result<Self> {
        Self::from_args(CliArgs::parse())
    }

    /// Build from already-parsed arguments
    pub fn from_args(args: CliArgs) -> Result<Self> {
        let config = Self::load_config(&args)?;
        Ok(Self { args, config })
    }

    /// Load configuration from file and merge with arguments
    fn load_config(args: &CliArgs) -> Result<Config> {
        let mut config = Config::load_from_file(args.config_file.as_deref())?;
        Self::apply_args_to_config(&mut config, args);
        config.validate()?;
        Ok(config)
    }

    /// Apply CLI arguments to configuration
    fn apply_args_to_config(config: &mut Config, args: &CliArgs) {
        Self::apply_generation_args(config, args);
        Self::apply_output_args(config, args);
        Self::apply_store_args(config, args);
        Self::apply_logging_args(config, args);
    }

    fn apply_generation_args(config: &mut Config, args: &CliArgs) {
        if let Some(count) = args.count {
            config.generation.count = count;
        }
        if args.seed.is_some() {
            config.generation.seed = args.seed;
        }
    }

    fn apply_output_args(config: &mut Config, args: &CliArgs) {
        if let Some(dir) = &args.output_dir {
            config.output.base_dir = dir.clone();
        }
    }

    fn apply_store_args(config: &mut Config, args: &CliArgs) {
        if args.store {
            config.store.enabled = Some(true);
        } else if args.no_store {
            config.store.enabled = Some(false);
        }

        if let Some(uri) = &args.uri {
            config.store.uri = Some(uri.clone());
        }

        if let Some(timeout) = args.timeout {
            config.store.timeout = timeout;
        }
    }

    fn apply_logging_args(config: &mut Config, args: &CliArgs) {
        config.logging.level = if args.very_verbose {
            LogLevel::Trace
        } else if args.verbose {
            LogLevel::Debug
        } else if args.quiet {
            LogLevel::Error
        } else {
            config.logging.level
        };
    }

    /// Resolve whether to use the store, and its connection string
    ///
    /// Asks only for what is still undecided: the yes/no question when
    /// neither `--store` nor `--no-store` (nor the config file) settled it,
    /// then the connection string when the store is enabled without one.
    /// End of input or an empty connection string disables the store.
    /// Without store support the connection string is never asked for; the
    /// adapter reports the store as unavailable instead.
    pub fn resolve_store_choice<R: BufRead, W: Write>(
        &mut self,
        capability: StoreCapability,
        input: &mut R,
        output: &mut W,
    ) -> Result<()> {
        let store = &mut self.config.store;

        if store.enabled.is_none() {
            store.enabled = Some(prompt_confirmation(STORE_QUESTION, input, output)?);
        }

        if store.is_enabled() && store.uri.is_none() && capability.is_available() {
            match prompt_line(URI_QUESTION, input, output)? {
                Some(uri) if !uri.is_empty() => store.uri = Some(uri),
                _ => {
                    tracing::warn!("No connection string given; MongoDB storage disabled");
                    store.enabled = Some(false);
                }
            }
        }

        if let Some(uri) = &store.uri {
            tracing::debug!("Store target: {}", sanitize_uri(uri));
        }

        Ok(())
    }

    /// Handle subcommands
    ///
    /// # Returns
    /// * `Result<bool>` - True if a subcommand was handled, false to continue
    pub fn handle_subcommand(&self) -> Result<bool> {
        match &self.args.command {
            Some(Commands::Version) => {
                self.show_version();
                Ok(true)
            }
            Some(Commands::Completion { shell }) => {
                completion::generate_completion(shell, &mut std::io::stdout())?;
                Ok(true)
            }
            Some(Commands::Config { show, path }) => {
                if *path {
                    println!("{}", self.get_config_path().display());
                }
                if *show || !*path {
                    self.show_config()?;
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Show version information
    fn show_version(&self) {
        println!("vitalsgen version {}", env!("CARGO_PKG_VERSION"));
        println!("Rust version: {}", env!("CARGO_PKG_RUST_VERSION"));
    }

    /// Show effective configuration, with credentials hidden
    fn show_config(&self) -> Result<()> {
        let mut shown = self.config.clone();
        shown.store.uri = shown.store.uri.as_deref().map(sanitize_uri);

        println!("Configuration file: {}", self.get_config_path().display());
        println!();
        println!("{}", shown.to_toml()?);
        Ok(())
    }

    /// Get configuration file path (from args or default)
    fn get_config_path(&self) -> PathBuf {
        self.args
            .config_file
            .clone()
            .unwrap_or_else(Config::default_path)
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the CLI arguments
    pub fn args(&self) -> &CliArgs {
        &self.args
    }

    /// Whether colored output is enabled
    pub fn use_colors(&self) -> bool {
        !self.args.no_color
    }

    /// Whether the record table should be printed
    pub fn show_table(&self) -> bool {
        !self.args.no_table && !self.args.quiet
    }
}
