//! Command line argument parsing for the logstore CLI using clap.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::store::StoreConfig;

/// logstore - replay ADD/SEARCH/END commands against a bounded record store
///
/// Input is read line by line. Unless a capacity is given with `--capacity`
/// or `--config`, the first line holds the store capacity.
#[derive(Parser, Debug, Clone)]
#[command(name = "logstore")]
#[command(about = "Bounded recent-records store with word search")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct LogStoreArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format for SEARCH results
    #[arg(short = 'f', long = "format", default_value = "plain")]
    pub output_format: OutputFormat,

    /// Command file to read (default: stdin)
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Store capacity; the input then has no capacity header line
    #[arg(short, long, env = "LOGSTORE_CAPACITY", conflicts_with = "config")]
    pub capacity: Option<usize>,

    /// Store configuration file (JSON); the input then has no capacity header line
    #[arg(long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,
}

impl LogStoreArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n + 1,
            }
        }
    }

    /// Store configuration given on the command line, if any.
    ///
    /// `None` means the capacity comes from the input's header line.
    pub fn store_config(&self) -> Result<Option<StoreConfig>> {
        if let Some(capacity) = self.capacity {
            let config = StoreConfig::with_capacity(capacity);
            config.validate()?;
            return Ok(Some(config));
        }

        match &self.config {
            Some(path) => Ok(Some(StoreConfig::from_json_file(path)?)),
            None => Ok(None),
        }
    }
}

/// Output formats for SEARCH results
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Space-separated keys, or NONE
    #[default]
    Plain,
    /// One JSON array of keys per line
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LogStoreError;

    #[test]
    fn test_basic_parsing() {
        let args = LogStoreArgs::try_parse_from(["logstore"]).unwrap();
        assert_eq!(args.output_format, OutputFormat::Plain);
        assert!(args.input.is_none());
        assert!(args.config.is_none());
    }

    #[test]
    fn test_verbosity_levels() {
        let args = LogStoreArgs::try_parse_from(["logstore"]).unwrap();
        assert_eq!(args.verbosity(), 1);

        let args = LogStoreArgs::try_parse_from(["logstore", "-v"]).unwrap();
        assert_eq!(args.verbosity(), 2);

        let args = LogStoreArgs::try_parse_from(["logstore", "-vv"]).unwrap();
        assert_eq!(args.verbosity(), 3);

        // Quiet flag
        let args = LogStoreArgs::try_parse_from(["logstore", "-v", "--quiet"]).unwrap();
        assert_eq!(args.verbosity(), 0);
    }

    #[test]
    fn test_output_format() {
        let args = LogStoreArgs::try_parse_from(["logstore", "--format", "json"]).unwrap();
        assert_eq!(args.output_format, OutputFormat::Json);

        assert!(LogStoreArgs::try_parse_from(["logstore", "--format", "yaml"]).is_err());
    }

    #[test]
    fn test_capacity_flag() {
        let args = LogStoreArgs::try_parse_from(["logstore", "--capacity", "8"]).unwrap();
        let config = args.store_config().unwrap().unwrap();
        assert_eq!(config.capacity, 8);

        let args = LogStoreArgs::try_parse_from(["logstore", "-c", "0"]).unwrap();
        assert!(matches!(
            args.store_config(),
            Err(LogStoreError::InvalidCapacity(0))
        ));
    }

    #[test]
    fn test_capacity_conflicts_with_config() {
        let result =
            LogStoreArgs::try_parse_from(["logstore", "-c", "4", "--config", "store.json"]);
        assert!(result.is_err());
    }
}
