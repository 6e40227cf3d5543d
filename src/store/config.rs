//! Store configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LogStoreError, Result};

/// Default number of records retained when no capacity is configured.
pub const DEFAULT_CAPACITY: usize = 1024;

/// Configuration for a [`crate::store::RecordStore`].
///
/// # Examples
///
/// ```
/// use logstore::store::StoreConfig;
///
/// let config = StoreConfig::from_json_str(r#"{ "capacity": 16 }"#).unwrap();
/// assert_eq!(config.capacity, 16);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Maximum number of live records.
    pub capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl StoreConfig {
    /// Create a configuration with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        StoreConfig { capacity }
    }

    /// Check that the configuration can build a store.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(LogStoreError::InvalidCapacity(0));
        }
        Ok(())
    }

    /// Parse and validate a configuration from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: StoreConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            LogStoreError::config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json_str(&text)
    }
}
