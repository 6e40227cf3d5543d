//! Thread-safe handle around a [`RecordStore`].
//!
//! The store itself assumes exclusive access. This wrapper serializes writers
//! behind a single lock so several threads can share one store.

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard};

use crate::error::Result;
use crate::store::config::StoreConfig;
use crate::store::record_store::{RecordStore, StoreStats};

/// A cloneable, lock-guarded record store.
///
/// `add` takes the write lock for the whole mutation; `search` and the other
/// readers share the read lock.
#[derive(Debug, Clone)]
pub struct SharedRecordStore {
    inner: Arc<RwLock<RecordStore>>,
}

impl SharedRecordStore {
    /// Create a shared store retaining at most `capacity` records.
    pub fn new(capacity: usize) -> Result<Self> {
        Ok(Self::from_store(RecordStore::new(capacity)?))
    }

    pub fn with_config(config: &StoreConfig) -> Result<Self> {
        Ok(Self::from_store(RecordStore::with_config(config)?))
    }

    /// Wrap an existing store.
    pub fn from_store(store: RecordStore) -> Self {
        SharedRecordStore {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    pub fn add(&self, key: i64, value: impl Into<String>) {
        self.inner.write().add(key, value);
    }

    pub fn search(&self, word: &str, limit: usize) -> Vec<i64> {
        self.inner.read().search(word, limit)
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn stats(&self) -> StoreStats {
        self.inner.read().stats()
    }

    /// Borrow the underlying store for several reads under one lock.
    pub fn read(&self) -> RwLockReadGuard<'_, RecordStore> {
        self.inner.read()
    }
}
