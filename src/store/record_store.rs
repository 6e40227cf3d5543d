//! Fixed-capacity ring buffer of records coupled to an inverted index.
//!
//! Every distinct key receives a counter the first time it is added. Counters
//! grow monotonically and the live records always occupy the half-open window
//! `[start_counter, end_counter)`, with the value for counter `c` stored in
//! slot `c % capacity`. Re-adding a key rewrites its slot in place and keeps
//! its counter; adding a new key to a full store evicts the record at
//! `start_counter` first.
//!
//! The inverted index is updated in the same step as the buffer, so after any
//! `add` it holds exactly the words of the live records under their counters.

use ahash::AHashMap;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::analysis::tokenizer::WhitespaceTokenizer;
use crate::error::{LogStoreError, Result};
use crate::index::InvertedIndex;
use crate::store::config::StoreConfig;

/// Point-in-time statistics about a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStats {
    /// Maximum number of live records.
    pub capacity: usize,

    /// Number of records currently retained.
    pub live_records: usize,

    /// Number of distinct words across live records.
    pub distinct_words: usize,

    /// Counter that the next new key will receive.
    pub next_counter: u64,

    /// Records dropped to make room for new keys.
    pub evictions: u64,

    /// In-place overwrites of existing keys.
    pub updates: u64,
}

/// A bounded store of the most recently registered keys.
///
/// # Examples
///
/// ```
/// use logstore::store::RecordStore;
///
/// let mut store = RecordStore::new(2).unwrap();
/// store.add(1, "hello world");
/// store.add(2, "hello there");
/// assert_eq!(store.search("hello", 2), vec![2, 1]);
///
/// store.add(3, "foo bar"); // evicts key 1
/// assert_eq!(store.search("hello", 2), vec![2]);
/// assert!(store.search("world", 1).is_empty());
/// ```
#[derive(Debug)]
pub struct RecordStore {
    capacity: usize,

    /// Slot `c % capacity` holds the value of live counter `c`.
    values: Vec<Option<String>>,

    key_to_counter: AHashMap<i64, u64>,
    counter_to_key: AHashMap<u64, i64>,

    /// First live counter.
    start_counter: u64,
    /// One past the last allocated counter.
    end_counter: u64,

    index: InvertedIndex,

    evictions: u64,
    updates: u64,
}

impl RecordStore {
    /// Create a store retaining at most `capacity` records.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(LogStoreError::InvalidCapacity(0));
        }

        Ok(RecordStore {
            capacity,
            values: vec![None; capacity],
            key_to_counter: AHashMap::with_capacity(capacity),
            counter_to_key: AHashMap::with_capacity(capacity),
            start_counter: 0,
            end_counter: 0,
            index: InvertedIndex::new(),
            evictions: 0,
            updates: 0,
        })
    }

    /// Create a store from a configuration.
    pub fn with_config(config: &StoreConfig) -> Result<Self> {
        config.validate()?;
        Self::new(config.capacity)
    }

    /// Register `value` under `key`, overwriting the key's previous value.
    ///
    /// An existing key keeps its counter, so its recency relative to other
    /// keys is unchanged. A new key takes the next counter, evicting the
    /// oldest record if the store is full.
    pub fn add(&mut self, key: i64, value: impl Into<String>) {
        let value = value.into();

        if let Some(&counter) = self.key_to_counter.get(&key) {
            self.overwrite(key, counter, value);
            return;
        }

        if self.is_full() {
            self.evict_oldest();
        }

        let counter = self.end_counter;
        let slot = self.slot(counter);
        index_words(&mut self.index, &value, counter);
        self.values[slot] = Some(value);
        self.key_to_counter.insert(key, counter);
        self.counter_to_key.insert(counter, key);
        self.end_counter += 1;
    }

    /// Keys of up to `limit` live records containing `word`, most recent first.
    pub fn search(&self, word: &str, limit: usize) -> Vec<i64> {
        self.index
            .top_k(word, limit)
            .into_iter()
            .filter_map(|counter| self.counter_to_key.get(&counter).copied())
            .collect()
    }

    fn overwrite(&mut self, key: i64, counter: u64, value: String) {
        let slot = self.slot(counter);
        if let Some(old) = self.values[slot].take() {
            unindex_words(&mut self.index, &old, counter);
        }
        index_words(&mut self.index, &value, counter);
        self.values[slot] = Some(value);
        self.updates += 1;

        debug!("updated key {key} in place at counter {counter}");
    }

    fn evict_oldest(&mut self) {
        let counter = self.start_counter;
        let slot = self.slot(counter);

        if let Some(old) = self.values[slot].take() {
            unindex_words(&mut self.index, &old, counter);
        }
        if let Some(key) = self.counter_to_key.remove(&counter) {
            self.key_to_counter.remove(&key);
            debug!("evicted key {key} at counter {counter}");
        }

        self.start_counter += 1;
        self.evictions += 1;
    }

    fn slot(&self, counter: u64) -> usize {
        (counter % self.capacity as u64) as usize
    }

    /// Maximum number of live records.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of live records.
    pub fn len(&self) -> usize {
        (self.end_counter - self.start_counter) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.start_counter == self.end_counter
    }

    /// Whether the live window spans the full capacity.
    pub fn is_full(&self) -> bool {
        self.len() == self.capacity
    }

    pub fn contains_key(&self, key: i64) -> bool {
        self.key_to_counter.contains_key(&key)
    }

    /// Current value of a live key.
    pub fn get(&self, key: i64) -> Option<&str> {
        let counter = *self.key_to_counter.get(&key)?;
        self.values[self.slot(counter)].as_deref()
    }

    /// Counter assigned to a live key.
    pub fn counter_of(&self, key: i64) -> Option<u64> {
        self.key_to_counter.get(&key).copied()
    }

    /// Live keys from oldest to newest.
    pub fn keys(&self) -> impl Iterator<Item = i64> + '_ {
        (self.start_counter..self.end_counter)
            .filter_map(|counter| self.counter_to_key.get(&counter).copied())
    }

    /// The index over live record words.
    pub fn index(&self) -> &InvertedIndex {
        &self.index
    }

    pub fn stats(&self) -> StoreStats {
        StoreStats {
            capacity: self.capacity,
            live_records: self.len(),
            distinct_words: self.index.word_count(),
            next_counter: self.end_counter,
            evictions: self.evictions,
            updates: self.updates,
        }
    }

    /// Verify the coupling between the buffer, the key maps, and the index.
    ///
    /// Checks that the live window fits the capacity, that keys and counters
    /// form a bijection over exactly the live window, that every live record's
    /// words are indexed under its counter, and that the index holds nothing
    /// else.
    pub fn check_invariants(&self) -> Result<()> {
        if self.start_counter > self.end_counter {
            return Err(LogStoreError::invariant(format!(
                "window start {} is past end {}",
                self.start_counter, self.end_counter
            )));
        }

        let live = self.len();
        if live > self.capacity {
            return Err(LogStoreError::invariant(format!(
                "{live} live records exceed capacity {}",
                self.capacity
            )));
        }
        if self.key_to_counter.len() != live || self.counter_to_key.len() != live {
            return Err(LogStoreError::invariant(format!(
                "key maps hold {} and {} entries for {live} live records",
                self.key_to_counter.len(),
                self.counter_to_key.len()
            )));
        }

        let occupied = self.values.iter().filter(|slot| slot.is_some()).count();
        if occupied != live {
            return Err(LogStoreError::invariant(format!(
                "{occupied} occupied slots for {live} live records"
            )));
        }

        let mut expected_postings = 0;
        for counter in self.start_counter..self.end_counter {
            let key = self.counter_to_key.get(&counter).ok_or_else(|| {
                LogStoreError::invariant(format!("live counter {counter} has no key"))
            })?;
            if self.key_to_counter.get(key) != Some(&counter) {
                return Err(LogStoreError::invariant(format!(
                    "key {key} does not map back to counter {counter}"
                )));
            }

            let value = self.values[self.slot(counter)].as_deref().ok_or_else(|| {
                LogStoreError::invariant(format!("live counter {counter} has an empty slot"))
            })?;
            for word in WhitespaceTokenizer::unique_words(value) {
                if !self.index.contains_posting(word, counter) {
                    return Err(LogStoreError::invariant(format!(
                        "word {word:?} of key {key} is not indexed under counter {counter}"
                    )));
                }
                expected_postings += 1;
            }
        }

        if self.index.posting_count() != expected_postings {
            return Err(LogStoreError::invariant(format!(
                "index holds {} postings, live records account for {expected_postings}",
                self.index.posting_count()
            )));
        }

        Ok(())
    }
}

fn index_words(index: &mut InvertedIndex, value: &str, counter: u64) {
    for word in WhitespaceTokenizer::unique_words(value) {
        index.insert(word, counter);
    }
}

fn unindex_words(index: &mut InvertedIndex, value: &str, counter: u64) {
    for word in WhitespaceTokenizer::unique_words(value) {
        index.remove(word, counter);
    }
}
