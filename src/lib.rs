//! # logstore
//!
//! A bounded, in-memory store of recent records with word-level search.
//!
//! ## Features
//!
//! - Fixed-capacity ring buffer with FIFO eviction of the oldest key
//! - In-place overwrite of existing keys without losing their recency slot
//! - Trie-backed inverted index kept exactly in step with the live records
//! - Most-recent-first word search capped at a caller-supplied limit
//! - Line-oriented `ADD` / `SEARCH` / `END` command session for the CLI
//!
//! ## Example
//!
//! ```
//! use logstore::store::RecordStore;
//!
//! let mut store = RecordStore::new(2).unwrap();
//! store.add(1, "hello world");
//! store.add(2, "hello there");
//! store.add(2, "goodbye");
//!
//! assert_eq!(store.search("hello", 5), vec![1]);
//! assert_eq!(store.search("goodbye", 5), vec![2]);
//! ```

pub mod analysis;
pub mod cli;
pub mod error;
pub mod index;
pub mod store;

pub use error::{LogStoreError, Result};
pub use index::InvertedIndex;
pub use store::{RecordStore, SharedRecordStore, StoreConfig, StoreStats};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
