//! Bounded record store with word search.
//!
//! [`RecordStore`] keeps the most recent `capacity` distinct keys in a ring
//! buffer and drives an [`crate::index::InvertedIndex`] on every mutation so
//! that searches only ever see the words of live records.

pub mod config;
pub mod record_store;
pub mod shared;

pub use config::StoreConfig;
pub use record_store::{RecordStore, StoreStats};
pub use shared::SharedRecordStore;
