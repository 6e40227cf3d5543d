//! Word-level inverted index over record counters.
//!
//! The index maps each word to the ordered set of counters of the records
//! whose value contains it. It knows nothing about keys, capacity, or
//! eviction; the [`crate::store::RecordStore`] is its only writer.

pub mod inverted;
pub mod word_trie;

pub use inverted::InvertedIndex;
