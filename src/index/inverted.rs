//! Inverted index: word → ordered set of record counters.

use log::trace;

use crate::index::word_trie::TrieNode;

/// Maps words to the counters of the records containing them.
///
/// Per-word counters are kept in ascending order so the most recent matches
/// come off the top of the set without scanning it.
///
/// # Examples
///
/// ```
/// use logstore::index::InvertedIndex;
///
/// let mut index = InvertedIndex::new();
/// index.insert("hello", 0);
/// index.insert("hello", 4);
/// index.insert("hello", 2);
///
/// assert_eq!(index.top_k("hello", 2), vec![4, 2]);
/// assert!(index.top_k("absent", 10).is_empty());
/// ```
#[derive(Debug, Default)]
pub struct InvertedIndex {
    root: TrieNode,
    word_count: usize,
    posting_count: usize,
}

impl InvertedIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Index `counter` under `word`. Inserting an existing pair is a no-op.
    pub fn insert(&mut self, word: &str, counter: u64) {
        if let Some(len) = self.root.insert(word, counter) {
            self.posting_count += 1;
            if len == 1 {
                self.word_count += 1;
            }
            trace!("indexed {word:?} -> {counter}");
        }
    }

    /// Drop `counter` from `word`'s set.
    ///
    /// Unknown words and counters are ignored.
    pub fn remove(&mut self, word: &str, counter: u64) {
        match self.root.remove(word, counter) {
            Some(remaining) => {
                self.posting_count -= 1;
                if remaining == 0 {
                    self.word_count -= 1;
                }
                trace!("unindexed {word:?} -> {counter}");
            }
            None => trace!("remove of unindexed {word:?} -> {counter} ignored"),
        }
    }

    /// The `limit` largest counters for `word`, largest first.
    ///
    /// Traversal starts at the maximum and stops after `limit` elements.
    pub fn top_k(&self, word: &str, limit: usize) -> Vec<u64> {
        if limit == 0 {
            return Vec::new();
        }

        match self.root.find(word).and_then(TrieNode::counters) {
            Some(counters) => counters.iter().rev().take(limit).copied().collect(),
            None => Vec::new(),
        }
    }

    /// Whether any record currently contains `word`.
    pub fn contains(&self, word: &str) -> bool {
        self.doc_freq(word) > 0
    }

    /// Whether `counter` is indexed under `word`.
    pub fn contains_posting(&self, word: &str, counter: u64) -> bool {
        self.root
            .find(word)
            .and_then(TrieNode::counters)
            .is_some_and(|counters| counters.contains(&counter))
    }

    /// Number of counters indexed under `word`.
    pub fn doc_freq(&self, word: &str) -> usize {
        self.root
            .find(word)
            .and_then(TrieNode::counters)
            .map_or(0, |counters| counters.len())
    }

    /// Number of distinct words indexed.
    pub fn word_count(&self) -> usize {
        self.word_count
    }

    /// Total number of (word, counter) pairs indexed.
    pub fn posting_count(&self) -> usize {
        self.posting_count
    }

    pub fn is_empty(&self) -> bool {
        self.posting_count == 0
    }
}
