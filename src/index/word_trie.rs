//! Character trie whose terminal nodes own a word's counter set.
//!
//! Each node exclusively owns its children; there are no parent pointers.
//! Children are keyed by `char`, so any word the tokenizer can produce has a
//! path, punctuation and non-ASCII text included.

use std::collections::BTreeSet;
use std::str::Chars;

use ahash::AHashMap;

/// A node in the word trie.
///
/// `counters` is `Some` only on nodes that terminate a currently indexed word
/// and is never an empty set.
#[derive(Debug, Default)]
pub struct TrieNode {
    children: AHashMap<char, TrieNode>,
    counters: Option<BTreeSet<u64>>,
}

impl TrieNode {
    /// Create an empty node.
    pub fn new() -> Self {
        Self::default()
    }

    /// Walk the path spelled by `word`, if it exists.
    pub fn find(&self, word: &str) -> Option<&TrieNode> {
        let mut current = self;
        for ch in word.chars() {
            current = current.children.get(&ch)?;
        }
        Some(current)
    }

    /// Add `counter` to the set for `word`, creating path nodes as needed.
    ///
    /// Returns the size of the word's set after the insert, or `None` if the
    /// counter was already present.
    pub fn insert(&mut self, word: &str, counter: u64) -> Option<usize> {
        let mut current = self;
        for ch in word.chars() {
            current = current.children.entry(ch).or_default();
        }

        let set = current.counters.get_or_insert_with(BTreeSet::new);
        set.insert(counter).then(|| set.len())
    }

    /// Remove `counter` from the set for `word`.
    ///
    /// Empty sets and childless path nodes left behind are pruned. Returns the
    /// size of the word's set after the removal, or `None` if nothing was
    /// removed (unknown word or counter).
    pub fn remove(&mut self, word: &str, counter: u64) -> Option<usize> {
        self.remove_path(word.chars(), counter)
    }

    fn remove_path(&mut self, mut chars: Chars<'_>, counter: u64) -> Option<usize> {
        let Some(ch) = chars.next() else {
            let set = self.counters.as_mut()?;
            if !set.remove(&counter) {
                return None;
            }
            let remaining = set.len();
            if remaining == 0 {
                self.counters = None;
            }
            return Some(remaining);
        };

        let child = self.children.get_mut(&ch)?;
        let remaining = child.remove_path(chars, counter);
        if child.is_prunable() {
            self.children.remove(&ch);
        }
        remaining
    }

    /// Counters indexed at this node, if this node terminates a word.
    pub fn counters(&self) -> Option<&BTreeSet<u64>> {
        self.counters.as_ref()
    }

    #[cfg(test)]
    fn child_count(&self) -> usize {
        self.children.len()
    }

    fn is_prunable(&self) -> bool {
        self.counters.is_none() && self.children.is_empty()
    }
}
