//! Whitespace tokenizer implementation.
//!
//! Words are maximal runs of non-whitespace characters. No punctuation is
//! stripped and no case folding is applied: `"Hello,"` and `"hello"` are
//! different words.
//!
//! # Examples
//!
//! ```
//! use logstore::analysis::tokenizer::WhitespaceTokenizer;
//!
//! let words: Vec<_> = WhitespaceTokenizer::tokenize("hello  world\tagain").collect();
//! assert_eq!(words, vec!["hello", "world", "again"]);
//! ```

/// A tokenizer that splits text on Unicode whitespace.
#[derive(Clone, Copy, Debug, Default)]
pub struct WhitespaceTokenizer;

impl WhitespaceTokenizer {
    /// Iterate over the words of `text` in order of appearance.
    pub fn tokenize(text: &str) -> impl Iterator<Item = &str> {
        text.split_whitespace()
    }

    /// Distinct words of `text`, sorted.
    ///
    /// A value that repeats a word is indexed under its counter once, so the
    /// index mutations are driven from this set rather than the raw stream.
    pub fn unique_words(text: &str) -> Vec<&str> {
        let mut words: Vec<&str> = Self::tokenize(text).collect();
        words.sort_unstable();
        words.dedup();
        words
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_tokenizer() {
        let words: Vec<&str> = WhitespaceTokenizer::tokenize("hello  world\ttest\n").collect();

        assert_eq!(words.len(), 3);
        assert_eq!(words[0], "hello");
        assert_eq!(words[1], "world");
        assert_eq!(words[2], "test");
    }

    #[test]
    fn test_no_folding_or_stripping() {
        let words: Vec<&str> = WhitespaceTokenizer::tokenize("Hello, hello! héllo").collect();
        assert_eq!(words, vec!["Hello,", "hello!", "héllo"]);
    }

    #[test]
    fn test_empty_and_blank_text() {
        assert_eq!(WhitespaceTokenizer::tokenize("").count(), 0);
        assert_eq!(WhitespaceTokenizer::tokenize(" \t \n ").count(), 0);
        assert!(WhitespaceTokenizer::unique_words("   ").is_empty());
    }

    #[test]
    fn test_unique_words_dedups() {
        let words = WhitespaceTokenizer::unique_words("b a b c a");
        assert_eq!(words, vec!["a", "b", "c"]);
    }
}
