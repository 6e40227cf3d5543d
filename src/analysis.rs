//! Text analysis for record values.
//!
//! Values are broken into words by [`tokenizer::WhitespaceTokenizer`]. The
//! same tokenizer is used on insert, removal, and query, so "a record contains
//! a word" means exactly "the word is one of the value's whitespace-delimited
//! tokens".

pub mod tokenizer;
