//! # Wordweight
//!
//! Frequency-weighted word sets with balanced-tree sampling.
//!
//! This facade re-exports the library crates:
//! - `wordweight-core`: the weighted word set, sampling, snapshots, fold and memo
//! - `wordweight-corpus`: tokenizing, Gutenberg ebooks, CSV counts, COCA and inflections
//!
//! ## Example
//!
//! ```rust
//! use wordweight::{count_base_words, WeightedWordSet};
//!
//! let counts = count_base_words("to be or not to be".as_bytes(), None)?;
//! assert_eq!(counts.get("be"), Some(2));
//!
//! let restored = WeightedWordSet::from_bytes(&counts.to_bytes())?;
//! assert_eq!(restored, counts);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use wordweight_core;
pub use wordweight_corpus;

pub use wordweight_core::{
    build_word_set, by_descending_weight, merge_all, CoreError, FoldConfig, InvariantViolation,
    Memo, WeightedWord, WeightedWordSet,
};
pub use wordweight_corpus::{
    count_base_words, CorpusError, CsvSource, EbookBody, InflectionMap, Lexicon,
};
