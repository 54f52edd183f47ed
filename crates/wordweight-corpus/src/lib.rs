//! # Wordweight Corpus
//!
//! Readers that turn raw text and word lists into weighted word sets.
//!
//! This crate provides:
//! - **Tokenizing**: split text into lowercase alphabetic words
//! - **Gutenberg**: strip the license header and footer from ebooks
//! - **CSV sources**: load precomputed word counts
//! - **Lexicon**: the COCA top-5000 list with adjective tagging
//! - **Inflections**: reduce inflected forms to their base words
//!
//! ## Example
//!
//! ```rust
//! use wordweight_corpus::{count_words, InflectionMap};
//!
//! let mut inflections = InflectionMap::new();
//! inflections.add("fox", &["foxes"]);
//!
//! let counts = count_words("The fox saw two foxes.".as_bytes())?;
//! let fox: i64 = counts
//!     .iter()
//!     .filter(|(word, _)| inflections.base_word(word) == "fox")
//!     .map(|(_, n)| n)
//!     .sum();
//! assert_eq!(fox, 2);
//! # Ok::<(), std::io::Error>(())
//! ```

pub mod csv_source;
pub mod error;
pub mod gutenberg;
pub mod inflection;
pub mod lexicon;
pub mod tokenizer;

pub use csv_source::CsvSource;
pub use error::{CorpusError, Result};
pub use gutenberg::EbookBody;
pub use inflection::{load_preferences, InflectionMap, InflectionRecord};
pub use lexicon::Lexicon;
pub use tokenizer::{count_words, for_each_word};

use wordweight_core::WeightedWordSet;

/// Tokenize `text`, reduce each word with `inflections` and count the results
pub fn count_base_words<R: std::io::BufRead>(
    text: R,
    inflections: Option<&InflectionMap>,
) -> Result<WeightedWordSet> {
    let mut counts = WeightedWordSet::new();
    for_each_word(text, |word| {
        let word = inflections.map_or(word, |map| map.base_word(word));
        counts.add(word, 1).map_err(CorpusError::from)
    })?;
    Ok(counts)
}
