//! The COCA top-5000 word list with part-of-speech data
//!
//! The source CSV has two header lines followed by records of
//! `rank, word, part-of-speech, frequency, dispersion`. A word used as several
//! parts of speech appears once per use; those records are merged.

use crate::{CorpusError, Result};
use rand::Rng;
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{info, instrument};
use wordweight_core::WeightedWordSet;

const HEADER_LINES: usize = 2;
const COLUMNS: usize = 5;
const WORD_COLUMN: usize = 1;
const POS_COLUMN: usize = 2;
const FREQUENCY_COLUMN: usize = 3;

/// Words excluded from the list
const EXCLUDED: [&str; 1] = ["n't"];

/// Frequency-weighted words with adjective tagging
#[derive(Clone, Debug, Default)]
pub struct Lexicon {
    words: WeightedWordSet,
    adjectives: HashSet<String>,
}

impl Lexicon {
    /// Parse the COCA CSV from any reader
    pub fn from_reader<R: Read>(input: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(input);

        let mut lexicon = Lexicon::default();
        for (index, record) in reader.records().enumerate() {
            let record = record?;
            if index < HEADER_LINES {
                continue;
            }
            let line = record.position().map_or(index as u64 + 1, |p| p.line());
            if record.len() != COLUMNS {
                return Err(CorpusError::ColumnCount {
                    line,
                    expected: COLUMNS,
                    found: record.len(),
                });
            }

            let word = &record[WORD_COLUMN];
            if EXCLUDED.contains(&word) {
                continue;
            }
            let value = &record[FREQUENCY_COLUMN];
            let frequency: i64 = value.trim().parse().map_err(|_| CorpusError::InvalidWeight {
                line,
                value: value.to_string(),
            })?;

            lexicon
                .words
                .add(word, frequency)
                .map_err(|e| CorpusError::at_line(line, e))?;
            if record[POS_COLUMN].contains('j') {
                lexicon.adjectives.insert(word.to_string());
            }
        }
        Ok(lexicon)
    }

    /// Load the COCA CSV from disk
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let lexicon = Self::from_reader(File::open(path.as_ref())?)?;
        info!(
            words = lexicon.len(),
            adjectives = lexicon.adjective_count(),
            "Loaded lexicon"
        );
        Ok(lexicon)
    }

    /// All words with their summed frequencies
    pub fn words(&self) -> &WeightedWordSet {
        &self.words
    }

    /// Number of distinct words
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check whether the lexicon is empty
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Check whether any record tags `word` as an adjective
    pub fn is_adjective(&self, word: &str) -> bool {
        self.adjectives.contains(word)
    }

    /// Number of distinct adjectives
    pub fn adjective_count(&self) -> usize {
        self.adjectives.len()
    }

    /// Draw `n` distinct adjectives weighted by frequency plus `bias`
    pub fn sample_adjectives<R>(&self, rng: &mut R, n: usize, bias: i64) -> Result<WeightedWordSet>
    where
        R: Rng + ?Sized,
    {
        Ok(self
            .words
            .sample_where(rng, n, bias, |entry| self.adjectives.contains(&entry.word))?)
    }
}
