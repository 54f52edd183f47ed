//! Reading word counts from CSV files

use crate::{CorpusError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, instrument};
use wordweight_core::WeightedWordSet;

/// Layout of a CSV file holding one word and its weight per record
///
/// Records may have any number of fields as long as both columns exist.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvSource {
    /// Records skipped at the start of the file
    pub header_lines: usize,
    /// Zero-based column holding the word
    pub word_column: usize,
    /// Zero-based column holding the weight
    pub weight_column: usize,
}

impl Default for CsvSource {
    fn default() -> Self {
        Self {
            header_lines: 0,
            word_column: 0,
            weight_column: 1,
        }
    }
}

impl CsvSource {
    /// Read every record of `input` into a new set, adding repeated words
    pub fn read<R: Read>(&self, input: R) -> Result<WeightedWordSet> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(input);

        let mut words = WeightedWordSet::new();
        for (index, record) in reader.records().enumerate() {
            let record = record?;
            if index < self.header_lines {
                continue;
            }
            let line = record.position().map_or(index as u64 + 1, |p| p.line());

            let word = record.get(self.word_column).ok_or(CorpusError::MissingColumn {
                line,
                column: self.word_column,
            })?;
            let value = record
                .get(self.weight_column)
                .ok_or(CorpusError::MissingColumn {
                    line,
                    column: self.weight_column,
                })?;
            let weight: i64 = value.trim().parse().map_err(|_| CorpusError::InvalidWeight {
                line,
                value: value.to_string(),
            })?;

            words
                .add(word, weight)
                .map_err(|e| CorpusError::at_line(line, e))?;
        }
        Ok(words)
    }

    /// Read a CSV file from disk
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn read_path(&self, path: impl AsRef<Path>) -> Result<WeightedWordSet> {
        let words = self.read(File::open(path.as_ref())?)?;
        debug!(
            words = words.len(),
            total_weight = words.total_weight(),
            "Loaded CSV word counts"
        );
        Ok(words)
    }
}
