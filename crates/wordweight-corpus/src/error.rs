//! Error types for the wordweight-corpus crate

use thiserror::Error;

/// Result type alias using `CorpusError`
pub type Result<T> = std::result::Result<T, CorpusError>;

/// Errors that can occur while reading corpora
#[derive(Error, Debug)]
pub enum CorpusError {
    /// A record lacks a required column
    #[error("line {line}: missing column {column}")]
    MissingColumn { line: u64, column: usize },

    /// A record has the wrong number of columns
    #[error("line {line}: expected {expected} columns, found {found}")]
    ColumnCount {
        line: u64,
        expected: usize,
        found: usize,
    },

    /// A weight could not be parsed as an integer
    #[error("line {line}: invalid weight {value:?}")]
    InvalidWeight { line: u64, value: String },

    /// The preferences file maps one inflected form twice
    #[error("duplicate preference for {0:?}")]
    DuplicatePreference(String),

    /// CSV error
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// XML error
    #[error("xml error: {0}")]
    Xml(#[from] quick_xml::DeError),

    /// Word set error
    #[error(transparent)]
    Core(#[from] wordweight_core::CoreError),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl CorpusError {
    /// Attach a line number to a word set error raised while adding a record
    pub(crate) fn at_line(line: u64, err: wordweight_core::CoreError) -> Self {
        match err {
            wordweight_core::CoreError::InvalidWeight { weight, .. } => {
                CorpusError::InvalidWeight {
                    line,
                    value: weight.to_string(),
                }
            }
            other => CorpusError::Core(other),
        }
    }
}
