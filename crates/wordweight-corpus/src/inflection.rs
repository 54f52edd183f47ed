//! Reducing inflected words to their base form
//!
//! Verbs reduce to the infinitive and nouns to the singular, so "bears" and
//! "bearing" are counted apart from "bear" only when the data says so.
//! Adjective and adverb records are ignored; comparatives stay as they are.
//!
//! The XML source looks like:
//!
//! ```xml
//! <inflections>
//!   <inflection>
//!     <base>bear</base>
//!     <pos>verb</pos>
//!     <inflected>bears</inflected>
//!     <inflected>bore</inflected>
//!   </inflection>
//! </inflections>
//! ```

use crate::{CorpusError, Result};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use tracing::{info, instrument, warn};

/// Parts of speech whose inflections are reduced
const REDUCED_POS: [&str; 2] = ["noun", "verb"];

/// Placeholders used in the source data for missing forms
const PLACEHOLDERS: [&str; 2] = ["-", "?"];

#[derive(Debug, Deserialize)]
struct InflectionsDocument {
    #[serde(rename = "inflection", default)]
    inflections: Vec<InflectionRecord>,
}

/// One base word with its part of speech and inflected forms
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct InflectionRecord {
    /// The base form
    pub base: String,
    /// Part of speech, such as `noun` or `verb`
    pub pos: String,
    /// Every inflected form
    #[serde(rename = "inflected", default)]
    pub inflected: Vec<String>,
}

/// Mapping from inflected forms to base words
#[derive(Clone, Debug, Default)]
pub struct InflectionMap {
    base_words: HashSet<String>,
    inflected_to_base: HashMap<String, String>,
    preferences: HashMap<String, String>,
}

impl InflectionMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty map that resolves conflicts using `preferences`
    ///
    /// Each preference maps an inflected form to the base word it must reduce
    /// to, whatever the data says.
    pub fn with_preferences(preferences: HashMap<String, String>) -> Self {
        Self {
            preferences,
            ..Self::default()
        }
    }

    /// Build a map from parsed records, keeping only nouns and verbs
    pub fn from_records<I>(records: I, preferences: HashMap<String, String>) -> Self
    where
        I: IntoIterator<Item = InflectionRecord>,
    {
        let mut map = Self::with_preferences(preferences);
        for record in records {
            if !REDUCED_POS.contains(&record.pos.as_str()) {
                continue;
            }
            map.add(&record.base, record.inflected.as_slice());
        }
        map
    }

    /// Parse the XML format from a buffered reader
    pub fn from_xml<R: BufRead>(input: R, preferences: HashMap<String, String>) -> Result<Self> {
        let document: InflectionsDocument = quick_xml::de::from_reader(input)?;
        Ok(Self::from_records(document.inflections, preferences))
    }

    /// Load the XML format from disk, with an optional preferences CSV
    #[instrument(skip(xml), fields(xml = %xml.as_ref().display()))]
    pub fn load(xml: impl AsRef<Path>, preferences: Option<&Path>) -> Result<Self> {
        let preferences = match preferences {
            Some(path) => load_preferences(File::open(path)?)?,
            None => HashMap::new(),
        };
        let map = Self::from_xml(BufReader::new(File::open(xml.as_ref())?), preferences)?;
        info!(
            base_words = map.base_word_count(),
            inflections = map.inflection_count(),
            "Loaded inflection map"
        );
        Ok(map)
    }

    /// Record `base` and map each of `inflected` to it
    ///
    /// When a form already maps to a different base, a preference decides.
    /// Without one, a form ending in "-ings" keeps its "-ing" base ("bearings"
    /// reduces to "bearing", not "bear"); otherwise the first mapping stays.
    pub fn add<S: AsRef<str>>(&mut self, base: &str, inflected: &[S]) {
        self.base_words.insert(base.to_string());

        for form in inflected.iter().map(AsRef::as_ref) {
            if PLACEHOLDERS.contains(&form) {
                continue;
            }

            if let Some(preferred) = self.preferences.get(form) {
                self.inflected_to_base
                    .insert(form.to_string(), preferred.clone());
                continue;
            }

            let Some(existing) = self.inflected_to_base.get(form) else {
                self.inflected_to_base
                    .insert(form.to_string(), base.to_string());
                continue;
            };
            if existing == base {
                continue;
            }

            if let Some(singular) = form.strip_suffix('s').filter(|_| form.ends_with("ings")) {
                if base == singular {
                    self.inflected_to_base
                        .insert(form.to_string(), base.to_string());
                    continue;
                }
                if existing == singular {
                    continue;
                }
            }

            warn!(
                inflected = form,
                kept = existing.as_str(),
                ignored = base,
                "Conflicting base words, keeping the first"
            );
        }
    }

    /// Reduce `word` to its base form
    ///
    /// Known base words map to themselves, known inflections to their base, and
    /// anything else passes through unchanged.
    pub fn base_word<'a>(&'a self, word: &'a str) -> &'a str {
        if self.base_words.contains(word) {
            return word;
        }
        self.inflected_to_base
            .get(word)
            .map(String::as_str)
            .unwrap_or(word)
    }

    /// Number of distinct base words
    pub fn base_word_count(&self) -> usize {
        self.base_words.len()
    }

    /// Number of mapped inflected forms
    pub fn inflection_count(&self) -> usize {
        self.inflected_to_base.len()
    }
}

/// Read a two-column `inflected,base` preferences CSV
pub fn load_preferences<R: Read>(input: R) -> Result<HashMap<String, String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input);

    let mut preferences = HashMap::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        let line = record.position().map_or(index as u64 + 1, |p| p.line());
        if record.len() != 2 {
            return Err(CorpusError::ColumnCount {
                line,
                expected: 2,
                found: record.len(),
            });
        }
        let inflected = record[0].to_string();
        if preferences.contains_key(&inflected) {
            return Err(CorpusError::DuplicatePreference(inflected));
        }
        preferences.insert(inflected, record[1].to_string());
    }
    Ok(preferences)
}
