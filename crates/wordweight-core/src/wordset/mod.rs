//! Weighted word sets
//!
//! A [`WeightedWordSet`] stores words keyed by their exact spelling, each with a
//! positive weight. Words live in a height-balanced binary search tree whose
//! nodes cache the height, size and total weight of their subtree:
//! - O(log n) insertion and weight accumulation
//! - O(log n) weighted random draws (see [`sample`](WeightedWordSet::sample))
//! - a compact pre-order binary snapshot format (see [`codec`])
//!
//! The tree has no parent links. Insertion detaches the nodes along the search
//! path onto an owned stack and reattaches them bottom-up, rebalancing each one.

pub mod codec;
mod node;
mod pretty;
mod sample;

use crate::{CoreError, InvariantViolation, Result};
use node::{reattach, Link, Node, Side};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A word and its weight
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WeightedWord {
    /// The word, compared case-sensitively
    pub word: String,
    /// Observed frequency or importance; always positive inside a set
    pub weight: i64,
}

impl WeightedWord {
    /// Create a new weighted word
    pub fn new(word: impl Into<String>, weight: i64) -> Self {
        Self {
            word: word.into(),
            weight,
        }
    }
}

/// Sorts by descending weight, then ascending word
pub fn by_descending_weight(a: &WeightedWord, b: &WeightedWord) -> Ordering {
    b.weight.cmp(&a.weight).then_with(|| a.word.cmp(&b.word))
}

/// What to do when the inserted word is already present
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum OnExisting {
    Accumulate,
    Keep,
}

/// A balanced, weight-aggregating set of words
#[derive(Clone, Default)]
pub struct WeightedWordSet {
    root: Link,
}

impl WeightedWordSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self { root: None }
    }

    /// Build a set by adding every `(word, weight)` pair in turn
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, i64)>,
        S: Into<String>,
    {
        let mut set = Self::new();
        for (word, weight) in pairs {
            set.add(word, weight)?;
        }
        Ok(set)
    }

    /// Number of distinct words
    pub fn len(&self) -> usize {
        node::size(&self.root)
    }

    /// Check if the set is empty
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Sum of all weights
    pub fn total_weight(&self) -> i64 {
        node::total_weight(&self.root)
    }

    /// Height of the underlying tree (0 when empty)
    pub fn height(&self) -> u32 {
        node::height(&self.root)
    }

    /// Add `weight` to `word`, inserting the word if it is new
    pub fn add(&mut self, word: impl Into<String>, weight: i64) -> Result<()> {
        self.upsert(word.into(), weight, OnExisting::Accumulate)
            .map(|_| ())
    }

    /// Insert `word` only if it is absent
    ///
    /// Returns `true` when a new word was inserted. An existing word keeps its
    /// weight untouched.
    pub fn insert(&mut self, word: impl Into<String>, weight: i64) -> Result<bool> {
        self.upsert(word.into(), weight, OnExisting::Keep)
    }

    /// Add every entry of `other` into this set, summing weights of shared words
    pub fn add_all(&mut self, other: &WeightedWordSet) -> Result<()> {
        other
            .total_weight()
            .checked_add(self.total_weight())
            .ok_or_else(|| CoreError::WeightOverflow("merging word sets".to_string()))?;
        for entry in other.iter() {
            self.add(entry.word.clone(), entry.weight)?;
        }
        Ok(())
    }

    /// Look up the weight of a word
    pub fn get(&self, word: &str) -> Option<i64> {
        let mut cursor = self.root.as_deref();
        while let Some(node) = cursor {
            cursor = match word.cmp(node.entry.word.as_str()) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return Some(node.entry.weight),
            };
        }
        None
    }

    /// Check if a word is present
    pub fn contains(&self, word: &str) -> bool {
        self.get(word).is_some()
    }

    /// Iterate over all entries in ascending word order
    pub fn iter(&self) -> Iter<'_> {
        let mut iter = Iter { stack: Vec::new() };
        iter.push_left_spine(self.root.as_deref());
        iter
    }

    /// All entries sorted by descending weight, ties broken by ascending word
    pub fn get_words(&self) -> Vec<WeightedWord> {
        let mut words: Vec<WeightedWord> = self.iter().cloned().collect();
        words.sort_by(by_descending_weight);
        words
    }

    /// Validate ordering, balance, cached aggregates and weight positivity
    pub fn check(&self) -> std::result::Result<(), InvariantViolation> {
        check_node(self.root.as_deref(), None, None)?;

        // Whole-tree ordering, independent of the per-node bounds above.
        let mut previous: Option<&str> = None;
        for entry in self.iter() {
            if let Some(prev) = previous {
                if prev >= entry.word.as_str() {
                    return Err(InvariantViolation::Order {
                        key: entry.word.clone(),
                    });
                }
            }
            previous = Some(&entry.word);
        }
        Ok(())
    }

    fn upsert(&mut self, word: String, weight: i64, on_existing: OnExisting) -> Result<bool> {
        if weight <= 0 {
            return Err(CoreError::InvalidWeight { word, weight });
        }
        // Every cached total is bounded by the root's, so this one check keeps
        // all of them in range.
        if self.total_weight().checked_add(weight).is_none() {
            // Inserting a word that is already present changes no weight.
            if matches!(on_existing, OnExisting::Keep) && self.contains(&word) {
                return Ok(false);
            }
            return Err(CoreError::WeightOverflow(format!(
                "adding {weight} to {word:?}"
            )));
        }

        let mut path: Vec<(Box<Node>, Side)> = Vec::new();
        let mut cursor = self.root.take();
        let (subtree, inserted) = loop {
            let Some(mut node) = cursor else {
                break (Node::leaf(WeightedWord { word, weight }), true);
            };
            match word.as_str().cmp(node.entry.word.as_str()) {
                Ordering::Equal => {
                    let changed = match on_existing {
                        OnExisting::Accumulate => {
                            node.entry.weight += weight;
                            true
                        }
                        OnExisting::Keep => false,
                    };
                    break (node, changed);
                }
                Ordering::Less => {
                    cursor = node.left.take();
                    path.push((node, Side::Left));
                }
                Ordering::Greater => {
                    cursor = node.right.take();
                    path.push((node, Side::Right));
                }
            }
        };

        self.root = Some(reattach(path, subtree));
        Ok(inserted)
    }
}

fn check_node(
    node: Option<&Node>,
    lower: Option<&str>,
    upper: Option<&str>,
) -> std::result::Result<(), InvariantViolation> {
    let Some(node) = node else {
        return Ok(());
    };
    let key = node.entry.word.as_str();

    if node.entry.weight <= 0 {
        return Err(InvariantViolation::NonPositiveWeight {
            key: key.to_string(),
            weight: node.entry.weight,
        });
    }

    if lower.is_some_and(|l| l >= key) || upper.is_some_and(|u| u <= key) {
        return Err(InvariantViolation::Order {
            key: key.to_string(),
        });
    }

    let expected_height = 1 + node::height(&node.left).max(node::height(&node.right));
    if node.height != expected_height {
        return Err(InvariantViolation::Height {
            key: key.to_string(),
            expected: expected_height,
            actual: node.height,
        });
    }

    let expected_size = 1 + node::size(&node.left) + node::size(&node.right);
    if node.size != expected_size {
        return Err(InvariantViolation::Size {
            key: key.to_string(),
            expected: expected_size,
            actual: node.size,
        });
    }

    let expected_weight = node
        .entry
        .weight
        .saturating_add(node::total_weight(&node.left))
        .saturating_add(node::total_weight(&node.right));
    if node.total_weight != expected_weight {
        return Err(InvariantViolation::TotalWeight {
            key: key.to_string(),
            expected: expected_weight,
            actual: node.total_weight,
        });
    }

    let imbalance = node.imbalance();
    if imbalance.abs() > 1 {
        return Err(InvariantViolation::Balance {
            key: key.to_string(),
            imbalance,
        });
    }

    check_node(node.left.as_deref(), lower, Some(key))?;
    check_node(node.right.as_deref(), Some(key), upper)
}

/// In-order iterator over a [`WeightedWordSet`]
pub struct Iter<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iter<'a> {
    fn push_left_spine(&mut self, mut cursor: Option<&'a Node>) {
        while let Some(node) = cursor {
            self.stack.push(node);
            cursor = node.left.as_deref();
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a WeightedWord;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        Some(&node.entry)
    }
}

impl<'a> IntoIterator for &'a WeightedWordSet {
    type Item = &'a WeightedWord;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Sets are equal when they hold the same words with the same weights,
/// whatever their tree shapes.
impl PartialEq for WeightedWordSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl Eq for WeightedWordSet {}

impl fmt::Debug for WeightedWordSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeightedWordSet")
            .field("len", &self.len())
            .field("total_weight", &self.total_weight())
            .field("height", &self.height())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const SENTENCE: &str = "and again the quick brown fox jumps over the lazy dog";

    fn sentence_set() -> WeightedWordSet {
        let mut set = WeightedWordSet::new();
        for (i, word) in SENTENCE.split(' ').enumerate() {
            set.add(word, i as i64 + 1).unwrap();
            set.check().unwrap();
        }
        set
    }

    #[test]
    fn test_empty_set() {
        let set = WeightedWordSet::new();
        assert!(set.check().is_ok());
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
        assert_eq!(set.total_weight(), 0);
        assert_eq!(set.height(), 0);
        assert!(set.get_words().is_empty());
    }

    #[test]
    fn test_sentence_weights() {
        let set = sentence_set();
        assert_eq!(set.len(), 10);
        assert_eq!(set.total_weight(), 66);

        let expected = [
            ("the", 12),
            ("dog", 11),
            ("lazy", 10),
            ("over", 8),
            ("jumps", 7),
            ("fox", 6),
            ("brown", 5),
            ("quick", 4),
            ("again", 2),
            ("and", 1),
        ];
        let words = set.get_words();
        assert_eq!(words.len(), expected.len());
        for (actual, (word, weight)) in words.iter().zip(expected) {
            assert_eq!(actual, &WeightedWord::new(word, weight));
        }
    }

    #[test]
    fn test_insert_does_not_accumulate() {
        let mut set = WeightedWordSet::new();
        assert!(set.insert("foo", 1).unwrap());
        assert!(set.insert("bar", 1).unwrap());
        assert!(!set.insert("foo", 5).unwrap());
        assert_eq!(set.len(), 2);
        assert_eq!(set.total_weight(), 2);
        assert_eq!(set.get("foo"), Some(1));
    }

    #[test]
    fn test_add_accumulates() {
        let mut set = WeightedWordSet::new();
        set.add("word", 3).unwrap();
        set.add("word", 4).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.get("word"), Some(7));
        assert_eq!(set.total_weight(), 7);
    }

    #[test]
    fn test_add_all() {
        let mut w1 = WeightedWordSet::from_pairs([("a", 1), ("b", 3), ("c", 10), ("d", 15)]).unwrap();
        let w2 = WeightedWordSet::from_pairs([("a", 15), ("b", 4), ("e", 1), ("f", 12)]).unwrap();

        w1.add_all(&w2).unwrap();
        w1.check().unwrap();

        let expected = WeightedWordSet::from_pairs([
            ("a", 16),
            ("b", 7),
            ("c", 10),
            ("d", 15),
            ("e", 1),
            ("f", 12),
        ])
        .unwrap();
        assert_eq!(w1, expected);
    }

    #[rstest]
    #[case(0)]
    #[case(-1)]
    #[case(i64::MIN)]
    fn test_rejects_non_positive_weight(#[case] weight: i64) {
        let mut set = WeightedWordSet::from_pairs([("keep", 2)]).unwrap();
        assert!(matches!(
            set.add("bad", weight),
            Err(CoreError::InvalidWeight { .. })
        ));
        assert!(matches!(
            set.insert("bad", weight),
            Err(CoreError::InvalidWeight { .. })
        ));
        assert_eq!(set.len(), 1);
        assert!(!set.contains("bad"));
    }

    #[test]
    fn test_overflow_leaves_set_untouched() {
        let mut set = WeightedWordSet::from_pairs([("big", i64::MAX - 1)]).unwrap();
        assert!(matches!(
            set.add("big", 2),
            Err(CoreError::WeightOverflow(_))
        ));
        assert!(matches!(
            set.add("other", 2),
            Err(CoreError::WeightOverflow(_))
        ));
        assert_eq!(set.get("big"), Some(i64::MAX - 1));
        assert_eq!(set.len(), 1);
        set.check().unwrap();
    }

    #[test]
    fn test_insert_existing_near_overflow_is_noop() {
        let mut set = WeightedWordSet::from_pairs([("big", i64::MAX - 1)]).unwrap();
        assert!(!set.insert("big", 2).unwrap());
        assert!(matches!(
            set.insert("new", 2),
            Err(CoreError::WeightOverflow(_))
        ));
        assert_eq!(set.get("big"), Some(i64::MAX - 1));
        assert_eq!(set.len(), 1);
        set.check().unwrap();
    }

    #[test]
    fn test_iter_is_sorted() {
        let set = sentence_set();
        let keys: Vec<&str> = set.iter().map(|w| w.word.as_str()).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }

    #[test]
    fn test_case_sensitive_keys() {
        let set = WeightedWordSet::from_pairs([("Word", 1), ("word", 2)]).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.get("Word"), Some(1));
        assert_eq!(set.get("WORD"), None);
    }

    #[test]
    fn test_sequential_inserts_stay_balanced() {
        let mut set = WeightedWordSet::new();
        for i in 0..1024 {
            set.add(format!("w{i:05}"), 1).unwrap();
        }
        set.check().unwrap();
        assert_eq!(set.len(), 1024);
        // A perfectly filled AVL tree of 1024 nodes is 11 levels high.
        assert!(set.height() <= 12, "height {}", set.height());
    }

    #[test]
    fn test_check_reports_stale_size() {
        let mut set = WeightedWordSet::from_pairs([("a", 1), ("b", 1), ("c", 1)]).unwrap();
        set.root.as_mut().unwrap().size = 7;
        assert_eq!(
            set.check(),
            Err(InvariantViolation::Size {
                key: "b".to_string(),
                expected: 3,
                actual: 7,
            })
        );
    }

    #[test]
    fn test_check_reports_stale_height() {
        let mut set = WeightedWordSet::from_pairs([("a", 1), ("b", 1), ("c", 1)]).unwrap();
        set.root.as_mut().unwrap().height = 5;
        assert_eq!(
            set.check(),
            Err(InvariantViolation::Height {
                key: "b".to_string(),
                expected: 2,
                actual: 5,
            })
        );
    }

    #[test]
    fn test_check_reports_stale_total_weight() {
        let mut set = WeightedWordSet::from_pairs([("a", 2), ("b", 3), ("c", 4)]).unwrap();
        set.root.as_mut().unwrap().total_weight = 8;
        assert_eq!(
            set.check(),
            Err(InvariantViolation::TotalWeight {
                key: "b".to_string(),
                expected: 9,
                actual: 8,
            })
        );
    }

    #[test]
    fn test_check_reports_imbalance() {
        // a -> b -> c leaning right, with correct cached aggregates
        let c = Node::leaf(WeightedWord::new("c", 1));
        let b = Node::with_children(WeightedWord::new("b", 1), None, Some(c));
        let a = Node::with_children(WeightedWord::new("a", 1), None, Some(b));
        let set = WeightedWordSet { root: Some(a) };
        assert_eq!(
            set.check(),
            Err(InvariantViolation::Balance {
                key: "a".to_string(),
                imbalance: 2,
            })
        );
    }

    #[test]
    fn test_check_reports_order_violation() {
        let mut set = WeightedWordSet::from_pairs([("a", 1), ("b", 1), ("c", 1)]).unwrap();
        set.root.as_mut().unwrap().left.as_mut().unwrap().entry.word = "z".to_string();
        let violation = set.check().unwrap_err();
        assert_eq!(violation.key(), "z");
        assert!(matches!(violation, InvariantViolation::Order { .. }));
    }

    #[test]
    fn test_check_reports_non_positive_weight() {
        let mut set = WeightedWordSet::from_pairs([("a", 1)]).unwrap();
        let root = set.root.as_mut().unwrap();
        root.entry.weight = 0;
        root.total_weight = 0;
        assert_eq!(
            set.check(),
            Err(InvariantViolation::NonPositiveWeight {
                key: "a".to_string(),
                weight: 0,
            })
        );
    }

    #[test]
    fn test_equality_ignores_shape() {
        let forward = WeightedWordSet::from_pairs([("a", 1), ("b", 2), ("c", 3), ("d", 4)]).unwrap();
        let backward = WeightedWordSet::from_pairs([("d", 4), ("c", 3), ("b", 2), ("a", 1)]).unwrap();
        assert_eq!(forward, backward);
        assert_ne!(forward, WeightedWordSet::from_pairs([("a", 1)]).unwrap());
    }

    #[test]
    fn test_weighted_word_json() {
        let set = WeightedWordSet::from_pairs([("fox", 3), ("dog", 7)]).unwrap();
        let json = serde_json::to_string(&set.get_words()).unwrap();
        assert_eq!(json, r#"[{"word":"dog","weight":7},{"word":"fox","weight":3}]"#);

        let parsed: Vec<WeightedWord> = serde_json::from_str(&json).unwrap();
        assert_eq!(WeightedWordSet::from_pairs(parsed.into_iter().map(|w| (w.word, w.weight))).unwrap(), set);
    }
}
