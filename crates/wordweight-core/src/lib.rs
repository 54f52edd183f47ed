//! # Wordweight Core
//!
//! Frequency-weighted word containers for the wordweight toolkit.
//!
//! This crate provides:
//! - **Weighted Word Sets**: balanced search trees keyed by word, caching
//!   subtree size and total weight at every node
//! - **Weighted Sampling**: draws without replacement, biased by weight plus an
//!   optional flattening bias, in O(log n) per draw
//! - **Snapshots**: a compact, self-validating binary format
//! - **Fold**: parallel construction of independent sets merged by one owner
//! - **Memo**: build-once caching of expensive sets
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │        Corpus readers / CLI             │
//! ├─────────────────────────────────────────┤
//! │     Fold (fan-out, fan-in)  │   Memo    │
//! ├─────────────────────────────────────────┤
//! │  Sampling  │  Snapshot codec │ Printer  │
//! ├─────────────────────────────────────────┤
//! │   WeightedWordSet (AVL + aggregates)    │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use wordweight_core::WeightedWordSet;
//!
//! let mut words = WeightedWordSet::new();
//! words.add("the", 12)?;
//! words.add("fox", 6)?;
//! words.add("the", 1)?;
//! assert_eq!(words.get("the"), Some(13));
//!
//! let picked = words.sample(1, 0)?;
//! assert_eq!(picked.len(), 1);
//! # Ok::<(), wordweight_core::CoreError>(())
//! ```

pub mod error;
pub mod fold;
pub mod memo;
pub mod wordset;

pub use error::{CoreError, InvariantViolation, Result};
pub use fold::{build_word_set, merge_all, FoldConfig};
pub use memo::Memo;
pub use wordset::{by_descending_weight, WeightedWord, WeightedWordSet};
