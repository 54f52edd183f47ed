//! Parallel construction and sequential merging of word sets
//!
//! Independent producers (one per input file, say) each build their own
//! [`WeightedWordSet`]. The results are then folded into a single set by one
//! owner through repeated [`add_all`](WeightedWordSet::add_all), so no set is
//! ever mutated from two places at once. Merging is commutative, associative
//! and weight-additive, so the fold order never changes the result.

use crate::{CoreError, Result, WeightedWordSet};
use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::{debug, instrument};

/// Configuration for parallel builds
#[derive(Clone, Debug)]
pub struct FoldConfig {
    /// Maximum number of build tasks running at once
    pub concurrency: usize,
}

impl Default for FoldConfig {
    fn default() -> Self {
        Self {
            concurrency: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4),
        }
    }
}

impl FoldConfig {
    /// Create with an explicit concurrency limit (at least one)
    pub fn with_concurrency(concurrency: usize) -> Self {
        Self {
            concurrency: concurrency.max(1),
        }
    }
}

/// Merge sets one after another into a single set
pub fn merge_all<I>(sets: I) -> Result<WeightedWordSet>
where
    I: IntoIterator<Item = WeightedWordSet>,
{
    let mut merged = WeightedWordSet::new();
    for set in sets {
        if merged.is_empty() {
            merged = set;
        } else {
            merged.add_all(&set)?;
        }
    }
    Ok(merged)
}

/// Run every build task on the blocking pool and fold their results
///
/// At most `config.concurrency` tasks run at once. Results are merged in task
/// order as they become available. The first task to fail, panic or be
/// cancelled aborts the whole build with its error and nothing is merged from
/// the remaining tasks.
#[instrument(skip(tasks, config), fields(tasks = tasks.len(), concurrency = config.concurrency))]
pub async fn build_word_set<F>(tasks: Vec<F>, config: FoldConfig) -> Result<WeightedWordSet>
where
    F: FnOnce() -> Result<WeightedWordSet> + Send + 'static,
{
    let mut results = stream::iter(tasks.into_iter().enumerate())
        .map(|(index, task)| async move {
            let set = tokio::task::spawn_blocking(task)
                .await
                .map_err(|e| CoreError::Worker(format!("task {index}: {e}")))??;
            debug!(task = index, words = set.len(), "Build task finished");
            Ok::<_, CoreError>(set)
        })
        .buffered(config.concurrency.max(1));

    let mut merged = WeightedWordSet::new();
    while let Some(set) = results.try_next().await? {
        if merged.is_empty() {
            merged = set;
        } else {
            merged.add_all(&set)?;
        }
    }

    debug!(
        words = merged.len(),
        total_weight = merged.total_weight(),
        "Merged build results"
    );
    Ok(merged)
}
