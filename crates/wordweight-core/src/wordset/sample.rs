//! Weighted random sampling without replacement
//!
//! Each draw picks a point in `[0, total)` where `total` is the set's weight
//! with `bias` added once per word, then walks down the tree comparing the
//! point against the biased weight of the left subtree and of the node itself.
//! A word is therefore chosen with probability proportional to
//! `weight + bias`, whatever the shape of the tree. Words drawn twice, or
//! rejected by a predicate, are simply redrawn.

use super::node::Node;
use super::{WeightedWord, WeightedWordSet};
use crate::{CoreError, Result};
use rand::Rng;

impl WeightedWordSet {
    /// Draw `n` distinct words using the thread-local RNG
    ///
    /// `bias` is added to every word's weight for the duration of the draw;
    /// larger values flatten the distribution towards uniform.
    pub fn sample(&self, n: usize, bias: i64) -> Result<WeightedWordSet> {
        self.sample_with(&mut rand::thread_rng(), n, bias)
    }

    /// Draw `n` distinct words using the given RNG
    pub fn sample_with<R>(&self, rng: &mut R, n: usize, bias: i64) -> Result<WeightedWordSet>
    where
        R: Rng + ?Sized,
    {
        validate_bias(bias)?;
        self.draw(rng, n, bias, self.len(), |_| true)
    }

    /// Draw `n` distinct words that satisfy `predicate`
    ///
    /// Fails with [`CoreError::SampleTooLarge`] when fewer than `n` words match.
    pub fn sample_where<R, P>(
        &self,
        rng: &mut R,
        n: usize,
        bias: i64,
        mut predicate: P,
    ) -> Result<WeightedWordSet>
    where
        R: Rng + ?Sized,
        P: FnMut(&WeightedWord) -> bool,
    {
        validate_bias(bias)?;
        if n == 0 {
            return Ok(WeightedWordSet::new());
        }
        let eligible = self.iter().filter(|entry| predicate(entry)).count();
        self.draw(rng, n, bias, eligible, predicate)
    }

    fn draw<R, P>(
        &self,
        rng: &mut R,
        n: usize,
        bias: i64,
        eligible: usize,
        mut predicate: P,
    ) -> Result<WeightedWordSet>
    where
        R: Rng + ?Sized,
        P: FnMut(&WeightedWord) -> bool,
    {
        if n > eligible {
            return Err(CoreError::SampleTooLarge {
                requested: n,
                available: eligible,
            });
        }
        let mut sample = WeightedWordSet::new();
        let Some(root) = self.root.as_deref() else {
            return Ok(sample);
        };
        if n == 0 {
            return Ok(sample);
        }

        let total = i64::try_from(root.size)
            .ok()
            .and_then(|size| bias.checked_mul(size))
            .and_then(|biased| biased.checked_add(root.total_weight))
            .ok_or_else(|| {
                CoreError::WeightOverflow(format!("sampling with bias {bias}"))
            })?;

        let mut draws = 0u64;
        while sample.len() < n {
            draws += 1;
            let entry = locate(root, rng.gen_range(0..total), bias);
            if !predicate(entry) {
                continue;
            }
            sample.insert(entry.word.clone(), entry.weight)?;
        }
        tracing::trace!(requested = n, draws, "Sampled words");
        Ok(sample)
    }
}

fn validate_bias(bias: i64) -> Result<()> {
    if bias < 0 {
        return Err(CoreError::InvalidBias(bias));
    }
    Ok(())
}

/// Find the word owning `point` in the biased cumulative weight order
fn locate(root: &Node, mut point: i64, bias: i64) -> &WeightedWord {
    let mut node = root;
    loop {
        match node.left.as_deref() {
            Some(left) if point < left.weighted_total(bias) => {
                node = left;
                continue;
            }
            Some(left) => point -= left.weighted_total(bias),
            None => {}
        }

        let own = node.entry.weight + bias;
        match node.right.as_deref() {
            Some(right) if point >= own => {
                point -= own;
                node = right;
            }
            _ => return &node.entry,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    fn powers_of_two() -> WeightedWordSet {
        WeightedWordSet::from_pairs([
            ("a", 1),
            ("d", 2),
            ("f", 4),
            ("b", 8),
            ("e", 16),
            ("c", 32),
        ])
        .unwrap()
    }

    #[test]
    fn test_locate_covers_every_point() {
        let set = powers_of_two();
        let root = set.root.as_deref().unwrap();
        let mut counts: HashMap<&str, i64> = HashMap::new();
        for point in 0..set.total_weight() {
            *counts.entry(locate(root, point, 0).word.as_str()).or_default() += 1;
        }
        for entry in set.iter() {
            assert_eq!(counts[entry.word.as_str()], entry.weight, "{}", entry.word);
        }
    }

    #[test]
    fn test_locate_with_bias() {
        let set = powers_of_two();
        let root = set.root.as_deref().unwrap();
        let bias = 5;
        let total = set.total_weight() + bias * set.len() as i64;
        let mut counts: HashMap<&str, i64> = HashMap::new();
        for point in 0..total {
            *counts.entry(locate(root, point, bias).word.as_str()).or_default() += 1;
        }
        for entry in set.iter() {
            assert_eq!(counts[entry.word.as_str()], entry.weight + bias);
        }
    }

    #[test]
    fn test_sample_everything() {
        let set = powers_of_two();
        let mut rng = StdRng::seed_from_u64(7);
        let sample = set.sample_with(&mut rng, set.len(), 0).unwrap();
        assert_eq!(sample, set);
    }

    #[test]
    fn test_sample_zero_from_empty() {
        let set = WeightedWordSet::new();
        let sample = set.sample(0, 0).unwrap();
        assert!(sample.is_empty());
    }

    /// Fails the test if any draw is made
    struct NoDraws;

    impl rand::RngCore for NoDraws {
        fn next_u32(&mut self) -> u32 {
            panic!("unexpected draw")
        }

        fn next_u64(&mut self) -> u64 {
            panic!("unexpected draw")
        }

        fn fill_bytes(&mut self, _dest: &mut [u8]) {
            panic!("unexpected draw")
        }

        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> std::result::Result<(), rand::Error> {
            panic!("unexpected draw")
        }
    }

    #[test]
    fn test_sample_zero_makes_no_draws() {
        let set = powers_of_two();
        assert!(set.sample_with(&mut NoDraws, 0, 0).unwrap().is_empty());
        assert!(set.sample_with(&mut NoDraws, 0, 1_000).unwrap().is_empty());
        assert!(set
            .sample_where(&mut NoDraws, 0, 5, |_| true)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_sample_too_large() {
        let set = powers_of_two();
        let err = set.sample(7, 0).unwrap_err();
        assert!(matches!(
            err,
            CoreError::SampleTooLarge {
                requested: 7,
                available: 6
            }
        ));
        assert!(matches!(
            WeightedWordSet::new().sample(1, 0),
            Err(CoreError::SampleTooLarge { .. })
        ));
    }

    #[test]
    fn test_negative_bias_rejected() {
        let set = powers_of_two();
        assert!(matches!(set.sample(1, -1), Err(CoreError::InvalidBias(-1))));
    }

    #[test]
    fn test_bias_overflow_reported() {
        let set = powers_of_two();
        assert!(matches!(
            set.sample(1, i64::MAX),
            Err(CoreError::WeightOverflow(_))
        ));
    }

    #[test]
    fn test_sampling_distribution() {
        let set = powers_of_two();
        let mut rng = StdRng::seed_from_u64(42);

        for bias in [0, 10_000] {
            let mut counts: HashMap<String, usize> = HashMap::new();
            for _ in 0..10_000 {
                let sample = set.sample_with(&mut rng, 2, bias).unwrap();
                assert_eq!(sample.len(), 2);
                for entry in sample.iter() {
                    *counts.entry(entry.word.clone()).or_default() += 1;
                }
            }
            assert_eq!(counts.len(), 6, "not every word was sampled");

            let (expected_c, expected_e) = if bias > 0 {
                (20_000 / 6, 20_000 / 6)
            } else {
                (10_000, 5_000)
            };
            let c = counts["c"];
            let e = counts["e"];
            assert!(c > expected_c / 2 && c < expected_c * 2, "c = {c}");
            assert!(e > expected_e / 2 && e < expected_e * 2, "e = {e}");
        }
    }

    #[test]
    fn test_sample_where_respects_predicate() {
        let set = powers_of_two();
        let mut rng = StdRng::seed_from_u64(3);
        let vowels = |w: &WeightedWord| matches!(w.word.as_str(), "a" | "e");

        for _ in 0..100 {
            let sample = set.sample_where(&mut rng, 2, 0, vowels).unwrap();
            let words: Vec<&str> = sample.iter().map(|w| w.word.as_str()).collect();
            assert_eq!(words, ["a", "e"]);
        }

        assert!(matches!(
            set.sample_where(&mut rng, 3, 0, vowels),
            Err(CoreError::SampleTooLarge {
                requested: 3,
                available: 2
            })
        ));
    }

    #[test]
    fn test_sample_keeps_stored_weights() {
        let set = powers_of_two();
        let sample = set.sample(3, 100).unwrap();
        for entry in sample.iter() {
            assert_eq!(set.get(&entry.word), Some(entry.weight));
        }
    }
}
