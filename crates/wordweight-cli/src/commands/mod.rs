//! Subcommand implementations
//!
//! Every command writes its report to the given writer so the binary can hand
//! over standard output and tests can capture it.

pub mod build;
pub mod count;
pub mod game;
pub mod inspect;
pub mod sample;

use crate::{Command, CliConfig};
use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use wordweight_core::WeightedWordSet;

/// Run one subcommand
pub async fn dispatch(command: Command, config: &CliConfig, out: &mut dyn Write) -> Result<()> {
    match command {
        Command::Build(args) => build::run(&args, config, out).await,
        Command::Count(args) => count::run(&args, config, out).await,
        Command::Sample(args) => sample::run(&args, out),
        Command::Game(args) => game::run(&args, config, out).await,
        Command::Inspect(args) => inspect::run(&args, out),
    }
}

/// Read a snapshot file
pub fn read_snapshot(path: &Path) -> Result<WeightedWordSet> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    WeightedWordSet::deserialize(BufReader::new(file))
        .with_context(|| format!("reading snapshot {}", path.display()))
}

/// Write a snapshot file, replacing any existing one
pub fn write_snapshot(words: &WeightedWordSet, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut out = BufWriter::new(file);
    words
        .serialize(&mut out)
        .with_context(|| format!("writing snapshot {}", path.display()))?;
    out.flush()?;
    tracing::info!(
        path = %path.display(),
        words = words.len(),
        total_weight = words.total_weight(),
        "Wrote snapshot"
    );
    Ok(())
}

/// Seeded RNG when a seed is given, otherwise one seeded from the OS
pub fn rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Print words as `count  word` lines in the given order
pub fn write_counts(words: &WeightedWordSet, out: &mut dyn Write) -> std::io::Result<()> {
    for entry in words.get_words() {
        writeln!(out, "{:6}  {}", entry.weight, entry.word)?;
    }
    Ok(())
}
