//! `wordweight sample`: draw random words from a snapshot

use super::{read_snapshot, rng_from, write_counts};
use crate::cli::SampleArgs;
use anyhow::Result;
use std::io::Write;

pub fn run(args: &SampleArgs, out: &mut dyn Write) -> Result<()> {
    let words = read_snapshot(&args.snapshot)?;
    let mut rng = rng_from(args.seed);
    let sample = words.sample_with(&mut rng, args.n, args.bias)?;

    if args.json {
        serde_json::to_writer_pretty(&mut *out, &sample.get_words())?;
        writeln!(out)?;
    } else {
        write_counts(&sample, out)?;
    }
    Ok(())
}
