//! `wordweight inspect`: describe a snapshot

use super::read_snapshot;
use crate::cli::InspectArgs;
use anyhow::Result;
use std::io::Write;
use wordweight_core::WeightedWordSet;

pub fn run(args: &InspectArgs, out: &mut dyn Write) -> Result<()> {
    let words = read_snapshot(&args.snapshot)?;
    describe(&words, args.tree, out)?;
    Ok(())
}

fn describe(words: &WeightedWordSet, tree: bool, out: &mut dyn Write) -> std::io::Result<()> {
    writeln!(out, "words:        {}", words.len())?;
    writeln!(out, "total weight: {}", words.total_weight())?;
    writeln!(out, "height:       {}", words.height())?;
    match words.check() {
        Ok(()) => writeln!(out, "invariants:   ok")?,
        Err(violation) => writeln!(out, "invariants:   {violation}")?,
    }
    if tree {
        writeln!(out)?;
        write!(out, "{}", words.pretty_print())?;
    }
    Ok(())
}
