//! `wordweight build`: fold CSV word counts into one snapshot

use super::write_snapshot;
use crate::cli::BuildArgs;
use crate::CliConfig;
use anyhow::Result;
use std::io::Write;
use tracing::{info, instrument};
use wordweight_core::{build_word_set, CoreError, FoldConfig};
use wordweight_corpus::{CorpusError, CsvSource};

#[instrument(skip_all, fields(inputs = args.inputs.len()))]
pub async fn run(args: &BuildArgs, config: &CliConfig, out: &mut dyn Write) -> Result<()> {
    let source = CsvSource {
        header_lines: args.header_lines.unwrap_or(config.csv.header_lines),
        word_column: args.word_column.unwrap_or(config.csv.word_column),
        weight_column: args.weight_column.unwrap_or(config.csv.weight_column),
    };
    let fold = FoldConfig::with_concurrency(args.concurrency.unwrap_or(config.concurrency));

    let tasks: Vec<_> = args
        .inputs
        .iter()
        .cloned()
        .map(|path| {
            let source = source.clone();
            move || {
                source.read_path(&path).map_err(|e| match e {
                    CorpusError::Core(e) => e,
                    other => CoreError::Worker(format!("{}: {other}", path.display())),
                })
            }
        })
        .collect();

    info!(?source, concurrency = fold.concurrency, "Building word set");
    let words = build_word_set(tasks, fold).await?;
    write_snapshot(&words, &args.output)?;

    writeln!(
        out,
        "Wrote {} words with total weight {} to {}",
        words.len(),
        words.total_weight(),
        args.output.display()
    )?;
    Ok(())
}
