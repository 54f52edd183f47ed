//! `wordweight count`: tokenize text and count base words

use super::{write_counts, write_snapshot};
use crate::cli::CountArgs;
use crate::CliConfig;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::sync::Arc;
use tracing::instrument;
use wordweight_core::{build_word_set, CoreError, FoldConfig, WeightedWordSet};
use wordweight_corpus::{count_base_words, EbookBody, InflectionMap};

#[instrument(skip_all, fields(inputs = args.inputs.len(), gutenberg = args.gutenberg))]
pub async fn run(args: &CountArgs, config: &CliConfig, out: &mut dyn Write) -> Result<()> {
    let inflections = match args.inflections.as_ref().or(config.inflections.as_ref()) {
        Some(xml) => {
            let preferences = args.preferences.as_deref().or(config.preferences.as_deref());
            Some(
                InflectionMap::load(xml, preferences)
                    .with_context(|| format!("loading inflections {}", xml.display()))?,
            )
        }
        None => None,
    };

    let counts = if args.inputs.is_empty() {
        let stdin = std::io::stdin();
        count_text(stdin.lock(), args.gutenberg, inflections.as_ref())?
    } else {
        let inflections = Arc::new(inflections);
        let gutenberg = args.gutenberg;
        let tasks: Vec<_> = args
            .inputs
            .iter()
            .cloned()
            .map(|path| {
                let inflections = Arc::clone(&inflections);
                move || {
                    let file = File::open(&path)?;
                    count_text(BufReader::new(file), gutenberg, (*inflections).as_ref())
                        .map_err(|e| CoreError::Worker(format!("{}: {e:#}", path.display())))
                }
            })
            .collect();
        build_word_set(tasks, FoldConfig::with_concurrency(config.concurrency)).await?
    };

    if let Some(output) = &args.output {
        write_snapshot(&counts, output)?;
    }
    write_counts(&counts, out)?;
    Ok(())
}

/// Count the base words of one text
fn count_text<R: BufRead>(
    text: R,
    gutenberg: bool,
    inflections: Option<&InflectionMap>,
) -> Result<WeightedWordSet> {
    let counts = if gutenberg {
        count_base_words(BufReader::new(EbookBody::new(text)), inflections)?
    } else {
        count_base_words(text, inflections)?
    };
    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOOK: &str = "\
Produced by volunteers
*** START OF THE PROJECT GUTENBERG EBOOK FOXES ***
Foxes run. A fox ran.
*** END OF THE PROJECT GUTENBERG EBOOK FOXES ***
Project Gutenberg license text
";

    #[test]
    fn test_count_plain_text() {
        let counts = count_text(BOOK.as_bytes(), false, None).unwrap();
        assert_eq!(counts.get("gutenberg"), Some(3));
        assert_eq!(counts.get("fox"), Some(1));
    }

    #[test]
    fn test_count_gutenberg_with_inflections() {
        let mut inflections = InflectionMap::new();
        inflections.add("fox", &["foxes"]);
        inflections.add("run", &["runs", "ran"]);

        let counts = count_text(BOOK.as_bytes(), true, Some(&inflections)).unwrap();
        assert_eq!(counts.get("fox"), Some(2));
        assert_eq!(counts.get("run"), Some(2));
        assert_eq!(counts.get("a"), Some(1));
        assert_eq!(counts.len(), 3);
    }
}
