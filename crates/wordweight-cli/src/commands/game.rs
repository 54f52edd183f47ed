//! `wordweight game`: generate word game boards
//!
//! A board shows one target adjective and a selection of available words.
//! The target is drawn with a large bias so that rarer adjectives come up
//! often; the available words use a much smaller one and so mostly follow
//! ordinary usage.

use super::{read_snapshot, rng_from};
use crate::cli::GameArgs;
use crate::CliConfig;
use anyhow::{bail, Context, Result};
use rand::Rng;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, instrument};
use wordweight_core::{Memo, WeightedWord, WeightedWordSet};
use wordweight_corpus::{CorpusError, Lexicon};

/// Gap between a word and the next column
const COLUMN_GAP: usize = 3;

/// One generated board
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Game {
    /// Adjective the players work towards
    pub target: String,
    /// Words offered to the players, by descending weight
    pub available: Vec<WeightedWord>,
}

impl Game {
    /// Draw a new board
    ///
    /// The target comes from the lexicon adjectives with bias
    /// `target_bias_ratio × lexicon size`; `sample_size` available words come
    /// from `words` with bias `available_bias_ratio × set size`.
    pub fn generate<R: Rng + ?Sized>(
        rng: &mut R,
        lexicon: &Lexicon,
        words: &WeightedWordSet,
        sample_size: usize,
        config: &CliConfig,
    ) -> Result<Self> {
        let target_bias = scaled_bias(config.target_bias_ratio, lexicon.len());
        let target = lexicon
            .sample_adjectives(rng, 1, target_bias)
            .context("drawing target word")?
            .get_words()
            .into_iter()
            .next()
            .map(|entry| entry.word)
            .context("lexicon has no adjectives")?;

        let available_bias = scaled_bias(config.available_bias_ratio, words.len());
        let available = words
            .sample_with(rng, sample_size, available_bias)
            .context("drawing available words")?
            .get_words();

        debug!(%target, target_bias, available_bias, "Generated game");
        Ok(Self { target, available })
    }

    /// Print the board laid out for a terminal `width` columns wide
    pub fn write_to(&self, out: &mut dyn Write, width: usize) -> io::Result<()> {
        writeln!(out, "TARGET WORD: {}", self.target)?;
        writeln!(out)?;
        writeln!(out, "AVAILABLE WORDS:")?;
        writeln!(out)?;
        let words: Vec<&str> = self.available.iter().map(|e| e.word.as_str()).collect();
        write_columns(out, &words, width)
    }
}

fn scaled_bias(ratio: f64, size: usize) -> i64 {
    (ratio * size as f64) as i64
}

/// Lay `words` out in equal-width columns, filling down then across
///
/// Each column is as wide as the longest word plus a gap; at least one column
/// is used however narrow `width` is.
pub fn write_columns(out: &mut dyn Write, words: &[&str], width: usize) -> io::Result<()> {
    let longest = words.iter().map(|w| w.chars().count()).max().unwrap_or(0);
    let column_width = longest + COLUMN_GAP;
    let columns = (width / column_width).max(1);
    let rows = words.len().div_ceil(columns);

    for row in 0..rows {
        for column in 0..columns {
            if let Some(word) = words.get(row + column * rows) {
                write!(out, "{word:<column_width$}")?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Name of the `index`th of `count` game files
fn game_file_name(sample_size: usize, index: usize, count: usize) -> String {
    let digits = count.saturating_sub(1).to_string().len();
    format!("words_{sample_size}_{index:0digits$}.txt")
}

#[instrument(skip_all, fields(files = args.output_files))]
pub async fn run(args: &GameArgs, config: &CliConfig, out: &mut dyn Write) -> Result<()> {
    let Some(lexicon_path) = args.lexicon.clone().or_else(|| config.lexicon.clone()) else {
        bail!("no lexicon given; pass --lexicon or set `lexicon` in the configuration");
    };
    let lexicon: Memo<Lexicon, CorpusError> = Memo::new(move || Lexicon::load(&lexicon_path));

    let snapshot = args.snapshot.as_deref().map(read_snapshot).transpose()?;
    let sample_size = args.sample_size.unwrap_or(config.sample_size);
    let width = args.width.unwrap_or(config.output_width);
    let mut rng = rng_from(args.seed);

    let generate = |rng: &mut dyn rand::RngCore| -> Result<Game> {
        let lexicon = lexicon.get().context("loading lexicon")?;
        let words = snapshot.as_ref().unwrap_or_else(|| lexicon.words());
        Game::generate(rng, &lexicon, words, sample_size, config)
    };

    let Some(dir) = &args.output_dir else {
        writeln!(out)?;
        generate(&mut rng)?.write_to(out, width)?;
        writeln!(out)?;
        out.flush()?;

        if let Some(seconds) = args.duration.filter(|s| *s > 0) {
            info!(seconds, "Timer started");
            tokio::time::sleep(Duration::from_secs(seconds)).await;
            writeln!(out, "TIME'S UP")?;
            writeln!(out)?;
        }
        return Ok(());
    };

    if args.output_files == 0 {
        bail!("--output-files must be positive");
    }
    for index in 0..args.output_files {
        let path: PathBuf = dir.join(game_file_name(sample_size, index, args.output_files));
        let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
        let mut file = BufWriter::new(file);
        generate(&mut rng)?.write_to(&mut file, width)?;
        file.flush()?;
    }
    writeln!(
        out,
        "Wrote {} games to {}",
        args.output_files,
        dir.display()
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rstest::rstest;

    fn columns(words: &[&str], width: usize) -> String {
        let mut out = Vec::new();
        write_columns(&mut out, words, width).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_columns_fill_down_then_across() {
        let words = ["one", "two", "three", "four", "five"];
        // Column width 8, so two columns fit in 17.
        assert_eq!(
            columns(&words, 17),
            "one     four    \ntwo     five    \nthree   \n"
        );
    }

    #[test]
    fn test_single_column_when_narrow() {
        assert_eq!(columns(&["ab", "c"], 1), "ab   \nc    \n");
    }

    #[test]
    fn test_no_words() {
        assert_eq!(columns(&[], 80), "");
    }

    #[rstest]
    #[case(35, 0, 1, "words_35_0.txt")]
    #[case(35, 3, 10, "words_35_3.txt")]
    #[case(20, 7, 11, "words_20_07.txt")]
    #[case(20, 42, 101, "words_20_042.txt")]
    fn test_game_file_name(
        #[case] size: usize,
        #[case] index: usize,
        #[case] count: usize,
        #[case] expected: &str,
    ) {
        assert_eq!(game_file_name(size, index, count), expected);
    }

    fn lexicon() -> Lexicon {
        let text = "\
title,,,,
rank,word,pos,freq,disp
1,the,a,1000,0.9
2,red,j,300,0.9
3,quiet,j,20,0.9
4,house,n,200,0.9
5,run,v,150,0.9
";
        Lexicon::from_reader(text.as_bytes()).unwrap()
    }

    #[test]
    fn test_generate_from_lexicon() {
        let lexicon = lexicon();
        let config = CliConfig::default();
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..20 {
            let game = Game::generate(&mut rng, &lexicon, lexicon.words(), 3, &config).unwrap();
            assert!(lexicon.is_adjective(&game.target));
            assert_eq!(game.available.len(), 3);
            assert!(game
                .available
                .windows(2)
                .all(|pair| pair[0].weight >= pair[1].weight));
        }
    }

    #[test]
    fn test_sample_size_too_large() {
        let lexicon = lexicon();
        let mut rng = StdRng::seed_from_u64(1);
        let result = Game::generate(&mut rng, &lexicon, lexicon.words(), 6, &CliConfig::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_write_board() {
        let game = Game {
            target: "red".to_string(),
            available: vec![WeightedWord::new("house", 5), WeightedWord::new("run", 2)],
        };
        let mut out = Vec::new();
        game.write_to(&mut out, 80).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "TARGET WORD: red\n\nAVAILABLE WORDS:\n\nhouse   run     \n"
        );
    }
}
