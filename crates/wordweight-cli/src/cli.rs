//! Command-line arguments

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "wordweight")]
#[command(about = "Build, sample and play with frequency-weighted word sets")]
#[command(version)]
pub struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, global = true, env = "WORDWEIGHT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true, env = "WORDWEIGHT_DEBUG")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build a snapshot from CSV word counts
    Build(BuildArgs),
    /// Count the words of plain text
    Count(CountArgs),
    /// Draw random words from a snapshot
    Sample(SampleArgs),
    /// Generate word game boards
    Game(GameArgs),
    /// Describe a snapshot
    Inspect(InspectArgs),
}

#[derive(Args, Debug)]
pub struct BuildArgs {
    /// CSV files to read, one build task each
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Snapshot file to write
    #[arg(short, long)]
    pub output: PathBuf,

    /// CSV records to skip at the start of each file
    #[arg(long)]
    pub header_lines: Option<usize>,

    /// Zero-based CSV column holding the word
    #[arg(long)]
    pub word_column: Option<usize>,

    /// Zero-based CSV column holding the weight
    #[arg(long)]
    pub weight_column: Option<usize>,

    /// Maximum number of files read at once
    #[arg(short = 'j', long)]
    pub concurrency: Option<usize>,
}

#[derive(Args, Debug)]
pub struct CountArgs {
    /// Text files to read; standard input when empty
    pub inputs: Vec<PathBuf>,

    /// Inputs are Project Gutenberg ebooks; count only their body
    #[arg(long)]
    pub gutenberg: bool,

    /// Inflection XML used to reduce words to their base form
    #[arg(long)]
    pub inflections: Option<PathBuf>,

    /// CSV of `inflected,base` pairs resolving inflection conflicts
    #[arg(long)]
    pub preferences: Option<PathBuf>,

    /// Also write the counts as a snapshot
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct SampleArgs {
    /// Snapshot file to sample from
    #[arg(short, long)]
    pub snapshot: PathBuf,

    /// Number of distinct words to draw
    #[arg(short, default_value_t = 10)]
    pub n: usize,

    /// Added to every weight; larger values flatten the distribution
    #[arg(short, long, default_value_t = 0)]
    pub bias: i64,

    /// Print the sample as JSON
    #[arg(long)]
    pub json: bool,

    /// Seed for a reproducible draw
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Args, Debug)]
pub struct GameArgs {
    /// COCA word list providing the target adjective
    #[arg(long)]
    pub lexicon: Option<PathBuf>,

    /// Snapshot providing the available words; the lexicon when absent
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// Number of available words
    #[arg(long)]
    pub sample_size: Option<usize>,

    /// Terminal width used to lay out the words
    #[arg(long)]
    pub width: Option<usize>,

    /// Write games to files in this directory instead of standard output
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Number of game files to write with `--output-dir`
    #[arg(long, default_value_t = 1)]
    pub output_files: usize,

    /// Seconds to wait after printing before announcing the end
    #[arg(long)]
    pub duration: Option<u64>,

    /// Seed for reproducible games
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Snapshot file to describe
    #[arg(short, long)]
    pub snapshot: PathBuf,

    /// Also print the tree shape
    #[arg(long)]
    pub tree: bool,
}
