//! # Wordweight CLI
//!
//! Command-line front end for weighted word sets.
//!
//! This crate provides:
//! - **build**: fold CSV word counts from many files into one snapshot
//! - **count**: tokenize text, reduce inflections and count words
//! - **sample**: draw weighted random words from a snapshot
//! - **game**: generate word game boards from the COCA lexicon
//! - **inspect**: report a snapshot's size, weight, height and health
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │      clap arguments + CliConfig         │
//! ├─────────────────────────────────────────┤
//! │  build │ count │ sample │ game │ inspect│
//! ├─────────────────────────────────────────┤
//! │          wordweight-corpus              │
//! │   (tokenizer, Gutenberg, CSV, COCA)     │
//! ├─────────────────────────────────────────┤
//! │           wordweight-core               │
//! │   (WeightedWordSet, fold, snapshots)    │
//! └─────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod commands;
pub mod config;

pub use cli::{Cli, Command};
pub use config::CliConfig;

use anyhow::Context;
use std::io::Write;

/// Load configuration and run the selected subcommand
pub async fn run(cli: Cli, out: &mut dyn Write) -> anyhow::Result<()> {
    let config = CliConfig::load(cli.config.as_deref()).context("loading configuration")?;
    commands::dispatch(cli.command, &config, out).await
}
