//! CLI configuration
//!
//! Values come from, in increasing priority: built-in defaults, a TOML file,
//! and `WORDWEIGHT_*` environment variables. Nested keys use a double
//! underscore, e.g. `WORDWEIGHT_CSV__HEADER_LINES=1`. Command-line flags
//! override all of these.

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use wordweight_core::FoldConfig;
use wordweight_corpus::CsvSource;

/// Configuration file read when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "wordweight.toml";

/// Prefix of configuration environment variables
pub const ENV_PREFIX: &str = "WORDWEIGHT";

/// Settings shared by all subcommands
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Layout of CSV inputs to `build`
    pub csv: CsvSource,
    /// Maximum number of input files processed at once
    pub concurrency: usize,
    /// Number of available words in a game
    pub sample_size: usize,
    /// Terminal width used to lay out game words
    pub output_width: usize,
    /// Target word bias as a fraction of the lexicon size
    pub target_bias_ratio: f64,
    /// Available word bias as a fraction of the word set size
    pub available_bias_ratio: f64,
    /// COCA word list used by `game`
    pub lexicon: Option<PathBuf>,
    /// Inflection XML used by `count`
    pub inflections: Option<PathBuf>,
    /// Inflection preferences CSV used by `count`
    pub preferences: Option<PathBuf>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            csv: CsvSource::default(),
            concurrency: FoldConfig::default().concurrency,
            sample_size: 35,
            output_width: 80,
            target_bias_ratio: 3.04e-3,
            available_bias_ratio: 3.04e-6,
            lexicon: None,
            inflections: None,
            preferences: None,
        }
    }
}

impl CliConfig {
    /// Load configuration from `path` (or the default file) and the environment
    ///
    /// An explicit `path` must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with(path, environment())
    }

    fn load_with(path: Option<&Path>, env: Environment) -> Result<Self, ConfigError> {
        let (file, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        let config: CliConfig = Config::builder()
            .add_source(Config::try_from(&CliConfig::default())?)
            .add_source(File::from(file).format(FileFormat::Toml).required(required))
            .add_source(env)
            .build()?
            .try_deserialize()?;

        tracing::debug!(?config, "Loaded configuration");
        Ok(config)
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}
