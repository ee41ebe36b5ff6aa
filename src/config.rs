use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::common::error::{PipelineError, Result};

pub const DEFAULT_CONFIG_FILE: &str = "reviewsense.toml";
pub const CONFIG_PATH_ENV: &str = "REVIEWSENSE_CONFIG";
pub const OUTPUT_DIR_ENV: &str = "REVIEWSENSE_OUTPUT_DIR";
pub const PARALLEL_ENV: &str = "REVIEWSENSE_PARALLEL";

/// Runtime configuration. Every section has defaults, so an absent file is valid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub pipeline: PipelineSettings,
    pub output: OutputSettings,
    pub logging: LoggingConfig,
    pub sentiment: SentimentSettings,
    /// File the configuration was read from; `None` means built-in defaults
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineSettings {
    /// Map per-record stages across a rayon pool
    pub parallel: bool,
    /// Worker threads for the pool; 0 lets rayon decide
    pub threads: usize,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            parallel: true,
            threads: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub dir: PathBuf,
    /// Rows shown in the console preview
    pub preview_rows: usize,
    /// Keywords shown in the console report
    pub top_keywords: usize,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("output"),
            preview_rows: 5,
            top_keywords: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub dir: PathBuf,
    pub file_name: String,
    /// Write a JSON log file next to the console output
    pub json_file: bool,
    /// Filter used when RUST_LOG is unset
    pub default_filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("logs"),
            file_name: "reviewsense.log".to_string(),
            json_file: true,
            default_filter: "reviewsense=info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SentimentSettings {
    /// Extra or overriding lexicon weights, each in [-1, 1]
    pub lexicon: BTreeMap<String, f64>,
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, `REVIEWSENSE_CONFIG` is
    /// consulted, then `reviewsense.toml` in the working directory; if neither
    /// exists the defaults are used. Environment overrides apply last.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let explicit = path
            .map(Path::to_path_buf)
            .or_else(|| env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from));

        let mut config = match explicit {
            Some(path) => Self::from_file(&path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };

        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            PipelineError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let mut config = Self::from_toml_str(&content)?;
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(dir) = env::var(OUTPUT_DIR_ENV) {
            if !dir.trim().is_empty() {
                self.output.dir = PathBuf::from(dir.trim());
            }
        }

        if let Ok(value) = env::var(PARALLEL_ENV) {
            self.pipeline.parallel = parse_bool(&value).ok_or_else(|| {
                PipelineError::Config(format!(
                    "{} must be true or false, got '{}'",
                    PARALLEL_ENV, value
                ))
            })?;
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        for (word, weight) in &self.sentiment.lexicon {
            if !weight.is_finite() || !(-1.0..=1.0).contains(weight) {
                return Err(PipelineError::Config(format!(
                    "lexicon weight for '{}' must be within [-1, 1], got {}",
                    word, weight
                )));
            }
            if word.split_whitespace().count() != 1 {
                return Err(PipelineError::Config(format!(
                    "lexicon entry '{}' must be a single word",
                    word
                )));
            }
        }
        Ok(())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
