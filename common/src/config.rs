use serde::Deserialize;
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;

use crate::yaml_include::load_yaml_with_includes;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config: {0}")]
    Yaml(#[from] serde_yml::Error),

    #[error("failed to resolve includes in {path:?}: {message}")]
    Include { path: PathBuf, message: String },
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CommonConfig {
    pub project_name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EvaluatorConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Number of blocking tasks a batch is spread over.
    #[serde(default = "default_workers")]
    pub workers: usize,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            workers: default_workers(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_workers() -> usize {
    4
}

/// How the feature synthesizer draws its perturbation magnitudes.
///
/// Written in YAML as `random`, `hash_seeded`, `disabled` or `seeded: <u64>`.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(from = "PerturbationSetting")]
pub enum PerturbationMode {
    /// Fresh thread-local randomness on every call.
    #[default]
    Random,
    /// RNG seeded from the transaction hash, so equal inputs give equal vectors.
    HashSeeded,
    /// RNG seeded from a fixed value for every call.
    Seeded(u64),
    /// No perturbation at all; only the base pattern is emitted.
    Disabled,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PerturbationSetting {
    Named(NamedPerturbation),
    Seeded { seeded: u64 },
}

#[derive(Deserialize)]
#[serde(rename_all = "snake_case")]
enum NamedPerturbation {
    Random,
    HashSeeded,
    Disabled,
}

impl From<PerturbationSetting> for PerturbationMode {
    fn from(setting: PerturbationSetting) -> Self {
        match setting {
            PerturbationSetting::Named(NamedPerturbation::Random) => PerturbationMode::Random,
            PerturbationSetting::Named(NamedPerturbation::HashSeeded) => {
                PerturbationMode::HashSeeded
            }
            PerturbationSetting::Named(NamedPerturbation::Disabled) => PerturbationMode::Disabled,
            PerturbationSetting::Seeded { seeded } => PerturbationMode::Seeded(seeded),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct EngineConfig {
    #[serde(default)]
    pub perturbation: PerturbationMode,
}

/// Pre-fitted standardization parameters, one entry per model input.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ScalerConfig {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct LogisticModelConfig {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    #[serde(default = "default_decision_threshold")]
    pub threshold: f64,
}

fn default_decision_threshold() -> f64 {
    0.5
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ClassifierConfig {
    pub scaler: ScalerConfig,
    pub model: LogisticModelConfig,
}

/// Optional replacements for the built-in keyword and card tables.
///
/// Any table left out keeps its built-in contents.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct ListsConfig {
    pub legitimate_merchants: Option<Vec<String>>,
    pub suspicious_keywords: Option<Vec<String>>,
    pub business_patterns: Option<Vec<String>>,
    pub generic_names: Option<Vec<String>>,
    pub foreign_indicators: Option<Vec<String>>,
    pub local_indicators: Option<Vec<String>>,
    pub denylisted_cards: Option<Vec<String>>,
    pub suspicious_starts: Option<Vec<String>>,
    pub test_cards: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    pub common: CommonConfig,
    #[serde(default)]
    pub evaluator: EvaluatorConfig,
    #[serde(default)]
    pub engine: EngineConfig,
    pub classifier: ClassifierConfig,
    #[serde(default)]
    pub lists: ListsConfig,
}

impl Config {
    pub fn load(config_path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = config_path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_yaml_str(&contents)
    }

    /// Loads a config file whose `!include` lines pull in sibling files.
    pub fn load_with_includes(config_path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = config_path.as_ref();
        let merged = load_yaml_with_includes(path)?;

        let mut out_str = String::new();
        {
            let mut emitter = yaml_rust2::YamlEmitter::new(&mut out_str);
            emitter.dump(&merged).map_err(|e| ConfigError::Include {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        }

        Self::from_yaml_str(&out_str)
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        let config = serde_yml::from_str(contents)?;
        Ok(config)
    }
}
