//! Lightweight configuration loader and path helpers.
//!
//! Uses Figment to merge built-in defaults + `config.toml` + `config.<env>.toml`
//! + `APP_*` env vars (`__` separates nesting levels, e.g.
//! `APP_FUZZY__LIMIT=20`). The merged result is extracted once into a typed
//! [`Settings`] value that callers pass into the search components.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
        Self::load_for_env(&env_name)
    }

    pub fn load_for_env(env_name: &str) -> anyhow::Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Settings::default())).merge(Toml::file("config.toml"));
        match env_name {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));

        let config = Self { figment };
        config.settings()?;
        Ok(config)
    }

    /// Wraps an already assembled figment, e.g. from tests.
    pub fn from_figment(figment: Figment) -> Self {
        Self { figment }
    }

    /// Layers an explicit config file over everything loaded so far.
    pub fn with_file(self, path: &Path) -> Self {
        Self { figment: self.figment.merge(Toml::file(path)) }
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }

    /// Extracts and validates the typed settings.
    pub fn settings(&self) -> Result<Settings> {
        let settings: Settings = self.figment.extract().map_err(|e| Error::InvalidConfig(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub store: StoreSettings,
    pub direct: DirectSettings,
    pub fuzzy: FuzzySettings,
    pub matching: MatchingSettings,
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        if self.store.index_dir.trim().is_empty() {
            return Err(Error::InvalidConfig("store.index_dir must not be empty".into()));
        }
        if self.direct.limit == 0 {
            return Err(Error::InvalidConfig("direct.limit must be at least 1".into()));
        }
        if self.fuzzy.limit == 0 {
            return Err(Error::InvalidConfig("fuzzy.limit must be at least 1".into()));
        }
        let threshold = self.matching.score_threshold;
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(Error::InvalidConfig(format!("matching.score_threshold must be >= 0, got {threshold}")));
        }
        Ok(())
    }
}

/// Where the catalog index lives; the path is the store's connection string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    pub index_dir: String,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self { index_dir: "data/indexes/catalog".to_string() }
    }
}

impl StoreSettings {
    pub fn index_path(&self) -> PathBuf {
        expand_path(&self.index_dir)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectSettings {
    pub limit: usize,
}

impl Default for DirectSettings {
    fn default() -> Self {
        Self { limit: 50 }
    }
}

/// Which documents the fuzzy channel scores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateSource {
    /// Every document in the store.
    #[default]
    Catalog,
    /// Only the direct channel's hits.
    Direct,
}

/// How a candidate is compared with the query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMode {
    /// Similarity against the precomputed `search_string`.
    #[default]
    SearchString,
    /// Weighted sum over names, brands, categories, labels and quantity.
    WeightedFields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FuzzySettings {
    pub candidates: CandidateSource,
    pub scoring: ScoringMode,
    pub limit: usize,
}

impl Default for FuzzySettings {
    fn default() -> Self {
        Self { candidates: CandidateSource::default(), scoring: ScoringMode::default(), limit: 50 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingSettings {
    pub score_threshold: f64,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self { score_threshold: 50.0 }
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}
