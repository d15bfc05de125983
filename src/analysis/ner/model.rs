//! Recognizer model files and their loading
//!
//! A model is a JSON document holding per-label feature weights and the
//! gazetteers the feature extractor consults. Loading is an explicit step:
//! nothing is fetched over the network, and a missing model is reported
//! immediately instead of being looked up lazily on first use.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// English model compiled into the binary
pub const BUILTIN_MODEL: &str = include_str!("../../../models/ner-en.json");

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model unavailable: {} (no cached copy found)", .0.display())]
    Unavailable(PathBuf),
    #[error("failed to read model {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid model {origin}: {source}")]
    Invalid {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid model {origin}: {reason}")]
    Malformed { origin: String, reason: String },
    #[error("analyzer used before initialization")]
    NotInitialized,
}

/// Where the recognizer model comes from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelSource {
    #[default]
    Builtin,
    File(PathBuf),
}

/// Recognizer initialization settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    pub source: ModelSource,
    /// Directory holding cached copies of file models
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_path: Option<PathBuf>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            source: ModelSource::Builtin,
            cache_path: dirs::cache_dir().map(|dir| dir.join("clausewise")),
        }
    }
}

impl ModelConfig {
    pub fn builtin() -> Self {
        Self {
            source: ModelSource::Builtin,
            cache_path: None,
        }
    }

    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            source: ModelSource::File(path.into()),
            ..Self::default()
        }
    }

    pub fn with_cache_path(mut self, cache_path: impl Into<PathBuf>) -> Self {
        self.cache_path = Some(cache_path.into());
        self
    }
}

/// Serialized model: labels, weights and gazetteers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NerModel {
    pub name: String,
    pub version: String,
    /// Declared label order, also used to break score ties
    pub labels: Vec<String>,
    #[serde(default)]
    pub threshold: f64,
    pub weights: HashMap<String, HashMap<String, f64>>,
    #[serde(default)]
    pub gazetteers: Gazetteers,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Gazetteers {
    pub first_names: Vec<String>,
    pub titles: Vec<String>,
    pub org_suffixes: Vec<String>,
    pub org_keywords: Vec<String>,
    pub law_keywords: Vec<String>,
    pub gpe: Vec<String>,
    pub location_prepositions: Vec<String>,
    pub non_entities: Vec<String>,
}

impl NerModel {
    pub fn from_json(content: &str, origin: &str) -> Result<Self, ModelError> {
        let model: NerModel =
            serde_json::from_str(content).map_err(|source| ModelError::Invalid {
                origin: origin.to_string(),
                source,
            })?;
        model.validate(origin)?;
        Ok(model)
    }

    fn validate(&self, origin: &str) -> Result<(), ModelError> {
        let malformed = |reason: String| ModelError::Malformed {
            origin: origin.to_string(),
            reason,
        };

        if self.labels.is_empty() {
            return Err(malformed("no labels declared".to_string()));
        }
        if let Some(label) = self.weights.keys().find(|l| !self.labels.contains(l)) {
            return Err(malformed(format!("weights for undeclared label {label}")));
        }
        Ok(())
    }
}

/// Case-insensitive gazetteer lookups
#[derive(Debug, Clone, Default)]
pub(crate) struct Lexicon {
    pub first_names: HashSet<String>,
    pub titles: HashSet<String>,
    pub org_suffixes: HashSet<String>,
    pub org_keywords: HashSet<String>,
    pub law_keywords: HashSet<String>,
    pub gpe: HashSet<String>,
    pub location_prepositions: HashSet<String>,
    pub non_entities: HashSet<String>,
}

fn lowercase_set(words: &[String]) -> HashSet<String> {
    words.iter().map(|word| word.to_lowercase()).collect()
}

impl From<&Gazetteers> for Lexicon {
    fn from(gazetteers: &Gazetteers) -> Self {
        Self {
            first_names: lowercase_set(&gazetteers.first_names),
            titles: lowercase_set(&gazetteers.titles),
            org_suffixes: lowercase_set(&gazetteers.org_suffixes),
            org_keywords: lowercase_set(&gazetteers.org_keywords),
            law_keywords: lowercase_set(&gazetteers.law_keywords),
            gpe: lowercase_set(&gazetteers.gpe),
            location_prepositions: lowercase_set(&gazetteers.location_prepositions),
            non_entities: lowercase_set(&gazetteers.non_entities),
        }
    }
}

/// Resolve and parse the model named by `config`
pub(crate) fn load_model(config: &ModelConfig) -> Result<NerModel, ModelError> {
    match &config.source {
        ModelSource::Builtin => NerModel::from_json(BUILTIN_MODEL, "builtin"),
        ModelSource::File(path) => load_model_file(path, config.cache_path.as_deref()),
    }
}

fn load_model_file(path: &Path, cache_dir: Option<&Path>) -> Result<NerModel, ModelError> {
    let cached = cache_dir
        .zip(path.file_name())
        .map(|(dir, name)| dir.join(name));

    if path.exists() {
        let model = read_model(path)?;
        if let Some(cached) = cached.as_deref() {
            if cached != path {
                cache_model(path, cached);
            }
        }
        return Ok(model);
    }

    match cached {
        Some(cached) if cached.exists() => {
            tracing::info!(
                source = %path.display(),
                cached = %cached.display(),
                "model source missing, using cached copy"
            );
            read_model(&cached)
        }
        _ => Err(ModelError::Unavailable(path.to_path_buf())),
    }
}

fn read_model(path: &Path) -> Result<NerModel, ModelError> {
    let content = fs::read_to_string(path).map_err(|source| ModelError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    NerModel::from_json(&content, &path.display().to_string())
}

// Cache failures only cost the fallback copy, so they are logged and ignored
fn cache_model(source: &Path, cached: &Path) {
    let result = cached
        .parent()
        .map_or(Ok(()), fs::create_dir_all)
        .and_then(|_| fs::copy(source, cached));

    match result {
        Ok(_) => tracing::debug!(cached = %cached.display(), "cached recognizer model"),
        Err(e) => tracing::warn!(cached = %cached.display(), "could not cache model: {e}"),
    }
}
