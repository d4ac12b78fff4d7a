use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::paths::AppPaths;
use crate::core::errors::ApiError;

/// Top-level typed configuration, loaded from `config.yml`.
///
/// Every field has a default so an absent or partial config file still yields
/// a fully-specified `AppConfig`. Validation runs once at startup; a config
/// that fails validation aborts initialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub ollama: OllamaConfig,
    pub rag: RagConfig,
    /// Template key -> template filename, merged over the built-in registry.
    pub templates: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OllamaConfig {
    pub base_url: String,
    /// Text-generation model, used for answers and intent classification.
    pub model: String,
    /// Embedding model; must match between ingestion and query time.
    pub embedding_model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RagConfig {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub top_k: usize,
    pub answer_temperature: f32,
    pub classify_temperature: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            ollama: OllamaConfig::default(),
            rag: RagConfig::default(),
            templates: BTreeMap::new(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 8000 }
    }
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            model: "mistral".to_string(),
            embedding_model: "nomic-embed-text".to_string(),
        }
    }
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1500,
            chunk_overlap: 200,
            top_k: 4,
            answer_temperature: 0.1,
            // Classification runs warmer than answering; both are tunable.
            classify_temperature: 0.3,
        }
    }
}

impl AppConfig {
    /// Load from `LEXA_CONFIG_PATH` or `<data_dir>/config.yml`.
    ///
    /// A missing file yields defaults; a present-but-unparsable file is an
    /// error rather than a silent fallback.
    pub fn load(paths: &AppPaths) -> Result<Self, ApiError> {
        let path = config_path(paths);
        if !path.exists() {
            let config = AppConfig::default();
            config.validate()?;
            return Ok(config);
        }

        let contents = fs::read_to_string(&path).map_err(ApiError::internal)?;
        let config: AppConfig = serde_yaml::from_str(&contents)
            .map_err(|e| ApiError::BadRequest(format!("Invalid config file {:?}: {}", path, e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ApiError> {
        if self.rag.chunk_size == 0 {
            return Err(ApiError::BadRequest(
                "rag.chunk_size must be greater than zero".to_string(),
            ));
        }
        if self.rag.chunk_overlap >= self.rag.chunk_size {
            return Err(ApiError::BadRequest(format!(
                "rag.chunk_overlap ({}) must be smaller than rag.chunk_size ({})",
                self.rag.chunk_overlap, self.rag.chunk_size
            )));
        }
        if self.rag.top_k == 0 {
            return Err(ApiError::BadRequest(
                "rag.top_k must be at least 1".to_string(),
            ));
        }
        for (name, value) in [
            ("rag.answer_temperature", self.rag.answer_temperature),
            ("rag.classify_temperature", self.rag.classify_temperature),
        ] {
            if !(0.0..=2.0).contains(&value) {
                return Err(ApiError::BadRequest(format!(
                    "{} must be within 0.0..=2.0, got {}",
                    name, value
                )));
            }
        }
        if self.ollama.base_url.trim().is_empty() {
            return Err(ApiError::BadRequest(
                "ollama.base_url must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

fn config_path(paths: &AppPaths) -> PathBuf {
    if let Ok(path) = env::var("LEXA_CONFIG_PATH") {
        return PathBuf::from(path);
    }
    paths.data_dir.join("config.yml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.rag.chunk_size, 1500);
        assert_eq!(config.rag.chunk_overlap, 200);
        assert_eq!(config.rag.top_k, 4);
    }

    #[test]
    fn overlap_must_stay_below_chunk_size() {
        let mut config = AppConfig::default();
        config.rag.chunk_overlap = config.rag.chunk_size;
        assert!(config.validate().is_err());
    }

    #[test]
    fn temperature_range_enforced() {
        let mut config = AppConfig::default();
        config.rag.classify_temperature = 3.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let yaml = "rag:\n  top_k: 8\n";
        let config: AppConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.rag.top_k, 8);
        assert_eq!(config.rag.chunk_size, 1500);
        assert_eq!(config.ollama.model, "mistral");
    }
}
