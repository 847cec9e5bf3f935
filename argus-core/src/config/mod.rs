//! Configuration structs. Everything has serde defaults so a partial TOML
//! file (or none at all) yields a working config.

mod defaults;
mod graph_config;
mod raptor_config;
mod retrieval_config;

pub use graph_config::GraphConfig;
pub use raptor_config::RaptorConfig;
pub use retrieval_config::RetrievalConfig;

use serde::{Deserialize, Serialize};

use crate::errors::{ArgusResult, ConfigError};

/// Top-level configuration for the Argus core.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ArgusConfig {
    /// Embedding model identity; vector collections are keyed by this.
    pub embedding_model: String,
    pub retrieval: RetrievalConfig,
    pub graph: GraphConfig,
    pub raptor: RaptorConfig,
}

impl ArgusConfig {
    /// Parse from a TOML string.
    pub fn from_toml(input: &str) -> ArgusResult<Self> {
        let mut config: ArgusConfig = toml::from_str(input).map_err(|e| ConfigError::Parse {
            reason: e.to_string(),
        })?;
        if config.embedding_model.is_empty() {
            config.embedding_model = defaults::DEFAULT_EMBEDDING_MODEL.to_string();
        }
        Ok(config)
    }

    /// Load from a TOML file. A missing file yields the defaults.
    pub fn load(path: &std::path::Path) -> ArgusResult<Self> {
        if !path.exists() {
            return Ok(Self::with_defaults());
        }
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml(&content)
    }

    /// Defaults with the embedding model filled in.
    pub fn with_defaults() -> Self {
        Self {
            embedding_model: defaults::DEFAULT_EMBEDDING_MODEL.to_string(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config = ArgusConfig::from_toml("").unwrap();
        assert_eq!(config.retrieval.vector_candidates, 60);
        assert_eq!(config.retrieval.lexical_candidates, 200);
        assert_eq!(config.raptor.k_max, 30);
        assert!(config.retrieval.use_graph_bias);
        assert_eq!(config.embedding_model, "all-MiniLM-L6-v2");
    }

    #[test]
    fn partial_toml_overrides_one_field() {
        let config = ArgusConfig::from_toml("[retrieval]\ndefault_recent_days = 7\n").unwrap();
        assert_eq!(config.retrieval.default_recent_days, 7);
        assert_eq!(config.retrieval.prelim_pool, 80);
    }

    #[test]
    fn bad_toml_is_a_parse_error() {
        assert!(ArgusConfig::from_toml("retrieval = 3").is_err());
    }
}
