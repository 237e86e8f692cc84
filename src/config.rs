// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{KbError, Result};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub documents: DocumentsConfig,
    pub chunking: ChunkingConfig,
    pub store: StoreConfig,
    pub completion: CompletionConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DocumentsConfig {
    pub folder: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChunkingConfig {
    pub chunk_size: usize,
    pub overlap: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    pub url: String,
    pub collection: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CompletionConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f32,
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(config::File::from(Path::new("config/default.toml")));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("KB_RAG")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| KbError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| KbError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            documents: DocumentsConfig {
                folder: PathBuf::from("./my_documents"),
            },
            chunking: ChunkingConfig {
                chunk_size: 500,
                overlap: 50,
            },
            store: StoreConfig {
                url: "http://localhost:8000".to_string(),
                collection: "knowledge_base".to_string(),
            },
            completion: CompletionConfig {
                base_url: "https://generativelanguage.googleapis.com/v1beta/openai".to_string(),
                api_key: None,
                model: "gemini-2.5-flash".to_string(),
                temperature: 0.3,
            },
        }
    }

    /// Chunking parameters are checked before any indexing work starts;
    /// invalid values are rejected, never clamped.
    fn validate(&self) -> Result<()> {
        if self.chunking.chunk_size == 0 {
            return Err(KbError::Config(
                "chunk_size must be greater than 0".to_string(),
            ));
        }

        if self.chunking.overlap >= self.chunking.chunk_size {
            return Err(KbError::Config(format!(
                "overlap ({}) must be smaller than chunk_size ({})",
                self.chunking.overlap, self.chunking.chunk_size
            )));
        }

        if self.store.collection.trim().is_empty() {
            return Err(KbError::Config(
                "store.collection must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default_config();
        assert!(config.validate().is_ok());
        assert_eq!(config.chunking.chunk_size, 500);
        assert_eq!(config.chunking.overlap, 50);
    }

    #[test]
    fn test_overlap_must_be_smaller_than_chunk_size() {
        let mut config = Config::default_config();
        config.chunking.overlap = 500;

        let err = config.validate().unwrap_err();
        assert!(matches!(err, KbError::Config(_)));
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        let mut config = Config::default_config();
        config.chunking.chunk_size = 0;
        assert!(config.validate().is_err());
    }
}
