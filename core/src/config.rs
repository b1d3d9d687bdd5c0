//! config.rs
//! Backend selection: which algorithm, at which level.
//!
//! Accepted forms:
//! - JSON, e.g. `{"algorithm": "zstd", "level": 5}`; missing fields take defaults.
//! - A bare algorithm name as written to the device's `comp_algorithm`
//!   attribute (surrounding whitespace is ignored).

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::compression::{registry, CompressionBackend, CompressionStream};
use crate::constants::DEFAULT_ALGORITHM;
use crate::types::ZcompError;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown compression algorithm {0:?}")]
    UnknownAlgorithm(String),

    #[error("{algorithm}: level {level} outside {min}..={max}")]
    LevelOutOfRange { algorithm: String, level: i32, min: i32, max: i32 },

    #[error("{0}: algorithm does not take a level")]
    LevelNotSupported(String),

    #[error("malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ZcompConfig {
    pub algorithm: String,
    pub level: Option<i32>,
}

impl Default for ZcompConfig {
    fn default() -> Self {
        Self { algorithm: DEFAULT_ALGORITHM.to_string(), level: None }
    }
}

impl ZcompConfig {
    pub fn for_algorithm(name: &str) -> Result<Self, ConfigError> {
        let cfg = Self { algorithm: name.trim().to_string(), level: None };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn with_level(mut self, level: i32) -> Self {
        self.level = Some(level);
        self
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let mut cfg: Self = serde_json::from_str(text)?;
        cfg.algorithm = cfg.algorithm.trim().to_string();
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ZcompError> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&text)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let info = registry::resolve(&self.algorithm)
            .map_err(|_| ConfigError::UnknownAlgorithm(self.algorithm.clone()))?;
        let Some(level) = self.level else {
            return Ok(());
        };
        match info.level_range() {
            None => Err(ConfigError::LevelNotSupported(self.algorithm.clone())),
            Some(range) if !range.contains(&level) => Err(ConfigError::LevelOutOfRange {
                algorithm: self.algorithm.clone(),
                level,
                min: *range.start(),
                max: *range.end(),
            }),
            Some(_) => Ok(()),
        }
    }

    /// Instantiate the configured backend.
    pub fn build_backend(&self) -> Result<Arc<dyn CompressionBackend>, ConfigError> {
        self.validate()?;
        let backend = registry::create_backend(&self.algorithm, self.level)
            .map_err(|_| ConfigError::UnknownAlgorithm(self.algorithm.clone()))?;
        Ok(Arc::from(backend))
    }

    /// Backend plus a ready working state and output buffer.
    pub fn open_stream(&self) -> Result<CompressionStream, ZcompError> {
        let backend = self.build_backend()?;
        Ok(CompressionStream::new(backend)?)
    }
}
