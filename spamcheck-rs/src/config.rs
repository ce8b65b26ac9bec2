//! Configuration for spamcheck-rs

use classifier_rs::{Corpus, TrainingMode};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, ServiceError};

/// Main service configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Training configuration
    #[serde(default)]
    pub classifier: ClassifierConfig,
    /// Result log storage
    #[serde(default)]
    pub storage: StorageConfig,
    /// History listing limits
    #[serde(default)]
    pub history: HistoryConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Listen address (e.g., "0.0.0.0:8080")
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
}

/// Training configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClassifierConfig {
    /// Corpus asset; the builtin corpus is used when absent
    pub corpus_path: Option<PathBuf>,
    /// Train on a rayon pool instead of the main thread
    #[serde(default)]
    pub parallel_training: bool,
    /// Documents per partition when training in parallel
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
}

/// Storage configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// sqlx database URL (e.g., "sqlite://spamcheck.db")
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

/// History configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HistoryConfig {
    /// Records returned when no limit is requested
    #[serde(default = "default_history_limit")]
    pub default_limit: u32,
    /// Upper bound on a requested limit
    #[serde(default = "default_history_max")]
    pub max_limit: u32,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Level used when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub level: String,
    /// "pretty" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_listen_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_chunk_size() -> usize {
    256
}

fn default_database_url() -> String {
    "sqlite://spamcheck.db".to_string()
}

fn default_history_limit() -> u32 {
    10
}

fn default_history_max() -> u32 {
    100
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
        }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            corpus_path: None,
            parallel_training: false,
            chunk_size: default_chunk_size(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            default_limit: default_history_limit(),
            max_limit: default_history_max(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl HistoryConfig {
    /// Resolve a requested limit against the configured bounds
    pub fn resolve(&self, requested: Option<u32>) -> u32 {
        requested
            .unwrap_or(self.default_limit)
            .min(self.max_limit)
            .max(1)
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ServiceError::Config(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| ServiceError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.classifier.parallel_training && self.classifier.chunk_size == 0 {
            return Err(ServiceError::Config(
                "classifier.chunk_size must be greater than zero".to_string(),
            ));
        }

        if self.history.default_limit == 0 || self.history.max_limit == 0 {
            return Err(ServiceError::Config(
                "history limits must be greater than zero".to_string(),
            ));
        }

        if self.history.default_limit > self.history.max_limit {
            return Err(ServiceError::Config(format!(
                "history.default_limit ({}) exceeds history.max_limit ({})",
                self.history.default_limit, self.history.max_limit
            )));
        }

        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ServiceError::Config(format!(
                "Unknown logging format '{}'",
                self.logging.format
            )));
        }

        Ok(())
    }

    pub fn training_mode(&self) -> TrainingMode {
        if self.classifier.parallel_training {
            TrainingMode::Parallel {
                chunk_size: self.classifier.chunk_size,
            }
        } else {
            TrainingMode::Sequential
        }
    }

    /// Load the configured corpus, or the builtin one
    pub fn load_corpus(&self) -> Result<Corpus> {
        let corpus = match &self.classifier.corpus_path {
            Some(path) => Corpus::from_file(path)?,
            None => Corpus::builtin()?,
        };
        Ok(corpus)
    }
}
