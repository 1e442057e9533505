use crate::defaults;
use crate::error::{ChunkscribeError, Result};
use crate::pipeline::assembler::FailurePolicy;
use crate::pipeline::orchestrator::PipelineConfig;
use crate::pipeline::types::SchedulingMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub stt: SttConfig,
    pub scheduling: SchedulingConfig,
    pub output: OutputConfig,
}

/// Speech-to-text configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SttConfig {
    /// Path to a ggml Whisper model file.
    pub model: String,
    pub language: String,
    /// Inference threads per backend call (whisper picks when unset).
    pub threads: Option<usize>,
}

/// Chunk dispatch configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct SchedulingConfig {
    pub mode: SchedulingMode,
    /// Upper bound on concurrent backend calls. Unset means one per chunk.
    pub workers: Option<usize>,
}

/// Transcript output configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct OutputConfig {
    pub failure_policy: FailurePolicy,
}

impl Default for SttConfig {
    fn default() -> Self {
        Self {
            model: defaults::DEFAULT_MODEL.to_string(),
            language: defaults::DEFAULT_LANGUAGE.to_string(),
            threads: None,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Returns an error if the file contains invalid TOML.
    /// Missing fields will use default values.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a file or return defaults if file doesn't exist
    ///
    /// Only a missing file falls back to defaults; invalid TOML is an error.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        match Self::load(path) {
            Ok(config) => Ok(config),
            Err(e)
                if e.downcast_ref::<std::io::Error>()
                    .is_some_and(|io_err| io_err.kind() == std::io::ErrorKind::NotFound) =>
            {
                Ok(Self::default())
            }
            Err(e) => Err(e.context(format!("Failed to load config from {}", path.display()))),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - CHUNKSCRIBE_MODEL → stt.model
    /// - CHUNKSCRIBE_LANGUAGE → stt.language
    /// - CHUNKSCRIBE_MODE → scheduling.mode
    /// - CHUNKSCRIBE_WORKERS → scheduling.workers
    ///
    /// Empty values are ignored. Unparseable mode or worker values are errors.
    pub fn with_env_overrides(mut self) -> Result<Self> {
        if let Some(model) = env_value("CHUNKSCRIBE_MODEL") {
            self.stt.model = model;
        }

        if let Some(language) = env_value("CHUNKSCRIBE_LANGUAGE") {
            self.stt.language = language;
        }

        if let Some(mode) = env_value("CHUNKSCRIBE_MODE") {
            self.scheduling.mode =
                mode.parse()
                    .map_err(|message| ChunkscribeError::ConfigInvalidValue {
                        key: "CHUNKSCRIBE_MODE".to_string(),
                        message,
                    })?;
        }

        if let Some(workers) = env_value("CHUNKSCRIBE_WORKERS") {
            let workers = workers.trim().parse::<usize>().map_err(|e| {
                ChunkscribeError::ConfigInvalidValue {
                    key: "CHUNKSCRIBE_WORKERS".to_string(),
                    message: format!("'{}': {}", workers, e),
                }
            })?;
            self.scheduling.workers = Some(workers);
        }

        Ok(self)
    }

    /// Reject values that deserialize fine but cannot run.
    pub fn validate(&self) -> Result<()> {
        if self.scheduling.workers == Some(0) {
            return Err(ChunkscribeError::ConfigInvalidValue {
                key: "scheduling.workers".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.stt.threads == Some(0) {
            return Err(ChunkscribeError::ConfigInvalidValue {
                key: "stt.threads".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.stt.model.trim().is_empty() {
            return Err(ChunkscribeError::ConfigInvalidValue {
                key: "stt.model".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Pipeline settings derived from this configuration.
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            mode: self.scheduling.mode,
            workers: self.scheduling.workers,
            failure_policy: self.output.failure_policy,
        }
    }

    /// Get the default configuration file path
    ///
    /// Returns ~/.config/chunkscribe/config.toml on Linux. Falls back to a
    /// relative `.config` directory when no config directory is known.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join("chunkscribe")
            .join("config.toml")
    }
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}
