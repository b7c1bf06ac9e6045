//! Configuration loading and validation.

use crate::defaults;
use crate::error::{ParlanceError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub audio: AudioConfig,
    pub llm: LlmConfig,
    pub tts: TtsConfig,
    pub stt: SttConfig,
}

/// HTTP/WebSocket listener configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory served as the static web client.
    pub web_root: PathBuf,
}

/// Audio segmentation configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AudioConfig {
    /// Voice-activity score below which a frame closes the utterance.
    pub silence_score_threshold: f32,
    /// Sample rate the transcription engine expects.
    pub target_sample_rate: u32,
}

/// Text-generation engine configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LlmConfig {
    /// Base URL of an Ollama-compatible server.
    pub url: String,
    pub model: String,
}

/// Speech-synthesis engine configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TtsConfig {
    pub endpoint: String,
    pub voice: String,
    pub timeout_ms: u64,
}

/// Transcription engine configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SttConfig {
    pub endpoint: String,
    pub timeout_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: defaults::LISTEN_HOST.to_string(),
            port: defaults::LISTEN_PORT,
            web_root: PathBuf::from(defaults::WEB_ROOT),
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            silence_score_threshold: defaults::SILENCE_SCORE_THRESHOLD,
            target_sample_rate: defaults::TARGET_SAMPLE_RATE,
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            url: defaults::LLM_URL.to_string(),
            model: defaults::LLM_MODEL.to_string(),
        }
    }
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            endpoint: defaults::TTS_ENDPOINT.to_string(),
            voice: defaults::TTS_VOICE.to_string(),
            timeout_ms: defaults::TTS_TIMEOUT_MS,
        }
    }
}

impl Default for SttConfig {
    fn default() -> Self {
        Self {
            endpoint: defaults::STT_ENDPOINT.to_string(),
            timeout_ms: defaults::STT_TIMEOUT_MS,
        }
    }
}

impl Config {
    /// Loads configuration from the given path.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ParlanceError::ConfigFileNotFound {
                path: path.display().to_string(),
            });
        }

        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from the given path, falling back to defaults
    /// when the file does not exist.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => {
                let default_path = Self::default_path();
                if default_path.exists() {
                    Self::load(&default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Writes the configuration to the given path as TOML.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)
            .map_err(|e| ParlanceError::Other(format!("Failed to serialize config: {e}")))?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Returns the default config file location
    /// (`$XDG_CONFIG_HOME/parlance/config.toml`).
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("parlance")
            .join("config.toml")
    }

    /// Checks value ranges that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.audio.silence_score_threshold) {
            return Err(ParlanceError::ConfigInvalidValue {
                key: "audio.silence_score_threshold".to_string(),
                message: "must be between 0 and 1".to_string(),
            });
        }
        if self.audio.target_sample_rate == 0 {
            return Err(ParlanceError::ConfigInvalidValue {
                key: "audio.target_sample_rate".to_string(),
                message: "must be positive".to_string(),
            });
        }
        Ok(())
    }
}
