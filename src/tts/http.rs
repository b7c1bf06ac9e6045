//! HTTP speech-synthesis client (StreamElements-shaped API).
//!
//! `GET <endpoint>?voice=<voice>&text=<text>` returning encoded audio bytes.

use crate::error::{ParlanceError, Result};
use crate::tts::synthesizer::Synthesizer;
use async_trait::async_trait;
use std::time::Duration;

/// Configuration for the HTTP synthesis client.
#[derive(Debug, Clone)]
pub struct HttpSynthesizerConfig {
    pub endpoint: String,
    pub voice: String,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for HttpSynthesizerConfig {
    fn default() -> Self {
        Self {
            endpoint: crate::defaults::TTS_ENDPOINT.to_string(),
            voice: crate::defaults::TTS_VOICE.to_string(),
            timeout_ms: crate::defaults::TTS_TIMEOUT_MS,
        }
    }
}

/// Synthesizer backed by a remote HTTP service.
pub struct HttpSynthesizer {
    client: reqwest::Client,
    config: HttpSynthesizerConfig,
}

impl HttpSynthesizer {
    /// Creates a new client for the configured endpoint.
    pub fn new(config: HttpSynthesizerConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl Synthesizer for HttpSynthesizer {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>> {
        if text.is_empty() {
            return Err(ParlanceError::Synthesis {
                message: "empty input".to_string(),
            });
        }

        let response = self
            .client
            .get(&self.config.endpoint)
            .query(&[("voice", self.config.voice.as_str()), ("text", text)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ParlanceError::Synthesis {
                message: format!("engine returned HTTP {status}"),
            });
        }

        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }

    fn name(&self) -> &str {
        &self.config.voice
    }
}
