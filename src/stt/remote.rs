//! HTTP-backed transcription engine client.
//!
//! Posts raw little-endian float PCM to a transcription service and reads
//! back JSON `{"text": "..."}`. The blocking client is intentional: the
//! transcription worker runs engine calls on the blocking thread pool.

use crate::error::{ParlanceError, Result};
use crate::stt::transcriber::Transcriber;
use serde::Deserialize;
use std::time::Duration;

/// Configuration for the remote transcription client.
#[derive(Debug, Clone)]
pub struct RemoteTranscriberConfig {
    /// Endpoint accepting `POST <endpoint>?sample_rate=<hz>` with a raw
    /// float32 PCM body.
    pub endpoint: String,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for RemoteTranscriberConfig {
    fn default() -> Self {
        Self {
            endpoint: crate::defaults::STT_ENDPOINT.to_string(),
            timeout_ms: crate::defaults::STT_TIMEOUT_MS,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: String,
}

/// Transcriber backed by a remote HTTP service.
pub struct RemoteTranscriber {
    client: reqwest::blocking::Client,
    config: RemoteTranscriberConfig,
}

impl RemoteTranscriber {
    /// Creates a new client for the given endpoint.
    pub fn new(config: RemoteTranscriberConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;
        Ok(Self { client, config })
    }
}

impl Transcriber for RemoteTranscriber {
    fn transcribe(&self, samples: &[f32], sample_rate: u32) -> Result<String> {
        let mut body = Vec::with_capacity(samples.len() * 4);
        for sample in samples {
            body.extend_from_slice(&sample.to_le_bytes());
        }

        let response = self
            .client
            .post(&self.config.endpoint)
            .query(&[("sample_rate", sample_rate.to_string())])
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(ParlanceError::Transcription {
                message: format!("engine returned HTTP {status}"),
            });
        }

        let parsed: TranscriptionResponse =
            response.json().map_err(|e| ParlanceError::Transcription {
                message: format!("malformed engine response: {e}"),
            })?;

        Ok(parsed.text)
    }

    fn name(&self) -> &str {
        "remote"
    }
}
