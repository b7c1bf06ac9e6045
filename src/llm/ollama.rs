//! Ollama-compatible streaming chat client.
//!
//! Issues `POST /api/chat` with `"stream": true` and decodes the JSON-lines
//! response body into a token stream. Lines may be split across transport
//! chunks, so decoding buffers partial lines between chunks.

use crate::error::{ParlanceError, Result};
use crate::llm::generator::{Generator, TokenStream};
use crate::llm::ChatMessage;
use async_stream::try_stream;
use async_trait::async_trait;
use futures_util::StreamExt;
use serde::Deserialize;

/// Configuration for the Ollama client.
#[derive(Debug, Clone)]
pub struct OllamaConfig {
    /// Base URL, e.g. `http://localhost:11434`.
    pub url: String,
    pub model: String,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            url: crate::defaults::LLM_URL.to_string(),
            model: crate::defaults::LLM_MODEL.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct StreamLine {
    message: StreamMessage,
    #[serde(default)]
    done: bool,
}

#[derive(Debug, Deserialize)]
struct StreamMessage {
    content: String,
}

/// Generator backed by an Ollama-compatible chat endpoint.
pub struct OllamaGenerator {
    client: reqwest::Client,
    config: OllamaConfig,
}

impl OllamaGenerator {
    /// Creates a new client for the configured server.
    pub fn new(config: OllamaConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl Generator for OllamaGenerator {
    async fn stream_chat(&self, history: &[ChatMessage]) -> Result<TokenStream> {
        let body = serde_json::json!({
            "model": self.config.model,
            "stream": true,
            "messages": history,
        });

        let response = self
            .client
            .post(format!("{}/api/chat", self.config.url))
            .json(&body)
            .send()
            .await
            .map_err(|e| ParlanceError::Generation {
                message: format!("engine not reachable: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ParlanceError::Generation {
                message: format!("engine returned HTTP {status}: {text}"),
            });
        }

        let mut chunks = response.bytes_stream();
        let stream = try_stream! {
            let mut buffer = String::new();
            'body: while let Some(chunk) = chunks.next().await {
                let chunk = chunk.map_err(|e| ParlanceError::Generation {
                    message: format!("stream read failed: {e}"),
                })?;
                buffer.push_str(&String::from_utf8_lossy(&chunk));

                while let Some(pos) = buffer.find('\n') {
                    let line = buffer[..pos].trim().to_string();
                    buffer.drain(..=pos);
                    if line.is_empty() {
                        continue;
                    }

                    let parsed: StreamLine =
                        serde_json::from_str(&line).map_err(|e| ParlanceError::Generation {
                            message: format!("malformed stream payload: {e}"),
                        })?;
                    if parsed.done {
                        break 'body;
                    }
                    yield parsed.message.content;
                }
            }
        };

        Ok(Box::pin(stream))
    }

    fn name(&self) -> &str {
        &self.config.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = OllamaConfig::default();
        assert_eq!(config.url, "http://localhost:11434");
        assert_eq!(config.model, "llama3.2");
    }

    #[test]
    fn test_stream_line_parsing() {
        let line: StreamLine =
            serde_json::from_str(r#"{"message": {"content": "Hi"}, "done": false}"#).unwrap();
        assert_eq!(line.message.content, "Hi");
        assert!(!line.done);
    }

    #[test]
    fn test_stream_line_done_defaults_false() {
        let line: StreamLine =
            serde_json::from_str(r#"{"message": {"content": ""}}"#).unwrap();
        assert!(!line.done);
    }

    #[test]
    fn test_request_body_shape() {
        let history = vec![ChatMessage::user("hello")];
        let body = serde_json::json!({
            "model": "llama3.2",
            "stream": true,
            "messages": history,
        });
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "hello");
        assert_eq!(body["stream"], true);
    }

    #[tokio::test]
    async fn test_unreachable_server_errors() {
        let generator = OllamaGenerator::new(OllamaConfig {
            url: "http://192.0.2.1:9".to_string(),
            model: "test".to_string(),
        });

        // The request itself must fail; it cannot hang forever because the
        // TEST-NET address is unroutable and the connect fails fast on most
        // systems. Bound it anyway.
        let result = tokio::time::timeout(
            std::time::Duration::from_secs(10),
            generator.stream_chat(&[ChatMessage::user("hi")]),
        )
        .await;
        if let Ok(inner) = result {
            assert!(inner.is_err());
        }
    }
}
