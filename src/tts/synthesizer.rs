use crate::error::{ParlanceError, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Trait for text-to-speech synthesis.
///
/// Engines fail closed on empty or unsupported input; callers drop empty
/// sentences before reaching the engine.
#[async_trait]
pub trait Synthesizer: Send + Sync {
    /// Synthesize speech for the given text.
    ///
    /// # Returns
    /// Encoded audio bytes, or error
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>>;

    /// Get the name of this engine for logging
    fn name(&self) -> &str;
}

/// Mock synthesizer for testing
#[derive(Debug, Clone)]
pub struct MockSynthesizer {
    name: String,
    should_fail: bool,
    /// Every text this mock was asked to speak.
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockSynthesizer {
    /// Create a new mock synthesizer
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            should_fail: false,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Configure the mock to fail on synthesize
    pub fn with_failure(mut self) -> Self {
        self.should_fail = true;
        self
    }

    /// Returns every text passed to `synthesize`, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Synthesizer for MockSynthesizer {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(text.to_string());
        }
        if self.should_fail {
            return Err(ParlanceError::Synthesis {
                message: "mock synthesis failure".to_string(),
            });
        }
        if text.is_empty() {
            // Real engines reject empty input
            return Err(ParlanceError::Synthesis {
                message: "empty input".to_string(),
            });
        }
        Ok(format!("audio:{text}").into_bytes())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
