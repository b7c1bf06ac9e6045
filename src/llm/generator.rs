use crate::error::{ParlanceError, Result};
use crate::llm::ChatMessage;
use async_trait::async_trait;
use futures_util::StreamExt;
use futures_util::stream::{self, BoxStream};

/// Lazy, in-order stream of text fragments from one generation call.
///
/// Finite per call, not restartable; ends normally at end-of-reply or is
/// simply dropped on interrupt.
pub type TokenStream = BoxStream<'static, Result<String>>;

/// Trait for streaming, turn-based text generation.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Issues one streaming generation call seeded with the full history.
    async fn stream_chat(&self, history: &[ChatMessage]) -> Result<TokenStream>;

    /// Get the name of this engine for logging
    fn name(&self) -> &str;
}

/// Mock generator for testing
#[derive(Debug, Clone)]
pub struct MockGenerator {
    name: String,
    tokens: Vec<String>,
    should_fail: bool,
}

impl MockGenerator {
    /// Create a mock that streams the given tokens, in order.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            tokens: Vec::new(),
            should_fail: false,
        }
    }

    /// Configure the token sequence returned by `stream_chat`.
    pub fn with_tokens<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tokens = tokens.into_iter().map(Into::into).collect();
        self
    }

    /// Configure the mock to fail when the call is issued.
    pub fn with_failure(mut self) -> Self {
        self.should_fail = true;
        self
    }
}

#[async_trait]
impl Generator for MockGenerator {
    async fn stream_chat(&self, _history: &[ChatMessage]) -> Result<TokenStream> {
        if self.should_fail {
            return Err(ParlanceError::Generation {
                message: "mock generation failure".to_string(),
            });
        }
        let tokens = self.tokens.clone();
        Ok(stream::iter(tokens.into_iter().map(Ok)).boxed())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
