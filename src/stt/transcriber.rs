use crate::error::{ParlanceError, Result};
use std::sync::{Arc, Mutex};

/// Trait for speech-to-text transcription.
///
/// This trait allows swapping implementations (remote engine vs mock).
/// Implementations may block; callers run them on a blocking thread pool.
pub trait Transcriber: Send + Sync {
    /// Transcribe audio samples to text.
    ///
    /// # Arguments
    /// * `samples` - Mono PCM samples as 32-bit floats
    /// * `sample_rate` - Sample rate of `samples` in Hz
    ///
    /// # Returns
    /// Transcribed text (possibly empty for silence/noise) or error
    fn transcribe(&self, samples: &[f32], sample_rate: u32) -> Result<String>;

    /// Get the name of this engine for logging
    fn name(&self) -> &str;
}

/// Implement Transcriber for Arc<T> to allow sharing across sessions.
impl<T: Transcriber> Transcriber for Arc<T> {
    fn transcribe(&self, samples: &[f32], sample_rate: u32) -> Result<String> {
        (**self).transcribe(samples, sample_rate)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Mock transcriber for testing
#[derive(Debug, Clone)]
pub struct MockTranscriber {
    name: String,
    response: String,
    should_fail: bool,
    /// (sample count, sample rate) of every call received.
    calls: Arc<Mutex<Vec<(usize, u32)>>>,
}

impl MockTranscriber {
    /// Create a new mock transcriber with default settings
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            response: "mock transcription".to_string(),
            should_fail: false,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Configure the mock to return a specific response
    pub fn with_response(mut self, response: &str) -> Self {
        self.response = response.to_string();
        self
    }

    /// Configure the mock to fail on transcribe
    pub fn with_failure(mut self) -> Self {
        self.should_fail = true;
        self
    }

    /// Returns the recorded (sample count, sample rate) of every call.
    pub fn calls(&self) -> Vec<(usize, u32)> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl Transcriber for MockTranscriber {
    fn transcribe(&self, samples: &[f32], sample_rate: u32) -> Result<String> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((samples.len(), sample_rate));
        }
        if self.should_fail {
            Err(ParlanceError::Transcription {
                message: "mock transcription failure".to_string(),
            })
        } else {
            Ok(self.response.clone())
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_transcriber_returns_response() {
        let transcriber = MockTranscriber::new("test").with_response("Hello, this is a test");

        let audio = vec![0.0f32; 1000];
        let result = transcriber.transcribe(&audio, 16000);

        assert!(result.is_ok());
        assert_eq!(result.unwrap(), "Hello, this is a test");
    }

    #[test]
    fn test_mock_transcriber_returns_error_when_configured() {
        let transcriber = MockTranscriber::new("test").with_failure();

        let result = transcriber.transcribe(&[0.0; 10], 16000);
        assert!(result.is_err());
        match result {
            Err(ParlanceError::Transcription { message }) => {
                assert_eq!(message, "mock transcription failure");
            }
            _ => panic!("Expected Transcription error"),
        }
    }

    #[test]
    fn test_mock_transcriber_records_calls() {
        let transcriber = MockTranscriber::new("test");
        transcriber.transcribe(&[0.0; 100], 16000).unwrap();
        transcriber.transcribe(&[0.0; 50], 48000).unwrap();

        assert_eq!(transcriber.calls(), vec![(100, 16000), (50, 48000)]);
    }

    #[test]
    fn test_mock_transcriber_empty_audio() {
        let transcriber = MockTranscriber::new("test").with_response("");
        let result = transcriber.transcribe(&[], 16000);
        assert_eq!(result.unwrap(), "");
        assert_eq!(transcriber.calls(), vec![(0, 16000)]);
    }

    #[test]
    fn test_transcriber_trait_is_object_safe() {
        let transcriber: Box<dyn Transcriber> =
            Box::new(MockTranscriber::new("test").with_response("boxed test"));

        assert_eq!(transcriber.name(), "test");
        let result = transcriber.transcribe(&[0.0; 100], 16000);
        assert_eq!(result.unwrap(), "boxed test");
    }

    #[test]
    fn test_arc_transcriber_shares_call_log() {
        let mock = Arc::new(MockTranscriber::new("shared"));
        let as_trait: &dyn Transcriber = &mock;
        as_trait.transcribe(&[0.0; 7], 16000).unwrap();
        assert_eq!(mock.calls(), vec![(7, 16000)]);
    }
}
