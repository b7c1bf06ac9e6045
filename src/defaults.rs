//! Default configuration constants for parlance.
//!
//! Shared constants used across configuration types and the session
//! pipeline, to ensure consistency and eliminate duplication.

use std::time::Duration;

/// Sample rate the transcription engine expects, in Hz.
///
/// 16kHz is the standard for speech recognition; utterances arriving at any
/// other rate are linearly resampled before transcription.
pub const TARGET_SAMPLE_RATE: u32 = 16000;

/// Voice-activity score below which a frame counts as trailing silence.
///
/// The score is `rms / (rms + 0.5)`, computed over a single incoming frame.
/// The first frame scoring below this threshold closes the current utterance.
pub const SILENCE_SCORE_THRESHOLD: f32 = 0.05;

/// How long an idle worker sleeps before polling its input queue again.
pub const IDLE_POLL: Duration = Duration::from_millis(100);

/// Marker forwarded on the assistant-text stream at the end of one turn.
///
/// The web client treats `A<EOM>` as "close the current assistant bubble".
pub const END_OF_MESSAGE: &str = "<EOM>";

/// Tokens that terminate a sentence (the unit sent to speech synthesis).
///
/// A token containing a line break also terminates a sentence.
pub const SENTENCE_TERMINALS: &[&str] = &[".", ",", "!", "?", "!?", "?!", ";"];

/// Default address the server binds to.
pub const LISTEN_HOST: &str = "0.0.0.0";

/// Default port for the combined HTTP + WebSocket listener.
pub const LISTEN_PORT: u16 = 8050;

/// Default directory served as the web client.
pub const WEB_ROOT: &str = "web";

/// Default base URL of the Ollama-compatible generation endpoint.
pub const LLM_URL: &str = "http://localhost:11434";

/// Default generation model name.
pub const LLM_MODEL: &str = "llama3.2";

/// Default speech-synthesis endpoint (StreamElements-shaped API).
pub const TTS_ENDPOINT: &str = "https://api.streamelements.com/kappa/v2/speech";

/// Default synthesis voice.
pub const TTS_VOICE: &str = "Brian";

/// Default synthesis request timeout in milliseconds.
pub const TTS_TIMEOUT_MS: u64 = 8000;

/// Default remote transcription endpoint.
pub const STT_ENDPOINT: &str = "http://127.0.0.1:8060/transcribe";

/// Default transcription request timeout in milliseconds.
pub const STT_TIMEOUT_MS: u64 = 15000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silence_threshold_in_unit_range() {
        assert!(SILENCE_SCORE_THRESHOLD > 0.0);
        assert!(SILENCE_SCORE_THRESHOLD < 1.0);
    }

    #[test]
    fn test_sentence_terminals_include_basic_punctuation() {
        for tok in [".", ",", "!", "?", ";"] {
            assert!(SENTENCE_TERMINALS.contains(&tok), "missing {tok}");
        }
    }

    #[test]
    fn test_idle_poll_is_short() {
        assert!(IDLE_POLL <= Duration::from_millis(250));
    }
}
