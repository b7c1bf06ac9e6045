//! parlance - Real-time voice conversation server
//!
//! Segments a live microphone stream arriving over one WebSocket
//! connection into utterances, transcribes them, streams a generated
//! reply, speaks it sentence by sentence, and multiplexes recognized user
//! text, assistant text, and synthesized audio back over the same
//! connection. New user input barges in on a reply in progress.

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

pub mod audio;
pub mod cli;
pub mod config;
pub mod defaults;
pub mod error;
pub mod llm;
pub mod normalize;
pub mod server;
pub mod session;
pub mod stt;
pub mod tts;

// Engine seams (hear → reply → speak)
pub use llm::{ChatMessage, Generator, Role};
pub use stt::Transcriber;
pub use tts::Synthesizer;

// Session pipeline
pub use session::{Engines, Session};

// Error handling
pub use error::{ParlanceError, Result};

// Config
pub use config::Config;

/// Build version string with optional git commit hash.
///
/// Returns `"0.1.0+abc1234"` when git hash is available, `"0.1.0"` otherwise.
pub fn version_string() -> String {
    let version = env!("CARGO_PKG_VERSION");
    match option_env!("GIT_HASH") {
        Some(hash) if !hash.is_empty() => format!("{}+{}", version, hash),
        _ => version.to_string(),
    }
}
