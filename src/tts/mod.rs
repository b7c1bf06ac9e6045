//! Speech-synthesis engine seam.

pub mod http;
pub mod synthesizer;

pub use http::{HttpSynthesizer, HttpSynthesizerConfig};
pub use synthesizer::{MockSynthesizer, Synthesizer};
