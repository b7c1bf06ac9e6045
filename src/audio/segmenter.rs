//! Trailing-silence utterance segmentation.
//!
//! Frames accumulate into an utterance buffer until a single low-energy
//! frame arrives, at which point the whole buffer is emitted. An utterance
//! therefore ends on the first quiet frame after accumulated audio, not on
//! a fixed-duration window.

use crate::audio::frame::{AudioFrame, Utterance};
use crate::defaults;

/// Configuration for the segmenter.
#[derive(Debug, Clone)]
pub struct SegmenterConfig {
    /// Voice-activity score below which a frame closes the utterance.
    pub silence_score_threshold: f32,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            silence_score_threshold: defaults::SILENCE_SCORE_THRESHOLD,
        }
    }
}

/// Accumulates audio frames and emits utterances on trailing silence.
#[derive(Debug)]
pub struct Segmenter {
    config: SegmenterConfig,
    buffer: Vec<f32>,
    /// Sample rate of the first frame of the current utterance.
    sample_rate: Option<u32>,
}

impl Segmenter {
    /// Creates a segmenter with default configuration.
    pub fn new() -> Self {
        Self::with_config(SegmenterConfig::default())
    }

    /// Creates a segmenter with custom configuration.
    pub fn with_config(config: SegmenterConfig) -> Self {
        Self {
            config,
            buffer: Vec::new(),
            sample_rate: None,
        }
    }

    /// Appends a frame to the current utterance buffer.
    ///
    /// Returns the accumulated utterance when this frame scores below the
    /// silence threshold. The activity score is computed from this single
    /// frame only, never the whole buffer. A quiet first frame emits a
    /// near-empty utterance; downstream tolerates and drops empty results.
    pub fn push_frame(&mut self, frame: AudioFrame) -> Option<Utterance> {
        let score = activity_score(&frame.samples);

        if self.sample_rate.is_none() {
            self.sample_rate = Some(frame.sample_rate);
        }
        self.buffer.extend_from_slice(&frame.samples);

        if score < self.config.silence_score_threshold {
            let samples = std::mem::take(&mut self.buffer);
            let sample_rate = self.sample_rate.take().unwrap_or(frame.sample_rate);
            return Some(Utterance::new(samples, sample_rate));
        }

        None
    }

    /// Number of samples currently buffered.
    pub fn buffered_samples(&self) -> usize {
        self.buffer.len()
    }
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new()
    }
}

/// Root-mean-square energy of a frame.
pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_squares: f32 = samples.iter().map(|s| s * s).sum();
    (sum_squares / samples.len() as f32).sqrt()
}

/// Voice-activity score in [0, 1): `rms / (rms + 0.5)`.
pub fn activity_score(samples: &[f32]) -> f32 {
    let energy = rms(samples);
    energy / (energy + 0.5)
}
