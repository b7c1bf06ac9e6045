//! Audio frame types and wire decoding.
//!
//! One inbound binary message carries one frame: a 4-byte little-endian
//! unsigned sample rate followed by 32-bit little-endian float PCM samples.

use crate::error::{ParlanceError, Result};

/// A frame of raw audio samples as received from the client.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioFrame {
    /// Declared sample rate in Hz.
    pub sample_rate: u32,
    /// PCM samples (32-bit floats).
    pub samples: Vec<f32>,
}

impl AudioFrame {
    /// Creates a new audio frame.
    pub fn new(sample_rate: u32, samples: Vec<f32>) -> Self {
        Self {
            sample_rate,
            samples,
        }
    }

    /// Decodes a frame from its wire format.
    ///
    /// Fails on payloads shorter than the 4-byte header or whose sample
    /// section is not a whole number of `f32`s. A failed frame is dropped by
    /// the caller; it never tears down the session.
    pub fn from_wire(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < 4 {
            return Err(ParlanceError::Frame {
                message: format!("payload of {} bytes is shorter than the header", bytes.len()),
            });
        }

        let (header, body) = bytes.split_at(4);
        if body.len() % 4 != 0 {
            return Err(ParlanceError::Frame {
                message: format!("sample section of {} bytes is not float32-aligned", body.len()),
            });
        }

        let sample_rate = u32::from_le_bytes([header[0], header[1], header[2], header[3]]);
        if sample_rate == 0 {
            return Err(ParlanceError::Frame {
                message: "declared sample rate is zero".to_string(),
            });
        }

        let samples = body
            .chunks_exact(4)
            .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect();

        Ok(Self {
            sample_rate,
            samples,
        })
    }

    /// Encodes the frame back into its wire format.
    pub fn to_wire(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(4 + self.samples.len() * 4);
        bytes.extend_from_slice(&self.sample_rate.to_le_bytes());
        for sample in &self.samples {
            bytes.extend_from_slice(&sample.to_le_bytes());
        }
        bytes
    }

    /// Returns the duration of this frame in milliseconds.
    pub fn duration_ms(&self) -> u32 {
        (self.samples.len() as u64 * 1000 / self.sample_rate as u64) as u32
    }
}

/// One contiguous span of audio bounded by trailing silence, the unit
/// handed to transcription.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    /// Concatenated samples of every frame since the last boundary.
    pub samples: Vec<f32>,
    /// Sample rate of the first frame (assumed constant for the session).
    pub sample_rate: u32,
    /// Number of interleaved channels (the wire format carries mono).
    pub channels: u16,
}

impl Utterance {
    /// Creates a mono utterance.
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
            channels: 1,
        }
    }

    /// Returns true if the utterance carries no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
