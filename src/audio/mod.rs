//! Audio types and processing for the session pipeline.

pub mod frame;
pub mod process;
pub mod segmenter;

pub use frame::{AudioFrame, Utterance};
pub use segmenter::{Segmenter, SegmenterConfig};
