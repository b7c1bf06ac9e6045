//! Speech-to-text engine seam.

pub mod remote;
pub mod transcriber;

pub use remote::{RemoteTranscriber, RemoteTranscriberConfig};
pub use transcriber::{MockTranscriber, Transcriber};
