//! Transcription worker: finished utterances in, recognized text out.

use crate::audio::process;
use crate::audio::Utterance;
use crate::defaults;
use crate::session::fanout::FanoutSender;
use crate::session::signal::{Interrupt, Shutdown};
use crate::stt::Transcriber;
use std::sync::Arc;
use tokio::sync::mpsc::error::TryRecvError;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, warn};

/// Worker that turns utterances into transcripts.
///
/// A non-empty transcript raises the interrupt (new speech cancels any
/// reply in progress) and is broadcast to both the generation input queue
/// and the user-text outbound queue. Empty transcripts (silence, noise,
/// the near-empty utterances a quiet first frame produces) are dropped
/// without a trace.
pub struct TranscriptionStation {
    transcriber: Arc<dyn Transcriber>,
    target_sample_rate: u32,
}

impl TranscriptionStation {
    /// Creates a transcription worker for the given engine.
    pub fn new(transcriber: Arc<dyn Transcriber>, target_sample_rate: u32) -> Self {
        Self {
            transcriber,
            target_sample_rate,
        }
    }

    /// Runs the worker until the shutdown signal or a closed input queue.
    pub async fn run(
        self,
        mut input: UnboundedReceiver<Utterance>,
        transcript_tx: FanoutSender<String>,
        interrupt: Interrupt,
        shutdown: Shutdown,
    ) {
        loop {
            if shutdown.is_triggered() {
                break;
            }

            match input.try_recv() {
                Ok(utterance) => {
                    match self.transcribe(utterance).await {
                        Ok(text) => {
                            let text = text.trim().to_string();
                            if text.is_empty() {
                                continue;
                            }
                            debug!(%text, "transcribed");
                            // New speech cancels any reply in progress
                            interrupt.raise();
                            transcript_tx.send(text);
                        }
                        Err(e) => warn!("transcription failed: {e}"),
                    }
                }
                Err(TryRecvError::Empty) => tokio::time::sleep(defaults::IDLE_POLL).await,
                Err(TryRecvError::Disconnected) => break,
            }
        }
    }

    /// Resamples/downmixes the utterance and runs the engine on the
    /// blocking thread pool.
    async fn transcribe(&self, utterance: Utterance) -> crate::error::Result<String> {
        let samples = process::prepare(&utterance, self.target_sample_rate);
        let transcriber = self.transcriber.clone();
        let sample_rate = self.target_sample_rate;

        tokio::task::spawn_blocking(move || transcriber.transcribe(&samples, sample_rate))
            .await
            .map_err(|e| crate::error::ParlanceError::Transcription {
                message: format!("transcription task panicked: {e}"),
            })?
    }
}
