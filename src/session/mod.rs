//! Per-connection session pipeline.
//!
//! One session owns the segmenter, the inter-worker queues, the interrupt
//! and shutdown signals, and the four workers (transcription, generation,
//! synthesis, transmission). Data flows strictly downstream:
//!
//! ```text
//! audio frames → segmenter → transcription → generation → synthesis
//!                                   ↓             ↓            ↓
//!                               user text    assistant     audio bytes
//!                                   └──── transmission ────────┘
//! ```
//!
//! The interrupt signal is the single upstream control path: any new user
//! input (speech or typed) raises it, aborting a reply in progress.

pub mod fanout;
pub mod generation;
pub mod signal;
pub mod synthesis;
pub mod transcription;
pub mod transmission;

pub use fanout::{fanout_channel, FanoutSender};
pub use generation::GenerationStation;
pub use signal::{Interrupt, Shutdown};
pub use synthesis::SynthesisStation;
pub use transcription::TranscriptionStation;
pub use transmission::{ClientPayload, TransmissionStation};

use crate::audio::{AudioFrame, Segmenter, SegmenterConfig, Utterance};
use crate::config::AudioConfig;
use crate::error::Result;
use crate::llm::Generator;
use crate::stt::Transcriber;
use crate::tts::Synthesizer;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// The three external engines a session talks to.
#[derive(Clone)]
pub struct Engines {
    pub transcriber: Arc<dyn Transcriber>,
    pub generator: Arc<dyn Generator>,
    pub synthesizer: Arc<dyn Synthesizer>,
}

/// One live connection's pipeline state.
///
/// Created on connection accept, destroyed on disconnect. All inter-worker
/// communication goes through the queues wired up in [`Session::spawn`];
/// there is no process-wide per-client state.
pub struct Session {
    segmenter: Segmenter,
    utterance_tx: UnboundedSender<Utterance>,
    /// Broadcast entry point for user input: one push lands independently
    /// on the generation input queue and the user-text outbound queue.
    user_input_tx: FanoutSender<String>,
    interrupt: Interrupt,
    shutdown: Shutdown,
    outbound_rx: Option<UnboundedReceiver<ClientPayload>>,
    workers: Vec<JoinHandle<()>>,
}

impl Session {
    /// Wires up the queue graph and starts the four workers.
    pub fn spawn(engines: Engines, audio: &AudioConfig) -> Self {
        let interrupt = Interrupt::new();
        let shutdown = Shutdown::new();

        let (utterance_tx, utterance_rx) = mpsc::unbounded_channel::<Utterance>();
        let (user_input_tx, generation_input_rx, user_text_rx) = fanout_channel::<String>();
        let (assistant_tx, assistant_rx) = mpsc::unbounded_channel::<String>();
        let (sentence_tx, sentence_rx) = mpsc::unbounded_channel::<String>();
        let (audio_tx, audio_rx) = mpsc::unbounded_channel::<Vec<u8>>();
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel::<ClientPayload>();

        let transcription = TranscriptionStation::new(
            engines.transcriber.clone(),
            audio.target_sample_rate,
        );
        let generation = GenerationStation::new(engines.generator.clone());
        let synthesis = SynthesisStation::new(engines.synthesizer.clone());
        let transmission = TransmissionStation::new();

        let workers = vec![
            tokio::spawn(transcription.run(
                utterance_rx,
                user_input_tx.clone(),
                interrupt.clone(),
                shutdown.clone(),
            )),
            tokio::spawn(generation.run(
                generation_input_rx,
                assistant_tx,
                sentence_tx,
                interrupt.clone(),
                shutdown.clone(),
            )),
            tokio::spawn(synthesis.run(sentence_rx, audio_tx, shutdown.clone())),
            tokio::spawn(transmission.run(
                assistant_rx,
                user_text_rx,
                audio_rx,
                outbound_tx,
                shutdown.clone(),
            )),
        ];

        Self {
            segmenter: Segmenter::with_config(SegmenterConfig {
                silence_score_threshold: audio.silence_score_threshold,
            }),
            utterance_tx,
            user_input_tx,
            interrupt,
            shutdown,
            outbound_rx: Some(outbound_rx),
            workers,
        }
    }

    /// Takes the receiving end of the outbound delivery queue.
    ///
    /// The connection handler drains this into the socket; the multiplexer
    /// never touches the network itself.
    pub fn take_outbound(&mut self) -> Option<UnboundedReceiver<ClientPayload>> {
        self.outbound_rx.take()
    }

    /// Handles one inbound binary message: decode the frame, feed the
    /// segmenter, and hand a finished utterance to transcription.
    ///
    /// A malformed frame fails only itself; the caller logs and drops it.
    pub fn handle_binary(&mut self, bytes: &[u8]) -> Result<()> {
        let frame = AudioFrame::from_wire(bytes)?;
        if let Some(utterance) = self.segmenter.push_frame(frame) {
            debug!(
                samples = utterance.samples.len(),
                sample_rate = utterance.sample_rate,
                "utterance complete"
            );
            if self.utterance_tx.send(utterance).is_err() {
                warn!("transcription worker gone; dropping utterance");
            }
        }
        Ok(())
    }

    /// Handles one inbound text message: direct user input.
    ///
    /// Bypasses transcription but is otherwise indistinguishable from
    /// recognized speech: it is echoed on the user-text stream and raises
    /// the interrupt.
    pub fn handle_text(&mut self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        self.user_input_tx.send(text.to_string());
        self.interrupt.raise();
    }

    /// True once the session has been told to stop.
    pub fn is_stopped(&self) -> bool {
        self.shutdown.is_triggered()
    }

    /// Tears the session down: trigger the stop signal and wait for every
    /// worker to observe it and exit.
    pub async fn shutdown(mut self) {
        self.shutdown.trigger();
        for worker in self.workers.drain(..) {
            if let Err(e) = worker.await {
                warn!("session worker panicked: {e}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MockGenerator;
    use crate::stt::MockTranscriber;
    use crate::tts::MockSynthesizer;

    fn mock_engines() -> Engines {
        Engines {
            transcriber: Arc::new(MockTranscriber::new("stt")),
            generator: Arc::new(MockGenerator::new("llm")),
            synthesizer: Arc::new(MockSynthesizer::new("tts")),
        }
    }

    #[tokio::test]
    async fn test_spawn_and_shutdown() {
        let session = Session::spawn(mock_engines(), &AudioConfig::default());
        assert!(!session.is_stopped());

        // Must complete promptly: every worker observes the stop signal
        // within one idle cycle.
        tokio::time::timeout(std::time::Duration::from_secs(2), session.shutdown())
            .await
            .expect("shutdown timed out");
    }

    #[tokio::test]
    async fn test_take_outbound_is_once() {
        let mut session = Session::spawn(mock_engines(), &AudioConfig::default());
        assert!(session.take_outbound().is_some());
        assert!(session.take_outbound().is_none());
        session.shutdown().await;
    }

    #[tokio::test]
    async fn test_malformed_binary_fails_frame_not_session() {
        let mut session = Session::spawn(mock_engines(), &AudioConfig::default());
        assert!(session.handle_binary(&[1, 2]).is_err());
        // Session still alive and usable
        assert!(!session.is_stopped());
        let frame = AudioFrame::new(16000, vec![0.5; 64]);
        assert!(session.handle_binary(&frame.to_wire()).is_ok());
        session.shutdown().await;
    }

    #[tokio::test]
    async fn test_text_input_raises_interrupt() {
        let mut session = Session::spawn(mock_engines(), &AudioConfig::default());
        assert!(!session.interrupt.is_raised());
        session.handle_text("hello there");
        assert!(session.interrupt.is_raised());
        session.shutdown().await;
    }

    #[tokio::test]
    async fn test_blank_text_input_is_ignored() {
        let mut session = Session::spawn(mock_engines(), &AudioConfig::default());
        session.handle_text("   ");
        assert!(!session.interrupt.is_raised());
        session.shutdown().await;
    }
}
