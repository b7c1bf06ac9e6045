//! Synthesis worker: speakable sentences in, audio bytes out.

use crate::defaults;
use crate::normalize;
use crate::session::signal::Shutdown;
use crate::tts::Synthesizer;
use std::sync::Arc;
use tokio::sync::mpsc::error::TryRecvError;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tracing::warn;

/// Worker that speaks one sentence at a time.
///
/// Sentences are normalized into speakable text first; anything empty
/// after normalization is dropped without an engine call. Synthesis calls
/// are not cancellable mid-call; an interrupt raised during one lets the
/// in-flight result through.
pub struct SynthesisStation {
    synthesizer: Arc<dyn Synthesizer>,
}

impl SynthesisStation {
    /// Creates a synthesis worker for the given engine.
    pub fn new(synthesizer: Arc<dyn Synthesizer>) -> Self {
        Self { synthesizer }
    }

    /// Runs the worker until the shutdown signal or a closed input queue.
    pub async fn run(
        self,
        mut input: UnboundedReceiver<String>,
        audio_tx: UnboundedSender<Vec<u8>>,
        shutdown: Shutdown,
    ) {
        loop {
            if shutdown.is_triggered() {
                break;
            }

            match input.try_recv() {
                Ok(sentence) => {
                    let text = normalize::speakable(&sentence).replace('\n', " ");
                    let text = text.trim();
                    if text.is_empty() {
                        continue;
                    }

                    match self.synthesizer.synthesize(text).await {
                        Ok(audio) => {
                            let _ = audio_tx.send(audio);
                        }
                        // Forfeit this one sentence; the worker keeps going
                        Err(e) => warn!("synthesis failed: {e}"),
                    }
                }
                Err(TryRecvError::Empty) => tokio::time::sleep(defaults::IDLE_POLL).await,
                Err(TryRecvError::Disconnected) => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tts::MockSynthesizer;
    use std::time::Duration;
    use tokio::sync::mpsc;

    async fn run_station(
        mock: MockSynthesizer,
        sentences: Vec<&str>,
    ) -> (MockSynthesizer, UnboundedReceiver<Vec<u8>>) {
        let (sentence_tx, sentence_rx) = mpsc::unbounded_channel();
        let (audio_tx, audio_rx) = mpsc::unbounded_channel();

        let station = SynthesisStation::new(Arc::new(mock.clone()));
        let handle = tokio::spawn(station.run(sentence_rx, audio_tx, Shutdown::new()));

        for sentence in sentences {
            sentence_tx.send(sentence.to_string()).unwrap();
        }
        drop(sentence_tx);

        tokio::time::timeout(Duration::from_secs(2), handle)
            .await
            .expect("station did not stop")
            .unwrap();

        (mock, audio_rx)
    }

    #[tokio::test]
    async fn test_sentence_becomes_audio() {
        let (mock, mut audio_rx) = run_station(MockSynthesizer::new("tts"), vec!["Hello."]).await;

        assert_eq!(mock.calls(), vec!["Hello."]);
        assert_eq!(audio_rx.try_recv().unwrap(), b"audio:Hello.");
    }

    #[tokio::test]
    async fn test_line_breaks_collapse_to_spaces() {
        let (mock, _) = run_station(MockSynthesizer::new("tts"), vec!["one\ntwo"]).await;
        assert_eq!(mock.calls(), vec!["one two"]);
    }

    #[tokio::test]
    async fn test_math_notation_is_normalized() {
        let (mock, _) =
            run_station(MockSynthesizer::new("tts"), vec![r"It equals \frac{1}{2}."]).await;
        let calls = mock.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].contains("1 over 2"));
        assert!(!calls[0].contains("frac"));
    }

    #[tokio::test]
    async fn test_empty_after_normalization_skips_engine() {
        let (mock, mut audio_rx) =
            run_station(MockSynthesizer::new("tts"), vec!["", "  ", "\n", "{}"]).await;

        assert!(mock.calls().is_empty());
        assert!(audio_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_engine_error_forfeits_only_that_sentence() {
        let (mock, mut audio_rx) = run_station(
            MockSynthesizer::new("tts").with_failure(),
            vec!["First.", "Second."],
        )
        .await;

        // Both were attempted, neither produced audio
        assert_eq!(mock.calls(), vec!["First.", "Second."]);
        assert!(audio_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_audio_keeps_fifo_order() {
        let (_, mut audio_rx) =
            run_station(MockSynthesizer::new("tts"), vec!["A.", "B.", "C."]).await;

        assert_eq!(audio_rx.try_recv().unwrap(), b"audio:A.");
        assert_eq!(audio_rx.try_recv().unwrap(), b"audio:B.");
        assert_eq!(audio_rx.try_recv().unwrap(), b"audio:C.");
    }

    #[tokio::test]
    async fn test_shutdown_stops_idle_station() {
        let (_sentence_tx, sentence_rx) = mpsc::unbounded_channel::<String>();
        let (audio_tx, _audio_rx) = mpsc::unbounded_channel();
        let shutdown = Shutdown::new();

        let station = SynthesisStation::new(Arc::new(MockSynthesizer::new("tts")));
        let handle = tokio::spawn(station.run(sentence_rx, audio_tx, shutdown.clone()));

        shutdown.trigger();
        tokio::time::timeout(Duration::from_secs(2), handle)
            .await
            .expect("station ignored shutdown")
            .unwrap();
    }
}
