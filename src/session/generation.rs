//! Generation worker: user input in, streamed assistant reply out.
//!
//! Owns the conversation history; no other worker reads or writes it.
//! Each turn issues one streaming generation call seeded with the full
//! history and re-segments the token stream two ways at once: every token
//! goes straight to the assistant-text outbound queue for live display,
//! while sentence and display-chunk buffers accumulate until a boundary
//! token flushes them into history and the synthesis queue.

use crate::defaults;
use crate::error::Result;
use crate::llm::{ChatMessage, Generator};
use crate::session::signal::{Interrupt, Shutdown};
use futures_util::StreamExt;
use std::sync::Arc;
use tokio::sync::mpsc::error::TryRecvError;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tracing::warn;

/// Returns true if this token closes a sentence.
fn is_sentence_boundary(token: &str) -> bool {
    token.contains('\n') || defaults::SENTENCE_TERMINALS.contains(&token)
}

/// Worker that drives one streaming generation call per user input.
pub struct GenerationStation {
    generator: Arc<dyn Generator>,
    /// Append-only conversation history; never truncated during a session.
    history: Vec<ChatMessage>,
}

impl GenerationStation {
    /// Creates a generation worker with an empty history.
    pub fn new(generator: Arc<dyn Generator>) -> Self {
        Self {
            generator,
            history: Vec::new(),
        }
    }

    /// Runs the worker until the shutdown signal or a closed input queue.
    ///
    /// Generation-call failures are logged and forfeit that one turn; the
    /// worker keeps serving subsequent inputs.
    pub async fn run(
        mut self,
        mut input: UnboundedReceiver<String>,
        assistant_tx: UnboundedSender<String>,
        sentence_tx: UnboundedSender<String>,
        interrupt: Interrupt,
        shutdown: Shutdown,
    ) {
        loop {
            if shutdown.is_triggered() {
                break;
            }

            match input.try_recv() {
                Ok(text) => {
                    if let Err(e) = self
                        .run_turn(text, &assistant_tx, &sentence_tx, &interrupt, &shutdown)
                        .await
                    {
                        warn!("generation failed: {e}");
                    }
                }
                Err(TryRecvError::Empty) => tokio::time::sleep(defaults::IDLE_POLL).await,
                Err(TryRecvError::Disconnected) => break,
            }
        }
    }

    /// Processes one user input: append to history, clear the interrupt,
    /// stream the reply.
    async fn run_turn(
        &mut self,
        input: String,
        assistant_tx: &UnboundedSender<String>,
        sentence_tx: &UnboundedSender<String>,
        interrupt: &Interrupt,
        shutdown: &Shutdown,
    ) -> Result<()> {
        self.history.push(ChatMessage::user(input));
        interrupt.clear();

        let mut stream = self.generator.stream_chat(&self.history).await?;

        let mut sentence = String::new();
        let mut chunk = String::new();
        let mut interrupted = false;

        loop {
            // Checked before consuming each token: an interrupt aborts the
            // stream and discards the unflushed tail without committing it.
            if interrupt.is_raised() || shutdown.is_triggered() {
                interrupted = true;
                break;
            }

            let Some(token) = stream.next().await else {
                break;
            };
            let token = token?;

            // Token-level granularity for live display
            let _ = assistant_tx.send(token.clone());
            sentence.push_str(&token);
            chunk.push_str(&token);

            if is_sentence_boundary(&token) {
                self.flush(&mut sentence, &mut chunk, sentence_tx);
            }
        }

        if !interrupted {
            // Close the reply with a line break so trailing text that never
            // hit punctuation still flushes.
            let _ = assistant_tx.send("\n".to_string());
            sentence.push('\n');
            chunk.push('\n');
            self.flush(&mut sentence, &mut chunk, sentence_tx);
        }

        // The marker goes out even after an interrupt: it closes the
        // partial assistant bubble on the client.
        let _ = assistant_tx.send(defaults::END_OF_MESSAGE.to_string());
        Ok(())
    }

    /// Commits the display chunk to history, hands the sentence to
    /// synthesis, and resets both buffers. Empty buffers commit nothing.
    fn flush(
        &mut self,
        sentence: &mut String,
        chunk: &mut String,
        sentence_tx: &UnboundedSender<String>,
    ) {
        let chunk_text = chunk.trim();
        if !chunk_text.is_empty() {
            self.history.push(ChatMessage::assistant(chunk_text));
        }

        let sentence_text = sentence.trim();
        if !sentence_text.is_empty() {
            let _ = sentence_tx.send(sentence_text.to_string());
        }

        sentence.clear();
        chunk.clear();
    }

    /// Read access to the history, for tests and diagnostics.
    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }
}
