//! Session control signals.
//!
//! Two flags coordinate the workers: the interrupt, raised by any new user
//! input to abort a reply in progress, and the shutdown, raised once on
//! teardown. Both are plain shared booleans; the interrupt is deliberately
//! not a per-turn token, so two near-simultaneous interrupts can race
//! (see DESIGN.md).

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Barge-in signal: set by new user input, cleared by the generation
/// worker when it begins a new turn.
#[derive(Debug, Clone, Default)]
pub struct Interrupt(Arc<AtomicBool>);

impl Interrupt {
    /// Creates a cleared interrupt signal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raises the signal. Idempotent.
    pub fn raise(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Clears the signal. Only the generation worker calls this.
    pub fn clear(&self) {
        self.0.store(false, Ordering::SeqCst);
    }

    /// Returns true if the signal is currently raised.
    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Session teardown signal: once triggered, every worker exits within one
/// idle cycle.
#[derive(Debug, Clone, Default)]
pub struct Shutdown(Arc<AtomicBool>);

impl Shutdown {
    /// Creates an untriggered shutdown signal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Triggers teardown. Idempotent.
    pub fn trigger(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Returns true once teardown has been requested.
    pub fn is_triggered(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
