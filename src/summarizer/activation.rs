//! User activation signal
//!
//! Session creation is gated on a prior user interaction. The surface that
//! observes interactions sets the signal; the adapter checks it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared flag recording that the user has interacted.
#[derive(Debug, Clone)]
pub struct UserActivation {
    active: Arc<AtomicBool>,
}

impl UserActivation {
    /// A signal with no activation recorded yet.
    pub fn new() -> Self {
        Self {
            active: Arc::new(AtomicBool::new(false)),
        }
    }

    /// A signal that is already active.
    pub fn activated() -> Self {
        let signal = Self::new();
        signal.activate();
        signal
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Relaxed)
    }

    /// Record a qualifying interaction.
    pub fn activate(&self) {
        self.active.store(true, Ordering::Relaxed);
    }

    /// Forget the interaction (e.g. the page lost focus).
    pub fn reset(&self) {
        self.active.store(false, Ordering::Relaxed);
    }
}

impl Default for UserActivation {
    fn default() -> Self {
        Self::new()
    }
}
