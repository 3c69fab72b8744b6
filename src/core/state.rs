use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Process-wide interrupt flag shared between the SIGINT handler and the
/// main flow.
///
/// Only the signal handler raises it and only the main loop clears it; every
/// other component just polls it.
#[derive(Debug, Clone, Default)]
pub struct InterruptFlag {
    raised: Arc<AtomicBool>,
}

impl InterruptFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Async-signal-safe: a single atomic store.
    pub fn raise(&self) {
        self.raised.store(true, Ordering::SeqCst);
    }

    pub fn clear(&self) {
        self.raised.store(false, Ordering::SeqCst);
    }

    pub fn is_set(&self) -> bool {
        self.raised.load(Ordering::SeqCst)
    }
}
