//! Blocking delays
//!
//! Used by drivers during bring-up (reset pulses, sleep-out waits).
//! The main loop never blocks on these.

/// Blocking millisecond delay provider
pub trait DelayMs {
    /// Block for at least `ms` milliseconds
    fn delay_ms(&mut self, ms: u32);
}

/// Delay that returns immediately
///
/// Useful on the host, where drivers are tested without real timing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoDelay;

impl DelayMs for NoDelay {
    fn delay_ms(&mut self, _ms: u32) {}
}
