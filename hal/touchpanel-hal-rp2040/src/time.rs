//! Time base on embassy-time

use embassy_time::{block_for, Duration, Instant};
use touchpanel_core::traits::TickSource;
use touchpanel_hal::DelayMs;

/// Millisecond uptime from the embassy time driver, truncated to 32 bits
#[derive(Debug, Default, Clone, Copy)]
pub struct EmbassyTick;

impl TickSource for EmbassyTick {
    fn now_ms(&mut self) -> u32 {
        Instant::now().as_millis() as u32
    }
}

/// Busy-waiting delay for driver bring-up
#[derive(Debug, Default, Clone, Copy)]
pub struct EmbassyDelay;

impl DelayMs for EmbassyDelay {
    fn delay_ms(&mut self, ms: u32) {
        block_for(Duration::from_millis(ms as u64));
    }
}
