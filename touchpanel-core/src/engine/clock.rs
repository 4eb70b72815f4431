//! Engine time keeping

/// Monotonic 64-bit engine time built from a wrapping 32-bit tick source
#[derive(Debug, Clone, Copy, Default)]
pub struct Clock {
    last_raw: Option<u32>,
    elapsed_ms: u64,
}

impl Clock {
    pub const fn new() -> Self {
        Self {
            last_raw: None,
            elapsed_ms: 0,
        }
    }

    /// Feed a raw tick reading and return elapsed engine time
    ///
    /// At most one rollover may happen between two readings.
    pub fn update(&mut self, raw_ms: u32) -> u64 {
        if let Some(last) = self.last_raw {
            self.elapsed_ms += raw_ms.wrapping_sub(last) as u64;
        }
        self.last_raw = Some(raw_ms);
        self.elapsed_ms
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }
}

/// Periodic engine timer
///
/// Fires on its first poll, then whenever `period_ms` has elapsed since
/// it last fired.
#[derive(Debug, Clone, Copy)]
pub struct Timer {
    period_ms: u64,
    last_run: Option<u64>,
}

impl Timer {
    pub const fn new(period_ms: u64) -> Self {
        Self {
            period_ms,
            last_run: None,
        }
    }

    /// Returns true (and re-arms) if the timer is due at `now`
    pub fn poll(&mut self, now: u64) -> bool {
        match self.last_run {
            Some(last) if now.saturating_sub(last) < self.period_ms => false,
            _ => {
                self.last_run = Some(now);
                true
            }
        }
    }

    /// Milliseconds until the timer is due
    pub fn remaining(&self, now: u64) -> u64 {
        match self.last_run {
            Some(last) => self.period_ms.saturating_sub(now.saturating_sub(last)),
            None => 0,
        }
    }

    pub fn period_ms(&self) -> u64 {
        self.period_ms
    }
}
