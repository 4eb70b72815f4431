//! Tick source trait

/// Millisecond uptime counter feeding the engine scheduler
///
/// Values are non-decreasing within a run and the call never blocks or
/// fails. The counter is 32 bits wide, so it rolls over every
/// 2^32 ms (about 49.7 days); the engine absorbs one rollover between
/// consecutive reads with wrapping arithmetic, which holds as long as it
/// is read at least once per rollover period (every loop iteration does).
pub trait TickSource {
    /// Milliseconds since start-up, modulo 2^32
    fn now_ms(&mut self) -> u32;
}
