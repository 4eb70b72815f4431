//! Pointer input boundary consumed by the engine

use crate::geometry::Position;

/// Pointer state for one poll cycle
///
/// The position is whatever the coordinate mapper produced; the engine
/// clamps it before use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PointerEvent {
    /// Pointer is down at the given display position
    Pressed(Position),
    /// No touch present (carries no position)
    Released,
}

impl PointerEvent {
    pub fn is_pressed(&self) -> bool {
        matches!(self, PointerEvent::Pressed(_))
    }

    pub fn position(&self) -> Option<Position> {
        match self {
            PointerEvent::Pressed(pos) => Some(*pos),
            PointerEvent::Released => None,
        }
    }
}

/// Source of pointer events, read by the engine at its own cadence
pub trait PointerInput {
    /// Produce the pointer state for this poll. Never blocks, never fails.
    fn poll(&mut self) -> PointerEvent;
}
