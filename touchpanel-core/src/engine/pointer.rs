//! Pointer pipeline: pointer states to edge events

use heapless::Vec;

use crate::geometry::Position;
use crate::traits::PointerEvent;

/// Events dispatched to screen handlers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EventKind {
    /// Pointer went down
    Pressed,
    /// Pointer is still down
    Pressing,
    /// Pointer went up
    Released,
    /// Pointer went down and up again
    Clicked,
}

/// Edge detector with coordinate clamping
#[derive(Debug, Clone, Copy)]
pub struct PointerTracker {
    width: u16,
    height: u16,
    pressed: bool,
    position: Position,
}

impl PointerTracker {
    pub const fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            pressed: false,
            position: Position::new(0, 0),
        }
    }

    /// Feed one poll result and return the events it produces
    pub fn update(&mut self, event: PointerEvent) -> Vec<EventKind, 2> {
        let mut events = Vec::new();
        match (self.pressed, event) {
            (false, PointerEvent::Pressed(pos)) => {
                self.pressed = true;
                self.position = pos.clamp_to(self.width, self.height);
                let _ = events.push(EventKind::Pressed);
            }
            (true, PointerEvent::Pressed(pos)) => {
                self.position = pos.clamp_to(self.width, self.height);
                let _ = events.push(EventKind::Pressing);
            }
            (true, PointerEvent::Released) => {
                self.pressed = false;
                let _ = events.push(EventKind::Released);
                let _ = events.push(EventKind::Clicked);
            }
            (false, PointerEvent::Released) => {}
        }
        events
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Last clamped position; kept after release
    pub fn position(&self) -> Position {
        self.position
    }
}
