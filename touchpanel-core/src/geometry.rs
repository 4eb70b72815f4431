//! Pixel geometry shared by the touch and display paths

use embedded_graphics::prelude::{Point, Size};
use embedded_graphics::primitives::Rectangle;

/// A position in display pixel space
///
/// Signed, because the coordinate mapper extrapolates outside the
/// calibrated range and may produce negative values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Clamp into `[0, width-1] x [0, height-1]`
    pub fn clamp_to(self, width: u16, height: u16) -> Self {
        let max_x = (width as i32 - 1).max(0);
        let max_y = (height as i32 - 1).max(0);
        Self {
            x: self.x.clamp(0, max_x),
            y: self.y.clamp(0, max_y),
        }
    }
}

/// Inclusive pixel rectangle `(x1, y1)..=(x2, y2)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Area {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Area {
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// The full area of a `width` x `height` display
    pub const fn of_display(width: u16, height: u16) -> Self {
        Self {
            x1: 0,
            y1: 0,
            x2: width as i32 - 1,
            y2: height as i32 - 1,
        }
    }

    pub const fn width(&self) -> u32 {
        (self.x2 - self.x1 + 1) as u32
    }

    pub const fn height(&self) -> u32 {
        (self.y2 - self.y1 + 1) as u32
    }

    /// Number of pixels covered: `(x2-x1+1) * (y2-y1+1)`
    pub const fn pixel_count(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    pub const fn is_empty(&self) -> bool {
        self.x2 < self.x1 || self.y2 < self.y1
    }

    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x1 && x <= self.x2 && y >= self.y1 && y <= self.y2
    }

    /// Smallest area covering both
    pub fn union(&self, other: &Area) -> Area {
        Area {
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
            x2: self.x2.max(other.x2),
            y2: self.y2.max(other.y2),
        }
    }

    /// Overlap of both, if any
    pub fn intersection(&self, other: &Area) -> Option<Area> {
        let area = Area {
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
            x2: self.x2.min(other.x2),
            y2: self.y2.min(other.y2),
        };
        if area.is_empty() {
            None
        } else {
            Some(area)
        }
    }

    pub fn to_rectangle(&self) -> Rectangle {
        Rectangle::new(
            Point::new(self.x1, self.y1),
            Size::new(self.width(), self.height()),
        )
    }
}
