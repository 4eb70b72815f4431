//! Flush protocol between the renderer and the panel
//!
//! The renderer arms [`FlushReady`] before handing a tile over; the flush
//! side signals it once the transfer has returned. The renderer never
//! writes into the buffer while the flag is armed.

use portable_atomic::{AtomicBool, Ordering};

use crate::geometry::Area;
use crate::traits::PanelWriter;

/// Pixels are stored native-endian and sent high byte first
pub const SWAP_BYTES: bool = true;

/// Render-complete handshake for the shared band buffer
///
/// Atomic so a DMA-completion interrupt could signal it; in this
/// firmware it is signalled synchronously by [`FlushDriver`].
#[derive(Debug)]
pub struct FlushReady {
    ready: AtomicBool,
}

impl Default for FlushReady {
    fn default() -> Self {
        Self::new()
    }
}

impl FlushReady {
    /// A flag with nothing in flight
    pub const fn new() -> Self {
        Self {
            ready: AtomicBool::new(true),
        }
    }

    /// Mark a transfer as in flight
    pub fn arm(&self) {
        self.ready.store(false, Ordering::Release);
    }

    /// Signal the in-flight transfer as complete
    pub fn signal(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Whether the buffer may be rendered into again
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }
}

/// A rendered rectangle ready for the panel
///
/// Only the renderer creates tiles, always from the DisplayBuffer, so
/// `pixels.len() == area.pixel_count() <= capacity` holds by construction.
/// Borrowed for the duration of one flush call.
#[derive(Debug, Clone, Copy)]
pub struct Tile<'a> {
    area: Area,
    pixels: &'a [u16],
}

impl<'a> Tile<'a> {
    pub(crate) fn new(area: Area, pixels: &'a [u16]) -> Self {
        debug_assert_eq!(area.pixel_count(), pixels.len());
        Self { area, pixels }
    }

    pub fn area(&self) -> Area {
        self.area
    }

    pub fn pixels(&self) -> &'a [u16] {
        self.pixels
    }

    /// `(x2-x1+1) * (y2-y1+1)`
    pub fn pixel_count(&self) -> usize {
        self.area.pixel_count()
    }
}

/// Flush callback invoked by the renderer for every tile
pub trait DisplayFlush {
    /// Transmit `tile` and signal `ready` once the transfer is complete
    ///
    /// Must not retain the tile. Forgetting to signal stalls rendering.
    fn flush(&mut self, tile: &Tile<'_>, ready: &FlushReady);
}

/// Streams tiles to a panel over its pixel bus
pub struct FlushDriver<P> {
    panel: P,
    tiles: u32,
    errors: u32,
}

impl<P: PanelWriter> FlushDriver<P> {
    pub fn new(panel: P) -> Self {
        Self {
            panel,
            tiles: 0,
            errors: 0,
        }
    }

    fn transmit(&mut self, tile: &Tile<'_>) -> Result<(), P::Error> {
        let area = tile.area();
        self.panel.start_write()?;
        let result = self
            .panel
            .set_addr_window(
                area.x1 as u16,
                area.y1 as u16,
                area.width() as u16,
                area.height() as u16,
            )
            .and_then(|_| self.panel.push_colors(tile.pixels(), SWAP_BYTES));
        // Always close the session, even after a failed burst
        let end = self.panel.end_write();
        result.and(end)
    }

    /// Tiles transmitted so far
    pub fn tiles(&self) -> u32 {
        self.tiles
    }

    /// Tiles whose transfer reported a bus error
    pub fn errors(&self) -> u32 {
        self.errors
    }

    pub fn panel(&self) -> &P {
        &self.panel
    }

    pub fn panel_mut(&mut self) -> &mut P {
        &mut self.panel
    }
}

impl<P: PanelWriter> DisplayFlush for FlushDriver<P> {
    fn flush(&mut self, tile: &Tile<'_>, ready: &FlushReady) {
        if self.transmit(tile).is_err() {
            self.errors = self.errors.saturating_add(1);
            #[cfg(feature = "defmt")]
            defmt::warn!("Panel transfer failed for {}", tile.area());
        }
        self.tiles = self.tiles.wrapping_add(1);
        // The blocking transfer has returned; the buffer is free again
        ready.signal();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Op {
        Start,
        Window(u16, u16, u16, u16),
        Push(usize, bool),
        End,
    }

    struct FakePanel<'a> {
        ops: heapless::Vec<Op, 16>,
        ready: &'a FlushReady,
        ready_during_push: Option<bool>,
        fail_push: bool,
    }

    impl<'a> FakePanel<'a> {
        fn new(ready: &'a FlushReady) -> Self {
            Self {
                ops: heapless::Vec::new(),
                ready,
                ready_during_push: None,
                fail_push: false,
            }
        }
    }

    impl PanelWriter for FakePanel<'_> {
        type Error = ();

        fn start_write(&mut self) -> Result<(), ()> {
            self.ops.push(Op::Start).map_err(|_| ())
        }

        fn set_addr_window(&mut self, x: u16, y: u16, w: u16, h: u16) -> Result<(), ()> {
            self.ops.push(Op::Window(x, y, w, h)).map_err(|_| ())
        }

        fn push_colors(&mut self, pixels: &[u16], swap_bytes: bool) -> Result<(), ()> {
            self.ready_during_push = Some(self.ready.is_ready());
            self.ops.push(Op::Push(pixels.len(), swap_bytes)).map_err(|_| ())?;
            if self.fail_push {
                Err(())
            } else {
                Ok(())
            }
        }

        fn end_write(&mut self) -> Result<(), ()> {
            self.ops.push(Op::End).map_err(|_| ())
        }
    }

    #[test]
    fn test_flush_session_order() {
        let ready = FlushReady::new();
        let pixels = [0xF800u16; 240 * 2];
        let tile = Tile::new(Area::new(0, 40, 239, 41), &pixels);

        let mut driver = FlushDriver::new(FakePanel::new(&ready));
        ready.arm();
        driver.flush(&tile, &ready);

        assert_eq!(
            driver.panel().ops.as_slice(),
            &[
                Op::Start,
                Op::Window(0, 40, 240, 2),
                Op::Push(480, true),
                Op::End
            ]
        );
        assert_eq!(driver.tiles(), 1);
        assert_eq!(driver.errors(), 0);
    }

    #[test]
    fn test_ready_signalled_only_after_transfer() {
        let ready = FlushReady::new();
        let pixels = [0u16; 12];
        let tile = Tile::new(Area::new(3, 4, 6, 6), &pixels);
        assert_eq!(tile.pixel_count(), 12);

        let mut driver = FlushDriver::new(FakePanel::new(&ready));
        ready.arm();
        driver.flush(&tile, &ready);

        // Still armed while the pixels were being pushed
        assert_eq!(driver.panel().ready_during_push, Some(false));
        assert!(ready.is_ready());
    }

    #[test]
    fn test_failed_transfer_still_closes_and_signals() {
        let ready = FlushReady::new();
        let pixels = [0u16; 4];
        let tile = Tile::new(Area::new(0, 0, 1, 1), &pixels);

        let mut panel = FakePanel::new(&ready);
        panel.fail_push = true;
        let mut driver = FlushDriver::new(panel);
        ready.arm();
        driver.flush(&tile, &ready);

        assert_eq!(driver.panel().ops.last(), Some(&Op::End));
        assert_eq!(driver.errors(), 1);
        assert!(ready.is_ready());
    }

    #[test]
    fn test_flush_ready_handshake() {
        let ready = FlushReady::default();
        assert!(ready.is_ready());
        ready.arm();
        assert!(!ready.is_ready());
        ready.signal();
        assert!(ready.is_ready());
    }
}
