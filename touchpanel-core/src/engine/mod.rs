//! Retained-mode engine integration
//!
//! A small stand-in for a GUI library: owns the screens, the pointer
//! pipeline, the subscriptions and the band renderer, and is driven by
//! periodic calls to [`Engine::timer_handler`] from the main loop.
//!
//! Handlers never touch the engine themselves; the actions they return
//! are reported back in the [`HandlerReport`] and applied by the
//! application context.

pub mod clock;
pub mod event;
pub mod pointer;
pub mod render;
pub mod screen;

pub use clock::{Clock, Timer};
pub use event::{Action, Dispatched, EventHandler, ShowScreen, Subscription};
pub use pointer::{EventKind, PointerTracker};
pub use render::{draw_screen, BandTarget};
pub use screen::{Align, Image, ImageAsset, Label, Screen, ScreenId, Widget, ZOOM_NONE};

use heapless::Vec;

use crate::config::DisplayConfig;
use crate::display::{DisplayBuffer, DisplayFlush, FlushReady, Tile};
use crate::geometry::Area;
use crate::traits::{PointerInput, TickSource};

/// Input device read period
pub const INPUT_READ_PERIOD_MS: u64 = 30;

/// Display refresh period
pub const REFRESH_PERIOD_MS: u64 = 33;

/// Maximum screens the engine can hold
pub const MAX_SCREENS: usize = 4;

/// Maximum event subscriptions across all screens
pub const MAX_SUBSCRIPTIONS: usize = 8;

/// Maximum actions reported from one handler call
pub const MAX_DISPATCHED: usize = 4;

/// Engine errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EngineError {
    /// Display has no pixels
    EmptyDisplay,
    /// Draw buffer cannot hold a single display row
    BufferTooSmall,
    /// Draw buffer size differs from `width * buffer_rows`
    BufferMismatch,
    /// Screen table is full
    TooManyScreens,
    /// Widget list of a screen is full
    TooManyWidgets,
    /// Subscription table is full
    TooManySubscriptions,
    /// Screen handle does not belong to this engine
    UnknownScreen,
}

/// Result of one refresh pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RefreshOutcome {
    /// Nothing to redraw
    Idle,
    /// The invalid area was fully flushed
    Complete { tiles: u32 },
    /// A flush was still unacknowledged; the rest is left for later
    Stalled { tiles: u32 },
}

/// What happened during one [`Engine::timer_handler`] call
#[derive(Debug, Clone)]
pub struct HandlerReport {
    /// Engine time of this call
    pub now_ms: u64,
    /// Actions returned by handlers, in dispatch order
    pub dispatched: Vec<Dispatched, MAX_DISPATCHED>,
    /// Outcome of the refresh timer, if it fired
    pub refresh: Option<RefreshOutcome>,
    /// Milliseconds until the next timer is due
    pub next_due_ms: u64,
}

/// Running counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EngineStats {
    /// Completed full passes over an invalid area
    pub frames: u32,
    /// Tiles handed to the flush callback
    pub tiles: u32,
    /// Refresh passes that stopped on an unacknowledged flush
    pub stalls: u32,
    /// Input device reads
    pub input_reads: u32,
}

/// The engine, generic over the handler type and the draw buffer size
pub struct Engine<H, const BUF: usize> {
    width: u16,
    height: u16,
    clock: Clock,
    input_timer: Timer,
    refresh_timer: Timer,
    pointer: PointerTracker,
    screens: Vec<Screen, MAX_SCREENS>,
    subscriptions: Vec<Subscription<H>, MAX_SUBSCRIPTIONS>,
    active: Option<ScreenId>,
    invalid: Option<Area>,
    buffer: DisplayBuffer<BUF>,
    ready: FlushReady,
    stats: EngineStats,
}

impl<H: EventHandler, const BUF: usize> Engine<H, BUF> {
    /// Create an engine for the given display
    ///
    /// `BUF` must hold at least one full display row and match the
    /// configured band exactly.
    pub fn new(display: &DisplayConfig) -> Result<Self, EngineError> {
        if display.width == 0 || display.height == 0 {
            return Err(EngineError::EmptyDisplay);
        }
        if BUF < display.width as usize {
            return Err(EngineError::BufferTooSmall);
        }
        if BUF != display.buffer_pixels() {
            return Err(EngineError::BufferMismatch);
        }

        Ok(Self {
            width: display.width,
            height: display.height,
            clock: Clock::new(),
            input_timer: Timer::new(INPUT_READ_PERIOD_MS),
            refresh_timer: Timer::new(REFRESH_PERIOD_MS),
            pointer: PointerTracker::new(display.width, display.height),
            screens: Vec::new(),
            subscriptions: Vec::new(),
            active: None,
            invalid: None,
            buffer: DisplayBuffer::new(),
            ready: FlushReady::new(),
            stats: EngineStats::default(),
        })
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Draw buffer capacity in pixels
    pub fn buffer_capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Take ownership of a screen and return its handle
    pub fn create_screen(&mut self, screen: Screen) -> Result<ScreenId, EngineError> {
        let id = ScreenId::new(self.screens.len() as u8);
        self.screens
            .push(screen)
            .map_err(|_| EngineError::TooManyScreens)?;
        Ok(id)
    }

    pub fn screen(&self, id: ScreenId) -> Option<&Screen> {
        self.screens.get(id.index())
    }

    /// Register `handler` for `event` on `screen`
    pub fn subscribe(
        &mut self,
        screen: ScreenId,
        event: EventKind,
        handler: H,
    ) -> Result<(), EngineError> {
        if self.screen(screen).is_none() {
            return Err(EngineError::UnknownScreen);
        }
        self.subscriptions
            .push(Subscription {
                screen,
                event,
                handler,
            })
            .map_err(|_| EngineError::TooManySubscriptions)
    }

    /// Make `id` the active screen and schedule a full redraw
    pub fn load_screen(&mut self, id: ScreenId) -> Result<(), EngineError> {
        if self.screen(id).is_none() {
            return Err(EngineError::UnknownScreen);
        }
        self.active = Some(id);
        self.invalidate(Area::of_display(self.width, self.height));
        Ok(())
    }

    pub fn active_screen(&self) -> Option<ScreenId> {
        self.active
    }

    /// Mark an area for redraw, clipped to the display
    pub fn invalidate(&mut self, area: Area) {
        let Some(area) = area.intersection(&Area::of_display(self.width, self.height)) else {
            return;
        };
        self.invalid = Some(match self.invalid {
            Some(pending) => pending.union(&area),
            None => area,
        });
    }

    /// Area still waiting to be redrawn
    pub fn invalid_area(&self) -> Option<Area> {
        self.invalid
    }

    /// Completion flag shared with the flush callback
    pub fn flush_ready(&self) -> &FlushReady {
        &self.ready
    }

    pub fn pointer(&self) -> &PointerTracker {
        &self.pointer
    }

    pub fn stats(&self) -> EngineStats {
        self.stats
    }

    /// Run the engine's periodic work
    ///
    /// Reads the tick source once, then services the input timer (poll
    /// the pointer, dispatch edge events) and the refresh timer (render
    /// and flush the invalid area) when they are due.
    pub fn timer_handler<T, I, F>(
        &mut self,
        tick: &mut T,
        input: &mut I,
        flush: &mut F,
    ) -> HandlerReport
    where
        T: TickSource,
        I: PointerInput,
        F: DisplayFlush,
    {
        let now_ms = self.clock.update(tick.now_ms());
        let mut dispatched = Vec::new();

        if self.input_timer.poll(now_ms) {
            self.stats.input_reads = self.stats.input_reads.wrapping_add(1);
            let event = input.poll();
            for kind in self.pointer.update(event) {
                self.dispatch_into(kind, &mut dispatched);
            }
        }

        let refresh = if self.refresh_timer.poll(now_ms) {
            Some(self.refresh(flush))
        } else {
            None
        };

        let next_due_ms = self
            .input_timer
            .remaining(now_ms)
            .min(self.refresh_timer.remaining(now_ms));

        HandlerReport {
            now_ms,
            dispatched,
            refresh,
            next_due_ms,
        }
    }

    /// Deliver `event` to the active screen's subscribers
    pub fn dispatch(&mut self, event: EventKind) -> Vec<Dispatched, MAX_DISPATCHED> {
        let mut out = Vec::new();
        self.dispatch_into(event, &mut out);
        out
    }

    fn dispatch_into(&mut self, event: EventKind, out: &mut Vec<Dispatched, MAX_DISPATCHED>) {
        let Some(screen) = self.active else {
            return;
        };
        for sub in self
            .subscriptions
            .iter_mut()
            .filter(|s| s.screen == screen && s.event == event)
        {
            let action = sub.handler.on(event);
            if action == Action::None {
                continue;
            }
            if out
                .push(Dispatched {
                    screen,
                    event,
                    action,
                })
                .is_err()
            {
                #[cfg(feature = "defmt")]
                defmt::warn!("Dropped action {} for {}", action, event);
            }
        }
    }

    /// Render the invalid area band by band and flush each band
    ///
    /// A band is only rendered once the previous flush has signalled
    /// [`FlushReady`]; otherwise the pass stops and the remaining area
    /// stays invalid.
    pub fn refresh<F: DisplayFlush>(&mut self, flush: &mut F) -> RefreshOutcome {
        let Some(active) = self.active else {
            return RefreshOutcome::Idle;
        };
        let Some(mut area) = self.invalid else {
            return RefreshOutcome::Idle;
        };

        let rows = self.buffer.rows_for_width(area.width()).max(1) as i32;
        let mut tiles = 0;

        loop {
            if !self.ready.is_ready() {
                self.stats.stalls = self.stats.stalls.wrapping_add(1);
                return RefreshOutcome::Stalled { tiles };
            }

            let band_y2 = (area.y1 + rows - 1).min(area.y2);
            let band = Area::new(area.x1, area.y1, area.x2, band_y2);

            let (Some(screen), Some(pixels)) = (
                self.screens.get(active.index()),
                self.buffer.band_mut(band.pixel_count()),
            ) else {
                return RefreshOutcome::Idle;
            };

            {
                let mut target = BandTarget::new(&mut *pixels, band);
                if let Err(never) = draw_screen(screen, self.width, self.height, &mut target) {
                    match never {}
                }
            }

            self.ready.arm();
            flush.flush(&Tile::new(band, pixels), &self.ready);
            tiles += 1;
            self.stats.tiles = self.stats.tiles.wrapping_add(1);

            if band_y2 >= area.y2 {
                self.invalid = None;
                self.stats.frames = self.stats.frames.wrapping_add(1);
                return RefreshOutcome::Complete { tiles };
            }
            area.y1 = band_y2 + 1;
            self.invalid = Some(area);
        }
    }
}
