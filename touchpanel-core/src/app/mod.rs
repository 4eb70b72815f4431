//! Application context
//!
//! Owns every piece of the running system: the tick source, the input
//! poller, the flush driver, the engine with both screens, and the
//! screen state. The main loop only ever calls [`App::step`].

pub mod assets;
pub mod ui;

use crate::config::PanelConfig;
use crate::display::FlushDriver;
use crate::engine::{
    Action, Dispatched, Engine, EngineError, EventKind, HandlerReport, ScreenId, ShowScreen,
};
use crate::state::{ScreenEvent, ScreenKind, ScreenState};
use crate::touch::{CoordinateMapper, InputPoller};
use crate::traits::{PanelWriter, TickSource, TouchSensor};

/// Engine handles of the two screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UiScreens {
    pub logo: ScreenId,
    pub info: ScreenId,
}

impl UiScreens {
    pub fn id(&self, kind: ScreenKind) -> ScreenId {
        match kind {
            ScreenKind::Logo => self.logo,
            ScreenKind::Info => self.info,
        }
    }

    pub fn kind(&self, id: ScreenId) -> Option<ScreenKind> {
        if id == self.logo {
            Some(ScreenKind::Logo)
        } else if id == self.info {
            Some(ScreenKind::Info)
        } else {
            None
        }
    }
}

/// The running system
///
/// `BUF` is the DisplayBuffer capacity in pixels (`width * buffer_rows`).
pub struct App<T, S, P, const BUF: usize> {
    tick: T,
    poller: InputPoller<S>,
    flush: FlushDriver<P>,
    engine: Engine<ShowScreen, BUF>,
    screens: UiScreens,
    state: ScreenState,
}

impl<T, S, P, const BUF: usize> App<T, S, P, BUF>
where
    T: TickSource,
    S: TouchSensor,
    P: PanelWriter,
{
    /// Build both screens, wire the Logo press handler and show the logo
    pub fn new(config: &PanelConfig, tick: T, sensor: S, panel: P) -> Result<Self, EngineError> {
        let mut engine = Engine::new(&config.display)?;

        // The transition target must exist before anything is shown
        let info = engine.create_screen(ui::info_screen()?)?;
        let logo = engine.create_screen(ui::logo_screen()?)?;
        engine.subscribe(logo, EventKind::Pressed, ShowScreen::new(info))?;

        let screens = UiScreens { logo, info };
        let state = ScreenState::INITIAL;
        engine.load_screen(screens.id(state.screen()))?;

        let mapper = CoordinateMapper::new(
            config.touch.calibration,
            config.display.width,
            config.display.height,
        );

        Ok(Self {
            tick,
            poller: InputPoller::new(sensor, mapper),
            flush: FlushDriver::new(panel),
            engine,
            screens,
            state,
        })
    }

    /// One main loop iteration: run the engine handler and apply the
    /// actions its handlers returned
    pub fn step(&mut self) -> HandlerReport {
        let report = self
            .engine
            .timer_handler(&mut self.tick, &mut self.poller, &mut self.flush);

        for dispatched in &report.dispatched {
            self.apply(dispatched);
        }
        report
    }

    fn apply(&mut self, dispatched: &Dispatched) {
        let Action::LoadScreen(target) = dispatched.action else {
            return;
        };
        let (Some(from), Some(to)) = (
            self.screens.kind(dispatched.screen),
            self.screens.kind(target),
        ) else {
            return;
        };

        let next = self.state.transition(ScreenEvent::ShowRequested { from, to });
        if next == self.state {
            return;
        }

        match self.engine.load_screen(target) {
            Ok(()) => {
                #[cfg(feature = "defmt")]
                defmt::info!("Screen {} -> {}", self.state, next);
                self.state = next;
            }
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::error!("Failed to load {}: {}", to, _e);
            }
        }
    }

    pub fn state(&self) -> ScreenState {
        self.state
    }

    /// Screen the engine is currently rendering
    pub fn active_screen(&self) -> Option<ScreenKind> {
        self.engine
            .active_screen()
            .and_then(|id| self.screens.kind(id))
    }

    pub fn screens(&self) -> UiScreens {
        self.screens
    }

    pub fn engine(&self) -> &Engine<ShowScreen, BUF> {
        &self.engine
    }

    pub fn poller(&self) -> &InputPoller<S> {
        &self.poller
    }

    pub fn poller_mut(&mut self) -> &mut InputPoller<S> {
        &mut self.poller
    }

    pub fn flush_driver(&self) -> &FlushDriver<P> {
        &self.flush
    }

    pub fn panel_mut(&mut self) -> &mut P {
        self.flush.panel_mut()
    }

    pub fn tick_mut(&mut self) -> &mut T {
        &mut self.tick
    }
}
