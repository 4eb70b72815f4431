//! State machine definition

use super::events::{ScreenEvent, ScreenKind};

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScreenState {
    /// Splash screen, waiting for the first press
    ShowingLogo,
    /// Information screen; nothing leaves this state
    ShowingInfo,
}

impl ScreenState {
    pub const INITIAL: Self = ScreenState::ShowingLogo;

    /// Screen displayed in this state
    pub fn screen(&self) -> ScreenKind {
        match self {
            ScreenState::ShowingLogo => ScreenKind::Logo,
            ScreenState::ShowingInfo => ScreenKind::Info,
        }
    }

    /// Check if no further transition can happen
    pub fn is_terminal(&self) -> bool {
        matches!(self, ScreenState::ShowingInfo)
    }

    /// Process an event and return the next state
    ///
    /// Requests that do not originate from the screen currently showing
    /// are ignored.
    pub fn transition(self, event: ScreenEvent) -> Self {
        use ScreenState::*;

        match (self, event) {
            (
                ShowingLogo,
                ScreenEvent::ShowRequested {
                    from: ScreenKind::Logo,
                    to: ScreenKind::Info,
                },
            ) => ShowingInfo,

            // No other transitions
            (state, _) => state,
        }
    }
}

impl Default for ScreenState {
    fn default() -> Self {
        Self::INITIAL
    }
}
