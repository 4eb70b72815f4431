//! Event dispatch interface
//!
//! Handlers are plain values subscribed against a screen handle and an
//! event kind. They return an [`Action`] instead of mutating anything,
//! and the application context applies it.

use super::pointer::EventKind;
use super::screen::ScreenId;

/// What a handler asks the application to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    /// Nothing
    None,
    /// Make the given screen active
    LoadScreen(ScreenId),
}

/// Reacts to events on the screen it is subscribed to
pub trait EventHandler {
    fn on(&mut self, event: EventKind) -> Action;
}

/// A handler bound to one screen and one event kind
#[derive(Debug, Clone, Copy)]
pub struct Subscription<H> {
    pub screen: ScreenId,
    pub event: EventKind,
    pub handler: H,
}

/// An action produced during dispatch, with its origin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Dispatched {
    /// Screen the event was delivered to
    pub screen: ScreenId,
    pub event: EventKind,
    pub action: Action,
}

/// Loads a fixed target screen whenever it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ShowScreen {
    target: ScreenId,
}

impl ShowScreen {
    pub const fn new(target: ScreenId) -> Self {
        Self { target }
    }

    pub const fn target(&self) -> ScreenId {
        self.target
    }
}

impl EventHandler for ShowScreen {
    fn on(&mut self, _event: EventKind) -> Action {
        Action::LoadScreen(self.target)
    }
}
