//! Events that trigger screen transitions

/// The screens the firmware knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScreenKind {
    /// Splash screen with the logo
    Logo,
    /// Static information screen
    Info,
}

/// Events that can trigger screen transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScreenEvent {
    /// A handler on `from` asked for `to` to be shown
    ShowRequested { from: ScreenKind, to: ScreenKind },
}
