//! Build-time configuration types
//!
//! Every value here is fixed when the firmware is built: the firmware's
//! build script validates `panel.toml` and turns it into constants that
//! are fed into these types. Nothing is configurable at runtime.

pub mod display;
pub mod touch;

pub use display::{DisplayConfig, Rotation};
pub use touch::{CalibrationError, TouchCalibration, TouchConfig};

/// Complete panel configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanelConfig {
    /// Display geometry and partial-render buffer
    pub display: DisplayConfig,
    /// Touch controller calibration
    pub touch: TouchConfig,
    /// Idle delay between main loop iterations in milliseconds
    pub loop_delay_ms: u32,
}

impl PanelConfig {
    /// Reference device: 240x320 ILI9341 with an XPT2046 touch layer
    pub const REFERENCE: Self = Self {
        display: DisplayConfig::REFERENCE,
        touch: TouchConfig::REFERENCE,
        loop_delay_ms: 5,
    };
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self::REFERENCE
    }
}
