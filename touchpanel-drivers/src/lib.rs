//! Chip drivers
//!
//! Concrete implementations of the touchpanel-core hardware traits,
//! written against the chip-agnostic `touchpanel-hal` bus and pin traits:
//!
//! - ILI9341 TFT controller ([`display::Ili9341`], a `PanelWriter`)
//! - XPT2046 resistive touch controller ([`touch::Xpt2046`], a `TouchSensor`)

#![no_std]
#![deny(unsafe_code)]

pub mod display;
pub mod touch;
