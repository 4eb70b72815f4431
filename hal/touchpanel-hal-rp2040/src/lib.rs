//! RP2040-specific HAL for the touch panel firmware
//!
//! Implements the shared `touchpanel-hal` traits on top of `embassy-rp`
//! blocking peripherals, and the core's tick source on `embassy-time`:
//!
//! - GPIO output / input wrappers ([`gpio::RpOutput`], [`gpio::RpInput`])
//! - Blocking SPI master over any `embedded-hal` bus ([`spi::RpSpi`])
//! - Millisecond tick source and blocking delay ([`time`])

#![no_std]

pub mod gpio;
pub mod spi;
pub mod time;

pub use gpio::{RpInput, RpOutput};
pub use spi::{spi_config, RpSpi};
pub use time::{EmbassyDelay, EmbassyTick};
