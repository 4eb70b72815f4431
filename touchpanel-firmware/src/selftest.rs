//! Start-up colour sweep
//!
//! Fills the whole panel red, green, blue and finally black so a wiring
//! or init fault is visible before the UI comes up.

use defmt::*;
use embassy_time::Timer;
use touchpanel_drivers::display::Ili9341;
use touchpanel_hal::{OutputPin, SpiBus};

const SWEEP: [(u16, &str); 4] = [
    (0xF800, "red"),
    (0x07E0, "green"),
    (0x001F, "blue"),
    (0x0000, "black"),
];

pub async fn color_sweep<SPI, CS, DC, RST>(panel: &mut Ili9341<SPI, CS, DC, RST>, step_ms: u32)
where
    SPI: SpiBus,
    SPI::Error: core::fmt::Debug,
    CS: OutputPin,
    DC: OutputPin,
    RST: OutputPin,
{
    for (i, (color, name)) in SWEEP.iter().enumerate() {
        debug!("Self test: {}", name);
        if let Err(e) = panel.fill_screen(*color) {
            warn!("Self test fill failed: {}", Debug2Format(&e));
            return;
        }
        if i + 1 < SWEEP.len() {
            Timer::after_millis(step_ms as u64).await;
        }
    }
}
