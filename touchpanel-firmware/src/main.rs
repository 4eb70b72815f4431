//! Touch panel firmware
//!
//! Main firmware binary for RP2040 boards driving an ILI9341 TFT with an
//! XPT2046 resistive touch layer. Shows a logo screen that switches to an
//! information screen on the first touch.
//!
//! # Wiring
//!
//! | Signal      | Pin    | Bus  |
//! |-------------|--------|------|
//! | TFT SCK     | GPIO10 | SPI1 |
//! | TFT MOSI    | GPIO11 | SPI1 |
//! | TFT MISO    | GPIO12 | SPI1 |
//! | TFT CS      | GPIO13 |      |
//! | TFT DC      | GPIO14 |      |
//! | TFT RST     | GPIO15 |      |
//! | Touch MISO  | GPIO16 | SPI0 |
//! | Touch CS    | GPIO17 |      |
//! | Touch SCK   | GPIO18 | SPI0 |
//! | Touch MOSI  | GPIO19 | SPI0 |
//! | Touch IRQ   | GPIO21 |      |

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::{SPI0, SPI1};
use embassy_rp::spi::{Blocking, Spi};
use embassy_time::Timer;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use touchpanel_core::App;
use touchpanel_drivers::display::Ili9341;
use touchpanel_drivers::touch::Xpt2046;
use touchpanel_hal::SpiConfig;
use touchpanel_hal_rp2040::{spi_config, EmbassyDelay, EmbassyTick, RpInput, RpOutput, RpSpi};

mod config;
mod selftest;

type Panel = Ili9341<
    RpSpi<Spi<'static, SPI1, Blocking>>,
    RpOutput<'static>,
    RpOutput<'static>,
    RpOutput<'static>,
>;

type Touch = Xpt2046<RpSpi<Spi<'static, SPI0, Blocking>>, RpOutput<'static>, RpInput<'static>>;

type PanelApp = App<EmbassyTick, Touch, Panel, { config::BUFFER_PIXELS }>;

// The app owns the draw buffer; keep it out of the executor's task storage
static APP: StaticCell<PanelApp> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Touch panel firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let panel_config = config::PANEL;

    // Panel on SPI1
    let panel_spi = Spi::new_blocking(
        p.SPI1,
        p.PIN_10,
        p.PIN_11,
        p.PIN_12,
        spi_config(SpiConfig::panel()),
    );
    let mut panel: Panel = Ili9341::new(
        RpSpi::new(panel_spi),
        RpOutput::new(Output::new(p.PIN_13, Level::High)),
        RpOutput::new(Output::new(p.PIN_14, Level::High)),
        RpOutput::new(Output::new(p.PIN_15, Level::High)),
        panel_config.display.rotation.index(),
    );
    match panel.init(&mut EmbassyDelay) {
        Ok(()) => info!(
            "Panel initialized: {}x{}, rotation {}",
            panel.width(),
            panel.height(),
            panel.rotation()
        ),
        Err(e) => error!("Panel init failed: {}", Debug2Format(&e)),
    }
    if (panel.width(), panel.height()) != (panel_config.display.width, panel_config.display.height)
    {
        warn!(
            "Panel is {}x{} but panel.toml says {}x{}",
            panel.width(),
            panel.height(),
            panel_config.display.width,
            panel_config.display.height
        );
    }

    selftest::color_sweep(&mut panel, config::SELF_TEST_STEP_MS).await;
    info!("Self test done");

    // Touch controller on SPI0
    let touch_spi = Spi::new_blocking(
        p.SPI0,
        p.PIN_18,
        p.PIN_19,
        p.PIN_16,
        spi_config(SpiConfig::touch()),
    );
    let mut touch: Touch = Xpt2046::new(
        RpSpi::new(touch_spi),
        RpOutput::new(Output::new(p.PIN_17, Level::High)),
        RpInput::new(Input::new(p.PIN_21, Pull::Up)),
        panel_config.touch.rotation,
        panel_config.touch.z_threshold,
    );
    if let Err(e) = touch.begin() {
        warn!("Touch controller not responding: {}", Debug2Format(&e));
    }
    info!(
        "Touch initialized: rotation {}, threshold {}",
        panel_config.touch.rotation, panel_config.touch.z_threshold
    );

    let app = APP.init(unwrap!(PanelApp::new(
        &panel_config,
        EmbassyTick,
        touch,
        panel
    )));
    info!("Screens constructed, showing {}", app.state());

    loop {
        app.step();
        Timer::after_millis(panel_config.loop_delay_ms as u64).await;
    }
}
