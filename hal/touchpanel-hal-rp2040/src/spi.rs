//! Blocking SPI master

use embassy_rp::spi::{Config, Phase as RpPhase, Polarity as RpPolarity};
use touchpanel_hal::spi::{Phase, Polarity, SpiConfig};
use touchpanel_hal::SpiBus;

/// Build an embassy-rp SPI configuration
pub fn spi_config(config: SpiConfig) -> Config {
    let (polarity, phase): (Polarity, Phase) = config.mode.into();
    let mut rp = Config::default();
    rp.frequency = config.frequency;
    rp.polarity = match polarity {
        Polarity::IdleLow => RpPolarity::IdleLow,
        Polarity::IdleHigh => RpPolarity::IdleHigh,
    };
    rp.phase = match phase {
        Phase::CaptureOnFirstTransition => RpPhase::CaptureOnFirstTransition,
        Phase::CaptureOnSecondTransition => RpPhase::CaptureOnSecondTransition,
    };
    rp
}

/// Adapts a blocking `embedded-hal` SPI bus (such as `embassy_rp::spi::Spi`
/// in blocking mode) to [`SpiBus`]
///
/// Chip select is driven by the drivers, so the bus is used directly
/// rather than through an `SpiDevice`.
pub struct RpSpi<B>(B);

impl<B> RpSpi<B> {
    pub fn new(bus: B) -> Self {
        Self(bus)
    }
}

impl<B: embedded_hal::spi::SpiBus<u8>> SpiBus for RpSpi<B> {
    type Error = B::Error;

    fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
        self.0.transfer(read, write)?;
        // Chip select may be released right after this returns
        self.0.flush()
    }

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.0.write(data)?;
        self.0.flush()
    }
}
