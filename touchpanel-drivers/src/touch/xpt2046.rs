//! XPT2046 resistive touch controller (SPI)
//!
//! Each conversion is one 3-byte transfer: a control byte, then the
//! 12-bit result clocked out MSB first in the following two bytes.
//!
//! # Pressure
//!
//! Pressure is estimated from the two Z conversions as
//! `z1 + 4095 - z2`; readings below the threshold are not touches.
//! A pressure accepted by `touched()` is reused by the `sample()` that
//! follows it instead of being converted again.
//!
//! # Noise
//!
//! The first X conversion after the Z pair is discarded, then three
//! conversions per axis are taken and the closest two averaged.

use touchpanel_core::traits::{TouchSample, TouchSensor};
use touchpanel_hal::{InputPin, OutputPin, SpiBus};

/// Control bytes (start bit, channel, 12-bit differential mode)
pub mod ctrl {
    /// Z1 pressure conversion
    pub const Z1: u8 = 0xB1;
    /// Z2 pressure conversion
    pub const Z2: u8 = 0xC1;
    /// X position conversion
    pub const X: u8 = 0x91;
    /// Y position conversion
    pub const Y: u8 = 0xD1;
    /// Y conversion, then power down with PENIRQ enabled
    pub const Y_POWER_DOWN: u8 = 0xD0;
}

/// Full-scale 12-bit reading
pub const MAX_RAW: u16 = 4095;

/// Default pressure threshold
pub const DEFAULT_Z_THRESHOLD: u16 = 300;

/// XPT2046 errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Xpt2046Error<E> {
    /// SPI transfer failed
    Spi(E),
}

/// Average of the two closest of three readings
pub fn best_two_average(a: u16, b: u16, c: u16) -> u16 {
    let ab = a.abs_diff(b);
    let ac = a.abs_diff(c);
    let bc = b.abs_diff(c);

    let sum = if ab <= ac && ab <= bc {
        a as u32 + b as u32
    } else if ac <= ab && ac <= bc {
        a as u32 + c as u32
    } else {
        b as u32 + c as u32
    };
    (sum >> 1) as u16
}

/// Apply the rotation index (0-3) to a raw reading
pub fn rotate(x: u16, y: u16, rotation: u8) -> (u16, u16) {
    let (x, y) = (x.min(MAX_RAW), y.min(MAX_RAW));
    match rotation % 4 {
        0 => (MAX_RAW - y, x),
        1 => (x, y),
        2 => (y, MAX_RAW - x),
        _ => (MAX_RAW - x, MAX_RAW - y),
    }
}

/// XPT2046 driver
pub struct Xpt2046<SPI, CS, IRQ> {
    spi: SPI,
    cs: CS,
    irq: IRQ,
    rotation: u8,
    z_threshold: u16,
    /// Last accepted position, reported while pressure is too low
    last: (u16, u16),
    /// Pressure from `touched()`, consumed by the next `sample()`
    pending_z: Option<u16>,
}

impl<SPI, CS, IRQ> Xpt2046<SPI, CS, IRQ>
where
    SPI: SpiBus,
    CS: OutputPin,
    IRQ: InputPin,
{
    pub fn new(spi: SPI, mut cs: CS, irq: IRQ, rotation: u8, z_threshold: u16) -> Self {
        cs.set_high();
        Self {
            spi,
            cs,
            irq,
            rotation: rotation % 4,
            z_threshold,
            last: (0, 0),
            pending_z: None,
        }
    }

    /// Put the controller in power-down with PENIRQ enabled
    pub fn begin(&mut self) -> Result<(), Xpt2046Error<SPI::Error>> {
        self.session(|dev| dev.convert(ctrl::Y_POWER_DOWN).map(|_| ()))
    }

    pub fn set_rotation(&mut self, rotation: u8) {
        self.rotation = rotation % 4;
    }

    pub fn rotation(&self) -> u8 {
        self.rotation
    }

    pub fn z_threshold(&self) -> u16 {
        self.z_threshold
    }

    /// Run `f` with chip select asserted
    fn session<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, Xpt2046Error<SPI::Error>>,
    ) -> Result<T, Xpt2046Error<SPI::Error>> {
        self.cs.set_low();
        let result = f(self);
        self.cs.set_high();
        result
    }

    /// One conversion
    fn convert(&mut self, control: u8) -> Result<u16, Xpt2046Error<SPI::Error>> {
        let mut rx = [0u8; 3];
        self.spi
            .transfer(&mut rx, &[control, 0, 0])
            .map_err(Xpt2046Error::Spi)?;
        Ok((((rx[1] as u16) << 8) | rx[2] as u16) >> 3)
    }

    fn pressure(&mut self) -> Result<u16, Xpt2046Error<SPI::Error>> {
        let z1 = self.convert(ctrl::Z1)?;
        let z2 = self.convert(ctrl::Z2)?;
        Ok((z1 as i32 + MAX_RAW as i32 - z2 as i32).max(0) as u16)
    }

    /// Pressure reading, leaving the controller powered down
    pub fn read_z(&mut self) -> Result<u16, Xpt2046Error<SPI::Error>> {
        self.session(|dev| {
            let z = dev.pressure()?;
            dev.convert(ctrl::Y_POWER_DOWN)?;
            Ok(z)
        })
    }

    fn read(&mut self) -> Result<TouchSample, Xpt2046Error<SPI::Error>> {
        let z = match self.pending_z.take() {
            Some(z) => z,
            None => self.pressure()?,
        };
        if z < self.z_threshold {
            self.convert(ctrl::Y_POWER_DOWN)?;
            let (x, y) = self.last;
            return Ok(TouchSample {
                x,
                y,
                z: 0,
                touched: false,
            });
        }

        // First position conversion after the Z pair is noisy
        self.convert(ctrl::X)?;
        let x0 = self.convert(ctrl::X)?;
        let y0 = self.convert(ctrl::Y)?;
        let x1 = self.convert(ctrl::X)?;
        let y1 = self.convert(ctrl::Y)?;
        let x2 = self.convert(ctrl::X)?;
        let y2 = self.convert(ctrl::Y_POWER_DOWN)?;

        let x = best_two_average(x0, x1, x2);
        let y = best_two_average(y0, y1, y2);
        let (x, y) = rotate(x, y, self.rotation);
        self.last = (x, y);

        Ok(TouchSample {
            x,
            y,
            z,
            touched: true,
        })
    }
}

impl<SPI, CS, IRQ> TouchSensor for Xpt2046<SPI, CS, IRQ>
where
    SPI: SpiBus,
    CS: OutputPin,
    IRQ: InputPin,
{
    type Error = Xpt2046Error<SPI::Error>;

    fn irq_asserted(&mut self) -> bool {
        // PENIRQ is open-drain, pulled low while the panel is pressed
        self.irq.is_low()
    }

    fn touched(&mut self) -> Result<bool, Self::Error> {
        self.pending_z = None;
        let z = self.read_z()?;
        let touched = z >= self.z_threshold;
        if touched {
            self.pending_z = Some(z);
        }
        Ok(touched)
    }

    fn sample(&mut self) -> Result<TouchSample, Self::Error> {
        self.session(Self::read)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::{Deque, Vec};

    /// Answers each control byte from a per-channel script
    struct FakeSpi {
        z1: u16,
        z2: u16,
        xs: Deque<u16, 8>,
        ys: Deque<u16, 8>,
        sent: Vec<u8, 32>,
        fail: bool,
    }

    impl FakeSpi {
        fn pressed(z1: u16, z2: u16, xs: &[u16], ys: &[u16]) -> Self {
            let mut spi = Self {
                z1,
                z2,
                xs: Deque::new(),
                ys: Deque::new(),
                sent: Vec::new(),
                fail: false,
            };
            for &x in xs {
                let _ = spi.xs.push_back(x);
            }
            for &y in ys {
                let _ = spi.ys.push_back(y);
            }
            spi
        }
    }

    impl SpiBus for FakeSpi {
        type Error = ();

        fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), ()> {
            if self.fail {
                return Err(());
            }
            let control = write[0];
            let _ = self.sent.push(control);
            let value = match control {
                ctrl::Z1 => self.z1,
                ctrl::Z2 => self.z2,
                ctrl::X => self.xs.pop_front().unwrap_or(0),
                ctrl::Y | ctrl::Y_POWER_DOWN => self.ys.pop_front().unwrap_or(0),
                _ => 0,
            };
            let raw = value << 3;
            read[0] = 0;
            read[1] = (raw >> 8) as u8;
            read[2] = raw as u8;
            Ok(())
        }

        fn write(&mut self, _data: &[u8]) -> Result<(), ()> {
            Ok(())
        }
    }

    #[derive(Default)]
    struct Cs {
        high: bool,
        toggles: u32,
    }

    impl OutputPin for Cs {
        fn set_high(&mut self) {
            self.high = true;
            self.toggles += 1;
        }

        fn set_low(&mut self) {
            self.high = false;
            self.toggles += 1;
        }

        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    struct Irq(bool);

    impl InputPin for Irq {
        fn is_high(&self) -> bool {
            self.0
        }
    }

    #[test]
    fn test_best_two_average() {
        assert_eq!(best_two_average(100, 102, 400), 101);
        assert_eq!(best_two_average(400, 100, 104), 102);
        assert_eq!(best_two_average(10, 500, 12), 11);
        assert_eq!(best_two_average(7, 7, 7), 7);
    }

    #[test]
    fn test_rotation_indices() {
        assert_eq!(rotate(100, 200, 0), (3895, 100));
        assert_eq!(rotate(100, 200, 1), (100, 200));
        assert_eq!(rotate(100, 200, 2), (200, 3995));
        assert_eq!(rotate(100, 200, 3), (3995, 3895));
    }

    #[test]
    fn test_irq_is_active_low() {
        let spi = FakeSpi::pressed(0, 0, &[], &[]);
        let mut touch = Xpt2046::new(spi, Cs::default(), Irq(true), 1, 300);
        assert!(!touch.irq_asserted());
        touch.irq = Irq(false);
        assert!(touch.irq_asserted());
    }

    #[test]
    fn test_pressure_threshold() {
        // z = 500 + 4095 - 4200 = 395
        let spi = FakeSpi::pressed(500, 4200, &[], &[]);
        let mut touch = Xpt2046::new(spi, Cs::default(), Irq(false), 1, DEFAULT_Z_THRESHOLD);
        assert_eq!(touch.read_z(), Ok(395));
        assert_eq!(touch.touched(), Ok(true));

        let spi = FakeSpi::pressed(100, 4000, &[], &[]);
        let mut touch = Xpt2046::new(spi, Cs::default(), Irq(false), 1, DEFAULT_Z_THRESHOLD);
        assert_eq!(touch.touched(), Ok(false));
        assert!(touch.cs.is_set_high());
    }

    #[test]
    fn test_sample_averages_and_rotates() {
        // Dummy X, then three X and three Y readings
        let spi = FakeSpi::pressed(600, 3800, &[9, 1000, 1004, 1600], &[2000, 2600, 2010]);
        let mut touch = Xpt2046::new(spi, Cs::default(), Irq(false), 2, 300);

        let sample = touch.sample().unwrap();
        // x = 1002, y = 2005; rotation 2 gives (y, 4095 - x)
        assert_eq!(
            sample,
            TouchSample {
                x: 2005,
                y: 3093,
                z: 895,
                touched: true,
            }
        );
        assert_eq!(
            touch.spi.sent.as_slice(),
            &[
                ctrl::Z1,
                ctrl::Z2,
                ctrl::X,
                ctrl::X,
                ctrl::Y,
                ctrl::X,
                ctrl::Y,
                ctrl::X,
                ctrl::Y_POWER_DOWN
            ]
        );
        // One session: low then high, after the initial high in new()
        assert_eq!(touch.cs.toggles, 3);
        assert!(touch.cs.is_set_high());
    }

    #[test]
    fn test_sample_after_touched_reuses_pressure() {
        // The first Y is the power-down conversion closing touched()
        let spi = FakeSpi::pressed(600, 3800, &[9, 1000, 1004, 1600], &[0, 2000, 2600, 2010]);
        let mut touch = Xpt2046::new(spi, Cs::default(), Irq(false), 2, 300);

        assert_eq!(touch.touched(), Ok(true));
        let sample = touch.sample().unwrap();
        assert_eq!(sample.z, 895);
        assert_eq!((sample.x, sample.y), (2005, 3093));
        assert_eq!(
            touch.spi.sent.as_slice(),
            &[
                ctrl::Z1,
                ctrl::Z2,
                ctrl::Y_POWER_DOWN,
                ctrl::X,
                ctrl::X,
                ctrl::Y,
                ctrl::X,
                ctrl::Y,
                ctrl::X,
                ctrl::Y_POWER_DOWN
            ]
        );

        // Cached value is used once; the next sample converts again
        touch.spi.sent.clear();
        touch.spi.z1 = 0;
        let sample = touch.sample().unwrap();
        assert!(!sample.touched);
        assert_eq!(
            touch.spi.sent.as_slice(),
            &[ctrl::Z1, ctrl::Z2, ctrl::Y_POWER_DOWN]
        );
    }

    #[test]
    fn test_light_touch_is_not_cached() {
        let spi = FakeSpi::pressed(100, 4000, &[], &[]);
        let mut touch = Xpt2046::new(spi, Cs::default(), Irq(false), 1, 300);
        assert_eq!(touch.touched(), Ok(false));

        touch.spi.sent.clear();
        let sample = touch.sample().unwrap();
        assert!(!sample.touched);
        assert_eq!(
            touch.spi.sent.as_slice(),
            &[ctrl::Z1, ctrl::Z2, ctrl::Y_POWER_DOWN]
        );
    }

    #[test]
    fn test_light_touch_keeps_last_position() {
        let spi = FakeSpi::pressed(600, 3800, &[0, 100, 100, 100], &[200, 200, 200]);
        let mut touch = Xpt2046::new(spi, Cs::default(), Irq(false), 1, 300);
        touch.sample().unwrap();

        touch.spi.z1 = 0;
        let sample = touch.sample().unwrap();
        assert_eq!(
            sample,
            TouchSample {
                x: 100,
                y: 200,
                z: 0,
                touched: false,
            }
        );
    }

    #[test]
    fn test_bus_error_releases_chip_select() {
        let mut spi = FakeSpi::pressed(600, 3800, &[], &[]);
        spi.fail = true;
        let mut touch = Xpt2046::new(spi, Cs::default(), Irq(false), 1, 300);
        assert_eq!(touch.sample(), Err(Xpt2046Error::Spi(())));
        assert!(touch.cs.is_set_high());
    }
}
