//! ILI9341 TFT controller (4-wire SPI)
//!
//! 240x320 RGB panel controller. Commands are sent with DC low, their
//! parameters and pixel data with DC high. Chip select frames each
//! command during bring-up and a whole write session during flushes.
//!
//! # Pixel format
//!
//! The panel is configured for 16-bit RGB565 (`PIXFMT = 0x55`) and
//! expects each pixel high byte first.

use touchpanel_core::traits::PanelWriter;
use touchpanel_hal::{DelayMs, OutputPin, SpiBus};

/// ILI9341 command set (subset used by this driver)
pub mod cmd {
    /// Software reset
    pub const SWRESET: u8 = 0x01;
    /// Sleep out
    pub const SLPOUT: u8 = 0x11;
    /// Gamma curve select
    pub const GAMMASET: u8 = 0x26;
    /// Display on
    pub const DISPON: u8 = 0x29;
    /// Column address set
    pub const CASET: u8 = 0x2A;
    /// Page (row) address set
    pub const PASET: u8 = 0x2B;
    /// Memory write
    pub const RAMWR: u8 = 0x2C;
    /// Memory access control (orientation, colour order)
    pub const MADCTL: u8 = 0x36;
    /// Pixel format
    pub const PIXFMT: u8 = 0x3A;
    /// Frame rate control (normal mode)
    pub const FRMCTR1: u8 = 0xB1;
    /// Display function control
    pub const DFUNCTR: u8 = 0xB6;
    /// Power control 1
    pub const PWCTR1: u8 = 0xC0;
    /// Power control 2
    pub const PWCTR2: u8 = 0xC1;
    /// VCOM control 1
    pub const VMCTR1: u8 = 0xC5;
    /// VCOM control 2
    pub const VMCTR2: u8 = 0xC7;
    /// Positive gamma correction
    pub const GMCTRP1: u8 = 0xE0;
    /// Negative gamma correction
    pub const GMCTRN1: u8 = 0xE1;
}

/// MADCTL bits
mod madctl {
    pub const MY: u8 = 0x80;
    pub const MX: u8 = 0x40;
    pub const MV: u8 = 0x20;
    pub const BGR: u8 = 0x08;
}

/// Native (rotation 0) panel size
pub const NATIVE_WIDTH: u16 = 240;
pub const NATIVE_HEIGHT: u16 = 320;

/// 16 bits per pixel, for both the RGB and MCU interfaces
const PIXFMT_RGB565: u8 = 0x55;

/// Pixels per SPI burst when streaming colours
const CHUNK_PIXELS: usize = 32;

/// Power-on register sequence: command, parameters, delay after (ms)
const INIT_SEQUENCE: &[(u8, &[u8], u32)] = &[
    (0xEF, &[0x03, 0x80, 0x02], 0),
    (0xCF, &[0x00, 0xC1, 0x30], 0),
    (0xED, &[0x64, 0x03, 0x12, 0x81], 0),
    (0xE8, &[0x85, 0x00, 0x78], 0),
    (0xCB, &[0x39, 0x2C, 0x00, 0x34, 0x02], 0),
    (0xF7, &[0x20], 0),
    (0xEA, &[0x00, 0x00], 0),
    (cmd::PWCTR1, &[0x23], 0),
    (cmd::PWCTR2, &[0x10], 0),
    (cmd::VMCTR1, &[0x3E, 0x28], 0),
    (cmd::VMCTR2, &[0x86], 0),
    (cmd::PIXFMT, &[PIXFMT_RGB565], 0),
    (cmd::FRMCTR1, &[0x00, 0x13], 0),
    (cmd::DFUNCTR, &[0x08, 0x82, 0x27], 0),
    (0xF2, &[0x00], 0),
    (cmd::GAMMASET, &[0x01], 0),
    (
        cmd::GMCTRP1,
        &[
            0x0F, 0x31, 0x2B, 0x0C, 0x0E, 0x08, 0x4E, 0xF1, 0x37, 0x07, 0x10, 0x03, 0x0E, 0x09,
            0x00,
        ],
        0,
    ),
    (
        cmd::GMCTRN1,
        &[
            0x00, 0x0E, 0x14, 0x03, 0x11, 0x07, 0x31, 0xC1, 0x48, 0x08, 0x0F, 0x0C, 0x31, 0x36,
            0x0F,
        ],
        0,
    ),
    (cmd::SLPOUT, &[], 120),
    (cmd::DISPON, &[], 20),
];

/// MADCTL value for a rotation index (0-3)
///
/// Rotation 0 is portrait with the connector at the bottom; odd indices
/// are landscape. Out-of-range indices wrap.
pub const fn madctl_for(rotation: u8) -> u8 {
    match rotation % 4 {
        0 => madctl::MX | madctl::BGR,
        1 => madctl::MV | madctl::BGR,
        2 => madctl::MY | madctl::BGR,
        _ => madctl::MX | madctl::MY | madctl::MV | madctl::BGR,
    }
}

/// ILI9341 errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Ili9341Error<E> {
    /// SPI transfer failed
    Spi(E),
    /// Address window is empty or outside the panel
    InvalidWindow,
}

/// ILI9341 driver
pub struct Ili9341<SPI, CS, DC, RST> {
    spi: SPI,
    cs: CS,
    dc: DC,
    rst: RST,
    rotation: u8,
    width: u16,
    height: u16,
}

impl<SPI, CS, DC, RST> Ili9341<SPI, CS, DC, RST>
where
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin,
    RST: OutputPin,
{
    /// Create a driver; the panel is untouched until [`Ili9341::init`]
    pub fn new(spi: SPI, mut cs: CS, dc: DC, mut rst: RST, rotation: u8) -> Self {
        cs.set_high();
        rst.set_high();
        let (width, height) = Self::logical_size(rotation);
        Self {
            spi,
            cs,
            dc,
            rst,
            rotation: rotation % 4,
            width,
            height,
        }
    }

    fn logical_size(rotation: u8) -> (u16, u16) {
        if rotation % 2 == 0 {
            (NATIVE_WIDTH, NATIVE_HEIGHT)
        } else {
            (NATIVE_HEIGHT, NATIVE_WIDTH)
        }
    }

    /// Hardware reset, register init, orientation, display on
    pub fn init<D: DelayMs>(&mut self, delay: &mut D) -> Result<(), Ili9341Error<SPI::Error>> {
        self.rst.set_high();
        delay.delay_ms(5);
        self.rst.set_low();
        delay.delay_ms(20);
        self.rst.set_high();
        delay.delay_ms(150);

        self.command(cmd::SWRESET, &[])?;
        delay.delay_ms(150);

        for &(command, params, wait_ms) in INIT_SEQUENCE {
            self.command(command, params)?;
            if wait_ms > 0 {
                delay.delay_ms(wait_ms);
            }
        }

        self.set_rotation(self.rotation)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("ILI9341 ready, {}x{}", self.width, self.height);

        Ok(())
    }

    /// Change orientation; swaps the logical size for landscape indices
    pub fn set_rotation(&mut self, rotation: u8) -> Result<(), Ili9341Error<SPI::Error>> {
        self.rotation = rotation % 4;
        let (width, height) = Self::logical_size(self.rotation);
        self.width = width;
        self.height = height;
        self.command(cmd::MADCTL, &[madctl_for(self.rotation)])
    }

    pub fn rotation(&self) -> u8 {
        self.rotation
    }

    /// Logical width for the current rotation
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Logical height for the current rotation
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Fill the whole panel with one RGB565 colour
    pub fn fill_screen(&mut self, color: u16) -> Result<(), Ili9341Error<SPI::Error>> {
        self.start_write()?;
        let result = self.fill_window(color);
        self.end_write()?;
        result
    }

    fn fill_window(&mut self, color: u16) -> Result<(), Ili9341Error<SPI::Error>> {
        self.set_addr_window(0, 0, self.width, self.height)?;
        let chunk = [color; CHUNK_PIXELS];
        let mut remaining = self.width as usize * self.height as usize;
        while remaining > 0 {
            let n = remaining.min(CHUNK_PIXELS);
            self.push_colors(&chunk[..n], true)?;
            remaining -= n;
        }
        Ok(())
    }

    /// Send a CS-framed command with its parameters
    fn command(&mut self, command: u8, params: &[u8]) -> Result<(), Ili9341Error<SPI::Error>> {
        self.cs.set_low();
        let result = self.write_command(command).and_then(|_| {
            if params.is_empty() {
                Ok(())
            } else {
                self.write_data(params)
            }
        });
        self.cs.set_high();
        result
    }

    fn write_command(&mut self, command: u8) -> Result<(), Ili9341Error<SPI::Error>> {
        self.dc.set_low();
        self.spi.write(&[command]).map_err(Ili9341Error::Spi)
    }

    fn write_data(&mut self, data: &[u8]) -> Result<(), Ili9341Error<SPI::Error>> {
        self.dc.set_high();
        self.spi.write(data).map_err(Ili9341Error::Spi)
    }
}

impl<SPI, CS, DC, RST> PanelWriter for Ili9341<SPI, CS, DC, RST>
where
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin,
    RST: OutputPin,
{
    type Error = Ili9341Error<SPI::Error>;

    fn start_write(&mut self) -> Result<(), Self::Error> {
        self.cs.set_low();
        Ok(())
    }

    fn set_addr_window(&mut self, x: u16, y: u16, w: u16, h: u16) -> Result<(), Self::Error> {
        let fits_x = x as u32 + w as u32 <= self.width as u32;
        let fits_y = y as u32 + h as u32 <= self.height as u32;
        if w == 0 || h == 0 || !fits_x || !fits_y {
            return Err(Ili9341Error::InvalidWindow);
        }
        let (x2, y2) = (x + w - 1, y + h - 1);

        self.write_command(cmd::CASET)?;
        let [xa, xb] = x.to_be_bytes();
        let [xc, xd] = x2.to_be_bytes();
        self.write_data(&[xa, xb, xc, xd])?;

        self.write_command(cmd::PASET)?;
        let [ya, yb] = y.to_be_bytes();
        let [yc, yd] = y2.to_be_bytes();
        self.write_data(&[ya, yb, yc, yd])?;

        self.write_command(cmd::RAMWR)
    }

    fn push_colors(&mut self, pixels: &[u16], swap_bytes: bool) -> Result<(), Self::Error> {
        self.dc.set_high();
        let mut bytes = [0u8; CHUNK_PIXELS * 2];
        for chunk in pixels.chunks(CHUNK_PIXELS) {
            for (out, &pixel) in bytes.chunks_exact_mut(2).zip(chunk) {
                let encoded = if swap_bytes {
                    pixel.to_be_bytes()
                } else {
                    pixel.to_le_bytes()
                };
                out.copy_from_slice(&encoded);
            }
            self.spi
                .write(&bytes[..chunk.len() * 2])
                .map_err(Ili9341Error::Spi)?;
        }
        Ok(())
    }

    fn end_write(&mut self) -> Result<(), Self::Error> {
        self.cs.set_high();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::RefCell;
    use heapless::Vec;
    use touchpanel_hal::NoDelay;

    /// Bus events in order, shared by the fake SPI and pins
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Ev {
        Cs(bool),
        Dc(bool),
        Rst(bool),
        Byte(u8),
    }

    struct Log(RefCell<Vec<Ev, 4096>>);

    impl Log {
        fn new() -> Self {
            Self(RefCell::new(Vec::new()))
        }

        fn push(&self, ev: Ev) {
            let _ = self.0.borrow_mut().push(ev);
        }

        /// Bytes sent while DC was low, i.e. commands
        fn commands(&self) -> Vec<u8, 64> {
            let mut dc = true;
            let mut out = Vec::new();
            for ev in self.0.borrow().iter() {
                match *ev {
                    Ev::Dc(level) => dc = level,
                    Ev::Byte(b) if !dc => {
                        let _ = out.push(b);
                    }
                    _ => {}
                }
            }
            out
        }

        /// Bytes sent while DC was high, i.e. parameters and pixels
        fn data(&self) -> Vec<u8, 1024> {
            let mut dc = true;
            let mut out = Vec::new();
            for ev in self.0.borrow().iter() {
                match *ev {
                    Ev::Dc(level) => dc = level,
                    Ev::Byte(b) if dc => {
                        let _ = out.push(b);
                    }
                    _ => {}
                }
            }
            out
        }
    }

    struct FakeSpi<'a>(&'a Log);

    impl SpiBus for FakeSpi<'_> {
        type Error = ();

        fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), ()> {
            read.fill(0);
            self.write(write)
        }

        fn write(&mut self, data: &[u8]) -> Result<(), ()> {
            for &b in data {
                self.0.push(Ev::Byte(b));
            }
            Ok(())
        }
    }

    struct Pin<'a> {
        log: &'a Log,
        kind: fn(bool) -> Ev,
        high: bool,
    }

    impl OutputPin for Pin<'_> {
        fn set_high(&mut self) {
            self.high = true;
            self.log.push((self.kind)(true));
        }

        fn set_low(&mut self) {
            self.high = false;
            self.log.push((self.kind)(false));
        }

        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    type Panel<'a> = Ili9341<FakeSpi<'a>, Pin<'a>, Pin<'a>, Pin<'a>>;

    fn panel(log: &Log, rotation: u8) -> Panel<'_> {
        let panel = Ili9341::new(
            FakeSpi(log),
            Pin {
                log,
                kind: Ev::Cs,
                high: false,
            },
            Pin {
                log,
                kind: Ev::Dc,
                high: false,
            },
            Pin {
                log,
                kind: Ev::Rst,
                high: false,
            },
            rotation,
        );
        log.0.borrow_mut().clear();
        panel
    }

    #[test]
    fn test_madctl_per_rotation() {
        assert_eq!(madctl_for(0), 0x48);
        assert_eq!(madctl_for(1), 0x28);
        assert_eq!(madctl_for(2), 0x88);
        assert_eq!(madctl_for(3), 0xE8);
        assert_eq!(madctl_for(4), 0x48);
    }

    #[test]
    fn test_init_sequence() {
        let log = Log::new();
        let mut panel = panel(&log, 0);
        panel.init(&mut NoDelay).unwrap();

        let commands = log.commands();
        assert_eq!(commands.first(), Some(&cmd::SWRESET));
        assert!(commands.contains(&cmd::PIXFMT));
        assert!(commands.contains(&cmd::SLPOUT));
        assert!(commands.contains(&cmd::DISPON));
        assert_eq!(commands.last(), Some(&cmd::MADCTL));
        assert_eq!(log.data().last(), Some(&0x48));
        assert!(panel.cs.is_set_high());
    }

    #[test]
    fn test_rotation_swaps_size() {
        let log = Log::new();
        let mut panel = panel(&log, 1);
        assert_eq!((panel.width(), panel.height()), (320, 240));
        panel.set_rotation(2).unwrap();
        assert_eq!((panel.width(), panel.height()), (240, 320));
        assert_eq!(panel.rotation(), 2);
    }

    #[test]
    fn test_addr_window_and_pixels() {
        let log = Log::new();
        let mut panel = panel(&log, 0);

        panel.start_write().unwrap();
        panel.set_addr_window(10, 300, 4, 2).unwrap();
        panel.push_colors(&[0xF800, 0x001F], true).unwrap();
        panel.push_colors(&[0xF800], false).unwrap();
        panel.end_write().unwrap();

        assert_eq!(
            log.commands().as_slice(),
            &[cmd::CASET, cmd::PASET, cmd::RAMWR]
        );
        assert_eq!(
            log.data().as_slice(),
            &[
                0x00, 10, 0x00, 13, // columns 10..=13
                0x01, 0x2C, 0x01, 0x2D, // rows 300..=301
                0xF8, 0x00, 0x00, 0x1F, // swapped: high byte first
                0x00, 0xF8, // unswapped
            ]
        );

        let events = log.0.borrow();
        assert_eq!(events.first(), Some(&Ev::Cs(false)));
        assert_eq!(events.last(), Some(&Ev::Cs(true)));
    }

    #[test]
    fn test_addr_window_rejects_out_of_bounds() {
        let log = Log::new();
        let mut panel = panel(&log, 0);
        assert_eq!(
            panel.set_addr_window(0, 0, 0, 10),
            Err(Ili9341Error::InvalidWindow)
        );
        assert_eq!(
            panel.set_addr_window(200, 0, 41, 1),
            Err(Ili9341Error::InvalidWindow)
        );
        assert!(panel.set_addr_window(200, 300, 40, 20).is_ok());
    }

    #[test]
    fn test_large_push_is_chunked() {
        let log = Log::new();
        let mut panel = panel(&log, 0);
        let pixels = [0x1234u16; CHUNK_PIXELS * 3 + 5];
        panel.push_colors(&pixels, true).unwrap();

        let data = log.data();
        assert_eq!(data.len(), pixels.len() * 2);
        assert!(data.chunks(2).all(|p| p == [0x12, 0x34]));
    }
}
