//! Screens and widgets
//!
//! A small retained object model: a screen is a background
//! colour plus a few positioned widgets. Screens are created once, owned
//! by the engine, and live for the whole run.

use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::pixelcolor::raw::RawU16;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::{Point, RgbColor};
use heapless::Vec;

use super::EngineError;

/// Maximum widgets per screen
pub const MAX_WIDGETS: usize = 4;

/// Image zoom factor meaning 1:1
pub const ZOOM_NONE: u16 = 256;

/// Handle to a screen owned by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScreenId(u8);

impl ScreenId {
    pub(crate) const fn new(index: u8) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Anchor of a widget relative to the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Align {
    /// Centre of the widget on the centre of the screen
    Center,
    /// Bottom-centre of the widget on the bottom-centre of the screen
    BottomMid,
}

/// Embedded RGB565 bitmap, big-endian, row-major
#[derive(Debug, Clone, Copy)]
pub struct ImageAsset {
    width: u16,
    height: u16,
    data: &'static [u8],
}

impl ImageAsset {
    /// Panics (at compile time for constants) if `data` does not hold
    /// exactly `width * height` pixels
    pub const fn new(width: u16, height: u16, data: &'static [u8]) -> Self {
        assert!(data.len() == width as usize * height as usize * 2);
        Self {
            width,
            height,
            data,
        }
    }

    pub const fn width(&self) -> u16 {
        self.width
    }

    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Colour at `(x, y)`; black outside the bitmap
    pub fn pixel(&self, x: u32, y: u32) -> Rgb565 {
        if x >= self.width as u32 || y >= self.height as u32 {
            return Rgb565::BLACK;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 2;
        match self.data.get(idx..idx + 2) {
            Some(&[hi, lo]) => Rgb565::from(RawU16::new(u16::from_be_bytes([hi, lo]))),
            _ => Rgb565::BLACK,
        }
    }
}

/// Single-line text
#[derive(Clone, Copy)]
pub struct Label {
    pub text: &'static str,
    pub font: &'static MonoFont<'static>,
    pub color: Rgb565,
    pub align: Align,
    pub offset: Point,
}

impl Label {
    pub const fn new(text: &'static str, font: &'static MonoFont<'static>, color: Rgb565) -> Self {
        Self {
            text,
            font,
            color,
            align: Align::Center,
            offset: Point::new(0, 0),
        }
    }

    pub const fn aligned(mut self, align: Align, dx: i32, dy: i32) -> Self {
        self.align = align;
        self.offset = Point::new(dx, dy);
        self
    }
}

/// Scaled bitmap
#[derive(Clone, Copy)]
pub struct Image {
    pub asset: &'static ImageAsset,
    /// Scale factor, 256 = 1.0
    pub zoom: u16,
    pub align: Align,
    pub offset: Point,
}

impl Image {
    pub const fn new(asset: &'static ImageAsset) -> Self {
        Self {
            asset,
            zoom: ZOOM_NONE,
            align: Align::Center,
            offset: Point::new(0, 0),
        }
    }

    pub const fn zoomed(mut self, zoom: u16) -> Self {
        self.zoom = if zoom == 0 { 1 } else { zoom };
        self
    }

    pub const fn aligned(mut self, align: Align, dx: i32, dy: i32) -> Self {
        self.align = align;
        self.offset = Point::new(dx, dy);
        self
    }

    /// On-screen size after zooming
    pub const fn scaled_size(&self) -> (u32, u32) {
        let w = self.asset.width() as u32 * self.zoom as u32 / ZOOM_NONE as u32;
        let h = self.asset.height() as u32 * self.zoom as u32 / ZOOM_NONE as u32;
        (if w == 0 { 1 } else { w }, if h == 0 { 1 } else { h })
    }
}

#[derive(Clone, Copy)]
pub enum Widget {
    Label(Label),
    Image(Image),
}

impl From<Label> for Widget {
    fn from(label: Label) -> Self {
        Widget::Label(label)
    }
}

impl From<Image> for Widget {
    fn from(image: Image) -> Self {
        Widget::Image(image)
    }
}

/// A full-screen UI subtree
#[derive(Clone)]
pub struct Screen {
    background: Rgb565,
    widgets: Vec<Widget, MAX_WIDGETS>,
}

impl Screen {
    pub fn new(background: Rgb565) -> Self {
        Self {
            background,
            widgets: Vec::new(),
        }
    }

    /// Append a widget; later widgets draw on top
    pub fn add(&mut self, widget: impl Into<Widget>) -> Result<(), EngineError> {
        self.widgets
            .push(widget.into())
            .map_err(|_| EngineError::TooManyWidgets)
    }

    /// Builder form of [`Screen::add`]
    pub fn with(mut self, widget: impl Into<Widget>) -> Result<Self, EngineError> {
        self.add(widget)?;
        Ok(self)
    }

    pub fn background(&self) -> Rgb565 {
        self.background
    }

    pub fn widgets(&self) -> &[Widget] {
        &self.widgets
    }
}
