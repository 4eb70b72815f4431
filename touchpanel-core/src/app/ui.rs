//! Screen content

use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_6X10};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::RgbColor;

use crate::engine::{Align, EngineError, Image, Label, Screen};

use super::assets::LOGO;

/// Logo zoom, 256 = 1:1
pub const LOGO_ZOOM: u16 = 180;

pub const TITLE: &str = "Carenuity";
pub const FOOTER: &str = "by Cynthia";

/// White background with the logo scaled in the centre
pub fn logo_screen() -> Result<Screen, EngineError> {
    Screen::new(Rgb565::WHITE).with(Image::new(&LOGO).zoomed(LOGO_ZOOM))
}

/// Title above the centre, footer at the bottom edge
pub fn info_screen() -> Result<Screen, EngineError> {
    Screen::new(Rgb565::WHITE)
        .with(Label::new(TITLE, &FONT_10X20, Rgb565::BLACK).aligned(Align::Center, 0, -20))?
        .with(Label::new(FOOTER, &FONT_6X10, Rgb565::BLACK).aligned(Align::BottomMid, 0, -10))
}
