//! Band renderer
//!
//! Draws a screen into one horizontal band of the display at a time.
//! Drawing goes through `embedded-graphics`, so widgets are clipped to
//! the band for free.

use core::convert::Infallible;

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::{IntoStorage, Rgb565};
use embedded_graphics::prelude::{
    Dimensions, DrawTarget, Drawable, Pixel, Point, PointsIter, Size,
};
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};

use crate::geometry::Area;

use super::screen::{Align, Image, Label, Screen, Widget, ZOOM_NONE};

/// Draw target over a band-sized slice of the DisplayBuffer
///
/// Coordinates are display coordinates; anything outside `area` is
/// dropped.
pub struct BandTarget<'a> {
    pixels: &'a mut [u16],
    area: Area,
}

impl<'a> BandTarget<'a> {
    pub fn new(pixels: &'a mut [u16], area: Area) -> Self {
        debug_assert_eq!(pixels.len(), area.pixel_count());
        Self { pixels, area }
    }

    fn index(&self, x: i32, y: i32) -> usize {
        ((y - self.area.y1) as usize) * self.area.width() as usize + (x - self.area.x1) as usize
    }
}

impl Dimensions for BandTarget<'_> {
    fn bounding_box(&self) -> Rectangle {
        self.area.to_rectangle()
    }
}

impl DrawTarget for BandTarget<'_> {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if self.area.contains(point.x, point.y) {
                let idx = self.index(point.x, point.y);
                if let Some(px) = self.pixels.get_mut(idx) {
                    *px = color.into_storage();
                }
            }
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let clipped = area.intersection(&self.bounding_box());
        let Some(bottom_right) = clipped.bottom_right() else {
            return Ok(());
        };
        let raw = color.into_storage();
        for y in clipped.top_left.y..=bottom_right.y {
            let start = self.index(clipped.top_left.x, y);
            let end = self.index(bottom_right.x, y);
            if let Some(row) = self.pixels.get_mut(start..=end) {
                row.fill(raw);
            }
        }
        Ok(())
    }
}

/// Top-left corner for a widget of `size` on a `width` x `height` screen
fn anchor(align: Align, offset: Point, size: Size, width: i32, height: i32) -> Point {
    let w = size.width as i32;
    let h = size.height as i32;
    let top_left = match align {
        Align::Center => Point::new((width - w) / 2, (height - h) / 2),
        Align::BottomMid => Point::new((width - w) / 2, height - h),
    };
    top_left + offset
}

fn draw_label<D>(label: &Label, width: i32, height: i32, target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let (position, baseline) = match label.align {
        Align::Center => (Point::new(width / 2, height / 2), Baseline::Middle),
        Align::BottomMid => (Point::new(width / 2, height), Baseline::Bottom),
    };
    let character_style = MonoTextStyle::new(label.font, label.color);
    let text_style = TextStyleBuilder::new()
        .alignment(Alignment::Center)
        .baseline(baseline)
        .build();

    Text::with_text_style(label.text, position + label.offset, character_style, text_style)
        .draw(target)?;
    Ok(())
}

fn draw_image<D>(image: &Image, width: i32, height: i32, target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let (w, h) = image.scaled_size();
    let size = Size::new(w, h);
    let origin = anchor(image.align, image.offset, size, width, height);
    let visible = Rectangle::new(origin, size).intersection(&target.bounding_box());

    let asset = image.asset;
    let zoom = (image.zoom as u32).max(1);
    // Nearest-neighbour sampling back into the source bitmap
    let pixels = visible.points().map(|p| {
        let sx = (p.x - origin.x) as u32 * ZOOM_NONE as u32 / zoom;
        let sy = (p.y - origin.y) as u32 * ZOOM_NONE as u32 / zoom;
        Pixel(p, asset.pixel(sx, sy))
    });
    target.draw_iter(pixels)
}

/// Draw `screen` on a `width` x `height` display into `target`
///
/// Only the part of the screen inside the target's bounding box is
/// touched.
pub fn draw_screen<D>(screen: &Screen, width: u16, height: u16, target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let (width, height) = (width as i32, height as i32);

    let bounds = target.bounding_box();
    target.fill_solid(&bounds, screen.background())?;

    for widget in screen.widgets() {
        match widget {
            Widget::Label(label) => draw_label(label, width, height, target)?,
            Widget::Image(image) => draw_image(image, width, height, target)?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::screen::ImageAsset;
    use embedded_graphics::mono_font::ascii::FONT_6X10;
    use embedded_graphics::prelude::RgbColor;

    const RED_2X2: [u8; 8] = [0xF8, 0x00, 0xF8, 0x00, 0xF8, 0x00, 0xF8, 0x00];
    static RED: ImageAsset = ImageAsset::new(2, 2, &RED_2X2);

    fn render(screen: &Screen, area: Area, out: &mut [u16]) {
        let mut target = BandTarget::new(out, area);
        if let Err(never) = draw_screen(screen, 8, 8, &mut target) {
            match never {}
        }
    }

    #[test]
    fn test_background_fills_band() {
        let screen = Screen::new(Rgb565::WHITE);
        let mut band = [0u16; 8 * 2];
        render(&screen, Area::new(0, 2, 7, 3), &mut band);
        assert!(band.iter().all(|&p| p == 0xFFFF));
    }

    #[test]
    fn test_centered_image_is_clipped_per_band() {
        // 2x2 image on an 8x8 screen covers (3,3)..=(4,4)
        let screen = Screen::new(Rgb565::WHITE)
            .with(Image::new(&RED))
            .unwrap();
        let red = Rgb565::RED.into_storage();

        let mut top = [0u16; 8 * 4];
        render(&screen, Area::new(0, 0, 7, 3), &mut top);
        let reds: usize = top.iter().filter(|&&p| p == red).count();
        assert_eq!(reds, 2);
        assert_eq!(top[3 * 8 + 3], red);
        assert_eq!(top[3 * 8 + 4], red);

        let mut bottom = [0u16; 8 * 4];
        render(&screen, Area::new(0, 4, 7, 7), &mut bottom);
        assert_eq!(bottom[3], red);
        assert_eq!(bottom[4], red);
        assert_eq!(bottom.iter().filter(|&&p| p == red).count(), 2);
    }

    #[test]
    fn test_zoomed_image_covers_scaled_area() {
        let screen = Screen::new(Rgb565::WHITE)
            .with(Image::new(&RED).zoomed(512))
            .unwrap();
        let mut full = [0u16; 64];
        render(&screen, Area::new(0, 0, 7, 7), &mut full);
        let red = Rgb565::RED.into_storage();
        assert_eq!(full.iter().filter(|&&p| p == red).count(), 16);
        assert_eq!(full[2 * 8 + 2], red);
        assert_eq!(full[5 * 8 + 5], red);
    }

    #[test]
    fn test_label_draws_ink_near_anchor() {
        let screen = Screen::new(Rgb565::WHITE)
            .with(Label::new("X", &FONT_6X10, Rgb565::BLACK))
            .unwrap();
        let mut full = [0u16; 64];
        render(&screen, Area::new(0, 0, 7, 7), &mut full);
        assert!(full.iter().any(|&p| p == 0x0000));
    }

    #[test]
    fn test_pixels_outside_band_dropped() {
        let mut band = [0u16; 4];
        let mut target = BandTarget::new(&mut band, Area::new(0, 1, 3, 1));
        let _ = target.draw_iter([
            Pixel(Point::new(0, 0), Rgb565::RED),
            Pixel(Point::new(2, 1), Rgb565::BLUE),
            Pixel(Point::new(9, 1), Rgb565::GREEN),
        ]);
        assert_eq!(band, [0, 0, Rgb565::BLUE.into_storage(), 0]);
    }
}
