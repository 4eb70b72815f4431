//! Band buffer for partial rendering

/// Fixed-capacity RGB565 pixel buffer
///
/// Sized at build time (`width * buffer_rows`) and never reallocated.
/// Its capacity bounds the largest tile the renderer will flush.
pub struct DisplayBuffer<const N: usize> {
    pixels: [u16; N],
}

impl<const N: usize> Default for DisplayBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> DisplayBuffer<N> {
    pub const fn new() -> Self {
        Self { pixels: [0; N] }
    }

    /// Capacity in pixels
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Rows of a `width`-wide tile that fit in the buffer
    pub const fn rows_for_width(&self, width: u32) -> u32 {
        if width == 0 {
            0
        } else {
            (N / width as usize) as u32
        }
    }

    /// The first `len` pixels, for rendering a band of that size
    ///
    /// Returns `None` if `len` exceeds the capacity.
    pub fn band_mut(&mut self, len: usize) -> Option<&mut [u16]> {
        self.pixels.get_mut(..len)
    }
}
