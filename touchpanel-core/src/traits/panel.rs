//! Panel pixel-bus trait

/// Write side of a TFT panel controller
///
/// A flush is one transactional session:
/// `start_write`, `set_addr_window`, `push_colors`, `end_write`.
pub trait PanelWriter {
    /// Error type for bus operations
    type Error;

    /// Begin a write session (assert chip select)
    fn start_write(&mut self) -> Result<(), Self::Error>;

    /// Set the addressable window to `w` x `h` pixels at `(x, y)`
    fn set_addr_window(&mut self, x: u16, y: u16, w: u16, h: u16) -> Result<(), Self::Error>;

    /// Stream RGB565 pixels into the window
    ///
    /// When `swap_bytes` is set, each pixel is sent high byte first,
    /// i.e. its in-memory byte order is swapped on the wire.
    fn push_colors(&mut self, pixels: &[u16], swap_bytes: bool) -> Result<(), Self::Error>;

    /// End the write session (release chip select)
    fn end_write(&mut self) -> Result<(), Self::Error>;
}
