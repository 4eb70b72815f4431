//! Touch sensor trait

/// One raw reading from the touch controller
///
/// Values are in sensor space (12-bit for the XPT2046), after the
/// driver's own rotation has been applied. Transient: produced per poll
/// and never stored across polls by the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchSample {
    /// Raw X reading
    pub x: u16,
    /// Raw Y reading
    pub y: u16,
    /// Raw pressure reading
    pub z: u16,
    /// Pressure was above the driver's touch threshold
    pub touched: bool,
}

/// Resistive touch controller
pub trait TouchSensor {
    /// Error type for bus operations
    type Error;

    /// Whether the pen-interrupt line is asserted
    ///
    /// Polled, never used as an interrupt source. Must not block.
    fn irq_asserted(&mut self) -> bool;

    /// Whether a touch with enough pressure is currently present
    fn touched(&mut self) -> Result<bool, Self::Error>;

    /// Read the current sample
    fn sample(&mut self) -> Result<TouchSample, Self::Error>;
}
