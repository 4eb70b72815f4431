//! Touch calibration
//!
//! Raw XPT2046 readings are 12-bit values. The calibration bounds are the
//! raw readings observed at the screen edges of a specific device.

/// Calibration rejected at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalibrationError {
    /// `x_min` is not below `x_max`
    EmptyXRange,
    /// `y_min` is not below `y_max`
    EmptyYRange,
}

/// Raw sensor bounds for each axis
///
/// Construction guarantees both ranges are non-empty, so the linear map
/// never divides by zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchCalibration {
    x_min: i32,
    x_max: i32,
    y_min: i32,
    y_max: i32,
}

impl TouchCalibration {
    /// Reference device bounds
    pub const REFERENCE: Self = match Self::new(200, 3700, 240, 3800) {
        Ok(cal) => cal,
        Err(_) => panic!("reference calibration is invalid"),
    };

    pub const fn new(x_min: i32, x_max: i32, y_min: i32, y_max: i32) -> Result<Self, CalibrationError> {
        if x_min >= x_max {
            return Err(CalibrationError::EmptyXRange);
        }
        if y_min >= y_max {
            return Err(CalibrationError::EmptyYRange);
        }
        Ok(Self {
            x_min,
            x_max,
            y_min,
            y_max,
        })
    }

    pub const fn x_min(&self) -> i32 {
        self.x_min
    }

    pub const fn x_max(&self) -> i32 {
        self.x_max
    }

    pub const fn y_min(&self) -> i32 {
        self.y_min
    }

    pub const fn y_max(&self) -> i32 {
        self.y_max
    }
}

/// Touch controller configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchConfig {
    pub calibration: TouchCalibration,
    /// Sensor rotation index (0-3), applied inside the touch driver
    pub rotation: u8,
    /// Minimum pressure reading counted as a touch
    pub z_threshold: u16,
}

impl TouchConfig {
    pub const REFERENCE: Self = Self {
        calibration: TouchCalibration::REFERENCE,
        rotation: 2,
        z_threshold: 300,
    };
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self::REFERENCE
    }
}
