//! Raw sensor space to display pixel space

use crate::config::TouchCalibration;
use crate::geometry::Position;
use crate::traits::TouchSample;

/// Integer linear rescale of `value` from `in_min..=in_max` onto
/// `out_min..=out_max`
///
/// Truncates toward zero and extrapolates outside the input range.
/// `in_min` and `in_max` must differ.
pub const fn map_range(value: i32, in_min: i32, in_max: i32, out_min: i32, out_max: i32) -> i32 {
    let delta = value as i64 - in_min as i64;
    let rise = out_max as i64 - out_min as i64;
    let run = in_max as i64 - in_min as i64;
    (delta * rise / run + out_min as i64) as i32
}

/// Maps calibrated raw samples onto `[1, width] x [1, height]`
///
/// Pure: no state beyond the build-time calibration. Samples outside the
/// calibration bounds are extrapolated, not clamped. No rotation or axis
/// swap happens here; the touch driver applies its own rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CoordinateMapper {
    calibration: TouchCalibration,
    width: u16,
    height: u16,
}

impl CoordinateMapper {
    pub const fn new(calibration: TouchCalibration, width: u16, height: u16) -> Self {
        Self {
            calibration,
            width,
            height,
        }
    }

    /// Map a raw sample to a display position
    pub const fn map(&self, sample: &TouchSample) -> Position {
        self.map_raw(sample.x as i32, sample.y as i32)
    }

    /// Map a raw coordinate pair to a display position
    pub const fn map_raw(&self, raw_x: i32, raw_y: i32) -> Position {
        let cal = &self.calibration;
        Position {
            x: map_range(raw_x, cal.x_min(), cal.x_max(), 1, self.width as i32),
            y: map_range(raw_y, cal.y_min(), cal.y_max(), 1, self.height as i32),
        }
    }

    pub const fn calibration(&self) -> &TouchCalibration {
        &self.calibration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> CoordinateMapper {
        CoordinateMapper::new(TouchCalibration::REFERENCE, 240, 320)
    }

    #[test]
    fn test_map_range_truncates() {
        // 1750 * 239 / 3500 = 119.5
        assert_eq!(map_range(1950, 200, 3700, 1, 240), 120);
        assert_eq!(map_range(2020, 240, 3800, 1, 320), 160);
    }

    #[test]
    fn test_calibration_bounds_hit_pixel_extremes() {
        let mapper = reference();
        assert_eq!(mapper.map_raw(200, 240), Position::new(1, 1));
        assert_eq!(mapper.map_raw(3700, 3800), Position::new(240, 320));
    }

    #[test]
    fn test_reference_sample() {
        let sample = TouchSample {
            x: 1950,
            y: 2020,
            z: 800,
            touched: true,
        };
        assert_eq!(reference().map(&sample), Position::new(120, 160));
    }

    #[test]
    fn test_extrapolates_outside_calibration() {
        let mapper = reference();
        // Below range truncates toward zero: -23900 / 3500 = -6, plus out_min 1
        assert_eq!(mapper.map_raw(100, 240).x, -5);
        assert_eq!(mapper.map_raw(4000, 240).x, 260);
        assert_eq!(mapper.map_raw(200, 0).y, -20);
    }

    #[test]
    fn test_no_axis_swap() {
        let mapper = reference();
        let a = mapper.map_raw(3700, 240);
        assert_eq!(a, Position::new(240, 1));
    }
}
