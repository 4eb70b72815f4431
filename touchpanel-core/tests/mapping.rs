//! Property tests for coordinate mapping and engine time

use proptest::prelude::*;

use touchpanel_core::config::TouchCalibration;
use touchpanel_core::engine::Clock;
use touchpanel_core::geometry::Position;
use touchpanel_core::touch::CoordinateMapper;

fn reference() -> CoordinateMapper {
    CoordinateMapper::new(TouchCalibration::REFERENCE, 240, 320)
}

proptest! {
    #[test]
    fn calibrated_samples_land_on_screen(x in 200i32..=3700, y in 240i32..=3800) {
        let pos = reference().map_raw(x, y);
        prop_assert!((1..=240).contains(&pos.x));
        prop_assert!((1..=320).contains(&pos.y));
    }

    #[test]
    fn mapping_is_monotonic(a in 0i32..4096, b in 0i32..4096) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let mapper = reference();
        prop_assert!(mapper.map_raw(lo, lo).x <= mapper.map_raw(hi, hi).x);
        prop_assert!(mapper.map_raw(lo, lo).y <= mapper.map_raw(hi, hi).y);
    }

    #[test]
    fn mapping_is_pure(x in 0i32..4096, y in 0i32..4096) {
        let mapper = reference();
        prop_assert_eq!(mapper.map_raw(x, y), mapper.map_raw(x, y));
    }

    #[test]
    fn bounds_hit_exact_extremes(
        x_min in 0i32..2000,
        x_span in 1i32..2000,
        y_min in 0i32..2000,
        y_span in 1i32..2000,
        width in 1u16..=480,
        height in 1u16..=480,
    ) {
        let calibration =
            TouchCalibration::new(x_min, x_min + x_span, y_min, y_min + y_span).unwrap();
        let mapper = CoordinateMapper::new(calibration, width, height);
        prop_assert_eq!(mapper.map_raw(x_min, y_min), Position::new(1, 1));
        prop_assert_eq!(
            mapper.map_raw(x_min + x_span, y_min + y_span),
            Position::new(width as i32, height as i32)
        );
    }

    #[test]
    fn clock_is_monotonic_across_rollover(
        start in any::<u32>(),
        steps in proptest::collection::vec(0u32..100_000, 1..50),
    ) {
        let mut clock = Clock::new();
        let mut raw = start;
        let mut last = clock.update(raw);
        let mut expected = 0u64;
        for step in steps {
            raw = raw.wrapping_add(step);
            expected += step as u64;
            let now = clock.update(raw);
            prop_assert!(now >= last);
            prop_assert_eq!(now, expected);
            last = now;
        }
    }
}

#[test]
fn degenerate_calibration_is_rejected() {
    assert!(TouchCalibration::new(3700, 200, 240, 3800).is_err());
    assert!(TouchCalibration::new(200, 3700, 240, 240).is_err());
}
