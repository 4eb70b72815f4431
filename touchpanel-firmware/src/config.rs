//! Build-time panel configuration
//!
//! Constants are generated from `panel.toml` by the build script, which
//! has already range-checked them; the `match`es below turn any
//! remaining inconsistency into a compile error.

use touchpanel_core::config::{
    DisplayConfig, PanelConfig, Rotation, TouchCalibration, TouchConfig,
};

include!(concat!(env!("OUT_DIR"), "/panel_config.rs"));

pub const PANEL: PanelConfig = PanelConfig {
    display: DisplayConfig {
        width: DISPLAY_WIDTH,
        height: DISPLAY_HEIGHT,
        buffer_rows: BUFFER_ROWS,
        rotation: match Rotation::from_index(DISPLAY_ROTATION) {
            Some(rotation) => rotation,
            None => panic!("display rotation must be 0-3"),
        },
    },
    touch: TouchConfig {
        calibration: match TouchCalibration::new(TOUCH_X_MIN, TOUCH_X_MAX, TOUCH_Y_MIN, TOUCH_Y_MAX)
        {
            Ok(calibration) => calibration,
            Err(_) => panic!("touch calibration ranges must be non-empty"),
        },
        rotation: TOUCH_ROTATION,
        z_threshold: TOUCH_Z_THRESHOLD,
    },
    loop_delay_ms: LOOP_DELAY_MS,
};

const _: () = assert!(PANEL.display.buffer_pixels() == BUFFER_PIXELS);
const _: () = assert!(PANEL.display.orientation_matches());
