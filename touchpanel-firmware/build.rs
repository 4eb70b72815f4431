//! Build script for touchpanel-firmware
//!
//! - Sets up linker search paths for memory.x and the RP2040 link scripts
//! - Validates panel.toml and generates `panel_config.rs` from it

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// One validated integer setting
struct Setting {
    section: &'static str,
    key: &'static str,
    ty: &'static str,
    min: i64,
    max: i64,
    name: &'static str,
}

#[rustfmt::skip]
const SETTINGS: &[Setting] = &[
    Setting { section: "display", key: "width", ty: "u16", min: 1, max: 1024, name: "DISPLAY_WIDTH" },
    Setting { section: "display", key: "height", ty: "u16", min: 1, max: 1024, name: "DISPLAY_HEIGHT" },
    Setting { section: "display", key: "buffer_rows", ty: "u16", min: 1, max: 1024, name: "BUFFER_ROWS" },
    Setting { section: "display", key: "rotation", ty: "u8", min: 0, max: 3, name: "DISPLAY_ROTATION" },
    Setting { section: "touch", key: "x_min", ty: "i32", min: 0, max: 4095, name: "TOUCH_X_MIN" },
    Setting { section: "touch", key: "x_max", ty: "i32", min: 0, max: 4095, name: "TOUCH_X_MAX" },
    Setting { section: "touch", key: "y_min", ty: "i32", min: 0, max: 4095, name: "TOUCH_Y_MIN" },
    Setting { section: "touch", key: "y_max", ty: "i32", min: 0, max: 4095, name: "TOUCH_Y_MAX" },
    Setting { section: "touch", key: "rotation", ty: "u8", min: 0, max: 3, name: "TOUCH_ROTATION" },
    Setting { section: "touch", key: "z_threshold", ty: "u16", min: 0, max: 8190, name: "TOUCH_Z_THRESHOLD" },
    Setting { section: "timing", key: "loop_delay_ms", ty: "u32", min: 0, max: 1000, name: "LOOP_DELAY_MS" },
    Setting { section: "timing", key: "self_test_step_ms", ty: "u32", min: 0, max: 10_000, name: "SELF_TEST_STEP_MS" },
];

fn main() {
    setup_linker();
    let values = validate_config();
    generate_config(&values);
}

/// Set up linker search paths and scripts
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Fail the build with a boxed list of messages
fn fail(title: &str, errors: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        errors
            .iter()
            .map(|e| format!("║  • {:<62} ║", e))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

/// Validate panel.toml and return every setting in `SETTINGS` order
fn validate_config() -> Vec<i64> {
    println!("cargo:rerun-if-changed=panel.toml");

    let config_path = Path::new("panel.toml");
    if !config_path.exists() {
        fail(
            "panel.toml not found",
            &["Create one in the touchpanel-firmware directory".to_string()],
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read panel.toml", &[e.to_string()]),
    };

    let config: toml::Value = match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            let lines: Vec<String> = e.to_string().lines().map(truncate).collect();
            fail("Invalid TOML syntax in panel.toml", &lines);
        }
    };

    let mut errors = Vec::new();
    let mut values = Vec::with_capacity(SETTINGS.len());

    for setting in SETTINGS {
        let value = match config.get(setting.section) {
            Some(toml::Value::Table(table)) => table.get(setting.key),
            Some(_) => {
                errors.push(format!("[{}] must be a table", setting.section));
                None
            }
            None => None,
        };

        match value {
            Some(toml::Value::Integer(v)) if (setting.min..=setting.max).contains(v) => {
                values.push(*v);
            }
            Some(toml::Value::Integer(_)) => {
                errors.push(format!(
                    "[{}] {} must be {}-{}",
                    setting.section, setting.key, setting.min, setting.max
                ));
                values.push(0);
            }
            Some(_) => {
                errors.push(format!("[{}] {} must be an integer", setting.section, setting.key));
                values.push(0);
            }
            None => {
                errors.push(format!("[{}] missing '{}'", setting.section, setting.key));
                values.push(0);
            }
        }
    }

    if errors.is_empty() {
        let get = |name: &str| {
            SETTINGS
                .iter()
                .position(|s| s.name == name)
                .map(|i| values[i])
                .unwrap_or_default()
        };

        if get("TOUCH_X_MIN") >= get("TOUCH_X_MAX") {
            errors.push("[touch] x_min must be below x_max".to_string());
        }
        if get("TOUCH_Y_MIN") >= get("TOUCH_Y_MAX") {
            errors.push("[touch] y_min must be below y_max".to_string());
        }
        if get("BUFFER_ROWS") > get("DISPLAY_HEIGHT") {
            errors.push("[display] buffer_rows must not exceed height".to_string());
        }

        // The panel is portrait; odd rotations swap its rows and columns
        let (width, height) = (get("DISPLAY_WIDTH"), get("DISPLAY_HEIGHT"));
        let landscape = get("DISPLAY_ROTATION") % 2 == 1;
        if landscape && width < height {
            errors.push("[display] rotation 1/3 needs width >= height".to_string());
        }
        if !landscape && width > height {
            errors.push("[display] rotation 0/2 needs width <= height".to_string());
        }
    }

    if !errors.is_empty() {
        fail("Invalid configuration in panel.toml", &errors);
    }

    println!("cargo:warning=panel.toml validated successfully");
    values
}

fn truncate(line: &str) -> String {
    if line.len() > 60 {
        format!("{}...", &line[..57])
    } else {
        line.to_string()
    }
}

/// Write `panel_config.rs` into OUT_DIR
fn generate_config(values: &[i64]) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let mut code = String::from("// Generated from panel.toml by build.rs\n\n");
    for (setting, value) in SETTINGS.iter().zip(values) {
        code.push_str(&format!(
            "/// [{}] {}\npub const {}: {} = {};\n",
            setting.section, setting.key, setting.name, setting.ty, value
        ));
    }

    let width = values[0];
    let rows = values[2];
    code.push_str(&format!(
        "/// Draw buffer capacity in pixels (width * buffer_rows)\npub const BUFFER_PIXELS: usize = {};\n",
        width * rows
    ));

    fs::write(out_dir.join("panel_config.rs"), code).unwrap();
}
