//! Embedded image assets

use crate::engine::ImageAsset;

/// Splash logo, 120x120 RGB565 big-endian
pub static LOGO: ImageAsset =
    ImageAsset::new(120, 120, include_bytes!("../../assets/logo.rgb565"));
