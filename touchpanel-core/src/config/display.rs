//! Display geometry

/// Panel orientation index, applied by the panel driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rotation {
    /// Portrait, connector at the bottom
    Deg0,
    /// Landscape
    Deg90,
    /// Portrait, flipped
    Deg180,
    /// Landscape, flipped
    Deg270,
}

impl Rotation {
    /// Parse a rotation index (0-3)
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Rotation::Deg0),
            1 => Some(Rotation::Deg90),
            2 => Some(Rotation::Deg180),
            3 => Some(Rotation::Deg270),
            _ => None,
        }
    }

    pub const fn index(self) -> u8 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 1,
            Rotation::Deg180 => 2,
            Rotation::Deg270 => 3,
        }
    }

    /// Whether the panel's native rows and columns are exchanged
    pub const fn is_landscape(self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }
}

/// Display geometry and partial-render buffer size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayConfig {
    /// Logical width in pixels
    pub width: u16,
    /// Logical height in pixels
    pub height: u16,
    /// Rows of the partial-render band buffer
    pub buffer_rows: u16,
    /// Panel orientation
    pub rotation: Rotation,
}

impl DisplayConfig {
    pub const REFERENCE: Self = Self {
        width: 240,
        height: 320,
        buffer_rows: 40,
        rotation: Rotation::Deg0,
    };

    /// Pixel capacity the DisplayBuffer must provide
    pub const fn buffer_pixels(&self) -> usize {
        self.width as usize * self.buffer_rows as usize
    }

    /// Total pixels on the panel
    pub const fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Whether width and height follow the rotation on a portrait panel
    ///
    /// Odd rotations need `width >= height`, even ones `width <= height`.
    pub const fn orientation_matches(&self) -> bool {
        if self.rotation.is_landscape() {
            self.width >= self.height
        } else {
            self.width <= self.height
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self::REFERENCE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_index_roundtrip() {
        for index in 0..4 {
            let rotation = Rotation::from_index(index).unwrap();
            assert_eq!(rotation.index(), index);
        }
        assert!(Rotation::from_index(4).is_none());
    }

    #[test]
    fn test_orientation_follows_rotation() {
        let portrait = DisplayConfig::REFERENCE;
        assert!(portrait.orientation_matches());

        let swapped = DisplayConfig {
            rotation: Rotation::Deg90,
            ..portrait
        };
        assert!(!swapped.orientation_matches());

        let landscape = DisplayConfig {
            width: 320,
            height: 240,
            rotation: Rotation::Deg270,
            ..portrait
        };
        assert!(landscape.orientation_matches());
        assert!(!DisplayConfig {
            rotation: Rotation::Deg180,
            ..landscape
        }
        .orientation_matches());
    }

    #[test]
    fn test_buffer_is_a_band_of_the_screen() {
        let config = DisplayConfig::REFERENCE;
        assert!(config.buffer_pixels() < config.pixel_count());
        assert_eq!(config.buffer_pixels() % config.width as usize, 0);
    }
}
