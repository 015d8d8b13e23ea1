//! Biome themes
//!
//! A theme drives both the background and the obstacle art, so the two always
//! switch together.

use serde::{Deserialize, Serialize};

/// Background decoration drawn behind the hills
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BackgroundElements {
    Houses,
    Trees,
    Peaks,
}

/// Visual parameters for one biome (colors are 0xRRGGBB)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemePreset {
    pub sky_top: [u8; 3],
    pub sky_bottom: [u8; 3],
    pub sunset_top: [u8; 3],
    pub sunset_bottom: [u8; 3],
    pub far_hill: u32,
    pub near_hill: u32,
    pub ground: u32,
    pub ground_dark: u32,
    pub dirt_top: u32,
    pub dirt_bottom: u32,
    pub elements: BackgroundElements,
    pub flower_colors: [u32; 5],
}

const VILLAGE: ThemePreset = ThemePreset {
    sky_top: [135, 206, 235],
    sky_bottom: [224, 247, 250],
    sunset_top: [255, 112, 67],
    sunset_bottom: [255, 224, 130],
    far_hill: 0x81C784,
    near_hill: 0x66BB6A,
    ground: 0x5D8233,
    ground_dark: 0x4A6B28,
    dirt_top: 0x5D8233,
    dirt_bottom: 0x5A3D1A,
    elements: BackgroundElements::Houses,
    flower_colors: [0xE91E63, 0xFF5722, 0xFFEB3B, 0x9C27B0, 0x2196F3],
};

const FOREST: ThemePreset = ThemePreset {
    sky_top: [76, 132, 100],
    sky_bottom: [180, 220, 180],
    sunset_top: [120, 90, 60],
    sunset_bottom: [200, 180, 130],
    far_hill: 0x2E7D32,
    near_hill: 0x388E3C,
    ground: 0x33691E,
    ground_dark: 0x1B5E20,
    dirt_top: 0x33691E,
    dirt_bottom: 0x3E2723,
    elements: BackgroundElements::Trees,
    flower_colors: [0xCDDC39, 0x8BC34A, 0xC6FF00, 0xAEEA00, 0x76FF03],
};

const MOUNTAIN: ThemePreset = ThemePreset {
    sky_top: [55, 71, 100],
    sky_bottom: [150, 170, 200],
    sunset_top: [180, 100, 80],
    sunset_bottom: [220, 180, 160],
    far_hill: 0x78909C,
    near_hill: 0x90A4AE,
    ground: 0x6D7B8D,
    ground_dark: 0x546E7A,
    dirt_top: 0x6D7B8D,
    dirt_bottom: 0x37474F,
    elements: BackgroundElements::Peaks,
    flower_colors: [0xE1F5FE, 0xB3E5FC, 0x81D4FA, 0xBBDEFB, 0x90CAF9],
};

/// The three biomes, in endless-mode rotation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    Village,
    Forest,
    Mountain,
}

impl Theme {
    /// Rotation order used by endless mode
    pub const ROTATION: [Theme; 3] = [Theme::Village, Theme::Forest, Theme::Mountain];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Village => "village",
            Theme::Forest => "forest",
            Theme::Mountain => "mountain",
        }
    }

    /// Parse a theme name; unknown names fall back to [`Theme::Village`]
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "village" => Theme::Village,
            "forest" => Theme::Forest,
            "mountain" | "mountains" => Theme::Mountain,
            other => {
                log::warn!("Unknown theme '{other}', falling back to village");
                Theme::default()
            }
        }
    }

    /// Theme at a position in the rotation (wraps)
    pub fn from_index(index: usize) -> Self {
        Self::ROTATION[index % Self::ROTATION.len()]
    }

    /// Announcement shown when endless mode enters this biome
    pub fn label(&self) -> &'static str {
        match self {
            Theme::Village => "🏡 Village",
            Theme::Forest => "🌲 Forest",
            Theme::Mountain => "🏔️ Mountains",
        }
    }

    pub fn preset(&self) -> &'static ThemePreset {
        match self {
            Theme::Village => &VILLAGE,
            Theme::Forest => &FOREST,
            Theme::Mountain => &MOUNTAIN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(Theme::from_name("forest"), Theme::Forest);
        assert_eq!(Theme::from_name("Mountain"), Theme::Mountain);
        assert_eq!(Theme::from_name("village"), Theme::Village);
    }

    #[test]
    fn test_unknown_name_falls_back_to_village() {
        assert_eq!(Theme::from_name("lava"), Theme::Village);
        assert_eq!(Theme::from_name(""), Theme::Village);
    }

    #[test]
    fn test_rotation_wraps() {
        assert_eq!(Theme::from_index(0), Theme::Village);
        assert_eq!(Theme::from_index(1), Theme::Forest);
        assert_eq!(Theme::from_index(2), Theme::Mountain);
        assert_eq!(Theme::from_index(3), Theme::Village);
    }

    #[test]
    fn test_presets_distinct() {
        assert_eq!(Theme::Village.preset().elements, BackgroundElements::Houses);
        assert_eq!(Theme::Forest.preset().elements, BackgroundElements::Trees);
        assert_eq!(Theme::Mountain.preset().elements, BackgroundElements::Peaks);
        assert_ne!(Theme::Village.preset().ground, Theme::Forest.preset().ground);
    }
}
