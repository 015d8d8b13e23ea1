//! Data-driven game balance
//!
//! Every gameplay constant lives here so a run can be configured without
//! touching simulation code. Velocities and per-frame rates are expressed per
//! 60 Hz reference frame (see [`crate::consts::REFERENCE_FRAME_MS`]); timers
//! are in milliseconds.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Upper bound on lives a hen can start with
pub const LIVES_CAP: u8 = 3;

/// Gameplay tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Field ===
    pub field_width: f32,
    pub field_height: f32,
    pub ground_height: f32,

    // === Player physics ===
    /// Fixed horizontal lane of the player
    pub player_x: f32,
    pub gravity: f32,
    /// Upward velocity applied by a flap (negative = up)
    pub jump_velocity: f32,
    pub max_fall_speed: f32,
    /// Player y is clamped here without damage
    pub ceiling_y: f32,
    /// Ground contact when `y > floor - ground_margin`
    pub ground_margin: f32,
    /// Hitbox half extents (smaller than the sprite for forgiving collision)
    pub hitbox_half_width: f32,
    pub hitbox_half_height: f32,
    /// Starting lives, kept within `1..=LIVES_CAP`
    pub max_lives: u8,
    /// Invincibility window after losing a life
    pub invincibility_ms: f32,
    /// Fraction of the jump velocity applied as a bounce after damage
    pub bounce_factor: f32,

    // === Scrolling ===
    pub scroll_speed: f32,
    pub max_scroll_speed: f32,
    /// Scroll speed gained per millisecond of run time
    pub speed_increment_per_ms: f32,
    pub speed_boost_multiplier: f32,

    // === Obstacles ===
    pub obstacle_width: f32,
    pub gap_size: f32,
    pub min_gap_size: f32,
    pub gap_shrink_per_frame: f32,
    pub spawn_interval_ms: f32,
    pub min_spawn_interval_ms: f32,
    pub spawn_interval_decay_per_frame: f32,
    /// Smallest allowed gap top
    pub min_gap_top: f32,
    /// Largest gap top as a fraction of the playable height
    pub max_gap_top_ratio: f32,
    /// Obstacles appear this far past the right edge
    pub spawn_offset: f32,
    /// Obstacles are removed once this far past the left edge
    pub despawn_margin: f32,

    // === Collectibles ===
    /// Horizontal offset of gap items from the obstacle's left edge
    pub collectible_offset_x: f32,
    pub egg_chance: f32,
    /// Egg vertical spread as a fraction of the gap size
    pub egg_spread: f32,
    pub powerup_chance: f32,
    pub powerup_spread: f32,
    pub powerup_duration_ms: f32,
    pub coin_points: u32,
    pub egg_points: u32,
    pub magnet_radius: f32,
    /// Pull speed at zero distance; falls off linearly to zero at the radius
    pub magnet_pull: f32,
    /// Collectibles are removed once their x drops below this
    pub collectible_despawn_x: f32,

    // === Flow ===
    /// Input is ignored this long after entering game over / stage complete
    pub input_guard_ms: f32,
    /// Endless mode changes biome every N obstacles passed
    pub endless_theme_cycle: u32,
    pub max_frame_ms: f32,
    pub nominal_frame_ms: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            ground_height: GROUND_HEIGHT,

            player_x: 120.0,
            gravity: 0.10,
            jump_velocity: -3.5,
            max_fall_speed: 3.0,
            ceiling_y: -20.0,
            ground_margin: 15.0,
            hitbox_half_width: 16.0,
            hitbox_half_height: 14.0,
            max_lives: 3,
            invincibility_ms: 2000.0,
            bounce_factor: 0.8,

            scroll_speed: 2.0,
            max_scroll_speed: 3.5,
            speed_increment_per_ms: 0.00015,
            speed_boost_multiplier: 1.4,

            obstacle_width: 70.0,
            gap_size: 165.0,
            min_gap_size: 125.0,
            gap_shrink_per_frame: 0.02 * 0.016,
            spawn_interval_ms: 1800.0,
            min_spawn_interval_ms: 1200.0,
            spawn_interval_decay_per_frame: 0.05,
            min_gap_top: 60.0,
            max_gap_top_ratio: 0.55,
            spawn_offset: 10.0,
            despawn_margin: 10.0,

            collectible_offset_x: 35.0,
            egg_chance: 0.2,
            egg_spread: 0.25,
            powerup_chance: 0.15,
            powerup_spread: 0.2,
            powerup_duration_ms: 5000.0,
            coin_points: 1,
            egg_points: 5,
            magnet_radius: 120.0,
            magnet_pull: 5.0,
            collectible_despawn_x: -30.0,

            input_guard_ms: 500.0,
            endless_theme_cycle: 15,
            max_frame_ms: MAX_FRAME_MS,
            nominal_frame_ms: NOMINAL_FRAME_MS,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Self = serde_json::from_str(json)?;
        Ok(tuning.clamped())
    }

    /// Pull out-of-range values back into the playable range
    pub fn clamped(mut self) -> Self {
        let lives = self.starting_lives();
        if lives != self.max_lives {
            log::warn!("max_lives {} out of range, using {lives}", self.max_lives);
            self.max_lives = lives;
        }
        self
    }

    /// Lives at run start, whatever `max_lives` holds
    #[inline]
    pub fn starting_lives(&self) -> u8 {
        self.max_lives.clamp(1, LIVES_CAP)
    }

    /// Parse tuning from JSON, falling back to defaults on malformed input
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("Invalid tuning ({e}), using defaults");
                Self::default()
            }
        }
    }

    /// Height above the ground where the player can fly
    #[inline]
    pub fn playable_height(&self) -> f32 {
        self.field_height - self.ground_height
    }

    /// Y coordinate of the ground surface (bottom of every obstacle)
    #[inline]
    pub fn floor_y(&self) -> f32 {
        self.playable_height()
    }

    /// Largest gap top the generator may pick
    #[inline]
    pub fn max_gap_top(&self) -> f32 {
        self.playable_height() * self.max_gap_top_ratio
    }

    /// Vertical center of the field (player start height)
    #[inline]
    pub fn mid_height(&self) -> f32 {
        self.field_height / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_geometry() {
        let t = Tuning::default();
        assert_eq!(t.playable_height(), 520.0);
        assert_eq!(t.floor_y(), 520.0);
        assert!((t.max_gap_top() - 286.0).abs() < 1e-3);
        assert!(t.min_gap_top < t.max_gap_top());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let t = Tuning::from_json(r#"{ "endless_theme_cycle": 5, "gravity": 0.2 }"#).unwrap();
        assert_eq!(t.endless_theme_cycle, 5);
        assert_eq!(t.gravity, 0.2);
        assert_eq!(t.gap_size, 165.0);
        assert_eq!(t.max_lives, 3);
    }

    #[test]
    fn test_lives_clamped_on_load() {
        let t = Tuning::from_json(r#"{ "max_lives": 9 }"#).unwrap();
        assert_eq!(t.max_lives, LIVES_CAP);
        let t = Tuning::from_json(r#"{ "max_lives": 0 }"#).unwrap();
        assert_eq!(t.max_lives, 1);

        // Built in code without going through JSON
        let t = Tuning {
            max_lives: 200,
            ..Tuning::default()
        };
        assert_eq!(t.starting_lives(), LIVES_CAP);
    }

    #[test]
    fn test_malformed_json_falls_back() {
        assert!(Tuning::from_json("{ not json").is_err());
        assert_eq!(Tuning::from_json_or_default("{ not json"), Tuning::default());
    }
}
