//! Game state and core simulation types
//!
//! Entities are plain data with small update/query helpers. Collections of
//! them are owned by the managers in `obstacles`, `collectibles` and
//! `particles`; the single [`Player`] is owned by the game controller.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::theme::Theme;
use crate::tuning::Tuning;
use crate::{frame_factor, lerp};

/// Current phase of the game flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, hen idles
    Menu,
    /// Choosing endless or adventure
    ModeSelect,
    /// Hen hovers, waiting for the first flap
    GetReady,
    /// Active gameplay
    Playing,
    /// Run ended (lives exhausted)
    GameOver,
    /// Adventure stage cleared
    StageComplete,
}

/// Play mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameMode {
    /// Unlimited obstacles, biome rotates every few obstacles
    #[default]
    Endless,
    /// Three stages with fixed quotas and biomes
    Adventure,
}

/// A boolean flag backed by a countdown in milliseconds.
///
/// The flag is active while time remains; it clears as soon as the
/// accumulated deltas reach the starting duration.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TimedFlag {
    remaining_ms: f32,
}

impl TimedFlag {
    pub fn start(&mut self, duration_ms: f32) {
        self.remaining_ms = duration_ms.max(0.0);
    }

    pub fn clear(&mut self) {
        self.remaining_ms = 0.0;
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.remaining_ms > 0.0
    }

    pub fn remaining_ms(&self) -> f32 {
        self.remaining_ms
    }

    /// Remaining fraction of `total_ms` (for HUD bars)
    pub fn ratio(&self, total_ms: f32) -> f32 {
        if total_ms <= 0.0 {
            0.0
        } else {
            (self.remaining_ms / total_ms).clamp(0.0, 1.0)
        }
    }

    pub fn tick(&mut self, dt_ms: f32) {
        if self.remaining_ms > 0.0 {
            self.remaining_ms = (self.remaining_ms - dt_ms).max(0.0);
        }
    }
}

/// Damage look of the hen, derived from remaining lives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageTier {
    Healthy,
    Scuffed,
    Bruised,
}

/// Milliseconds per wing animation frame
const WING_FRAME_MS: f32 = 150.0;
/// Number of wing animation frames
const WING_FRAMES: u8 = 3;

/// The hen and its rider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// x is the fixed lane, y is free
    pub pos: Vec2,
    /// Vertical velocity in px per reference frame (positive = down)
    pub velocity: f32,
    /// Visual tilt (radians), eased toward a velocity-derived target
    pub rotation: f32,
    pub alive: bool,
    pub lives: u8,
    pub invincible: TimedFlag,
    pub shield: TimedFlag,
    pub speed_boost: TimedFlag,
    pub magnet: TimedFlag,
    pub wing_frame: u8,
    wing_timer_ms: f32,
    /// 1.0 right after a flap, decays to 0
    pub flap_animation: f32,
    /// Idle bob offset used in menus
    pub bob_offset: f32,
    bob_timer_ms: f32,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.player_x, tuning.mid_height()),
            velocity: 0.0,
            rotation: 0.0,
            alive: true,
            lives: tuning.starting_lives(),
            invincible: TimedFlag::default(),
            shield: TimedFlag::default(),
            speed_boost: TimedFlag::default(),
            magnet: TimedFlag::default(),
            wing_frame: 0,
            wing_timer_ms: 0.0,
            flap_animation: 0.0,
            bob_offset: 0.0,
            bob_timer_ms: 0.0,
        }
    }

    /// Restore a fresh hen at height `y`
    pub fn reset(&mut self, tuning: &Tuning, y: f32) {
        *self = Self::new(tuning);
        self.pos.y = y;
    }

    #[inline]
    pub fn is_invincible(&self) -> bool {
        self.invincible.is_active()
    }

    #[inline]
    pub fn has_shield(&self) -> bool {
        self.shield.is_active()
    }

    #[inline]
    pub fn has_speed_boost(&self) -> bool {
        self.speed_boost.is_active()
    }

    #[inline]
    pub fn has_magnet(&self) -> bool {
        self.magnet.is_active()
    }

    pub fn flap(&mut self, tuning: &Tuning) {
        if !self.alive {
            return;
        }
        self.velocity = tuning.jump_velocity;
        self.flap_animation = 1.0;
        self.wing_frame = 0;
    }

    /// Physics, animation and timers for one tick
    pub fn update(&mut self, dt_ms: f32, tuning: &Tuning) {
        let f = frame_factor(dt_ms);

        if !self.alive {
            // Death tumble: heavier fall, nose down
            self.velocity += tuning.gravity * 1.5 * f;
            self.pos.y += self.velocity * f;
            self.rotation = (self.rotation + 0.05 * f).min(std::f32::consts::FRAC_PI_2);
            return;
        }

        self.velocity = (self.velocity + tuning.gravity * f).min(tuning.max_fall_speed);
        self.pos.y += self.velocity * f;

        let target = (self.velocity * 0.06).clamp(-0.4, std::f32::consts::FRAC_PI_4);
        self.rotation = lerp(self.rotation, target, (0.1 * f).min(1.0));

        self.animate(dt_ms);
        self.tick_timers(dt_ms);

        if self.pos.y < tuning.ceiling_y {
            self.pos.y = tuning.ceiling_y;
            self.velocity = 0.0;
        }
    }

    /// Wing flapping, flap decay and idle bob (no physics)
    pub fn animate(&mut self, dt_ms: f32) {
        self.wing_timer_ms += dt_ms;
        if self.wing_timer_ms > WING_FRAME_MS {
            self.wing_timer_ms = 0.0;
            self.wing_frame = (self.wing_frame + 1) % WING_FRAMES;
        }

        if self.flap_animation > 0.0 {
            self.flap_animation = (self.flap_animation - 0.05 * frame_factor(dt_ms)).max(0.0);
        }

        self.bob_timer_ms += dt_ms;
        self.bob_offset = (self.bob_timer_ms / 300.0).sin() * 4.0;
    }

    /// Count down invincibility and power-up timers
    pub fn tick_timers(&mut self, dt_ms: f32) {
        self.invincible.tick(dt_ms);
        self.shield.tick(dt_ms);
        self.speed_boost.tick(dt_ms);
        self.magnet.tick(dt_ms);
    }

    /// Collision box, smaller than the sprite
    pub fn hitbox(&self, tuning: &Tuning) -> Rect {
        Rect::from_center(
            self.pos,
            tuning.hitbox_half_width * 2.0,
            tuning.hitbox_half_height * 2.0,
        )
    }

    /// Take one life. Returns true while lives remain, in which case the hen
    /// bounces upward and becomes briefly invincible.
    pub fn lose_life(&mut self, tuning: &Tuning) -> bool {
        self.lives = self.lives.saturating_sub(1);
        if self.lives > 0 {
            self.velocity = tuning.jump_velocity * tuning.bounce_factor;
            self.invincible.start(tuning.invincibility_ms);
            true
        } else {
            false
        }
    }

    /// Spend the shield on a hit
    pub fn consume_shield(&mut self) {
        self.shield.clear();
    }

    /// Start the timed flag for a power-up kind. Scoring kinds are ignored.
    pub fn activate_power_up(&mut self, kind: CollectibleKind, duration_ms: f32) {
        match kind {
            CollectibleKind::Shield => self.shield.start(duration_ms),
            CollectibleKind::Speed => self.speed_boost.start(duration_ms),
            CollectibleKind::Magnet => self.magnet.start(duration_ms),
            CollectibleKind::Coin | CollectibleKind::Egg => {}
        }
    }

    pub fn damage_tier(&self) -> DamageTier {
        match self.lives {
            3.. => DamageTier::Healthy,
            2 => DamageTier::Scuffed,
            _ => DamageTier::Bruised,
        }
    }
}

/// The two obstacle silhouettes; each biome draws them differently
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleVariant {
    Column,
    Canopy,
}

/// Concrete obstacle art for a (theme, variant) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleArt {
    PalmTree,
    Rooftop,
    Bamboo,
    Vine,
    RockSpire,
    IcePillar,
}

/// A gapped obstacle scrolling toward the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Left edge
    pub x: f32,
    pub width: f32,
    /// Top of the passable gap
    pub gap_y: f32,
    /// Height of the passable gap
    pub gap_size: f32,
    /// Ground surface; bottom of the lower body
    pub floor_y: f32,
    pub variant: ObstacleVariant,
    pub theme: Theme,
    /// Set once, when the trailing edge passes the player
    pub scored: bool,
    /// Per-obstacle color jitter for presentation
    pub shade: f32,
    /// Palette row for presentation (0..3)
    pub tint: u8,
}

impl Obstacle {
    /// Upper solid body: `[0, gap_y]`
    pub fn top_rect(&self) -> Rect {
        Rect::new(self.x, 0.0, self.width, self.gap_y)
    }

    /// Lower solid body: `[gap_y + gap_size, floor]`
    pub fn bottom_rect(&self) -> Rect {
        let bottom_y = self.gap_y + self.gap_size;
        Rect::new(self.x, bottom_y, self.width, self.floor_y - bottom_y)
    }

    /// Trailing edge
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn is_off_screen(&self, margin: f32) -> bool {
        self.right() < -margin
    }

    pub fn collides(&self, hitbox: &Rect) -> bool {
        hitbox.overlaps(&self.top_rect()) || hitbox.overlaps(&self.bottom_rect())
    }

    pub fn art(&self) -> ObstacleArt {
        match (self.theme, self.variant) {
            (Theme::Village, ObstacleVariant::Column) => ObstacleArt::PalmTree,
            (Theme::Village, ObstacleVariant::Canopy) => ObstacleArt::Rooftop,
            (Theme::Forest, ObstacleVariant::Column) => ObstacleArt::Bamboo,
            (Theme::Forest, ObstacleVariant::Canopy) => ObstacleArt::Vine,
            (Theme::Mountain, ObstacleVariant::Column) => ObstacleArt::RockSpire,
            (Theme::Mountain, ObstacleVariant::Canopy) => ObstacleArt::IcePillar,
        }
    }
}

/// Collectible item kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollectibleKind {
    Coin,
    /// Golden egg
    Egg,
    Speed,
    Shield,
    Magnet,
}

impl CollectibleKind {
    pub const POWER_UPS: [CollectibleKind; 3] = [
        CollectibleKind::Speed,
        CollectibleKind::Shield,
        CollectibleKind::Magnet,
    ];

    pub fn is_power_up(&self) -> bool {
        match self {
            CollectibleKind::Coin | CollectibleKind::Egg => false,
            CollectibleKind::Speed | CollectibleKind::Shield | CollectibleKind::Magnet => true,
        }
    }

    /// Points awarded on pickup (power-ups score nothing)
    pub fn points(&self, tuning: &Tuning) -> u32 {
        match self {
            CollectibleKind::Coin => tuning.coin_points,
            CollectibleKind::Egg => tuning.egg_points,
            CollectibleKind::Speed | CollectibleKind::Shield | CollectibleKind::Magnet => 0,
        }
    }

    /// Hitbox edge length
    pub fn size(&self) -> f32 {
        match self {
            CollectibleKind::Coin => 10.0,
            CollectibleKind::Egg => 14.0,
            CollectibleKind::Speed | CollectibleKind::Shield | CollectibleKind::Magnet => 16.0,
        }
    }

    /// Popup text shown when a power-up is picked up
    pub fn power_up_label(&self) -> Option<&'static str> {
        match self {
            CollectibleKind::Speed => Some("🚀 SPEED!"),
            CollectibleKind::Shield => Some("🛡️ SHIELD!"),
            CollectibleKind::Magnet => Some("🧲 MAGNET!"),
            CollectibleKind::Coin | CollectibleKind::Egg => None,
        }
    }
}

/// A coin, egg or power-up floating in a gap
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collectible {
    pub id: u32,
    pub pos: Vec2,
    pub kind: CollectibleKind,
    pub collected: bool,
    /// Bob phase (radians); offsets both the sprite and the hitbox
    pub bob_phase: f32,
    /// Visual spin
    pub rotation: f32,
    /// Currently being pulled by a magnet
    pub attracting: bool,
}

impl Collectible {
    pub fn new(id: u32, pos: Vec2, kind: CollectibleKind, bob_phase: f32) -> Self {
        Self {
            id,
            pos,
            kind,
            collected: false,
            bob_phase,
            rotation: 0.0,
            attracting: false,
        }
    }

    pub fn hitbox(&self) -> Rect {
        let size = self.kind.size();
        Rect::new(
            self.pos.x - size / 2.0,
            self.pos.y - size / 2.0 + self.bob_phase.sin() * 3.0,
            size,
            size,
        )
    }

    pub fn is_off_screen(&self, despawn_x: f32) -> bool {
        self.pos.x < despawn_x
    }
}

/// Particle sprite shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    Circle,
    Feather,
    Star,
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    /// px per reference frame
    pub vel: Vec2,
    pub gravity: f32,
    /// 0-1, decreases by `decay` per reference frame
    pub life: f32,
    pub decay: f32,
    pub size: f32,
    pub rotation: f32,
    pub rotation_speed: f32,
    /// 0xRRGGBB
    pub color: u32,
    pub kind: ParticleKind,
}

impl Particle {
    /// Advance by `f` reference frames. Returns false once the particle is dead.
    pub fn update(&mut self, f: f32) -> bool {
        self.pos += self.vel * f;
        self.vel.y += self.gravity * f;
        self.life -= self.decay * f;
        self.rotation += self.rotation_speed * f;
        self.life > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::REFERENCE_FRAME_MS;

    fn obstacle(gap_y: f32, gap_size: f32) -> Obstacle {
        Obstacle {
            id: 1,
            x: 100.0,
            width: 70.0,
            gap_y,
            gap_size,
            floor_y: 520.0,
            variant: ObstacleVariant::Column,
            theme: Theme::Village,
            scored: false,
            shade: 0.0,
            tint: 0,
        }
    }

    #[test]
    fn test_obstacle_bodies_plus_gap_fill_playable_height() {
        let obs = obstacle(200.0, 165.0);
        let total = obs.top_rect().h + obs.gap_size + obs.bottom_rect().h;
        assert!((total - 520.0).abs() < 1e-4);
    }

    #[test]
    fn test_gap_scenario() {
        // 600 field, 80 ground, gap 200..365
        let tuning = Tuning::default();
        let mut obs = obstacle(200.0, 165.0);
        obs.x = tuning.player_x - 35.0;

        let mut player = Player::new(&tuning);
        // Hitbox resting exactly on the gap's top edge is still inside the gap
        player.pos.y = 200.0 + tuning.hitbox_half_height;
        let hitbox = player.hitbox(&tuning);
        assert_eq!(hitbox.y, 200.0);
        assert_eq!(hitbox.h, 28.0);
        assert!(!obs.collides(&hitbox));

        // Gap center
        player.pos.y = 200.0 + 165.0 / 2.0;
        assert!(!obs.collides(&player.hitbox(&tuning)));

        // Hitbox reaching 10px above the gap clips the upper body
        player.pos.y = 190.0 + tuning.hitbox_half_height;
        assert!(obs.collides(&player.hitbox(&tuning)));

        // A center at y = 190 puts the 28px hitbox at 176..204, which clips
        // the upper body that ends at 200
        player.pos.y = 190.0;
        let hitbox = player.hitbox(&tuning);
        assert_eq!((hitbox.y, hitbox.bottom()), (176.0, 204.0));
        assert!(hitbox.overlaps(&obs.top_rect()));
        assert!(obs.collides(&hitbox));

        player.pos.y = 10.0;
        assert!(player.hitbox(&tuning).overlaps(&obs.top_rect()));
        assert!(obs.collides(&player.hitbox(&tuning)));
    }

    #[test]
    fn test_obstacle_art_per_theme() {
        let mut obs = obstacle(100.0, 150.0);
        obs.theme = Theme::Forest;
        obs.variant = ObstacleVariant::Canopy;
        assert_eq!(obs.art(), ObstacleArt::Vine);
        obs.theme = Theme::Mountain;
        obs.variant = ObstacleVariant::Column;
        assert_eq!(obs.art(), ObstacleArt::RockSpire);
    }

    #[test]
    fn test_timed_flag_clears_after_exact_duration() {
        let mut flag = TimedFlag::default();
        flag.start(5000.0);
        // Uneven granularity, same total
        let steps = [7.0, 16.0, 33.0, 100.0, 1.0, 43.0];
        let mut elapsed = 0.0;
        let mut i = 0;
        while elapsed + steps[i % steps.len()] < 5000.0 {
            flag.tick(steps[i % steps.len()]);
            elapsed += steps[i % steps.len()];
            i += 1;
            assert!(flag.is_active());
        }
        flag.tick(5000.0 - elapsed);
        assert!(!flag.is_active());
    }

    #[test]
    fn test_lose_life_grants_invincibility() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        assert!(player.lose_life(&tuning));
        assert_eq!(player.lives, 2);
        assert!(player.is_invincible());
        assert!((player.velocity - tuning.jump_velocity * 0.8).abs() < 1e-6);
        assert!(player.lose_life(&tuning));
        assert!(!player.lose_life(&tuning));
        assert_eq!(player.lives, 0);
        // Never wraps below zero
        assert!(!player.lose_life(&tuning));
        assert_eq!(player.lives, 0);
    }

    #[test]
    fn test_gravity_and_fall_cap() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        for _ in 0..200 {
            player.update(REFERENCE_FRAME_MS, &tuning);
        }
        assert!((player.velocity - tuning.max_fall_speed).abs() < 1e-4);
    }

    #[test]
    fn test_ceiling_clamps_without_damage() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        player.pos.y = tuning.ceiling_y + 1.0;
        player.velocity = -10.0;
        player.update(REFERENCE_FRAME_MS, &tuning);
        assert_eq!(player.pos.y, tuning.ceiling_y);
        assert_eq!(player.velocity, 0.0);
        assert_eq!(player.lives, 3);
    }

    #[test]
    fn test_flap_ignored_when_dead() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        player.alive = false;
        player.velocity = 2.0;
        player.flap(&tuning);
        assert_eq!(player.velocity, 2.0);
    }

    #[test]
    fn test_power_up_activation() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        player.activate_power_up(CollectibleKind::Magnet, 5000.0);
        player.activate_power_up(CollectibleKind::Coin, 5000.0);
        assert!(player.has_magnet());
        assert!(!player.has_shield());
        assert!(!player.has_speed_boost());
    }

    #[test]
    fn test_collectible_kinds() {
        let tuning = Tuning::default();
        assert_eq!(CollectibleKind::Coin.points(&tuning), 1);
        assert_eq!(CollectibleKind::Egg.points(&tuning), 5);
        for kind in CollectibleKind::POWER_UPS {
            assert!(kind.is_power_up());
            assert_eq!(kind.points(&tuning), 0);
            assert!(kind.power_up_label().is_some());
        }
        assert!(!CollectibleKind::Coin.is_power_up());
        assert!(!CollectibleKind::Egg.is_power_up());
    }

    #[test]
    fn test_damage_tier() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        assert_eq!(player.damage_tier(), DamageTier::Healthy);
        player.lives = 2;
        assert_eq!(player.damage_tier(), DamageTier::Scuffed);
        player.lives = 1;
        assert_eq!(player.damage_tier(), DamageTier::Bruised);
    }

    mod timer_props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn timed_flag_active_until_deltas_reach_duration(
                duration in 1u32..3000,
                steps in proptest::collection::vec(1u32..50, 1..200),
            ) {
                let mut flag = TimedFlag::default();
                flag.start(duration as f32);
                let mut elapsed = 0u32;
                for step in steps {
                    flag.tick(step as f32);
                    elapsed += step;
                    prop_assert_eq!(flag.is_active(), elapsed < duration);
                }
            }
        }
    }
}
