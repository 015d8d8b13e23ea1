//! Coins, golden eggs and power-ups
//!
//! Every new obstacle gets a coin in the middle of its gap, sometimes an egg,
//! and rarely a power-up. Items scroll with the world, bob, and can be pulled
//! toward the hen by an active magnet.

use glam::Vec2;

use super::obstacles::SpawnedGap;
use super::rect::Rect;
use super::rng::SimRng;
use super::state::{Collectible, CollectibleKind};
use crate::tuning::Tuning;

/// Magnet field around the player
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MagnetField {
    pub center: Vec2,
    pub radius: f32,
    /// Pull at zero distance (px per reference frame)
    pub strength: f32,
}

impl MagnetField {
    /// Displacement applied to an item at `pos` for one reference frame.
    ///
    /// Zero outside the radius; grows linearly to `strength` at the center.
    pub fn pull(&self, pos: Vec2) -> Vec2 {
        let to_center = self.center - pos;
        let dist = to_center.length();
        if dist >= self.radius || self.radius <= 0.0 {
            return Vec2::ZERO;
        }
        let speed = (self.radius - dist) / self.radius * self.strength;
        to_center.normalize_or_zero() * speed
    }

    pub fn in_range(&self, pos: Vec2) -> bool {
        pos.distance(self.center) < self.radius
    }
}

/// What the player picked up this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pickup {
    pub kind: CollectibleKind,
    pub pos: Vec2,
}

/// Owns the collectible collection
#[derive(Debug, Clone, Default)]
pub struct CollectibleManager {
    items: Vec<Collectible>,
    next_id: u32,
}

impl CollectibleManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[Collectible] {
        &self.items
    }

    fn push(&mut self, pos: Vec2, kind: CollectibleKind, rng: &mut SimRng) {
        self.next_id += 1;
        let item = Collectible::new(self.next_id, pos, kind, rng.angle());
        log::debug!("Spawned {:?} at ({:.0}, {:.0})", kind, pos.x, pos.y);
        self.items.push(item);
    }

    /// Populate the gap of a new obstacle
    pub fn spawn_in_gap(&mut self, gap: SpawnedGap, rng: &mut SimRng, tuning: &Tuning) {
        let x = gap.x + tuning.collectible_offset_x;
        let center_y = gap.gap_y + gap.gap_size / 2.0;

        // Always a coin
        self.push(Vec2::new(x, center_y), CollectibleKind::Coin, rng);

        if rng.chance(tuning.egg_chance) {
            let spread = gap.gap_size * tuning.egg_spread;
            let y = clamp_into_gap(center_y + rng.range(-spread, spread), gap, CollectibleKind::Egg);
            self.push(Vec2::new(x, y), CollectibleKind::Egg, rng);
        }

        if rng.chance(tuning.powerup_chance) {
            let kind = rng.pick(&CollectibleKind::POWER_UPS);
            let spread = gap.gap_size * tuning.powerup_spread;
            let y = clamp_into_gap(center_y + rng.range(-spread, spread), gap, kind);
            self.push(Vec2::new(x, y), kind, rng);
        }
    }

    /// Scroll, bob, apply the magnet, then drop collected and off-screen items
    pub fn update(&mut self, speed: f32, f: f32, magnet: Option<MagnetField>, tuning: &Tuning) {
        for item in &mut self.items {
            item.pos.x -= speed * f;
            item.bob_phase += 0.05 * f;
            item.rotation += 0.03 * f;

            if let Some(field) = magnet
                && !item.kind.is_power_up()
                && field.in_range(item.pos)
            {
                item.attracting = true;
                item.pos += field.pull(item.pos) * f;
            }
        }

        let despawn_x = tuning.collectible_despawn_x;
        self.items
            .retain(|i| !i.collected && !i.is_off_screen(despawn_x));
    }

    /// Mark every uncollected item overlapping `hitbox` as collected
    pub fn collect_overlapping(&mut self, hitbox: &Rect) -> Vec<Pickup> {
        let mut picked = Vec::new();
        for item in &mut self.items {
            if item.collected {
                continue;
            }
            if hitbox.overlaps(&item.hitbox()) {
                item.collected = true;
                picked.push(Pickup {
                    kind: item.kind,
                    pos: item.pos,
                });
            }
        }
        picked
    }

    #[cfg(test)]
    pub(crate) fn insert(&mut self, pos: Vec2, kind: CollectibleKind) {
        self.next_id += 1;
        self.items.push(Collectible::new(self.next_id, pos, kind, 0.0));
    }
}

/// Keep an item's box inside the gap even for extreme spreads
fn clamp_into_gap(y: f32, gap: SpawnedGap, kind: CollectibleKind) -> f32 {
    let half = kind.size() / 2.0;
    let min = gap.gap_y + half;
    let max = gap.gap_y + gap.gap_size - half;
    if min > max {
        gap.gap_y + gap.gap_size / 2.0
    } else {
        y.clamp(min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gap() -> SpawnedGap {
        SpawnedGap {
            x: 800.0,
            gap_y: 200.0,
            gap_size: 165.0,
        }
    }

    #[test]
    fn test_gap_always_has_coin_in_center() {
        let tuning = Tuning::default();
        let mut rng = SimRng::new(9);
        let mut mgr = CollectibleManager::new();
        mgr.spawn_in_gap(gap(), &mut rng, &tuning);
        let coin = &mgr.items()[0];
        assert_eq!(coin.kind, CollectibleKind::Coin);
        assert_eq!(coin.pos, Vec2::new(835.0, 282.5));
    }

    #[test]
    fn test_items_stay_inside_gap() {
        let mut tuning = Tuning::default();
        tuning.egg_chance = 1.0;
        tuning.powerup_chance = 1.0;
        tuning.egg_spread = 5.0;
        tuning.powerup_spread = 5.0;
        let mut rng = SimRng::new(77);
        let mut mgr = CollectibleManager::new();
        for _ in 0..50 {
            mgr.spawn_in_gap(gap(), &mut rng, &tuning);
        }
        for item in mgr.items() {
            let half = item.kind.size() / 2.0;
            assert!(item.pos.y - half >= 200.0 - 1e-3);
            assert!(item.pos.y + half <= 365.0 + 1e-3);
        }
        assert!(mgr.items().iter().any(|i| i.kind == CollectibleKind::Egg));
        assert!(mgr.items().iter().any(|i| i.kind.is_power_up()));
    }

    #[test]
    fn test_magnet_pulls_scoring_items_only() {
        let tuning = Tuning::default();
        let mut mgr = CollectibleManager::new();
        mgr.insert(Vec2::new(200.0, 300.0), CollectibleKind::Coin);
        mgr.insert(Vec2::new(200.0, 300.0), CollectibleKind::Shield);
        let field = MagnetField {
            center: Vec2::new(120.0, 300.0),
            radius: 120.0,
            strength: 5.0,
        };
        mgr.update(0.0, 1.0, Some(field), &tuning);
        let coin = &mgr.items()[0];
        let shield = &mgr.items()[1];
        // 80px away: (120 - 80) / 120 * 5
        assert!((coin.pos.x - (200.0 - 40.0 / 120.0 * 5.0)).abs() < 1e-4);
        assert!(coin.attracting);
        assert_eq!(shield.pos.x, 200.0);
        assert!(!shield.attracting);
    }

    #[test]
    fn test_magnet_linear_falloff() {
        let field = MagnetField {
            center: Vec2::ZERO,
            radius: 100.0,
            strength: 4.0,
        };
        assert_eq!(field.pull(Vec2::new(150.0, 0.0)), Vec2::ZERO);
        assert_eq!(field.pull(Vec2::new(100.0, 0.0)), Vec2::ZERO);
        assert!((field.pull(Vec2::new(50.0, 0.0)).x + 2.0).abs() < 1e-5);
        assert!((field.pull(Vec2::new(25.0, 0.0)).x + 3.0).abs() < 1e-5);
        assert_eq!(field.pull(Vec2::ZERO), Vec2::ZERO);
    }

    #[test]
    fn test_collect_and_compact() {
        let tuning = Tuning::default();
        let mut mgr = CollectibleManager::new();
        mgr.insert(Vec2::new(120.0, 300.0), CollectibleKind::Egg);
        mgr.insert(Vec2::new(400.0, 300.0), CollectibleKind::Coin);
        let hitbox = Rect::from_center(Vec2::new(120.0, 300.0), 32.0, 28.0);

        let picked = mgr.collect_overlapping(&hitbox);
        assert_eq!(picked.len(), 1);
        assert_eq!(picked[0].kind, CollectibleKind::Egg);
        // Already collected: not picked twice
        assert!(mgr.collect_overlapping(&hitbox).is_empty());

        mgr.update(0.0, 1.0, None, &tuning);
        assert_eq!(mgr.items().len(), 1);
        assert_eq!(mgr.items()[0].kind, CollectibleKind::Coin);
    }

    #[test]
    fn test_off_screen_items_removed() {
        let tuning = Tuning::default();
        let mut mgr = CollectibleManager::new();
        mgr.insert(Vec2::new(-25.0, 300.0), CollectibleKind::Coin);
        mgr.update(10.0, 1.0, None, &tuning);
        assert!(mgr.items().is_empty());
    }
}
