//! Collision detection and hit response for the hen
//!
//! Detection is plain AABB overlap against the two solid bodies of each
//! obstacle plus a ground line. Response is shared by both: a hit walks the
//! invincibility -> shield -> lives ladder exactly once.

use super::rect::Rect;
use super::state::{Obstacle, Player};
use crate::tuning::Tuning;

/// What a hit did to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Invincible, nothing happens
    Ignored,
    /// Shield spent instead of a life
    ShieldAbsorbed,
    /// One life lost, more remain
    LifeLost,
    /// Last life lost; the run is over
    Fatal,
}

/// Number of obstacles whose solid bodies overlap `hitbox`.
/// Each one is a separate hit.
pub fn count_hits(hitbox: &Rect, obstacles: &[Obstacle]) -> usize {
    obstacles.iter().filter(|o| o.collides(hitbox)).count()
}

/// Ground contact for a player center at `y`
#[inline]
pub fn touches_ground(y: f32, tuning: &Tuning) -> bool {
    y > tuning.floor_y() - tuning.ground_margin
}

/// Apply one hit to the player.
///
/// On a fatal hit the player is marked dead so it starts its fall.
pub fn resolve_hit(player: &mut Player, tuning: &Tuning) -> HitOutcome {
    if player.is_invincible() {
        return HitOutcome::Ignored;
    }
    if player.has_shield() {
        player.consume_shield();
        return HitOutcome::ShieldAbsorbed;
    }
    if player.lose_life(tuning) {
        HitOutcome::LifeLost
    } else {
        player.alive = false;
        HitOutcome::Fatal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{CollectibleKind, ObstacleVariant};
    use crate::theme::Theme;

    fn obstacle_at(x: f32) -> Obstacle {
        Obstacle {
            id: 1,
            x,
            width: 70.0,
            gap_y: 200.0,
            gap_size: 165.0,
            floor_y: 520.0,
            variant: ObstacleVariant::Canopy,
            theme: Theme::Village,
            scored: false,
            shade: 0.0,
            tint: 0,
        }
    }

    #[test]
    fn test_hits_any_obstacle() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        player.pos.y = 100.0;
        let far = obstacle_at(500.0);
        let near = obstacle_at(100.0);
        assert_eq!(count_hits(&player.hitbox(&tuning), &[far.clone()]), 0);
        assert_eq!(count_hits(&player.hitbox(&tuning), &[far, near]), 1);
    }

    #[test]
    fn test_count_hits_per_obstacle() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        player.pos.y = 100.0;
        let hitbox = player.hitbox(&tuning);
        let obstacles = [obstacle_at(100.0), obstacle_at(110.0), obstacle_at(500.0)];
        assert_eq!(count_hits(&hitbox, &obstacles), 2);
        assert_eq!(count_hits(&hitbox, &obstacles[2..]), 0);
    }

    #[test]
    fn test_ground_line() {
        let tuning = Tuning::default();
        // floor 520, margin 15
        assert!(!touches_ground(505.0, &tuning));
        assert!(touches_ground(505.1, &tuning));
    }

    #[test]
    fn test_invincible_ignores_hits() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        player.invincible.start(2000.0);
        for _ in 0..10 {
            assert_eq!(resolve_hit(&mut player, &tuning), HitOutcome::Ignored);
        }
        assert_eq!(player.lives, 3);
    }

    #[test]
    fn test_shield_absorbs_exactly_one_hit() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        player.activate_power_up(CollectibleKind::Shield, 5000.0);

        assert_eq!(resolve_hit(&mut player, &tuning), HitOutcome::ShieldAbsorbed);
        assert!(!player.has_shield());
        assert_eq!(player.shield.remaining_ms(), 0.0);
        assert_eq!(player.lives, 3);

        assert_eq!(resolve_hit(&mut player, &tuning), HitOutcome::LifeLost);
        assert_eq!(player.lives, 2);
    }

    #[test]
    fn test_last_life_is_fatal() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        player.lives = 1;
        assert_eq!(resolve_hit(&mut player, &tuning), HitOutcome::Fatal);
        assert_eq!(player.lives, 0);
        assert!(!player.alive);
    }
}
