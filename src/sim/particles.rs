//! Particle effects and screen shake
//!
//! Particles are cosmetic but run on the simulation RNG so a seeded run stays
//! reproducible end to end.

use glam::Vec2;

use super::rng::SimRng;
use super::state::{Particle, ParticleKind};

const FEATHER_COLORS: [u32; 4] = [0xFFFFFF, 0xF5E6CA, 0xFFE0B2, 0xFFCCBC];
const SPARKLE_COLORS: [u32; 4] = [0xFFD700, 0xFFF176, 0xFFEB3B, 0xFFE082];
pub const COIN_COLOR: u32 = 0xFFD700;
pub const EGG_COLOR: u32 = 0xFFB300;
const TRAIL_COLOR: u32 = 0x2196F3;

/// Feathers in an explosion burst
const EXPLOSION_FEATHERS: usize = 15;
/// Shake intensity kicked by an explosion
const EXPLOSION_SHAKE: f32 = 8.0;

/// Decaying random camera offset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenShake {
    pub offset: Vec2,
    pub intensity: f32,
    /// Multiplier applied to intensity each reference frame
    pub decay: f32,
}

impl Default for ScreenShake {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            intensity: 0.0,
            decay: 0.9,
        }
    }
}

impl ScreenShake {
    pub fn kick(&mut self, intensity: f32) {
        self.intensity = self.intensity.max(intensity);
    }

    pub fn update(&mut self, f: f32, rng: &mut SimRng) {
        if self.intensity > 0.1 {
            self.offset = Vec2::new(
                rng.range(-0.5, 0.5) * self.intensity * 2.0,
                rng.range(-0.5, 0.5) * self.intensity * 2.0,
            );
            self.intensity *= self.decay.powf(f);
        } else {
            self.intensity = 0.0;
            self.offset = Vec2::ZERO;
        }
    }
}

/// Owns every live particle plus the screen shake
#[derive(Debug, Clone)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
    shake: ScreenShake,
    max_particles: usize,
    enabled: bool,
    shake_enabled: bool,
}

impl ParticleSystem {
    pub fn new(max_particles: usize) -> Self {
        Self {
            particles: Vec::with_capacity(max_particles.min(1024)),
            shake: ScreenShake::default(),
            max_particles,
            enabled: true,
            shake_enabled: true,
        }
    }

    /// Apply the user's effect settings
    pub fn configure(&mut self, enabled: bool, shake_enabled: bool, max_particles: usize) {
        self.enabled = enabled;
        self.shake_enabled = shake_enabled;
        self.max_particles = max_particles;
        if !enabled {
            self.particles.clear();
        }
        if !shake_enabled {
            self.shake = ScreenShake::default();
        }
        self.particles.truncate(max_particles);
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn shake(&self) -> &ScreenShake {
        &self.shake
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
        self.shake = ScreenShake::default();
    }

    pub fn update(&mut self, f: f32, rng: &mut SimRng) {
        self.particles.retain_mut(|p| p.update(f));
        self.shake.update(f, rng);
    }

    fn push(&mut self, particle: Particle) {
        if self.enabled && self.particles.len() < self.max_particles {
            self.particles.push(particle);
        }
    }

    /// Feathers shed by a flap
    pub fn emit_feathers(&mut self, pos: Vec2, count: usize, rng: &mut SimRng) {
        for _ in 0..count {
            let particle = Particle {
                pos: pos + Vec2::new(rng.range(-10.0, 10.0), rng.range(-10.0, 10.0)),
                vel: Vec2::new(rng.range(-3.0, 1.0), rng.range(-2.0, -0.5)),
                gravity: 0.03,
                life: 1.0,
                decay: rng.range(0.015, 0.03),
                size: rng.range(3.0, 6.0),
                rotation: rng.angle(),
                rotation_speed: rng.range(-0.1, 0.1),
                color: rng.pick(&FEATHER_COLORS),
                kind: ParticleKind::Feather,
            };
            self.push(particle);
        }
    }

    /// Radial burst of golden stars
    pub fn emit_sparkles(&mut self, pos: Vec2, count: usize, rng: &mut SimRng) {
        for _ in 0..count {
            let angle = rng.angle();
            let speed = rng.range(1.0, 4.0);
            let particle = Particle {
                pos,
                vel: Vec2::from_angle(angle) * speed,
                gravity: 0.0,
                life: 1.0,
                decay: rng.range(0.02, 0.04),
                size: rng.range(2.0, 5.0),
                rotation: rng.angle(),
                rotation_speed: rng.range(-0.2, 0.2),
                color: rng.pick(&SPARKLE_COLORS),
                kind: ParticleKind::Star,
            };
            self.push(particle);
        }
    }

    /// Small ring burst when an item is picked up
    pub fn emit_collect(&mut self, pos: Vec2, color: u32, rng: &mut SimRng) {
        for i in 0..6 {
            let angle = std::f32::consts::TAU * i as f32 / 6.0;
            let speed = rng.range(1.0, 3.0);
            let particle = Particle {
                pos,
                vel: Vec2::from_angle(angle) * speed,
                gravity: 0.02,
                life: 1.0,
                decay: rng.range(0.025, 0.05),
                size: rng.range(2.0, 4.0),
                rotation: 0.0,
                rotation_speed: 0.0,
                color,
                kind: ParticleKind::Circle,
            };
            self.push(particle);
        }
    }

    /// Feather explosion with screen shake (damage and game over)
    pub fn emit_explosion(&mut self, pos: Vec2, rng: &mut SimRng) {
        for _ in 0..EXPLOSION_FEATHERS {
            let angle = rng.angle();
            let speed = rng.range(2.0, 6.0);
            let particle = Particle {
                pos,
                vel: Vec2::from_angle(angle) * speed,
                gravity: 0.08,
                life: 1.0,
                decay: rng.range(0.01, 0.025),
                size: rng.range(4.0, 8.0),
                rotation: rng.angle(),
                rotation_speed: rng.range(-0.2, 0.2),
                color: rng.pick(&FEATHER_COLORS),
                kind: ParticleKind::Feather,
            };
            self.push(particle);
        }
        if self.shake_enabled {
            self.shake.kick(EXPLOSION_SHAKE);
        }
    }

    /// Speed-boost streak behind the hen
    pub fn emit_trail(&mut self, pos: Vec2, rng: &mut SimRng) {
        let particle = Particle {
            pos: pos + Vec2::new(-20.0, rng.range(-8.0, 8.0)),
            vel: Vec2::new(-2.0, 0.0),
            gravity: 0.0,
            life: 0.6,
            decay: 0.04,
            size: rng.range(2.0, 4.0),
            rotation: 0.0,
            rotation_speed: 0.0,
            color: TRAIL_COLOR,
            kind: ParticleKind::Circle,
        };
        self.push(particle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_particles_expire() {
        let mut rng = SimRng::new(5);
        let mut ps = ParticleSystem::new(500);
        ps.emit_sparkles(Vec2::new(400.0, 300.0), 12, &mut rng);
        assert_eq!(ps.len(), 12);
        // Slowest decay is 0.02 per frame: gone within 50 frames
        for _ in 0..51 {
            ps.update(1.0, &mut rng);
        }
        assert!(ps.is_empty());
    }

    #[test]
    fn test_cap_is_respected() {
        let mut rng = SimRng::new(5);
        let mut ps = ParticleSystem::new(20);
        for _ in 0..5 {
            ps.emit_explosion(Vec2::ZERO, &mut rng);
        }
        assert_eq!(ps.len(), 20);
    }

    #[test]
    fn test_explosion_shakes_then_settles() {
        let mut rng = SimRng::new(8);
        let mut ps = ParticleSystem::new(500);
        ps.emit_explosion(Vec2::new(120.0, 300.0), &mut rng);
        assert_eq!(ps.len(), 15);
        assert_eq!(ps.shake().intensity, 8.0);
        for _ in 0..200 {
            ps.update(1.0, &mut rng);
        }
        assert_eq!(ps.shake().intensity, 0.0);
        assert_eq!(ps.shake().offset, Vec2::ZERO);
    }

    #[test]
    fn test_disabled_effects() {
        let mut rng = SimRng::new(8);
        let mut ps = ParticleSystem::new(500);
        ps.configure(false, false, 500);
        ps.emit_explosion(Vec2::ZERO, &mut rng);
        ps.emit_feathers(Vec2::ZERO, 2, &mut rng);
        assert!(ps.is_empty());
        assert_eq!(ps.shake().intensity, 0.0);
    }

    #[test]
    fn test_collect_ring() {
        let mut rng = SimRng::new(1);
        let mut ps = ParticleSystem::new(500);
        ps.emit_collect(Vec2::new(50.0, 50.0), EGG_COLOR, &mut rng);
        assert_eq!(ps.len(), 6);
        assert!(ps.particles().iter().all(|p| p.color == EGG_COLOR));
        assert!(ps.particles().iter().all(|p| p.kind == ParticleKind::Circle));
    }
}
