//! Per-frame update
//!
//! `Game::update` sanitizes the frame delta, runs the clock-driven effects
//! and dispatches to the active phase. The Playing tick always moves every
//! entity before resolving collisions, and resolves collisions before scoring.

use glam::Vec2;

use super::collectibles::MagnetField;
use super::collision::{HitOutcome, count_hits, resolve_hit, touches_ground};
use super::game::{CELEBRATION_SPARKLES, Deferred, Game};
use super::particles::{COIN_COLOR, EGG_COLOR};
use super::stage;
use super::state::{CollectibleKind, GameMode, GamePhase};
use crate::audio::Sound;
use crate::theme::Theme;
use crate::ui::colors;
use crate::{frame_factor, sanitize_dt};

/// Background drift on the title and get-ready screens (px per frame)
const IDLE_SCROLL: f32 = 1.0;
/// Get-ready hover amplitude and period divisor
const HOVER_AMPLITUDE: f32 = 5.0;
const HOVER_PERIOD_MS: f32 = 300.0;

impl Game {
    /// Advance the game by one display frame of `dt_ms` milliseconds
    pub fn update(&mut self, dt_ms: f32) {
        let dt = sanitize_dt(dt_ms, self.tuning.max_frame_ms, self.tuning.nominal_frame_ms);
        let f = frame_factor(dt);

        self.popups.update(f);
        self.audio.tick(dt);
        for event in self.schedule.advance(dt) {
            self.run_deferred(event);
        }
        self.phase_ms += dt;

        match self.phase {
            GamePhase::Menu | GamePhase::ModeSelect => self.update_menu(dt, f),
            GamePhase::GetReady => self.update_get_ready(dt, f),
            GamePhase::Playing => self.update_playing(dt, f),
            GamePhase::GameOver => self.update_game_over(dt, f),
            GamePhase::StageComplete => self.particles.update(f, &mut self.rng),
        }
    }

    fn run_deferred(&mut self, event: Deferred) {
        match event {
            Deferred::CelebrationBurst => {
                let w = self.tuning.field_width;
                let h = self.tuning.field_height;
                let pos = Vec2::new(
                    self.rng.range(100.0, w - 100.0),
                    self.rng.range(100.0, h - 200.0),
                );
                self.particles
                    .emit_sparkles(pos, CELEBRATION_SPARKLES, &mut self.rng);
            }
        }
    }

    /// Hen idles in place, no gravity
    fn update_menu(&mut self, dt: f32, f: f32) {
        self.player.animate(dt);
        self.background_scroll += IDLE_SCROLL * f;
        self.particles.update(f, &mut self.rng);
    }

    /// Hen hovers at mid-height until the first flap
    fn update_get_ready(&mut self, dt: f32, f: f32) {
        self.player.animate(dt);
        self.player.pos.y = self.tuning.mid_height()
            + (self.phase_ms / HOVER_PERIOD_MS).sin() * HOVER_AMPLITUDE;
        self.player.velocity = 0.0;
        self.background_scroll += IDLE_SCROLL * f;
        self.particles.update(f, &mut self.rng);
    }

    /// Dead hen keeps falling; effects keep running
    fn update_game_over(&mut self, dt: f32, f: f32) {
        self.player.update(dt, &self.tuning);
        self.particles.update(f, &mut self.rng);
    }

    fn update_playing(&mut self, dt: f32, f: f32) {
        // Speed ramps with run time
        self.run_ms += dt;
        self.scroll_speed = (self.tuning.scroll_speed
            + self.run_ms * self.tuning.speed_increment_per_ms)
            .min(self.tuning.max_scroll_speed);
        let speed = if self.player.has_speed_boost() {
            self.scroll_speed * self.tuning.speed_boost_multiplier
        } else {
            self.scroll_speed
        };

        // Adventure: stop spawning once the quota is on screen
        if let Some(stage) = self.current_stage()
            && self.obstacles.total_spawned() >= stage.quota
        {
            self.obstacles.stop_spawning();
        }

        // Move everything
        self.player.update(dt, &self.tuning);
        self.background_scroll += speed * f;
        let spawned = self
            .obstacles
            .update(speed, f, self.run_ms, &mut self.rng, &self.tuning);
        let magnet = self.player.has_magnet().then(|| MagnetField {
            center: self.player.pos,
            radius: self.tuning.magnet_radius,
            strength: self.tuning.magnet_pull,
        });
        self.collectibles.update(speed, f, magnet, &self.tuning);
        self.particles.update(f, &mut self.rng);

        if self.player.has_speed_boost() {
            self.particles.emit_trail(self.player.pos, &mut self.rng);
        }
        if let Some(gap) = spawned {
            self.collectibles
                .spawn_in_gap(gap, &mut self.rng, &self.tuning);
        }

        // Obstacles: every overlapping obstacle is its own hit
        let hitbox = self.player.hitbox(&self.tuning);
        for _ in 0..count_hits(&hitbox, self.obstacles.obstacles()) {
            if self.apply_hit() {
                return;
            }
        }

        // Items
        for pickup in self.collectibles.collect_overlapping(&hitbox) {
            self.collect(pickup.kind, pickup.pos);
        }

        // Ground: same hit path, then back to mid-height; no scoring this tick
        if touches_ground(self.player.pos.y, &self.tuning) {
            if self.apply_hit() {
                return;
            }
            // Back to mid-height even when the hit was ignored
            self.player.pos.y = self.tuning.mid_height();
            return;
        }

        // Scoring
        let newly_scored = self.obstacles.mark_scored(self.player.pos.x);
        for _ in 0..newly_scored {
            self.score += 1;
            self.obstacles_passed += 1;
            self.audio.play(Sound::Score);
            if self.mode == GameMode::Endless {
                self.cycle_endless_theme();
            }
        }

        // Adventure: quota reached and the field is clear
        if let Some(stage) = self.current_stage()
            && self.obstacles_passed >= stage.quota
            && self.obstacles.is_empty()
        {
            self.stage_complete();
        }
    }

    /// Run one hit through the invincibility/shield/lives ladder.
    /// Returns true when the hit ended the run.
    fn apply_hit(&mut self) -> bool {
        match resolve_hit(&mut self.player, &self.tuning) {
            HitOutcome::Ignored => false,
            HitOutcome::ShieldAbsorbed => {
                log::debug!("Shield absorbed a hit");
                self.particles
                    .emit_sparkles(self.player.pos, 12, &mut self.rng);
                false
            }
            HitOutcome::LifeLost => {
                log::info!("Hit! {} lives left", self.player.lives);
                self.audio.play(Sound::Hit);
                self.particles
                    .emit_explosion(self.player.pos, &mut self.rng);
                self.popups.push(
                    self.player.pos - Vec2::new(0.0, 30.0),
                    format!("💔 {} left", self.player.lives),
                    colors::DAMAGE,
                );
                false
            }
            HitOutcome::Fatal => {
                self.game_over();
                true
            }
        }
    }

    fn collect(&mut self, kind: CollectibleKind, pos: Vec2) {
        log::debug!("Collected {kind:?}");
        match kind {
            CollectibleKind::Coin => {
                let points = kind.points(&self.tuning);
                self.score += points;
                self.audio.play(Sound::Coin);
                self.particles.emit_collect(pos, COIN_COLOR, &mut self.rng);
                self.popups.push(
                    pos - Vec2::new(0.0, 15.0),
                    format!("+{points}"),
                    colors::COIN,
                );
            }
            CollectibleKind::Egg => {
                let points = kind.points(&self.tuning);
                self.score += points;
                self.audio.play(Sound::Egg);
                self.particles.emit_sparkles(pos, 12, &mut self.rng);
                self.particles.emit_collect(pos, EGG_COLOR, &mut self.rng);
                self.popups.push(
                    pos - Vec2::new(0.0, 20.0),
                    format!("+{points} 🥚"),
                    colors::GOLDEN_EGG,
                );
            }
            CollectibleKind::Speed | CollectibleKind::Shield | CollectibleKind::Magnet => {
                self.player
                    .activate_power_up(kind, self.tuning.powerup_duration_ms);
                self.audio.play(Sound::PowerUp);
                self.particles.emit_sparkles(pos, 10, &mut self.rng);
                if let Some(label) = kind.power_up_label() {
                    self.popups
                        .push(pos - Vec2::new(0.0, 20.0), label, colors::WHITE);
                }
            }
        }
    }

    /// Endless mode changes biome every `endless_theme_cycle` obstacles
    fn cycle_endless_theme(&mut self) {
        let Some(step) = self
            .obstacles_passed
            .checked_div(self.tuning.endless_theme_cycle)
        else {
            return;
        };
        let index = step as usize % Theme::ROTATION.len();
        if index == self.endless_theme_index {
            return;
        }
        self.endless_theme_index = index;
        let theme = Theme::from_index(index);
        self.set_theme(theme);
        log::info!("Entering {} after {} obstacles", theme.as_str(), self.obstacles_passed);
        self.popups.push(
            Vec2::new(
                self.tuning.field_width / 2.0,
                self.tuning.field_height / 2.0 - 40.0,
            ),
            theme.label(),
            colors::GOLD,
        );
    }

    /// Whether an adventure stage follows the current one
    pub fn has_next_stage(&self) -> bool {
        self.mode == GameMode::Adventure && stage::has_next(self.stage_index)
    }
}
