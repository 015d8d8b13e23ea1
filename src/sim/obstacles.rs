//! Obstacle generation and difficulty ramp
//!
//! Spawns one obstacle whenever the spawn interval has elapsed on the run
//! clock. Both the spawn interval and the gap size shrink a little every tick
//! until they hit their floors; neither ever grows back during a run.

use super::rng::SimRng;
use super::state::{Obstacle, ObstacleVariant};
use crate::theme::Theme;
use crate::tuning::Tuning;

/// Gap of a freshly spawned obstacle (collectibles are placed in it)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnedGap {
    pub x: f32,
    pub gap_y: f32,
    pub gap_size: f32,
}

/// Owns the obstacle collection and the spawn policy
#[derive(Debug, Clone)]
pub struct ObstacleManager {
    obstacles: Vec<Obstacle>,
    /// Run clock of the last spawn; `None` until the first spawn of a run
    last_spawn_ms: Option<f32>,
    gap_size: f32,
    spawn_interval_ms: f32,
    total_spawned: u32,
    stop_spawning: bool,
    theme: Theme,
    next_id: u32,
}

impl ObstacleManager {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            obstacles: Vec::new(),
            last_spawn_ms: None,
            gap_size: tuning.gap_size,
            spawn_interval_ms: tuning.spawn_interval_ms,
            total_spawned: 0,
            stop_spawning: false,
            theme: Theme::default(),
            next_id: 1,
        }
    }

    /// Clear obstacles and restart the ramp. The active theme is kept.
    pub fn reset(&mut self, tuning: &Tuning) {
        let theme = self.theme;
        *self = Self::new(tuning);
        self.theme = theme;
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn gap_size(&self) -> f32 {
        self.gap_size
    }

    pub fn spawn_interval_ms(&self) -> f32 {
        self.spawn_interval_ms
    }

    pub fn total_spawned(&self) -> u32 {
        self.total_spawned
    }

    /// Suppress further spawns; existing obstacles keep scrolling and scoring
    pub fn stop_spawning(&mut self) {
        if !self.stop_spawning {
            log::debug!("Obstacle spawning stopped after {}", self.total_spawned);
        }
        self.stop_spawning = true;
    }

    pub fn is_spawning_stopped(&self) -> bool {
        self.stop_spawning
    }

    /// One Playing tick: maybe spawn, scroll, despawn, then ramp difficulty.
    ///
    /// `speed` is the effective scroll speed in px per reference frame and
    /// `f` the tick length in reference frames. Returns the gap of an obstacle
    /// spawned this tick, after it has scrolled with the others.
    pub fn update(
        &mut self,
        speed: f32,
        f: f32,
        now_ms: f32,
        rng: &mut SimRng,
        tuning: &Tuning,
    ) -> Option<SpawnedGap> {
        let due = match self.last_spawn_ms {
            None => true,
            Some(last) => now_ms - last > self.spawn_interval_ms,
        };
        let spawned = if !self.stop_spawning && due {
            self.spawn(rng, tuning);
            self.last_spawn_ms = Some(now_ms);
            Some(self.obstacles.len() - 1)
        } else {
            None
        };

        let dx = speed * f;
        for obs in &mut self.obstacles {
            obs.x -= dx;
        }

        let gap = spawned.map(|i| {
            let obs = &self.obstacles[i];
            SpawnedGap {
                x: obs.x,
                gap_y: obs.gap_y,
                gap_size: obs.gap_size,
            }
        });

        let margin = tuning.despawn_margin;
        self.obstacles.retain(|o| !o.is_off_screen(margin));

        self.gap_size = (self.gap_size - tuning.gap_shrink_per_frame * f).max(tuning.min_gap_size);
        self.spawn_interval_ms = (self.spawn_interval_ms - tuning.spawn_interval_decay_per_frame * f)
            .max(tuning.min_spawn_interval_ms);

        gap
    }

    fn spawn(&mut self, rng: &mut SimRng, tuning: &Tuning) {
        let gap_y = rng.range(tuning.min_gap_top, tuning.max_gap_top());
        let variant = if rng.chance(0.5) {
            ObstacleVariant::Column
        } else {
            ObstacleVariant::Canopy
        };
        let id = self.next_id;
        self.next_id += 1;

        self.obstacles.push(Obstacle {
            id,
            x: tuning.field_width + tuning.spawn_offset,
            width: tuning.obstacle_width,
            gap_y,
            gap_size: self.gap_size,
            floor_y: tuning.floor_y(),
            variant,
            theme: self.theme,
            scored: false,
            shade: rng.range(-15.0, 15.0),
            tint: rng.index(3) as u8,
        });
        self.total_spawned += 1;

        log::debug!(
            "Spawned obstacle #{id} gap_y={gap_y:.1} gap={:.1} theme={}",
            self.gap_size,
            self.theme.as_str()
        );
    }

    /// Mark every obstacle whose trailing edge is left of `player_x` as scored.
    /// Returns how many obstacles were newly scored.
    pub fn mark_scored(&mut self, player_x: f32) -> u32 {
        let mut newly = 0;
        for obs in &mut self.obstacles {
            if !obs.scored && obs.right() < player_x {
                obs.scored = true;
                newly += 1;
            }
        }
        newly
    }

    #[cfg(test)]
    pub(crate) fn insert(&mut self, mut obstacle: Obstacle) {
        obstacle.id = self.next_id;
        self.next_id += 1;
        self.obstacles.push(obstacle);
    }
}
