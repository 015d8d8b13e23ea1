//! Shared fixtures for game tests

use std::cell::RefCell;
use std::rc::Rc;

use super::game::Game;
use super::state::{Obstacle, ObstacleVariant};
use crate::audio::{AudioSink, SilentAudio, Sound};
use crate::persistence::MemoryStore;
use crate::settings::Settings;
use crate::theme::Theme;
use crate::tuning::Tuning;

/// Audio sink that records every effect it is asked to play
pub(crate) struct RecordingAudio {
    inner: SilentAudio,
    played: Rc<RefCell<Vec<Sound>>>,
}

impl RecordingAudio {
    pub(crate) fn new() -> (Self, Rc<RefCell<Vec<Sound>>>) {
        let played = Rc::new(RefCell::new(Vec::new()));
        let audio = Self {
            inner: SilentAudio::new(false),
            played: Rc::clone(&played),
        };
        (audio, played)
    }
}

impl AudioSink for RecordingAudio {
    fn play(&mut self, sound: Sound) {
        self.played.borrow_mut().push(sound);
    }

    fn start_music(&mut self) {
        self.inner.start_music();
    }

    fn stop_music(&mut self) {
        self.inner.stop_music();
    }

    fn toggle_mute(&mut self) -> bool {
        self.inner.toggle_mute()
    }

    fn is_muted(&self) -> bool {
        self.inner.is_muted()
    }

    fn tick(&mut self, dt_ms: f32) {
        self.inner.tick(dt_ms);
    }
}

pub(crate) fn game_with_store(store: MemoryStore, seed: u64) -> Game {
    Game::new(
        Tuning::default(),
        Settings::default(),
        Box::new(store),
        Box::new(SilentAudio::new(false)),
        seed,
    )
}

pub(crate) fn game(seed: u64) -> Game {
    game_with_store(MemoryStore::default(), seed)
}

/// Obstacle sitting on the player lane with its gap well below mid-height
pub(crate) fn blocking_obstacle(tuning: &Tuning) -> Obstacle {
    Obstacle {
        id: 0,
        x: tuning.player_x - 35.0,
        width: tuning.obstacle_width,
        gap_y: 400.0,
        gap_size: 100.0,
        floor_y: tuning.floor_y(),
        variant: ObstacleVariant::Column,
        theme: Theme::Village,
        scored: false,
        shade: 0.0,
        tint: 0,
    }
}
