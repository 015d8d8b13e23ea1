//! Presentation port
//!
//! The game hands the renderer one read-only [`Frame`] per display frame. The
//! renderer never sees mutable simulation state, so drawing cannot affect the
//! run.

use glam::Vec2;

use crate::sim::state::{
    Collectible, DamageTier, GameMode, GamePhase, Obstacle, Particle, Player,
};
use crate::theme::Theme;
use crate::ui::Popup;

/// Adventure stage progress for the HUD
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageProgress {
    pub index: usize,
    pub name: &'static str,
    pub emoji: &'static str,
    pub passed: u32,
    pub quota: u32,
    pub has_next: bool,
}

/// HUD values
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hud {
    pub score: u32,
    pub best: u32,
    pub is_new_best: bool,
    pub lives: u8,
    pub max_lives: u8,
    /// Hen tint derived from lives
    pub damage: DamageTier,
    pub stage: Option<StageProgress>,
    /// Remaining fraction of each power-up (0 when inactive)
    pub shield: f32,
    pub speed_boost: f32,
    pub magnet: f32,
    pub muted: bool,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub phase: GamePhase,
    pub mode: GameMode,
    pub theme: Theme,
    /// Time spent in the current phase (menu pulse, card fade-ins)
    pub phase_ms: f32,
    /// Parallax scroll distance
    pub background_scroll: f32,
    pub shake: Vec2,
    pub player: &'a Player,
    pub obstacles: &'a [Obstacle],
    pub collectibles: &'a [Collectible],
    pub particles: &'a [Particle],
    pub popups: &'a [Popup],
    pub hud: Hud,
}

impl Frame<'_> {
    /// Obstacles are hidden behind the title and mode cards
    pub fn shows_obstacles(&self) -> bool {
        !matches!(self.phase, GamePhase::Menu | GamePhase::ModeSelect)
    }

    pub fn shows_collectibles(&self) -> bool {
        self.phase == GamePhase::Playing
    }
}

/// Presentation collaborator
pub trait Renderer {
    fn draw(&mut self, frame: &Frame<'_>);
}

/// Renderer that only counts frames (headless runs, tests)
#[derive(Debug, Clone, Default)]
pub struct NullRenderer {
    pub frames: u64,
    pub last_phase: Option<GamePhase>,
    pub last_hud: Option<Hud>,
}

impl Renderer for NullRenderer {
    fn draw(&mut self, frame: &Frame<'_>) {
        self.frames += 1;
        self.last_phase = Some(frame.phase);
        self.last_hud = Some(frame.hud);
    }
}
