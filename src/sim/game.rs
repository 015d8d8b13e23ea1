//! Game controller
//!
//! Owns all run-level state and the collaborators, routes input, and drives
//! the phase machine:
//!
//! `Menu -> ModeSelect -> GetReady -> Playing -> {GameOver | StageComplete}`
//!
//! Per-phase frame updates live in [`super::tick`].

use glam::Vec2;

use super::collectibles::CollectibleManager;
use super::obstacles::ObstacleManager;
use super::particles::ParticleSystem;
use super::rng::SimRng;
use super::schedule::Schedule;
use super::stage::{self, Stage};
use super::state::{GameMode, GamePhase, Player};
use crate::audio::{AudioSink, Sound};
use crate::highscores::BestScore;
use crate::persistence::ScoreStore;
use crate::renderer::{Frame, Hud, Renderer, StageProgress};
use crate::settings::Settings;
use crate::theme::Theme;
use crate::tuning::Tuning;
use crate::ui::{self, Popups, StageButton};

/// Passive input delivered by the platform layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Flap / confirm (Space, ArrowUp, tap)
    PrimaryAction,
    /// Toggle sound (M)
    MuteToggle,
    /// Pointer click in field coordinates
    Click { x: f32, y: f32 },
}

/// Effects deferred on the simulation clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Deferred {
    /// One burst of the stage-clear celebration
    CelebrationBurst,
}

/// Bursts in the stage-clear celebration
const CELEBRATION_BURSTS: usize = 5;
const CELEBRATION_SPACING_MS: f32 = 200.0;
pub(crate) const CELEBRATION_SPARKLES: usize = 15;
/// Menu hen hovers a little above center
const MENU_HOVER_OFFSET: f32 = 30.0;

/// The game
pub struct Game {
    pub(crate) tuning: Tuning,
    pub(crate) settings: Settings,
    pub(crate) store: Box<dyn ScoreStore>,
    pub(crate) audio: Box<dyn AudioSink>,
    pub(crate) rng: SimRng,

    pub(crate) phase: GamePhase,
    pub(crate) mode: GameMode,
    pub(crate) player: Player,
    pub(crate) obstacles: ObstacleManager,
    pub(crate) collectibles: CollectibleManager,
    pub(crate) particles: ParticleSystem,
    pub(crate) popups: Popups,
    pub(crate) schedule: Schedule<Deferred>,

    pub(crate) score: u32,
    pub(crate) best: BestScore,
    pub(crate) scroll_speed: f32,
    pub(crate) theme: Theme,
    pub(crate) stage_index: usize,
    pub(crate) obstacles_passed: u32,
    pub(crate) endless_theme_index: usize,

    /// Run clock; starts at the first flap
    pub(crate) run_ms: f32,
    /// Time spent in the current phase
    pub(crate) phase_ms: f32,
    pub(crate) background_scroll: f32,
}

impl Game {
    pub fn new(
        tuning: Tuning,
        settings: Settings,
        store: Box<dyn ScoreStore>,
        audio: Box<dyn AudioSink>,
        seed: u64,
    ) -> Self {
        let best = match store.load_best_score() {
            Ok(best) => best,
            Err(e) => {
                log::warn!("Could not load best score: {e}");
                0
            }
        };

        let mut particles = ParticleSystem::new(settings.max_particles());
        particles.configure(
            settings.particles,
            settings.effective_screen_shake(),
            settings.max_particles(),
        );

        let mut player = Player::new(&tuning);
        player.pos.y = tuning.mid_height() - MENU_HOVER_OFFSET;

        log::info!("Flying hen ready (seed {seed}, best {best})");

        Self {
            obstacles: ObstacleManager::new(&tuning),
            collectibles: CollectibleManager::new(),
            scroll_speed: tuning.scroll_speed,
            player,
            particles,
            tuning,
            settings,
            store,
            audio,
            rng: SimRng::new(seed),
            phase: GamePhase::Menu,
            mode: GameMode::default(),
            popups: Popups::new(),
            schedule: Schedule::new(),
            score: 0,
            best: BestScore::new(best),
            theme: Theme::default(),
            stage_index: 0,
            obstacles_passed: 0,
            endless_theme_index: 0,
            run_ms: 0.0,
            phase_ms: 0.0,
            background_scroll: 0.0,
        }
    }

    // === Accessors ===

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best_score(&self) -> u32 {
        self.best.best()
    }

    pub fn is_new_high_score(&self) -> bool {
        self.best.is_new()
    }

    pub fn lives(&self) -> u8 {
        self.player.lives
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn obstacles(&self) -> &ObstacleManager {
        &self.obstacles
    }

    pub fn collectibles(&self) -> &CollectibleManager {
        &self.collectibles
    }

    pub fn particles(&self) -> &ParticleSystem {
        &self.particles
    }

    pub fn popups(&self) -> &Popups {
        &self.popups
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn stage_index(&self) -> usize {
        self.stage_index
    }

    pub fn current_stage(&self) -> Option<&'static Stage> {
        match self.mode {
            GameMode::Adventure => stage::stage(self.stage_index),
            GameMode::Endless => None,
        }
    }

    pub fn obstacles_passed(&self) -> u32 {
        self.obstacles_passed
    }

    pub fn scroll_speed(&self) -> f32 {
        self.scroll_speed
    }

    pub fn run_ms(&self) -> f32 {
        self.run_ms
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn is_muted(&self) -> bool {
        self.audio.is_muted()
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    // === Input ===

    /// Route one input event. Each event causes at most one transition.
    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::PrimaryAction => self.primary_action(),
            InputEvent::MuteToggle => self.toggle_mute(),
            InputEvent::Click { x, y } => {
                let p = Vec2::new(x, y);
                if ui::hit_mute(p) {
                    self.toggle_mute();
                    return;
                }
                match self.phase {
                    GamePhase::ModeSelect => match ui::hit_mode_button(p) {
                        Some(ui::ModeButton::Endless) => self.start_run(GameMode::Endless),
                        Some(ui::ModeButton::Adventure) => self.start_run(GameMode::Adventure),
                        None => {}
                    },
                    GamePhase::StageComplete => {
                        if !self.input_guard_elapsed() {
                            return;
                        }
                        match ui::hit_stage_button(p, self.has_next_stage()) {
                            Some(StageButton::NextStage) => self.next_stage(),
                            Some(StageButton::Menu) => self.reset_to_menu(),
                            None => {}
                        }
                    }
                    GamePhase::Menu
                    | GamePhase::GetReady
                    | GamePhase::Playing
                    | GamePhase::GameOver => self.primary_action(),
                }
            }
        }
    }

    /// Flap or confirm, depending on the phase
    pub fn primary_action(&mut self) {
        match self.phase {
            GamePhase::Menu => self.set_phase(GamePhase::ModeSelect),
            // Mode buttons only
            GamePhase::ModeSelect => {}
            GamePhase::GetReady => {
                self.run_ms = 0.0;
                self.set_phase(GamePhase::Playing);
                self.player.flap(&self.tuning);
                self.audio.play(Sound::Flap);
                log::info!("Run started ({:?})", self.mode);
            }
            GamePhase::Playing => {
                if !self.player.alive {
                    return;
                }
                self.player.flap(&self.tuning);
                self.audio.play(Sound::Flap);
                let pos = self.player.pos + Vec2::new(-10.0, 5.0);
                self.particles.emit_feathers(pos, 2, &mut self.rng);
            }
            GamePhase::GameOver => {
                if self.input_guard_elapsed() {
                    self.reset_to_menu();
                }
            }
            GamePhase::StageComplete => {
                if !self.input_guard_elapsed() {
                    return;
                }
                if self.has_next_stage() {
                    self.next_stage();
                } else {
                    self.reset_to_menu();
                }
            }
        }
    }

    fn input_guard_elapsed(&self) -> bool {
        self.phase_ms >= self.tuning.input_guard_ms
    }

    fn toggle_mute(&mut self) {
        let muted = self.audio.toggle_mute();
        self.settings.muted = muted;
        self.settings.save();
        log::info!("Sound {}", if muted { "off" } else { "on" });
    }

    pub(crate) fn set_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            log::info!("Phase {:?} -> {:?}", self.phase, phase);
        }
        self.phase = phase;
        self.phase_ms = 0.0;
    }

    // === Transitions ===

    /// Choose a mode and enter GetReady. Adventure starts at the first stage.
    pub fn start_run(&mut self, mode: GameMode) {
        self.mode = mode;
        if mode == GameMode::Adventure {
            self.stage_index = 0;
        }
        self.prepare_run();
    }

    /// Advance to the next adventure stage, if there is one
    pub fn next_stage(&mut self) {
        if !stage::has_next(self.stage_index) {
            log::warn!("No stage after {}", self.stage_index);
            self.reset_to_menu();
            return;
        }
        self.stage_index += 1;
        self.prepare_run();
    }

    fn prepare_run(&mut self) {
        let tuning = &self.tuning;
        self.player.reset(tuning, tuning.mid_height());
        self.obstacles.reset(tuning);
        self.collectibles.reset();
        self.particles.clear();
        self.popups.clear();
        self.schedule.clear();

        self.score = 0;
        self.obstacles_passed = 0;
        self.endless_theme_index = 0;
        self.scroll_speed = tuning.scroll_speed;
        self.run_ms = 0.0;
        self.best.begin_run();

        let theme = match self.current_stage() {
            Some(stage) => {
                log::info!("Stage {} {} (quota {})", stage.emoji, stage.name, stage.quota);
                stage.theme
            }
            None => Theme::Village,
        };
        self.set_theme(theme);

        self.audio.start_music();
        self.set_phase(GamePhase::GetReady);
    }

    /// Back to the title screen
    pub fn reset_to_menu(&mut self) {
        let tuning = &self.tuning;
        self.player
            .reset(tuning, tuning.mid_height() - MENU_HOVER_OFFSET);
        self.obstacles.reset(tuning);
        self.collectibles.reset();
        self.particles.clear();
        self.popups.clear();
        self.schedule.clear();
        self.audio.stop_music();
        self.set_theme(Theme::Village);
        self.set_phase(GamePhase::Menu);
    }

    /// Background and obstacle generator always switch together
    pub(crate) fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.obstacles.set_theme(theme);
    }

    /// Lives exhausted: freeze the run and record the best score
    pub(crate) fn game_over(&mut self) {
        self.player.alive = false;
        self.set_phase(GamePhase::GameOver);
        self.audio.play(Sound::Hit);
        self.audio.stop_music();
        self.particles.emit_explosion(self.player.pos, &mut self.rng);

        log::info!(
            "Game over: score {} ({} obstacles passed)",
            self.score,
            self.obstacles_passed
        );

        if self.best.submit(self.score) {
            log::info!("New best score {}", self.best.best());
            if let Err(e) = self.store.save_best_score(self.best.best()) {
                log::warn!("Could not save best score: {e}");
            }
        }
    }

    /// Adventure stage cleared
    pub(crate) fn stage_complete(&mut self) {
        self.set_phase(GamePhase::StageComplete);
        self.audio.play(Sound::Egg);
        self.audio.stop_music();
        for i in 0..CELEBRATION_BURSTS {
            self.schedule
                .at(i as f32 * CELEBRATION_SPACING_MS, Deferred::CelebrationBurst);
        }
        log::info!(
            "Stage {} cleared with score {}",
            self.stage_index + 1,
            self.score
        );
    }

    // === Presentation ===

    fn hud(&self) -> Hud {
        let duration = self.tuning.powerup_duration_ms;
        let stage = self.current_stage().map(|s| StageProgress {
            index: self.stage_index,
            name: s.name,
            emoji: s.emoji,
            passed: self.obstacles_passed,
            quota: s.quota,
            has_next: stage::has_next(self.stage_index),
        });
        Hud {
            score: self.score,
            best: self.best.best(),
            is_new_best: self.best.is_new(),
            lives: self.player.lives,
            max_lives: self.tuning.starting_lives(),
            damage: self.player.damage_tier(),
            stage,
            shield: self.player.shield.ratio(duration),
            speed_boost: self.player.speed_boost.ratio(duration),
            magnet: self.player.magnet.ratio(duration),
            muted: self.audio.is_muted(),
        }
    }

    /// Hand a read-only snapshot to the renderer
    pub fn render(&self, renderer: &mut dyn Renderer) {
        let frame = Frame {
            phase: self.phase,
            mode: self.mode,
            theme: self.theme,
            phase_ms: self.phase_ms,
            background_scroll: self.background_scroll,
            shake: self.particles.shake().offset,
            player: &self.player,
            obstacles: self.obstacles.obstacles(),
            collectibles: self.collectibles.items(),
            particles: self.particles.particles(),
            popups: self.popups.items(),
            hud: self.hud(),
        };
        renderer.draw(&frame);
    }
}
