//! Flying Hen headless runner
//!
//! Plays one endless run with a simple gap-seeking pilot and prints a JSON
//! summary. See `flying-hen --help` for options.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::{Path, PathBuf};

    use clap::Parser;
    use flying_hen::audio::SilentAudio;
    use flying_hen::persistence::FileStore;
    use flying_hen::renderer::NullRenderer;
    use flying_hen::sim::{Game, GameMode, GamePhase, InputEvent};
    use flying_hen::{Settings, Tuning};
    use serde::Serialize;

    /// Fixed frame delta for the headless loop
    const FRAME_MS: f32 = 1000.0 / 60.0;
    /// Pilot flaps once the hen sinks this far below its target
    const FLAP_MARGIN: f32 = 12.0;

    #[derive(Parser, Debug)]
    #[command(name = "flying-hen")]
    #[command(about = "Headless Flying Hen run with a gap-seeking pilot")]
    pub(crate) struct Args {
        /// Seed for the simulation RNG
        #[arg(long, default_value_t = 42)]
        pub(crate) seed: u64,
        /// Stop after this many 60 Hz frames even if the hen is still flying
        #[arg(long, default_value_t = 60 * 60 * 3)]
        pub(crate) max_frames: u32,
        /// Best-score file
        #[arg(long, env = "FLYING_HEN_SAVE", default_value = "flying-hen-best.json")]
        pub(crate) save: PathBuf,
        /// JSON balance overrides
        #[arg(long, env = "FLYING_HEN_TUNING")]
        pub(crate) tuning: Option<PathBuf>,
    }

    #[derive(Debug, Serialize)]
    struct RunSummary {
        seed: u64,
        frames: u32,
        score: u32,
        best_score: u32,
        new_best: bool,
        obstacles_passed: u32,
        lives: u8,
        theme: &'static str,
        game_over: bool,
    }

    fn load_tuning(path: Option<&Path>) -> Tuning {
        let Some(path) = path else {
            return Tuning::default();
        };
        match std::fs::read_to_string(path) {
            Ok(json) => Tuning::from_json_or_default(&json),
            Err(e) => {
                log::warn!("Could not read tuning {}: {e}", path.display());
                Tuning::default()
            }
        }
    }

    /// Height the pilot steers toward: middle of the next gap ahead
    fn target_height(game: &Game) -> f32 {
        let player_x = game.player().pos.x;
        game.obstacles()
            .obstacles()
            .iter()
            .find(|o| o.right() > player_x - game.tuning().hitbox_half_width)
            .map(|o| o.gap_y + o.gap_size / 2.0)
            .unwrap_or_else(|| game.tuning().mid_height())
    }

    fn should_flap(game: &Game) -> bool {
        let player = game.player();
        player.velocity >= 0.0 && player.pos.y > target_height(game) + FLAP_MARGIN
    }

    pub fn run() {
        flying_hen::platform::init_logging();
        let args = Args::parse();

        let store = FileStore::new(args.save.clone());
        log::info!("Best score file: {}", store.path().display());

        let settings = Settings::load();
        let audio = SilentAudio::new(settings.muted);
        let mut game = Game::new(
            load_tuning(args.tuning.as_deref()),
            settings,
            Box::new(store),
            Box::new(audio),
            args.seed,
        );
        let mut renderer = NullRenderer::default();

        game.handle_input(InputEvent::PrimaryAction);
        game.start_run(GameMode::Endless);
        game.handle_input(InputEvent::PrimaryAction);

        let mut frames = 0;
        while frames < args.max_frames && game.phase() == GamePhase::Playing {
            if should_flap(&game) {
                game.handle_input(InputEvent::PrimaryAction);
            }
            game.update(FRAME_MS);
            game.render(&mut renderer);
            frames += 1;
        }

        let summary = RunSummary {
            seed: args.seed,
            frames,
            score: game.score(),
            best_score: game.best_score(),
            new_best: game.is_new_high_score(),
            obstacles_passed: game.obstacles_passed(),
            lives: game.lives(),
            theme: game.theme().as_str(),
            game_over: game.phase() == GamePhase::GameOver,
        };
        log::info!(
            "Run finished after {} frames ({} rendered)",
            frames,
            renderer.frames
        );

        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{json}"),
            Err(e) => log::error!("Could not encode summary: {e}"),
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_args_reject_bad_seed() {
            let err = Args::try_parse_from(["flying-hen", "--seed", "abc"]);
            assert!(err.is_err());
        }

        #[test]
        fn test_args_parse_values() {
            let args = Args::try_parse_from([
                "flying-hen",
                "--seed",
                "7",
                "--max-frames",
                "120",
                "--save",
                "best.json",
            ])
            .unwrap();
            assert_eq!(args.seed, 7);
            assert_eq!(args.max_frames, 120);
            assert_eq!(args.save, PathBuf::from("best.json"));
        }

        #[test]
        fn test_missing_tuning_file_falls_back() {
            let dir = tempfile::tempdir().unwrap();
            let tuning = load_tuning(Some(&dir.path().join("absent.json")));
            assert_eq!(tuning.max_lives, Tuning::default().max_lives);
            assert_eq!(load_tuning(None).max_lives, Tuning::default().max_lives);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser hosts drive `Game` through the library
}
