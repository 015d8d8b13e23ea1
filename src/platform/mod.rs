//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Logger setup
//! - Keyboard mapping to game input

use crate::sim::InputEvent;

/// Install the log backend for the current target
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    let env = env_logger::Env::default().default_filter_or("info");
    // Already installed when called twice (tests, embedding hosts)
    let _ = env_logger::Builder::from_env(env).try_init();
}

/// Install the log backend for the current target
#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Map a `KeyboardEvent.code` to a game input
pub fn input_for_key(code: &str) -> Option<InputEvent> {
    match code {
        "Space" | "ArrowUp" => Some(InputEvent::PrimaryAction),
        "KeyM" => Some(InputEvent::MuteToggle),
        _ => None,
    }
}
