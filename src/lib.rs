//! Flying Hen - a side-scrolling arcade game
//!
//! Core modules:
//! - `sim`: Simulation (physics, obstacles, collectibles, game state machine)
//! - `renderer`: Presentation port fed with read-only frame snapshots
//! - `audio`: Sound cues and background melody
//! - `platform`: Browser/native platform abstraction
//! - `persistence`: Best-score storage
//! - `tuning`: Data-driven game balance
//! - `theme`: Biome presets shared by background and obstacles

pub mod audio;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod theme;
pub mod tuning;
pub mod ui;

pub use highscores::BestScore;
pub use settings::Settings;
pub use theme::Theme;
pub use tuning::Tuning;

/// Frame timing constants
pub mod consts {
    /// One reference frame at 60 Hz, in milliseconds.
    /// Per-frame tuning values are scaled by `dt / REFERENCE_FRAME_MS`.
    pub const REFERENCE_FRAME_MS: f32 = 1000.0 / 60.0;
    /// Substitute delta used after a stall (tab in background, debugger pause)
    pub const NOMINAL_FRAME_MS: f32 = 16.0;
    /// Deltas above this are treated as a stall
    pub const MAX_FRAME_MS: f32 = 100.0;

    /// Logical field dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;
    pub const GROUND_HEIGHT: f32 = 80.0;
}

/// Convert a millisecond delta into reference frames
#[inline]
pub fn frame_factor(dt_ms: f32) -> f32 {
    dt_ms / consts::REFERENCE_FRAME_MS
}

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Sanitize a frame delta coming from the host.
///
/// Negative or non-finite deltas become zero; a delta larger than `max_ms`
/// is a stall and is replaced by one nominal frame.
#[inline]
pub fn sanitize_dt(dt_ms: f32, max_ms: f32, nominal_ms: f32) -> f32 {
    if !dt_ms.is_finite() || dt_ms <= 0.0 {
        0.0
    } else if dt_ms > max_ms {
        nominal_ms
    } else {
        dt_ms
    }
}
