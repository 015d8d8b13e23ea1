//! Simulation module
//!
//! All gameplay logic lives here. It stays deterministic:
//! - Every random draw goes through one seeded [`SimRng`]
//! - Time only advances through [`Game::update`]
//! - Entity collections keep spawn order
//! - No rendering or platform dependencies

pub mod collectibles;
pub mod collision;
pub mod game;
pub mod obstacles;
pub mod particles;
pub mod rect;
pub mod rng;
pub mod schedule;
pub mod stage;
pub mod state;
mod tick;

#[cfg(test)]
pub(crate) mod testing;

pub use collectibles::{CollectibleManager, MagnetField, Pickup};
pub use collision::{HitOutcome, count_hits, resolve_hit, touches_ground};
pub use game::{Game, InputEvent};
pub use obstacles::{ObstacleManager, SpawnedGap};
pub use particles::{ParticleSystem, ScreenShake};
pub use rect::Rect;
pub use rng::SimRng;
pub use schedule::Schedule;
pub use stage::{STAGES, Stage};
pub use state::{
    Collectible, CollectibleKind, DamageTier, GameMode, GamePhase, Obstacle, ObstacleArt,
    ObstacleVariant, Particle, ParticleKind, Player, TimedFlag,
};
