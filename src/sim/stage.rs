//! Adventure mode stage table

use crate::theme::Theme;

/// One adventure stage: a fixed biome and an obstacle quota
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stage {
    pub name: &'static str,
    pub emoji: &'static str,
    /// Obstacles that must be passed to clear the stage
    pub quota: u32,
    pub theme: Theme,
}

pub const STAGES: [Stage; 3] = [
    Stage {
        name: "Village Backyard",
        emoji: "🏡",
        quota: 10,
        theme: Theme::Village,
    },
    Stage {
        name: "Forest Trail",
        emoji: "🌲",
        quota: 15,
        theme: Theme::Forest,
    },
    Stage {
        name: "Mountain Chase",
        emoji: "🏔️",
        quota: 20,
        theme: Theme::Mountain,
    },
];

/// Stage at `index`, if any
pub fn stage(index: usize) -> Option<&'static Stage> {
    STAGES.get(index)
}

/// Whether another stage follows `index`
pub fn has_next(index: usize) -> bool {
    index + 1 < STAGES.len()
}
