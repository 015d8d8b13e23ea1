//! Screen-space UI state: floating popups and button layout
//!
//! The renderer draws these; the game uses the same rectangles for click
//! hit-testing so what is drawn is what is clickable.

use glam::Vec2;

use crate::sim::rect::Rect;

/// Popup colors (0xRRGGBB)
pub mod colors {
    pub const GOLD: u32 = 0xFFD700;
    pub const COIN: u32 = 0xFFD700;
    pub const GOLDEN_EGG: u32 = 0xFFB300;
    pub const WHITE: u32 = 0xFFFFFF;
    pub const DAMAGE: u32 = 0xE53935;
}

/// Floating text that rises and fades
#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    pub pos: Vec2,
    pub text: String,
    pub color: u32,
    /// 1.0 when spawned, removed at 0
    pub life: f32,
}

/// Active popups
#[derive(Debug, Clone, Default)]
pub struct Popups {
    items: Vec<Popup>,
}

impl Popups {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, pos: Vec2, text: impl Into<String>, color: u32) {
        self.items.push(Popup {
            pos,
            text: text.into(),
            color,
            life: 1.0,
        });
    }

    /// Rise 1 px and fade 0.02 per reference frame
    pub fn update(&mut self, f: f32) {
        self.items.retain_mut(|p| {
            p.pos.y -= f;
            p.life -= 0.02 * f;
            p.life > 0.0
        });
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[Popup] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Fixed button layout on the 800x600 field
pub mod buttons {
    use glam::Vec2;

    use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH};
    use crate::sim::rect::Rect;

    pub const ENDLESS: Rect = Rect::new(170.0, 280.0, 200.0, 180.0);
    pub const ADVENTURE: Rect = Rect::new(430.0, 280.0, 200.0, 180.0);
    pub const NEXT_STAGE: Rect = Rect::new(295.0, 370.0, 210.0, 50.0);

    pub const MUTE_CENTER: Vec2 = Vec2::new(FIELD_WIDTH - 30.0, FIELD_HEIGHT - 30.0);
    pub const MUTE_RADIUS: f32 = 20.0;

    /// "Menu" button on the stage-complete card; it moves up when there is
    /// no next-stage button above it
    pub const fn menu(has_next_stage: bool) -> Rect {
        if has_next_stage {
            Rect::new(320.0, 435.0, 160.0, 45.0)
        } else {
            Rect::new(320.0, 385.0, 160.0, 45.0)
        }
    }
}

/// Mode-select choice under a click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeButton {
    Endless,
    Adventure,
}

/// Stage-complete choice under a click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageButton {
    NextStage,
    Menu,
}

pub fn hit_mute(p: Vec2) -> bool {
    p.distance(buttons::MUTE_CENTER) < buttons::MUTE_RADIUS
}

pub fn hit_mode_button(p: Vec2) -> Option<ModeButton> {
    if buttons::ENDLESS.contains(p) {
        Some(ModeButton::Endless)
    } else if buttons::ADVENTURE.contains(p) {
        Some(ModeButton::Adventure)
    } else {
        None
    }
}

pub fn hit_stage_button(p: Vec2, has_next_stage: bool) -> Option<StageButton> {
    if has_next_stage && buttons::NEXT_STAGE.contains(p) {
        return Some(StageButton::NextStage);
    }
    let menu: Rect = buttons::menu(has_next_stage);
    menu.contains(p).then_some(StageButton::Menu)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_popup_rises_and_fades() {
        let mut popups = Popups::new();
        popups.push(Vec2::new(100.0, 200.0), "+1", colors::COIN);
        popups.update(1.0);
        let p = &popups.items()[0];
        assert_eq!(p.pos.y, 199.0);
        assert!((p.life - 0.98).abs() < 1e-6);

        for _ in 0..60 {
            popups.update(1.0);
        }
        assert!(popups.is_empty());
    }

    #[test]
    fn test_mode_buttons() {
        assert_eq!(hit_mode_button(Vec2::new(170.0, 280.0)), Some(ModeButton::Endless));
        assert_eq!(hit_mode_button(Vec2::new(370.0, 460.0)), Some(ModeButton::Endless));
        assert_eq!(hit_mode_button(Vec2::new(500.0, 300.0)), Some(ModeButton::Adventure));
        assert_eq!(hit_mode_button(Vec2::new(400.0, 300.0)), None);
        assert_eq!(hit_mode_button(Vec2::new(200.0, 100.0)), None);
    }

    #[test]
    fn test_stage_buttons_move_without_next() {
        let menu_low = Vec2::new(400.0, 450.0);
        let menu_high = Vec2::new(400.0, 400.0);
        let next = Vec2::new(400.0, 390.0);

        assert_eq!(hit_stage_button(next, true), Some(StageButton::NextStage));
        assert_eq!(hit_stage_button(menu_low, true), Some(StageButton::Menu));

        assert_eq!(hit_stage_button(next, false), Some(StageButton::Menu));
        assert_eq!(hit_stage_button(menu_high, false), Some(StageButton::Menu));
        assert_eq!(hit_stage_button(menu_low, false), None);
    }

    #[test]
    fn test_mute_circle() {
        assert!(hit_mute(Vec2::new(770.0, 570.0)));
        assert!(hit_mute(Vec2::new(785.0, 570.0)));
        assert!(!hit_mute(Vec2::new(790.0, 570.0)));
    }
}
