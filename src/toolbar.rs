// Layout of everything drawn around the selected visage:
// the button column on its left, the brush slider under it, and the
// "still near the picture" tolerance box used by the eraser.

use crate::actions::ToolAction;
use crate::brush::{MAX_RADIUS, MIN_RADIUS};
use crate::types::Rect;
use crate::visage::Visage;

pub const BUTTON_SIZE: i32 = 32;
/// Button column sits this far left of the visage.
pub const BUTTON_X_OFFSET: i32 = -38;
pub const BUTTON_Y_OFFSET: i32 = 10;

pub const SLIDER_WIDTH: i32 = 150;
pub const SLIDER_HEIGHT: i32 = 8;
/// Gap between the visage's bottom edge and the slider track.
pub const SLIDER_Y_OFFSET: i32 = 18;
/// Extra grab margin around the slider track.
pub const SLIDER_HIT_MARGIN: i32 = 14;

/// How far outside the visage the eraser still counts as "on the picture".
/// Clicking beyond it switches the eraser off.
pub const ERASE_TOLERANCE: i32 = 80;

/// Hit box of one toolbar button.
pub fn button_rect(v: &Visage, slot: usize) -> Rect {
    Rect::new(
        v.x + BUTTON_X_OFFSET,
        v.y + BUTTON_Y_OFFSET + BUTTON_SIZE * slot as i32,
        BUTTON_SIZE,
        BUTTON_SIZE,
    )
}

/// Button under the pointer, if any (ignores whether it is currently enabled).
pub fn button_at(v: &Visage, px: i32, py: i32) -> Option<ToolAction> {
    ToolAction::ALL
        .into_iter()
        .enumerate()
        .find(|(slot, _)| button_rect(v, *slot).contains(px, py))
        .map(|(_, action)| action)
}

/// Slider track, centered under the visage.
pub fn slider_track(v: &Visage) -> Rect {
    Rect::new(v.x + v.w / 2 - SLIDER_WIDTH / 2, v.y + v.h + SLIDER_Y_OFFSET, SLIDER_WIDTH, SLIDER_HEIGHT)
}

/// Slider track plus its grab margin.
pub fn slider_hit_band(v: &Visage) -> Rect {
    slider_track(v).expanded(SLIDER_HIT_MARGIN)
}

/// Radius for a pointer x over the slider (clamped).
pub fn slider_value(v: &Visage, px: i32) -> i32 {
    (px - slider_track(v).x).clamp(MIN_RADIUS, MAX_RADIUS)
}

/// Knob center for a radius. Visual: the white dot on the black track.
pub fn slider_knob(v: &Visage, radius: i32) -> (i32, i32) {
    let track = slider_track(v);
    (track.x + radius, track.y + SLIDER_HEIGHT / 2)
}
