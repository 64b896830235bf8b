use super::*;
use crate::brush::{MAX_RADIUS, MIN_RADIUS};
use crate::surface::PixelSurface;
use crate::visage::Visage;

/// Left half red, right half blue.
fn split(w: u32, h: u32) -> PixelSurface {
    let mut s = PixelSurface::filled(w, h, [0, 0, 255, 255]);
    for y in 0..h as i32 {
        for x in 0..(w as i32 / 2) {
            s.put(x, y, image::Rgba([255, 0, 0, 255]));
        }
    }
    s
}

/// Harness: a controller + a collection, fed one frame at a time.
struct Rig {
    ctl: GestureController,
    visages: VisageCollection,
}

impl Rig {
    fn new() -> Self {
        Self { ctl: GestureController::new(BrushConfig::new(10)), visages: VisageCollection::new() }
    }

    fn with(visages: &[(i32, i32, u32, u32)]) -> Self {
        let mut rig = Self::new();
        for &(x, y, w, h) in visages {
            rig.visages.insert_front(Visage::new(x, y, split(w, h)));
        }
        rig
    }

    fn frame(&mut self, x: i32, y: i32, left: bool, right: bool, keys: &[Key]) {
        let input = FrameInput { pointer: (x, y), left, right, keys_down: keys.to_vec() };
        self.ctl.update(&input, &mut self.visages);
    }

    fn press(&mut self, x: i32, y: i32) {
        self.frame(x, y, true, false, &[]);
    }

    fn hover(&mut self, x: i32, y: i32) {
        self.frame(x, y, false, false, &[]);
    }

    fn key(&mut self, key: Key) {
        let (x, y) = self.ctl.pointer();
        self.frame(x, y, false, false, &[key]);
        self.frame(x, y, false, false, &[]);
    }

    /// Click on a visage and let go, leaving it selected.
    fn click(&mut self, x: i32, y: i32) {
        self.press(x, y);
        self.hover(x, y);
    }

    fn rect(&self, index: usize) -> (i32, i32, i32, i32) {
        let v = self.visages.get(index).expect("visage");
        (v.x, v.y, v.w, v.h)
    }
}

#[test]
fn drag_moves_by_pointer_delta() {
    let mut rig = Rig::with(&[(40, 40, 100, 80)]);
    rig.press(60, 60);
    assert_eq!(rig.ctl.gesture(), Gesture::Dragging { offset_x: 20, offset_y: 20 });
    assert_eq!(rig.visages.selected_index(), Some(0));
    rig.press(80, 55);
    rig.hover(80, 55);
    assert_eq!(rig.rect(0), (60, 35, 100, 80));
    assert_eq!(rig.ctl.gesture(), Gesture::Idle);
}

#[test]
fn press_picks_front_most_overlap() {
    let mut rig = Rig::with(&[(0, 0, 100, 100), (50, 50, 100, 100)]);
    rig.click(75, 75);
    assert_eq!(rig.visages.selected_index(), Some(1));
    rig.click(20, 20);
    assert_eq!(rig.visages.selected_index(), Some(0));
}

#[test]
fn press_on_empty_canvas_deselects_and_stays_inert() {
    let mut rig = Rig::with(&[(40, 40, 100, 80)]);
    rig.click(50, 50);
    rig.press(500, 500);
    assert_eq!(rig.visages.selected_index(), None);
    // sliding onto the visage during the same press does not grab it
    rig.press(60, 60);
    assert_eq!(rig.ctl.gesture(), Gesture::Idle);
    assert_eq!(rig.rect(0), (40, 40, 100, 80));
}

#[test]
fn drop_drag_resize_scenario() {
    let mut rig = Rig::with(&[(40, 40, 100, 80)]);
    let mirrored = rig.visages.get(0).map(|v| v.surface.flipped_horizontal());

    // drag by (20,-5)
    rig.press(50, 50);
    rig.press(70, 45);
    rig.hover(70, 45);
    assert_eq!(rig.rect(0), (60, 35, 100, 80));

    // bottom-right handle to w = -10
    rig.press(160, 115);
    assert_eq!(rig.ctl.gesture(), Gesture::Resizing { handle: Handle::BottomRight });
    rig.press(50, 115);
    assert_eq!(rig.rect(0), (60, 35, -10, 80));
    rig.hover(50, 115);
    assert_eq!(rig.rect(0), (50, 35, 10, 80));
    assert_eq!(rig.visages.get(0).map(|v| v.surface.clone()), mirrored);
}

#[test]
fn resize_crossing_both_axes_flips_both_once() {
    let mut rig = Rig::with(&[(100, 100, 40, 20)]);
    let expected = rig.visages.get(0).map(|v| v.surface.flipped_horizontal().flipped_vertical());
    rig.click(110, 110);
    rig.press(100, 100);
    assert_eq!(rig.ctl.gesture(), Gesture::Resizing { handle: Handle::TopLeft });
    rig.press(120, 110);
    rig.press(150, 130);
    rig.hover(150, 130);
    assert_eq!(rig.rect(0), (140, 120, 10, 10));
    assert_eq!(rig.visages.get(0).map(|v| v.surface.clone()), expected);
}

#[test]
fn toolbar_click_runs_action_and_suppresses_drag() {
    let mut rig = Rig::with(&[(100, 100, 40, 20)]);
    rig.click(110, 110);
    // slot 5 = duplicate: x 62..94, y 270..302
    rig.press(70, 280);
    assert_eq!(rig.ctl.gesture(), Gesture::ClickingButton);
    assert_eq!(rig.visages.len(), 2);
    assert_eq!(rig.visages.selected_index(), Some(1));
    assert_eq!(rig.rect(1), (130, 130, 40, 20));
    rig.press(200, 300);
    rig.hover(200, 300);
    assert_eq!(rig.rect(1), (130, 130, 40, 20));
}

#[test]
fn hotkeys_fire_once_per_key_down() {
    let mut rig = Rig::with(&[(100, 100, 40, 20)]);
    rig.click(110, 110);
    rig.frame(0, 0, false, false, &[Key::C]);
    rig.frame(0, 0, false, false, &[Key::C]);
    rig.frame(0, 0, false, false, &[Key::C]);
    assert_eq!(rig.visages.len(), 2);
    rig.frame(0, 0, false, false, &[]);
    rig.frame(0, 0, false, false, &[Key::C]);
    assert_eq!(rig.visages.len(), 3);
}

#[test]
fn rotate_hotkey_swaps_size() {
    let mut rig = Rig::with(&[(100, 100, 40, 20)]);
    rig.click(110, 110);
    rig.key(Key::R);
    assert_eq!(rig.rect(0), (100, 100, 20, 40));
}

#[test]
fn eraser_paints_a_disc_in_surface_space() {
    let mut rig = Rig::with(&[(0, 0, 100, 100)]);
    rig.click(50, 50);
    rig.key(Key::E);
    assert!(rig.ctl.is_erasing());
    rig.press(50, 50);
    assert_eq!(rig.ctl.gesture(), Gesture::Erasing { slider_dragging: false, last_pixel: Some((50, 50)) });
    let s = &rig.visages.get(0).expect("visage").surface;
    assert_eq!(s.get(50, 50).map(|p| p[3]), Some(0));
    assert_eq!(s.get(60, 50).map(|p| p[3]), Some(0));
    assert_eq!(s.get(61, 50).map(|p| p[3]), Some(255));
    // released: the tool stays on
    rig.hover(50, 50);
    assert!(rig.ctl.is_erasing());
    assert_eq!(rig.ctl.gesture(), Gesture::Idle);
}

#[test]
fn eraser_radius_is_in_surface_pixels_when_scaled() {
    let mut rig = Rig::with(&[(0, 0, 100, 100)]);
    if let Some(v) = rig.visages.get_mut(0) {
        v.w = 200;
        v.h = 200;
    }
    rig.click(100, 100);
    rig.key(Key::E);
    rig.press(100, 100); // surface pixel (50,50)
    let s = &rig.visages.get(0).expect("visage").surface;
    assert_eq!(s.get(60, 50).map(|p| p[3]), Some(0));
    assert_eq!(s.get(61, 50).map(|p| p[3]), Some(255));
}

#[test]
fn fast_stroke_leaves_no_gaps() {
    let mut rig = Rig::with(&[(0, 0, 200, 60)]);
    rig.click(10, 30);
    rig.key(Key::E);
    rig.press(20, 30);
    rig.press(180, 30);
    let s = &rig.visages.get(0).expect("visage").surface;
    for x in 20..=180 {
        for dy in -10..=10 {
            assert_eq!(s.get(x, 30 + dy).map(|p| p[3]), Some(0), "gap at ({x},{})", 30 + dy);
        }
    }
}

#[test]
fn slider_drag_sets_clamped_radius() {
    let mut rig = Rig::with(&[(100, 100, 200, 100)]);
    rig.click(150, 150);
    rig.key(Key::E);
    // slider track: x 125..275, y 218..226
    rig.press(165, 222);
    assert_eq!(rig.ctl.gesture(), Gesture::Erasing { slider_dragging: true, last_pixel: None });
    assert_eq!(rig.ctl.brush().radius(), 40);
    rig.press(1_000, 400);
    assert_eq!(rig.ctl.brush().radius(), MAX_RADIUS);
    rig.press(-1_000, 222);
    assert_eq!(rig.ctl.brush().radius(), MIN_RADIUS);
    rig.hover(0, 0);
    assert_eq!(rig.ctl.brush().radius(), MIN_RADIUS);
    // nothing got erased by the slider
    assert_eq!(rig.visages.get(0).map(|v| v.surface.transparent_count()), Some(0));
}

#[test]
fn far_click_switches_eraser_off_and_falls_through() {
    let mut rig = Rig::with(&[(0, 0, 50, 50), (400, 400, 50, 50)]);
    rig.click(10, 10);
    rig.key(Key::E);
    rig.press(420, 420);
    assert!(!rig.ctl.is_erasing());
    assert_eq!(rig.visages.selected_index(), Some(1));
    assert!(matches!(rig.ctl.gesture(), Gesture::Dragging { .. }));
}

#[test]
fn blocked_buttons_are_skipped_while_erasing() {
    let mut rig = Rig::with(&[(100, 100, 40, 200)]);
    rig.click(110, 110);
    rig.key(Key::E);
    rig.press(70, 280); // duplicate button
    assert_eq!(rig.visages.len(), 1);
    assert!(matches!(rig.ctl.gesture(), Gesture::Erasing { .. }));
    rig.hover(70, 280);
    assert_eq!(rig.ctl.cursor(&rig.visages), CursorHint::NotAllowed);

    // flip (slot 1: y 142..174) still works
    let flipped = rig.visages.get(0).map(|v| v.surface.flipped_horizontal());
    rig.press(70, 150);
    assert_eq!(rig.ctl.gesture(), Gesture::ClickingButton);
    assert_eq!(rig.visages.get(0).map(|v| v.surface.clone()), flipped);
}

#[test]
fn eraser_button_toggle_off_cancels_stroke_state() {
    let mut rig = Rig::with(&[(100, 100, 40, 20)]);
    rig.click(110, 110);
    rig.key(Key::E);
    rig.press(110, 110);
    assert!(matches!(rig.ctl.gesture(), Gesture::Erasing { .. }));
    rig.frame(115, 110, true, false, &[Key::E]);
    assert!(!rig.ctl.is_erasing());
    assert_eq!(rig.ctl.gesture(), Gesture::Idle);
}

#[test]
fn eraser_toggle_off_cancels_slider_drag() {
    let mut rig = Rig::with(&[(100, 100, 200, 100)]);
    rig.click(150, 150);
    rig.key(Key::E);
    // slider track: x 125..275, y 218..226
    rig.press(165, 222);
    assert_eq!(rig.ctl.gesture(), Gesture::Erasing { slider_dragging: true, last_pixel: None });
    assert_eq!(rig.ctl.brush().radius(), 40);

    rig.frame(200, 222, true, false, &[Key::E]);
    assert!(!rig.ctl.is_erasing());
    assert_eq!(rig.ctl.gesture(), Gesture::Idle);
    // still held: the knob no longer follows the pointer
    rig.press(250, 222);
    assert_eq!(rig.ctl.gesture(), Gesture::Idle);
    assert_eq!(rig.ctl.brush().radius(), 40);
}

#[test]
fn pan_is_incremental_and_moves_everything() {
    let mut rig = Rig::with(&[(0, 0, 10, 10), (100, 50, 10, 10)]);
    rig.frame(200, 200, false, true, &[]);
    assert_eq!(rig.ctl.gesture(), Gesture::Panning { last_x: 200, last_y: 200 });
    rig.frame(210, 195, false, true, &[]);
    rig.frame(215, 190, false, true, &[]);
    assert_eq!(rig.rect(0), (15, -10, 10, 10));
    assert_eq!(rig.rect(1), (115, 40, 10, 10));
    rig.hover(215, 190);
    assert_eq!(rig.ctl.gesture(), Gesture::Idle);
}

#[test]
fn delete_hotkey_mid_drag_stops_the_drag() {
    let mut rig = Rig::with(&[(0, 0, 50, 50), (100, 0, 50, 50)]);
    rig.press(110, 10);
    rig.frame(120, 10, true, false, &[Key::D]);
    assert_eq!(rig.visages.len(), 1);
    assert_eq!(rig.ctl.gesture(), Gesture::ClickingButton);
    rig.press(300, 300);
    assert_eq!(rig.rect(0), (0, 0, 50, 50));
}

#[test]
fn cursor_reflects_hover_and_is_emitted_on_change_only() {
    let mut rig = Rig::with(&[(100, 100, 40, 20)]);
    rig.hover(0, 0);
    assert_eq!(rig.ctl.cursor_change(&rig.visages), Some(CursorHint::Default));
    assert_eq!(rig.ctl.cursor_change(&rig.visages), None);

    rig.click(110, 110);
    rig.hover(100, 100);
    assert_eq!(rig.ctl.cursor_change(&rig.visages), Some(CursorHint::ResizeNwse));
    rig.hover(140, 100);
    assert_eq!(rig.ctl.cursor_change(&rig.visages), Some(CursorHint::ResizeNesw));
    rig.hover(70, 120);
    assert_eq!(rig.ctl.cursor_change(&rig.visages), Some(CursorHint::Pointer));

    rig.press(120, 110);
    assert_eq!(rig.ctl.cursor(&rig.visages), CursorHint::Move);
    rig.hover(120, 110);
    rig.key(Key::E);
    assert_eq!(rig.ctl.cursor(&rig.visages), CursorHint::Crosshair);
    rig.hover(600, 600);
    assert_eq!(rig.ctl.cursor(&rig.visages), CursorHint::Pointer);
}

#[test]
fn eraser_switches_off_when_selection_disappears() {
    let mut rig = Rig::with(&[(100, 100, 40, 20)]);
    rig.click(110, 110);
    rig.key(Key::E);
    rig.visages.deselect();
    rig.hover(0, 0);
    assert!(!rig.ctl.is_erasing());
}
