// Interaction state machine, driven once per frame.
// Visual: decides whether a press grabs a corner, clicks a toolbar button,
// erases, drags a picture, pans the whole canvas, or just deselects,
// and sticks to that choice until the button is released.

use std::collections::HashSet;

use minifb::Key;
use tracing::debug;

use crate::actions::{self, KEY_BINDINGS, ToolAction};
use crate::brush::BrushConfig;
use crate::collection::VisageCollection;
use crate::toolbar::{self, ERASE_TOLERANCE};
use crate::visage::Handle;

/// Everything the controller needs from the window for one frame.
#[derive(Clone, Debug, Default)]
pub struct FrameInput {
    pub pointer: (i32, i32),
    pub left: bool,
    pub right: bool,
    /// Keys held this frame (level); the controller derives key-down edges.
    pub keys_down: Vec<Key>,
}

/// The one gesture in progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Gesture {
    #[default]
    Idle,
    /// Moving the selected visage; offset = grab point relative to its origin.
    Dragging { offset_x: i32, offset_y: i32 },
    Resizing { handle: Handle },
    /// Right button held; remembers the previous frame's pointer.
    Panning { last_x: i32, last_y: i32 },
    /// A toolbar button fired; the rest of the press does nothing.
    ClickingButton,
    /// Eraser press: either dragging the size slider or painting a stroke.
    Erasing { slider_dragging: bool, last_pixel: Option<(i32, i32)> },
}

/// Cursor shape the host should show.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorHint {
    Default,
    Pointer,
    Move,
    Crosshair,
    ResizeNwse,
    ResizeNesw,
    NotAllowed,
}

impl CursorHint {
    fn for_handle(handle: Handle) -> Self {
        if handle.is_nwse() { CursorHint::ResizeNwse } else { CursorHint::ResizeNesw }
    }
}

#[derive(Debug, Default)]
pub struct GestureController {
    gesture: Gesture,
    /// Sticky eraser toggle; survives button releases.
    erasing: bool,
    brush: BrushConfig,
    /// Hotkeys that were down last frame.
    latched_keys: HashSet<Key>,
    left_was_down: bool,
    pointer: (i32, i32),
    last_cursor: Option<CursorHint>,
}

impl GestureController {
    pub fn new(brush: BrushConfig) -> Self {
        Self { brush, ..Self::default() }
    }

    #[cfg(test)]
    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    pub fn is_erasing(&self) -> bool {
        self.erasing
    }

    pub fn brush(&self) -> &BrushConfig {
        &self.brush
    }

    /// Pointer position seen on the last update.
    pub fn pointer(&self) -> (i32, i32) {
        self.pointer
    }

    /// Advance one frame.
    pub fn update(&mut self, input: &FrameInput, visages: &mut VisageCollection) {
        let (x, y) = input.pointer;
        self.pointer = input.pointer;

        self.handle_keys(&input.keys_down, visages);

        // The eraser always works on the selection; without one it switches off.
        if self.erasing && visages.selected().is_none() {
            self.set_erasing(false);
        }

        if input.left {
            let pressed_now = !self.left_was_down;
            self.handle_primary(x, y, pressed_now, visages);
        } else if input.right {
            self.handle_pan(x, y, visages);
        } else {
            self.release(visages);
        }
        self.left_was_down = input.left;
    }

    /// Run a toolbar/hotkey action and keep gesture state consistent with it.
    pub fn run_action(&mut self, action: ToolAction, visages: &mut VisageCollection) -> bool {
        let changed = actions::apply(action, visages, &mut self.erasing);
        if !self.erasing {
            self.cancel_erase_gesture();
        }
        // A deleted visage can't keep being dragged or resized.
        if changed && action == ToolAction::Delete && self.gesture != Gesture::Idle {
            self.gesture = Gesture::ClickingButton;
        }
        changed
    }

    fn handle_keys(&mut self, keys_down: &[Key], visages: &mut VisageCollection) {
        for (key, action) in KEY_BINDINGS {
            if keys_down.contains(&key) {
                if self.latched_keys.insert(key) {
                    self.run_action(action, visages);
                }
            } else {
                self.latched_keys.remove(&key);
            }
        }
    }

    fn set_erasing(&mut self, on: bool) {
        if self.erasing != on {
            debug!(erasing = on, "eraser switched");
        }
        self.erasing = on;
        if !on {
            self.cancel_erase_gesture();
        }
    }

    fn cancel_erase_gesture(&mut self) {
        if matches!(self.gesture, Gesture::Erasing { .. }) {
            self.gesture = Gesture::Idle;
        }
    }

    fn handle_primary(&mut self, x: i32, y: i32, pressed_now: bool, visages: &mut VisageCollection) {
        match self.gesture {
            Gesture::Idle | Gesture::Panning { .. } => {
                if pressed_now {
                    self.gesture = Gesture::Idle;
                    self.begin_press(x, y, visages);
                }
            }
            Gesture::Dragging { offset_x, offset_y } => match visages.selected_mut() {
                Some(v) => {
                    v.x = x - offset_x;
                    v.y = y - offset_y;
                }
                None => self.gesture = Gesture::Idle,
            },
            Gesture::Resizing { handle } => match visages.selected_mut() {
                Some(v) => v.resize(handle, x, y),
                None => self.gesture = Gesture::Idle,
            },
            Gesture::ClickingButton => {}
            Gesture::Erasing { slider_dragging: true, .. } => match visages.selected() {
                Some(v) => self.brush.set_radius(toolbar::slider_value(v, x)),
                None => self.gesture = Gesture::Idle,
            },
            Gesture::Erasing { slider_dragging: false, .. } => self.paint(x, y, visages),
        }
    }

    /// Classify a fresh press. First match wins.
    fn begin_press(&mut self, x: i32, y: i32, visages: &mut VisageCollection) {
        if let Some(v) = visages.selected() {
            // 1) corner handles
            if let Some(handle) = v.handle_at(x, y) {
                self.gesture = Gesture::Resizing { handle };
                debug!(?handle, "resize started");
                return;
            }

            // 2) toolbar buttons (some are locked while erasing)
            if let Some(action) = toolbar::button_at(v, x, y) {
                if !(self.erasing && action.blocked_while_erasing()) {
                    self.run_action(action, visages);
                    self.gesture = Gesture::ClickingButton;
                    return;
                }
            }

            // 3) eraser: slider, stroke, or click far away to switch it off
            if self.erasing {
                if toolbar::slider_hit_band(v).contains(x, y) {
                    self.brush.set_radius(toolbar::slider_value(v, x));
                    self.gesture = Gesture::Erasing { slider_dragging: true, last_pixel: None };
                    return;
                }
                if v.near(x, y, ERASE_TOLERANCE) {
                    self.gesture = Gesture::Erasing { slider_dragging: false, last_pixel: None };
                    self.paint(x, y, visages);
                    return;
                }
                self.set_erasing(false);
            }
        }

        // 4) grab whatever is on top under the pointer, or deselect
        match visages.hit_test(x, y) {
            Some(index) => {
                visages.select(index);
                if let Some(v) = visages.get(index) {
                    self.gesture = Gesture::Dragging { offset_x: x - v.x, offset_y: y - v.y };
                    debug!(index, "drag started");
                }
            }
            None => visages.deselect(),
        }
    }

    /// One stroke sample at screen (x,y).
    fn paint(&mut self, x: i32, y: i32, visages: &mut VisageCollection) {
        let Gesture::Erasing { slider_dragging: false, last_pixel } = self.gesture else {
            return;
        };
        let Some(v) = visages.selected_mut() else {
            self.gesture = Gesture::Idle;
            return;
        };
        if !v.near(x, y, ERASE_TOLERANCE) {
            // wandered off the picture: break the stroke
            self.gesture = Gesture::Erasing { slider_dragging: false, last_pixel: None };
            return;
        }
        let Some(pixel) = v.screen_to_surface(x, y) else {
            return;
        };
        if last_pixel == Some(pixel) {
            return;
        }
        self.brush.stroke(&mut v.surface, last_pixel, pixel);
        self.gesture = Gesture::Erasing { slider_dragging: false, last_pixel: Some(pixel) };
    }

    /// Right-button pan, applied incrementally per frame.
    fn handle_pan(&mut self, x: i32, y: i32, visages: &mut VisageCollection) {
        match self.gesture {
            Gesture::Panning { last_x, last_y } => {
                visages.pan_all(x - last_x, y - last_y);
            }
            Gesture::Idle => debug!("pan started"),
            _ => self.release(visages),
        }
        self.gesture = Gesture::Panning { last_x: x, last_y: y };
    }

    /// Buttons up: finish whatever was going on.
    fn release(&mut self, visages: &mut VisageCollection) {
        if let Gesture::Resizing { .. } = self.gesture {
            if let Some(v) = visages.selected_mut() {
                let (flip_h, flip_v) = v.finalize_resize();
                debug!(w = v.w, h = v.h, flip_h, flip_v, "resize finished");
            }
        }
        if self.gesture != Gesture::Idle {
            debug!(gesture = ?self.gesture, "gesture ended");
        }
        self.gesture = Gesture::Idle;
    }

    /// Cursor for the current pointer and gesture.
    pub fn cursor(&self, visages: &VisageCollection) -> CursorHint {
        let (x, y) = self.pointer;
        let mut cursor = CursorHint::Default;

        if let Some(v) = visages.selected() {
            if self.erasing {
                cursor = if v.near(x, y, ERASE_TOLERANCE) { CursorHint::Crosshair } else { CursorHint::Pointer };
            }
            if let Some(action) = toolbar::button_at(v, x, y) {
                cursor = if self.erasing && action.blocked_while_erasing() {
                    CursorHint::NotAllowed
                } else {
                    CursorHint::Pointer
                };
            }
            if let Gesture::Dragging { .. } = self.gesture {
                cursor = CursorHint::Move;
            }
            if let Some(handle) = v.handle_at(x, y) {
                cursor = CursorHint::for_handle(handle);
            }
            if let Gesture::Resizing { handle } = self.gesture {
                cursor = CursorHint::for_handle(handle);
            }
        }

        if let Gesture::Panning { .. } = self.gesture {
            cursor = CursorHint::Move;
        }
        cursor
    }

    /// The cursor, but only when it differs from what the host already shows.
    pub fn cursor_change(&mut self, visages: &VisageCollection) -> Option<CursorHint> {
        let cursor = self.cursor(visages);
        if self.last_cursor == Some(cursor) {
            return None;
        }
        self.last_cursor = Some(cursor);
        Some(cursor)
    }
}

#[cfg(test)]
#[path = "gesture_test.rs"]
mod tests;
