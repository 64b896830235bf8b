// Turns the current state into an ordered list of things to paint.
// Visual: pictures back-to-front, then the selection chrome on top,
// then (while erasing) the brush preview and the size slider.

use crate::actions::ToolAction;
use crate::collection::VisageCollection;
use crate::gesture::GestureController;
use crate::surface::PixelSurface;
use crate::toolbar::{self, ERASE_TOLERANCE};
use crate::types::Rect;
use crate::visage::{Handle, Visage};

pub const BORDER: u32 = 0x00_00_00_00;
pub const HANDLE_OUTER: u32 = 0x00_FF_FF_FF;
pub const HANDLE_INNER: u32 = 0x00_00_00_00;
pub const HANDLE_RADIUS: i32 = 4;
pub const BUTTON_FACE: u32 = 0x00_00_00_00;
pub const BUTTON_LABEL: u32 = 0x00_FF_FF_FF;
/// Eraser accent (tinted buttons + brush preview).
pub const ERASER: u32 = 0x00_FF_20_4E;
pub const ERASER_ALPHA: u8 = 200;
pub const SLIDER_TRACK: u32 = 0x00_00_00_00;
pub const SLIDER_KNOB: u32 = 0x00_FF_FF_FF;

const BORDER_THICKNESS: i32 = 2;
/// Padding between a button's edge and its label.
const LABEL_PAD: i32 = 9;

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCmd<'a> {
    /// A visage's pixels stretched into `dest` (negative w/h draw mirrored).
    Image { surface: &'a PixelSurface, dest: Rect },
    FillRect { rect: Rect, color: u32, alpha: u8 },
    Disc { cx: i32, cy: i32, radius: i32, color: u32, alpha: u8 },
    /// 5×7 text scaled by `scale`.
    Text { x: i32, y: i32, text: String, scale: i32, color: u32 },
}

/// Everything the renderer needs for one frame, back to front.
pub fn build<'a>(visages: &'a VisageCollection, ctl: &GestureController) -> Vec<DrawCmd<'a>> {
    let mut cmds: Vec<DrawCmd<'a>> = visages
        .iter()
        .map(|v| DrawCmd::Image { surface: &v.surface, dest: Rect::new(v.x, v.y, v.w, v.h) })
        .collect();

    if let Some(v) = visages.selected() {
        border(&mut cmds, v);
        handles(&mut cmds, v);
        buttons(&mut cmds, v, ctl.is_erasing());
        if ctl.is_erasing() {
            eraser_overlay(&mut cmds, v, ctl);
        }
    }
    cmds
}

fn border(cmds: &mut Vec<DrawCmd<'_>>, v: &Visage) {
    let t = BORDER_THICKNESS;
    for rect in [
        Rect::new(v.x, v.y, v.w, t),
        Rect::new(v.x, v.y + v.h, v.w + t, t),
        Rect::new(v.x, v.y, t, v.h),
        Rect::new(v.x + v.w, v.y, t, v.h + t),
    ] {
        cmds.push(DrawCmd::FillRect { rect, color: BORDER, alpha: 255 });
    }
}

fn handles(cmds: &mut Vec<DrawCmd<'_>>, v: &Visage) {
    for handle in Handle::ALL {
        let (cx, cy) = v.corner(handle);
        cmds.push(DrawCmd::Disc { cx, cy, radius: HANDLE_RADIUS + 1, color: HANDLE_OUTER, alpha: 255 });
        cmds.push(DrawCmd::Disc { cx, cy, radius: HANDLE_RADIUS, color: HANDLE_INNER, alpha: 255 });
    }
}

fn buttons(cmds: &mut Vec<DrawCmd<'_>>, v: &Visage, erasing: bool) {
    for (slot, action) in ToolAction::ALL.into_iter().enumerate() {
        let rect = toolbar::button_rect(v, slot);
        cmds.push(DrawCmd::FillRect { rect, color: BUTTON_FACE, alpha: 255 });
        if erasing && !action.blocked_while_erasing() {
            cmds.push(DrawCmd::FillRect { rect, color: ERASER, alpha: ERASER_ALPHA });
        }
        cmds.push(DrawCmd::Text {
            x: rect.x + LABEL_PAD,
            y: rect.y + LABEL_PAD,
            text: action.label().to_string(),
            scale: 2,
            color: BUTTON_LABEL,
        });
    }
}

fn eraser_overlay(cmds: &mut Vec<DrawCmd<'_>>, v: &Visage, ctl: &GestureController) {
    let (px, py) = ctl.pointer();
    if !v.near(px, py, ERASE_TOLERANCE) {
        return;
    }
    let radius = ctl.brush().radius();

    // brush preview at the pointer, sized like the real erase on screen
    let preview = v.surface_to_screen_len(radius).max(1);
    cmds.push(DrawCmd::Disc { cx: px, cy: py, radius: preview, color: ERASER, alpha: ERASER_ALPHA });

    let track = toolbar::slider_track(v);
    cmds.push(DrawCmd::FillRect { rect: track, color: SLIDER_TRACK, alpha: 255 });
    let (kx, ky) = toolbar::slider_knob(v, radius);
    cmds.push(DrawCmd::Disc { cx: kx, cy: ky, radius: 12, color: SLIDER_TRACK, alpha: 255 });
    cmds.push(DrawCmd::Disc { cx: kx, cy: ky, radius: 10, color: SLIDER_KNOB, alpha: 255 });
}
