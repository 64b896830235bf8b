// A visage = one placed picture on the canvas.
// Visual: the surface is stretched into the rectangle [x, x+w] × [y, y+h].
// The rectangle can be resized without touching the pixels, so screen→surface
// mapping always goes through the current scale.

use crate::surface::PixelSurface;

/// Half-size of the square grab area around each corner (screen pixels).
pub const HANDLE_AREA: i32 = 8;

/// Which corner the user grabbed. Visual: one of the four round dots on the border.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Handle {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Handle {
    /// Hit-test order when corners overlap (tiny visages).
    pub const ALL: [Handle; 4] = [Handle::TopLeft, Handle::TopRight, Handle::BottomLeft, Handle::BottomRight];

    /// True for the corners on the ↖↘ diagonal.
    pub fn is_nwse(self) -> bool {
        matches!(self, Handle::TopLeft | Handle::BottomRight)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Visage {
    pub x: i32,
    pub y: i32,
    /// Displayed width; transiently negative while a resize crosses the opposite edge.
    pub w: i32,
    /// Displayed height; same rule as `w`.
    pub h: i32,
    pub surface: PixelSurface,
}

impl Visage {
    /// New visage at (x,y) showing the surface at its natural size.
    pub fn new(x: i32, y: i32, surface: PixelSurface) -> Self {
        let w = surface.width() as i32;
        let h = surface.height() as i32;
        Self { x, y, w, h, surface }
    }

    /// Inclusive rectangle test. Visual: is the pointer over this picture?
    pub fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x && px <= self.x + self.w && py >= self.y && py <= self.y + self.h
    }

    /// True when (px,py) lies within `margin` pixels of the rectangle.
    pub fn near(&self, px: i32, py: i32, margin: i32) -> bool {
        px >= self.x - margin
            && px <= self.x + self.w + margin
            && py >= self.y - margin
            && py <= self.y + self.h + margin
    }

    /// Screen position of a corner.
    pub fn corner(&self, handle: Handle) -> (i32, i32) {
        match handle {
            Handle::TopLeft => (self.x, self.y),
            Handle::TopRight => (self.x + self.w, self.y),
            Handle::BottomLeft => (self.x, self.y + self.h),
            Handle::BottomRight => (self.x + self.w, self.y + self.h),
        }
    }

    /// Which corner grab box (±HANDLE_AREA) contains the point, if any.
    pub fn handle_at(&self, px: i32, py: i32) -> Option<Handle> {
        Handle::ALL.into_iter().find(|&h| {
            let (cx, cy) = self.corner(h);
            (px - cx).abs() <= HANDLE_AREA && (py - cy).abs() <= HANDLE_AREA
        })
    }

    /// Screen point → surface pixel, scale-aware.
    /// Returns `None` when the rectangle is degenerate (w or h is 0): no mapping exists.
    pub fn screen_to_surface(&self, px: i32, py: i32) -> Option<(i32, i32)> {
        if self.w == 0 || self.h == 0 {
            return None;
        }
        let sx = floor_div(i64::from(px - self.x) * i64::from(self.surface.width()), i64::from(self.w));
        let sy = floor_div(i64::from(py - self.y) * i64::from(self.surface.height()), i64::from(self.h));
        Some((sx as i32, sy as i32))
    }

    /// Surface pixels → screen pixels along x (used to size the brush preview).
    /// Saturates at `i32::MAX` for extreme upscales.
    pub fn surface_to_screen_len(&self, len: i32) -> i32 {
        let sw = i64::from(self.surface.width());
        if sw == 0 {
            return len;
        }
        let scaled = i64::from(len) * i64::from(self.w).abs() / sw;
        scaled.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
    }

    /// Drag one corner to (px,py). Deltas are taken against the live rectangle,
    /// so calling this every frame follows the pointer; w/h may go negative.
    pub fn resize(&mut self, handle: Handle, px: i32, py: i32) {
        match handle {
            Handle::TopLeft => {
                self.w += self.x - px;
                self.h += self.y - py;
                self.x = px;
                self.y = py;
            }
            Handle::TopRight => {
                self.w = px - self.x;
                self.h += self.y - py;
                self.y = py;
            }
            Handle::BottomLeft => {
                self.w += self.x - px;
                self.h = py - self.y;
                self.x = px;
            }
            Handle::BottomRight => {
                self.w = px - self.x;
                self.h = py - self.y;
            }
        }
    }

    /// Normalize an inverted rectangle after a resize gesture.
    /// Visual: dragging a corner past the opposite edge mirrors the picture.
    /// Returns which axes were flipped (horizontal, vertical).
    pub fn finalize_resize(&mut self) -> (bool, bool) {
        let flip_h = self.w < 0;
        let flip_v = self.h < 0;
        if flip_h {
            self.x += self.w;
            self.w = -self.w;
            self.surface = self.surface.flipped_horizontal();
        }
        if flip_v {
            self.y += self.h;
            self.h = -self.h;
            self.surface = self.surface.flipped_vertical();
        }
        (flip_h, flip_v)
    }
}

/// Division rounding toward negative infinity, for either sign of divisor.
pub(crate) fn floor_div(num: i64, den: i64) -> i64 {
    if den < 0 { (-num).div_euclid(-den) } else { num.div_euclid(den) }
}

#[cfg(test)]
#[path = "visage_test.rs"]
mod tests;
