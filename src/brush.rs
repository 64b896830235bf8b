// Eraser brush: a hard-edged disc in *surface* pixels.
// Visual: wherever the disc passes, the picture becomes transparent.
// Strokes are swept as thick lines so fast pointer moves leave no gaps.

use crate::surface::{PixelSurface, TRANSPARENT};

pub const MIN_RADIUS: i32 = 5;
pub const MAX_RADIUS: i32 = 145;
pub const DEFAULT_RADIUS: i32 = 30;

/// Brush size. Always within [MIN_RADIUS, MAX_RADIUS].
/// Visual: the slider knob position under the selected visage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BrushConfig {
    radius: i32,
    offsets: Vec<(i32, i32)>,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self::new(DEFAULT_RADIUS)
    }
}

impl BrushConfig {
    pub fn new(radius: i32) -> Self {
        let radius = radius.clamp(MIN_RADIUS, MAX_RADIUS);
        Self { radius, offsets: disc_offsets(radius) }
    }

    pub fn radius(&self) -> i32 {
        self.radius
    }

    /// Set a new radius (clamped). Offsets are rebuilt only when it actually changes.
    pub fn set_radius(&mut self, radius: i32) {
        let radius = radius.clamp(MIN_RADIUS, MAX_RADIUS);
        if radius != self.radius {
            self.radius = radius;
            self.offsets = disc_offsets(radius);
        }
    }

    /// Precomputed disc for the current radius.
    #[cfg(test)]
    pub fn offsets(&self) -> &[(i32, i32)] {
        &self.offsets
    }

    /// One stroke sample: the end disc, plus the swept segment from the previous sample.
    pub fn stroke(&self, surface: &mut PixelSurface, from: Option<(i32, i32)>, to: (i32, i32)) {
        match from {
            Some(p0) if p0 != to => erase_segment(surface, p0, to, self.radius),
            _ => erase_with_offsets(surface, to.0, to.1, &self.offsets),
        }
    }
}

/// All (dx,dy) with dx²+dy² ≤ r² (r<0 yields nothing).
pub fn disc_offsets(radius: i32) -> Vec<(i32, i32)> {
    if radius < 0 {
        return Vec::new();
    }
    let r2 = radius * radius;
    let mut out = Vec::new();
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= r2 {
                out.push((dx, dy));
            }
        }
    }
    out
}

/// Erase a disc of `radius` centered on (cx,cy), clipped to the surface.
#[cfg(test)]
pub fn erase_disc(surface: &mut PixelSurface, cx: i32, cy: i32, radius: i32) {
    erase_with_offsets(surface, cx, cy, &disc_offsets(radius));
}

fn erase_with_offsets(surface: &mut PixelSurface, cx: i32, cy: i32, offsets: &[(i32, i32)]) {
    for &(dx, dy) in offsets {
        surface.put(cx + dx, cy + dy, TRANSPARENT);
    }
}

/// Erase every pixel within `radius` of the segment p0→p1 (a thick line with round caps).
/// Visual: one continuous stripe, even when the pointer jumped far in one frame.
pub fn erase_segment(surface: &mut PixelSurface, p0: (i32, i32), p1: (i32, i32), radius: i32) {
    if radius < 0 {
        return;
    }
    let w = surface.width() as i32;
    let h = surface.height() as i32;

    // Bounding box of the capsule, clipped to the surface.
    let min_x = (p0.0.min(p1.0) - radius).max(0);
    let max_x = (p0.0.max(p1.0) + radius).min(w - 1);
    let min_y = (p0.1.min(p1.1) - radius).max(0);
    let max_y = (p0.1.max(p1.1) + radius).min(h - 1);
    if min_x > max_x || min_y > max_y {
        return;
    }

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            if within_segment(x, y, p0, p1, radius) {
                surface.put(x, y, TRANSPARENT);
            }
        }
    }
}

/// Exact integer test: distance from (x,y) to segment p0→p1 is ≤ r.
fn within_segment(x: i32, y: i32, p0: (i32, i32), p1: (i32, i32), r: i32) -> bool {
    let (qx, qy) = (i64::from(x - p0.0), i64::from(y - p0.1));
    let (dx, dy) = (i64::from(p1.0 - p0.0), i64::from(p1.1 - p0.1));
    let r2 = i64::from(r) * i64::from(r);
    let len2 = dx * dx + dy * dy;
    let dot = qx * dx + qy * dy;

    if len2 == 0 || dot <= 0 {
        // closest point is p0
        return qx * qx + qy * qy <= r2;
    }
    if dot >= len2 {
        // closest point is p1
        let (ex, ey) = (i64::from(x - p1.0), i64::from(y - p1.1));
        return ex * ex + ey * ey <= r2;
    }
    // perpendicular distance², scaled by len2 to stay in integers
    let cross = qx * dy - qy * dx;
    cross * cross <= r2 * len2
}

#[cfg(test)]
#[path = "brush_test.rs"]
mod tests;
