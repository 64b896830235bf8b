// Core types shared by the renderer and the interaction code.

#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,      // how wide the window is (pixels)
    pub height: usize,     // how tall the window is (pixels)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    /// Blank buffer filled with one color.
    pub fn new(width: usize, height: usize, fill: u32) -> Self {
        Self { width, height, pixels: vec![fill; width * height] }
    }

    /// Wipe to a flat color before drawing the next frame.
    pub fn clear(&mut self, fill: u32) {
        self.pixels.fill(fill);
    }

    /// Match the window size; contents are reset.
    pub fn resize(&mut self, width: usize, height: usize, fill: u32) {
        if width != self.width || height != self.height {
            *self = Self::new(width, height, fill);
        }
    }

    #[cfg(test)]
    pub fn get(&self, x: i32, y: i32) -> Option<u32> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(self.pixels[y as usize * self.width + x as usize])
    }
}

/// Axis-aligned screen rectangle with inclusive edges (matches visage hit-testing).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x && px <= self.x + self.w && py >= self.y && py <= self.y + self.h
    }

    /// Grow on every side by `margin` pixels.
    pub fn expanded(&self, margin: i32) -> Self {
        Self::new(self.x - margin, self.y - margin, self.w + 2 * margin, self.h + 2 * margin)
    }
}
