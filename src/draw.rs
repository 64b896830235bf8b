// Window + software drawing utilities.
// Visual effects provided here:
// 1) A window that shows the canvas and reports pointer/keyboard state.
// 2) Rasterizing the draw list: stretched pictures, rectangles, discs.
// 3) A tiny 5x7 bitmap font for toolbar labels and the HUD.

use minifb::{CursorStyle, Key, MouseButton, MouseMode, Window, WindowOptions};

use crate::error::Error;
use crate::gesture::{CursorHint, FrameInput};
use crate::scene::DrawCmd;
use crate::surface::PixelSurface;
use crate::types::{FrameBuffer, Rect};
use crate::visage::floor_div;

pub struct Drawer {
    window: Window, // the on-screen window you see
}

impl Drawer {
    /// Create a resizable window.
    /// Visual: a new empty window appears with your chosen title.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let options = WindowOptions { resize: true, ..WindowOptions::default() };
        let mut window = Window::new(title, width, height, options).map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(60);
        Ok(Self { window })
    }

    /// Push the pixels for this frame to the screen.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// True while ESC is held down (we'll exit when this is pressed).
    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// Current inner size; the framebuffer follows it.
    pub fn size(&self) -> (usize, usize) {
        self.window.get_size()
    }

    /// Snapshot of pointer + buttons + held keys for the gesture controller.
    /// The pointer is not clamped, so drags can leave the window and come back.
    pub fn input(&self) -> FrameInput {
        let pointer = self
            .window
            .get_mouse_pos(MouseMode::Pass)
            .map(|(x, y)| (x.floor() as i32, y.floor() as i32))
            .unwrap_or((i32::MIN / 2, i32::MIN / 2));
        FrameInput {
            pointer,
            left: self.window.get_mouse_down(MouseButton::Left),
            right: self.window.get_mouse_down(MouseButton::Right),
            keys_down: self.window.get_keys(),
        }
    }

    /// Closest minifb cursor for a hint (minifb has no diagonal-resize or not-allowed shapes).
    pub fn set_cursor(&mut self, hint: CursorHint) {
        let style = match hint {
            CursorHint::Default | CursorHint::NotAllowed => CursorStyle::Arrow,
            CursorHint::Pointer => CursorStyle::OpenHand,
            CursorHint::Move => CursorStyle::ClosedHand,
            CursorHint::Crosshair => CursorStyle::Crosshair,
            CursorHint::ResizeNwse | CursorHint::ResizeNesw => CursorStyle::ResizeAll,
        };
        self.window.set_cursor_style(style);
    }
}

/* ---------- Software drawing: pixels, rectangles, discs, pictures ---------- */

/// Paint the whole draw list, in order.
pub fn render(fb: &mut FrameBuffer, cmds: &[DrawCmd<'_>]) {
    for cmd in cmds {
        match cmd {
            DrawCmd::Image { surface, dest } => blit_surface(fb, surface, *dest),
            DrawCmd::FillRect { rect, color, alpha } => fill_rect(fb, *rect, *color, *alpha),
            DrawCmd::Disc { cx, cy, radius, color, alpha } => fill_disc(fb, *cx, *cy, *radius, *color, *alpha),
            DrawCmd::Text { x, y, text, scale, color } => draw_text_5x7(fb, *x, *y, text, *scale, *color),
        }
    }
}

/// Put a pixel on the framebuffer if (x,y) is inside bounds.
/// Visual: the exact pixel at (x,y) changes color.
#[inline]
fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32) {
    blend_pixel(fb, x, y, color, 255);
}

/// Mix `color` over the pixel at (x,y) with opacity `alpha` (0..255).
#[inline]
fn blend_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32, alpha: u8) {
    if x < 0 || y < 0 || alpha == 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    fb.pixels[idx] = if alpha == 255 { color } else { mix(fb.pixels[idx], color, alpha) };
}

#[inline]
fn mix(dst: u32, src: u32, alpha: u8) -> u32 {
    let a = alpha as u32;
    let inv = 255 - a;
    let ch = |shift: u32| ((((src >> shift) & 0xFF) * a + ((dst >> shift) & 0xFF) * inv) / 255) << shift;
    ch(16) | ch(8) | ch(0)
}

/// Solid (or translucent) rectangle; negative sizes are normalized.
pub fn fill_rect(fb: &mut FrameBuffer, rect: Rect, color: u32, alpha: u8) {
    let (x0, x1) = ordered(rect.x, rect.x + rect.w);
    let (y0, y1) = ordered(rect.y, rect.y + rect.h);
    let x0 = x0.max(0);
    let y0 = y0.max(0);
    let x1 = x1.min(fb.width as i32);
    let y1 = y1.min(fb.height as i32);
    for y in y0..y1 {
        for x in x0..x1 {
            blend_pixel(fb, x, y, color, alpha);
        }
    }
}

/// Filled circle with a hard edge.
pub fn fill_disc(fb: &mut FrameBuffer, cx: i32, cy: i32, radius: i32, color: u32, alpha: u8) {
    if radius < 0 {
        return;
    }
    // i64 so a huge preview (small picture blown up on screen) can't overflow
    let (cx, cy, r) = (i64::from(cx), i64::from(cy), i64::from(radius));
    let r2 = r * r;
    for y in (cy - r).max(0)..=(cy + r).min(fb.height as i64 - 1) {
        for x in (cx - r).max(0)..=(cx + r).min(fb.width as i64 - 1) {
            let (dx, dy) = (x - cx, y - cy);
            if dx * dx + dy * dy <= r2 {
                blend_pixel(fb, x as i32, y as i32, color, alpha);
            }
        }
    }
}

/// Stretch a surface into `dest` (nearest neighbor), alpha-blended over the canvas.
/// Visual: the picture at its on-screen size; erased texels show the background.
/// Negative width/height draw the picture mirrored, like a resize in progress.
pub fn blit_surface(fb: &mut FrameBuffer, surface: &PixelSurface, dest: Rect) {
    if dest.w == 0 || dest.h == 0 || surface.width() == 0 || surface.height() == 0 {
        return;
    }
    let sw = i64::from(surface.width());
    let sh = i64::from(surface.height());
    let (x0, x1) = ordered(dest.x, dest.x + dest.w);
    let (y0, y1) = ordered(dest.y, dest.y + dest.h);
    let pixels = surface.pixels();

    // sample at pixel centers so mirrored (negative) rectangles stay symmetric
    for y in y0.max(0)..y1.min(fb.height as i32) {
        let sy = floor_div((2 * i64::from(y - dest.y) + 1) * sh, 2 * i64::from(dest.h)).clamp(0, sh - 1);
        for x in x0.max(0)..x1.min(fb.width as i32) {
            let sx = floor_div((2 * i64::from(x - dest.x) + 1) * sw, 2 * i64::from(dest.w)).clamp(0, sw - 1);
            let i = ((sy * sw + sx) * 4) as usize;
            let (r, g, b, a) = (pixels[i] as u32, pixels[i + 1] as u32, pixels[i + 2] as u32, pixels[i + 3]);
            blend_pixel(fb, x, y, (r << 16) | (g << 8) | b, a);
        }
    }
}

fn ordered(a: i32, b: i32) -> (i32, i32) {
    if a <= b { (a, b) } else { (b, a) }
}

/* ---------- 5x7 bitmap font (digits, A-Z and a little punctuation) ---------- */

/// Return a 5x7 glyph bitmap for a limited character set.
/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    // Helper macro to define a glyph quickly
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch.to_ascii_uppercase() {
        // Digits 0..9
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'B' => g!(0b11110,0b10001,0b10001,0b11110,0b10001,0b10001,0b11110),
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'G' => g!(0b01110,0b10001,0b10000,0b10111,0b10001,0b10001,0b01111),
        'H' => g!(0b10001,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'J' => g!(0b00111,0b00010,0b00010,0b00010,0b00010,0b10010,0b01100),
        'K' => g!(0b10001,0b10010,0b10100,0b11000,0b10100,0b10010,0b10001),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'M' => g!(0b10001,0b11011,0b10101,0b10101,0b10001,0b10001,0b10001),
        'N' => g!(0b10001,0b10001,0b11001,0b10101,0b10011,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'Q' => g!(0b01110,0b10001,0b10001,0b10001,0b10101,0b10010,0b01101),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'V' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b01010,0b00100),
        'W' => g!(0b10001,0b10001,0b10001,0b10101,0b10101,0b10101,0b01010),
        'X' => g!(0b10001,0b10001,0b01010,0b00100,0b01010,0b10001,0b10001),
        'Y' => g!(0b10001,0b10001,0b01010,0b00100,0b00100,0b00100,0b00100),
        'Z' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b10000,0b11111),

        // Punctuation: space, vertical bar, colon, dot, dash
        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),
        '-' => g!(0b00000,0b00000,0b00000,0b11111,0b00000,0b00000,0b00000),

        _ => None,
    }
}

/// Draw a single 5x7 character at (x,y), each font pixel `scale`×`scale` screen pixels.
/// Visual: a glyph appears with a 1-pixel black shadow for contrast.
fn draw_char_5x7(fb: &mut FrameBuffer, x: i32, y: i32, ch: char, scale: i32, color: u32) {
    let Some(rows) = glyph5x7(ch) else { return };
    // Shadow pass first, then the glyph itself on top
    for (ox, oy, c) in [(1, 1, 0x00000000), (0, 0, color)] {
        for (ry, rowbits) in rows.iter().enumerate() {
            for rx in 0..5 {
                if (rowbits & (1 << (4 - rx))) == 0 {
                    continue;
                }
                for sy in 0..scale {
                    for sx in 0..scale {
                        put_pixel(fb, x + rx * scale + sx + ox, y + ry as i32 * scale + sy + oy, c);
                    }
                }
            }
        }
    }
}

/// Draw a text string using 5x7 glyphs.
/// Visual: a compact string appears; each glyph is 5x7 with 1-pixel spacing (before scaling).
pub fn draw_text_5x7(fb: &mut FrameBuffer, mut x: i32, y: i32, text: &str, scale: i32, color: u32) {
    let scale = scale.max(1);
    for ch in text.chars() {
        draw_char_5x7(fb, x, y, ch, scale, color);
        x += 6 * scale; // 5 pixels glyph width + 1 pixel spacing
    }
}
