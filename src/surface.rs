// The pixels behind one visage.
// Visual: whatever is stored here is what you see stretched into the visage rectangle.
// Erasing writes transparent pixels in place; flips and rotation hand back a brand new surface.

use image::{imageops, Rgba, RgbaImage};

/// Fully transparent pixel. Visual: the canvas background shows through.
pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Mutable width×height RGBA buffer (row-major, 4 bytes per pixel).
#[derive(Clone, Debug, PartialEq)]
pub struct PixelSurface {
    image: RgbaImage,
}

impl PixelSurface {
    /// Wrap a decoded image.
    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    /// Build a surface from raw RGBA bytes; `None` when the length is not `4*w*h`.
    #[cfg(test)]
    pub fn from_raw(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        RgbaImage::from_raw(width, height, pixels).map(Self::from_image)
    }

    /// Surface filled with one color.
    #[cfg(test)]
    pub fn filled(width: u32, height: u32, color: [u8; 4]) -> Self {
        Self::from_image(RgbaImage::from_pixel(width, height, Rgba(color)))
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Raw RGBA bytes, row-major.
    pub fn pixels(&self) -> &[u8] {
        self.image.as_raw()
    }

    /// Read one pixel; `None` outside the surface.
    pub fn get(&self, x: i32, y: i32) -> Option<[u8; 4]> {
        if self.in_bounds(x, y) {
            Some(self.image.get_pixel(x as u32, y as u32).0)
        } else {
            None
        }
    }

    /// Write one pixel if (x,y) is inside the surface.
    /// Visual: that single texel changes color.
    #[inline]
    pub fn put(&mut self, x: i32, y: i32, color: Rgba<u8>) {
        if self.in_bounds(x, y) {
            self.image.put_pixel(x as u32, y as u32, color);
        }
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.image.width() && (y as u32) < self.image.height()
    }

    /// Mirror left↔right. Visual: the picture faces the other way.
    pub fn flipped_horizontal(&self) -> Self {
        Self::from_image(imageops::flip_horizontal(&self.image))
    }

    /// Mirror top↔bottom. Visual: the picture is upside-down (but not rotated).
    pub fn flipped_vertical(&self) -> Self {
        Self::from_image(imageops::flip_vertical(&self.image))
    }

    /// Rotate 90° clockwise; width and height swap. Lossless, no resampling.
    pub fn rotated_cw(&self) -> Self {
        Self::from_image(imageops::rotate90(&self.image))
    }

    /// Count of pixels with alpha 0 (handy when checking erase results).
    #[cfg(test)]
    pub fn transparent_count(&self) -> usize {
        self.image.pixels().filter(|p| p.0[3] == 0).count()
    }
}
