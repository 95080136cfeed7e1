//! RGBA raster buffers
//!
//! A `RasterBuffer` is the unit every stage of the pipeline exchanges: decoded
//! page and font images, the typed layer, the difference layer, the scaled
//! display raster and the selection overlay. Pixels are stored row-major with
//! four bytes (R, G, B, A) per pixel.

use crate::error::{CollateError, Result};

/// Opaque white
pub const WHITE: [u8; 4] = [255, 255, 255, 255];
/// Fully transparent black
pub const TRANSPARENT: [u8; 4] = [0, 0, 0, 0];

/// An axis-aligned pixel rectangle. Origin may be negative; use
/// [`Region::clip`] to obtain the part that lies inside a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Region {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub const fn new(x: i64, y: i64, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// True if the region covers no pixels
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Exclusive right edge
    #[inline]
    pub fn right(&self) -> i64 {
        self.x + self.width as i64
    }

    /// Exclusive bottom edge
    #[inline]
    pub fn bottom(&self) -> i64 {
        self.y + self.height as i64
    }

    /// Half-open containment test (left/top inclusive, right/bottom exclusive)
    #[inline]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x as f64 && x < self.right() as f64 && y >= self.y as f64 && y < self.bottom() as f64
    }

    /// Intersect with `0..width` x `0..height`. Returns an empty region when
    /// nothing is left.
    pub fn clip(&self, width: u32, height: u32) -> Region {
        let x0 = self.x.max(0);
        let y0 = self.y.max(0);
        let x1 = self.right().min(width as i64);
        let y1 = self.bottom().min(height as i64);
        if x1 <= x0 || y1 <= y0 {
            return Region::new(x0, y0, 0, 0);
        }
        Region::new(x0, y0, (x1 - x0) as u32, (y1 - y0) as u32)
    }
}

/// A rectangular grid of RGBA pixels.
///
/// Invariant: `pixels.len() == width * height * 4`.
#[derive(Clone, PartialEq, Eq)]
pub struct RasterBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl std::fmt::Debug for RasterBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl RasterBuffer {
    /// Allocate a buffer filled with transparent black
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, TRANSPARENT)
    }

    /// Allocate a buffer with every pixel set to `color`
    pub fn filled(width: u32, height: u32, color: [u8; 4]) -> Self {
        let count = width as usize * height as usize;
        let mut pixels = Vec::with_capacity(count * 4);
        for _ in 0..count {
            pixels.extend_from_slice(&color);
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Allocate an opaque white buffer
    pub fn white(width: u32, height: u32) -> Self {
        Self::filled(width, height, WHITE)
    }

    /// Wrap already-decoded RGBA8 pixel data
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(CollateError::InvalidBuffer {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Region covering the whole buffer
    pub fn bounds(&self) -> Region {
        Region::new(0, 0, self.width, self.height)
    }

    /// Raw RGBA bytes
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Consume the buffer and return the raw RGBA bytes
    pub fn into_raw(self) -> Vec<u8> {
        self.pixels
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    /// Read one pixel (None if out of bounds)
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.offset(x, y);
        Some([
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ])
    }

    /// Write one pixel (ignored if out of bounds)
    pub fn set_pixel(&mut self, x: u32, y: u32, color: [u8; 4]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let i = self.offset(x, y);
        self.pixels[i..i + 4].copy_from_slice(&color);
    }

    /// Full-canvas clear
    pub fn clear(&mut self, color: [u8; 4]) {
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&color);
        }
    }

    /// True if `region` lies entirely inside this buffer
    pub fn contains_region(&self, region: Region) -> bool {
        region.x >= 0
            && region.y >= 0
            && region.right() <= self.width as i64
            && region.bottom() <= self.height as i64
    }

    /// Copy a region out as tightly packed RGBA rows.
    ///
    /// Returns None if the region is not fully inside the buffer.
    pub fn read_region(&self, region: Region) -> Option<Vec<u8>> {
        if !self.contains_region(region) {
            return None;
        }
        let row_bytes = region.width as usize * 4;
        let mut out = Vec::with_capacity(row_bytes * region.height as usize);
        for row in 0..region.height {
            let start = self.offset(region.x as u32, region.y as u32 + row);
            out.extend_from_slice(&self.pixels[start..start + row_bytes]);
        }
        Some(out)
    }

    /// Write tightly packed RGBA rows into a region.
    ///
    /// Returns false (and writes nothing) if the region is not fully inside
    /// the buffer or `data` has the wrong length.
    pub fn write_region(&mut self, region: Region, data: &[u8]) -> bool {
        let row_bytes = region.width as usize * 4;
        if !self.contains_region(region) || data.len() != row_bytes * region.height as usize {
            return false;
        }
        for (row, src) in data.chunks_exact(row_bytes.max(1)).enumerate() {
            let start = self.offset(region.x as u32, region.y as u32 + row as u32);
            self.pixels[start..start + row_bytes].copy_from_slice(src);
        }
        true
    }

    /// Dimensions of this buffer after uniform scaling (floored)
    pub fn scaled_size(&self, scale: f64) -> (u32, u32) {
        scaled_dimension_pair(self.width, self.height, scale)
    }

    /// Blit this buffer into `dst` with a uniform scale and a translation.
    ///
    /// The mapping is rebuilt from `scale` and the offset on every call; no
    /// transform is carried over between blits. Sampling is nearest-neighbor,
    /// destination pixels that fall outside the scaled source are untouched.
    pub fn blit_scaled(&self, dst: &mut RasterBuffer, scale: f64, offset_x: i64, offset_y: i64) {
        if self.width == 0 || self.height == 0 || !(scale.is_finite() && scale > 0.0) {
            return;
        }

        let (scaled_w, scaled_h) = self.scaled_size(scale);
        let target = Region::new(offset_x, offset_y, scaled_w, scaled_h).clip(dst.width, dst.height);
        if target.is_empty() {
            return;
        }

        for py in target.y..target.bottom() {
            let sy = (((py - offset_y) as f64 / scale) as u32).min(self.height - 1);
            for px in target.x..target.right() {
                let sx = (((px - offset_x) as f64 / scale) as u32).min(self.width - 1);
                let src = self.offset(sx, sy);
                let dst_idx = dst.offset(px as u32, py as u32);
                dst.pixels[dst_idx..dst_idx + 4].copy_from_slice(&self.pixels[src..src + 4]);
            }
        }
    }
}

/// Floor `value * scale` to a pixel count
#[inline]
pub fn scaled_dimension(value: u32, scale: f64) -> u32 {
    (value as f64 * scale).floor().max(0.0) as u32
}

fn scaled_dimension_pair(width: u32, height: u32, scale: f64) -> (u32, u32) {
    (scaled_dimension(width, scale), scaled_dimension(height, scale))
}
