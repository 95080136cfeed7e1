//! Selection overlay
//!
//! A transparent raster the size of the display that shows the selected
//! placement's box, or the box it would land in while dragging. It is drawn
//! independently of the composited buffers and rebuilt from scratch on every
//! interaction or scale change.

use crate::compose::ScaleFactor;
use crate::interaction::{OverlayBox, OverlayKind};
use crate::raster::{RasterBuffer, Region, TRANSPARENT};
use crate::theme::{Color, OverlayTheme};

/// Border thickness in display pixels
pub const BORDER_WIDTH: u32 = 2;

/// Blend a source pixel (with alpha) onto a destination pixel
///
/// Both colors are in ARGB format. The source alpha determines
/// the blend ratio.
#[inline]
pub fn blend_pixel(src: u32, dst: u32) -> u32 {
    let alpha = (src >> 24) & 0xFF;
    if alpha == 0 {
        return dst;
    }
    if alpha == 255 {
        return src | 0xFF000000;
    }

    let inv_alpha = 255 - alpha;

    let r = ((((src >> 16) & 0xFF) * alpha + ((dst >> 16) & 0xFF) * inv_alpha) / 255) & 0xFF;
    let g = ((((src >> 8) & 0xFF) * alpha + ((dst >> 8) & 0xFF) * inv_alpha) / 255) & 0xFF;
    let b = (((src & 0xFF) * alpha + (dst & 0xFF) * inv_alpha) / 255) & 0xFF;

    0xFF000000 | (r << 16) | (g << 8) | b
}

/// Pack an RGBA pixel as ARGB
#[inline]
pub fn rgba_to_argb(px: [u8; 4]) -> u32 {
    ((px[3] as u32) << 24) | ((px[0] as u32) << 16) | ((px[1] as u32) << 8) | px[2] as u32
}

/// Map a source-space box to display pixels
pub fn display_region(region: Region, scale: ScaleFactor) -> Region {
    let x0 = scale.to_display(region.x as f64).floor() as i64;
    let y0 = scale.to_display(region.y as f64).floor() as i64;
    let x1 = scale.to_display(region.right() as f64).ceil() as i64;
    let y1 = scale.to_display(region.bottom() as f64).ceil() as i64;
    Region::new(x0, y0, (x1 - x0).max(1) as u32, (y1 - y0).max(1) as u32)
}

fn fill(buffer: &mut RasterBuffer, region: Region, color: [u8; 4]) {
    let clipped = region.clip(buffer.width(), buffer.height());
    for y in clipped.y..clipped.bottom() {
        for x in clipped.x..clipped.right() {
            buffer.set_pixel(x as u32, y as u32, color);
        }
    }
}

/// Draw a border of `thickness` pixels just inside `bounds`
pub fn draw_border(buffer: &mut RasterBuffer, bounds: Region, color: Color, thickness: u32) {
    let c = color.to_rgba();
    let t = thickness.min(bounds.width).min(bounds.height).max(1);
    let bottom = bounds.bottom() - t as i64;
    let right = bounds.right() - t as i64;

    // Top, bottom, left, right
    fill(buffer, Region::new(bounds.x, bounds.y, bounds.width, t), c);
    fill(buffer, Region::new(bounds.x, bottom, bounds.width, t), c);
    fill(buffer, Region::new(bounds.x, bounds.y, t, bounds.height), c);
    fill(buffer, Region::new(right, bounds.y, t, bounds.height), c);
}

/// Render a fresh overlay of `width` x `height` display pixels
pub fn render_overlay(
    width: u32,
    height: u32,
    overlay_box: Option<OverlayBox>,
    scale: ScaleFactor,
    theme: &OverlayTheme,
) -> RasterBuffer {
    let mut overlay = RasterBuffer::filled(width, height, TRANSPARENT);
    if let Some(b) = overlay_box {
        let color = match b.kind {
            OverlayKind::Selection => theme.selection,
            OverlayKind::Drag => theme.drag,
        };
        draw_border(
            &mut overlay,
            display_region(b.region, scale),
            color,
            BORDER_WIDTH,
        );
    }
    overlay
}

/// Present `display` with `overlay` on top into an ARGB framebuffer of
/// `buffer_width` x `buffer_height`, filling the rest with `background`.
pub fn present(
    buffer: &mut [u32],
    buffer_width: usize,
    buffer_height: usize,
    display: Option<&RasterBuffer>,
    overlay: Option<&RasterBuffer>,
    background: u32,
) {
    buffer.fill(background);
    let Some(display) = display else {
        return;
    };

    let w = (display.width() as usize).min(buffer_width);
    let h = (display.height() as usize).min(buffer_height);
    for y in 0..h {
        for x in 0..w {
            let idx = y * buffer_width + x;
            if idx >= buffer.len() {
                return;
            }
            let Some(px) = display.pixel(x as u32, y as u32) else {
                continue;
            };
            let mut argb = blend_pixel(rgba_to_argb(px), background);
            if let Some(top) = overlay.and_then(|o| o.pixel(x as u32, y as u32)) {
                argb = blend_pixel(rgba_to_argb(top), argb);
            }
            buffer[idx] = argb;
        }
    }
}
