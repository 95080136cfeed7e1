//! Compositing engine
//!
//! Three per-pixel blend kernels plus the region plumbing that applies them
//! to paired areas of two raster buffers.
//!
//! Every kernel reads *ink density* as `1 - green / 255`. Alpha is never read
//! and is always written opaque. Results are scaled back to bytes with a
//! saturating cast; the kernels perform no clamping beyond what their own
//! formulas do.

use std::fmt;

use crate::raster::{RasterBuffer, Region};

/// Blend kernel selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendMode {
    /// Ink union ("maxink"): keep the darker of the two inks
    MaxInk,
    /// Difference highlight ("diff"): agreement renders white, mismatches colored
    Diff,
    /// Overlap warning ("overlapwarn"): ink union that also accumulates a
    /// collision signal in the red channel
    OverlapWarn,
}

impl BlendMode {
    pub fn name(&self) -> &'static str {
        match self {
            BlendMode::MaxInk => "maxink",
            BlendMode::Diff => "diff",
            BlendMode::OverlapWarn => "overlapwarn",
        }
    }
}

impl fmt::Display for BlendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-channel weights of the difference kernel.
///
/// `target` scales the page-only excess `tt - st`, `template` scales the
/// typed-only excess `ss - st`. With both at 1.0 the channel reduces to the
/// plain agreement term `1 - ss - tt + 2st`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelWeights {
    pub target: f32,
    pub template: f32,
}

/// Difference kernel weights for red, green and blue
pub const DIFF_WEIGHTS: [ChannelWeights; 3] = [
    ChannelWeights {
        target: 1.0,
        template: 1.0,
    },
    ChannelWeights {
        target: 1.0,
        template: 0.6,
    },
    ChannelWeights {
        target: 0.6,
        template: 1.0,
    },
];

/// Ink density of a channel value
#[inline]
pub fn ink(channel: u8) -> f32 {
    1.0 - channel as f32 / 255.0
}

/// Scale a unit value back to a byte. `as` saturates, which stands in for
/// the clamped byte storage of the output.
#[inline]
fn to_byte(value: f32) -> u8 {
    (value * 255.0).round() as u8
}

/// Ink union of two pixels: `1 - max(inkA, inkB)` in R, G and B.
#[inline]
pub fn max_ink(template: [u8; 4], target: [u8; 4]) -> [u8; 4] {
    let v = to_byte(1.0 - ink(template[1]).max(ink(target[1])));
    [v, v, v, 255]
}

/// Difference highlight of a typed-layer pixel (`template`) against a page
/// pixel (`target`).
///
/// The template's red channel carries the overlap signal written by
/// [`overlap_warn`]; where it departs from the green ink the output is pulled
/// toward the raw template color by that amount.
#[inline]
pub fn diff(template: [u8; 4], target: [u8; 4]) -> [u8; 4] {
    let ink_a = ink(template[1]);
    let ink_b = ink(target[1]);
    let red_a = ink(template[0]);
    let red_diff = ink_a - red_a;

    let ss = ink_a * ink_a;
    let tt = ink_b * ink_b;
    let st = ink_a * ink_b;

    let mut out = [0u8, 0, 0, 255];
    for (c, weights) in DIFF_WEIGHTS.iter().enumerate() {
        let agreement = 1.0 - weights.target * (tt - st) - weights.template * (ss - st);
        let raw = template[c] as f32 / 255.0;
        out[c] = to_byte(agreement + (raw - agreement) * red_diff);
    }
    out
}

/// Overlap warning stamp of a glyph pixel (`source`) onto the typed layer
/// (`target`).
///
/// `2 * inkTarget - targetRed` recovers the ink already accumulated on the
/// target, including any excess beyond 1 that earlier collisions stored in
/// the red channel.
#[inline]
pub fn overlap_warn(source: [u8; 4], target: [u8; 4]) -> [u8; 4] {
    let ink_source = ink(source[1]);
    let ink_target = ink(target[1]);
    let target_red = ink(target[0]);

    let adapted_sum = ink_source + 2.0 * ink_target - target_red;
    let d = adapted_sum.min(1.0);
    let d_red = 2.0 * d - adapted_sum.min(2.0);

    let ink_byte = to_byte(1.0 - d);
    [to_byte(1.0 - d_red), ink_byte, ink_byte, 255]
}

/// Collision signal carried by a pixel: green ink minus red ink.
///
/// Zero for plain ink, positive where overlapping stamps pushed the
/// accumulated ink past 1.
#[inline]
pub fn overlap_signal(pixel: [u8; 4]) -> f32 {
    ink(pixel[1]) - ink(pixel[0])
}

/// Apply the kernel for `mode` to one pixel pair
#[inline]
pub fn blend(mode: BlendMode, template: [u8; 4], target: [u8; 4]) -> [u8; 4] {
    match mode {
        BlendMode::MaxInk => max_ink(template, target),
        BlendMode::Diff => diff(template, target),
        BlendMode::OverlapWarn => overlap_warn(template, target),
    }
}

/// Blend two equally sized packed RGBA regions
fn blend_regions(mode: BlendMode, template: &[u8], target: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(target.len());
    for (a, b) in template.chunks_exact(4).zip(target.chunks_exact(4)) {
        let px = blend(mode, [a[0], a[1], a[2], a[3]], [b[0], b[1], b[2], b[3]]);
        out.extend_from_slice(&px);
    }
    out
}

/// Range of stamp offsets along one axis that stays inside every buffer.
///
/// Each entry is `(origin, extent)` of the stamp's placement in one buffer.
fn clip_axis(len: u32, placements: &[(i64, u32)]) -> Option<(i64, i64)> {
    let mut lo = 0i64;
    let mut hi = len as i64;
    for &(origin, extent) in placements {
        lo = lo.max(-origin);
        hi = hi.min(extent as i64 - origin);
    }
    (hi > lo).then_some((lo, hi))
}

/// The clipped stamp: offsets into the requested template region
#[derive(Debug, Clone, Copy)]
struct Span {
    x0: i64,
    y0: i64,
    width: u32,
    height: u32,
}

impl Span {
    fn region_at(&self, x: i64, y: i64) -> Region {
        Region::new(x + self.x0, y + self.y0, self.width, self.height)
    }
}

fn clip_span(size: (u32, u32), buffers: &[(i64, i64, u32, u32)]) -> Option<Span> {
    let xs: Vec<(i64, u32)> = buffers.iter().map(|&(x, _, w, _)| (x, w)).collect();
    let ys: Vec<(i64, u32)> = buffers.iter().map(|&(_, y, _, h)| (y, h)).collect();
    let (x0, x1) = clip_axis(size.0, &xs)?;
    let (y0, y1) = clip_axis(size.1, &ys)?;
    Some(Span {
        x0,
        y0,
        width: (x1 - x0) as u32,
        height: (y1 - y0) as u32,
    })
}

/// Composite `template_region` of `template` onto `target` at `(x, y)`,
/// writing the result back into `target`.
///
/// Pixels that would fall outside either buffer are skipped. Returns the
/// target region actually written, or `None` for a no-op (degenerate or
/// fully clipped stamp).
pub fn composite(
    mode: BlendMode,
    template: &RasterBuffer,
    template_region: Region,
    target: &mut RasterBuffer,
    x: i64,
    y: i64,
) -> Option<Region> {
    if template_region.is_empty() {
        return None;
    }
    let span = clip_span(
        (template_region.width, template_region.height),
        &[
            (template_region.x, template_region.y, template.width(), template.height()),
            (x, y, target.width(), target.height()),
        ],
    )?;

    let src = template.read_region(span.region_at(template_region.x, template_region.y))?;
    let dst_region = span.region_at(x, y);
    let dst = target.read_region(dst_region)?;
    let out = blend_regions(mode, &src, &dst);
    target.write_region(dst_region, &out).then_some(dst_region)
}

/// Composite `template_region` of `template` against `target` at
/// `target_origin`, writing into a separate `dest` buffer at `dest_origin`.
pub fn composite_into(
    mode: BlendMode,
    template: &RasterBuffer,
    template_region: Region,
    target: &RasterBuffer,
    target_origin: (i64, i64),
    dest: &mut RasterBuffer,
    dest_origin: (i64, i64),
) -> Option<Region> {
    if template_region.is_empty() {
        return None;
    }
    let span = clip_span(
        (template_region.width, template_region.height),
        &[
            (template_region.x, template_region.y, template.width(), template.height()),
            (target_origin.0, target_origin.1, target.width(), target.height()),
            (dest_origin.0, dest_origin.1, dest.width(), dest.height()),
        ],
    )?;

    let src = template.read_region(span.region_at(template_region.x, template_region.y))?;
    let dst = target.read_region(span.region_at(target_origin.0, target_origin.1))?;
    let out = blend_regions(mode, &src, &dst);
    let written = span.region_at(dest_origin.0, dest_origin.1);
    dest.write_region(written, &out).then_some(written)
}

/// Full-resolution difference layer of `typed` against `page`.
///
/// The result has the page's dimensions; where the typed layer does not
/// cover the page the output stays transparent.
pub fn difference(typed: &RasterBuffer, page: &RasterBuffer) -> RasterBuffer {
    let mut dest = RasterBuffer::new(page.width(), page.height());
    composite_into(
        BlendMode::Diff,
        typed,
        typed.bounds(),
        page,
        (0, 0),
        &mut dest,
        (0, 0),
    );
    dest
}
