//! Image decoding boundary
//!
//! Decoding is the only operation that may take noticeable time. The viewer
//! runs it on a worker thread and delivers the result once as a
//! `SourceMsg::Decoded` message; everything else in the crate is synchronous.

use std::path::Path;

use crate::error::{CollateError, Result};
use crate::raster::RasterBuffer;
use crate::util::filename_for_display;

/// Which input image a decode belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// The scanned facsimile page
    Page,
    /// The font raster glyphs are cut from
    Font,
}

impl SourceKind {
    pub fn name(&self) -> &'static str {
        match self {
            SourceKind::Page => "page",
            SourceKind::Font => "font",
        }
    }
}

/// Decode an image file into an RGBA raster
pub fn decode_image(path: &Path) -> Result<RasterBuffer> {
    let img = image::open(path).map_err(|e| CollateError::Decode {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    tracing::info!(
        "Decoded {} ({}x{})",
        filename_for_display(path),
        width,
        height
    );
    RasterBuffer::from_rgba(width, height, rgba.into_raw())
}

/// Decode an in-memory encoded image (format sniffed from the bytes)
pub fn decode_bytes(bytes: &[u8]) -> Result<RasterBuffer> {
    let img = image::load_from_memory(bytes).map_err(|e| CollateError::Decode {
        path: "<memory>".into(),
        message: e.to_string(),
    })?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    RasterBuffer::from_rgba(width, height, rgba.into_raw())
}

/// Encode a raster as PNG
pub fn save_png(raster: &RasterBuffer, path: &Path) -> Result<()> {
    let img = image::RgbaImage::from_raw(raster.width(), raster.height(), raster.pixels().to_vec())
        .ok_or_else(|| CollateError::InvalidBuffer {
            width: raster.width(),
            height: raster.height(),
            expected: raster.width() as usize * raster.height() as usize * 4,
            actual: raster.pixels().len(),
        })?;
    img.save(path).map_err(|e| CollateError::Encode {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
