//! Load state of the page and font rasters

use crate::raster::RasterBuffer;

/// Where a decoded input stands
#[derive(Debug, Clone, Default)]
pub enum SourceState {
    /// Decode requested or not yet started
    #[default]
    Pending,
    /// Decoded and ready for compositing
    Loaded(RasterBuffer),
    /// Decode failed; compositing waits until a new source arrives
    Unavailable(String),
}

impl SourceState {
    pub fn raster(&self) -> Option<&RasterBuffer> {
        match self {
            SourceState::Loaded(raster) => Some(raster),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, SourceState::Pending)
    }
}

impl From<Result<RasterBuffer, String>> for SourceState {
    fn from(result: Result<RasterBuffer, String>) -> Self {
        match result {
            Ok(raster) => SourceState::Loaded(raster),
            Err(reason) => SourceState::Unavailable(reason),
        }
    }
}
