//! Application model - the complete state of a collation session
//!
//! This module contains all the state types following the Elm Architecture pattern.

pub mod source;

pub use source::SourceState;

use crate::atlas::GlyphAtlasIndex;
use crate::compose::{compose_view, DisplayMode, RenderedLayers, ScaleFactor};
use crate::config::CollateConfig;
use crate::decode::SourceKind;
use crate::interaction::InteractionController;
use crate::overlay::render_overlay;
use crate::placement::PlacementStore;
use crate::raster::RasterBuffer;
use crate::theme::OverlayTheme;

/// The complete application model
#[derive(Debug)]
pub struct AppModel {
    /// Scanned page raster
    pub page: SourceState,
    /// Font raster glyphs are cut from
    pub font: SourceState,
    /// Glyph metrics
    pub atlas: GlyphAtlasIndex,
    /// Ordered placements (document order = stamping order)
    pub placements: PlacementStore,
    /// Which buffer the display shows
    pub display_mode: DisplayMode,
    /// Display multiplier
    pub scale: ScaleFactor,
    /// Stamp with overlap-warning instead of ink-union
    pub overlap_warning: bool,
    /// Selection and drag state
    pub interaction: InteractionController,
    /// Overlay colors
    pub theme: OverlayTheme,
    /// Typed and difference layers (None until both rasters are loaded)
    pub layers: Option<RenderedLayers>,
    /// Scaled raster ready to present
    pub display: Option<RasterBuffer>,
    /// Selection feedback, same size as the display
    pub overlay: RasterBuffer,
    /// Number of full layer rebuilds so far
    pub generation: u64,
}

impl AppModel {
    /// Create a model with both rasters pending
    pub fn new(atlas: GlyphAtlasIndex, placements: PlacementStore, config: &CollateConfig) -> Self {
        Self {
            page: SourceState::Pending,
            font: SourceState::Pending,
            atlas,
            placements,
            display_mode: config.display_mode,
            scale: config.scale_factor(),
            overlap_warning: config.overlap_warning,
            interaction: InteractionController::new(),
            theme: config.overlay_theme(),
            layers: None,
            display: None,
            overlay: RasterBuffer::new(0, 0),
            generation: 0,
        }
    }

    pub fn source(&self, kind: SourceKind) -> &SourceState {
        match kind {
            SourceKind::Page => &self.page,
            SourceKind::Font => &self.font,
        }
    }

    pub fn source_mut(&mut self, kind: SourceKind) -> &mut SourceState {
        match kind {
            SourceKind::Page => &mut self.page,
            SourceKind::Font => &mut self.font,
        }
    }

    /// Display raster size, `(0, 0)` while nothing can be shown
    pub fn display_size(&self) -> (u32, u32) {
        self.display
            .as_ref()
            .map(RasterBuffer::dimensions)
            .unwrap_or((0, 0))
    }

    /// Rebuild typed and difference layers from scratch, then the display
    /// and overlay. Clears everything if either raster is missing.
    pub fn rerender(&mut self) {
        let layers = match (self.page.raster(), self.font.raster()) {
            (Some(page), Some(font)) => Some(RenderedLayers::render(
                page,
                font,
                &self.atlas,
                &self.placements,
                self.overlap_warning,
            )),
            _ => None,
        };
        let Some(layers) = layers else {
            self.layers = None;
            self.display = None;
            self.redraw_overlay();
            return;
        };

        self.layers = Some(layers);
        self.generation += 1;
        tracing::debug!(
            "Render #{} (placements v{})",
            self.generation,
            self.placements.version()
        );
        self.recompose();
    }

    /// Recompose the display from existing layers (mode or scale change)
    pub fn recompose(&mut self) {
        self.display = match (self.page.raster(), &self.layers) {
            (Some(page), Some(layers)) => {
                Some(compose_view(self.display_mode, self.scale, page, layers))
            }
            _ => None,
        };
        self.redraw_overlay();
    }

    /// Clear and redraw the selection overlay at the current display size
    pub fn redraw_overlay(&mut self) {
        let (width, height) = self.display_size();
        let overlay_box = self.interaction.overlay_box(&self.placements);
        self.overlay = render_overlay(width, height, overlay_box, self.scale, &self.theme);
    }

    /// One-line summary for a window title or status bar
    pub fn status_line(&self) -> String {
        for kind in [SourceKind::Page, SourceKind::Font] {
            match self.source(kind) {
                SourceState::Unavailable(reason) => {
                    return format!("{} image unavailable: {}", kind.name(), reason)
                }
                SourceState::Pending => return format!("loading {} image…", kind.name()),
                SourceState::Loaded(_) => {}
            }
        }

        let mut status = format!(
            "{} @ {}{}",
            self.display_mode,
            self.scale.label(),
            if self.overlap_warning {
                " [overlap]"
            } else {
                ""
            }
        );
        if let Some(layers) = &self.layers {
            if layers.stats.unmapped > 0 {
                status.push_str(&format!(" ({} unmapped)", layers.stats.unmapped));
            }
        }
        status
    }
}
