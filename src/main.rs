#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use anyhow::{Context, Result};
use clap::Parser;
use winit::event_loop::EventLoop;

use collate::atlas::GlyphAtlasIndex;
use collate::cli::CliArgs;
use collate::placement::PlacementStore;

mod runtime;

use runtime::App;

fn main() -> Result<()> {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    collate::tracing::init();

    let args = CliArgs::parse();
    let settings = args.load_settings();
    let startup = args.into_config(settings).map_err(anyhow::Error::msg)?;

    let atlas = GlyphAtlasIndex::load(&startup.metrics)
        .with_context(|| format!("loading glyph metrics {}", startup.metrics.display()))?;
    let placements = PlacementStore::load(&startup.placements)
        .with_context(|| format!("loading placements {}", startup.placements.display()))?;

    tracing::info!(
        "Collating {} with {} placements",
        startup.page.display(),
        placements.len()
    );

    let event_loop = EventLoop::new()?;
    let mut app = App::new(startup, atlas, placements);

    event_loop.run_app(&mut app)?;

    Ok(())
}
