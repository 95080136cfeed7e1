//! Screenshot generator for Collate
//!
//! Renders headless screenshots from YAML scenario definitions. A scenario
//! names the four inputs, the initial view settings and an optional list of
//! scripted events (pointer gestures and view changes) replayed through the
//! same update loop the viewer uses.
//!
//! Usage:
//!   cargo run --bin screenshot -- --scenario samples/scenarios/diff.yaml
//!   cargo run --bin screenshot -- --all
//!   cargo run --bin screenshot -- --all --out-dir screenshots/output

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;

use collate::atlas::GlyphAtlasIndex;
use collate::compose::DisplayMode;
use collate::config::CollateConfig;
use collate::decode::{decode_image, save_png, SourceKind};
use collate::messages::{Msg, PointerMsg, SourceMsg, ViewMsg};
use collate::model::AppModel;
use collate::overlay::present;
use collate::placement::PlacementStore;
use collate::raster::RasterBuffer;
use collate::update::update;

// ---------------------------------------------------------------------------
// CLI
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(name = "screenshot", about = "Render Collate scenarios to PNG")]
struct Args {
    /// Path to a single scenario YAML file
    #[arg(long)]
    scenario: Option<PathBuf>,
    /// Run all scenarios in the scenarios directory
    #[arg(long)]
    all: bool,
    /// Directory containing scenario YAML files
    #[arg(long, default_value = "samples/scenarios")]
    scenarios_dir: PathBuf,
    /// Directory for output PNG files
    #[arg(long, default_value = "screenshots/output")]
    out_dir: PathBuf,
    /// Override display mode (page, type, diff)
    #[arg(long)]
    mode: Option<String>,
    /// Override display scale
    #[arg(long)]
    scale: Option<f64>,
}

// ---------------------------------------------------------------------------
// Scenario YAML schema
// ---------------------------------------------------------------------------

#[derive(Deserialize, Debug)]
struct Scenario {
    name: String,
    page: PathBuf,
    font: PathBuf,
    metrics: PathBuf,
    placements: PathBuf,
    #[serde(default)]
    mode: DisplayMode,
    #[serde(default = "default_scale")]
    scale: f64,
    #[serde(default)]
    overlap_warning: bool,
    #[serde(default)]
    events: Vec<ScenarioEvent>,
}

/// Scripted input, in display pixels for pointer events
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "snake_case")]
enum ScenarioEvent {
    Down { x: f64, y: f64 },
    Move { x: f64, y: f64 },
    Up { x: f64, y: f64 },
    Cancel,
    Mode(DisplayMode),
    Scale(f64),
    ToggleOverlap,
}

impl ScenarioEvent {
    fn to_msg(&self) -> Msg {
        match *self {
            ScenarioEvent::Down { x, y } => Msg::Pointer(PointerMsg::Down { x, y }),
            ScenarioEvent::Move { x, y } => Msg::Pointer(PointerMsg::Move {
                x,
                y,
                button_held: true,
            }),
            ScenarioEvent::Up { x, y } => Msg::Pointer(PointerMsg::Up { x, y }),
            ScenarioEvent::Cancel => Msg::Pointer(PointerMsg::Cancel),
            ScenarioEvent::Mode(mode) => Msg::View(ViewMsg::SetDisplayMode(mode)),
            ScenarioEvent::Scale(scale) => Msg::View(ViewMsg::SetScale(scale)),
            ScenarioEvent::ToggleOverlap => Msg::View(ViewMsg::ToggleOverlapWarning),
        }
    }
}

fn default_scale() -> f64 {
    0.5
}

// ---------------------------------------------------------------------------
// Model setup
// ---------------------------------------------------------------------------

/// Resolve a scenario path relative to the scenario file
fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

fn create_model_from_scenario(scenario: &Scenario, base: &Path) -> Result<AppModel> {
    let metrics = resolve(base, &scenario.metrics);
    let atlas = GlyphAtlasIndex::load(&metrics)
        .with_context(|| format!("loading metrics {}", metrics.display()))?;
    let placements_path = resolve(base, &scenario.placements);
    let placements = PlacementStore::load(&placements_path)
        .with_context(|| format!("loading placements {}", placements_path.display()))?;

    let config = CollateConfig {
        scale: scenario.scale,
        display_mode: scenario.mode,
        overlap_warning: scenario.overlap_warning,
        ..CollateConfig::default()
    };
    let mut model = AppModel::new(atlas, placements, &config);

    // Decode synchronously; a failure still renders (as an empty frame)
    for (source, path) in [
        (SourceKind::Page, &scenario.page),
        (SourceKind::Font, &scenario.font),
    ] {
        let path = resolve(base, path);
        let result = decode_image(&path).map_err(|e| e.to_string());
        update(&mut model, Msg::Source(SourceMsg::Decoded { source, result }));
    }

    for event in &scenario.events {
        update(&mut model, event.to_msg());
    }

    Ok(model)
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Present the display and overlay exactly as the window would
fn render_to_raster(model: &AppModel) -> Result<RasterBuffer> {
    let (width, height) = model.display_size();
    let (width, height) = (width.max(1), height.max(1));

    let background = model.theme.background.to_argb_u32();
    let mut buffer: Vec<u32> = vec![background; (width * height) as usize];
    present(
        &mut buffer,
        width as usize,
        height as usize,
        model.display.as_ref(),
        Some(&model.overlay),
        background,
    );

    // ARGB (0xAARRGGBB) to RGBA bytes
    let mut rgba = Vec::with_capacity(buffer.len() * 4);
    for &pixel in &buffer {
        rgba.push(((pixel >> 16) & 0xFF) as u8);
        rgba.push(((pixel >> 8) & 0xFF) as u8);
        rgba.push((pixel & 0xFF) as u8);
        rgba.push(((pixel >> 24) & 0xFF) as u8);
    }

    RasterBuffer::from_rgba(width, height, rgba).context("failed to create output raster")
}

// ---------------------------------------------------------------------------
// Scenario loading
// ---------------------------------------------------------------------------

fn load_scenario(path: &Path) -> Result<Scenario> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading scenario {}", path.display()))?;
    let scenario: Scenario = serde_yaml::from_str(&content)
        .with_context(|| format!("parsing scenario {}", path.display()))?;
    Ok(scenario)
}

fn collect_scenarios(args: &Args) -> Result<Vec<(PathBuf, Scenario)>> {
    let mut scenarios = Vec::new();

    if let Some(ref path) = args.scenario {
        let scenario = load_scenario(path)?;
        scenarios.push((path.clone(), scenario));
    } else if args.all {
        if !args.scenarios_dir.exists() {
            anyhow::bail!(
                "scenarios directory does not exist: {}",
                args.scenarios_dir.display()
            );
        }
        let mut entries: Vec<_> = std::fs::read_dir(&args.scenarios_dir)
            .with_context(|| format!("reading scenarios dir {}", args.scenarios_dir.display()))?
            .filter_map(|e| e.ok())
            .filter(|e| collate::util::is_yaml_file(&e.path()))
            .collect();
        entries.sort_by_key(|e| e.path());

        for entry in entries {
            let path = entry.path();
            match load_scenario(&path) {
                Ok(scenario) => scenarios.push((path, scenario)),
                Err(e) => eprintln!("Warning: skipping {}: {}", path.display(), e),
            }
        }

        if scenarios.is_empty() {
            anyhow::bail!(
                "no scenario files found in {}",
                args.scenarios_dir.display()
            );
        }
    } else {
        anyhow::bail!("specify --scenario <file> or --all");
    }

    Ok(scenarios)
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let args = Args::parse();
    let scenarios = collect_scenarios(&args)?;

    let mode_override = args
        .mode
        .as_deref()
        .map(str::parse::<DisplayMode>)
        .transpose()?;

    eprintln!(
        "Rendering {} scenario(s) → {}",
        scenarios.len(),
        args.out_dir.display()
    );

    for (path, mut scenario) in scenarios {
        if let Some(mode) = mode_override {
            scenario.mode = mode;
        }
        if let Some(scale) = args.scale {
            scenario.scale = scale;
        }

        eprint!("  {} ...", scenario.name);

        let base = path.parent().unwrap_or(Path::new("."));
        let model = create_model_from_scenario(&scenario, base)?;
        let raster = render_to_raster(&model)?;

        let out_path = args
            .out_dir
            .join(format!("screenshot-{}.png", scenario.name));
        if let Some(parent) = out_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating directory {}", parent.display()))?;
        }
        save_png(&raster, &out_path)?;

        eprintln!(" {}, saved {}", model.status_line(), out_path.display());
    }

    eprintln!("Done!");
    Ok(())
}
