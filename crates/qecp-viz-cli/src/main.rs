// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! `qecp-viz`: load a visualizer data file into a headless scene and report on it.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use qecp_app_core::config::ConfigService;
use qecp_app_core::config_port::ConfigPort;
use qecp_app_core::prefs::ViewerPrefs;
use qecp_app_core::settings::RenderSettings;
use qecp_config_fs::FsConfigStore;
use qecp_model::VizData;
use qecp_scene_headless::HeadlessScene;
use qecp_viz::{pick, Engine, RebuildReport, SelectionRef};
use tracing::{debug, Level};

#[derive(Parser, Debug)]
#[command(author, version, about = "Inspect QEC playground visualizer data headlessly")]
struct Args {
    /// Log rebuild details to stderr.
    #[arg(short, long)]
    verbose: bool,
    /// Render settings JSON; defaults to the saved viewer prefs.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the scene for one case and print what it contains.
    Inspect {
        /// Visualizer data file.
        file: PathBuf,
        /// Case to show.
        #[arg(long, default_value_t = 0)]
        case: usize,
    },
    /// Report data problems without building a scene.
    Validate {
        /// Visualizer data file.
        file: PathBuf,
    },
    /// Report the element under a pixel.
    Pick {
        /// Visualizer data file.
        file: PathBuf,
        /// Pixel column.
        #[arg(long)]
        x: f32,
        /// Pixel row.
        #[arg(long)]
        y: f32,
        /// Case to show.
        #[arg(long, default_value_t = 0)]
        case: usize,
        /// Viewport width in pixels.
        #[arg(long, default_value_t = 1280)]
        width: u32,
        /// Viewport height in pixels.
        #[arg(long, default_value_t = 720)]
        height: u32,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_target(false)
        .without_time()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(io::stderr)
        .init();

    let mut out = io::stdout().lock();
    match &args.command {
        Command::Inspect { file, case } => {
            let data = load_data(file)?;
            let prefs = load_prefs(args.config.as_deref())?;
            inspect(&mut out, file, data, *case, &prefs)
        }
        Command::Validate { file } => validate(&mut out, &*load_data(file)?),
        Command::Pick {
            file,
            x,
            y,
            case,
            width,
            height,
        } => {
            let data = load_data(file)?;
            let prefs = load_prefs(args.config.as_deref())?;
            pick_at(&mut out, data, *case, &prefs, (*width, *height), (*x, *y))
        }
    }
}

fn load_data(path: &Path) -> Result<Arc<VizData>> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let data = VizData::from_json_slice(&bytes)
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(Arc::new(data))
}

fn load_prefs(config: Option<&Path>) -> Result<ViewerPrefs> {
    if let Some(path) = config {
        let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        let settings: RenderSettings = serde_json::from_slice(&bytes)
            .with_context(|| format!("parsing render settings {}", path.display()))?;
        return Ok(ViewerPrefs {
            settings,
            ..ViewerPrefs::default()
        });
    }
    match FsConfigStore::new() {
        Ok(store) => Ok(ConfigService::new(store).load_prefs().unwrap_or_default()),
        Err(err) => {
            debug!(%err, "config dir unavailable; using default prefs");
            Ok(ViewerPrefs::default())
        }
    }
}

fn engine_for(
    data: Arc<VizData>,
    case: usize,
    prefs: &ViewerPrefs,
) -> Result<(Engine<HeadlessScene>, RebuildReport)> {
    let mut engine =
        Engine::with_prefs(HeadlessScene::new(), prefs).context("bootstrapping the scene")?;
    let report = engine
        .load(case, data)
        .with_context(|| format!("building case {case}"))?;
    Ok((engine, report))
}

fn inspect(
    out: &mut impl Write,
    file: &Path,
    data: Arc<VizData>,
    case: usize,
    prefs: &ViewerPrefs,
) -> Result<()> {
    let name = data.case(case).map(|c| c.name.clone());
    let cases = data.cases.len();
    let planar = data.is_planar();
    let (engine, report) = engine_for(data, case, prefs)?;

    writeln!(out, "file            {}", file.display())?;
    match name {
        Some(name) => writeln!(out, "case            {case} of {cases} ({name})")?,
        None => writeln!(out, "case            none")?,
    }
    writeln!(out, "planar          {planar}")?;
    writeln!(out, "{}", engine.stats())?;
    if report.hulls_skipped > 0 {
        writeln!(out, "skipped hulls   {}", report.hulls_skipped)?;
    }
    for issue in &report.issues {
        writeln!(out, "warning: {issue}")?;
    }
    Ok(())
}

fn validate(out: &mut impl Write, data: &VizData) -> Result<()> {
    let issues = data.validate();
    for issue in &issues {
        writeln!(out, "{issue}")?;
    }
    if !issues.is_empty() {
        bail!("{} problem(s) found", issues.len());
    }
    writeln!(out, "ok")?;
    Ok(())
}

fn pick_at(
    out: &mut impl Write,
    data: Arc<VizData>,
    case: usize,
    prefs: &ViewerPrefs,
    (width, height): (u32, u32),
    (x, y): (f32, f32),
) -> Result<()> {
    let (mut engine, _) = engine_for(data, case, prefs)?;
    engine.resize(width, height, 1.0);
    match pick(engine.port(), engine.camera(), (width, height), x, y) {
        Some(SelectionRef::Vertex(index)) => writeln!(out, "vertex {index}")?,
        Some(SelectionRef::Edge(index)) => writeln!(out, "edge {index}")?,
        None => writeln!(out, "nothing")?,
    }
    Ok(())
}
