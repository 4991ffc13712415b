//! Inkboard command-line entry point.

use clap::{Parser, Subcommand};
use inkboard_app::{AppError, AppResult, Script, Session, ShortcutRegistry};
use inkboard_core::{EngineConfig, ExportScope};
use inkboard_render::{DisplayList, render_export};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "inkboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Headless Inkboard scene runner", long_about = None)]
struct Cli {
    /// Engine config (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay an event script against a scene and save the result
    Replay {
        /// Event script (JSON)
        script: PathBuf,

        /// Scene to start from; an empty board when omitted
        #[arg(short, long)]
        scene: Option<PathBuf>,

        /// Where to write the resulting scene
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Surface width in logical pixels
        #[arg(long, default_value = "800")]
        width: f64,

        /// Surface height in logical pixels
        #[arg(long, default_value = "600")]
        height: f64,
    },

    /// Validate a scene file and summarise it
    Check {
        scene: PathBuf,

        /// Padding around the exported content
        #[arg(long, default_value = "20")]
        padding: f64,
    },

    /// List keyboard shortcuts understood by `key` steps
    Shortcuts,
}

fn load_config(path: Option<&Path>) -> AppResult<EngineConfig> {
    match path {
        Some(path) => Session::read_config(path),
        None => Ok(EngineConfig::default()),
    }
}

fn replay(
    config: EngineConfig,
    script: &Path,
    scene: Option<&Path>,
    output: Option<&Path>,
    size: (f64, f64),
) -> AppResult<()> {
    let text = std::fs::read_to_string(script).map_err(|source| AppError::Read {
        path: script.to_path_buf(),
        source,
    })?;
    let script = Script::from_json(&text)?;

    let mut session = Session::new(config);
    session.canvas_mut().set_screen_size(size.0, size.1);
    if let Some(scene) = scene {
        session.open(scene)?;
    }
    let report = session.run(&script)?;
    println!(
        "{} steps, {} frames, {} segments, {} elements, {} draw commands in last frame",
        report.steps,
        report.frames,
        report.segments,
        session.canvas().elements().len(),
        session.frame().len()
    );
    let pending = session.images().pending().count();
    if pending > 0 {
        log::warn!("{pending} image sources were never resolved");
    }

    if let Some(output) = output {
        session.save(output)?;
    }
    Ok(())
}

fn check(config: EngineConfig, scene: &Path, padding: f64) -> AppResult<()> {
    let mut session = Session::new(config);
    session.open(scene)?;
    let canvas = session.canvas();
    let elements = canvas.export_elements(ExportScope::All);
    let mut list = DisplayList::new();
    match render_export(&mut list, &elements, session.images(), padding) {
        Some(bounds) => println!(
            "{} elements, export {:.0}x{:.0} at ({:.1}, {:.1}), {} draw commands",
            elements.len(),
            bounds.width(),
            bounds.height(),
            bounds.x0,
            bounds.y0,
            list.len()
        ),
        None => println!("empty scene"),
    }
    Ok(())
}

fn run(cli: Cli) -> AppResult<()> {
    let config = load_config(cli.config.as_deref())?;
    match cli.command {
        Commands::Replay {
            script,
            scene,
            output,
            width,
            height,
        } => replay(config, &script, scene.as_deref(), output.as_deref(), (width, height)),
        Commands::Check { scene, padding } => check(config, &scene, padding),
        Commands::Shortcuts => {
            ShortcutRegistry::print_all();
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Starting Inkboard");

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
