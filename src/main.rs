//! # Tilewalk Main Entry Point
//!
//! Parses the command line, loads the world and runs the exploration window.

use clap::Parser;
use log::{error, info};
use macroquad::window::Conf;
use std::path::PathBuf;
use tilewalk::config::{EngineConfig, DEFAULT_TYPING_SPEED_MS};
use tilewalk::{EngineResult, InputHandler, RenderMode, SceneManager, World};

/// Command line arguments for tilewalk.
#[derive(Parser, Debug)]
#[command(name = "tilewalk")]
#[command(about = "Walk around tile maps, read signs and step into buildings")]
#[command(version)]
struct Args {
    /// World definition file; the built-in world is used when omitted
    #[arg(short, long)]
    world: Option<PathBuf>,

    /// Show the raw debug view of the whole frame next to the scene
    #[arg(long)]
    debug: bool,

    /// How the main scene is drawn
    #[arg(long, value_enum, default_value = "asset-based")]
    mode: RenderMode,

    /// Visible cells as COLSxROWS
    #[arg(long, default_value = "10x10", value_parser = parse_window_cells)]
    window_cells: (i32, i32),

    /// Milliseconds per revealed prompt character; 0 shows pages at once
    #[arg(long, default_value_t = DEFAULT_TYPING_SPEED_MS)]
    typing_speed: u64,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn parse_window_cells(value: &str) -> Result<(i32, i32), String> {
    let (cols, rows) = value
        .split_once('x')
        .ok_or_else(|| format!("expected COLSxROWS, got {:?}", value))?;
    let cols = cols.parse::<i32>().map_err(|e| e.to_string())?;
    let rows = rows.parse::<i32>().map_err(|e| e.to_string())?;
    if cols < 1 || rows < 1 {
        return Err("window needs at least one cell per axis".to_string());
    }
    Ok((cols, rows))
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Tilewalk".to_string(),
        window_width: 720,
        window_height: 640,
        high_dpi: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() -> EngineResult<()> {
    let args = Args::parse();

    initialize_logging(&args.log_level);

    info!("Starting tilewalk v{}", tilewalk::VERSION);

    let world = match &args.world {
        Some(path) => World::load(path),
        None => World::builtin(),
    }
    .map_err(|e| {
        error!("could not load world: {}", e);
        e
    })?;

    let config = EngineConfig {
        window_cells: args.window_cells,
        render_mode: args.mode,
        debug_view: args.debug,
        typing_speed_ms: (args.typing_speed > 0).then_some(args.typing_speed),
        ..EngineConfig::default()
    };

    let mut scenes = SceneManager::new(config, world, InputHandler::new()).await?;
    scenes.run().await?;

    info!("Exploration ended at {}", scenes.engine().player().position);
    Ok(())
}

/// Initializes env_logger, letting `RUST_LOG` override `--log-level`.
fn initialize_logging(log_level: &str) {
    let env = env_logger::Env::default().default_filter_or(log_level);
    if let Err(e) = env_logger::Builder::from_env(env).try_init() {
        eprintln!("logging disabled: {}", e);
    }
}
