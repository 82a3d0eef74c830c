use std::io;
use std::panic;
use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use log::{LevelFilter, error, info, warn};
use wrap_snake::config::{PALETTE_CLASSIC, Settings, SettingsOverrides};
use wrap_snake::error::AppError;
use wrap_snake::game::{Controller, GameState, Renderer, TickFlow, run_tick};
use wrap_snake::input::TerminalController;
use wrap_snake::logging::{self, DEFAULT_LOG_FILE};
use wrap_snake::render::{TerminalRenderer, restore_terminal};

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Playfield width in pixels.
    #[arg(long)]
    width: Option<u16>,

    /// Playfield height in pixels.
    #[arg(long)]
    height: Option<u16>,

    /// Edge length of one grid cell in pixels.
    #[arg(long = "cell-size")]
    cell_size: Option<u16>,

    /// Simulation ticks per second.
    #[arg(long = "tps")]
    ticks_per_second: Option<u16>,

    /// Read settings from this file instead of the default location.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed the random source for a reproducible session.
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long = "log-file", default_value = DEFAULT_LOG_FILE)]
    log_file: PathBuf,

    /// One of off, error, warn, info, debug, trace.
    #[arg(long = "log-level", default_value = "info", value_parser = parse_level)]
    log_level: LevelFilter,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("wrap-snake: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    logging::init(&cli.log_file, cli.log_level)?;

    let settings = resolve_settings(&cli).inspect_err(|error| error!("{error}"))?;
    let bounds = settings.grid().inspect_err(|error| error!("{error}"))?;
    let tick_interval = settings
        .tick_interval()
        .inspect_err(|error| error!("{error}"))?;

    let mut state = match cli.seed {
        Some(seed) => GameState::new_with_seed(bounds, seed),
        None => GameState::new(bounds),
    };
    info!(
        "starting on a {}x{} grid at {} ticks/s",
        state.bounds().width,
        state.bounds().height,
        settings.ticks_per_second
    );

    install_panic_hook();

    let mut controller = TerminalController::new();
    let mut renderer = TerminalRenderer::enter(state.bounds(), PALETTE_CLASSIC)?;
    renderer.draw(&state.snake, &state.food)?;

    game_loop(&mut state, &mut controller, &mut renderer, tick_interval)?;
    Ok(())
}

fn resolve_settings(cli: &Cli) -> Result<Settings, AppError> {
    let base = match &cli.config {
        Some(path) => {
            if !path.exists() {
                warn!(
                    "settings file {} not found, using defaults",
                    path.display()
                );
            }
            Settings::load_from_path(path)?
        }
        None => Settings::load()?,
    };

    Ok(base.with_overrides(SettingsOverrides {
        screen_width: cli.width,
        screen_height: cli.height,
        cell_size: cli.cell_size,
        ticks_per_second: cli.ticks_per_second,
    }))
}

fn game_loop(
    state: &mut GameState,
    controller: &mut impl Controller,
    renderer: &mut impl Renderer,
    tick_interval: Duration,
) -> io::Result<()> {
    loop {
        let started = Instant::now();

        if run_tick(state, controller, renderer)? == TickFlow::Quit {
            return Ok(());
        }

        if let Some(remaining) = tick_interval.checked_sub(started.elapsed()) {
            thread::sleep(remaining);
        }
    }
}

fn parse_level(raw: &str) -> Result<LevelFilter, String> {
    raw.parse()
        .map_err(|_| format!("unknown log level `{raw}`"))
}

fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        default_hook(panic_info);
    }));
}
