use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use grid_snake::config::{
    ConfigError, GameConfig, GridSize, DEFAULT_CELL_SIZE, DEFAULT_INITIAL_BODY_LENGTH,
    DEFAULT_SCREEN_HEIGHT, DEFAULT_SCREEN_WIDTH, DEFAULT_TICK_INTERVAL_MS,
};
use grid_snake::food::FoodPlacement;
use grid_snake::input::poll_input;
use grid_snake::logging;
use grid_snake::renderer;
use grid_snake::score::{JsonScoreStore, MemoryScoreStore, ScoreStore};
use grid_snake::session::{IntervalTicker, Session};
use grid_snake::terminal_runtime::TerminalSession;

/// Input poll timeout; also bounds the frame rate.
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Playfield width in screen units.
    #[arg(long, default_value_t = DEFAULT_SCREEN_WIDTH)]
    screen_width: u32,

    /// Playfield height in screen units.
    #[arg(long, default_value_t = DEFAULT_SCREEN_HEIGHT)]
    screen_height: u32,

    /// Edge length of one grid cell in screen units.
    #[arg(long, default_value_t = DEFAULT_CELL_SIZE)]
    cell_size: u32,

    /// Body length at the start of every game.
    #[arg(long, default_value_t = DEFAULT_INITIAL_BODY_LENGTH)]
    initial_length: usize,

    /// Milliseconds between simulation ticks.
    #[arg(long, default_value_t = DEFAULT_TICK_INTERVAL_MS)]
    tick_ms: u64,

    /// Seed the food sequence for reproducible games.
    #[arg(long)]
    seed: Option<u64>,

    /// Never place food on a cell the snake covers.
    #[arg(long)]
    food_avoids_snake: bool,

    /// Score file location.
    #[arg(long)]
    scores: Option<PathBuf>,

    /// Log file location (filter with RUST_LOG).
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn into_config(self) -> Result<GameConfig, ConfigError> {
        let defaults = GameConfig::default();

        GameConfig {
            grid: GridSize::from_screen(self.screen_width, self.screen_height, self.cell_size)?,
            initial_body_length: self.initial_length,
            tick_interval: Duration::from_millis(self.tick_ms),
            food_placement: if self.food_avoids_snake {
                FoodPlacement::FreeCells
            } else {
                FoodPlacement::Anywhere
            },
            seed: self.seed,
            scores_path: self.scores.unwrap_or(defaults.scores_path),
            log_path: self.log_file.unwrap_or(defaults.log_path),
        }
        .validate()
    }
}

fn main() -> ExitCode {
    let config = match Cli::parse().into_config() {
        Ok(config) => config,
        Err(error) => {
            eprintln!("error: {error}");
            return ExitCode::FAILURE;
        }
    };

    match play(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            log::error!("terminal error: {error}");
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn play(config: GameConfig) -> io::Result<()> {
    if let Err(error) = logging::init(&config.log_path) {
        eprintln!("warning: logging disabled: {error}");
    }
    log::info!(
        "starting on a {}x{} grid, tick {:?}",
        config.grid.width,
        config.grid.height,
        config.tick_interval
    );

    // Declared before the terminal so it is released after the terminal is restored.
    let mut store = open_store(&config);
    let ticker = IntervalTicker::new(config.tick_interval);
    let mut session = Session::new(config, ticker, &*store);

    let mut terminal = TerminalSession::enter()?;
    run(&mut terminal, &mut session, &mut *store)
}

fn open_store(config: &GameConfig) -> Box<dyn ScoreStore> {
    match JsonScoreStore::open(&config.scores_path) {
        Ok(store) => Box::new(store),
        Err(error) => {
            log::warn!(
                "score file {} unusable, scores kept in memory: {error}",
                config.scores_path.display()
            );
            Box::new(MemoryScoreStore::default())
        }
    }
}

fn run(
    terminal: &mut TerminalSession,
    session: &mut Session<IntervalTicker>,
    store: &mut dyn ScoreStore,
) -> io::Result<()> {
    loop {
        terminal
            .terminal_mut()
            .draw(|frame| renderer::render(frame, session))?;

        if let Some(input) = poll_input(FRAME_INTERVAL)? {
            if !session.apply_input(input, store) {
                break;
            }
        }

        session.update(store);
    }

    log::info!("quit requested");
    Ok(())
}
