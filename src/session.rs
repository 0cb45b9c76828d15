use std::time::{Duration, Instant};

use crate::config::GameConfig;
use crate::game::GridState;
use crate::input::GameInput;
use crate::score::ScoreStore;

/// Decides when the next simulation tick is due.
pub trait TickSource {
    /// Returns true when a tick is due, consuming it.
    fn due(&mut self) -> bool;

    /// Starts a fresh interval, dropping anything already elapsed.
    fn restart(&mut self);
}

/// Wall-clock tick source firing once per `interval`.
#[derive(Debug, Clone)]
pub struct IntervalTicker {
    interval: Duration,
    last_tick: Instant,
}

impl IntervalTicker {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_tick: Instant::now(),
        }
    }
}

impl TickSource for IntervalTicker {
    fn due(&mut self) -> bool {
        if self.last_tick.elapsed() < self.interval {
            return false;
        }

        self.last_tick = Instant::now();
        true
    }

    fn restart(&mut self) {
        self.last_tick = Instant::now();
    }
}

/// Tick source driven by explicit `queue` calls, for tests and replays.
#[derive(Debug, Clone, Default)]
pub struct ManualTicker {
    pending: u64,
}

impl ManualTicker {
    /// Makes `ticks` more ticks due.
    pub fn queue(&mut self, ticks: u64) {
        self.pending += ticks;
    }
}

impl TickSource for ManualTicker {
    fn due(&mut self) -> bool {
        if self.pending == 0 {
            return false;
        }

        self.pending -= 1;
        true
    }

    fn restart(&mut self) {}
}

/// Where the player is in the application flow.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Phase {
    StartScreen,
    /// High-score message shown once before the first tick of a run.
    Briefing,
    Playing,
    GameOver,
}

/// Result of a finished run, kept for the game-over screen.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct SessionOutcome {
    pub score: u32,
    pub previous_high_score: u32,
    /// Whether the store accepted the score.
    pub recorded: bool,
}

impl SessionOutcome {
    #[must_use]
    pub fn is_new_high_score(self) -> bool {
        self.score > self.previous_high_score
    }
}

/// Game loop driver owning the simulation for one run at a time.
///
/// The score store is borrowed per call; the shell owns its lifetime.
#[derive(Debug)]
pub struct Session<T> {
    config: GameConfig,
    ticker: T,
    phase: Phase,
    state: GridState,
    high_score: u32,
    outcome: Option<SessionOutcome>,
}

impl<T: TickSource> Session<T> {
    /// Creates the driver on the start screen.
    pub fn new(config: GameConfig, ticker: T, store: &dyn ScoreStore) -> Self {
        let state = GridState::from_config(&config);

        Self {
            config,
            ticker,
            phase: Phase::StartScreen,
            state,
            high_score: query_high_score(store),
            outcome: None,
        }
    }

    /// Starts a new run: fresh state, current high score, briefing message.
    pub fn begin(&mut self, store: &dyn ScoreStore) {
        self.high_score = query_high_score(store);
        self.state = GridState::from_config(&self.config);
        self.outcome = None;
        self.phase = Phase::Briefing;
        log::info!("session started, high score {}", self.high_score);
    }

    /// Applies one input. Returns false when the player asked to quit.
    pub fn apply_input(&mut self, input: GameInput, store: &dyn ScoreStore) -> bool {
        match (self.phase, input) {
            (_, GameInput::Quit) => return false,
            (Phase::StartScreen | Phase::GameOver, GameInput::Confirm) => self.begin(store),
            (Phase::Briefing, GameInput::Confirm) => {
                self.phase = Phase::Playing;
                self.ticker.restart();
            }
            (Phase::Playing, GameInput::Direction(direction)) => self.state.set_heading(direction),
            _ => {}
        }

        true
    }

    /// Runs one tick if one is due. Returns whether the simulation stepped.
    ///
    /// On the tick that ends the run the final score goes to `store`.
    pub fn update(&mut self, store: &mut dyn ScoreStore) -> bool {
        if self.phase != Phase::Playing || !self.ticker.due() {
            return false;
        }

        self.state.step();
        if !self.state.is_alive() {
            self.finish(store);
        }

        true
    }

    fn finish(&mut self, store: &mut dyn ScoreStore) {
        let score = self.state.score();
        let previous_high_score = self.high_score;

        let recorded = match store.record(score) {
            Ok(()) => true,
            Err(error) => {
                log::error!("failed to record score {score}: {error}");
                false
            }
        };

        if recorded {
            self.high_score = match store.high_score() {
                Ok(high_score) => high_score,
                Err(error) => {
                    log::warn!("failed to re-read high score: {error}");
                    previous_high_score.max(score)
                }
            };
        }

        log::info!(
            "game over after {} ticks: score {score}, high score {} ({:?})",
            self.state.tick_count(),
            self.high_score,
            self.state.death_reason(),
        );

        self.outcome = Some(SessionOutcome {
            score,
            previous_high_score,
            recorded,
        });
        self.phase = Phase::GameOver;
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn state(&self) -> &GridState {
        &self.state
    }

    /// Gives direct access to the running simulation, for scripted setups.
    pub fn state_mut(&mut self) -> &mut GridState {
        &mut self.state
    }

    /// Returns the high score as of the start of the current run, or as
    /// updated by the store once the run ended.
    #[must_use]
    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    #[must_use]
    pub fn outcome(&self) -> Option<SessionOutcome> {
        self.outcome
    }

    pub fn ticker_mut(&mut self) -> &mut T {
        &mut self.ticker
    }
}

fn query_high_score(store: &dyn ScoreStore) -> u32 {
    store.high_score().unwrap_or_else(|error| {
        log::warn!("failed to read high score, using 0: {error}");
        0
    })
}
