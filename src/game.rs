use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{GameConfig, GridSize};
use crate::food::{Food, FoodPlacement};
use crate::input::Direction;
use crate::snake::{Position, Snake};

/// Simulation status; `GameOver` is absorbing.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Running,
    GameOver,
}

/// Collision that ended a run.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeathReason {
    WallCollision,
    SelfCollision,
}

/// Complete mutable simulation state for one session.
#[derive(Debug, Clone)]
pub struct GridState {
    pub snake: Snake,
    pub food: Food,
    score: u32,
    status: GameStatus,
    death_reason: Option<DeathReason>,
    tick_count: u64,
    bounds: GridSize,
    food_placement: FoodPlacement,
    rng: StdRng,
}

impl GridState {
    /// Creates a running state with an entropy-seeded food sequence.
    #[must_use]
    pub fn new(bounds: GridSize, initial_body_length: usize) -> Self {
        Self::with_rng(
            bounds,
            initial_body_length,
            FoodPlacement::Anywhere,
            StdRng::from_entropy(),
        )
    }

    /// Creates a deterministic state for tests and reproducible simulations.
    #[must_use]
    pub fn new_with_seed(bounds: GridSize, initial_body_length: usize, seed: u64) -> Self {
        Self::with_rng(
            bounds,
            initial_body_length,
            FoodPlacement::Anywhere,
            StdRng::seed_from_u64(seed),
        )
    }

    /// Creates the state for a new session from validated configuration.
    #[must_use]
    pub fn from_config(config: &GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self::with_rng(
            config.grid,
            config.initial_body_length,
            config.food_placement,
            rng,
        )
    }

    fn with_rng(
        bounds: GridSize,
        initial_body_length: usize,
        food_placement: FoodPlacement,
        mut rng: StdRng,
    ) -> Self {
        let snake = Snake::new(bounds, initial_body_length);
        let food = Food::spawn(&mut rng, bounds, &snake, food_placement);

        Self {
            snake,
            food,
            score: 0,
            status: GameStatus::Running,
            death_reason: None,
            tick_count: 0,
            bounds,
            food_placement,
            rng,
        }
    }

    /// Requests a new heading; a reversal of the current heading is dropped.
    pub fn set_heading(&mut self, heading: Direction) {
        if self.is_alive() {
            self.snake.set_heading(heading);
        }
    }

    /// Advances simulation by one tick. Does nothing once the game is over.
    pub fn step(&mut self) {
        if !self.is_alive() {
            return;
        }

        self.tick_count += 1;
        self.snake.move_forward();

        let head = self.snake.head();
        if head == self.food.position {
            self.score += 1;
            self.snake.grow_next();
            self.place_food();
            log::debug!("food eaten at ({}, {}), score {}", head.x, head.y, self.score);
        }

        if self.snake.head_overlaps_body() {
            self.end(DeathReason::SelfCollision);
        } else if !head.is_within_bounds(self.bounds) {
            self.end(DeathReason::WallCollision);
        }
    }

    /// Moves the food to a fresh random cell.
    pub fn place_food(&mut self) {
        self.food = Food::spawn(&mut self.rng, self.bounds, &self.snake, self.food_placement);
    }

    fn end(&mut self, reason: DeathReason) {
        self.status = GameStatus::GameOver;
        self.death_reason = Some(reason);
    }

    /// Returns occupied cells from head to tail.
    #[must_use]
    pub fn cells(&self) -> &[Position] {
        self.snake.segments()
    }

    #[must_use]
    pub fn food(&self) -> Position {
        self.food.position
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.status == GameStatus::Running
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn death_reason(&self) -> Option<DeathReason> {
        self.death_reason
    }

    #[must_use]
    pub fn heading(&self) -> Direction {
        self.snake.heading()
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.bounds
    }
}
