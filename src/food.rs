use rand::Rng;

use crate::config::GridSize;
use crate::snake::{Position, Snake};

/// How a new food cell is chosen.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum FoodPlacement {
    /// Any cell of the grid, including cells under the snake.
    #[default]
    Anywhere,
    /// Any cell the snake body does not cover.
    FreeCells,
}

/// Food entity currently on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    pub position: Position,
}

impl Food {
    #[must_use]
    pub fn new(position: Position) -> Self {
        Self { position }
    }

    /// Spawns food using the given placement rule.
    #[must_use]
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        bounds: GridSize,
        snake: &Snake,
        placement: FoodPlacement,
    ) -> Self {
        let position = match placement {
            FoodPlacement::Anywhere => spawn_position(rng, bounds),
            FoodPlacement::FreeCells => spawn_free_position(rng, bounds, snake)
                .unwrap_or_else(|| spawn_position(rng, bounds)),
        };

        Self::new(position)
    }
}

/// Draws each axis uniformly over the grid, ignoring occupancy.
///
/// An empty axis yields 0 on that axis.
#[must_use]
pub fn spawn_position<R: Rng + ?Sized>(rng: &mut R, bounds: GridSize) -> Position {
    Position {
        x: rng.gen_range(0..i32::from(bounds.width.max(1))),
        y: rng.gen_range(0..i32::from(bounds.height.max(1))),
    }
}

/// Draws uniformly among cells not covered by the snake.
///
/// Returns `None` when the snake covers the whole grid.
#[must_use]
pub fn spawn_free_position<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: GridSize,
    snake: &Snake,
) -> Option<Position> {
    let mut candidates = Vec::with_capacity(bounds.total_cells());

    for y in 0..i32::from(bounds.height) {
        for x in 0..i32::from(bounds.width) {
            let position = Position { x, y };
            if !snake.occupies(position) {
                candidates.push(position);
            }
        }
    }

    if candidates.is_empty() {
        return None;
    }

    let index = rng.gen_range(0..candidates.len());
    Some(candidates[index])
}
