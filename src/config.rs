use std::path::PathBuf;
use std::time::Duration;

use ratatui::style::Color;
use thiserror::Error;

use crate::food::FoodPlacement;

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Creates a grid, rejecting a zero-sized axis.
    pub fn new(width: u16, height: u16) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyGrid { width, height });
        }

        Ok(Self { width, height })
    }

    /// Derives the cell grid covering a screen of `screen_width` x
    /// `screen_height` units split into square cells of `cell_size` units.
    ///
    /// Partial cells at the right and bottom edges are dropped.
    pub fn from_screen(
        screen_width: u32,
        screen_height: u32,
        cell_size: u32,
    ) -> Result<Self, ConfigError> {
        if cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }

        let width = screen_width / cell_size;
        let height = screen_height / cell_size;
        let too_large = || ConfigError::GridTooLarge { width, height };

        Self::new(
            u16::try_from(width).map_err(|_| too_large())?,
            u16::try_from(height).map_err(|_| too_large())?,
        )
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

/// Invalid start-up configuration.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum ConfigError {
    #[error("grid must have at least one cell on each axis (got {width}x{height})")]
    EmptyGrid { width: u16, height: u16 },
    #[error("cell size must be greater than zero")]
    ZeroCellSize,
    #[error("grid of {width}x{height} cells does not fit the playfield")]
    GridTooLarge { width: u32, height: u32 },
    #[error("grid of {cells} cells exceeds the limit of {max}")]
    TooManyCells { cells: usize, max: usize },
    #[error("initial body length {length} must be between 1 and {capacity}")]
    InitialLengthOutOfRange { length: usize, capacity: usize },
    #[error("tick interval must be greater than zero")]
    ZeroTickInterval,
}

/// Validated settings for one run of the application.
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub grid: GridSize,
    pub initial_body_length: usize,
    pub tick_interval: Duration,
    pub food_placement: FoodPlacement,
    /// Fixed RNG seed; every session replays the same food sequence.
    pub seed: Option<u64>,
    pub scores_path: PathBuf,
    pub log_path: PathBuf,
}

impl GameConfig {
    /// Checks the cross-field invariants that `GridSize` alone cannot.
    pub fn validate(self) -> Result<Self, ConfigError> {
        let capacity = self.grid.total_cells();
        if capacity > MAX_GRID_CELLS {
            return Err(ConfigError::TooManyCells {
                cells: capacity,
                max: MAX_GRID_CELLS,
            });
        }

        if self.initial_body_length == 0 || self.initial_body_length > capacity {
            return Err(ConfigError::InitialLengthOutOfRange {
                length: self.initial_body_length,
                capacity,
            });
        }

        if self.tick_interval.is_zero() {
            return Err(ConfigError::ZeroTickInterval);
        }

        Ok(self)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid: GridSize {
                width: (DEFAULT_SCREEN_WIDTH / DEFAULT_CELL_SIZE) as u16,
                height: (DEFAULT_SCREEN_HEIGHT / DEFAULT_CELL_SIZE) as u16,
            },
            initial_body_length: DEFAULT_INITIAL_BODY_LENGTH,
            tick_interval: Duration::from_millis(DEFAULT_TICK_INTERVAL_MS),
            food_placement: FoodPlacement::Anywhere,
            seed: None,
            scores_path: data_dir().join(SCORE_FILE_NAME),
            log_path: data_dir().join(LOG_FILE_NAME),
        }
    }
}

/// Returns the per-user directory holding scores and logs.
#[must_use]
pub fn data_dir() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base
}

/// Colors applied to all visual elements.
#[derive(Debug)]
pub struct Theme {
    pub snake_head: Color,
    pub snake_body: Color,
    pub food: Color,
    pub play_bg: Color,
    pub border_fg: Color,
    pub hud_label: Color,
    pub hud_value: Color,
    pub banner: Color,
    pub muted: Color,
}

/// Green snake, red food.
pub const THEME: Theme = Theme {
    snake_head: Color::Green,
    snake_body: Color::Rgb(45, 180, 0),
    food: Color::Red,
    play_bg: Color::Black,
    border_fg: Color::Gray,
    hud_label: Color::DarkGray,
    hud_value: Color::White,
    banner: Color::Red,
    muted: Color::DarkGray,
};

pub const APP_DIR_NAME: &str = "grid-snake";
pub const SCORE_FILE_NAME: &str = "scores.json";
pub const LOG_FILE_NAME: &str = "grid-snake.log";

/// Playfield size in screen units.
pub const DEFAULT_SCREEN_WIDTH: u32 = 600;
pub const DEFAULT_SCREEN_HEIGHT: u32 = 500;

/// Edge length of one grid cell in screen units.
pub const DEFAULT_CELL_SIZE: u32 = 20;

pub const DEFAULT_INITIAL_BODY_LENGTH: usize = 6;

/// Upper bound on `W * H`; the snake buffer is preallocated to this size.
pub const MAX_GRID_CELLS: usize = 1 << 16;

/// Tick interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 200;

/// Terminal columns used to draw one grid cell.
pub const CELL_COLUMNS: u16 = 2;

/// Glyph for one terminal column of a filled cell.
pub const GLYPH_SOLID: &str = "█";

/// Glyph for food, drawn in both columns of its cell.
pub const GLYPH_FOOD: &str = "●";

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{ConfigError, GameConfig, GridSize, MAX_GRID_CELLS};

    #[test]
    fn default_screen_yields_thirty_by_twenty_five_cells() {
        let grid = GridSize::from_screen(600, 500, 20).expect("default screen should be valid");

        assert_eq!(
            grid,
            GridSize {
                width: 30,
                height: 25
            }
        );
        assert_eq!(grid.total_cells(), 750);
        assert_eq!(GameConfig::default().grid, grid);
    }

    #[test]
    fn partial_cells_are_dropped() {
        let grid = GridSize::from_screen(95, 41, 20).expect("screen should be valid");

        assert_eq!(
            grid,
            GridSize {
                width: 4,
                height: 2
            }
        );
    }

    #[test]
    fn zero_sized_grids_are_rejected() {
        assert_eq!(GridSize::from_screen(600, 500, 0), Err(ConfigError::ZeroCellSize));
        assert_eq!(
            GridSize::from_screen(10, 500, 20),
            Err(ConfigError::EmptyGrid {
                width: 0,
                height: 25
            })
        );
        assert!(GridSize::new(3, 0).is_err());
    }

    #[test]
    fn oversized_grid_is_rejected() {
        assert!(matches!(
            GridSize::from_screen(u32::MAX, 10, 1),
            Err(ConfigError::GridTooLarge { .. })
        ));
    }

    #[test]
    fn grid_beyond_the_cell_limit_is_rejected() {
        let grid = GridSize::from_screen(65_535, 65_535, 1).expect("axes fit in u16");
        let config = GameConfig {
            grid,
            ..GameConfig::default()
        };

        assert_eq!(
            config.validate().map(|_| ()),
            Err(ConfigError::TooManyCells {
                cells: 65_535 * 65_535,
                max: MAX_GRID_CELLS,
            })
        );

        let largest = GameConfig {
            grid: GridSize::new(256, 256).expect("grid should be valid"),
            ..GameConfig::default()
        };
        assert!(largest.validate().is_ok());
    }

    #[test]
    fn initial_length_must_fit_the_grid() {
        let config = GameConfig {
            grid: GridSize {
                width: 2,
                height: 2,
            },
            initial_body_length: 5,
            ..GameConfig::default()
        };

        assert_eq!(
            config.validate().map(|_| ()),
            Err(ConfigError::InitialLengthOutOfRange {
                length: 5,
                capacity: 4
            })
        );

        let zero = GameConfig {
            initial_body_length: 0,
            ..GameConfig::default()
        };
        assert!(zero.validate().is_err());
    }

    #[test]
    fn zero_tick_interval_is_rejected() {
        let config = GameConfig {
            tick_interval: Duration::ZERO,
            ..GameConfig::default()
        };

        assert_eq!(
            config.validate().map(|_| ()),
            Err(ConfigError::ZeroTickInterval)
        );
    }

    #[test]
    fn default_config_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }
}
