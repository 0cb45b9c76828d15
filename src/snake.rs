use crate::config::GridSize;
use crate::input::{direction_change_is_valid, Direction};

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Returns the neighbouring position one cell towards `direction`.
    #[must_use]
    pub fn stepped(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Snake body stored in a buffer preallocated to the grid capacity.
///
/// Slots `0..len` are the body, head first. The slot at `len` (when the body
/// does not fill the grid) is the trailing slot: it holds the cell the tail
/// vacated on the last move and takes part in the self-collision scan.
#[derive(Debug, Clone)]
pub struct Snake {
    cells: Box<[Position]>,
    len: usize,
    heading: Direction,
    grow: bool,
}

impl Snake {
    /// Creates a snake of `length` coincident cells at the origin, heading right.
    ///
    /// `length` is clamped to `1..=bounds.total_cells()`. An empty grid still
    /// gets one slot for the head.
    #[must_use]
    pub fn new(bounds: GridSize, length: usize) -> Self {
        let capacity = bounds.total_cells().max(1);

        Self {
            cells: vec![Position::ORIGIN; capacity].into_boxed_slice(),
            len: length.clamp(1, capacity),
            heading: Direction::Right,
            grow: false,
        }
    }

    /// Creates a snake from explicit body segments (first is head).
    ///
    /// Unused slots repeat the tail cell. Segments beyond the grid capacity
    /// are dropped.
    #[must_use]
    pub fn from_segments(bounds: GridSize, segments: &[Position], heading: Direction) -> Self {
        let capacity = bounds.total_cells().max(1);
        let tail = segments.last().copied().unwrap_or(Position::ORIGIN);
        let mut cells = vec![tail; capacity].into_boxed_slice();
        let copied = segments.len().min(capacity);
        cells[..copied].copy_from_slice(&segments[..copied]);

        Self {
            cells,
            len: copied.max(1),
            heading,
            grow: false,
        }
    }

    /// Changes the heading unless `heading` reverses the current one.
    ///
    /// Returns whether the request was accepted.
    pub fn set_heading(&mut self, heading: Direction) -> bool {
        if !direction_change_is_valid(self.heading, heading) {
            return false;
        }

        self.heading = heading;
        true
    }

    /// Queues growth; the body gains its new segment on the next move.
    pub fn grow_next(&mut self) {
        self.grow = true;
    }

    /// Shifts every segment one slot towards the tail and moves the head one
    /// cell along the heading.
    pub fn move_forward(&mut self) {
        if std::mem::take(&mut self.grow) && self.len < self.capacity() {
            self.len += 1;
        }

        for index in (1..=self.trailing_index()).rev() {
            self.cells[index] = self.cells[index - 1];
        }

        self.cells[0] = self.cells[0].stepped(self.heading);
    }

    /// Returns true if the head matches any later slot, scanning from the
    /// trailing slot towards the neck.
    #[must_use]
    pub fn head_overlaps_body(&self) -> bool {
        let head = self.head();
        (1..=self.trailing_index())
            .rev()
            .any(|index| self.cells[index] == head)
    }

    /// Returns true if any body segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.segments().contains(&position)
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        self.cells[0]
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false; a snake has at least its head.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the maximum segment count, one per grid cell.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn heading(&self) -> Direction {
        self.heading
    }

    /// Returns body segments from head to tail.
    #[must_use]
    pub fn segments(&self) -> &[Position] {
        &self.cells[..self.len]
    }

    fn trailing_index(&self) -> usize {
        self.len.min(self.capacity() - 1)
    }
}

#[cfg(test)]
mod tests {
    use crate::config::GridSize;
    use crate::input::Direction;

    use super::{Position, Snake};

    const BOUNDS: GridSize = GridSize {
        width: 10,
        height: 8,
    };

    #[test]
    fn new_snake_is_coincident_at_origin() {
        let snake = Snake::new(BOUNDS, 6);

        assert_eq!(snake.len(), 6);
        assert_eq!(snake.capacity(), 80);
        assert_eq!(snake.heading(), Direction::Right);
        assert!(snake.segments().iter().all(|cell| *cell == Position::ORIGIN));
    }

    #[test]
    fn initial_length_is_clamped_to_capacity() {
        let tiny = GridSize {
            width: 2,
            height: 1,
        };

        assert_eq!(Snake::new(tiny, 9).len(), 2);
        assert_eq!(Snake::new(tiny, 0).len(), 1);
    }

    #[test]
    fn empty_grid_still_yields_a_one_cell_snake() {
        let empty = GridSize {
            width: 0,
            height: 4,
        };

        let mut snake = Snake::new(empty, 6);
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.capacity(), 1);

        snake.move_forward();
        assert_eq!(snake.head(), Position { x: 1, y: 0 });
        assert!(!snake.head_overlaps_body());
        assert!(!snake.head().is_within_bounds(empty));
    }

    #[test]
    fn snake_moves_one_cell_per_tick_and_trails_the_head() {
        let mut snake = Snake::new(BOUNDS, 3);

        snake.move_forward();
        assert_eq!(snake.head(), Position { x: 1, y: 0 });
        assert_eq!(snake.segments()[1..], [Position::ORIGIN; 2]);

        snake.set_heading(Direction::Down);
        snake.move_forward();
        snake.move_forward();

        assert_eq!(
            snake.segments(),
            [
                Position { x: 1, y: 2 },
                Position { x: 1, y: 1 },
                Position { x: 1, y: 0 },
            ]
        );
    }

    #[test]
    fn growth_keeps_previous_tail_on_next_move() {
        let mut snake = Snake::from_segments(
            BOUNDS,
            &[Position { x: 3, y: 3 }, Position { x: 2, y: 3 }],
            Direction::Right,
        );

        snake.grow_next();
        assert_eq!(snake.len(), 2);

        snake.move_forward();

        assert_eq!(
            snake.segments(),
            [
                Position { x: 4, y: 3 },
                Position { x: 3, y: 3 },
                Position { x: 2, y: 3 },
            ]
        );
    }

    #[test]
    fn growth_stops_at_capacity() {
        let line = GridSize {
            width: 3,
            height: 1,
        };
        let mut snake = Snake::from_segments(
            line,
            &[
                Position { x: 2, y: 0 },
                Position { x: 1, y: 0 },
                Position { x: 0, y: 0 },
            ],
            Direction::Right,
        );

        snake.grow_next();
        snake.move_forward();

        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position { x: 3, y: 0 });
    }

    #[test]
    fn heading_rejects_reverse() {
        let mut snake = Snake::new(BOUNDS, 2);

        assert!(!snake.set_heading(Direction::Left));
        assert_eq!(snake.heading(), Direction::Right);

        assert!(snake.set_heading(Direction::Up));
        assert_eq!(snake.heading(), Direction::Up);
    }

    #[test]
    fn head_overlap_detects_body_contact() {
        let snake = Snake::from_segments(
            BOUNDS,
            &[
                Position { x: 2, y: 2 },
                Position { x: 3, y: 2 },
                Position { x: 2, y: 2 },
            ],
            Direction::Left,
        );

        assert!(snake.head_overlaps_body());
    }

    #[test]
    fn head_overlap_includes_cell_vacated_this_move() {
        let mut snake = Snake::from_segments(
            BOUNDS,
            &[
                Position { x: 2, y: 1 },
                Position { x: 2, y: 2 },
                Position { x: 1, y: 2 },
                Position { x: 1, y: 1 },
            ],
            Direction::Left,
        );

        snake.move_forward();

        assert_eq!(snake.head(), Position { x: 1, y: 1 });
        assert!(!snake.segments()[1..].contains(&snake.head()));
        assert!(snake.head_overlaps_body());
    }
}
