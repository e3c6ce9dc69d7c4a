//! Board geometry: cells, headings and the 1-indexed playfield.

use serde::{Deserialize, Serialize};

/// Cell size in pixels on wide viewports.
pub const CELL_SIZE: f32 = 45.0;
/// Cell size in pixels on narrow (mobile-width) viewports.
pub const NARROW_CELL_SIZE: f32 = 30.0;
/// Viewports at or below this width use `NARROW_CELL_SIZE`.
pub const NARROW_VIEWPORT_WIDTH: f32 = 768.0;
/// Smallest board the game will lay out, whatever the window size.
pub const MIN_GRID_SIDE: i32 = 5;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit step as `(dx, dy)`; y grows downwards.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    /// Parses an input token such as `"up"` or `"ArrowLeft"`. Unknown tokens
    /// yield `None` and are dropped by callers.
    pub fn from_token(token: &str) -> Option<Direction> {
        match token.to_ascii_lowercase().as_str() {
            "up" | "arrowup" | "w" => Some(Direction::Up),
            "down" | "arrowdown" | "s" => Some(Direction::Down),
            "left" | "arrowleft" | "a" => Some(Direction::Left),
            "right" | "arrowright" | "d" => Some(Direction::Right),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn step(self, direction: Direction) -> Cell {
        let (dx, dy) = direction.delta();
        Cell {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// A `columns × rows` board addressed from `(1, 1)` to `(columns, rows)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub columns: i32,
    pub rows: i32,
}

impl Grid {
    pub fn new(columns: i32, rows: i32) -> Self {
        Self {
            columns: columns.max(1),
            rows: rows.max(1),
        }
    }

    /// Lays a board over a viewport of `width × height` pixels.
    pub fn for_viewport(width: f32, height: f32) -> Self {
        let cell = if width <= NARROW_VIEWPORT_WIDTH {
            NARROW_CELL_SIZE
        } else {
            CELL_SIZE
        };
        let columns = ((width / cell).floor() as i32).max(MIN_GRID_SIDE);
        let rows = ((height / cell).floor() as i32).max(MIN_GRID_SIDE);
        Self::new(columns, rows)
    }

    pub fn area(&self) -> usize {
        (self.columns * self.rows) as usize
    }

    pub fn center(&self) -> Cell {
        Cell::new(self.columns / 2, self.rows / 2)
    }

    pub fn contains(&self, cell: Cell) -> bool {
        (1..=self.columns).contains(&cell.x) && (1..=self.rows).contains(&cell.y)
    }

    /// Toroidal wrap: a cell one step past an edge re-enters at the opposite
    /// edge. Total for any input and always lands inside the board.
    pub fn wrap(&self, cell: Cell) -> Cell {
        Cell {
            x: (cell.x - 1).rem_euclid(self.columns) + 1,
            y: (cell.y - 1).rem_euclid(self.rows) + 1,
        }
    }
}
