//! Board module - manages the game grid and the active piece
//!
//! The board is a `width x height` grid (10x20 by default) where each cell is
//! empty or filled with a piece kind. Storage is a flat row-major vector.
//! Coordinates: (x, y) where x grows left to right and y grows top to bottom.
//!
//! Rows above the top edge (y < 0) are never stored, but a piece is allowed
//! to overhang them while it spawns; collision only considers the floor, the
//! side walls and occupied cells at y >= 0.

use std::fmt;

use tracing::debug;

use crate::error::ConfigError;
use crate::tetromino::Tetromino;
use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH};

/// The piece currently controlled by input, with its board offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub tetromino: Tetromino,
    pub x: i32,
    pub y: i32,
}

/// The game board - fixed-size grid plus at most one active piece
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    width: u16,
    height: u16,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
    current: Option<ActivePiece>,
}

impl Board {
    /// Create a new empty board
    ///
    /// Returns an error when either dimension is zero.
    pub fn new(width: u16, height: u16) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
            current: None,
        })
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || x >= self.width as i32 || y < 0 || y >= self.height as i32 {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .map(|row| row.iter().all(|cell| cell.is_some()))
            .unwrap_or(false)
    }

    /// One row of the grid, or None past the bottom
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= self.height as usize {
            return None;
        }
        let start = y * self.width as usize;
        Some(&self.cells[start..start + self.width as usize])
    }

    /// Grid rows from top to bottom
    pub fn grid(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.width as usize)
    }

    /// Color of every cell, row by row; empty string for vacant cells
    pub fn colors(&self) -> Vec<Vec<&'static str>> {
        self.grid()
            .map(|row| {
                row.iter()
                    .map(|cell| cell.map(|kind| kind.color()).unwrap_or(""))
                    .collect()
            })
            .collect()
    }

    /// Flat view of the cells
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Whether `piece` fits with its origin at (x, y).
    ///
    /// A filled cell is rejected when it leaves `[0, width)` horizontally,
    /// reaches `y >= height`, or lands on an occupied cell. Cells above the
    /// top edge are always accepted.
    pub fn is_valid_move(&self, piece: &Tetromino, x: i32, y: i32) -> bool {
        piece.cells().iter().all(|&(dx, dy)| {
            let px = x + dx;
            let py = y + dy;
            if px < 0 || px >= self.width as i32 || py >= self.height as i32 {
                return false;
            }
            py < 0 || !self.is_occupied(px, py)
        })
    }

    /// Install the active piece, replacing any previous one. The grid is untouched.
    pub fn set_current_piece(&mut self, piece: Tetromino, x: i32, y: i32) {
        self.current = Some(ActivePiece {
            tetromino: piece,
            x,
            y,
        });
    }

    pub fn current_piece(&self) -> Option<&ActivePiece> {
        self.current.as_ref()
    }

    /// Remove the active piece without locking it
    pub fn take_current_piece(&mut self) -> Option<ActivePiece> {
        self.current.take()
    }

    fn try_translate(&mut self, dx: i32, dy: i32) -> bool {
        let Some(active) = self.current else {
            return false;
        };

        if !self.is_valid_move(&active.tetromino, active.x + dx, active.y + dy) {
            return false;
        }

        self.current = Some(ActivePiece {
            x: active.x + dx,
            y: active.y + dy,
            ..active
        });
        true
    }

    pub fn move_current_piece_left(&mut self) -> bool {
        self.try_translate(-1, 0)
    }

    pub fn move_current_piece_right(&mut self) -> bool {
        self.try_translate(1, 0)
    }

    pub fn move_current_piece_down(&mut self) -> bool {
        self.try_translate(0, 1)
    }

    /// Rotate the active piece clockwise in place.
    ///
    /// If the rotated shape does not fit at the same (x, y) the rotation is
    /// undone and false is returned. No kick offsets are tried.
    pub fn rotate_current_piece(&mut self) -> bool {
        let Some(mut active) = self.current else {
            return false;
        };

        active.tetromino.rotate();
        if !self.is_valid_move(&active.tetromino, active.x, active.y) {
            active.tetromino.rotate_back();
            return false;
        }

        self.current = Some(active);
        true
    }

    /// Lock the active piece into the grid and clear the active slot.
    ///
    /// Cells above the top edge are dropped.
    pub fn place_current_piece(&mut self) {
        let Some(active) = self.current.take() else {
            return;
        };

        let kind = active.tetromino.kind();
        for (dx, dy) in active.tetromino.cells() {
            let py = active.y + dy;
            if py >= 0 {
                self.set(active.x + dx, py, Some(kind));
            }
        }

        debug!(
            kind = kind.as_str(),
            x = active.x,
            y = active.y,
            "piece locked"
        );
    }

    /// Drop the active piece as far as it goes, lock it and clear lines.
    ///
    /// Returns the number of lines cleared.
    pub fn hard_drop_current_piece(&mut self) -> u32 {
        if self.current.is_none() {
            return 0;
        }
        while self.move_current_piece_down() {}
        self.place_current_piece();
        self.clear_lines()
    }

    /// Clear a row and shift all rows above down; the top row becomes empty
    fn clear_row(&mut self, y: usize) {
        let width = self.width as usize;

        // copy_within handles the overlapping ranges
        for row in (1..=y).rev() {
            let src_start = (row - 1) * width;
            self.cells
                .copy_within(src_start..src_start + width, row * width);
        }

        for cell in &mut self.cells[..width] {
            *cell = None;
        }
    }

    /// Remove every full row, compacting the rows above it downwards.
    ///
    /// Rows are scanned bottom to top; after a removal the same index is
    /// examined again since the row above has moved into it.
    /// Returns the total number of rows cleared.
    pub fn clear_lines(&mut self) -> u32 {
        let mut cleared = 0;
        let mut y = self.height as usize;

        while y > 0 {
            let row = y - 1;
            if self.is_row_full(row) {
                self.clear_row(row);
                cleared += 1;
            } else {
                y -= 1;
            }
        }

        if cleared > 0 {
            debug!(lines = cleared, "lines cleared");
        }
        cleared
    }

    /// True iff any cell in the top row is occupied
    pub fn is_game_over(&self) -> bool {
        self.row(0)
            .map(|row| row.iter().any(|cell| cell.is_some()))
            .unwrap_or(false)
    }

    /// Empty the grid and drop the active piece
    pub fn reset(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
        self.current = None;
    }
}

impl Default for Board {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            cells: vec![None; BOARD_WIDTH as usize * BOARD_HEIGHT as usize],
            current: None,
        }
    }
}

/// Text view: locked cells by kind letter, the active piece in lowercase,
/// empty cells as `.`
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let active: Vec<(i32, i32, char)> = self
            .current
            .iter()
            .flat_map(|p| {
                let letter = p.tetromino.kind().as_str().to_ascii_lowercase();
                let ch = letter.chars().next().unwrap_or('*');
                p.tetromino
                    .cells()
                    .into_iter()
                    .map(move |(dx, dy)| (p.x + dx, p.y + dy, ch))
            })
            .collect();

        for (y, row) in self.grid().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                let ch = match active
                    .iter()
                    .find(|&&(ax, ay, _)| ax == x as i32 && ay == y as i32)
                {
                    Some(&(_, _, ch)) => ch,
                    None => match cell {
                        Some(kind) => kind.as_str().chars().next().unwrap_or('#'),
                        None => '.',
                    },
                };
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
