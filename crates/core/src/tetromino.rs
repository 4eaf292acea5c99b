//! Tetromino module - canonical shapes and matrix rotation
//!
//! Each piece kind owns one canonical shape matrix (spawn orientation).
//! Shapes are stored as a bitmask of at most 4x4 cells, row-major, row 0 on top.
//! Rotation is a plain 90° clockwise matrix transform (transpose, then reverse
//! each row) about the matrix's own bounding box. There are no kick tables:
//! deciding whether a rotated shape fits is the board's job.

use arrayvec::ArrayVec;

use crate::types::{PieceKind, Rotation};

/// Offset of a single mino relative to piece origin, as (dx, dy)
pub type MinoOffset = (i32, i32);

/// Largest side length a shape matrix may have
pub const MAX_SHAPE_SIDE: u8 = 4;

/// A rectangular bitmask matrix of up to 4x4 cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: u8,
    cols: u8,
    mask: u16,
}

impl Shape {
    /// Build a shape from rows of 0/1 values.
    ///
    /// Panics if the matrix is empty, ragged, or larger than 4x4; only used
    /// with the static tables below and in tests.
    pub fn from_rows(rows: &[&[u8]]) -> Self {
        assert!(!rows.is_empty() && rows.len() <= MAX_SHAPE_SIDE as usize);
        let cols = rows[0].len();
        assert!(cols > 0 && cols <= MAX_SHAPE_SIDE as usize);

        let mut mask = 0u16;
        for (r, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), cols, "ragged shape matrix");
            for (c, &v) in row.iter().enumerate() {
                if v != 0 {
                    mask |= Self::bit(r as u8, c as u8);
                }
            }
        }

        Self {
            rows: rows.len() as u8,
            cols: cols as u8,
            mask,
        }
    }

    #[inline(always)]
    fn bit(row: u8, col: u8) -> u16 {
        1 << (row * MAX_SHAPE_SIDE + col)
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// Whether the cell at (row, col) is filled. Out-of-range cells are empty.
    pub fn is_filled(&self, row: u8, col: u8) -> bool {
        row < self.rows && col < self.cols && self.mask & Self::bit(row, col) != 0
    }

    /// Filled cells as (dx, dy) offsets, scanned row by row
    pub fn cells(&self) -> ArrayVec<MinoOffset, 16> {
        let mut out = ArrayVec::new();
        for row in 0..self.rows {
            for col in 0..self.cols {
                if self.is_filled(row, col) {
                    out.push((col as i32, row as i32));
                }
            }
        }
        out
    }

    /// Rotate 90° clockwise: an R×C matrix becomes C×R.
    ///
    /// `new[i][j] = old[R - 1 - j][i]`
    pub fn rotated_cw(&self) -> Self {
        let mut mask = 0u16;
        for i in 0..self.cols {
            for j in 0..self.rows {
                if self.is_filled(self.rows - 1 - j, i) {
                    mask |= Self::bit(i, j);
                }
            }
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            mask,
        }
    }

    /// Expand into a row-major 0/1 matrix (renderers, debugging)
    pub fn to_matrix(&self) -> Vec<Vec<u8>> {
        (0..self.rows)
            .map(|r| (0..self.cols).map(|c| self.is_filled(r, c) as u8).collect())
            .collect()
    }
}

/// Canonical spawn-orientation shape for a piece kind
pub fn canonical_shape(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::I => Shape::from_rows(&[&[1, 1, 1, 1]]),
        PieceKind::J => Shape::from_rows(&[&[1, 0, 0], &[1, 1, 1]]),
        PieceKind::L => Shape::from_rows(&[&[0, 0, 1], &[1, 1, 1]]),
        PieceKind::O => Shape::from_rows(&[&[1, 1], &[1, 1]]),
        PieceKind::S => Shape::from_rows(&[&[0, 1, 1], &[1, 1, 0]]),
        PieceKind::T => Shape::from_rows(&[&[0, 1, 0], &[1, 1, 1]]),
        PieceKind::Z => Shape::from_rows(&[&[1, 1, 0], &[0, 1, 1]]),
    }
}

/// A piece: kind, rotation state and current shape matrix.
///
/// Kind and color never change; rotation only touches `shape` (and the
/// bookkeeping `rotation` state).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    kind: PieceKind,
    rotation: Rotation,
    shape: Shape,
}

impl Tetromino {
    /// Create a piece in its canonical orientation
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            shape: canonical_shape(kind),
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn color(&self) -> &'static str {
        self.kind.color()
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Filled cells as (dx, dy) offsets from the piece origin
    pub fn cells(&self) -> ArrayVec<MinoOffset, 16> {
        self.shape.cells()
    }

    /// Rotate 90° clockwise about the shape's bounding box
    pub fn rotate(&mut self) {
        self.shape = self.shape.rotated_cw();
        self.rotation = self.rotation.rotate_cw();
    }

    /// Undo one clockwise rotation (three more quarter turns)
    pub fn rotate_back(&mut self) {
        for _ in 0..3 {
            self.rotate();
        }
    }
}
