//! Pieces module - the tetromino catalog and the active piece
//!
//! The catalog is a compile-time constant: every shape goes through
//! [`Shape::from_matrix`], so a malformed entry fails the build instead of
//! surfacing at runtime.

use crate::shape::Shape;
use crate::types::{PieceKind, SPAWN_X, SPAWN_Y};

/// One catalog entry: a kind, its spawn orientation and its color tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TetrominoDef {
    pub kind: PieceKind,
    pub shape: Shape,
    pub color: PieceKind,
}

const fn def<const R: usize, const C: usize>(kind: PieceKind, m: [[u8; C]; R]) -> TetrominoDef {
    TetrominoDef {
        kind,
        shape: Shape::from_matrix(m),
        color: kind,
    }
}

/// Canonical shapes, in [`PieceKind::ALL`] order.
pub static CATALOG: [TetrominoDef; 7] = [
    def(PieceKind::I, [[1, 1, 1, 1]]),
    def(PieceKind::O, [[1, 1], [1, 1]]),
    def(PieceKind::T, [[0, 1, 0], [1, 1, 1]]),
    def(PieceKind::S, [[0, 1, 1], [1, 1, 0]]),
    def(PieceKind::Z, [[1, 1, 0], [0, 1, 1]]),
    def(PieceKind::L, [[1, 0], [1, 0], [1, 1]]),
    def(PieceKind::J, [[0, 1], [0, 1], [1, 1]]),
];

/// Look up the catalog entry for a kind.
pub fn definition(kind: PieceKind) -> &'static TetrominoDef {
    &CATALOG[kind.index()]
}

/// Spawn orientation of a kind.
pub fn canonical_shape(kind: PieceKind) -> Shape {
    definition(kind).shape
}

/// The falling piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    /// Current orientation (post-rotation).
    pub shape: Shape,
    /// Anchor: top-left of the shape's bounding box, in board coordinates.
    pub x: i8,
    pub y: i8,
}

impl Tetromino {
    /// Create a new tetromino at the spawn anchor in its canonical orientation
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            shape: canonical_shape(kind),
            x: SPAWN_X,
            y: SPAWN_Y,
        }
    }

    pub fn color(&self) -> PieceKind {
        definition(self.kind).color
    }

    /// Same piece moved by `(dx, dy)`.
    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Same piece rotated clockwise about its anchor.
    pub fn rotated(&self) -> Self {
        Self {
            shape: self.shape.rotate_cw(),
            ..*self
        }
    }
}
