//! Shape module - boolean occupancy matrices
//!
//! A shape is a rectangular matrix of at most 4x4 cells stored inline, so it is
//! `Copy` and never allocates. Rotation returns a new shape; shapes are never
//! mutated in place.

/// Largest row or column count a shape may have.
pub const MAX_SHAPE_DIM: usize = 4;

/// Rectangular occupancy matrix, indexed `[row][col]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: u8,
    cols: u8,
    cells: [[bool; MAX_SHAPE_DIM]; MAX_SHAPE_DIM],
}

impl Shape {
    /// Build a shape from a `0`/`1` matrix.
    ///
    /// Panics (at compile time when used in a `const`) if the matrix is
    /// empty, larger than 4x4, or has no occupied cell.
    pub const fn from_matrix<const R: usize, const C: usize>(matrix: [[u8; C]; R]) -> Self {
        assert!(R > 0 && C > 0, "shape matrix must not be empty");
        assert!(
            R <= MAX_SHAPE_DIM && C <= MAX_SHAPE_DIM,
            "shape matrix exceeds 4x4"
        );

        let mut cells = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        let mut filled = 0;
        let mut row = 0;
        while row < R {
            let mut col = 0;
            while col < C {
                if matrix[row][col] != 0 {
                    cells[row][col] = true;
                    filled += 1;
                }
                col += 1;
            }
            row += 1;
        }
        assert!(filled > 0, "shape matrix has no occupied cell");

        Self {
            rows: R as u8,
            cols: C as u8,
            cells,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows as usize
    }

    pub fn cols(&self) -> usize {
        self.cols as usize
    }

    /// Whether `(row, col)` is occupied. Out-of-range positions are empty.
    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        row < self.rows() && col < self.cols() && self.cells[row][col]
    }

    /// Occupied cells as `(row, col)` pairs, row-major.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.rows()).flat_map(move |row| {
            (0..self.cols())
                .filter(move |&col| self.cells[row][col])
                .map(move |col| (row, col))
        })
    }

    /// Rotate 90° clockwise: an R x C matrix becomes C x R with
    /// `out[col][R - 1 - row] = in[row][col]`.
    pub fn rotate_cw(&self) -> Shape {
        let r = self.rows();
        let mut cells = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for (row, col) in self.occupied() {
            cells[col][r - 1 - row] = true;
        }
        Shape {
            rows: self.cols,
            cols: self.rows,
            cells,
        }
    }
}
