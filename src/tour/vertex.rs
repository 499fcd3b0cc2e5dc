//! Board cells.

use crate::tour::error::TourError;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// A cell of the board, addressed by zero-based row and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Vertex {
    /// Zero-based row.
    pub row: usize,
    /// Zero-based column.
    pub col: usize,
}

impl Vertex {
    /// Creates a vertex at `(row, col)`.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns `true` if the vertex lies on a `board_size` x `board_size` board.
    #[must_use]
    pub const fn in_bounds(self, board_size: usize) -> bool {
        self.row < board_size && self.col < board_size
    }

    /// Dense row-major index of the vertex.
    #[must_use]
    pub const fn index(self, board_size: usize) -> usize {
        self.row * board_size + self.col
    }

    /// Inverse of [`Vertex::index`].
    #[must_use]
    pub const fn from_index(index: usize, board_size: usize) -> Self {
        Self::new(index / board_size, index % board_size)
    }

    /// Applies a `(drow, dcol)` displacement, returning `None` when the
    /// destination falls off the board.
    #[must_use]
    pub fn offset(self, (drow, dcol): (isize, isize), board_size: usize) -> Option<Self> {
        let row = self.row.checked_add_signed(drow)?;
        let col = self.col.checked_add_signed(dcol)?;
        let to = Self::new(row, col);
        to.in_bounds(board_size).then_some(to)
    }

    /// The `(drow, dcol)` displacement from `self` to `other`.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub const fn displacement(self, other: Self) -> (isize, isize) {
        (
            other.row as isize - self.row as isize,
            other.col as isize - self.col as isize,
        )
    }

    /// Returns `true` if a knight can move between the two vertices.
    #[must_use]
    pub const fn is_knight_move(self, other: Self) -> bool {
        let (drow, dcol) = self.displacement(other);
        matches!(
            (drow.unsigned_abs(), dcol.unsigned_abs()),
            (1, 2) | (2, 1)
        )
    }
}

impl From<(usize, usize)> for Vertex {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

impl From<Vertex> for (usize, usize) {
    fn from(v: Vertex) -> Self {
        (v.row, v.col)
    }
}

impl Display for Vertex {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

impl FromStr for Vertex {
    type Err = TourError;

    /// Parses the `row,col` text form. Surrounding whitespace is ignored.
    /// The reported line number is 0; callers that know the line replace it.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || TourError::Parse {
            line: 0,
            content: s.to_string(),
        };

        let (row, col) = s.trim().split_once(',').ok_or_else(malformed)?;
        let row = row.trim().parse().map_err(|_| malformed())?;
        let col = col.trim().parse().map_err(|_| malformed())?;
        Ok(Self::new(row, col))
    }
}
