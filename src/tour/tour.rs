#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Completed tours and their text form.
//!
//! A `Tour` can only be constructed from a sequence that passes validation:
//! it covers the board exactly once and every consecutive pair is a legal
//! knight move. The text form written for downstream consumers is one
//! `row,col` line per vertex in visitation order.

use crate::tour::error::{TourDefect, TourError};
use crate::tour::vertex::Vertex;
use itertools::Itertools;
use rustc_hash::FxHashSet;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::Path as FsPath;

/// A Hamiltonian path over the knight-move graph of a square board.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tour {
    board_size: usize,
    vertices: Vec<Vertex>,
}

impl Tour {
    /// Validates `vertices` as an open tour of a `board_size` board.
    ///
    /// # Errors
    ///
    /// `TourError::InvalidBoardSize` for a zero-sized board or one whose cell
    /// count overflows `usize`, otherwise
    /// `TourError::InvalidTour` describing the first defect found.
    pub fn new(board_size: usize, vertices: Vec<Vertex>) -> Result<Self, TourError> {
        let cells = board_size
            .checked_mul(board_size)
            .filter(|&cells| cells > 0)
            .ok_or(TourError::InvalidBoardSize(board_size))?;
        validate(board_size, cells, &vertices)?;
        Ok(Self {
            board_size,
            vertices,
        })
    }

    /// Wraps a sequence the search has already built under the tour invariant.
    pub(crate) fn from_search(board_size: usize, vertices: Vec<Vertex>) -> Self {
        debug_assert!(validate(board_size, board_size * board_size, &vertices).is_ok());
        Self {
            board_size,
            vertices,
        }
    }

    /// Side length of the board.
    #[must_use]
    pub const fn board_size(&self) -> usize {
        self.board_size
    }

    /// First vertex of the tour.
    #[must_use]
    pub fn start(&self) -> Vertex {
        self.vertices[0]
    }

    /// Last vertex of the tour.
    #[must_use]
    pub fn end(&self) -> Vertex {
        self.vertices[self.vertices.len() - 1]
    }

    /// Number of vertices, always `board_size * board_size`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Always `false`; a tour covers at least one cell.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Vertices in visitation order.
    #[must_use]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Iterates over the vertices in visitation order.
    pub fn iter(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.iter()
    }

    /// Checks the tour starts at `start`.
    ///
    /// # Errors
    ///
    /// `TourError::InvalidTour` with `TourDefect::WrongStart` otherwise.
    pub fn check_start(&self, start: Vertex) -> Result<(), TourError> {
        if self.start() == start {
            Ok(())
        } else {
            Err(TourDefect::WrongStart {
                expected: start,
                actual: self.start(),
            }
            .into())
        }
    }

    /// The `row,col` text form, one vertex per line.
    #[must_use]
    pub fn to_text(&self) -> String {
        self.vertices.iter().join("\n")
    }

    /// Parses the text form. The board size is the square root of the number
    /// of vertices; blank lines are skipped.
    ///
    /// # Errors
    ///
    /// `TourError::Parse` on a malformed line, `TourError::InvalidTour` if the
    /// vertex count is not a square or the sequence is not a tour.
    pub fn parse(text: &str) -> Result<Self, TourError> {
        let vertices: Vec<Vertex> = text
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| {
                line.parse::<Vertex>().map_err(|_| TourError::Parse {
                    line: i + 1,
                    content: line.to_string(),
                })
            })
            .collect::<Result<_, _>>()?;

        let board_size = vertices.len().isqrt();
        if board_size == 0 || board_size * board_size != vertices.len() {
            return Err(TourDefect::NotSquare {
                actual: vertices.len(),
            }
            .into());
        }

        Self::new(board_size, vertices)
    }

    /// Writes the text form to `path`.
    ///
    /// # Errors
    ///
    /// `TourError::Io` if the file cannot be written.
    pub fn write_to<P: AsRef<FsPath>>(&self, path: P) -> Result<(), TourError> {
        fs::write(path, self.to_text())?;
        Ok(())
    }

    /// Reads and validates a tour file.
    ///
    /// # Errors
    ///
    /// `TourError::Io` if the file cannot be read, otherwise as [`Tour::parse`].
    pub fn read_from<P: AsRef<FsPath>>(path: P) -> Result<Self, TourError> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Conventional file name for the tour, e.g. `8x8_0-0.txt`.
    #[must_use]
    pub fn file_name(&self) -> String {
        default_file_name(self.board_size, self.start())
    }

    /// Renders the board with each cell showing the step it was visited on,
    /// counting from 1.
    #[must_use]
    pub fn to_grid_string(&self) -> String {
        let n = self.board_size;
        let mut steps = vec![0_usize; n * n];
        for (step, v) in self.vertices.iter().enumerate() {
            steps[v.index(n)] = step + 1;
        }

        let width = (n * n).to_string().len();
        steps
            .chunks(n)
            .map(|row| row.iter().map(|s| format!("{s:>width$}")).join(" "))
            .join("\n")
    }
}

impl Display for Tour {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_text())
    }
}

impl<'a> IntoIterator for &'a Tour {
    type Item = &'a Vertex;
    type IntoIter = std::slice::Iter<'a, Vertex>;

    fn into_iter(self) -> Self::IntoIter {
        self.vertices.iter()
    }
}

impl From<Tour> for Vec<Vertex> {
    fn from(tour: Tour) -> Self {
        tour.vertices
    }
}

/// File name for a tour of a `board_size` board starting at `start`.
#[must_use]
pub fn default_file_name(board_size: usize, start: Vertex) -> String {
    format!(
        "{board_size}x{board_size}_{}-{}.txt",
        start.row, start.col
    )
}

fn validate(board_size: usize, cells: usize, vertices: &[Vertex]) -> Result<(), TourDefect> {
    if vertices.len() != cells {
        return Err(TourDefect::WrongLength {
            expected: cells,
            actual: vertices.len(),
        });
    }

    let mut seen = FxHashSet::default();
    for &v in vertices {
        if !v.in_bounds(board_size) {
            return Err(TourDefect::OutOfBounds(v));
        }
        if !seen.insert(v) {
            return Err(TourDefect::RepeatedVertex(v));
        }
    }

    if let Some((&from, &to)) = vertices
        .iter()
        .tuple_windows()
        .find(|&(a, b)| !a.is_knight_move(*b))
    {
        return Err(TourDefect::IllegalMove { from, to });
    }

    Ok(())
}
