//! Error types for tour construction, validation and persistence.
//!
//! A search that finishes without a tour is not an error: it is reported as
//! `SearchOutcome::NotFound`. The variants here cover inputs that could not be
//! searched at all, tours that break the Hamiltonian-path invariant, and the
//! file boundary where tours are written and read back.

use crate::tour::vertex::Vertex;
use std::fmt::{Display, Formatter};
use std::io;

/// The ways a sequence of vertices can fail to be a valid open tour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TourDefect {
    /// The sequence does not cover the board exactly once.
    WrongLength {
        /// Number of cells on the board.
        expected: usize,
        /// Number of vertices in the sequence.
        actual: usize,
    },
    /// A tour file whose vertex count is not a square, so no board fits it.
    NotSquare {
        /// Number of vertices read.
        actual: usize,
    },
    /// A vertex lies outside the board.
    OutOfBounds(Vertex),
    /// A vertex appears more than once.
    RepeatedVertex(Vertex),
    /// Two consecutive vertices are not a knight's move apart.
    IllegalMove {
        /// Vertex the move leaves.
        from: Vertex,
        /// Vertex the move lands on.
        to: Vertex,
    },
    /// The sequence does not begin at the requested start.
    WrongStart {
        /// Start the caller asked for.
        expected: Vertex,
        /// First vertex of the sequence.
        actual: Vertex,
    },
}

impl Display for TourDefect {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WrongLength { expected, actual } => {
                write!(f, "expected {expected} vertices, found {actual}")
            }
            Self::NotSquare { actual } => {
                write!(f, "expected a square number of vertices, found {actual}")
            }
            Self::OutOfBounds(v) => write!(f, "vertex {v} is off the board"),
            Self::RepeatedVertex(v) => write!(f, "vertex {v} is visited more than once"),
            Self::IllegalMove { from, to } => {
                write!(f, "{from} -> {to} is not a knight move")
            }
            Self::WrongStart { expected, actual } => {
                write!(f, "tour starts at {actual}, expected {expected}")
            }
        }
    }
}

/// Errors raised before or around a search.
#[derive(Debug)]
pub enum TourError {
    /// The board must have at least one cell per side.
    InvalidBoardSize(usize),
    /// The start vertex is not on the board.
    InvalidStart {
        /// Requested start.
        start: Vertex,
        /// Side length of the board.
        board_size: usize,
    },
    /// A vertex sequence failed tour validation.
    InvalidTour(TourDefect),
    /// A line of a tour file could not be read as `row,col`.
    Parse {
        /// One-based line number.
        line: usize,
        /// Offending line content.
        content: String,
    },
    /// Reading or writing a tour file failed.
    Io(io::Error),
}

impl Display for TourError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidBoardSize(size) => {
                write!(f, "invalid board size {size}: must be at least 1")
            }
            Self::InvalidStart { start, board_size } => write!(
                f,
                "start {start} is outside the {board_size}x{board_size} board"
            ),
            Self::InvalidTour(defect) => write!(f, "invalid tour: {defect}"),
            Self::Parse { line, content } => {
                write!(f, "line {line}: expected `row,col`, found {content:?}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for TourError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for TourError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<TourDefect> for TourError {
    fn from(defect: TourDefect) -> Self {
        Self::InvalidTour(defect)
    }
}
