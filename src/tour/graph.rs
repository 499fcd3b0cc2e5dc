#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Construction of the knight-move graph over a square board.
//!
//! The graph is built once per board size and is read-only afterwards. Every
//! cell is a vertex and every legal knight move is an undirected edge. Edges
//! are inserted symmetrically and idempotently, so the adjacency relation is
//! symmetric by construction regardless of the order cells are enumerated in.
//!
//! Neighbour lists are kept in the enumeration order of [`MOVE_OFFSETS`]
//! relative to the owning vertex. Orderings that compare equal under a move
//! heuristic fall back to this order, which makes searches reproducible.

use crate::tour::error::TourError;
use crate::tour::vertex::Vertex;
use smallvec::SmallVec;

/// The eight knight displacements, in the order ties are broken in.
pub const MOVE_OFFSETS: [(isize, isize); 8] = [
    (-1, -2),
    (1, -2),
    (-2, -1),
    (2, -1),
    (-2, 1),
    (2, 1),
    (-1, 2),
    (1, 2),
];

/// A vertex has at most eight neighbours, so they are stored inline.
pub type Neighbours = SmallVec<[Vertex; 8]>;

/// The static adjacency structure induced by knight moves on an `N` x `N` board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveGraph {
    board_size: usize,
    adjacency: Vec<Neighbours>,
}

impl MoveGraph {
    /// Builds the move graph for a board of side `board_size`.
    ///
    /// # Errors
    ///
    /// `TourError::InvalidBoardSize` if `board_size` is zero or the number of
    /// cells overflows `usize`.
    pub fn new(board_size: usize) -> Result<Self, TourError> {
        let num_vertices = board_size
            .checked_mul(board_size)
            .filter(|&n| n > 0)
            .ok_or(TourError::InvalidBoardSize(board_size))?;

        let mut graph = Self {
            board_size,
            adjacency: vec![Neighbours::new(); num_vertices],
        };

        for index in 0..num_vertices {
            let from = Vertex::from_index(index, board_size);
            for to in legal_moves_from(from, board_size) {
                graph.add_edge(from, to);
            }
        }

        for (index, neighbours) in graph.adjacency.iter_mut().enumerate() {
            let from = Vertex::from_index(index, board_size);
            neighbours.sort_by_key(|&to| offset_rank(from, to));
        }

        Ok(graph)
    }

    /// Inserts `a -- b` in both directions. Re-inserting an existing edge is a no-op.
    fn add_edge(&mut self, a: Vertex, b: Vertex) {
        let n = self.board_size;
        if !self.adjacency[a.index(n)].contains(&b) {
            self.adjacency[a.index(n)].push(b);
        }
        if !self.adjacency[b.index(n)].contains(&a) {
            self.adjacency[b.index(n)].push(a);
        }
    }

    /// Side length of the board.
    #[must_use]
    pub const fn board_size(&self) -> usize {
        self.board_size
    }

    /// Number of cells, `N * N`.
    #[must_use]
    pub fn num_vertices(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected edges.
    #[must_use]
    pub fn num_edges(&self) -> usize {
        self.adjacency.iter().map(SmallVec::len).sum::<usize>() / 2
    }

    /// Returns `true` if `vertex` is a cell of this board.
    #[must_use]
    pub const fn contains(&self, vertex: Vertex) -> bool {
        vertex.in_bounds(self.board_size)
    }

    /// Neighbours of `vertex`, in offset-enumeration order.
    ///
    /// # Panics
    ///
    /// If `vertex` is not on the board.
    #[must_use]
    pub fn neighbours(&self, vertex: Vertex) -> &[Vertex] {
        &self.adjacency[vertex.index(self.board_size)]
    }

    /// Size of the neighbour set of `vertex`, counting visited cells too.
    #[must_use]
    pub fn degree(&self, vertex: Vertex) -> usize {
        self.neighbours(vertex).len()
    }

    /// All vertices in row-major order.
    pub fn vertices(&self) -> impl Iterator<Item = Vertex> + '_ {
        (0..self.num_vertices()).map(|i| Vertex::from_index(i, self.board_size))
    }

    /// Checks that `b` is a neighbour of `a` exactly when `a` is a neighbour of `b`.
    #[must_use]
    pub fn is_symmetric(&self) -> bool {
        self.vertices().all(|a| {
            self.neighbours(a)
                .iter()
                .all(|&b| self.neighbours(b).contains(&a))
        })
    }
}

/// Cells reachable from `(row, col)` by one knight move, in offset order.
pub fn legal_moves_from(from: Vertex, board_size: usize) -> impl Iterator<Item = Vertex> {
    MOVE_OFFSETS
        .into_iter()
        .filter_map(move |offset| from.offset(offset, board_size))
}

/// Position of the `from -> to` displacement within [`MOVE_OFFSETS`].
fn offset_rank(from: Vertex, to: Vertex) -> usize {
    let displacement = from.displacement(to);
    MOVE_OFFSETS
        .iter()
        .position(|&offset| offset == displacement)
        .unwrap_or(MOVE_OFFSETS.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_board_rejected() {
        assert!(matches!(
            MoveGraph::new(0),
            Err(TourError::InvalidBoardSize(0))
        ));
    }

    #[test]
    fn test_single_cell() {
        let graph = MoveGraph::new(1).unwrap();
        assert_eq!(graph.num_vertices(), 1);
        assert_eq!(graph.degree(Vertex::new(0, 0)), 0);
        assert_eq!(graph.num_edges(), 0);
    }

    #[test]
    fn test_tiny_boards() {
        let two = MoveGraph::new(2).unwrap();
        assert!(two.vertices().all(|v| two.degree(v) == 0));

        let three = MoveGraph::new(3).unwrap();
        assert_eq!(three.degree(Vertex::new(1, 1)), 0);
        assert_eq!(three.degree(Vertex::new(0, 0)), 2);
        assert_eq!(three.num_edges(), 8);
    }

    #[test]
    fn test_standard_board_degrees() {
        let graph = MoveGraph::new(8).unwrap();
        assert_eq!(graph.num_vertices(), 64);
        assert_eq!(graph.num_edges(), 168);
        assert_eq!(graph.degree(Vertex::new(0, 0)), 2);
        assert_eq!(graph.degree(Vertex::new(0, 1)), 3);
        assert_eq!(graph.degree(Vertex::new(1, 1)), 4);
        assert_eq!(graph.degree(Vertex::new(3, 3)), 8);
        assert!(graph.vertices().all(|v| (2..=8).contains(&graph.degree(v))));
    }

    #[test]
    fn test_symmetric() {
        for n in 1..=9 {
            let graph = MoveGraph::new(n).unwrap();
            assert!(graph.is_symmetric(), "board {n} is not symmetric");
        }
    }

    #[test]
    fn test_neighbours_are_knight_moves() {
        let graph = MoveGraph::new(6).unwrap();
        for v in graph.vertices() {
            for &w in graph.neighbours(v) {
                assert!(v.is_knight_move(w));
                assert!(graph.contains(w));
            }
        }
    }

    #[test]
    fn test_neighbours_in_offset_order() {
        let graph = MoveGraph::new(8).unwrap();
        let centre = Vertex::new(4, 4);
        let expected: Vec<Vertex> = MOVE_OFFSETS
            .iter()
            .filter_map(|&o| centre.offset(o, 8))
            .collect();
        assert_eq!(graph.neighbours(centre), expected.as_slice());

        assert_eq!(
            graph.neighbours(Vertex::new(0, 0)),
            &[Vertex::new(2, 1), Vertex::new(1, 2)]
        );
    }

    #[test]
    fn test_legal_moves_from_corner() {
        let moves: Vec<Vertex> = legal_moves_from(Vertex::new(7, 7), 8).collect();
        assert_eq!(moves, vec![Vertex::new(6, 5), Vertex::new(5, 6)]);
    }
}
