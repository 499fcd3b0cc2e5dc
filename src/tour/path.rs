//! The partial tour held by a search.

use crate::tour::vertex::Vertex;
use bit_vec::BitVec;

/// An ordered, duplicate-free sequence of vertices with O(1) membership tests.
///
/// Insertion order is visitation order. A search frame that pushes a vertex
/// is the one that pops it again when its branch is abandoned, so the path
/// never carries a segment belonging to a sibling branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    board_size: usize,
    order: Vec<Vertex>,
    visited: BitVec,
}

impl Path {
    /// Creates an empty path for a `board_size` x `board_size` board.
    #[must_use]
    pub fn new(board_size: usize) -> Self {
        let cells = board_size * board_size;
        Self {
            board_size,
            order: Vec::with_capacity(cells),
            visited: BitVec::from_elem(cells, false),
        }
    }

    /// Appends `vertex`. The caller guarantees it is on the board and unvisited.
    pub fn push(&mut self, vertex: Vertex) {
        debug_assert!(!self.contains(vertex), "{vertex} visited twice");
        self.visited.set(vertex.index(self.board_size), true);
        self.order.push(vertex);
    }

    /// Removes and returns the most recently visited vertex.
    pub fn pop(&mut self) -> Option<Vertex> {
        let vertex = self.order.pop()?;
        self.visited.set(vertex.index(self.board_size), false);
        Some(vertex)
    }

    /// Returns `true` if `vertex` is already on the path.
    #[must_use]
    pub fn contains(&self, vertex: Vertex) -> bool {
        vertex.in_bounds(self.board_size)
            && self
                .visited
                .get(vertex.index(self.board_size))
                .unwrap_or(false)
    }

    /// Number of visited vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if nothing has been visited yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// The most recently visited vertex.
    #[must_use]
    pub fn last(&self) -> Option<Vertex> {
        self.order.last().copied()
    }

    /// Visited vertices in visitation order.
    #[must_use]
    pub fn as_slice(&self) -> &[Vertex] {
        &self.order
    }

    /// Forgets every visited vertex, keeping the allocation.
    pub fn clear(&mut self) {
        self.order.clear();
        self.visited.clear();
    }

    /// Consumes the path, returning the vertices in visitation order.
    #[must_use]
    pub fn into_vertices(self) -> Vec<Vertex> {
        self.order
    }
}
