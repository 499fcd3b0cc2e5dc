//! Recursive backtracking engine.

use crate::tour::error::TourError;
use crate::tour::graph::MoveGraph;
use crate::tour::heuristic::MoveOrdering;
use crate::tour::search::{
    Expansion, Frontier, SearchLimits, SearchOutcome, SearchStats, Step, TourSearch,
};
use crate::tour::vertex::Vertex;

/// Depth-first search using one call frame per path vertex.
///
/// Recursion depth equals the tour length, `N * N` frames for an `N` x `N`
/// board. Use [`crate::tour::iterative::Iterative`] where that is too deep.
#[derive(Debug)]
pub struct Recursive<'g, H: MoveOrdering> {
    frontier: Frontier<'g, H>,
}

impl<'g, H: MoveOrdering> Recursive<'g, H> {
    /// Creates an engine over `graph` that orders moves with `heuristic`.
    pub fn new(graph: &'g MoveGraph, heuristic: H, limits: SearchLimits) -> Self {
        Self {
            frontier: Frontier::new(graph, heuristic, limits),
        }
    }

    /// Extends the path through `current`, trying its candidates in order and
    /// returning at the first one that completes a tour.
    fn traverse(&mut self, current: Vertex) -> Step {
        match self.frontier.expand(current) {
            Expansion::Complete => Step::Found,
            Expansion::DeadEnd => Step::DeadEnd,
            Expansion::Aborted => Step::Aborted,
            Expansion::Branch(candidates) => {
                for next in candidates {
                    match self.traverse(next) {
                        Step::DeadEnd => {}
                        step => return step,
                    }
                }
                self.frontier.retreat();
                Step::DeadEnd
            }
        }
    }
}

impl<H: MoveOrdering> TourSearch for Recursive<'_, H> {
    fn search(&mut self, start: Vertex) -> Result<SearchOutcome, TourError> {
        self.frontier.reset(start)?;
        let step = self.traverse(start);
        Ok(self.frontier.conclude(step))
    }

    fn stats(&self) -> SearchStats {
        self.frontier.stats()
    }
}
