//! Explicit-stack backtracking engine.
//!
//! Visits vertices in exactly the order `Recursive` does, and reports the same
//! counters, but keeps its frames on the heap so board size is not limited by
//! the thread's stack.

use crate::tour::error::TourError;
use crate::tour::graph::{MoveGraph, Neighbours};
use crate::tour::heuristic::MoveOrdering;
use crate::tour::search::{
    Expansion, Frontier, SearchLimits, SearchOutcome, SearchStats, Step, TourSearch,
};
use crate::tour::vertex::Vertex;

/// A vertex on the path together with the candidates it has yet to try.
#[derive(Debug)]
struct Frame {
    candidates: Neighbours,
    next: usize,
}

/// Depth-first search driven by a `Vec` of frames.
#[derive(Debug)]
pub struct Iterative<'g, H: MoveOrdering> {
    frontier: Frontier<'g, H>,
}

impl<'g, H: MoveOrdering> Iterative<'g, H> {
    /// Creates an engine over `graph` that orders moves with `heuristic`.
    pub fn new(graph: &'g MoveGraph, heuristic: H, limits: SearchLimits) -> Self {
        Self {
            frontier: Frontier::new(graph, heuristic, limits),
        }
    }

    /// Expands `vertex`, pushing a frame if it branches. Returns the final
    /// step if the search is over.
    fn descend(&mut self, stack: &mut Vec<Frame>, vertex: Vertex) -> Option<Step> {
        match self.frontier.expand(vertex) {
            Expansion::Complete => Some(Step::Found),
            Expansion::Aborted => Some(Step::Aborted),
            Expansion::DeadEnd => None,
            Expansion::Branch(candidates) => {
                stack.push(Frame {
                    candidates,
                    next: 0,
                });
                None
            }
        }
    }

    fn run(&mut self, start: Vertex) -> Step {
        let mut stack = Vec::with_capacity(self.frontier.graph.num_vertices());
        if let Some(step) = self.descend(&mut stack, start) {
            return step;
        }

        while let Some(frame) = stack.last_mut() {
            if let Some(&next) = frame.candidates.get(frame.next) {
                frame.next += 1;
                if let Some(step) = self.descend(&mut stack, next) {
                    return step;
                }
            } else {
                stack.pop();
                self.frontier.retreat();
            }
        }

        Step::DeadEnd
    }
}

impl<H: MoveOrdering> TourSearch for Iterative<'_, H> {
    fn search(&mut self, start: Vertex) -> Result<SearchOutcome, TourError> {
        self.frontier.reset(start)?;
        let step = self.run(start);
        Ok(self.frontier.conclude(step))
    }

    fn stats(&self) -> SearchStats {
        self.frontier.stats()
    }
}
