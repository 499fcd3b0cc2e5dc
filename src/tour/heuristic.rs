#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Move-ordering strategies.
//!
//! At every node the search hands its unvisited candidate moves to a
//! `MoveOrdering`, which arranges them into the order they are tried in. The
//! strategy is passed into the search explicitly, so alternative orderings can
//! be substituted without touching the traversal.
//!
//! This module provides:
//! - `Warnsdorff`: ascending raw degree in the move graph. Visited cells still
//!   count towards a candidate's degree. This is the classic static form of the
//!   rule and the default.
//! - `DynamicWarnsdorff`: ascending count of a candidate's *unvisited*
//!   neighbours. Finds different tours first, and usually with less
//!   backtracking. Only used when asked for.
//! - `FixedOrder`: no reordering; candidates stay in offset order.
//! - `RandomOrder`: a seeded shuffle. Reproducible for a fixed seed.
//!
//! All sorts are stable, so equal scores keep the offset order of the
//! neighbour list.

use crate::tour::graph::{MoveGraph, Neighbours};
use crate::tour::path::Path;
use crate::tour::vertex::Vertex;
use clap::ValueEnum;
use std::fmt::{Debug, Display};

/// A policy deciding the order in which candidate moves are explored.
pub trait MoveOrdering: Debug {
    /// Scores `candidate`; lower scores are tried first.
    fn score(&self, graph: &MoveGraph, path: &Path, candidate: Vertex) -> usize;

    /// Reorders `candidates` in place into exploration order.
    ///
    /// The default is a stable ascending sort by [`MoveOrdering::score`].
    fn order(&mut self, graph: &MoveGraph, path: &Path, candidates: &mut Neighbours) {
        candidates.sort_by_key(|&v| self.score(graph, path, v));
    }
}

impl<T: MoveOrdering + ?Sized> MoveOrdering for &mut T {
    fn score(&self, graph: &MoveGraph, path: &Path, candidate: Vertex) -> usize {
        (**self).score(graph, path, candidate)
    }

    fn order(&mut self, graph: &MoveGraph, path: &Path, candidates: &mut Neighbours) {
        (**self).order(graph, path, candidates);
    }
}

/// Warnsdorff's rule over raw graph degree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Warnsdorff;

impl MoveOrdering for Warnsdorff {
    fn score(&self, graph: &MoveGraph, _: &Path, candidate: Vertex) -> usize {
        graph.degree(candidate)
    }
}

/// Warnsdorff's rule over the number of onward moves still open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DynamicWarnsdorff;

impl MoveOrdering for DynamicWarnsdorff {
    fn score(&self, graph: &MoveGraph, path: &Path, candidate: Vertex) -> usize {
        graph
            .neighbours(candidate)
            .iter()
            .filter(|&&v| !path.contains(v))
            .count()
    }
}

/// Leaves candidates in offset-enumeration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FixedOrder;

impl MoveOrdering for FixedOrder {
    fn score(&self, _: &MoveGraph, _: &Path, _: Vertex) -> usize {
        0
    }

    fn order(&mut self, _: &MoveGraph, _: &Path, _: &mut Neighbours) {}
}

/// Shuffles candidates with a seeded generator.
#[derive(Debug, Clone)]
pub struct RandomOrder {
    seed: u64,
    rng: fastrand::Rng,
}

impl RandomOrder {
    /// Creates a shuffler; the same seed always yields the same sequence of orders.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// Seed the generator was created with.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }
}

impl MoveOrdering for RandomOrder {
    fn score(&self, _: &MoveGraph, _: &Path, _: Vertex) -> usize {
        0
    }

    fn order(&mut self, _: &MoveGraph, _: &Path, candidates: &mut Neighbours) {
        self.rng.shuffle(candidates);
    }
}

/// Enum-dispatched wrapper over the available orderings, built from configuration.
#[derive(Debug, Clone)]
pub enum HeuristicImpls {
    /// See [`Warnsdorff`].
    Warnsdorff(Warnsdorff),
    /// See [`DynamicWarnsdorff`].
    DynamicWarnsdorff(DynamicWarnsdorff),
    /// See [`FixedOrder`].
    FixedOrder(FixedOrder),
    /// See [`RandomOrder`].
    RandomOrder(RandomOrder),
}

impl MoveOrdering for HeuristicImpls {
    fn score(&self, graph: &MoveGraph, path: &Path, candidate: Vertex) -> usize {
        match self {
            Self::Warnsdorff(h) => h.score(graph, path, candidate),
            Self::DynamicWarnsdorff(h) => h.score(graph, path, candidate),
            Self::FixedOrder(h) => h.score(graph, path, candidate),
            Self::RandomOrder(h) => h.score(graph, path, candidate),
        }
    }

    fn order(&mut self, graph: &MoveGraph, path: &Path, candidates: &mut Neighbours) {
        match self {
            Self::Warnsdorff(h) => h.order(graph, path, candidates),
            Self::DynamicWarnsdorff(h) => h.order(graph, path, candidates),
            Self::FixedOrder(h) => h.order(graph, path, candidates),
            Self::RandomOrder(h) => h.order(graph, path, candidates),
        }
    }
}

/// Names of the available move orderings.
#[derive(Debug, Clone, PartialEq, Eq, Copy, Hash, Default, ValueEnum)]
pub enum HeuristicType {
    /// Ascending raw degree
    #[default]
    Warnsdorff,
    /// Ascending unvisited degree
    DynamicWarnsdorff,
    /// Offset order, no heuristic
    Fixed,
    /// Seeded random shuffle
    Random,
}

impl Display for HeuristicType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Warnsdorff => write!(f, "warnsdorff"),
            Self::DynamicWarnsdorff => write!(f, "dynamic-warnsdorff"),
            Self::Fixed => write!(f, "fixed"),
            Self::Random => write!(f, "random"),
        }
    }
}

impl HeuristicType {
    /// Converts the `HeuristicType` to a concrete `HeuristicImpls`.
    /// `seed` is only consulted by `Random`.
    #[must_use]
    pub fn to_impl(self, seed: u64) -> HeuristicImpls {
        match self {
            Self::Warnsdorff => HeuristicImpls::Warnsdorff(Warnsdorff),
            Self::DynamicWarnsdorff => HeuristicImpls::DynamicWarnsdorff(DynamicWarnsdorff),
            Self::Fixed => HeuristicImpls::FixedOrder(FixedOrder),
            Self::Random => HeuristicImpls::RandomOrder(RandomOrder::new(seed)),
        }
    }
}
