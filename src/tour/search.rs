#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The backtracking tour search.
//!
//! The search is a depth-first walk over the move graph. At every node the
//! unvisited neighbours of the current vertex are ordered by a
//! [`MoveOrdering`] and tried in turn; the first branch that completes a tour
//! ends the whole search, so no sibling of a successful branch is ever
//! expanded. A branch with no unvisited neighbours is a dead end and control
//! returns to the caller, which tries its next candidate or becomes a dead end
//! itself.
//!
//! Because the walk is exhaustive, `SearchOutcome::NotFound` means no open
//! tour exists from the start vertex at all. A node budget can bound the
//! work; running out of budget is reported as `SearchOutcome::Aborted`, which
//! says nothing about whether a tour exists.
//!
//! Two engines implement [`TourSearch`] with identical visiting order:
//! - `Recursive` uses the call stack, one frame per path vertex.
//! - `Iterative` keeps an explicit stack of `(candidates, next)` frames and is
//!   suitable for boards whose depth would strain the call stack.

use crate::tour::backtrack::Recursive;
use crate::tour::config::SearchConfig;
use crate::tour::error::TourError;
use crate::tour::graph::{MoveGraph, Neighbours};
use crate::tour::heuristic::MoveOrdering;
use crate::tour::iterative::Iterative;
use crate::tour::path::Path;
use crate::tour::tour::Tour;
use crate::tour::vertex::Vertex;
use clap::ValueEnum;
use log::{debug, info, warn};
use std::fmt::Display;
use std::time::{Duration, Instant};

/// Bounds on the work a single search may do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchLimits {
    /// Maximum number of nodes to expand before giving up.
    pub max_nodes: Option<usize>,
}

/// Counters collected during a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchStats {
    /// Vertices expanded, including the start.
    pub nodes: usize,
    /// Expansions that found no unvisited neighbour.
    pub dead_ends: usize,
    /// Expansions abandoned after every candidate failed.
    pub backtracks: usize,
    /// Longest path reached.
    pub max_depth: usize,
}

/// Result of a search that was able to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A complete tour from the requested start.
    Found(Tour),
    /// Every ordering was exhausted; no tour exists from the start.
    NotFound,
    /// The node budget ran out before the search finished.
    Aborted {
        /// Nodes expanded when the search stopped.
        nodes: usize,
    },
}

impl SearchOutcome {
    /// The tour, if one was found.
    #[must_use]
    pub const fn tour(&self) -> Option<&Tour> {
        match self {
            Self::Found(tour) => Some(tour),
            _ => None,
        }
    }

    /// Consumes the outcome, returning the tour if one was found.
    #[must_use]
    pub fn into_tour(self) -> Option<Tour> {
        match self {
            Self::Found(tour) => Some(tour),
            _ => None,
        }
    }

    /// Whether a tour was found.
    #[must_use]
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// Whether the search proved no tour exists.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    /// Whether the node budget ran out.
    #[must_use]
    pub const fn is_aborted(&self) -> bool {
        matches!(self, Self::Aborted { .. })
    }
}

impl Display for SearchOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Found(_) => write!(f, "TOUR FOUND"),
            Self::NotFound => write!(f, "NO TOUR FOUND"),
            Self::Aborted { nodes } => write!(f, "SEARCH ABORTED after {nodes} nodes"),
        }
    }
}

/// A search engine bound to one move graph and one move ordering.
pub trait TourSearch {
    /// Searches for an open tour starting at `start`.
    ///
    /// # Errors
    ///
    /// `TourError::InvalidStart` if `start` is not on the board.
    fn search(&mut self, start: Vertex) -> Result<SearchOutcome, TourError>;

    /// Counters from the most recent call to [`TourSearch::search`].
    fn stats(&self) -> SearchStats;
}

/// Names of the available engines.
#[derive(Debug, Clone, PartialEq, Eq, Copy, Hash, Default, ValueEnum)]
pub enum EngineType {
    /// Call-stack recursion
    #[default]
    Recursive,
    /// Explicit frame stack
    Iterative,
}

/// Largest board, in cells, searched with call-stack recursion. Deeper paths
/// run on `Iterative` so a valid board size cannot overflow the thread stack.
pub const MAX_RECURSIVE_CELLS: usize = 4096;

impl EngineType {
    /// The engine actually used for a board of `cells` vertices.
    #[must_use]
    pub const fn for_board(self, cells: usize) -> Self {
        match self {
            Self::Recursive if cells > MAX_RECURSIVE_CELLS => Self::Iterative,
            engine => engine,
        }
    }
}

impl Display for EngineType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Recursive => write!(f, "recursive"),
            Self::Iterative => write!(f, "iterative"),
        }
    }
}

/// How a finished (sub)search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    Found,
    DeadEnd,
    Aborted,
}

/// What expanding a single vertex produced.
#[derive(Debug)]
pub(crate) enum Expansion {
    /// The vertex completed the tour.
    Complete,
    /// No unvisited neighbour; the vertex was not kept on the path.
    DeadEnd,
    /// Budget exhausted.
    Aborted,
    /// Candidates to try, already ordered. The vertex stays on the path until
    /// `Frontier::retreat`.
    Branch(Neighbours),
}

/// Path, ordering and counters shared by both engines.
#[derive(Debug)]
pub(crate) struct Frontier<'g, H> {
    pub(crate) graph: &'g MoveGraph,
    heuristic: H,
    limits: SearchLimits,
    path: Path,
    stats: SearchStats,
}

impl<'g, H: MoveOrdering> Frontier<'g, H> {
    pub(crate) fn new(graph: &'g MoveGraph, heuristic: H, limits: SearchLimits) -> Self {
        Self {
            graph,
            heuristic,
            limits,
            path: Path::new(graph.board_size()),
            stats: SearchStats::default(),
        }
    }

    /// Prepares for a fresh search from `start`.
    pub(crate) fn reset(&mut self, start: Vertex) -> Result<(), TourError> {
        check_start(self.graph, start)?;
        self.path.clear();
        self.stats = SearchStats::default();
        Ok(())
    }

    pub(crate) const fn stats(&self) -> SearchStats {
        self.stats
    }

    pub(crate) fn expand(&mut self, current: Vertex) -> Expansion {
        self.stats.nodes += 1;
        if self
            .limits
            .max_nodes
            .is_some_and(|max| self.stats.nodes > max)
        {
            return Expansion::Aborted;
        }

        self.path.push(current);
        self.stats.max_depth = self.stats.max_depth.max(self.path.len());
        if self.path.len() == self.graph.num_vertices() {
            return Expansion::Complete;
        }

        let mut candidates: Neighbours = self
            .graph
            .neighbours(current)
            .iter()
            .copied()
            .filter(|&v| !self.path.contains(v))
            .collect();

        if candidates.is_empty() {
            self.path.pop();
            self.stats.dead_ends += 1;
            return Expansion::DeadEnd;
        }

        self.heuristic.order(self.graph, &self.path, &mut candidates);
        Expansion::Branch(candidates)
    }

    /// Abandons the most recent branch vertex after all its candidates failed.
    pub(crate) fn retreat(&mut self) {
        self.path.pop();
        self.stats.backtracks += 1;
    }

    pub(crate) fn conclude(&mut self, step: Step) -> SearchOutcome {
        match step {
            Step::Found => {
                let board_size = self.graph.board_size();
                let path = std::mem::replace(&mut self.path, Path::new(board_size));
                SearchOutcome::Found(Tour::from_search(board_size, path.into_vertices()))
            }
            Step::DeadEnd => SearchOutcome::NotFound,
            Step::Aborted => SearchOutcome::Aborted {
                nodes: self.stats.nodes,
            },
        }
    }
}

/// Rejects a start vertex that is not on `graph`'s board.
///
/// # Errors
///
/// `TourError::InvalidStart`.
pub fn check_start(graph: &MoveGraph, start: Vertex) -> Result<(), TourError> {
    if graph.contains(start) {
        Ok(())
    } else {
        Err(TourError::InvalidStart {
            start,
            board_size: graph.board_size(),
        })
    }
}

/// Finds the first open tour from `start` in `heuristic` order, searching
/// exhaustively with the recursive engine, or the iterative one on boards
/// above [`MAX_RECURSIVE_CELLS`].
///
/// # Errors
///
/// `TourError::InvalidStart` if `start` is not on the board. Not finding a
/// tour is `Ok(SearchOutcome::NotFound)`.
pub fn find_tour<H: MoveOrdering>(
    graph: &MoveGraph,
    start: Vertex,
    heuristic: H,
) -> Result<SearchOutcome, TourError> {
    match EngineType::Recursive.for_board(graph.num_vertices()) {
        EngineType::Recursive => {
            Recursive::new(graph, heuristic, SearchLimits::default()).search(start)
        }
        EngineType::Iterative => {
            Iterative::new(graph, heuristic, SearchLimits::default()).search(start)
        }
    }
}

/// A finished search with its counters and timing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReport {
    /// How the search ended.
    pub outcome: SearchOutcome,
    /// Counters collected on the way.
    pub stats: SearchStats,
    /// Wall-clock time spent searching, excluding graph construction.
    pub elapsed: Duration,
    /// Engine that ran, after the board-size fallback.
    pub engine: EngineType,
}

/// Validates `config`, builds the move graph and runs the configured engine.
///
/// # Errors
///
/// `TourError::InvalidBoardSize` or `TourError::InvalidStart`, both raised
/// before any search work is done.
pub fn solve(config: &SearchConfig) -> Result<SearchReport, TourError> {
    let graph = MoveGraph::new(config.board_size)?;
    check_start(&graph, config.start)?;

    let heuristic = config.heuristic.to_impl(config.seed);
    let limits = config.limits();
    let engine = config.engine.for_board(graph.num_vertices());
    if engine != config.engine {
        info!(
            "{n}x{n} board exceeds {MAX_RECURSIVE_CELLS} cells, using the {engine} engine",
            n = config.board_size
        );
    }
    debug!(
        "searching {n}x{n} board from {start} ({heuristic} ordering, {engine} engine, budget {budget:?})",
        n = config.board_size,
        start = config.start,
        heuristic = config.heuristic,
        budget = config.max_nodes,
    );

    let time = Instant::now();
    let (outcome, stats) = match engine {
        EngineType::Recursive => run(Recursive::new(&graph, heuristic, limits), config.start)?,
        EngineType::Iterative => run(Iterative::new(&graph, heuristic, limits), config.start)?,
    };
    let elapsed = time.elapsed();

    match &outcome {
        SearchOutcome::Found(_) => info!(
            "tour found from {} after {} nodes in {elapsed:?}",
            config.start, stats.nodes
        ),
        SearchOutcome::NotFound => info!(
            "no tour exists from {}: {} nodes exhausted in {elapsed:?}",
            config.start, stats.nodes
        ),
        SearchOutcome::Aborted { nodes } => warn!(
            "search from {} aborted after {nodes} nodes; existence undecided",
            config.start
        ),
    }

    Ok(SearchReport {
        outcome,
        stats,
        elapsed,
        engine,
    })
}

fn run<S: TourSearch>(
    mut engine: S,
    start: Vertex,
) -> Result<(SearchOutcome, SearchStats), TourError> {
    let outcome = engine.search(start)?;
    Ok((outcome, engine.stats()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tour::heuristic::{DynamicWarnsdorff, FixedOrder, HeuristicType, Warnsdorff};

    fn assert_valid_tour(tour: &Tour, board_size: usize, start: Vertex) {
        assert_eq!(tour.board_size(), board_size);
        assert_eq!(tour.len(), board_size * board_size);
        assert_eq!(tour.start(), start);
        assert!(Tour::new(board_size, tour.vertices().to_vec()).is_ok());
    }

    fn solve_default(board_size: usize, start: (usize, usize)) -> SearchReport {
        solve(&SearchConfig::new(board_size, Vertex::from(start))).unwrap()
    }

    #[test]
    fn test_standard_board_from_corner() {
        let report = solve_default(8, (0, 0));
        let tour = report.outcome.tour().unwrap();
        assert_valid_tour(tour, 8, Vertex::new(0, 0));
        assert_eq!(report.stats.nodes, 5909);
        assert_eq!(report.stats.max_depth, 64);
    }

    #[test]
    fn test_standard_board_from_opposite_corner() {
        let report = solve_default(8, (7, 7));
        let tour = report.outcome.tour().unwrap();
        assert_valid_tour(tour, 8, Vertex::new(7, 7));
        assert_eq!(&tour.vertices()[..3], &[Vertex::new(7, 7), Vertex::new(6, 5), Vertex::new(7, 3)]);
    }

    #[test]
    fn test_standard_board_from_centre() {
        let report = solve_default(8, (3, 4));
        assert_valid_tour(report.outcome.tour().unwrap(), 8, Vertex::new(3, 4));
    }

    #[test]
    fn test_single_cell_board() {
        let report = solve_default(1, (0, 0));
        let tour = report.outcome.into_tour().unwrap();
        assert_eq!(tour.vertices(), &[Vertex::new(0, 0)]);
        assert_eq!(report.stats.nodes, 1);
    }

    #[test]
    fn test_two_by_two_has_no_tour() {
        let report = solve_default(2, (0, 0));
        assert_eq!(report.outcome, SearchOutcome::NotFound);
        assert_eq!(report.stats.nodes, 1);
        assert_eq!(report.stats.dead_ends, 1);
    }

    #[test]
    fn test_three_by_three_has_no_tour() {
        assert!(solve_default(3, (0, 0)).outcome.is_not_found());
        assert!(solve_default(3, (1, 1)).outcome.is_not_found());
    }

    #[test]
    fn test_four_by_four_exhausts() {
        let report = solve_default(4, (0, 0));
        assert!(report.outcome.is_not_found());
        assert_eq!(report.stats.nodes, 2223);
    }

    #[test]
    fn test_five_by_five_pinned() {
        let report = solve_default(5, (0, 0));
        let expected: Vec<Vertex> = [
            (0, 0), (2, 1), (4, 0), (3, 2), (4, 4), (2, 3), (0, 4), (1, 2), (2, 0), (0, 1),
            (1, 3), (3, 4), (4, 2), (3, 0), (1, 1), (0, 3), (2, 4), (4, 3), (3, 1), (1, 0),
            (0, 2), (1, 4), (3, 3), (4, 1), (2, 2),
        ]
        .into_iter()
        .map(Vertex::from)
        .collect();
        assert_eq!(report.outcome.tour().unwrap().vertices(), expected.as_slice());
        assert_eq!(report.stats.nodes, 25);
        assert_eq!(report.stats.backtracks, 0);
    }

    #[test]
    fn test_five_by_five_every_start() {
        // a 5x5 tour has 13 cells of the corner colour and 12 of the other,
        // so it can only start on a corner-coloured cell
        for row in 0..5 {
            for col in 0..5 {
                let start = Vertex::new(row, col);
                let report = solve_default(5, (row, col));
                if (row + col) % 2 == 0 {
                    assert_valid_tour(report.outcome.tour().unwrap(), 5, start);
                } else {
                    assert!(report.outcome.is_not_found(), "start {start}");
                    assert!(report.stats.backtracks > 0);
                }
            }
        }
    }

    #[test]
    fn test_five_by_five_node_counts() {
        assert_eq!(solve_default(5, (2, 2)).stats.nodes, 25);
        assert_eq!(solve_default(5, (0, 2)).stats.nodes, 58);
    }

    #[test]
    fn test_engine_for_board() {
        assert_eq!(EngineType::Recursive.for_board(64), EngineType::Recursive);
        assert_eq!(
            EngineType::Recursive.for_board(MAX_RECURSIVE_CELLS),
            EngineType::Recursive
        );
        assert_eq!(
            EngineType::Recursive.for_board(MAX_RECURSIVE_CELLS + 1),
            EngineType::Iterative
        );
        assert_eq!(EngineType::Iterative.for_board(1), EngineType::Iterative);
    }

    #[test]
    fn test_large_board_uses_iterative() {
        let config = SearchConfig::new(200, Vertex::new(0, 0))
            .with_heuristic(HeuristicType::DynamicWarnsdorff);
        assert_eq!(config.engine, EngineType::Recursive);

        let report = solve(&config).unwrap();
        assert_eq!(report.engine, EngineType::Iterative);
        assert_valid_tour(report.outcome.tour().unwrap(), 200, Vertex::new(0, 0));
        assert_eq!(report.stats.nodes, 40_000);

        let graph = MoveGraph::new(200).unwrap();
        let outcome = find_tour(&graph, Vertex::new(0, 0), DynamicWarnsdorff).unwrap();
        assert_eq!(outcome, report.outcome);
    }

    #[test]
    fn test_small_board_keeps_engine() {
        assert_eq!(solve_default(8, (0, 0)).engine, EngineType::Recursive);
        let config = SearchConfig::new(8, Vertex::new(0, 0)).with_engine(EngineType::Iterative);
        assert_eq!(solve(&config).unwrap().engine, EngineType::Iterative);
    }

    #[test]
    fn test_zero_board_rejected() {
        let err = solve(&SearchConfig::new(0, Vertex::new(0, 0))).unwrap_err();
        assert!(matches!(err, TourError::InvalidBoardSize(0)));
    }

    #[test]
    fn test_off_board_start_rejected() {
        let err = solve(&SearchConfig::new(8, Vertex::new(9, 9))).unwrap_err();
        assert!(matches!(
            err,
            TourError::InvalidStart { board_size: 8, .. }
        ));

        let graph = MoveGraph::new(8).unwrap();
        assert!(find_tour(&graph, Vertex::new(0, 8), Warnsdorff).is_err());
    }

    #[test]
    fn test_deterministic() {
        let a = solve_default(8, (0, 0));
        let b = solve_default(8, (0, 0));
        assert_eq!(a.outcome, b.outcome);
        assert_eq!(a.stats, b.stats);
    }

    #[test]
    fn test_engines_agree() {
        for (n, start) in [(4, (0, 0)), (5, (0, 0)), (6, (0, 0)), (8, (0, 0)), (8, (7, 7))] {
            let base = SearchConfig::new(n, Vertex::from(start));
            let recursive = solve(&base.clone().with_engine(EngineType::Recursive)).unwrap();
            let iterative = solve(&base.with_engine(EngineType::Iterative)).unwrap();
            assert_eq!(recursive.outcome, iterative.outcome, "board {n} from {start:?}");
            assert_eq!(recursive.stats, iterative.stats, "board {n} from {start:?}");
        }
    }

    #[test]
    fn test_node_budget() {
        let config = SearchConfig::new(6, Vertex::new(0, 0));
        let exhaustive = solve(&config).unwrap();
        assert!(exhaustive.outcome.is_found());
        assert_eq!(exhaustive.stats.nodes, 1523);

        for engine in [EngineType::Recursive, EngineType::Iterative] {
            let short = solve(&config.clone().with_engine(engine).with_max_nodes(Some(1522))).unwrap();
            assert_eq!(short.outcome, SearchOutcome::Aborted { nodes: 1523 });

            let exact = solve(&config.clone().with_engine(engine).with_max_nodes(Some(1523))).unwrap();
            assert_eq!(exact.outcome, exhaustive.outcome);
        }
    }

    #[test]
    fn test_aborted_is_not_not_found() {
        let config = SearchConfig::new(8, Vertex::new(0, 0))
            .with_heuristic(HeuristicType::Fixed)
            .with_max_nodes(Some(1000));
        let report = solve(&config).unwrap();
        assert!(report.outcome.is_aborted());
        assert!(!report.outcome.is_not_found());
        assert!(report.outcome.tour().is_none());
    }

    #[test]
    fn test_find_tour_with_strategies() {
        let graph = MoveGraph::new(5).unwrap();
        let start = Vertex::new(0, 0);

        let fixed = find_tour(&graph, start, FixedOrder).unwrap();
        assert_valid_tour(fixed.tour().unwrap(), 5, start);

        let graph = MoveGraph::new(8).unwrap();
        let mut engine = Recursive::new(&graph, DynamicWarnsdorff, SearchLimits::default());
        let outcome = engine.search(start).unwrap();
        assert_valid_tour(outcome.tour().unwrap(), 8, start);
        assert_eq!(engine.stats().nodes, 64);
    }

    #[test]
    fn test_engine_reusable() {
        let graph = MoveGraph::new(5).unwrap();
        let mut engine = Iterative::new(&graph, Warnsdorff, SearchLimits::default());
        let first = engine.search(Vertex::new(0, 0)).unwrap();
        let stats = engine.stats();
        let again = engine.search(Vertex::new(0, 0)).unwrap();
        assert_eq!(first, again);
        assert_eq!(stats, engine.stats());

        let centre = engine.search(Vertex::new(2, 2)).unwrap();
        assert_valid_tour(centre.tour().unwrap(), 5, Vertex::new(2, 2));
    }

    #[test]
    fn test_random_order_reproducible() {
        let config = SearchConfig::new(6, Vertex::new(0, 0))
            .with_heuristic(HeuristicType::Random)
            .with_seed(1234)
            .with_max_nodes(Some(50_000));
        let a = solve(&config).unwrap();
        let b = solve(&config).unwrap();
        assert_eq!(a.outcome, b.outcome);
        assert_eq!(a.stats, b.stats);
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(SearchOutcome::NotFound.to_string(), "NO TOUR FOUND");
        assert_eq!(
            SearchOutcome::Aborted { nodes: 12 }.to_string(),
            "SEARCH ABORTED after 12 nodes"
        );
    }
}
