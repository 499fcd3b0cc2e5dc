//! Search configuration.

use crate::tour::heuristic::HeuristicType;
use crate::tour::search::{EngineType, SearchLimits};
use crate::tour::vertex::Vertex;

/// Board side used when none is given.
pub const DEFAULT_BOARD_SIZE: usize = 8;

/// Everything needed to run one search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Side length of the board.
    pub board_size: usize,
    /// First vertex of the tour.
    pub start: Vertex,
    /// Move ordering applied at every node.
    pub heuristic: HeuristicType,
    /// Recursive or explicit-stack traversal.
    pub engine: EngineType,
    /// Node budget; `None` searches exhaustively.
    pub max_nodes: Option<usize>,
    /// Seed for `HeuristicType::Random`.
    pub seed: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            start: Vertex::default(),
            heuristic: HeuristicType::default(),
            engine: EngineType::default(),
            max_nodes: None,
            seed: 0,
        }
    }
}

impl SearchConfig {
    /// Default configuration for the given board and start.
    #[must_use]
    pub fn new(board_size: usize, start: Vertex) -> Self {
        Self {
            board_size,
            start,
            ..Self::default()
        }
    }

    /// Sets the move ordering.
    #[must_use]
    pub fn with_heuristic(mut self, heuristic: HeuristicType) -> Self {
        self.heuristic = heuristic;
        self
    }

    /// Sets the traversal engine.
    #[must_use]
    pub fn with_engine(mut self, engine: EngineType) -> Self {
        self.engine = engine;
        self
    }

    /// Sets the node budget.
    #[must_use]
    pub fn with_max_nodes(mut self, max_nodes: Option<usize>) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    /// Sets the shuffle seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Resource limits applied to the engine.
    #[must_use]
    pub const fn limits(&self) -> SearchLimits {
        SearchLimits {
            max_nodes: self.max_nodes,
        }
    }
}
