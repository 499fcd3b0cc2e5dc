#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Open knight's tour search.
//!
//! `graph` builds the knight-move graph, `heuristic` orders candidate moves,
//! and `search` runs the backtracking engines over them. `tour` holds the
//! validated result and its file format.

pub mod backtrack;
pub mod config;
pub mod error;
pub mod graph;
pub mod heuristic;
pub mod iterative;
pub mod path;
pub mod search;
pub mod tour;
pub mod vertex;

pub use config::SearchConfig;
pub use error::{TourDefect, TourError};
pub use graph::MoveGraph;
pub use heuristic::{HeuristicType, MoveOrdering};
pub use search::{
    EngineType, MAX_RECURSIVE_CELLS, SearchOutcome, SearchReport, SearchStats, find_tour, solve,
};
pub use tour::Tour;
pub use vertex::Vertex;
