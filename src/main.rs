//! # knights_tour
//!
//! `knights_tour` is a command-line solver for the open knight's tour: a
//! sequence of knight moves visiting every cell of an N x N board exactly
//! once from a chosen starting cell.
//!
//! The search is an exhaustive depth-first backtracking search whose move
//! order follows Warnsdorff's rule, so it either returns the first tour in
//! that order or proves that no tour exists from the start cell.
//!
//! ## Usage
//!
//! ```sh
//! knights_tour [OPTIONS] [SUBCOMMAND]
//! ```
//!
//! Without a subcommand a tour is searched for using the options given.
//!
//! ### Subcommands
//!
//! 1.  **`solve`**: Search for a tour.
//!     ```sh
//!     knights_tour solve --board-size 8 --start-row 0 --start-col 0 --output solutions/
//!     ```
//!
//! 2.  **`verify`**: Validate a tour file, or every `.txt` file in a directory.
//!     ```sh
//!     knights_tour verify solutions/
//!     ```
//!
//! 3.  **`completions`**: Print a shell completion script.
//!
//! ### Search Options
//!
//! -   `-n, --board-size <N>`: Side length of the board (default: `8`).
//! -   `-r, --start-row <ROW>` / `-c, --start-col <COL>`: Starting cell (default: `0,0`).
//! -   `--heuristic <NAME>`: `warnsdorff` (default), `dynamic-warnsdorff`, `fixed` or `random`.
//! -   `--engine <NAME>`: `recursive` (default) or `iterative`.
//! -   `--max-nodes <N>`: Abort after expanding `N` nodes.
//! -   `--seed <N>`: Seed for the `random` heuristic.
//! -   `-o, --output <PATH>`: Write the tour, one `row,col` per line.
//! -   `--visualize`: Print the board with visiting step numbers.
//! -   `-p, --print-solution`: Print the tour.
//! -   `--no-verify`, `--no-stats`: Skip re-validation or the statistics table.
//! -   `-d, --debug`: Debug logging.

use clap::Parser;

mod command_line;

use command_line::cli::{Cli, run};

/// Global allocator using `tikv-jemallocator`, which also backs the memory
/// statistics in the report.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() -> anyhow::Result<()> {
    run(Cli::parse())
}
