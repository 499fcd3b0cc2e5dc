#![allow(clippy::cast_precision_loss)]

use anyhow::{Context, bail};
use clap::{ArgAction, Args, CommandFactory, Parser, Subcommand};
use knights_tour::tour::config::{DEFAULT_BOARD_SIZE, SearchConfig};
use knights_tour::tour::heuristic::HeuristicType;
use knights_tour::tour::search::{EngineType, SearchOutcome, SearchReport, solve};
use knights_tour::tour::tour::Tour;
use knights_tour::tour::vertex::Vertex;
use log::warn;
use std::path::{Path, PathBuf};
use tikv_jemalloc_ctl::{epoch, stats};

/// Defines the command-line interface for the knight's tour solver.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(name = "knights_tour", version, about = "An open knight's tour solver")]
pub(crate) struct Cli {
    /// Specifies the subcommand to execute. Without one, a tour is searched
    /// for using the options below.
    #[clap(subcommand)]
    pub command: Option<Commands>,

    /// Search options used when no subcommand is given.
    #[command(flatten)]
    pub solve: SolveOptions,
}

/// Enumerates the available subcommands.
#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Search for an open tour.
    Solve {
        #[command(flatten)]
        options: SolveOptions,
    },

    /// Check tour files written by `solve`.
    /// Accepts a single file or a directory, in which every `.txt` file is checked.
    Verify {
        /// Tour file or directory of tour files.
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Options shared by every subcommand.
#[derive(Args, Debug, Default, Clone)]
pub(crate) struct CommonOptions {
    /// Enable debug logging. `RUST_LOG` is honoured otherwise.
    #[arg(short, long, default_value_t = false)]
    pub(crate) debug: bool,
}

/// Options for a single search.
#[derive(Args, Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub(crate) struct SolveOptions {
    /// Side length of the board.
    #[arg(short = 'n', long, default_value_t = DEFAULT_BOARD_SIZE)]
    pub(crate) board_size: usize,

    /// Row of the starting cell, counted from 0.
    #[arg(short = 'r', long, default_value_t = 0)]
    pub(crate) start_row: usize,

    /// Column of the starting cell, counted from 0.
    #[arg(short = 'c', long, default_value_t = 0)]
    pub(crate) start_col: usize,

    /// Order in which candidate moves are tried.
    #[arg(long, default_value_t = HeuristicType::Warnsdorff)]
    pub(crate) heuristic: HeuristicType,

    /// Traversal engine.
    #[arg(long, default_value_t = EngineType::Recursive)]
    pub(crate) engine: EngineType,

    /// Give up after expanding this many nodes.
    #[arg(long)]
    pub(crate) max_nodes: Option<usize>,

    /// Seed for the random heuristic.
    #[arg(long, default_value_t = 0)]
    pub(crate) seed: u64,

    /// Write the tour here. A directory receives `{N}x{N}_{row}-{col}.txt`.
    #[arg(short, long)]
    pub(crate) output: Option<PathBuf>,

    /// Print the board with the step each cell was visited on.
    #[arg(long, default_value_t = false)]
    pub(crate) visualize: bool,

    /// Print the tour, one `row,col` per line.
    #[arg(short, long, default_value_t = false)]
    pub(crate) print_solution: bool,

    /// Skip re-validating a found tour.
    #[arg(long = "no-verify", action = ArgAction::SetFalse)]
    pub(crate) verify: bool,

    /// Skip the statistics table.
    #[arg(long = "no-stats", action = ArgAction::SetFalse)]
    pub(crate) stats: bool,

    #[command(flatten)]
    pub(crate) common: CommonOptions,
}

impl SolveOptions {
    /// Converts the options into the library's search configuration.
    pub(crate) fn to_config(&self) -> SearchConfig {
        SearchConfig::new(
            self.board_size,
            Vertex::new(self.start_row, self.start_col),
        )
        .with_heuristic(self.heuristic)
        .with_engine(self.engine)
        .with_max_nodes(self.max_nodes)
        .with_seed(self.seed)
    }
}

/// Dispatches a parsed command line.
///
/// # Errors
///
/// Invalid search input, I/O failures, or tour files that fail verification.
pub(crate) fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::Solve { options }) => {
            init_logging(options.common.debug);
            solve_and_report(&options)
        }
        Some(Commands::Verify { path, common }) => {
            init_logging(common.debug);
            verify_path(&path).map(|_| ())
        }
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
        None => {
            init_logging(cli.solve.common.debug);
            solve_and_report(&cli.solve)
        }
    }
}

/// Installs the `env_logger` backend for the `log` facade.
fn init_logging(debug: bool) {
    let env = env_logger::Env::default().default_filter_or(if debug { "debug" } else { "warn" });
    // a logger may already be installed when running under the test harness
    let _ = env_logger::Builder::from_env(env).try_init();
}

/// Runs one search and reports the outcome, statistics and any requested output.
///
/// # Errors
///
/// Invalid board size or start, a found tour failing verification, or a
/// failure writing the output file.
pub(crate) fn solve_and_report(options: &SolveOptions) -> anyhow::Result<()> {
    let config = options.to_config();
    println!(
        "Solving: {n}x{n} board from {start}",
        n = config.board_size,
        start = config.start
    );

    let report = solve(&config)?;

    if options.verify {
        verify_outcome(&report.outcome, config.start)?;
    }

    if options.stats {
        print_stats(&config, &report, memory_usage());
    }

    match &report.outcome {
        SearchOutcome::Found(tour) => {
            if options.print_solution {
                println!("{tour}");
            }
            if options.visualize {
                println!("{}", tour.to_grid_string());
            }
            if let Some(output) = &options.output {
                let path = resolve_output(output, tour);
                tour.write_to(&path)
                    .with_context(|| format!("Unable to write {}", path.display()))?;
                println!("Tour written to: {}", path.display());
            }
        }
        SearchOutcome::NotFound | SearchOutcome::Aborted { .. } => {
            if let Some(output) = &options.output {
                warn!("no tour to write to {}", output.display());
            }
        }
    }

    println!("\n{}", report.outcome);
    Ok(())
}

/// Re-checks a found tour against the tour invariant and the requested start.
///
/// # Errors
///
/// If the tour is not a valid open tour from `start`.
pub(crate) fn verify_outcome(outcome: &SearchOutcome, start: Vertex) -> anyhow::Result<()> {
    if let Some(tour) = outcome.tour() {
        Tour::new(tour.board_size(), tour.vertices().to_vec())
            .and_then(|tour| tour.check_start(start))
            .context("Tour failed verification")?;
        println!("Verified: true");
    }
    Ok(())
}

/// Where `--output` should write: the path itself, or the conventional file
/// name inside it when it names a directory.
pub(crate) fn resolve_output(output: &Path, tour: &Tour) -> PathBuf {
    if output.is_dir() {
        output.join(tour.file_name())
    } else {
        output.to_path_buf()
    }
}

/// Verifies a tour file, or every `.txt` file under a directory.
/// Returns the number of files checked.
///
/// # Errors
///
/// If the path does not exist or any file fails verification.
pub(crate) fn verify_path(path: &Path) -> anyhow::Result<usize> {
    if !path.exists() {
        bail!("Path does not exist: {}", path.display());
    }

    let files: Vec<PathBuf> = if path.is_dir() {
        walkdir::WalkDir::new(path)
            .sort_by_file_name()
            .into_iter()
            .filter_map(Result::ok)
            .map(walkdir::DirEntry::into_path)
            .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "txt"))
            .collect()
    } else {
        vec![path.to_path_buf()]
    };

    let mut failed = 0;
    for file in &files {
        match Tour::read_from(file) {
            Ok(tour) => println!(
                "{}: OK ({n}x{n} from {start})",
                file.display(),
                n = tour.board_size(),
                start = tour.start()
            ),
            Err(e) => {
                println!("{}: {e}", file.display());
                failed += 1;
            }
        }
    }

    if failed > 0 {
        bail!("{failed} of {} tour files failed verification", files.len());
    }
    Ok(files.len())
}

/// Allocated and resident memory in MiB, when jemalloc can report them.
fn memory_usage() -> Option<(f64, f64)> {
    epoch::advance().ok()?;
    let allocated = stats::allocated::read().ok()?;
    let resident = stats::resident::read().ok()?;
    Some((
        allocated as f64 / (1024.0 * 1024.0),
        resident as f64 / (1024.0 * 1024.0),
    ))
}

/// Helper function to print a single statistic line in a formatted table row.
pub(crate) fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}

/// Helper function to print a statistic line that includes a rate (value/second).
pub(crate) fn stat_line_with_rate(label: &str, value: usize, elapsed: f64) {
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    println!("|  {label:<20} {value:>12} ({rate:>9.0}/sec)  |");
}

/// Prints a summary of problem and search statistics.
pub(crate) fn print_stats(
    config: &SearchConfig,
    report: &SearchReport,
    memory: Option<(f64, f64)>,
) {
    let elapsed_secs = report.elapsed.as_secs_f64();
    let s = &report.stats;

    println!("\n=======================[ Problem Statistics ]=========================");
    stat_line("Board", format!("{n}x{n}", n = config.board_size));
    stat_line("Start", config.start);
    stat_line("Heuristic", config.heuristic);
    stat_line("Engine", report.engine);
    stat_line(
        "Node budget",
        config
            .max_nodes
            .map_or_else(|| "unlimited".to_string(), |n| n.to_string()),
    );

    println!("========================[ Search Statistics ]========================");
    stat_line_with_rate("Nodes", s.nodes, elapsed_secs);
    stat_line_with_rate("Backtracks", s.backtracks, elapsed_secs);
    stat_line("Dead ends", s.dead_ends);
    stat_line("Max depth", s.max_depth);
    if let Some((allocated, resident)) = memory {
        stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
        stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    }
    stat_line("CPU time (s)", format!("{elapsed_secs:.3}"));
    println!("=====================================================================");
}
