//! State-Space Search
//!
//! Solves sliding-tile puzzles, finds routes between named locations and
//! plans two-link robot arm motions with a shared search engine. Arm
//! solutions can be played back in an interactive 3D viewer.

mod visualization;

use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use statesearch::arm::{ArmConfig, TotalAngleDelta};
use statesearch::persistence::{self, TilesProblem};
use statesearch::roadmap::{Roadmap, RoadmapConfig};
use statesearch::tiles::{format_board, TileState, TotalManhattanDistance};
use statesearch::{Heuristic, Search, State, Strategy, DEFAULT_DEPTH_CAP};

/// Searches state spaces: tile puzzles, navigation maps and robot arms.
#[derive(Parser)]
#[command(name = "statesearch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log every expansion.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Solve an 8-puzzle read from a file.
    Tiles {
        #[arg(default_value = "eight.in")]
        file: PathBuf,
        #[command(flatten)]
        search: SearchArgs,
        #[arg(long, value_enum, default_value_t = TileHeuristic::Manhattan)]
        heuristic: TileHeuristic,
    },
    /// Find a route between two named locations.
    Navigate {
        #[arg(default_value = "navigation.in")]
        file: PathBuf,
        #[arg(long, default_value = "78")]
        from: String,
        #[arg(long, default_value = "82D")]
        to: String,
        #[command(flatten)]
        search: SearchArgs,
    },
    /// Plan an arm motion over a sampled roadmap and save it.
    Arm {
        #[arg(default_value = "problem.txt")]
        problem: PathBuf,
        #[arg(default_value = "solution.txt")]
        output: PathBuf,
        #[command(flatten)]
        search: SearchArgs,
        #[arg(long, value_enum, default_value_t = ArmHeuristic::AngleDelta)]
        heuristic: ArmHeuristic,
        /// Configurations to sample.
        #[arg(long, default_value_t = RoadmapConfig::default().samples)]
        samples: usize,
        /// Largest joint motion (degrees) joined by a single roadmap edge.
        #[arg(long, default_value_t = RoadmapConfig::default().max_angle_delta)]
        max_delta: f64,
        /// Sampling seed; drawn at random when absent.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Play back an arm solution in a 3D viewer.
    Display { problem: PathBuf, solution: PathBuf },
}

#[derive(Args)]
struct SearchArgs {
    #[arg(long, value_enum, default_value_t = StrategyArg::Astar)]
    strategy: StrategyArg,
    /// Depth bound for depth-limited search.
    #[arg(long, default_value_t = 5)]
    limit: u32,
    /// Largest bound tried by iterative deepening.
    #[arg(long, default_value_t = DEFAULT_DEPTH_CAP)]
    cap: u32,
}

impl SearchArgs {
    fn strategy(&self) -> Strategy {
        match self.strategy {
            StrategyArg::Dfs => Strategy::DepthFirst,
            StrategyArg::Dls => Strategy::DepthLimited { limit: self.limit },
            StrategyArg::Ids => Strategy::IterativeDeepening {
                max_depth: self.cap,
            },
            StrategyArg::Bfs => Strategy::BreadthFirst,
            StrategyArg::Astar => Strategy::BestFirst,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum StrategyArg {
    Dfs,
    Dls,
    Ids,
    Bfs,
    Astar,
}

#[derive(Clone, Copy, ValueEnum)]
enum TileHeuristic {
    Zero,
    Manhattan,
}

#[derive(Clone, Copy, ValueEnum)]
enum ArmHeuristic {
    Zero,
    AngleDelta,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Command::Tiles {
            file,
            search,
            heuristic,
        } => run_tiles(&file, &search, heuristic, cli.verbose),
        Command::Navigate {
            file,
            from,
            to,
            search,
        } => run_navigate(&file, &from, &to, &search, cli.verbose),
        Command::Arm {
            problem,
            output,
            search,
            heuristic,
            samples,
            max_delta,
            seed,
        } => {
            let config = RoadmapConfig {
                samples,
                max_angle_delta: max_delta,
                seed: seed.unwrap_or_else(rand::random),
                ..RoadmapConfig::default()
            };
            run_arm(&problem, &output, &search, heuristic, &config, cli.verbose)
        }
        Command::Display { problem, solution } => run_display(&problem, &solution),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Logs go to stderr; `RUST_LOG` overrides the default level.
fn init_logging(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Runs `search` and prints its outcome and counters.
fn execute<S: State, H: Heuristic<S>>(search: &mut Search<S, H>, verbose: bool) -> CliResult {
    let termination = if verbose {
        search.verbose_search()?
    } else {
        search.run()?
    };

    println!("Strategy: {}", search.strategy());
    println!("Outcome: {termination:?}");
    if let Some(stats) = search.stats() {
        println!(
            "Expanded {} nodes, generated {}, frontier peaked at {}",
            stats.expanded, stats.generated, stats.frontier_high_water
        );
    }
    if search.goal_found() {
        println!("Path cost: {}", search.path_cost()?);
    }
    Ok(())
}

/// Renders a tile-puzzle solution one board per step.
fn format_tile_solution<const SIDE: usize, const CELLS: usize>(
    path: &[TileState<SIDE, CELLS>],
) -> String {
    let moves = path.len().saturating_sub(1);
    let mut output = format!("Solved in {moves} moves:\n\n");
    for (step, board) in path.iter().enumerate() {
        output.push_str(&format!("Step {step}:\n"));
        output.push_str(&format_board(board));
        output.push('\n');
    }
    output
}

fn run_tiles(
    file: &Path,
    args: &SearchArgs,
    heuristic: TileHeuristic,
    verbose: bool,
) -> CliResult {
    let TilesProblem { initial, goal } = persistence::load_tiles::<3, 9>(file)?;
    println!("Initial:\n{}", format_board(&initial));
    println!("Goal:\n{}", format_board(&goal));
    if !initial.is_reachable_from(&goal) {
        println!("The goal cannot be reached from this board.");
        return Ok(());
    }

    let search = Search::new(initial, goal, args.strategy());
    let path = match heuristic {
        TileHeuristic::Zero => solved_path(search, verbose)?,
        TileHeuristic::Manhattan => {
            solved_path(search.with_heuristic(TotalManhattanDistance::new(&goal)), verbose)?
        }
    };
    if let Some(path) = path {
        print!("{}", format_tile_solution(&path));
    }
    Ok(())
}

/// Runs `search` and hands back the goal path, if one was found.
fn solved_path<S: State, H: Heuristic<S>>(
    mut search: Search<S, H>,
    verbose: bool,
) -> Result<Option<Vec<S>>, Box<dyn std::error::Error>> {
    execute(&mut search, verbose)?;
    if !search.goal_found() {
        println!("No path found.");
        return Ok(None);
    }
    Ok(Some(search.goal_path()?.to_vec()))
}

fn run_navigate(file: &Path, from: &str, to: &str, args: &SearchArgs, verbose: bool) -> CliResult {
    let map = persistence::load_navigation(file)?;
    let lookup = |name: &str| {
        map.state(name)
            .ok_or_else(|| format!("no location named {name:?} in {}", file.display()))
    };
    let (initial, goal) = (lookup(from)?, lookup(to)?);

    if let Some(path) = solved_path(Search::new(initial, goal, args.strategy()), verbose)? {
        let route: Vec<&str> = path.iter().map(|s| s.value().as_str()).collect();
        println!("Route: {}", route.join(" -> "));
    }
    Ok(())
}

fn run_arm(
    problem: &Path,
    output: &Path,
    args: &SearchArgs,
    heuristic: ArmHeuristic,
    config: &RoadmapConfig,
    verbose: bool,
) -> CliResult {
    println!("Seed: {}", config.seed);
    let problem = persistence::load_arm_problem(problem)?;
    println!("Init: {}", problem.initial);
    println!("Goal: {}", problem.goal);
    println!("Obstacles: {}", problem.workspace.obstacles.len());
    for obstacle in &problem.workspace.obstacles {
        println!("  {obstacle}");
    }

    println!("Building roadmap...");
    let roadmap = Roadmap::build(&problem.workspace, problem.initial, problem.goal, config)?;
    println!(
        "Roadmap has {} configurations and {} connections",
        roadmap.graph().node_count(),
        roadmap.graph().edge_count()
    );

    let search = Search::new(roadmap.initial_state(), roadmap.goal_state(), args.strategy());
    let path = match heuristic {
        ArmHeuristic::Zero => solved_path(search, verbose)?,
        ArmHeuristic::AngleDelta => {
            solved_path(search.with_heuristic(TotalAngleDelta::new(problem.goal)), verbose)?
        }
    };
    let Some(path) = path else {
        return Ok(());
    };

    let configs: Vec<ArmConfig> = path.iter().map(|state| *state.value()).collect();
    print_steps(&configs);
    persistence::save_arm_solution(output, &configs)?;
    println!("Wrote {}", output.display());
    Ok(())
}

fn print_steps<T: Display>(steps: &[T]) {
    for (i, step) in steps.iter().enumerate() {
        println!("{i:>4}: {step}");
    }
}

fn run_display(problem: &Path, solution: &Path) -> CliResult {
    let problem = persistence::load_arm_problem(problem)?;
    let path = persistence::load_arm_solution(solution)?;
    if path.is_empty() {
        println!("The solution file is empty.");
        return Ok(());
    }
    println!("Loaded {} configurations", path.len());
    println!("Controls: Left/Right step, Up play, Down pause, R reset");
    visualization::display(problem.workspace, path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use statesearch::tiles::EightPuzzle;

    #[test]
    fn tile_solution_snapshot() {
        let start = EightPuzzle::new([1, 2, 3, 4, 5, 6, 0, 7, 8]).unwrap();
        let mut search = Search::new(start, EightPuzzle::solved(), Strategy::BreadthFirst);
        search.run().unwrap();

        insta::assert_snapshot!(format_tile_solution(search.goal_path().unwrap()), @r"
        Solved in 2 moves:

        Step 0:
        123
        456
        _78

        Step 1:
        123
        456
        7_8

        Step 2:
        123
        456
        78_
        ");
    }

    #[test]
    fn strategy_flags_map_to_strategies() {
        let args = SearchArgs {
            strategy: StrategyArg::Dls,
            limit: 3,
            cap: 9,
        };
        assert_eq!(args.strategy(), Strategy::DepthLimited { limit: 3 });

        let args = SearchArgs {
            strategy: StrategyArg::Ids,
            ..args
        };
        assert_eq!(args.strategy(), Strategy::IterativeDeepening { max_depth: 9 });
    }

    #[test]
    fn cli_parses_arm_options() {
        let cli = Cli::try_parse_from([
            "statesearch",
            "arm",
            "p.txt",
            "--samples",
            "50",
            "--seed",
            "7",
            "--strategy",
            "bfs",
        ])
        .unwrap();
        match cli.command {
            Command::Arm {
                problem,
                output,
                samples,
                seed,
                search,
                ..
            } => {
                assert_eq!(problem, PathBuf::from("p.txt"));
                assert_eq!(output, PathBuf::from("solution.txt"));
                assert_eq!(samples, 50);
                assert_eq!(seed, Some(7));
                assert_eq!(search.strategy(), Strategy::BreadthFirst);
            }
            _ => panic!("expected the arm subcommand"),
        }
    }
}
