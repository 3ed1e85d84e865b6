use clap::Parser;
use npuzzle_solver::board::Board;
use npuzzle_solver::frontier::Strategy;
use npuzzle_solver::heuristics::Heuristic;
use npuzzle_solver::solver::{solve_with, SearchLimits, SearchOutcome, SolverConfig};
use npuzzle_solver::utils::{board_from_str, random_board, scrambled_board};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Solve a sliding-tile puzzle", long_about = None)]
struct Args {
    /// Path to the board file: tile values separated by whitespace or commas, 0 for the blank.
    /// Use `-` to read from stdin.
    #[clap(required_unless_present = "random")]
    board_file: Option<PathBuf>,

    /// Generate a random board of this side instead of reading one
    #[clap(long, conflicts_with = "board_file")]
    random: Option<usize>,

    /// Seed for --random
    #[clap(long, default_value_t = 0)]
    seed: u64,

    /// With --random, walk this many blank moves from the goal instead of shuffling
    #[clap(long, requires = "random")]
    scramble: Option<usize>,

    /// Frontier strategy: stack (dfs), queue (bfs) or priority (greedy)
    #[clap(short, long, default_value_t = Strategy::Queue)]
    strategy: Strategy,

    /// Heuristic used to order a priority frontier: misplaced, manhattan or hybrid
    #[clap(short = 'H', long)]
    heuristic: Option<Heuristic>,

    /// Stop after expanding this many states
    #[clap(long)]
    max_expanded: Option<usize>,

    /// Stop after this many milliseconds
    #[clap(long)]
    time_limit_ms: Option<u64>,

    /// Reject boards with odd permutation parity before searching
    #[clap(long)]
    parity_check: bool,

    /// Only print the move list and statistics, not every board on the path
    #[clap(short, long)]
    quiet: bool,
}

fn read_board(path: &PathBuf) -> Result<Board, String> {
    let content = if path.as_os_str() == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| format!("Failed to read stdin: {}", e))?;
        buffer
    } else {
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", path.display(), e))?
    };
    board_from_str(&content).map_err(|e| format!("Invalid board format: {}", e))
}

fn load_board(args: &Args) -> Result<Board, String> {
    match (&args.board_file, args.random) {
        (_, Some(side)) => {
            let mut rng = SmallRng::seed_from_u64(args.seed);
            let board = match args.scramble {
                Some(moves) => scrambled_board(side, moves, &mut rng),
                None => random_board(side, &mut rng),
            };
            board.map_err(|e| format!("Cannot generate board: {}", e))
        }
        (Some(path), None) => read_board(path),
        (None, None) => Err("No board given".to_string()),
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let board = match load_board(&args) {
        Ok(board) => board,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let config = SolverConfig::new(args.strategy, args.heuristic)
        .with_limits(SearchLimits {
            max_expanded: args.max_expanded,
            time_limit: args.time_limit_ms.map(Duration::from_millis),
        })
        .with_parity_precheck(args.parity_check);

    println!("Initial board:\n{}\n", board);
    println!("Searching with {}...\n", config);

    let outcome = match solve_with(board, &config) {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("Cannot search this board: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match &outcome {
        SearchOutcome::Solved(solution) => {
            println!("Solution found in {} moves:", solution.steps());
            if solution.moves.is_empty() {
                println!("  Board is already solved.");
            }
            for (i, direction) in solution.moves.iter().enumerate() {
                println!("  Move {}: {}", i + 1, direction);
            }
            if !args.quiet {
                println!();
                for (i, state) in solution.path.iter().enumerate() {
                    println!("Step {}:\n{}\n", i, state);
                }
            }
        }
        SearchOutcome::NoSolution(_) => println!("No solution: every reachable board was explored."),
        SearchOutcome::LimitReached(_) => println!("Search stopped by limit before a solution was found."),
    }
    println!("\nStatistics: {}", outcome.stats());

    if outcome.is_solved() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(2)
    }
}
