use clap::Parser;
use npuzzle_solver::board::Board;
use npuzzle_solver::frontier::Strategy;
use npuzzle_solver::heuristics::Heuristic;
use npuzzle_solver::solver::{solve_with, SearchLimits, SearchOutcome, SolverConfig};
use npuzzle_solver::utils::{random_board, scrambled_board};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::collections::HashMap;
use std::process::ExitCode;
use std::time::Duration;

const CSV_HEADER: &str =
    "board,seed,strategy,heuristic,outcome,path_len,expanded,generated,max_frontier,elapsed_ms";

#[derive(Parser, Debug)]
#[clap(author, version, about = "Compare solver configurations on seeded boards, writing CSV to stdout", long_about = None)]
struct Args {
    /// Board side
    #[clap(long, default_value_t = 3)]
    side: usize,

    /// Number of boards to evaluate
    #[clap(short, long, default_value_t = 10)]
    count: usize,

    /// Seed of the first board; board i uses seed + i
    #[clap(long, default_value_t = 0)]
    seed: u64,

    /// Walk this many blank moves from the goal instead of shuffling
    #[clap(long)]
    scramble: Option<usize>,

    /// Per-search cap on expanded states
    #[clap(long, default_value_t = 2_000_000)]
    max_expanded: usize,

    /// Per-search wall-time cap in milliseconds
    #[clap(long)]
    time_limit_ms: Option<u64>,
}

/// Stack, queue, plain priority, then priority with each heuristic.
fn configurations(limits: SearchLimits) -> Vec<SolverConfig> {
    let mut configs: Vec<SolverConfig> = Strategy::ALL
        .iter()
        .map(|&strategy| SolverConfig::new(strategy, None))
        .collect();
    configs.extend(
        Heuristic::ALL
            .iter()
            .map(|&heuristic| SolverConfig::new(Strategy::Priority, Some(heuristic))),
    );
    configs
        .into_iter()
        .map(|config| config.with_limits(limits))
        .collect()
}

fn generate_board(args: &Args, seed: u64) -> Result<Board, String> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let board = match args.scramble {
        Some(moves) => scrambled_board(args.side, moves, &mut rng),
        None => random_board(args.side, &mut rng),
    };
    board.map_err(|e| format!("Cannot generate board (seed {}): {}", seed, e))
}

fn csv_row(board_idx: usize, seed: u64, config: &SolverConfig, outcome: &SearchOutcome) -> String {
    let stats = outcome.stats();
    let path_len = outcome
        .solution()
        .map(|solution| solution.path.len().to_string())
        .unwrap_or_default();
    let heuristic = config
        .heuristic
        .map(|heuristic| heuristic.to_string())
        .unwrap_or_else(|| "none".to_string());
    format!(
        "{},{},{},{},{},{},{},{},{},{:.3}",
        board_idx,
        seed,
        config.strategy,
        heuristic,
        outcome.label(),
        path_len,
        stats.expanded,
        stats.generated,
        stats.max_frontier,
        stats.elapsed.as_secs_f64() * 1000.0
    )
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let limits = SearchLimits {
        max_expanded: Some(args.max_expanded),
        time_limit: args.time_limit_ms.map(Duration::from_millis),
    };
    let configs = configurations(limits);

    // Per configuration: (solved path lengths, expanded counts).
    let mut totals: HashMap<String, (Vec<usize>, Vec<usize>)> = HashMap::new();

    log::info!(
        "Benchmarking {} configurations on {} boards of side {}",
        configs.len(),
        args.count,
        args.side
    );
    println!("{}", CSV_HEADER);

    for board_idx in 0..args.count {
        let seed = args.seed + board_idx as u64;
        let board = match generate_board(&args, seed) {
            Ok(board) => board,
            Err(e) => {
                log::error!("{}", e);
                return ExitCode::FAILURE;
            }
        };
        log::debug!("Board {} (seed {}):\n{}", board_idx, seed, board);

        for config in &configs {
            let outcome = match solve_with(board.clone(), config) {
                Ok(outcome) => outcome,
                Err(e) => {
                    log::error!("Board {} with {} failed: {}", board_idx, config, e);
                    return ExitCode::FAILURE;
                }
            };
            println!("{}", csv_row(board_idx, seed, config, &outcome));

            let entry = totals.entry(config.to_string()).or_default();
            if let Some(solution) = outcome.solution() {
                entry.0.push(solution.steps());
            }
            entry.1.push(outcome.stats().expanded);
        }
    }

    for config in &configs {
        let label = config.to_string();
        let Some((steps, expanded)) = totals.get(&label) else {
            continue;
        };
        let solved = steps.len();
        let avg_steps = if solved == 0 {
            0.0
        } else {
            steps.iter().sum::<usize>() as f64 / solved as f64
        };
        let avg_expanded = if expanded.is_empty() {
            0.0
        } else {
            expanded.iter().sum::<usize>() as f64 / expanded.len() as f64
        };
        log::info!(
            "{:<20} solved {}/{}, average moves {:.2}, average expanded {:.0}",
            label,
            solved,
            expanded.len(),
            avg_steps,
            avg_expanded
        );
    }

    ExitCode::SUCCESS
}
