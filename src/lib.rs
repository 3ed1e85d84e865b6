//! # N-Puzzle Solver Library
//!
//! This library solves generalized sliding-tile puzzles: an N x N board of
//! numbered tiles and one blank, to be brought into ascending order with the
//! blank in the bottom-right corner.
//!
//! A single search loop drives every solver configuration. What changes is
//! the frontier the loop draws from (a stack for depth-first search, a queue
//! for breadth-first search, or a priority queue for best-first search) and
//! the heuristic that scores states for the priority queue.
//!
//! It is used by two binaries:
//! - `solve`: Reads or generates one board and prints the solution path.
//! - `benchmark`: Runs every solver configuration over a batch of seeded
//!   boards and writes CSV.
//!
//! ## Modules
//! - `board`: The immutable `Board`, blank moves, goal test and solvability.
//! - `arena`: `StateArena`, which records the parent of each generated board
//!   so solution paths can be rebuilt.
//! - `heuristics`: Misplaced-count, Manhattan-sum and hybrid scores.
//! - `frontier`: `Strategy` and the `Frontier` container it selects.
//! - `solver`: `solve`/`solve_with`, configuration, limits and statistics.
//! - `utils`: Text parsing and random board generation.
//! - `error`: `PuzzleError`.

pub mod arena;
pub mod board;
pub mod error;
pub mod frontier;
pub mod heuristics;
pub mod solver;
pub mod utils;

pub use board::{Board, Direction};
pub use error::PuzzleError;
pub use frontier::Strategy;
pub use heuristics::Heuristic;
pub use solver::{solve, solve_with, SearchLimits, SearchOutcome, Solution, SolverConfig};
