use crate::arena::StateArena;
use crate::board::{Board, Direction};
use crate::error::PuzzleError;
use crate::frontier::{Frontier, Strategy};
use crate::heuristics::Heuristic;
use std::collections::HashSet;
use std::fmt;
use std::time::{Duration, Instant};

/// Expansions between progress messages at debug level.
const PROGRESS_INTERVAL: usize = 100_000;

/// Caps on how much work a single search may do.
///
/// Both limits are checked once per iteration, before the next state is
/// taken from the frontier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchLimits {
    /// Stop after this many states have been taken from the frontier.
    pub max_expanded: Option<usize>,
    /// Stop once this much wall time has passed.
    pub time_limit: Option<Duration>,
}

/// How a search explores the state space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverConfig {
    pub strategy: Strategy,
    /// Scores pushed states. Only a [`Strategy::Priority`] frontier looks at scores.
    pub heuristic: Option<Heuristic>,
    pub limits: SearchLimits,
    /// Report unsolvable boards straight away from their permutation parity
    /// instead of exhausting the frontier.
    pub parity_precheck: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::Queue,
            heuristic: None,
            limits: SearchLimits::default(),
            parity_precheck: false,
        }
    }
}

impl SolverConfig {
    pub fn new(strategy: Strategy, heuristic: Option<Heuristic>) -> Self {
        Self {
            strategy,
            heuristic,
            ..Self::default()
        }
    }

    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_parity_precheck(mut self, enabled: bool) -> Self {
        self.parity_precheck = enabled;
        self
    }

    fn score(&self, board: &Board) -> u32 {
        match self.heuristic {
            Some(heuristic) if self.strategy.uses_scores() => heuristic.score(board),
            _ => 0,
        }
    }
}

impl fmt::Display for SolverConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.heuristic {
            Some(heuristic) => write!(f, "{}/{}", self.strategy, heuristic),
            None => write!(f, "{}", self.strategy),
        }
    }
}

/// Counters collected during a search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// States taken from the frontier.
    pub expanded: usize,
    /// States pushed onto the frontier, the root included.
    pub generated: usize,
    /// Largest frontier size seen.
    pub max_frontier: usize,
    /// Distinct boards marked visited.
    pub visited: usize,
    pub elapsed: Duration,
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "expanded {}, generated {}, max frontier {}, visited {}, {:.3}s",
            self.expanded,
            self.generated,
            self.max_frontier,
            self.visited,
            self.elapsed.as_secs_f64()
        )
    }
}

/// A path from the initial board to the solved board.
#[derive(Clone, Debug)]
pub struct Solution {
    /// Every board on the path, the initial board first and the solved board last.
    pub path: Vec<Board>,
    /// Blank moves between consecutive boards of `path`.
    pub moves: Vec<Direction>,
    pub stats: SearchStats,
}

impl Solution {
    /// Number of blank moves in the solution.
    pub fn steps(&self) -> usize {
        self.moves.len()
    }
}

/// How a search ended.
#[derive(Clone, Debug)]
pub enum SearchOutcome {
    /// The solved board was reached.
    Solved(Solution),
    /// Every reachable board was explored without reaching the solved board.
    NoSolution(SearchStats),
    /// A [`SearchLimits`] cap stopped the search first.
    LimitReached(SearchStats),
}

impl SearchOutcome {
    pub fn solution(&self) -> Option<&Solution> {
        match self {
            SearchOutcome::Solved(solution) => Some(solution),
            _ => None,
        }
    }

    /// The solution path, if one was found.
    pub fn into_path(self) -> Option<Vec<Board>> {
        match self {
            SearchOutcome::Solved(solution) => Some(solution.path),
            _ => None,
        }
    }

    pub fn stats(&self) -> &SearchStats {
        match self {
            SearchOutcome::Solved(solution) => &solution.stats,
            SearchOutcome::NoSolution(stats) | SearchOutcome::LimitReached(stats) => stats,
        }
    }

    pub fn is_solved(&self) -> bool {
        matches!(self, SearchOutcome::Solved(_))
    }

    /// Short label used in reports: `solved`, `no-solution` or `limit`.
    pub fn label(&self) -> &'static str {
        match self {
            SearchOutcome::Solved(_) => "solved",
            SearchOutcome::NoSolution(_) => "no-solution",
            SearchOutcome::LimitReached(_) => "limit",
        }
    }
}

/// Searches for a sequence of blank moves that solves `root`.
///
/// This is [`solve_with`] without limits or parity precheck.
///
/// # Examples
/// ```
/// use npuzzle_solver::board::Board;
/// use npuzzle_solver::frontier::Strategy;
/// use npuzzle_solver::heuristics::Heuristic;
/// use npuzzle_solver::solver::solve;
///
/// let root = Board::from_sequence(3, &[1, 2, 3, 4, 5, 6, 0, 7, 8]).unwrap();
/// let outcome = solve(root, Strategy::Priority, Some(Heuristic::ManhattanSum)).unwrap();
/// let solution = outcome.solution().unwrap();
/// assert_eq!(solution.steps(), 2);
/// assert!(solution.path.last().unwrap().goal_test());
/// ```
pub fn solve(
    root: Board,
    strategy: Strategy,
    heuristic: Option<Heuristic>,
) -> Result<SearchOutcome, PuzzleError> {
    solve_with(root, &SolverConfig::new(strategy, heuristic))
}

/// Searches for a sequence of blank moves that solves `root`.
///
/// The same loop runs for every strategy: take a state from the frontier,
/// mark it visited, stop if it is solved, otherwise push each successor not
/// yet visited and mark it visited on push. Only the frontier's container
/// and the scores pushed with each state differ between configurations.
///
/// # Returns
/// * `Ok(SearchOutcome::Solved)` with the full path, initial board included.
/// * `Ok(SearchOutcome::NoSolution)` when the frontier runs dry.
/// * `Ok(SearchOutcome::LimitReached)` when a configured limit stops the search.
/// * `Err(PuzzleError::MissingBlank)` if `root` has no blank.
pub fn solve_with(root: Board, config: &SolverConfig) -> Result<SearchOutcome, PuzzleError> {
    let start = Instant::now();
    log::debug!(
        "Searching {}x{} board with {} (limits: {:?})",
        root.side(),
        root.side(),
        config,
        config.limits
    );
    if let Some(heuristic) = config.heuristic {
        if !config.strategy.uses_scores() {
            log::warn!(
                "Heuristic {} is ignored by the {} strategy",
                heuristic,
                config.strategy
            );
        }
    }

    let mut stats = SearchStats::default();

    if config.parity_precheck && !root.is_solvable()? {
        stats.elapsed = start.elapsed();
        log::info!("Board is unsolvable by permutation parity; skipping search");
        return Ok(SearchOutcome::NoSolution(stats));
    }

    let mut arena = StateArena::new();
    let mut frontier = Frontier::new(config.strategy);
    // Keys are clones that share tile storage with the arena nodes.
    let mut visited: HashSet<Board> = HashSet::new();

    let root_score = config.score(&root);
    let root_id = arena.insert_root(root);
    frontier.push(root_id, root_score);
    stats.generated = 1;
    stats.max_frontier = 1;

    loop {
        if limit_reached(&config.limits, &stats, start) {
            stats.visited = visited.len();
            stats.elapsed = start.elapsed();
            log::info!("Search limit reached with {}: {}", config, stats);
            return Ok(SearchOutcome::LimitReached(stats));
        }

        let id = match frontier.pop() {
            Some(id) => id,
            None => {
                stats.visited = visited.len();
                stats.elapsed = start.elapsed();
                log::info!("Frontier exhausted with {}: {}", config, stats);
                return Ok(SearchOutcome::NoSolution(stats));
            }
        };
        stats.expanded += 1;
        if stats.expanded % PROGRESS_INTERVAL == 0 {
            log::debug!(
                "{} states expanded, frontier {}, visited {}",
                stats.expanded,
                frontier.len(),
                visited.len()
            );
        }

        let board = arena.board(id);
        log::trace!("Expanding state {}:\n{}", id.index(), board);
        if !visited.contains(board) {
            visited.insert(board.clone());
        }

        if board.goal_test() {
            stats.visited = visited.len();
            stats.elapsed = start.elapsed();
            let solution = Solution {
                path: arena.history(id),
                moves: arena.moves(id),
                stats,
            };
            log::info!(
                "Solved in {} moves with {}: {}",
                solution.steps(),
                config,
                stats
            );
            return Ok(SearchOutcome::Solved(solution));
        }

        for (direction, child) in board.successors()? {
            if visited.contains(&child) {
                continue;
            }
            visited.insert(child.clone());
            let score = config.score(&child);
            let child_id = arena.insert_child(id, direction, child);
            frontier.push(child_id, score);
            stats.generated += 1;
        }
        stats.max_frontier = stats.max_frontier.max(frontier.len());
    }
}

fn limit_reached(limits: &SearchLimits, stats: &SearchStats, start: Instant) -> bool {
    if let Some(max) = limits.max_expanded {
        if stats.expanded >= max {
            return true;
        }
    }
    if let Some(limit) = limits.time_limit {
        if start.elapsed() >= limit {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    const EASY: [usize; 9] = [5, 4, 0, 6, 1, 8, 7, 3, 2];
    const UNSOLVABLE: [usize; 9] = [2, 1, 3, 4, 5, 6, 7, 8, 0];
    /// Reachable arrangements of a 3x3 board: half of 9!.
    const REACHABLE_3X3: usize = 181_440;

    fn board(values: &[usize]) -> Board {
        Board::from_tiles(values).unwrap()
    }

    fn all_configs() -> Vec<SolverConfig> {
        let mut configs = vec![
            SolverConfig::new(Strategy::Stack, None),
            SolverConfig::new(Strategy::Queue, None),
            SolverConfig::new(Strategy::Priority, None),
        ];
        for heuristic in Heuristic::ALL {
            configs.push(SolverConfig::new(Strategy::Priority, Some(heuristic)));
        }
        configs
    }

    /// Checks that `solution` starts at `root`, ends solved and that each
    /// board is one legal blank move from the previous one.
    fn assert_valid_solution(root: &Board, solution: &Solution) {
        assert_eq!(solution.path.first(), Some(root));
        assert!(solution.path.last().unwrap().goal_test());
        assert_eq!(solution.moves.len() + 1, solution.path.len());
        for (pair, &direction) in solution.path.windows(2).zip(&solution.moves) {
            assert_eq!(pair[0].step(direction).unwrap().as_ref(), Some(&pair[1]));
        }
    }

    #[test]
    fn test_solved_root_returns_single_state() {
        let goal = Board::goal(3).unwrap();
        for config in all_configs() {
            let outcome = solve_with(goal.clone(), &config).unwrap();
            let path = outcome.into_path().unwrap();
            assert_eq!(path, vec![goal.clone()]);
        }
    }

    #[test]
    fn test_unsolved_root_never_returns_single_state() {
        let root = board(&[1, 2, 3, 4, 5, 6, 7, 0, 8]);
        let outcome = solve(root.clone(), Strategy::Queue, None).unwrap();
        let solution = outcome.solution().unwrap();
        assert_eq!(solution.path.len(), 2);
        assert_eq!(solution.moves, vec![Direction::Right]);
        assert_valid_solution(&root, solution);
    }

    #[test]
    fn test_easy_board_all_strategies() {
        let root = board(&EASY);
        let mut lengths = Vec::new();
        for config in all_configs() {
            let outcome = solve_with(root.clone(), &config).unwrap();
            let solution = outcome
                .solution()
                .unwrap_or_else(|| panic!("{} found no solution", config));
            assert_valid_solution(&root, solution);
            lengths.push((config, solution.path.len()));
        }

        let bfs_len = lengths
            .iter()
            .find(|(config, _)| config.strategy == Strategy::Queue)
            .map(|&(_, len)| len)
            .unwrap();
        for (config, len) in &lengths {
            assert!(bfs_len <= *len, "{} found a shorter path than breadth-first", config);
        }
    }

    #[test]
    fn test_priority_without_heuristic_matches_queue() {
        let root = board(&EASY);
        let queue = solve(root.clone(), Strategy::Queue, None).unwrap();
        let priority = solve(root, Strategy::Priority, None).unwrap();
        assert_eq!(queue.into_path(), priority.into_path());
    }

    #[test]
    fn test_heuristic_ignored_by_stack() {
        let root = board(&EASY);
        let plain = solve(root.clone(), Strategy::Stack, None).unwrap();
        let scored = solve(root, Strategy::Stack, Some(Heuristic::Hybrid)).unwrap();
        assert_eq!(plain.into_path(), scored.into_path());
    }

    #[test]
    fn test_unsolvable_board_exhausts_every_strategy() {
        let root = board(&UNSOLVABLE);
        for config in all_configs() {
            let outcome = solve_with(root.clone(), &config).unwrap();
            match outcome {
                SearchOutcome::NoSolution(stats) => {
                    assert_eq!(stats.visited, REACHABLE_3X3, "{}", config);
                    assert_eq!(stats.expanded, REACHABLE_3X3, "{}", config);
                    assert_eq!(stats.generated, REACHABLE_3X3, "{}", config);
                }
                other => panic!("{} ended with {}", config, other.label()),
            }
        }
    }

    #[test]
    fn test_unsolvable_2x2() {
        let outcome = solve(board(&[2, 1, 3, 0]), Strategy::Stack, None).unwrap();
        assert!(matches!(outcome, SearchOutcome::NoSolution(stats) if stats.visited == 12));
    }

    #[test]
    fn test_parity_precheck_skips_search() {
        let config = SolverConfig::new(Strategy::Queue, None).with_parity_precheck(true);
        let outcome = solve_with(board(&UNSOLVABLE), &config).unwrap();
        assert!(matches!(outcome, SearchOutcome::NoSolution(stats) if stats.expanded == 0));

        let solvable = solve_with(board(&EASY), &config).unwrap();
        assert!(solvable.is_solved());
    }

    #[test]
    fn test_expansion_limit() {
        let limits = SearchLimits {
            max_expanded: Some(10),
            time_limit: None,
        };
        let config = SolverConfig::new(Strategy::Queue, None).with_limits(limits);
        let outcome = solve_with(board(&EASY), &config).unwrap();
        assert_eq!(outcome.label(), "limit");
        assert_eq!(outcome.stats().expanded, 10);
        assert!(outcome.solution().is_none());
    }

    #[test]
    fn test_time_limit_checked_before_first_pop() {
        let limits = SearchLimits {
            max_expanded: None,
            time_limit: Some(Duration::ZERO),
        };
        let config = SolverConfig::new(Strategy::Stack, None).with_limits(limits);
        let outcome = solve_with(board(&EASY), &config).unwrap();
        assert!(matches!(outcome, SearchOutcome::LimitReached(stats) if stats.expanded == 0));
    }

    #[test]
    fn test_greedy_solves_fifteen_puzzle() {
        let mut scrambled = Board::goal(4).unwrap();
        for direction in [
            Direction::Up,
            Direction::Up,
            Direction::Left,
            Direction::Down,
            Direction::Left,
            Direction::Up,
            Direction::Up,
            Direction::Right,
        ] {
            scrambled = scrambled.step(direction).unwrap().unwrap();
        }
        let outcome = solve(
            scrambled.clone(),
            Strategy::Priority,
            Some(Heuristic::ManhattanSum),
        )
        .unwrap();
        let solution = outcome.solution().unwrap();
        assert_valid_solution(&scrambled, solution);
        assert!(solution.steps() >= 2);
    }

    #[test]
    fn test_labels_and_display() {
        let config = SolverConfig::new(Strategy::Priority, Some(Heuristic::Hybrid));
        assert_eq!(config.to_string(), "priority/hybrid");
        assert_eq!(SolverConfig::default().to_string(), "queue");
        let stats = SearchStats::default();
        assert_eq!(SearchOutcome::NoSolution(stats).label(), "no-solution");
        assert!(stats.to_string().starts_with("expanded 0, generated 0"));
    }
}
