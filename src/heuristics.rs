use crate::board::{goal_index, goal_value, Board};
use std::fmt;
use std::str::FromStr;

/// Counts the cells whose value differs from the solved arrangement.
///
/// The blank is counted like any other tile, so it only contributes when it
/// is not in the bottom-right cell.
///
/// # Examples
/// ```
/// use npuzzle_solver::board::Board;
/// use npuzzle_solver::heuristics::misplaced_count;
///
/// let board = Board::from_sequence(3, &[1, 2, 3, 4, 5, 0, 7, 8, 6]).unwrap();
/// assert_eq!(misplaced_count(&board), 2);
/// ```
pub fn misplaced_count(board: &Board) -> u32 {
    let area = board.area();
    board
        .tiles()
        .iter()
        .enumerate()
        .filter(|&(i, &value)| value != goal_value(i, area))
        .count() as u32
}

/// Sums the grid distance between each cell and the cell its value occupies
/// when solved. The blank is included and belongs in the bottom-right cell.
pub fn manhattan_sum(board: &Board) -> u32 {
    let side = board.side();
    let area = board.area();
    board
        .tiles()
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            let target = goal_index(value, area);
            let (r, c) = (i / side, i % side);
            let (tr, tc) = (target / side, target % side);
            (r.abs_diff(tr) + c.abs_diff(tc)) as u32
        })
        .sum()
}

/// Manhattan sum plus misplaced count.
///
/// This overestimates the remaining distance, so best-first search guided by
/// it can return longer paths than necessary.
pub fn hybrid(board: &Board) -> u32 {
    manhattan_sum(board) + misplaced_count(board)
}

/// Board scoring functions the solver can order its frontier by. Lower is closer to solved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Heuristic {
    /// See [`misplaced_count`].
    MisplacedCount,
    /// See [`manhattan_sum`].
    ManhattanSum,
    /// See [`hybrid`].
    Hybrid,
}

impl Heuristic {
    /// Every heuristic, in the order the benchmark reports them.
    pub const ALL: [Heuristic; 3] = [
        Heuristic::MisplacedCount,
        Heuristic::ManhattanSum,
        Heuristic::Hybrid,
    ];

    /// Scores `board` with this heuristic.
    pub fn score(&self, board: &Board) -> u32 {
        match self {
            Heuristic::MisplacedCount => misplaced_count(board),
            Heuristic::ManhattanSum => manhattan_sum(board),
            Heuristic::Hybrid => hybrid(board),
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Heuristic::MisplacedCount => "misplaced",
            Heuristic::ManhattanSum => "manhattan",
            Heuristic::Hybrid => "hybrid",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Heuristic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "misplaced" | "misplaced-count" => Ok(Heuristic::MisplacedCount),
            "manhattan" | "manhattan-sum" => Ok(Heuristic::ManhattanSum),
            "hybrid" => Ok(Heuristic::Hybrid),
            _ => Err(format!(
                "Unknown heuristic '{}' (expected misplaced, manhattan or hybrid)",
                s
            )),
        }
    }
}
