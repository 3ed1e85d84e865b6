use crate::board::{check_side, Board, Direction, BLANK};
use crate::error::PuzzleError;
use rand::seq::SliceRandom;
use rand::Rng;

/// Parses a textual board into a `Board`.
///
/// The text is a list of tile values separated by whitespace and/or commas,
/// in row-major order, with `0` for the blank. Line breaks carry no meaning,
/// so a board may be written one row per line or all on one line. The side
/// is derived from the number of values.
///
/// # Returns
/// * `Ok(Board)` if every token is a non-negative integer and the values
///   form a valid square board.
/// * `Err(PuzzleError::InvalidToken)` for the first token that is not a
///   non-negative integer, with its position counted from 0.
/// * `Err(PuzzleError::InvalidSize)` or `Err(PuzzleError::InvalidPermutation)`
///   as returned by [`Board::from_tiles`].
///
/// # Examples
/// ```
/// use npuzzle_solver::utils::board_from_str;
///
/// let board = board_from_str("5 4 0\n6 1 8\n7 3 2\n").unwrap();
/// assert_eq!(board.side(), 3);
/// assert_eq!(board.tiles()[0], 5);
///
/// assert!(board_from_str("1, 2, 3, x").is_err());
/// ```
pub fn board_from_str(s: &str) -> Result<Board, PuzzleError> {
    let values = s
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .enumerate()
        .map(|(position, token)| {
            token.parse::<usize>().map_err(|_| PuzzleError::InvalidToken {
                token: token.to_string(),
                position,
            })
        })
        .collect::<Result<Vec<usize>, PuzzleError>>()?;
    Board::from_tiles(&values)
}

/// Creates a uniformly shuffled board that is guaranteed to be solvable.
///
/// Half of all arrangements cannot reach the goal; when the shuffle lands on
/// one of those, the first two numbered tiles are exchanged, which flips the
/// permutation parity without moving the blank.
pub fn random_board(side: usize, rng: &mut impl Rng) -> Result<Board, PuzzleError> {
    check_side(side, 0)?;
    let mut values: Vec<usize> = (0..side * side).collect();
    values.shuffle(rng);
    let board = Board::from_sequence(side, &values)?;
    if board.is_solvable()? {
        return Ok(board);
    }
    let numbered: Vec<usize> = board
        .tiles()
        .iter()
        .enumerate()
        .filter(|&(_, &value)| value != BLANK)
        .map(|(i, _)| i)
        .take(2)
        .collect();
    match numbered.as_slice() {
        &[a, b] => Ok(board.swap(a, b)),
        // Fewer than two numbered tiles: every arrangement is solvable.
        _ => Ok(board),
    }
}

/// Creates a board by making `moves` random blank moves from the goal.
///
/// The walk never immediately undoes its previous move unless it has no
/// other choice, so the distance from the goal grows with `moves` but may be
/// smaller than it.
pub fn scrambled_board(side: usize, moves: usize, rng: &mut impl Rng) -> Result<Board, PuzzleError> {
    let mut board = Board::goal(side)?;
    let mut last: Option<Direction> = None;
    for _ in 0..moves {
        let successors = board.successors()?;
        let forward: Vec<&(Direction, Board)> = successors
            .iter()
            .filter(|(direction, _)| Some(direction.opposite()) != last)
            .collect();
        let choice = if forward.is_empty() {
            successors.choose(rng)
        } else {
            forward.choose(rng).copied()
        };
        match choice {
            Some((direction, next)) => {
                last = Some(*direction);
                board = next.clone();
            }
            None => break,
        }
    }
    Ok(board)
}
