//! Sliding-tile board representation.
//!
//! This module defines:
//! - `Board`: an immutable square arrangement of numbered tiles and one blank,
//!   with the goal test, successor generation and permutation-parity check.
//! - `Direction`: the four ways the blank can move, in the fixed order used
//!   for successor generation.
//!
//! Boards compare and hash by their tiles only. Where a board came from is
//! tracked separately by [`StateArena`](crate::arena::StateArena).
use crate::error::PuzzleError;
use std::fmt;
use std::sync::Arc;

/// Tile value representing the blank cell.
pub const BLANK: u8 = 0;

/// Largest supported board side. Tile values of a 16x16 board still fit in a `u8`.
pub const MAX_SIDE: usize = 16;

/// Direction the blank moves in.
///
/// Successors are always generated in the order of [`Direction::ALL`]
/// (up, down, left, right), which keeps solutions found at equal priority
/// deterministic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Blank swaps with the tile above it.
    Up,
    /// Blank swaps with the tile below it.
    Down,
    /// Blank swaps with the tile to its left.
    Left,
    /// Blank swaps with the tile to its right.
    Right,
}

impl Direction {
    /// All directions in successor-generation order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Returns the direction that undoes this one.
    pub fn opposite(&self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::Up => "Up",
            Direction::Down => "Down",
            Direction::Left => "Left",
            Direction::Right => "Right",
        };
        write!(f, "{}", s)
    }
}

/// An immutable N x N sliding-tile board.
///
/// Tiles are stored row-major. The value [`BLANK`] marks the empty cell and
/// values `1..N*N` are the numbered tiles. Boards built through
/// [`Board::from_sequence`] or [`Board::from_tiles`] always hold a permutation
/// of `0..N*N`, and every board derived from them by moving the blank keeps
/// that property.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    side: usize,
    tiles: Arc<[u8]>,
}

impl Board {
    /// Creates a board of the given side from row-major tile values.
    ///
    /// # Arguments
    /// * `side`: The board dimension N.
    /// * `values`: The N*N tile values, row by row, with `0` for the blank.
    ///
    /// # Returns
    /// * `Ok(Board)` if `values` is a permutation of `0..side*side`.
    /// * `Err(PuzzleError::InvalidSize)` if `side` is outside `1..=MAX_SIDE` or
    ///   `values.len() != side * side`.
    /// * `Err(PuzzleError::InvalidPermutation)` if a value is out of range or
    ///   repeated.
    ///
    /// # Examples
    /// ```
    /// use npuzzle_solver::board::Board;
    /// use npuzzle_solver::error::PuzzleError;
    ///
    /// let board = Board::from_sequence(3, &[1, 2, 3, 4, 5, 6, 7, 8, 0]).unwrap();
    /// assert!(board.goal_test());
    ///
    /// let err = Board::from_sequence(3, &[1, 2, 3, 4]).unwrap_err();
    /// assert!(matches!(err, PuzzleError::InvalidSize { .. }));
    /// ```
    pub fn from_sequence(side: usize, values: &[usize]) -> Result<Self, PuzzleError> {
        check_side(side, values.len())?;
        if values.len() != side * side {
            return Err(PuzzleError::InvalidSize {
                len: values.len(),
                side,
                max_side: MAX_SIDE,
            });
        }
        let tiles = validate_permutation(values)?;
        Ok(Board {
            side,
            tiles: tiles.into(),
        })
    }

    /// Creates a board from row-major tile values, deriving the side as the
    /// integer square root of `values.len()`.
    ///
    /// Fails with `InvalidSize` when the length is not a perfect square of a
    /// supported side, and with `InvalidPermutation` as [`Board::from_sequence`] does.
    pub fn from_tiles(values: &[usize]) -> Result<Self, PuzzleError> {
        let len = values.len();
        match (1..=MAX_SIDE).find(|s| s * s == len) {
            Some(side) => Self::from_sequence(side, values),
            None => Err(PuzzleError::InvalidSize {
                len,
                side: (0..=len).take_while(|s| s * s <= len).last().unwrap_or(0),
                max_side: MAX_SIDE,
            }),
        }
    }

    /// Returns the solved board of the given side: `1, 2, ..., N*N-1` followed by the blank.
    pub fn goal(side: usize) -> Result<Self, PuzzleError> {
        check_side(side, 0)?;
        let area = side * side;
        let values: Vec<usize> = (0..area).map(|i| goal_value(i, area) as usize).collect();
        Self::from_sequence(side, &values)
    }

    /// The board dimension N.
    pub fn side(&self) -> usize {
        self.side
    }

    /// Number of cells, N*N.
    pub fn area(&self) -> usize {
        self.tiles.len()
    }

    /// Row-major tile values.
    pub fn tiles(&self) -> &[u8] {
        &self.tiles
    }

    /// Iterates over the rows of the board, top to bottom.
    pub fn rows(&self) -> std::slice::Chunks<'_, u8> {
        self.tiles.chunks(self.side)
    }

    /// Returns the tile at row `r`, column `c`.
    ///
    /// # Panics
    /// Panics if `r` or `c` is not below `side()`.
    pub fn get_tile(&self, r: usize, c: usize) -> u8 {
        assert!(r < self.side && c < self.side, "cell ({r}, {c}) is off the board");
        self.tiles[r * self.side + c]
    }

    /// Checks whether the board is in the solved arrangement.
    ///
    /// The blank must sit in the last cell and every other cell `i` must hold
    /// `i + 1`. The whole board is checked.
    pub fn goal_test(&self) -> bool {
        let area = self.area();
        self.tiles
            .iter()
            .enumerate()
            .all(|(i, &value)| value == goal_value(i, area))
    }

    /// Index of the blank cell.
    ///
    /// Fails with `MissingBlank` if no cell holds [`BLANK`], which cannot
    /// happen for a board holding a valid permutation.
    pub fn blank_index(&self) -> Result<usize, PuzzleError> {
        self.tiles
            .iter()
            .position(|&value| value == BLANK)
            .ok_or(PuzzleError::MissingBlank)
    }

    /// Returns a new board with the cells at `i` and `j` exchanged.
    ///
    /// `self` is left untouched. Callers are expected to swap the blank with
    /// an orthogonal neighbour; [`Board::successors`] only ever does that.
    ///
    /// # Panics
    /// Panics if `i` or `j` is not below `area()`.
    pub fn swap(&self, i: usize, j: usize) -> Board {
        let mut tiles = self.tiles.to_vec();
        tiles.swap(i, j);
        Board {
            side: self.side,
            tiles: tiles.into(),
        }
    }

    /// Index of the cell the blank would move into, or `None` if that move
    /// would leave the grid.
    pub fn neighbor(&self, blank: usize, direction: Direction) -> Option<usize> {
        let side = self.side;
        let (r, c) = (blank / side, blank % side);
        match direction {
            Direction::Up if r > 0 => Some(blank - side),
            Direction::Down if r + 1 < side => Some(blank + side),
            Direction::Left if c > 0 => Some(blank - 1),
            Direction::Right if c + 1 < side => Some(blank + 1),
            _ => None,
        }
    }

    /// Moves the blank one cell in `direction`.
    ///
    /// # Returns
    /// `Ok(None)` if the blank is on the edge the move would cross.
    pub fn step(&self, direction: Direction) -> Result<Option<Board>, PuzzleError> {
        let blank = self.blank_index()?;
        Ok(self
            .neighbor(blank, direction)
            .map(|target| self.swap(blank, target)))
    }

    /// Generates every board reachable with one blank move.
    ///
    /// Yields between 2 and 4 boards (none on a 1x1 board), each labelled with
    /// the direction the blank moved, in the order up, down, left, right.
    ///
    /// # Examples
    /// ```
    /// use npuzzle_solver::board::{Board, Direction};
    ///
    /// let board = Board::from_sequence(3, &[1, 2, 3, 4, 5, 6, 7, 8, 0]).unwrap();
    /// let moves: Vec<Direction> = board.successors().unwrap().into_iter().map(|(d, _)| d).collect();
    /// assert_eq!(moves, vec![Direction::Up, Direction::Left]);
    /// ```
    pub fn successors(&self) -> Result<Vec<(Direction, Board)>, PuzzleError> {
        let blank = self.blank_index()?;
        Ok(Direction::ALL
            .iter()
            .filter_map(|&direction| {
                self.neighbor(blank, direction)
                    .map(|target| (direction, self.swap(blank, target)))
            })
            .collect())
    }

    /// Number of pairs of numbered tiles that appear in the wrong relative
    /// order when the board is read row-major. The blank is ignored.
    pub fn inversions(&self) -> usize {
        self.tiles
            .iter()
            .enumerate()
            .filter(|&(_, &value)| value != BLANK)
            .map(|(i, &value)| {
                self.tiles[i + 1..]
                    .iter()
                    .filter(|&&next| next != BLANK && next < value)
                    .count()
            })
            .sum()
    }

    /// Checks whether the goal arrangement can be reached from this board.
    ///
    /// On odd sides the inversion count must be even. On even sides the
    /// inversion count plus the number of rows between the blank and the
    /// bottom row must be even.
    pub fn is_solvable(&self) -> Result<bool, PuzzleError> {
        let inversions = self.inversions();
        if self.side % 2 == 1 {
            return Ok(inversions % 2 == 0);
        }
        let blank_row = self.blank_index()? / self.side;
        Ok((inversions + (self.side - 1 - blank_row)) % 2 == 0)
    }

    /// Formats the board as a text grid, one row per line.
    ///
    /// Cells are right-aligned to the width of the largest tile value and
    /// separated by a single space; the blank is shown as `.`.
    pub fn render(&self) -> String {
        let width = (self.area().saturating_sub(1)).to_string().len();
        self.rows()
            .map(|row| {
                row.iter()
                    .map(|&value| {
                        if value == BLANK {
                            format!("{:>width$}", ".")
                        } else {
                            format!("{:>width$}", value)
                        }
                    })
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

/// Value that cell `index` holds in the solved arrangement of a board with `area` cells.
pub(crate) fn goal_value(index: usize, area: usize) -> u8 {
    if index + 1 == area {
        BLANK
    } else {
        (index + 1) as u8
    }
}

/// Cell index that `value` occupies in the solved arrangement.
pub(crate) fn goal_index(value: u8, area: usize) -> usize {
    if value == BLANK {
        area - 1
    } else {
        value as usize - 1
    }
}

/// Fails with `InvalidSize` unless `side` is in `1..=MAX_SIDE`. `len` is the
/// tile count reported in the error.
pub(crate) fn check_side(side: usize, len: usize) -> Result<(), PuzzleError> {
    if side == 0 || side > MAX_SIDE {
        return Err(PuzzleError::InvalidSize {
            len,
            side,
            max_side: MAX_SIDE,
        });
    }
    Ok(())
}

fn validate_permutation(values: &[usize]) -> Result<Box<[u8]>, PuzzleError> {
    let area = values.len();
    let mut seen = vec![false; area];
    for &value in values {
        if value >= area {
            return Err(PuzzleError::InvalidPermutation {
                area,
                reason: format!("value {} is out of range", value),
            });
        }
        if seen[value] {
            return Err(PuzzleError::InvalidPermutation {
                area,
                reason: format!("value {} appears more than once", value),
            });
        }
        seen[value] = true;
    }
    Ok(values.iter().map(|&value| value as u8).collect())
}
