//! Parent links for path reconstruction.
//!
//! Every board the search keeps is stored once in a [`StateArena`] and
//! referred to by a [`StateId`]. A node remembers the id of the node it was
//! generated from, so a solution path is recovered by walking ids back to
//! the root instead of holding references between boards.
use crate::board::{Board, Direction, BLANK};
use crate::error::PuzzleError;

/// Handle to a node stored in a [`StateArena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateId(usize);

impl StateId {
    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug)]
struct Node {
    board: Board,
    parent: Option<StateId>,
    /// Blank move that produced this node from its parent.
    last_move: Option<Direction>,
}

/// Append-only store of boards and the parent each was generated from.
#[derive(Clone, Debug, Default)]
pub struct StateArena {
    nodes: Vec<Node>,
}

impl StateArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a root node, one with no parent.
    pub fn insert_root(&mut self, board: Board) -> StateId {
        self.push(board, None, None)
    }

    /// Adds `board` as a child of `parent`, reached by moving the blank in `direction`.
    pub fn insert_child(&mut self, parent: StateId, direction: Direction, board: Board) -> StateId {
        debug_assert!(parent.0 < self.nodes.len(), "parent {:?} is not in the arena", parent);
        self.push(board, Some(parent), Some(direction))
    }

    fn push(&mut self, board: Board, parent: Option<StateId>, last_move: Option<Direction>) -> StateId {
        let id = StateId(self.nodes.len());
        self.nodes.push(Node {
            board,
            parent,
            last_move,
        });
        id
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Board stored at `id`.
    ///
    /// # Panics
    /// Panics if `id` was not issued by this arena.
    pub fn board(&self, id: StateId) -> &Board {
        &self.nodes[id.0].board
    }

    /// Node `id` was generated from, or `None` for a root.
    pub fn parent(&self, id: StateId) -> Option<StateId> {
        self.nodes[id.0].parent
    }

    /// Blank move that produced `id`, or `None` for a root.
    pub fn last_move(&self, id: StateId) -> Option<Direction> {
        self.nodes[id.0].last_move
    }

    /// Stores a copy of the board at `id` with cells `i` and `j` exchanged,
    /// parented to `id`.
    ///
    /// The move label is recovered from the positions when `i` holds the
    /// blank and `j` is one of its neighbours; any other swap is stored
    /// without a label.
    ///
    /// # Panics
    /// Panics if `id` was not issued by this arena, or if `i` or `j` is not
    /// below the board's `area()`.
    pub fn swap(&mut self, id: StateId, i: usize, j: usize) -> StateId {
        let board = self.board(id);
        let last_move = Direction::ALL
            .into_iter()
            .find(|&d| board.tiles()[i] == BLANK && board.neighbor(i, d) == Some(j));
        let child = board.swap(i, j);
        self.push(child, Some(id), last_move)
    }

    /// Generates every one-move successor of `id`, stores each as a child of
    /// `id` and returns their ids in generation order (up, down, left, right).
    pub fn successors(&mut self, id: StateId) -> Result<Vec<StateId>, PuzzleError> {
        let children = self.board(id).successors()?;
        Ok(children
            .into_iter()
            .map(|(direction, board)| self.insert_child(id, direction, board))
            .collect())
    }

    /// Ids on the path from the root to `id`, root first and `id` last.
    pub fn lineage(&self, id: StateId) -> Vec<StateId> {
        let mut path = vec![id];
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            path.push(parent);
            current = parent;
        }
        path.reverse();
        path
    }

    /// Boards on the path from the root to `id`, root first and the board at `id` last.
    pub fn history(&self, id: StateId) -> Vec<Board> {
        self.lineage(id)
            .into_iter()
            .map(|step| self.board(step).clone())
            .collect()
    }

    /// Blank moves that lead from the root to `id`.
    pub fn moves(&self, id: StateId) -> Vec<Direction> {
        self.lineage(id)
            .into_iter()
            .filter_map(|step| self.last_move(step))
            .collect()
    }
}
