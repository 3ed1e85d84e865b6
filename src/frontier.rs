//! Containers for discovered but not yet expanded states.
//!
//! The search driver only talks to [`Frontier`]; which state comes out next
//! is decided entirely by the [`Strategy`] the frontier was built for.
use crate::arena::StateId;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};
use std::fmt;
use std::str::FromStr;

/// Order in which pending states are explored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Last in, first out: depth-first search.
    Stack,
    /// First in, first out: breadth-first search.
    Queue,
    /// Lowest score first, ties broken by insertion order: best-first search.
    Priority,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Stack, Strategy::Queue, Strategy::Priority];

    /// Whether pushes to this frontier are ordered by score.
    pub fn uses_scores(&self) -> bool {
        matches!(self, Strategy::Priority)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Strategy::Stack => "stack",
            Strategy::Queue => "queue",
            Strategy::Priority => "priority",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "stack" | "dfs" => Ok(Strategy::Stack),
            "queue" | "bfs" => Ok(Strategy::Queue),
            "priority" | "greedy" | "best" => Ok(Strategy::Priority),
            _ => Err(format!(
                "Unknown strategy '{}' (expected stack, queue or priority)",
                s
            )),
        }
    }
}

/// Pending states, held in the container matching a [`Strategy`].
#[derive(Debug)]
pub enum Frontier {
    Stack(Vec<StateId>),
    Queue(VecDeque<StateId>),
    Priority {
        /// Min-heap on (score, insertion sequence).
        heap: BinaryHeap<Reverse<(u32, u64, StateId)>>,
        next_seq: u64,
    },
}

impl Frontier {
    /// Creates an empty frontier for `strategy`.
    pub fn new(strategy: Strategy) -> Self {
        match strategy {
            Strategy::Stack => Frontier::Stack(Vec::new()),
            Strategy::Queue => Frontier::Queue(VecDeque::new()),
            Strategy::Priority => Frontier::Priority {
                heap: BinaryHeap::new(),
                next_seq: 0,
            },
        }
    }

    /// Adds a state. `score` only matters to a priority frontier.
    pub fn push(&mut self, id: StateId, score: u32) {
        match self {
            Frontier::Stack(stack) => stack.push(id),
            Frontier::Queue(queue) => queue.push_back(id),
            Frontier::Priority { heap, next_seq } => {
                heap.push(Reverse((score, *next_seq, id)));
                *next_seq += 1;
            }
        }
    }

    /// Removes the next state to explore, or returns `None` once the
    /// frontier is exhausted.
    pub fn pop(&mut self) -> Option<StateId> {
        match self {
            Frontier::Stack(stack) => stack.pop(),
            Frontier::Queue(queue) => queue.pop_front(),
            Frontier::Priority { heap, .. } => heap.pop().map(|Reverse((_, _, id))| id),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Frontier::Stack(stack) => stack.len(),
            Frontier::Queue(queue) => queue.len(),
            Frontier::Priority { heap, .. } => heap.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn strategy(&self) -> Strategy {
        match self {
            Frontier::Stack(_) => Strategy::Stack,
            Frontier::Queue(_) => Strategy::Queue,
            Frontier::Priority { .. } => Strategy::Priority,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::StateArena;
    use crate::board::Board;

    /// Ids 0..n from a throwaway arena, since `StateId` cannot be built directly.
    fn ids(n: usize) -> Vec<StateId> {
        let mut arena = StateArena::new();
        (0..n)
            .map(|_| arena.insert_root(Board::goal(2).unwrap()))
            .collect()
    }

    fn drain(frontier: &mut Frontier) -> Vec<StateId> {
        std::iter::from_fn(|| frontier.pop()).collect()
    }

    #[test]
    fn test_stack_is_lifo() {
        let ids = ids(3);
        let mut frontier = Frontier::new(Strategy::Stack);
        for &id in &ids {
            frontier.push(id, 0);
        }
        assert_eq!(frontier.len(), 3);
        assert_eq!(drain(&mut frontier), vec![ids[2], ids[1], ids[0]]);
    }

    #[test]
    fn test_queue_is_fifo() {
        let ids = ids(3);
        let mut frontier = Frontier::new(Strategy::Queue);
        for &id in &ids {
            frontier.push(id, 100 - id.index() as u32);
        }
        assert_eq!(drain(&mut frontier), ids);
    }

    #[test]
    fn test_priority_orders_by_score() {
        let ids = ids(4);
        let mut frontier = Frontier::new(Strategy::Priority);
        frontier.push(ids[0], 7);
        frontier.push(ids[1], 2);
        frontier.push(ids[2], 9);
        frontier.push(ids[3], 0);
        assert_eq!(drain(&mut frontier), vec![ids[3], ids[1], ids[0], ids[2]]);
    }

    #[test]
    fn test_priority_ties_are_fifo() {
        let ids = ids(5);
        let mut frontier = Frontier::new(Strategy::Priority);
        // Push in reverse id order so the tie-break cannot come from the ids.
        for &id in ids.iter().rev() {
            frontier.push(id, 3);
        }
        frontier.push(ids[4], 1);
        let order = drain(&mut frontier);
        assert_eq!(order, vec![ids[4], ids[4], ids[3], ids[2], ids[1], ids[0]]);
    }

    #[test]
    fn test_empty_frontier_is_exhausted() {
        for strategy in Strategy::ALL {
            let mut frontier = Frontier::new(strategy);
            assert!(frontier.is_empty());
            assert_eq!(frontier.pop(), None);
            assert_eq!(frontier.strategy(), strategy);
        }
    }

    #[test]
    fn test_parse_and_display() {
        for strategy in Strategy::ALL {
            assert_eq!(strategy.to_string().parse::<Strategy>(), Ok(strategy));
        }
        assert_eq!("BFS".parse::<Strategy>(), Ok(Strategy::Queue));
        assert_eq!("dfs".parse::<Strategy>(), Ok(Strategy::Stack));
        assert_eq!("greedy".parse::<Strategy>(), Ok(Strategy::Priority));
        assert!("random".parse::<Strategy>().is_err());
        assert!(Strategy::Priority.uses_scores());
        assert!(!Strategy::Queue.uses_scores());
    }
}
