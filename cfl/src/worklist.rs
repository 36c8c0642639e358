use core::cmp::Reverse;
use std::collections::VecDeque;

use priority_queue::PriorityQueue;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::CflError;
use crate::grammar::Label;
use crate::graph::{Edge, Node};

/// The order in which pending edges are propagated. The closed graph is the
/// same for every order, only the number of iterations and the order in which
/// derived edges show up differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WorklistOrder {
    #[default]
    Fifo,
    Lifo,
    /// Smallest `(src, dst)` pair first.
    Priority,
    /// Uniformly random, reproducible for the same seed.
    Random(u64),
}

enum Pending<L: Label> {
    Fifo(VecDeque<Edge<L>>),
    Lifo(Vec<Edge<L>>),
    Priority(PriorityQueue<Edge<L>, Reverse<(Node, Node)>>),
    Random(Vec<Edge<L>>, StdRng),
}

/// Edges waiting to be propagated. The worklist does not deduplicate, the
/// engine only pushes edges that the graph reported as new.
pub struct Worklist<L: Label> {
    pending: Pending<L>,
}

impl<L: Label> Worklist<L> {
    pub fn new(order: WorklistOrder) -> Self {
        let pending = match order {
            WorklistOrder::Fifo => Pending::Fifo(VecDeque::new()),
            WorklistOrder::Lifo => Pending::Lifo(Vec::new()),
            WorklistOrder::Priority => Pending::Priority(PriorityQueue::new()),
            WorklistOrder::Random(seed) => {
                Pending::Random(Vec::new(), StdRng::seed_from_u64(seed))
            }
        };
        Self { pending }
    }

    pub fn push(&mut self, edge: Edge<L>) {
        match &mut self.pending {
            Pending::Fifo(queue) => queue.push_back(edge),
            Pending::Lifo(stack) | Pending::Random(stack, _) => stack.push(edge),
            Pending::Priority(queue) => {
                queue.push(edge, Reverse((edge.src, edge.dst)));
            }
        }
    }

    /// Removes the next edge. Callers are expected to check
    /// [`Worklist::is_empty`] first, popping from an empty worklist
    /// fails with [`CflError::EmptyQueue`].
    pub fn pop(&mut self) -> Result<Edge<L>, CflError> {
        let next = match &mut self.pending {
            Pending::Fifo(queue) => queue.pop_front(),
            Pending::Lifo(stack) => stack.pop(),
            Pending::Priority(queue) => queue.pop().map(|(edge, _)| edge),
            Pending::Random(pool, rng) => {
                if pool.is_empty() {
                    None
                } else {
                    let idx = rng.gen_range(0..pool.len());
                    Some(pool.swap_remove(idx))
                }
            }
        };
        next.ok_or(CflError::EmptyQueue)
    }

    pub fn len(&self) -> usize {
        match &self.pending {
            Pending::Fifo(queue) => queue.len(),
            Pending::Lifo(stack) | Pending::Random(stack, _) => stack.len(),
            Pending::Priority(queue) => queue.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
