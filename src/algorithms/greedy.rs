//! Greedy best-first search.
//!
//! Cells are ranked only by their Manhattan distance to the goal, ignoring
//! the cost already paid. Cells are settled as soon as they're discovered,
//! so a detour found early is never corrected.

use crate::algorithms::FrontierNode;
use crate::algorithms::Strategy;
use crate::grid::Cell;
use crate::rank_heap::RankHeap;
use crate::search::Cost;

/// The ranking value for greedy search
///
/// We prefer lower h-values, and tie break by insertion order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct GreedyRank {
    h: Cost,
    order: usize,
}

impl GreedyRank {
    pub fn new(h: Cost, order: usize) -> Self {
        Self { h, order }
    }
    pub fn h(&self) -> Cost {
        self.h
    }
}

pub type GreedyHeapNode = FrontierNode<GreedyRank>;

#[derive(Debug, Default)]
pub struct Greedy {
    open: RankHeap<GreedyHeapNode>,
    pushed: usize,
}

impl Strategy for Greedy {
    type Entry = GreedyHeapNode;

    const NAME: &'static str = "Greedy";

    #[inline(always)]
    fn should_mark_visited_on_discovery(&self) -> bool {
        true
    }

    fn push(&mut self, cell: Cell, _g: Cost, h: Cost) {
        let rank = GreedyRank::new(h, self.pushed);
        self.pushed += 1;
        self.open.push(FrontierNode { rank, cell });
    }

    fn select_next(&mut self) -> Option<Cell> {
        self.open.pop().map(|n| n.cell)
    }

    fn len(&self) -> usize {
        self.open.len()
    }
}
