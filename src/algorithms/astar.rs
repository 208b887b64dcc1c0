//! A* search.
//!
//! Cells are ranked by `f = g + h` with `h` the Manhattan distance to the
//! goal, which is admissible and consistent on a 4-connected unit-cost grid,
//! so the first time the goal is popped its path is a shortest one.
//!
//! There's no closed set and no decrease-key. A cell reached again through a
//! strictly cheaper path is simply pushed again, and its older entry stays
//! in the heap until it's popped and expanded harmlessly (its neighbours can't
//! improve on what the cheaper entry already gave them).

use crate::algorithms::FrontierNode;
use crate::algorithms::Strategy;
use crate::grid::Cell;
use crate::rank_heap::RankHeap;
use crate::search::Cost;

/// The ranking tuple for A*
///
/// We prefer better f-values, and tie break by insertion order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct AStarRank {
    f: Cost,
    order: usize,
}

impl AStarRank {
    pub fn new(g: Cost, h: Cost, order: usize) -> Self {
        Self {
            f: g.saturating_add(h),
            order,
        }
    }
    pub fn f(&self) -> Cost {
        self.f
    }
}

pub type AStarHeapNode = FrontierNode<AStarRank>;

#[derive(Debug, Default)]
pub struct AStar {
    open: RankHeap<AStarHeapNode>,
    pushed: usize,
}

impl Strategy for AStar {
    type Entry = AStarHeapNode;

    const NAME: &'static str = "A*";

    #[inline(always)]
    fn should_mark_visited_on_discovery(&self) -> bool {
        false
    }

    fn push(&mut self, cell: Cell, g: Cost, h: Cost) {
        let rank = AStarRank::new(g, h, self.pushed);
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
