//! Breadth-first search.
//!
//! A FIFO frontier expands the grid in layers of equal distance from the
//! start, so the first path reaching the goal is a shortest one.

use std::collections::VecDeque;

use crate::algorithms::Strategy;
use crate::grid::Cell;
use crate::search::Cost;

#[derive(Debug, Default)]
pub struct Bfs {
    queue: VecDeque<Cell>,
}

impl Strategy for Bfs {
    type Entry = Cell;

    const NAME: &'static str = "BFS";

    #[inline(always)]
    fn should_mark_visited_on_discovery(&self) -> bool {
        true
    }

    #[inline(always)]
    fn push(&mut self, cell: Cell, _g: Cost, _h: Cost) {
        self.queue.push_back(cell);
    }

    #[inline(always)]
    fn select_next(&mut self) -> Option<Cell> {
        self.queue.pop_front()
    }

    fn len(&self) -> usize {
        self.queue.len()
    }
}
