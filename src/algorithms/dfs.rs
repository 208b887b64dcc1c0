//! Depth-first search.
//!
//! A LIFO frontier keeps diving into the most recently discovered cell. The
//! neighbour tried last (Up) is expanded first. Paths are valid but can be
//! far from shortest.

use crate::algorithms::Strategy;
use crate::grid::Cell;
use crate::search::Cost;

#[derive(Debug, Default)]
pub struct Dfs {
    stack: Vec<Cell>,
}

impl Strategy for Dfs {
    type Entry = Cell;

    const NAME: &'static str = "DFS";

    #[inline(always)]
    fn should_mark_visited_on_discovery(&self) -> bool {
        true
    }

    #[inline(always)]
    fn push(&mut self, cell: Cell, _g: Cost, _h: Cost) {
        self.stack.push(cell);
    }

    #[inline(always)]
    fn select_next(&mut self) -> Option<Cell> {
        self.stack.pop()
    }

    fn len(&self) -> usize {
        self.stack.len()
    }
}
