//! Search bookkeeping shared by every algorithm.
//!
//! The coordinate space is small and dense, so instead of maps keyed by
//! [`Cell`] the search tree is a pair of flat arrays indexed like the grid
//! (`row * width + col`).

use std::io::Write;

use nonmax::NonMaxU32;
use size::Size;
use thousands::Separable;

use crate::grid::Cell;
use crate::grid::Grid;
use crate::path::Path;

/// Cost of a path, one per move.
pub type Cost = u32;

/// A packed `u32` with a free niche, so `Option<Packed>` stays 4B wide.
type Packed = NonMaxU32;

#[inline(always)]
fn pack(value: usize) -> Packed {
    // Grid dimensions are validated to keep every index below `u32::MAX`.
    match NonMaxU32::new(value as u32) {
        Some(p) if value < u32::MAX as usize => p,
        _ => unreachable!("{value} does not fit in the search tree"),
    }
}

/// Predecessor links and best known costs for every reached cell.
///
/// A cell is reached once it has a cost. The start is the only reached cell
/// without a parent.
#[derive(Clone)]
pub struct SearchTree {
    width: usize,
    parent: Vec<Option<Packed>>,
    g: Vec<Option<Packed>>,
    reached: usize,
}

impl SearchTree {
    #[must_use]
    pub fn new(grid: &Grid) -> Self {
        Self {
            width: grid.width(),
            parent: vec![None; grid.len()],
            g: vec![None; grid.len()],
            reached: 0,
        }
    }

    #[inline(always)]
    fn index(&self, cell: Cell) -> usize {
        let i = cell.row as usize * self.width + cell.col as usize;
        debug_assert!(i < self.g.len());
        i
    }
    #[inline(always)]
    fn cell_at(&self, index: usize) -> Cell {
        Cell::new(
            (index / self.width) as crate::grid::Coord,
            (index % self.width) as crate::grid::Coord,
        )
    }

    /// Marks the root of the tree.
    pub fn seed(&mut self, start: Cell) {
        let i = self.index(start);
        debug_assert!(self.g[i].is_none(), "Seeding an already reached cell");
        self.parent[i] = None;
        self.g[i] = Some(pack(0));
        self.reached += 1;
    }

    /// Records `parent` as the best known way into `cell`.
    pub fn reach(&mut self, cell: Cell, parent: Cell, g: Cost) {
        debug_assert!(self.is_reached(parent), "Parent {parent} was never reached");
        debug_assert!(
            self.g(cell).is_none_or(|known| g < known),
            "Only better paths may replace known ones"
        );
        let i = self.index(cell);
        if self.g[i].is_none() {
            self.reached += 1;
        }
        self.parent[i] = Some(pack(self.index(parent)));
        self.g[i] = Some(pack(g as usize));
    }

    #[inline(always)]
    pub fn g(&self, cell: Cell) -> Option<Cost> {
        self.g[self.index(cell)].map(|g| g.get())
    }
    #[inline(always)]
    pub fn is_reached(&self, cell: Cell) -> bool {
        self.g[self.index(cell)].is_some()
    }
    pub fn parent(&self, cell: Cell) -> Option<Cell> {
        self.parent[self.index(cell)].map(|p| self.cell_at(p.get() as usize))
    }

    /// Number of distinct cells reached so far.
    pub fn reached(&self) -> usize {
        self.reached
    }

    /// Heap memory held by the tree.
    pub fn memory_bytes(&self) -> usize {
        (self.parent.capacity() + self.g.capacity()) * std::mem::size_of::<Option<Packed>>()
    }

    #[must_use]
    pub fn path(&self, goal: Cell) -> Path {
        reconstruct(self, goal)
    }
}

impl std::fmt::Debug for SearchTree {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "SearchTree{{({} of {} cells reached)}}",
            self.reached,
            self.g.len()
        )
    }
}

/// Walks parent links back from `goal` to the start.
///
/// # Panics
///
/// If `goal` was never reached. Only call this after the search got there.
#[must_use]
pub fn reconstruct(tree: &SearchTree, goal: Cell) -> Path {
    assert!(
        tree.is_reached(goal),
        "Can't reconstruct a path to unreached {goal}"
    );

    let mut cells = vec![goal];
    let mut cell = goal;
    while let Some(parent) = tree.parent(cell) {
        debug_assert!(parent != cell);
        debug_assert!(cells.len() <= tree.reached(), "Parent links form a cycle");
        cells.push(parent);
        cell = parent;
    }

    Path::from_reversed(cells)
}

/// What a single search run did.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Frontier entries taken out, including the goal.
    pub expanded: usize,
    /// Frontier entries put in, including the start.
    pub pushed: usize,
    /// Largest frontier size observed.
    pub peak_frontier: usize,
    /// Bytes used by the frontier at its peak.
    pub peak_frontier_bytes: usize,
    /// Distinct cells that got a cost.
    pub reached: usize,
    /// Bytes used by the search tree.
    pub tree_bytes: usize,
}

impl SearchStats {
    pub fn write_stats<W: Write>(&self, mut out: W) -> std::io::Result<()> {
        writeln!(out, "Search Stats:")?;
        writeln!(
            out,
            "  - Expanded cells: {}",
            self.expanded.separate_with_commas()
        )?;
        writeln!(
            out,
            "  - Pushed entries: {}",
            self.pushed.separate_with_commas()
        )?;
        writeln!(
            out,
            "  - |Frontier|*:    {} ({})",
            self.peak_frontier.separate_with_commas(),
            Size::from_bytes(self.peak_frontier_bytes)
        )?;
        writeln!(
            out,
            "  - |Tree|:         {} ({})",
            self.reached.separate_with_commas(),
            Size::from_bytes(self.tree_bytes)
        )?;
        Ok(())
    }
}
