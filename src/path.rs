use rustc_hash::FxHashSet;

use crate::grid::Cell;
use crate::grid::Direction;
use crate::grid::Grid;
use crate::search::Cost;

/// Cells visited from a start to a goal, both included.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path {
    cells: Vec<Cell>,
}

impl Path {
    /// The trivial path of a search that starts on its goal.
    #[inline(always)]
    pub fn single(cell: Cell) -> Self {
        Self { cells: vec![cell] }
    }

    /// Builds a path from cells collected goal-first.
    pub(crate) fn from_reversed(mut cells: Vec<Cell>) -> Self {
        assert!(!cells.is_empty(), "Paths contain at least one cell");
        cells.reverse();
        Self { cells }
    }

    pub fn start(&self) -> Cell {
        self.cells[0]
    }
    pub fn goal(&self) -> Cell {
        self.cells[self.cells.len() - 1]
    }

    /// Number of cells, including both ends.
    pub fn len(&self) -> usize {
        self.cells.len()
    }
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
    /// Number of moves, also the path cost on a unit-cost grid.
    pub fn steps(&self) -> Cost {
        (self.cells.len() - 1) as Cost
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }
    pub fn contains(&self, cell: &Cell) -> bool {
        self.cells.contains(cell)
    }

    /// The moves taken between consecutive cells.
    ///
    /// Stops early if two consecutive cells are not adjacent.
    pub fn directions(&self) -> Vec<Direction> {
        self.cells
            .windows(2)
            .map_while(|w| Direction::between(w[0], w[1]))
            .collect()
    }

    /// Verifies the path is walkable on `grid` between its start and goal.
    pub fn is_valid_on(&self, grid: &Grid) -> bool {
        self.is_valid_between(grid, grid.start(), grid.goal())
    }

    /// Verifies the path,
    /// - Starts at `start` and ends at `goal`.
    /// - Only stands on cells passing `Grid::is_valid_move`.
    /// - Only moves by one of the four fixed offsets.
    /// - Never repeats a cell.
    pub fn is_valid_between(&self, grid: &Grid, start: Cell, goal: Cell) -> bool {
        if self.cells.is_empty() || self.start() != start || self.goal() != goal {
            return false;
        }
        if !self.cells.iter().all(|c| grid.is_valid_move(*c)) {
            return false;
        }
        if self.directions().len() != self.cells.len() - 1 {
            return false;
        }

        let mut seen = FxHashSet::default();
        self.cells.iter().all(|c| seen.insert(*c))
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Cell;
    type IntoIter = std::slice::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

impl std::fmt::Display for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        const MAX_DIRECTIONS_DISPLAYED: usize = 20;

        write!(f, "Path({}, {}:", self.steps(), self.start())?;
        for d in self.directions().iter().take(MAX_DIRECTIONS_DISPLAYED) {
            write!(f, "{d}")?;
        }
        if self.len() > MAX_DIRECTIONS_DISPLAYED + 1 {
            write!(f, "…")?;
        }
        write!(f, ":{})", self.goal())
    }
}
