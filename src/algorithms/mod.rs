//! Implementation of search algorithms.
//!
//! All four algorithms share one expansion loop ([`GridSearch`]) and only
//! differ in their [`Strategy`]: how the frontier orders cells and whether a
//! cell is settled as soon as it's discovered.

pub mod astar;
pub mod bfs;
pub mod dfs;
pub mod greedy;

use std::fmt::Debug;

use derive_more::Display;
use thiserror::Error;

use crate::grid::Cell;
use crate::grid::Grid;
use crate::path::Path;
use crate::search::Cost;
use crate::search::SearchStats;
use crate::search::SearchTree;

pub use astar::AStar;
pub use bfs::Bfs;
pub use dfs::Dfs;
pub use greedy::Greedy;

/// The distance of following straight lines
///
/// ```
/// use maze_search::algorithms::manhattan_distance;
/// use maze_search::grid::Cell;
///
/// assert_eq!(manhattan_distance(Cell::new(0, 0), Cell::new(2, 2)), 4);
/// assert_eq!(manhattan_distance(Cell::new(5, 1), Cell::new(2, 3)), 5);
/// ```
#[inline(always)]
#[must_use]
pub fn manhattan_distance(a: Cell, b: Cell) -> Cost {
    a.row.abs_diff(b.row) + a.col.abs_diff(b.col)
}

/// Frontier discipline of a search algorithm.
pub trait Strategy: Debug + Default {
    /// What the frontier stores per pushed cell.
    type Entry;

    const NAME: &'static str;

    /// Settle cells on discovery (`true`), or keep relaxing them while a
    /// strictly cheaper path shows up (`false`).
    fn should_mark_visited_on_discovery(&self) -> bool;

    /// Adds a cell reached with cost `g` and estimated distance `h` to go.
    fn push(&mut self, cell: Cell, g: Cost, h: Cost);

    /// Takes the next cell to expand.
    fn select_next(&mut self) -> Option<Cell>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A heap node for ranked frontiers
///
/// Heap nodes carry just ranking information and the cell. Ordering ignores
/// the cell entirely, ranks are expected to be unique.
#[derive(Copy, Clone, Debug)]
pub struct FrontierNode<R> {
    /// The rank of this node that defines how good it is.
    pub rank: R,
    pub cell: Cell,
}

/// PartialEq is forwarded to self.rank's PartialEq
impl<R: Ord> PartialEq for FrontierNode<R> {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.rank.eq(&other.rank)
    }
}
impl<R: Ord> Eq for FrontierNode<R> {}

/// PartialOrd is forwarded to Ord::cmp
impl<R: Ord> PartialOrd for FrontierNode<R> {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
/// Ord is forwarded to self.rank's Ord
impl<R: Ord> Ord for FrontierNode<R> {
    #[inline(always)]
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.rank.cmp(&other.rank)
    }
}

/// One search from `start` to `goal` over a grid.
///
/// `find_path` starts from scratch on every call, so repeated calls give the
/// same answer.
#[derive(Debug)]
pub struct GridSearch<'g, S: Strategy> {
    grid: &'g Grid,
    start: Cell,
    goal: Cell,

    search_tree: SearchTree,
    frontier: S,
    stats: SearchStats,
}

impl<'g, S: Strategy> GridSearch<'g, S> {
    #[must_use]
    pub fn new(grid: &'g Grid, start: Cell, goal: Cell) -> Self {
        Self {
            grid,
            start,
            goal,
            search_tree: SearchTree::new(grid),
            frontier: S::default(),
            stats: SearchStats::default(),
        }
    }

    /// Searches between the grid's own start and goal.
    #[must_use]
    pub fn on(grid: &'g Grid) -> Self {
        Self::new(grid, grid.start(), grid.goal())
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }
    pub fn search_tree(&self) -> &SearchTree {
        &self.search_tree
    }

    #[must_use]
    pub fn find_path(&mut self) -> Option<Path> {
        self.search_tree = SearchTree::new(self.grid);
        self.frontier = S::default();
        self.stats = SearchStats::default();

        let path = self.run();

        self.stats.reached = self.search_tree.reached();
        self.stats.tree_bytes = self.search_tree.memory_bytes();
        match &path {
            Some(p) => log::debug!("{}: found {p} ({:?})", S::NAME, self.stats),
            None => log::debug!(
                "{}: no path from {} to {} ({:?})",
                S::NAME,
                self.start,
                self.goal,
                self.stats
            ),
        }

        path
    }

    fn run(&mut self) -> Option<Path> {
        let (start, goal) = (self.start, self.goal);
        if !self.grid.is_valid_move(start) || !self.grid.is_valid_move(goal) {
            log::warn!(
                "{}: can't search from {start} to {goal} on {:?}, an endpoint is blocked",
                S::NAME,
                self.grid
            );
            return None;
        }
        if start == goal {
            return Some(Path::single(start));
        }

        let mark_on_discovery = self.frontier.should_mark_visited_on_discovery();
        self.search_tree.seed(start);
        self.push(start, 0);

        while let Some(current) = self.frontier.select_next() {
            self.stats.expanded += 1;
            log::trace!("{}: expanding {current}", S::NAME);

            if current == goal {
                let path = self.search_tree.path(goal);
                #[cfg(feature = "verify")]
                debug_assert!(path.is_valid_between(self.grid, start, goal));
                return Some(path);
            }

            let g = match self.search_tree.g(current) {
                Some(g) => g,
                None => unreachable!("Expanding unreached {current}"),
            };

            for (next, _direction) in self.grid.neighbours(current) {
                let tentative_g = g + 1;
                if mark_on_discovery {
                    if self.search_tree.is_reached(next) {
                        continue;
                    }
                } else if self
                    .search_tree
                    .g(next)
                    .is_some_and(|known| tentative_g >= known)
                {
                    continue;
                }

                self.search_tree.reach(next, current, tentative_g);
                self.push(next, tentative_g);
            }
        }

        None
    }

    #[inline(always)]
    fn push(&mut self, cell: Cell, g: Cost) {
        self.frontier.push(cell, g, manhattan_distance(cell, self.goal));

        self.stats.pushed += 1;
        let len = self.frontier.len();
        if len > self.stats.peak_frontier {
            self.stats.peak_frontier = len;
            self.stats.peak_frontier_bytes = len * std::mem::size_of::<S::Entry>();
        }
    }
}

/// The interchangeable search algorithms.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash)]
pub enum Algorithm {
    #[display("BFS")]
    Bfs,
    #[display("DFS")]
    Dfs,
    #[display("A*")]
    AStar,
    #[display("Greedy")]
    Greedy,
}

impl Algorithm {
    /// Menu order.
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Bfs,
        Algorithm::Dfs,
        Algorithm::AStar,
        Algorithm::Greedy,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Algorithm::Bfs => "bfs",
            Algorithm::Dfs => "dfs",
            Algorithm::AStar => "astar",
            Algorithm::Greedy => "greedy",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Algorithm::Bfs => "Breadth-First Search (BFS)",
            Algorithm::Dfs => "Depth-First Search (DFS)",
            Algorithm::AStar => "A* Search",
            Algorithm::Greedy => "Greedy Best-First Search",
        }
    }

    /// The 1-based number shown in the menu.
    pub fn menu_number(&self) -> usize {
        match self {
            Algorithm::Bfs => 1,
            Algorithm::Dfs => 2,
            Algorithm::AStar => 3,
            Algorithm::Greedy => 4,
        }
    }

    #[must_use]
    pub fn search(&self, grid: &Grid, start: Cell, goal: Cell) -> Option<Path> {
        self.search_with_stats(grid, start, goal).0
    }

    /// Searches between the grid's own start and goal.
    #[must_use]
    pub fn solve(&self, grid: &Grid) -> Option<Path> {
        self.search(grid, grid.start(), grid.goal())
    }

    #[must_use]
    pub fn search_with_stats(
        &self,
        grid: &Grid,
        start: Cell,
        goal: Cell,
    ) -> (Option<Path>, SearchStats) {
        fn run<S: Strategy>(grid: &Grid, start: Cell, goal: Cell) -> (Option<Path>, SearchStats) {
            let mut search = GridSearch::<S>::new(grid, start, goal);
            let path = search.find_path();
            (path, *search.stats())
        }

        match self {
            Algorithm::Bfs => run::<Bfs>(grid, start, goal),
            Algorithm::Dfs => run::<Dfs>(grid, start, goal),
            Algorithm::AStar => run::<AStar>(grid, start, goal),
            Algorithm::Greedy => run::<Greedy>(grid, start, goal),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum AlgorithmParseError {
    #[error("Unknown search algorithm '{0}', expected one of bfs, dfs, astar, greedy or 1-4")]
    Unknown(String),
}

impl std::str::FromStr for Algorithm {
    type Err = AlgorithmParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "bfs" => Ok(Algorithm::Bfs),
            "2" | "dfs" => Ok(Algorithm::Dfs),
            "3" | "astar" | "a*" => Ok(Algorithm::AStar),
            "4" | "greedy" => Ok(Algorithm::Greedy),
            _ => Err(AlgorithmParseError::Unknown(s.trim().to_string())),
        }
    }
}
