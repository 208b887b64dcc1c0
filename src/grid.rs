//! The grid every search runs on.
//!
//! A `Grid` is a fixed `height x width` array of [`CellKind`]s with exactly one
//! start and one goal. It's built once (randomly or from text) and only read
//! while searching.

use derive_more::Display;
use smallvec::SmallVec;
use thiserror::Error;

use crate::config::GridConfig;
use crate::config::GridError;
use crate::config::check_dimensions;

pub type Coord = u32;

#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[display("({row},{col})")]
pub struct Cell {
    pub row: Coord,
    pub col: Coord,
}

impl Cell {
    pub const fn new(row: Coord, col: Coord) -> Self {
        Self { row, col }
    }

    /// Moves one step in `direction`.
    ///
    /// Stepping off the top or left edge wraps around to `Coord::MAX`, which is
    /// never inside a grid, so bounds are only ever checked by
    /// [`Grid::is_valid_move`].
    ///
    /// ```
    /// use maze_search::grid::Cell;
    /// use maze_search::grid::Direction;
    ///
    /// assert_eq!(Cell::new(1, 1).step(Direction::Right), Cell::new(1, 2));
    /// assert_eq!(Cell::new(1, 1).step(Direction::Up), Cell::new(0, 1));
    /// assert_eq!(Cell::new(0, 0).step(Direction::Left).col, u32::MAX);
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn step(&self, direction: Direction) -> Cell {
        let (d_row, d_col) = direction.delta();
        Cell {
            row: self.row.wrapping_add(d_row),
            col: self.col.wrapping_add(d_col),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum CellParseError {
    #[error("Expected 'row,col' but got '{0}'")]
    MissingSeparator(String),
    #[error("Invalid coordinate '{input}': {e}")]
    InvalidCoordinate {
        input: String,
        e: std::num::ParseIntError,
    },
}

impl std::str::FromStr for Cell {
    type Err = CellParseError;

    /// Parses `row,col`, optionally wrapped in parentheses.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let inner = s.trim().trim_start_matches('(').trim_end_matches(')');
        let (row, col) = inner
            .split_once(',')
            .ok_or_else(|| CellParseError::MissingSeparator(s.to_string()))?;

        let parse = |c: &str| {
            let c = c.trim();
            c.parse::<Coord>()
                .map_err(|e| CellParseError::InvalidCoordinate {
                    input: c.to_string(),
                    e,
                })
        };

        Ok(Cell::new(parse(row)?, parse(col)?))
    }
}

const PREV: Coord = Coord::MAX;
const SAME: Coord = 0;
const NEXT: Coord = 1;

/// The four moves, in the order every algorithm tries them.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash)]
pub enum Direction {
    #[display("→")]
    Right,
    #[display("↓")]
    Down,
    #[display("←")]
    Left,
    #[display("↑")]
    Up,
}

impl Direction {
    /// Expansion order. Changing it changes tie-breaking in every algorithm.
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Down,
        Direction::Left,
        Direction::Up,
    ];

    /// `(row, col)` offset as wrapping unsigned deltas.
    #[inline(always)]
    fn delta(self) -> (Coord, Coord) {
        #[rustfmt::skip]
        let delta = match self {
            Direction::Right => (SAME, NEXT),
            Direction::Down  => (NEXT, SAME),
            Direction::Left  => (SAME, PREV),
            Direction::Up    => (PREV, SAME),
        };
        delta
    }

    /// The direction leading from `from` to an adjacent `to`, if any.
    ///
    /// ```
    /// use maze_search::grid::Cell;
    /// use maze_search::grid::Direction;
    ///
    /// assert_eq!(Direction::between(Cell::new(2, 2), Cell::new(3, 2)), Some(Direction::Down));
    /// assert_eq!(Direction::between(Cell::new(2, 2), Cell::new(3, 3)), None);
    /// ```
    pub fn between(from: Cell, to: Cell) -> Option<Direction> {
        Direction::ALL.into_iter().find(|d| from.step(*d) == to)
    }
}

#[derive(Copy, Clone, Debug, Display, PartialEq, Eq)]
pub enum CellKind {
    #[display(" ")]
    Empty,
    #[display("#")]
    Wall,
    #[display("S")]
    Start,
    #[display("G")]
    Goal,
}

#[derive(Debug, Error, PartialEq)]
pub enum CellKindParseError {
    #[error("Invalid character '{0}' found.")]
    InvalidCharacter(char),
}

impl std::convert::TryFrom<char> for CellKind {
    type Error = CellKindParseError;

    fn try_from(ch: char) -> Result<Self, Self::Error> {
        match ch {
            ' ' | '.' => Ok(CellKind::Empty),
            '#' | '█' => Ok(CellKind::Wall),
            'S' => Ok(CellKind::Start),
            'G' => Ok(CellKind::Goal),
            ch => Err(CellKindParseError::InvalidCharacter(ch)),
        }
    }
}

/// Valid neighbours of a cell with the move reaching them.
pub type Neighbours = SmallVec<[(Cell, Direction); 4]>;

#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    /// Row-major, `cells[row * width + col]`.
    cells: Vec<CellKind>,
    start: Cell,
    goal: Cell,
}

impl Grid {
    /// A wall-less grid with its start and goal in place.
    pub fn empty(config: &GridConfig) -> Result<Self, GridError> {
        config.validate()?;
        let mut grid = Self {
            width: config.width,
            height: config.height,
            cells: vec![CellKind::Empty; config.width * config.height],
            start: config.start(),
            goal: config.goal(),
        };
        grid.place_markers();
        Ok(grid)
    }

    /// Writes the start and goal markers over whatever was there.
    ///
    /// When both are the same cell the goal marker wins.
    pub(crate) fn place_markers(&mut self) {
        let start = self.index(self.start);
        self.cells[start] = CellKind::Start;
        let goal = self.index(self.goal);
        self.cells[goal] = CellKind::Goal;
    }

    pub fn width(&self) -> usize {
        self.width
    }
    pub fn height(&self) -> usize {
        self.height
    }
    /// `(width, height)`
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }
    pub fn len(&self) -> usize {
        self.cells.len()
    }
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn start(&self) -> Cell {
        self.start
    }
    pub fn goal(&self) -> Cell {
        self.goal
    }

    #[inline(always)]
    pub fn contains(&self, cell: Cell) -> bool {
        (cell.row as usize) < self.height && (cell.col as usize) < self.width
    }

    /// The kind of an in-bounds cell.
    pub fn kind(&self, cell: Cell) -> Option<CellKind> {
        self.contains(cell).then(|| self.cells[self.index(cell)])
    }

    /// Whether a search may stand on `cell`: inside the grid and not a wall.
    #[inline(always)]
    pub fn is_valid_move(&self, cell: Cell) -> bool {
        self.contains(cell) && self.cells[self.index(cell)] != CellKind::Wall
    }

    /// Gets the valid neighbours of a cell, in [`Direction::ALL`] order.
    pub fn neighbours(&self, cell: Cell) -> Neighbours {
        let mut v = Neighbours::new();
        for direction in Direction::ALL {
            let next = cell.step(direction);
            if self.is_valid_move(next) {
                v.push((next, direction));
            }
        }
        v
    }

    /// Arena index of an in-bounds cell.
    #[inline(always)]
    pub fn index(&self, cell: Cell) -> usize {
        debug_assert!(self.contains(cell), "{cell} is outside {self:?}");
        cell.row as usize * self.width + cell.col as usize
    }

    #[inline(always)]
    pub fn cell_at(&self, index: usize) -> Cell {
        debug_assert!(index < self.len());
        Cell::new((index / self.width) as Coord, (index % self.width) as Coord)
    }

    /// Turns `cell` into a wall.
    ///
    /// The start and goal can't be walled, returns whether the cell changed.
    pub fn set_wall(&mut self, cell: Cell) -> bool {
        if !self.contains(cell) || cell == self.start || cell == self.goal {
            return false;
        }
        let i = self.index(cell);
        let changed = self.cells[i] != CellKind::Wall;
        self.cells[i] = CellKind::Wall;
        changed
    }

    #[inline(always)]
    pub(crate) fn set_kind_at(&mut self, index: usize, kind: CellKind) {
        self.cells[index] = kind;
    }

    pub fn wall_count(&self) -> usize {
        self.cells.iter().filter(|k| **k == CellKind::Wall).count()
    }

    pub fn row(&self, row: usize) -> &[CellKind] {
        &self.cells[row * self.width..(row + 1) * self.width]
    }

    pub fn cells(&self) -> impl Iterator<Item = (Cell, CellKind)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, kind)| (self.cell_at(i), *kind))
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", crate::render::GridView::new(self))
    }
}

impl std::fmt::Debug for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "Grid({}x{}, s:{}, g:{})",
            self.width, self.height, self.start, self.goal
        )
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum GridParseError {
    #[error("Empty input")]
    EmptyInput,
    #[error("Row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("Invalid cell {e} found at ({row},{col})")]
    InvalidCell {
        e: CellKindParseError,
        row: usize,
        col: usize,
    },
    #[error("No start cell 'S' found")]
    MissingStart,
    #[error("No goal cell 'G' found")]
    MissingGoal,
    #[error("Second start cell found at {0}")]
    DuplicateStart(Cell),
    #[error("Second goal cell found at {0}")]
    DuplicateGoal(Cell),
    #[error("Invalid grid: {0}")]
    Grid(#[from] GridError),
}

impl std::convert::TryFrom<&str> for Grid {
    type Error = GridParseError;

    /// Reads one row per line using the same characters `Display` writes.
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let lines: Vec<&str> = s.lines().collect();

        if lines.is_empty() || lines[0].is_empty() {
            return Err(GridParseError::EmptyInput);
        }

        let width = lines[0].chars().count();
        let height = lines.len();
        check_dimensions(width, height)?;

        let mut cells = Vec::with_capacity(width * height);
        let mut start = None;
        let mut goal = None;

        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(GridParseError::RaggedRow {
                    row,
                    expected: width,
                    found,
                });
            }

            for (col, ch) in line.chars().enumerate() {
                let kind = CellKind::try_from(ch)
                    .map_err(|e| GridParseError::InvalidCell { e, row, col })?;
                let cell = Cell::new(row as Coord, col as Coord);

                match kind {
                    CellKind::Start if start.replace(cell).is_some() => {
                        return Err(GridParseError::DuplicateStart(cell));
                    }
                    CellKind::Goal if goal.replace(cell).is_some() => {
                        return Err(GridParseError::DuplicateGoal(cell));
                    }
                    _ => {}
                }
                cells.push(kind);
            }
        }

        Ok(Grid {
            width,
            height,
            cells,
            start: start.ok_or(GridParseError::MissingStart)?,
            goal: goal.ok_or(GridParseError::MissingGoal)?,
        })
    }
}

impl std::str::FromStr for Grid {
    type Err = GridParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Grid::try_from(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use indoc::indoc;

    fn open_3x3() -> Grid {
        Grid::empty(&GridConfig::new(3, 3)).unwrap()
    }

    #[test]
    fn empty_grid_has_markers() {
        let grid = open_3x3();
        assert_eq!(grid.dimensions(), (3, 3));
        assert_eq!(grid.kind(Cell::new(0, 0)), Some(CellKind::Start));
        assert_eq!(grid.kind(Cell::new(2, 2)), Some(CellKind::Goal));
        assert_eq!(grid.kind(Cell::new(1, 1)), Some(CellKind::Empty));
        assert_eq!(grid.kind(Cell::new(3, 1)), None);
        assert_eq!(grid.wall_count(), 0);
    }

    #[test]
    fn empty_grid_rejects_bad_config() {
        assert!(Grid::empty(&GridConfig::new(0, 3)).is_err());
    }

    #[test]
    fn valid_moves() {
        let mut grid = open_3x3();
        assert!(grid.set_wall(Cell::new(1, 1)));
        assert!(!grid.set_wall(Cell::new(1, 1)));

        assert!(grid.is_valid_move(Cell::new(0, 0)));
        assert!(grid.is_valid_move(Cell::new(2, 2)));
        assert!(grid.is_valid_move(Cell::new(0, 1)));
        assert!(!grid.is_valid_move(Cell::new(1, 1)));
        assert!(!grid.is_valid_move(Cell::new(3, 0)));
        assert!(!grid.is_valid_move(Cell::new(0, 3)));
        assert!(!grid.is_valid_move(Cell::new(0, 0).step(Direction::Up)));
        assert!(!grid.is_valid_move(Cell::new(0, 0).step(Direction::Left)));
    }

    #[test]
    fn endpoints_cannot_be_walled() {
        let mut grid = open_3x3();
        assert!(!grid.set_wall(grid.start()));
        assert!(!grid.set_wall(grid.goal()));
        assert!(!grid.set_wall(Cell::new(5, 5)));
        assert_eq!(grid.wall_count(), 0);
    }

    #[test]
    fn neighbours_follow_direction_order() {
        let grid = open_3x3();

        let centre: Vec<_> = grid.neighbours(Cell::new(1, 1)).into_iter().collect();
        assert_eq!(
            centre,
            vec![
                (Cell::new(1, 2), Direction::Right),
                (Cell::new(2, 1), Direction::Down),
                (Cell::new(1, 0), Direction::Left),
                (Cell::new(0, 1), Direction::Up),
            ]
        );

        let corner: Vec<_> = grid.neighbours(Cell::new(0, 0)).into_iter().collect();
        assert_eq!(
            corner,
            vec![
                (Cell::new(0, 1), Direction::Right),
                (Cell::new(1, 0), Direction::Down),
            ]
        );
    }

    #[test]
    fn neighbours_skip_walls() {
        let mut grid = open_3x3();
        grid.set_wall(Cell::new(0, 1));
        let n: Vec<_> = grid
            .neighbours(Cell::new(0, 0))
            .into_iter()
            .map(|(c, _)| c)
            .collect();
        assert_eq!(n, vec![Cell::new(1, 0)]);
    }

    #[test]
    fn index_round_trip() {
        let grid = Grid::empty(&GridConfig::new(4, 3)).unwrap();
        assert_eq!(grid.index(Cell::new(2, 1)), 9);
        assert_eq!(grid.cell_at(9), Cell::new(2, 1));
        assert_eq!(grid.cell_at(grid.len() - 1), grid.goal());
    }

    #[test]
    fn start_equal_to_goal_keeps_goal_marker() {
        let config = GridConfig::new(2, 2)
            .with_start(Cell::new(1, 1))
            .with_goal(Cell::new(1, 1));
        let grid = Grid::empty(&config).unwrap();
        assert_eq!(grid.kind(Cell::new(1, 1)), Some(CellKind::Goal));
    }

    #[test]
    fn parse_grid() {
        let grid = Grid::try_from(indoc! {"
            S.#
            .#.
            ..G
        "})
        .unwrap();

        assert_eq!(grid.dimensions(), (3, 3));
        assert_eq!(grid.start(), Cell::new(0, 0));
        assert_eq!(grid.goal(), Cell::new(2, 2));
        assert_eq!(grid.wall_count(), 2);
        assert_eq!(grid.kind(Cell::new(0, 2)), Some(CellKind::Wall));
        assert_eq!(
            grid.row(1),
            &[CellKind::Empty, CellKind::Wall, CellKind::Empty]
        );
    }

    #[test]
    fn display_round_trips_through_parse() {
        let text = "S #\n # \n  G\n";
        let grid: Grid = text.parse().unwrap();
        assert_eq!(grid.to_string(), text);
    }

    #[test]
    fn parse_errors() {
        assert_eq!(Grid::try_from(""), Err(GridParseError::EmptyInput));
        assert_eq!(
            Grid::try_from("S.\n.G.\n"),
            Err(GridParseError::RaggedRow {
                row: 1,
                expected: 2,
                found: 3
            })
        );
        assert_eq!(
            Grid::try_from("S.\n.x\nG.\n"),
            Err(GridParseError::InvalidCell {
                e: CellKindParseError::InvalidCharacter('x'),
                row: 1,
                col: 1
            })
        );
        assert_eq!(Grid::try_from("..\n.G\n"), Err(GridParseError::MissingStart));
        assert_eq!(Grid::try_from("S.\n..\n"), Err(GridParseError::MissingGoal));
        assert_eq!(
            Grid::try_from("SS\n.G\n"),
            Err(GridParseError::DuplicateStart(Cell::new(0, 1)))
        );
        assert_eq!(
            Grid::try_from("SG\nG.\n"),
            Err(GridParseError::DuplicateGoal(Cell::new(1, 0)))
        );
    }

    #[test]
    fn parse_cells() {
        assert_eq!("3,4".parse::<Cell>(), Ok(Cell::new(3, 4)));
        assert_eq!(" (0, 9) ".parse::<Cell>(), Ok(Cell::new(0, 9)));
        assert_eq!(
            "34".parse::<Cell>(),
            Err(CellParseError::MissingSeparator("34".to_string()))
        );
        assert!(matches!(
            "-1,2".parse::<Cell>(),
            Err(CellParseError::InvalidCoordinate { .. })
        ));
        assert_eq!(Cell::new(3, 4).to_string(), "(3,4)");
    }
}
