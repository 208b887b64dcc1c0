//! Text rendering of grids and paths.

use owo_colors::OwoColorize;

use crate::grid::CellKind;
use crate::grid::Grid;
use crate::path::Path;

const PATH_MARK: char = 'P';

/// A printable view of a grid, optionally with a path drawn over it.
///
/// Path cells are drawn last, so they cover the start and goal markers too.
pub struct GridView<'a> {
    grid: &'a Grid,
    path: Option<&'a Path>,
    colored: bool,
}

impl<'a> GridView<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        Self {
            grid,
            path: None,
            colored: false,
        }
    }

    pub fn with_path(mut self, path: &'a Path) -> Self {
        self.path = Some(path);
        self
    }

    /// Emits ANSI colours. Let `anstream` strip them when unsupported.
    pub fn colored(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    fn write_kind(&self, f: &mut std::fmt::Formatter, kind: CellKind) -> std::fmt::Result {
        if !self.colored {
            return write!(f, "{kind}");
        }
        match kind {
            CellKind::Empty => write!(f, "{kind}"),
            CellKind::Wall => write!(f, "{}", kind.dimmed()),
            CellKind::Start => write!(f, "{}", kind.blue().bold()),
            CellKind::Goal => write!(f, "{}", kind.yellow().bold()),
        }
    }
}

impl std::fmt::Display for GridView<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut on_path = vec![false; self.grid.len()];
        if let Some(path) = self.path {
            for cell in path {
                if self.grid.contains(*cell) {
                    on_path[self.grid.index(*cell)] = true;
                }
            }
        }

        for row in 0..self.grid.height() {
            for (col, kind) in self.grid.row(row).iter().enumerate() {
                if on_path[row * self.grid.width() + col] {
                    if self.colored {
                        write!(f, "{}", PATH_MARK.green().bold())?;
                    } else {
                        write!(f, "{PATH_MARK}")?;
                    }
                } else {
                    self.write_kind(f, *kind)?;
                }
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::algorithms::Algorithm;

    #[test]
    fn plain_grid() {
        let text = "S #\n # \n  G\n";
        let grid = Grid::try_from(text).unwrap();
        assert_eq!(GridView::new(&grid).to_string(), text);
    }

    #[test]
    fn path_overlay_covers_markers() {
        let grid = Grid::try_from("S.#\n...\n#.G\n").unwrap();
        let path = Algorithm::Bfs.solve(&grid).unwrap();
        assert_eq!(
            GridView::new(&grid).with_path(&path).to_string(),
            "PP#\n PP\n# P\n"
        );
        // The grid itself is untouched.
        assert_eq!(grid.to_string(), "S #\n   \n# G\n");
    }

    #[test]
    fn colored_output_keeps_layout() {
        let grid = Grid::try_from("S#\n.G\n").unwrap();
        let colored = GridView::new(&grid).colored(true).to_string();
        assert!(colored.contains('\u{1b}'));

        let stripped: String = anstream::adapter::strip_str(&colored).to_string();
        assert_eq!(stripped, "S#\n G\n");
    }
}
