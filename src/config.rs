//! Grid configuration.
//!
//! Everything a run needs to build a [`Grid`](crate::grid::Grid) before any
//! walls are drawn. Values are validated once and never clamped.

use derive_more::Display;
use thiserror::Error;

use crate::grid::Cell;
use crate::grid::Coord;

pub const DEFAULT_WIDTH: usize = 10;
pub const DEFAULT_HEIGHT: usize = 10;
pub const DEFAULT_WALL_PROBABILITY: f64 = 0.2;

/// Which of the two fixed endpoints a check refers to.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq)]
pub enum Endpoint {
    #[display("start")]
    Start,
    #[display("goal")]
    Goal,
}

#[derive(Debug, Error, PartialEq)]
pub enum GridError {
    #[error("Invalid dimensions {width}x{height}, both must be positive")]
    InvalidDimensions { width: usize, height: usize },
    #[error("Dimensions {width}x{height} are too large")]
    TooLarge { width: usize, height: usize },
    #[error("Wall probability {0} is outside [0, 1]")]
    InvalidWallProbability(f64),
    #[error("The {endpoint} cell {cell} is outside the {width}x{height} grid")]
    EndpointOutOfBounds {
        endpoint: Endpoint,
        cell: Cell,
        width: usize,
        height: usize,
    },
}

/// Checks that a `width`x`height` grid can be indexed.
///
/// `Coord::MAX` is reserved: off-grid neighbours wrap onto it, and the search
/// arena packs indices into `NonMaxU32`.
pub(crate) fn check_dimensions(width: usize, height: usize) -> Result<(), GridError> {
    if width == 0 || height == 0 {
        return Err(GridError::InvalidDimensions { width, height });
    }

    let limit = Coord::MAX as usize;
    match width.checked_mul(height) {
        Some(len) if width < limit && height < limit && len < limit => Ok(()),
        _ => Err(GridError::TooLarge { width, height }),
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GridConfig {
    pub width: usize,
    pub height: usize,
    pub wall_probability: f64,
    /// Defaults to the top-left corner.
    pub start: Option<Cell>,
    /// Defaults to the bottom-right corner.
    pub goal: Option<Cell>,
}

impl GridConfig {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn with_wall_probability(mut self, p: f64) -> Self {
        self.wall_probability = p;
        self
    }
    pub fn with_start(mut self, start: Cell) -> Self {
        self.start = Some(start);
        self
    }
    pub fn with_goal(mut self, goal: Cell) -> Self {
        self.goal = Some(goal);
        self
    }

    pub fn start(&self) -> Cell {
        self.start.unwrap_or(Cell::new(0, 0))
    }

    /// The goal cell, the bottom-right corner unless overridden.
    ///
    /// Only meaningful once the dimensions have been validated.
    pub fn goal(&self) -> Cell {
        self.goal.unwrap_or_else(|| {
            Cell::new(
                self.height.saturating_sub(1) as Coord,
                self.width.saturating_sub(1) as Coord,
            )
        })
    }

    pub fn validate(&self) -> Result<(), GridError> {
        check_dimensions(self.width, self.height)?;

        if !(0.0..=1.0).contains(&self.wall_probability) {
            return Err(GridError::InvalidWallProbability(self.wall_probability));
        }

        for (endpoint, cell) in [
            (Endpoint::Start, self.start()),
            (Endpoint::Goal, self.goal()),
        ] {
            if cell.row as usize >= self.height || cell.col as usize >= self.width {
                return Err(GridError::EndpointOutOfBounds {
                    endpoint,
                    cell,
                    width: self.width,
                    height: self.height,
                });
            }
        }

        Ok(())
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            wall_probability: DEFAULT_WALL_PROBABILITY,
            start: None,
            goal: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = GridConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.start(), Cell::new(0, 0));
        assert_eq!(config.goal(), Cell::new(9, 9));
    }

    #[test]
    fn goal_follows_dimensions() {
        let config = GridConfig::new(7, 3);
        assert_eq!(config.goal(), Cell::new(2, 6));
    }

    #[test]
    fn rejects_empty_dimensions() {
        assert_eq!(
            GridConfig::new(0, 4).validate(),
            Err(GridError::InvalidDimensions {
                width: 0,
                height: 4
            })
        );
        assert_eq!(
            GridConfig::new(4, 0).validate(),
            Err(GridError::InvalidDimensions {
                width: 4,
                height: 0
            })
        );
    }

    #[test]
    fn rejects_huge_dimensions() {
        let huge = Coord::MAX as usize;
        assert!(matches!(
            GridConfig::new(huge, 1).validate(),
            Err(GridError::TooLarge { .. })
        ));
        assert!(matches!(
            GridConfig::new(1 << 16, 1 << 16).validate(),
            Err(GridError::TooLarge { .. })
        ));
    }

    #[test]
    fn rejects_probabilities_outside_unit_interval() {
        for p in [-0.1, 1.01, f64::NAN, f64::INFINITY] {
            let config = GridConfig::default().with_wall_probability(p);
            assert!(matches!(
                config.validate(),
                Err(GridError::InvalidWallProbability(_))
            ));
        }
        for p in [0.0, 0.5, 1.0] {
            let config = GridConfig::default().with_wall_probability(p);
            assert_eq!(config.validate(), Ok(()));
        }
    }

    #[test]
    fn rejects_endpoints_outside_the_grid() {
        let config = GridConfig::new(3, 3).with_start(Cell::new(3, 0));
        assert_eq!(
            config.validate(),
            Err(GridError::EndpointOutOfBounds {
                endpoint: Endpoint::Start,
                cell: Cell::new(3, 0),
                width: 3,
                height: 3,
            })
        );

        let config = GridConfig::new(3, 3).with_goal(Cell::new(0, 5));
        assert!(matches!(
            config.validate(),
            Err(GridError::EndpointOutOfBounds {
                endpoint: Endpoint::Goal,
                ..
            })
        ));
    }
}
