//! Random wall placement.
//!
//! Every cell is independently turned into a wall with a fixed probability,
//! then the start and goal are stamped back on top. Nothing guarantees the
//! goal stays reachable.

use rand::Rng;

use crate::config::GridConfig;
use crate::config::GridError;
use crate::grid::CellKind;
use crate::grid::Grid;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MazeGenerator {
    wall_probability: f64,
}

impl MazeGenerator {
    pub fn new(wall_probability: f64) -> Result<Self, GridError> {
        if !(0.0..=1.0).contains(&wall_probability) {
            return Err(GridError::InvalidWallProbability(wall_probability));
        }
        Ok(Self { wall_probability })
    }

    pub fn wall_probability(&self) -> f64 {
        self.wall_probability
    }

    /// Redraws every cell of `grid` in place.
    pub fn populate<R: Rng>(&self, grid: &mut Grid, r: &mut R) {
        for i in 0..grid.len() {
            let kind = if r.random::<f64>() < self.wall_probability {
                CellKind::Wall
            } else {
                CellKind::Empty
            };
            grid.set_kind_at(i, kind);
        }
        grid.place_markers();

        log::debug!(
            "Generated {:?} with {} walls (p={})",
            grid,
            grid.wall_count(),
            self.wall_probability
        );
    }
}

/// Builds and populates a fresh grid for `config`.
pub fn generate<R: Rng>(config: &GridConfig, r: &mut R) -> Result<Grid, GridError> {
    let generator = MazeGenerator::new(config.wall_probability)?;
    let mut grid = Grid::empty(config)?;
    generator.populate(&mut grid, r);
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand_chacha::ChaCha8Rng;
    use rand_chacha::rand_core::SeedableRng;

    use crate::grid::Cell;

    #[test]
    fn no_walls_with_zero_probability() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let config = GridConfig::new(8, 5).with_wall_probability(0.0);
        let grid = generate(&config, &mut rng).unwrap();
        assert_eq!(grid.wall_count(), 0);
    }

    #[test]
    fn only_markers_survive_certain_walls() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let config = GridConfig::new(6, 6).with_wall_probability(1.0);
        let grid = generate(&config, &mut rng).unwrap();
        assert_eq!(grid.wall_count(), grid.len() - 2);
        assert_eq!(grid.kind(grid.start()), Some(CellKind::Start));
        assert_eq!(grid.kind(grid.goal()), Some(CellKind::Goal));
    }

    #[test]
    fn markers_are_always_passable() {
        let config = GridConfig::new(10, 10)
            .with_wall_probability(0.9)
            .with_start(Cell::new(3, 4))
            .with_goal(Cell::new(7, 1));
        for seed in 0..50 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let grid = generate(&config, &mut rng).unwrap();
            assert!(grid.is_valid_move(Cell::new(3, 4)));
            assert!(grid.is_valid_move(Cell::new(7, 1)));
        }
    }

    #[test]
    fn same_seed_same_grid() {
        let config = GridConfig::default();
        let a = generate(&config, &mut ChaCha8Rng::seed_from_u64(42)).unwrap();
        let b = generate(&config, &mut ChaCha8Rng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn wall_density_roughly_matches_probability() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let config = GridConfig::new(100, 100).with_wall_probability(0.2);
        let grid = generate(&config, &mut rng).unwrap();
        let density = grid.wall_count() as f64 / grid.len() as f64;
        assert!((0.17..0.23).contains(&density), "density={density}");
    }

    #[test]
    fn populate_overwrites_previous_walls() {
        let mut grid = Grid::empty(&GridConfig::new(4, 4)).unwrap();
        for i in 0..grid.len() {
            grid.set_wall(grid.cell_at(i));
        }
        MazeGenerator::new(0.0)
            .unwrap()
            .populate(&mut grid, &mut ChaCha8Rng::seed_from_u64(1));
        assert_eq!(grid.wall_count(), 0);
    }

    #[test]
    fn rejects_invalid_probability() {
        assert_eq!(
            MazeGenerator::new(1.5),
            Err(GridError::InvalidWallProbability(1.5))
        );
        let config = GridConfig::default().with_wall_probability(-1.0);
        assert!(generate(&config, &mut ChaCha8Rng::seed_from_u64(0)).is_err());
    }
}
