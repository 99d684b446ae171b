use std::error::Error;
use std::fmt;

use log::info;
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;

use crate::cells::GridCoordinate;
use crate::config::MazeConfig;
use crate::events::EventSink;
use crate::generators;
use crate::grid::{Grid, GridError};
use crate::pathing::{self, SolveError};

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum MazeError {
    Grid(GridError),
    Solve(SolveError),
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            MazeError::Grid(ref e) => fmt::Display::fmt(e, f),
            MazeError::Solve(ref e) => fmt::Display::fmt(e, f),
        }
    }
}

impl Error for MazeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            MazeError::Grid(ref e) => Some(e),
            MazeError::Solve(ref e) => Some(e),
        }
    }
}

impl From<GridError> for MazeError {
    fn from(e: GridError) -> MazeError {
        MazeError::Grid(e)
    }
}

impl From<SolveError> for MazeError {
    fn from(e: SolveError) -> MazeError {
        MazeError::Solve(e)
    }
}

/// A grid together with the random source that carves it.
///
/// The grid is only ever changed by `generate` and `solve`, in that order. Read it back with
/// `grid`.
#[derive(Debug)]
pub struct Maze {
    grid: Grid,
    rng: XorShiftRng,
    solve: bool,
}

impl Maze {
    pub fn new(config: &MazeConfig) -> Result<Maze, GridError> {
        let grid = Grid::new(config.rows, config.columns)?;
        let rng = match config.seed {
            Some(seed) => XorShiftRng::seed_from_u64(seed),
            None => XorShiftRng::from_entropy(),
        };

        Ok(Maze {
            grid,
            rng,
            solve: config.solve,
        })
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Carve the maze from a random start cell.
    pub fn generate<S: EventSink>(&mut self, sink: &mut S) -> Result<usize, GridError> {
        generators::recursive_backtracker(&mut self.grid, &mut self.rng, sink)
    }

    /// Carve the maze from a chosen start cell.
    pub fn generate_from<S: EventSink>(&mut self, start: GridCoordinate, sink: &mut S) -> Result<usize, GridError> {
        generators::carve_passages_from(&mut self.grid, &mut self.rng, start, sink)
    }

    pub fn solve<S: EventSink>(&mut self, sink: &mut S) -> Result<Vec<GridCoordinate>, SolveError> {
        pathing::solve(&mut self.grid, sink)
    }

    /// Generate, then solve if the configuration asks for it. Returns the solved path, if any.
    pub fn run<S: EventSink>(&mut self, sink: &mut S) -> Result<Option<Vec<GridCoordinate>>, MazeError> {
        let carved = self.generate(sink)?;
        info!("carved a {}x{} maze with {} passages",
              self.grid.rows().0,
              self.grid.columns().0,
              carved);

        if !self.solve {
            return Ok(None);
        }

        let path = self.solve(sink)?;
        info!("found a path of {} cells", path.len());
        Ok(Some(path))
    }
}
