use log::{debug, trace};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::cells::{GridCoordinate, WallSide};
use crate::events::EventSink;
use crate::grid::{CoordinateSmallVec, Grid, GridError, VisitPhase};

/// Apply the recursive backtracker maze generation algorithm to a fully walled grid,
/// starting from a random cell, then open the entrance and exit.
///
/// The start cell costs one `gen_range` draw from `rng` before any carving. See
/// `carve_passages_from` for how the rest of the random stream is consumed.
pub fn recursive_backtracker<R, S>(grid: &mut Grid, rng: &mut R, sink: &mut S) -> Result<usize, GridError>
    where R: Rng,
          S: EventSink
{
    let start = grid.random_cell(rng);
    carve_passages_from(grid, rng, start, sink)
}

/// Carve a perfect maze out of the grid with a randomised depth first walk from `start`, then
/// open the entrance and exit. Returns the number of interior passages carved.
///
/// On entering a cell it is marked visited and its neighbours (left, right, up, down) are
/// shuffled once with `SliceRandom::shuffle`. The neighbours are then tried in that shuffled
/// order. An already visited neighbour is skipped, which is what keeps the result a tree.
/// Otherwise the wall pair between the two cells is removed and the walk continues from the
/// neighbour, coming back to try the remaining neighbours once everything reachable from there
/// has been visited.
///
/// The walk keeps its own stack of `(cell, shuffled neighbours, next index)` frames instead of
/// recursing, so large grids cannot overflow the call stack. The visit order, and therefore the
/// use of the random source, is the same as the recursive formulation: a fixed seed and start
/// cell always produce the same maze.
///
/// Every cleared wall flag is reported to `sink`, the two sides of a passage back to back.
pub fn carve_passages_from<R, S>(grid: &mut Grid,
                                 rng: &mut R,
                                 start: GridCoordinate,
                                 sink: &mut S)
                                 -> Result<usize, GridError>
    where R: Rng,
          S: EventSink
{
    if !grid.is_valid_coordinate(start) {
        return Err(GridError::InvalidCoordinate(start));
    }
    debug!("carving {}x{} grid from {}", grid.rows().0, grid.columns().0, start);

    let mut carved = 0;
    let mut stack = vec![CarveFrame::enter(grid, rng, start)];

    while let Some(frame) = stack.last_mut() {
        let current = frame.coord;
        let neighbour = match frame.next_neighbour() {
            Some(n) => n,
            None => {
                // nothing left to try from here
                stack.pop();
                continue;
            }
        };

        if grid.is_visited(neighbour, VisitPhase::Generation) {
            continue;
        }

        if let Some((current_side, neighbour_side)) = grid.overlapping_walls(current, neighbour) {
            if grid.remove_wall_pair(current, current_side, neighbour, neighbour_side) {
                trace!("carve {} -> {}", current, neighbour);
                sink.on_wall_removed(current, current_side);
                sink.on_wall_removed(neighbour, neighbour_side);
                carved += 1;
            }
        }

        stack.push(CarveFrame::enter(grid, rng, neighbour));
    }

    open_entrance_and_exit(grid, sink)?;
    debug!("carved {} passages", carved);

    Ok(carved)
}

/// Open the left wall of the top left cell and the right wall of the bottom right cell.
/// These are single walls onto the outside of the grid, not passages between cells.
pub fn open_entrance_and_exit<S: EventSink>(grid: &mut Grid, sink: &mut S) -> Result<(), GridError> {
    let openings = [(grid.entrance(), WallSide::Left), (grid.exit(), WallSide::Right)];
    for &(coord, side) in openings.iter() {
        if grid.remove_boundary_wall(coord, side)? {
            sink.on_wall_removed(coord, side);
        }
    }
    Ok(())
}

struct CarveFrame {
    coord: GridCoordinate,
    neighbours: CoordinateSmallVec,
    next: usize,
}

impl CarveFrame {
    fn enter<R: Rng>(grid: &mut Grid, rng: &mut R, coord: GridCoordinate) -> CarveFrame {
        grid.set_visited(coord, VisitPhase::Generation);
        let mut neighbours = grid.neighbours(coord);
        neighbours.as_mut_slice().shuffle(rng);
        CarveFrame {
            coord,
            neighbours,
            next: 0,
        }
    }

    fn next_neighbour(&mut self) -> Option<GridCoordinate> {
        let neighbour = self.neighbours.get(self.next).cloned();
        if neighbour.is_some() {
            self.next += 1;
        }
        neighbour
    }
}
