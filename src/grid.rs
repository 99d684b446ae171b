use std::error::Error;
use std::fmt;

use bit_set::BitSet;
use itertools::iproduct;
use petgraph::graph::{NodeIndex, UnGraph};
use rand::Rng;
use smallvec::SmallVec;

use crate::cells::{Cell, GridCoordinate, WallSide};
use crate::units::{ColumnsCount, EdgesCount, NodesCount, RowsCount};

pub type CoordinateSmallVec = SmallVec<[GridCoordinate; 4]>;

/// Order in which `Grid::neighbours` reports the adjacent cells.
/// Generation shuffles this list, solving relies on it for tie-breaking.
const NEIGHBOUR_ORDER: [WallSide; 4] = [WallSide::Left, WallSide::Right, WallSide::Top, WallSide::Bottom];

/// The two independent traversals that mark cells as visited.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum VisitPhase {
    Generation,
    Solving,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum GridError {
    ZeroDimension { rows: usize, columns: usize },
    TooLarge { rows: usize, columns: usize },
    InvalidCoordinate(GridCoordinate),
    NotBoundaryWall(GridCoordinate, WallSide),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            GridError::ZeroDimension { rows, columns } => {
                write!(f, "grid must have at least one row and one column, got {}x{}", rows, columns)
            }
            GridError::TooLarge { rows, columns } => {
                write!(f, "a {}x{} grid has more cells than can be addressed", rows, columns)
            }
            GridError::InvalidCoordinate(coord) => write!(f, "coordinate {} is outside the grid", coord),
            GridError::NotBoundaryWall(coord, side) => {
                write!(f, "the {} wall of {} is shared with a neighbouring cell", side, coord)
            }
        }
    }
}

impl Error for GridError {}

/// A rectangular arena of walled cells, stored row major.
///
/// Every interior edge is represented twice, once on each facing side of the two cells. The
/// only way to clear an interior wall is `remove_wall_pair`, which keeps both flags in step.
#[derive(Clone, Debug)]
pub struct Grid {
    cells: Vec<Cell>,
    rows: RowsCount,
    columns: ColumnsCount,
    generation_visited: BitSet,
    solving_visited: BitSet,
}

impl Grid {
    pub fn new(rows: usize, columns: usize) -> Result<Grid, GridError> {
        if rows == 0 || columns == 0 {
            return Err(GridError::ZeroDimension { rows, columns });
        }

        let size = rows.checked_mul(columns)
            .ok_or(GridError::TooLarge { rows, columns })?;
        Ok(Grid {
            cells: vec![Cell::default(); size],
            rows: RowsCount(rows),
            columns: ColumnsCount(columns),
            generation_visited: BitSet::with_capacity(size),
            solving_visited: BitSet::with_capacity(size),
        })
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        self.columns
    }

    /// Node count and the number of interior edges a fully carved grid could have.
    pub fn graph_size(&self) -> (NodesCount, EdgesCount) {
        let (RowsCount(rows), ColumnsCount(columns)) = (self.rows, self.columns);
        let interior_edges = rows * (columns - 1) + columns * (rows - 1);
        (NodesCount(self.size()), EdgesCount(interior_edges))
    }

    /// All cells in row major order.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, coord: GridCoordinate) -> Option<&Cell> {
        self.grid_coordinate_to_index(coord).map(|index| &self.cells[index])
    }

    /// Top left cell, its left wall is the maze entrance.
    #[inline]
    pub fn entrance(&self) -> GridCoordinate {
        GridCoordinate::new(0, 0)
    }

    /// Bottom right cell, its right wall is the maze exit.
    #[inline]
    pub fn exit(&self) -> GridCoordinate {
        GridCoordinate::new(self.rows.0 - 1, self.columns.0 - 1)
    }

    #[inline]
    pub fn is_valid_coordinate(&self, coord: GridCoordinate) -> bool {
        coord.row < self.rows.0 && coord.col < self.columns.0
    }

    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: GridCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.to_row_major_index(self.columns.0))
        } else {
            None
        }
    }

    pub fn random_cell<R: Rng>(&self, rng: &mut R) -> GridCoordinate {
        let index = rng.gen_range(0..self.size());
        GridCoordinate::from_row_major_index(index, self.columns.0)
    }

    /// Coordinates in row major order.
    pub fn iter(&self) -> impl Iterator<Item = GridCoordinate> {
        let (RowsCount(rows), ColumnsCount(columns)) = (self.rows, self.columns);
        iproduct!(0..rows, 0..columns).map(GridCoordinate::from)
    }

    /// The in-bounds cells to the left, right, top and bottom of `coord`, in that order.
    /// Whether a passage is open between them is not considered.
    pub fn neighbours(&self, coord: GridCoordinate) -> CoordinateSmallVec {
        NEIGHBOUR_ORDER.iter()
            .filter_map(|side| self.neighbour_at_side(coord, *side))
            .collect()
    }

    pub fn neighbour_at_side(&self, coord: GridCoordinate, side: WallSide) -> Option<GridCoordinate> {
        if !self.is_valid_coordinate(coord) {
            return None;
        }

        let GridCoordinate { row, col } = coord;
        let adjacent = match side {
            WallSide::Left if col > 0 => GridCoordinate::new(row, col - 1),
            WallSide::Right => GridCoordinate::new(row, col + 1),
            WallSide::Top if row > 0 => GridCoordinate::new(row - 1, col),
            WallSide::Bottom => GridCoordinate::new(row + 1, col),
            _ => return None,
        };

        if self.is_valid_coordinate(adjacent) {
            Some(adjacent)
        } else {
            None
        }
    }

    /// The wall pair `(a side, b side)` separating two adjacent cells, only while both walls
    /// still stand. `None` means either the cells are not adjacent or they are already
    /// connected by a passage.
    pub fn overlapping_walls(&self, a: GridCoordinate, b: GridCoordinate) -> Option<(WallSide, WallSide)> {
        let (a_side, b_side) = self.facing_sides(a, b)?;
        let a_cell = self.cell(a)?;
        let b_cell = self.cell(b)?;

        if a_cell.has_wall(a_side) && b_cell.has_wall(b_side) {
            Some((a_side, b_side))
        } else {
            None
        }
    }

    /// Are two adjacent cells joined by an open passage? A passage is open as soon as either
    /// facing wall is gone, the same rule the solver walks by.
    pub fn is_linked(&self, a: GridCoordinate, b: GridCoordinate) -> bool {
        self.facing_sides(a, b).is_some() && self.overlapping_walls(a, b).is_none()
    }

    /// Clear both walls of a pair reported by `overlapping_walls`.
    ///
    /// Returns false, changing nothing, unless `(a_side, b_side)` is the pair currently
    /// standing between `a` and `b`.
    pub fn remove_wall_pair(&mut self,
                            a: GridCoordinate,
                            a_side: WallSide,
                            b: GridCoordinate,
                            b_side: WallSide)
                            -> bool {
        if self.overlapping_walls(a, b) != Some((a_side, b_side)) {
            return false;
        }

        let columns = self.columns.0;
        let a_cleared = self.cells[a.to_row_major_index(columns)].clear_wall(a_side);
        let b_cleared = self.cells[b.to_row_major_index(columns)].clear_wall(b_side);
        a_cleared && b_cleared
    }

    /// Open a wall on the outer edge of the grid. Returns `Ok(false)` if it was already open.
    pub fn remove_boundary_wall(&mut self, coord: GridCoordinate, side: WallSide) -> Result<bool, GridError> {
        let index = self.grid_coordinate_to_index(coord)
            .ok_or(GridError::InvalidCoordinate(coord))?;

        if self.neighbour_at_side(coord, side).is_some() {
            return Err(GridError::NotBoundaryWall(coord, side));
        }

        Ok(self.cells[index].clear_wall(side))
    }

    pub fn is_visited(&self, coord: GridCoordinate, phase: VisitPhase) -> bool {
        self.grid_coordinate_to_index(coord)
            .map_or(false, |index| self.visited_set(phase).contains(index))
    }

    /// Mark a cell visited for a phase. Returns true only on the first visit.
    pub fn set_visited(&mut self, coord: GridCoordinate, phase: VisitPhase) -> bool {
        match self.grid_coordinate_to_index(coord) {
            Some(index) => {
                match phase {
                    VisitPhase::Generation => self.generation_visited.insert(index),
                    VisitPhase::Solving => self.solving_visited.insert(index),
                }
            }
            None => false,
        }
    }

    pub fn visited_count(&self, phase: VisitPhase) -> usize {
        self.visited_set(phase).len()
    }

    /// Forget a previous solve so the maze can be searched again. Walls and the generation
    /// marks are left alone.
    pub fn reset_solving(&mut self) {
        self.solving_visited.clear();
    }

    /// Number of open interior passages.
    pub fn links_count(&self) -> usize {
        self.iter()
            .map(|coord| {
                [WallSide::Right, WallSide::Bottom]
                    .iter()
                    .filter_map(|side| self.neighbour_at_side(coord, *side))
                    .filter(|neighbour| self.is_linked(coord, *neighbour))
                    .count()
            })
            .sum()
    }

    /// The maze as an undirected graph: one node per cell, with node index equal to the row
    /// major cell index, and one edge per open interior passage.
    pub fn passage_graph(&self) -> UnGraph<GridCoordinate, ()> {
        let (NodesCount(nodes), EdgesCount(edges)) = self.graph_size();
        let mut graph = UnGraph::with_capacity(nodes, edges);
        for coord in self.iter() {
            let _ = graph.add_node(coord);
        }

        let columns = self.columns.0;
        for coord in self.iter() {
            for side in [WallSide::Right, WallSide::Bottom].iter() {
                if let Some(neighbour) = self.neighbour_at_side(coord, *side) {
                    if self.is_linked(coord, neighbour) {
                        let _ = graph.add_edge(NodeIndex::new(coord.to_row_major_index(columns)),
                                               NodeIndex::new(neighbour.to_row_major_index(columns)),
                                               ());
                    }
                }
            }
        }

        graph
    }

    fn visited_set(&self, phase: VisitPhase) -> &BitSet {
        match phase {
            VisitPhase::Generation => &self.generation_visited,
            VisitPhase::Solving => &self.solving_visited,
        }
    }

    /// Pure coordinate arithmetic: which side of `a` faces `b`, and which side of `b` faces `a`.
    fn facing_sides(&self, a: GridCoordinate, b: GridCoordinate) -> Option<(WallSide, WallSide)> {
        NEIGHBOUR_ORDER.iter()
            .find(|side| self.neighbour_at_side(a, **side) == Some(b))
            .map(|side| (*side, side.opposite()))
    }
}
