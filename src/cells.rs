use std::convert::From;
use std::fmt;

/// Position of a cell in a grid. Rows increase downwards.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct GridCoordinate {
    pub row: usize,
    pub col: usize,
}

impl GridCoordinate {
    pub fn new(row: usize, col: usize) -> GridCoordinate {
        GridCoordinate { row, col }
    }

    /// Row major index of this coordinate in a grid with `columns` columns.
    #[inline]
    pub fn to_row_major_index(self, columns: usize) -> usize {
        self.row * columns + self.col
    }

    #[inline]
    pub fn from_row_major_index(index: usize, columns: usize) -> GridCoordinate {
        GridCoordinate::new(index / columns, index % columns)
    }
}

impl From<(usize, usize)> for GridCoordinate {
    fn from(row_col_pair: (usize, usize)) -> GridCoordinate {
        GridCoordinate::new(row_col_pair.0, row_col_pair.1)
    }
}

impl fmt::Display for GridCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The four sides of a cell, in clockwise order.
/// The discriminant is the index into a cell's wall flags.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub enum WallSide {
    Top = 0,
    Right = 1,
    Bottom = 2,
    Left = 3,
}

impl WallSide {
    pub const ALL: [WallSide; 4] = [WallSide::Top, WallSide::Right, WallSide::Bottom, WallSide::Left];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The side of an adjacent cell that faces this side.
    pub fn opposite(self) -> WallSide {
        match self {
            WallSide::Top => WallSide::Bottom,
            WallSide::Right => WallSide::Left,
            WallSide::Bottom => WallSide::Top,
            WallSide::Left => WallSide::Right,
        }
    }
}

impl fmt::Display for WallSide {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match *self {
            WallSide::Top => "top",
            WallSide::Right => "right",
            WallSide::Bottom => "bottom",
            WallSide::Left => "left",
        };
        f.write_str(name)
    }
}

/// A grid cell is just its four walls. Visitation state lives on the `Grid`,
/// one set per phase, and any renderer resource is correlated by coordinate.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Cell {
    walls: [bool; 4],
}

impl Default for Cell {
    fn default() -> Cell {
        Cell { walls: [true; 4] }
    }
}

impl Cell {
    #[inline]
    pub fn has_wall(&self, side: WallSide) -> bool {
        self.walls[side.index()]
    }

    /// Wall flags in `[top, right, bottom, left]` order, `true` meaning the wall is present.
    #[inline]
    pub fn walls(&self) -> [bool; 4] {
        self.walls
    }

    /// Returns true if the wall was present and is now cleared.
    pub(crate) fn clear_wall(&mut self, side: WallSide) -> bool {
        let had_wall = self.walls[side.index()];
        self.walls[side.index()] = false;
        had_wall
    }
}
