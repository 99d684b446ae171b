use std::fmt;

use crate::cells::{GridCoordinate, WallSide};
use crate::grid::Grid;
use crate::units::{ColumnsCount, RowsCount};
use crate::utils::{fnv_hashset, FnvHashSet};

/// Supplies the three character body text of each cell when a grid is drawn as text.
pub trait GridDisplay {
    fn render_cell_body(&self, _: GridCoordinate) -> String {
        String::from("   ")
    }
}

#[derive(Debug)]
pub struct PathDisplay {
    on_path_coordinates: FnvHashSet<GridCoordinate>,
}
impl PathDisplay {
    pub fn new(path: &[GridCoordinate]) -> Self {
        let mut on_path_coordinates = fnv_hashset(path.len());
        on_path_coordinates.extend(path.iter().cloned());
        PathDisplay { on_path_coordinates }
    }
}
impl GridDisplay for PathDisplay {
    fn render_cell_body(&self, coord: GridCoordinate) -> String {
        if self.on_path_coordinates.contains(&coord) {
            String::from(" . ")
        } else {
            String::from("   ")
        }
    }
}

/// Box drawing rendering of a grid, optionally with cell bodies filled in by a `GridDisplay`.
///
/// The walls are drawn on a lattice of `(rows + 1) * (columns + 1)` corner points. A removed
/// boundary wall (the entrance and exit openings) shows up as a gap like any other passage.
pub struct GridRender<'a> {
    grid: &'a Grid,
    display: Option<&'a dyn GridDisplay>,
}

impl<'a> GridRender<'a> {
    pub fn new(grid: &'a Grid) -> GridRender<'a> {
        GridRender { grid, display: None }
    }

    pub fn with_display(self, display: &'a dyn GridDisplay) -> GridRender<'a> {
        GridRender { display: Some(display), ..self }
    }

    fn has_wall(&self, row: usize, col: usize, side: WallSide) -> bool {
        self.grid
            .cell(GridCoordinate::new(row, col))
            .map_or(false, |cell| cell.has_wall(side))
    }

    /// Wall along the top of lattice row `row`, spanning column `col`.
    fn horizontal_wall(&self, row: usize, col: usize) -> bool {
        self.has_wall(row, col, WallSide::Top) ||
        (row > 0 && self.has_wall(row - 1, col, WallSide::Bottom))
    }

    /// Wall along the left of lattice column `col`, spanning row `row`.
    fn vertical_wall(&self, row: usize, col: usize) -> bool {
        self.has_wall(row, col, WallSide::Left) ||
        (col > 0 && self.has_wall(row, col - 1, WallSide::Right))
    }

    fn corner(&self, row: usize, col: usize) -> &'static str {
        let RowsCount(rows_count) = self.grid.rows();
        let ColumnsCount(columns_count) = self.grid.columns();

        let left = col > 0 && self.horizontal_wall(row, col - 1);
        let right = col < columns_count && self.horizontal_wall(row, col);
        let up = row > 0 && self.vertical_wall(row - 1, col);
        let down = row < rows_count && self.vertical_wall(row, col);

        match (left, right, up, down) {
            (true, true, true, true) => WALL_LRUD,
            (true, true, true, false) => WALL_LRU,
            (true, true, false, true) => WALL_LRD,
            (true, false, true, true) => WALL_LUD,
            (false, true, true, true) => WALL_RUD,
            (true, true, false, false) => WALL_LR,
            (false, false, true, true) => WALL_UD,
            (false, true, true, false) => WALL_RU,
            (true, false, false, true) => WALL_LD,
            (true, false, true, false) => WALL_LU,
            (false, true, false, true) => WALL_RD,
            (true, false, false, false) => WALL_L,
            (false, true, false, false) => WALL_R,
            (false, false, true, false) => WALL_U,
            (false, false, false, true) => WALL_D,
            (false, false, false, false) => " ",
        }
    }
}

const WALL_L: &str = "╴";
const WALL_R: &str = "╶";
const WALL_U: &str = "╵";
const WALL_D: &str = "╷";
const WALL_LR_3: &str = "───";
const WALL_LR: &str = "─";
const WALL_UD: &str = "│";
const WALL_LD: &str = "┐";
const WALL_RU: &str = "└";
const WALL_LU: &str = "┘";
const WALL_RD: &str = "┌";
const WALL_LRU: &str = "┴";
const WALL_LRD: &str = "┬";
const WALL_LRUD: &str = "┼";
const WALL_RUD: &str = "├";
const WALL_LUD: &str = "┤";

impl<'a> fmt::Display for GridRender<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let RowsCount(rows_count) = self.grid.rows();
        let ColumnsCount(columns_count) = self.grid.columns();
        let default_cell_body = String::from("   ");

        let mut output = String::new();
        for row in 0..=rows_count {

            // Corners and horizontal walls along the top of `row`
            output.push_str(self.corner(row, 0));
            for col in 0..columns_count {
                output.push_str(if self.horizontal_wall(row, col) { WALL_LR_3 } else { "   " });
                output.push_str(self.corner(row, col + 1));
            }
            output.push('\n');

            if row == rows_count {
                break;
            }

            // Cell bodies, each preceded by its west wall
            for col in 0..columns_count {
                output.push_str(if self.vertical_wall(row, col) { WALL_UD } else { " " });
                match self.display {
                    Some(displayer) => {
                        output.push_str(&displayer.render_cell_body(GridCoordinate::new(row, col)))
                    }
                    None => output.push_str(&default_cell_body),
                }
            }
            output.push_str(if self.vertical_wall(row, columns_count) { WALL_UD } else { " " });
            output.push('\n');
        }

        write!(f, "{}", output)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&GridRender::new(self), f)
    }
}
