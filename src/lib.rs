//! **wall_mazes** carves rectangular wall mazes with a randomized depth first search and walks
//! them from the top left entrance to the bottom right exit, reporting every step as an event.

pub mod cells;
pub mod config;
pub mod events;
pub mod generators;
pub mod grid;
pub mod grid_displays;
pub mod maze;
pub mod pathing;
pub mod units;
mod utils;
