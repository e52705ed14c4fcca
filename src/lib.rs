//! Calendar Puzzle Solver Library
//!
//! Enumerates every way to tile the free cells of the calendar board, left
//! after covering a month, a day and a weekday, with the ten puzzle pieces.
//! Tiling is reduced to exact cover and solved with Dancing Links.

pub mod board;
pub mod calendar;
pub mod cover;
pub mod dlx;
pub mod error;
pub mod geometry;
pub mod moves;
pub mod persistence;
pub mod pieces;
pub mod solver;
pub mod statistics;

#[cfg(test)]
mod oracle;

pub use board::{Board, Cell};
pub use calendar::{create_board, CalendarDate, Month, Weekday};
pub use error::PuzzleError;
pub use solver::{count_solutions, solve, solve_date};
