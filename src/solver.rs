//! Board tiling solver.
//!
//! Pipeline: board -> legal moves -> exact-cover matrix -> Dancing Links
//! search -> solved boards. Every solution is found; none is preferred over
//! another, and the order is fixed by the piece, orientation and anchor
//! order of the move generator.

use crate::board::Board;
use crate::calendar::{create_board, CalendarDate};
use crate::cover::ExactCover;
use crate::error::PuzzleError;
use crate::pieces::{catalog, Piece};

/// Finds every tiling of the free cells of `board` by the calendar pieces.
pub fn solve(board: &Board) -> Vec<Board> {
    solve_with(board, catalog())
}

/// Finds every tiling of the free cells of `board` using each unused piece
/// of `pieces` exactly once.
///
/// Returns an empty list when no tiling exists, for instance when some piece
/// has nowhere to go.
pub fn solve_with(board: &Board, pieces: &[Piece]) -> Vec<Board> {
    let matrix = ExactCover::build(board, pieces);
    let solutions = matrix.dlx().solve_all();
    solutions
        .iter()
        .map(|solution| matrix.to_board(solution))
        .collect()
}

/// Counts tilings without materializing boards.
pub fn count_solutions(board: &Board) -> usize {
    ExactCover::build(board, catalog()).dlx().solve_all().len()
}

/// Builds the board for `date` and solves it.
pub fn solve_date(date: &CalendarDate) -> Result<Vec<Board>, PuzzleError> {
    let board = create_board(date)?;
    Ok(solve(&board))
}
