//! Brute-force reference solver used to cross-check the Dancing Links
//! search. Clones the board at every step and always fills the first free
//! cell, so each tiling is reached exactly once.

use crate::board::Board;
use crate::moves::Move;
use crate::pieces::Piece;

pub fn solve(board: &Board, pieces: &[Piece]) -> Vec<Board> {
    let mut solutions = Vec::new();
    search(board, pieces, &mut solutions);
    solutions
}

fn search(board: &Board, pieces: &[Piece], solutions: &mut Vec<Board>) {
    let Some(target) = board.free_cells().next() else {
        if pieces
            .iter()
            .all(|piece| board.used_pieces().contains(&piece.name))
        {
            solutions.push(board.clone());
        }
        return;
    };
    let (target_row, target_col) = board.coord(target);

    for piece in pieces {
        if board.used_pieces().contains(&piece.name) {
            continue;
        }
        for orientation in &piece.orientations {
            // the first filled cell of the orientation must land on the target
            let Some((r, c)) = orientation.filled_cells().next() else {
                continue;
            };
            if target_row < r || target_col < c {
                continue;
            }
            let mv = Move {
                piece: piece.name,
                orientation,
                row: target_row - r,
                col: target_col - c,
            };
            let fits = orientation
                .filled_cells()
                .all(|(dr, dc)| board.is_free(mv.row + dr, mv.col + dc));
            if fits {
                search(&board.place(piece.name, mv.cells(board)), pieces, solutions);
            }
        }
    }
}
