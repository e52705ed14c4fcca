//! Legal placement enumeration.

use crate::board::Board;
use crate::geometry::Shape;
use crate::pieces::Piece;

/// A candidate placement: one orientation of a piece with its top-left
/// bounding-box corner at `(row, col)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Move<'a> {
    pub piece: char,
    pub orientation: &'a Shape,
    pub row: usize,
    pub col: usize,
}

impl Move<'_> {
    /// Board cell indices covered by this move, in row-major order.
    pub fn cells(&self, board: &Board) -> Vec<usize> {
        self.orientation
            .filled_cells()
            .map(|(r, c)| board.index(self.row + r, self.col + c))
            .collect()
    }
}

/// Enumerates every placement of every unused piece in `pieces` that lies
/// entirely on free cells of `board`.
///
/// Order: pieces as given, orientations in catalog order, anchors in
/// row-major order.
pub fn legal_moves<'a>(board: &Board, pieces: &'a [Piece]) -> Vec<Move<'a>> {
    pieces
        .iter()
        .filter(|piece| !board.used_pieces().contains(&piece.name))
        .flat_map(|piece| piece_moves(board, piece))
        .collect()
}

/// Placements of one piece in all its orientations.
pub fn piece_moves<'a>(board: &Board, piece: &'a Piece) -> Vec<Move<'a>> {
    piece
        .orientations
        .iter()
        .flat_map(|orientation| orientation_moves(board, piece.name, orientation))
        .collect()
}

/// Placements of a single orientation.
pub fn orientation_moves<'a>(board: &Board, name: char, orientation: &'a Shape) -> Vec<Move<'a>> {
    let mut moves = Vec::new();
    if orientation.height() > board.rows() || orientation.width() > board.cols() {
        return moves;
    }

    for row in 0..=board.rows() - orientation.height() {
        for col in 0..=board.cols() - orientation.width() {
            let fits = orientation
                .filled_cells()
                .all(|(r, c)| board.is_free(row + r, col + c));
            if fits {
                moves.push(Move {
                    piece: name,
                    orientation,
                    row,
                    col,
                });
            }
        }
    }
    moves
}
