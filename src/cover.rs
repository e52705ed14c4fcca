//! Reduction of board tiling to exact cover, and the way back.
//!
//! Columns are one per unused piece (catalog order) followed by one per free
//! cell (row-major). Each legal move becomes a row with a 1 in its piece
//! column and in each cell column it covers. Moves are generated once against
//! the starting board.

use rustc_hash::FxHashMap;

use crate::board::Board;
use crate::dlx::Dlx;
use crate::moves::legal_moves;
use crate::pieces::Piece;

/// What an exact-cover column stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Column {
    /// The named piece must be used exactly once.
    Piece(char),
    /// The board cell with this index must be covered exactly once.
    Cell(usize),
}

/// The exact-cover matrix of one board, in sparse row form.
#[derive(Clone, Debug)]
pub struct ExactCover {
    board: Board,
    columns: Vec<Column>,
    /// Column indices holding a 1, ascending, one entry per move.
    rows: Vec<Vec<usize>>,
}

impl ExactCover {
    /// Builds the matrix for `board` using the pieces in `pieces`.
    pub fn build(board: &Board, pieces: &[Piece]) -> Self {
        let mut columns: Vec<Column> = pieces
            .iter()
            .filter(|piece| !board.used_pieces().contains(&piece.name))
            .map(|piece| Column::Piece(piece.name))
            .collect();
        columns.extend(board.free_cells().map(Column::Cell));

        let column_of: FxHashMap<Column, usize> = columns
            .iter()
            .enumerate()
            .map(|(index, &column)| (column, index))
            .collect();

        let rows = legal_moves(board, pieces)
            .iter()
            .map(|mv| {
                // legal moves only use unused pieces and free cells
                let mut row: Vec<usize> = std::iter::once(Column::Piece(mv.piece))
                    .chain(mv.cells(board).into_iter().map(Column::Cell))
                    .filter_map(|column| column_of.get(&column).copied())
                    .collect();
                row.sort_unstable();
                row
            })
            .collect();

        Self {
            board: board.clone(),
            columns,
            rows,
        }
    }

    /// The board the matrix was built from.
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<usize>] {
        &self.rows
    }

    /// Links the matrix into a fresh Dancing Links network.
    pub fn dlx(&self) -> Dlx {
        Dlx::new(self.columns.len(), &self.rows)
    }

    /// Writes the pieces of a solution onto a copy of the starting board.
    ///
    /// `solution` holds row ids as returned by [`Dlx::solve_all`]; pieces are
    /// recorded as used in the same order.
    pub fn to_board(&self, solution: &[usize]) -> Board {
        solution.iter().fold(self.board.clone(), |board, &row| {
            let mut piece = None;
            let mut cells = Vec::new();
            for &column in &self.rows[row] {
                match self.columns[column] {
                    Column::Piece(name) => piece = Some(name),
                    Column::Cell(index) => cells.push(index),
                }
            }
            match piece {
                Some(name) => board.place(name, cells),
                None => board,
            }
        })
    }
}
