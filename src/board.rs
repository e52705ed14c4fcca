//! Board representation for the calendar tiling puzzle.
//!
//! The board is a flat row-major array of cells. Cell indices are
//! `row * cols + col`, the same indices used by the exact-cover columns and
//! by the per-piece cell mapping.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::PuzzleError;

/// Rows of the calendar board.
pub const BOARD_ROWS: usize = 8;
/// Columns of the calendar board.
pub const BOARD_COLS: usize = 8;

/// State of a single board cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    /// Available for placement.
    Free,
    /// Permanently outside the playing area.
    Wall,
    /// Covered by the month, day or weekday of the puzzle.
    Blocker,
    /// Occupied by the named piece.
    Piece(char),
}

impl Cell {
    /// Glyph used by the text format.
    pub const fn glyph(self) -> char {
        match self {
            Self::Free => '.',
            Self::Wall => '#',
            Self::Blocker => '*',
            Self::Piece(name) => name,
        }
    }

    fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            '.' => Some(Self::Free),
            '#' => Some(Self::Wall),
            '*' => Some(Self::Blocker),
            'A'..='Z' => Some(Self::Piece(glyph)),
            _ => None,
        }
    }
}

/// A rectangular board plus the names of the pieces placed on it.
///
/// Placing a piece returns a new board; a board handed to the solver is
/// never modified.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    used_pieces: Vec<char>,
}

impl Board {
    /// Creates a board with every cell free.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![Cell::Free; rows * cols],
            used_pieces: Vec::new(),
        }
    }

    /// Creates a board whose cells are walls wherever `is_wall(row, col)`
    /// holds and free elsewhere.
    pub fn with_walls(rows: usize, cols: usize, is_wall: impl Fn(usize, usize) -> bool) -> Self {
        let cells = (0..rows * cols)
            .map(|index| {
                if is_wall(index / cols, index % cols) {
                    Cell::Wall
                } else {
                    Cell::Free
                }
            })
            .collect();
        Self {
            rows,
            cols,
            cells,
            used_pieces: Vec::new(),
        }
    }

    /// Parses a board from its text format (see [`Cell::glyph`]).
    ///
    /// Letters are read as placed pieces and recorded in `used_pieces` in
    /// first-seen order.
    pub fn from_text(lines: &[&str]) -> Result<Self, PuzzleError> {
        let cols = lines.first().map_or(0, |line| line.chars().count());
        if cols == 0 {
            return Err(PuzzleError::MalformedBoard {
                reason: "board has no cells".to_string(),
            });
        }

        let mut board = Self::new(lines.len(), cols);
        for (row, line) in lines.iter().enumerate() {
            if line.chars().count() != cols {
                return Err(PuzzleError::MalformedBoard {
                    reason: format!("row {row} has a different length"),
                });
            }
            for (col, glyph) in line.chars().enumerate() {
                let cell = Cell::from_glyph(glyph).ok_or_else(|| PuzzleError::MalformedBoard {
                    reason: format!("unknown glyph '{glyph}' at ({row}, {col})"),
                })?;
                if let Cell::Piece(name) = cell {
                    if !board.used_pieces.contains(&name) {
                        board.used_pieces.push(name);
                    }
                }
                board.cells[row * cols + col] = cell;
            }
        }
        Ok(board)
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells, blocked or not.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Converts `(row, col)` to a flat cell index.
    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Converts a flat cell index to `(row, col)`.
    #[inline]
    pub fn coord(&self, index: usize) -> (usize, usize) {
        (index / self.cols, index % self.cols)
    }

    /// The cell at `(row, col)`, or `None` when off the board.
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        if row < self.rows && col < self.cols {
            Some(self.cells[self.index(row, col)])
        } else {
            None
        }
    }

    /// The cell at a flat index, or `None` when off the board.
    pub fn cell(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Whether `(row, col)` is on the board and free.
    #[inline]
    pub fn is_free(&self, row: usize, col: usize) -> bool {
        self.get(row, col) == Some(Cell::Free)
    }

    /// Indices of free cells in row-major order.
    pub fn free_cells(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Cell::Free)
            .map(|(index, _)| index)
    }

    /// Number of cells in the given state.
    pub fn count(&self, state: Cell) -> usize {
        self.cells.iter().filter(|&&cell| cell == state).count()
    }

    /// Names of placed pieces, in placement order.
    pub fn used_pieces(&self) -> &[char] {
        &self.used_pieces
    }

    /// Whether every cell has been filled or blocked.
    pub fn is_complete(&self) -> bool {
        !self.cells.contains(&Cell::Free)
    }

    /// Marks a free cell as a date blocker.
    pub fn block(&mut self, index: usize) -> Result<(), PuzzleError> {
        match self.cells.get_mut(index) {
            Some(cell) if *cell == Cell::Free => {
                *cell = Cell::Blocker;
                Ok(())
            }
            _ => Err(PuzzleError::BlockedCellOccupied { index }),
        }
    }

    /// Returns a copy of this board with `piece` written into `cells`.
    ///
    /// Callers guarantee the cells are free and the piece is unused; both are
    /// checked in debug builds only.
    pub fn place(&self, piece: char, cells: impl IntoIterator<Item = usize>) -> Self {
        debug_assert!(
            !self.used_pieces.contains(&piece),
            "piece {piece} placed twice"
        );
        let mut placed = self.clone();
        for index in cells {
            debug_assert_eq!(placed.cells[index], Cell::Free, "cell {index} reassigned");
            placed.cells[index] = Cell::Piece(piece);
        }
        placed.used_pieces.push(piece);
        placed
    }

    /// Maps each placed piece to the ascending indices of the cells it covers.
    pub fn piece_cells(&self) -> BTreeMap<char, Vec<usize>> {
        let mut mapping: BTreeMap<char, Vec<usize>> = BTreeMap::new();
        for (index, cell) in self.cells.iter().enumerate() {
            if let Cell::Piece(name) = *cell {
                mapping.entry(name).or_default().push(index);
            }
        }
        mapping
    }
}

/// One line per row; see [`Cell::glyph`] for the symbols.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, line) in self.cells.chunks(self.cols.max(1)).enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            for cell in line {
                write!(f, "{}", cell.glyph())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_coord_roundtrip() {
        let board = Board::new(BOARD_ROWS, BOARD_COLS);
        for index in 0..board.len() {
            let (row, col) = board.coord(index);
            assert_eq!(board.index(row, col), index);
        }
        assert_eq!(board.coord(20), (2, 4));
    }

    #[test]
    fn test_text_roundtrip() {
        let lines = ["#..", ".*.", "AA."];
        let board = Board::from_text(&lines).unwrap();
        assert_eq!(board.to_string(), lines.join("\n"));
        assert_eq!(board.used_pieces(), &['A']);
        assert_eq!(board.count(Cell::Free), 5);
        assert_eq!(board.count(Cell::Wall), 1);
        assert_eq!(board.count(Cell::Blocker), 1);
    }

    #[test]
    fn test_from_text_rejects_bad_input() {
        assert!(matches!(
            Board::from_text(&["..", "."]),
            Err(PuzzleError::MalformedBoard { .. })
        ));
        assert!(matches!(
            Board::from_text(&[".?"]),
            Err(PuzzleError::MalformedBoard { .. })
        ));
        assert!(Board::from_text(&[]).is_err());
    }

    #[test]
    fn test_with_walls() {
        let board = Board::with_walls(2, 3, |row, col| row == col);
        assert_eq!(board.to_string(), "#..\n.#.");
        assert!(board.used_pieces().is_empty());
    }

    #[test]
    fn test_free_cells_row_major() {
        let board = Board::from_text(&["#.", ".#"]).unwrap();
        assert_eq!(board.free_cells().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_get_off_board() {
        let board = Board::new(2, 3);
        assert_eq!(board.get(1, 2), Some(Cell::Free));
        assert_eq!(board.get(2, 0), None);
        assert_eq!(board.get(0, 3), None);
        assert!(!board.is_free(5, 5));
    }

    #[test]
    fn test_block_requires_free_cell() {
        let mut board = Board::new(2, 2);
        board.block(3).unwrap();
        assert!(matches!(
            board.block(3),
            Err(PuzzleError::BlockedCellOccupied { index: 3 })
        ));
        assert!(board.block(4).is_err());
    }

    #[test]
    fn test_place_leaves_original_untouched() {
        let board = Board::new(2, 2);
        let placed = board.place('L', [0, 2, 3]);
        assert_eq!(board.count(Cell::Free), 4);
        assert!(board.used_pieces().is_empty());
        assert_eq!(placed.to_string(), "L.\nLL");
        assert_eq!(placed.used_pieces(), &['L']);
        assert!(!placed.is_complete());
    }

    #[test]
    fn test_piece_cells_mapping() {
        let board = Board::from_text(&["AB#", "AB*", "CCC"]).unwrap();
        let mapping = board.piece_cells();
        assert_eq!(mapping.len(), 3);
        assert_eq!(mapping[&'A'], vec![0, 3]);
        assert_eq!(mapping[&'B'], vec![1, 4]);
        assert_eq!(mapping[&'C'], vec![6, 7, 8]);
        assert!(board.is_complete());
    }
}
