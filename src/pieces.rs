//! Puzzle piece definitions.
//!
//! Each piece is a canonical 0/1 shape plus the distinct orientations derived
//! from it. The static table is validated at compile time and expanded into
//! orientations once per process.

use std::sync::LazyLock;

use crate::geometry::{all_orientations, check_rows, Shape};

/// Number of pieces in the calendar puzzle.
pub const NUM_PIECES: usize = 10;

/// Static description of one piece: a single-letter name and its rows.
pub struct PieceDef {
    pub name: char,
    pub rows: &'static [&'static [u8]],
}

impl PieceDef {
    /// Creates a piece definition with compile-time validation.
    pub const fn new(name: char, rows: &'static [&'static [u8]]) -> Self {
        assert!(name.is_ascii_uppercase(), "piece names must be A-Z");
        assert!(check_rows(rows).is_ok(), "malformed piece shape");
        Self { name, rows }
    }
}

/// The ten calendar pieces: seven pentominoes and three tetrominoes.
///
/// Catalog order is significant: it fixes the piece column order of the
/// exact-cover matrix and therefore the order solutions are found in.
pub const PIECES: [PieceDef; NUM_PIECES] = [
    PieceDef::new('X', &[&[0, 1, 0], &[1, 1, 1], &[0, 1, 0]]),
    PieceDef::new('F', &[&[0, 1, 1], &[1, 1, 0], &[0, 1, 0]]),
    PieceDef::new('U', &[&[1, 0, 1], &[1, 1, 1]]),
    PieceDef::new('W', &[&[1, 0, 0], &[1, 1, 0], &[0, 1, 1]]),
    PieceDef::new('P', &[&[1, 1], &[1, 1], &[1, 0]]),
    PieceDef::new('N', &[&[0, 1], &[1, 1], &[1, 0], &[1, 0]]),
    PieceDef::new('V', &[&[1, 0, 0], &[1, 0, 0], &[1, 1, 1]]),
    // tetrominoes
    PieceDef::new('T', &[&[1, 1, 1], &[0, 1, 0]]),
    PieceDef::new('S', &[&[0, 1, 1], &[1, 1, 0]]),
    PieceDef::new('L', &[&[1, 0], &[1, 0], &[1, 1]]),
];

const _: () = {
    // names must be unique across the catalog
    let mut i = 0;
    while i < PIECES.len() {
        let mut j = i + 1;
        while j < PIECES.len() {
            assert!(PIECES[i].name != PIECES[j].name, "duplicate piece name");
            j += 1;
        }
        i += 1;
    }
};

/// A piece with its orientations expanded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Piece {
    pub name: char,
    pub canonical: Shape,
    /// Distinct orientations, canonical first.
    pub orientations: Vec<Shape>,
}

impl Piece {
    pub fn new(name: char, canonical: Shape) -> Self {
        let orientations = all_orientations(&canonical);
        Self {
            name,
            canonical,
            orientations,
        }
    }

    /// Number of board cells this piece covers.
    pub fn cell_count(&self) -> usize {
        self.canonical.cell_count()
    }
}

static CATALOG: LazyLock<Vec<Piece>> = LazyLock::new(|| {
    PIECES
        .iter()
        .map(|def| Piece::new(def.name, Shape::from_checked_rows(def.rows)))
        .collect()
});

/// The calendar pieces in catalog order.
pub fn catalog() -> &'static [Piece] {
    &CATALOG
}

/// Looks up a catalog piece by name.
pub fn piece(name: char) -> Option<&'static Piece> {
    catalog().iter().find(|piece| piece.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_order_and_names() {
        let names: String = catalog().iter().map(|piece| piece.name).collect();
        assert_eq!(names, "XFUWPNVTSL");
    }

    #[test]
    fn test_orientation_counts_per_piece() {
        let counts: Vec<(char, usize)> = catalog()
            .iter()
            .map(|piece| (piece.name, piece.orientations.len()))
            .collect();
        assert_eq!(
            counts,
            vec![
                ('X', 1),
                ('F', 8),
                ('U', 4),
                ('W', 4),
                ('P', 8),
                ('N', 8),
                ('V', 4),
                ('T', 4),
                ('S', 4),
                ('L', 8),
            ]
        );
    }

    #[test]
    fn test_orientations_are_distinct_and_same_size() {
        for piece in catalog() {
            let orientations = &piece.orientations;
            assert!((1..=8).contains(&orientations.len()));
            assert_eq!(orientations[0], piece.canonical);
            for (i, a) in orientations.iter().enumerate() {
                assert_eq!(a.cell_count(), piece.cell_count());
                for b in &orientations[i + 1..] {
                    assert_ne!(a, b, "piece {} has duplicate orientations", piece.name);
                }
            }
        }
    }

    #[test]
    fn test_pieces_cover_calendar_free_cells() {
        let total: usize = catalog().iter().map(Piece::cell_count).sum();
        assert_eq!(total, 47);
    }

    #[test]
    fn test_piece_lookup() {
        assert_eq!(piece('N').map(|p| p.cell_count()), Some(5));
        assert_eq!(piece('T').map(|p| p.cell_count()), Some(4));
        assert!(piece('Z').is_none());
    }
}
