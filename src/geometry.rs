//! Planar shape transformations.
//!
//! A square grid shape has 8 symmetries (the dihedral group of the square).
//! These are generated as the 4 flip combinations applied to the shape and
//! to its transpose:
//! - 0: identity
//! - 1: vertical flip
//! - 2: horizontal flip
//! - 3: both flips
//! - 4..=7: the same four, applied to the transpose
//!
//! Ordering note: the move generator emits placements in orientation order,
//! so this order fixes the order in which solutions are discovered.

use crate::error::PuzzleError;

/// A rectangular 0/1 matrix describing the cells a piece covers.
///
/// Cells are stored row-major; `true` marks a covered cell.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Shape {
    height: usize,
    width: usize,
    cells: Vec<bool>,
}

/// Checks that `rows` describe a well-formed shape.
///
/// A shape must be non-empty, rectangular, contain only 0/1 entries and touch
/// every edge of its bounding box. Usable in const context so the static
/// piece table is validated at compile time.
pub const fn check_rows(rows: &[&[u8]]) -> Result<(), &'static str> {
    if rows.is_empty() || rows[0].is_empty() {
        return Err("shape has no cells");
    }
    let width = rows[0].len();
    let height = rows.len();

    let mut top = false;
    let mut bottom = false;
    let mut left = false;
    let mut right = false;

    let mut r = 0;
    while r < height {
        if rows[r].len() != width {
            return Err("rows have different lengths");
        }
        let mut c = 0;
        while c < width {
            match rows[r][c] {
                0 => {}
                1 => {
                    top |= r == 0;
                    bottom |= r == height - 1;
                    left |= c == 0;
                    right |= c == width - 1;
                }
                _ => return Err("cells must be 0 or 1"),
            }
            c += 1;
        }
        r += 1;
    }

    if !(top && bottom && left && right) {
        return Err("shape has an empty border row or column");
    }
    Ok(())
}

impl Shape {
    /// Builds a shape from 0/1 rows, rejecting malformed input.
    pub fn from_rows(rows: &[&[u8]]) -> Result<Self, PuzzleError> {
        check_rows(rows).map_err(|reason| PuzzleError::MalformedShape {
            reason: reason.to_string(),
        })?;
        Ok(Self::from_checked_rows(rows))
    }

    /// Builds a shape from rows that already passed [`check_rows`].
    pub(crate) fn from_checked_rows(rows: &[&[u8]]) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.len());
        let cells = rows
            .iter()
            .flat_map(|row| row.iter().map(|&cell| cell == 1))
            .collect();
        Self {
            height,
            width,
            cells,
        }
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns whether cell `(row, col)` is covered. Out-of-range cells are not.
    #[inline]
    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width && self.cells[row * self.width + col]
    }

    /// Covered cells as `(row, col)` offsets, in row-major order.
    pub fn filled_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &filled)| filled)
            .map(move |(index, _)| (index / width, index % width))
    }

    /// Number of covered cells.
    pub fn cell_count(&self) -> usize {
        self.cells.iter().filter(|&&filled| filled).count()
    }

    /// Mirrors the shape top to bottom.
    pub fn flip_vertical(&self) -> Self {
        self.remap(self.height, self.width, |r, c| (self.height - 1 - r, c))
    }

    /// Mirrors the shape left to right.
    pub fn flip_horizontal(&self) -> Self {
        self.remap(self.height, self.width, |r, c| (r, self.width - 1 - c))
    }

    /// Swaps rows and columns.
    pub fn transpose(&self) -> Self {
        self.remap(self.width, self.height, |r, c| (c, r))
    }

    /// Builds a `height x width` shape whose cell `(r, c)` is read from
    /// `source(r, c)` in `self`.
    fn remap(
        &self,
        height: usize,
        width: usize,
        source: impl Fn(usize, usize) -> (usize, usize),
    ) -> Self {
        let mut cells = Vec::with_capacity(height * width);
        for r in 0..height {
            for c in 0..width {
                let (sr, sc) = source(r, c);
                cells.push(self.is_filled(sr, sc));
            }
        }
        Self {
            height,
            width,
            cells,
        }
    }
}

/// Generates all distinct orientations of a shape.
///
/// Applies the 8 symmetries in the order documented at module level and keeps
/// the first occurrence of each distinct matrix. Symmetric shapes produce
/// fewer than 8 orientations.
pub fn all_orientations(shape: &Shape) -> Vec<Shape> {
    let transposed = shape.transpose();
    let candidates = [
        shape.clone(),
        shape.flip_vertical(),
        shape.flip_horizontal(),
        shape.flip_horizontal().flip_vertical(),
        transposed.clone(),
        transposed.flip_vertical(),
        transposed.flip_horizontal(),
        transposed.flip_horizontal().flip_vertical(),
    ];

    // insertion order matters, so dedup by scan rather than sort
    let mut orientations: Vec<Shape> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if !orientations.contains(&candidate) {
            orientations.push(candidate);
        }
    }
    orientations
}
