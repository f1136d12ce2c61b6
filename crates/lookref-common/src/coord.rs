//! Grid coordinates with the host's sheet limits.
//!
//! Everything here is 1-based: `A1` is row 1, column 1. The grid holds
//! 1,048,576 rows × 16,384 columns (`XFD1048576` is the last cell).

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Last addressable row.
pub const MAX_ROW: u32 = 1_048_576;
/// Last addressable column (`XFD`).
pub const MAX_COL: u32 = 16_384;

/// Errors returned when building coordinates from unchecked inputs.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CoordError {
    RowOutOfBounds(i64),
    ColOutOfBounds(i64),
}

impl fmt::Display for CoordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordError::RowOutOfBounds(row) => {
                write!(f, "row {row} outside 1..={MAX_ROW}")
            }
            CoordError::ColOutOfBounds(col) => {
                write!(f, "col {col} outside 1..={MAX_COL}")
            }
        }
    }
}

impl std::error::Error for CoordError {}

#[inline]
pub fn row_in_bounds(row: i64) -> bool {
    (1..=MAX_ROW as i64).contains(&row)
}

#[inline]
pub fn col_in_bounds(col: i64) -> bool {
    (1..=MAX_COL as i64).contains(&col)
}

/// Checked 1-based `(row, col)` position on the grid.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct GridCoord {
    row: u32,
    col: u32,
}

impl GridCoord {
    /// Construct a coordinate, rejecting anything outside the grid.
    pub fn try_new(row: i64, col: i64) -> Result<Self, CoordError> {
        if !row_in_bounds(row) {
            return Err(CoordError::RowOutOfBounds(row));
        }
        if !col_in_bounds(col) {
            return Err(CoordError::ColOutOfBounds(col));
        }
        Ok(Self {
            row: row as u32,
            col: col as u32,
        })
    }

    #[inline(always)]
    pub fn row(self) -> u32 {
        self.row
    }

    #[inline(always)]
    pub fn col(self) -> u32 {
        self.col
    }

    /// Shift by signed deltas; fails if the result leaves the grid.
    pub fn offset(self, drow: i64, dcol: i64) -> Result<Self, CoordError> {
        // Saturated sums are far off-grid, so try_new rejects them.
        Self::try_new(
            (self.row as i64).saturating_add(drow),
            (self.col as i64).saturating_add(dcol),
        )
    }
}

impl fmt::Display for GridCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", column_to_letters(self.col), self.row)
    }
}

impl TryFrom<(i64, i64)> for GridCoord {
    type Error = CoordError;

    fn try_from(value: (i64, i64)) -> Result<Self, Self::Error> {
        Self::try_new(value.0, value.1)
    }
}

/// 1-based column number to letters: 1 → `A`, 27 → `AA`, 16384 → `XFD`.
///
/// Column 0 has no letters and yields an empty string.
pub fn column_to_letters(mut col: u32) -> String {
    let mut buf = Vec::with_capacity(3);
    while col > 0 {
        let rem = ((col - 1) % 26) as u8;
        buf.push(b'A' + rem);
        col = (col - 1) / 26;
    }
    buf.reverse();
    buf.into_iter().map(char::from).collect()
}

/// Column letters (either case) to a 1-based column number.
///
/// Returns `None` for empty input, non-letters, or columns past the grid.
pub fn letters_to_column(s: &str) -> Option<u32> {
    if s.is_empty() || s.len() > 3 {
        return None;
    }
    let mut col: u32 = 0;
    for b in s.bytes() {
        if !b.is_ascii_alphabetic() {
            return None;
        }
        col = col * 26 + (b.to_ascii_uppercase() - b'A' + 1) as u32;
    }
    (col <= MAX_COL).then_some(col)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_corners() {
        assert!(GridCoord::try_new(1, 1).is_ok());
        let last = GridCoord::try_new(MAX_ROW as i64, MAX_COL as i64).unwrap();
        assert_eq!(last.to_string(), "XFD1048576");
        assert_eq!(
            GridCoord::try_new(0, 1),
            Err(CoordError::RowOutOfBounds(0))
        );
        assert_eq!(
            GridCoord::try_new(1, MAX_COL as i64 + 1),
            Err(CoordError::ColOutOfBounds(MAX_COL as i64 + 1))
        );
    }

    #[test]
    fn offset_respects_bounds() {
        let b2 = GridCoord::try_new(2, 2).unwrap();
        assert_eq!(b2.offset(-1, -1).unwrap(), GridCoord::try_new(1, 1).unwrap());
        assert!(b2.offset(-2, 0).is_err());
        assert_eq!(b2.offset(i64::MAX, 0), Err(CoordError::RowOutOfBounds(i64::MAX)));
        assert!(matches!(b2.offset(0, i64::MIN), Err(CoordError::ColOutOfBounds(_))));
    }

    #[test]
    fn column_letters() {
        for (n, s) in [(1, "A"), (26, "Z"), (27, "AA"), (52, "AZ"), (702, "ZZ"), (703, "AAA")] {
            assert_eq!(column_to_letters(n), s);
            assert_eq!(letters_to_column(s), Some(n));
        }
        assert_eq!(column_to_letters(MAX_COL), "XFD");
        assert_eq!(letters_to_column("xfd"), Some(MAX_COL));
        assert_eq!(letters_to_column("XFE"), None);
        assert_eq!(letters_to_column("A1"), None);
        assert_eq!(letters_to_column(""), None);
    }
}
