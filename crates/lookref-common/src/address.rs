//! Sheet-qualified cell and span references plus the arithmetic OFFSET and
//! INDEX need on them.

use std::error::Error;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::coord::{CoordError, GridCoord, MAX_COL, MAX_ROW, column_to_letters};
use crate::notation::write_sheet_prefix;
use crate::{ExcelError, ExcelErrorKind};

/// Errors that can occur while building or moving references.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AddressError {
    /// A coordinate left the grid.
    Coord(CoordError),
    /// Height or width was zero or negative.
    EmptySpan { height: i64, width: i64 },
    /// Start/end were not ordered so that start is above/left of end.
    RangeOrder,
    /// A projection index fell outside the referenced span.
    OutsideSpan { row: i64, col: i64 },
    /// Reference text could not be parsed.
    Malformed(String),
    /// An R1C1 relative component needs the caller's current cell.
    MissingOrigin,
}

impl fmt::Display for AddressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressError::Coord(err) => err.fmt(f),
            AddressError::EmptySpan { height, width } => {
                write!(f, "span of {height}x{width} cells is empty")
            }
            AddressError::RangeOrder => {
                write!(f, "range must be ordered so the start is above/left of the end")
            }
            AddressError::OutsideSpan { row, col } => {
                write!(f, "offset ({row}, {col}) lies outside the referenced span")
            }
            AddressError::Malformed(text) => write!(f, "not a cell reference: {text:?}"),
            AddressError::MissingOrigin => {
                write!(f, "relative R1C1 reference needs a current cell")
            }
        }
    }
}

impl Error for AddressError {}

impl From<CoordError> for AddressError {
    fn from(value: CoordError) -> Self {
        AddressError::Coord(value)
    }
}

impl From<AddressError> for ExcelError {
    fn from(value: AddressError) -> Self {
        ExcelError::new(ExcelErrorKind::Ref).with_message(value.to_string())
    }
}

/// A single cell, optionally qualified by sheet name.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct CellAddress {
    pub sheet: Option<String>,
    pub coord: GridCoord,
}

impl CellAddress {
    pub fn new(sheet: Option<String>, coord: GridCoord) -> Self {
        Self { sheet, coord }
    }

    /// Construct from 1-based row/column, checking grid bounds.
    pub fn try_new(sheet: Option<&str>, row: i64, col: i64) -> Result<Self, AddressError> {
        Ok(Self {
            sheet: sheet.map(str::to_owned),
            coord: GridCoord::try_new(row, col)?,
        })
    }

    #[inline]
    pub fn row(&self) -> u32 {
        self.coord.row()
    }

    #[inline]
    pub fn col(&self) -> u32 {
        self.coord.col()
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(sheet) = &self.sheet {
            write_sheet_prefix(f, sheet)?;
        }
        write!(f, "{}", self.coord)
    }
}

/// Inclusive rectangular span.
///
/// `end_row: None` makes the span run to the last grid row (an entire-column
/// reference such as `A:C`); `end_col: None` runs to the last grid column
/// (an entire-row reference such as `2:5`).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct RangeAddress {
    pub sheet: Option<String>,
    pub start: GridCoord,
    pub end_row: Option<u32>,
    pub end_col: Option<u32>,
}

impl RangeAddress {
    /// Span between two corners, which must be ordered.
    pub fn new(
        sheet: Option<String>,
        start: GridCoord,
        end: GridCoord,
    ) -> Result<Self, AddressError> {
        if start.row() > end.row() || start.col() > end.col() {
            return Err(AddressError::RangeOrder);
        }
        Ok(Self {
            sheet,
            start,
            end_row: Some(end.row()),
            end_col: Some(end.col()),
        })
    }

    /// Entire columns `first..=last`, e.g. `B:D`.
    pub fn columns(sheet: Option<String>, first: u32, last: u32) -> Result<Self, AddressError> {
        if first > last {
            return Err(AddressError::RangeOrder);
        }
        GridCoord::try_new(1, last as i64)?;
        Ok(Self {
            sheet,
            start: GridCoord::try_new(1, first as i64)?,
            end_row: None,
            end_col: Some(last),
        })
    }

    /// Entire rows `first..=last`, e.g. `2:5`.
    pub fn rows(sheet: Option<String>, first: u32, last: u32) -> Result<Self, AddressError> {
        if first > last {
            return Err(AddressError::RangeOrder);
        }
        GridCoord::try_new(last as i64, 1)?;
        Ok(Self {
            sheet,
            start: GridCoord::try_new(first as i64, 1)?,
            end_row: Some(last),
            end_col: None,
        })
    }

    #[inline]
    pub fn last_row(&self) -> u32 {
        self.end_row.unwrap_or(MAX_ROW)
    }

    #[inline]
    pub fn last_col(&self) -> u32 {
        self.end_col.unwrap_or(MAX_COL)
    }

    pub fn height(&self) -> u32 {
        self.last_row() - self.start.row() + 1
    }

    pub fn width(&self) -> u32 {
        self.last_col() - self.start.col() + 1
    }

    pub fn is_entire_columns(&self) -> bool {
        self.end_row.is_none()
    }

    pub fn is_entire_rows(&self) -> bool {
        self.end_col.is_none()
    }
}

impl fmt::Display for RangeAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(sheet) = &self.sheet {
            write_sheet_prefix(f, sheet)?;
        }
        match (self.end_row, self.end_col) {
            (None, Some(ec)) => write!(
                f,
                "{}:{}",
                column_to_letters(self.start.col()),
                column_to_letters(ec)
            ),
            (Some(er), None) => write!(f, "{}:{}", self.start.row(), er),
            (None, None) => write!(f, "A:{}", column_to_letters(MAX_COL)),
            (Some(er), Some(ec)) => {
                write!(f, "{}:{}{}", self.start, column_to_letters(ec), er)
            }
        }
    }
}

/// Either a point or a span: the reference half of INDEX/OFFSET/INDIRECT.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Reference {
    Cell(CellAddress),
    Range(RangeAddress),
}

impl Reference {
    /// Build the reference covering `height × width` cells from `top_left`.
    /// A 1×1 span collapses to a point.
    pub fn from_extent(
        sheet: Option<String>,
        top_left: GridCoord,
        height: i64,
        width: i64,
    ) -> Result<Self, AddressError> {
        if height <= 0 || width <= 0 {
            return Err(AddressError::EmptySpan { height, width });
        }
        let bottom_right = top_left.offset(height - 1, width - 1)?;
        if height == 1 && width == 1 {
            Ok(Reference::Cell(CellAddress::new(sheet, top_left)))
        } else {
            Ok(Reference::Range(RangeAddress::new(
                sheet,
                top_left,
                bottom_right,
            )?))
        }
    }

    pub fn sheet(&self) -> Option<&str> {
        match self {
            Reference::Cell(c) => c.sheet.as_deref(),
            Reference::Range(r) => r.sheet.as_deref(),
        }
    }

    pub fn top_left(&self) -> GridCoord {
        match self {
            Reference::Cell(c) => c.coord,
            Reference::Range(r) => r.start,
        }
    }

    pub fn height(&self) -> u32 {
        match self {
            Reference::Cell(_) => 1,
            Reference::Range(r) => r.height(),
        }
    }

    pub fn width(&self) -> u32 {
        match self {
            Reference::Cell(_) => 1,
            Reference::Range(r) => r.width(),
        }
    }

    /// Attach `sheet` when the reference carries none.
    pub fn with_default_sheet(mut self, sheet: &str) -> Self {
        let slot = match &mut self {
            Reference::Cell(c) => &mut c.sheet,
            Reference::Range(r) => &mut r.sheet,
        };
        if slot.is_none() {
            *slot = Some(sheet.to_owned());
        }
        self
    }

    /// OFFSET arithmetic: move the top-left corner by the deltas and resize.
    /// Omitted height/width keep this reference's own size. Any edge leaving
    /// the grid, or a non-positive size, is an error.
    pub fn offset(
        &self,
        row_delta: i64,
        col_delta: i64,
        height: Option<i64>,
        width: Option<i64>,
    ) -> Result<Reference, AddressError> {
        let height = height.unwrap_or(self.height() as i64);
        let width = width.unwrap_or(self.width() as i64);
        let top_left = self.top_left().offset(row_delta, col_delta)?;
        Reference::from_extent(self.sheet().map(str::to_owned), top_left, height, width)
    }

    /// The cell at 0-based `(row, col)` inside this span.
    pub fn cell_at(&self, row: i64, col: i64) -> Result<CellAddress, AddressError> {
        if row < 0 || col < 0 || row >= self.height() as i64 || col >= self.width() as i64 {
            return Err(AddressError::OutsideSpan { row, col });
        }
        let coord = self.top_left().offset(row, col)?;
        Ok(CellAddress::new(self.sheet().map(str::to_owned), coord))
    }

    /// The whole 0-based row `row` of this span.
    pub fn row_slice(&self, row: i64) -> Result<Reference, AddressError> {
        if row < 0 || row >= self.height() as i64 {
            return Err(AddressError::OutsideSpan { row, col: 0 });
        }
        self.offset(row, 0, Some(1), None)
    }

    /// The whole 0-based column `col` of this span.
    pub fn col_slice(&self, col: i64) -> Result<Reference, AddressError> {
        if col < 0 || col >= self.width() as i64 {
            return Err(AddressError::OutsideSpan { row: 0, col });
        }
        self.offset(0, col, None, Some(1))
    }
}

impl From<CellAddress> for Reference {
    fn from(value: CellAddress) -> Self {
        Reference::Cell(value)
    }
}

impl From<RangeAddress> for Reference {
    fn from(value: RangeAddress) -> Self {
        Reference::Range(value)
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reference::Cell(c) => c.fmt(f),
            Reference::Range(r) => r.fmt(f),
        }
    }
}
