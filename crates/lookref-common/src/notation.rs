//! Text forms of references: A1 (`$B$3`, `'My Sheet'!A1:C4`, `B:D`, `2:5`)
//! and R1C1 (`R3C2`, `R[-1]C[2]`, `R2:R5`, `C4`).

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::address::{AddressError, CellAddress, RangeAddress, Reference};
use crate::coord::{GridCoord, column_to_letters, letters_to_column};

/// Notation used to read or write a reference.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Default)]
pub enum AddressStyle {
    #[default]
    A1,
    R1C1,
}

impl AddressStyle {
    /// The host's boolean flag: TRUE (or omitted) is A1, FALSE is R1C1.
    pub fn from_a1_flag(a1: bool) -> Self {
        if a1 { AddressStyle::A1 } else { AddressStyle::R1C1 }
    }
}

/// Which components of a formatted address carry `$` anchors.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Default)]
pub enum AbsMode {
    /// `$A$1` / `R1C1`
    #[default]
    Absolute,
    /// `A$1` / `R1C[1]`
    AbsoluteRow,
    /// `$A1` / `R[1]C1`
    AbsoluteCol,
    /// `A1` / `R[1]C[1]`
    Relative,
}

impl AbsMode {
    /// Map ADDRESS's `abs_num` argument (1..=4).
    pub fn from_flag(flag: i64) -> Option<Self> {
        match flag {
            1 => Some(AbsMode::Absolute),
            2 => Some(AbsMode::AbsoluteRow),
            3 => Some(AbsMode::AbsoluteCol),
            4 => Some(AbsMode::Relative),
            _ => None,
        }
    }

    pub fn row_abs(self) -> bool {
        matches!(self, AbsMode::Absolute | AbsMode::AbsoluteRow)
    }

    pub fn col_abs(self) -> bool {
        matches!(self, AbsMode::Absolute | AbsMode::AbsoluteCol)
    }
}

/// Format a coordinate the way ADDRESS does.
///
/// In R1C1 style a relative component is written in brackets with the
/// given number as its offset, so `(2, 3, Relative)` becomes `R[2]C[3]`.
/// A non-empty `sheet` is always quoted: `'Sheet 1'!$A$1`.
pub fn format_address(
    row: u32,
    col: u32,
    abs: AbsMode,
    style: AddressStyle,
    sheet: Option<&str>,
) -> String {
    let mut out = String::new();
    if let Some(sheet) = sheet.filter(|s| !s.is_empty()) {
        out.push('\'');
        out.push_str(&sheet.replace('\'', "''"));
        out.push_str("'!");
    }
    match style {
        AddressStyle::R1C1 => {
            let part = |abs: bool, n: u32| if abs { n.to_string() } else { format!("[{n}]") };
            out.push('R');
            out.push_str(&part(abs.row_abs(), row));
            out.push('C');
            out.push_str(&part(abs.col_abs(), col));
        }
        AddressStyle::A1 => {
            if abs.col_abs() {
                out.push('$');
            }
            out.push_str(&column_to_letters(col));
            if abs.row_abs() {
                out.push('$');
            }
            out.push_str(&row.to_string());
        }
    }
    out
}

/// `Sheet1!`, or `'My Sheet'!` when the name needs quoting.
pub(crate) fn write_sheet_prefix(f: &mut fmt::Formatter<'_>, sheet: &str) -> fmt::Result {
    let plain = !sheet.is_empty()
        && !sheet.as_bytes()[0].is_ascii_digit()
        && sheet
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '.');
    if plain {
        write!(f, "{sheet}!")
    } else {
        write!(f, "'{}'!", sheet.replace('\'', "''"))
    }
}

/// Parse reference text in either notation.
///
/// `origin` is the cell relative R1C1 components are measured from; it is
/// ignored for A1 text. Reversed corners (`B2:A1`) are normalised.
pub fn parse_reference(
    text: &str,
    style: AddressStyle,
    origin: Option<GridCoord>,
) -> Result<Reference, AddressError> {
    let text = text.trim();
    let (sheet, body) = split_sheet(text)?;
    let mut parts = body.split(':');
    let first = parts.next().unwrap_or_default();
    let second = parts.next();
    if parts.next().is_some() {
        return Err(AddressError::Malformed(text.to_owned()));
    }
    let parse_part = |p: &str| match style {
        AddressStyle::A1 => parse_a1_part(p),
        AddressStyle::R1C1 => parse_r1c1_part(p, origin),
    };
    let malformed = || AddressError::Malformed(text.to_owned());

    let start = parse_part(first)?.ok_or_else(malformed)?;
    let Some(second) = second else {
        return match start {
            Part::Cell(row, col) => Ok(Reference::Cell(CellAddress::new(
                sheet,
                GridCoord::try_new(row, col)?,
            ))),
            // A lone row or column (R2, C3) spans the whole line.
            Part::Row(row) if style == AddressStyle::R1C1 => {
                Ok(RangeAddress::rows(sheet, checked_row(row)?, checked_row(row)?)?.into())
            }
            Part::Col(col) if style == AddressStyle::R1C1 => {
                Ok(RangeAddress::columns(sheet, checked_col(col)?, checked_col(col)?)?.into())
            }
            _ => Err(malformed()),
        };
    };
    let end = parse_part(second)?.ok_or_else(malformed)?;

    match (start, end) {
        (Part::Cell(r1, c1), Part::Cell(r2, c2)) => {
            let tl = GridCoord::try_new(r1.min(r2), c1.min(c2))?;
            let br = GridCoord::try_new(r1.max(r2), c1.max(c2))?;
            Ok(RangeAddress::new(sheet, tl, br)?.into())
        }
        (Part::Col(a), Part::Col(b)) => {
            let (a, b) = (checked_col(a)?, checked_col(b)?);
            Ok(RangeAddress::columns(sheet, a.min(b), a.max(b))?.into())
        }
        (Part::Row(a), Part::Row(b)) => {
            let (a, b) = (checked_row(a)?, checked_row(b)?);
            Ok(RangeAddress::rows(sheet, a.min(b), a.max(b))?.into())
        }
        _ => Err(malformed()),
    }
}

/// Parse a bare A1 cell (`B7`, `$AA$10`) into a checked coordinate.
pub fn parse_a1_cell(text: &str) -> Result<GridCoord, AddressError> {
    match parse_a1_part(text)? {
        Some(Part::Cell(row, col)) => Ok(GridCoord::try_new(row, col)?),
        _ => Err(AddressError::Malformed(text.to_owned())),
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Part {
    Cell(i64, i64),
    Row(i64),
    Col(i64),
}

fn checked_row(row: i64) -> Result<u32, AddressError> {
    Ok(GridCoord::try_new(row, 1)?.row())
}

fn checked_col(col: i64) -> Result<u32, AddressError> {
    Ok(GridCoord::try_new(1, col)?.col())
}

fn split_sheet(text: &str) -> Result<(Option<String>, &str), AddressError> {
    let malformed = || AddressError::Malformed(text.to_owned());
    if let Some(rest) = text.strip_prefix('\'') {
        let mut name = String::new();
        let mut chars = rest.char_indices().peekable();
        while let Some((i, ch)) = chars.next() {
            if ch != '\'' {
                name.push(ch);
                continue;
            }
            if matches!(chars.peek(), Some((_, '\''))) {
                chars.next();
                name.push('\'');
                continue;
            }
            let body = rest[i + 1..].strip_prefix('!').ok_or_else(malformed)?;
            if name.is_empty() {
                return Err(malformed());
            }
            return Ok((Some(name), body));
        }
        return Err(malformed());
    }
    match text.rfind('!') {
        Some(0) => Err(malformed()),
        Some(i) => Ok((Some(text[..i].to_owned()), &text[i + 1..])),
        None => Ok((None, text)),
    }
}

/// Number of leading bytes of `s` satisfying `pred`.
fn span(s: &[u8], pred: impl Fn(u8) -> bool) -> usize {
    s.iter().take_while(|b| pred(**b)).count()
}

fn parse_digits(s: &str) -> Option<i64> {
    // Anything wider than the grid parses as "too large" rather than malformed.
    if s.len() > 12 {
        return Some(i64::MAX);
    }
    s.parse::<i64>().ok()
}

fn parse_a1_part(part: &str) -> Result<Option<Part>, AddressError> {
    let bytes = part.as_bytes();
    let mut i = 0;
    let dollar_col = bytes.first() == Some(&b'$');
    if dollar_col {
        i += 1;
    }
    let letters = span(&bytes[i..], |b| b.is_ascii_alphabetic());
    let col_txt = &part[i..i + letters];
    i += letters;
    let dollar_row = bytes.get(i) == Some(&b'$');
    if dollar_row {
        i += 1;
    }
    let digits = span(&bytes[i..], |b| b.is_ascii_digit());
    let row_txt = &part[i..i + digits];
    i += digits;
    if i != bytes.len() {
        return Ok(None);
    }
    let col = if letters > 0 {
        match letters_to_column(col_txt) {
            Some(c) => Some(c as i64),
            // Up to three letters is column syntax; past XFD it is off-grid.
            None if letters <= 3 => Some(i64::MAX),
            None => return Ok(None),
        }
    } else {
        None
    };
    let row = if digits > 0 { parse_digits(row_txt) } else { None };
    Ok(match (row, col) {
        (Some(r), Some(c)) => Some(Part::Cell(r, c)),
        (None, Some(c)) if !dollar_row => Some(Part::Col(c)),
        (Some(r), None) if !(dollar_col && dollar_row) => Some(Part::Row(r)),
        _ => None,
    })
}

fn parse_r1c1_part(part: &str, origin: Option<GridCoord>) -> Result<Option<Part>, AddressError> {
    let upper = part.to_ascii_uppercase();
    let mut rest = upper.as_str();
    let mut row = None;
    let mut col = None;
    if let Some(r) = rest.strip_prefix('R') {
        let (value, tail) = match r1c1_component(r, origin.map(|o| o.row() as i64))? {
            Some(v) => v,
            None => return Ok(None),
        };
        row = Some(value);
        rest = tail;
    }
    if let Some(c) = rest.strip_prefix('C') {
        let (value, tail) = match r1c1_component(c, origin.map(|o| o.col() as i64))? {
            Some(v) => v,
            None => return Ok(None),
        };
        col = Some(value);
        rest = tail;
    }
    if !rest.is_empty() {
        return Ok(None);
    }
    Ok(match (row, col) {
        (Some(r), Some(c)) => Some(Part::Cell(r, c)),
        (Some(r), None) => Some(Part::Row(r)),
        (None, Some(c)) => Some(Part::Col(c)),
        (None, None) => None,
    })
}

/// One `R`/`C` component after its letter: `5`, `[-2]`, or nothing (same
/// row/column as the origin). Returns the absolute index and the unparsed tail.
fn r1c1_component(
    s: &str,
    origin: Option<i64>,
) -> Result<Option<(i64, &str)>, AddressError> {
    if let Some(inner) = s.strip_prefix('[') {
        let Some(close) = inner.find(']') else {
            return Ok(None);
        };
        let Ok(delta) = inner[..close].parse::<i64>() else {
            return Ok(None);
        };
        let base = origin.ok_or(AddressError::MissingOrigin)?;
        // Saturated sums land off-grid and fail the bounds check.
        return Ok(Some((base.saturating_add(delta), &inner[close + 1..])));
    }
    let digits = span(s.as_bytes(), |b| b.is_ascii_digit());
    if digits == 0 {
        let base = origin.ok_or(AddressError::MissingOrigin)?;
        return Ok(Some((base, s)));
    }
    match parse_digits(&s[..digits]) {
        Some(n) => Ok(Some((n, &s[digits..]))),
        None => Ok(None),
    }
}
