use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use std::fmt::{self, Display};

use crate::ExcelError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/* ───────────────────── serial date utilities ───────────────────────
Dates take part in lookups as numbers, so they need the host's serial:
  Serial 1  = 1900-01-01
  Serial 60 = 1900-02-29  (phantom day the host still counts)
  Serial 61 = 1900-03-01
Time is the fractional part of the day.
------------------------------------------------------------------- */

const EPOCH: NaiveDate = match NaiveDate::from_ymd_opt(1899, 12, 31) {
    Some(d) => d,
    None => panic!("epoch is a valid date"),
};

const PHANTOM_CUTOVER: NaiveDate = match NaiveDate::from_ymd_opt(1900, 3, 1) {
    Some(d) => d,
    None => panic!("cutover is a valid date"),
};

pub fn datetime_to_serial(dt: &NaiveDateTime) -> f64 {
    let days = (dt.date() - EPOCH).num_days();
    let serial_days = if dt.date() >= PHANTOM_CUTOVER {
        days + 1
    } else {
        days
    };
    let secs_in_day = dt.time().num_seconds_from_midnight() as f64;
    serial_days as f64 + secs_in_day / 86_400.0
}

/// A single evaluated value as the lookup layer sees it.
///
/// `Empty` is the absence marker for a blank cell. `Array` only ever shows up
/// as a whole argument; the normalization layer never nests arrays inside
/// arrays.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Int(i64),
    Number(f64),
    Text(String),
    Boolean(bool),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Time(NaiveTime),
    Array(Vec<Vec<LiteralValue>>),
    Empty,
    Error(ExcelError),
}

impl Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::Int(i) => write!(f, "{i}"),
            LiteralValue::Number(n) => write!(f, "{n}"),
            LiteralValue::Text(s) => write!(f, "{s}"),
            LiteralValue::Boolean(b) => f.write_str(if *b { "TRUE" } else { "FALSE" }),
            LiteralValue::Date(d) => write!(f, "{d}"),
            LiteralValue::DateTime(dt) => write!(f, "{dt}"),
            LiteralValue::Time(t) => write!(f, "{t}"),
            LiteralValue::Array(a) => write!(f, "{a:?}"),
            LiteralValue::Empty => Ok(()),
            LiteralValue::Error(e) => write!(f, "{}", e.kind),
        }
    }
}

impl From<&str> for LiteralValue {
    fn from(s: &str) -> Self {
        LiteralValue::Text(s.to_owned())
    }
}

impl From<String> for LiteralValue {
    fn from(s: String) -> Self {
        LiteralValue::Text(s)
    }
}

impl From<f64> for LiteralValue {
    fn from(n: f64) -> Self {
        LiteralValue::Number(n)
    }
}

impl From<i64> for LiteralValue {
    fn from(i: i64) -> Self {
        LiteralValue::Int(i)
    }
}

impl From<bool> for LiteralValue {
    fn from(b: bool) -> Self {
        LiteralValue::Boolean(b)
    }
}

impl LiteralValue {
    /// Numeric view used by comparisons: numbers, booleans (FALSE=0, TRUE=1)
    /// and date/time serials.
    pub fn as_serial_number(&self) -> Option<f64> {
        match self {
            LiteralValue::Int(i) => Some(*i as f64),
            LiteralValue::Number(n) => Some(*n),
            LiteralValue::Boolean(b) => Some(if *b { 1.0 } else { 0.0 }),
            LiteralValue::Date(d) => d.and_hms_opt(0, 0, 0).map(|dt| datetime_to_serial(&dt)),
            LiteralValue::DateTime(dt) => Some(datetime_to_serial(dt)),
            LiteralValue::Time(t) => Some(t.num_seconds_from_midnight() as f64 / 86_400.0),
            _ => None,
        }
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            LiteralValue::Boolean(b) => *b,
            LiteralValue::Int(i) => *i != 0,
            LiteralValue::Number(n) => *n != 0.0,
            LiteralValue::Text(s) => !s.is_empty(),
            LiteralValue::Array(arr) => !arr.is_empty(),
            LiteralValue::Date(_) | LiteralValue::DateTime(_) | LiteralValue::Time(_) => true,
            LiteralValue::Error(_) | LiteralValue::Empty => false,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, LiteralValue::Empty)
    }

    pub fn as_error(&self) -> Option<&ExcelError> {
        match self {
            LiteralValue::Error(e) => Some(e),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, LiteralValue::Error(_))
    }
}

/// `(height, width)` of a row-major grid. Rows may be ragged; the width is
/// taken from the first row, the way the host reads rectangular selections.
pub fn grid_dims(grid: &[Vec<LiteralValue>]) -> (usize, usize) {
    (grid.len(), grid.first().map_or(0, Vec::len))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serials_follow_host_calendar() {
        let d = LiteralValue::Date(NaiveDate::from_ymd_opt(1900, 1, 1).unwrap());
        assert_eq!(d.as_serial_number(), Some(1.0));
        let d = LiteralValue::Date(NaiveDate::from_ymd_opt(1900, 3, 1).unwrap());
        assert_eq!(d.as_serial_number(), Some(61.0));
        let noon = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        assert_eq!(
            LiteralValue::DateTime(noon).as_serial_number(),
            Some(45293.5)
        );
    }

    #[test]
    fn booleans_are_numeric() {
        assert_eq!(LiteralValue::Boolean(true).as_serial_number(), Some(1.0));
        assert_eq!(LiteralValue::Text("1".into()).as_serial_number(), None);
    }

    #[test]
    fn dims_of_ragged_and_empty_grids() {
        assert_eq!(grid_dims(&[]), (0, 0));
        let g = vec![vec![1i64.into(), 2i64.into()], vec![3i64.into()]];
        assert_eq!(grid_dims(&g), (2, 2));
    }
}
