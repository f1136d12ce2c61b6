//! Evaluation-context traits and the tagged value functions exchange.

use lookref_common::{CellAddress, ExcelError, ExcelErrorKind, LiteralValue, Reference};

use crate::config::EvalConfig;

/// Row-major rectangular block of values.
pub type Grid = Vec<Vec<LiteralValue>>;

/* ───────────────────────────── CalcValue ───────────────────────────── */

/// What a function receives as an argument and hands back as a result.
///
/// Errors travel as `Scalar(LiteralValue::Error(_))`; a `Reference` is left
/// for the caller to resolve through its own context.
#[derive(Debug, Clone, PartialEq)]
pub enum CalcValue {
    Scalar(LiteralValue),
    Array(Grid),
    Reference(Reference),
}

impl CalcValue {
    pub fn error(kind: ExcelErrorKind) -> Self {
        CalcValue::Scalar(LiteralValue::Error(ExcelError::new(kind)))
    }

    pub fn as_scalar(&self) -> Option<&LiteralValue> {
        match self {
            CalcValue::Scalar(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_reference(&self) -> Option<&Reference> {
        match self {
            CalcValue::Reference(r) => Some(r),
            _ => None,
        }
    }

    /// The scalar error this value carries, if any.
    pub fn as_error(&self) -> Option<&ExcelError> {
        self.as_scalar().and_then(LiteralValue::as_error)
    }

    /// Collapse to a single literal: arrays become `LiteralValue::Array`,
    /// references are rejected with `#VALUE!`.
    pub fn into_literal(self) -> LiteralValue {
        match self {
            CalcValue::Scalar(v) => v,
            CalcValue::Array(grid) => LiteralValue::Array(grid),
            CalcValue::Reference(_) => LiteralValue::Error(ExcelError::value()),
        }
    }
}

impl From<LiteralValue> for CalcValue {
    fn from(value: LiteralValue) -> Self {
        match value {
            LiteralValue::Array(grid) => CalcValue::Array(grid),
            other => CalcValue::Scalar(other),
        }
    }
}

impl From<ExcelError> for CalcValue {
    fn from(value: ExcelError) -> Self {
        CalcValue::Scalar(LiteralValue::Error(value))
    }
}

impl From<Reference> for CalcValue {
    fn from(value: Reference) -> Self {
        CalcValue::Reference(value)
    }
}

/* ────────────────────────── FunctionContext ────────────────────────── */

/// What the formula evaluator exposes to a function while it runs.
pub trait FunctionContext {
    /// Sheet the calling formula lives on; attached to unqualified text
    /// references.
    fn current_sheet(&self) -> &str;

    /// Cell the calling formula lives in, when known.
    fn current_cell(&self) -> Option<CellAddress> {
        None
    }

    fn config(&self) -> &EvalConfig;

    /// Value stored at `cell`. Unpopulated cells read as `Empty`.
    fn resolve_cell(&self, cell: &CellAddress) -> Result<LiteralValue, ExcelError>;

    /// Values covered by `reference`, row-major. Implementations may stop at
    /// the sheet's used extent for entire-row/column spans.
    fn resolve_range(&self, reference: &Reference) -> Result<Grid, ExcelError>;

    /// Value-context view of a reference: a point becomes a scalar, a span an
    /// array. Failures come back as scalar errors.
    fn resolve_value(&self, reference: &Reference) -> CalcValue {
        let resolved = match reference {
            Reference::Cell(cell) => self.resolve_cell(cell).map(CalcValue::Scalar),
            Reference::Range(_) => self.resolve_range(reference).map(CalcValue::Array),
        };
        resolved.unwrap_or_else(CalcValue::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_arrays_become_array_values() {
        let v: CalcValue = LiteralValue::Array(vec![vec![LiteralValue::Int(1)]]).into();
        assert!(matches!(v, CalcValue::Array(_)));
        assert_eq!(v.into_literal(), LiteralValue::Array(vec![vec![LiteralValue::Int(1)]]));
    }

    #[test]
    fn error_helpers() {
        let v = CalcValue::error(ExcelErrorKind::Na);
        assert_eq!(v.as_error().map(|e| e.kind), Some(ExcelErrorKind::Na));
        assert!(CalcValue::Scalar(LiteralValue::Int(1)).as_error().is_none());
    }
}
