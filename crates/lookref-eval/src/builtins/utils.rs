//! Argument helpers shared by the lookup & reference builtins.
//!
//! Coercion proper happens before a function is called; these helpers only
//! pick arguments apart, resolve references through the context and turn
//! shape problems into the right error value.

use lookref_common::{ExcelError, ExcelErrorKind, LiteralValue, Reference};

use crate::traits::{CalcValue, FunctionContext, Grid};

/// An argument seen either as a grid or as a lone scalar.
#[derive(Debug, Clone, PartialEq)]
pub enum Shaped {
    Grid(Grid),
    Scalar(LiteralValue),
}

/// `args[i]`, or `None` when the argument was not supplied.
pub fn arg(args: &[CalcValue], i: usize) -> Option<&CalcValue> {
    args.get(i)
}

/// Scalar view of an argument. A reference is resolved; a single-cell
/// array or span collapses to its value; anything larger is `#VALUE!`.
pub fn scalar_arg(value: &CalcValue, ctx: &dyn FunctionContext) -> LiteralValue {
    match value {
        CalcValue::Scalar(v) => v.clone(),
        CalcValue::Array(grid) => single(grid),
        CalcValue::Reference(Reference::Cell(cell)) => {
            ctx.resolve_cell(cell).unwrap_or_else(LiteralValue::Error)
        }
        CalcValue::Reference(r) => match ctx.resolve_range(r) {
            Ok(grid) => single(&grid),
            Err(e) => LiteralValue::Error(e),
        },
    }
}

fn single(grid: &[Vec<LiteralValue>]) -> LiteralValue {
    match grid {
        [row] if row.len() == 1 => row[0].clone(),
        _ => LiteralValue::Error(
            ExcelError::new(ExcelErrorKind::Value).with_message("expected a single value"),
        ),
    }
}

/// Scalar argument that must not be an error.
pub fn value_arg(value: &CalcValue, ctx: &dyn FunctionContext) -> Result<LiteralValue, ExcelError> {
    match scalar_arg(value, ctx) {
        LiteralValue::Error(e) => Err(e),
        other => Ok(other),
    }
}

/// Grid view of an argument. References are materialised; a scalar stays a
/// scalar so callers can apply their own "not an array" rule.
pub fn shaped_arg(value: &CalcValue, ctx: &dyn FunctionContext) -> Result<Shaped, ExcelError> {
    match value {
        CalcValue::Scalar(LiteralValue::Array(grid)) => Ok(Shaped::Grid(grid.clone())),
        CalcValue::Scalar(v) => Ok(Shaped::Scalar(v.clone())),
        CalcValue::Array(grid) => Ok(Shaped::Grid(grid.clone())),
        CalcValue::Reference(r) => ctx.resolve_range(r).map(Shaped::Grid),
    }
}

/// Whole-number argument, truncated toward zero.
pub fn int_arg(value: &CalcValue, ctx: &dyn FunctionContext) -> Result<i64, ExcelError> {
    to_int(&value_arg(value, ctx)?)
}

/// Optional whole number: a missing or blank argument is `None`.
pub fn opt_int_arg(
    args: &[CalcValue],
    i: usize,
    ctx: &dyn FunctionContext,
) -> Result<Option<i64>, ExcelError> {
    let Some(value) = arg(args, i) else {
        return Ok(None);
    };
    match value_arg(value, ctx)? {
        LiteralValue::Empty => Ok(None),
        other => to_int(&other).map(Some),
    }
}

/// Numeric argument as `f64`.
pub fn number_arg(value: &CalcValue, ctx: &dyn FunctionContext) -> Result<f64, ExcelError> {
    let v = value_arg(value, ctx)?;
    to_number(&v)
}

/// Optional boolean flag; missing or blank yields `default`.
pub fn opt_bool_arg(
    args: &[CalcValue],
    i: usize,
    default: bool,
    ctx: &dyn FunctionContext,
) -> Result<bool, ExcelError> {
    let Some(value) = arg(args, i) else {
        return Ok(default);
    };
    match value_arg(value, ctx)? {
        LiteralValue::Empty => Ok(default),
        LiteralValue::Boolean(b) => Ok(b),
        LiteralValue::Text(s) if s.eq_ignore_ascii_case("true") => Ok(true),
        LiteralValue::Text(s) if s.eq_ignore_ascii_case("false") => Ok(false),
        other => to_number(&other).map(|n| n != 0.0),
    }
}

fn to_number(v: &LiteralValue) -> Result<f64, ExcelError> {
    match v {
        LiteralValue::Empty => Ok(0.0),
        LiteralValue::Text(s) => s.trim().parse::<f64>().map_err(|_| not_a_number(v)),
        other => other.as_serial_number().ok_or_else(|| not_a_number(other)),
    }
}

fn to_int(v: &LiteralValue) -> Result<i64, ExcelError> {
    let n = to_number(v)?;
    if !n.is_finite() {
        return Err(not_a_number(v));
    }
    Ok(n.trunc() as i64)
}

fn not_a_number(v: &LiteralValue) -> ExcelError {
    ExcelError::new(ExcelErrorKind::Value).with_message(format!("expected a number, got {v:?}"))
}

/// Flatten a single-row or single-column grid into a vector.
pub fn as_vector(grid: &[Vec<LiteralValue>]) -> Option<Vec<LiteralValue>> {
    match grid {
        [row] => Some(row.clone()),
        rows if rows.iter().all(|r| r.len() == 1) => {
            Some(rows.iter().map(|r| r[0].clone()).collect())
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_workbook::TestWorkbook;

    #[test]
    fn scalar_arg_collapses_single_cells() {
        let wb = TestWorkbook::new().with_cell_a1("Sheet1", "B2", LiteralValue::Int(7));
        let b2 = CalcValue::Reference(wb.reference("B2"));
        assert_eq!(scalar_arg(&b2, &wb), LiteralValue::Int(7));
        let one = CalcValue::Array(vec![vec![LiteralValue::Int(3)]]);
        assert_eq!(scalar_arg(&one, &wb), LiteralValue::Int(3));
        let two = CalcValue::Array(vec![vec![LiteralValue::Int(3), LiteralValue::Int(4)]]);
        assert!(scalar_arg(&two, &wb).is_error());
    }

    #[test]
    fn ints_truncate_and_reject_text() {
        let wb = TestWorkbook::new();
        let v = |x: LiteralValue| CalcValue::Scalar(x);
        assert_eq!(int_arg(&v(LiteralValue::Number(2.9)), &wb), Ok(2));
        assert_eq!(int_arg(&v(LiteralValue::Number(-1.5)), &wb), Ok(-1));
        assert_eq!(int_arg(&v(LiteralValue::Text(" 4 ".into())), &wb), Ok(4));
        assert_eq!(int_arg(&v(LiteralValue::Boolean(true)), &wb), Ok(1));
        assert!(int_arg(&v(LiteralValue::Text("four".into())), &wb).is_err());
        let na = v(LiteralValue::Error(ExcelError::na()));
        assert_eq!(int_arg(&na, &wb), Err(ExcelError::na()));
    }

    #[test]
    fn optional_args() {
        let wb = TestWorkbook::new();
        let args = [CalcValue::Scalar(LiteralValue::Empty)];
        assert_eq!(opt_int_arg(&args, 0, &wb), Ok(None));
        assert_eq!(opt_int_arg(&args, 3, &wb), Ok(None));
        assert_eq!(opt_bool_arg(&args, 0, true, &wb), Ok(true));
        let f = [CalcValue::Scalar(LiteralValue::Int(0))];
        assert_eq!(opt_bool_arg(&f, 0, true, &wb), Ok(false));
    }

    #[test]
    fn vectors() {
        let row = vec![vec![LiteralValue::Int(1), LiteralValue::Int(2)]];
        assert_eq!(as_vector(&row).map(|v| v.len()), Some(2));
        let col = vec![vec![LiteralValue::Int(1)], vec![LiteralValue::Int(2)]];
        assert_eq!(as_vector(&col).map(|v| v.len()), Some(2));
        let sq = vec![
            vec![LiteralValue::Int(1), LiteralValue::Int(2)],
            vec![LiteralValue::Int(3), LiteralValue::Int(4)],
        ];
        assert!(as_vector(&sq).is_none());
    }
}
