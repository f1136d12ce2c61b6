//! Reference information functions: ROW, ROWS, COLUMN, COLUMNS
//!
//! - ROW([reference]) / COLUMN([reference]): index of a point, or the
//!   spanned indices of a range as a vertical (ROW) or horizontal (COLUMN)
//!   array
//! - ROWS(array) / COLUMNS(array): height / width
//!
//! Without arguments, ROW and COLUMN return the current cell's position.

use lookref_common::{ExcelError, ExcelErrorKind, LiteralValue, Reference, grid_dims};

use crate::builtins::utils::arg;
use crate::function::Function;
use crate::traits::{CalcValue, FunctionContext};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Axis {
    Row,
    Col,
}

fn position(
    args: &[CalcValue],
    ctx: &dyn FunctionContext,
    axis: Axis,
) -> Result<CalcValue, ExcelError> {
    let reference = match arg(args, 0) {
        None => {
            let cell = ctx.current_cell().ok_or_else(|| {
                ExcelError::new(ExcelErrorKind::Value).with_message("no current cell")
            })?;
            Reference::Cell(cell)
        }
        Some(CalcValue::Reference(r)) => r.clone(),
        Some(CalcValue::Scalar(LiteralValue::Error(e))) => return Err(e.clone()),
        Some(_) => {
            return Err(ExcelError::new(ExcelErrorKind::Value).with_message("expected a reference"));
        }
    };
    let tl = reference.top_left();
    let (first, count) = match axis {
        Axis::Row => (tl.row(), reference.height()),
        Axis::Col => (tl.col(), reference.width()),
    };
    if count == 1 {
        return Ok(CalcValue::Scalar(LiteralValue::Int(first as i64)));
    }
    let indices = (first..first + count).map(|i| LiteralValue::Int(i as i64));
    Ok(CalcValue::Array(match axis {
        Axis::Row => indices.map(|v| vec![v]).collect(),
        Axis::Col => vec![indices.collect()],
    }))
}

fn extent(args: &[CalcValue], axis: Axis) -> Result<CalcValue, ExcelError> {
    let (height, width) = match &args[0] {
        CalcValue::Reference(r) => (r.height() as usize, r.width() as usize),
        CalcValue::Array(grid) => grid_dims(grid),
        CalcValue::Scalar(LiteralValue::Array(grid)) => grid_dims(grid),
        CalcValue::Scalar(LiteralValue::Error(e)) => return Err(e.clone()),
        CalcValue::Scalar(_) => (1, 1),
    };
    let n = match axis {
        Axis::Row => height,
        Axis::Col => width,
    };
    Ok(CalcValue::Scalar(LiteralValue::Int(n as i64)))
}

#[derive(Debug)]
pub struct RowFn;

/// Returns the row number of a reference, or of the current cell when omitted.
///
/// # Remarks
/// - A multi-row range returns a vertical array of its row numbers.
/// - Entire-row spans such as `2:5` count their rows; entire-column spans
///   such as `A:A` cover every grid row.
/// - A non-reference argument returns `#VALUE!`.
impl Function for RowFn {
    fn name(&self) -> &'static str {
        "ROW"
    }
    fn max_args(&self) -> Option<usize> {
        Some(1)
    }
    fn eval(&self, args: &[CalcValue], ctx: &dyn FunctionContext) -> Result<CalcValue, ExcelError> {
        position(args, ctx, Axis::Row)
    }
}

#[derive(Debug)]
pub struct ColumnFn;

/// Returns the column number of a reference, or of the current cell when
/// omitted. A multi-column range returns a horizontal array.
impl Function for ColumnFn {
    fn name(&self) -> &'static str {
        "COLUMN"
    }
    fn max_args(&self) -> Option<usize> {
        Some(1)
    }
    fn eval(&self, args: &[CalcValue], ctx: &dyn FunctionContext) -> Result<CalcValue, ExcelError> {
        position(args, ctx, Axis::Col)
    }
}

#[derive(Debug)]
pub struct RowsFn;

/// Number of rows in a reference or array. A scalar counts as one row.
impl Function for RowsFn {
    fn name(&self) -> &'static str {
        "ROWS"
    }
    fn min_args(&self) -> usize {
        1
    }
    fn max_args(&self) -> Option<usize> {
        Some(1)
    }
    fn eval(&self, args: &[CalcValue], _ctx: &dyn FunctionContext) -> Result<CalcValue, ExcelError> {
        extent(args, Axis::Row)
    }
}

#[derive(Debug)]
pub struct ColumnsFn;

impl Function for ColumnsFn {
    fn name(&self) -> &'static str {
        "COLUMNS"
    }
    fn min_args(&self) -> usize {
        1
    }
    fn max_args(&self) -> Option<usize> {
        Some(1)
    }
    fn eval(&self, args: &[CalcValue], _ctx: &dyn FunctionContext) -> Result<CalcValue, ExcelError> {
        extent(args, Axis::Col)
    }
}

pub fn register_builtins() {
    use std::sync::Arc;
    crate::function_registry::register_function(Arc::new(RowFn));
    crate::function_registry::register_function(Arc::new(ColumnFn));
    crate::function_registry::register_function(Arc::new(RowsFn));
    crate::function_registry::register_function(Arc::new(ColumnsFn));
}
