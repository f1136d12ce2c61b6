//! Reference functions: INDEX, OFFSET, INDIRECT, ADDRESS.
//!
//! INDEX, OFFSET and INDIRECT can produce references. In reference context
//! (`eval_reference`) they hand the [`Reference`] back to the evaluator; in
//! value context (`eval`) they resolve it through the caller's
//! [`FunctionContext`].

use lookref_common::{
    AbsMode, AddressStyle, CellAddress, ExcelError, ExcelErrorKind, GridCoord, LiteralValue,
    Reference, col_in_bounds, format_address, grid_dims, parse_reference, row_in_bounds,
};

use crate::builtins::utils::{Shaped, arg, int_arg, opt_bool_arg, opt_int_arg, scalar_arg, shaped_arg, value_arg};
use crate::config::EvalConfig;
use crate::function::{FnCaps, Function};
use crate::traits::{CalcValue, FunctionContext, Grid};

/* ───────────────────────────── INDEX ───────────────────────────── */

/// What an INDEX call selects out of an `height × width` source.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Pick {
    Whole,
    Cell(usize, usize),
    Row(usize),
    Col(usize),
}

fn pick(height: usize, width: usize, row: Option<i64>, col: Option<i64>) -> Result<Pick, ExcelError> {
    for n in [row, col].into_iter().flatten() {
        if n < 0 {
            return Err(ExcelError::new(ExcelErrorKind::Value)
                .with_message(format!("index {n} is negative")));
        }
    }
    // 0 means "not given"
    let row = row.filter(|&n| n > 0).map(|n| n as usize);
    let col = col.filter(|&n| n > 0).map(|n| n as usize);
    let beyond = |n: usize, len: usize, axis: &str| {
        ExcelError::new(ExcelErrorKind::Ref).with_message(format!("{axis} {n} beyond {len}"))
    };
    match (row, col) {
        (Some(r), Some(c)) => {
            if r > height {
                return Err(beyond(r, height, "row"));
            }
            if c > width {
                return Err(beyond(c, width, "column"));
            }
            Ok(Pick::Cell(r - 1, c - 1))
        }
        (Some(i), None) | (None, Some(i)) if height == 1 => {
            if i > width {
                return Err(beyond(i, width, "position"));
            }
            Ok(Pick::Cell(0, i - 1))
        }
        (Some(i), None) | (None, Some(i)) if width == 1 => {
            if i > height {
                return Err(beyond(i, height, "position"));
            }
            Ok(Pick::Cell(i - 1, 0))
        }
        (Some(r), None) => {
            if r > height {
                return Err(beyond(r, height, "row"));
            }
            Ok(Pick::Row(r - 1))
        }
        (None, Some(c)) => {
            if c > width {
                return Err(beyond(c, width, "column"));
            }
            Ok(Pick::Col(c - 1))
        }
        (None, None) => Ok(Pick::Whole),
    }
}

/// INDEX over an array. A single element comes back as a scalar, a row or
/// column as a 1×W / H×1 array.
pub fn index_array(grid: &[Vec<LiteralValue>], row: Option<i64>, col: Option<i64>) -> Result<CalcValue, ExcelError> {
    let (height, width) = grid_dims(grid);
    let missing = || ExcelError::new(ExcelErrorKind::Ref);
    Ok(match pick(height, width, row, col)? {
        Pick::Whole => CalcValue::Array(grid.to_vec()),
        Pick::Cell(r, c) => {
            CalcValue::Scalar(grid[r].get(c).cloned().ok_or_else(missing)?)
        }
        Pick::Row(r) => CalcValue::Array(vec![grid[r].clone()]),
        Pick::Col(c) => {
            let column: Result<Grid, ExcelError> = grid
                .iter()
                .map(|row| row.get(c).cloned().map(|v| vec![v]).ok_or_else(missing))
                .collect();
            CalcValue::Array(column?)
        }
    })
}

/// INDEX over a reference: the cell, row or column of `base` as a reference.
pub fn index_reference(base: &Reference, row: Option<i64>, col: Option<i64>) -> Result<Reference, ExcelError> {
    let picked = match pick(base.height() as usize, base.width() as usize, row, col)? {
        Pick::Whole => Ok(base.clone()),
        Pick::Cell(r, c) => base.cell_at(r as i64, c as i64).map(Reference::Cell),
        Pick::Row(r) => base.row_slice(r as i64),
        Pick::Col(c) => base.col_slice(c as i64),
    };
    Ok(picked?)
}

#[derive(Debug)]
pub struct IndexFn;

/// Returns the value or reference at a 1-based row and column within an array or range.
///
/// # Remarks
/// - A zero or omitted index selects the whole row/column (or the whole source).
/// - With only one index on a single-row or single-column source, the
///   index runs along that vector.
/// - Negative indexes return `#VALUE!`; indexes past the source `#REF!`.
/// - A plain scalar source returns `#VALUE!`; an error source is returned as is.
impl Function for IndexFn {
    fn name(&self) -> &'static str {
        "INDEX"
    }
    fn min_args(&self) -> usize {
        1
    }
    fn max_args(&self) -> Option<usize> {
        Some(3)
    }
    fn caps(&self) -> FnCaps {
        FnCaps::PURE | FnCaps::RETURNS_REFERENCE
    }

    fn eval_reference(&self, args: &[CalcValue], ctx: &dyn FunctionContext) -> Option<Result<Reference, ExcelError>> {
        let CalcValue::Reference(base) = &args[0] else {
            return None;
        };
        Some((|| -> Result<Reference, ExcelError> {
            let row = opt_int_arg(args, 1, ctx)?;
            let col = opt_int_arg(args, 2, ctx)?;
            index_reference(base, row, col)
        })())
    }

    fn eval(&self, args: &[CalcValue], ctx: &dyn FunctionContext) -> Result<CalcValue, ExcelError> {
        if let Some(reference) = self.eval_reference(args, ctx) {
            return Ok(ctx.resolve_value(&reference?));
        }
        let grid = match shaped_arg(&args[0], ctx)? {
            Shaped::Grid(grid) => grid,
            Shaped::Scalar(LiteralValue::Error(e)) => return Err(e),
            Shaped::Scalar(_) => {
                return Err(ExcelError::new(ExcelErrorKind::Value).with_message("INDEX source is not an array"));
            }
        };
        let row = opt_int_arg(args, 1, ctx)?;
        let col = opt_int_arg(args, 2, ctx)?;
        index_array(&grid, row, col)
    }
}

/* ───────────────────────────── OFFSET ──────────────────────────── */

/// OFFSET arithmetic on a reference; every failure is `#REF!`.
pub fn offset(
    base: &Reference,
    rows: i64,
    cols: i64,
    height: Option<i64>,
    width: Option<i64>,
) -> Result<Reference, ExcelError> {
    Ok(base.offset(rows, cols, height, width)?)
}

fn reference_arg(value: &CalcValue) -> Result<&Reference, ExcelError> {
    match value {
        CalcValue::Reference(r) => Ok(r),
        CalcValue::Scalar(LiteralValue::Error(e)) => Err(e.clone()),
        _ => Err(ExcelError::new(ExcelErrorKind::Value).with_message("expected a reference")),
    }
}

#[derive(Debug)]
pub struct OffsetFn;

/// Returns a reference shifted from a starting reference by rows and columns.
///
/// # Remarks
/// - `height` and `width` default to the size of `reference`.
/// - A non-positive size, or any edge leaving the grid, returns `#REF!`.
/// - In value context a 1x1 result is a scalar; larger results are arrays.
impl Function for OffsetFn {
    fn name(&self) -> &'static str {
        "OFFSET"
    }
    fn min_args(&self) -> usize {
        3
    }
    fn max_args(&self) -> Option<usize> {
        Some(5)
    }
    fn caps(&self) -> FnCaps {
        FnCaps::PURE | FnCaps::RETURNS_REFERENCE | FnCaps::VOLATILE | FnCaps::DYNAMIC_DEPENDENCY
    }

    fn eval_reference(&self, args: &[CalcValue], ctx: &dyn FunctionContext) -> Option<Result<Reference, ExcelError>> {
        Some((|| -> Result<Reference, ExcelError> {
            let base = reference_arg(&args[0])?;
            let rows = int_arg(&args[1], ctx)?;
            let cols = int_arg(&args[2], ctx)?;
            let height = opt_int_arg(args, 3, ctx)?;
            let width = opt_int_arg(args, 4, ctx)?;
            offset(base, rows, cols, height, width)
        })())
    }

    fn eval(&self, args: &[CalcValue], ctx: &dyn FunctionContext) -> Result<CalcValue, ExcelError> {
        match self.eval_reference(args, ctx) {
            Some(reference) => Ok(ctx.resolve_value(&reference?)),
            None => Err(ExcelError::new(ExcelErrorKind::Ref)),
        }
    }
}

/* ──────────────────────────── INDIRECT ─────────────────────────── */

/// Parse reference text the way INDIRECT does.
///
/// Unqualified text lands on `current_sheet`. Relative R1C1 parts are
/// measured from `current_cell`; see
/// [`EvalConfig::r1c1_relative_origin_required`] for when it is missing.
pub fn indirect(
    text: &str,
    a1: bool,
    current_sheet: &str,
    current_cell: Option<&CellAddress>,
    config: &EvalConfig,
) -> Result<Reference, ExcelError> {
    let origin = match current_cell {
        Some(cell) => Some(cell.coord),
        None if config.r1c1_relative_origin_required => None,
        None => GridCoord::try_new(1, 1).ok(),
    };
    match parse_reference(text, AddressStyle::from_a1_flag(a1), origin) {
        Ok(reference) => Ok(reference.with_default_sheet(current_sheet)),
        Err(err) => {
            #[cfg(feature = "tracing")]
            tracing::debug!(text, error = %err, "INDIRECT could not parse reference");
            Err(err.into())
        }
    }
}

#[derive(Debug)]
pub struct IndirectFn;

/// Returns the reference named by a text string.
///
/// # Remarks
/// - `a1` TRUE (default) reads A1 text, FALSE reads R1C1 text.
/// - Text that is not a reference, or points outside the grid, returns `#REF!`.
impl Function for IndirectFn {
    fn name(&self) -> &'static str {
        "INDIRECT"
    }
    fn min_args(&self) -> usize {
        1
    }
    fn max_args(&self) -> Option<usize> {
        Some(2)
    }
    fn caps(&self) -> FnCaps {
        FnCaps::PURE | FnCaps::RETURNS_REFERENCE | FnCaps::VOLATILE | FnCaps::DYNAMIC_DEPENDENCY
    }

    fn eval_reference(&self, args: &[CalcValue], ctx: &dyn FunctionContext) -> Option<Result<Reference, ExcelError>> {
        Some((|| -> Result<Reference, ExcelError> {
            let text = match value_arg(&args[0], ctx)? {
                LiteralValue::Text(s) => s,
                other => other.to_string(),
            };
            let a1 = opt_bool_arg(args, 1, true, ctx)?;
            let current = ctx.current_cell();
            indirect(&text, a1, ctx.current_sheet(), current.as_ref(), ctx.config())
        })())
    }

    fn eval(&self, args: &[CalcValue], ctx: &dyn FunctionContext) -> Result<CalcValue, ExcelError> {
        match self.eval_reference(args, ctx) {
            Some(reference) => Ok(ctx.resolve_value(&reference?)),
            None => Err(ExcelError::new(ExcelErrorKind::Ref)),
        }
    }
}

/* ──────────────────────────── ADDRESS ──────────────────────────── */

/// Build address text for a coordinate.
///
/// `abs_num` 1..=4 chooses which parts are anchored; an empty `sheet` is
/// ignored.
pub fn address(row: i64, col: i64, abs_num: i64, a1: bool, sheet: Option<&str>) -> Result<String, ExcelError> {
    let value_err = |msg: String| ExcelError::new(ExcelErrorKind::Value).with_message(msg);
    if !row_in_bounds(row) {
        return Err(value_err(format!("row {row} outside the grid")));
    }
    if !col_in_bounds(col) {
        return Err(value_err(format!("column {col} outside the grid")));
    }
    let abs = AbsMode::from_flag(abs_num).ok_or_else(|| value_err(format!("abs_num {abs_num} not in 1..=4")))?;
    Ok(format_address(row as u32, col as u32, abs, AddressStyle::from_a1_flag(a1), sheet))
}

#[derive(Debug)]
pub struct AddressFn;

/// `ADDRESS(row_num, column_num, [abs_num], [a1], [sheet_text])`
///
/// # Remarks
/// - `abs_num`: 1 `$A$1` (default), 2 `A$1`, 3 `$A1`, 4 `A1`.
/// - `a1` FALSE formats R1C1 text, relative parts in brackets.
/// - `sheet_text` is always quoted: `'Data'!$A$1`.
impl Function for AddressFn {
    fn name(&self) -> &'static str {
        "ADDRESS"
    }
    fn min_args(&self) -> usize {
        2
    }
    fn max_args(&self) -> Option<usize> {
        Some(5)
    }

    fn eval(&self, args: &[CalcValue], ctx: &dyn FunctionContext) -> Result<CalcValue, ExcelError> {
        let row = int_arg(&args[0], ctx)?;
        let col = int_arg(&args[1], ctx)?;
        let abs_num = opt_int_arg(args, 2, ctx)?.unwrap_or(1);
        let a1 = opt_bool_arg(args, 3, true, ctx)?;
        let sheet = match arg(args, 4).map(|v| scalar_arg(v, ctx)) {
            None | Some(LiteralValue::Empty) => None,
            Some(LiteralValue::Error(e)) => return Err(e),
            Some(LiteralValue::Text(s)) => Some(s),
            Some(other) => Some(other.to_string()),
        };
        let text = address(row, col, abs_num, a1, sheet.as_deref())?;
        Ok(CalcValue::Scalar(LiteralValue::Text(text)))
    }
}

pub fn register_builtins() {
    use std::sync::Arc;
    crate::function_registry::register_function(Arc::new(IndexFn));
    crate::function_registry::register_function(Arc::new(OffsetFn));
    crate::function_registry::register_function(Arc::new(IndirectFn));
    crate::function_registry::register_function(Arc::new(AddressFn));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_workbook::TestWorkbook;

    fn n(v: i64) -> LiteralValue {
        LiteralValue::Int(v)
    }

    fn int(v: i64) -> CalcValue {
        CalcValue::Scalar(n(v))
    }

    fn kind<T: std::fmt::Debug>(r: Result<T, ExcelError>) -> ExcelErrorKind {
        r.expect_err("expected an error").kind
    }

    fn grid_2x3() -> Grid {
        vec![vec![n(1), n(2), n(3)], vec![n(4), n(5), n(6)]]
    }

    #[test]
    fn index_array_elements_rows_and_columns() {
        let g = grid_2x3();
        assert_eq!(index_array(&g, Some(2), Some(3)), Ok(int(6)));
        assert_eq!(index_array(&g, Some(2), None), Ok(CalcValue::Array(vec![g[1].clone()])));
        assert_eq!(index_array(&g, Some(2), Some(0)), Ok(CalcValue::Array(vec![g[1].clone()])));
        assert_eq!(
            index_array(&g, Some(0), Some(2)),
            Ok(CalcValue::Array(vec![vec![n(2)], vec![n(5)]]))
        );
        assert_eq!(index_array(&g, None, None), Ok(CalcValue::Array(g.clone())));
        assert_eq!(kind(index_array(&g, Some(3), Some(1))), ExcelErrorKind::Ref);
        assert_eq!(kind(index_array(&g, Some(1), Some(4))), ExcelErrorKind::Ref);
        assert_eq!(kind(index_array(&g, Some(-1), Some(1))), ExcelErrorKind::Value);
        // negative wins over out of bounds
        assert_eq!(kind(index_array(&g, Some(99), Some(-1))), ExcelErrorKind::Value);
    }

    #[test]
    fn index_vectors_follow_their_long_axis() {
        let col = vec![vec![n(10)], vec![n(20)], vec![n(30)]];
        assert_eq!(index_array(&col, Some(2), None), Ok(int(20)));
        let row = vec![vec![n(10), n(20), n(30)]];
        assert_eq!(index_array(&row, Some(3), None), Ok(int(30)));
        assert_eq!(index_array(&row, None, Some(2)), Ok(int(20)));
        assert_eq!(kind(index_array(&row, Some(4), None)), ExcelErrorKind::Ref);
    }

    #[test]
    fn index_reference_projects_spans() {
        let wb = TestWorkbook::new();
        let base = wb.reference("B2:D4");
        assert_eq!(index_reference(&base, Some(2), Some(3)).unwrap().to_string(), "Sheet1!D3");
        assert_eq!(index_reference(&base, Some(3), None).unwrap().to_string(), "Sheet1!B4:D4");
        assert_eq!(index_reference(&base, None, Some(1)).unwrap().to_string(), "Sheet1!B2:B4");
        assert_eq!(index_reference(&base, None, None).unwrap(), base);
        assert_eq!(kind(index_reference(&base, Some(4), Some(1))), ExcelErrorKind::Ref);
        let whole_col = wb.reference("C:C");
        assert_eq!(index_reference(&whole_col, Some(7), None).unwrap().to_string(), "Sheet1!C7");
    }

    #[test]
    fn index_fn_value_and_reference_context() {
        let wb = TestWorkbook::new().with_range("Sheet1", 1, 1, grid_2x3());
        let args = [CalcValue::Reference(wb.reference("A1:C2")), int(2), int(2)];
        assert_eq!(IndexFn.dispatch(&args, &wb), int(5));
        assert_eq!(IndexFn.dispatch_reference(&args, &wb), Some(Ok(wb.reference("B2"))));
        let row = [CalcValue::Reference(wb.reference("A1:C2")), int(1)];
        assert_eq!(
            IndexFn.dispatch(&row, &wb),
            CalcValue::Array(vec![vec![n(1), n(2), n(3)]])
        );
        let literal = [CalcValue::Array(grid_2x3()), int(1), int(3)];
        assert_eq!(IndexFn.dispatch(&literal, &wb), int(3));
        assert_eq!(IndexFn.dispatch_reference(&literal, &wb), None);
    }

    #[test]
    fn index_fn_scalar_sources() {
        let wb = TestWorkbook::new();
        let plain = [int(5), int(1)];
        assert_eq!(
            IndexFn.dispatch(&plain, &wb).as_error().map(|e| e.kind),
            Some(ExcelErrorKind::Value)
        );
        let err = [CalcValue::error(ExcelErrorKind::Div), int(1)];
        assert_eq!(
            IndexFn.dispatch(&err, &wb).as_error().map(|e| e.kind),
            Some(ExcelErrorKind::Div)
        );
    }

    #[test]
    fn offset_moves_and_resizes() {
        let wb = TestWorkbook::new();
        let a1 = wb.reference("A1");
        assert_eq!(offset(&a1, 0, 0, Some(1), Some(1)), Ok(a1.clone()));
        assert_eq!(offset(&a1, 1, 1, None, None).unwrap().to_string(), "Sheet1!B2");
        assert_eq!(offset(&a1, 1, 0, Some(2), Some(2)).unwrap().to_string(), "Sheet1!A2:B3");
        assert_eq!(kind(offset(&a1, -1, 0, None, None)), ExcelErrorKind::Ref);
        assert_eq!(kind(offset(&a1, 0, 0, Some(0), None)), ExcelErrorKind::Ref);
        assert_eq!(kind(offset(&a1, 0, 0, None, Some(-2))), ExcelErrorKind::Ref);
        assert_eq!(kind(offset(&a1, i64::MAX, 0, None, None)), ExcelErrorKind::Ref);
        assert_eq!(kind(offset(&a1, 0, 0, Some(i64::MAX), None)), ExcelErrorKind::Ref);
    }

    #[test]
    fn offset_fn_huge_arguments_are_ref_errors() {
        let wb = TestWorkbook::new();
        let a2 = CalcValue::Reference(wb.reference("A2"));
        let huge = CalcValue::Scalar(LiteralValue::Number(1e300));
        for args in [
            vec![a2.clone(), huge.clone(), int(0)],
            vec![a2.clone(), int(0), huge.clone()],
            vec![a2.clone(), int(0), int(0), huge.clone()],
        ] {
            assert_eq!(
                OffsetFn.dispatch(&args, &wb).as_error().map(|e| e.kind),
                Some(ExcelErrorKind::Ref)
            );
        }
        let text = [
            CalcValue::Scalar(LiteralValue::Text(format!("R[{}]C1", i64::MAX))),
            CalcValue::Scalar(LiteralValue::Boolean(false)),
        ];
        let wb = wb.with_current_cell("E5");
        assert_eq!(
            IndirectFn.dispatch(&text, &wb).as_error().map(|e| e.kind),
            Some(ExcelErrorKind::Ref)
        );
    }

    #[test]
    fn offset_fn_resolves_in_value_context() {
        let wb = TestWorkbook::new().with_range("Sheet1", 2, 1, vec![vec![n(1), n(4)], vec![n(2), n(5)]]);
        let a1 = CalcValue::Reference(wb.reference("A1"));
        let args = [a1.clone(), int(1), int(1)];
        assert_eq!(OffsetFn.dispatch(&args, &wb), int(4));
        let sized = [a1.clone(), int(1), int(0), int(2), int(2)];
        assert_eq!(
            OffsetFn.dispatch(&sized, &wb),
            CalcValue::Array(vec![vec![n(1), n(4)], vec![n(2), n(5)]])
        );
        let blank_size = [a1.clone(), int(0), int(1), CalcValue::Scalar(LiteralValue::Empty)];
        assert_eq!(OffsetFn.dispatch_reference(&blank_size, &wb), Some(Ok(wb.reference("B1"))));
        let not_a_ref = [int(3), int(0), int(0)];
        assert_eq!(
            OffsetFn.dispatch(&not_a_ref, &wb).as_error().map(|e| e.kind),
            Some(ExcelErrorKind::Value)
        );
        assert!(OffsetFn.volatile());
    }

    #[test]
    fn indirect_a1_and_r1c1() {
        let cfg = EvalConfig::default();
        let here = CellAddress::try_new(Some("Sheet1"), 5, 5).unwrap();
        let r = indirect("B3", true, "Data", None, &cfg).unwrap();
        assert_eq!(r.to_string(), "Data!B3");
        let r = indirect("Other!A1:B2", true, "Data", None, &cfg).unwrap();
        assert_eq!(r.to_string(), "Other!A1:B2");
        let r = indirect("R[-1]C[1]", false, "Data", Some(&here), &cfg).unwrap();
        assert_eq!(r.to_string(), "Data!F4");
        assert_eq!(kind(indirect("R[-1]C[1]", false, "Data", None, &cfg)), ExcelErrorKind::Ref);
        let lenient = EvalConfig {
            r1c1_relative_origin_required: false,
            ..EvalConfig::default()
        };
        let r = indirect("R[1]C[1]", false, "Data", None, &lenient).unwrap();
        assert_eq!(r.to_string(), "Data!B2");
        assert_eq!(kind(indirect("not a ref", true, "Data", None, &cfg)), ExcelErrorKind::Ref);
        assert_eq!(kind(indirect("XFE1", true, "Data", None, &cfg)), ExcelErrorKind::Ref);
        assert_eq!(kind(indirect("", true, "Data", None, &cfg)), ExcelErrorKind::Ref);
    }

    #[test]
    fn indirect_fn_reads_cells() {
        let wb = TestWorkbook::new()
            .with_cell_a1("Sheet1", "C3", n(9))
            .with_current_cell("A1");
        let args = [CalcValue::Scalar(LiteralValue::Text("c3".into()))];
        assert_eq!(IndirectFn.dispatch(&args, &wb), int(9));
        let r1c1 = [
            CalcValue::Scalar(LiteralValue::Text("R[2]C[2]".into())),
            CalcValue::Scalar(LiteralValue::Boolean(false)),
        ];
        assert_eq!(IndirectFn.dispatch(&r1c1, &wb), int(9));
        let bad = [CalcValue::Scalar(LiteralValue::Text("??".into()))];
        assert_eq!(
            IndirectFn.dispatch(&bad, &wb).as_error().map(|e| e.kind),
            Some(ExcelErrorKind::Ref)
        );
    }

    #[test]
    fn address_formats() {
        assert_eq!(address(1, 1, 1, true, None).unwrap(), "$A$1");
        assert_eq!(address(1, 1, 4, true, None).unwrap(), "A1");
        assert_eq!(address(2, 3, 1, false, None).unwrap(), "R2C3");
        assert_eq!(address(2, 3, 4, false, None).unwrap(), "R[2]C[3]");
        assert_eq!(address(3, 27, 3, true, Some("My Sheet")).unwrap(), "'My Sheet'!$AA3");
        assert_eq!(kind(address(0, 1, 1, true, None)), ExcelErrorKind::Value);
        assert_eq!(kind(address(1, 16_385, 1, true, None)), ExcelErrorKind::Value);
        assert_eq!(kind(address(1, 1, 5, true, None)), ExcelErrorKind::Value);
    }

    #[test]
    fn address_fn_defaults() {
        let wb = TestWorkbook::new();
        let args = [int(4), int(2)];
        assert_eq!(
            AddressFn.dispatch(&args, &wb),
            CalcValue::Scalar(LiteralValue::Text("$B$4".into()))
        );
        let full = [
            int(4),
            int(2),
            int(2),
            CalcValue::Scalar(LiteralValue::Boolean(true)),
            CalcValue::Scalar(LiteralValue::Text("Q1".into())),
        ];
        assert_eq!(
            AddressFn.dispatch(&full, &wb),
            CalcValue::Scalar(LiteralValue::Text("'Q1'!B$4".into()))
        );
    }
}
