//! Classic lookup essentials: MATCH, VLOOKUP, HLOOKUP, LOOKUP.
//!
//! Implementation notes:
//! - all four share one [`Matcher`]; approximate modes run a bisect-right
//!   over the trimmed window, exact mode a linear scan (wildcards for text
//!   targets unless disabled in [`EvalConfig`])
//! - an error target is returned unchanged before any shape check
//! - after that: domain checks (`#VALUE!`), bounds checks (`#REF!`),
//!   then not-found (`#N/A`)

use lookref_common::{ExcelError, ExcelErrorKind, LiteralValue, grid_dims};

use crate::builtins::utils::{
    Shaped, arg, as_vector, int_arg, number_arg, opt_bool_arg, scalar_arg, shaped_arg,
};
use crate::config::EvalConfig;
use crate::function::{FnCaps, Function};
use crate::matcher::{ColumnView, MatchMode, Matcher};
use crate::traits::{CalcValue, FunctionContext};

fn not_found() -> ExcelError {
    ExcelError::new(ExcelErrorKind::Na)
}

fn pass_through(target: &LiteralValue) -> Result<(), ExcelError> {
    match target {
        LiteralValue::Error(e) => Err(e.clone()),
        _ => Ok(()),
    }
}

/// MATCH over an already-shaped array.
///
/// A single-row array is searched along the row; anything else along its
/// first column.
pub fn match_position(
    target: &LiteralValue,
    lookup_array: &[Vec<LiteralValue>],
    match_type: f64,
    config: &EvalConfig,
) -> Result<i64, ExcelError> {
    pass_through(target)?;
    let matcher = Matcher::new(target, MatchMode::from_match_type(match_type), config);
    let found = match lookup_array {
        [row] => matcher.find(row.as_slice()),
        rows => matcher.find(&ColumnView::new(rows, 0)),
    };
    found.map(|p| p as i64).ok_or_else(not_found)
}

/// VLOOKUP over an already-shaped table.
pub fn vlookup(
    target: &LiteralValue,
    table: &[Vec<LiteralValue>],
    column_index: i64,
    approximate: bool,
    config: &EvalConfig,
) -> Result<LiteralValue, ExcelError> {
    pass_through(target)?;
    let (_, width) = grid_dims(table);
    if column_index < 1 {
        return Err(ExcelError::new(ExcelErrorKind::Value)
            .with_message(format!("column index {column_index} must be at least 1")));
    }
    if column_index as usize > width {
        return Err(ExcelError::new(ExcelErrorKind::Ref)
            .with_message(format!("column index {column_index} beyond table width {width}")));
    }
    let pos = Matcher::new(target, MatchMode::from_approximate(approximate), config)
        .find(&ColumnView::new(table, 0))
        .ok_or_else(not_found)?;
    project(table, pos - 1, column_index as usize - 1)
}

/// HLOOKUP over an already-shaped table.
pub fn hlookup(
    target: &LiteralValue,
    table: &[Vec<LiteralValue>],
    row_index: i64,
    approximate: bool,
    config: &EvalConfig,
) -> Result<LiteralValue, ExcelError> {
    pass_through(target)?;
    let (height, _) = grid_dims(table);
    if row_index < 1 {
        return Err(ExcelError::new(ExcelErrorKind::Value)
            .with_message(format!("row index {row_index} must be at least 1")));
    }
    if row_index as usize > height {
        return Err(ExcelError::new(ExcelErrorKind::Ref)
            .with_message(format!("row index {row_index} beyond table height {height}")));
    }
    let pos = Matcher::new(target, MatchMode::from_approximate(approximate), config)
        .find(table[0].as_slice())
        .ok_or_else(not_found)?;
    project(table, row_index as usize - 1, pos - 1)
}

/// LOOKUP, vector or array form. Always an ascending search.
///
/// Without `result_vector` the array form applies: a table at least as
/// tall as it is wide is searched down its first column and answered from
/// its last column, otherwise across its first row and answered from its
/// last row. A supplied result must be one row or one column (`#N/A`
/// otherwise); a match past its end is `#REF!`.
pub fn lookup(
    target: &LiteralValue,
    lookup_array: &[Vec<LiteralValue>],
    result_vector: Option<&[Vec<LiteralValue>]>,
    config: &EvalConfig,
) -> Result<LiteralValue, ExcelError> {
    pass_through(target)?;
    let result = match result_vector {
        Some(grid) => Some(as_vector(grid).ok_or_else(|| {
            not_found().with_message("result_vector must be a single row or column")
        })?),
        None => None,
    };
    let (height, width) = grid_dims(lookup_array);
    if height == 0 || width == 0 {
        return Err(not_found());
    }
    let matcher = Matcher::new(target, MatchMode::Ascending, config);
    let (pos, answers): (usize, Vec<LiteralValue>) = if width <= height {
        let pos = matcher.find(&ColumnView::new(lookup_array, 0)).ok_or_else(not_found)?;
        let answers = result.unwrap_or_else(|| {
            lookup_array
                .iter()
                .map(|row| row.get(width - 1).cloned().unwrap_or(LiteralValue::Empty))
                .collect()
        });
        (pos, answers)
    } else {
        let pos = matcher.find(lookup_array[0].as_slice()).ok_or_else(not_found)?;
        let answers = result.unwrap_or_else(|| lookup_array[height - 1].clone());
        (pos, answers)
    };
    answers
        .get(pos - 1)
        .cloned()
        .ok_or_else(|| {
            ExcelError::new(ExcelErrorKind::Ref)
                .with_message("result vector shorter than the match position")
        })
}

fn project(table: &[Vec<LiteralValue>], row: usize, col: usize) -> Result<LiteralValue, ExcelError> {
    table
        .get(row)
        .and_then(|r| r.get(col))
        .cloned()
        .ok_or_else(|| ExcelError::new(ExcelErrorKind::Ref))
}

/// Materialise a table argument; a plain scalar is not a table.
fn table_arg(value: &CalcValue, ctx: &dyn FunctionContext) -> Result<Vec<Vec<LiteralValue>>, ExcelError> {
    match shaped_arg(value, ctx)? {
        Shaped::Grid(grid) => Ok(grid),
        Shaped::Scalar(LiteralValue::Error(e)) => Err(e),
        Shaped::Scalar(_) => Err(not_found().with_message("lookup table is not an array")),
    }
}

#[derive(Debug)]
pub struct MatchFn;

/// Returns the 1-based position of a value within a single row or column.
///
/// # Remarks
/// - `match_type` > 0 (default 1): largest value `<=` target, data sorted ascending.
/// - `match_type` = 0: first exact match; text targets may use `*`, `?` and `~`.
/// - `match_type` < 0: smallest value `>=` target, data sorted descending.
/// - Values of another type than the target are never matched.
/// - No match returns `#N/A`.
impl Function for MatchFn {
    fn name(&self) -> &'static str {
        "MATCH"
    }
    fn min_args(&self) -> usize {
        2
    }
    fn max_args(&self) -> Option<usize> {
        Some(3)
    }
    fn caps(&self) -> FnCaps {
        FnCaps::PURE | FnCaps::LOOKUP
    }
    fn eval(&self, args: &[CalcValue], ctx: &dyn FunctionContext) -> Result<CalcValue, ExcelError> {
        let target = scalar_arg(&args[0], ctx);
        pass_through(&target)?;
        let match_type = match arg(args, 2) {
            Some(v) => number_arg(v, ctx)?,
            None => 1.0,
        };
        let table = table_arg(&args[1], ctx)?;
        let pos = match_position(&target, &table, match_type, ctx.config())?;
        Ok(CalcValue::Scalar(LiteralValue::Int(pos)))
    }
}

#[derive(Debug)]
pub struct VLookupFn;

/// Looks a value up in the first column of a table and returns the value in
/// the same row from another column.
///
/// # Remarks
/// - `range_lookup` TRUE (the default) assumes the first column is sorted
///   ascending and returns the last row `<=` the target.
/// - `col_index_num` below 1 returns `#VALUE!`; beyond the table width `#REF!`.
/// - A table that is not an array returns `#N/A`.
impl Function for VLookupFn {
    fn name(&self) -> &'static str {
        "VLOOKUP"
    }
    fn min_args(&self) -> usize {
        3
    }
    fn max_args(&self) -> Option<usize> {
        Some(4)
    }
    fn caps(&self) -> FnCaps {
        FnCaps::PURE | FnCaps::LOOKUP
    }
    fn eval(&self, args: &[CalcValue], ctx: &dyn FunctionContext) -> Result<CalcValue, ExcelError> {
        let target = scalar_arg(&args[0], ctx);
        pass_through(&target)?;
        let table = table_arg(&args[1], ctx)?;
        let column_index = int_arg(&args[2], ctx)?;
        let approximate = opt_bool_arg(args, 3, ctx.config().vlookup_approximate_default, ctx)?;
        vlookup(&target, &table, column_index, approximate, ctx.config()).map(CalcValue::from)
    }
}

#[derive(Debug)]
pub struct HLookupFn;

/// Horizontal counterpart of `VLOOKUP`: searches the first row and returns
/// from the row at `row_index_num`.
impl Function for HLookupFn {
    fn name(&self) -> &'static str {
        "HLOOKUP"
    }
    fn min_args(&self) -> usize {
        3
    }
    fn max_args(&self) -> Option<usize> {
        Some(4)
    }
    fn caps(&self) -> FnCaps {
        FnCaps::PURE | FnCaps::LOOKUP
    }
    fn eval(&self, args: &[CalcValue], ctx: &dyn FunctionContext) -> Result<CalcValue, ExcelError> {
        let target = scalar_arg(&args[0], ctx);
        pass_through(&target)?;
        let table = table_arg(&args[1], ctx)?;
        let row_index = int_arg(&args[2], ctx)?;
        let approximate = opt_bool_arg(args, 3, ctx.config().vlookup_approximate_default, ctx)?;
        hlookup(&target, &table, row_index, approximate, ctx.config()).map(CalcValue::from)
    }
}

#[derive(Debug)]
pub struct LookupFn;

/// `LOOKUP(lookup_value, lookup_vector, [result_vector])` and the array form
/// `LOOKUP(lookup_value, array)`.
///
/// # Remarks
/// - Always an approximate (ascending) search.
/// - A `result_vector` that is not a single row or column returns `#N/A`.
/// - A match past the end of `result_vector` returns `#REF!`.
impl Function for LookupFn {
    fn name(&self) -> &'static str {
        "LOOKUP"
    }
    fn min_args(&self) -> usize {
        2
    }
    fn max_args(&self) -> Option<usize> {
        Some(3)
    }
    fn caps(&self) -> FnCaps {
        FnCaps::PURE | FnCaps::LOOKUP
    }
    fn eval(&self, args: &[CalcValue], ctx: &dyn FunctionContext) -> Result<CalcValue, ExcelError> {
        let target = scalar_arg(&args[0], ctx);
        pass_through(&target)?;
        let table = match shaped_arg(&args[1], ctx)? {
            Shaped::Grid(grid) => grid,
            Shaped::Scalar(LiteralValue::Error(e)) => return Err(e),
            Shaped::Scalar(v) => vec![vec![v]],
        };
        let result = match arg(args, 2) {
            Some(v) => Some(table_arg(v, ctx)?),
            None => None,
        };
        lookup(&target, &table, result.as_deref(), ctx.config()).map(CalcValue::from)
    }
}

pub fn register_builtins() {
    use std::sync::Arc;
    crate::function_registry::register_function(Arc::new(MatchFn));
    crate::function_registry::register_function(Arc::new(VLookupFn));
    crate::function_registry::register_function(Arc::new(HLookupFn));
    crate::function_registry::register_function(Arc::new(LookupFn));
}
