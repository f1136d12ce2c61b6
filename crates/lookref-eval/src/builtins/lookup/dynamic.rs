//! Dynamic-array FILTER.

use lookref_common::{ExcelError, ExcelErrorKind, LiteralValue, grid_dims};

use crate::builtins::utils::{Shaped, arg, shaped_arg};
use crate::function::{FnCaps, Function};
use crate::traits::{CalcValue, FunctionContext, Grid};

fn include_flag(v: &LiteralValue) -> Result<bool, ExcelError> {
    match v {
        LiteralValue::Error(e) => Err(e.clone()),
        other => Ok(other.is_truthy()),
    }
}

/// Keep the columns or rows of `values` selected by `include`.
///
/// A single-row `include` as wide as `values` selects columns; otherwise a
/// single-column `include` as tall as `values` selects rows. Any other
/// shape is `#VALUE!`. `Ok(None)` means nothing was kept.
pub fn filter(values: &Grid, include: &Grid) -> Result<Option<Grid>, ExcelError> {
    let (height, width) = grid_dims(values);
    let (inc_h, inc_w) = grid_dims(include);
    let kept: Grid = if inc_h == 1 && inc_w == width {
        let mut keep = Vec::with_capacity(width);
        for flag in &include[0] {
            keep.push(include_flag(flag)?);
        }
        values
            .iter()
            .map(|row| {
                row.iter()
                    .zip(&keep)
                    .filter_map(|(v, k)| k.then(|| v.clone()))
                    .collect::<Vec<_>>()
            })
            .filter(|row| !row.is_empty())
            .collect()
    } else if inc_w == 1 && inc_h == height {
        let mut kept = Vec::new();
        for (row, flag) in values.iter().zip(include) {
            if include_flag(&flag[0])? {
                kept.push(row.clone());
            }
        }
        kept
    } else {
        return Err(ExcelError::new(ExcelErrorKind::Value)
            .with_message(format!("include is {inc_h}x{inc_w}, values {height}x{width}")));
    };
    Ok((!kept.is_empty()).then_some(kept))
}

#[derive(Debug)]
pub struct FilterFn;

/// `FILTER(array, include, [if_empty])`
///
/// # Remarks
/// - `if_empty` defaults to `#VALUE!`.
/// - A scalar `include` keeps a single-row or single-column `array` whole
///   when truthy.
impl Function for FilterFn {
    fn name(&self) -> &'static str {
        "FILTER"
    }
    fn min_args(&self) -> usize {
        2
    }
    fn max_args(&self) -> Option<usize> {
        Some(3)
    }
    fn caps(&self) -> FnCaps {
        FnCaps::PURE
    }
    fn eval(&self, args: &[CalcValue], ctx: &dyn FunctionContext) -> Result<CalcValue, ExcelError> {
        let if_empty = || match arg(args, 2) {
            Some(CalcValue::Reference(r)) => ctx.resolve_value(r),
            Some(v) => v.clone(),
            None => CalcValue::error(ExcelErrorKind::Value),
        };
        let values = match shaped_arg(&args[0], ctx)? {
            Shaped::Grid(g) => g,
            Shaped::Scalar(LiteralValue::Error(e)) => return Err(e),
            Shaped::Scalar(v) => vec![vec![v]],
        };
        match shaped_arg(&args[1], ctx)? {
            Shaped::Scalar(flag) => {
                let (h, w) = grid_dims(&values);
                if (h == 1 || w == 1) && include_flag(&flag)? {
                    Ok(CalcValue::Array(values))
                } else {
                    Ok(if_empty())
                }
            }
            Shaped::Grid(include) => match filter(&values, &include)? {
                Some(kept) => Ok(CalcValue::Array(kept)),
                None => Ok(if_empty()),
            },
        }
    }
}

pub fn register_builtins() {
    use std::sync::Arc;
    crate::function_registry::register_function(Arc::new(FilterFn));
}
