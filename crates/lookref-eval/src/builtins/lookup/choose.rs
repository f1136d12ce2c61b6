//! CHOOSE function - selects one of its arguments by position
//!
//! - CHOOSE(index_num, value1, [value2], ...)
//! - index_num is truncated; below 1 or past the last value is #VALUE!
//! - the chosen argument is returned as given, so references stay references

use lookref_common::{ExcelError, ExcelErrorKind, Reference};

use crate::builtins::utils::int_arg;
use crate::function::{FnCaps, Function};
use crate::traits::{CalcValue, FunctionContext};

#[derive(Debug)]
pub struct ChooseFn;

impl ChooseFn {
    fn pick<'a>(
        args: &'a [CalcValue],
        ctx: &dyn FunctionContext,
    ) -> Result<&'a CalcValue, ExcelError> {
        let index = int_arg(&args[0], ctx)?;
        let choices = &args[1..];
        if index < 1 || index as usize > choices.len() {
            return Err(ExcelError::new(ExcelErrorKind::Value)
                .with_message(format!("index {index} outside 1..={}", choices.len())));
        }
        Ok(&choices[index as usize - 1])
    }
}

impl Function for ChooseFn {
    fn name(&self) -> &'static str {
        "CHOOSE"
    }

    fn min_args(&self) -> usize {
        2
    }

    fn caps(&self) -> FnCaps {
        FnCaps::PURE | FnCaps::LOOKUP | FnCaps::RETURNS_REFERENCE
    }

    fn eval(&self, args: &[CalcValue], ctx: &dyn FunctionContext) -> Result<CalcValue, ExcelError> {
        match Self::pick(args, ctx)? {
            CalcValue::Reference(r) => Ok(ctx.resolve_value(r)),
            other => Ok(other.clone()),
        }
    }

    fn eval_reference(
        &self,
        args: &[CalcValue],
        ctx: &dyn FunctionContext,
    ) -> Option<Result<Reference, ExcelError>> {
        match Self::pick(args, ctx) {
            Ok(CalcValue::Reference(r)) => Some(Ok(r.clone())),
            Ok(_) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

pub fn register_builtins() {
    use std::sync::Arc;
    crate::function_registry::register_function(Arc::new(ChooseFn));
}
