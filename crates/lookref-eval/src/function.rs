//! The `Function` trait every builtin implements, and its capability flags.

use lookref_common::{ExcelError, ExcelErrorKind, Reference};

use crate::traits::{CalcValue, FunctionContext};

bitflags::bitflags! {
    /// Describes the capabilities and properties of a function.
    ///
    /// The evaluator uses these to decide how a call may be scheduled and
    /// whether its result needs reference-context handling.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct FnCaps: u8 {
        /// Same output for the same input, no side effects.
        const PURE               = 0b0000_0001;
        /// Output can change without its inputs changing (`OFFSET`, `INDIRECT`).
        const VOLATILE           = 0b0000_0010;
        /// Performs a search over an array (`MATCH`, `VLOOKUP`).
        const LOOKUP             = 0b0000_0100;
        /// Can yield a reference rather than a value (`INDEX`, `OFFSET`).
        const RETURNS_REFERENCE  = 0b0000_1000;
        /// Which cells the result depends on is only known after evaluation.
        const DYNAMIC_DEPENDENCY = 0b0001_0000;
    }
}

/// Object-safe trait for spreadsheet functions.
pub trait Function: Send + Sync + 'static {
    fn caps(&self) -> FnCaps {
        FnCaps::PURE
    }

    fn name(&self) -> &'static str;

    fn min_args(&self) -> usize {
        0
    }

    /// `None` means variadic.
    fn max_args(&self) -> Option<usize> {
        None
    }

    fn volatile(&self) -> bool {
        self.caps().contains(FnCaps::VOLATILE)
    }

    /// Value-context evaluation. References produced internally are resolved
    /// through `ctx` before returning.
    fn eval(&self, args: &[CalcValue], ctx: &dyn FunctionContext) -> Result<CalcValue, ExcelError>;

    /// Reference-context evaluation for functions that can produce a
    /// reference. `None` means "no reference for these arguments; use `eval`".
    fn eval_reference(
        &self,
        _args: &[CalcValue],
        _ctx: &dyn FunctionContext,
    ) -> Option<Result<Reference, ExcelError>> {
        None
    }

    /// Arity-checked value-context call. Never fails: errors come back as
    /// scalar error values.
    fn dispatch(&self, args: &[CalcValue], ctx: &dyn FunctionContext) -> CalcValue {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!("dispatch", function = self.name(), argc = args.len())
            .entered();
        if let Err(e) = self.check_arity(args.len()) {
            return e.into();
        }
        self.eval(args, ctx).unwrap_or_else(CalcValue::from)
    }

    /// Arity-checked reference-context call.
    fn dispatch_reference(
        &self,
        args: &[CalcValue],
        ctx: &dyn FunctionContext,
    ) -> Option<Result<Reference, ExcelError>> {
        if let Err(e) = self.check_arity(args.len()) {
            return Some(Err(e));
        }
        self.eval_reference(args, ctx)
    }

    fn check_arity(&self, argc: usize) -> Result<(), ExcelError> {
        let too_many = self.max_args().is_some_and(|max| argc > max);
        if argc < self.min_args() || too_many {
            return Err(ExcelError::new(ExcelErrorKind::Value).with_message(format!(
                "{} takes {}..{} arguments, got {argc}",
                self.name(),
                self.min_args(),
                self.max_args().map_or_else(|| "n".to_string(), |m| m.to_string()),
            )));
        }
        Ok(())
    }
}
