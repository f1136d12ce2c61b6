//! Spreadsheet lookup & reference functions.
//!
//! Builtins take pre-evaluated [`CalcValue`] arguments and reach the host
//! workbook only through [`FunctionContext`]. Call [`load_builtins`] once to
//! make them available through [`function_registry`].

pub mod compare;
pub mod config;
pub mod function;
pub mod function_registry;
pub mod matcher;
pub mod traits;
pub mod wildcard;

pub mod builtins;

pub mod test_workbook;

#[cfg(test)]
mod tests;

pub use builtins::load_builtins;
pub use config::EvalConfig;
pub use function::{FnCaps, Function};
pub use traits::{CalcValue, FunctionContext, Grid};

pub use builtins::lookup::core::{hlookup, lookup, match_position, vlookup};
pub use builtins::lookup::dynamic::filter;
pub use builtins::reference_fns::{address, index_array, index_reference, indirect, offset};
