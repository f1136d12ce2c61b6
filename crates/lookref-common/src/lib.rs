//! Shared value, error and address types for the lookup & reference
//! functions.

pub mod address;
pub mod coord;
pub mod error;
pub mod notation;
pub mod value;

pub use address::*;
pub use coord::*;
pub use error::*;
pub use notation::{AbsMode, AddressStyle, format_address, parse_a1_cell, parse_reference};
pub use value::*;
