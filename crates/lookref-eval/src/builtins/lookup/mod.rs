//! Lookup & reference family.

pub mod choose;
pub mod core;
pub mod dynamic;
pub mod reference_info;

pub fn register_builtins() {
    core::register_builtins();
    choose::register_builtins();
    reference_info::register_builtins();
    dynamic::register_builtins();
}
