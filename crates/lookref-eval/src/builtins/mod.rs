pub mod lookup;
pub mod reference_fns;
mod utils;

pub fn load_builtins() {
    lookup::register_builtins();
    reference_fns::register_builtins();
}
