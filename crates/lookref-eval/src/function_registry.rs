use crate::function::Function;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use std::sync::Arc;

static REG: Lazy<DashMap<String, Arc<dyn Function>>> = Lazy::new(DashMap::new);

/// Register `f` under its upper-cased name, replacing any previous entry.
pub fn register_function(f: Arc<dyn Function>) {
    #[cfg(feature = "tracing")]
    tracing::debug!(name = f.name(), "register function");
    REG.insert(f.name().to_ascii_uppercase(), f);
}

/// Case-insensitive lookup by name.
pub fn get(name: &str) -> Option<Arc<dyn Function>> {
    REG.get(&name.to_ascii_uppercase())
        .map(|v| Arc::clone(v.value()))
}

/// Names currently registered, sorted.
pub fn registered_names() -> Vec<String> {
    let mut names: Vec<String> = REG.iter().map(|e| e.key().clone()).collect();
    names.sort();
    names
}
