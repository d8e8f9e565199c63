use crate::value::Value;
use std::collections::HashMap;

/// Caller-owned store of identifier bindings consulted during evaluation.
///
/// The engine only borrows a context for the duration of a single `eval`
/// call; the caller is free to mutate it between evaluations. A context is
/// not internally synchronized.
#[derive(Debug, Clone, Default)]
pub struct Context {
    values: HashMap<String, Value>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `value`, replacing any previous binding.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }
}
