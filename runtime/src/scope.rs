//! Variable scope.
//!
//! Argument nodes in the IR store variable *names*; the scope maps those
//! names to variable slots. Tensor storage itself belongs to the external
//! allocator, so a [`Variable`] here is an opaque handle with an optional
//! size hint.

use std::collections::BTreeMap;

/// An opaque tensor-variable slot.
#[derive(Debug, Default)]
pub struct Variable {
    size_hint: Option<usize>,
}

impl Variable {
    pub fn size_hint(&self) -> Option<usize> {
        self.size_hint
    }

    pub fn set_size_hint(&mut self, bytes: usize) {
        self.size_hint = Some(bytes);
    }
}

/// Name -> variable store for one model.
#[derive(Debug, Default)]
pub struct Scope {
    vars: BTreeMap<String, Variable>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find_var(&self, name: &str) -> Option<&Variable> {
        self.vars.get(name)
    }

    pub fn find_var_mut(&mut self, name: &str) -> Option<&mut Variable> {
        self.vars.get_mut(name)
    }

    /// Get or create the variable slot for `name`.
    pub fn create_var(&mut self, name: &str) -> &mut Variable {
        self.vars.entry(name.to_string()).or_default()
    }

    pub fn var_names(&self) -> impl Iterator<Item = &str> {
        self.vars.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}
