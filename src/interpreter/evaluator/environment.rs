use std::collections::HashMap;

/// What a variable name is currently bound to.
#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
    /// The right-hand side evaluated to a number.
    Resolved(f64),
    /// The right-hand side references a variable that has no value yet; the
    /// original text is kept so it can be retried.
    Pending(String),
}

/// The variables of one instruction block.
///
/// A name maps to at most one [`Binding`]; binding it again overwrites the
/// previous one. Declaration order is remembered so pending bindings are
/// retried and reported in the order they were written.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    bindings: HashMap<String, Binding>,
    order:    Vec<String>,
}

impl Environment {
    /// Creates an empty environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name`, replacing any previous binding.
    pub fn bind(&mut self, name: &str, binding: Binding) {
        if self.bindings.insert(name.to_string(), binding).is_none() {
            self.order.push(name.to_string());
        }
    }

    /// Removes `name`, returning its binding if it had one.
    pub fn remove(&mut self, name: &str) -> Option<Binding> {
        let removed = self.bindings.remove(name);
        if removed.is_some() {
            self.order.retain(|n| n != name);
        }
        removed
    }

    /// The binding for `name`, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.bindings.get(name)
    }

    /// The value of `name` if it is bound and resolved.
    #[must_use]
    pub fn resolved(&self, name: &str) -> Option<f64> {
        match self.bindings.get(name) {
            Some(Binding::Resolved(value)) => Some(*value),
            _ => None,
        }
    }

    /// Every pending binding as `(name, expression)`, in declaration order.
    #[must_use]
    pub fn pending(&self) -> Vec<(String, String)> {
        self.order.iter()
                  .filter_map(|name| match self.bindings.get(name) {
                      Some(Binding::Pending(expression)) => Some((name.clone(), expression.clone())),
                      _ => None,
                  })
                  .collect()
    }

    /// Number of bound names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether no name is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Forgets every binding.
    pub fn clear(&mut self) {
        self.bindings.clear();
        self.order.clear();
    }
}
