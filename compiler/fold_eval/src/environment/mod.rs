//! Variable bindings for a single fold attempt.
//!
//! Uses a scope stack (not cloning). Every entry holds a fully reduced
//! [`Literal`]; a variable whose value could not be determined is simply
//! absent, so a later read of it makes the enclosing subtree inconclusive.

use rustc_hash::FxHashMap;

use fold_ir::{Literal, Name};

/// Scope stack for one function invocation.
///
/// A callee never sees its caller's environment: each call builds a fresh
/// `Environment` from its parameter bindings.
#[derive(Clone, Debug)]
pub struct Environment {
    /// Innermost scope last. Never empty.
    scopes: Vec<FxHashMap<Name, Literal>>,
}

impl Environment {
    /// Create an environment with one empty base scope.
    pub fn new() -> Self {
        Environment {
            scopes: vec![FxHashMap::default()],
        }
    }

    /// Create an environment whose base scope holds `bindings`.
    pub fn with_bindings(bindings: impl IntoIterator<Item = (Name, Literal)>) -> Self {
        Environment {
            scopes: vec![bindings.into_iter().collect()],
        }
    }

    /// Number of scopes, including the base scope.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    #[inline]
    pub fn push_scope(&mut self) {
        self.scopes.push(FxHashMap::default());
    }

    /// Pop the innermost scope. The base scope is never popped.
    #[inline]
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Bind `name` in the innermost scope, shadowing outer bindings.
    #[inline]
    pub fn define(&mut self, name: Name, value: Literal) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name, value);
        }
    }

    /// Look up `name`, innermost scope first.
    #[inline]
    pub fn lookup(&self, name: Name) -> Option<&Literal> {
        self.scopes.iter().rev().find_map(|scope| scope.get(&name))
    }

    /// Overwrite the innermost binding of `name`.
    ///
    /// A name with no binding anywhere is defined in the innermost scope:
    /// it was declared without a known value, and now has one.
    pub fn assign(&mut self, name: Name, value: Literal) {
        match self
            .scopes
            .iter_mut()
            .rev()
            .find_map(|scope| scope.get_mut(&name))
        {
            Some(slot) => *slot = value,
            None => self.define(name, value),
        }
    }

    /// Drop every binding of `name`.
    ///
    /// Used when a declaration or assignment produces no constant: after
    /// that point no scope may answer with a stale value.
    pub fn forget(&mut self, name: Name) {
        for scope in &mut self.scopes {
            scope.remove(&name);
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
