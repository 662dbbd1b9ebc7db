//! Function definitions a call site can resolve to.

use rustc_hash::FxHashMap;

use crate::{ExprId, Name, Span};

/// A callee: its declared parameters and the body the evaluator folds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionDef {
    pub name: Name,
    pub params: Vec<Name>,
    /// Either a `Block` (block body) or any single expression (expression body).
    pub body: ExprId,
    pub span: Span,
}

/// Function definitions keyed by name.
#[derive(Clone, Debug, Default)]
pub struct FunctionTable {
    functions: FxHashMap<Name, FunctionDef>,
}

impl FunctionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a function, returning the previous definition with that name.
    pub fn define(&mut self, def: FunctionDef) -> Option<FunctionDef> {
        self.functions.insert(def.name, def)
    }

    #[inline]
    pub fn get(&self, name: Name) -> Option<&FunctionDef> {
        self.functions.get(&name)
    }

    #[inline]
    pub fn contains(&self, name: Name) -> bool {
        self.functions.contains_key(&name)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}
