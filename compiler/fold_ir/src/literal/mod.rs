//! Foldable constant values.

use std::fmt;

/// A compile-time constant the evaluator can produce or consume.
///
/// Immutable once constructed. `Unit` is the void result of statements,
/// of a conditional with no matching arm, and of a loop that never ran;
/// it is never spliced into the host program and no operator accepts it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Literal {
    Int(i64),
    Str(String),
    Bool(bool),
    Unit,
}

/// Type tag of a [`Literal`], used in diagnostics and splice construction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LiteralType {
    Int,
    Str,
    Bool,
    Unit,
}

impl Literal {
    /// Convenience constructor for string literals.
    pub fn string(s: impl Into<String>) -> Self {
        Literal::Str(s.into())
    }

    #[inline]
    pub fn ty(&self) -> LiteralType {
        match self {
            Literal::Int(_) => LiteralType::Int,
            Literal::Str(_) => LiteralType::Str,
            Literal::Bool(_) => LiteralType::Bool,
            Literal::Unit => LiteralType::Unit,
        }
    }

    /// Returns the boolean payload, or `None` for any other type.
    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Literal::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Whether this value may replace a call in the host program.
    #[inline]
    pub fn is_spliceable(&self) -> bool {
        !matches!(self, Literal::Unit)
    }
}

impl LiteralType {
    pub fn name(self) -> &'static str {
        match self {
            LiteralType::Int => "Int",
            LiteralType::Str => "String",
            LiteralType::Bool => "Boolean",
            LiteralType::Unit => "Unit",
        }
    }
}

impl fmt::Display for LiteralType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Int(v) => write!(f, "{v}"),
            Literal::Str(s) => write!(f, "{s:?}"),
            Literal::Bool(b) => write!(f, "{b}"),
            Literal::Unit => f.write_str("Unit"),
        }
    }
}

impl From<i64> for Literal {
    fn from(v: i64) -> Self {
        Literal::Int(v)
    }
}

impl From<i32> for Literal {
    fn from(v: i32) -> Self {
        Literal::Int(i64::from(v))
    }
}

impl From<bool> for Literal {
    fn from(b: bool) -> Self {
        Literal::Bool(b)
    }
}

impl From<&str> for Literal {
    fn from(s: &str) -> Self {
        Literal::Str(s.to_owned())
    }
}
