//! Reasons a fold attempt gives up.
//!
//! None of these ever reach the host build as an error. They exist so the
//! folder can stop at the first failure with `?`, and so the driver can
//! tell "not enough information" apart from "the constant computation
//! itself is broken" when it decides whether to emit a diagnostic.
//!
//! Factory functions (`division_by_zero()`, `unsupported_operation(..)`, ...)
//! are the construction API used throughout the crate.

use std::fmt;

use fold_ir::{Literal, LiteralType};

/// Why a subtree could not be reduced to a literal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Inconclusive {
    /// A condition did not reduce to a boolean.
    Condition,
    /// A variable has no known literal value.
    UnboundVariable { name: &'static str },
    /// The callee exists but is not eligible for folding.
    IneligibleCallee { name: &'static str },
    /// The node is outside the foldable expression model.
    Opaque,
    /// Argument count does not match the callee's parameters.
    ArityMismatch {
        name: &'static str,
        expected: usize,
        got: usize,
    },
}

impl fmt::Display for Inconclusive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Inconclusive::Condition => f.write_str("condition did not reduce to a boolean"),
            Inconclusive::Opaque => f.write_str("expression cannot be evaluated at compile time"),
            Inconclusive::UnboundVariable { name } => {
                write!(f, "variable `{name}` has no constant value")
            }
            Inconclusive::IneligibleCallee { name } => {
                write!(f, "`{name}` is not eligible for compile-time evaluation")
            }
            Inconclusive::ArityMismatch {
                name,
                expected,
                got,
            } => write!(f, "`{name}` expects {expected} arguments, got {got}"),
        }
    }
}

/// A failure inside a fold attempt.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FoldError {
    #[error("division by zero")]
    DivisionByZero,

    #[error("integer overflow in `{operator}`")]
    IntegerOverflow { operator: &'static str },

    #[error("operator `{operator}` is not defined for ({})", type_list(.operands))]
    UnsupportedOperation {
        operator: &'static str,
        operands: Vec<LiteralType>,
    },

    #[error("loop did not finish within {cap} iterations")]
    IterationCapExceeded { cap: u32 },

    #[error("constant calls nested deeper than {limit} levels")]
    CallDepthExceeded { limit: u32 },

    #[error("{0}")]
    Inconclusive(Inconclusive),
}

fn type_list(types: &[LiteralType]) -> String {
    types
        .iter()
        .map(|t| t.name())
        .collect::<Vec<_>>()
        .join(", ")
}

impl FoldError {
    /// `true` when the fold simply lacked information; `false` when the
    /// constant computation itself is invalid or ran away.
    pub fn is_inconclusive(&self) -> bool {
        matches!(self, FoldError::Inconclusive(_))
    }

    /// `true` when the host program would itself throw or fail to terminate
    /// at this point. Such a failure cannot be skipped over by leaving a
    /// variable unbound; it ends the enclosing fold.
    pub fn halts_evaluation(&self) -> bool {
        matches!(
            self,
            FoldError::DivisionByZero
                | FoldError::IterationCapExceeded { .. }
                | FoldError::CallDepthExceeded { .. }
        )
    }
}

// Arithmetic

#[cold]
pub fn division_by_zero() -> FoldError {
    FoldError::DivisionByZero
}

#[cold]
pub fn integer_overflow(operator: &'static str) -> FoldError {
    FoldError::IntegerOverflow { operator }
}

// Operators

#[cold]
pub fn unsupported_operation(operator: &'static str, operands: &[Literal]) -> FoldError {
    FoldError::UnsupportedOperation {
        operator,
        operands: operands.iter().map(Literal::ty).collect(),
    }
}

// Resource limits

#[cold]
pub fn iteration_cap_exceeded(cap: u32) -> FoldError {
    FoldError::IterationCapExceeded { cap }
}

#[cold]
pub fn call_depth_exceeded(limit: u32) -> FoldError {
    FoldError::CallDepthExceeded { limit }
}

// Inconclusive

pub fn inconclusive_condition() -> FoldError {
    FoldError::Inconclusive(Inconclusive::Condition)
}

pub fn opaque_expression() -> FoldError {
    FoldError::Inconclusive(Inconclusive::Opaque)
}

pub fn unbound_variable(name: &'static str) -> FoldError {
    FoldError::Inconclusive(Inconclusive::UnboundVariable { name })
}

pub fn ineligible_callee(name: &'static str) -> FoldError {
    FoldError::Inconclusive(Inconclusive::IneligibleCallee { name })
}

pub fn arity_mismatch(name: &'static str, expected: usize, got: usize) -> FoldError {
    FoldError::Inconclusive(Inconclusive::ArityMismatch {
        name,
        expected,
        got,
    })
}

#[cfg(test)]
mod tests;
