//! Expression and statement kinds.

use crate::{BranchRange, ExprId, ExprRange, Literal, Name, StmtRange};

/// The closed set of expression shapes the evaluator understands.
///
/// Loops, conditionals and returns appear both as expressions and, wrapped
/// in [`Stmt::Expr`], as statements.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExprKind {
    Literal(Literal),
    /// Reference to a parameter or local variable.
    Var(Name),
    /// Operator or function call. `callee` is either an operator name
    /// (`plus`, `compareTo`, ...) or the name of a function in the table.
    Call {
        callee: Name,
        receiver: Option<ExprId>,
        args: ExprRange,
    },
    /// Branch ladder: the first arm whose condition holds is taken.
    Conditional {
        branches: BranchRange,
        else_result: Option<ExprId>,
    },
    /// `while (condition) body`. The body is always a `Block`.
    Loop { condition: ExprId, body: ExprId },
    Block(StmtRange),
    Return(ExprId),
    /// A host construct outside this model (lambda, object creation, ...).
    /// Never reduces; its children are kept so calls nested inside it can
    /// still be found.
    Opaque(ExprRange),
}

/// One arm of a [`ExprKind::Conditional`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Branch {
    pub condition: ExprId,
    pub result: ExprId,
}

/// A statement inside a block.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Stmt {
    Expr(ExprId),
    /// `val`/`var` declaration. A missing initializer leaves the name unbound.
    VarDecl { name: Name, init: Option<ExprId> },
    /// Reassignment of an existing variable (`x = ...`, `x += ...`, `x++`).
    Assign { name: Name, value: ExprId },
}

impl ExprKind {
    /// Short label for tracing and diagnostics.
    pub fn label(&self) -> &'static str {
        match self {
            ExprKind::Literal(_) => "literal",
            ExprKind::Var(_) => "variable",
            ExprKind::Call { .. } => "call",
            ExprKind::Conditional { .. } => "conditional",
            ExprKind::Loop { .. } => "loop",
            ExprKind::Block(_) => "block",
            ExprKind::Return(_) => "return",
            ExprKind::Opaque(_) => "opaque",
        }
    }
}
