//! Fold IR - the value and tree model consumed by the evalfold evaluator.
//!
//! This crate contains the data structures shared by every other crate in
//! the workspace:
//! - `Literal`: the closed set of foldable constants
//! - `Name` + `StringInterner`: interned identifiers
//! - `ExprArena`: flat storage for expression trees (`ExprId` indices)
//! - `FunctionTable`: the functions a call site may resolve to
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: variable, function and operator names are `Name(u32)`
//! - **Flatten Everything**: no `Box<Expr>`, children are `ExprId` indices and
//!   child lists are ranges into side tables
//! - **Append Only**: nodes are never rewritten in place; substitution always
//!   allocates a new node

mod arena;
mod expr;
mod expr_id;
mod function;
mod interner;
mod literal;
mod name;
mod span;

pub use arena::ExprArena;
pub use expr::{Branch, ExprKind, Stmt};
pub use expr_id::{BranchRange, ExprId, ExprRange, StmtRange};
pub use function::{FunctionDef, FunctionTable};
pub use interner::{InternError, SharedInterner, StringInterner};
pub use literal::{Literal, LiteralType};
pub use name::Name;
pub use span::Span;
