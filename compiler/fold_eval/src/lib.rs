#![deny(clippy::arithmetic_side_effects)]
//! Fold Eval - the constant-folding partial evaluator.
//!
//! Given an expression tree in a [`fold_ir::ExprArena`] and an environment of
//! known literal bindings, the [`Folder`] either reduces the tree to a single
//! [`fold_ir::Literal`] or reports that it must be left alone.
//!
//! # Architecture
//!
//! - `Environment`: variable scoping with a scope stack
//! - `operators::apply`: direct enum-based dispatch over `(operator, operand types)`
//! - `Folder`: the tree walker, including nested eligible-function folds
//! - `FoldConfig`: iteration cap, call-depth limit, eligibility prefix and
//!   fallback reporting
//!
//! Nothing here is fatal to the host build: every [`FoldError`] ends only
//! the fold attempt it occurred in.

mod config;
mod environment;
pub mod errors;
mod folder;
pub mod operators;
mod stack;

pub use config::{FallbackReporting, FoldConfig};
pub use environment::Environment;
pub use errors::{FoldError, Inconclusive};
pub use folder::{FoldResult, Folder};
pub use operators::Operator;
pub use stack::ensure_sufficient_stack;
