//! The boundary between a host compiler's tree and the fold model.
//!
//! A host implements [`HostAdapter`] for its own node type. The adapter only
//! classifies nodes and builds replacement literals; lowering into an
//! [`ExprArena`](fold_ir::ExprArena) happens in [`import_program`], and the
//! host applies the resulting [`HostSplice`]s itself.

mod import;

pub use import::{import_program, import_program_in, ImportedProgram};

use fold_ir::{Literal, Span};

/// A host node seen through the fold model.
///
/// Child references borrow from the host tree; nothing is copied until
/// [`import_program`] lowers it.
#[derive(Debug)]
pub enum HostNode<'n, N> {
    Literal(Literal),
    Var(&'n str),
    /// Operator or function call; `receiver` is the `a` in `a.op(b)`.
    Call {
        callee: &'n str,
        receiver: Option<&'n N>,
        args: Vec<&'n N>,
    },
    /// Branch ladder of `(condition, result)` arms.
    Conditional {
        branches: Vec<(&'n N, &'n N)>,
        else_result: Option<&'n N>,
    },
    Loop {
        condition: &'n N,
        body: &'n N,
    },
    Block(Vec<HostStmt<'n, N>>),
    Return(&'n N),
    /// Anything else. Children are listed so calls inside them can still be
    /// folded.
    Opaque(Vec<&'n N>),
}

/// A statement inside a [`HostNode::Block`].
#[derive(Debug)]
pub enum HostStmt<'n, N> {
    Expr(&'n N),
    VarDecl {
        name: &'n str,
        init: Option<&'n N>,
    },
    Assign {
        name: &'n str,
        value: &'n N,
    },
}

/// A function body the host can hand to the folder.
#[derive(Debug)]
pub struct HostFunction<'n, N> {
    pub params: Vec<&'n str>,
    pub body: &'n N,
}

/// Everything the folder needs from a host compiler.
pub trait HostAdapter {
    type Node;

    /// Classify `node`.
    fn view<'n>(&'n self, node: &'n Self::Node) -> HostNode<'n, Self::Node>;

    /// Resolve a callee by name.
    fn function(&self, name: &str) -> Option<HostFunction<'_, Self::Node>>;

    /// Build the node that replaces `original` once it folded to `value`.
    fn make_literal(&self, value: &Literal, original: &Self::Node) -> Self::Node;

    /// Host source location of `node`, for diagnostics.
    fn span(&self, _node: &Self::Node) -> Span {
        Span::DUMMY
    }
}

/// Replace `original` with `replacement` in the host program.
#[derive(Debug)]
pub struct HostSplice<'n, N> {
    pub original: &'n N,
    pub replacement: N,
    /// The literal `replacement` was built from.
    pub value: Literal,
}
