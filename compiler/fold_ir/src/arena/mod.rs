//! Expression arena.
//!
//! [`ExprArena`] uses struct-of-arrays layout: `kinds` and `spans` are
//! parallel arrays indexed by [`ExprId`]; argument lists, statements and
//! conditional arms live in flat side tables addressed by ranges.
//!
//! The arena is append-only. The evaluator borrows it immutably, so a fold
//! attempt can never rewrite the tree it is folding.

use crate::{
    Branch, BranchRange, ExprId, ExprKind, ExprRange, Literal, Name, Span, Stmt, StmtRange,
};

/// Convert a length to `u32` for arena indices.
///
/// # Panics
/// Panics if the arena grows past `u32::MAX` entries.
fn to_u32(len: usize, what: &str) -> u32 {
    u32::try_from(len).unwrap_or_else(|_| panic!("too many {what} in arena: {len}"))
}

/// Convert a child-list length to `u16` for ranges.
///
/// # Panics
/// Panics if a single list has more than `u16::MAX` entries.
fn to_u16(len: usize, what: &str) -> u16 {
    u16::try_from(len).unwrap_or_else(|_| panic!("too many {what} in one list: {len}"))
}

/// Flat storage for expression trees.
#[derive(Clone, Debug, Default)]
pub struct ExprArena {
    /// Expression kinds (parallel with spans).
    kinds: Vec<ExprKind>,
    /// Host source spans (parallel with kinds).
    spans: Vec<Span>,
    /// Flattened argument lists.
    expr_lists: Vec<ExprId>,
    /// Flattened block statements.
    stmts: Vec<Stmt>,
    /// Flattened conditional arms.
    branches: Vec<Branch>,
}

impl ExprArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a node, returning its ID.
    pub fn alloc(&mut self, kind: ExprKind, span: Span) -> ExprId {
        let id = ExprId::new(to_u32(self.kinds.len(), "expressions"));
        self.kinds.push(kind);
        self.spans.push(span);
        id
    }

    #[inline]
    pub fn kind(&self, id: ExprId) -> &ExprKind {
        &self.kinds[id.index()]
    }

    #[inline]
    pub fn span(&self, id: ExprId) -> Span {
        self.spans[id.index()]
    }

    /// Number of allocated expressions.
    #[inline]
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    // Side tables

    pub fn alloc_expr_list(&mut self, ids: impl IntoIterator<Item = ExprId>) -> ExprRange {
        let start = self.expr_lists.len();
        self.expr_lists.extend(ids);
        let len = self.expr_lists.len() - start;
        ExprRange::new(to_u32(start, "arguments"), to_u16(len, "arguments"))
    }

    pub fn alloc_stmts(&mut self, stmts: impl IntoIterator<Item = Stmt>) -> StmtRange {
        let start = self.stmts.len();
        self.stmts.extend(stmts);
        let len = self.stmts.len() - start;
        StmtRange::new(to_u32(start, "statements"), to_u16(len, "statements"))
    }

    pub fn alloc_branches(&mut self, branches: impl IntoIterator<Item = Branch>) -> BranchRange {
        let start = self.branches.len();
        self.branches.extend(branches);
        let len = self.branches.len() - start;
        BranchRange::new(to_u32(start, "branches"), to_u16(len, "branches"))
    }

    #[inline]
    pub fn get_expr_list(&self, range: ExprRange) -> &[ExprId] {
        &self.expr_lists[range.as_range()]
    }

    #[inline]
    pub fn get_stmts(&self, range: StmtRange) -> &[Stmt] {
        &self.stmts[range.as_range()]
    }

    #[inline]
    pub fn get_branches(&self, range: BranchRange) -> &[Branch] {
        &self.branches[range.as_range()]
    }

    // Builders without host spans, used by hand-written trees and tests.

    pub fn literal(&mut self, value: impl Into<Literal>) -> ExprId {
        self.alloc(ExprKind::Literal(value.into()), Span::DUMMY)
    }

    pub fn var(&mut self, name: Name) -> ExprId {
        self.alloc(ExprKind::Var(name), Span::DUMMY)
    }

    pub fn call(&mut self, callee: Name, receiver: Option<ExprId>, args: &[ExprId]) -> ExprId {
        let args = self.alloc_expr_list(args.iter().copied());
        self.alloc(
            ExprKind::Call {
                callee,
                receiver,
                args,
            },
            Span::DUMMY,
        )
    }

    /// Binary operator call in receiver form: `left.op(right)`.
    pub fn binary(&mut self, op: Name, left: ExprId, right: ExprId) -> ExprId {
        self.call(op, Some(left), &[right])
    }

    pub fn conditional(&mut self, branches: &[Branch], else_result: Option<ExprId>) -> ExprId {
        let branches = self.alloc_branches(branches.iter().copied());
        self.alloc(
            ExprKind::Conditional {
                branches,
                else_result,
            },
            Span::DUMMY,
        )
    }

    pub fn loop_while(&mut self, condition: ExprId, body: ExprId) -> ExprId {
        self.alloc(ExprKind::Loop { condition, body }, Span::DUMMY)
    }

    pub fn block(&mut self, stmts: &[Stmt]) -> ExprId {
        let range = self.alloc_stmts(stmts.iter().copied());
        self.alloc(ExprKind::Block(range), Span::DUMMY)
    }

    pub fn ret(&mut self, value: ExprId) -> ExprId {
        self.alloc(ExprKind::Return(value), Span::DUMMY)
    }

    pub fn opaque(&mut self, children: &[ExprId]) -> ExprId {
        let children = self.alloc_expr_list(children.iter().copied());
        self.alloc(ExprKind::Opaque(children), Span::DUMMY)
    }
}
