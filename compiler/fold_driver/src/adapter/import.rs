//! Lowering host trees into an [`ExprArena`].

use rustc_hash::FxHashSet;
use tracing::{debug, trace};

use fold_eval::{ensure_sufficient_stack, FoldConfig};
use fold_ir::{
    Branch, ExprArena, ExprId, ExprKind, FunctionDef, FunctionTable, Name, SharedInterner, Stmt,
};

use super::{HostAdapter, HostNode, HostStmt};

/// A host root and the callees it can reach, lowered for folding.
pub struct ImportedProgram<'n, N> {
    pub interner: SharedInterner,
    pub arena: ExprArena,
    pub functions: FunctionTable,
    /// The lowered host root.
    pub root: ExprId,
    /// Host node each `ExprId` was lowered from (parallel to the arena).
    origins: Vec<&'n N>,
}

impl<'n, N> ImportedProgram<'n, N> {
    /// The host node `id` was lowered from.
    pub fn origin(&self, id: ExprId) -> Option<&'n N> {
        self.origins.get(id.index()).copied()
    }
}

/// Lower `root`, plus the body of every eligible function it calls
/// (transitively), into an arena and function table with a fresh interner.
pub fn import_program<'n, A: HostAdapter>(
    adapter: &'n A,
    root: &'n A::Node,
    config: &FoldConfig,
) -> ImportedProgram<'n, A::Node> {
    import_program_in(adapter, root, config, &SharedInterner::new())
}

/// Like [`import_program`], interning names into `interner` so that names
/// stay comparable across every root imported with it.
#[tracing::instrument(level = "debug", skip_all)]
pub fn import_program_in<'n, A: HostAdapter>(
    adapter: &'n A,
    root: &'n A::Node,
    config: &FoldConfig,
    interner: &SharedInterner,
) -> ImportedProgram<'n, A::Node> {
    let mut importer = Importer {
        adapter,
        config,
        interner: interner.clone(),
        arena: ExprArena::new(),
        functions: FunctionTable::new(),
        origins: Vec::new(),
        requested: FxHashSet::default(),
        pending: Vec::new(),
    };

    let root = importer.lower(root);
    while let Some((name, text)) = importer.pending.pop() {
        importer.import_function(name, text);
    }

    debug!(
        nodes = importer.arena.len(),
        functions = importer.functions.len(),
        "imported host program"
    );
    ImportedProgram {
        interner: importer.interner,
        arena: importer.arena,
        functions: importer.functions,
        root,
        origins: importer.origins,
    }
}

struct Importer<'n, 'c, A: HostAdapter> {
    adapter: &'n A,
    config: &'c FoldConfig,
    interner: SharedInterner,
    arena: ExprArena,
    functions: FunctionTable,
    origins: Vec<&'n A::Node>,
    /// Callees already queued; recursion imports each body once.
    requested: FxHashSet<Name>,
    pending: Vec<(Name, &'n str)>,
}

impl<'n, A: HostAdapter> Importer<'n, '_, A> {
    fn lower(&mut self, node: &'n A::Node) -> ExprId {
        ensure_sufficient_stack(|| self.lower_inner(node))
    }

    /// Children are allocated before their parent, so `origins` stays
    /// parallel to the arena.
    fn lower_inner(&mut self, node: &'n A::Node) -> ExprId {
        let adapter = self.adapter;
        let kind = match adapter.view(node) {
            HostNode::Literal(lit) => ExprKind::Literal(lit),
            HostNode::Var(name) => ExprKind::Var(self.interner.intern(name)),
            HostNode::Call {
                callee,
                receiver,
                args,
            } => {
                let name = self.interner.intern(callee);
                if receiver.is_none() {
                    self.request(name, callee);
                }
                let receiver = receiver.map(|r| self.lower(r));
                let args: Vec<ExprId> = args.into_iter().map(|a| self.lower(a)).collect();
                ExprKind::Call {
                    callee: name,
                    receiver,
                    args: self.arena.alloc_expr_list(args),
                }
            }
            HostNode::Conditional {
                branches,
                else_result,
            } => {
                let branches: Vec<Branch> = branches
                    .into_iter()
                    .map(|(condition, result)| Branch {
                        condition: self.lower(condition),
                        result: self.lower(result),
                    })
                    .collect();
                let else_result = else_result.map(|e| self.lower(e));
                ExprKind::Conditional {
                    branches: self.arena.alloc_branches(branches),
                    else_result,
                }
            }
            HostNode::Loop { condition, body } => ExprKind::Loop {
                condition: self.lower(condition),
                body: self.lower(body),
            },
            HostNode::Block(stmts) => {
                let stmts: Vec<Stmt> = stmts.into_iter().map(|s| self.lower_stmt(s)).collect();
                ExprKind::Block(self.arena.alloc_stmts(stmts))
            }
            HostNode::Return(value) => ExprKind::Return(self.lower(value)),
            HostNode::Opaque(children) => {
                let children: Vec<ExprId> = children.into_iter().map(|c| self.lower(c)).collect();
                ExprKind::Opaque(self.arena.alloc_expr_list(children))
            }
        };

        let id = self.arena.alloc(kind, adapter.span(node));
        self.origins.push(node);
        id
    }

    fn lower_stmt(&mut self, stmt: HostStmt<'n, A::Node>) -> Stmt {
        match stmt {
            HostStmt::Expr(expr) => Stmt::Expr(self.lower(expr)),
            HostStmt::VarDecl { name, init } => Stmt::VarDecl {
                name: self.interner.intern(name),
                init: init.map(|i| self.lower(i)),
            },
            HostStmt::Assign { name, value } => Stmt::Assign {
                name: self.interner.intern(name),
                value: self.lower(value),
            },
        }
    }

    /// Queue an eligible callee for import.
    fn request(&mut self, name: Name, text: &'n str) {
        if self.config.is_eligible(text) && self.requested.insert(name) {
            self.pending.push((name, text));
        }
    }

    fn import_function(&mut self, name: Name, text: &'n str) {
        let adapter = self.adapter;
        let Some(function) = adapter.function(text) else {
            trace!(function = text, "callee has no body");
            return;
        };
        let params = function
            .params
            .iter()
            .map(|p| self.interner.intern(p))
            .collect();
        let body = self.lower(function.body);
        self.functions.define(FunctionDef {
            name,
            params,
            body,
            span: adapter.span(function.body),
        });
    }
}
