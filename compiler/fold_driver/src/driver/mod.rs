//! The call-site driver.
//!
//! Walks a root expression looking for eligible calls: calls to a function
//! in the table whose name carries the eligibility prefix, and comparison
//! operators. Arguments are driven first, so nested eligible calls fold
//! bottom-up. A site folds only when every operand is a literal; then the
//! folder evaluates the callee in a fresh environment and a non-`Unit`
//! result becomes a splice.
//!
//! When an outer call folds, the splices recorded for calls nested inside it
//! are dropped: only the outermost literal replaces host code.

mod state;

pub use state::{CallSite, CallSiteState};

use tracing::{debug, trace};

use fold_diagnostic::{Diagnostic, DiagnosticQueue, ErrorCode};
use fold_eval::{ensure_sufficient_stack, FoldConfig, FoldError, Folder, Operator};
use fold_ir::{
    ExprArena, ExprId, ExprKind, ExprRange, FunctionTable, Literal, Name, Stmt, StringInterner,
};

/// Replace the call at `call` with `value`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Splice {
    pub call: ExprId,
    pub value: Literal,
}

/// What one drive over a root expression did.
#[derive(Clone, Debug, Default)]
pub struct DriveReport {
    /// Every eligible site, in completion order (inner calls first).
    pub sites: Vec<CallSite>,
    /// Outermost folded calls.
    pub splices: Vec<Splice>,
    /// Empty unless fallback reporting is `Warn`.
    pub diagnostics: Vec<Diagnostic>,
}

impl DriveReport {
    pub fn site(&self, expr: ExprId) -> Option<&CallSite> {
        self.sites.iter().find(|site| site.expr == expr)
    }

    pub fn folded_count(&self) -> usize {
        self.sites
            .iter()
            .filter(|site| site.state == CallSiteState::Folded)
            .count()
    }

    /// Nothing in the host program changes.
    pub fn is_unchanged(&self) -> bool {
        self.splices.is_empty()
    }
}

/// Finds and folds eligible call sites under a root expression.
pub struct CallSiteDriver<'a> {
    arena: &'a ExprArena,
    functions: &'a FunctionTable,
    interner: &'a StringInterner,
    folder: Folder<'a>,
    report: DriveReport,
    diagnostics: DiagnosticQueue,
}

impl<'a> CallSiteDriver<'a> {
    pub fn new(
        arena: &'a ExprArena,
        functions: &'a FunctionTable,
        interner: &'a StringInterner,
        config: &'a FoldConfig,
    ) -> Self {
        CallSiteDriver {
            arena,
            functions,
            interner,
            folder: Folder::new(arena, functions, interner, config),
            report: DriveReport::default(),
            diagnostics: DiagnosticQueue::new(),
        }
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub fn drive(mut self, root: ExprId) -> DriveReport {
        self.visit(root);
        self.report.diagnostics = self.diagnostics.flush();
        debug!(
            sites = self.report.sites.len(),
            folded = self.report.folded_count(),
            splices = self.report.splices.len(),
            "drive finished"
        );
        self.report
    }

    /// Drive `expr`, returning its literal value when it is a literal or a
    /// call that folded.
    fn visit(&mut self, expr: ExprId) -> Option<Literal> {
        ensure_sufficient_stack(|| self.visit_inner(expr))
    }

    fn visit_inner(&mut self, expr: ExprId) -> Option<Literal> {
        let arena = self.arena;
        match arena.kind(expr) {
            ExprKind::Literal(lit) => return Some(lit.clone()),
            ExprKind::Var(_) => {}
            ExprKind::Call {
                callee,
                receiver,
                args,
            } => return self.visit_call(expr, *callee, *receiver, *args),
            ExprKind::Conditional {
                branches,
                else_result,
            } => {
                for branch in arena.get_branches(*branches) {
                    self.visit(branch.condition);
                    self.visit(branch.result);
                }
                if let Some(else_result) = else_result {
                    self.visit(*else_result);
                }
            }
            ExprKind::Loop { condition, body } => {
                self.visit(*condition);
                self.visit(*body);
            }
            ExprKind::Block(stmts) => {
                for stmt in arena.get_stmts(*stmts) {
                    match *stmt {
                        Stmt::Expr(expr)
                        | Stmt::VarDecl {
                            init: Some(expr), ..
                        }
                        | Stmt::Assign { value: expr, .. } => {
                            self.visit(expr);
                        }
                        Stmt::VarDecl { init: None, .. } => {}
                    }
                }
            }
            ExprKind::Return(value) => {
                self.visit(*value);
            }
            ExprKind::Opaque(children) => {
                for &child in arena.get_expr_list(*children) {
                    self.visit(child);
                }
            }
        }
        None
    }

    fn visit_call(
        &mut self,
        expr: ExprId,
        callee: Name,
        receiver: Option<ExprId>,
        args: ExprRange,
    ) -> Option<Literal> {
        let arena = self.arena;
        let mark = self.report.splices.len();

        let receiver_value = receiver.map(|r| self.visit(r));
        let arg_values: Vec<Option<Literal>> = arena
            .get_expr_list(args)
            .iter()
            .map(|&arg| self.visit(arg))
            .collect();

        if !self.is_candidate(callee, receiver.is_some()) {
            return None;
        }

        let mut site = CallSite::new(expr, callee);
        site.advance(CallSiteState::ArgsEvaluated);

        let receiver_ready = receiver_value.as_ref().map_or(true, Option::is_some);
        let args: Option<Vec<Literal>> = arg_values.into_iter().collect();
        let (true, Some(args)) = (receiver_ready, args) else {
            trace!(callee = self.interner.lookup(callee), "operands are not constant");
            site.leave_unfolded(None);
            self.report.sites.push(site);
            return None;
        };
        site.advance(CallSiteState::ReadyToFold);

        let folded = match self.folder.try_call(callee, receiver_value.flatten(), &args) {
            Ok(value) if value.is_spliceable() => {
                self.report.splices.truncate(mark);
                self.report.splices.push(Splice {
                    call: expr,
                    value: value.clone(),
                });
                site.fold(value.clone());
                Some(value)
            }
            Ok(_) => {
                site.leave_unfolded(None);
                None
            }
            Err(err) => {
                self.report_fallback(expr, callee, &err);
                site.leave_unfolded(Some(err));
                None
            }
        };
        self.report.sites.push(site);
        folded
    }

    fn is_candidate(&self, callee: Name, has_receiver: bool) -> bool {
        let name = self.interner.lookup(callee);
        if !has_receiver
            && self.functions.contains(callee)
            && self.folder.config().is_eligible(name)
        {
            return true;
        }
        Operator::from_name(name).is_some_and(Operator::is_comparison)
    }

    fn report_fallback(&mut self, expr: ExprId, callee: Name, err: &FoldError) {
        let name = self.interner.lookup(callee);
        trace!(callee = name, %err, "call site left unfolded");

        if !self.folder.config().fallback.emits_warnings() {
            return;
        }
        let Some(code) = error_code(err) else {
            return;
        };
        self.diagnostics.add(
            Diagnostic::warning(
                code,
                format!("call to `{name}` was left unfolded: {err}"),
                self.arena.span(expr),
            )
            .with_note(code.description())
            .with_note("the call is compiled unchanged and evaluated at runtime"),
        );
    }
}

/// Diagnostic code for a fold failure; `None` for inconclusive folds.
pub fn error_code(err: &FoldError) -> Option<ErrorCode> {
    match err {
        FoldError::DivisionByZero => Some(ErrorCode::E6001),
        FoldError::IntegerOverflow { .. } => Some(ErrorCode::E6002),
        FoldError::UnsupportedOperation { .. } => Some(ErrorCode::E6003),
        FoldError::IterationCapExceeded { .. } => Some(ErrorCode::E6004),
        FoldError::CallDepthExceeded { .. } => Some(ErrorCode::E6005),
        FoldError::Inconclusive(_) => None,
    }
}
