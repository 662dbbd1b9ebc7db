//! The constant-folding walker.
//!
//! [`Folder`] evaluates an expression tree bottom-up against an
//! [`Environment`], producing either a literal or "leave it alone". It never
//! rewrites the arena: a fold attempt either yields a whole value or
//! nothing, so no partially folded tree can escape.
//!
//! # Control flow
//!
//! Internally every node yields a `Flow`. A `return` produces
//! `Flow::Return`, which the `value!` macro hands upward through blocks,
//! conditional arms and loops until the function boundary turns it back
//! into a plain value.

use smallvec::SmallVec;
use tracing::trace;

use fold_ir::{
    BranchRange, ExprArena, ExprId, ExprKind, ExprRange, FunctionDef, FunctionTable, Literal,
    Name, Stmt, StmtRange, StringInterner,
};

use crate::config::FoldConfig;
use crate::environment::Environment;
use crate::errors::{
    arity_mismatch, call_depth_exceeded, inconclusive_condition, ineligible_callee,
    iteration_cap_exceeded, opaque_expression, unbound_variable, unsupported_operation, FoldError,
};
use crate::operators::{self, Operator};
use crate::stack::ensure_sufficient_stack;

/// Outcome of a fold attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FoldResult {
    /// The subtree is equivalent to this literal.
    Reduced(Literal),
    /// The subtree could not be folded and must be kept as is.
    Unevaluated(ExprId),
}

impl FoldResult {
    #[inline]
    pub fn is_reduced(&self) -> bool {
        matches!(self, FoldResult::Reduced(_))
    }

    pub fn literal(&self) -> Option<&Literal> {
        match self {
            FoldResult::Reduced(lit) => Some(lit),
            FoldResult::Unevaluated(_) => None,
        }
    }

    pub fn into_literal(self) -> Option<Literal> {
        match self {
            FoldResult::Reduced(lit) => Some(lit),
            FoldResult::Unevaluated(_) => None,
        }
    }
}

/// How evaluation left a node.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Flow {
    Value(Literal),
    /// A `return` fired; unwinds to the enclosing function.
    Return(Literal),
}

impl Flow {
    #[inline]
    fn into_literal(self) -> Literal {
        match self {
            Flow::Value(lit) | Flow::Return(lit) => lit,
        }
    }
}

type Step = Result<Flow, FoldError>;

/// Evaluate a step, yielding its value or returning early on `Flow::Return`.
macro_rules! value {
    ($step:expr) => {
        match $step? {
            Flow::Value(lit) => lit,
            ret @ Flow::Return(_) => return Ok(ret),
        }
    };
}

/// Tree-walking constant folder.
///
/// Borrows the arena and function table immutably; the only mutable state is
/// the call-depth counter and whatever environment the caller passes in.
pub struct Folder<'a> {
    arena: &'a ExprArena,
    functions: &'a FunctionTable,
    interner: &'a StringInterner,
    config: &'a FoldConfig,
    /// Nesting of function folds currently in progress.
    call_depth: u32,
}

impl<'a> Folder<'a> {
    pub fn new(
        arena: &'a ExprArena,
        functions: &'a FunctionTable,
        interner: &'a StringInterner,
        config: &'a FoldConfig,
    ) -> Self {
        Folder {
            arena,
            functions,
            interner,
            config,
            call_depth: 0,
        }
    }

    #[inline]
    pub fn config(&self) -> &'a FoldConfig {
        self.config
    }

    /// Fold `expr`, discarding the reason on failure.
    pub fn fold(&mut self, expr: ExprId, env: &mut Environment) -> FoldResult {
        match self.try_fold(expr, env) {
            Ok(lit) => FoldResult::Reduced(lit),
            Err(_) => FoldResult::Unevaluated(expr),
        }
    }

    /// Fold `expr`, reporting why it could not be reduced.
    ///
    /// A `return` reached at this level is treated as the function boundary.
    #[tracing::instrument(level = "trace", skip(self, env), fields(kind = self.arena.kind(expr).label()))]
    pub fn try_fold(&mut self, expr: ExprId, env: &mut Environment) -> Result<Literal, FoldError> {
        self.eval(expr, env).map(Flow::into_literal)
    }

    /// Fold a call to `def` with already-reduced arguments.
    pub fn fold_function(&mut self, def: &FunctionDef, args: &[Literal]) -> FoldResult {
        match self.try_fold_function(def, args) {
            Ok(lit) => FoldResult::Reduced(lit),
            Err(_) => FoldResult::Unevaluated(def.body),
        }
    }

    /// Fold the body of `def` in a fresh environment holding only its
    /// parameters.
    ///
    /// The caller's environment is never visible to the callee, and nothing
    /// the callee binds survives the call.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(function = self.interner.lookup(def.name), depth = self.call_depth)
    )]
    pub fn try_fold_function(
        &mut self,
        def: &FunctionDef,
        args: &[Literal],
    ) -> Result<Literal, FoldError> {
        if def.params.len() != args.len() {
            return Err(arity_mismatch(
                self.interner.lookup(def.name),
                def.params.len(),
                args.len(),
            ));
        }
        let limit = self.config.max_call_depth;
        if self.call_depth >= limit {
            return Err(call_depth_exceeded(limit));
        }

        let mut env =
            Environment::with_bindings(def.params.iter().copied().zip(args.iter().cloned()));
        self.call_depth = self.call_depth.saturating_add(1);
        let result = self.eval(def.body, &mut env);
        self.call_depth = self.call_depth.saturating_sub(1);
        result.map(Flow::into_literal)
    }

    /// Resolve and apply `callee` to reduced operands.
    ///
    /// A receiver-less call to a function in the table folds that function
    /// when its name is eligible. Everything else goes to the operation
    /// table, with the receiver as the first operand.
    pub fn try_call(
        &mut self,
        callee: Name,
        receiver: Option<Literal>,
        args: &[Literal],
    ) -> Result<Literal, FoldError> {
        let name = self.interner.lookup(callee);
        let has_receiver = receiver.is_some();

        if !has_receiver {
            let functions = self.functions;
            if let Some(def) = functions.get(callee) {
                if !self.config.is_eligible(name) {
                    return Err(ineligible_callee(name));
                }
                return self.try_fold_function(def, args);
            }
        }

        let mut operands: SmallVec<[Literal; 3]> = SmallVec::new();
        operands.extend(receiver);
        operands.extend(args.iter().cloned());

        match Operator::from_name(name) {
            Some(op) => operators::apply(op, &operands),
            // A free function the table does not know.
            None if !has_receiver => Err(ineligible_callee(name)),
            None => Err(unsupported_operation(name, &operands)),
        }
    }

    // Walker

    fn eval(&mut self, expr: ExprId, env: &mut Environment) -> Step {
        ensure_sufficient_stack(|| self.eval_inner(expr, env))
    }

    fn eval_inner(&mut self, expr: ExprId, env: &mut Environment) -> Step {
        let arena = self.arena;
        match arena.kind(expr) {
            ExprKind::Literal(lit) => Ok(Flow::Value(lit.clone())),
            ExprKind::Var(name) => match env.lookup(*name) {
                Some(lit) => Ok(Flow::Value(lit.clone())),
                None => Err(unbound_variable(self.interner.lookup(*name))),
            },
            ExprKind::Call {
                callee,
                receiver,
                args,
            } => self.eval_call(*callee, *receiver, *args, env),
            ExprKind::Conditional {
                branches,
                else_result,
            } => self.eval_conditional(*branches, *else_result, env),
            ExprKind::Loop { condition, body } => self.eval_loop(*condition, *body, env),
            ExprKind::Block(stmts) => self.eval_block(*stmts, env),
            ExprKind::Return(value) => {
                let lit = value!(self.eval(*value, env));
                Ok(Flow::Return(lit))
            }
            ExprKind::Opaque(_) => Err(opaque_expression()),
        }
    }

    /// Receiver first, then arguments left to right.
    fn eval_call(
        &mut self,
        callee: Name,
        receiver: Option<ExprId>,
        args: ExprRange,
        env: &mut Environment,
    ) -> Step {
        let receiver = match receiver {
            Some(id) => Some(value!(self.eval(id, env))),
            None => None,
        };

        let arena = self.arena;
        let mut values: SmallVec<[Literal; 2]> = SmallVec::new();
        for &arg in arena.get_expr_list(args) {
            values.push(value!(self.eval(arg, env)));
        }

        self.try_call(callee, receiver, &values).map(Flow::Value)
    }

    /// The first arm whose condition is `true` wins; later arms are never
    /// looked at.
    fn eval_conditional(
        &mut self,
        branches: BranchRange,
        else_result: Option<ExprId>,
        env: &mut Environment,
    ) -> Step {
        let arena = self.arena;
        for branch in arena.get_branches(branches) {
            let condition = value!(self.eval(branch.condition, env));
            match condition.as_bool() {
                Some(true) => return self.eval(branch.result, env),
                Some(false) => {}
                None => return Err(inconclusive_condition()),
            }
        }
        match else_result {
            Some(result) => self.eval(result, env),
            None => Ok(Flow::Value(Literal::Unit)),
        }
    }

    fn eval_loop(&mut self, condition: ExprId, body: ExprId, env: &mut Environment) -> Step {
        let cap = self.config.iteration_cap;
        let mut iterations: u32 = 0;
        let mut last = Literal::Unit;

        loop {
            let holds = value!(self.eval(condition, env));
            match holds.as_bool() {
                Some(true) => {}
                Some(false) => break,
                None => return Err(inconclusive_condition()),
            }
            if iterations >= cap {
                return Err(iteration_cap_exceeded(cap));
            }
            iterations = iterations.saturating_add(1);
            last = value!(self.eval(body, env));
        }

        trace!(iterations, "loop finished");
        Ok(Flow::Value(last))
    }

    fn eval_block(&mut self, stmts: StmtRange, env: &mut Environment) -> Step {
        let arena = self.arena;
        env.push_scope();
        let result = self.eval_stmts(arena.get_stmts(stmts), env);
        env.pop_scope();
        result
    }

    /// The block's value is its last statement's value; declarations and
    /// assignments yield `Unit`.
    fn eval_stmts(&mut self, stmts: &[Stmt], env: &mut Environment) -> Step {
        let mut last = Literal::Unit;
        for stmt in stmts {
            last = match *stmt {
                Stmt::Expr(expr) => value!(self.eval(expr, env)),
                Stmt::VarDecl { name, init: None } => {
                    env.forget(name);
                    Literal::Unit
                }
                Stmt::VarDecl {
                    name,
                    init: Some(init),
                } => {
                    match self.eval_binding(name, init, env)? {
                        Some(Flow::Value(lit)) => env.define(name, lit),
                        Some(ret @ Flow::Return(_)) => return Ok(ret),
                        None => env.forget(name),
                    }
                    Literal::Unit
                }
                Stmt::Assign { name, value } => {
                    match self.eval_binding(name, value, env)? {
                        Some(Flow::Value(lit)) => env.assign(name, lit),
                        Some(ret @ Flow::Return(_)) => return Ok(ret),
                        None => env.forget(name),
                    }
                    Literal::Unit
                }
            };
        }
        Ok(Flow::Value(last))
    }

    /// Evaluate the right-hand side of a declaration or assignment.
    ///
    /// `Ok(None)` means the variable simply has no constant value from here
    /// on. Failures the host program would hit at runtime still end the fold.
    fn eval_binding(
        &mut self,
        name: Name,
        value: ExprId,
        env: &mut Environment,
    ) -> Result<Option<Flow>, FoldError> {
        match self.eval(value, env) {
            Ok(flow) => Ok(Some(flow)),
            Err(err) if err.halts_evaluation() => Err(err),
            Err(err) => {
                trace!(variable = self.interner.lookup(name), %err, "binding left without a constant");
                Ok(None)
            }
        }
    }
}
