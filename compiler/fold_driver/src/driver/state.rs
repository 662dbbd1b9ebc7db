//! Per-call-site progress.

use fold_eval::FoldError;
use fold_ir::{ExprId, Literal, Name};

/// Where a call site is in the fold pipeline.
///
/// ```text
/// Candidate -> ArgsEvaluated -> ReadyToFold -> Folded
///                    |               |
///                    +---------------+-> LeftUnfolded
/// ```
///
/// `Folded` and `LeftUnfolded` are terminal; a site is never retried.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CallSiteState {
    /// The callee is eligible.
    Candidate,
    /// Receiver and arguments have been driven.
    ArgsEvaluated,
    /// Every operand is a literal.
    ReadyToFold,
    Folded,
    LeftUnfolded,
}

impl CallSiteState {
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Folded | Self::LeftUnfolded)
    }

    pub fn can_advance_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Candidate, Self::ArgsEvaluated)
                | (Self::ArgsEvaluated, Self::ReadyToFold | Self::LeftUnfolded)
                | (Self::ReadyToFold, Self::Folded | Self::LeftUnfolded)
        )
    }
}

/// One eligible call the driver visited.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallSite {
    pub expr: ExprId,
    pub callee: Name,
    pub state: CallSiteState,
    /// The literal the call folded to.
    pub value: Option<Literal>,
    /// Why folding stopped, when the evaluator gave a reason.
    pub cause: Option<FoldError>,
}

impl CallSite {
    pub fn new(expr: ExprId, callee: Name) -> Self {
        CallSite {
            expr,
            callee,
            state: CallSiteState::Candidate,
            value: None,
            cause: None,
        }
    }

    /// Move to `next`. Invalid transitions are a driver bug.
    pub fn advance(&mut self, next: CallSiteState) {
        debug_assert!(
            self.state.can_advance_to(next),
            "invalid call-site transition {:?} -> {next:?}",
            self.state
        );
        self.state = next;
    }

    pub fn fold(&mut self, value: Literal) {
        self.advance(CallSiteState::Folded);
        self.value = Some(value);
    }

    pub fn leave_unfolded(&mut self, cause: Option<FoldError>) {
        self.advance(CallSiteState::LeftUnfolded);
        self.cause = cause;
    }
}
