//! Diagnostic queue for collecting, deduplicating, and sorting diagnostics.
//!
//! The same call site can be visited more than once (for instance a call
//! inside a function body that is itself inlined elsewhere), so the queue
//! keeps one diagnostic per (code, span). Diagnostics without a real span
//! cannot be told apart by location and are always kept.

use rustc_hash::FxHashSet;

use fold_ir::Span;

use crate::{Diagnostic, ErrorCode};

/// Default maximum number of diagnostics kept per build pass.
const DEFAULT_LIMIT: usize = 100;

/// Queue for collecting fold diagnostics.
#[derive(Clone, Debug)]
pub struct DiagnosticQueue {
    diagnostics: Vec<Diagnostic>,
    /// (code, span) pairs already reported. Dummy spans are never recorded.
    seen: FxHashSet<(ErrorCode, Span)>,
    /// Maximum number of diagnostics kept (0 = unlimited).
    limit: usize,
}

impl Default for DiagnosticQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagnosticQueue {
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_LIMIT)
    }

    /// Create a queue that keeps at most `limit` diagnostics (0 = unlimited).
    pub fn with_limit(limit: usize) -> Self {
        DiagnosticQueue {
            diagnostics: Vec::new(),
            seen: FxHashSet::default(),
            limit,
        }
    }

    /// Add a diagnostic.
    ///
    /// Returns `true` if it was added, `false` if it was a duplicate or the
    /// limit was reached.
    pub fn add(&mut self, diag: Diagnostic) -> bool {
        if self.limit > 0 && self.diagnostics.len() >= self.limit {
            return false;
        }
        if !diag.span.is_dummy() && !self.seen.insert((diag.code, diag.span)) {
            return false;
        }
        self.diagnostics.push(diag);
        true
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    /// Drain the queue, returning diagnostics sorted by source position.
    pub fn flush(&mut self) -> Vec<Diagnostic> {
        self.seen.clear();
        let mut out = std::mem::take(&mut self.diagnostics);
        out.sort_by_key(|d| (d.span.start, d.span.end, d.code));
        out
    }
}
