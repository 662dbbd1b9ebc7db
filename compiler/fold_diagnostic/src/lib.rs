//! Diagnostics for call sites the folder had to leave unchanged.
//!
//! Folding failures are silent by default: the worst outcome of any failure
//! is "no optimization performed here". When the build asks for it, the
//! driver turns failures that indicate a broken constant computation
//! (division by a literal zero, overflow, an operator the types don't
//! support, a runaway loop or recursion) into warnings collected here.
//!
//! - Error codes for searchability
//! - Clear messages (what went wrong)
//! - Primary span (the call site that was left unfolded)
//! - Notes (which callee and what the evaluator gave up on)

mod diagnostic;
mod error_code;
mod queue;

pub use diagnostic::{Diagnostic, Severity};
pub use error_code::ErrorCode;
pub use queue::DiagnosticQueue;
