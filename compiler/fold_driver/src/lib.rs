//! Fold Driver - finds constant call sites and folds them.
//!
//! This crate connects the evaluator in `fold_eval` to a host compiler:
//! - [`HostAdapter`]: the trait a host implements for its own tree
//! - [`import_program`]: lowers a host root and its eligible callees
//! - [`CallSiteDriver`]: walks the lowered root and folds eligible calls
//! - [`fold_program`]: the whole pipeline, producing host-level splices
//!
//! # Tracing
//!
//! Set `RUST_LOG` and call [`init_tracing`] to see fold decisions:
//!
//! ```text
//! RUST_LOG=fold_driver=debug,fold_eval=trace
//! ```

mod adapter;
mod driver;
mod host_fold;

use std::sync::Once;

pub use adapter::{
    import_program, import_program_in, HostAdapter, HostFunction, HostNode, HostSplice, HostStmt,
    ImportedProgram,
};
pub use driver::{error_code, CallSite, CallSiteDriver, CallSiteState, DriveReport, Splice};
pub use host_fold::{fold_program, HostFoldOutcome};

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing when `RUST_LOG` is unset, and nothing on repeat calls.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true))
                .with(filter)
                .init();
        }
    });
}
