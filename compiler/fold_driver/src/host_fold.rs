//! The full pipeline: import, drive, build replacements.

use fold_diagnostic::Diagnostic;
use fold_eval::FoldConfig;

use crate::adapter::{import_program, HostAdapter, HostSplice};
use crate::driver::CallSiteDriver;

/// Result of folding one host root.
#[derive(Debug)]
pub struct HostFoldOutcome<'n, N> {
    /// Replacements for the host to apply. Empty means "leave unchanged".
    pub splices: Vec<HostSplice<'n, N>>,
    pub diagnostics: Vec<Diagnostic>,
}

impl<N> HostFoldOutcome<'_, N> {
    pub fn is_unchanged(&self) -> bool {
        self.splices.is_empty()
    }
}

/// Fold every eligible call under `root`.
#[tracing::instrument(level = "debug", skip_all)]
pub fn fold_program<'n, A: HostAdapter>(
    adapter: &'n A,
    root: &'n A::Node,
    config: &FoldConfig,
) -> HostFoldOutcome<'n, A::Node> {
    let program = import_program(adapter, root, config);
    let report = CallSiteDriver::new(
        &program.arena,
        &program.functions,
        &program.interner,
        config,
    )
    .drive(program.root);

    let splices = report
        .splices
        .into_iter()
        .filter_map(|splice| {
            let original = program.origin(splice.call)?;
            Some(HostSplice {
                original,
                replacement: adapter.make_literal(&splice.value, original),
                value: splice.value,
            })
        })
        .collect();

    HostFoldOutcome {
        splices,
        diagnostics: report.diagnostics,
    }
}
