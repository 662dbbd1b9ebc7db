//! Fold policy: resource limits, eligibility and fallback reporting.

/// What happens when an eligible call site cannot be folded.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FallbackReporting {
    /// Leave the call unchanged and say nothing.
    #[default]
    Silent,
    /// Leave the call unchanged and emit a warning when the constant
    /// computation itself is broken (division by zero, overflow, ...).
    Warn,
}

impl FallbackReporting {
    #[inline]
    pub fn emits_warnings(self) -> bool {
        matches!(self, Self::Warn)
    }
}

/// Limits and policies for a fold run.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FoldConfig {
    /// Maximum loop body executions per loop before giving up.
    pub iteration_cap: u32,
    /// Maximum nesting of eligible function calls.
    pub max_call_depth: u32,
    /// Functions whose name starts with this prefix may be folded.
    pub eligible_prefix: String,
    pub fallback: FallbackReporting,
}

impl FoldConfig {
    pub const DEFAULT_ITERATION_CAP: u32 = 10_000;
    pub const DEFAULT_MAX_CALL_DEPTH: u32 = 64;
    pub const DEFAULT_ELIGIBLE_PREFIX: &'static str = "eval";

    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_iteration_cap(mut self, cap: u32) -> Self {
        self.iteration_cap = cap;
        self
    }

    #[must_use]
    pub fn with_max_call_depth(mut self, depth: u32) -> Self {
        self.max_call_depth = depth;
        self
    }

    #[must_use]
    pub fn with_eligible_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.eligible_prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn with_fallback(mut self, fallback: FallbackReporting) -> Self {
        self.fallback = fallback;
        self
    }

    /// Whether a function named `name` may be evaluated at compile time.
    #[inline]
    pub fn is_eligible(&self, name: &str) -> bool {
        name.starts_with(self.eligible_prefix.as_str())
    }
}

impl Default for FoldConfig {
    fn default() -> Self {
        FoldConfig {
            iteration_cap: Self::DEFAULT_ITERATION_CAP,
            max_call_depth: Self::DEFAULT_MAX_CALL_DEPTH,
            eligible_prefix: Self::DEFAULT_ELIGIBLE_PREFIX.to_owned(),
            fallback: FallbackReporting::Silent,
        }
    }
}
