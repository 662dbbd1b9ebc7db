//! Error codes for fold diagnostics.
//!
//! Format: E6xxx, the evaluation phase range.

use std::fmt;

/// Error codes for fold fallback diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum ErrorCode {
    /// Constant division by zero
    E6001,
    /// Constant integer overflow
    E6002,
    /// Operator not defined for the operand types
    E6003,
    /// Loop exceeded the compile-time iteration cap
    E6004,
    /// Nested constant calls exceeded the depth limit
    E6005,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::E6001 => "E6001",
            ErrorCode::E6002 => "E6002",
            ErrorCode::E6003 => "E6003",
            ErrorCode::E6004 => "E6004",
            ErrorCode::E6005 => "E6005",
        }
    }

    /// One-line explanation, suitable for `--explain` style output.
    pub fn description(self) -> &'static str {
        match self {
            ErrorCode::E6001 => "a constant call divides by zero",
            ErrorCode::E6002 => "a constant call overflows a 64-bit integer",
            ErrorCode::E6003 => "a constant call uses an operator its operand types do not support",
            ErrorCode::E6004 => "a loop inside a constant call did not finish within the iteration cap",
            ErrorCode::E6005 => "constant calls nest deeper than the call-depth limit",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
