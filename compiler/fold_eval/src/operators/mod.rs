//! The operation table.
//!
//! Direct enum-based dispatch over `(operator, operand types)`. The literal
//! type set is closed, so an exhaustive `match` is used instead of trait
//! objects; every combination not listed below is an `UnsupportedOperation`
//! failure, including cross-type operands and wrong arity.
//!
//! | Type | Operators |
//! |------|-----------|
//! | Int  | plus minus times div compareTo greater less greaterOrEqual lessOrEqual equals notEquals |
//! | Str  | plus length compareTo equals notEquals |
//! | Bool | and or not compareTo equals notEquals |

use std::cmp::Ordering;
use std::fmt;

use fold_ir::Literal;

use crate::errors::{division_by_zero, integer_overflow, unsupported_operation, FoldError};

/// An operator the table knows by name.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    Plus,
    Minus,
    Times,
    Div,
    CompareTo,
    Greater,
    Less,
    GreaterOrEqual,
    LessOrEqual,
    Equals,
    NotEquals,
    Length,
    And,
    Or,
    Not,
}

impl Operator {
    /// Resolve a callee name to an operator.
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "plus" => Operator::Plus,
            "minus" => Operator::Minus,
            "times" => Operator::Times,
            "div" => Operator::Div,
            "compareTo" => Operator::CompareTo,
            "greater" => Operator::Greater,
            "less" => Operator::Less,
            "greaterOrEqual" => Operator::GreaterOrEqual,
            "lessOrEqual" => Operator::LessOrEqual,
            "equals" => Operator::Equals,
            "notEquals" => Operator::NotEquals,
            "length" => Operator::Length,
            "and" => Operator::And,
            "or" => Operator::Or,
            "not" => Operator::Not,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            Operator::Plus => "plus",
            Operator::Minus => "minus",
            Operator::Times => "times",
            Operator::Div => "div",
            Operator::CompareTo => "compareTo",
            Operator::Greater => "greater",
            Operator::Less => "less",
            Operator::GreaterOrEqual => "greaterOrEqual",
            Operator::LessOrEqual => "lessOrEqual",
            Operator::Equals => "equals",
            Operator::NotEquals => "notEquals",
            Operator::Length => "length",
            Operator::And => "and",
            Operator::Or => "or",
            Operator::Not => "not",
        }
    }

    /// Members of the comparison set the call-site driver folds directly.
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            Operator::CompareTo
                | Operator::Greater
                | Operator::Less
                | Operator::GreaterOrEqual
                | Operator::LessOrEqual
                | Operator::Equals
                | Operator::NotEquals
        )
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Apply an operator to already-reduced operands.
///
/// For receiver-style calls the receiver is the first operand.
pub fn apply(op: Operator, operands: &[Literal]) -> Result<Literal, FoldError> {
    match operands {
        [Literal::Int(a), Literal::Int(b)] => eval_int_binary(op, *a, *b),
        [Literal::Str(a), Literal::Str(b)] => eval_str_binary(op, a, b),
        [Literal::Bool(a), Literal::Bool(b)] => eval_bool_binary(op, *a, *b),
        [Literal::Str(s)] => eval_str_unary(op, s),
        [Literal::Bool(b)] => eval_bool_unary(op, *b),
        _ => Err(unsupported_operation(op.name(), operands)),
    }
}

/// `compareTo` result: -1, 0 or 1.
#[inline]
fn ordering_literal(ordering: Ordering) -> Literal {
    Literal::Int(match ordering {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    })
}

/// Checked arithmetic with overflow reported against the operator.
#[inline]
fn checked_arith(result: Option<i64>, op: Operator) -> Result<Literal, FoldError> {
    result
        .map(Literal::Int)
        .ok_or_else(|| integer_overflow(op.name()))
}

// Type-Specific Evaluation Functions

fn eval_int_binary(op: Operator, a: i64, b: i64) -> Result<Literal, FoldError> {
    match op {
        Operator::Plus => checked_arith(a.checked_add(b), op),
        Operator::Minus => checked_arith(a.checked_sub(b), op),
        Operator::Times => checked_arith(a.checked_mul(b), op),
        Operator::Div => {
            if b == 0 {
                Err(division_by_zero())
            } else {
                // i64::MIN / -1 is the only remaining failure.
                checked_arith(a.checked_div(b), op)
            }
        }
        Operator::CompareTo => Ok(ordering_literal(a.cmp(&b))),
        Operator::Greater => Ok(Literal::Bool(a > b)),
        Operator::Less => Ok(Literal::Bool(a < b)),
        Operator::GreaterOrEqual => Ok(Literal::Bool(a >= b)),
        Operator::LessOrEqual => Ok(Literal::Bool(a <= b)),
        Operator::Equals => Ok(Literal::Bool(a == b)),
        Operator::NotEquals => Ok(Literal::Bool(a != b)),
        _ => Err(unsupported_operation(
            op.name(),
            &[Literal::Int(a), Literal::Int(b)],
        )),
    }
}

/// Strings compare by UTF-16 code units, the host's string ordering.
fn eval_str_binary(op: Operator, a: &str, b: &str) -> Result<Literal, FoldError> {
    match op {
        Operator::Plus => {
            let mut out = String::with_capacity(a.len().saturating_add(b.len()));
            out.push_str(a);
            out.push_str(b);
            Ok(Literal::Str(out))
        }
        Operator::CompareTo => Ok(ordering_literal(a.encode_utf16().cmp(b.encode_utf16()))),
        Operator::Equals => Ok(Literal::Bool(a == b)),
        Operator::NotEquals => Ok(Literal::Bool(a != b)),
        _ => Err(unsupported_operation(
            op.name(),
            &[Literal::string(a), Literal::string(b)],
        )),
    }
}

fn eval_str_unary(op: Operator, s: &str) -> Result<Literal, FoldError> {
    match op {
        Operator::Length => {
            let units = s.encode_utf16().count();
            i64::try_from(units)
                .map(Literal::Int)
                .map_err(|_| integer_overflow(op.name()))
        }
        _ => Err(unsupported_operation(op.name(), &[Literal::string(s)])),
    }
}

/// Operands are already literals, so `and`/`or` never short-circuit here.
fn eval_bool_binary(op: Operator, a: bool, b: bool) -> Result<Literal, FoldError> {
    match op {
        Operator::And => Ok(Literal::Bool(a & b)),
        Operator::Or => Ok(Literal::Bool(a | b)),
        Operator::CompareTo => Ok(ordering_literal(a.cmp(&b))),
        Operator::Equals => Ok(Literal::Bool(a == b)),
        Operator::NotEquals => Ok(Literal::Bool(a != b)),
        _ => Err(unsupported_operation(
            op.name(),
            &[Literal::Bool(a), Literal::Bool(b)],
        )),
    }
}

fn eval_bool_unary(op: Operator, b: bool) -> Result<Literal, FoldError> {
    match op {
        Operator::Not => Ok(Literal::Bool(!b)),
        _ => Err(unsupported_operation(op.name(), &[Literal::Bool(b)])),
    }
}
