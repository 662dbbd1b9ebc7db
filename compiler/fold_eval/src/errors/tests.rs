use pretty_assertions::assert_eq;

use super::*;

#[test]
fn test_inconclusive_classification() {
    assert!(inconclusive_condition().is_inconclusive());
    assert!(opaque_expression().is_inconclusive());
    assert!(unbound_variable("n").is_inconclusive());
    assert!(ineligible_callee("helper").is_inconclusive());
    assert!(arity_mismatch("evalAdd", 2, 1).is_inconclusive());

    assert!(!division_by_zero().is_inconclusive());
    assert!(!integer_overflow("plus").is_inconclusive());
    assert!(!iteration_cap_exceeded(10).is_inconclusive());
    assert!(!call_depth_exceeded(64).is_inconclusive());
}

#[test]
fn test_unsupported_operation_records_operand_types() {
    let err = unsupported_operation("plus", &[Literal::Int(1), Literal::string("a")]);
    assert_eq!(
        err,
        FoldError::UnsupportedOperation {
            operator: "plus",
            operands: vec![LiteralType::Int, LiteralType::Str],
        }
    );
    assert_eq!(
        err.to_string(),
        "operator `plus` is not defined for (Int, String)"
    );
}

#[test]
fn test_messages() {
    assert_eq!(division_by_zero().to_string(), "division by zero");
    assert_eq!(
        iteration_cap_exceeded(10_000).to_string(),
        "loop did not finish within 10000 iterations"
    );
    assert_eq!(
        unbound_variable("i").to_string(),
        "variable `i` has no constant value"
    );
    assert_eq!(
        arity_mismatch("evalAdd", 2, 3).to_string(),
        "`evalAdd` expects 2 arguments, got 3"
    );
}

#[test]
fn test_halting_failures() {
    assert!(division_by_zero().halts_evaluation());
    assert!(iteration_cap_exceeded(1).halts_evaluation());
    assert!(call_depth_exceeded(64).halts_evaluation());

    assert!(!integer_overflow("times").halts_evaluation());
    assert!(!unsupported_operation("size", &[Literal::string("a")]).halts_evaluation());
    assert!(!unbound_variable("x").halts_evaluation());
}
