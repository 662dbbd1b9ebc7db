// Test code uses unwrap/expect for clarity - panics provide good test failure messages
#![allow(clippy::unwrap_used, clippy::expect_used)]

//! End-to-end folding through a host adapter.
//!
//! Each test builds a small host program, runs the whole pipeline
//! (`import_program` → `CallSiteDriver` → `make_literal`) and checks which
//! calls were replaced and by what.

#[path = "end_to_end/host.rs"]
mod host;

use pretty_assertions::assert_eq;

use fold_diagnostic::ErrorCode;
use fold_driver::{fold_program, init_tracing, HostFoldOutcome};
use fold_eval::{FallbackReporting, FoldConfig};
use fold_ir::Literal;

use host::{
    block, boolean, call, expr, get, int, method, op, println, ret, set, text, val, when,
    while_loop, Node, TestHost,
};

fn fold<'n>(host: &'n TestHost, root: &'n Node) -> HostFoldOutcome<'n, Node> {
    fold_program(host, root, &FoldConfig::default())
}

/// Fold `println(call)` and return the literal spliced in place of `call`.
fn folded_value(host: &TestHost, call: Node) -> Literal {
    let root = println(call.clone());
    let outcome = fold(host, &root);
    assert_eq!(outcome.splices.len(), 1, "expected exactly one splice");
    let splice = &outcome.splices[0];
    assert_eq!(splice.original, &call);
    assert_eq!(splice.replacement, Node::Const(splice.value.clone()));
    splice.value.clone()
}

fn programs() -> TestHost {
    TestHost::new()
        .define(
            "evalAdd",
            &["a", "b"],
            block(vec![expr(ret(op(get("a"), "plus", get("b"))))]),
        )
        .define(
            "evalMultiply",
            &["a", "b"],
            block(vec![expr(ret(op(get("a"), "times", get("b"))))]),
        )
        .define(
            "evalComplex",
            &["a", "b"],
            block(vec![expr(ret(op(
                op(get("a"), "plus", get("b")),
                "times",
                int(2),
            )))]),
        )
        .define(
            "evalConcat",
            &["a", "b"],
            block(vec![expr(ret(op(get("a"), "plus", get("b"))))]),
        )
        .define(
            "evalMax",
            &["a", "b"],
            block(vec![expr(when(
                vec![(
                    op(get("a"), "greater", get("b")),
                    block(vec![expr(ret(get("a")))]),
                )],
                Some(block(vec![expr(ret(get("b")))])),
            ))]),
        )
        .define(
            "evalWhen",
            &["x"],
            block(vec![expr(ret(when(
                vec![
                    (op(get("x"), "greater", int(0)), text("positive")),
                    (op(get("x"), "less", int(0)), text("negative")),
                ],
                Some(text("zero")),
            )))]),
        )
        .define(
            "evalAndOr",
            &["a", "b"],
            block(vec![expr(ret(op(
                op(get("a"), "and", get("b")),
                "or",
                get("b"),
            )))]),
        )
        .define(
            "evalSum",
            &["n"],
            block(vec![
                val("sum", int(0)),
                val("i", int(1)),
                expr(while_loop(
                    op(get("i"), "lessOrEqual", get("n")),
                    vec![
                        set("sum", op(get("sum"), "plus", get("i"))),
                        set("i", op(get("i"), "plus", int(1))),
                    ],
                )),
                expr(ret(get("sum"))),
            ]),
        )
        .define(
            "evalFactorial",
            &["n"],
            block(vec![
                val("result", int(1)),
                val("i", int(1)),
                expr(while_loop(
                    op(get("i"), "lessOrEqual", get("n")),
                    vec![
                        set("result", op(get("result"), "times", get("i"))),
                        set("i", op(get("i"), "plus", int(1))),
                    ],
                )),
                expr(ret(get("result"))),
            ]),
        )
        .define(
            "evalStringLength",
            &["str"],
            block(vec![expr(ret(method(get("str"), "length", vec![])))]),
        )
        .define(
            "evalDiv",
            &["a", "b"],
            block(vec![expr(ret(op(get("a"), "div", get("b"))))]),
        )
        .define(
            "add",
            &["a", "b"],
            block(vec![expr(ret(op(get("a"), "plus", get("b"))))]),
        )
}

// Scenarios

#[test]
fn eval_add() {
    let host = programs();
    let value = folded_value(&host, call("evalAdd", vec![int(1), int(2)]));
    assert_eq!(value, Literal::Int(3));
}

#[test]
fn eval_add_nested() {
    let host = programs();
    let inner = call("evalAdd", vec![int(2), int(3)]);
    let value = folded_value(&host, call("evalAdd", vec![int(1), inner]));
    assert_eq!(value, Literal::Int(6));
}

#[test]
fn eval_concat() {
    let host = programs();
    let value = folded_value(
        &host,
        call("evalConcat", vec![text("Hello"), text("World")]),
    );
    assert_eq!(value, Literal::string("HelloWorld"));
}

#[test]
fn eval_max_returns_from_either_arm() {
    let host = programs();
    assert_eq!(
        folded_value(&host, call("evalMax", vec![int(10), int(5)])),
        Literal::Int(10)
    );
    assert_eq!(
        folded_value(&host, call("evalMax", vec![int(5), int(10)])),
        Literal::Int(10)
    );
}

#[test]
fn eval_and_or() {
    let host = programs();
    let value = folded_value(
        &host,
        call("evalAndOr", vec![boolean(true), boolean(false)]),
    );
    assert_eq!(value, Literal::Bool(false));
}

#[test]
fn eval_when() {
    let host = programs();
    assert_eq!(
        folded_value(&host, call("evalWhen", vec![int(-1)])),
        Literal::string("negative")
    );
    assert_eq!(
        folded_value(&host, call("evalWhen", vec![int(0)])),
        Literal::string("zero")
    );
}

#[test]
fn eval_sum_loop() {
    let host = programs();
    let value = folded_value(&host, call("evalSum", vec![int(5)]));
    assert_eq!(value, Literal::Int(15));
}

#[test]
fn eval_factorial_loop() {
    let host = programs();
    let value = folded_value(&host, call("evalFactorial", vec![int(5)]));
    assert_eq!(value, Literal::Int(120));
}

#[test]
fn eval_string_length() {
    let host = programs();
    let value = folded_value(&host, call("evalStringLength", vec![text("Test")]));
    assert_eq!(value, Literal::Int(4));
}

#[test]
fn eval_multiply() {
    let host = programs();
    let value = folded_value(&host, call("evalMultiply", vec![int(4), int(5)]));
    assert_eq!(value, Literal::Int(20));
}

#[test]
fn eval_complex() {
    let host = programs();
    let value = folded_value(&host, call("evalComplex", vec![int(10), int(5)]));
    assert_eq!(value, Literal::Int(30));
}

#[test]
fn comparison_at_call_site() {
    let host = programs();
    assert_eq!(
        folded_value(&host, op(int(3), "compareTo", int(5))),
        Literal::Int(-1)
    );
    assert_eq!(
        folded_value(&host, op(boolean(true), "equals", boolean(true))),
        Literal::Bool(true)
    );
}

// Calls that stay

#[test]
fn ineligible_function_is_untouched() {
    let host = programs();
    let root = println(call("add", vec![int(1), int(2)]));
    assert!(fold(&host, &root).is_unchanged());
}

#[test]
fn non_constant_argument_is_untouched() {
    let host = programs();
    let root = block(vec![
        val("x", int(3)),
        expr(println(call("evalAdd", vec![get("x"), int(1)]))),
    ]);
    assert!(fold(&host, &root).is_unchanged());
}

#[test]
fn callee_cannot_read_caller_variables() {
    let host = programs().define(
        "evalReadsCaller",
        &[],
        block(vec![expr(ret(get("secret")))]),
    );
    let root = block(vec![
        val("secret", int(42)),
        expr(println(call("evalReadsCaller", vec![]))),
    ]);
    assert!(fold(&host, &root).is_unchanged());
}

#[test]
fn independent_call_sites_do_not_share_state() {
    let host = programs();
    let root = block(vec![
        expr(println(call("evalSum", vec![int(5)]))),
        expr(println(call("evalSum", vec![int(3)]))),
    ]);
    let outcome = fold(&host, &root);
    let values: Vec<Literal> = outcome.splices.iter().map(|s| s.value.clone()).collect();
    assert_eq!(values, vec![Literal::Int(15), Literal::Int(6)]);
}

#[test]
fn calls_inside_opaque_nodes_still_fold() {
    init_tracing();
    let host = programs();
    let root = Node::Lambda(vec![println(call("evalAdd", vec![int(1), int(2)]))]);
    let outcome = fold(&host, &root);
    assert_eq!(outcome.splices.len(), 1);
    assert_eq!(outcome.splices[0].value, Literal::Int(3));
}

#[test]
fn mutual_recursion_is_left_unchanged() {
    let host = TestHost::new()
        .define(
            "evalPing",
            &["n"],
            block(vec![expr(ret(call("evalPong", vec![get("n")])))]),
        )
        .define(
            "evalPong",
            &["n"],
            block(vec![expr(ret(call("evalPing", vec![get("n")])))]),
        );
    let root = println(call("evalPing", vec![int(1)]));

    assert!(fold(&host, &root).is_unchanged());

    let config = FoldConfig::new().with_fallback(FallbackReporting::Warn);
    let outcome = fold_program(&host, &root, &config);
    assert!(outcome.is_unchanged());
    let codes: Vec<ErrorCode> = outcome.diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(codes, vec![ErrorCode::E6005]);
}

#[test]
fn runaway_loop_hits_the_cap() {
    let host = TestHost::new().define(
        "evalForever",
        &[],
        block(vec![
            expr(while_loop(boolean(true), vec![])),
            expr(ret(int(1))),
        ]),
    );
    let root = println(call("evalForever", vec![]));
    let config = FoldConfig::new()
        .with_iteration_cap(100)
        .with_fallback(FallbackReporting::Warn);

    let outcome = fold_program(&host, &root, &config);
    assert!(outcome.is_unchanged());
    let codes: Vec<ErrorCode> = outcome.diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(codes, vec![ErrorCode::E6004]);
}

#[test]
fn division_by_zero_is_silent_by_default() {
    let host = programs();
    let root = println(call("evalDiv", vec![int(1), int(0)]));

    let outcome = fold(&host, &root);
    assert!(outcome.is_unchanged());
    assert!(outcome.diagnostics.is_empty());

    let config = FoldConfig::new().with_fallback(FallbackReporting::Warn);
    let outcome = fold_program(&host, &root, &config);
    assert!(outcome.is_unchanged());
    assert_eq!(outcome.diagnostics.len(), 1);
    assert_eq!(outcome.diagnostics[0].code, ErrorCode::E6001);
}

#[test]
fn custom_prefix_changes_eligibility() {
    let host = programs();
    let root = println(call("add", vec![int(1), int(2)]));
    let config = FoldConfig::new().with_eligible_prefix("add");
    let outcome = fold_program(&host, &root, &config);
    assert_eq!(outcome.splices.len(), 1);
    assert_eq!(outcome.splices[0].value, Literal::Int(3));
}

#[test]
fn each_failing_site_gets_its_own_warning() {
    let host = programs();
    let root = block(vec![
        expr(println(call("evalDiv", vec![int(1), int(0)]))),
        expr(println(call("evalDiv", vec![int(2), int(0)]))),
    ]);
    let config = FoldConfig::new().with_fallback(FallbackReporting::Warn);

    let outcome = fold_program(&host, &root, &config);
    assert!(outcome.is_unchanged());
    let codes: Vec<ErrorCode> = outcome.diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(codes, vec![ErrorCode::E6001, ErrorCode::E6001]);
}
