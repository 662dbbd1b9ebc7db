use pretty_assertions::assert_eq;

use fold_ir::StringInterner;

use super::*;

#[test]
fn test_define_and_lookup() {
    let interner = StringInterner::new();
    let x = interner.intern("x");
    let mut env = Environment::new();

    assert_eq!(env.lookup(x), None);
    env.define(x, Literal::Int(1));
    assert_eq!(env.lookup(x), Some(&Literal::Int(1)));
}

#[test]
fn test_shadowing_and_pop() {
    let interner = StringInterner::new();
    let x = interner.intern("x");
    let mut env = Environment::with_bindings([(x, Literal::Int(1))]);

    env.push_scope();
    env.define(x, Literal::string("inner"));
    assert_eq!(env.lookup(x), Some(&Literal::string("inner")));
    env.pop_scope();
    assert_eq!(env.lookup(x), Some(&Literal::Int(1)));
}

#[test]
fn test_base_scope_is_never_popped() {
    let interner = StringInterner::new();
    let x = interner.intern("x");
    let mut env = Environment::with_bindings([(x, Literal::Bool(true))]);

    env.pop_scope();
    env.pop_scope();
    assert_eq!(env.depth(), 1);
    assert_eq!(env.lookup(x), Some(&Literal::Bool(true)));
}

#[test]
fn test_assign_updates_outer_binding() {
    let interner = StringInterner::new();
    let sum = interner.intern("sum");
    let mut env = Environment::with_bindings([(sum, Literal::Int(0))]);

    env.push_scope();
    env.assign(sum, Literal::Int(5));
    env.pop_scope();
    assert_eq!(env.lookup(sum), Some(&Literal::Int(5)));
}

#[test]
fn test_assign_unbound_defines_innermost() {
    let interner = StringInterner::new();
    let y = interner.intern("y");
    let mut env = Environment::new();

    env.push_scope();
    env.assign(y, Literal::Int(2));
    assert_eq!(env.lookup(y), Some(&Literal::Int(2)));
    env.pop_scope();
    assert_eq!(env.lookup(y), None);
}

#[test]
fn test_forget_clears_every_scope() {
    let interner = StringInterner::new();
    let x = interner.intern("x");
    let mut env = Environment::with_bindings([(x, Literal::Int(1))]);

    env.push_scope();
    env.define(x, Literal::Int(2));
    env.forget(x);
    assert_eq!(env.lookup(x), None);
    env.pop_scope();
    assert_eq!(env.lookup(x), None);
}
