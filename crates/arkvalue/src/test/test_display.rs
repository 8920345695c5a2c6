// Tests for textual rendering
use crate::*;

#[test]
fn test_number_rendering() {
    assert_eq!(Value::number(1.0).to_string(), "1");
    assert_eq!(Value::number(0.1).to_string(), "0.1");
    assert_eq!(Value::number(100.0).to_string(), "100");
    assert_eq!(Value::number(2.5).to_string(), "2.5");
    assert_eq!(Value::number(-0.75).to_string(), "-0.75");
    assert_eq!(Value::number(123456.789).to_string(), "123456.789");
}

#[test]
fn test_text_is_verbatim() {
    assert_eq!(Value::string("hello world").to_string(), "hello world");
    assert_eq!(Value::string("").to_string(), "");
}

#[test]
fn test_list_rendering() {
    let v = Value::list(vec![Value::string("a"), Value::number(2.0)]);
    assert_eq!(v.to_string(), "[\"a\" 2]");

    assert_eq!(Value::list(vec![]).to_string(), "[]");

    let nested = Value::list(vec![
        Value::list(vec![Value::string("x")]),
        Value::nil(),
        Value::page_addr(4),
    ]);
    assert_eq!(nested.to_string(), "[[\"x\"] nil Function @ 4]");
}

#[test]
fn test_sentinel_and_address_rendering() {
    assert_eq!(Value::nil().to_string(), "nil");
    assert_eq!(Value::boolean(false).to_string(), "false");
    assert_eq!(Value::boolean(true).to_string(), "true");
    assert_eq!(Value::undefined().to_string(), "undefined");
    assert_eq!(Value::page_addr(17).to_string(), "Function @ 17");
}

#[test]
fn test_native_proc_leaks_no_identity() {
    let a = Value::native(NativeProc::new("print", |_a, _vm| Ok(Value::nil())));
    let b = Value::native(NativeProc::new("len", |_a, _vm| Ok(Value::nil())));
    assert_eq!(a.to_string(), "CProcedure");
    assert_eq!(a.to_string(), b.to_string());
}

#[test]
fn test_closure_rendering() {
    let empty = Closure::new(Scope::new(), 9);
    assert_eq!(Value::closure(empty).to_string(), "Closure @ 9");

    let mut scope = Scope::new();
    scope.insert("count", Value::number(3.0));
    scope.insert("label", Value::string("hi"));
    let c = Closure::new(scope, 21);
    assert_eq!(
        Value::closure(c.clone()).to_string(),
        "Closure @ 21 (.count=3 .label=\"hi\")"
    );
    assert_eq!(c.to_string(), "Closure @ 21 (.count=3 .label=\"hi\")");
}

#[test]
fn test_render_with_options() {
    let v = Value::list(vec![Value::number(3.14159)]);
    let options = RenderOptions {
        max_significant_digits: 2,
        ..RenderOptions::default()
    };
    assert_eq!(v.render(&options), "[3.1]");
    assert_eq!(v.to_string(), "[3.14159]");
}

#[test]
fn test_self_capturing_closure_rendering() {
    let fact = Closure::new(Scope::new(), 4);
    fact.scope_mut().insert("fact", Value::closure(fact.clone()));

    assert_eq!(
        Value::closure(fact.clone()).to_string(),
        "Closure @ 4 (.fact=Closure @ 4 (...))"
    );
    assert_eq!(
        Value::list(vec![Value::closure(fact.clone())]).to_string(),
        "[Closure @ 4 (.fact=Closure @ 4 (...))]"
    );

    fact.scope_mut().insert("fact", Value::nil());
}

#[test]
fn test_mutually_recursive_closures_rendering() {
    let even = Closure::new(Scope::new(), 1);
    let odd = Closure::new(Scope::new(), 2);
    even.scope_mut().insert("odd", Value::closure(odd.clone()));
    odd.scope_mut().insert("even", Value::closure(even.clone()));

    assert_eq!(
        even.to_string(),
        "Closure @ 1 (.odd=Closure @ 2 (.even=Closure @ 1 (...)))"
    );
    // the same closure twice side by side is not a cycle
    let pair = Value::list(vec![Value::closure(odd.clone()), Value::closure(odd.clone())]);
    assert_eq!(
        pair.to_string(),
        "[Closure @ 2 (.even=Closure @ 1 (.odd=Closure @ 2 (...))) \
         Closure @ 2 (.even=Closure @ 1 (.odd=Closure @ 2 (...)))]"
    );

    even.scope_mut().insert("odd", Value::nil());
    odd.scope_mut().insert("even", Value::nil());
}

#[test]
fn test_negative_zero_keeps_sign() {
    assert_eq!(Value::number(-0.0).to_string(), "-0");
    assert_eq!(Value::number(0.0).to_string(), "0");
}
