use super::*;
use ir::builder::{class, literal_int, literal_str, static_call};

#[test]
fn classic_arguments_bind_by_parameter_name() {
    let c = compilation(Vec::new());
    let op = classic(
        "AreEqual",
        vec![("expected", literal_int(2)), ("actual", int("x"))],
    );
    let cancel = CancellationToken::new();
    let inv = try_locate(&c, &op, &cancel).unwrap().expect("located");
    assert!(matches!(inv.form, AssertionForm::Classic(c) if c.name == "AreEqual"));
    assert_eq!(inv.actual.syntax, "x");
    assert_eq!(inv.expected.map(|e| e.syntax.as_str()), Some("2"));
    assert!(inv.constraint.is_none());
}

#[test]
fn classic_positional_arguments_use_declared_order() {
    let c = compilation(Vec::new());
    let op = static_call(
        names::CLASSIC_ASSERT,
        "AreEqual",
        vec![
            Argument::positional(literal_int(2)),
            Argument::positional(int("x")),
            Argument::positional(literal_str("values differ")),
        ],
        None,
    );
    let inv = try_locate(&c, &op, &CancellationToken::new())
        .unwrap()
        .expect("located");
    assert_eq!(inv.actual.syntax, "x");
    assert_eq!(inv.expected.map(|e| e.syntax.as_str()), Some("2"));
    assert!(inv.tolerance.is_none());
    assert_eq!(inv.message_arguments.len(), 1);
}

#[test]
fn comparison_methods_take_actual_first() {
    let c = compilation(Vec::new());
    let op = static_call(
        names::CLASSIC_ASSERT,
        "Greater",
        vec![
            Argument::positional(int("x")),
            Argument::positional(literal_int(3)),
        ],
        None,
    );
    let inv = try_locate(&c, &op, &CancellationToken::new())
        .unwrap()
        .expect("located");
    assert_eq!(inv.actual.syntax, "x");
    assert_eq!(inv.expected.map(|e| e.syntax.as_str()), Some("3"));
}

#[test]
fn constraint_form_keeps_messages_apart() {
    let c = compilation(Vec::new());
    let op = assert_that(
        int("x"),
        is(vec![link("EqualTo").with(literal_int(1))]),
        vec![Argument::named("message", literal_str("x should be one"))],
    );
    let inv = try_locate(&c, &op, &CancellationToken::new())
        .unwrap()
        .expect("located");
    assert_eq!(inv.form, AssertionForm::Constraint);
    assert_eq!(inv.constraint.map(|e| e.syntax.as_str()), Some("Is.EqualTo(1)"));
    assert_eq!(inv.message_arguments.len(), 1);
    assert!(!inv.is_async);
}

#[test]
fn boolean_without_constraint_is_a_condition() {
    let c = compilation(Vec::new());
    let op = condition(local("flag", TypeSymbol::boolean()));
    let inv = try_locate(&c, &op, &CancellationToken::new())
        .unwrap()
        .expect("located");
    assert_eq!(inv.form, AssertionForm::Condition);
    assert_eq!(inv.form.label(), "condition");
}

#[test]
fn calls_outside_the_framework_are_ignored() {
    let c = compilation(Vec::new());
    let cancel = CancellationToken::new();
    let op = static_call(
        "App.Helpers",
        "That",
        vec![
            Argument::named("actual", int("x")),
            Argument::named("expression", is(vec![link("Null")])),
        ],
        None,
    );
    assert!(try_locate(&c, &op, &cancel).unwrap().is_none());
    assert!(try_locate(&c, &int("x"), &cancel).unwrap().is_none());
}

#[test]
fn derived_entry_points_are_recognised() {
    let mut c = compilation(Vec::new());
    c.define(TypeDefinition::class("App.MyAssert").with_base(class(names::ASSERT)));
    let op = static_call(
        "App.MyAssert",
        "That",
        vec![
            Argument::named("actual", int("x")),
            Argument::named("expression", is(vec![link("Zero")])),
        ],
        None,
    );
    let inv = try_locate(&c, &op, &CancellationToken::new())
        .unwrap()
        .expect("located");
    assert_eq!(inv.form, AssertionForm::Constraint);
}

#[test]
fn cancelled_token_stops_location() {
    let c = compilation(Vec::new());
    let cancel = CancellationToken::new();
    cancel.cancel();
    let op = that(int("x"), is(vec![link("Zero")]));
    assert_eq!(try_locate(&c, &op, &cancel).unwrap_err(), EngineError::Cancelled);
}
