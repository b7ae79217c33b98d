use super::*;
use ir::builder::{class, convert, literal_int, structure, user_binary};
use ir::{BinaryOperator, ConversionKind};

fn parts_of(op: &Operation) -> Vec<(Vec<&str>, Option<&str>, Vec<&str>)> {
    let expression = decompose(op, &CancellationToken::new()).unwrap();
    expression
        .parts
        .iter()
        .map(|p| (p.prefix_names(), p.root_name(), p.suffix_names()))
        .collect()
}

#[test]
fn single_chain_splits_into_prefix_root_suffix() {
    let op = is(vec![
        link("Not"),
        link("EqualTo").with(literal_int(3)),
        link("Within").with(literal_int(1)),
    ]);
    let expression = decompose(&op, &CancellationToken::new()).unwrap();
    let part = expression.single_part().expect("one part");
    assert_eq!(part.prefix_names(), vec!["Not"]);
    assert_eq!(part.root_name(), Some("EqualTo"));
    assert_eq!(part.suffix_names(), vec!["Within"]);
    assert!(part.is_plain());
    assert!(part.is_negated());
    assert_eq!(part.helper_class, Some(HelperClass::Is));
    let expected = part.expected_argument().expect("expected argument");
    assert_eq!(expected.operand.syntax, "3");
}

#[test]
fn operators_and_fluent_combinators_both_split_parts() {
    let left = is(vec![link("Not"), link("Null")]);
    let right = has(vec![
        link("Count"),
        link("EqualTo").with(literal_int(2)),
        link("Or"),
        link("Empty"),
    ]);
    let constraint = class(names::CONSTRAINT);
    let op = user_binary(BinaryOperator::And, left, right, names::CONSTRAINT, constraint);
    let parts = parts_of(&op);
    assert_eq!(
        parts,
        vec![
            (vec!["Not"], Some("Null"), vec![]),
            (vec!["Count"], Some("EqualTo"), vec![]),
            (vec![], Some("Empty"), vec![]),
        ]
    );
}

#[test]
fn parts_after_a_combinator_keep_the_helper() {
    let op = has(vec![link("Count"), link("Zero"), link("Or"), link("Empty")]);
    let expression = decompose(&op, &CancellationToken::new()).unwrap();
    assert_eq!(expression.parts.len(), 2);
    assert!(expression
        .parts
        .iter()
        .all(|p| p.helper_class == Some(HelperClass::Has)));
}

#[test]
fn property_prefix_alone_is_a_root() {
    let op = has(vec![link("Property").with(ir::builder::literal_str("Name"))]);
    let parts = parts_of(&op);
    assert_eq!(parts, vec![(vec![], Some("Property"), vec![])]);
}

#[test]
fn unknown_constraints_are_reported_not_rejected() {
    let custom = local("constraint", class("App.CustomConstraint"));
    let expression = decompose(&custom, &CancellationToken::new()).unwrap();
    assert!(expression.has_unknown_parts());
    let part = expression.single_part().expect("one part");
    assert!(part.is_unknown_shape());
    assert_eq!(part.unknown.len(), 1);
}

#[test]
fn decomposition_stops_when_cancelled() {
    let cancel = CancellationToken::new();
    cancel.cancel();
    let op = is(vec![link("Null")]);
    assert_eq!(decompose(&op, &cancel).unwrap_err(), EngineError::Cancelled);
}

#[test]
fn decomposition_is_deterministic() {
    let left = is(vec![link("Not"), link("Null")]);
    let right = is(vec![
        link("EqualTo").with(literal_int(3)),
        link("Within").with(literal_int(1)),
        link("And"),
        link("Positive"),
    ]);
    let op = user_binary(BinaryOperator::Or, left, right, names::CONSTRAINT, class(names::CONSTRAINT));
    let cancel = CancellationToken::new();
    let first = decompose(&op, &cancel).unwrap();
    let second = decompose(&op, &cancel).unwrap();
    assert_eq!(format!("{first:?}"), format!("{second:?}"));
    assert_eq!(first.parts.len(), second.parts.len());
    for (a, b) in first.parts.iter().zip(&second.parts) {
        assert!(match (a.root, b.root) {
            (Some(x), Some(y)) => std::ptr::eq(x, y),
            (None, None) => true,
            _ => false,
        });
    }
}

#[test]
fn expected_argument_sees_user_defined_conversions() {
    let money = local("m", structure("App.Money"));
    let bound = convert(money, TypeSymbol::decimal(), ConversionKind::ImplicitUserDefined, true);
    let op = is(vec![link("EqualTo").with(bound)]);
    let expression = decompose(&op, &CancellationToken::new()).unwrap();
    let expected: ExpectedArgument = expression
        .single_part()
        .and_then(|p| p.expected_argument())
        .expect("expected argument");
    assert!(expected.is_user_conversion());
    assert_eq!(expected.operand_type().map(|t| t.name.as_str()), Some("App.Money"));
    assert_eq!(expected.converted_type(), Some(&TypeSymbol::decimal()));

    let widened = convert(int("x"), TypeSymbol::double(), ConversionKind::ImplicitNumeric, true);
    let op = is(vec![link("EqualTo").with(widened)]);
    let expression = decompose(&op, &CancellationToken::new()).unwrap();
    let expected = expression
        .single_part()
        .and_then(|p| p.expected_argument())
        .expect("expected argument");
    assert!(!expected.is_user_conversion());
    assert_eq!(expected.operand.syntax, "x");
}
