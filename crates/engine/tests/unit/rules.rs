use super::*;
use ir::builder::{
    binary, call, class, convert, invalid, literal_bool, literal_int, literal_str, not, property,
    structure, user_binary,
};
use ir::{types, BinaryOperator, ConversionKind};

fn single(diagnostics: &[Diagnostic], id: &str) -> Diagnostic {
    let found: Vec<&Diagnostic> = diagnostics.iter().filter(|d| d.rule_id == id).collect();
    assert_eq!(found.len(), 1, "expected one {id} in {:?}", ids(diagnostics));
    found[0].clone()
}

fn starts_with(receiver: Operation, value: &str) -> Operation {
    call(
        receiver,
        types::STRING,
        "StartsWith",
        vec![Argument::named("value", literal_str(value))],
        Some(TypeSymbol::boolean()),
    )
}

fn list_contains(list: Operation, item: Operation) -> Operation {
    call(
        list,
        types::LIST,
        "Contains",
        vec![Argument::named("item", item)],
        Some(TypeSymbol::boolean()),
    )
}

// Classic model

#[test]
fn classic_equality_suggests_constraint_model() {
    let d = analyze(vec![classic(
        "AreEqual",
        vec![("expected", literal_int(2)), ("actual", int("x"))],
    )]);
    assert_eq!(ids(&d), vec!["NUnit2005"]);
    assert_eq!(
        d[0].message,
        "Consider using the constraint model, Assert.That(actual, Is.EqualTo(expected)), instead of the classic model, ClassicAssert.AreEqual"
    );
    assert_eq!(d[0].severity, Severity::Info);
    assert_eq!(d[0].fix.as_deref(), Some("Assert.That(x, Is.EqualTo(2))"));
}

#[test]
fn classic_negated_null_check() {
    let d = analyze(vec![classic("IsNotNull", vec![("anObject", string("s"))])]);
    let found = single(&d, "NUnit2019");
    assert_eq!(found.fix.as_deref(), Some("Assert.That(s, Is.Not.Null)"));
}

// Constant and duplicated operands

#[test]
fn constant_actual_value_is_reported() {
    let d = analyze(vec![that(literal_int(3), is(vec![link("EqualTo").with(int("x"))]))]);
    let found = single(&d, "NUnit2007");
    assert_eq!(found.severity, Severity::Warning);
    assert_eq!(found.excerpt, "3");
    assert_eq!(found.fix.as_deref(), Some("Assert.That(x, Is.EqualTo(3))"));
}

#[test]
fn two_equal_constants_are_the_same_value() {
    let d = analyze(vec![that(literal_int(3), is(vec![link("EqualTo").with(literal_int(3))]))]);
    assert!(!ids(&d).contains(&"NUnit2007"));
    let same = single(&d, "NUnit2009");
    assert!(same.message.contains("'3'"), "{}", same.message);
}

#[test]
fn two_different_constants_are_not_reported() {
    let d = analyze(vec![that(literal_int(3), is(vec![link("EqualTo").with(literal_int(4))]))]);
    assert!(!ids(&d).contains(&"NUnit2007"));
    assert!(!ids(&d).contains(&"NUnit2009"));
}

#[test]
fn same_actual_and_expected() {
    let d = analyze(vec![that(int("x"), is(vec![link("EqualTo").with(int("x"))]))]);
    let found = single(&d, "NUnit2009");
    assert_eq!(
        found.message,
        "The actual and the expected argument is the same 'x'"
    );
    let d = analyze(vec![that(int("x"), is(vec![link("EqualTo").with(int("y"))]))]);
    assert!(d.is_empty());
}

// Conditions

#[test]
fn equality_operator_in_condition() {
    let cond = binary(BinaryOperator::Equals, int("x"), literal_int(2), TypeSymbol::boolean());
    let d = analyze(vec![condition(cond)]);
    let found = single(&d, "NUnit2010");
    assert_eq!(
        found.message,
        "Consider using the constraint model, Assert.That(actual, Is.EqualTo(expected)), instead of the '==' operator"
    );
    assert_eq!(found.fix.as_deref(), Some("Assert.That(x, Is.EqualTo(2))"));
}

#[test]
fn negated_inequality_reads_as_equality() {
    let cond = not(binary(
        BinaryOperator::NotEquals,
        int("x"),
        literal_int(2),
        TypeSymbol::boolean(),
    ));
    let d = analyze(vec![condition(cond)]);
    let found = single(&d, "NUnit2010");
    assert_eq!(found.facts, Some(FixFacts::UseEqualConstraint { negated: false }));
}

#[test]
fn comparison_operator_under_is_false_is_flipped() {
    let cond = binary(BinaryOperator::GreaterThan, int("x"), literal_int(2), TypeSymbol::boolean());
    let d = analyze(vec![that(cond, is(vec![link("False")]))]);
    let found = single(&d, "NUnit2043");
    assert!(found.message.contains("Is.LessThanOrEqualTo(expected)"));
    assert!(found.message.contains("'>'"));
    assert_eq!(
        found.fix.as_deref(),
        Some("Assert.That(x, Is.LessThanOrEqualTo(2))")
    );
}

#[test]
fn string_method_in_condition() {
    let d = analyze(vec![condition(starts_with(string("s"), "a"))]);
    let found = single(&d, "NUnit2012");
    assert!(found.message.contains("Does.StartWith(expected)"));
    assert_eq!(
        found.fix.as_deref(),
        Some("Assert.That(s, Does.StartWith(\"a\"))")
    );
}

#[test]
fn negated_collection_contains() {
    let cond = not(list_contains(list_of_int("list"), literal_int(1)));
    let d = analyze(vec![condition(cond)]);
    let found = single(&d, "NUnit2014");
    assert!(found.message.contains("Has.No.Member(expected)"));
    assert_eq!(found.fix.as_deref(), Some("Assert.That(list, Has.No.Member(1))"));
}

#[test]
fn plain_boolean_condition_is_fine() {
    let d = analyze(vec![condition(local("flag", TypeSymbol::boolean()))]);
    assert!(d.is_empty());
}

// Type compatibility

#[test]
fn same_as_on_value_types() {
    let d = analyze(vec![that(int("x"), is(vec![link("SameAs").with(int("y"))]))]);
    let found = single(&d, "NUnit2040");
    assert_eq!(found.severity, Severity::Error);
    assert_eq!(found.excerpt, "y");
}

#[test]
fn same_as_on_unrelated_classes() {
    let car = local("car", class("App.Car"));
    let dog = local("dog", class("App.Dog"));
    let d = analyze(vec![that(car, is(vec![link("SameAs").with(dog)]))]);
    let found = single(&d, "NUnit2020");
    assert!(found.message.contains("'Car'"));
    assert!(found.message.contains("'Dog'"));

    let animal = local("animal", class("App.Animal"));
    let dog = local("dog", class("App.Dog"));
    let d = analyze(vec![that(animal, is(vec![link("SameAs").with(dog)]))]);
    assert!(d.is_empty());
}

#[test]
fn equal_to_with_incompatible_types() {
    let d = analyze(vec![that(string("s"), is(vec![link("EqualTo").with(literal_int(1))]))]);
    let found = single(&d, "NUnit2021");
    assert!(found.message.contains("'string'"));
    assert!(found.message.contains("'int'"));

    let d = analyze(vec![that(int("x"), is(vec![link("EqualTo").with(literal_int(1))]))]);
    assert!(d.is_empty());
}

#[test]
fn equal_to_abstains_on_object_and_comparers() {
    let d = analyze(vec![that(
        local("o", TypeSymbol::object()),
        is(vec![link("EqualTo").with(literal_int(1))]),
    )]);
    assert!(d.is_empty());
    let d = analyze(vec![that(
        string("s"),
        is(vec![
            link("EqualTo").with(literal_int(1)),
            link("Using").with(local("comparer", class("App.Comparer"))),
        ]),
    )]);
    assert!(!ids(&d).contains(&"NUnit2021"));
}

fn money_to_decimal(name: &str) -> Operation {
    convert(
        local(name, structure("App.Money")),
        TypeSymbol::decimal(),
        ConversionKind::ImplicitUserDefined,
        true,
    )
}

fn with_money(assertions: Vec<Operation>, conversion: bool) -> Vec<Diagnostic> {
    let mut c = compilation(vec![unit(FILE, assertions)]);
    let mut money = TypeDefinition::structure("App.Money");
    if conversion {
        money = money.conversion(true, structure("App.Money"), TypeSymbol::decimal());
    }
    c.define(money);
    analyze_compilation(&c, &EngineConfig::default(), None, None).expect("analysis")
}

#[test]
fn unregistered_types_are_treated_as_compatible() {
    let d = analyze(vec![that(
        local("m", structure("App.Money")),
        is(vec![link("EqualTo").with(literal_str("1"))]),
    )]);
    assert!(!ids(&d).contains(&"NUnit2021"));

    let d = analyze(vec![that(
        local("w", class("App.Wallet")),
        is(vec![link("SameAs").with(local("car", class("App.Car")))]),
    )]);
    assert!(!ids(&d).contains(&"NUnit2020"));

    let d = with_money(
        vec![that(
            local("m", structure("App.Money")),
            is(vec![link("EqualTo").with(literal_str("1"))]),
        )],
        false,
    );
    let found = single(&d, "NUnit2021");
    assert!(found.message.contains("'Money'"), "{}", found.message);
}

#[test]
fn expected_bound_through_user_conversion_is_compatible() {
    let assertion = || {
        classic(
            "AreEqual",
            vec![
                ("expected", money_to_decimal("m")),
                ("actual", local("d", TypeSymbol::decimal())),
            ],
        )
    };
    let d = analyze(vec![assertion()]);
    assert!(!ids(&d).contains(&"NUnit2021"));
    let d = with_money(vec![assertion()], true);
    assert!(!ids(&d).contains(&"NUnit2021"));
}

#[test]
fn fix_keeps_user_conversion_as_cast() {
    let d = with_money(
        vec![classic(
            "AreEqual",
            vec![
                ("expected", money_to_decimal("m")),
                ("actual", local("d", TypeSymbol::decimal())),
            ],
        )],
        true,
    );
    let found = single(&d, "NUnit2005");
    assert_eq!(
        found.fix.as_deref(),
        Some("Assert.That(d, Is.EqualTo((decimal)m))")
    );
}

#[test]
fn missing_property_on_actual_type() {
    let person = || local("person", class("App.Person"));
    let d = analyze(vec![that(
        person(),
        has(vec![link("Property").with(literal_str("Age"))]),
    )]);
    let found = single(&d, "NUnit2022");
    assert_eq!(
        found.message,
        "Constraint requires the actual value of type 'Person' to have a property 'Age'"
    );
    let d = analyze(vec![that(
        person(),
        has(vec![link("Property").with(literal_str("Name"))]),
    )]);
    assert!(d.is_empty());
}

#[test]
fn null_constraint_on_value_type() {
    let d = analyze(vec![that(int("x"), is(vec![link("Null")]))]);
    single(&d, "NUnit2023");
    let nullable = local("n", TypeSymbol::nullable(TypeSymbol::int32()));
    let d = analyze(vec![that(nullable, is(vec![link("Null")]))]);
    assert!(d.is_empty());
}

#[test]
fn string_constraint_on_non_string() {
    let d = analyze(vec![that(
        int("x"),
        does(vec![link("StartWith").with(literal_str("a"))]),
    )]);
    single(&d, "NUnit2024");
    let d = analyze(vec![that(
        string("s"),
        does(vec![link("StartWith").with(literal_str("a"))]),
    )]);
    assert!(d.is_empty());
}

#[test]
fn contains_constraint_on_non_string() {
    let d = analyze(vec![that(
        int("x"),
        does(vec![link("Contain").with(literal_str("a"))]),
    )]);
    single(&d, "NUnit2025");
    let strings = local("names", TypeSymbol::list_of(TypeSymbol::string()));
    let d = analyze(vec![that(
        strings,
        does(vec![link("Contain").with(literal_str("a"))]),
    )]);
    assert!(d.is_empty());
}

#[test]
fn member_of_incompatible_type() {
    let d = analyze(vec![that(
        list_of_int("list"),
        has(vec![link("Member").with(literal_str("a"))]),
    )]);
    single(&d, "NUnit2026");
    let d = analyze(vec![that(
        list_of_int("list"),
        has(vec![link("Member").with(literal_int(1))]),
    )]);
    assert!(d.is_empty());
}

#[test]
fn comparison_of_incompatible_types() {
    let d = analyze(vec![that(
        string("s"),
        is(vec![link("GreaterThan").with(literal_int(1))]),
    )]);
    single(&d, "NUnit2041");
    let d = analyze(vec![that(
        int("x"),
        is(vec![link("GreaterThan").with(ir::builder::literal_double(1.5))]),
    )]);
    assert!(d.is_empty());
}

// Collections and modifiers

#[test]
fn count_property_compared_with_equal_to() {
    let count = property(list_of_int("list"), "Count", TypeSymbol::int32());
    let d = analyze(vec![that(count, is(vec![link("EqualTo").with(literal_int(2))]))]);
    let found = single(&d, "NUnit2046");
    assert!(found.message.contains("Has.Count.EqualTo(expected)"));
    assert_eq!(
        found.fix.as_deref(),
        Some("Assert.That(list, Has.Count.EqualTo(2))")
    );
}

#[test]
fn within_on_non_numeric_value() {
    let d = analyze(vec![that(
        local("flag", TypeSymbol::boolean()),
        is(vec![
            link("EqualTo").with(literal_bool(true)),
            link("Within").with(literal_int(1)),
        ]),
    )]);
    let found = single(&d, "NUnit2047");
    assert_eq!(
        found.message,
        "The Within modifier cannot be used with values of type 'bool'"
    );
    let d = analyze(vec![that(
        ir::builder::local("d", TypeSymbol::double()),
        is(vec![
            link("EqualTo").with(ir::builder::literal_double(1.0)),
            link("Within").with(ir::builder::literal_double(0.1)),
        ]),
    )]);
    assert!(d.is_empty());
}

#[test]
fn ignore_case_on_non_string_value() {
    let d = analyze(vec![that(
        int("x"),
        is(vec![link("EqualTo").with(literal_int(1)), link("IgnoreCase")]),
    )]);
    single(&d, "NUnit2048");
    let d = analyze(vec![that(
        string("s"),
        is(vec![link("EqualTo").with(literal_str("a")), link("IgnoreCase")]),
    )]);
    assert!(d.is_empty());
}

#[test]
fn within_accepts_collections_of_numbers() {
    let values = local("values", TypeSymbol::list_of(TypeSymbol::double()));
    let expected = local("expected", TypeSymbol::array(TypeSymbol::double()));
    let d = analyze(vec![that(
        values,
        is(vec![
            link("EqualTo").with(expected),
            link("Within").with(ir::builder::literal_double(0.1)),
        ]),
    )]);
    assert!(!ids(&d).contains(&"NUnit2047"));
}

#[test]
fn not_null_or_empty_is_misused() {
    let d = analyze(vec![that(
        string("s"),
        is(vec![link("Not"), link("Null"), link("Or"), link("Empty")]),
    )]);
    let found = single(&d, "NUnit2052");
    assert_eq!(found.excerpt, "Is.Not.Null.Or.Empty");
    assert!(found.message.starts_with("'Is.Not.Null.Or.Empty' succeeds"));
    assert!(found.message.contains("Consider using 'Is.Not.Null.And.Not.Empty'"));
    assert_eq!(
        found.fix.as_deref(),
        Some("Assert.That(s, Is.Not.Null.And.Not.Empty)")
    );
}

#[test]
fn not_null_or_empty_operator_form_is_misused() {
    let constraint = user_binary(
        BinaryOperator::Or,
        is(vec![link("Not"), link("Null")]),
        is(vec![link("Empty")]),
        names::CONSTRAINT,
        class(names::CONSTRAINT),
    );
    let d = analyze(vec![that(string("s"), constraint)]);
    let found = single(&d, "NUnit2052");
    assert!(found.message.contains("'Is.Not.Null | Is.Empty'"), "{}", found.message);
    assert!(found.message.contains("'Is.Not.Null.And.Not.Empty'"));
    assert_eq!(
        found.fix.as_deref(),
        Some("Assert.That(s, Is.Not.Null.And.Not.Empty)")
    );
}

#[test]
fn not_null_or_empty_is_recognised_from_source_text() {
    let d = analyze(vec![that(string("s"), invalid("Is.Not.Null.Or.Empty"))]);
    let found = single(&d, "NUnit2052");
    assert!(found.message.contains("'Is.Not.Null.And.Not.Empty'"));

    let d = analyze(vec![that(string("s"), invalid("Iz.Not.Null | Iz.Empty"))]);
    let found = single(&d, "NUnit2052");
    assert!(found.message.contains("'Iz.Not.Null.And.Not.Empty'"));

    let d = analyze(vec![that(string("s"), invalid("Is.Not.Null | Iz.Empty"))]);
    assert!(!ids(&d).contains(&"NUnit2052"));
    let d = analyze(vec![that(string("s"), invalid("Is.Not.Null.Or.Empty.And.Unique"))]);
    assert!(!ids(&d).contains(&"NUnit2052"));
}

#[test]
fn value_tuple_with_numeric_item_accepts_within() {
    let tuple = TypeSymbol::generic(
        "System.ValueTuple`2",
        ir::TypeKind::Struct,
        vec![TypeSymbol::string(), TypeSymbol::double()],
    );
    let d = analyze(vec![that(
        local("pair", tuple.clone()),
        is(vec![
            link("EqualTo").with(local("other", tuple)),
            link("Within").with(ir::builder::literal_double(0.1)),
        ]),
    )]);
    assert!(!ids(&d).contains(&"NUnit2047"));
}
