use super::builder::*;
use super::syntax::{are_equivalent, render, text};
use super::*;
use serde_json::{self, Value as JsonValue};
// Serde shape of operation trees, type queries and syntax helpers.

const NUNIT_IS: &str = "NUnit.Framework.Is";

#[test]
fn operation_serialization_preserves_meta_and_kind() {
    let op = local("value", TypeSymbol::int32()).at(3, 9).in_file("Tests.cs");

    let json = serde_json::to_string(&op).unwrap();
    let v: JsonValue = serde_json::from_str(&json).unwrap();
    assert_eq!(v["kind"], "local_reference");
    assert_eq!(v["name"], "value");
    assert_eq!(v["meta"]["file"], "Tests.cs");
    assert_eq!(v["meta"]["line"], 3);
    assert_eq!(v["meta"]["column"], 9);

    let deser: Operation = serde_json::from_str(&json).unwrap();
    assert_eq!(deser, op);
}

#[test]
fn operation_deserializes_with_defaults() {
    let json = r#"{"kind":"literal","constant":{"type":"int","value":4},"syntax":"4"}"#;
    let op: Operation = serde_json::from_str(json).unwrap();
    assert!(op.is_constant());
    assert_eq!(op.meta, Meta::default());
    assert!(!op.implicit);
    assert!(op.ty.is_none());
}

#[test]
fn operation_deserialization_fails_without_kind() {
    let json = r#"{"name":"x","syntax":"x"}"#;
    assert!(serde_json::from_str::<Operation>(json).is_err());
}

#[test]
fn operation_deserialization_fails_on_unknown_kind() {
    let json = r#"{"kind":"lambda_soup","syntax":"x"}"#;
    assert!(serde_json::from_str::<Operation>(json).is_err());
}

#[test]
fn nested_invocation_roundtrip() {
    let constraint = static_call(
        NUNIT_IS,
        "EqualTo",
        vec![Argument::named("expected", literal_int(4))],
        Some(class("NUnit.Framework.Constraints.EqualConstraint")),
    );
    let unit = CompilationUnit {
        path: "A.cs".into(),
        source: None,
        operations: vec![statement(constraint)],
    };
    let json = serde_json::to_string(&unit).unwrap();
    let back: CompilationUnit = serde_json::from_str(&json).unwrap();
    assert_eq!(back, unit);
}

#[test]
fn descendants_walk_in_source_order() {
    let sum = binary(
        BinaryOperator::Add,
        local("a", TypeSymbol::int32()),
        local("b", TypeSymbol::int32()),
        TypeSymbol::int32(),
    );
    let names: Vec<String> = sum.descendants().map(text).collect();
    assert_eq!(names, vec!["a + b", "a", "b"]);
}

#[test]
fn find_mut_replaces_nested_node() {
    let mut op = not(local("flag", TypeSymbol::boolean()));
    let target = op
        .find_mut(&|o| matches!(o.kind, OperationKind::LocalReference { .. }))
        .unwrap();
    *target = literal_bool(true);
    assert_eq!(render(&op), "!true");
}

#[test]
fn unwrap_implicit_keeps_explicit_cast() {
    let inner = local("x", TypeSymbol::int32());
    let cast = convert(inner.clone(), TypeSymbol::int64(), ConversionKind::ImplicitNumeric, false);
    let boxed = convert(cast.clone(), TypeSymbol::object(), ConversionKind::Boxing, true);
    assert_eq!(boxed.unwrap_implicit_conversions(), &cast);
    assert_eq!(boxed.unwrap_conversions(), &inner);
}

#[test]
fn implicit_numeric_conversions_follow_widening_table() {
    let c = Compilation::new();
    let int = TypeSymbol::int32();
    let long = TypeSymbol::int64();
    let double = TypeSymbol::double();
    assert_eq!(c.classify_conversion(&int, &long), ConversionKind::ImplicitNumeric);
    assert_eq!(c.classify_conversion(&long, &int), ConversionKind::ExplicitNumeric);
    assert_eq!(c.classify_conversion(&int, &double), ConversionKind::ImplicitNumeric);
    assert_eq!(
        c.classify_conversion(&TypeSymbol::char(), &int),
        ConversionKind::ImplicitNumeric
    );
    assert_eq!(
        c.classify_conversion(&double, &TypeSymbol::decimal()),
        ConversionKind::ExplicitNumeric
    );
    assert_eq!(c.classify_conversion(&int, &int), ConversionKind::Identity);
}

#[test]
fn reference_and_boxing_conversions() {
    let c = Compilation::new();
    let int = TypeSymbol::int32();
    let object = TypeSymbol::object();
    let string = TypeSymbol::string();
    assert_eq!(c.classify_conversion(&int, &object), ConversionKind::Boxing);
    assert_eq!(c.classify_conversion(&object, &int), ConversionKind::Unboxing);
    assert_eq!(c.classify_conversion(&string, &object), ConversionKind::ImplicitReference);
    assert_eq!(c.classify_conversion(&object, &string), ConversionKind::ExplicitReference);
    assert_eq!(c.classify_conversion(&int, &string), ConversionKind::None);
    assert_eq!(
        c.classify_conversion(&string, &TypeSymbol::enumerable_of(TypeSymbol::char())),
        ConversionKind::ImplicitReference
    );
}

#[test]
fn covariant_sequences_convert_implicitly() {
    let c = Compilation::new();
    let strings = TypeSymbol::list_of(TypeSymbol::string());
    let objects = TypeSymbol::enumerable_of(TypeSymbol::object());
    assert_eq!(
        c.classify_conversion(&strings, &objects),
        ConversionKind::ImplicitReference
    );
    // Value-type elements are invariant.
    let ints = TypeSymbol::list_of(TypeSymbol::int32());
    assert_ne!(
        c.classify_conversion(&ints, &objects),
        ConversionKind::ImplicitReference
    );
}

#[test]
fn nullable_conversions() {
    let c = Compilation::new();
    let int = TypeSymbol::int32();
    let nullable_int = TypeSymbol::nullable(int.clone());
    let nullable_long = TypeSymbol::nullable(TypeSymbol::int64());
    assert_eq!(c.classify_conversion(&int, &nullable_int), ConversionKind::ImplicitNullable);
    assert_eq!(
        c.classify_conversion(&nullable_int, &nullable_long),
        ConversionKind::ImplicitNullable
    );
    assert_eq!(c.classify_conversion(&nullable_int, &int), ConversionKind::ExplicitNullable);
    assert_eq!(
        c.classify_conversion(&nullable_int, &TypeSymbol::object()),
        ConversionKind::Boxing
    );
}

#[test]
fn interface_to_open_class_is_explicit_reference() {
    let mut c = Compilation::new();
    c.define(TypeDefinition::interface("App.IShape"));
    c.define(TypeDefinition::class("App.Widget"));
    c.define(TypeDefinition::class("App.Sealed").sealed());
    let shape = TypeSymbol::named("App.IShape", TypeKind::Interface);
    assert_eq!(
        c.classify_conversion(&shape, &class("App.Widget")),
        ConversionKind::ExplicitReference
    );
    assert_eq!(
        c.classify_conversion(&shape, &class("App.Sealed")),
        ConversionKind::None
    );
}

#[test]
fn user_defined_conversions_are_found_on_either_side() {
    let mut c = Compilation::new();
    c.define(
        TypeDefinition::structure("App.Meters")
            .conversion(true, structure("App.Meters"), TypeSymbol::double())
            .conversion(false, TypeSymbol::string(), structure("App.Meters")),
    );
    assert_eq!(
        c.classify_conversion(&structure("App.Meters"), &TypeSymbol::double()),
        ConversionKind::ImplicitUserDefined
    );
    assert_eq!(
        c.classify_conversion(&TypeSymbol::string(), &structure("App.Meters")),
        ConversionKind::ExplicitUserDefined
    );
}

#[test]
fn enumerable_element_types() {
    let c = Compilation::new();
    assert_eq!(
        c.enumerable_element_type(&TypeSymbol::array(TypeSymbol::int32())),
        Enumerable::Typed(TypeSymbol::int32())
    );
    assert_eq!(
        c.enumerable_element_type(&TypeSymbol::string()),
        Enumerable::Typed(TypeSymbol::char())
    );
    assert_eq!(
        c.enumerable_element_type(&TypeSymbol::list_of(TypeSymbol::string())),
        Enumerable::Typed(TypeSymbol::string())
    );
    assert_eq!(
        c.enumerable_element_type(&TypeSymbol::enumerable()),
        Enumerable::Untyped
    );
    assert_eq!(
        c.enumerable_element_type(&TypeSymbol::int32()),
        Enumerable::NotEnumerable
    );
    let dict = TypeSymbol::generic(
        "System.Collections.Generic.Dictionary`2",
        TypeKind::Class,
        vec![TypeSymbol::string(), TypeSymbol::int32()],
    );
    let Enumerable::Typed(pair) = c.enumerable_element_type(&dict) else {
        panic!("dictionary should enumerate pairs");
    };
    assert_eq!(pair.display(), "KeyValuePair<string, int>");
}

#[test]
fn members_are_found_through_interfaces_and_bases() {
    let mut c = Compilation::new();
    c.define(TypeDefinition::class("App.Base").property("Name", TypeSymbol::string()));
    c.define(TypeDefinition::class("App.Derived").with_base(class("App.Base")));
    assert!(c.find_member(&class("App.Derived"), "Name").is_some());
    assert!(c.find_member(&class("App.Derived"), "Missing").is_none());
    assert!(c
        .find_member(&TypeSymbol::list_of(TypeSymbol::int32()), "Count")
        .is_some());
    assert!(c
        .find_member(&TypeSymbol::array(TypeSymbol::int32()), "Length")
        .is_some());
    assert!(c.derives_from(&class("App.Derived"), "App.Base"));
    assert!(!c.derives_from(&class("App.Base"), "App.Derived"));
}

#[test]
fn cyclic_hierarchy_terminates() {
    let mut c = Compilation::new();
    c.define(TypeDefinition::class("App.A").with_base(class("App.B")));
    c.define(TypeDefinition::class("App.B").with_base(class("App.A")));
    assert!(c.base_types(&class("App.A")).len() <= 32);
    assert_eq!(c.classify_conversion(&class("App.A"), &TypeSymbol::int32()), ConversionKind::None);
}

#[test]
fn display_uses_keywords_and_generics() {
    assert_eq!(TypeSymbol::int32().display(), "int");
    assert_eq!(TypeSymbol::list_of(TypeSymbol::string()).display(), "List<string>");
    assert_eq!(TypeSymbol::array(TypeSymbol::double()).display(), "double[]");
    assert_eq!(TypeSymbol::nullable(TypeSymbol::int32()).display(), "int?");
}

#[test]
fn equivalence_ignores_location_and_implicit_conversions() {
    let a = property(local("str", TypeSymbol::string()), "Length", TypeSymbol::int32()).at(1, 1);
    let b = convert(
        property(local("str", TypeSymbol::string()), "Length", TypeSymbol::int32()).at(9, 4),
        TypeSymbol::object(),
        ConversionKind::Boxing,
        true,
    );
    assert!(are_equivalent(&a, &b));
    let c = property(local("other", TypeSymbol::string()), "Length", TypeSymbol::int32());
    assert!(!are_equivalent(&a, &c));
}

#[test]
fn invalid_code_is_never_equivalent() {
    assert!(!are_equivalent(&invalid("x."), &invalid("x.")));
}

#[test]
fn render_regenerates_fluent_chain() {
    let is_not = static_property(NUNIT_IS, "Not", class("NUnit.Framework.Constraints.ConstraintExpression"));
    let null = property_of(
        is_not,
        "NUnit.Framework.Constraints.ConstraintExpression",
        "Null",
        class("NUnit.Framework.Constraints.NullConstraint"),
    );
    assert_eq!(null.syntax, "Is.Not.Null");

    let trimmed = call(local("str", TypeSymbol::string()), "System.String", "Trim", vec![], Some(TypeSymbol::string()));
    assert_eq!(trimmed.syntax, "str.Trim()");

    let cast = convert(local("m", structure("App.Meters")), TypeSymbol::double(), ConversionKind::ExplicitUserDefined, false);
    assert_eq!(cast.syntax, "(double)m");
}
