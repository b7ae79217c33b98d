//! Roles of the members a fluent constraint chain is built from.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Combinator {
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MemberRole {
    /// Modifier applied before the root (`Not`, `All`, `Property("X")`).
    Prefix,
    /// The member producing the constraint itself (`EqualTo`, `Null`).
    Root,
    /// Modifier applied after the root (`IgnoreCase`, `Within(x)`).
    Suffix,
    /// Fluent `.And` / `.Or` / `.With`.
    Combinator(Combinator),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstraintMember {
    pub name: &'static str,
    pub role: MemberRole,
    /// Simple name of the constraint class produced by a root.
    pub constraint: Option<&'static str>,
    /// Declared name of the single meaningful parameter, if any.
    pub parameter: Option<&'static str>,
}

const fn prefix(name: &'static str, parameter: Option<&'static str>) -> ConstraintMember {
    ConstraintMember {
        name,
        role: MemberRole::Prefix,
        constraint: None,
        parameter,
    }
}

const fn root(
    name: &'static str,
    constraint: &'static str,
    parameter: Option<&'static str>,
) -> ConstraintMember {
    ConstraintMember {
        name,
        role: MemberRole::Root,
        constraint: Some(constraint),
        parameter,
    }
}

const fn suffix(name: &'static str, parameter: Option<&'static str>) -> ConstraintMember {
    ConstraintMember {
        name,
        role: MemberRole::Suffix,
        constraint: None,
        parameter,
    }
}

const fn combinator(name: &'static str, kind: Combinator) -> ConstraintMember {
    ConstraintMember {
        name,
        role: MemberRole::Combinator(kind),
        constraint: None,
        parameter: None,
    }
}

const EXPECTED: Option<&str> = Some("expected");

pub static MEMBERS: &[ConstraintMember] = &[
    prefix("Not", None),
    prefix("No", None),
    prefix("All", None),
    prefix("Some", None),
    prefix("None", None),
    prefix("One", None),
    prefix("Exactly", Some("expectedCount")),
    prefix("Items", None),
    prefix("Property", Some("name")),
    prefix("Count", None),
    prefix("Length", None),
    prefix("Message", None),
    prefix("InnerException", None),
    combinator("And", Combinator::And),
    combinator("With", Combinator::And),
    combinator("Or", Combinator::Or),
    root("EqualTo", "EqualConstraint", EXPECTED),
    root("SameAs", "SameAsConstraint", EXPECTED),
    root("Null", "NullConstraint", None),
    root("True", "TrueConstraint", None),
    root("False", "FalseConstraint", None),
    root("NaN", "NaNConstraint", None),
    root("Empty", "EmptyConstraint", None),
    root("Zero", "EqualConstraint", None),
    root("Positive", "GreaterThanConstraint", None),
    root("Negative", "LessThanConstraint", None),
    root("Default", "DefaultConstraint", None),
    root("Unique", "UniqueItemsConstraint", None),
    root("Ordered", "CollectionOrderedConstraint", None),
    root("GreaterThan", "GreaterThanConstraint", EXPECTED),
    root("GreaterThanOrEqualTo", "GreaterThanOrEqualConstraint", EXPECTED),
    root("LessThan", "LessThanConstraint", EXPECTED),
    root("LessThanOrEqualTo", "LessThanOrEqualConstraint", EXPECTED),
    root("AtLeast", "GreaterThanOrEqualConstraint", EXPECTED),
    root("AtMost", "LessThanOrEqualConstraint", EXPECTED),
    root("InRange", "RangeConstraint", Some("from")),
    root("InstanceOf", "InstanceOfTypeConstraint", Some("expectedType")),
    root("TypeOf", "ExactTypeConstraint", Some("expectedType")),
    root("AssignableFrom", "AssignableFromConstraint", Some("expectedType")),
    root("AssignableTo", "AssignableToConstraint", Some("expectedType")),
    root("EquivalentTo", "CollectionEquivalentConstraint", EXPECTED),
    root("SubsetOf", "CollectionSubsetConstraint", EXPECTED),
    root("SupersetOf", "CollectionSupersetConstraint", EXPECTED),
    root("Member", "SomeItemsConstraint", EXPECTED),
    root("Item", "SomeItemsConstraint", EXPECTED),
    root("Contain", "ContainsConstraint", EXPECTED),
    root("Contains", "ContainsConstraint", EXPECTED),
    root("Substring", "SubstringConstraint", EXPECTED),
    root("StartWith", "StartsWithConstraint", EXPECTED),
    root("StartsWith", "StartsWithConstraint", EXPECTED),
    root("EndWith", "EndsWithConstraint", EXPECTED),
    root("EndsWith", "EndsWithConstraint", EXPECTED),
    root("Match", "RegexConstraint", Some("pattern")),
    root("Matches", "PredicateConstraint", Some("predicate")),
    root("ContainKey", "DictionaryContainsKeyConstraint", EXPECTED),
    root("ContainValue", "DictionaryContainsValueConstraint", EXPECTED),
    root("Key", "DictionaryContainsKeyConstraint", EXPECTED),
    root("Value", "DictionaryContainsValueConstraint", EXPECTED),
    root("AnyOf", "AnyOfConstraint", Some("expected")),
    root("Exception", "InstanceOfTypeConstraint", None),
    root("Nothing", "ThrowsNothingConstraint", None),
    root("ArgumentException", "ExceptionTypeConstraint", None),
    root("ArgumentNullException", "ExceptionTypeConstraint", None),
    root("InvalidOperationException", "ExceptionTypeConstraint", None),
    root("TargetInvocationException", "ExceptionTypeConstraint", None),
    suffix("IgnoreCase", None),
    suffix("IgnoreWhiteSpace", None),
    suffix("IgnoreLineEndings", None),
    suffix("Within", Some("amount")),
    suffix("Percent", None),
    suffix("Ulps", None),
    suffix("Days", None),
    suffix("Hours", None),
    suffix("Minutes", None),
    suffix("Seconds", None),
    suffix("Milliseconds", None),
    suffix("Ticks", None),
    suffix("Using", Some("comparer")),
    suffix("UsingPropertiesComparer", None),
    suffix("AsCollection", None),
    suffix("Ascending", None),
    suffix("Descending", None),
    suffix("By", Some("propertyName")),
    suffix("After", Some("delayInMilliseconds")),
    suffix("PollEvery", Some("delayInMilliseconds")),
    suffix("WithSameOffset", None),
];

fn index() -> &'static HashMap<&'static str, &'static ConstraintMember> {
    static INDEX: OnceLock<HashMap<&'static str, &'static ConstraintMember>> = OnceLock::new();
    INDEX.get_or_init(|| MEMBERS.iter().map(|m| (m.name, m)).collect())
}

pub fn member(name: &str) -> Option<&'static ConstraintMember> {
    index().get(name).copied()
}

/// Prefixes that form a complete constraint when nothing follows them,
/// e.g. `Has.Property("Name")`.
pub fn ends_chain(name: &str) -> bool {
    name == "Property"
}

/// Roots comparing the actual value against an expected one with the
/// framework's equality or ordering comparers.
pub fn is_comparison_root(name: &str) -> bool {
    matches!(
        name,
        "GreaterThan"
            | "GreaterThanOrEqualTo"
            | "LessThan"
            | "LessThanOrEqualTo"
            | "AtLeast"
            | "AtMost"
    )
}

/// Prefixes that apply the remainder of the chain to each element.
pub fn is_collection_prefix(name: &str) -> bool {
    matches!(
        name,
        "All" | "Some" | "None" | "One" | "Exactly" | "Items"
    )
}

/// Suffixes replacing the default equality comparer.
pub fn is_comparer_suffix(name: &str) -> bool {
    matches!(name, "Using" | "UsingPropertiesComparer")
}
