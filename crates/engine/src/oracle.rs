//! Compile-time mirror of the framework's runtime equality rules.
//!
//! Every check is permissive: whenever the types leave room for the
//! framework to consider two values equal, the answer is `true`. Rules only
//! report when the answer is a definite `false`.

use ir::types::{EQUATABLE, KEY_VALUE_PAIR};
use ir::{Compilation, ConversionKind, Enumerable, TypeSymbol};

const TUPLES: &[&str] = &[
    KEY_VALUE_PAIR,
    "System.ValueTuple`2",
    "System.Tuple`2",
];

/// Nesting limit for element-wise comparisons of enumerables and tuples.
const MAX_DEPTH: usize = 8;

/// Whether a value of type `actual` can compare equal to one of type
/// `expected` under the framework's equality comparer.
pub fn can_be_equal(compilation: &Compilation, actual: &TypeSymbol, expected: &TypeSymbol) -> bool {
    can_be_equal_at(compilation, actual, expected, 0)
}

fn can_be_equal_at(
    compilation: &Compilation,
    actual: &TypeSymbol,
    expected: &TypeSymbol,
    depth: usize,
) -> bool {
    if depth > MAX_DEPTH || actual.is_unresolved() || expected.is_unresolved() {
        return true;
    }
    let actual = actual.strip_nullable();
    let expected = expected.strip_nullable();
    if actual == expected {
        return true;
    }

    let forward = compilation.classify_conversion(actual, expected);
    let backward = compilation.classify_conversion(expected, actual);
    let either = |pred: fn(ConversionKind) -> bool| pred(forward) || pred(backward);

    if either(|c| matches!(c, ConversionKind::Identity | ConversionKind::ImplicitNumeric)) {
        return true;
    }
    if either(|c| {
        matches!(
            c,
            ConversionKind::ImplicitReference | ConversionKind::Boxing
        )
    }) {
        return true;
    }
    if either(ConversionKind::is_user_defined) || equatable(compilation, actual, expected) {
        return true;
    }

    match (
        compilation.enumerable_element_type(actual),
        compilation.enumerable_element_type(expected),
    ) {
        (Enumerable::Typed(a), Enumerable::Typed(e)) => {
            return can_be_equal_at(compilation, &a, &e, depth + 1);
        }
        (Enumerable::NotEnumerable, _) | (_, Enumerable::NotEnumerable) => {}
        _ => return true,
    }

    if actual.is_numeric() && expected.is_numeric() {
        return true;
    }
    // Interfaces against non-sealed classes may meet in a derived type.
    if either(|c| c == ConversionKind::ExplicitReference) {
        return true;
    }
    if let Some(pairwise) = same_shape_tuples(compilation, actual, expected, depth) {
        return pairwise;
    }
    false
}

/// `IEquatable<Other>` implemented by either side.
fn equatable(compilation: &Compilation, a: &TypeSymbol, b: &TypeSymbol) -> bool {
    let implements = |ty: &TypeSymbol, other: &TypeSymbol| {
        compilation
            .implementations_of(ty, EQUATABLE)
            .iter()
            .any(|i| i.type_arguments.first() == Some(other))
    };
    implements(a, b) || implements(b, a)
}

fn same_shape_tuples(
    compilation: &Compilation,
    a: &TypeSymbol,
    b: &TypeSymbol,
    depth: usize,
) -> Option<bool> {
    if a.name != b.name || !TUPLES.contains(&a.name.as_str()) {
        return None;
    }
    if a.type_arguments.len() != b.type_arguments.len() {
        return Some(false);
    }
    Some(
        a.type_arguments
            .iter()
            .zip(&b.type_arguments)
            .all(|(x, y)| can_be_equal_at(compilation, x, y, depth + 1)),
    )
}

/// Whether values of the two types can ever be the same object.
pub fn can_be_same_type(compilation: &Compilation, actual: &TypeSymbol, expected: &TypeSymbol) -> bool {
    if actual.is_unresolved() || expected.is_unresolved() || actual == expected {
        return true;
    }
    let related = |c: ConversionKind| {
        matches!(
            c,
            ConversionKind::Identity
                | ConversionKind::ImplicitReference
                | ConversionKind::ExplicitReference
                | ConversionKind::Boxing
                | ConversionKind::Unboxing
        )
    };
    related(compilation.classify_conversion(actual, expected))
        || related(compilation.classify_conversion(expected, actual))
}

/// Whether the framework's default comparer can order `actual` against
/// `expected`.
pub fn can_be_compared(compilation: &Compilation, actual: &TypeSymbol, expected: &TypeSymbol) -> bool {
    if actual.is_unresolved() || expected.is_unresolved() {
        return true;
    }
    let actual = actual.strip_nullable();
    let expected = expected.strip_nullable();
    if actual == expected || actual.is_object() || expected.is_object() {
        return true;
    }
    if actual.is_numeric() && expected.is_numeric() {
        return true;
    }
    let compatible = |c: ConversionKind| {
        c.is_implicit() || c.is_user_defined() || c == ConversionKind::ExplicitReference
    };
    compatible(compilation.classify_conversion(actual, expected))
        || compatible(compilation.classify_conversion(expected, actual))
}
