//! Suffix modifiers applied to operands they have no effect on.

use ir::types::{DATE_TIME, DATE_TIME_OFFSET, KEY_VALUE_PAIR, TIME_SPAN};
use ir::{Compilation, Enumerable, SpecialType, TypeSymbol};
use loader::Severity;

use super::{
    actual_type, descriptor, effective_actual_type, is_open, tests_thrown_exception, AssertionSite,
    Rule, RuleContext,
};
use crate::constraint::ConstraintExpressionPart;
use crate::diagnostic::{Descriptor, Report};

static MODIFIERS: [Descriptor; 2] = [
    descriptor(
        "NUnit2047",
        "Incompatible types for Within constraint",
        "The Within modifier cannot be used with values of type '{0}'",
        "Assertion",
        Severity::Warning,
        "Tolerances only apply to numeric, date and time values or collections of them. Elsewhere the modifier is ignored.",
    ),
    descriptor(
        "NUnit2048",
        "Incompatible types for IgnoreCase modifier",
        "The IgnoreCase modifier should only be used with string or char values, not '{0}'",
        "Assertion",
        Severity::Warning,
        "IgnoreCase only affects string and char comparisons. Elsewhere the modifier is ignored.",
    ),
];

/// Nesting limit when looking through collections and pairs.
const MAX_DEPTH: usize = 4;

/// Whether `ty` or something it contains satisfies `leaf`.
fn supports(
    compilation: &Compilation,
    ty: &TypeSymbol,
    leaf: fn(&TypeSymbol) -> bool,
    depth: usize,
) -> bool {
    let ty = ty.strip_nullable();
    if depth > MAX_DEPTH || is_open(ty) || leaf(ty) {
        return true;
    }
    let is_pair = ty.name == KEY_VALUE_PAIR
        || ty.name.starts_with("System.ValueTuple`")
        || ty.name.starts_with("System.Tuple`");
    if is_pair {
        return ty
            .type_arguments
            .iter()
            .any(|arg| supports(compilation, arg, leaf, depth + 1));
    }
    match compilation.enumerable_element_type(ty) {
        Enumerable::Typed(element) => supports(compilation, &element, leaf, depth + 1),
        Enumerable::Untyped => true,
        Enumerable::NotEnumerable => false,
    }
}

fn accepts_tolerance(ty: &TypeSymbol) -> bool {
    ty.is_numeric() || matches!(ty.name.as_str(), DATE_TIME | DATE_TIME_OFFSET | TIME_SPAN)
}

fn accepts_ignore_case(ty: &TypeSymbol) -> bool {
    ty.is_string() || ty.special_type() == Some(SpecialType::Char)
}

/// Type the modifier of `part` applies to: the expected value when it is
/// typed, otherwise the actual value.
fn operand_type(
    cx: &RuleContext<'_>,
    part: &ConstraintExpressionPart<'_>,
    actual: Option<&TypeSymbol>,
) -> Option<TypeSymbol> {
    if let Some(expected) = part.expected_argument().and_then(|e| e.operand_type()) {
        if !is_open(expected) {
            return Some(expected.clone());
        }
    }
    effective_actual_type(cx.compilation, part, actual?)
}

/// `Within` and `IgnoreCase` on operands they cannot affect.
pub struct ModifierUsage;

impl Rule for ModifierUsage {
    fn name(&self) -> &'static str {
        "modifier-usage"
    }

    fn descriptors(&self) -> &'static [Descriptor] {
        &MODIFIERS
    }

    fn analyze<'a>(&self, cx: &RuleContext<'_>, site: &AssertionSite<'a>, out: &mut Vec<Report<'a>>) {
        if tests_thrown_exception(site) {
            return;
        }
        let actual = actual_type(site.invocation.actual);
        for part in site.parts() {
            if part.is_unknown_shape() || part.has_unknown_expressions() || part.has_custom_comparer() {
                continue;
            }
            for suffix in part.suffixes.iter().copied() {
                let (descriptor, leaf): (_, fn(&TypeSymbol) -> bool) = match suffix.member_name() {
                    Some("Within") => (&MODIFIERS[0], accepts_tolerance),
                    Some("IgnoreCase") => (&MODIFIERS[1], accepts_ignore_case),
                    _ => continue,
                };
                let Some(ty) = operand_type(cx, part, actual) else {
                    continue;
                };
                if !supports(cx.compilation, &ty, leaf, 0) {
                    out.push(Report::new(descriptor, suffix).arg(ty.display()));
                }
            }
        }
    }
}
