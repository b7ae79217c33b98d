//! Constraints that can never apply to the type of the actual value.

use catalog::members::is_collection_prefix;
use ir::{ConstantValue, Enumerable, Operation, TypeSymbol};
use loader::Severity;

use super::{
    actual_type, descriptor, effective_actual_type, is_open, tests_thrown_exception, AssertionSite,
    Rule, RuleContext,
};
use crate::constraint::ConstraintExpressionPart;
use crate::diagnostic::{Descriptor, Report};

static ACTUAL_TYPE: [Descriptor; 4] = [
    descriptor(
        "NUnit2022",
        "Missing property required for constraint",
        "Constraint requires the actual value of type '{0}' to have a property '{1}'",
        "Assertion",
        Severity::Error,
        "The property constraint looks the member up at run time and fails when the actual type has no such property.",
    ),
    descriptor(
        "NUnit2023",
        "Invalid NullConstraint usage",
        "The Null constraint always fails as the actual value of type '{0}' is a non-nullable value type",
        "Assertion",
        Severity::Error,
        "A non-nullable value type can never be null.",
    ),
    descriptor(
        "NUnit2024",
        "Wrong actual type used with String Constraint",
        "The {0} constraint cannot be used with an actual value of type '{1}'",
        "Assertion",
        Severity::Error,
        "String constraints only accept string actual values.",
    ),
    descriptor(
        "NUnit2025",
        "Wrong actual type used with ContainsConstraint",
        "The ContainsConstraint cannot be used with an actual value of type '{0}'",
        "Assertion",
        Severity::Error,
        "A string expected value is searched for in a string or in a collection of strings.",
    ),
];

const STRING_ROOTS: &[&str] = &[
    "Substring",
    "StartWith",
    "StartsWith",
    "EndWith",
    "EndsWith",
    "Match",
];

/// Property a property-reading prefix requires on the current type.
fn required_property<'o>(prefix: &'o Operation) -> Option<&'o str> {
    match prefix.member_name()? {
        "Property" => match &prefix.arguments().first()?.value.unwrap_conversions().constant {
            Some(ConstantValue::Str(name)) => Some(name),
            _ => None,
        },
        name @ ("Count" | "Length" | "Message" | "InnerException") => Some(name),
        _ => None,
    }
}

/// `Has.Property("X")` or `Has.Count` on a type that lacks the member.
fn missing_property<'a>(
    cx: &RuleContext<'_>,
    part: &ConstraintExpressionPart<'a>,
    actual: &TypeSymbol,
    out: &mut Vec<Report<'a>>,
) {
    let mut current = actual.clone();
    let links = part.prefixes.iter().copied().chain(part.root);
    for link in links {
        let Some(name) = link.member_name() else {
            return;
        };
        if matches!(name, "Not" | "No") {
            continue;
        }
        if is_collection_prefix(name) {
            match cx.compilation.enumerable_element_type(&current) {
                Enumerable::Typed(element) => current = element,
                _ => return,
            }
            continue;
        }
        let Some(property) = required_property(link) else {
            return;
        };
        if is_open(&current) || !cx.compilation.is_known(&current) {
            return;
        }
        match cx.compilation.find_member(&current, property) {
            Some(member) => match &member.ty {
                Some(ty) => current = ty.clone(),
                None => return,
            },
            None => {
                out.push(
                    Report::new(&ACTUAL_TYPE[0], link)
                        .arg(current.display())
                        .arg(property),
                );
                return;
            }
        }
    }
}

fn is_string_or_strings(cx: &RuleContext<'_>, ty: &TypeSymbol) -> bool {
    if is_open(ty) || ty.is_string() {
        return true;
    }
    match cx.compilation.enumerable_element_type(ty) {
        Enumerable::Typed(element) => is_open(&element) || element.is_string(),
        Enumerable::Untyped => true,
        Enumerable::NotEnumerable => false,
    }
}

/// Property, Null, string and Contains constraints checked against the
/// actual value's type.
pub struct ActualTypeMismatch;

impl Rule for ActualTypeMismatch {
    fn name(&self) -> &'static str {
        "actual-type-mismatch"
    }

    fn descriptors(&self) -> &'static [Descriptor] {
        &ACTUAL_TYPE
    }

    fn analyze<'a>(&self, cx: &RuleContext<'_>, site: &AssertionSite<'a>, out: &mut Vec<Report<'a>>) {
        if site.invocation.classic().is_some() || tests_thrown_exception(site) {
            return;
        }
        let Some(actual) = actual_type(site.invocation.actual) else {
            return;
        };
        for part in site.parts() {
            if part.is_unknown_shape() || part.has_unknown_expressions() {
                continue;
            }
            missing_property(cx, part, actual, out);

            let Some(root) = part.root else {
                continue;
            };
            let root_name = part.root_name().unwrap_or_default();

            if root_name == "Contain" || root_name == "Contains" {
                let expects_string = part
                    .expected_argument()
                    .and_then(|e| e.operand_type())
                    .is_some_and(TypeSymbol::is_string);
                if part.is_plain() && expects_string && !is_string_or_strings(cx, actual) {
                    out.push(Report::new(&ACTUAL_TYPE[3], root).arg(actual.display()));
                }
                continue;
            }

            let Some(effective) = effective_actual_type(cx.compilation, part, actual) else {
                continue;
            };
            if is_open(&effective) {
                continue;
            }
            if root_name == "Null" {
                if effective.is_value_type() && !effective.is_nullable_value_type() {
                    out.push(Report::new(&ACTUAL_TYPE[1], root).arg(effective.display()));
                }
            } else if STRING_ROOTS.contains(&root_name) && !effective.is_string() {
                out.push(
                    Report::new(&ACTUAL_TYPE[2], root)
                        .arg(root_name)
                        .arg(effective.display()),
                );
            }
        }
    }
}
