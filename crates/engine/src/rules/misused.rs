use std::sync::OnceLock;

use catalog::HelperClass;
use ir::{BinaryOperator, Operation, OperationKind};
use loader::Severity;
use regex::Regex;

use super::{descriptor, AssertionSite, Rule, RuleContext};
use crate::diagnostic::{Descriptor, FixFacts, Report};

static MISUSED: [Descriptor; 1] = [descriptor(
    "NUnit2052",
    "Misused constraint",
    "'{0}' succeeds for every non-null value as 'Or' only applies to 'Empty'. Consider using '{1}' instead",
    "Assertion",
    Severity::Warning,
    "Fluent operators bind left to right, so 'Not.Null.Or.Empty' reads as '(Not Null) Or Empty'.",
)];

/// Helper class a chain of property references starts from when the
/// chain spells out `names` from the outermost link inward.
fn property_chain(op: &Operation, names: &[&str]) -> Option<HelperClass> {
    let mut current = op.unwrap_implicit_conversions();
    for (idx, name) in names.iter().enumerate() {
        let OperationKind::PropertyReference {
            property,
            instance,
            arguments,
        } = &current.kind
        else {
            return None;
        };
        if property.name != *name || !arguments.is_empty() {
            return None;
        }
        let last = idx + 1 == names.len();
        match (instance, last) {
            (None, true) => {
                return HelperClass::from_metadata_name(&property.containing_type)
                    .filter(|h| h.is_is());
            }
            (Some(next), false) => current = next.unwrap_implicit_conversions(),
            _ => return None,
        }
    }
    None
}

fn text_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(Is|Iz)\s*\.\s*Not\s*\.\s*Null\s*(?:\.\s*Or\s*\.|\|\s*(Is|Iz)\s*\.)\s*Empty$")
            .expect("static pattern")
    })
}

/// Whether the text reads as `Is.Not.Null.Or.Empty` or
/// `Is.Not.Null | Is.Empty`, returning the helper spelled.
fn textual_match(op: &Operation) -> Option<&'static str> {
    let captures = text_pattern().captures(op.syntax.trim())?;
    let helper = captures.get(1)?.as_str();
    if captures.get(2).is_some_and(|other| other.as_str() != helper) {
        return None;
    }
    Some(if helper == "Iz" { "Iz" } else { "Is" })
}

/// Helper name of `Is.Not.Null.Or.Empty` in either of its spellings.
pub(crate) fn not_null_or_empty(op: &Operation) -> Option<&'static str> {
    let op = op.unwrap_implicit_conversions();
    if let Some(helper) = property_chain(op, &["Empty", "Or", "Null", "Not"]) {
        return Some(helper.name());
    }
    if let OperationKind::Binary {
        operator: BinaryOperator::Or,
        left,
        right,
        ..
    } = &op.kind
    {
        let left = property_chain(left, &["Null", "Not"]);
        let right = property_chain(right, &["Empty"]);
        if let (Some(helper), Some(_)) = (left, right) {
            return Some(helper.name());
        }
    }
    textual_match(op)
}

/// `Is.Not.Null.Or.Empty`.
pub struct MisusedConstraints;

impl Rule for MisusedConstraints {
    fn name(&self) -> &'static str {
        "misused-constraints"
    }

    fn descriptors(&self) -> &'static [Descriptor] {
        &MISUSED
    }

    fn analyze<'a>(&self, _cx: &RuleContext<'_>, site: &AssertionSite<'a>, out: &mut Vec<Report<'a>>) {
        let Some(constraint) = site.invocation.constraint else {
            return;
        };
        let Some(helper) = not_null_or_empty(constraint) else {
            return;
        };
        out.push(
            Report::new(&MISUSED[0], constraint)
                .arg(ir::syntax::text(constraint))
                .arg(format!("{helper}.Not.Null.And.Not.Empty"))
                .fix(FixFacts::SplitNotNullOrEmpty),
        );
    }
}
